pub mod db;
pub mod error;
pub mod filters;
pub mod pagination;
