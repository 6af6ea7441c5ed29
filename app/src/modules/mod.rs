pub mod auth;
pub mod car;
pub mod common;
pub mod driver;
pub mod index;
pub mod manufacturer;
