pub mod controller;
pub mod templates;
