pub mod dto;
pub mod error_codes;
pub mod extractors;
pub mod forms;
pub mod responses;
pub mod validators;
