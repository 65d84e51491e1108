pub mod precision;
pub mod valid;
