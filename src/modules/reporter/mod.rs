pub mod json;
pub mod models;
