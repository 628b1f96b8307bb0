pub mod config;

pub mod errors;
pub mod model;
pub mod types;
