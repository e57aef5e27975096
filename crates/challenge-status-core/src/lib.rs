#![forbid(unsafe_code)]

pub mod challenge;
pub mod config;
pub mod errors;
pub mod schema;
pub mod traits;
pub mod types;
