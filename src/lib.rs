pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod models;

pub use api::Client;
pub use error::{ApiError, ErrorKind, Result};

#[cfg(test)]
mod config_tests;
