//! Tonearm command-line tool
//!
//! Inspects ID3 tags and imports directories into an in-memory library.

pub mod config;
pub mod error;
pub mod report;

pub use config::AppConfig;
pub use error::{CliError, Result};
