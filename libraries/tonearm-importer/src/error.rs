//! Error types for the importer

use thiserror::Error;
use tonearm_core::CoreError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library error: {0}")]
    Core(#[from] CoreError),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Import task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
