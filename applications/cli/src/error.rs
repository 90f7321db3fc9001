/// CLI error types
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(#[from] tonearm_importer::ImportError),

    #[error("Library error: {0}")]
    Core(#[from] tonearm_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
