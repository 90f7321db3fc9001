/// Tag-reading errors
use thiserror::Error;
use tonearm_core::CoreError;

/// Result type alias using `TagError`
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while reading files for metadata
///
/// Tag parsing itself never fails; these cover the I/O around it.
#[derive(Error, Debug)]
pub enum TagError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The probe could not determine a duration
    #[error("No duration available for {0}")]
    NoDuration(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<TagError> for CoreError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::Io(io) => CoreError::Io(io),
            other => CoreError::metadata(other.to_string()),
        }
    }
}
