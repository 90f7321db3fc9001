//! Tonearm Music Importer
//!
//! Imports audio files into a Tonearm library.
//!
//! # Features
//!
//! - File scanning (directories or individual files)
//! - ID3v2 metadata extraction, with file-name defaults for untagged files
//! - Duration probing for formats whose tags carry none
//! - Bounded parallel parsing on the tokio blocking pool
//! - Progress reporting
//!
//! # Architecture
//!
//! - `scanner`: Filesystem scanning for audio files
//! - `importer`: Orchestration of the import process

mod config;
mod error;
mod types;

pub mod importer;
pub mod scanner;

pub use config::{ImportConfig, SUPPORTED_EXTENSIONS};
pub use error::{ImportError, Result};
pub use importer::Importer;
pub use scanner::FileScanner;
pub use types::{ImportProgress, ImportSummary};
