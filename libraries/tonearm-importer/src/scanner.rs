//! File scanning for audio files

use crate::config::{ImportConfig, SUPPORTED_EXTENSIONS};
use crate::{ImportError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Scanner for audio files in directories
#[derive(Debug, Clone)]
pub struct FileScanner {
    /// Lower-case extensions to accept
    extensions: Vec<String>,

    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse
    max_depth: Option<usize>,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self {
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl FileScanner {
    /// Create a new file scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner matching an import configuration
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
            follow_links: config.follow_links,
            max_depth: config.max_depth,
        }
    }

    /// Set whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Scan a directory for audio files
    ///
    /// Results are sorted so imports run in a stable order. Entries that
    /// cannot be read are skipped with a warning.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(ImportError::InvalidPath(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let mut walker = WalkDir::new(path).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut audio_files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_audio_file(entry.path()) {
                audio_files.push(entry.into_path());
            }
        }

        audio_files.sort();
        debug!(dir = %path.display(), found = audio_files.len(), "Directory scanned");
        Ok(audio_files)
    }

    /// Check if a path has a supported extension
    pub fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }
}
