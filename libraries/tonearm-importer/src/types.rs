//! Import progress and results

use serde::Serialize;
use std::path::PathBuf;
use tonearm_core::TrackId;

/// Progress update during import
#[derive(Debug, Clone, Serialize)]
pub struct ImportProgress {
    /// Total number of files to import
    pub total_files: usize,

    /// Number of files processed so far
    pub processed_files: usize,

    /// Number of files successfully imported
    pub successful_imports: usize,

    /// Number of files that failed to import
    pub failed_imports: usize,

    /// File most recently finished
    pub current_file: Option<PathBuf>,
}

impl ImportProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            processed_files: 0,
            successful_imports: 0,
            failed_imports: 0,
            current_file: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed_files >= self.total_files
    }

    pub fn percentage(&self) -> f32 {
        if self.total_files == 0 {
            return 100.0;
        }
        (self.processed_files as f32 / self.total_files as f32) * 100.0
    }
}

/// Summary of an import operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Total files processed
    pub total_processed: usize,

    /// Successfully imported
    pub successful: usize,

    /// Failed to import
    pub failed: usize,

    /// IDs of imported tracks, in input order
    pub imported: Vec<TrackId>,

    /// Error messages for failed imports
    pub errors: Vec<(PathBuf, String)>,

    /// Duration of import operation
    pub duration_ms: u64,
}

impl ImportSummary {
    pub fn summary_text(&self) -> String {
        format!(
            "Import complete: {} successful, {} failed ({} ms)",
            self.successful, self.failed, self.duration_ms
        )
    }
}
