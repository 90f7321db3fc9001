//! Importer configuration

/// Audio file extensions picked up by directory scans
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Import configuration
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Files parsed concurrently (default: num_cpus)
    pub workers: usize,

    /// Lower-case extensions considered audio files
    pub extensions: Vec<String>,

    /// Follow symbolic links while scanning (default: false)
    pub follow_links: bool,

    /// Maximum directory depth to scan (default: unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl ImportConfig {
    /// Set the number of concurrent workers (at least one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
