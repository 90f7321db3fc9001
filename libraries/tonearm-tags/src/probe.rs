/// Duration probe backed by lofty
use crate::error::TagError;
use lofty::AudioFile;
use std::path::Path;
use tonearm_core::DurationProbe;

/// Reads a file's audio properties to resolve its duration
///
/// The tag does not store duration, so importers ask this probe instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyDurationProbe;

impl LoftyDurationProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }
}

impl DurationProbe for LoftyDurationProbe {
    fn probe_duration(&self, source: &Path) -> tonearm_core::Result<f64> {
        if !source.exists() {
            return Err(TagError::FileNotFound(source.display().to_string()).into());
        }

        let tagged_file = lofty::read_from_path(source).map_err(TagError::from)?;
        let secs = tagged_file.properties().duration().as_secs_f64();

        if secs > 0.0 {
            Ok(secs)
        } else {
            Err(TagError::NoDuration(source.display().to_string()).into())
        }
    }
}
