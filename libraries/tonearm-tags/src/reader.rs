/// File-backed metadata reader
use crate::error::TagError;
use crate::parser::TagParser;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tonearm_core::{MetadataReader, TrackMetadata};

/// Read at most `limit` bytes from the start of a file
pub fn read_prefix(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buffer = Vec::with_capacity(limit.min(64 * 1024));
    file.take(limit as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Metadata reader using the built-in ID3v2 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3MetadataReader {
    parser: TagParser,
}

impl Id3MetadataReader {
    /// Create a new metadata reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader around a configured parser
    pub fn with_parser(parser: TagParser) -> Self {
        Self { parser }
    }
}

impl MetadataReader for Id3MetadataReader {
    fn read(&self, path: &Path) -> tonearm_core::Result<TrackMetadata> {
        if !path.exists() {
            return Err(TagError::FileNotFound(path.display().to_string()).into());
        }

        let buffer = read_prefix(path, self.parser.prefix_bytes()).map_err(TagError::from)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self.parser.parse(&buffer, &file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_nonexistent_file_returns_error() {
        let reader = Id3MetadataReader::new();
        let result = reader.read(Path::new("/nonexistent/file.mp3"));
        assert!(result.is_err());
    }

    #[test]
    fn prefix_is_bounded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[7u8; 4096]).unwrap();

        let prefix = read_prefix(file.path(), 100).unwrap();
        assert_eq!(prefix.len(), 100);

        let whole = read_prefix(file.path(), 1 << 20).unwrap();
        assert_eq!(whole.len(), 4096);
    }
}
