//! Delivery of finished documents.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

/// Receives the finished document. The export engine calls `deliver` exactly once per
/// successful export and never after a failure.
pub trait DownloadSink {
    fn deliver(&mut self, filename: &str, bytes: Vec<u8>);
}

/// Holds the delivered document in memory (the HTTP handler streams it back).
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Option<Download>,
    pub deliveries: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, filename: &str, bytes: Vec<u8>) {
        self.deliveries += 1;
        self.delivered = Some(Download {
            filename: filename.to_string(),
            bytes,
        });
    }
}

/// Writes `bytes` into `dir/filename` atomically: the file appears complete or not at all.
pub fn archive_to_dir(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    let target = dir.join(filename);
    tmp.persist(&target).map_err(|e| e.error)?;
    info!(path = %target.display(), bytes = bytes.len(), "Archived exported document");
    Ok(target)
}
