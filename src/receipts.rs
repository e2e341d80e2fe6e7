//! Locating saved order confirmations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptLookupError {
    #[error("could not list receipts in {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no receipts found in {}", .0.display())]
    Empty(PathBuf),
}

/// The most recently modified regular file in `dir`.
pub fn latest_receipt(dir: &Path) -> Result<PathBuf, ReceiptLookupError> {
    let io_err = |source| ReceiptLookupError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let metadata = entry.metadata().map_err(io_err)?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().map_err(io_err)?;
        match latest {
            Some((newest, _)) if newest >= modified => {}
            _ => latest = Some((modified, entry.path())),
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| ReceiptLookupError::Empty(dir.to_path_buf()))
}
