//! Moving a serialized selection through a file.
//!
//! The blob is opaque to this layer; the file holds exactly the bytes
//! produced by [`CopiedSelection::serialize`].

use bevy::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::codec::SerializationError;
use super::types::CopiedSelection;

#[derive(Debug, Error)]
pub enum ClipboardFileError {
    #[error("failed to read/write clipboard file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard file {path} is not valid copied map data: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },
}

/// Write `selection` to `path`, creating parent directories as needed
pub fn write_selection_file(path: &Path, selection: &CopiedSelection) -> Result<(), ClipboardFileError> {
    write_selection_bytes(path, &selection.serialize())?;
    debug!("Wrote {} copied entries to {:?}", selection.len(), path);
    Ok(())
}

/// Write an already serialized selection to `path` unchanged
pub fn write_selection_bytes(path: &Path, bytes: &[u8]) -> Result<(), ClipboardFileError> {
    let io_err = |source| ClipboardFileError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    std::fs::write(path, bytes).map_err(io_err)?;
    info!("Wrote {} bytes of copied map data to {:?}", bytes.len(), path);
    Ok(())
}

/// Read the raw selection bytes stored at `path` without decoding them
pub fn read_selection_bytes(path: &Path) -> Result<Vec<u8>, ClipboardFileError> {
    std::fs::read(path).map_err(|source| ClipboardFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a selection previously written with [`write_selection_file`].
///
/// `Ok(None)` means the file held fewer bytes than the count header.
pub fn read_selection_file(path: &Path) -> Result<Option<CopiedSelection>, ClipboardFileError> {
    let bytes = read_selection_bytes(path)?;

    CopiedSelection::deserialize(&bytes).map_err(|source| ClipboardFileError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}
