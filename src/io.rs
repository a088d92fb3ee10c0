//! File-stream acquisition.
//!
//! The only place besides the engine's final write that touches the
//! filesystem.

use crate::error::CryptError;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Open `path` for reading.
///
/// - missing path → [`CryptError::FileNotFound`]
/// - directory, permission error, anything else → [`CryptError::OpenFailure`]
pub fn open_stream(path: &Path) -> Result<File, CryptError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CryptError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(CryptError::OpenFailure {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if metadata.is_dir() {
        return Err(CryptError::OpenFailure {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::Other, "path is a directory"),
        });
    }

    File::open(path).map_err(|source| CryptError::OpenFailure {
        path: path.to_path_buf(),
        source,
    })
}
