/// ShaderStorage trait and the filesystem implementation

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use crate::error::{Error, Result};

/// Source of shader binaries
pub trait ShaderStorage {
    /// Read a whole shader binary
    ///
    /// The size is checked against `max_size` before any content is read,
    /// and no more than `max_size` bytes are accepted from the read itself.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if nothing exists at `path`
    /// - `Error::NotAFile` if `path` is a directory or other non-file
    /// - `Error::TooLarge` if the binary is larger than `max_size`
    /// - `Error::Io` for any other read failure
    fn read(&self, path: &Path, max_size: u64) -> Result<Vec<u8>>;
}

/// Reads shader binaries from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl FileStorage {
    pub fn new() -> Self {
        Self
    }
}

fn io_error(path: &Path, error: std::io::Error) -> Error {
    match error.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
    }
}

fn too_large(path: &Path, size: u64, max: u64) -> Error {
    Error::TooLarge {
        path: path.to_path_buf(),
        size,
        max,
    }
}

impl ShaderStorage for FileStorage {
    fn read(&self, path: &Path, max_size: u64) -> Result<Vec<u8>> {
        let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
        if !metadata.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        if metadata.len() > max_size {
            return Err(too_large(path, metadata.len(), max_size));
        }

        // The file may have grown since the metadata call
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let mut data = Vec::with_capacity(metadata.len() as usize);
        file.take(max_size.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| io_error(path, e))?;
        if data.len() as u64 > max_size {
            return Err(too_large(path, data.len() as u64, max_size));
        }
        Ok(data)
    }
}

#[cfg(test)]
#[path = "shader_storage_tests.rs"]
mod tests;
