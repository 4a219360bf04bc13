/// In-memory ShaderStorage for unit tests
///
/// Holds binaries keyed by path, treats registered directories as non-files,
/// and records every read so tests can count storage I/O.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use rustc_hash::{FxHashMap, FxHashSet};
use crate::backend::ShaderStage;
use crate::config::ShaderCacheConfig;
use crate::error::{Error, Result};
use crate::storage::ShaderStorage;

#[derive(Debug, Default)]
pub struct MockStorage {
    files: FxHashMap<PathBuf, Vec<u8>>,
    directories: FxHashSet<PathBuf>,
    reads: RefCell<Vec<PathBuf>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), data.into());
    }

    /// Store a binary where `config` expects the shader `name` of `stage`
    ///
    /// The content is the qualified name itself so every shader is non-empty
    /// and distinct.
    pub fn insert_shader(&mut self, config: &ShaderCacheConfig, stage: ShaderStage, name: &str) {
        let shader_name = config.shader_name(stage, name);
        let path = config.shader_path(&shader_name);
        self.insert(path, shader_name.into_bytes());
    }

    pub fn insert_directory(&mut self, path: impl Into<PathBuf>) {
        self.directories.insert(path.into());
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn reads_of(&self, path: &Path) -> usize {
        self.reads.borrow().iter().filter(|p| p.as_path() == path).count()
    }
}

impl ShaderStorage for MockStorage {
    fn read(&self, path: &Path, max_size: u64) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push(path.to_path_buf());

        if self.directories.contains(path) {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        let data = self.files.get(path)
            .ok_or_else(|| Error::NotFound(path.to_path_buf()))?;
        if data.len() as u64 > max_size {
            return Err(Error::TooLarge {
                path: path.to_path_buf(),
                size: data.len() as u64,
                max: max_size,
            });
        }
        Ok(data.clone())
    }
}
