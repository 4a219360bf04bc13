/// Reference-counted shader program cache.
///
/// Programs are requested by symbolic shader names. Every shader name is
/// loaded once and shared by all programs using it; a shader object is
/// destroyed when the last program citing it goes away.
///
/// Three maps make up the state:
/// - the shader store (all loaded shaders, keyed by versioned `ShaderKey`)
/// - `recent`: name -> most recently loaded entry, used for deduplication
/// - `programs`: live program handle -> the shader keys it was linked from
///
/// Reloading always reads shaders from storage again. A batched reload reads
/// each distinct shader name once, however many programs of the batch use it.

use rustc_hash::FxHashMap;
use crate::backend::{Handle, ShaderBackend, ShaderDesc, ShaderStage};
use crate::config::ShaderCacheConfig;
use crate::error::Result;
use crate::storage::{FileStorage, ShaderStorage};
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use super::program::{ProgramDescriptor, ProgramShaders};
use super::shader_key::ShaderKey;
use super::shader_store::{RecentMap, ShaderEntry, ShaderStore};

const SOURCE: &str = "galaxy3d::ShaderCache";

/// Counters of backend and storage work done by a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Shaders read from storage and created on the backend
    pub shader_loads: u64,
    /// Shader requests served from an already loaded entry
    pub shader_reuses: u64,
    /// Shader objects destroyed after their last reference went away
    pub shader_destroys: u64,
    /// Programs successfully linked
    pub program_links: u64,
    /// Programs destroyed by unload or reload
    pub program_destroys: u64,
}

/// Shader program cache over a graphics backend and a binary storage
///
/// # Example
///
/// ```ignore
/// let mut cache = ShaderCache::new(backend, ShaderCacheConfig::default())?;
/// let program = cache.load_program("basic", "basic")?;  // shaders/basic.vert.bin + basic.frag.bin
/// let blur = cache.load_compute("blur")?;               // shaders/blur.comp.bin
///
/// let mut programs = [program, blur];
/// cache.reload_batch(&mut programs)?;
///
/// cache.unload_all();
/// ```
pub struct ShaderCache<B: ShaderBackend, S: ShaderStorage = FileStorage> {
    backend: B,
    storage: S,
    config: ShaderCacheConfig,
    store: ShaderStore,
    recent: RecentMap,
    programs: FxHashMap<Handle, ProgramDescriptor>,
    stats: CacheStats,
}

impl<B: ShaderBackend> ShaderCache<B, FileStorage> {
    /// Create a cache reading shader binaries from the filesystem
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `config` does not validate.
    pub fn new(backend: B, config: ShaderCacheConfig) -> Result<Self> {
        Self::with_storage(backend, FileStorage::new(), config)
    }
}

impl<B: ShaderBackend, S: ShaderStorage> ShaderCache<B, S> {
    /// Create a cache reading shader binaries from `storage`
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `config` does not validate.
    pub fn with_storage(backend: B, storage: S, config: ShaderCacheConfig) -> Result<Self> {
        config.validate()?;
        engine_debug!(SOURCE, "Shader cache created (base dir '{}')", config.base_dir().display());
        Ok(Self {
            backend,
            storage,
            config,
            store: ShaderStore::new(),
            recent: RecentMap::default(),
            programs: FxHashMap::default(),
            stats: CacheStats::default(),
        })
    }

    // ===== LOAD =====

    /// Load (or reuse) a vertex + fragment shader pair and link a program
    ///
    /// # Errors
    ///
    /// - `NotFound` / `NotAFile` / `TooLarge` if a shader binary can't be read
    /// - `CreationError` if the backend rejects a shader or the link
    ///
    /// On error, shader references taken for this program are released again.
    pub fn load_program(&mut self, vertex: &str, fragment: &str) -> Result<Handle> {
        let names = ProgramShaders::Graphics {
            vertex: self.config.shader_name(ShaderStage::Vertex, vertex),
            fragment: self.config.shader_name(ShaderStage::Fragment, fragment),
        };
        self.load(names)
    }

    /// Load (or reuse) a compute shader and link a program
    ///
    /// # Errors
    ///
    /// Same as `load_program`.
    pub fn load_compute(&mut self, compute: &str) -> Result<Handle> {
        let names = ProgramShaders::Compute {
            compute: self.config.shader_name(ShaderStage::Compute, compute),
        };
        self.load(names)
    }

    fn load(&mut self, names: ProgramShaders<String>) -> Result<Handle> {
        let (handle, descriptor) = self.build_program(&names, None, false)?;
        self.programs.insert(handle, descriptor);
        Ok(handle)
    }

    // ===== RELOAD =====

    /// Reload the shaders of one program from storage and relink it
    ///
    /// The new program handle is written back to `program`. An unknown handle
    /// is not an error: `program` becomes `Handle::INVALID` and nothing else
    /// changes.
    ///
    /// Each shader of the program gets a new key, even if another program
    /// still holds the previous version. The fresh keys become the recent
    /// ones only once the program has linked.
    ///
    /// # Errors
    ///
    /// Same as `load_program`. The old program is already destroyed by then:
    /// `program` is set to `Handle::INVALID`, and recent entries still held
    /// by other programs stay reusable.
    pub fn reload(&mut self, program: &mut Handle) -> Result<()> {
        let Some(descriptor) = self.programs.remove(&*program) else {
            engine_debug!(SOURCE, "Reload of unknown program {}", program);
            *program = Handle::INVALID;
            return Ok(());
        };

        let names = self.drain_program(*program, descriptor);
        let mut fresh = RecentMap::default();
        match self.build_program(&names, Some(&mut fresh), true) {
            Ok((handle, descriptor)) => {
                engine_info!(SOURCE, "Reloaded program {} as {}", program, handle);
                self.programs.insert(handle, descriptor);
                self.merge_recent(fresh);
                *program = handle;
                Ok(())
            }
            Err(err) => {
                *program = Handle::INVALID;
                Err(err)
            }
        }
    }

    /// Reload several programs, reading every distinct shader only once
    ///
    /// Pass 1 destroys all known programs of the batch and releases their
    /// shaders. Pass 2 relinks them in order, resolving shader names against
    /// a batch-local recent map: the first program needing a name reads it
    /// from storage, later ones reuse that fresh copy.
    ///
    /// New handles are written back in place. Unknown handles (and repeats
    /// of a handle already seen in the batch) become `Handle::INVALID`.
    ///
    /// # Errors
    ///
    /// A program that fails to rebuild is written as `Handle::INVALID`; the
    /// rest of the batch is still rebuilt and the first error is returned.
    pub fn reload_batch(&mut self, programs: &mut [Handle]) -> Result<()> {
        // Pass 1: drain
        let drained: Vec<Option<ProgramShaders<String>>> = programs
            .iter()
            .map(|program| {
                let descriptor = self.programs.remove(program)?;
                Some(self.drain_program(*program, descriptor))
            })
            .collect();

        // Pass 2: rebuild
        let mut batch_recent = RecentMap::default();
        let mut first_error = None;
        let mut rebuilt = 0usize;

        for (program, names) in programs.iter_mut().zip(drained) {
            let Some(names) = names else {
                *program = Handle::INVALID;
                continue;
            };
            match self.build_program(&names, Some(&mut batch_recent), false) {
                Ok((handle, descriptor)) => {
                    self.programs.insert(handle, descriptor);
                    *program = handle;
                    rebuilt += 1;
                }
                Err(err) => {
                    *program = Handle::INVALID;
                    first_error.get_or_insert(err);
                }
            }
        }

        let reloaded_shaders = batch_recent.len();
        self.merge_recent(batch_recent);

        engine_info!(SOURCE, "Batch reload: {} of {} programs rebuilt from {} shaders",
            rebuilt, programs.len(), reloaded_shaders);

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // ===== UNLOAD =====

    /// Destroy a program and release its shaders
    ///
    /// Returns `false` if the handle is not a program of this cache.
    pub fn unload(&mut self, program: Handle) -> bool {
        match self.programs.remove(&program) {
            Some(descriptor) => {
                self.drain_program(program, descriptor);
                true
            }
            None => false,
        }
    }

    /// Destroy every program
    ///
    /// # Panics
    ///
    /// If any shader or recent entry survives, the reference counts were
    /// corrupted.
    pub fn unload_all(&mut self) {
        let handles: Vec<Handle> = self.programs.keys().copied().collect();
        let count = handles.len();
        for handle in handles {
            self.unload(handle);
        }

        assert!(
            self.programs.is_empty() && self.store.is_empty() && self.recent.is_empty(),
            "shader cache not empty after unload_all: {} programs, {} shaders, {} recent names",
            self.programs.len(),
            self.store.len(),
            self.recent.len()
        );
        engine_debug!(SOURCE, "Unloaded all {} programs", count);
    }

    // ===== INTERNALS =====

    /// Get-or-load a shader by stage-qualified name
    ///
    /// `batch` selects the recent map to deduplicate against (the global one
    /// when `None`). `force` skips deduplication and always reads storage.
    fn resolve(
        &mut self,
        stage: ShaderStage,
        name: &str,
        batch: Option<&mut RecentMap>,
        force: bool,
    ) -> Result<(Handle, ShaderKey)> {
        let recent = match batch {
            Some(recent) => recent,
            None => &mut self.recent,
        };

        if !force {
            if let Some((handle, key)) = self.store.acquire_recent(recent, name) {
                self.stats.shader_reuses += 1;
                engine_trace!(SOURCE, "Reusing shader {}", key);
                return Ok((handle, key));
            }
        }

        let path = self.config.shader_path(name);
        let code = self.storage.read(&path, self.config.max_binary_size)
            .map_err(|err| {
                engine_error!(SOURCE, "Failed to read shader '{}': {}", name, err);
                err
            })?;
        let handle = self.backend.create_shader(ShaderDesc { code: &code, stage, name })
            .map_err(|err| {
                engine_error!(SOURCE, "Backend rejected shader '{}': {}", name, err);
                err
            })?;

        let key = self.store.insert(recent, name, stage, handle);
        self.stats.shader_loads += 1;
        engine_debug!(SOURCE, "Loaded shader {} ({} bytes) as {}", key, code.len(), handle);
        Ok((handle, key))
    }

    /// Resolve every shader of a program and link it
    ///
    /// References taken here are released again if anything fails.
    fn build_program(
        &mut self,
        names: &ProgramShaders<String>,
        mut batch: Option<&mut RecentMap>,
        force: bool,
    ) -> Result<(Handle, ProgramDescriptor)> {
        let mut acquired: Vec<ShaderKey> = Vec::with_capacity(names.shader_count());
        let resolved: Result<ProgramShaders<(Handle, ShaderKey)>> = names.try_map(|stage, name| {
            let (handle, key) = self.resolve(stage, name, batch.as_deref_mut(), force)?;
            acquired.push(key.clone());
            Ok((handle, key))
        });

        let link = resolved.and_then(|resolved| {
            let (first, second) = match &resolved {
                ProgramShaders::Graphics { vertex, fragment } => (vertex.0, Some(fragment.0)),
                ProgramShaders::Compute { compute } => (compute.0, None),
            };
            match self.backend.create_program(first, second) {
                Ok(handle) => Ok((handle, resolved.map(|_, (_, key)| key))),
                Err(err) => {
                    engine_error!(SOURCE, "Failed to link program from {:?}: {}", names, err);
                    Err(err)
                }
            }
        });

        match link {
            Ok((handle, descriptor)) => {
                self.stats.program_links += 1;
                engine_debug!(SOURCE, "Linked program {} from {:?}", handle, names);
                Ok((handle, descriptor))
            }
            Err(err) => {
                for key in &acquired {
                    self.release_in(key, batch.as_deref_mut());
                }
                Err(err)
            }
        }
    }

    /// Make freshly loaded entries the recent ones for their names
    ///
    /// They are newer than anything the global map holds. Ids evicted by a
    /// rollback are skipped.
    fn merge_recent(&mut self, fresh: RecentMap) {
        for (name, id) in fresh {
            if self.store.contains_id(id) {
                self.recent.insert(name, id);
            }
        }
    }

    /// Destroy a program object and release its shaders
    ///
    /// Returns the shader names it was built from, for rebuilding.
    fn drain_program(&mut self, program: Handle, descriptor: ProgramDescriptor) -> ProgramShaders<String> {
        self.backend.destroy(program);
        self.stats.program_destroys += 1;
        for key in descriptor.keys() {
            self.release(key);
        }
        descriptor.map(|_, key| key.name().to_string())
    }

    /// Drop one reference on a shader, destroying it on the last one
    fn release(&mut self, key: &ShaderKey) {
        self.release_in(key, None);
    }

    fn release_in(&mut self, key: &ShaderKey, batch: Option<&mut RecentMap>) {
        let Some(evicted) = self.store.release(key) else {
            return;
        };
        evicted.forget_in(&mut self.recent);
        if let Some(batch) = batch {
            evicted.forget_in(batch);
        }
        self.backend.destroy(evicted.handle);
        self.stats.shader_destroys += 1;
        engine_debug!(SOURCE, "Destroyed shader {} ({})", evicted.key, evicted.handle);
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &ShaderCacheConfig {
        &self.config
    }

    /// Read shader binaries from another directory from now on
    pub fn set_base_dir(&mut self, base_dir: impl Into<std::path::PathBuf>) {
        self.config.set_base_dir(base_dir);
        engine_info!(SOURCE, "Shader base dir set to '{}'", self.config.base_dir().display());
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Number of loaded shader objects
    pub fn shader_count(&self) -> usize {
        self.store.len()
    }

    /// Number of live programs
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn contains_program(&self, program: Handle) -> bool {
        self.programs.contains_key(&program)
    }

    /// Shader keys a live program was linked from
    pub fn program(&self, program: Handle) -> Option<&ProgramDescriptor> {
        self.programs.get(&program)
    }

    pub fn programs(&self) -> impl Iterator<Item = (Handle, &ProgramDescriptor)> {
        self.programs.iter().map(|(handle, descriptor)| (*handle, descriptor))
    }

    /// Every loaded shader entry, in no particular order
    pub fn shaders(&self) -> impl Iterator<Item = &ShaderEntry> {
        self.store.iter().map(|(_, entry)| entry)
    }

    pub fn shader(&self, key: &ShaderKey) -> Option<&ShaderEntry> {
        self.store.get(key)
    }

    /// Reference count of a loaded shader (0 if not loaded)
    pub fn ref_count(&self, key: &ShaderKey) -> u32 {
        self.store.get(key).map_or(0, ShaderEntry::ref_count)
    }

    /// Key that the next load of `name` for `stage` would reuse
    pub fn recent_key(&self, stage: ShaderStage, name: &str) -> Option<&ShaderKey> {
        let id = self.recent.get(&self.config.shader_name(stage, name))?;
        self.store.get_by_id(*id).map(ShaderEntry::key)
    }

    /// Number of names in the recent map
    pub fn recent_count(&self) -> usize {
        self.recent.len()
    }
}

impl<B: ShaderBackend, S: ShaderStorage> Drop for ShaderCache<B, S> {
    fn drop(&mut self) {
        if self.programs.is_empty() || std::thread::panicking() {
            return;
        }
        engine_warn!(SOURCE, "Shader cache dropped with {} live programs, unloading them",
            self.programs.len());
        self.unload_all();
    }
}

#[cfg(test)]
#[path = "shader_cache_tests.rs"]
mod tests;
