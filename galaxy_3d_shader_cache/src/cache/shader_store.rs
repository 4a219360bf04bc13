/// Reference-counted storage of loaded shader objects.
///
/// `ShaderStore` is the authoritative set of loaded shaders ("all loaded").
/// Entries live in a slotmap; the generational `ShaderEntryId` is what
/// recent-name maps hold, so an id left behind by an evicted entry can never
/// resolve to a different entry later.
///
/// The store never talks to the backend: `release` hands the evicted handle
/// back to the caller, which destroys it.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::backend::{Handle, ShaderStage};
use super::shader_key::{ShaderKey, VersionClock};

slotmap::new_key_type! {
    /// Generational index of a loaded shader entry
    pub struct ShaderEntryId;
}

/// Stage-qualified shader name -> most recently loaded entry for that name
pub(crate) type RecentMap = FxHashMap<String, ShaderEntryId>;

/// One loaded shader object
#[derive(Debug, Clone)]
pub struct ShaderEntry {
    handle: Handle,
    key: ShaderKey,
    stage: ShaderStage,
    ref_count: u32,
}

impl ShaderEntry {
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn key(&self) -> &ShaderKey {
        &self.key
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Number of live programs citing this entry (always >= 1)
    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }
}

/// Entry removed from the store after its last reference was released
#[derive(Debug, Clone)]
pub(crate) struct EvictedShader {
    pub id: ShaderEntryId,
    pub handle: Handle,
    pub key: ShaderKey,
}

impl EvictedShader {
    /// Drop `recent[name]` if, and only if, it still denotes the evicted entry
    ///
    /// A newer load of the same name recorded afterwards must survive.
    pub fn forget_in(&self, recent: &mut RecentMap) -> bool {
        if recent.get(self.key.name()) == Some(&self.id) {
            recent.remove(self.key.name());
            true
        } else {
            false
        }
    }
}

pub(crate) struct ShaderStore {
    entries: SlotMap<ShaderEntryId, ShaderEntry>,
    by_key: FxHashMap<ShaderKey, ShaderEntryId>,
    clock: VersionClock,
}

impl ShaderStore {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            by_key: FxHashMap::default(),
            clock: VersionClock::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ShaderKey) -> Option<&ShaderEntry> {
        let id = self.by_key.get(key)?;
        self.entries.get(*id)
    }

    pub fn get_by_id(&self, id: ShaderEntryId) -> Option<&ShaderEntry> {
        self.entries.get(id)
    }

    pub fn contains_id(&self, id: ShaderEntryId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShaderEntryId, &ShaderEntry)> {
        self.entries.iter()
    }

    /// Take one more reference on the entry `recent` holds for `name`
    ///
    /// Returns `None` when `recent` has no live entry for the name.
    pub fn acquire_recent(&mut self, recent: &RecentMap, name: &str) -> Option<(Handle, ShaderKey)> {
        let id = recent.get(name)?;
        let entry = self.entries.get_mut(*id)?;
        entry.ref_count += 1;
        Some((entry.handle, entry.key.clone()))
    }

    /// Record a freshly created shader object with one reference
    ///
    /// Mints a new key and makes it the recent entry for its name.
    pub fn insert(&mut self, recent: &mut RecentMap, name: &str, stage: ShaderStage, handle: Handle) -> ShaderKey {
        let key = ShaderKey::new(name, self.clock.next());
        let id = self.entries.insert(ShaderEntry {
            handle,
            key: key.clone(),
            stage,
            ref_count: 1,
        });
        self.by_key.insert(key.clone(), id);
        recent.insert(name.to_string(), id);
        key
    }

    /// Drop one reference on `key`
    ///
    /// Unknown keys are ignored. When the count reaches zero the entry is
    /// removed and returned so the caller can destroy the backend object and
    /// clean up recent maps.
    pub fn release(&mut self, key: &ShaderKey) -> Option<EvictedShader> {
        let id = *self.by_key.get(key)?;
        let entry = self.entries.get_mut(id)?;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return None;
        }

        self.by_key.remove(key);
        let entry = self.entries.remove(id)?;
        Some(EvictedShader {
            id,
            handle: entry.handle,
            key: entry.key,
        })
    }
}

#[cfg(test)]
#[path = "shader_store_tests.rs"]
mod tests;
