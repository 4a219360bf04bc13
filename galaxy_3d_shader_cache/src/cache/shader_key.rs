/// Versioned shader identity.
///
/// Every load of a shader name mints a new `ShaderKey`; two loads of the same
/// name never compare equal, even within the same clock tick.

use std::fmt;
use std::time::Instant;

/// Monotonic load timestamp (nanoseconds since the owning cache was created)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderVersion(u64);

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one loaded shader: stage-qualified name + load version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderKey {
    name: String,
    version: ShaderVersion,
}

impl ShaderKey {
    pub(crate) fn new(name: impl Into<String>, version: ShaderVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Stage-qualified shader name (e.g. "basic.vert")
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> ShaderVersion {
        self.version
    }
}

impl fmt::Display for ShaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Source of strictly increasing shader versions
#[derive(Debug)]
pub(crate) struct VersionClock {
    origin: Instant,
    last: u64,
}

impl VersionClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last: 0,
        }
    }

    /// Current time, bumped past the previous version if the clock has not moved
    pub fn next(&mut self) -> ShaderVersion {
        let now = u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.last = now.max(self.last.saturating_add(1));
        ShaderVersion(self.last)
    }
}

#[cfg(test)]
#[path = "shader_key_tests.rs"]
mod tests;
