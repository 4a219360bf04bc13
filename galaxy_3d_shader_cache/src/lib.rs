/*!
# Galaxy 3D Shader Cache

Reference-counted cache of GPU shader programs for the Galaxy 3D engine.

Client code asks for programs by symbolic shader names. The cache reads the
shader binaries from storage, shares identical shaders between programs and
destroys a shader object only when the last program using it is unloaded.
Programs can be reloaded one at a time or in batches; a batch reads every
distinct shader once.

## Architecture

- **ShaderCache**: the cache instance (programs, loaded shaders, recent names)
- **ShaderBackend**: graphics API primitives (create shader, link program, destroy)
- **ShaderStorage**: where binaries come from (`FileStorage` by default)
- **ShaderCacheConfig**: base directory, per-stage filename templates, size limit

The backend is supplied by the application; the cache only sees opaque handles.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod backend;
pub mod storage;
pub mod config;
pub mod cache;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Shader cache
    pub use crate::cache::{ShaderCache, CacheStats};
    pub use crate::config::ShaderCacheConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend sub-module
    pub mod backend {
        pub use crate::backend::*;
    }

    // Storage sub-module
    pub mod storage {
        pub use crate::storage::*;
    }

    // Cache sub-module with keys, entries and descriptors
    pub mod cache {
        pub use crate::cache::*;
    }
}
