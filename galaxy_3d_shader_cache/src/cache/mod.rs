//! Shader cache module
//!
//! Reference-counted shader and program bookkeeping on top of a backend.

mod shader_cache;
mod shader_store;
pub mod shader_key;
pub mod program;

pub use shader_cache::{ShaderCache, CacheStats};
pub use shader_store::{ShaderEntry, ShaderEntryId};
pub use shader_key::{ShaderKey, ShaderVersion};
pub use program::{ProgramDescriptor, ProgramShaders};
