/// Backend module - the graphics API primitives the cache is built on

// Module declarations
pub mod shader_backend;

// Re-export everything from shader_backend.rs
pub use shader_backend::*;

// Mock backend for tests (no GPU required)
#[cfg(test)]
pub mod mock_backend;
