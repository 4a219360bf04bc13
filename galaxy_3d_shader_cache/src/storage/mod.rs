/// Storage module - where shader binaries come from

// Module declarations
pub mod shader_storage;

// Re-export everything from shader_storage.rs
pub use shader_storage::*;

// In-memory storage for tests
#[cfg(test)]
pub mod mock_storage;
