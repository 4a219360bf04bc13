//! Error types for the Galaxy3D shader cache
//!
//! This module defines the error types reported by shader and program loading,
//! storage access and configuration validation.

use std::fmt;
use std::path::PathBuf;

/// Result type for shader cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader cache errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shader binary does not exist in storage
    NotFound(PathBuf),

    /// Shader binary path exists but is not a regular file (directory, etc.)
    NotAFile(PathBuf),

    /// Shader binary exceeds the maximum size the backend can represent
    TooLarge {
        path: PathBuf,
        size: u64,
        max: u64,
    },

    /// Backend rejected a shader object or a program link
    CreationError(String),

    /// Any other storage failure while reading a shader binary
    Io {
        path: PathBuf,
        message: String,
    },

    /// Cache configuration rejected at construction
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "Shader not found: {}", path.display()),
            Error::NotAFile(path) => write!(f, "Not a file: {}", path.display()),
            Error::TooLarge { path, size, max } => write!(
                f,
                "Shader too large: {} ({} bytes, max {})",
                path.display(),
                size,
                max
            ),
            Error::CreationError(msg) => write!(f, "Creation error: {}", msg),
            Error::Io { path, message } => write!(f, "I/O error on {}: {}", path.display(), message),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
