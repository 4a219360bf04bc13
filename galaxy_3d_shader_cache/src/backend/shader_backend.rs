/// ShaderBackend trait, handles and shader descriptor

use std::fmt;
use crate::error::Result;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

/// Opaque backend object handle (shader or program)
///
/// Handles carry no ownership: the cache tracks who owns what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

/// Sentinel distinguishable from every handle a backend hands out
pub const INVALID_HANDLE: Handle = Handle::INVALID;

impl Handle {
    /// The invalid sentinel
    pub const INVALID: Handle = Handle(u32::MAX);

    /// Whether this is anything other than the invalid sentinel
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#invalid")
        }
    }
}

/// Descriptor for creating a shader object
#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc<'a> {
    /// Compiled shader binary, format defined by the backend
    pub code: &'a [u8],
    /// Shader stage
    pub stage: ShaderStage,
    /// Stage-qualified shader name, for backend debug labels
    pub name: &'a str,
}

/// Graphics backend primitives used by the shader cache
///
/// Implemented by the application on top of its graphics API.
pub trait ShaderBackend {
    /// Create a shader object from a binary
    ///
    /// # Errors
    ///
    /// `Error::CreationError` if the binary is malformed or rejected.
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Handle>;

    /// Link a program from one (compute) or two (vertex + fragment) shaders
    ///
    /// # Errors
    ///
    /// `Error::CreationError` if the inputs are invalid or incompatible.
    fn create_program(&mut self, first: Handle, second: Option<Handle>) -> Result<Handle>;

    /// Destroy a shader or program object
    ///
    /// Called exactly once per handle returned by `create_shader` or
    /// `create_program`.
    fn destroy(&mut self, handle: Handle);
}
