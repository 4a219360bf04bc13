/// Mock ShaderBackend for unit tests (no GPU required)
///
/// Hands out sequential handles, records every call and checks the
/// destroy-exactly-once contract. Shader creation fails on empty binaries
/// or on names registered with `fail_shader`; program creation validates
/// stage compatibility and can be forced to fail with `set_fail_links`.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::backend::{Handle, ShaderBackend, ShaderDesc, ShaderStage};
use crate::error::{Error, Result};

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockObject {
    Shader { name: String, stage: ShaderStage, size: usize },
    Program { first: Handle, second: Option<Handle> },
}

// ============================================================================
// Mock Backend
// ============================================================================

#[derive(Debug, Default)]
pub struct MockBackend {
    next_handle: u32,
    live: FxHashMap<Handle, MockObject>,
    /// Names of created shaders, in creation order
    pub created_shaders: Vec<String>,
    /// Handles of created programs, in creation order
    pub created_programs: Vec<Handle>,
    /// Destroyed handles, in destruction order
    pub destroyed: Vec<Handle>,
    failing_shaders: FxHashSet<String>,
    fail_links: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every future `create_shader` for this stage-qualified name
    pub fn fail_shader(&mut self, name: &str) {
        self.failing_shaders.insert(name.to_string());
    }

    /// Reject every future `create_program` while set
    pub fn set_fail_links(&mut self, fail: bool) {
        self.fail_links = fail;
    }

    pub fn shader_create_count(&self) -> usize {
        self.created_shaders.len()
    }

    pub fn program_create_count(&self) -> usize {
        self.created_programs.len()
    }

    /// How many times a shader name was created
    pub fn shader_loads_of(&self, name: &str) -> usize {
        self.created_shaders.iter().filter(|n| n.as_str() == name).count()
    }

    pub fn is_live(&self, handle: Handle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn was_destroyed(&self, handle: Handle) -> bool {
        self.destroyed.contains(&handle)
    }

    pub fn object(&self, handle: Handle) -> Option<&MockObject> {
        self.live.get(&handle)
    }

    pub fn live_shader_count(&self) -> usize {
        self.live.values().filter(|o| matches!(o, MockObject::Shader { .. })).count()
    }

    pub fn live_program_count(&self) -> usize {
        self.live.values().filter(|o| matches!(o, MockObject::Program { .. })).count()
    }

    fn alloc(&mut self, object: MockObject) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, object);
        handle
    }

    fn shader_stage(&self, handle: Handle) -> Result<ShaderStage> {
        match self.live.get(&handle) {
            Some(MockObject::Shader { stage, .. }) => Ok(*stage),
            Some(MockObject::Program { .. }) => Err(Error::CreationError(format!(
                "handle {} is a program, not a shader", handle
            ))),
            None => Err(Error::CreationError(format!("handle {} is not live", handle))),
        }
    }
}

impl ShaderBackend for MockBackend {
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Handle> {
        if desc.code.is_empty() {
            return Err(Error::CreationError(format!("shader '{}' is empty", desc.name)));
        }
        if self.failing_shaders.contains(desc.name) {
            return Err(Error::CreationError(format!("shader '{}' rejected", desc.name)));
        }
        self.created_shaders.push(desc.name.to_string());
        Ok(self.alloc(MockObject::Shader {
            name: desc.name.to_string(),
            stage: desc.stage,
            size: desc.code.len(),
        }))
    }

    fn create_program(&mut self, first: Handle, second: Option<Handle>) -> Result<Handle> {
        if self.fail_links {
            return Err(Error::CreationError("program link rejected".to_string()));
        }

        let first_stage = self.shader_stage(first)?;
        let stages_ok = match second {
            Some(second) => {
                first_stage == ShaderStage::Vertex
                    && self.shader_stage(second)? == ShaderStage::Fragment
            }
            None => first_stage == ShaderStage::Compute,
        };
        if !stages_ok {
            return Err(Error::CreationError(format!(
                "incompatible program stages for {} / {:?}", first, second
            )));
        }

        let handle = self.alloc(MockObject::Program { first, second });
        self.created_programs.push(handle);
        Ok(handle)
    }

    fn destroy(&mut self, handle: Handle) {
        assert!(
            self.live.remove(&handle).is_some(),
            "destroy of unknown or already destroyed handle {}",
            handle
        );
        self.destroyed.push(handle);
    }
}

#[cfg(test)]
#[path = "mock_backend_tests.rs"]
mod tests;
