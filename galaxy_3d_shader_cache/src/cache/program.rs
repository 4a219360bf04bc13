/// Program composition: which shaders make up a linked program.

use crate::backend::ShaderStage;
use super::shader_key::ShaderKey;

/// Shader slots of a program, generic over what fills each slot
///
/// A program is either a vertex + fragment pair or a single compute shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramShaders<T> {
    Graphics { vertex: T, fragment: T },
    Compute { compute: T },
}

/// Shader keys cited by a live program
pub type ProgramDescriptor = ProgramShaders<ShaderKey>;

impl<T> ProgramShaders<T> {
    /// Slots in link order (vertex before fragment)
    pub fn iter(&self) -> impl Iterator<Item = (ShaderStage, &T)> {
        let slots = match self {
            ProgramShaders::Graphics { vertex, fragment } => {
                vec![(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)]
            }
            ProgramShaders::Compute { compute } => vec![(ShaderStage::Compute, compute)],
        };
        slots.into_iter()
    }

    pub fn map<U>(self, mut f: impl FnMut(ShaderStage, T) -> U) -> ProgramShaders<U> {
        match self {
            ProgramShaders::Graphics { vertex, fragment } => ProgramShaders::Graphics {
                vertex: f(ShaderStage::Vertex, vertex),
                fragment: f(ShaderStage::Fragment, fragment),
            },
            ProgramShaders::Compute { compute } => ProgramShaders::Compute {
                compute: f(ShaderStage::Compute, compute),
            },
        }
    }

    /// Like `map`, stopping at the first error (vertex is visited before fragment)
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(ShaderStage, &T) -> Result<U, E>,
    ) -> Result<ProgramShaders<U>, E> {
        Ok(match self {
            ProgramShaders::Graphics { vertex, fragment } => ProgramShaders::Graphics {
                vertex: f(ShaderStage::Vertex, vertex)?,
                fragment: f(ShaderStage::Fragment, fragment)?,
            },
            ProgramShaders::Compute { compute } => ProgramShaders::Compute {
                compute: f(ShaderStage::Compute, compute)?,
            },
        })
    }

    /// Number of shader slots (2 for graphics, 1 for compute)
    pub fn shader_count(&self) -> usize {
        match self {
            ProgramShaders::Graphics { .. } => 2,
            ProgramShaders::Compute { .. } => 1,
        }
    }
}

impl ProgramDescriptor {
    pub fn keys(&self) -> impl Iterator<Item = &ShaderKey> {
        self.iter().map(|(_, key)| key)
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
