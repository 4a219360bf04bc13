/// Shader cache configuration.
///
/// Describes where shader binaries live and how a symbolic shader name maps to
/// a file: `base_dir / template(stage).replace("{name}", name) + "." + extension`.
/// With the defaults, the vertex shader "basic" is read from
/// `shaders/basic.vert.bin`.

use std::path::{Path, PathBuf};
use crate::backend::ShaderStage;
use crate::error::{Error, Result};
use crate::engine_bail;

/// Placeholder substituted with the shader name in filename templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Default directory holding shader binaries
pub const DEFAULT_BASE_DIR: &str = "shaders/";

/// Default shader binary extension
pub const DEFAULT_EXTENSION: &str = "bin";

/// Largest binary the backend size field can describe
pub const DEFAULT_MAX_BINARY_SIZE: u64 = u32::MAX as u64;

/// Configuration of a ShaderCache instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderCacheConfig {
    /// Directory holding the shader binaries
    pub base_dir: PathBuf,
    /// Filename template for vertex shaders
    pub vertex_template: String,
    /// Filename template for fragment shaders
    pub fragment_template: String,
    /// Filename template for compute shaders
    pub compute_template: String,
    /// Extension appended to every shader file (without the dot)
    pub extension: String,
    /// Binaries larger than this fail with `Error::TooLarge`
    pub max_binary_size: u64,
}

impl Default for ShaderCacheConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            vertex_template: format!("{}.vert", NAME_PLACEHOLDER),
            fragment_template: format!("{}.frag", NAME_PLACEHOLDER),
            compute_template: format!("{}.comp", NAME_PLACEHOLDER),
            extension: DEFAULT_EXTENSION.to_string(),
            max_binary_size: DEFAULT_MAX_BINARY_SIZE,
        }
    }
}

impl ShaderCacheConfig {
    /// Config reading binaries from `base_dir` with default templates
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Check the config before a cache starts using it
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if:
    /// - a template does not contain `{name}`
    /// - two stage templates are identical
    /// - the extension is empty or starts with a dot
    /// - `max_binary_size` is zero
    pub fn validate(&self) -> Result<()> {
        let templates = [
            (ShaderStage::Vertex, &self.vertex_template),
            (ShaderStage::Fragment, &self.fragment_template),
            (ShaderStage::Compute, &self.compute_template),
        ];

        for (stage, template) in &templates {
            if !template.contains(NAME_PLACEHOLDER) {
                engine_bail!("galaxy3d::ShaderCacheConfig", Error::InvalidConfig(format!(
                    "{:?} template '{}' does not contain '{}'",
                    stage, template, NAME_PLACEHOLDER
                )));
            }
        }

        for (i, (stage_a, template_a)) in templates.iter().enumerate() {
            for (stage_b, template_b) in &templates[i + 1..] {
                if template_a == template_b {
                    engine_bail!("galaxy3d::ShaderCacheConfig", Error::InvalidConfig(format!(
                        "{:?} and {:?} templates are both '{}'",
                        stage_a, stage_b, template_a
                    )));
                }
            }
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            engine_bail!("galaxy3d::ShaderCacheConfig", Error::InvalidConfig(format!(
                "extension '{}' must be non-empty and given without the leading dot",
                self.extension
            )));
        }

        if self.max_binary_size == 0 {
            engine_bail!("galaxy3d::ShaderCacheConfig",
                Error::InvalidConfig("max_binary_size must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Filename template for a stage
    pub fn template(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex_template,
            ShaderStage::Fragment => &self.fragment_template,
            ShaderStage::Compute => &self.compute_template,
        }
    }

    /// Stage-qualified shader name ("basic" + Vertex -> "basic.vert")
    ///
    /// This is the name stored in `ShaderKey` and used for deduplication.
    pub fn shader_name(&self, stage: ShaderStage, name: &str) -> String {
        self.template(stage).replace(NAME_PLACEHOLDER, name)
    }

    /// Storage path of a stage-qualified shader name
    pub fn shader_path(&self, shader_name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", shader_name, self.extension))
    }

    /// Directory holding the shader binaries
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Point the config at another shader directory
    ///
    /// Already loaded shaders are unaffected; the next load or reload reads
    /// from the new directory.
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.base_dir = base_dir.into();
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
