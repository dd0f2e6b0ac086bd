//! Shader management.
//!
//! Kernel sources are WGSL templates. `{{NAME}}` placeholders are replaced
//! with values supplied through [`ComputeShaderBuilder::define`], and a
//! shared prelude of struct declarations is prepended.

use crate::error::{ComputeError, ComputeResult};

/// Declarations shared by every kernel.
pub const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");

/// Builder for compute shader modules.
pub struct ComputeShaderBuilder {
    source: Option<String>,
    prelude: Vec<String>,
    defines: Vec<(String, String)>,
    label: Option<String>,
}

impl ComputeShaderBuilder {
    /// Creates a new shader builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            prelude: Vec::new(),
            defines: Vec::new(),
            label: None,
        }
    }

    /// Sets the kernel source (WGSL).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Prepends `source` ahead of the kernel.
    pub fn with_prelude(mut self, source: impl Into<String>) -> Self {
        self.prelude.push(source.into());
        self
    }

    /// Replaces every `{{name}}` with `value`.
    pub fn define(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.defines.push((name.into(), value.to_string()));
        self
    }

    /// Sets the shader label for debugging.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builds the shader module.
    pub fn build_module(self, device: &wgpu::Device) -> ComputeResult<wgpu::ShaderModule> {
        let source = self.resolved_source()?;

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: self.label.as_deref(),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        Ok(module)
    }

    /// Final WGSL text with the prelude joined and placeholders replaced.
    pub fn resolved_source(&self) -> ComputeResult<String> {
        let kernel = self
            .source
            .as_ref()
            .ok_or_else(|| ComputeError::ShaderTemplate("missing kernel source".into()))?;

        let mut source = self.prelude.join("\n\n");
        if !source.is_empty() {
            source.push_str("\n\n");
        }
        source.push_str(kernel);

        for (name, value) in &self.defines {
            source = source.replace(&format!("{{{{{name}}}}}"), value);
        }

        if let Some(start) = source.find("{{") {
            let rest = &source[start..];
            let end = rest.find("}}").map_or(rest.len(), |i| i + 2);
            return Err(ComputeError::ShaderTemplate(format!(
                "unresolved placeholder {}",
                &rest[..end]
            )));
        }

        Ok(source)
    }
}

impl Default for ComputeShaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a vector as a WGSL `vec3<f32>` literal.
pub fn wgsl_vec3(v: glam::Vec3) -> String {
    format!("vec3<f32>({:?}, {:?}, {:?})", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defines_are_substituted() {
        let source = ComputeShaderBuilder::new()
            .with_source("@workgroup_size({{TILE_SIZE}}, {{TILE_SIZE}}, {{TILE_SIZE}})")
            .define("TILE_SIZE", 8)
            .resolved_source()
            .unwrap();
        assert_eq!(source, "@workgroup_size(8, 8, 8)");
    }

    #[test]
    fn test_unresolved_placeholder_is_an_error() {
        let result = ComputeShaderBuilder::new()
            .with_source("let x = {{MISSING}};")
            .define("TILE_SIZE", 4)
            .resolved_source();
        match result {
            Err(ComputeError::ShaderTemplate(message)) => assert!(message.contains("{{MISSING}}")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_source_is_an_error() {
        assert!(ComputeShaderBuilder::new().resolved_source().is_err());
    }

    #[test]
    fn test_prelude_comes_first() {
        let source = ComputeShaderBuilder::new()
            .with_prelude("struct A { x: f32 }")
            .with_source("fn main() {}")
            .resolved_source()
            .unwrap();
        assert!(source.starts_with("struct A"));
        assert!(source.ends_with("fn main() {}"));
    }

    #[test]
    fn test_wgsl_vec3_literal() {
        assert_eq!(
            wgsl_vec3(glam::Vec3::new(1.0, 0.5, 0.25)),
            "vec3<f32>(1.0, 0.5, 0.25)"
        );
    }

    #[test]
    fn test_kernel_templates_resolve() {
        for kernel in [
            include_str!("shaders/density.wgsl"),
            include_str!("shaders/marching_cubes.wgsl"),
        ] {
            let source = ComputeShaderBuilder::new()
                .with_prelude(COMMON_WGSL)
                .with_source(kernel)
                .define("TILE_SIZE", 8)
                .define("WARP_OFFSET_A", wgsl_vec3(glam::Vec3::ONE))
                .define("WARP_OFFSET_B", wgsl_vec3(glam::Vec3::ZERO))
                .define("FLAT_EDGE_EPSILON", "1e-6")
                .define("FLAT_GRADIENT_EPSILON", "1e-20")
                .resolved_source()
                .unwrap();
            assert!(source.contains("@workgroup_size(8, 8, 8)"));
        }
    }

    proptest! {
        #[test]
        fn prop_every_define_is_substituted(
            defines in prop::collection::vec(("[A-Z][A-Z_]{0,8}", "[0-9]{1,4}\\.[0-9]{1,3}"), 1..6),
        ) {
            let kernel: String = defines
                .iter()
                .map(|(name, _)| format!("let v = {{{{{name}}}}};\n"))
                .collect();
            let builder = defines
                .iter()
                .fold(ComputeShaderBuilder::new().with_source(kernel), |b, (name, value)| {
                    b.define(name.as_str(), value)
                });
            let source = builder.resolved_source().unwrap();
            prop_assert!(!source.contains("{{"));
            prop_assert_eq!(source.lines().count(), defines.len());
        }
    }
}
