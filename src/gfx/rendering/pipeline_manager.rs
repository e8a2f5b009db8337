//! Render pipelines for the wgpu backend
//!
//! One scene shader feeds one pipeline per [`DrawMode`]. Shader compilation
//! and pipeline creation both run inside validation error scopes so a broken
//! shader surfaces as a [`RenderError`] instead of a device panic.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::RenderError;
use crate::gfx::scene::vertex::{DrawMode, Vertex3D};

/// Settings for the pipeline serving one draw mode
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub label: String,
    pub mode: DrawMode,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
}

impl PipelineConfig {
    /// Both faces drawn, no depth test, `Rgba8Unorm` colour target
    pub fn for_mode(mode: DrawMode) -> Self {
        Self {
            label: format!("Scene Pipeline ({:?})", mode),
            mode,
            cull_mode: None,
            depth_format: None,
            color_format: TextureFormat::Rgba8Unorm,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Enables depth testing against a target of `format` (builder pattern)
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.mode.topology()
    }

    fn depth_stencil(&self) -> Option<DepthStencilState> {
        self.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        })
    }
}

/// Scene shader plus the pipelines built from it, keyed by draw mode
pub struct PipelineManager {
    device: Arc<Device>,
    layout: PipelineLayout,
    shader: Option<ShaderModule>,
    pipelines: HashMap<DrawMode, RenderPipeline>,
}

impl PipelineManager {
    /// `bind_group_layouts` are shared by every pipeline, in group order
    pub fn new(device: Arc<Device>, bind_group_layouts: &[&BindGroupLayout]) -> Self {
        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });
        Self {
            device,
            layout,
            shader: None,
            pipelines: HashMap::new(),
        }
    }

    /// Compiles the scene shader, dropping any pipelines built from a
    /// previous one.
    pub fn load_shader(&mut self, source: &str) -> Result<(), RenderError> {
        self.device.push_error_scope(ErrorFilter::Validation);
        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: ShaderSource::Wgsl(source.into()),
        });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(RenderError::Shader(error.to_string()));
        }

        log::debug!("Compiled scene shader ({} bytes)", source.len());
        self.pipelines.clear();
        self.shader = Some(module);
        Ok(())
    }

    /// Builds every config, replacing existing pipelines for the same mode.
    ///
    /// All configs are attempted; failures are joined into one
    /// [`RenderError::Pipeline`].
    pub fn build_all(&mut self, configs: &[PipelineConfig]) -> Result<(), RenderError> {
        let mut errors = Vec::new();
        for config in configs {
            match self.build(config) {
                Ok(pipeline) => {
                    self.pipelines.insert(config.mode, pipeline);
                }
                Err(e) => errors.push(format!("{}: {}", config.label, e)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RenderError::Pipeline(errors.join("; ")))
        }
    }

    fn build(&self, config: &PipelineConfig) -> Result<RenderPipeline, String> {
        let shader = self
            .shader
            .as_ref()
            .ok_or_else(|| "no shader loaded".to_string())?;

        self.device.push_error_scope(ErrorFilter::Validation);
        let targets = [Some(ColorTargetState {
            format: config.color_format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];
        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&self.layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.topology(),
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    ..Default::default()
                },
                depth_stencil: config.depth_stencil(),
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(error.to_string()),
            None => Ok(pipeline),
        }
    }

    pub fn pipeline(&self, mode: DrawMode) -> Option<&RenderPipeline> {
        self.pipelines.get(&mode)
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            pipelines: self.pipelines.len(),
            shader_loaded: self.shader.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub pipelines: usize,
    pub shader_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::for_mode(DrawMode::Lines)
            .with_label("Wireframe")
            .with_depth_format(TextureFormat::Depth32Float)
            .with_color_format(TextureFormat::Bgra8Unorm)
            .with_cull_mode(Some(Face::Back));

        assert_eq!(config.label, "Wireframe");
        assert_eq!(config.topology(), PrimitiveTopology::LineList);
        assert_eq!(config.cull_mode, Some(Face::Back));
        assert_eq!(config.color_format, TextureFormat::Bgra8Unorm);
        let depth = config.depth_stencil().map(|d| (d.format, d.depth_compare));
        assert_eq!(depth, Some((TextureFormat::Depth32Float, CompareFunction::Less)));
    }

    #[test]
    fn test_default_config_draws_both_faces() {
        let config = PipelineConfig::for_mode(DrawMode::Triangles);
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.topology(), PrimitiveTopology::TriangleList);
        assert!(config.depth_stencil().is_none());
    }
}
