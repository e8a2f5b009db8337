//! Headless wgpu backend.
//!
//! Renders draw lists into an offscreen colour target with a depth buffer.
//! Each draw uploads its own vertex and model buffers; the whole frame is
//! recorded into one render pass when the frame ends.

use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::error::{RenderError, Result};
use crate::gfx::camera::{CameraUniform, ModelUniform};
use crate::gfx::resources::TextureResource;
use crate::gfx::scene::vertex::DrawMode;
use crate::wgpu_utils::{uniform_layout_entry, UniformBuffer};

use super::draw_list::{DrawCall, FrameUniforms};
use super::pipeline_manager::{PipelineConfig, PipelineManager};
use super::renderer::RenderBackend;

/// WGSL source of the scene shader
pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Offscreen target settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    pub clear_color: wgpu::Color,
    pub format: wgpu::TextureFormat,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            clear_color: wgpu::Color::TRANSPARENT,
            format: wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

impl RendererConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_clear_color(mut self, clear_color: wgpu::Color) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.format = format;
        self
    }
}

struct GpuContext {
    device: Arc<wgpu::Device>,
    queue: wgpu::Queue,
    pipelines: PipelineManager,
    camera_buffer: UniformBuffer<CameraUniform>,
    camera_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    color_target: TextureResource,
    depth_target: TextureResource,
}

struct PendingDraw {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    _model_buffer: UniformBuffer<ModelUniform>,
    model_bind_group: wgpu::BindGroup,
    mode: DrawMode,
}

pub struct WgpuBackend {
    config: RendererConfig,
    shader_source: String,
    context: Option<GpuContext>,
    pending: Vec<PendingDraw>,
    frames_submitted: u64,
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl WgpuBackend {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            shader_source: SHADER_SOURCE.to_string(),
            context: None,
            pending: Vec::new(),
            frames_submitted: 0,
        }
    }

    /// Replaces the scene shader; it must keep the bindings and entry points
    pub fn with_shader_source(mut self, source: impl Into<String>) -> Self {
        self.shader_source = source.into();
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    async fn create_context(&self) -> Result<GpuContext> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("SuperGroup Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[uniform_layout_entry(0)],
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[uniform_layout_entry(0)],
        });

        let camera_buffer = UniformBuffer::new_with_data(&device, &CameraUniform::default());
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.binding_resource(),
            }],
        });

        let mut pipelines = PipelineManager::new(device.clone(), &[&camera_layout, &model_layout]);
        pipelines.load_shader(&self.shader_source)?;
        let configs = [DrawMode::Triangles, DrawMode::Lines].map(|mode| {
            PipelineConfig::for_mode(mode)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(self.config.format)
        });
        pipelines.build_all(&configs)?;
        log::debug!("Pipelines ready: {:?}", pipelines.stats());

        let color_target = TextureResource::create_render_target(
            &device,
            self.config.width,
            self.config.height,
            self.config.format,
            "Color Target",
        );
        let depth_target = TextureResource::create_depth_texture(
            &device,
            self.config.width,
            self.config.height,
            "Depth Target",
        );

        Ok(GpuContext {
            device,
            queue,
            pipelines,
            camera_buffer,
            camera_bind_group,
            model_layout,
            color_target,
            depth_target,
        })
    }

    /// Copies the colour target back to the CPU as tightly packed rows
    pub fn read_pixels(&self) -> Result<Vec<u8>> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        let (width, height) = context.color_target.size();
        let bytes_per_pixel = context
            .color_target
            .format()
            .block_copy_size(None)
            .unwrap_or(4);
        let unpadded_row = width * bytes_per_pixel;
        let padded_row = unpadded_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let staging_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: (padded_row * height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &context.color_target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        context.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging_buffer.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        let _ = context.device.poll(wgpu::MaintainBase::Wait);

        match futures::executor::block_on(rx) {
            Ok(Ok(())) => {
                let mapped = slice.get_mapped_range();
                let mut pixels = Vec::with_capacity((unpadded_row * height) as usize);
                for row in mapped.chunks(padded_row as usize) {
                    pixels.extend_from_slice(&row[..unpadded_row as usize]);
                }
                drop(mapped);
                staging_buffer.unmap();
                Ok(pixels)
            }
            _ => Err(RenderError::Backend(
                "Failed to read back the color target".to_string(),
            )),
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn initialize(&mut self) -> Result<()> {
        if self.context.is_some() {
            return Ok(());
        }
        let context = pollster::block_on(self.create_context())?;
        log::info!(
            "wgpu backend ready ({}x{}, {:?})",
            self.config.width,
            self.config.height,
            self.config.format
        );
        self.context = Some(context);
        Ok(())
    }

    fn begin_frame(&mut self, uniforms: &FrameUniforms) {
        self.pending.clear();
        if let Some(context) = self.context.as_mut() {
            context
                .camera_buffer
                .update_content(&context.queue, uniforms.to_camera_uniform());
        }
    }

    fn draw(&mut self, _uniforms: &FrameUniforms, call: &DrawCall<'_>) {
        let Some(context) = self.context.as_ref() else {
            return;
        };
        if call.buffers.is_empty() {
            return;
        }

        let vertices = call.buffers.interleaved();
        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Vertex Buffer: node {}", call.node)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let model_buffer = UniformBuffer::new_with_data(&context.device, &ModelUniform::from(call.model));
        let model_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: &context.model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.binding_resource(),
            }],
        });

        self.pending.push(PendingDraw {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            _model_buffer: model_buffer,
            model_bind_group,
            mode: call.mode,
        });
    }

    fn end_frame(&mut self) -> Result<()> {
        let context = self.context.as_ref().ok_or(RenderError::NotInitialized)?;
        let pipeline = |mode: DrawMode| {
            context
                .pipelines
                .pipeline(mode)
                .ok_or_else(|| RenderError::Pipeline(format!("no pipeline for {:?}", mode)))
        };
        let triangles = pipeline(DrawMode::Triangles)?;
        let lines = pipeline(DrawMode::Lines)?;

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &context.color_target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &context.depth_target.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &context.camera_bind_group, &[]);
            for draw in &self.pending {
                let pipeline = match draw.mode {
                    DrawMode::Triangles => triangles,
                    DrawMode::Lines => lines,
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &draw.model_bind_group, &[]);
                render_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                render_pass.draw(0..draw.vertex_count, 0..1);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
        log::debug!("Submitted frame with {} draws", self.pending.len());
        self.pending.clear();
        self.frames_submitted += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RendererConfig::default()
            .with_size(320, 200)
            .with_clear_color(wgpu::Color::BLACK)
            .with_format(wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.clear_color, wgpu::Color::BLACK);
        assert_eq!(config.format, wgpu::TextureFormat::Bgra8Unorm);
    }

    #[test]
    fn test_default_target_matches_frustum_aspect() {
        let config = RendererConfig::default();
        assert_eq!(config.width as f32 / config.height as f32, 1.5);
        assert_eq!(config.clear_color, wgpu::Color::TRANSPARENT);
    }

    #[test]
    fn test_shader_entry_points() {
        assert!(SHADER_SOURCE.contains("fn vs_main"));
        assert!(SHADER_SOURCE.contains("fn fs_main"));
        assert!(SHADER_SOURCE.contains("@group(1) @binding(0)"));
    }

    #[test]
    fn test_uninitialized_backend() {
        let mut backend = WgpuBackend::default();
        assert!(!backend.is_initialized());
        assert!(matches!(backend.end_frame(), Err(RenderError::NotInitialized)));
        assert!(matches!(backend.read_pixels(), Err(RenderError::NotInitialized)));
        assert_eq!(backend.frames_submitted(), 0);
    }
}
