use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// GPU uniform buffer holding exactly one `T`.
///
/// Remembers the bytes last written so per-frame updates with unchanged
/// camera data skip the queue write.
pub struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    written: Vec<u8>,
    _content: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    fn label() -> String {
        let full = std::any::type_name::<T>();
        let short = full.rsplit("::").next().unwrap_or(full);
        format!("Uniform Buffer: {}", short)
    }

    pub fn new_with_data(device: &wgpu::Device, content: &T) -> Self {
        let bytes = bytemuck::bytes_of(content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&Self::label()),
            contents: bytes,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            written: bytes.to_vec(),
            _content: PhantomData,
        }
    }

    /// Writes `content` unless it matches what the buffer already holds.
    /// Returns whether a write was queued.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: T) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.written == bytes {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.written.clear();
        self.written.extend_from_slice(bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn size(&self) -> u64 {
        self.buffer.size()
    }
}

/// Uniform buffer entry at `binding`, visible to both shader stages
pub fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraUniform, ModelUniform};

    #[test]
    fn test_label_uses_short_type_name() {
        assert_eq!(UniformBuffer::<CameraUniform>::label(), "Uniform Buffer: CameraUniform");
        assert_eq!(UniformBuffer::<ModelUniform>::label(), "Uniform Buffer: ModelUniform");
    }

    #[test]
    fn test_layout_entry() {
        let entry = uniform_layout_entry(1);
        assert_eq!(entry.binding, 1);
        assert_eq!(entry.visibility, wgpu::ShaderStages::VERTEX_FRAGMENT);
        assert!(entry.count.is_none());
    }
}
