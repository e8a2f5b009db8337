// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Offscreen render targets for the wgpu backend.

pub mod texture_resource;

// Re-export main types
pub use texture_resource::TextureResource;
