//! # Renderer
//!
//! [`Renderer`] drives a [`RenderBackend`] through its lifecycle and feeds it
//! the draw list of a [`Scene`] once per frame. The scene itself knows
//! nothing about backends.

use crate::error::{RenderError, Result};
use crate::gfx::scene::Scene;

use super::draw_list::{DrawCall, FrameUniforms};

/// Consumer of draw lists.
///
/// A frame is `begin_frame`, one `draw` per call in traversal order, then
/// `end_frame`. Backends are only driven after `initialize` succeeded.
pub trait RenderBackend {
    /// Creates backend resources (devices, shaders, pipelines)
    fn initialize(&mut self) -> Result<()>;

    fn begin_frame(&mut self, uniforms: &FrameUniforms);

    fn draw(&mut self, uniforms: &FrameUniforms, call: &DrawCall<'_>);

    /// Submits the frame
    fn end_frame(&mut self) -> Result<()>;
}

/// Lifecycle of a [`Renderer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
    /// Initialization failed; holds the reported message
    Failed(String),
}

/// Per-frame summary returned by [`Renderer::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub vertices: usize,
}

pub struct Renderer<B: RenderBackend> {
    backend: B,
    state: RendererState,
}

impl<B: RenderBackend> Renderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RendererState::Uninitialized,
        }
    }

    /// Initializes the backend once.
    ///
    /// Calling again after success is a no-op. A failure is fatal: it is
    /// logged, the renderer moves to [`RendererState::Failed`] and every
    /// later call returns [`RenderError::Aborted`].
    pub fn initialize(&mut self) -> Result<()> {
        match self.state {
            RendererState::Ready => return Ok(()),
            RendererState::Failed(_) => return Err(RenderError::Aborted),
            RendererState::Uninitialized => {}
        }

        match self.backend.initialize() {
            Ok(()) => {
                log::info!("Renderer initialized");
                self.state = RendererState::Ready;
                Ok(())
            }
            Err(e) => {
                log::error!("Renderer initialization failed: {}", e);
                self.state = RendererState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Traverses `scene` and submits one draw per visible leaf
    pub fn render(&mut self, scene: &Scene) -> Result<FrameStats> {
        match self.state {
            RendererState::Ready => {}
            RendererState::Uninitialized => return Err(RenderError::NotInitialized),
            RendererState::Failed(_) => return Err(RenderError::Aborted),
        }

        let list = scene.draw_list();
        self.backend.begin_frame(&list.uniforms);
        for call in &list {
            self.backend.draw(&list.uniforms, call);
        }
        self.backend.end_frame()?;

        let stats = FrameStats {
            draw_calls: list.len(),
            vertices: list.vertex_count(),
        };
        log::debug!(
            "Rendered frame: {} draw calls, {} vertices",
            stats.draw_calls,
            stats.vertices
        );
        Ok(stats)
    }

    pub fn state(&self) -> &RendererState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == RendererState::Ready
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::Camera;
    use crate::gfx::rendering::recording::RecordingBackend;
    use crate::gfx::scene::{Color, DrawMode, Group, Mesh, SceneObject};
    use crate::math::Vector3;
    use std::sync::Arc;

    fn demo_scene() -> Scene {
        crate::logging::init_test_logging();
        let mesh = Arc::new(Mesh::flat(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
            Color::RED,
        ));
        let mut scene = Scene::new(Camera::default());
        scene.add(SceneObject::from_mesh(mesh.clone()));
        let mut group = Group::new(Vector3::new(5.0, 0.0, 0.0));
        group.add(SceneObject::new(mesh, Vector3::zero(), 1.0, DrawMode::Lines));
        scene.add(group);
        scene
    }

    #[test]
    fn test_render_before_initialize_fails() {
        let mut renderer = Renderer::new(RecordingBackend::new());
        let result = renderer.render(&demo_scene());
        assert!(matches!(result, Err(RenderError::NotInitialized)));
        assert!(renderer.backend().frames().is_empty());
    }

    #[test]
    fn test_render_submits_every_leaf() {
        let scene = demo_scene();
        let mut renderer = Renderer::new(RecordingBackend::new());
        renderer.initialize().unwrap();
        assert!(renderer.is_ready());

        let stats = renderer.render(&scene).unwrap();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.vertices, 9);

        let frames = renderer.backend().frames();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.uniforms.lighting, Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(frame.draws[0].mode, DrawMode::Triangles);
        assert_eq!(frame.draws[1].mode, DrawMode::Lines);
        assert_eq!(frame.draws[1].model.column(3), [5.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let mut renderer = Renderer::new(RecordingBackend::new());
        renderer.initialize().unwrap();
        renderer.initialize().unwrap();
        assert_eq!(renderer.backend().initialize_calls(), 1);
    }

    #[test]
    fn test_failed_initialization_is_fatal() {
        crate::logging::init_test_logging();
        let mut renderer = Renderer::new(RecordingBackend::failing("shader did not compile"));
        assert!(matches!(renderer.initialize(), Err(RenderError::Shader(_))));
        assert!(matches!(renderer.state(), RendererState::Failed(_)));

        assert!(matches!(renderer.initialize(), Err(RenderError::Aborted)));
        assert!(matches!(renderer.render(&demo_scene()), Err(RenderError::Aborted)));
        assert_eq!(renderer.backend().initialize_calls(), 1);
        assert!(renderer.backend().frames().is_empty());
    }

    #[test]
    fn test_frames_accumulate() {
        let mut scene = demo_scene();
        let mut renderer = Renderer::new(RecordingBackend::new());
        renderer.initialize().unwrap();
        renderer.render(&scene).unwrap();
        scene.set_wireframe(true);
        renderer.render(&scene).unwrap();

        let backend = renderer.into_backend();
        assert_eq!(backend.frames().len(), 2);
        assert!(backend.frames()[1]
            .draws
            .iter()
            .all(|draw| draw.mode == DrawMode::Lines));
    }
}
