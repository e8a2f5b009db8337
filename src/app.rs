//! Frame driver.
//!
//! [`SceneRunner`] pairs a scene with a renderer and runs the animate-then-
//! render cycle one tick at a time. Scheduling ticks is left to the host.

use crate::error::{RenderError, Result};
use crate::gfx::rendering::{FrameStats, RenderBackend, Renderer};
use crate::gfx::scene::Scene;

pub struct SceneRunner<B: RenderBackend> {
    scene: Scene,
    renderer: Renderer<B>,
    frames_rendered: u64,
    elapsed: f32,
}

impl<B: RenderBackend> SceneRunner<B> {
    pub fn new(scene: Scene, backend: B) -> Self {
        Self {
            scene,
            renderer: Renderer::new(backend),
            frames_rendered: 0,
            elapsed: 0.0,
        }
    }

    /// Initializes the backend. Safe to call more than once.
    pub fn start(&mut self) -> Result<()> {
        self.renderer.initialize()
    }

    /// Runs `animate` with the time since the last tick, then renders a frame.
    ///
    /// Nothing is animated while the renderer is not ready.
    pub fn tick<F>(&mut self, dt: f32, animate: F) -> Result<FrameStats>
    where
        F: FnOnce(&mut Scene, f32),
    {
        if !self.renderer.is_ready() {
            return self.renderer.render(&self.scene);
        }

        animate(&mut self.scene, dt);
        let stats = self.renderer.render(&self.scene)?;
        self.frames_rendered += 1;
        self.elapsed += dt;
        Ok(stats)
    }

    /// Runs `frames` ticks of `dt` each, stopping at the first error
    pub fn run_frames<F>(&mut self, frames: usize, dt: f32, mut animate: F) -> Result<()>
    where
        F: FnMut(&mut Scene, f32),
    {
        if frames > 0 && !self.renderer.is_ready() {
            return Err(RenderError::NotInitialized);
        }
        for _ in 0..frames {
            self.tick(dt, &mut animate)?;
        }
        log::info!(
            "Ran {} frames ({} total, {:.2}s elapsed)",
            frames,
            self.frames_rendered,
            self.elapsed
        );
        Ok(())
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Sum of `dt` over rendered frames
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    pub fn backend(&self) -> &B {
        self.renderer.backend()
    }

    pub fn into_parts(self) -> (Scene, B) {
        (self.scene, self.renderer.into_backend())
    }
}
