//! Spinning pyramid over a rolling plane, rendered offscreen.
//!
//! Run with `cargo run --example spinning_pyramid`. Set `RUST_LOG` to change
//! the log level.

use std::f32::consts::TAU;

use supergroup::logging::init_logging;
use supergroup::prelude::*;

const FRAMES: usize = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut camera = Camera::new(Vector3::zero(), ProjectionKind::Perspective);
    camera.set_up(Vector3::new(0.0, 1.0, 0.0));

    let mut scene = Scene::new(camera);

    let ground = plane(4.0, 4.0, 4, Color::rgb(0.8, 0.5, 0.2), true, |x, z| {
        0.1 * ((x - z) * 2.0).sin() + 0.05 * ((x + z) * 10.0).sin()
    });
    let mut ground = SceneObject::new(
        Arc::new(ground),
        Vector3::new(0.0, -3000.0, -5900.0),
        10000.0,
        DrawMode::Triangles,
    );
    ground.transform_mut().set_rotation_x(0.2, 0.2);
    scene.add(ground);

    let mut spinner = Group::new(Vector3::new(0.0, -500.0, -2900.0));
    let pyramid_id = spinner.add(SceneObject::new(
        Arc::new(pyramid(1.0, 1.0, Color::rgb(1.0, 1.0, 0.0))),
        Vector3::zero(),
        800.0,
        DrawMode::Triangles,
    ));
    spinner.add(SceneObject::new(
        Arc::new(icosphere(2, Color::WHITE, true)),
        Vector3::new(900.0, 300.0, 0.0),
        200.0,
        DrawMode::Lines,
    ));
    let spinner_id = scene.add(spinner);

    let stats = scene.statistics();
    log::info!(
        "Scene: {} objects, {} groups, {} triangles",
        stats.object_count,
        stats.group_count,
        stats.total_triangles
    );

    let mut runner = headless(scene);
    runner.start()?;

    let mut angle = 0.0_f32;
    runner.run_frames(FRAMES, FRAME_TIME, |scene, dt| {
        angle = (angle + dt * TAU / 4.0) % TAU;
        if let Some(group) = scene.group_mut(spinner_id) {
            group.transform_mut().set_rotation_y(angle, angle);
        }
        if let Some(pyramid) = scene.object_mut(pyramid_id) {
            pyramid.transform_mut().set_rotation_x(angle * 2.0, angle * 2.0);
        }
    })?;

    runner.scene_mut().set_wireframe(true);
    runner.tick(FRAME_TIME, |_, _| {})?;

    let pixels = runner.backend().read_pixels()?;
    let covered = pixels.chunks(4).filter(|rgba| rgba[3] > 0).count();
    log::info!(
        "Rendered {} frames; last frame covers {} of {} pixels",
        runner.frames_rendered(),
        covered,
        pixels.len() / 4
    );

    Ok(())
}
