//! Drive a headless editing session through a scripted burst of edits

use std::time::{Duration, Instant};

use rust_cube_planet::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EditorConfigBuilder::new()
        .face_resolution(48)
        .debounce(Duration::from_millis(100))?
        .redraw_interval(Duration::from_millis(10))?
        .build()?;

    let start = Instant::now();
    let mut editor = PlanetEditor::new(
        config,
        ShapeSettings::default(),
        GradientKeySet::default(),
        HeadlessRenderer::new(),
        start,
    );

    // Simulated slider drag: one strength change every 16 ms
    let mut now = start;
    for step in 0..20 {
        now += Duration::from_millis(16);
        let layer = NoiseLayer {
            strength: 0.05 + step as f32 * 0.01,
            ..NoiseLayer::default()
        };
        let settings = editor.shape_settings().with_layer(0, layer);
        editor.set_shape_settings(settings, now);
        editor.drag(2.0, 0.5);
        editor.update(now);
    }

    // Recolor the sand key, then let everything settle
    editor.set_key_color(2, Vec3::new(0.95, 0.85, 0.6), now);
    for _ in 0..20 {
        now += Duration::from_millis(10);
        let outcome = editor.update(now);
        if outcome.mesh_rebuilt || outcome.ramp_rebuilt {
            println!("{:?} at +{:?}", outcome, now - start);
        }
    }

    let renderer = editor.renderer();
    println!("Mesh generations: {}", editor.mesh_generations());
    println!("Ramp generations: {}", editor.ramp_generations());
    println!("Frames: {}", editor.frames());
    println!("Uploaded vertices: {}", renderer.last_vertex_count);
    println!(
        "Camera: pitch {:.1}, yaw {:.1}, distance {:.1}",
        editor.camera().rotation_x(),
        editor.camera().rotation_y(),
        editor.camera().distance()
    );
    println!("Ramp PNG: {} bytes", editor.ramp_png()?.len());

    Ok(())
}
