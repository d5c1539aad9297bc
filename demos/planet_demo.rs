//! Build a cube-sphere planet and report what came out

use rust_cube_planet::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let continents = NoiseLayer {
        strength: 0.12,
        num_layers: 5,
        base_roughness: 1.1,
        roughness: 2.2,
        persistence: 0.5,
        min_value: 0.9,
        ..NoiseLayer::default()
    };
    let mountains = NoiseLayer {
        strength: 0.35,
        num_layers: 6,
        base_roughness: 1.6,
        roughness: 2.5,
        persistence: 0.45,
        min_value: 1.25,
        ..NoiseLayer::default()
    };

    let settings = ShapeSettingsBuilder::new()
        .radius(1.0)
        .seed(42)
        .layer(continents)
        .layer(mountains)
        .build()
        .scatter_centers(7);

    println!("Generating planet...");
    let generator = ShapeGenerator::new(settings);
    let mesh = generate_planet_mesh(&generator, 64);

    println!("Triangles: {}", mesh.triangle_count());
    println!("Vertices: {}", mesh.vertex_count());
    println!("Position entries: {}", mesh.position_components().len());

    let range = mesh.elevation_range();
    println!(
        "Elevation: {:.4} .. {:.4} (ceiling {:.4})",
        range.min,
        range.max,
        generator.elevation_ceiling()
    );

    // Elevation histogram over the gradient coordinate
    let mut buckets = [0usize; 5];
    for &e in mesh.elevations() {
        let bucket = ((e * buckets.len() as f32) as usize).min(buckets.len() - 1);
        buckets[bucket] += 1;
    }
    println!("\nNormalized elevation distribution:");
    for (i, count) in buckets.iter().enumerate() {
        let pct = (*count as f32 / mesh.vertex_count() as f32) * 100.0;
        println!(
            "  {:.1}-{:.1}: {} ({:.1}%)",
            i as f32 / 5.0,
            (i + 1) as f32 / 5.0,
            count,
            pct
        );
    }

    println!("\nPer-face sample (center of each face):");
    for face in CubeFace::all() {
        let sample = generator.evaluate(face.direction());
        println!(
            "  {}: radius {:.4}, normalized {:.3}",
            face.short_name(),
            sample.point.length(),
            sample.normalized
        );
    }

    Ok(())
}
