//! Edit a gradient key set and export the ramp as PNG bytes

use rust_cube_planet::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut keys = GradientKeySet::default();
    println!("Default palette:");
    for key in keys.sorted() {
        println!("  {:.2} -> {:?}", key.position(), key.color());
    }

    // A lava band between sand and grass
    let lava = keys.add_key(0.5);
    keys.set_color(lava, Vec3::new(0.9, 0.25, 0.05));
    keys.move_key(lava, -0.05);

    let ramp = synthesize(&keys, 256);
    println!("\nRamp of {} texels", ramp.width());
    for t in [0.0, 0.25, 0.45, 0.75, 1.0] {
        println!("  t = {:.2}: {:?}", t, ramp.sample(t));
    }

    let png = ramp.encode_png()?;
    println!("\nEncoded PNG: {} bytes", png.len());

    // Deleting stops at the last key
    keys.clear();
    println!("After clear: {} key(s)", keys.key_count());
    println!("Remove last key accepted: {}", keys.remove_key(0));

    Ok(())
}
