//! Generates one terrain mesh and prints what the pipeline did.
//!
//! Pass a JSON config path to override the defaults:
//!
//! ```text
//! cargo run --example terrain -- terrain.json
//! ```

use isoterrain::*;

fn main() -> Result<()> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let output = match generate_terrain_mesh(&config) {
        Ok(output) => output,
        Err(TerrainError::DeviceUnavailable(reason)) => {
            eprintln!("No compute device available: {reason}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let stats = &output.stats;
    println!(
        "{} triangles ({} slots), {} vertices",
        stats.triangle_count,
        stats.capacity,
        output.mesh.num_vertices()
    );
    println!("  noise:    {:?}", stats.noise_time);
    println!("  density:  {:?}", stats.density_time);
    println!("  emission: {:?}", stats.emission_time);
    println!("  readback: {:?}", stats.readback_time);
    println!("  assembly: {:?}", stats.assembly_time);
    println!("  total:    {:?}", stats.total_time());

    if let Some((min, max)) = output.mesh.bounds() {
        println!("bounds: {min} .. {max}");
    }

    Ok(())
}
