//! isoterrain: GPU marching cubes over procedural noise density fields.
//!
//! One call turns a [`PipelineConfig`] into a renderer-ready [`Mesh`]:
//!
//! ```no_run
//! use isoterrain::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let config = PipelineConfig::default();
//!     let output = generate_terrain_mesh(&config)?;
//!     println!("{} triangles", output.mesh.num_triangles());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Stages
//!
//! Each stage finishes before the next begins:
//!
//! 1. four random noise volumes are generated on the host
//! 2. the density function is evaluated on the device over the padded grid
//! 3. the marching cubes kernel appends triangles for every active cell
//! 4. exactly the appended triangles are read back
//! 5. the triangles are flattened into positions, normals and indices
//!
//! [`TerrainPipeline`] keeps a device and compiled kernels around for
//! repeated runs, and [`TerrainPipeline::extract`] runs stages 3 to 5 over
//! any host-side [`DensityGrid`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod pipeline;

// Re-export core types
pub use isoterrain_core::{
    DensityGrid, DensityParams, GridConfig, GridDims, Mesh, NoiseConfig, NoiseSet, PipelineConfig,
    Result, TerrainError, Triangle, UVec3, Vec3, Vertex,
};

// Re-export compute types
pub use isoterrain_gpu::{ComputeContext, ComputeError};

pub use pipeline::{generate_terrain_mesh, PipelineStats, TerrainOutput, TerrainPipeline};

/// Installs an `env_logger` logger. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
