//! Core data model for isoterrain.
//!
//! This crate holds everything about the isosurface pipeline that does not
//! need a compute device:
//! - [`GridDims`] and [`DensityGrid`] for the padded sample grid
//! - [`NoiseSet`] of periodic random volumes and the [`DensityParams`] function over them
//! - the marching cubes lookup [`tables`] and a reference [`marching_cubes`] kernel
//! - [`Mesh`] assembly from the emitted [`Triangle`] stream
//! - [`PipelineConfig`] and the [`TerrainError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Grid indices are u32 on the device and usize on the host
#![allow(clippy::cast_possible_truncation)]

pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod marching_cubes;
pub mod mesh;
pub mod noise;
pub mod tables;

pub use config::{GridConfig, PipelineConfig, REFERENCE_TILE_SIZE, REFERENCE_VOXELS};
pub use density::DensityParams;
pub use error::{Result, TerrainError};
pub use grid::{DensityGrid, GridDims};
pub use mesh::{Mesh, Triangle, Vertex};
pub use noise::{NoiseConfig, NoiseSet, NoiseVolume, NOISE_VOLUME_COUNT};
pub use tables::MAX_TRIANGLES_PER_CELL;

// Re-export glam types for convenience
pub use glam::{IVec3, UVec3, Vec3};
