//! Compute backend for isoterrain.
//!
//! This crate provides the wgpu-based device side of the pipeline:
//! - [`ComputeContext`] for a headless device with error capture and limit checks
//! - [`NoiseTextures`] uploading noise volumes as filterable 3D textures
//! - [`DensityPass`] evaluating the density function into a [`DeviceDensityGrid`]
//! - [`MarchingCubesPass`] emitting triangles into a [`TriangleAppendBuffer`]
//! - WGSL kernel templates built with [`ComputeShaderBuilder`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Sample counts fit u32 on the device
#![allow(clippy::cast_possible_truncation)]

pub mod append_buffer;
pub mod buffer;
pub mod context;
pub mod density_pass;
pub mod error;
pub mod marching_cubes_pass;
pub mod noise_texture;
pub mod shader;
pub mod uniforms;

pub use append_buffer::TriangleAppendBuffer;
pub use buffer::ScopedBuffer;
pub use context::ComputeContext;
pub use density_pass::{DensityPass, DeviceDensityGrid};
pub use error::{ComputeError, ComputeResult};
pub use marching_cubes_pass::MarchingCubesPass;
pub use noise_texture::NoiseTextures;
pub use shader::ComputeShaderBuilder;
pub use uniforms::{DensityUniforms, GridUniforms};
