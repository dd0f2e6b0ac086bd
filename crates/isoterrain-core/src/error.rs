//! Error types for isoterrain.

use thiserror::Error;

/// The main error type for isoterrain operations.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A voxel count is not a multiple of the tile size.
    #[error("voxel count {voxels} on axis {axis} is not a multiple of tile size {tile}")]
    TileMismatch { axis: char, voxels: u32, tile: u32 },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Mesh arrays disagree with each other.
    #[error("inconsistent mesh: {0}")]
    InvalidMesh(String),

    /// The mesh has more vertices than a 32-bit index can address.
    #[error("mesh with {0} vertices exceeds the 32-bit index range")]
    IndexOverflow(usize),

    /// No compute adapter could be acquired.
    #[error("compute device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A compute stage failed on the device.
    #[error("compute error: {0}")]
    ComputeError(String),

    /// The kernel appended more triangles than the buffer can hold.
    #[error("triangle buffer overflow: {emitted} triangles emitted, capacity is {capacity}")]
    CapacityExceeded { emitted: u64, capacity: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for isoterrain operations.
pub type Result<T> = std::result::Result<T, TerrainError>;
