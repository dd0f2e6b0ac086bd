//! Compute backend error types.

use isoterrain_core::TerrainError;
use thiserror::Error;

/// Errors that can occur while driving the compute device.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// No adapter matched the request.
    #[error("failed to create compute adapter: {0}")]
    AdapterCreationFailed(String),

    /// Failed to create wgpu device.
    #[error("failed to create compute device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// The device cannot run workgroups of the requested tile size.
    #[error("tile size {tile} needs {invocations} invocations per workgroup, device allows {limit}")]
    UnsupportedTileSize {
        tile: u32,
        invocations: u64,
        limit: u32,
    },

    /// A dispatch needs more workgroups per dimension than the device allows.
    #[error("dispatch of {tiles} workgroups along one axis exceeds the device limit of {limit}")]
    DispatchTooLarge { tiles: u32, limit: u32 },

    /// A buffer would exceed the device limits.
    #[error("{label} needs {size} bytes, device limit is {limit}")]
    BufferTooLarge {
        label: &'static str,
        size: u64,
        limit: u64,
    },

    /// Out of device memory.
    #[error("out of device memory during {0}")]
    OutOfMemory(String),

    /// wgpu rejected a call.
    #[error("validation error during {stage}: {message}")]
    Validation { stage: String, message: String },

    /// A shader template could not be resolved.
    #[error("shader template error: {0}")]
    ShaderTemplate(String),

    /// Mapping a readback buffer failed.
    #[error("buffer map failed: {0}")]
    BufferMapFailed(String),

    /// Waiting for the device failed.
    #[error("device poll failed: {0}")]
    PollFailed(String),

    /// More triangles were appended than the buffer holds.
    #[error("triangle buffer overflow: {emitted} triangles emitted, capacity is {capacity}")]
    CapacityExceeded { emitted: u64, capacity: u64 },

    /// Host data did not match the device layout.
    #[error(transparent)]
    Layout(#[from] TerrainError),
}

/// A specialized Result type for compute operations.
pub type ComputeResult<T> = std::result::Result<T, ComputeError>;

impl From<ComputeError> for TerrainError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::AdapterCreationFailed(_) | ComputeError::DeviceCreationFailed(_) => {
                TerrainError::DeviceUnavailable(err.to_string())
            }
            ComputeError::CapacityExceeded { emitted, capacity } => {
                TerrainError::CapacityExceeded { emitted, capacity }
            }
            ComputeError::Layout(inner) => inner,
            other => TerrainError::ComputeError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_failure_maps_to_unavailable() {
        let err: TerrainError = ComputeError::AdapterCreationFailed("none".into()).into();
        assert!(matches!(err, TerrainError::DeviceUnavailable(_)));
    }

    #[test]
    fn test_capacity_is_preserved() {
        let err: TerrainError = ComputeError::CapacityExceeded {
            emitted: 11,
            capacity: 10,
        }
        .into();
        assert!(matches!(
            err,
            TerrainError::CapacityExceeded {
                emitted: 11,
                capacity: 10
            }
        ));
    }

    #[test]
    fn test_other_errors_carry_message() {
        let err: TerrainError = ComputeError::OutOfMemory("density grid".into()).into();
        match err {
            TerrainError::ComputeError(message) => assert!(message.contains("density grid")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_layout_error_unwraps() {
        let inner = TerrainError::SizeMismatch {
            expected: 4,
            actual: 3,
        };
        let err: TerrainError = ComputeError::from(inner).into();
        assert!(matches!(err, TerrainError::SizeMismatch { .. }));
    }
}
