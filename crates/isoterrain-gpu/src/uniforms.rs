//! Uniform blocks shared with the kernels in `shaders/common.wgsl`.

use bytemuck::{Pod, Zeroable};
use isoterrain_core::{DensityParams, GridDims};

/// Grid extents and extraction settings. 48 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GridUniforms {
    /// xyz: active voxels, w: triangle capacity.
    pub voxels: [u32; 4],
    /// xyz: padded sample counts, w unused.
    pub samples: [u32; 4],
    pub iso_level: f32,
    pub voxel_size: f32,
    pub _pad: [f32; 2],
}

impl GridUniforms {
    #[must_use]
    pub fn new(dims: &GridDims, capacity: u32, iso_level: f32, voxel_size: f32) -> Self {
        let v = dims.voxels();
        let s = dims.samples();
        Self {
            voxels: [v.x, v.y, v.z, capacity],
            samples: [s.x, s.y, s.z, 0],
            iso_level,
            voxel_size,
            _pad: [0.0; 2],
        }
    }
}

/// Density function parameters. 64 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DensityUniforms {
    pub frequencies: [f32; 4],
    pub amplitudes: [f32; 4],
    /// x: sample scale, y: ground level, z: ground gradient.
    pub shape: [f32; 4],
    /// x: warp strength, y: warp frequency.
    pub warp: [f32; 4],
}

impl From<&DensityParams> for DensityUniforms {
    fn from(params: &DensityParams) -> Self {
        Self {
            frequencies: params.frequencies,
            amplitudes: params.amplitudes,
            shape: [
                params.sample_scale,
                params.ground_level,
                params.ground_gradient,
                0.0,
            ],
            warp: [params.warp_strength, params.warp_frequency, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<GridUniforms>(), 48);
        assert_eq!(std::mem::size_of::<DensityUniforms>(), 64);
    }

    #[test]
    fn test_grid_uniforms_layout() {
        let dims = GridDims::new([16, 8, 24], 8).unwrap();
        let u = GridUniforms::new(&dims, 123, 0.5, 2.0);
        assert_eq!(u.voxels, [16, 8, 24, 123]);
        assert_eq!(u.samples, [24, 16, 32, 0]);
        let words: &[u32] = bytemuck::cast_slice(std::slice::from_ref(&u));
        assert_eq!(f32::from_bits(words[8]), 0.5);
        assert_eq!(f32::from_bits(words[9]), 2.0);
    }

    #[test]
    fn test_density_uniforms_from_params() {
        let params = DensityParams::default();
        let u = DensityUniforms::from(&params);
        assert_eq!(u.frequencies, params.frequencies);
        assert_eq!(u.shape[0], params.sample_scale);
        assert_eq!(u.warp[1], params.warp_frequency);
    }
}
