//! The procedural density function.
//!
//! Density is a falling ground plane plus four octaves of domain-warped
//! noise. Positive values are solid. The GPU kernel in `density.wgsl`
//! computes the same expression; [`DensityParams::evaluate`] is its host
//! mirror, used to check device output and to build grids without a device.

use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::grid::{DensityGrid, GridDims};
use crate::noise::{NoiseSet, NOISE_VOLUME_COUNT};

/// Offsets decorrelating the three warp channels, which all read volume 3.
pub const WARP_OFFSETS: [Vec3; 2] = [Vec3::new(0.37, 0.11, 0.71), Vec3::new(0.53, 0.89, 0.23)];

/// Shape of the density function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParams {
    /// Sampling frequency of each noise octave, in noise periods per unit.
    pub frequencies: [f32; NOISE_VOLUME_COUNT],
    /// Weight of each noise octave.
    pub amplitudes: [f32; NOISE_VOLUME_COUNT],
    /// Grid coordinates to noise space.
    pub sample_scale: f32,
    /// Height in noise space where the ground term is zero.
    pub ground_level: f32,
    /// Slope of the ground term.
    pub ground_gradient: f32,
    /// Displacement of the warped sample point.
    pub warp_strength: f32,
    /// Frequency of the warp field.
    pub warp_frequency: f32,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            frequencies: [1.01, 1.96, 4.03, 7.97],
            amplitudes: [1.0, 0.5, 0.25, 0.125],
            sample_scale: 1.0 / 64.0,
            ground_level: 0.5,
            ground_gradient: 4.0,
            warp_strength: 0.15,
            warp_frequency: 0.37,
        }
    }
}

impl DensityParams {
    pub(crate) fn validate(&self) -> Result<()> {
        let scalars = [
            self.sample_scale,
            self.ground_level,
            self.ground_gradient,
            self.warp_strength,
            self.warp_frequency,
        ];
        let all_finite = scalars
            .iter()
            .chain(&self.frequencies)
            .chain(&self.amplitudes)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(TerrainError::InvalidConfig(
                "density parameters must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Density at grid coordinate `coord`.
    #[must_use]
    pub fn evaluate(&self, noise: &NoiseSet, coord: Vec3) -> f32 {
        let w = coord * self.sample_scale;
        let warp_noise = noise.volume(NOISE_VOLUME_COUNT - 1);
        let wf = w * self.warp_frequency;
        let warp = Vec3::new(
            warp_noise.sample(wf),
            warp_noise.sample(wf + WARP_OFFSETS[0]),
            warp_noise.sample(wf + WARP_OFFSETS[1]),
        ) * 2.0
            - Vec3::ONE;
        let q = w + warp * self.warp_strength;

        let mut density = (self.ground_level - w.y) * self.ground_gradient;
        for (i, volume) in noise.volumes().iter().enumerate() {
            let n = volume.sample(q * self.frequencies[i]);
            density += (n * 2.0 - 1.0) * self.amplitudes[i];
        }
        density
    }

    /// Evaluates the whole padded grid on the host.
    #[must_use]
    pub fn evaluate_grid(&self, noise: &NoiseSet, dims: GridDims) -> DensityGrid {
        DensityGrid::from_fn(dims, |p: UVec3| self.evaluate(noise, p.as_vec3()))
    }

    /// Sum of absolute amplitudes: the most the noise terms can move density.
    #[must_use]
    pub fn noise_bound(&self) -> f32 {
        self.amplitudes.iter().map(|a| a.abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseConfig;

    fn noise() -> NoiseSet {
        NoiseSet::generate(&NoiseConfig {
            volume_size: 16,
            seed: Some(11),
        })
        .unwrap()
    }

    #[test]
    fn test_deterministic_given_noise() {
        let noise = noise();
        let params = DensityParams::default();
        let p = Vec3::new(12.0, 30.0, 5.0);
        assert_eq!(params.evaluate(&noise, p), params.evaluate(&noise, p));
    }

    #[test]
    fn test_ground_dominates_far_from_level() {
        let noise = noise();
        let params = DensityParams::default();
        let bound = params.noise_bound();
        // y = 0 is ground_level / sample_scale = 32 grid units below the level.
        for x in 0..8 {
            let low = params.evaluate(&noise, Vec3::new(x as f32 * 3.0, 0.0, 7.0));
            let high = params.evaluate(&noise, Vec3::new(x as f32 * 3.0, 64.0, 7.0));
            assert!(low >= 2.0 - bound, "low {low}");
            assert!(high <= -2.0 + bound, "high {high}");
            assert!(low > high);
        }
    }

    #[test]
    fn test_continuous_between_samples() {
        let noise = noise();
        let params = DensityParams::default();
        let mut p = Vec3::new(3.0, 20.0, 9.0);
        let mut prev = params.evaluate(&noise, p);
        for _ in 0..200 {
            p += Vec3::new(0.01, 0.013, 0.007);
            let next = params.evaluate(&noise, p);
            assert!((next - prev).abs() < 0.1, "jump {prev} -> {next}");
            prev = next;
        }
    }

    #[test]
    fn test_grid_has_surface() {
        let noise = noise();
        let params = DensityParams::default();
        let dims = GridDims::new([16, 64, 16], 8).unwrap();
        let grid = params.evaluate_grid(&noise, dims);
        let solid = grid.values().iter().filter(|&&v| v > 0.0).count();
        assert!(solid > 0);
        assert!(solid < grid.values().len());
    }

    #[test]
    fn test_rejects_non_finite() {
        let params = DensityParams {
            warp_strength: f32::INFINITY,
            ..DensityParams::default()
        };
        assert!(params.validate().is_err());
        let params = DensityParams {
            amplitudes: [1.0, f32::NAN, 0.0, 0.0],
            ..DensityParams::default()
        };
        assert!(params.validate().is_err());
    }
}
