//! Random noise volumes sampled with periodic trilinear filtering.

use glam::{IVec3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Number of independent noise volumes feeding the density function.
pub const NOISE_VOLUME_COUNT: usize = 4;

/// Noise generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Texels per side of each cubic volume.
    pub volume_size: u32,
    /// Fixed seed for reproducible volumes. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            volume_size: 16,
            seed: None,
        }
    }
}

impl NoiseConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        check_volume_size(self.volume_size)
    }
}

fn check_volume_size(size: u32) -> Result<()> {
    if size < 2 {
        return Err(TerrainError::InvalidConfig(format!(
            "noise volume_size must be at least 2, got {size}"
        )));
    }
    Ok(())
}

/// A cubic volume of uniform random samples in `[0, 1)`.
///
/// Texels are stored x-fastest: `x + size * (y + size * z)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseVolume {
    size: u32,
    texels: Vec<f32>,
}

impl NoiseVolume {
    /// Fills a volume from `rng`.
    pub fn random(size: u32, rng: &mut impl Rng) -> Self {
        let len = (size as usize).pow(3);
        let texels = (0..len).map(|_| rng.gen::<f32>()).collect();
        Self { size, texels }
    }

    /// Wraps existing texels. `size` must be at least 2.
    pub fn from_texels(size: u32, texels: Vec<f32>) -> Result<Self> {
        check_volume_size(size)?;
        let expected = (size as usize).pow(3);
        if texels.len() != expected {
            return Err(TerrainError::SizeMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self { size, texels })
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    /// Texel at integer coordinates, wrapped into the volume.
    #[must_use]
    pub fn texel(&self, p: IVec3) -> f32 {
        #[allow(clippy::cast_possible_wrap)]
        let w = p.rem_euclid(IVec3::splat(self.size as i32));
        let n = self.size as usize;
        #[allow(clippy::cast_sign_loss)]
        let index = w.x as usize + n * (w.y as usize + n * w.z as usize);
        self.texels[index]
    }

    /// Samples at normalised coordinates with repeat addressing and
    /// trilinear filtering. One unit of `uv` spans the volume once, and
    /// texel centres sit at `(i + 0.5) / size`.
    #[must_use]
    pub fn sample(&self, uv: Vec3) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let t = uv * self.size as f32 - Vec3::splat(0.5);
        let base = t.floor();
        let f = t - base;
        let i = base.as_ivec3();

        let c = |dx: i32, dy: i32, dz: i32| self.texel(i + IVec3::new(dx, dy, dz));
        let x00 = lerp(c(0, 0, 0), c(1, 0, 0), f.x);
        let x10 = lerp(c(0, 1, 0), c(1, 1, 0), f.x);
        let x01 = lerp(c(0, 0, 1), c(1, 0, 1), f.x);
        let x11 = lerp(c(0, 1, 1), c(1, 1, 1), f.x);
        lerp(lerp(x00, x10, f.y), lerp(x01, x11, f.y), f.z)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// The full set of noise volumes for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSet {
    volumes: [NoiseVolume; NOISE_VOLUME_COUNT],
}

impl NoiseSet {
    /// Generates independent volumes. Seeded configurations are reproducible.
    pub fn generate(config: &NoiseConfig) -> Result<Self> {
        config.validate()?;
        let volumes = match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                std::array::from_fn(|_| NoiseVolume::random(config.volume_size, &mut rng))
            }
            None => {
                let mut rng = rand::thread_rng();
                std::array::from_fn(|_| NoiseVolume::random(config.volume_size, &mut rng))
            }
        };
        log::debug!(
            "generated {} noise volumes of {}^3 (seed: {:?})",
            NOISE_VOLUME_COUNT,
            config.volume_size,
            config.seed
        );
        Ok(Self { volumes })
    }

    /// Builds a set from existing volumes, which must share one size.
    pub fn from_volumes(volumes: [NoiseVolume; NOISE_VOLUME_COUNT]) -> Result<Self> {
        let size = volumes[0].size();
        check_volume_size(size)?;
        if let Some(odd) = volumes.iter().find(|v| v.size() != size) {
            return Err(TerrainError::InvalidConfig(format!(
                "noise volumes must share one size, got {size} and {}",
                odd.size()
            )));
        }
        Ok(Self { volumes })
    }

    #[must_use]
    pub fn volumes(&self) -> &[NoiseVolume; NOISE_VOLUME_COUNT] {
        &self.volumes
    }

    #[must_use]
    pub fn volume(&self, index: usize) -> &NoiseVolume {
        &self.volumes[index]
    }

    /// Texels per side, shared by every volume.
    #[must_use]
    pub fn volume_size(&self) -> u32 {
        self.volumes[0].size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seeded(seed: u64) -> NoiseSet {
        NoiseSet::generate(&NoiseConfig {
            volume_size: 16,
            seed: Some(seed),
        })
        .unwrap()
    }

    #[test]
    fn test_texels_in_unit_range() {
        let set = seeded(1);
        for volume in set.volumes() {
            assert_eq!(volume.texels().len(), 16 * 16 * 16);
            assert!(volume.texels().iter().all(|&v| (0.0..1.0).contains(&v)));
        }
    }

    #[test]
    fn test_volumes_are_independent() {
        let set = seeded(2);
        assert_ne!(set.volume(0), set.volume(1));
        assert_ne!(set.volume(2), set.volume(3));
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(seeded(7), seeded(7));
        assert_ne!(seeded(7), seeded(8));
    }

    #[test]
    fn test_unseeded_generation() {
        let set = NoiseSet::generate(&NoiseConfig::default()).unwrap();
        assert_eq!(set.volume_size(), 16);
    }

    #[test]
    fn test_rejects_tiny_volume() {
        let config = NoiseConfig {
            volume_size: 1,
            seed: None,
        };
        assert!(matches!(
            NoiseSet::generate(&config),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_mean_near_half() {
        let set = seeded(3);
        let texels = set.volume(0).texels();
        #[allow(clippy::cast_precision_loss)]
        let mean = texels.iter().sum::<f32>() / texels.len() as f32;
        assert!((mean - 0.5).abs() < 0.05, "mean {mean}");
    }

    #[test]
    fn test_sample_at_texel_centre_is_exact() {
        let set = seeded(4);
        let volume = set.volume(0);
        for p in [IVec3::new(0, 0, 0), IVec3::new(3, 7, 11), IVec3::new(15, 15, 15)] {
            let uv = (p.as_vec3() + Vec3::splat(0.5)) / 16.0;
            assert!((volume.sample(uv) - volume.texel(p)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sample_wraps_between_edges() {
        let texels = (0..8).map(|i| if i % 2 == 0 { 0.0 } else { 1.0 }).collect();
        let volume = NoiseVolume::from_texels(2, texels).unwrap();
        // uv = 0 sits halfway between the last and first texel along x.
        assert!((volume.sample(Vec3::new(0.0, 0.25, 0.25)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_degenerate_volumes() {
        assert!(matches!(
            NoiseVolume::from_texels(0, Vec::new()),
            Err(TerrainError::InvalidConfig(_))
        ));
        assert!(matches!(
            NoiseVolume::from_texels(1, vec![0.5]),
            Err(TerrainError::InvalidConfig(_))
        ));

        let mut rng = StdRng::seed_from_u64(0);
        let volumes = std::array::from_fn(|_| NoiseVolume::random(0, &mut rng));
        assert!(matches!(
            NoiseSet::from_volumes(volumes),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_volumes_size_check() {
        let mut rng = StdRng::seed_from_u64(0);
        let volumes = [
            NoiseVolume::random(4, &mut rng),
            NoiseVolume::random(4, &mut rng),
            NoiseVolume::random(8, &mut rng),
            NoiseVolume::random(4, &mut rng),
        ];
        assert!(NoiseSet::from_volumes(volumes).is_err());
    }

    proptest! {
        #[test]
        fn prop_sample_is_periodic(
            x in -4.0f32..4.0,
            y in -4.0f32..4.0,
            z in -4.0f32..4.0,
            shift in prop::array::uniform3(-2i32..3),
        ) {
            let set = seeded(5);
            let volume = set.volume(1);
            let uv = Vec3::new(x, y, z);
            let a = volume.sample(uv);
            let b = volume.sample(uv + IVec3::from_array(shift).as_vec3());
            prop_assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }

        #[test]
        fn prop_sample_in_unit_range(x in -8.0f32..8.0, y in -8.0f32..8.0, z in -8.0f32..8.0) {
            let set = seeded(6);
            let v = set.volume(2).sample(Vec3::new(x, y, z));
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }
}
