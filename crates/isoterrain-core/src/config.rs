//! Configuration for a pipeline run.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::density::DensityParams;
use crate::error::{Result, TerrainError};
use crate::grid::GridDims;
use crate::noise::NoiseConfig;

/// Voxel counts per axis of the reference sizing.
pub const REFERENCE_VOXELS: u32 = 7 * 32;

/// Tile edge length of the reference sizing.
pub const REFERENCE_TILE_SIZE: u32 = 8;

/// Grid sizing and surface extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Active voxel counts per axis. Each must be a multiple of `tile_size`.
    pub voxels: [u32; 3],
    /// Threads per dimension of a dispatch tile.
    pub tile_size: u32,
    /// Distance between neighbouring samples in output mesh units.
    pub voxel_size: f32,
    /// Density value at which the surface is extracted.
    pub iso_level: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            voxels: [64, 64, 64],
            tile_size: REFERENCE_TILE_SIZE,
            voxel_size: 1.0,
            iso_level: 0.0,
        }
    }
}

impl GridConfig {
    /// The full-size reference grid: 224 voxels per axis in tiles of 8.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            voxels: [REFERENCE_VOXELS; 3],
            ..Self::default()
        }
    }

    /// Creates a cubic grid of `voxels` per axis.
    #[must_use]
    pub fn cubic(voxels: u32, tile_size: u32) -> Self {
        Self {
            voxels: [voxels; 3],
            tile_size,
            ..Self::default()
        }
    }

    /// Validates the sizing and returns the derived grid dimensions.
    pub fn dims(&self) -> Result<GridDims> {
        GridDims::new(self.voxels, self.tile_size)
    }

    fn validate(&self) -> Result<()> {
        self.dims()?;
        if !self.voxel_size.is_finite() || self.voxel_size <= 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )));
        }
        if !self.iso_level.is_finite() {
            return Err(TerrainError::InvalidConfig("iso_level must be finite".into()));
        }
        Ok(())
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Grid sizing.
    pub grid: GridConfig,
    /// Noise volume generation.
    pub noise: NoiseConfig,
    /// Density function shape.
    pub density: DensityParams,
}

impl PipelineConfig {
    /// Checks every setting, returning the first violation found.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.noise.validate()?;
        self.density.validate()?;
        Ok(())
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded pipeline config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.voxels, [64, 64, 64]);
        assert_eq!(config.grid.tile_size, 8);
        assert_eq!(config.grid.iso_level, 0.0);
        assert_eq!(config.noise.volume_size, 16);
        assert!(config.noise.seed.is_none());
    }

    #[test]
    fn test_reference_sizing() {
        let grid = GridConfig::reference();
        assert_eq!(grid.voxels, [224, 224, 224]);
        let dims = grid.dims().unwrap();
        assert_eq!(dims.samples().x, 232);
    }

    #[test]
    fn test_rejects_misaligned_voxels() {
        let mut config = PipelineConfig::default();
        config.grid.voxels = [64, 60, 64];
        match config.validate() {
            Err(TerrainError::TileMismatch { axis, voxels, tile }) => {
                assert_eq!(axis, 'y');
                assert_eq!(voxels, 60);
                assert_eq!(tile, 8);
            }
            other => panic!("expected tile mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_grid_too_large_to_index() {
        let mut config = PipelineConfig::default();
        config.grid.voxels = [1 << 30; 3];
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_voxel_size() {
        let mut config = PipelineConfig::default();
        config.grid.voxel_size = 0.0;
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));
        config.grid.voxel_size = f32::NAN;
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config = PipelineConfig::from_json_str(
            r#"{ "grid": { "voxels": [16, 32, 16], "tile_size": 4 }, "noise": { "seed": 7 } }"#,
        )
        .unwrap();
        assert_eq!(config.grid.voxels, [16, 32, 16]);
        assert_eq!(config.grid.tile_size, 4);
        assert_eq!(config.grid.voxel_size, 1.0);
        assert_eq!(config.noise.seed, Some(7));
        assert_eq!(config.noise.volume_size, 16);
        assert_eq!(config.density, DensityParams::default());
    }

    #[test]
    fn test_json_rejects_invalid() {
        let result = PipelineConfig::from_json_str(r#"{ "grid": { "voxels": [10, 10, 10] } }"#);
        assert!(matches!(result, Err(TerrainError::TileMismatch { .. })));
        let result = PipelineConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(TerrainError::JsonError(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = PipelineConfig::default();
        config.noise.seed = Some(42);
        config.density.ground_level = 0.25;
        let json = config.to_json_string().unwrap();
        let back = PipelineConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PipelineConfig::load("/nonexistent/isoterrain.json");
        assert!(matches!(result, Err(TerrainError::IoError(_))));
    }
}
