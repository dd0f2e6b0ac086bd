//! Padded sample grids and their dispatch geometry.
//!
//! A grid with `V` active voxels per axis and tile size `T` stores `V + T`
//! samples per axis. The extra `T` samples let every active cell read all
//! eight corners without bounds checks, and keep both extents divisible by
//! `T` so dispatch tile counts are exact.

use glam::{IVec3, UVec3};

use crate::error::{Result, TerrainError};
use crate::mesh::Triangle;
use crate::tables::MAX_TRIANGLES_PER_CELL;

/// Validated grid extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    voxels: UVec3,
    tile_size: u32,
}

impl GridDims {
    /// Creates grid dimensions, checking that every voxel count is a
    /// non-zero multiple of `tile_size`.
    pub fn new(voxels: [u32; 3], tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(TerrainError::InvalidConfig("tile_size must be at least 1".into()));
        }
        for (axis, &count) in ['x', 'y', 'z'].iter().zip(voxels.iter()) {
            if count == 0 {
                return Err(TerrainError::InvalidConfig(format!(
                    "voxel count on axis {axis} must be at least 1"
                )));
            }
            if count % tile_size != 0 {
                return Err(TerrainError::TileMismatch {
                    axis: *axis,
                    voxels: count,
                    tile: tile_size,
                });
            }
            if count.checked_add(tile_size).is_none() {
                return Err(TerrainError::InvalidConfig(format!(
                    "voxel count on axis {axis} is too large"
                )));
            }
        }
        let dims = Self {
            voxels: UVec3::from_array(voxels),
            tile_size,
        };
        dims.check_totals()?;
        Ok(dims)
    }

    /// Rejects grids whose sample, cell or triangle storage totals overflow.
    fn check_totals(&self) -> Result<()> {
        let product = |v: UVec3| {
            (v.x as usize)
                .checked_mul(v.y as usize)
                .and_then(|xy| xy.checked_mul(v.z as usize))
        };
        let too_large = |what: &str| {
            TerrainError::InvalidConfig(format!(
                "grid of {} voxels is too large: {what} overflows",
                self.voxels
            ))
        };

        product(self.samples()).ok_or_else(|| too_large("sample count"))?;
        let cells = product(self.voxels).ok_or_else(|| too_large("cell count"))?;
        (cells as u64)
            .checked_mul(MAX_TRIANGLES_PER_CELL as u64)
            .and_then(|slots| slots.checked_mul(Triangle::SIZE))
            .ok_or_else(|| too_large("triangle storage"))?;
        Ok(())
    }

    /// Active cells per axis.
    #[must_use]
    pub fn voxels(&self) -> UVec3 {
        self.voxels
    }

    /// Threads per dimension of a dispatch tile.
    #[must_use]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Stored samples per axis, including padding.
    #[must_use]
    pub fn samples(&self) -> UVec3 {
        self.voxels + UVec3::splat(self.tile_size)
    }

    /// Total number of stored samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        let s = self.samples();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Total number of active cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.voxels.x as usize * self.voxels.y as usize * self.voxels.z as usize
    }

    /// Tiles needed to cover every sample.
    #[must_use]
    pub fn sample_tiles(&self) -> UVec3 {
        self.samples() / self.tile_size
    }

    /// Tiles needed to cover every active cell.
    #[must_use]
    pub fn cell_tiles(&self) -> UVec3 {
        self.voxels / self.tile_size
    }

    /// Triangle slots needed so that no case table entry can overflow.
    #[must_use]
    pub fn triangle_capacity(&self) -> u64 {
        MAX_TRIANGLES_PER_CELL as u64 * self.cell_count() as u64
    }

    /// Flat index of a sample: `x + Sx * (y + Sy * z)`.
    #[inline]
    #[must_use]
    pub fn sample_index(&self, p: UVec3) -> usize {
        let s = self.samples();
        p.x as usize + s.x as usize * (p.y as usize + s.y as usize * p.z as usize)
    }

    /// Whether `p` addresses a stored sample.
    #[must_use]
    pub fn contains_sample(&self, p: UVec3) -> bool {
        p.cmplt(self.samples()).all()
    }

    /// Cell coordinates of the `index`-th active cell in x-fastest order.
    #[must_use]
    pub fn cell_coords(&self, index: usize) -> UVec3 {
        let vx = self.voxels.x as usize;
        let vy = self.voxels.y as usize;
        #[allow(clippy::cast_possible_truncation)]
        UVec3::new(
            (index % vx) as u32,
            ((index / vx) % vy) as u32,
            (index / (vx * vy)) as u32,
        )
    }
}

/// A host-side density grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    dims: GridDims,
    values: Vec<f32>,
}

impl DensityGrid {
    /// Wraps existing samples laid out by [`GridDims::sample_index`].
    pub fn new(dims: GridDims, values: Vec<f32>) -> Result<Self> {
        if values.len() != dims.sample_count() {
            return Err(TerrainError::SizeMismatch {
                expected: dims.sample_count(),
                actual: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    /// Evaluates `f` at every sample coordinate.
    pub fn from_fn(dims: GridDims, mut f: impl FnMut(UVec3) -> f32) -> Self {
        let s = dims.samples();
        let mut values = Vec::with_capacity(dims.sample_count());
        for z in 0..s.z {
            for y in 0..s.y {
                for x in 0..s.x {
                    values.push(f(UVec3::new(x, y, z)));
                }
            }
        }
        Self { dims, values }
    }

    /// A grid holding `value` everywhere.
    #[must_use]
    pub fn filled(dims: GridDims, value: f32) -> Self {
        Self {
            dims,
            values: vec![value; dims.sample_count()],
        }
    }

    #[must_use]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Sample at `p`.
    ///
    /// # Panics
    /// Panics if `p` lies outside the stored samples.
    #[inline]
    #[must_use]
    pub fn get(&self, p: UVec3) -> f32 {
        self.values[self.dims.sample_index(p)]
    }

    /// Overwrites the sample at `p`.
    pub fn set(&mut self, p: UVec3, value: f32) {
        let index = self.dims.sample_index(p);
        self.values[index] = value;
    }

    /// Sample at `p` with coordinates clamped to the stored extents.
    #[inline]
    #[must_use]
    pub fn sample_clamped(&self, p: IVec3) -> f32 {
        let hi = self.dims.samples().as_ivec3() - IVec3::ONE;
        self.get(p.clamp(IVec3::ZERO, hi).as_uvec3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CORNER_OFFSETS;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_overflowing_totals() {
        for voxels in [[1 << 30; 3], [1 << 30, 1 << 30, 8]] {
            assert!(matches!(
                GridDims::new(voxels, 8),
                Err(TerrainError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_padded_extents() {
        let dims = GridDims::new([16, 24, 8], 8).unwrap();
        assert_eq!(dims.samples(), UVec3::new(24, 32, 16));
        assert_eq!(dims.sample_tiles(), UVec3::new(3, 4, 2));
        assert_eq!(dims.cell_tiles(), UVec3::new(2, 3, 1));
        assert_eq!(dims.cell_count(), 16 * 24 * 8);
        assert_eq!(dims.sample_count(), 24 * 32 * 16);
        assert_eq!(dims.triangle_capacity(), 5 * 16 * 24 * 8);
    }

    #[test]
    fn test_rejects_zero_tile() {
        assert!(matches!(
            GridDims::new([8, 8, 8], 0),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_voxels() {
        assert!(matches!(
            GridDims::new([8, 0, 8], 4),
            Err(TerrainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sample_index_row_major() {
        let dims = GridDims::new([4, 4, 4], 2).unwrap();
        assert_eq!(dims.sample_index(UVec3::ZERO), 0);
        assert_eq!(dims.sample_index(UVec3::X), 1);
        assert_eq!(dims.sample_index(UVec3::Y), 6);
        assert_eq!(dims.sample_index(UVec3::Z), 36);
        assert_eq!(dims.sample_index(UVec3::splat(5)), dims.sample_count() - 1);
    }

    #[test]
    fn test_cell_coords_roundtrip() {
        let dims = GridDims::new([4, 2, 6], 2).unwrap();
        let mut seen = Vec::new();
        for i in 0..dims.cell_count() {
            let c = dims.cell_coords(i);
            assert!(c.cmplt(dims.voxels()).all());
            seen.push(c);
        }
        seen.sort_by_key(|c| (c.z, c.y, c.x));
        seen.dedup();
        assert_eq!(seen.len(), dims.cell_count());
    }

    #[test]
    fn test_density_grid_from_fn() {
        let dims = GridDims::new([2, 2, 2], 1).unwrap();
        let grid = DensityGrid::from_fn(dims, |p| (p.x + 10 * p.y + 100 * p.z) as f32);
        assert_eq!(grid.values().len(), 27);
        assert_eq!(grid.get(UVec3::new(2, 1, 0)), 12.0);
        assert_eq!(grid.get(UVec3::new(1, 2, 2)), 221.0);
    }

    #[test]
    fn test_density_grid_size_mismatch() {
        let dims = GridDims::new([2, 2, 2], 1).unwrap();
        match DensityGrid::new(dims, vec![0.0; 8]) {
            Err(TerrainError::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, 27);
                assert_eq!(actual, 8);
            }
            other => panic!("expected size mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_clamped() {
        let dims = GridDims::new([2, 2, 2], 1).unwrap();
        let grid = DensityGrid::from_fn(dims, |p| p.x as f32);
        assert_eq!(grid.sample_clamped(IVec3::new(-1, 0, 0)), 0.0);
        assert_eq!(grid.sample_clamped(IVec3::new(7, 1, 1)), 2.0);
    }

    proptest! {
        #[test]
        fn prop_tile_counts_exact(tiles in prop::array::uniform3(1u32..12), tile in 1u32..9) {
            let voxels = [tiles[0] * tile, tiles[1] * tile, tiles[2] * tile];
            let dims = GridDims::new(voxels, tile).unwrap();
            let samples = dims.samples();
            for axis in 0..3 {
                prop_assert_eq!(voxels[axis] % tile, 0);
                prop_assert_eq!(samples[axis] % tile, 0);
                prop_assert_eq!(dims.sample_tiles()[axis] * tile, samples[axis]);
                prop_assert_eq!(dims.cell_tiles()[axis] * tile, voxels[axis]);
            }
        }

        #[test]
        fn prop_misaligned_voxels_rejected(voxels in 1u32..200, tile in 2u32..9) {
            prop_assume!(voxels % tile != 0);
            let result = GridDims::new([voxels, tile, tile], tile);
            let is_tile_mismatch = matches!(result, Err(TerrainError::TileMismatch { .. }));
            prop_assert!(is_tile_mismatch);
        }

        #[test]
        fn prop_corner_reads_in_bounds(tiles in prop::array::uniform3(1u32..6), tile in 1u32..9) {
            let dims = GridDims::new([tiles[0] * tile, tiles[1] * tile, tiles[2] * tile], tile).unwrap();
            // The farthest cell is the worst case for the corner stencil.
            let last = dims.voxels() - UVec3::ONE;
            for offset in CORNER_OFFSETS {
                let p = last + UVec3::from_array(offset);
                prop_assert!(dims.contains_sample(p));
                prop_assert!(dims.sample_index(p) < dims.sample_count());
            }
        }
    }
}
