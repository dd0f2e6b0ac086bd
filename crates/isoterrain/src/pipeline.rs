//! The ordered pipeline entry point.

use std::time::{Duration, Instant};

use isoterrain_core::{
    DensityGrid, GridDims, Mesh, NoiseSet, PipelineConfig, Result, TerrainError, Triangle,
};
use isoterrain_gpu::{
    ComputeContext, DensityPass, DeviceDensityGrid, MarchingCubesPass, NoiseTextures,
    TriangleAppendBuffer,
};

/// Counts and per-stage wall times of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Triangles read back from the device.
    pub triangle_count: usize,
    /// Triangle slots allocated on the device.
    pub capacity: u64,
    pub noise_time: Duration,
    pub density_time: Duration,
    pub emission_time: Duration,
    pub readback_time: Duration,
    pub assembly_time: Duration,
}

impl PipelineStats {
    /// Sum of all stage times.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.noise_time
            + self.density_time
            + self.emission_time
            + self.readback_time
            + self.assembly_time
    }
}

/// The mesh produced by a run and how it was produced.
#[derive(Debug, Clone)]
pub struct TerrainOutput {
    pub mesh: Mesh,
    pub stats: PipelineStats,
}

/// Compiled kernels bound to one compute device.
///
/// Kernels are specialised for a tile size, so every grid passed to this
/// pipeline must use the same `tile_size`.
pub struct TerrainPipeline {
    ctx: ComputeContext,
    density: DensityPass,
    marching_cubes: MarchingCubesPass,
    tile_size: u32,
}

impl TerrainPipeline {
    /// Acquires a device and compiles both kernels for `tile_size`.
    pub fn new(tile_size: u32) -> Result<Self> {
        let ctx = ComputeContext::new_blocking()?;
        Self::from_context(ctx, tile_size)
    }

    /// Compiles both kernels on an existing device.
    pub fn from_context(ctx: ComputeContext, tile_size: u32) -> Result<Self> {
        let density = DensityPass::new(&ctx, tile_size)?;
        let marching_cubes = MarchingCubesPass::new(&ctx, tile_size)?;
        log::debug!("compiled kernels for {tile_size}^3 tiles");
        Ok(Self {
            ctx,
            density,
            marching_cubes,
            tile_size,
        })
    }

    pub fn context(&self) -> &ComputeContext {
        &self.ctx
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Generates noise, then runs the device stages. See [`Self::run_with_noise`].
    pub fn run(&self, config: &PipelineConfig) -> Result<TerrainOutput> {
        config.validate()?;
        let start = Instant::now();
        let noise = NoiseSet::generate(&config.noise)?;
        let noise_time = start.elapsed();
        log::info!(
            "noise: {} volumes of {}^3 in {noise_time:?}",
            isoterrain_core::NOISE_VOLUME_COUNT,
            noise.volume_size()
        );

        let mut output = self.run_with_noise(config, &noise)?;
        output.stats.noise_time = noise_time;
        Ok(output)
    }

    /// Evaluates density from `noise`, emits triangles, reads them back and
    /// assembles the mesh. Every stage finishes on the device before the
    /// next begins, and each device buffer is released as soon as its
    /// consumer is done with it.
    pub fn run_with_noise(
        &self,
        config: &PipelineConfig,
        noise: &NoiseSet,
    ) -> Result<TerrainOutput> {
        let dims = self.prepare(config)?;

        let start = Instant::now();
        let grid = self.evaluate_on_device(config, noise, dims)?;
        let density_time = start.elapsed();
        log::info!("density: {} samples in {density_time:?}", dims.sample_count());

        let mut output =
            self.emit_and_assemble(grid, config.grid.iso_level, config.grid.voxel_size)?;
        output.stats.density_time = density_time;
        Ok(output)
    }

    /// Evaluates density on the device and copies the grid back.
    pub fn evaluate_density(
        &self,
        config: &PipelineConfig,
        noise: &NoiseSet,
    ) -> Result<DensityGrid> {
        let dims = self.prepare(config)?;
        let grid = self.evaluate_on_device(config, noise, dims)?;
        Ok(grid.read_back(&self.ctx)?)
    }

    /// Runs emission, readback and assembly over a host grid, skipping
    /// noise and density evaluation.
    pub fn extract(
        &self,
        grid: &DensityGrid,
        iso_level: f32,
        voxel_size: f32,
    ) -> Result<TerrainOutput> {
        let dims = grid.dims();
        self.check_tile(&dims)?;
        self.check_device_sizes(&dims)?;
        let device_grid = DeviceDensityGrid::upload(&self.ctx, grid)?;
        self.emit_and_assemble(device_grid, iso_level, voxel_size)
    }

    fn prepare(&self, config: &PipelineConfig) -> Result<GridDims> {
        config.validate()?;
        let dims = config.grid.dims()?;
        self.check_tile(&dims)?;
        self.check_device_sizes(&dims)?;
        Ok(dims)
    }

    fn check_tile(&self, dims: &GridDims) -> Result<()> {
        if dims.tile_size() != self.tile_size {
            return Err(TerrainError::InvalidConfig(format!(
                "grid tile size {} does not match pipeline tile size {}",
                dims.tile_size(),
                self.tile_size
            )));
        }
        Ok(())
    }

    /// Fails before any dispatch if a buffer of this run exceeds the device.
    fn check_device_sizes(&self, dims: &GridDims) -> Result<()> {
        let grid_bytes = dims.sample_count() as u64 * std::mem::size_of::<f32>() as u64;
        let triangle_bytes = dims.triangle_capacity() * Triangle::SIZE;
        self.ctx.check_storage_size("density grid", grid_bytes)?;
        self.ctx.check_storage_size("triangle buffer", triangle_bytes)?;
        self.ctx.check_dispatch(dims.sample_tiles())?;
        Ok(())
    }

    fn evaluate_on_device(
        &self,
        config: &PipelineConfig,
        noise: &NoiseSet,
        dims: GridDims,
    ) -> Result<DeviceDensityGrid> {
        let textures = NoiseTextures::upload(&self.ctx, noise)?;
        Ok(self
            .density
            .evaluate(&self.ctx, dims, &textures, &config.density)?)
    }

    /// Consumes the device grid so it is released right after emission.
    fn emit_and_assemble(
        &self,
        grid: DeviceDensityGrid,
        iso_level: f32,
        voxel_size: f32,
    ) -> Result<TerrainOutput> {
        let dims = grid.dims();
        let capacity = dims.triangle_capacity();

        let start = Instant::now();
        let output = TriangleAppendBuffer::new(&self.ctx, capacity)?;
        self.marching_cubes
            .emit(&self.ctx, &grid, &output, iso_level, voxel_size)?;
        drop(grid);
        let emission_time = start.elapsed();
        log::info!("emission: {} cells in {emission_time:?}", dims.cell_count());

        let start = Instant::now();
        let triangles = output.read_back(&self.ctx)?;
        drop(output);
        let readback_time = start.elapsed();
        log::info!(
            "readback: {} of {capacity} triangle slots in {readback_time:?}",
            triangles.len()
        );

        let start = Instant::now();
        let mesh = assemble(&triangles)?;
        let assembly_time = start.elapsed();

        Ok(TerrainOutput {
            stats: PipelineStats {
                triangle_count: triangles.len(),
                capacity,
                emission_time,
                readback_time,
                assembly_time,
                ..PipelineStats::default()
            },
            mesh,
        })
    }
}

fn assemble(triangles: &[Triangle]) -> Result<Mesh> {
    let mesh = Mesh::assemble(triangles)?;
    if mesh.is_empty() {
        log::warn!("extracted mesh is empty; the surface does not cross the grid");
    } else {
        log::info!(
            "assembly: {} vertices, {} triangles",
            mesh.num_vertices(),
            mesh.num_triangles()
        );
    }
    Ok(mesh)
}

/// Runs the whole pipeline once on a fresh device.
pub fn generate_terrain_mesh(config: &PipelineConfig) -> Result<TerrainOutput> {
    config.validate()?;
    let pipeline = TerrainPipeline::new(config.grid.tile_size)?;
    pipeline.run(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_time_sums_stages() {
        let stats = PipelineStats {
            noise_time: Duration::from_millis(1),
            density_time: Duration::from_millis(2),
            emission_time: Duration::from_millis(3),
            readback_time: Duration::from_millis(4),
            assembly_time: Duration::from_millis(5),
            ..PipelineStats::default()
        };
        assert_eq!(stats.total_time(), Duration::from_millis(15));
    }

    #[test]
    fn test_generate_rejects_invalid_config_before_device() {
        let mut config = PipelineConfig::default();
        config.grid.voxels = [30, 32, 32];
        assert!(matches!(
            generate_terrain_mesh(&config),
            Err(TerrainError::TileMismatch { axis: 'x', .. })
        ));
    }
}
