//! Density field evaluation on the device.

use isoterrain_core::density::WARP_OFFSETS;
use isoterrain_core::{DensityGrid, DensityParams, GridDims, TerrainError};

use crate::buffer::{
    create_empty_storage_buffer, create_storage_buffer, create_uniform_buffer, read_buffer,
    ScopedBuffer,
};
use crate::context::ComputeContext;
use crate::error::{ComputeError, ComputeResult};
use crate::noise_texture::NoiseTextures;
use crate::shader::{wgsl_vec3, ComputeShaderBuilder, COMMON_WGSL};
use crate::uniforms::{DensityUniforms, GridUniforms};

const DENSITY_WGSL: &str = include_str!("shaders/density.wgsl");

/// A density grid resident on the device.
///
/// The buffer is released when this value is dropped.
pub struct DeviceDensityGrid {
    dims: GridDims,
    buffer: ScopedBuffer,
}

impl DeviceDensityGrid {
    /// Allocates an uninitialised grid for `dims`.
    pub fn allocate(ctx: &ComputeContext, dims: GridDims) -> ComputeResult<Self> {
        let size = byte_size(&dims);
        ctx.check_storage_size("density grid", size)?;
        let buffer = ctx.capture("density grid allocation", |device| {
            create_empty_storage_buffer(device, size, Some("density grid"))
        })?;
        log::debug!("allocated density grid: {size} bytes");
        Ok(Self {
            dims,
            buffer: ScopedBuffer::new(buffer, "density grid"),
        })
    }

    /// Copies a host grid to the device.
    pub fn upload(ctx: &ComputeContext, grid: &DensityGrid) -> ComputeResult<Self> {
        let dims = grid.dims();
        ctx.check_storage_size("density grid", byte_size(&dims))?;
        let buffer = ctx.capture("density grid upload", |device| {
            create_storage_buffer(device, grid.values(), Some("density grid"))
        })?;
        Ok(Self {
            dims,
            buffer: ScopedBuffer::new(buffer, "density grid"),
        })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Copies the grid back to the host.
    pub fn read_back(&self, ctx: &ComputeContext) -> ComputeResult<DensityGrid> {
        let values: Vec<f32> = read_buffer(ctx, &self.buffer, byte_size(&self.dims))?;
        Ok(DensityGrid::new(self.dims, values)?)
    }
}

fn byte_size(dims: &GridDims) -> u64 {
    dims.sample_count() as u64 * std::mem::size_of::<f32>() as u64
}

/// Compiled density kernel for one tile size.
pub struct DensityPass {
    tile_size: u32,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl DensityPass {
    pub fn new(ctx: &ComputeContext, tile_size: u32) -> ComputeResult<Self> {
        ctx.check_tile_size(tile_size)?;
        let module = ComputeShaderBuilder::new()
            .with_label("Density Shader")
            .with_prelude(COMMON_WGSL)
            .with_source(DENSITY_WGSL)
            .define("TILE_SIZE", tile_size)
            .define("WARP_OFFSET_A", wgsl_vec3(WARP_OFFSETS[0]))
            .define("WARP_OFFSET_B", wgsl_vec3(WARP_OFFSETS[1]));

        let (pipeline, bind_group_layout) = ctx.capture("density pipeline", |device| {
            let module = module.build_module(device)?;
            let mut entries = vec![
                uniform_entry(0),
                uniform_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ];
            entries.extend((3..7).map(|binding| wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D3,
                    multisampled: false,
                },
                count: None,
            }));
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: 7,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: false },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });

            let bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Density Bind Group Layout"),
                    entries: &entries,
                });
            let pipeline_layout =
                device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Density Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                });
            let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("Density Pipeline"),
                layout: Some(&pipeline_layout),
                module: &module,
                entry_point: Some("main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                cache: None,
            });
            Ok::<_, ComputeError>((pipeline, bind_group_layout))
        })??;

        Ok(Self {
            tile_size,
            pipeline,
            bind_group_layout,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Evaluates the density function over every sample of `dims`.
    pub fn evaluate(
        &self,
        ctx: &ComputeContext,
        dims: GridDims,
        noise: &NoiseTextures,
        params: &DensityParams,
    ) -> ComputeResult<DeviceDensityGrid> {
        check_tile_match(&dims, self.tile_size)?;
        let grid = DeviceDensityGrid::allocate(ctx, dims)?;

        let grid_uniforms = GridUniforms::new(&dims, 0, 0.0, 1.0);
        let density_uniforms = DensityUniforms::from(params);
        let bind_group = ctx.capture("density bind group", |device| {
            let grid_buffer =
                create_uniform_buffer(device, &grid_uniforms, Some("Density Grid Uniforms"));
            let params_buffer =
                create_uniform_buffer(device, &density_uniforms, Some("Density Params"));
            let views = noise.views();
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Density Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: grid_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: params_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(noise.sampler()),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::TextureView(&views[0]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 4,
                        resource: wgpu::BindingResource::TextureView(&views[1]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 5,
                        resource: wgpu::BindingResource::TextureView(&views[2]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 6,
                        resource: wgpu::BindingResource::TextureView(&views[3]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 7,
                        resource: grid.buffer().as_entire_binding(),
                    },
                ],
            })
        })?;

        ctx.dispatch("density pass", &self.pipeline, &bind_group, dims.sample_tiles())?;
        ctx.wait_idle()?;
        Ok(grid)
    }
}

/// Rejects grids laid out for a different workgroup size than the kernel.
pub(crate) fn check_tile_match(dims: &GridDims, tile_size: u32) -> ComputeResult<()> {
    if dims.tile_size() != tile_size {
        return Err(ComputeError::Layout(TerrainError::InvalidConfig(format!(
            "grid uses tile size {}, kernel was built for {tile_size}",
            dims.tile_size()
        ))));
    }
    Ok(())
}

pub(crate) fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
