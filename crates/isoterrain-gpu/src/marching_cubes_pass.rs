//! Marching cubes emission on the device.

use isoterrain_core::marching_cubes::{FLAT_EDGE_EPSILON, FLAT_GRADIENT_EPSILON};
use isoterrain_core::tables;

use crate::append_buffer::TriangleAppendBuffer;
use crate::buffer::{create_storage_buffer, create_uniform_buffer};
use crate::context::ComputeContext;
use crate::density_pass::{check_tile_match, uniform_entry, DeviceDensityGrid};
use crate::error::{ComputeError, ComputeResult};
use crate::shader::{ComputeShaderBuilder, COMMON_WGSL};
use crate::uniforms::GridUniforms;

const MARCHING_CUBES_WGSL: &str = include_str!("shaders/marching_cubes.wgsl");

/// The three lookup tables as read-only storage buffers.
struct LookupTables {
    triangle_counts: wgpu::Buffer,
    case_edges: wgpu::Buffer,
    edge_corners: wgpu::Buffer,
}

impl LookupTables {
    fn upload(device: &wgpu::Device) -> Self {
        Self {
            triangle_counts: create_storage_buffer(
                device,
                &tables::triangle_counts_u32(),
                Some("MC Case Triangle Counts"),
            ),
            case_edges: create_storage_buffer(
                device,
                &tables::case_edges_u32(),
                Some("MC Case Edges"),
            ),
            edge_corners: create_storage_buffer(
                device,
                &tables::edge_corners_u32(),
                Some("MC Edge Corners"),
            ),
        }
    }
}

/// Compiled emission kernel and its lookup tables.
pub struct MarchingCubesPass {
    tile_size: u32,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    tables: LookupTables,
}

impl MarchingCubesPass {
    pub fn new(ctx: &ComputeContext, tile_size: u32) -> ComputeResult<Self> {
        ctx.check_tile_size(tile_size)?;
        let module = ComputeShaderBuilder::new()
            .with_label("Marching Cubes Shader")
            .with_prelude(COMMON_WGSL)
            .with_source(MARCHING_CUBES_WGSL)
            .define("TILE_SIZE", tile_size)
            .define("FLAT_EDGE_EPSILON", format!("{FLAT_EDGE_EPSILON:?}"))
            .define("FLAT_GRADIENT_EPSILON", format!("{FLAT_GRADIENT_EPSILON:?}"));

        let (pipeline, bind_group_layout, tables) =
            ctx.capture("marching cubes pipeline", |device| {
                let module = module.build_module(device)?;
                let bind_group_layout =
                    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                        label: Some("MC Bind Group Layout"),
                        entries: &[
                            // Grid uniforms
                            uniform_entry(0),
                            // Density grid
                            storage_entry(1, true),
                            // Lookup tables
                            storage_entry(2, true),
                            storage_entry(3, true),
                            storage_entry(4, true),
                            // Triangles and counter
                            storage_entry(5, false),
                            storage_entry(6, false),
                        ],
                    });
                let pipeline_layout =
                    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                        label: Some("MC Pipeline Layout"),
                        bind_group_layouts: &[&bind_group_layout],
                        push_constant_ranges: &[],
                    });
                let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                    label: Some("MC Pipeline"),
                    layout: Some(&pipeline_layout),
                    module: &module,
                    entry_point: Some("main"),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                    cache: None,
                });
                let tables = LookupTables::upload(device);
                Ok::<_, ComputeError>((pipeline, bind_group_layout, tables))
            })??;

        Ok(Self {
            tile_size,
            pipeline,
            bind_group_layout,
            tables,
        })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Runs one invocation per active cell of `grid`, appending triangles to
    /// `output`. Returns once the device has finished.
    pub fn emit(
        &self,
        ctx: &ComputeContext,
        grid: &DeviceDensityGrid,
        output: &TriangleAppendBuffer,
        iso_level: f32,
        voxel_size: f32,
    ) -> ComputeResult<()> {
        let dims = grid.dims();
        check_tile_match(&dims, self.tile_size)?;
        let uniforms = GridUniforms::new(&dims, output.capacity(), iso_level, voxel_size);
        output.clear(ctx);

        let bind_group = ctx.capture("marching cubes bind group", |device| {
            let uniform_buffer =
                create_uniform_buffer(device, &uniforms, Some("MC Grid Uniforms"));
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("MC Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: grid.buffer().as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.tables.triangle_counts.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: self.tables.case_edges.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 4,
                        resource: self.tables.edge_corners.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 5,
                        resource: output.triangles().as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 6,
                        resource: output.counter().as_entire_binding(),
                    },
                ],
            })
        })?;

        ctx.dispatch("marching cubes pass", &self.pipeline, &bind_group, dims.cell_tiles())?;
        ctx.wait_idle()
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
