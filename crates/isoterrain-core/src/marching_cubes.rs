//! Reference marching cubes kernel.
//!
//! [`march_cell`] is the host statement of what one invocation of the
//! emission kernel in `marching_cubes.wgsl` computes. The two are kept in
//! lockstep: same corner order, same case bit convention, same edge
//! interpolation and the same gradient stencil. Tests use it to check
//! device output and to exercise the algorithm without a device.

#![allow(clippy::cast_possible_wrap, clippy::cast_precision_loss)]

use glam::{IVec3, UVec3, Vec3};

use crate::grid::DensityGrid;
use crate::mesh::{Triangle, Vertex};
use crate::tables::{case_triangles, CORNER_OFFSETS, EDGE_TO_CORNERS};

/// Corner differences below this are treated as a flat edge.
pub const FLAT_EDGE_EPSILON: f32 = 1e-6;

/// Squared gradient magnitude below which the normal falls back to `+Y`.
pub const FLAT_GRADIENT_EPSILON: f32 = 1e-20;

/// Case index of a cell: bit `i` is set when corner `i` is below `iso`.
#[must_use]
pub fn case_index(corners: &[f32; 8], iso: f32) -> u8 {
    corners
        .iter()
        .enumerate()
        .fold(0u8, |case, (i, &v)| if v < iso { case | (1 << i) } else { case })
}

/// Interpolation parameter of the iso crossing between `v0` and `v1`.
///
/// Always finite and within `[0, 1]`. Flat edges return the midpoint.
#[must_use]
pub fn edge_parameter(v0: f32, v1: f32, iso: f32) -> f32 {
    let delta = v1 - v0;
    if delta.abs() < FLAT_EDGE_EPSILON {
        return 0.5;
    }
    ((iso - v0) / delta).clamp(0.0, 1.0)
}

/// Central-difference density gradient at sample `p`, reads clamped to the grid.
#[must_use]
pub fn gradient(grid: &DensityGrid, p: UVec3) -> Vec3 {
    let p = p.as_ivec3();
    let d = |offset: IVec3| grid.sample_clamped(p + offset) - grid.sample_clamped(p - offset);
    Vec3::new(d(IVec3::X), d(IVec3::Y), d(IVec3::Z)) * 0.5
}

/// Outward surface normal from a density gradient.
#[must_use]
pub fn surface_normal(gradient: Vec3) -> Vec3 {
    if gradient.length_squared() < FLAT_GRADIENT_EPSILON {
        Vec3::Y
    } else {
        -gradient.normalize()
    }
}

/// Reads the eight corner densities of `cell`.
#[must_use]
pub fn cell_corners(grid: &DensityGrid, cell: UVec3) -> [f32; 8] {
    std::array::from_fn(|i| grid.get(cell + UVec3::from_array(CORNER_OFFSETS[i])))
}

/// Vertex where the surface crosses `edge` of `cell`.
#[must_use]
pub fn edge_vertex(
    grid: &DensityGrid,
    cell: UVec3,
    corners: &[f32; 8],
    edge: u8,
    iso: f32,
    voxel_size: f32,
) -> Vertex {
    let [a, b] = EDGE_TO_CORNERS[edge as usize];
    let pa = cell + UVec3::from_array(CORNER_OFFSETS[a as usize]);
    let pb = cell + UVec3::from_array(CORNER_OFFSETS[b as usize]);
    let t = edge_parameter(corners[a as usize], corners[b as usize], iso);

    // Shared coordinates of pa and pb stay exact, keeping the vertex on the cell face.
    let position = (pa.as_vec3() + (pb.as_vec3() - pa.as_vec3()) * t) * voxel_size;
    let grad = gradient(grid, pa).lerp(gradient(grid, pb), t);
    Vertex::new(position, surface_normal(grad))
}

/// Emits the triangles of one active cell into `out`, returning how many
/// were appended.
///
/// `cell` must be an active cell of the grid, so every corner read is in
/// bounds.
pub fn march_cell(
    grid: &DensityGrid,
    cell: UVec3,
    iso: f32,
    voxel_size: f32,
    out: &mut Vec<Triangle>,
) -> usize {
    let corners = cell_corners(grid, cell);
    let case = case_index(&corners, iso);
    let triangles = case_triangles(case);
    for edges in triangles {
        out.push(Triangle {
            vertices: edges.map(|edge| edge_vertex(grid, cell, &corners, edge, iso, voxel_size)),
        });
    }
    triangles.len()
}

/// Runs [`march_cell`] over every active cell in work-item order.
#[must_use]
pub fn extract(grid: &DensityGrid, iso: f32, voxel_size: f32) -> Vec<Triangle> {
    let dims = grid.dims();
    let mut triangles = Vec::new();
    for index in 0..dims.cell_count() {
        march_cell(grid, dims.cell_coords(index), iso, voxel_size, &mut triangles);
    }
    log::debug!(
        "reference extraction produced {} triangles from {} cells",
        triangles.len(),
        dims.cell_count()
    );
    triangles
}
