//! Triangle records and final mesh assembly.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::{Result, TerrainError};

/// A surface vertex in mesh units.
///
/// Layout matches the `Vertex` struct of the emission kernel: six packed
/// `f32`s, 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Three vertices emitted together by one cell. 72 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Size of one record in the device append buffer.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.position().is_finite() && v.normal().is_finite())
    }
}

/// Renderer-ready triangle list.
///
/// Vertices are not shared: triangle `i` owns vertices `3i..3i+3`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Flattens a triangle stream.
    ///
    /// Fails with [`TerrainError::IndexOverflow`] if the vertex count does not
    /// fit a `u32` index.
    pub fn assemble(triangles: &[Triangle]) -> Result<Self> {
        let vertex_count = triangles.len() * 3;
        if u32::try_from(vertex_count).is_err() {
            return Err(TerrainError::IndexOverflow(vertex_count));
        }

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        for vertex in triangles.iter().flat_map(|t| t.vertices.iter()) {
            positions.push(vertex.position());
            normals.push(vertex.normal());
        }
        #[allow(clippy::cast_possible_truncation)]
        let indices = (0..vertex_count as u32).collect();

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds of the vertex positions, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// Checks that the three arrays agree: one normal per vertex, whole
    /// triangles, and every index in range.
    pub fn validate(&self) -> Result<()> {
        if self.normals.len() != self.positions.len() {
            return Err(TerrainError::InvalidMesh(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(TerrainError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.positions.len())
        {
            return Err(TerrainError::InvalidMesh(format!(
                "index {bad} out of range for {} vertices",
                self.positions.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triangle(offset: f32) -> Triangle {
        let v = |x: f32, y: f32| Vertex::new(Vec3::new(x + offset, y, 0.0), Vec3::Z);
        Triangle {
            vertices: [v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)],
        }
    }

    #[test]
    fn test_record_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Triangle::SIZE, 72);
    }

    #[test]
    fn test_assemble_empty() {
        let mesh = Mesh::assemble(&[]).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.num_vertices(), 0);
        assert!(mesh.bounds().is_none());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_assemble_does_not_share_vertices() {
        let tris = [triangle(0.0), triangle(0.0)];
        let mesh = Mesh::assemble(&tris).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.positions[0], mesh.positions[3]);
        assert_eq!(mesh.normals[5], Vec3::Z);
    }

    #[test]
    fn test_bounds() {
        let mesh = Mesh::assemble(&[triangle(0.0), triangle(5.0)]).unwrap();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(6.0, 1.0, 0.0));
    }

    #[test]
    fn test_validate_catches_bad_index() {
        let mut mesh = Mesh::assemble(&[triangle(0.0)]).unwrap();
        mesh.indices[2] = 3;
        assert!(matches!(mesh.validate(), Err(TerrainError::InvalidMesh(_))));
    }

    #[test]
    fn test_validate_catches_missing_normals() {
        let mut mesh = Mesh::assemble(&[triangle(0.0)]).unwrap();
        mesh.normals.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_triangle_bytes_roundtrip() {
        let tris = vec![triangle(1.0), triangle(2.0)];
        let bytes: &[u8] = bytemuck::cast_slice(&tris);
        assert_eq!(bytes.len(), 144);
        let back: &[Triangle] = bytemuck::cast_slice(bytes);
        assert_eq!(back, tris.as_slice());
    }

    proptest! {
        #[test]
        fn prop_mesh_consistency(offsets in prop::collection::vec(-100.0f32..100.0, 0..64)) {
            let tris: Vec<Triangle> = offsets.iter().map(|&o| triangle(o)).collect();
            let mesh = Mesh::assemble(&tris).unwrap();
            prop_assert_eq!(mesh.num_vertices(), 3 * tris.len());
            prop_assert_eq!(mesh.indices.len(), 3 * tris.len());
            prop_assert_eq!(mesh.normals.len(), mesh.num_vertices());
            prop_assert_eq!(mesh.num_triangles(), tris.len());
            prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.num_vertices()));
            prop_assert!(mesh.validate().is_ok());
        }
    }
}
