//! Triangle mesh handed over by a scene loader.
//!
//! The renderer never reads files itself. A loader (OBJ, USD, procedural)
//! fills a `Mesh` with world-space positions and triangle indices, and the
//! renderer turns it into intersectable triangles.

use prism_math::Vec3;
use thiserror::Error;

/// Errors produced when assembling a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// A mesh consisting of vertex positions and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    ///
    /// Every index must refer to an existing position.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
        }

        for (i, &index) in indices.iter().enumerate() {
            if index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfBounds {
                    triangle: i / 3,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Create an unindexed mesh from a triangle soup.
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        let positions: Vec<Vec3> = triangles.iter().flatten().copied().collect();
        let indices = (0..positions.len() as u32).collect();
        Self { positions, indices }
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as `[v0, v1, v2]` position triplets.
    ///
    /// Faces with an index past the end of `positions` are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |face| {
            let vertex = |i: u32| self.positions.get(i as usize).copied();
            Some([vertex(face[0])?, vertex(face[1])?, vertex(face[2])?])
        })
    }
}
