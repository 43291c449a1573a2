// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::prelude::*;

/// The main representation to draw a terrain as triangles on the GPU.
/// This is suitable to be rendered with `wgpu::PrimitiveTopology::TriangleList`
#[derive(Clone, Debug)]
pub struct VertexIndexBuffers {
    /// Vertex positions, one per grid sample.
    pub positions: Vec<Vec3>,
    /// Vertex normals, one per grid sample.
    pub normals: Vec<Vec3>,
    /// Indices: 3*N where N is the number of triangles. Indices point to
    /// elements of `positions` and `normals`.
    pub indices: Vec<u32>,
}

impl VertexIndexBuffers {
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as a flat `[x, y, z, x, y, z, ...]` slice, parallel to
    /// [`Self::positions_flat`].
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Generates the line indices to draw this mesh as a wireframe with
    /// `wgpu::PrimitiveTopology::LineList`. See [`lines_from_triangles`].
    pub fn generate_line_indices(&self) -> Vec<u32> {
        lines_from_triangles(&self.indices)
    }

    /// Checks that normals run parallel to positions and that every index
    /// points at an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let num_vertices = self.positions.len();
        if self.normals.len() != num_vertices {
            bail!(TerrainError::OutOfRangeSample {
                index: self.normals.len().min(num_vertices),
                num_vertices,
            });
        }
        if self.indices.len() % 3 != 0 {
            bail!("Index buffer length {} is not a multiple of 3", self.indices.len());
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= num_vertices) {
            bail!(TerrainError::OutOfRangeSample {
                index: index as usize,
                num_vertices,
            });
        }
        Ok(())
    }
}

/// Expands a triangle list into a line list: each triangle `(a, b, c)`
/// becomes the three edges `(a, b)`, `(b, c)`, `(c, a)`, in order.
///
/// Edges shared by two triangles are emitted twice. A trailing incomplete
/// triangle is ignored.
pub fn lines_from_triangles(indices: &[u32]) -> Vec<u32> {
    let mut lines = Vec::with_capacity(indices.len() / 3 * 6);
    for (a, b, c) in indices.iter_cpy().tuples() {
        lines.extend([a, b, b, c, c, a]);
    }
    lines
}
