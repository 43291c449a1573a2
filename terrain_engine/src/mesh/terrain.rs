// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;

use crate::prelude::*;

/// Generates a fresh heightfield with `n + 1` samples per side and turns it
/// into a triangle grid spanning `extent` in the XY plane. Heights go to Z,
/// multiplied by `height_scale`.
///
/// `n` must be a power of two. The result holds `(n+1)^2` vertices and
/// normals and `2 * n * n` triangles.
#[profiling::function]
pub fn build_terrain_mesh<R: Rng>(
    n: usize,
    extent: &Extent,
    roughness: f32,
    height_scale: f32,
    rng: &mut R,
) -> Result<VertexIndexBuffers> {
    let side = n
        .checked_add(1)
        .ok_or(TerrainError::GridTooLarge(usize::MAX))?;
    let mut field = HeightField::new(side, roughness)
        .with_context(|| format!("Cannot build a terrain with {n} subdivisions"))?;
    field.generate(rng);
    build_mesh_from_heights(&field, extent, height_scale)
}

/// Builds the triangle grid for an existing height source. The grid has as
/// many vertices per side as the source has samples.
///
/// Vertex `row * side + col` sits at `min_x + col * dx`, `min_y + row * dy`,
/// and takes its height from `heights.get(row, col)`.
#[profiling::function]
pub fn build_mesh_from_heights(
    heights: &impl HeightSource,
    extent: &Extent,
    height_scale: f32,
) -> Result<VertexIndexBuffers> {
    let side = heights.size();
    if side < 2 {
        bail!(TerrainError::InvalidGridSize(side));
    }
    let n = side - 1;
    let num_vertices = match side.checked_mul(side) {
        Some(count) if u32::try_from(count).is_ok() => count,
        _ => bail!(TerrainError::GridTooLarge(side.saturating_mul(side))),
    };

    let dx = (extent.max_x - extent.min_x) / n as f32;
    let dy = (extent.max_y - extent.min_y) / n as f32;

    let mut positions = vec![Vec3::ZERO; num_vertices];
    for row in 0..side {
        for col in 0..side {
            let height = heights
                .get(row as isize, col as isize)
                .ok_or(TerrainError::OutOfRangeSample {
                    index: grid_index(row, col, side),
                    num_vertices,
                })?;
            positions[grid_index(row, col, side)] = Vec3::new(
                extent.min_x + dx * col as f32,
                extent.min_y + dy * row as f32,
                height_scale * height,
            );
        }
    }

    let buffers = VertexIndexBuffers {
        normals: grid_normals(&positions, side),
        indices: grid_indices(n),
        positions,
    };
    buffers.validate()?;

    log::debug!(
        "Built terrain mesh: {} vertices, {} triangles",
        buffers.num_vertices(),
        buffers.num_triangles()
    );
    Ok(buffers)
}

/// Two triangles per grid cell. For the cell whose top-left vertex is `v`:
/// `(v, v+1, v+side)` and `(v+1, v+side+1, v+side)`.
fn grid_indices(n: usize) -> Vec<u32> {
    let side = (n + 1) as u32;
    let mut indices = vec![0u32; 6 * n * n];
    let cells = (0..n as u32).cartesian_product(0..n as u32);
    for (chunk, (i, j)) in indices.chunks_exact_mut(6).zip(cells) {
        let v = i * side + j;
        chunk.copy_from_slice(&[v, v + 1, v + side, v + 1, v + side + 1, v + side]);
    }
    indices
}

/// One normal per grid sample, shared by every triangle touching it.
///
/// The normal is the cross product of the tangent along the column
/// direction with the tangent along the row direction, both taken as
/// forward differences. On the last column or row there's no forward
/// neighbour, so the backward difference is used instead, negated to keep
/// the tangent pointing the same way. For the triangle winding produced by
/// this module the normals of a flat grid point towards +Z.
#[profiling::function]
pub fn grid_normals(positions: &[Vec3], side: usize) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    if side < 2 {
        return normals;
    }
    let last = side - 1;
    let pos = |row: usize, col: usize| positions[grid_index(row, col, side)];

    for row in 0..side {
        for col in 0..side {
            let here = pos(row, col);
            let along_col = if col < last {
                pos(row, col + 1) - here
            } else {
                here - pos(row, col - 1)
            };
            let along_row = if row < last {
                pos(row + 1, col) - here
            } else {
                here - pos(row - 1, col)
            };
            normals[grid_index(row, col, side)] = tangent_normal(along_col, along_row);
        }
    }
    normals
}
