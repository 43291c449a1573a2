// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TerrainError {
    /// The grid side length is not of the form `2^k + 1`.
    InvalidGridSize(usize),
    /// Roughness must be finite and non-negative.
    InvalidRoughness(f32),
    /// The grid has more vertices than a `u32` index can address.
    GridTooLarge(usize),
    /// A vertex index or height lookup fell outside the grid.
    OutOfRangeSample { index: usize, num_vertices: usize },
}
impl std::fmt::Display for TerrainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{self:?}"))
    }
}
impl std::error::Error for TerrainError {}
