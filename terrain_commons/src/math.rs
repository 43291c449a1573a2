// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use float_ord::FloatOrd;
use glam::Vec3;

/// Returns true when `side` has the form `2^k + 1` for some `k >= 0`. Those
/// are the only grid sizes a midpoint subdivision can fill completely.
pub fn is_subdivisible_side(side: usize) -> bool {
    side >= 2 && (side - 1).is_power_of_two()
}

/// Row-major index of the sample at (`row`, `col`) in a square grid with
/// `side` samples per row.
#[inline]
pub fn grid_index(row: usize, col: usize, side: usize) -> usize {
    row * side + col
}

/// Normal of the surface spanned by the two tangents `du` and `dv`. Returns
/// zero when the tangents are parallel or degenerate.
#[inline]
pub fn tangent_normal(du: Vec3, dv: Vec3) -> Vec3 {
    du.cross(dv).normalize_or_zero()
}

/// Smallest and largest value of the iterator, or `None` if it's empty.
pub fn min_max(values: impl Iterator<Item = f32> + Clone) -> Option<(f32, f32)> {
    let min = values.clone().map(FloatOrd).min()?;
    let max = values.map(FloatOrd).max()?;
    Some((min.0, max.0))
}
