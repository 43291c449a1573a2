// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::prelude::*;

/// Height assigned to the four corners before subdivision starts.
pub const BASELINE_HEIGHT: f32 = 0.0;

/// Anything that can be sampled as a square grid of heights addressed by
/// integer coordinates. `x` is the column and `y` the row.
pub trait HeightSource {
    /// Number of samples along each side of the grid.
    fn size(&self) -> usize;

    /// Returns the height at (`x`, `y`), or `None` when the coordinates fall
    /// outside the grid.
    fn get(&self, x: isize, y: isize) -> Option<f32>;
}

/// A square heightfield with `2^k + 1` samples per side, filled in by
/// recursive midpoint displacement (the "square-diamond" algorithm).
///
/// Heights are stored in a single row-major buffer. A freshly constructed
/// field is flat at [`BASELINE_HEIGHT`]; call [`HeightField::generate`] to
/// populate it.
#[derive(Clone, Debug)]
pub struct HeightField {
    inner: Array2<f32>,
    roughness: f32,
}

impl HeightField {
    pub fn new(size: usize, roughness: f32) -> Result<HeightField> {
        if !is_subdivisible_side(size) {
            bail!(TerrainError::InvalidGridSize(size));
        }
        let num_samples = size.checked_mul(size);
        if num_samples.and_then(|n| u32::try_from(n).ok()).is_none() {
            bail!(TerrainError::GridTooLarge(size.saturating_mul(size)));
        }
        if !(roughness.is_finite() && roughness >= 0.0) {
            bail!(TerrainError::InvalidRoughness(roughness));
        }
        Ok(Self {
            inner: Array2::from_elem((size, size), BASELINE_HEIGHT),
            roughness,
        })
    }

    pub fn size(&self) -> usize {
        self.inner.nrows()
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    /// Returns the height at column `x`, row `y`. Out of range coordinates
    /// return `None` rather than failing, because the subdivision passes
    /// routinely probe past the grid edges.
    pub fn get(&self, x: isize, y: isize) -> Option<f32> {
        if x < 0 || y < 0 {
            return None;
        }
        self.inner.get([y as usize, x as usize]).copied()
    }

    /// Read-only view of the heights, indexed as `[[row, col]]`.
    pub fn heights(&self) -> ArrayView2<'_, f32> {
        self.inner.view()
    }

    /// Heights copied out in row-major order, `row * size + col`.
    pub fn to_row_major_vec(&self) -> Vec<f32> {
        self.inner.iter().copied().collect()
    }

    /// Lowest and highest height in the field.
    pub fn height_range(&self) -> (f32, f32) {
        min_max(self.inner.iter().copied()).unwrap_or((BASELINE_HEIGHT, BASELINE_HEIGHT))
    }

    /// Mean of the samples that are present. Missing samples (those that
    /// fell outside the grid) don't count towards the mean. Returns `None`
    /// when no sample is present.
    pub fn average(samples: &[Option<f32>]) -> Option<f32> {
        let present = samples.iter_cpy().flatten().collect_svec();
        if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f32>() / present.len() as f32)
        }
    }

    /// Pins the corners to [`BASELINE_HEIGHT`] and subdivides the whole grid.
    /// Every other cell is overwritten, so calling this again regenerates the
    /// field from scratch.
    #[profiling::function]
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        let last = self.size() - 1;
        for (x, y) in [(0, 0), (last, 0), (last, last), (0, last)] {
            self.inner[[y, x]] = BASELINE_HEIGHT;
        }
        self.divide(last, rng);

        if log::log_enabled!(log::Level::Debug) {
            let (min, max) = self.height_range();
            log::debug!(
                "Generated {size}x{size} heightfield, roughness {roughness}, heights in [{min}, {max}]",
                size = self.size(),
                roughness = self.roughness,
            );
        }
    }

    fn divide<R: Rng>(&mut self, step: usize, rng: &mut R) {
        let half = step / 2;
        if half < 1 {
            return;
        }
        let last = self.size() - 1;
        let h = half as isize;

        // Square pass: cell centers, averaged from the four diagonal corners.
        for y in (half..last).step_by(step) {
            for x in (half..last).step_by(step) {
                let (xi, yi) = (x as isize, y as isize);
                let avg = Self::average(&[
                    self.get(xi - h, yi - h),
                    self.get(xi + h, yi - h),
                    self.get(xi + h, yi + h),
                    self.get(xi - h, yi + h),
                ]);
                self.displace(x, y, avg, step, rng);
            }
        }

        // Diamond pass: edge midpoints, averaged from the four axis-aligned
        // neighbours. Rows alternate between starting at 0 and at `half`.
        for y in (0..=last).step_by(half) {
            for x in ((y + half) % step..=last).step_by(step) {
                let (xi, yi) = (x as isize, y as isize);
                let avg = Self::average(&[
                    self.get(xi, yi - h),
                    self.get(xi + h, yi),
                    self.get(xi, yi + h),
                    self.get(xi - h, yi),
                ]);
                self.displace(x, y, avg, step, rng);
            }
        }

        self.divide(half, rng);
    }

    /// Sets (`x`, `y`) to `avg` plus a random offset proportional to the
    /// current `step`, so perturbations shrink as the recursion deepens.
    fn displace<R: Rng>(
        &mut self,
        x: usize,
        y: usize,
        avg: Option<f32>,
        step: usize,
        rng: &mut R,
    ) {
        let avg = avg.unwrap_or_else(|| {
            log::warn!("No neighbours to average at ({x}, {y}), using baseline height");
            BASELINE_HEIGHT
        });
        let offset = (rng.random::<f32>() - 0.5) * self.roughness * step as f32;
        self.inner[[y, x]] = avg + offset;
    }
}

impl HeightSource for HeightField {
    fn size(&self) -> usize {
        HeightField::size(self)
    }

    fn get(&self, x: isize, y: isize) -> Option<f32> {
        HeightField::get(self, x, y)
    }
}

/// Plain arrays work as height sources too, indexed as `[[row, col]]`.
impl HeightSource for Array2<f32> {
    fn size(&self) -> usize {
        self.nrows()
    }

    fn get(&self, x: isize, y: isize) -> Option<f32> {
        if x < 0 || y < 0 {
            return None;
        }
        ndarray::ArrayBase::get(self, [y as usize, x as usize]).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    /// Always draws the largest representable value, so every displacement
    /// is strictly positive.
    struct MaxRng;
    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0xff)
        }
    }

    fn generated(size: usize, roughness: f32, seed: u64) -> HeightField {
        let mut field = HeightField::new(size, roughness).unwrap();
        field.generate(&mut StdRng::seed_from_u64(seed));
        field
    }

    fn corners(field: &HeightField) -> [f32; 4] {
        let last = field.size() as isize - 1;
        [(0, 0), (last, 0), (last, last), (0, last)].map(|(x, y)| field.get(x, y).unwrap())
    }

    #[test]
    fn test_invalid_size() {
        for size in [0, 1, 4, 6, 10, 64] {
            let err = HeightField::new(size, 0.2).unwrap_err();
            assert_eq!(
                err.downcast_ref::<TerrainError>(),
                Some(&TerrainError::InvalidGridSize(size))
            );
        }
    }

    #[test]
    fn test_oversized_grid_is_rejected_before_allocating() {
        // 65537^2 samples can't be addressed by u32 indices.
        for size in [65537, usize::MAX / 2 + 2] {
            let err = HeightField::new(size, 0.2).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TerrainError>(),
                Some(TerrainError::GridTooLarge(_))
            ));
        }
    }

    #[test]
    fn test_invalid_roughness() {
        assert!(HeightField::new(5, -0.1).is_err());
        assert!(HeightField::new(5, f32::NAN).is_err());
        assert!(HeightField::new(5, f32::INFINITY).is_err());
        assert!(HeightField::new(5, 0.0).is_ok());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let field = HeightField::new(3, 0.2).unwrap();
        assert_eq!(field.get(0, 0), Some(BASELINE_HEIGHT));
        assert_eq!(field.get(2, 2), Some(BASELINE_HEIGHT));
        assert_eq!(field.get(-1, 0), None);
        assert_eq!(field.get(0, -1), None);
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 3), None);
    }

    #[test]
    fn test_average() {
        assert_eq!(HeightField::average(&[Some(1.0), Some(3.0)]), Some(2.0));
        assert_eq!(
            HeightField::average(&[Some(1.0), None, Some(5.0), None]),
            Some(3.0)
        );
        // A negative height is a real height, not a missing one.
        assert_eq!(HeightField::average(&[Some(-1.0), Some(1.0)]), Some(0.0));
        assert_eq!(HeightField::average(&[None, None, None, None]), None);
        assert_eq!(HeightField::average(&[]), None);
    }

    #[test]
    fn test_generate_finite_with_fixed_corners() {
        for size in [2, 3, 5, 9, 17, 33, 65] {
            for roughness in [0.0, 0.2, 1.0, 10.0] {
                let field = generated(size, roughness, 7);
                assert!(field.heights().iter().all(|h| h.is_finite()));
                assert_eq!(corners(&field), [BASELINE_HEIGHT; 4]);
            }
        }
    }

    #[test]
    fn test_zero_roughness_is_flat() {
        // With no displacement every cell is the mean of baseline corners.
        for seed in [0, 1, 42] {
            let field = generated(17, 0.0, seed);
            assert!(field.heights().iter().all(|h| *h == BASELINE_HEIGHT));
        }
    }

    #[test]
    fn test_every_cell_is_visited() {
        // Positive displacements only. Any cell the passes skip would keep
        // the baseline height.
        let mut field = HeightField::new(9, 0.5).unwrap();
        field.generate(&mut MaxRng);
        let last = field.size() as isize - 1;
        for y in 0..=last {
            for x in 0..=last {
                let is_corner = (x == 0 || x == last) && (y == 0 || y == last);
                let h = field.get(x, y).unwrap();
                if is_corner {
                    assert_eq!(h, BASELINE_HEIGHT);
                } else {
                    assert!(h > BASELINE_HEIGHT, "({x}, {y}) was not displaced");
                }
            }
        }
    }

    #[test]
    fn test_center_displacement() {
        // size 3: the center is the first cell set, from four zero corners
        // and a displacement of (r - 0.5) * roughness * 2.
        let mut field = HeightField::new(3, 1.0).unwrap();
        field.generate(&mut MaxRng);
        let r = MaxRng.random::<f32>();
        let center = field.get(1, 1).unwrap();
        assert!((center - (r - 0.5) * 2.0).abs() < 1e-6);

        // Top edge midpoint: averages (0,0), (2,0) and the center.
        let top = field.get(1, 0).unwrap();
        assert!((top - (center / 3.0 + (r - 0.5) * 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let a = generated(33, 0.4, 1234);
        let b = generated(33, 0.4, 1234);
        assert_eq!(a.to_row_major_vec(), b.to_row_major_vec());

        let c = generated(33, 0.4, 4321);
        assert_ne!(a.to_row_major_vec(), c.to_row_major_vec());
    }

    #[test]
    fn test_row_major_layout() {
        let field = generated(5, 0.3, 99);
        let flat = field.to_row_major_vec();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(Some(flat[y * 5 + x]), field.get(x as isize, y as isize));
            }
        }
    }

    #[test]
    fn test_array_height_source() {
        let heights = Array2::from_shape_fn((3, 3), |(row, col)| (row * 3 + col) as f32);
        assert_eq!(HeightSource::size(&heights), 3);
        assert_eq!(HeightSource::get(&heights, 2, 1), Some(5.0));
        assert_eq!(HeightSource::get(&heights, 3, 0), None);
        assert_eq!(HeightSource::get(&heights, -1, 0), None);
    }
}
