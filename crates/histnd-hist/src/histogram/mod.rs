//! Dense N-dimensional histogram
//!
//! A [`Histogram`] owns a dense, row-major array of `f64` bin counters and
//! one [`Axis`] per dimension. The last axis varies fastest; the linear
//! index of bin `(k_0, ..., k_{n-1})` is `sum(k_i * stride_i)`.
//!
//! Scans over images live in the `accumulate` and `backproject`
//! submodules; this module holds construction, validation, and the
//! bin-level operations (clear, threshold, query, normalize, statistics).
//!
//! # Examples
//!
//! ```
//! use histnd_core::FPix;
//! use histnd_hist::Histogram;
//!
//! let mut hist = Histogram::new(&[4], &[0.0], &[8.0]).unwrap();
//! let img = FPix::new_with_value(1, 1, 3.0).unwrap();
//! hist.accumulate(&[img]).unwrap();
//! assert_eq!(hist.query(&[1]).unwrap(), 1.0);
//! ```

mod accumulate;
mod backproject;

use crate::axis::Axis;
use crate::error::{HistError, HistResult};
use crate::options::{HistogramOptions, OutOfRangePolicy, ParallelStrategy};
use histnd_core::{Error, ScalarImage, common_dimensions};
use log::debug;

/// Axis metadata and strides; immutable after construction
#[derive(Debug, Clone)]
pub(crate) struct BinLayout {
    axes: Vec<Axis>,
    strides: Vec<usize>,
    bin_sizes: Vec<usize>,
    policy: OutOfRangePolicy,
}

impl BinLayout {
    fn new(axes: Vec<Axis>, policy: OutOfRangePolicy) -> HistResult<(Self, usize)> {
        let bin_sizes: Vec<usize> = axes.iter().map(Axis::bins).collect();

        let mut strides = vec![0usize; axes.len()];
        let mut total = 1usize;
        for (i, &n) in bin_sizes.iter().enumerate().rev() {
            strides[i] = total;
            total = total.checked_mul(n).ok_or_else(|| {
                HistError::InvalidParameter(format!(
                    "total bin count overflows for bin sizes {:?}",
                    bin_sizes
                ))
            })?;
        }

        Ok((
            BinLayout {
                axes,
                strides,
                bin_sizes,
                policy,
            },
            total,
        ))
    }

    /// Linear bin index of the sample tuple at pixel (x, y), or `None` if
    /// the policy discards it
    #[inline]
    pub(crate) fn locate<I: ScalarImage>(&self, images: &[I], x: u32, y: u32) -> Option<usize> {
        let mut idx = 0;
        for ((axis, stride), img) in self.axes.iter().zip(&self.strides).zip(images) {
            let v = img.value_at(x, y);
            let k = match self.policy {
                OutOfRangePolicy::Clamp => axis.bin_of(v),
                OutOfRangePolicy::Discard => axis.bin_of_checked(v)?,
            };
            idx += k * stride;
        }
        Some(idx)
    }

    /// Linear bin index of one sample tuple
    #[inline]
    fn locate_values(&self, values: &[f32]) -> Option<usize> {
        let mut idx = 0;
        for ((axis, stride), &v) in self.axes.iter().zip(&self.strides).zip(values) {
            let k = match self.policy {
                OutOfRangePolicy::Clamp => axis.bin_of(v),
                OutOfRangePolicy::Discard => axis.bin_of_checked(v)?,
            };
            idx += k * stride;
        }
        Some(idx)
    }

    fn coords_of(&self, mut linear: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|&s| {
                let k = linear / s;
                linear %= s;
                k
            })
            .collect()
    }
}

/// Minimum and maximum bin values with their bin coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct MinMax {
    /// Smallest bin value
    pub min_value: f64,
    /// Coordinates of the first bin holding `min_value`
    pub min_index: Vec<usize>,
    /// Largest bin value
    pub max_value: f64,
    /// Coordinates of the first bin holding `max_value`
    pub max_index: Vec<usize>,
}

/// Dense N-dimensional histogram over scalar image channels
///
/// The number of axes, their ranges, and bin counts are fixed at
/// construction. Bin contents change through [`accumulate`](Self::accumulate),
/// [`clear`](Self::clear), [`threshold`](Self::threshold), and
/// [`normalize`](Self::normalize); all of these take `&mut self`, so
/// concurrent readers are excluded by the borrow checker.
///
/// Bins are `f64`, so integer counts stay exact up to 2^53 per bin.
/// The bin storage is owned exclusively and freed by
/// [`release`](Self::release) or when the histogram goes out of scope.
#[derive(Debug, Clone)]
pub struct Histogram {
    layout: BinLayout,
    bins: Vec<f64>,
    parallel: ParallelStrategy,
}

impl Histogram {
    /// Create a histogram with default options
    ///
    /// `bin_sizes.len()` becomes the dimension. Axis `i` maps
    /// `[min[i], max[i])` onto `bin_sizes[i]` bins.
    ///
    /// # Errors
    ///
    /// - `HistError::EmptyDimension` if `bin_sizes` is empty
    /// - `HistError::DimensionMismatch` if `min` or `max` has a different length
    /// - `HistError::InvalidBinSize` if any bin size is 0
    /// - `HistError::InvalidRange` if any `min[i] >= max[i]`
    pub fn new(bin_sizes: &[usize], min: &[f32], max: &[f32]) -> HistResult<Self> {
        Self::with_options(bin_sizes, min, max, HistogramOptions::default())
    }

    /// Create a histogram with explicit options
    ///
    /// # Errors
    ///
    /// Same as [`Histogram::new`].
    pub fn with_options(
        bin_sizes: &[usize],
        min: &[f32],
        max: &[f32],
        options: HistogramOptions,
    ) -> HistResult<Self> {
        let dim = bin_sizes.len();
        if dim == 0 {
            return Err(HistError::EmptyDimension);
        }
        if min.len() != dim {
            return Err(HistError::DimensionMismatch {
                what: "min",
                expected: dim,
                actual: min.len(),
            });
        }
        if max.len() != dim {
            return Err(HistError::DimensionMismatch {
                what: "max",
                expected: dim,
                actual: max.len(),
            });
        }

        let axes = bin_sizes
            .iter()
            .zip(min.iter().zip(max))
            .enumerate()
            .map(|(i, (&n, (&lo, &hi)))| Axis::new(i, n, lo, hi))
            .collect::<HistResult<Vec<_>>>()?;

        Self::from_axes(axes, options)
    }

    /// Create a histogram from a list of per-axis records
    ///
    /// # Errors
    ///
    /// - `HistError::EmptyDimension` if `axes` is empty
    /// - `HistError::InvalidParameter` if the total bin count overflows
    pub fn from_axes(axes: Vec<Axis>, options: HistogramOptions) -> HistResult<Self> {
        if axes.is_empty() {
            return Err(HistError::EmptyDimension);
        }

        let (layout, total) = BinLayout::new(axes, options.out_of_range)?;
        debug!(
            "histogram created: bin sizes {:?}, {} bins, {:?}",
            layout.bin_sizes, total, options
        );

        Ok(Histogram {
            layout,
            bins: vec![0.0; total],
            parallel: options.parallel,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of axes
    #[inline]
    pub fn dimension(&self) -> usize {
        self.layout.axes.len()
    }

    /// Bin count of every axis
    #[inline]
    pub fn bin_sizes(&self) -> &[usize] {
        &self.layout.bin_sizes
    }

    /// All axes
    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.layout.axes
    }

    /// Axis `i`, if it exists
    #[inline]
    pub fn axis(&self, i: usize) -> Option<&Axis> {
        self.layout.axes.get(i)
    }

    /// Total number of bins
    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false; a histogram has at least one bin
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin values in row-major order
    #[inline]
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Options the histogram was built with
    pub fn options(&self) -> HistogramOptions {
        HistogramOptions {
            out_of_range: self.layout.policy,
            parallel: self.parallel,
        }
    }

    /// Change the threading strategy for later scans
    pub fn set_parallel_strategy(&mut self, parallel: ParallelStrategy) {
        self.parallel = parallel;
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check one image per axis, all of one shape; returns that shape
    fn validate_images<I: ScalarImage>(&self, images: &[I]) -> HistResult<(u32, u32)> {
        if images.len() != self.dimension() {
            return Err(HistError::DimensionMismatch {
                what: "images",
                expected: self.dimension(),
                actual: images.len(),
            });
        }

        match common_dimensions(images) {
            Ok(Some(dims)) => Ok(dims),
            Ok(None) => Err(HistError::EmptyDimension),
            Err(Error::IncompatibleSizes(w, h, iw, ih)) => Err(HistError::ImageSizeMismatch {
                expected: (w, h),
                actual: (iw, ih),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn linear_index(&self, bin_index: &[usize]) -> HistResult<usize> {
        if bin_index.len() != self.dimension() {
            return Err(HistError::DimensionMismatch {
                what: "bin index",
                expected: self.dimension(),
                actual: bin_index.len(),
            });
        }

        let mut idx = 0;
        for (axis, ((&k, &n), &stride)) in bin_index
            .iter()
            .zip(&self.layout.bin_sizes)
            .zip(&self.layout.strides)
            .enumerate()
        {
            if k >= n {
                return Err(HistError::IndexOutOfRange {
                    axis,
                    index: k,
                    len: n,
                });
            }
            idx += k * stride;
        }
        Ok(idx)
    }

    // ========================================================================
    // Bin operations
    // ========================================================================

    /// Set every bin to 0
    pub fn clear(&mut self) {
        self.bins.fill(0.0);
    }

    /// Zero every bin whose value is below `thresh`
    ///
    /// Bins at or above `thresh` are left unchanged.
    pub fn threshold(&mut self, thresh: f64) {
        let mut cleared = 0usize;
        for v in self.bins.iter_mut().filter(|v| **v < thresh) {
            if *v != 0.0 {
                cleared += 1;
            }
            *v = 0.0;
        }
        debug!("threshold {}: cleared {} bins", thresh, cleared);
    }

    /// Value of the bin at `bin_index`
    ///
    /// # Errors
    ///
    /// - `HistError::DimensionMismatch` if `bin_index.len() != dimension()`
    /// - `HistError::IndexOutOfRange` if a coordinate is past its axis
    pub fn query(&self, bin_index: &[usize]) -> HistResult<f64> {
        let idx = self.linear_index(bin_index)?;
        Ok(self.bins[idx])
    }

    /// Bin coordinates of one sample tuple
    ///
    /// Returns `Ok(None)` if the out-of-range policy discards the sample.
    ///
    /// # Errors
    ///
    /// Returns `HistError::DimensionMismatch` if `values.len() != dimension()`.
    pub fn bin_index(&self, values: &[f32]) -> HistResult<Option<Vec<usize>>> {
        if values.len() != self.dimension() {
            return Err(HistError::DimensionMismatch {
                what: "values",
                expected: self.dimension(),
                actual: values.len(),
            });
        }
        Ok(self
            .layout
            .locate_values(values)
            .map(|linear| self.layout.coords_of(linear)))
    }

    /// Sum of all bins
    pub fn total(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Smallest and largest bin values and where they occur
    pub fn min_max(&self) -> MinMax {
        let (mut imin, mut imax) = (0, 0);
        for (i, &v) in self.bins.iter().enumerate() {
            if v < self.bins[imin] {
                imin = i;
            }
            if v > self.bins[imax] {
                imax = i;
            }
        }
        MinMax {
            min_value: self.bins[imin],
            min_index: self.layout.coords_of(imin),
            max_value: self.bins[imax],
            max_index: self.layout.coords_of(imax),
        }
    }

    /// Scale all bins so they sum to `factor`
    ///
    /// A histogram whose bins sum to 0 is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `HistError::InvalidParameter` if `factor` is negative or not
    /// finite.
    pub fn normalize(&mut self, factor: f64) -> HistResult<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(HistError::InvalidParameter(format!(
                "normalization factor must be finite and >= 0, got {}",
                factor
            )));
        }

        let sum = self.total();
        if sum == 0.0 {
            return Ok(());
        }

        let scale = factor / sum;
        for v in &mut self.bins {
            *v *= scale;
        }
        debug!("normalized {} bins from sum {} to {}", self.bins.len(), sum, factor);
        Ok(())
    }

    /// Free the bin storage
    ///
    /// Consumes the histogram; no operation can follow.
    pub fn release(self) {
        debug!(
            "histogram released: bin sizes {:?}, {} bins",
            self.layout.bin_sizes,
            self.bins.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_metadata() {
        let hist = Histogram::new(&[4, 3], &[0.0, -1.0], &[8.0, 1.0]).unwrap();
        assert_eq!(hist.dimension(), 2);
        assert_eq!(hist.bin_sizes(), &[4, 3]);
        assert_eq!(hist.len(), 12);
        assert_eq!(hist.axis(1).unwrap().min(), -1.0);
        assert!(hist.axis(2).is_none());
        assert!(hist.bins().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_new_dimension_mismatch() {
        assert!(matches!(
            Histogram::new(&[4, 4], &[0.0], &[1.0, 1.0]),
            Err(HistError::DimensionMismatch { what: "min", expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Histogram::new(&[4], &[0.0], &[1.0, 1.0]),
            Err(HistError::DimensionMismatch { what: "max", expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_new_rejects_bad_axes() {
        assert!(matches!(
            Histogram::new(&[], &[], &[]),
            Err(HistError::EmptyDimension)
        ));
        assert!(matches!(
            Histogram::new(&[4, 0], &[0.0, 0.0], &[1.0, 1.0]),
            Err(HistError::InvalidBinSize { axis: 1 })
        ));
        assert!(matches!(
            Histogram::new(&[4], &[2.0], &[2.0]),
            Err(HistError::InvalidRange { axis: 0, .. })
        ));
        assert!(Histogram::from_axes(Vec::new(), HistogramOptions::default()).is_err());
    }

    #[test]
    fn test_new_overflow() {
        let big = usize::MAX / 2;
        assert!(matches!(
            Histogram::new(&[big, 4], &[0.0, 0.0], &[1.0, 1.0]),
            Err(HistError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_strides_row_major() {
        let hist = Histogram::new(&[2, 3, 4], &[0.0; 3], &[1.0; 3]).unwrap();
        assert_eq!(hist.layout.strides, vec![12, 4, 1]);
        assert_eq!(hist.linear_index(&[1, 2, 3]).unwrap(), 23);
        assert_eq!(hist.layout.coords_of(23), vec![1, 2, 3]);
    }

    #[test]
    fn test_query_errors() {
        let hist = Histogram::new(&[4, 4], &[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert!(matches!(
            hist.query(&[0, 0, 0]),
            Err(HistError::DimensionMismatch { what: "bin index", .. })
        ));
        assert!(matches!(
            hist.query(&[1, 4]),
            Err(HistError::IndexOutOfRange { axis: 1, index: 4, len: 4 })
        ));
        assert_eq!(hist.query(&[3, 3]).unwrap(), 0.0);
    }

    #[test]
    fn test_query_high_dimension() {
        let mut hist = Histogram::new(&[2; 5], &[0.0; 5], &[1.0; 5]).unwrap();
        let idx = hist.linear_index(&[1, 0, 1, 0, 1]).unwrap();
        hist.bins[idx] = 7.0;
        assert_eq!(hist.query(&[1, 0, 1, 0, 1]).unwrap(), 7.0);
        assert_eq!(hist.query(&[1, 0, 1, 0, 0]).unwrap(), 0.0);
    }

    #[test]
    fn test_threshold_and_clear() {
        let mut hist = Histogram::new(&[4], &[0.0], &[4.0]).unwrap();
        hist.bins.copy_from_slice(&[0.5, 2.0, 3.0, 1.0]);
        hist.threshold(2.0);
        assert_eq!(hist.bins(), &[0.0, 2.0, 3.0, 0.0]);

        hist.clear();
        assert!(hist.bins().iter().all(|&v| v == 0.0));
        hist.clear();
        assert!(hist.bins().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_bin_index() {
        let hist = Histogram::new(&[4, 5], &[0.0, 0.0], &[8.0, 10.0]).unwrap();
        assert_eq!(hist.bin_index(&[3.0, 10.0]).unwrap(), Some(vec![1, 4]));
        assert!(hist.bin_index(&[3.0]).is_err());

        let opts = HistogramOptions {
            out_of_range: OutOfRangePolicy::Discard,
            ..Default::default()
        };
        let hist = Histogram::with_options(&[4, 5], &[0.0, 0.0], &[8.0, 10.0], opts).unwrap();
        assert_eq!(hist.bin_index(&[3.0, 10.0]).unwrap(), None);
        assert_eq!(hist.bin_index(&[3.0, 9.0]).unwrap(), Some(vec![1, 4]));
    }

    #[test]
    fn test_min_max_and_total() {
        let mut hist = Histogram::new(&[2, 2], &[0.0; 2], &[1.0; 2]).unwrap();
        hist.bins.copy_from_slice(&[3.0, 1.0, 5.0, 1.0]);
        let mm = hist.min_max();
        assert_eq!(mm.min_value, 1.0);
        assert_eq!(mm.min_index, vec![0, 1]);
        assert_eq!(mm.max_value, 5.0);
        assert_eq!(mm.max_index, vec![1, 0]);
        assert_eq!(hist.total(), 10.0);
    }

    #[test]
    fn test_normalize() {
        let mut hist = Histogram::new(&[4], &[0.0], &[4.0]).unwrap();
        hist.normalize(1.0).unwrap();
        assert_eq!(hist.total(), 0.0);

        hist.bins.copy_from_slice(&[1.0, 3.0, 0.0, 4.0]);
        hist.normalize(1.0).unwrap();
        assert_eq!(hist.bins(), &[0.125, 0.375, 0.0, 0.5]);

        assert!(hist.normalize(-1.0).is_err());
        assert!(hist.normalize(f64::NAN).is_err());
    }

    #[test]
    fn test_options_roundtrip() {
        let opts = HistogramOptions {
            out_of_range: OutOfRangePolicy::Discard,
            parallel: ParallelStrategy::Sequential,
        };
        let mut hist = Histogram::with_options(&[2], &[0.0], &[1.0], opts).unwrap();
        assert_eq!(hist.options(), opts);
        hist.set_parallel_strategy(ParallelStrategy::RowParallel);
        assert_eq!(hist.options().parallel, ParallelStrategy::RowParallel);
    }

    #[test]
    fn test_release() {
        let hist = Histogram::new(&[8, 8], &[0.0; 2], &[1.0; 2]).unwrap();
        hist.release();
    }
}
