//! Per-axis range and bin mapping
//!
//! An [`Axis`] maps scalar samples from the half-open interval
//! `[min, max)` onto `bins` equal-width bins. Bin `k` covers
//! `[min + k * w, min + (k + 1) * w)` with `w = (max - min) / bins`.

use crate::error::{HistError, HistResult};

/// Value range and bin count of one histogram axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    min: f32,
    max: f32,
    bins: usize,
}

impl Axis {
    /// Create an axis covering `[min, max)` with `bins` bins.
    ///
    /// `index` is only used to label errors.
    ///
    /// # Errors
    ///
    /// - `HistError::InvalidBinSize` if `bins == 0`
    /// - `HistError::InvalidRange` if `min >= max` or a bound is not finite
    pub fn new(index: usize, bins: usize, min: f32, max: f32) -> HistResult<Self> {
        if bins == 0 {
            return Err(HistError::InvalidBinSize { axis: index });
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(HistError::InvalidRange {
                axis: index,
                min,
                max,
            });
        }
        Ok(Axis { min, max, bins })
    }

    /// Lower bound of the axis range (inclusive)
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound of the axis range (exclusive)
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Number of bins on this axis
    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Width of a single bin
    #[inline]
    pub fn bin_width(&self) -> f64 {
        (self.max as f64 - self.min as f64) / self.bins as f64
    }

    /// Fractional bin position of `value`, before flooring
    #[inline]
    fn position(&self, value: f32) -> f64 {
        let span = self.max as f64 - self.min as f64;
        (value as f64 - self.min as f64) / span * self.bins as f64
    }

    /// Bin of `value`, clamped into `[0, bins)`.
    ///
    /// Values below `min` land in bin 0, values at or above `max` land in
    /// the last bin. NaN lands in bin 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use histnd_hist::Axis;
    ///
    /// let axis = Axis::new(0, 5, 0.0, 10.0).unwrap();
    /// assert_eq!(axis.bin_of(3.0), 1);
    /// assert_eq!(axis.bin_of(10.0), 4);
    /// assert_eq!(axis.bin_of(-1.0), 0);
    /// ```
    #[inline]
    pub fn bin_of(&self, value: f32) -> usize {
        let pos = self.position(value);
        if pos >= self.bins as f64 {
            self.bins - 1
        } else if pos > 0.0 {
            pos as usize
        } else {
            // negative or NaN
            0
        }
    }

    /// Bin of `value`, or `None` if it lies outside `[min, max)` or is NaN.
    #[inline]
    pub fn bin_of_checked(&self, value: f32) -> Option<usize> {
        if !(value >= self.min && value < self.max) {
            return None;
        }
        // rounding at the top edge can reach `bins`
        Some((self.position(value) as usize).min(self.bins - 1))
    }

    /// Value interval `[lower, upper)` covered by bin `k`
    ///
    /// # Errors
    ///
    /// Returns `HistError::InvalidParameter` if `k >= bins`.
    pub fn bin_range(&self, k: usize) -> HistResult<(f32, f32)> {
        if k >= self.bins {
            return Err(HistError::InvalidParameter(format!(
                "bin {} out of range for axis with {} bins",
                k, self.bins
            )));
        }
        let w = self.bin_width();
        let lower = self.min as f64 + k as f64 * w;
        let upper = if k + 1 == self.bins {
            self.max as f64
        } else {
            self.min as f64 + (k + 1) as f64 * w
        };
        Ok((lower as f32, upper as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_validation() {
        assert!(Axis::new(0, 4, 0.0, 8.0).is_ok());
        assert!(matches!(
            Axis::new(2, 0, 0.0, 8.0),
            Err(HistError::InvalidBinSize { axis: 2 })
        ));
        assert!(matches!(
            Axis::new(1, 4, 8.0, 8.0),
            Err(HistError::InvalidRange { axis: 1, .. })
        ));
        assert!(Axis::new(0, 4, 9.0, 8.0).is_err());
        assert!(Axis::new(0, 4, f32::NEG_INFINITY, 8.0).is_err());
        assert!(Axis::new(0, 4, 0.0, f32::NAN).is_err());
    }

    #[test]
    fn test_bin_of_interior() {
        let axis = Axis::new(0, 4, 0.0, 8.0).unwrap();
        assert_eq!(axis.bin_of(0.0), 0);
        assert_eq!(axis.bin_of(1.99), 0);
        assert_eq!(axis.bin_of(2.0), 1);
        assert_eq!(axis.bin_of(3.0), 1);
        assert_eq!(axis.bin_of(7.99), 3);
    }

    #[test]
    fn test_bin_of_clamps() {
        let axis = Axis::new(0, 5, 0.0, 10.0).unwrap();
        assert_eq!(axis.bin_of(10.0), 4);
        assert_eq!(axis.bin_of(1e9), 4);
        assert_eq!(axis.bin_of(-0.5), 0);
        assert_eq!(axis.bin_of(f32::NAN), 0);
        assert_eq!(axis.bin_of(f32::INFINITY), 4);
    }

    #[test]
    fn test_bin_of_checked() {
        let axis = Axis::new(0, 5, 0.0, 10.0).unwrap();
        assert_eq!(axis.bin_of_checked(9.999), Some(4));
        assert_eq!(axis.bin_of_checked(10.0), None);
        assert_eq!(axis.bin_of_checked(-0.1), None);
        assert_eq!(axis.bin_of_checked(f32::NAN), None);
        assert_eq!(axis.bin_of_checked(0.0), Some(0));
    }

    #[test]
    fn test_negative_range() {
        let axis = Axis::new(0, 4, -1.0, 1.0).unwrap();
        assert_eq!(axis.bin_of(-1.0), 0);
        assert_eq!(axis.bin_of(-0.25), 1);
        assert_eq!(axis.bin_of(0.0), 2);
        assert_eq!(axis.bin_of(0.75), 3);
    }

    #[test]
    fn test_bin_range() {
        let axis = Axis::new(0, 4, 0.0, 8.0).unwrap();
        assert_eq!(axis.bin_range(1).unwrap(), (2.0, 4.0));
        assert_eq!(axis.bin_range(3).unwrap(), (6.0, 8.0));
        assert!(axis.bin_range(4).is_err());
        assert_eq!(axis.bin_width(), 2.0);
    }
}
