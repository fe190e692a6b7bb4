//! Histogram configuration
//!
//! [`HistogramOptions`] collects the knobs that do not change the shape of
//! a histogram: what to do with samples outside an axis range, and whether
//! pixel scans may be split across threads.

/// What to do with samples outside `[min, max)` on some axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Move the sample into the nearest edge bin
    #[default]
    Clamp,
    /// Skip the sample; back-projection writes 0 for it
    Discard,
}

/// Parallelization strategy for pixel scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelStrategy {
    /// Pick per call with [`ParallelStrategy::auto_select`]
    #[default]
    Auto,
    /// Scan on the calling thread
    Sequential,
    /// Split rows across the rayon pool
    RowParallel,
}

/// Minimum pixel count before row-parallel scans are worthwhile
pub const MIN_PIXELS_PARALLEL: usize = 64 * 1024;

impl ParallelStrategy {
    /// Select a concrete strategy for a scan.
    ///
    /// `n_bins` is the size of the per-thread buffer a parallel scan has to
    /// allocate and merge (0 for read-only scans). Parallelism is skipped
    /// for small images, single-threaded pools, and when merging local
    /// buffers would cost more than the scan itself.
    pub fn auto_select(n_pixels: usize, n_bins: usize, n_threads: usize) -> Self {
        if n_pixels < MIN_PIXELS_PARALLEL || n_threads <= 1 {
            return Self::Sequential;
        }

        if n_bins.saturating_mul(n_threads) > n_pixels {
            Self::Sequential
        } else {
            Self::RowParallel
        }
    }

    /// Resolve `Auto` against the current rayon pool; other variants pass
    /// through unchanged.
    pub fn resolve(self, n_pixels: usize, n_bins: usize) -> Self {
        match self {
            Self::Auto => Self::auto_select(n_pixels, n_bins, rayon::current_num_threads()),
            other => other,
        }
    }
}

/// Options for histogram construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistogramOptions {
    /// Handling of samples outside an axis range
    pub out_of_range: OutOfRangePolicy,
    /// Threading for accumulate and back-project scans
    pub parallel: ParallelStrategy,
}
