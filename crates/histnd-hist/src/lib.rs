//! histnd Hist - Dense N-dimensional histograms over scalar images
//!
//! This crate provides the histogram engine:
//!
//! - **Construction** ([`Histogram::new`], [`Histogram::with_options`],
//!   [`Histogram::from_axes`]): fixed axes, ranges and bin counts
//! - **Accumulation** ([`Histogram::accumulate`], [`Histogram::accumulate_masked`]):
//!   joint frequency counts across one image per axis
//! - **Back-projection** ([`Histogram::back_project`]): per-pixel density lookup
//! - **Bin operations**: [`Histogram::clear`], [`Histogram::threshold`],
//!   [`Histogram::query`], [`Histogram::normalize`], [`Histogram::min_max`]
//! - **Configuration** ([`options`]): out-of-range policy and threading
//!
//! Samples are mapped to bins with
//! `k = clamp(floor((v - min) / (max - min) * bins), 0, bins - 1)`.

pub mod axis;
pub mod error;
pub mod histogram;
pub mod options;

// Re-export core types
pub use histnd_core;

pub use axis::Axis;
pub use error::{HistError, HistResult};
pub use histogram::{Histogram, MinMax};
pub use options::{HistogramOptions, MIN_PIXELS_PARALLEL, OutOfRangePolicy, ParallelStrategy};
