//! histnd - Dense N-dimensional histogram engine for scalar images
//!
//! # Overview
//!
//! histnd builds joint histograms over one or more equally-shaped
//! single-channel images and uses them as density models:
//!
//! - Accumulate per-pixel value tuples into a dense N-dimensional bin array
//! - Threshold, normalize, clear and query bins
//! - Back-project an image set into a per-pixel density image
//!
//! # Example
//!
//! ```
//! use histnd::{FPix, Histogram};
//!
//! let hue = FPix::from_fn(16, 16, |x, _| x as f32 * 10.0).unwrap();
//! let sat = FPix::new_with_value(16, 16, 200.0).unwrap();
//!
//! let mut model = Histogram::new(&[16, 8], &[0.0, 0.0], &[180.0, 256.0]).unwrap();
//! model.accumulate(&[hue.clone(), sat.clone()]).unwrap();
//! model.threshold(2.0);
//!
//! let density = model.back_project(&[hue, sat]).unwrap();
//! assert_eq!(density.dimensions(), (16, 16));
//! ```

// Re-export core types (image containers and the image trait)
pub use histnd_core::*;

// Re-export the engine as a module, plus its primary types
pub use histnd_hist as hist;
pub use histnd_hist::{
    Axis, HistError, HistResult, Histogram, HistogramOptions, MinMax, OutOfRangePolicy,
    ParallelStrategy,
};
