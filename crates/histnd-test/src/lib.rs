//! histnd-test - Regression test framework for histnd
//!
//! Tracks a numbered sequence of value and image comparisons for a single
//! regression test, reports every failure at the end, and supports three
//! modes:
//!
//! - **Compare**: Check results against expected values (default)
//! - **Generate**: Run and print results without failing on mismatches
//! - **Display**: Like compare, but also print each checked value
//!
//! # Usage
//!
//! ```ignore
//! use histnd_test::RegParams;
//!
//! let mut rp = RegParams::new("backproject");
//! rp.compare_values(1.0, hist.query(&[1])? as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod params;

pub use params::{RegParams, RegTestMode};
