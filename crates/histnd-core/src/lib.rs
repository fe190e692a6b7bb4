//! histnd Core - Basic data structures for histogram computation
//!
//! This crate provides the image-side building blocks used by the
//! histogram engine:
//!
//! - [`ScalarImage`] - Read/write access to single-channel images
//! - [`FPix`] - Floating-point image, the native [`ScalarImage`]
//! - [`Error`] / [`Result`] - Core error type
//!
//! Enable the `image` feature to use grayscale `image::ImageBuffer`s
//! (`Luma<u8>`, `Luma<u16>`, `Luma<f32>`) as [`ScalarImage`]s.

pub mod error;
pub mod fpix;
pub mod scalar;

pub use error::{Error, Result};
pub use fpix::FPix;
pub use scalar::{ScalarImage, common_dimensions};
