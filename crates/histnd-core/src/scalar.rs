//! Single-channel image abstraction
//!
//! [`ScalarImage`] is the contract the histogram engine needs from an image:
//! read access to per-pixel scalar values, and the ability to allocate a
//! same-shaped zero image and write results into it.
//!
//! [`FPix`](crate::FPix) is the native implementation. With the `image`
//! feature enabled, grayscale buffers from the `image` crate
//! (`Luma<u8>`, `Luma<u16>`, `Luma<f32>`) implement it as well.

use crate::error::{Error, Result};

/// A 2D grid of scalar values with a fixed width and height.
///
/// Coordinates passed to [`value_at`](ScalarImage::value_at) and
/// [`set_value_at`](ScalarImage::set_value_at) must be inside the image;
/// implementations panic otherwise.
pub trait ScalarImage: Sized {
    /// Image width in pixels
    fn width(&self) -> u32;

    /// Image height in pixels
    fn height(&self) -> u32;

    /// Image dimensions as (width, height)
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Scalar value at (x, y)
    fn value_at(&self, x: u32, y: u32) -> f32;

    /// Write a scalar value at (x, y).
    ///
    /// Integer-valued images round to nearest and saturate to their
    /// pixel range.
    fn set_value_at(&mut self, x: u32, y: u32, value: f32);

    /// Allocate a new image of the same shape with every value set to 0.
    fn create_zero_like(&self) -> Self;
}

/// Check that every image in `images` has the same dimensions.
///
/// Returns the shared `(width, height)`, or `None` for an empty slice.
///
/// # Errors
///
/// Returns `Error::IncompatibleSizes` naming the first image and the
/// first one that differs from it.
pub fn common_dimensions<I: ScalarImage>(images: &[I]) -> Result<Option<(u32, u32)>> {
    let Some(first) = images.first() else {
        return Ok(None);
    };
    let (w, h) = first.dimensions();
    for img in &images[1..] {
        let (iw, ih) = img.dimensions();
        if iw != w || ih != h {
            return Err(Error::IncompatibleSizes(w, h, iw, ih));
        }
    }
    Ok(Some((w, h)))
}

#[cfg(feature = "image")]
mod image_impl {
    use super::ScalarImage;
    use image::{ImageBuffer, Luma};

    macro_rules! impl_scalar_image_for_luma {
        ($t:ty, $to:expr) => {
            impl ScalarImage for ImageBuffer<Luma<$t>, Vec<$t>> {
                #[inline]
                fn width(&self) -> u32 {
                    ImageBuffer::width(self)
                }

                #[inline]
                fn height(&self) -> u32 {
                    ImageBuffer::height(self)
                }

                #[inline]
                fn value_at(&self, x: u32, y: u32) -> f32 {
                    self.get_pixel(x, y).0[0] as f32
                }

                #[inline]
                fn set_value_at(&mut self, x: u32, y: u32, value: f32) {
                    let to: fn(f32) -> $t = $to;
                    self.put_pixel(x, y, Luma([to(value)]));
                }

                fn create_zero_like(&self) -> Self {
                    ImageBuffer::new(ImageBuffer::width(self), ImageBuffer::height(self))
                }
            }
        };
    }

    // `as` casts from float saturate at the integer bounds
    impl_scalar_image_for_luma!(u8, |v: f32| v.round() as u8);
    impl_scalar_image_for_luma!(u16, |v: f32| v.round() as u16);
    impl_scalar_image_for_luma!(f32, |v: f32| v);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FPix;

    #[test]
    fn test_common_dimensions() {
        let a = FPix::new(4, 3).unwrap();
        let b = FPix::new(4, 3).unwrap();
        assert_eq!(common_dimensions(&[a, b]).unwrap(), Some((4, 3)));
    }

    #[test]
    fn test_common_dimensions_empty() {
        let none: [FPix; 0] = [];
        assert_eq!(common_dimensions(&none).unwrap(), None);
    }

    #[test]
    fn test_common_dimensions_mismatch() {
        let a = FPix::new(4, 3).unwrap();
        let b = FPix::new(4, 4).unwrap();
        let err = common_dimensions(&[a, b]).unwrap_err();
        assert!(matches!(err, Error::IncompatibleSizes(4, 3, 4, 4)));
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_gray_image_saturates() {
        let img: image::GrayImage = image::ImageBuffer::new(2, 2);
        let mut out = img.create_zero_like();
        out.set_value_at(0, 0, 300.0);
        out.set_value_at(1, 0, -4.0);
        out.set_value_at(0, 1, 2.6);
        assert_eq!(out.value_at(0, 0), 255.0);
        assert_eq!(out.value_at(1, 0), 0.0);
        assert_eq!(out.value_at(0, 1), 3.0);
        assert_eq!(out.value_at(1, 1), 0.0);
    }
}
