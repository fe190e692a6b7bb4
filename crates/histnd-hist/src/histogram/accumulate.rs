//! Accumulating image samples into histogram bins
//!
//! Every pixel contributes one count to the bin addressed by its tuple of
//! channel values. Counts are order-independent, so the row-parallel path
//! folds rows into per-task local bin arrays and sums them afterwards.

use super::{BinLayout, Histogram};
use crate::error::{HistError, HistResult};
use crate::options::ParallelStrategy;
use histnd_core::ScalarImage;
use log::{debug, trace};
use rayon::prelude::*;

/// Count the samples of row `y` into `bins`
#[inline]
fn accumulate_row<I, M>(
    layout: &BinLayout,
    images: &[I],
    mask: Option<&M>,
    y: u32,
    width: u32,
    bins: &mut [f64],
) where
    I: ScalarImage,
    M: ScalarImage,
{
    for x in 0..width {
        if mask.is_some_and(|m| m.value_at(x, y) == 0.0) {
            continue;
        }
        if let Some(idx) = layout.locate(images, x, y) {
            bins[idx] += 1.0;
        }
    }
}

impl Histogram {
    /// Add every pixel of `images` to the histogram
    ///
    /// `images[i]` supplies the values for axis `i`; all images must have
    /// the same size. Repeated calls add up; call [`clear`](Self::clear)
    /// first to start over.
    ///
    /// # Errors
    ///
    /// - `HistError::DimensionMismatch` if `images.len() != dimension()`
    /// - `HistError::ImageSizeMismatch` if the images differ in size
    ///
    /// The histogram is unchanged when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use histnd_core::FPix;
    /// use histnd_hist::Histogram;
    ///
    /// let mut hist = Histogram::new(&[4, 4], &[0.0, 0.0], &[1.0, 1.0]).unwrap();
    /// let a = FPix::new_with_value(8, 8, 0.1).unwrap();
    /// let b = FPix::new_with_value(8, 8, 0.9).unwrap();
    /// hist.accumulate(&[a, b]).unwrap();
    /// assert_eq!(hist.query(&[0, 3]).unwrap(), 64.0);
    /// ```
    pub fn accumulate<I>(&mut self, images: &[I]) -> HistResult<()>
    where
        I: ScalarImage + Sync,
    {
        self.accumulate_impl(images, None::<&I>)
    }

    /// Add the pixels of `images` where `mask` is non-zero
    ///
    /// # Errors
    ///
    /// Same as [`accumulate`](Self::accumulate), plus
    /// `HistError::ImageSizeMismatch` if `mask` differs in size from the
    /// images.
    pub fn accumulate_masked<I, M>(&mut self, images: &[I], mask: &M) -> HistResult<()>
    where
        I: ScalarImage + Sync,
        M: ScalarImage + Sync,
    {
        self.accumulate_impl(images, Some(mask))
    }

    fn accumulate_impl<I, M>(&mut self, images: &[I], mask: Option<&M>) -> HistResult<()>
    where
        I: ScalarImage + Sync,
        M: ScalarImage + Sync,
    {
        let (width, height) = self.validate_images(images)?;
        if let Some(m) = mask.filter(|m| m.dimensions() != (width, height)) {
            return Err(HistError::ImageSizeMismatch {
                expected: (width, height),
                actual: m.dimensions(),
            });
        }

        let n_pixels = (width as usize) * (height as usize);
        let strategy = self.parallel.resolve(n_pixels, self.bins.len());
        debug!(
            "accumulate {}x{} x {} channels, masked: {}, {:?}",
            width,
            height,
            images.len(),
            mask.is_some(),
            strategy
        );

        let layout = &self.layout;
        match strategy {
            ParallelStrategy::RowParallel => {
                let n_bins = self.bins.len();
                let local = (0..height)
                    .into_par_iter()
                    .fold(
                        || vec![0.0f64; n_bins],
                        |mut acc, y| {
                            accumulate_row(layout, images, mask, y, width, &mut acc);
                            acc
                        },
                    )
                    .reduce_with(|mut a, b| {
                        for (s, t) in a.iter_mut().zip(&b) {
                            *s += t;
                        }
                        a
                    });
                if let Some(local) = local {
                    for (s, t) in self.bins.iter_mut().zip(&local) {
                        *s += t;
                    }
                }
            }
            ParallelStrategy::Sequential | ParallelStrategy::Auto => {
                let bins = &mut self.bins;
                for y in 0..height {
                    accumulate_row(layout, images, mask, y, width, bins);
                }
            }
        }

        trace!("accumulate done, total {}", self.total());
        Ok(())
    }
}
