//! Back-projection: histogram density lookup per pixel

use super::{BinLayout, Histogram};
use crate::error::HistResult;
use crate::options::ParallelStrategy;
use histnd_core::ScalarImage;
use log::debug;
use rayon::prelude::*;

/// Rows looked up per parallel band, per worker thread
const BAND_ROWS_PER_THREAD: usize = 8;

#[inline]
fn lookup_row<I: ScalarImage>(
    layout: &BinLayout,
    bins: &[f64],
    images: &[I],
    y: u32,
    out: &mut [f32],
) {
    for (x, v) in out.iter_mut().enumerate() {
        *v = layout
            .locate(images, x as u32, y)
            .map_or(0.0, |idx| bins[idx] as f32);
    }
}

impl Histogram {
    /// Replace every pixel's value tuple with the count of its bin
    ///
    /// The result has the shape of the inputs and is allocated with
    /// [`ScalarImage::create_zero_like`] on `images[0]`. Samples discarded
    /// by [`OutOfRangePolicy::Discard`](crate::OutOfRangePolicy::Discard)
    /// produce 0. Counts are written as `f32`, so values above 2^24 are
    /// rounded to the nearest representable `f32` before the image's own
    /// conversion. The histogram is not modified.
    ///
    /// The row-parallel path looks up bands of rows into a scratch buffer
    /// and copies each band out, so its extra memory is one band, not a
    /// full image.
    ///
    /// # Errors
    ///
    /// - `HistError::DimensionMismatch` if `images.len() != dimension()`
    /// - `HistError::ImageSizeMismatch` if the images differ in size
    ///
    /// # Examples
    ///
    /// ```
    /// use histnd_core::FPix;
    /// use histnd_hist::Histogram;
    ///
    /// let mut hist = Histogram::new(&[4], &[0.0], &[8.0]).unwrap();
    /// let img = FPix::from_data(2, 1, vec![1.0, 5.0]).unwrap();
    /// hist.accumulate(&[img.clone()]).unwrap();
    /// hist.accumulate(&[FPix::new_with_value(2, 1, 1.5).unwrap()]).unwrap();
    ///
    /// let density = hist.back_project(&[img]).unwrap();
    /// assert_eq!(density.data(), &[3.0, 1.0]);
    /// ```
    pub fn back_project<I>(&self, images: &[I]) -> HistResult<I>
    where
        I: ScalarImage + Sync,
    {
        let (width, height) = self.validate_images(images)?;
        let n_pixels = (width as usize) * (height as usize);
        let strategy = self.parallel.resolve(n_pixels, 0);
        debug!(
            "back-project {}x{} x {} channels, {:?}",
            width,
            height,
            images.len(),
            strategy
        );

        let mut out = images[0].create_zero_like();
        if n_pixels == 0 {
            return Ok(out);
        }
        let layout = &self.layout;
        let bins = self.bins.as_slice();

        match strategy {
            ParallelStrategy::RowParallel => {
                let w = width as usize;
                let band_rows = rayon::current_num_threads().max(1) * BAND_ROWS_PER_THREAD;
                let mut band = vec![0.0f32; band_rows * w];
                for y0 in (0..height).step_by(band_rows) {
                    let rows = band_rows.min((height - y0) as usize);
                    let band = &mut band[..rows * w];
                    band.par_chunks_mut(w).enumerate().for_each(|(dy, row)| {
                        lookup_row(layout, bins, images, y0 + dy as u32, row)
                    });
                    for (dy, row) in band.chunks(w).enumerate() {
                        for (x, &v) in row.iter().enumerate() {
                            out.set_value_at(x as u32, y0 + dy as u32, v);
                        }
                    }
                }
            }
            ParallelStrategy::Sequential | ParallelStrategy::Auto => {
                let mut row = vec![0.0f32; width as usize];
                for y in 0..height {
                    lookup_row(layout, bins, images, y, &mut row);
                    for (x, &v) in row.iter().enumerate() {
                        out.set_value_at(x as u32, y, v);
                    }
                }
            }
        }

        Ok(out)
    }
}
