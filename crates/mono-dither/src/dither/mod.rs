//! Locally-adaptive error diffusion dithering.
//!
//! Unlike a classic ditherer that quantizes against a fixed midpoint,
//! this one thresholds every pixel against `(avg + 128) >> 1`, where
//! `avg` is the 5x5 local average of the ORIGINAL grayscale values.
//! Diffusing error relative to that spatially-adaptive baseline
//! suppresses banding under uneven lighting while keeping dither texture
//! near edges.

mod kernel;

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG, SIERRA_LITE};

use crate::error::PipelineError;
use crate::image::{ensure_matching, BinaryImage, Rgba8Image};
use crate::threshold::local_average;

/// Binarize a grayscale raster with locally-adaptive error diffusion.
///
/// The scan is strictly row-major: every pixel's threshold decision
/// depends on error diffused from earlier-scanned neighbors, so the
/// order is part of the algorithm, not an implementation detail.
///
/// Two full-size working buffers are kept. The `working` buffer starts
/// as a copy of the grayscale values and accumulates diffused error in
/// f64 -- the residual `(orig - quantized) / divisor` is a real-valued
/// quotient, and truncating it to integers visibly degrades the dither.
/// The `averages` buffer records each pixel's 5x5 local average of the
/// undiffused input; the final pass re-thresholds the settled working
/// values against `(128 + avg) >> 1` using those stored averages.
///
/// Kernel taps that land outside the image are dropped by an explicit
/// bounds check; near the borders part of the error is simply lost.
///
/// # Errors
///
/// [`PipelineError::DimensionMismatch`] when `src` and `dst` sizes
/// disagree, [`PipelineError::InvalidConfiguration`] for a non-positive
/// kernel divisor. Both are detected before any write.
pub fn binarize_with_dither<D: BinaryImage + ?Sized>(
    src: &Rgba8Image,
    dst: &mut D,
    kernel: &Kernel,
) -> Result<(), PipelineError> {
    ensure_matching(src.width(), src.height(), dst.width(), dst.height())?;
    kernel.validate()?;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let divisor = kernel.divisor as f64;

    let mut working: Vec<f64> = Vec::with_capacity(width * height);
    for y in 0..src.height() {
        for x in 0..src.width() {
            working.push(src.channel0(x, y) as f64);
        }
    }
    let mut averages: Vec<i32> = vec![0; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let avg = local_average(src, x as u32, y as u32, 2);
            averages[idx] = avg;

            let orig = working[idx];
            let threshold = (avg + 128) >> 1;
            let quantized = if orig > threshold as f64 { 255.0 } else { 0.0 };
            let error = (orig - quantized) / divisor;

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
                    working[ny as usize * width + nx as usize] += weight as f64 * error;
                }
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let threshold = (128 + averages[idx]) >> 1;
            dst.set_pixel(x as u32, y as u32, working[idx] > threshold as f64)?;
        }
    }
    Ok(())
}
