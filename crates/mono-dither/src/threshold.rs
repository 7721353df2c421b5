//! Local-average adaptive threshold binarization.

use crate::error::PipelineError;
use crate::image::{ensure_matching, BinaryImage, Rgba8Image};

/// Average of the first-channel values in the square neighborhood of
/// `radius` around (x, y), clipped to the image bounds. Edge and corner
/// pixels average over fewer samples; there is no wraparound or
/// mirroring. Rounded to the nearest integer.
pub(crate) fn local_average(src: &Rgba8Image, x: u32, y: u32, radius: i64) -> i32 {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx >= 0 && nx < src.width() as i64 && ny >= 0 && ny < src.height() as i64 {
                sum += src.channel0(nx as u32, ny as u32) as u64;
                count += 1;
            }
        }
    }
    (sum as f64 / count as f64).round() as i32
}

/// Binarize a grayscale raster with a 3x3 local-average threshold.
///
/// For each pixel the threshold is `(avg + 128) >> 1`, where `avg` is the
/// rounded mean of the 3x3 neighborhood clipped to bounds. The blend with
/// the fixed midpoint 128 keeps the threshold anchored near mid-gray while
/// tracking local brightness. The destination pixel is white iff the
/// source value strictly exceeds the threshold.
///
/// `src` is expected to be a grayscale raster (only channel 0 is
/// sampled). Fails with [`PipelineError::DimensionMismatch`] before any
/// write when sizes disagree.
pub fn adaptive_binarize<D: BinaryImage + ?Sized>(
    src: &Rgba8Image,
    dst: &mut D,
) -> Result<(), PipelineError> {
    ensure_matching(src.width(), src.height(), dst.width(), dst.height())?;

    for y in 0..src.height() {
        for x in 0..src.width() {
            let avg = local_average(src, x, y, 1);
            let threshold = (avg + 128) >> 1;
            dst.set_pixel(x, y, src.channel0(x, y) as i32 > threshold)?;
        }
    }
    Ok(())
}
