//! Grayscale conversion with a gamma/black/white tone curve.

use crate::error::PipelineError;
use crate::image::{ensure_matching, Rgba8Image};

/// Tone-curve parameters applied during grayscale conversion.
///
/// `gamma` brightens (< 1.0) or darkens (> 1.0) midtones; 1.0 is identity.
/// Pixels whose toned value falls at or below `black` clip to 0, at or
/// above `white` clip to 255. `black <= white` is the meaningful
/// configuration; inverted levels are accepted and simply produce an
/// all-black or all-white result.
///
/// # Example
///
/// ```
/// use mono_dither::ToneCurve;
///
/// let curve = ToneCurve::new().gamma(0.8).black(69).white(160);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    /// Gamma exponent, must be positive and finite.
    pub gamma: f64,
    /// Black clipping level.
    pub black: u8,
    /// White clipping level.
    pub white: u8,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            black: 0,
            white: 255,
        }
    }
}

impl ToneCurve {
    /// Create an identity tone curve (gamma 1.0, black 0, white 255).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gamma exponent.
    #[inline]
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the black clipping level.
    #[inline]
    pub fn black(mut self, black: u8) -> Self {
        self.black = black;
        self
    }

    /// Set the white clipping level.
    #[inline]
    pub fn white(mut self, white: u8) -> Self {
        self.white = white;
        self
    }

    /// Reject gamma values that would poison the conversion with
    /// NaN or infinity.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.gamma > 0.0 && self.gamma.is_finite()) {
            return Err(PipelineError::InvalidConfiguration {
                reason: format!("gamma must be positive and finite, got {}", self.gamma),
            });
        }
        Ok(())
    }
}

/// BT.601 luma of an RGB triple, rounded and clamped to 0..=255.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    y.round().min(255.0) as u8
}

/// Convert a full-color raster to grayscale through a tone curve.
///
/// For every pixel: take the BT.601 luma, raise it through
/// `255 * (luma/255)^(1/gamma)`, clip against the black/white levels, and
/// write the result into all three color channels with alpha 255.
///
/// The unclipped value is truncated (not rounded) into the destination
/// byte; downstream calibration depends on that exact quantization.
///
/// Fails with [`PipelineError::DimensionMismatch`] when `src` and `dst`
/// sizes disagree and [`PipelineError::InvalidConfiguration`] for a
/// non-positive gamma, in both cases before writing anything.
pub fn convert_to_grayscale(
    src: &Rgba8Image,
    dst: &mut Rgba8Image,
    curve: &ToneCurve,
) -> Result<(), PipelineError> {
    ensure_matching(src.width(), src.height(), dst.width(), dst.height())?;
    curve.validate()?;

    let exponent = 1.0 / curve.gamma;
    let black = curve.black as f64;
    let white = curve.white as f64;

    for y in 0..src.height() {
        for x in 0..src.width() {
            let i = src.pixel_offset(x, y);
            let s = src.data();
            let raw = luma(s[i], s[i + 1], s[i + 2]) as f64;
            let toned = 255.0 * (raw / 255.0).powf(exponent);
            let gray = if toned <= black {
                0
            } else if toned >= white {
                255
            } else {
                toned as u8
            };

            let o = dst.pixel_offset(x, y);
            let d = dst.data_mut();
            d[o] = gray;
            d[o + 1] = gray;
            d[o + 2] = gray;
            d[o + 3] = 255;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 2x2 raster with four distinct colors.
    fn sample_raster() -> Rgba8Image {
        Rgba8Image::from_raw(
            2,
            2,
            vec![
                200, 30, 90, 255, // reddish
                10, 240, 80, 255, // greenish
                60, 60, 220, 255, // bluish
                128, 128, 128, 255, // gray
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_identity_curve_reduces_to_luma() {
        let src = sample_raster();
        let mut dst = Rgba8Image::new(2, 2);
        convert_to_grayscale(&src, &mut dst, &ToneCurve::default()).unwrap();

        for y in 0..2 {
            for x in 0..2 {
                let i = src.pixel_offset(x, y);
                let expected = luma(src.data()[i], src.data()[i + 1], src.data()[i + 2]);
                let o = dst.pixel_offset(x, y);
                assert_eq!(dst.data()[o], expected, "channel 0 at ({x}, {y})");
                assert_eq!(dst.data()[o + 1], expected, "channel 1 at ({x}, {y})");
                assert_eq!(dst.data()[o + 2], expected, "channel 2 at ({x}, {y})");
                assert_eq!(dst.data()[o + 3], 255, "alpha at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_gamma_output_is_truncated_not_rounded() {
        let src = Rgba8Image::from_raw(1, 1, vec![100, 100, 100, 255]).unwrap();
        let mut dst = Rgba8Image::new(1, 1);
        // 255 * (100/255)^(1/2) = 159.687... -> 159
        convert_to_grayscale(&src, &mut dst, &ToneCurve::new().gamma(2.0)).unwrap();
        assert_eq!(dst.data()[0], 159);
    }

    #[test]
    fn test_black_white_clipping() {
        let curve = ToneCurve::new().black(69).white(160);

        let src = Rgba8Image::from_raw(1, 1, vec![50, 50, 50, 255]).unwrap();
        let mut dst = Rgba8Image::new(1, 1);
        convert_to_grayscale(&src, &mut dst, &curve).unwrap();
        assert_eq!(dst.data()[0], 0, "below black level clips to 0");

        let src = Rgba8Image::from_raw(1, 1, vec![200, 200, 200, 255]).unwrap();
        convert_to_grayscale(&src, &mut dst, &curve).unwrap();
        assert_eq!(dst.data()[0], 255, "above white level clips to 255");
    }

    #[test]
    fn test_inverted_levels_produce_only_extremes() {
        let curve = ToneCurve::new().black(200).white(100);
        let src = sample_raster();
        let mut dst = Rgba8Image::new(2, 2);
        convert_to_grayscale(&src, &mut dst, &curve).unwrap();
        for px in dst.data().chunks(4) {
            assert!(px[0] == 0 || px[0] == 255, "got non-extreme value {}", px[0]);
        }
    }

    #[test]
    fn test_zero_gamma_rejected() {
        let src = sample_raster();
        let mut dst = Rgba8Image::new(2, 2);
        let err =
            convert_to_grayscale(&src, &mut dst, &ToneCurve::new().gamma(0.0)).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_negative_and_nan_gamma_rejected() {
        assert!(ToneCurve::new().gamma(-1.0).validate().is_err());
        assert!(ToneCurve::new().gamma(f64::NAN).validate().is_err());
        assert!(ToneCurve::new().gamma(f64::INFINITY).validate().is_err());
        assert!(ToneCurve::new().gamma(0.1).validate().is_ok());
    }

    #[test]
    fn test_dimension_mismatch_leaves_destination_untouched() {
        let src = sample_raster();
        let mut dst = Rgba8Image::from_raw(1, 2, vec![7; 8]).unwrap();
        let err = convert_to_grayscale(&src, &mut dst, &ToneCurve::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::DimensionMismatch {
                src_width: 2,
                src_height: 2,
                dst_width: 1,
                dst_height: 2,
            }
        ));
        assert!(dst.data().iter().all(|&b| b == 7), "no partial writes");
    }
}
