//! Photo to panel-format conversion.
//!
//! Glue around the mono-dither pipeline: decode an input PNG, run the
//! grayscale and binarization stages, and produce both the packed device
//! payload and a preview PNG.

use crate::error::ConvertError;
use crate::models::PanelSpec;
use mono_dither::{
    adaptive_binarize, binarize_with_dither, convert_to_grayscale, BinaryImage, Kernel,
    PackedImage, PreviewImage, Rgba8Image, ToneCurve, ATKINSON, FLOYD_STEINBERG, SIERRA_LITE,
};

/// How a grayscale photo becomes two-level.
#[derive(Debug, Clone, Copy)]
pub enum BinarizeStrategy {
    /// Locally-adaptive error diffusion. The right choice for photos.
    Dither(Kernel),
    /// Plain 3x3 local-average threshold. Crisper for text and line art.
    Threshold,
}

impl BinarizeStrategy {
    /// Parse a strategy name from the CLI or a config value.
    ///
    /// Accepts `"atkinson"`, `"floyd-steinberg"`, `"sierra-lite"` for the
    /// built-in kernels, and `"threshold"` or `"none"` for the plain
    /// adaptive threshold.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            s if s.eq_ignore_ascii_case("atkinson") => Some(Self::Dither(ATKINSON)),
            s if s.eq_ignore_ascii_case("floyd-steinberg") => Some(Self::Dither(FLOYD_STEINBERG)),
            s if s.eq_ignore_ascii_case("sierra-lite") => Some(Self::Dither(SIERRA_LITE)),
            s if s.eq_ignore_ascii_case("threshold") || s.eq_ignore_ascii_case("none") => {
                Some(Self::Threshold)
            }
            _ => None,
        }
    }
}

/// Conversion parameters.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub tone: ToneCurve,
    pub strategy: BinarizeStrategy,
}

impl Default for ConvertOptions {
    /// Defaults tuned for the calendar panel: gamma 0.8 with black/white
    /// clipping at 69/160, Atkinson diffusion.
    fn default() -> Self {
        Self {
            tone: ToneCurve::new().gamma(0.8).black(69).white(160),
            strategy: BinarizeStrategy::Dither(ATKINSON),
        }
    }
}

/// Both outputs of a conversion run: the packed payload for the device
/// and the preview for the operator.
pub struct ConvertedPhoto {
    pub packed: PackedImage,
    pub preview: PreviewImage,
}

/// Run the full pipeline on an already-sized photo.
pub fn convert_photo(
    photo: &Rgba8Image,
    panel: PanelSpec,
    options: &ConvertOptions,
) -> Result<ConvertedPhoto, ConvertError> {
    panel.expect_dimensions(photo.width(), photo.height())?;

    let mut gray = Rgba8Image::new(photo.width(), photo.height());
    convert_to_grayscale(photo, &mut gray, &options.tone)?;

    let mut packed = PackedImage::new(photo.width(), photo.height());
    match options.strategy {
        BinarizeStrategy::Dither(kernel) => binarize_with_dither(&gray, &mut packed, &kernel)?,
        BinarizeStrategy::Threshold => adaptive_binarize(&gray, &mut packed)?,
    }

    let preview = PreviewImage::from_image(&packed)?;
    Ok(ConvertedPhoto { packed, preview })
}

/// Decode a photo PNG into an RGBA raster.
///
/// Palette, low-bit-depth, and 16-bit images are normalized to 8-bit;
/// RGB and grayscale get an opaque alpha channel added.
pub fn decode_photo_png(bytes: &[u8]) -> Result<Rgba8Image, ConvertError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        other => {
            return Err(ConvertError::PngDecode(format!(
                "unsupported color type {other:?}"
            )))
        }
    };

    Ok(Rgba8Image::from_raw(info.width, info.height, rgba)?)
}

/// Encode a preview image as an optimized RGBA PNG.
///
/// The encoded bytes become the `dat` payload of a picture command and
/// travel the link 512 bytes per 200 ms, so the fast-settings encode is
/// recompressed with oxipng before use.
pub fn encode_preview_png(preview: &PreviewImage) -> Result<Vec<u8>, ConvertError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, preview.width(), preview.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(preview.data())
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;
    }

    let optimized = oxipng::optimize_from_memory(
        &bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(bytes);
    Ok(optimized)
}
