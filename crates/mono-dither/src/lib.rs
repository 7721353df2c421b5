//! mono-dither: 1-bit adaptive dithering for bi-level e-paper panels
//!
//! This library converts full-color photographs into 1-bit monochrome
//! bitmaps suitable for black-and-white electrophoretic displays, and packs
//! the result into the panel's native bit layout.
//!
//! # Pipeline
//!
//! ```text
//! Rgba8Image (photo)
//!     |
//!     v
//! convert_to_grayscale      (BT.601 luma + gamma/black/white tone curve)
//!     |
//!     v
//! Rgba8Image (grayscale)
//!     |
//!     +---> adaptive_binarize       (3x3 local-average threshold)
//!     |
//!     +---> binarize_with_dither    (locally-adaptive error diffusion)
//!     |
//!     v
//! BinaryImage
//!     |
//!     +---> PackedImage     (1 bit/pixel, device wire format)
//!     +---> PreviewImage    (RGBA, on-screen preview)
//! ```
//!
//! Data flows strictly one direction. Each stage owns its destination
//! buffer exclusively, checks its preconditions before the first write,
//! and either completes fully or fails without mutating the destination.
//!
//! # Quick Start
//!
//! ```
//! use mono_dither::{
//!     binarize_with_dither, convert_to_grayscale,
//!     PackedImage, Rgba8Image, ToneCurve, ATKINSON,
//! };
//!
//! let photo = Rgba8Image::new(296, 128);
//! let mut gray = Rgba8Image::new(296, 128);
//! convert_to_grayscale(&photo, &mut gray, &ToneCurve::default()).unwrap();
//!
//! let mut packed = PackedImage::new(296, 128);
//! binarize_with_dither(&gray, &mut packed, &ATKINSON).unwrap();
//!
//! assert_eq!(packed.data().len(), 296 * 128 / 8);
//! ```
//!
//! # Binary image stores
//!
//! Two concrete stores implement the [`BinaryImage`] trait:
//!
//! - [`PackedImage`]: one bit per pixel in the column-major layout the
//!   display firmware consumes. A pixel's bit lives at byte
//!   `(x * height + y) / 8`, bit position `y % 8`, bit=1 meaning white.
//!   The buffer is `ceil(width * height / 8)` bytes so the trailing
//!   partial byte survives when `width * height` is not a multiple of 8.
//! - [`PreviewImage`]: four bytes per pixel, white stored as
//!   (255,255,255,255) and black as (0,0,0,255). Reads recompute luma from
//!   the stored color channels instead of trusting a cached bit, so the
//!   image stays self-consistent even when the buffer is edited directly.
//!
//! # Locally-adaptive thresholding
//!
//! Both binarizers compare against `(avg + 128) >> 1`, a blend of the local
//! neighborhood average with the fixed midpoint 128. The blend keeps the
//! threshold anchored near mid-gray while still tracking local brightness,
//! so near-uniform regions do not drive the threshold to either extreme.
//! The error-diffusion binarizer additionally propagates each pixel's
//! quantization residual into not-yet-scanned neighbors through a
//! [`Kernel`], diffusing error relative to that spatially-adaptive
//! baseline rather than a fixed global threshold. This suppresses banding
//! under uneven lighting while retaining dither texture near edges.
//!
//! The exact arithmetic matters: threshold halving truncates, both
//! threshold comparisons are strict, the tone-curve output is truncated
//! (not rounded) into the destination byte, and the diffusion residual is
//! a real-valued quotient. Changing any of these produces output that no
//! longer matches what the panel firmware was calibrated against.

pub mod dither;
pub mod error;
pub mod image;
pub mod threshold;
pub mod tone;

pub use dither::{binarize_with_dither, Kernel, ATKINSON, FLOYD_STEINBERG, SIERRA_LITE};
pub use error::PipelineError;
pub use image::{BinaryImage, PackedImage, PreviewImage, Rgba8Image};
pub use threshold::adaptive_binarize;
pub use tone::{convert_to_grayscale, luma, ToneCurve};
