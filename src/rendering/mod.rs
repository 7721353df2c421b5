pub mod convert;

pub use convert::{
    convert_photo, decode_photo_png, encode_preview_png, BinarizeStrategy, ConvertOptions,
    ConvertedPhoto,
};
