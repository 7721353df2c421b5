use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported dimensions: {width}x{height} (panel is {panel_width}x{panel_height})")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        panel_width: u32,
        panel_height: u32,
    },

    #[error("Pixel pipeline error: {0}")]
    Pipeline(#[from] mono_dither::PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Picture slot {0} out of range (device has slots 0-3)")]
    SlotOutOfRange(u8),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Link write failed: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
