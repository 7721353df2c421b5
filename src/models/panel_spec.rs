use crate::error::ConvertError;

/// Display specifications for supported e-paper panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub width: u32,
    pub height: u32,
}

impl PanelSpec {
    /// 2.9" calendar panel: 296x128
    pub const CALENDAR_2IN9: Self = Self {
        width: 296,
        height: 128,
    };

    /// Length in bytes of the packed 1-bit payload for this panel
    pub fn packed_len(&self) -> usize {
        (self.width as usize * self.height as usize).div_ceil(8)
    }

    /// Validate that a photo already matches the panel resolution.
    /// Scaling and cropping happen upstream; the pipeline only accepts
    /// exact-size input.
    pub fn expect_dimensions(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        if width != self.width || height != self.height {
            return Err(ConvertError::UnsupportedDimensions {
                width,
                height,
                panel_width: self.width,
                panel_height: self.height,
            });
        }
        Ok(())
    }
}
