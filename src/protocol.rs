//! Command protocol understood by the calendar firmware.
//!
//! Commands are UTF-8 JSON objects discriminated by a `typ` field and
//! travel over the same chunked transport as raw payloads. The field
//! names are part of the firmware contract and never change.

use crate::error::ProtocolError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Number of picture slots the firmware stores.
pub const PICTURE_SLOTS: u8 = 4;

/// A command addressed to the device.
///
/// Wire shapes:
///
/// ```text
/// {"typ":"pic","idx":<0..3>,"dat":"<base64 PNG>"}
/// {"typ":"cal","imf":<bool>}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "typ")]
pub enum Command {
    /// Store a PNG image in one of the device's picture slots.
    #[serde(rename = "pic")]
    Picture {
        /// Target slot, 0 through 3.
        idx: u8,
        /// Base64-encoded PNG bytes.
        dat: String,
    },
    /// Calendar preference: whether weeks start on Monday.
    #[serde(rename = "cal")]
    Calendar { imf: bool },
}

impl Command {
    /// Build a picture command for a device slot.
    pub fn picture(slot: u8, png: &[u8]) -> Result<Self, ProtocolError> {
        if slot >= PICTURE_SLOTS {
            return Err(ProtocolError::SlotOutOfRange(slot));
        }
        Ok(Command::Picture {
            idx: slot,
            dat: BASE64.encode(png),
        })
    }

    /// Build a calendar week-start preference command.
    pub fn calendar(monday_first: bool) -> Self {
        Command::Calendar { imf: monday_first }
    }

    /// Serialize to the JSON wire string.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
