//! Paced chunk transfer over the BLE UART link.
//!
//! The calendar firmware exposes a Nordic UART Service and can only
//! absorb small writes: every payload (packed image bytes or a UTF-8
//! command string) is split into chunks of at most 512 bytes, each chunk
//! is one discrete write, a 200 ms pacing delay follows every chunk
//! write, and the payload always ends with one zero-length terminator
//! write. Chunk size, pacing interval, and the terminator convention
//! must match the receiving firmware exactly.
//!
//! The radio session itself (discovery, GATT connect, notifications)
//! lives outside this crate. Anything that can deliver ordered, framed
//! writes implements [`LinkWriter`]; tests use an in-memory recorder.

use crate::error::TransportError;
use async_trait::async_trait;
use std::time::Duration;

/// Nordic UART Service UUID advertised by the calendar.
pub const UART_SERVICE_UUID: &str = "6e400001-b5a3-f393-e0a9-e50e24dcca9e";
/// Characteristic the host writes chunks to.
pub const UART_WRITE_CHAR_UUID: &str = "6e400002-b5a3-f393-e0a9-e50e24dcca9e";
/// Characteristic the device sends notifications on.
pub const UART_NOTIFY_CHAR_UUID: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";

/// Maximum bytes per link write.
pub const CHUNK_SIZE: usize = 512;
/// Flow-control delay after each chunk write.
pub const PACING_INTERVAL: Duration = Duration::from_millis(200);

/// One discrete write on the underlying link.
#[async_trait]
pub trait LinkWriter: Send {
    async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError>;
}

/// Sends payloads over a [`LinkWriter`] with firmware pacing.
pub struct PacedSender<W: LinkWriter> {
    link: W,
}

impl<W: LinkWriter> PacedSender<W> {
    pub fn new(link: W) -> Self {
        Self { link }
    }

    /// Give the underlying link back.
    pub fn into_inner(self) -> W {
        self.link
    }

    /// Transfer one payload: chunk, pace, terminate.
    pub async fn send_bytes(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        for chunk in payload.chunks(CHUNK_SIZE) {
            self.link.write_chunk(chunk).await?;
            tokio::time::sleep(PACING_INTERVAL).await;
        }
        // zero-length write marks end-of-payload
        self.link.write_chunk(&[]).await
    }

    /// Transfer a UTF-8 command string.
    pub async fn send_str(&mut self, text: &str) -> Result<(), TransportError> {
        tracing::debug!(bytes = text.len(), "Sending command string");
        self.send_bytes(text.as_bytes()).await
    }
}

/// Number of link writes a payload needs, terminator included.
pub fn write_count(payload_len: usize) -> usize {
    payload_len.div_ceil(CHUNK_SIZE) + 1
}

/// Lower bound on the wall-clock time a transfer takes, from pacing alone.
pub fn transfer_estimate(payload_len: usize) -> Duration {
    PACING_INTERVAL * payload_len.div_ceil(CHUNK_SIZE) as u32
}
