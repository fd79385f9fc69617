//! Opaque PCM audio frames produced by the remote generator.
//!
//! Frames are never decoded on the way through the session core; they are
//! handed to the playback device as-is.

use bytes::Bytes;
use std::time::Duration;

/// Sample rate of every frame in Hz.
pub const SAMPLE_RATE: u32 = 48_000;
/// Interleaved channel count.
pub const CHANNELS: u16 = 2;
/// Signed 16-bit little-endian samples.
pub const BYTES_PER_SAMPLE: usize = 2;

/// One slice of interleaved 48 kHz stereo `i16` PCM.
///
/// Cloning is cheap; the payload is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    data: Bytes,
}

impl AudioFrame {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Raw PCM bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Playback duration implied by the payload size.
    pub fn duration(&self) -> Duration {
        let bytes_per_second = SAMPLE_RATE as u64 * CHANNELS as u64 * BYTES_PER_SAMPLE as u64;
        Duration::from_micros(self.data.len() as u64 * 1_000_000 / bytes_per_second)
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl From<Vec<u8>> for AudioFrame {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
