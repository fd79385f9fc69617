//! Audio output device contract.

use crate::audio_frame::{CHANNELS, SAMPLE_RATE};
use thiserror::Error;

/// Device-level failures. These never end a session; the playback consumer
/// logs them and keeps draining.
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("no output device available")]
    NoDevice,
    #[error("output device '{0}' not found")]
    NotFound(String),
    #[error("failed to open output stream: {0}")]
    Open(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("device closed")]
    Closed,
}

/// Stream parameters requested when opening a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for DeviceSpec {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            channels: CHANNELS,
        }
    }
}

/// Opaque PCM sink.
///
/// `write` may block while the device catches up. Implementations are not
/// required to be `Send`; they are opened and dropped on the playback thread.
pub trait AudioDevice {
    /// Queue interleaved `i16` little-endian bytes for output.
    fn write(&mut self, bytes: &[u8]) -> Result<(), DeviceError>;

    /// Block until everything written so far has been played.
    fn flush(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError>;
}

impl<D: AudioDevice + ?Sized> AudioDevice for Box<D> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        (**self).close()
    }
}
