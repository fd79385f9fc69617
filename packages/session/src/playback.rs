//! Playback sink adapter.
//!
//! The network side pushes frames into an unbounded FIFO and never waits on
//! the device. A dedicated OS thread owns the device (cpal streams are not
//! `Send`) and drains the FIFO in order until it sees the end-of-stream
//! sentinel.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use wanderwave_domain::{AudioDevice, AudioFrame, DeviceError};

use crate::error::SessionError;

/// Opens the output device on the playback thread.
pub type DeviceOpener =
    Arc<dyn Fn() -> Result<Box<dyn AudioDevice>, DeviceError> + Send + Sync>;

#[derive(Debug)]
pub enum PlaybackItem {
    Frame(AudioFrame),
    EndOfStream,
}

/// What the consumer did before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    pub device_opened: bool,
    pub frames_written: u64,
    pub frames_dropped: u64,
    pub write_errors: u64,
}

/// Producer handle. Sends exactly one end-of-stream sentinel, either through
/// [`PlaybackSink::finish`] or when dropped.
#[derive(Debug)]
pub struct PlaybackSink {
    tx: Option<Sender<PlaybackItem>>,
}

impl PlaybackSink {
    pub fn enqueue(&self, frame: AudioFrame) {
        if let Some(tx) = &self.tx
            && tx.send(PlaybackItem::Frame(frame)).is_err()
        {
            debug!("playback consumer is gone, dropping frame");
        }
    }

    /// Frames waiting for the device.
    pub fn backlog(&self) -> usize {
        self.tx.as_ref().map_or(0, Sender::len)
    }

    pub fn finish(mut self) {
        self.send_end_of_stream();
    }

    fn send_end_of_stream(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(PlaybackItem::EndOfStream);
        }
    }
}

impl Drop for PlaybackSink {
    fn drop(&mut self) {
        self.send_end_of_stream();
    }
}

/// Handle on the playback thread.
#[derive(Debug)]
pub struct PlaybackConsumer {
    handle: JoinHandle<PlaybackReport>,
}

impl PlaybackConsumer {
    /// Block until the consumer has seen the sentinel and closed the device.
    pub fn join(self) -> Result<PlaybackReport, SessionError> {
        self.handle
            .join()
            .map_err(|_| SessionError::Playback("playback thread panicked".to_string()))
    }
}

/// Start the playback thread. `open` runs on that thread.
pub fn spawn_playback<F, D>(open: F) -> Result<(PlaybackSink, PlaybackConsumer), SessionError>
where
    F: FnOnce() -> Result<D, DeviceError> + Send + 'static,
    D: AudioDevice,
{
    let (tx, rx) = crossbeam_channel::unbounded();
    let handle = thread::Builder::new()
        .name("wanderwave-playback".to_string())
        .spawn(move || consume(open, rx))
        .map_err(|e| SessionError::Playback(e.to_string()))?;

    Ok((PlaybackSink { tx: Some(tx) }, PlaybackConsumer { handle }))
}

fn consume<F, D>(open: F, rx: Receiver<PlaybackItem>) -> PlaybackReport
where
    F: FnOnce() -> Result<D, DeviceError>,
    D: AudioDevice,
{
    let mut report = PlaybackReport::default();
    let mut device = match open() {
        Ok(device) => {
            report.device_opened = true;
            Some(device)
        }
        Err(e) => {
            warn!("audio output unavailable, frames will be discarded: {e}");
            None
        }
    };

    for item in rx.iter() {
        let frame = match item {
            PlaybackItem::Frame(frame) => frame,
            PlaybackItem::EndOfStream => break,
        };
        let Some(device) = device.as_mut() else {
            report.frames_dropped += 1;
            continue;
        };
        match device.write(frame.data()) {
            Ok(()) => report.frames_written += 1,
            Err(e) => {
                report.write_errors += 1;
                warn!("audio write failed: {e}");
            }
        }
    }

    if let Some(mut device) = device {
        if let Err(e) = device.flush() {
            warn!("audio flush failed: {e}");
        }
        if let Err(e) = device.close() {
            warn!("audio close failed: {e}");
        }
    }
    info!(
        written = report.frames_written,
        dropped = report.frames_dropped,
        errors = report.write_errors,
        "playback finished"
    );
    report
}
