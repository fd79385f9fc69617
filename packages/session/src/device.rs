//! cpal output device fed through a ring buffer.
//!
//! `write` pushes samples into the ring and blocks while it is full; the
//! cpal callback pops them and pads with silence on underrun.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use wanderwave_domain::{AudioDevice, BYTES_PER_SAMPLE, DeviceError, DeviceSpec};

const DEFAULT_BUFFER_MS: u32 = 500;
const WAIT_STEP: Duration = Duration::from_millis(5);
/// A device that accepts nothing for this long is treated as dead.
const STALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Names of the output devices on the default host.
pub fn list_output_devices() -> Result<Vec<String>, DeviceError> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| DeviceError::Open(format!("failed to enumerate output devices: {e}")))?;
    Ok(devices.filter_map(|device| device.name().ok()).collect())
}

pub fn default_output_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|device| device.name().ok())
}

pub struct CpalDevice {
    stream: cpal::Stream,
    producer: HeapProd<i16>,
    closed: bool,
}

impl CpalDevice {
    /// Open `name`, or the default output device when `None`.
    pub fn open(name: Option<&str>, spec: DeviceSpec, buffer_ms: u32) -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let device = match name {
            None => host.default_output_device().ok_or(DeviceError::NoDevice)?,
            Some(name) => host
                .output_devices()
                .map_err(|e| DeviceError::Open(format!("failed to enumerate output devices: {e}")))?
                .find(|device| device.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| DeviceError::NotFound(name.to_string()))?,
        };

        let buffer_ms = if buffer_ms == 0 { DEFAULT_BUFFER_MS } else { buffer_ms };
        let capacity =
            (spec.sample_rate as usize * spec.channels as usize * buffer_ms as usize / 1000).max(1);
        let (producer, consumer) = HeapRb::<i16>::new(capacity).split();

        let stream_config = cpal::StreamConfig {
            channels: spec.channels,
            sample_rate: cpal::SampleRate(spec.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };
        let sample_format = device
            .default_output_config()
            .map_err(|e| DeviceError::Open(format!("failed to get default output config: {e}")))?
            .sample_format();

        let stream = match sample_format {
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, consumer),
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, consumer),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, consumer),
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, consumer),
            cpal::SampleFormat::F64 => build_stream::<f64>(&device, &stream_config, consumer),
            other => {
                return Err(DeviceError::Open(format!(
                    "unsupported sample format {other:?}"
                )));
            }
        }?;
        stream
            .play()
            .map_err(|e| DeviceError::Open(format!("failed to start output stream: {e}")))?;

        info!(
            device = %device.name().unwrap_or_default(),
            ?sample_format,
            buffer_ms,
            "audio output opened"
        );
        Ok(Self {
            stream,
            producer,
            closed: false,
        })
    }
}

/// Sleep one step, or fail once nothing has moved for [`STALL_TIMEOUT`].
fn wait_for_room(deadline: &mut Instant, progressed: bool) -> Result<(), DeviceError> {
    let now = Instant::now();
    if progressed {
        *deadline = now + STALL_TIMEOUT;
    } else if now >= *deadline {
        return Err(DeviceError::Write("output device stalled".to_string()));
    }
    thread::sleep(WAIT_STEP);
    Ok(())
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut consumer: HeapCons<i16>,
) -> Result<cpal::Stream, DeviceError>
where
    T: SizedSample + FromSample<i16>,
{
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for sample in data.iter_mut() {
                    *sample = match consumer.try_pop() {
                        Some(value) => T::from_sample(value),
                        None => T::EQUILIBRIUM,
                    };
                }
            },
            move |err| {
                error!("Audio output stream error: {}", err);
            },
            None,
        )
        .map_err(|e| DeviceError::Open(format!("failed to build output stream: {e}")))
}

impl AudioDevice for CpalDevice {
    fn write(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        if self.closed {
            return Err(DeviceError::Closed);
        }
        if bytes.len() % BYTES_PER_SAMPLE != 0 {
            debug!(len = bytes.len(), "dropping trailing partial sample");
        }
        let samples: Vec<i16> = bytes
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        let mut remaining = samples.as_slice();
        let mut deadline = Instant::now() + STALL_TIMEOUT;
        while !remaining.is_empty() {
            let pushed = self.producer.push_slice(remaining);
            remaining = &remaining[pushed..];
            if !remaining.is_empty() {
                wait_for_room(&mut deadline, pushed > 0)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        let mut last = self.producer.occupied_len();
        let mut deadline = Instant::now() + STALL_TIMEOUT;
        while last > 0 {
            let now = self.producer.occupied_len();
            wait_for_room(&mut deadline, now < last)?;
            last = now;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.stream
            .pause()
            .map_err(|e| DeviceError::Write(format!("failed to stop output stream: {e}")))
    }
}
