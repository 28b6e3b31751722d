//! The device sink: a bounded PCM queue drained by the cpal callback.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::{AudioSink, SinkError};
use crate::SAMPLE_RATE;

/// Samples buffered between the writers and the device callback: half a
/// second of audio.
const QUEUE_CAPACITY: usize = SAMPLE_RATE / 2;

/// cpal exposes no device-side drain, so `drain` sleeps this long after
/// the queue empties to let the device's own buffer play out.
const DRAIN_SETTLE: Duration = Duration::from_millis(100);

struct QueueState {
    buffer: VecDeque<i8>,
    /// Set by the stream error callback; fails every later write and drain.
    failed: Option<String>,
}

/// The blocking half of the device sink, shared with the choir. Writers
/// park here while the cpal callback pops samples on its own schedule.
pub struct PcmQueue {
    state: Mutex<QueueState>,
    /// Signalled when the callback frees space.
    space: Condvar,
    /// Signalled when the callback empties the buffer.
    drained: Condvar,
}

impl PcmQueue {
    fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                buffer: VecDeque::with_capacity(QUEUE_CAPACITY),
                failed: None,
            }),
            space: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    /// Device callback: pop queued samples into the output buffer, fanning
    /// the mono stream out across every channel. Underrun plays silence.
    fn fill(&self, data: &mut [f32], channels: usize) {
        let mut state = self.state.lock().unwrap();
        for frame in data.chunks_mut(channels) {
            let value = match state.buffer.pop_front() {
                Some(sample) => f32::from(sample) / 128.0,
                None => 0.0,
            };
            for out in frame.iter_mut() {
                *out = value;
            }
        }
        if state.buffer.is_empty() {
            self.drained.notify_all();
        }
        self.space.notify_all();
    }

    /// Record a stream failure and wake every parked writer.
    fn poison(&self, reason: String) {
        let mut state = self.state.lock().unwrap();
        state.failed = Some(reason);
        self.space.notify_all();
        self.drained.notify_all();
    }
}

impl AudioSink for PcmQueue {
    fn write(&self, samples: &[i8]) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap();
        let mut remaining = samples;
        loop {
            if let Some(reason) = &state.failed {
                return Err(SinkError::Stream(reason.clone()));
            }
            let free = QUEUE_CAPACITY - state.buffer.len();
            let take = free.min(remaining.len());
            state.buffer.extend(remaining[..take].iter().copied());
            remaining = &remaining[take..];
            if remaining.is_empty() {
                return Ok(());
            }
            state = self.space.wait(state).unwrap();
        }
    }

    fn drain(&self) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(reason) = &state.failed {
                return Err(SinkError::Stream(reason.clone()));
            }
            if state.buffer.is_empty() {
                break;
            }
            state = self.drained.wait(state).unwrap();
        }
        drop(state);
        std::thread::sleep(DRAIN_SETTLE);
        Ok(())
    }
}

/// Owns the cpal stream and hands out the blocking queue. Opening starts
/// the stream; dropping the sink closes the device.
pub struct DeviceSink {
    queue: Arc<PcmQueue>,
    _stream: cpal::Stream,
}

impl DeviceSink {
    /// Open the default output device at the fixed rate and start playing.
    pub fn open() -> Result<DeviceSink, SinkError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        let channels = device.default_output_config()?.channels();
        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(SAMPLE_RATE as u32),
            buffer_size: cpal::BufferSize::Default,
        };

        let queue = Arc::new(PcmQueue::new());
        let fill_queue = Arc::clone(&queue);
        let poison_queue = Arc::clone(&queue);
        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _| fill_queue.fill(data, channels as usize),
            move |err| poison_queue.poison(err.to_string()),
            None,
        )?;
        stream.play()?;

        Ok(DeviceSink {
            queue,
            _stream: stream,
        })
    }

    /// The writer handle shared with the choir.
    pub fn line(&self) -> Arc<PcmQueue> {
        Arc::clone(&self.queue)
    }
}
