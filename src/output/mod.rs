//! Audio output: the blocking sink contract and its device and offline
//! backends.

pub mod device;
pub mod memory;

pub use device::{DeviceSink, PcmQueue};
pub use memory::MemorySink;

use thiserror::Error;

/// A blocking, ordered stream of mono 8-bit signed PCM.
///
/// `write` suspends until the sink has accepted every sample; `drain`
/// suspends until everything previously written has left the buffer. The
/// sink does nothing to serialize concurrent writers; the handoff
/// protocol guarantees there is only ever one active writer.
pub trait AudioSink: Send + Sync {
    fn write(&self, samples: &[i8]) -> Result<(), SinkError>;
    fn drain(&self) -> Result<(), SinkError>;
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("no audio output device available")]
    NoDevice,
    #[error("failed to query the output device: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to open the audio stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start the audio stream: {0}")]
    Start(#[from] cpal::PlayStreamError),
    #[error("audio stream failed: {0}")]
    Stream(String),
}
