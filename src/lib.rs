pub mod choir; // One dedicated voice thread per note, each driven by a baton
pub mod conductor;
pub mod output; // Blocking PCM sink over the audio device
pub mod score;
pub mod synth;

/// Samples per second of the fixed mono 8-bit output format.
pub const SAMPLE_RATE: usize = 48 * 1024;

/// Every note length is a unit fraction of this one-second measure.
pub const MEASURE_SAMPLES: usize = SAMPLE_RATE;
