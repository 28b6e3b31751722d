//! Waveform synthesis: one measure of sine per pitch, 8-bit signed PCM.

use crate::score::Note;
use crate::{MEASURE_SAMPLES, SAMPLE_RATE};

/// Peak amplitude of a rendered waveform, in 8-bit sample units.
const MAX_VOLUME: f64 = 127.0;

/// Samples of silence written after every note (50 ms).
pub const GAP_SAMPLES: usize = SAMPLE_RATE * 50 / 1000;

/// The shared inter-note gap.
pub static REST_GAP: [i8; GAP_SAMPLES] = [0; GAP_SAMPLES];

/// Render one full measure of `note` as signed 8-bit samples.
///
/// Pure and stateless: the same note always renders the same buffer.
/// Requests shorter than a measure play a prefix of it. The rest renders
/// as silence.
pub fn waveform(note: Note) -> Vec<i8> {
    let mut samples = vec![0i8; MEASURE_SAMPLES];
    if let Some(frequency) = note.frequency() {
        // Phase advance per sample for this frequency.
        let step = frequency * std::f64::consts::TAU / SAMPLE_RATE as f64;
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = (f64::sin(i as f64 * step) * MAX_VOLUME) as i8;
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_waveform_fills_one_measure() {
        assert_eq!(waveform(Note::A4).len(), MEASURE_SAMPLES);
    }

    #[test]
    fn the_rest_renders_as_silence() {
        assert!(waveform(Note::Rest).iter().all(|&s| s == 0));
    }

    #[test]
    fn samples_stay_within_peak_volume() {
        for &sample in &waveform(Note::A5) {
            assert!((-127..=127).contains(&i32::from(sample)));
        }
    }

    #[test]
    fn a4_oscillates_440_times_per_measure() {
        let samples = waveform(Note::A4);
        let rising_crossings = samples
            .windows(2)
            .filter(|pair| pair[0] < 0 && pair[1] >= 0)
            .count();
        assert!((439..=441).contains(&rising_crossings));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(waveform(Note::C4), waveform(Note::C4));
    }

    #[test]
    fn the_gap_is_fifty_milliseconds_of_silence() {
        assert_eq!(GAP_SAMPLES, SAMPLE_RATE / 20);
        assert!(REST_GAP.iter().all(|&s| s == 0));
    }
}
