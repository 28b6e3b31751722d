//! End-to-end performances driven against the recording sink.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carillon::conductor::{Conductor, PerformanceError};
use carillon::output::{AudioSink, MemorySink, SinkError};
use carillon::score::{parse_score, Note, NoteLength, Song};
use carillon::synth;

fn conductor_for(sink: &Arc<MemorySink>) -> Conductor {
    Conductor::new(Arc::clone(sink) as Arc<dyn AudioSink>)
}

#[test]
fn a_performance_writes_the_score_in_order() {
    let song = parse_score("A4 4\nB4 2\n").expect("valid score");
    let sink = Arc::new(MemorySink::new());

    conductor_for(&sink).perform(&song).expect("performance");

    let writes = sink.writes();
    assert_eq!(writes.len(), 4, "two notes, each followed by a gap");
    assert_eq!(
        writes[0],
        synth::waveform(Note::A4)[..NoteLength::Quarter.samples()]
    );
    assert_eq!(writes[1].len(), synth::GAP_SAMPLES);
    assert!(writes[1].iter().all(|&s| s == 0));
    assert_eq!(
        writes[2],
        synth::waveform(Note::B4)[..NoteLength::Half.samples()]
    );
    assert_eq!(writes[3].len(), synth::GAP_SAMPLES);
}

#[test]
fn repeated_notes_reuse_the_same_voice() {
    let song = parse_score("E4 8\nE4 8\nE4 4\n").expect("valid score");
    let sink = Arc::new(MemorySink::new());

    conductor_for(&sink).perform(&song).expect("performance");

    let writes = sink.writes();
    assert_eq!(writes.len(), 6);
    assert_eq!(writes[0].len(), NoteLength::Eighth.samples());
    assert_eq!(writes[2].len(), NoteLength::Eighth.samples());
    assert_eq!(writes[4].len(), NoteLength::Quarter.samples());
}

#[test]
fn a_scored_rest_plays_silence_for_its_length() {
    let song = parse_score("REST 4\n").expect("valid score");
    let sink = Arc::new(MemorySink::new());

    conductor_for(&sink).perform(&song).expect("performance");

    let writes = sink.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].len(), NoteLength::Quarter.samples());
    assert!(writes[0].iter().all(|&s| s == 0));
}

#[test]
fn performing_the_same_score_twice_is_identical() {
    let text = "C4 4\nD4 2\nREST 8\n";
    let mut streams = Vec::new();
    for _ in 0..2 {
        let song = parse_score(text).expect("valid score");
        let sink = Arc::new(MemorySink::new());
        conductor_for(&sink).perform(&song).expect("performance");
        streams.push(sink.samples());
    }
    assert_eq!(streams[0], streams[1]);
}

#[test]
fn an_empty_song_never_spawns_the_choir() {
    let sink = Arc::new(MemorySink::new());
    let err = conductor_for(&sink).perform(&Song::new(Vec::new())).unwrap_err();

    assert!(matches!(err, PerformanceError::EmptyScore));
    assert!(sink.writes().is_empty());
}

/// Accepts a fixed number of writes, then fails like an unplugged device.
struct FailingSink {
    writes_left: AtomicUsize,
}

impl AudioSink for FailingSink {
    fn write(&self, _samples: &[i8]) -> Result<(), SinkError> {
        if self.writes_left.load(Ordering::SeqCst) == 0 {
            return Err(SinkError::Stream("device unplugged".to_string()));
        }
        self.writes_left.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn drain(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[test]
fn a_write_failure_aborts_the_performance_and_still_joins() {
    let song = parse_score("A4 4\nB4 4\nC4 4\n").expect("valid score");
    // The first note and its gap fit; the second note's write fails.
    let sink = Arc::new(FailingSink {
        writes_left: AtomicUsize::new(2),
    });

    let err = Conductor::new(sink as Arc<dyn AudioSink>)
        .perform(&song)
        .unwrap_err();

    // Returning at all proves the choir shut down and joined.
    assert!(matches!(
        err,
        PerformanceError::Sink(SinkError::Stream(_))
    ));
}
