use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::Baton;
use crate::output::{AudioSink, SinkError};
use crate::score::Note;
use crate::synth;

/// One voice of the choir: everything the dedicated thread and the
/// conductor share for a single note identity.
pub struct Chorister {
    note: Note,
    /// One precomputed measure; each request plays a prefix of it.
    waveform: Vec<i8>,
    /// Samples to play on the next request. Written by the conductor
    /// strictly before the matching `signal`, read by the thread strictly
    /// after waking.
    duration: AtomicUsize,
    baton: Baton,
    /// A failed write parks here so the rendezvous still completes; the
    /// conductor collects it after `signal` returns.
    failure: Mutex<Option<SinkError>>,
    sink: Arc<dyn AudioSink>,
    running: Arc<AtomicBool>,
}

impl Chorister {
    pub(super) fn new(note: Note, sink: Arc<dyn AudioSink>, running: Arc<AtomicBool>) -> Self {
        Self {
            note,
            waveform: synth::waveform(note),
            duration: AtomicUsize::new(0),
            baton: Baton::new(),
            failure: Mutex::new(None),
            sink,
            running,
        }
    }

    pub fn note(&self) -> Note {
        self.note
    }

    pub fn baton(&self) -> &Baton {
        &self.baton
    }

    /// Set how many samples the next request plays. Conductor-only, always
    /// before the matching `signal`.
    pub fn set_duration(&self, samples: usize) {
        self.duration.store(samples, Ordering::Release);
    }

    /// Remove and return a stashed write failure, if any.
    pub fn take_failure(&self) -> Option<SinkError> {
        self.failure.lock().unwrap().take()
    }

    /// The thread body: park for the first request, then service one
    /// request per turn until the running flag clears.
    pub(super) fn sing(&self) {
        self.baton.await_signal();
        while self.running.load(Ordering::Acquire) {
            if let Err(err) = self.ring() {
                *self.failure.lock().unwrap() = Some(err);
            }
            self.baton.acknowledge_and_wait();
        }
    }

    /// Write one note plus the trailing gap.
    fn ring(&self) -> Result<(), SinkError> {
        let samples = self.duration.load(Ordering::Acquire).min(self.waveform.len());
        self.sink.write(&self.waveform[..samples])?;
        self.sink.write(&synth::REST_GAP)
    }
}
