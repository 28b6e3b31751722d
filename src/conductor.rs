//! The conductor: sequences the song, one baton round-trip per note.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::choir::{Choir, ChoirError};
use crate::output::{AudioSink, SinkError};
use crate::score::Song;

#[derive(Error, Debug)]
pub enum PerformanceError {
    #[error("nothing to perform: the score has no notes")]
    EmptyScore,
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Choir(#[from] ChoirError),
}

/// Owns a performance: the sink handle, the running flag, and the choir's
/// lifetime. The calling thread is the conductor for the duration of
/// `perform`.
pub struct Conductor {
    sink: Arc<dyn AudioSink>,
}

impl Conductor {
    pub fn new(sink: Arc<dyn AudioSink>) -> Self {
        Self { sink }
    }

    /// Play the whole song, then shut the choir down. Returns only after
    /// every chorister thread has exited, on success and failure alike.
    pub fn perform(&self, song: &Song) -> Result<(), PerformanceError> {
        if song.is_empty() {
            return Err(PerformanceError::EmptyScore);
        }

        let running = Arc::new(AtomicBool::new(true));
        let choir = Choir::assemble(Arc::clone(&self.sink), Arc::clone(&running))?;

        let played = self.conduct(song, &choir);

        // Shutdown only ever lands on parked choristers: on the happy path
        // the sink has drained, on the error path the failed write has
        // already returned. The flag must clear before the release so each
        // woken chorister exits instead of playing.
        running.store(false, Ordering::Release);
        let disbanded = choir.disband();

        played?;
        disbanded?;
        Ok(())
    }

    /// One rendezvous per note, strictly in order, then drain the sink.
    fn conduct(&self, song: &Song, choir: &Choir) -> Result<(), PerformanceError> {
        for bell in song.notes() {
            let chorister = choir.chorister(bell.note);
            chorister.set_duration(bell.length.samples());
            chorister.baton().signal();
            if let Some(err) = chorister.take_failure() {
                return Err(err.into());
            }
        }
        self.sink.drain()?;
        Ok(())
    }
}
