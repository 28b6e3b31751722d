//! The choir: one dedicated thread per note identity, each driven through
//! its own baton by the single conductor.

pub mod baton;
pub mod chorister;

pub use baton::Baton;
pub use chorister::Chorister;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;

use crate::output::AudioSink;
use crate::score::Note;

#[derive(Error, Debug)]
pub enum ChoirError {
    #[error("failed to start the chorister thread for {note}: {source}")]
    Spawn {
        note: Note,
        source: std::io::Error,
    },
    #[error("the chorister for {note} panicked during the performance")]
    Panicked { note: Note },
}

struct Stall {
    chorister: Arc<Chorister>,
    thread: JoinHandle<()>,
}

/// A fixed arena of choristers indexed by note ordinal. Built once per
/// song, read-only while the song plays.
pub struct Choir {
    stalls: Vec<Stall>,
}

impl Choir {
    /// Spawn one chorister per pitch, every one sharing the same sink and
    /// the same running flag. If a spawn fails partway through, the
    /// already-running threads are released and joined before the error is
    /// returned, so nothing leaks.
    pub fn assemble(
        sink: Arc<dyn AudioSink>,
        running: Arc<AtomicBool>,
    ) -> Result<Choir, ChoirError> {
        let mut stalls = Vec::with_capacity(Note::ALL.len());
        for note in Note::ALL {
            let chorister = Arc::new(Chorister::new(
                note,
                Arc::clone(&sink),
                Arc::clone(&running),
            ));
            let singer = Arc::clone(&chorister);
            match thread::Builder::new()
                .name(format!("chorister-{note}"))
                .spawn(move || singer.sing())
            {
                Ok(thread) => stalls.push(Stall { chorister, thread }),
                Err(source) => {
                    running.store(false, Ordering::Release);
                    let _ = Choir { stalls }.disband();
                    return Err(ChoirError::Spawn { note, source });
                }
            }
        }
        Ok(Choir { stalls })
    }

    /// Constant-time lookup; the arena covers every representable note, so
    /// a miss is impossible by construction.
    pub fn chorister(&self, note: Note) -> &Chorister {
        &self.stalls[note.index()].chorister
    }

    /// Release every baton and join every thread. Callers clear the
    /// running flag first; the release exists so parked choristers wake up
    /// and observe it.
    pub fn disband(self) -> Result<(), ChoirError> {
        for stall in &self.stalls {
            stall.chorister.baton().force_release();
        }

        let mut first_panic = None;
        for stall in self.stalls {
            let note = stall.chorister.note();
            if stall.thread.join().is_err() && first_panic.is_none() {
                first_panic = Some(note);
            }
        }
        match first_panic {
            Some(note) => Err(ChoirError::Panicked { note }),
            None => Ok(()),
        }
    }
}
