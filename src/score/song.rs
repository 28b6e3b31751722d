use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{Note, NoteLength};

/// One entry of a score: which bell to ring and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BellNote {
    pub note: Note,
    pub length: NoteLength,
}

/// An ordered sequence of bell notes, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    notes: Vec<BellNote>,
}

impl Song {
    pub fn new(notes: Vec<BellNote>) -> Song {
        Song { notes }
    }

    pub fn notes(&self) -> &[BellNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A problem found while reading a score.
///
/// Every problem in a file is collected before the score is rejected, so a
/// single pass reports everything there is to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("line {line}: unknown note '{token}'")]
    UnknownNote { line: usize, token: String },
    #[error("line {line}: missing note length")]
    MissingLength { line: usize },
    #[error("line {line}: unknown note length '{token}' (expected 1, 2, 4, or 8)")]
    UnknownLength { line: usize, token: String },
    #[error("no notes found in score")]
    EmptyScore,
}

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("cannot read score {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("score is unplayable ({} problems)", .0.len())]
    Unplayable(Vec<Diagnostic>),
}

/// Parse score text: one `<NOTE> <LENGTH_CODE>` per line, blank lines and
/// `#` comments skipped, fields past the second ignored.
///
/// Collects every diagnostic rather than stopping at the first. A score
/// with any diagnostic, or with nothing to play, is rejected whole; there
/// is no partial playback of a valid prefix.
pub fn parse_score(text: &str) -> Result<Song, Vec<Diagnostic>> {
    let mut notes = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let Some(note_token) = fields.next() else {
            continue;
        };

        let note = Note::from_token(note_token);
        if note.is_none() {
            diagnostics.push(Diagnostic::UnknownNote {
                line,
                token: note_token.to_string(),
            });
        }

        let length = match fields.next() {
            None => {
                diagnostics.push(Diagnostic::MissingLength { line });
                None
            }
            Some(code) => {
                let length = NoteLength::from_code(code);
                if length.is_none() {
                    diagnostics.push(Diagnostic::UnknownLength {
                        line,
                        token: code.to_string(),
                    });
                }
                length
            }
        };

        if let (Some(note), Some(length)) = (note, length) {
            notes.push(BellNote { note, length });
        }
    }

    if notes.is_empty() && diagnostics.is_empty() {
        diagnostics.push(Diagnostic::EmptyScore);
    }

    if diagnostics.is_empty() {
        Ok(Song::new(notes))
    } else {
        Err(diagnostics)
    }
}

/// Read and parse a score file.
pub fn load_song(path: &Path) -> Result<Song, ScoreError> {
    let text = fs::read_to_string(path).map_err(|source| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_score(&text).map_err(ScoreError::Unplayable)
}
