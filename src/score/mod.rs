//! Score model: the pitches and lengths a song can name, and the text
//! format that names them.

pub mod length;
pub mod note;
pub mod song;

pub use length::NoteLength;
pub use note::Note;
pub use song::{load_song, parse_score, BellNote, Diagnostic, ScoreError, Song};
