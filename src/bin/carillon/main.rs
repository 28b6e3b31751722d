//! carillon - a threaded bell choir
//!
//! Run with: cargo run -- [SCORE]

use std::path::{Path, PathBuf};

use clap::Parser;

use carillon::conductor::Conductor;
use carillon::output::DeviceSink;
use carillon::score::{self, Note, NoteLength, ScoreError};

/// Directory bare score names are looked up in.
const SCORE_ROOT: &str = "scores";

const DEFAULT_SCORE: &str = "mary_lamb.txt";

#[derive(Parser)]
#[command(
    name = "carillon",
    about = "Play a bell-choir score, one dedicated voice per note"
)]
struct Args {
    /// Score file to play; bare names are looked up under scores/
    score: Option<String>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let path = resolve_score(args.score.as_deref().unwrap_or(DEFAULT_SCORE));
    let song = match score::load_song(&path) {
        Ok(song) => song,
        Err(ScoreError::Unplayable(diagnostics)) => {
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            print_supported_tokens();
            return Err(ScoreError::Unplayable(diagnostics).into());
        }
        Err(err) => return Err(err.into()),
    };

    println!("=== Carillon ===");
    println!("Score: {}", path.display());
    println!("Notes: {}", song.len());
    println!();
    println!("Playing...");

    let sink = DeviceSink::open()?;
    Conductor::new(sink.line()).perform(&song)?;

    println!("Done.");
    Ok(())
}

/// Bare names live under the score root; anything carrying a path
/// separator is taken as given.
fn resolve_score(name: &str) -> PathBuf {
    if name.contains(['/', std::path::MAIN_SEPARATOR]) {
        PathBuf::from(name)
    } else {
        Path::new(SCORE_ROOT).join(name)
    }
}

fn print_supported_tokens() {
    let notes: Vec<&str> = Note::ALL.iter().map(|note| note.token()).collect();
    let lengths: Vec<String> = NoteLength::ALL
        .iter()
        .map(|length| length.code().to_string())
        .collect();
    eprintln!();
    eprintln!("Supported notes: {}", notes.join(" "));
    eprintln!("Supported lengths: {}", lengths.join(" "));
}
