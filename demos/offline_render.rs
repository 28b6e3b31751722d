use std::sync::Arc;

use carillon::conductor::Conductor;
use carillon::output::{AudioSink, MemorySink};
use carillon::score;

fn main() {
    let song = score::parse_score("C4 4\nE4 4\nG4 4\nC4 2\n").expect("valid score");

    let sink = Arc::new(MemorySink::new());
    Conductor::new(Arc::clone(&sink) as Arc<dyn AudioSink>)
        .perform(&song)
        .expect("offline performance");

    println!(
        "Rendered {} samples across {} writes",
        sink.samples().len(),
        sink.writes().len()
    );
}
