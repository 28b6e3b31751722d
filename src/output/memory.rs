//! Offline sink that records every write, in order.

use std::sync::Mutex;

use super::{AudioSink, SinkError};

/// Captures the exact sequence of writes a performance produces. Stands in
/// for the device in tests and headless runs.
#[derive(Default)]
pub struct MemorySink {
    writes: Mutex<Vec<Vec<i8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write so far, one entry per `write` call.
    pub fn writes(&self) -> Vec<Vec<i8>> {
        self.writes.lock().unwrap().clone()
    }

    /// All samples written, concatenated.
    pub fn samples(&self) -> Vec<i8> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .flat_map(|write| write.iter().copied())
            .collect()
    }
}

impl AudioSink for MemorySink {
    fn write(&self, samples: &[i8]) -> Result<(), SinkError> {
        self.writes.lock().unwrap().push(samples.to_vec());
        Ok(())
    }

    fn drain(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_writes_separately_and_in_order() {
        let sink = MemorySink::new();
        sink.write(&[1, 2]).unwrap();
        sink.write(&[3]).unwrap();

        assert_eq!(sink.writes(), vec![vec![1, 2], vec![3]]);
        assert_eq!(sink.samples(), vec![1, 2, 3]);
    }
}
