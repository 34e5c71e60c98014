//! Debug trace of every handled event
//!
//! Each event produces one block with the event number, the clock, both
//! line lengths and both server states, plus the in-flight count when a
//! transit link is modelled. The trace only observes the run.

use crate::event::EventSnapshot;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writer for the per-event debug trace
#[derive(Debug)]
pub struct DebugTrace<W: Write> {
    writer: W,
    records: u64,
}

impl DebugTrace<BufWriter<File>> {
    /// Create (or truncate) a trace file
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> DebugTrace<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Mark the start of a replication
    pub fn begin_replication(&mut self, replication: usize) -> io::Result<()> {
        writeln!(self.writer, "\nREPLICATION {replication}")
    }

    /// Append the block for one handled event
    pub fn record(&mut self, snapshot: &EventSnapshot) -> io::Result<()> {
        write!(self.writer, "{snapshot}")?;
        self.records += 1;
        Ok(())
    }

    /// Number of event blocks written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
