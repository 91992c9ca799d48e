//! Sample telemetry buffer.
//!
//! Buffers one `(time, x, y)` record per accepted down/move sample and
//! writes them out line-per-sample on demand. Where the records end up
//! (file, store, upload) is the host's choice of `Write` target.

use std::io::{self, Write};

use crate::session::SampleSink;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordedSample {
    pub time_ms: u64,
    pub x: f32,
    pub y: f32,
}

/// In-memory recorder for a session's accepted samples.
#[derive(Default)]
pub struct TraceRecorder {
    samples: Vec<RecordedSample>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[RecordedSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Writes all records as `time_ms x y` lines.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for sample in &self.samples {
            writeln!(writer, "{} {} {}", sample.time_ms, sample.x, sample.y)?;
        }
        Ok(())
    }
}

impl SampleSink for TraceRecorder {
    fn record(&mut self, time_ms: u64, x: f32, y: f32) {
        self.samples.push(RecordedSample { time_ms, x, y });
    }
}
