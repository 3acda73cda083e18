//! Line-oriented status output supplied by the hosting test framework.

/// Single-line message output capability.
///
/// The core never writes status to the console directly; every message goes
/// through a sink the host supplies, so frameworks can route output wherever
/// their reporters live.
pub trait LineSink {
    fn write_line(&mut self, line: &str);
}

/// Sink that prints each line to stderr (CLI default).
#[derive(Debug, Default)]
pub struct StderrSink;

impl LineSink for StderrSink {
    fn write_line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}
