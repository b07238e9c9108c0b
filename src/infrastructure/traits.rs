//! I/O boundary traits for testability
//!
//! The printer never touches `stdout`/`stderr` directly; it writes through a
//! [`Console`] so tests can capture output byte-for-byte.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

/// Target stream of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stream {
    #[default]
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Console abstraction for testability.
pub trait Console: Send + Sync {
    /// Write `text` verbatim (terminator included) to `stream`.
    fn write(&self, stream: Stream, text: &str) -> io::Result<()>;
}

/// Real console writing to the process' standard streams.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&self, stream: Stream, text: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
        }
    }
}

/// In-memory console capturing each stream separately.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    stdout: Mutex<String>,
    stderr: Mutex<String>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to stdout so far.
    pub fn stdout(&self) -> String {
        lock(&self.stdout).clone()
    }

    /// Everything written to stderr so far.
    pub fn stderr(&self) -> String {
        lock(&self.stderr).clone()
    }

    pub fn clear(&self) {
        lock(&self.stdout).clear();
        lock(&self.stderr).clear();
    }
}

impl Console for MemoryConsole {
    fn write(&self, stream: Stream, text: &str) -> io::Result<()> {
        let buffer = match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        };
        lock(buffer).push_str(text);
        Ok(())
    }
}

// A panic while holding the lock leaves the captured text intact.
fn lock(buffer: &Mutex<String>) -> MutexGuard<'_, String> {
    buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_writes_to_both_streams_when_reading_then_separated() {
        let console = MemoryConsole::new();
        console.write(Stream::Stdout, "out\n").unwrap();
        console.write(Stream::Stderr, "err\n").unwrap();
        console.write(Stream::Stdout, "more").unwrap();

        assert_eq!(console.stdout(), "out\nmore");
        assert_eq!(console.stderr(), "err\n");

        console.clear();
        assert!(console.stdout().is_empty());
        assert!(console.stderr().is_empty());
    }
}
