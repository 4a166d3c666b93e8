//! Console sink abstraction
//!
//! The listener's only side effect is writing echoed uploads to a console.
//! Putting that behind a trait lets tests capture the output instead of
//! asserting on process stdout.

use std::io::{self, Write};

/// Destination for the echoed upload output.
pub trait ConsoleSink: Send + Sync {
    /// Write a full line, followed by a newline.
    fn line(&self, line: &str) -> io::Result<()>;

    /// Write raw bytes, appending a newline unless the bytes already end
    /// with one.
    fn raw(&self, bytes: &[u8]) -> io::Result<()>;
}

/// Production sink: the process's stdout.
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")
    }

    fn raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(bytes)?;
        if !bytes.ends_with(b"\n") {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
