//! # Writer Sink
//!
//! Sends document text as UTF-8 followed by an ESC/POS cut command.
//!
//! ## Chunked Writes
//!
//! Large documents are written in chunks with a small delay between them,
//! so a Bluetooth SPP link does not overflow the printer's receive buffer.
//! The default chunk size is 4096 bytes.
//!
//! ## Device Setup (Linux)
//!
//! The printer must already be paired and bound to an RFCOMM device:
//!
//! ```bash
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # This creates /dev/rfcomm0
//! ```

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::OutputSink;
use crate::document::CutDirective;
use crate::error::{DenpyoError, Result};

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// ESC/POS `GS V m`: 0 = full cut, 1 = partial cut.
fn cut_command(cut: CutDirective) -> [u8; 3] {
    [0x1D, b'V', if cut.partial { 0x01 } else { 0x00 }]
}

/// # Writer Sink
///
/// ## Example
///
/// ```
/// use denpyo::document::CutDirective;
/// use denpyo::transport::{OutputSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.send("hello\n")?;
/// sink.cut(CutDirective::partial())?;
/// assert_eq!(sink.into_inner(), b"hello\n\x1dV\x01");
/// # Ok::<(), denpyo::error::DenpyoError>(())
/// ```
pub struct WriterSink<W: Write> {
    writer: W,
    chunk_size: usize,
    chunk_delay: Duration,
}

/// A sink writing to a printer device file.
pub type DeviceSink = WriterSink<File>;

impl<W: Write> WriterSink<W> {
    /// Wrap a writer. No chunk delay is applied.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::ZERO,
        }
    }

    /// Set the chunk size for large writes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        if data.len() <= self.chunk_size {
            self.writer
                .write_all(data)
                .map_err(|e| DenpyoError::Output(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.writer
                    .write_all(chunk)
                    .map_err(|e| DenpyoError::Output(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.writer
            .flush()
            .map_err(|e| DenpyoError::Output(format!("Flush failed: {}", e)))
    }
}

impl WriterSink<File> {
    /// Open a printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns `Output` if the device doesn't exist or permission is denied
    /// (may need the dialout group).
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self> {
        let path = device.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DenpyoError::Validation("device path is empty".into()));
        }

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            DenpyoError::Output(format!("Failed to open {}: {}", path.display(), e))
        })?;
        debug!(device = %path.display(), "printer device opened");

        let mut sink = Self::new(file);
        sink.set_chunk_delay(Duration::from_millis(CHUNK_DELAY_MS));
        Ok(sink)
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn send(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    fn cut(&mut self, cut: CutDirective) -> Result<()> {
        self.write_bytes(&cut_command(cut))
    }
}
