//! # Output Sinks
//!
//! The boundary between composition and the printer. A sink receives the
//! full document text, then the cut directive, exactly once per request.
//!
//! ## Available Sinks
//!
//! - [`MemorySink`]: records what it was given (previews, tests)
//! - [`WriterSink`]: writes UTF-8 text and an ESC/POS cut to any [`std::io::Write`]
//! - [`DeviceSink`]: a `WriterSink` over a printer device file (e.g. `/dev/rfcomm0`)
//!
//! Pairing, connection management and code pages belong to whatever sits
//! behind the sink, not to this crate.

pub mod writer;

pub use writer::{DEFAULT_DEVICE, DeviceSink, WriterSink};

use crate::document::CutDirective;
use crate::error::{DenpyoError, Result};

/// Something that can deliver a composed document to a printer.
pub trait OutputSink {
    /// Deliver the document text.
    fn send(&mut self, text: &str) -> Result<()>;

    /// Cut the paper. Called after `send` succeeds.
    fn cut(&mut self, cut: CutDirective) -> Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn send(&mut self, text: &str) -> Result<()> {
        (**self).send(text)
    }

    fn cut(&mut self, cut: CutDirective) -> Result<()> {
        (**self).cut(cut)
    }
}

/// One call made against a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Send(String),
    Cut(CutDirective),
}

/// Records calls in order. Can be told to fail, for exercising error paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub calls: Vec<SinkCall>,
    fail_send: Option<String>,
    fail_cut: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `send` fail with `message`.
    pub fn failing_send(message: impl Into<String>) -> Self {
        Self {
            fail_send: Some(message.into()),
            ..Self::default()
        }
    }

    /// Make every `cut` fail with `message`.
    pub fn failing_cut(message: impl Into<String>) -> Self {
        Self {
            fail_cut: Some(message.into()),
            ..Self::default()
        }
    }

    /// All text sent so far, concatenated.
    pub fn text(&self) -> String {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Send(text) => Some(text.as_str()),
                SinkCall::Cut(_) => None,
            })
            .collect()
    }
}

impl OutputSink for MemorySink {
    fn send(&mut self, text: &str) -> Result<()> {
        if let Some(message) = &self.fail_send {
            return Err(DenpyoError::Output(message.clone()));
        }
        self.calls.push(SinkCall::Send(text.to_string()));
        Ok(())
    }

    fn cut(&mut self, cut: CutDirective) -> Result<()> {
        if let Some(message) = &self.fail_cut {
            return Err(DenpyoError::Output(message.clone()));
        }
        self.calls.push(SinkCall::Cut(cut));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.send("a\n").unwrap();
        sink.cut(CutDirective::partial()).unwrap();
        assert_eq!(
            sink.calls,
            vec![
                SinkCall::Send("a\n".into()),
                SinkCall::Cut(CutDirective::partial())
            ]
        );
        assert_eq!(sink.text(), "a\n");
    }

    #[test]
    fn test_memory_sink_failures() {
        let mut sink = MemorySink::failing_send("disconnected");
        let err = sink.send("x").unwrap_err();
        assert_eq!(err.to_string(), "Output error: disconnected");
        assert!(sink.calls.is_empty());

        let mut sink = MemorySink::failing_cut("cutter jammed");
        sink.send("x").unwrap();
        assert!(sink.cut(CutDirective::full()).is_err());
    }
}
