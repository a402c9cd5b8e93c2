//! # Print Request Adapter
//!
//! The boundary between a request and the printer:
//!
//! ```text
//! PrintRequest ──► convert ──► compose ──► ComposedDocument ──► OutputSink
//!                    │                                          send, then cut
//!                    └──► Vec<Diagnostic> (skipped items)
//! ```
//!
//! Delivery is at-most-once. The adapter calls [`OutputSink::send`] with the
//! whole text, then [`OutputSink::cut`] with the directive. A failed `send`
//! means `cut` is never attempted, and nothing is retried here.
//!
//! ## Example
//!
//! ```
//! use denpyo::adapter;
//! use denpyo::json_api::{PrintRequest, TextRequest};
//! use denpyo::printer::PrinterConfig;
//! use denpyo::transport::MemorySink;
//!
//! let request = PrintRequest::Text(TextRequest::new("テスト印刷"));
//! let mut sink = MemorySink::new();
//! let report = adapter::print(&request, &PrinterConfig::MP_B20, &mut sink)?;
//! assert!(report.diagnostics.is_empty());
//! assert!(sink.text().starts_with("テスト印刷\n"));
//! # Ok::<(), denpyo::error::DenpyoError>(())
//! ```

use serde::Serialize;
use tracing::{debug, error, info};

use crate::compose;
use crate::document::{ComposedDocument, DocumentKind};
use crate::error::{Diagnostic, Result};
use crate::json_api::PrintRequest;
use crate::layout::Layout;
use crate::printer::PrinterConfig;
use crate::transport::OutputSink;

/// A composed document plus the order items that were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub document: ComposedDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintReport {
    pub kind: DocumentKind,
    pub lines: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validate, convert and compose a request for the given printer.
///
/// Fails with `Validation` or `Configuration` before any composition
/// happens. Malformed order items are not errors; they come back as
/// diagnostics.
pub fn compose_request(request: &PrintRequest, config: &PrinterConfig) -> Result<Composition> {
    let converted = request.to_input()?;
    let layout = Layout::for_printer(config);
    let document = compose::compose(&converted.input, &layout)?;
    debug!(
        kind = document.kind().label(),
        lines = document.lines().len(),
        width = document.width(),
        skipped = converted.diagnostics.len(),
        "request composed"
    );
    Ok(Composition {
        document,
        diagnostics: converted.diagnostics,
    })
}

/// Hand a finished document to a sink: text first, then the cut.
pub fn deliver<S: OutputSink>(document: &ComposedDocument, sink: &mut S) -> Result<()> {
    let text = document.text();
    debug!(bytes = text.len(), "sending document");

    if let Err(e) = sink.send(&text) {
        error!(error = %e, kind = document.kind().label(), "send failed, cut skipped");
        return Err(e);
    }
    if let Err(e) = sink.cut(document.cut()) {
        error!(error = %e, kind = document.kind().label(), "cut failed");
        return Err(e);
    }
    Ok(())
}

/// Compose a request and deliver it exactly once.
pub fn print<S: OutputSink>(
    request: &PrintRequest,
    config: &PrinterConfig,
    sink: &mut S,
) -> Result<PrintReport> {
    let Composition {
        document,
        diagnostics,
    } = compose_request(request, config)?;

    deliver(&document, sink)?;

    info!(
        kind = document.kind().label(),
        printer = config.id,
        lines = document.lines().len(),
        skipped = diagnostics.len(),
        "printed"
    );
    Ok(PrintReport {
        kind: document.kind(),
        lines: document.lines().len(),
        diagnostics,
    })
}
