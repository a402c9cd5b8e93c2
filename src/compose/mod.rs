//! # Document Composers
//!
//! One composer per [`DocumentKind`]. The two order-based kinds share the
//! section pipeline in [`sections`] and differ only by their [`Variant`]:
//!
//! ```text
//!            ┌──────────────┐
//!  Order ───►│ Variant      │──► sections::compose ──► ComposedDocument
//!            │ TaxInvoice   │        (single pass, 15 sections,
//!            │ OrderSlip    │         each behind a predicate)
//!            └──────────────┘
//!  text ────► plain::compose ────────────────────────► ComposedDocument
//! ```
//!
//! Composition is pure: the same input always produces an identical
//! document, and nothing is retained between calls.
//!
//! ## Example
//!
//! ```
//! use denpyo::compose::{self, ComposeInput};
//! use denpyo::layout::Layout;
//! use denpyo::model::{Order, OrderItem};
//!
//! let mut order = Order::default();
//! order.items.push(OrderItem::new("ハウスボトル", 1, 8_000));
//! order.totals.subtotal = 8_000;
//! order.totals.rounded_total = 8_000;
//!
//! let doc = compose::compose(&ComposeInput::OrderSlip(order), &Layout::new(32)).unwrap();
//! assert!(doc.contains("ハウスボトル"));
//! ```

pub mod invoice;
pub mod plain;
pub mod sections;
pub mod slip;

pub use invoice::InvoiceOptions;

use crate::document::{ComposedDocument, DocumentKind};
use crate::error::Result;
use crate::layout::Layout;
use crate::model::Order;

/// Blank lines fed between the last printed line and the cut.
pub const FEED_LINES: usize = 2;

/// The order-based document variants and their variant-specific inputs.
#[derive(Debug, Clone, Copy)]
pub enum Variant<'a> {
    TaxInvoice(&'a InvoiceOptions),
    OrderSlip,
}

impl Variant<'_> {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Variant::TaxInvoice(_) => DocumentKind::TaxInvoice,
            Variant::OrderSlip => DocumentKind::OrderSlip,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Variant::TaxInvoice(_) => "領 収 書",
            Variant::OrderSlip => "会計伝票",
        }
    }

    /// Invoice-only inputs; `None` for slips.
    pub fn invoice(&self) -> Option<&InvoiceOptions> {
        match self {
            Variant::TaxInvoice(options) => Some(options),
            Variant::OrderSlip => None,
        }
    }

    pub fn is_invoice(&self) -> bool {
        self.invoice().is_some()
    }
}

/// A fully converted request, ready to compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeInput {
    TaxInvoice(Order, InvoiceOptions),
    OrderSlip(Order),
    PlainText(String),
}

impl ComposeInput {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ComposeInput::TaxInvoice(..) => DocumentKind::TaxInvoice,
            ComposeInput::OrderSlip(_) => DocumentKind::OrderSlip,
            ComposeInput::PlainText(_) => DocumentKind::PlainText,
        }
    }
}

/// Dispatch to the composer for the input's kind.
pub fn compose(input: &ComposeInput, layout: &Layout) -> Result<ComposedDocument> {
    match input {
        ComposeInput::TaxInvoice(order, options) => invoice::compose(order, options, layout),
        ComposeInput::OrderSlip(order) => slip::compose(order, layout),
        ComposeInput::PlainText(text) => Ok(plain::compose(text, layout)),
    }
}
