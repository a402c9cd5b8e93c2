//! # Denpyo - Receipt and Order Slip Composer
//!
//! Denpyo turns a register's print request into the exact character stream
//! a 58mm/80mm thermal printer should receive. It provides:
//!
//! - **Money arithmetic**: rounding policies, card-fee totals, revenue stamps
//! - **Layout**: centering, justification and yen formatting at a fixed width
//! - **Composers**: tax invoice (領収書), order slip (会計伝票), plain text
//! - **Output sinks**: an injected boundary for the physical printer
//!
//! ## Quick Start
//!
//! ```
//! use denpyo::{adapter, json_api::PrintRequest, printer::PrinterConfig, transport::MemorySink};
//!
//! let request = PrintRequest::from_json(r#"{
//!     "kind": "receipt",
//!     "storeName": "Club Luna",
//!     "subtotal": 40000,
//!     "serviceTax": 8000,
//!     "consumptionTax": 4800,
//!     "roundedTotal": 52000,
//!     "orderItems": [{"name": "シャンパン", "price": 40000}]
//! }"#)?;
//!
//! let mut sink = MemorySink::new();
//! adapter::print(&request, &PrinterConfig::MP_B20, &mut sink)?;
//! assert!(sink.text().contains("領 収 書"));
//! # Ok::<(), denpyo::error::DenpyoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`money`] | Rounding, card fees, revenue stamps |
//! | [`layout`] | Fixed-width text layout |
//! | [`model`] | Order, totals and payment types |
//! | [`compose`] | Document composers |
//! | [`document`] | Composed document types |
//! | [`json_api`] | Request schemas and conversion |
//! | [`adapter`] | Compose and deliver a request |
//! | [`transport`] | Output sinks |
//! | [`printer`] | Printer profiles |
//! | [`server`] | HTTP endpoints |
//! | [`error`] | Error types |
//!
//! Composition is deterministic: the same request always produces a
//! byte-identical document. Nothing is cached between requests.

pub mod adapter;
pub mod compose;
pub mod document;
pub mod error;
pub mod json_api;
pub mod layout;
pub mod model;
pub mod money;
pub mod printer;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use document::ComposedDocument;
pub use error::{DenpyoError, Diagnostic, ErrorKind};
pub use printer::PrinterConfig;
pub use transport::{DeviceSink, MemorySink, OutputSink};
