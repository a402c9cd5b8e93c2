//! # JSON API
//!
//! Deserialize print requests from the register and convert them into
//! composer input.
//!
//! ## Example
//!
//! ```
//! use denpyo::json_api::PrintRequest;
//!
//! let json = r#"{
//!     "kind": "receipt",
//!     "roundedTotal": 52000,
//!     "orderItems": [
//!         {"name": "シャンパン", "quantity": 1, "price": 52000},
//!         {"name": "broken"}
//!     ]
//! }"#;
//!
//! let request = PrintRequest::from_json(json).unwrap();
//! let converted = request.to_input().unwrap();
//! assert_eq!(converted.diagnostics.len(), 1);
//! ```

pub mod convert;
mod schema;

pub use convert::{Converted, parse_body, parse_items};
pub use schema::{OrderSlipRequest, PrintRequest, ReceiptRequest, TextRequest};
