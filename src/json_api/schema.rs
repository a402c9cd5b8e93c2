//! JSON schema types for print requests.
//!
//! Field names are camelCase, matching what the register sends. Every field
//! except `text` on a [`TextRequest`] is optional and falls back to the
//! default documented on the field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compose::invoice::DEFAULT_RECEIPT_NOTE;
use crate::money::stamp::DEFAULT_STAMP_THRESHOLD;

/// Any print request, tagged by `kind`.
///
/// ```json
/// {"kind": "text", "text": "テスト印刷"}
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PrintRequest {
    Receipt(ReceiptRequest),
    OrderSlip(OrderSlipRequest),
    Text(TextRequest),
}

/// Tax invoice / receipt (領収書).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,
    pub store_postal_code: String,
    pub store_registration_number: String,
    pub receipt_number: String,
    pub table_name: String,
    pub guest_name: String,
    pub cast_name: String,
    pub timestamp: String,
    /// Addressee (宛名).
    pub receipt_to: String,
    /// Proviso (但し書き). Default "お品代として".
    pub receipt_note: String,
    pub subtotal: i64,
    pub service_tax: i64,
    pub consumption_tax: i64,
    pub rounding_adjustment: i64,
    pub rounded_total: i64,
    /// Rounding applied to the card-equivalent total. Default 1 (none).
    pub rounding_unit: i64,
    /// 0 = up, 1 = down, 2 = half-up. Default 0.
    pub rounding_method: i64,
    pub card_fee_rate: i64,
    pub card_fee: i64,
    pub payment_cash: i64,
    pub payment_card: i64,
    pub payment_other: i64,
    pub payment_other_method: String,
    pub change: i64,
    /// Default true.
    pub show_revenue_stamp: bool,
    /// Default 50000.
    pub revenue_stamp_threshold: i64,
    /// Array of `{name, cast?, quantity?, price}`. Entries are parsed one by one.
    pub order_items: Value,
}

impl Default for ReceiptRequest {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            store_address: String::new(),
            store_phone: String::new(),
            store_postal_code: String::new(),
            store_registration_number: String::new(),
            receipt_number: String::new(),
            table_name: String::new(),
            guest_name: String::new(),
            cast_name: String::new(),
            timestamp: String::new(),
            receipt_to: String::new(),
            receipt_note: DEFAULT_RECEIPT_NOTE.to_string(),
            subtotal: 0,
            service_tax: 0,
            consumption_tax: 0,
            rounding_adjustment: 0,
            rounded_total: 0,
            rounding_unit: 1,
            rounding_method: 0,
            card_fee_rate: 0,
            card_fee: 0,
            payment_cash: 0,
            payment_card: 0,
            payment_other: 0,
            payment_other_method: String::new(),
            change: 0,
            show_revenue_stamp: true,
            revenue_stamp_threshold: DEFAULT_STAMP_THRESHOLD,
            order_items: Value::Null,
        }
    }
}

/// Order slip (会計伝票).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderSlipRequest {
    pub table_name: String,
    pub guest_name: String,
    pub cast_name: String,
    pub elapsed_time: String,
    pub timestamp: String,
    pub receipt_number: String,
    pub subtotal: i64,
    pub service_tax: i64,
    pub consumption_tax: i64,
    pub rounded_total: i64,
    pub rounding_adjustment: i64,
    pub card_fee_rate: i64,
    pub card_fee: i64,
    /// Default 1 (none).
    pub rounding_unit: i64,
    /// 0 = up, 1 = down, 2 = half-up. Default 0.
    pub rounding_method: i64,
    pub payment_cash: i64,
    pub payment_card: i64,
    pub payment_other: i64,
    pub payment_other_method: String,
    pub change: i64,
    pub order_items: Value,
}

impl Default for OrderSlipRequest {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            guest_name: String::new(),
            cast_name: String::new(),
            elapsed_time: String::new(),
            timestamp: String::new(),
            receipt_number: String::new(),
            subtotal: 0,
            service_tax: 0,
            consumption_tax: 0,
            rounded_total: 0,
            rounding_adjustment: 0,
            card_fee_rate: 0,
            card_fee: 0,
            rounding_unit: 1,
            rounding_method: 0,
            payment_cash: 0,
            payment_card: 0,
            payment_other: 0,
            payment_other_method: String::new(),
            change: 0,
            order_items: Value::Null,
        }
    }
}

/// Plain text. `text` is required.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}
