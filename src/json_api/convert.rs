//! Conversion from JSON request types to composer input.
//!
//! Request-level problems are fatal (`Validation`, `Configuration`).
//! Item-level problems are not: a malformed `orderItems` entry is dropped
//! and reported as a [`Diagnostic`], and the rest of the request converts.

use serde_json::Value;
use tracing::warn;

use crate::compose::{ComposeInput, InvoiceOptions};
use crate::compose::invoice::DEFAULT_RECEIPT_NOTE;
use crate::error::{DenpyoError, Diagnostic, Result};
use crate::model::{MonetaryTotals, Order, OrderItem, PaymentBreakdown, StoreProfile};
use crate::money::{CardFeePolicy, RevenueStampPolicy, RoundingPolicy};

use super::schema::*;

/// Composer input plus the items that had to be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub input: ComposeInput,
    pub diagnostics: Vec<Diagnostic>,
}

impl PrintRequest {
    /// Parse a tagged request from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DenpyoError::Validation(format!("request is not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Parse a tagged request. Top-level `null` fields count as absent.
    pub fn from_value(value: Value) -> Result<Self> {
        parse_body(value)
    }

    pub fn to_input(&self) -> Result<Converted> {
        match self {
            PrintRequest::Receipt(r) => r.to_input(),
            PrintRequest::OrderSlip(s) => s.to_input(),
            PrintRequest::Text(t) => t.to_input(),
        }
    }
}

/// Deserialize any request body, treating top-level `null` as absent.
pub fn parse_body<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    let value = match value {
        Value::Object(mut map) => {
            map.retain(|_, v| !v.is_null());
            Value::Object(map)
        }
        other => {
            return Err(DenpyoError::Validation(format!(
                "request must be a JSON object, got {}",
                json_type(&other)
            )));
        }
    };
    serde_json::from_value(value).map_err(|e| DenpyoError::Validation(e.to_string()))
}

impl ReceiptRequest {
    pub fn to_input(&self) -> Result<Converted> {
        let (items, diagnostics) = parse_items(&self.order_items);

        let order = Order {
            items,
            store: StoreProfile {
                name: self.store_name.clone(),
                address: self.store_address.clone(),
                phone: self.store_phone.clone(),
                postal_code: self.store_postal_code.clone(),
                registration_number: self.store_registration_number.clone(),
            },
            totals: MonetaryTotals {
                subtotal: self.subtotal,
                service_charge: self.service_tax,
                consumption_tax: self.consumption_tax,
                rounding_adjustment: self.rounding_adjustment,
                rounded_total: self.rounded_total,
            },
            payment: payment(
                self.payment_cash,
                self.payment_card,
                self.payment_other,
                &self.payment_other_method,
                self.change,
            )?,
            card_fee: card_fee(self.card_fee_rate, self.card_fee)?,
            rounding: RoundingPolicy::from_codes(self.rounding_unit, self.rounding_method)?,
            receipt_number: self.receipt_number.clone(),
            table_name: self.table_name.clone(),
            guest_name: self.guest_name.clone(),
            cast_name: self.cast_name.clone(),
            timestamp: self.timestamp.clone(),
            elapsed_time: String::new(),
        };
        order.totals.validate()?;

        let note = if self.receipt_note.is_empty() {
            DEFAULT_RECEIPT_NOTE.to_string()
        } else {
            self.receipt_note.clone()
        };
        let options = InvoiceOptions {
            receipt_to: self.receipt_to.clone(),
            note,
            stamp: RevenueStampPolicy {
                enabled: self.show_revenue_stamp,
                threshold: self.revenue_stamp_threshold,
            },
        };

        Ok(Converted {
            input: ComposeInput::TaxInvoice(order, options),
            diagnostics,
        })
    }
}

impl OrderSlipRequest {
    pub fn to_input(&self) -> Result<Converted> {
        let (items, diagnostics) = parse_items(&self.order_items);

        let order = Order {
            items,
            store: StoreProfile::default(),
            totals: MonetaryTotals {
                subtotal: self.subtotal,
                service_charge: self.service_tax,
                consumption_tax: self.consumption_tax,
                rounding_adjustment: self.rounding_adjustment,
                rounded_total: self.rounded_total,
            },
            payment: payment(
                self.payment_cash,
                self.payment_card,
                self.payment_other,
                &self.payment_other_method,
                self.change,
            )?,
            card_fee: card_fee(self.card_fee_rate, self.card_fee)?,
            rounding: RoundingPolicy::from_codes(self.rounding_unit, self.rounding_method)?,
            receipt_number: self.receipt_number.clone(),
            table_name: self.table_name.clone(),
            guest_name: self.guest_name.clone(),
            cast_name: self.cast_name.clone(),
            timestamp: self.timestamp.clone(),
            elapsed_time: self.elapsed_time.clone(),
        };
        order.totals.validate()?;

        Ok(Converted {
            input: ComposeInput::OrderSlip(order),
            diagnostics,
        })
    }
}

impl TextRequest {
    pub fn to_input(&self) -> Result<Converted> {
        let text = self
            .text
            .clone()
            .ok_or_else(|| DenpyoError::Validation("text: missing required field".into()))?;
        Ok(Converted {
            input: ComposeInput::PlainText(text),
            diagnostics: Vec::new(),
        })
    }
}

fn payment(cash: i64, card: i64, other: i64, method: &str, change: i64) -> Result<PaymentBreakdown> {
    for (field, value) in [
        ("paymentCash", cash),
        ("paymentCard", card),
        ("paymentOther", other),
        ("change", change),
    ] {
        if value < 0 {
            return Err(DenpyoError::Validation(format!(
                "{} must not be negative, got {}",
                field, value
            )));
        }
    }
    Ok(PaymentBreakdown {
        cash,
        card,
        other,
        other_method_label: method.to_string(),
        change,
    })
}

fn card_fee(rate: i64, fee: i64) -> Result<CardFeePolicy> {
    if rate < 0 {
        return Err(DenpyoError::Configuration(format!(
            "cardFeeRate must not be negative, got {}",
            rate
        )));
    }
    let policy = CardFeePolicy::new(rate);
    Ok(if fee > 0 { policy.with_fee(fee) } else { policy })
}

// ============ Order Items ============

/// Parse `orderItems`, keeping every well-formed entry.
///
/// Absent or `null` means no items. Any other non-array value yields no
/// items and a single diagnostic.
pub fn parse_items(value: &Value) -> (Vec<OrderItem>, Vec<Diagnostic>) {
    let entries = match value {
        Value::Null => return (Vec::new(), Vec::new()),
        Value::Array(entries) => entries,
        other => {
            let diagnostic = Diagnostic::new(
                0,
                format!("orderItems: expected array, got {}", json_type(other)),
            );
            warn!(%diagnostic, "order items unreadable");
            return (Vec::new(), vec![diagnostic]);
        }
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut diagnostics = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match parse_item(entry) {
            Ok(item) => items.push(item),
            Err(reason) => {
                let diagnostic = Diagnostic::new(index, reason);
                warn!(%diagnostic, "order item skipped");
                diagnostics.push(diagnostic);
            }
        }
    }
    (items, diagnostics)
}

fn parse_item(value: &Value) -> std::result::Result<OrderItem, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("expected object, got {}", json_type(value)))?;

    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => return Err("missing required field 'name'".into()),
        Some(other) => return Err(format!("name: expected string, got {}", json_type(other))),
    };

    let unit_price = match obj.get("price") {
        None | Some(Value::Null) => return Err("missing required field 'price'".into()),
        Some(v) => integer(v).ok_or_else(|| format!("price: expected integer, got {}", v))?,
    };

    let quantity = match obj.get("quantity") {
        None | Some(Value::Null) => 1,
        Some(v) => integer(v).ok_or_else(|| format!("quantity: expected integer, got {}", v))?,
    };
    if quantity < 0 {
        return Err(format!("quantity must not be negative, got {}", quantity));
    }
    if quantity.checked_mul(unit_price).is_none() {
        return Err(format!("{} × {} overflows", quantity, unit_price));
    }

    let cast = match obj.get("cast") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(format!("cast: expected string, got {}", json_type(other))),
    };

    Ok(OrderItem {
        name,
        cast,
        quantity,
        unit_price,
    })
}

/// Integer value of a JSON number. Integral floats (`1500.0`) are accepted.
fn integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_items_skips_malformed() {
        let value = json!([
            {"name": "ビール", "quantity": 2, "price": 900},
            {"name": "焼酎", "quantity": "two", "price": 700},
            {"name": "ウーロン茶", "price": 500, "cast": "ゆき"},
        ]);
        let (items, diagnostics) = parse_items(&value);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].cast.as_deref(), Some("ゆき"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].index, 1);
        assert!(diagnostics[0].reason.starts_with("quantity"));
    }

    #[test]
    fn test_item_errors() {
        let cases = [
            (json!("ビール"), "expected object"),
            (json!({"price": 100}), "missing required field 'name'"),
            (json!({"name": "x"}), "missing required field 'price'"),
            (json!({"name": "x", "price": null}), "missing required field 'price'"),
            (json!({"name": 5, "price": 100}), "name: expected string"),
            (json!({"name": "x", "price": 1.5}), "price: expected integer"),
            (json!({"name": "x", "price": 100, "quantity": -1}), "must not be negative"),
            (json!({"name": "x", "price": 100, "cast": 3}), "cast: expected string"),
        ];
        for (value, expected) in cases {
            let err = parse_item(&value).unwrap_err();
            assert!(err.contains(expected), "{} -> {}", value, err);
        }
    }

    #[test]
    fn test_item_accepts_integral_float_and_null_cast() {
        let item = parse_item(&json!({"name": "x", "price": 1500.0, "quantity": 2, "cast": null}))
            .unwrap();
        assert_eq!(item.unit_price, 1_500);
        assert_eq!(item.line_total(), 3_000);
        assert_eq!(item.cast, None);
    }

    #[test]
    fn test_non_array_items() {
        let (items, diagnostics) = parse_items(&json!("oops"));
        assert!(items.is_empty());
        assert_eq!(diagnostics.len(), 1);
        let (items, diagnostics) = parse_items(&Value::Null);
        assert!(items.is_empty() && diagnostics.is_empty());
    }

    #[test]
    fn test_text_required() {
        let err = TextRequest::default().to_input().unwrap_err();
        assert!(matches!(err, DenpyoError::Validation(_)));
        let ok = TextRequest::new("").to_input().unwrap();
        assert_eq!(ok.input, ComposeInput::PlainText(String::new()));
    }

    #[test]
    fn test_unknown_rounding_method() {
        let req = OrderSlipRequest {
            rounding_unit: 100,
            rounding_method: 9,
            ..Default::default()
        };
        assert!(matches!(
            req.to_input().unwrap_err(),
            DenpyoError::Configuration(_)
        ));
    }

    #[test]
    fn test_negative_values() {
        let req = ReceiptRequest {
            payment_cash: -1,
            ..Default::default()
        };
        assert!(matches!(req.to_input().unwrap_err(), DenpyoError::Validation(_)));

        let req = ReceiptRequest {
            card_fee_rate: -5,
            ..Default::default()
        };
        assert!(matches!(
            req.to_input().unwrap_err(),
            DenpyoError::Configuration(_)
        ));

        let req = ReceiptRequest {
            rounded_total: -100,
            ..Default::default()
        };
        assert!(matches!(req.to_input().unwrap_err(), DenpyoError::Validation(_)));
    }

    #[test]
    fn test_empty_note_defaults() {
        let req = ReceiptRequest {
            receipt_note: String::new(),
            ..Default::default()
        };
        match req.to_input().unwrap().input {
            ComposeInput::TaxInvoice(_, options) => assert_eq!(options.note, "お品代として"),
            other => panic!("unexpected input {:?}", other),
        }
    }

    #[test]
    fn test_from_json_nulls_are_absent() {
        let req = PrintRequest::from_json(
            r#"{"kind": "receipt", "storeName": null, "receiptNote": null, "roundedTotal": 1000}"#,
        )
        .unwrap();
        match req {
            PrintRequest::Receipt(r) => {
                assert_eq!(r.store_name, "");
                assert_eq!(r.receipt_note, "お品代として");
                assert_eq!(r.rounded_total, 1_000);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_from_json_errors_are_validation() {
        for json in ["not json", "[1, 2]", r#"{"kind": "fax"}"#, r#"{"kind": "receipt", "subtotal": "abc"}"#] {
            let err = PrintRequest::from_json(json).unwrap_err();
            assert!(matches!(err, DenpyoError::Validation(_)), "{}", json);
        }
    }
}
