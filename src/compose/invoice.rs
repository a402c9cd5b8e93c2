//! Tax invoice / receipt (領収書).

use serde::Serialize;

use super::{Variant, sections};
use crate::document::ComposedDocument;
use crate::error::Result;
use crate::layout::Layout;
use crate::model::Order;
use crate::money::RevenueStampPolicy;

/// Proviso printed after 但し when the register sends none.
pub const DEFAULT_RECEIPT_NOTE: &str = "お品代として";

/// Inputs only the invoice prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceOptions {
    /// Addressee (宛名). Empty prints a blank line to fill in by hand.
    pub receipt_to: String,
    /// Proviso (但し書き).
    pub note: String,
    pub stamp: RevenueStampPolicy,
}

impl Default for InvoiceOptions {
    fn default() -> Self {
        Self {
            receipt_to: String::new(),
            note: DEFAULT_RECEIPT_NOTE.to_string(),
            stamp: RevenueStampPolicy::default(),
        }
    }
}

pub fn compose(order: &Order, options: &InvoiceOptions, layout: &Layout) -> Result<ComposedDocument> {
    sections::compose(Variant::TaxInvoice(options), order, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Emphasis;
    use crate::model::{OrderItem, PaymentBreakdown, StoreProfile};

    fn order(total: i64) -> Order {
        let mut order = Order::default();
        order.items.push(OrderItem::new("シャンパン", 1, total));
        order.totals.subtotal = total;
        order.totals.rounded_total = total;
        order.receipt_number = "R-0001".into();
        order.table_name = "A3".into();
        order
    }

    #[test]
    fn test_stamp_block_above_threshold() {
        let doc = compose(&order(52_000), &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(doc.contains("収入"));
        assert!(doc.contains("200円"));
    }

    #[test]
    fn test_no_stamp_block_below_threshold() {
        let doc = compose(&order(49_999), &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(!doc.contains("収入"));
        assert!(!doc.contains("印紙"));
    }

    #[test]
    fn test_stamp_disabled() {
        let options = InvoiceOptions {
            stamp: RevenueStampPolicy {
                enabled: false,
                threshold: 50_000,
            },
            ..Default::default()
        };
        let doc = compose(&order(2_000_000), &options, &Layout::new(32)).unwrap();
        assert!(!doc.contains("印紙"));
    }

    #[test]
    fn test_addressee_placeholder() {
        let doc = compose(&order(1_000), &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(doc.lines().iter().any(|l| l.text == format!("{}様", " ".repeat(20))));

        let options = InvoiceOptions {
            receipt_to: "山田".into(),
            ..Default::default()
        };
        let doc = compose(&order(1_000), &options, &Layout::new(32)).unwrap();
        assert!(doc.lines().iter().any(|l| l.text == "山田 様"));
    }

    #[test]
    fn test_note_and_banner() {
        let doc = compose(&order(12_000), &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(doc.lines().iter().any(|l| l.text == "但し お品代として"));
        let banner = doc
            .lines()
            .iter()
            .find(|l| l.text.contains("金額"))
            .unwrap();
        assert_eq!(banner.text.trim(), "金額  ¥12,000－");
        assert_eq!(banner.emphasis, Some(Emphasis::Large));
    }

    #[test]
    fn test_cash_only_omits_payment_section() {
        let mut o = order(10_000);
        o.payment = PaymentBreakdown {
            cash: 10_000,
            ..Default::default()
        };
        let doc = compose(&o, &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(!doc.contains("【お支払い方法】"));

        o.payment.card = 5_000;
        let doc = compose(&o, &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(doc.contains("【お支払い方法】"));
    }

    #[test]
    fn test_footer_lines_conditional() {
        let mut o = order(10_000);
        o.store = StoreProfile {
            name: "Club Luna".into(),
            phone: "03-1234-5678".into(),
            ..Default::default()
        };
        let doc = compose(&o, &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        assert!(doc.contains("TEL: 03-1234-5678"));
        assert!(!doc.contains("〒"));
        assert!(!doc.contains("登録番号"));
    }

    #[test]
    fn test_trailing_identifiers_reduced() {
        let doc = compose(&order(10_000), &InvoiceOptions::default(), &Layout::new(32)).unwrap();
        let number = doc.lines().iter().find(|l| l.text == "No. R-0001").unwrap();
        assert_eq!(number.emphasis, Some(Emphasis::Reduced));
        assert!(doc.lines().iter().any(|l| l.text == "(卓: A3)"));
    }
}
