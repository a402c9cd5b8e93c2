//! The shared section pipeline for invoices and order slips.
//!
//! Sections run in a fixed order, each behind its own predicate:
//!
//! | # | Section | Printed when |
//! |---|---------|--------------|
//! | 1 | title | always |
//! | 2 | revenue stamp | invoice with a stamp tier for the total |
//! | 3 | issue info | always (slip: table, guest, cast, elapsed) |
//! | 4 | addressee | invoice |
//! | 5 | amount banner + proviso | invoice |
//! | 6 | items | always |
//! | 7 | subtotal / service / tax | always |
//! | 8 | rounding adjustment | adjustment is non-zero |
//! | 9 | total | slip |
//! | 10 | acknowledgement | invoice |
//! | 11 | payment breakdown | card or other payment present |
//! | 12 | card-fee alternatives | card fee rate > 0 |
//! | 13 | store footer | some store field is set |
//! | 14 | trailing identifiers | always |
//! | 15 | feed + cut | always |

use tracing::debug;

use super::{FEED_LINES, Variant};
use crate::document::{ComposedDocument, CutDirective, DocumentBuilder, Emphasis, Line};
use crate::error::Result;
use crate::layout::{Layout, Rule, pad_end};
use crate::model::{Order, OrderItem};
use crate::money::{compute_card_amount, determine_revenue_stamp};

/// Addressee placeholder width, leaving room to write a name by hand.
const ADDRESSEE_BLANK: usize = 20;

/// Columns inside the stamp box.
const STAMP_INNER: usize = 9;

/// Compose an order-based document in one pass.
pub fn compose(variant: Variant<'_>, order: &Order, layout: &Layout) -> Result<ComposedDocument> {
    order.totals.validate()?;

    let mut doc = DocumentBuilder::new(variant.kind(), layout.width());

    title(&mut doc, variant, order, layout);
    issue_info(&mut doc, variant, order);
    addressee(&mut doc, variant);
    amount_banner(&mut doc, variant, order, layout);
    items(&mut doc, variant, &order.items, layout);
    breakdown(&mut doc, variant, order, layout)?;
    rounding_adjustment(&mut doc, order, layout);
    total(&mut doc, variant, order, layout);
    acknowledgement(&mut doc, variant);
    payment(&mut doc, order, layout);
    card_alternatives(&mut doc, order, layout)?;
    store_footer(&mut doc, order, layout);
    trailing_identifiers(&mut doc, variant, order);

    for _ in 0..FEED_LINES {
        doc.push(Line::blank());
    }

    debug!(
        kind = variant.kind().label(),
        lines = doc.len(),
        "document composed"
    );
    Ok(doc.finish(CutDirective::partial()))
}

/// Amount with a `-` for negatives (discount lines); positives carry no sign.
fn amount(layout: &Layout, value: i64) -> String {
    if value < 0 {
        layout.signed_currency('-', value)
    } else {
        layout.currency(value)
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

fn title(doc: &mut DocumentBuilder, variant: Variant<'_>, order: &Order, layout: &Layout) {
    let title = layout.center(variant.title()).emphasis(Emphasis::Large);

    match variant {
        Variant::TaxInvoice(options) => {
            doc.push(Line::blank());
            doc.push(title);
            match determine_revenue_stamp(order.totals.rounded_total, &options.stamp) {
                Some(label) => {
                    debug!(stamp = label, "revenue stamp block included");
                    revenue_stamp(doc, label, layout);
                }
                None => doc.push(Line::blank()),
            }
            doc.push(Line::blank());
        }
        Variant::OrderSlip => {
            doc.push(title);
            doc.push(layout.rule(Rule::Section));
        }
    }
}

/// The box the stamp is pasted into, flush right. Rows share one indent.
fn revenue_stamp(doc: &mut DocumentBuilder, label: &str, layout: &Layout) {
    let face = pad_end(&format!("{}円", label), STAMP_INNER);
    let border = "─".repeat(STAMP_INNER);
    let rows = [
        format!("┌{}┐", border),
        format!("│{}│", " ".repeat(STAMP_INNER)),
        "│  収入   │".to_string(),
        "│  印紙   │".to_string(),
        format!("│{}│", face),
        format!("└{}┘", border),
    ];
    doc.extend(layout.right_block(&rows));
}

fn issue_info(doc: &mut DocumentBuilder, variant: Variant<'_>, order: &Order) {
    if variant.is_invoice() {
        if !order.timestamp.is_empty() {
            doc.push(Line::new(&order.timestamp));
            doc.push(Line::blank());
        }
        return;
    }

    let fields = [
        ("卓", &order.table_name),
        ("お客様", &order.guest_name),
        ("担当", &order.cast_name),
        ("滞在", &order.elapsed_time),
        ("日時", &order.timestamp),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            doc.push(Line::new(format!("{}: {}", label, value)));
        }
    }
}

fn addressee(doc: &mut DocumentBuilder, variant: Variant<'_>) {
    let Some(options) = variant.invoice() else {
        return;
    };
    let line = if options.receipt_to.is_empty() {
        format!("{}様", " ".repeat(ADDRESSEE_BLANK))
    } else {
        format!("{} 様", options.receipt_to)
    };
    doc.push(Line::new(line));
    doc.push(Line::blank());
}

fn amount_banner(doc: &mut DocumentBuilder, variant: Variant<'_>, order: &Order, layout: &Layout) {
    let Some(options) = variant.invoice() else {
        return;
    };
    let banner = format!("金額  {}－", layout.currency(order.totals.rounded_total));
    doc.push(layout.rule(Rule::Section));
    doc.push(layout.center(&banner).emphasis(Emphasis::Large));
    doc.push(layout.rule(Rule::Section));
    doc.push(Line::blank());
    doc.push(Line::new(format!("但し {}", options.note)));
    doc.push(Line::blank());
}

fn items(doc: &mut DocumentBuilder, variant: Variant<'_>, items: &[OrderItem], layout: &Layout) {
    if variant.is_invoice() {
        doc.push(Line::new("【内訳】"));
    }
    doc.push(layout.rule(Rule::Items));
    for item in items {
        let name = match &item.cast {
            Some(cast) => format!("{} ({})", item.name, cast),
            None => item.name.clone(),
        };
        doc.push(Line::new(name));
        doc.push(Line::new(format!(
            "  {} × {} = {}",
            item.quantity,
            amount(layout, item.unit_price),
            amount(layout, item.line_total())
        )));
    }
    doc.push(layout.rule(Rule::Items));
}

fn breakdown(
    doc: &mut DocumentBuilder,
    variant: Variant<'_>,
    order: &Order,
    layout: &Layout,
) -> Result<()> {
    let totals = &order.totals;
    doc.push(layout.justify("小計:", &amount(layout, totals.subtotal)));
    doc.push(layout.justify("サービス料:", &amount(layout, totals.service_charge)));
    doc.push(layout.justify("税込金額:", &amount(layout, totals.tax_inclusive()?)));
    if variant.is_invoice() || totals.consumption_tax != 0 {
        let tax = format!("{}）", amount(layout, totals.consumption_tax));
        doc.push(layout.justify("（内消費税等:", &tax));
    }
    Ok(())
}

fn rounding_adjustment(doc: &mut DocumentBuilder, order: &Order, layout: &Layout) {
    let adjustment = order.totals.rounding_adjustment;
    if adjustment == 0 {
        return;
    }
    let sign = if adjustment < 0 { '-' } else { '+' };
    doc.push(layout.justify("端数調整:", &layout.signed_currency(sign, adjustment)));
}

fn total(doc: &mut DocumentBuilder, variant: Variant<'_>, order: &Order, layout: &Layout) {
    if variant.is_invoice() {
        return;
    }
    doc.push(layout.rule(Rule::Items));
    doc.push(
        layout
            .justify("合計:", &layout.currency(order.totals.rounded_total))
            .emphasis(Emphasis::Bold),
    );
}

fn acknowledgement(doc: &mut DocumentBuilder, variant: Variant<'_>) {
    if !variant.is_invoice() {
        return;
    }
    doc.push(Line::blank());
    doc.push(Line::new("上記正に領収いたしました"));
}

fn payment(doc: &mut DocumentBuilder, order: &Order, layout: &Layout) {
    let payment = &order.payment;
    if !payment.has_non_cash() {
        debug!("cash-only payment, breakdown omitted");
        return;
    }

    doc.push(Line::blank());
    doc.push(Line::new("【お支払い方法】"));
    if payment.cash > 0 {
        doc.push(layout.justify("現金:", &layout.currency(payment.cash)));
    }
    if payment.card > 0 {
        doc.push(layout.justify("カード:", &layout.currency(payment.card)));
        if let Some(fee) = order.card_fee.fee_amount.filter(|fee| *fee > 0) {
            doc.push(layout.justify("  うち手数料:", &layout.currency(fee)));
        }
    }
    if payment.other > 0 {
        let label = format!("{}:", payment.other_label());
        doc.push(layout.justify(&label, &layout.currency(payment.other)));
    }
    if payment.change > 0 {
        doc.push(layout.justify("お釣り:", &layout.currency(payment.change)));
    }
}

/// Cash price next to the all-card price, so the guest can choose.
fn card_alternatives(doc: &mut DocumentBuilder, order: &Order, layout: &Layout) -> Result<()> {
    let policy = &order.card_fee;
    if !policy.is_active() {
        return Ok(());
    }

    let base = order.totals.rounded_total;
    let card = compute_card_amount(base, policy.rate_percent, &order.rounding)?;
    debug!(
        base,
        fee = card.fee,
        pre_rounded = card.pre_rounded,
        total = card.total,
        "card-fee alternatives included"
    );

    doc.push(Line::blank());
    doc.push(Line::new("【支払い目安】"));
    doc.push(layout.justify("現金:", &layout.currency(base)));
    let label = format!("カード(+{}%):", policy.rate_percent);
    doc.push(layout.justify(&label, &layout.currency(card.total)));
    Ok(())
}

fn store_footer(doc: &mut DocumentBuilder, order: &Order, layout: &Layout) {
    let store = &order.store;
    if store.is_empty() {
        return;
    }

    doc.push(Line::blank());
    doc.push(layout.rule(Rule::Section));
    if !store.name.is_empty() {
        doc.push(Line::new(&store.name));
    }
    if !store.postal_code.is_empty() {
        doc.push(Line::new(format!("〒{}", store.postal_code)));
    }
    if !store.address.is_empty() {
        doc.push(Line::new(&store.address));
    }
    if !store.phone.is_empty() {
        doc.push(Line::new(format!("TEL: {}", store.phone)));
    }
    if !store.registration_number.is_empty() {
        doc.push(Line::new(format!("登録番号: {}", store.registration_number)));
    }
    doc.push(layout.rule(Rule::Section));
}

fn trailing_identifiers(doc: &mut DocumentBuilder, variant: Variant<'_>, order: &Order) {
    doc.push(Line::blank());
    if variant.is_invoice() || !order.receipt_number.is_empty() {
        doc.push(Line::new(format!("No. {}", order.receipt_number)).emphasis(Emphasis::Reduced));
    }

    let mut ids = format!("(卓: {}", order.table_name);
    if !order.cast_name.is_empty() {
        ids.push_str(&format!(" / 担当: {}", order.cast_name));
    }
    ids.push(')');
    doc.push(Line::new(ids).emphasis(Emphasis::Reduced));
}
