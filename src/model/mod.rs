//! # Composer Input Model
//!
//! Plain data built fresh for each print request by
//! [`json_api`](crate::json_api) and dropped once the document is delivered.

use serde::Serialize;

use crate::error::{DenpyoError, Result};
use crate::money::{CardFeePolicy, RoundingPolicy};

/// Label printed for `other` payments when the register sent none.
pub const DEFAULT_OTHER_METHOD: &str = "その他";

/// One ordered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub name: String,
    /// Cast member credited with the item, printed in parentheses.
    pub cast: Option<String>,
    pub quantity: i64,
    pub unit_price: i64,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: i64) -> Self {
        Self {
            name: name.into(),
            cast: None,
            quantity,
            unit_price,
        }
    }

    pub fn cast(mut self, cast: impl Into<String>) -> Self {
        let cast = cast.into();
        self.cast = (!cast.is_empty()).then_some(cast);
        self
    }

    pub fn line_total(&self) -> i64 {
        self.quantity * self.unit_price
    }
}

/// Issuer details for the footer. Empty fields are not printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub postal_code: String,
    /// Qualified invoice issuer number (登録番号).
    pub registration_number: String,
}

impl StoreProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.address.is_empty()
            && self.phone.is_empty()
            && self.postal_code.is_empty()
            && self.registration_number.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentBreakdown {
    pub cash: i64,
    pub card: i64,
    pub other: i64,
    pub other_method_label: String,
    pub change: i64,
}

impl PaymentBreakdown {
    /// Cash-only payments print no breakdown.
    pub fn has_non_cash(&self) -> bool {
        self.card > 0 || self.other > 0
    }

    pub fn other_label(&self) -> &str {
        if self.other_method_label.is_empty() {
            DEFAULT_OTHER_METHOD
        } else {
            &self.other_method_label
        }
    }
}

/// Amounts as computed by the register. The composer prints them as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonetaryTotals {
    pub subtotal: i64,
    pub service_charge: i64,
    pub consumption_tax: i64,
    pub rounding_adjustment: i64,
    pub rounded_total: i64,
}

impl MonetaryTotals {
    /// Tax-inclusive amount (税込金額) before rounding.
    pub fn tax_inclusive(&self) -> Result<i64> {
        self.subtotal
            .checked_add(self.service_charge)
            .and_then(|sum| sum.checked_add(self.consumption_tax))
            .ok_or_else(|| {
                DenpyoError::Validation(format!(
                    "tax-inclusive amount out of range (subtotal {}, serviceTax {}, consumptionTax {})",
                    self.subtotal, self.service_charge, self.consumption_tax
                ))
            })
    }

    /// The engine prints the register's figures as given; it only checks
    /// that the total is not negative and that the printed sum fits.
    pub fn validate(&self) -> Result<()> {
        if self.rounded_total < 0 {
            return Err(DenpyoError::Validation(format!(
                "roundedTotal must not be negative, got {}",
                self.rounded_total
            )));
        }
        self.tax_inclusive()?;
        Ok(())
    }
}

/// Everything the order-based composers read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Order {
    pub items: Vec<OrderItem>,
    pub store: StoreProfile,
    pub totals: MonetaryTotals,
    pub payment: PaymentBreakdown,
    pub card_fee: CardFeePolicy,
    pub rounding: RoundingPolicy,
    pub receipt_number: String,
    pub table_name: String,
    pub guest_name: String,
    pub cast_name: String,
    pub timestamp: String,
    pub elapsed_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(OrderItem::new("Set", 3, 1_500).line_total(), 4_500);
        assert_eq!(OrderItem::new("Free", 0, 800).line_total(), 0);
    }

    #[test]
    fn test_empty_cast_is_none() {
        assert_eq!(OrderItem::new("Drink", 1, 1_000).cast("").cast, None);
        assert_eq!(
            OrderItem::new("Drink", 1, 1_000).cast("Mika").cast.as_deref(),
            Some("Mika")
        );
    }

    #[test]
    fn test_other_label_default() {
        let mut payment = PaymentBreakdown {
            other: 1_000,
            ..Default::default()
        };
        assert_eq!(payment.other_label(), "その他");
        payment.other_method_label = "PayPay".into();
        assert_eq!(payment.other_label(), "PayPay");
        assert!(payment.has_non_cash());
        assert!(!PaymentBreakdown::default().has_non_cash());
    }

    #[test]
    fn test_negative_rounded_total_rejected() {
        let totals = MonetaryTotals {
            rounded_total: -1,
            ..Default::default()
        };
        assert!(matches!(totals.validate(), Err(DenpyoError::Validation(_))));
        assert!(MonetaryTotals::default().validate().is_ok());
    }

    #[test]
    fn test_tax_inclusive_out_of_range_rejected() {
        let totals = MonetaryTotals {
            subtotal: i64::MAX,
            service_charge: 1,
            ..Default::default()
        };
        assert!(matches!(totals.tax_inclusive(), Err(DenpyoError::Validation(_))));
        assert!(matches!(totals.validate(), Err(DenpyoError::Validation(_))));

        let totals = MonetaryTotals {
            subtotal: 40_000,
            service_charge: 8_000,
            consumption_tax: 4_800,
            ..Default::default()
        };
        assert_eq!(totals.tax_inclusive().unwrap(), 52_800);
    }

    #[test]
    fn test_store_is_empty() {
        assert!(StoreProfile::default().is_empty());
        let store = StoreProfile {
            phone: "03-0000-0000".into(),
            ..Default::default()
        };
        assert!(!store.is_empty());
    }
}
