//! Card surcharge.
//!
//! The card-equivalent total is rounded in two stages:
//!
//! ```text
//! fee         = round_half_up(base * rate / 100)
//! pre_rounded = base + fee
//! total       = rounding_policy(pre_rounded)
//! ```

use serde::{Deserialize, Serialize};

use super::rounding::RoundingPolicy;
use crate::error::{DenpyoError, Result};

/// Card surcharge settings for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardFeePolicy {
    pub rate_percent: i64,
    /// Fee already charged on the card portion, when the register computed it.
    pub fee_amount: Option<i64>,
}

impl CardFeePolicy {
    pub fn new(rate_percent: i64) -> Self {
        Self {
            rate_percent,
            fee_amount: None,
        }
    }

    pub fn with_fee(mut self, fee: i64) -> Self {
        self.fee_amount = Some(fee);
        self
    }

    pub fn is_active(&self) -> bool {
        self.rate_percent > 0
    }
}

/// Both stages of the card-equivalent computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardAmount {
    pub base: i64,
    pub fee: i64,
    pub pre_rounded: i64,
    pub total: i64,
}

/// Compute what `base_total` costs when paid entirely by card.
pub fn compute_card_amount(
    base_total: i64,
    rate_percent: i64,
    rounding: &RoundingPolicy,
) -> Result<CardAmount> {
    if rate_percent < 0 {
        return Err(DenpyoError::Configuration(format!(
            "card fee rate must not be negative, got {}%",
            rate_percent
        )));
    }

    let overflow = || {
        DenpyoError::Validation(format!(
            "card amount for {} at {}% is out of range",
            base_total, rate_percent
        ))
    };
    let fee = base_total
        .checked_mul(rate_percent)
        .and_then(round_half_up_percent)
        .ok_or_else(overflow)?;
    let pre_rounded = base_total.checked_add(fee).ok_or_else(overflow)?;

    Ok(CardAmount {
        base: base_total,
        fee,
        pre_rounded,
        total: rounding.apply(pre_rounded)?,
    })
}

/// `round_half_up(scaled / 100)` in integer arithmetic.
fn round_half_up_percent(scaled: i64) -> Option<i64> {
    Some(scaled.checked_add(50)?.div_euclid(100))
}
