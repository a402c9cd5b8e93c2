//! Rounding a total to a payable denomination.
//!
//! ```text
//! unit = 100
//!
//!   12,340 ── RoundUp ─────► 12,400
//!   12,340 ── RoundDown ───► 12,300
//!   12,340 ── RoundHalfUp ─► 12,300   (40 < 50)
//!   12,350 ── RoundHalfUp ─► 12,400   (50 >= 50)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DenpyoError, Result};

/// Direction used when adjusting a total to a multiple of the rounding unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMethod {
    /// 切り上げ
    #[default]
    RoundUp,
    /// 切り捨て
    RoundDown,
    /// 四捨五入
    RoundHalfUp,
}

impl RoundingMethod {
    /// Decode the numeric setting used by the register (0 = up, 1 = down, 2 = half-up).
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Self::RoundUp),
            1 => Ok(Self::RoundDown),
            2 => Ok(Self::RoundHalfUp),
            other => Err(DenpyoError::Configuration(format!(
                "unknown rounding method {} (expected 0, 1 or 2)",
                other
            ))),
        }
    }
}

/// Rounding unit and direction. A unit of 1 (or less) disables rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    pub unit: i64,
    pub method: RoundingMethod,
}

impl RoundingPolicy {
    pub fn new(unit: i64, method: RoundingMethod) -> Self {
        Self { unit, method }
    }

    /// The identity policy.
    pub fn none() -> Self {
        Self::new(1, RoundingMethod::RoundUp)
    }

    /// Build a policy from the wire representation (`roundingUnit`, `roundingMethod`).
    pub fn from_codes(unit: i64, method: i64) -> Result<Self> {
        Ok(Self::new(unit, RoundingMethod::from_code(method)?))
    }

    pub fn apply(&self, amount: i64) -> Result<i64> {
        apply_rounding(amount, self.unit, self.method)
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Round `amount` to a multiple of `unit` in the given direction.
///
/// Works for negative amounts too: the remainder is taken with
/// [`i64::rem_euclid`], so it always lies in `0..unit`.
///
/// A result outside the `i64` range is a `Validation` error.
pub fn apply_rounding(amount: i64, unit: i64, method: RoundingMethod) -> Result<i64> {
    if unit <= 1 {
        return Ok(amount);
    }

    let remainder = amount.rem_euclid(unit);
    if remainder == 0 {
        return Ok(amount);
    }

    let round_up = match method {
        RoundingMethod::RoundUp => true,
        RoundingMethod::RoundDown => false,
        // remainder >= unit / 2, without integer truncation of odd units
        RoundingMethod::RoundHalfUp => remainder >= unit - remainder,
    };
    let rounded = if round_up {
        amount.checked_add(unit - remainder)
    } else {
        amount.checked_sub(remainder)
    };
    rounded.ok_or_else(|| {
        DenpyoError::Validation(format!(
            "amount {} cannot be rounded to a multiple of {}",
            amount, unit
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(amount: i64, unit: i64, method: RoundingMethod) -> i64 {
        apply_rounding(amount, unit, method).unwrap()
    }

    #[test]
    fn test_unit_one_is_identity() {
        assert_eq!(round(12_345, 1, RoundingMethod::RoundUp), 12_345);
        assert_eq!(round(12_345, 0, RoundingMethod::RoundDown), 12_345);
        assert_eq!(round(-7, -100, RoundingMethod::RoundHalfUp), -7);
    }

    #[test]
    fn test_exact_multiple_unchanged() {
        for method in [
            RoundingMethod::RoundUp,
            RoundingMethod::RoundDown,
            RoundingMethod::RoundHalfUp,
        ] {
            assert_eq!(round(52_000, 100, method), 52_000);
        }
    }

    #[test]
    fn test_round_up_and_down() {
        assert_eq!(round(12_340, 100, RoundingMethod::RoundUp), 12_400);
        assert_eq!(round(12_340, 100, RoundingMethod::RoundDown), 12_300);
        assert_eq!(round(12_301, 1000, RoundingMethod::RoundUp), 13_000);
    }

    #[test]
    fn test_half_up_boundary() {
        assert_eq!(round(12_349, 100, RoundingMethod::RoundHalfUp), 12_300);
        assert_eq!(round(12_350, 100, RoundingMethod::RoundHalfUp), 12_400);
        // Odd unit: 3 / 2 = 1.5, so a remainder of 1 rounds down and 2 rounds up
        assert_eq!(round(10, 3, RoundingMethod::RoundHalfUp), 9);
        assert_eq!(round(11, 3, RoundingMethod::RoundHalfUp), 12);
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(round(-130, 100, RoundingMethod::RoundUp), -100);
        assert_eq!(round(-130, 100, RoundingMethod::RoundDown), -200);
        assert_eq!(round(-150, 100, RoundingMethod::RoundHalfUp), -100);
    }

    #[test]
    fn test_out_of_range_result_is_validation_error() {
        let err = apply_rounding(i64::MAX, 1_000, RoundingMethod::RoundUp).unwrap_err();
        assert!(matches!(err, DenpyoError::Validation(_)));
        assert!(apply_rounding(i64::MAX - 2, 10, RoundingMethod::RoundHalfUp).is_err());
        assert!(apply_rounding(i64::MIN, 1_000, RoundingMethod::RoundDown).is_err());
        assert_eq!(
            round(i64::MAX, 1_000, RoundingMethod::RoundDown),
            i64::MAX - i64::MAX % 1_000
        );
        assert_eq!(
            round(i64::MIN, 1_000, RoundingMethod::RoundUp),
            i64::MIN + (1_000 - i64::MIN.rem_euclid(1_000))
        );
    }

    #[test]
    fn test_method_codes() {
        assert_eq!(RoundingMethod::from_code(0).unwrap(), RoundingMethod::RoundUp);
        assert_eq!(RoundingMethod::from_code(1).unwrap(), RoundingMethod::RoundDown);
        assert_eq!(
            RoundingMethod::from_code(2).unwrap(),
            RoundingMethod::RoundHalfUp
        );
    }

    #[test]
    fn test_unknown_method_is_configuration_error() {
        let err = RoundingPolicy::from_codes(100, 3).unwrap_err();
        assert!(matches!(err, DenpyoError::Configuration(_)));
        assert!(RoundingMethod::from_code(-1).is_err());
    }
}
