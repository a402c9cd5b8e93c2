//! # Monetary Calculator
//!
//! Pure integer arithmetic over yen amounts (minor unit = 1 yen). Every
//! step is checked: a result outside `i64` is a validation error.
//!
//! ## Modules
//!
//! - [`rounding`]: rounding a total to a payable denomination
//! - [`card`]: card surcharge (fee rounding, then total rounding)
//! - [`stamp`]: revenue-stamp tier lookup
//!
//! ## Example
//!
//! ```
//! use denpyo::money::{RoundingMethod, RoundingPolicy, compute_card_amount};
//!
//! let policy = RoundingPolicy::new(10, RoundingMethod::RoundUp);
//! let card = compute_card_amount(100_000, 5, &policy).unwrap();
//! assert_eq!(card.fee, 5_000);
//! assert_eq!(card.total, 105_000);
//! ```

pub mod card;
pub mod rounding;
pub mod stamp;

pub use card::{CardAmount, CardFeePolicy, compute_card_amount};
pub use rounding::{RoundingMethod, RoundingPolicy, apply_rounding};
pub use stamp::{RevenueStampPolicy, STAMP_TIERS, determine_revenue_stamp};
