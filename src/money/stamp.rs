//! Revenue stamp (収入印紙) tiers.
//!
//! | Amount (yen) ≥ | Stamp |
//! |---------------:|------:|
//! | 50,000 | 200 |
//! | 1,000,000 | 400 |
//! | 2,000,000 | 600 |
//! | 3,000,000 | 1,000 |
//! | 5,000,000 | 2,000 |

use serde::{Deserialize, Serialize};

/// Tier boundaries, strictly ascending.
pub const STAMP_TIERS: &[(i64, &str)] = &[
    (50_000, "200"),
    (1_000_000, "400"),
    (2_000_000, "600"),
    (3_000_000, "1,000"),
    (5_000_000, "2,000"),
];

/// Default amount from which a stamp is printed.
pub const DEFAULT_STAMP_THRESHOLD: i64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueStampPolicy {
    pub enabled: bool,
    pub threshold: i64,
}

impl Default for RevenueStampPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_STAMP_THRESHOLD,
        }
    }
}

/// Face value of the stamp required for `amount`, if any.
pub fn determine_revenue_stamp(amount: i64, policy: &RevenueStampPolicy) -> Option<&'static str> {
    if !policy.enabled || amount < policy.threshold {
        return None;
    }

    STAMP_TIERS
        .iter()
        .rev()
        .find(|(boundary, _)| *boundary <= amount)
        .map(|(_, label)| *label)
}
