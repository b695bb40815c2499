// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};

/// Normalize a monetary value to exactly 2 fractional digits, rounding half-up.
/// Every amount that is persisted goes through this; display-only rounding
/// (percentages) never flows back into stored balances.
pub fn to_cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Half-up rounding to 1 decimal place for display percentages
/// (credit utilization, budget progress, debt paid percentage).
pub fn display_pct(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, or None when `whole` is zero.
pub fn pct_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some(part / whole * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn cents_round_half_up() {
        assert_eq!(to_cents(d("10.005")), d("10.01"));
        assert_eq!(to_cents(d("10.004")), d("10.00"));
        assert_eq!(to_cents(d("-10.005")), d("-10.01"));
    }

    #[test]
    fn pct_of_zero_whole_is_none() {
        assert_eq!(pct_of(d("5"), Decimal::ZERO), None);
        assert_eq!(pct_of(d("1700"), d("5000")).map(to_cents), Some(d("34.00")));
    }

    #[test]
    fn display_pct_one_dp() {
        assert_eq!(display_pct(d("34.04")), d("34.0"));
        assert_eq!(display_pct(d("34.05")), d("34.1"));
    }
}
