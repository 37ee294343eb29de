//! Property-based tests for the pure accrual math.
//!
//! Invariants tested:
//! - `accrue(P, R, T)` is exactly `floor(P·R·T / (100·SECONDS_PER_YEAR))`
//! - Zero principal or zero elapsed time always accrues zero
//! - The result is monotonic in principal, rate, and elapsed time

use proptest::prelude::*;
use staking::accrual::{accrue, SECONDS_PER_YEAR};

const DENOMINATOR: i128 = 100 * SECONDS_PER_YEAR as i128;

proptest! {
    /// The reward is the exact floor of the rational P·R·T / denominator:
    /// `reward · D ≤ P·R·T < (reward + 1) · D`.
    #[test]
    fn prop_accrue_is_exact_floor(
        principal in 0i128..=1_000_000_000_000_000_000_000_000i128,
        rate in 0u32..=100u32,
        elapsed in 0u64..=100_000_000u64,
    ) {
        let reward = accrue(principal, rate, elapsed);
        let numerator = principal * rate as i128 * elapsed as i128;

        prop_assert!(reward * DENOMINATOR <= numerator);
        prop_assert!(numerator - reward * DENOMINATOR < DENOMINATOR);
    }

    /// Truncation always favors the reserve: the reward never exceeds the
    /// untruncated quotient.
    #[test]
    fn prop_accrue_never_rounds_up(
        principal in 1i128..=1_000_000_000_000_000_000_000i128,
        rate in 1u32..=100u32,
        elapsed in 1u64..=10_000_000u64,
    ) {
        let reward = accrue(principal, rate, elapsed);
        prop_assert!(reward >= 0);
        prop_assert!(reward <= principal * rate as i128 * elapsed as i128 / DENOMINATOR);
    }

    /// Zero principal or zero elapsed time short-circuits to exactly zero.
    #[test]
    fn prop_zero_inputs_accrue_nothing(
        principal in 0i128..=1_000_000_000_000_000_000_000i128,
        rate in 0u32..=100u32,
        elapsed in 0u64..=10_000_000u64,
    ) {
        prop_assert_eq!(accrue(0, rate, elapsed), 0);
        prop_assert_eq!(accrue(principal, rate, 0), 0);
        prop_assert_eq!(accrue(principal, 0, elapsed), 0);
    }

    /// More elapsed time never pays less.
    #[test]
    fn prop_monotonic_in_time(
        principal in 0i128..=1_000_000_000_000_000_000_000i128,
        rate in 0u32..=100u32,
        t1 in 0u64..=10_000_000u64,
        t2 in 0u64..=10_000_000u64,
    ) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        prop_assert!(accrue(principal, rate, lo) <= accrue(principal, rate, hi));
    }

    /// A larger principal never pays less over the same interval.
    #[test]
    fn prop_monotonic_in_principal(
        p1 in 0i128..=1_000_000_000_000_000_000_000i128,
        p2 in 0i128..=1_000_000_000_000_000_000_000i128,
        rate in 0u32..=100u32,
        elapsed in 0u64..=10_000_000u64,
    ) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        prop_assert!(accrue(lo, rate, elapsed) <= accrue(hi, rate, elapsed));
    }
}
