//! Property-based tests for tier schedule lookups.
//!
//! Invariants tested:
//! - `tier_of` is monotonic non-decreasing in the queried amount
//! - `tier_of(schedule, 0)` is always tier 0
//! - `rate_of` accepts exactly the indices `tier_of` can produce

use proptest::prelude::*;
use soroban_sdk::{vec, Env, Vec};
use staking::tiers::{self, Tier};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a strictly ascending schedule from generated (gap, rate) pairs.
fn schedule_from(env: &Env, levels: &[(u64, u32)]) -> Vec<Tier> {
    let mut schedule = vec![env];
    let mut threshold: i128 = 0;
    for (gap, rate) in levels {
        threshold += *gap as i128 + 1; // strictly ascending, first one positive
        schedule.push_back(Tier {
            threshold,
            annual_rate: *rate,
        });
    }
    schedule
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// Any generated ascending schedule passes validation.
    #[test]
    fn prop_ascending_schedule_validates(
        levels in proptest::collection::vec((0u64..=1_000_000u64, 0u32..=100u32), 0..=10),
    ) {
        let env = Env::default();
        let schedule = schedule_from(&env, &levels);
        prop_assert!(tiers::validate(&schedule).is_ok());
    }

    /// `tier_of` never decreases as the amount grows.
    #[test]
    fn prop_tier_of_monotonic(
        levels in proptest::collection::vec((0u64..=1_000_000u64, 0u32..=100u32), 1..=10),
        a1 in 0i128..=20_000_000i128,
        a2 in 0i128..=20_000_000i128,
    ) {
        let env = Env::default();
        let schedule = schedule_from(&env, &levels);

        let (lo, hi) = if a1 <= a2 { (a1, a2) } else { (a2, a1) };
        prop_assert!(tiers::tier_of(&schedule, lo) <= tiers::tier_of(&schedule, hi));
    }

    /// Zero principal is always tier 0, under every schedule.
    #[test]
    fn prop_tier_of_zero_is_zero(
        levels in proptest::collection::vec((0u64..=1_000_000u64, 0u32..=100u32), 0..=10),
    ) {
        let env = Env::default();
        let schedule = schedule_from(&env, &levels);
        prop_assert_eq!(tiers::tier_of(&schedule, 0), 0);
    }

    /// An amount exactly at a threshold lands in that tier, one below lands
    /// under it.
    #[test]
    fn prop_tier_of_threshold_boundary(
        levels in proptest::collection::vec((0u64..=1_000_000u64, 0u32..=100u32), 1..=10),
        pick in 0usize..10usize,
    ) {
        let env = Env::default();
        let schedule = schedule_from(&env, &levels);
        let index = (pick % levels.len()) as u32;
        let tier = schedule.get(index).unwrap();

        prop_assert_eq!(tiers::tier_of(&schedule, tier.threshold), index + 1);
        prop_assert!(tiers::tier_of(&schedule, tier.threshold - 1) <= index);
    }

    /// Every index `tier_of` can produce is accepted by `rate_of`; the first
    /// out-of-range index is rejected.
    #[test]
    fn prop_rate_of_matches_tier_range(
        levels in proptest::collection::vec((0u64..=1_000_000u64, 0u32..=100u32), 0..=10),
    ) {
        let env = Env::default();
        let schedule = schedule_from(&env, &levels);

        for index in 0..=schedule.len() {
            prop_assert!(tiers::rate_of(&schedule, index).is_ok());
        }
        prop_assert!(tiers::rate_of(&schedule, schedule.len() + 1).is_err());
    }

    /// A duplicated threshold always fails validation.
    #[test]
    fn prop_duplicate_threshold_rejected(
        levels in proptest::collection::vec((0u64..=1_000u64, 0u32..=100u32), 1..=8),
        dup in 0usize..8usize,
    ) {
        let env = Env::default();
        let mut schedule = schedule_from(&env, &levels);
        let index = (dup % levels.len()) as u32;
        let tier = schedule.get(index).unwrap();

        // Re-insert an existing threshold right after itself.
        schedule.insert(index + 1, tier);
        prop_assert!(tiers::validate(&schedule).is_err());
    }
}
