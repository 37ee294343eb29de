//! Tier schedule: ordered (threshold, annual rate) reward brackets.
//!
//! Tier 0 is implicit — any principal below the lowest configured threshold
//! earns rate 0. Configured tiers are indexed 1-based on top of that, so the
//! index returned by [`tier_of`] lines up with the schedule positions users
//! see in queries and events.

use soroban_sdk::{contracttype, Vec};

use crate::ContractError;

/// One reward bracket: principal at or above `threshold` qualifies for
/// `annual_rate` percent per year.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub threshold: i128,
    pub annual_rate: u32,
}

/// Validate a replacement schedule.
///
/// Thresholds must be strictly ascending and the lowest strictly positive,
/// which keeps principal 0 in tier 0 under every schedule.
pub fn validate(schedule: &Vec<Tier>) -> Result<(), ContractError> {
    let mut prev: i128 = 0;
    for tier in schedule.iter() {
        if tier.threshold <= prev {
            return Err(ContractError::InvalidScheduleOrder);
        }
        prev = tier.threshold;
    }
    Ok(())
}

/// Highest 1-based tier index whose threshold is ≤ `amount`, or 0 when
/// `amount` sits below the lowest threshold. Pure lookup.
pub fn tier_of(schedule: &Vec<Tier>, amount: i128) -> u32 {
    let mut index = 0u32;
    for (i, tier) in schedule.iter().enumerate() {
        if amount < tier.threshold {
            break;
        }
        index = i as u32 + 1;
    }
    index
}

/// Annual rate for a tier index as produced by [`tier_of`].
///
/// Index 0 is the implicit below-schedule tier and always carries rate 0;
/// anything past the end of the schedule is `InvalidTierIndex`.
pub fn rate_of(schedule: &Vec<Tier>, index: u32) -> Result<u32, ContractError> {
    if index == 0 {
        return Ok(0);
    }
    schedule
        .get(index - 1)
        .map(|tier| tier.annual_rate)
        .ok_or(ContractError::InvalidTierIndex)
}
