//! Time-proportional reward math.
//!
//! Rewards accrue continuously at an annual percentage rate and are settled
//! in whole token units with truncation toward zero, so rounding dust always
//! stays in the reserve rather than drifting out of it across many small
//! settlements.

/// Seconds in a 365-day year; the accrual denominator base.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Reward owed on `principal` at `annual_rate` percent over `elapsed` seconds.
///
/// Computed as
/// `floor(principal × annual_rate × elapsed / (100 × SECONDS_PER_YEAR))`
/// in exact integer arithmetic. Returns 0 when `principal` or `elapsed` is
/// zero, so an account's very first interaction (uninitialized timestamp)
/// never mints a spurious credit.
///
/// Saturation in the intermediate product is unreachable for token amounts
/// bounded by an i128 asset supply and realistic rates/intervals.
pub fn accrue(principal: i128, annual_rate: u32, elapsed: u64) -> i128 {
    if principal <= 0 || annual_rate == 0 || elapsed == 0 {
        return 0;
    }

    principal
        .saturating_mul(annual_rate as i128)
        .saturating_mul(elapsed as i128)
        / (100 * SECONDS_PER_YEAR as i128)
}
