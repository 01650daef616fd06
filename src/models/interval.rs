//! Spaced repetition interval policy.
//!
//! Computes the gap until the next review from how well the last one went:
//! - The first completion uses a fixed calibration table (28/21/14/7 days)
//!   because there is no prior interval to scale yet.
//! - Every later completion scales the prior interval by a multiplier
//!   (2.0 / 1.5 / 1.0 / 0.5 depending on the score), so strong recall
//!   doubles the gap and weak recall halves it.
//! - Past the first cycle the interval never drops below one week.

use super::Score;

/// Floor for every interval computed after the first cycle, in days.
pub const MIN_INTERVAL_DAYS: u32 = 7;

/// Prior interval assumed when a cycle ≥ 2 record has none recorded.
const DEFAULT_PRIOR_DAYS: u32 = 7;

/// Calculates the next review interval in days.
///
/// `cycle` is the cycle of the record being completed (1-based) and
/// `prior_interval_days` the interval that produced it (0 on cycle 1).
pub fn next_interval(cycle: u32, prior_interval_days: u32, score: Score) -> u32 {
    let percent = score.percent();

    if cycle <= 1 {
        // First review: absolute table, no prior interval exists
        return if percent >= 75.0 {
            28
        } else if percent >= 50.0 {
            21
        } else if percent >= 25.0 {
            14
        } else {
            7
        };
    }

    let multiplier = if percent >= 75.0 {
        2.0
    } else if percent >= 50.0 {
        1.5
    } else if percent >= 25.0 {
        1.0
    } else {
        0.5
    };

    let prior = if prior_interval_days == 0 {
        DEFAULT_PRIOR_DAYS
    } else {
        prior_interval_days
    };

    let scaled = (prior as f64 * multiplier).ceil() as u32;
    scaled.max(MIN_INTERVAL_DAYS)
}
