//! Ratio model - scale linearly with the share of the baseline party present

use crate::config::PolicyConfig;

/// Monster strength relative to the authored baseline
///
/// `max(players, 1) / baseline`, floored at the minimum multiplier
/// (`1 / baseline` when unset). Above the baseline the ratio is clamped to 1.0
/// unless `allow_above_baseline` is set, in which case `max_multiplier` is the
/// ceiling.
///
/// # Examples
/// With a baseline of 5: one player gives 0.2, five or more give 1.0.
pub fn ratio_multiplier(players: u32, policy: &PolicyConfig) -> f64 {
    let base = f64::from(policy.effective_baseline());
    let mut ratio = f64::from(players.max(1)) / base;

    let min_mul = if policy.min_multiplier > 0.0 {
        policy.min_multiplier
    } else {
        1.0 / base
    };

    if ratio > 1.0 {
        ratio = if policy.allow_above_baseline {
            ratio.min(policy.max_multiplier.max(1.0))
        } else {
            1.0
        };
    }
    if ratio < min_mul {
        ratio = min_mul;
    }
    ratio
}

/// Player strength against the monster: the reciprocal of [`ratio_multiplier`]
///
/// A solo player in a five-player instance hits five times as hard. Returns 1.0
/// if the ratio is ever non-positive.
pub fn inverse_ratio_multiplier(players: u32, policy: &PolicyConfig) -> f64 {
    reciprocal(ratio_multiplier(players, policy))
}

pub(crate) fn reciprocal(factor: f64) -> f64 {
    if factor > 0.0 && factor.is_finite() {
        1.0 / factor
    } else {
        1.0
    }
}
