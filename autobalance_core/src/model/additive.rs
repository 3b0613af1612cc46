//! Additive model - grow a fixed amount per player beyond the baseline

use crate::config::PolicyConfig;

/// `1 + per_player * (players - baseline)`, capped at `max_multiplier`
///
/// Exactly 1.0 at or below the baseline.
pub fn additive_multiplier(players: u32, baseline: u32, per_player: f64, max_multiplier: f64) -> f64 {
    let baseline = baseline.max(1);
    if players <= baseline {
        return 1.0;
    }
    let extra = f64::from(players - baseline);
    let m = 1.0 + per_player.max(0.0) * extra;
    m.min(max_multiplier.max(1.0))
}

/// Health factor for a larger-than-baseline group
pub fn additive_health_multiplier(players: u32, policy: &PolicyConfig) -> f64 {
    additive_multiplier(
        players,
        policy.effective_baseline(),
        policy.health_per_extra_player,
        policy.max_multiplier,
    )
}

/// Damage factor for a larger-than-baseline group
pub fn additive_damage_multiplier(players: u32, policy: &PolicyConfig) -> f64 {
    additive_multiplier(
        players,
        policy.effective_baseline(),
        policy.damage_per_extra_player,
        policy.max_multiplier,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_or_below_baseline() {
        for players in 0..=5 {
            assert_eq!(additive_multiplier(players, 5, 0.5, 3.0), 1.0);
        }
    }

    #[test]
    fn test_three_extra_players() {
        // 1 + 0.5 * 3 = 2.5
        let m = additive_multiplier(8, 5, 0.5, 3.0);
        assert!((m - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_capped() {
        let m = additive_multiplier(40, 5, 0.5, 3.0);
        assert!((m - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_separate_health_and_damage() {
        let policy = PolicyConfig {
            health_per_extra_player: 0.5,
            damage_per_extra_player: 0.1,
            ..PolicyConfig::default()
        };
        assert!((additive_health_multiplier(7, &policy) - 2.0).abs() < f64::EPSILON);
        assert!((additive_damage_multiplier(7, &policy) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_baseline_behaves_as_one() {
        for players in 0..6 {
            assert_eq!(
                additive_multiplier(players, 0, 0.5, 3.0),
                additive_multiplier(players, 1, 0.5, 3.0)
            );
        }
    }
}
