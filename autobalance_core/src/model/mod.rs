//! Multiplier models - player count to scaling factors
//!
//! Both models are pure functions of the player count and one policy snapshot.

mod additive;
mod ratio;

pub use additive::{additive_damage_multiplier, additive_health_multiplier, additive_multiplier};
pub use ratio::{inverse_ratio_multiplier, ratio_multiplier};

use crate::config::{ModelKind, PolicyConfig};
use serde::{Deserialize, Serialize};

/// Factors to apply to a hostile entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    /// Applied to max/current health
    pub health: f64,
    /// Applied to base weapon damage and outgoing damage
    pub damage: f64,
}

impl Multipliers {
    /// Same factor for health and damage
    pub fn uniform(factor: f64) -> Self {
        Multipliers {
            health: factor,
            damage: factor,
        }
    }

    /// Identity factors
    pub fn unity() -> Self {
        Self::uniform(1.0)
    }

    /// Whether every factor is exactly 1.0 (nothing to do)
    pub fn is_unity(&self) -> bool {
        self.health == 1.0 && self.damage == 1.0
    }
}

/// Monster-side factors for the configured model
pub fn compute(players: u32, policy: &PolicyConfig) -> Multipliers {
    match policy.model {
        ModelKind::Ratio => Multipliers::uniform(ratio_multiplier(players, policy)),
        ModelKind::Additive => Multipliers {
            health: additive_health_multiplier(players, policy),
            damage: additive_damage_multiplier(players, policy),
        },
    }
}

/// Factor for damage dealt by a monster to players
pub fn monster_strength(players: u32, policy: &PolicyConfig) -> f64 {
    compute(players, policy).damage
}

/// Factor for damage dealt by players to a monster
///
/// The reciprocal of the monster's health factor: hitting a monster at 20%
/// health scaling for 5x is the same fight as hitting a 1x monster at 20%
/// health.
pub fn player_compensation(players: u32, policy: &PolicyConfig) -> f64 {
    ratio::reciprocal(compute(players, policy).health)
}
