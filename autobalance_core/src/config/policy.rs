//! Scaling policy configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which multiplier algorithm a deployment uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// `players / baseline`, floored at the minimum multiplier
    #[default]
    Ratio,
    /// `1 + per_player * extra_players`, capped at the maximum multiplier
    Additive,
}

/// How a computed multiplier reaches the fight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Rewrite the hostile entity's stored health and weapon damage for the
    /// duration of the engagement
    #[default]
    StatMutation,
    /// Leave entity stats alone and rescale every damage event in flight
    DamageInterception,
}

/// Who counts towards the relevant player count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountingRules {
    /// Include game masters / administrators
    pub count_game_masters: bool,
    /// Include automated agents (player bots)
    pub count_automated_agents: bool,
}

impl Default for CountingRules {
    fn default() -> Self {
        CountingRules {
            count_game_masters: false,
            count_automated_agents: true,
        }
    }
}

/// Tunable scaling parameters
///
/// Read-only once loaded; a reload produces a whole new value that is swapped
/// in through [`super::PolicyHandle`]. Keys use the PascalCase names of the
/// server configuration file:
///
/// ```toml
/// Enable = true
/// InstanceOnly = true
/// BaselinePlayers = 5
/// MinMultiplier = 0.0
/// AllowAboveBase = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyConfig {
    #[serde(rename = "Enable", default = "default_true")]
    pub enabled: bool,
    /// Only scale inside instanced (dungeon/raid) areas
    #[serde(default = "default_true")]
    pub instance_only: bool,
    /// Party size the content was authored for
    #[serde(default = "default_baseline_players")]
    pub baseline_players: u32,

    #[serde(default)]
    pub model: ModelKind,
    #[serde(default)]
    pub strategy: Strategy,

    // === Ratio model ===
    /// Lower bound for the ratio (0 = automatic `1 / baseline`)
    #[serde(default)]
    pub min_multiplier: f64,
    #[serde(rename = "AllowAboveBase", default)]
    pub allow_above_baseline: bool,

    // === Additive model ===
    #[serde(default = "default_health_per_extra_player")]
    pub health_per_extra_player: f64,
    #[serde(default = "default_damage_per_extra_player")]
    pub damage_per_extra_player: f64,
    /// Ceiling for every computed multiplier
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,

    // === Stat mutation ===
    /// Also scale base weapon damage, not just health
    #[serde(default = "default_true")]
    pub scale_damage: bool,

    // === Player counting ===
    #[serde(default)]
    pub count_game_masters: bool,
    #[serde(rename = "CountPlayerbots", default = "default_true")]
    pub count_automated_agents: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            enabled: true,
            instance_only: true,
            baseline_players: default_baseline_players(),
            model: ModelKind::Ratio,
            strategy: Strategy::StatMutation,
            min_multiplier: 0.0,
            allow_above_baseline: false,
            health_per_extra_player: default_health_per_extra_player(),
            damage_per_extra_player: default_damage_per_extra_player(),
            max_multiplier: default_max_multiplier(),
            scale_damage: true,
            count_game_masters: false,
            count_automated_agents: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_baseline_players() -> u32 {
    5
}
fn default_health_per_extra_player() -> f64 {
    0.25
}
fn default_damage_per_extra_player() -> f64 {
    0.15
}
fn default_max_multiplier() -> f64 {
    3.0
}

impl PolicyConfig {
    /// Baseline party size, with 0 treated as 1
    pub fn effective_baseline(&self) -> u32 {
        self.baseline_players.max(1)
    }

    /// Clamp out-of-range values into their usable domain
    ///
    /// Negative or NaN rates become 0, the minimum multiplier is kept in
    /// `[0, 1]` and the ceiling never drops below 1.
    pub fn sanitized(mut self) -> Self {
        self.min_multiplier = non_negative(self.min_multiplier).min(1.0);
        self.health_per_extra_player = non_negative(self.health_per_extra_player);
        self.damage_per_extra_player = non_negative(self.damage_per_extra_player);
        if self.max_multiplier.is_nan() || self.max_multiplier < 1.0 {
            self.max_multiplier = 1.0;
        }
        self
    }

    /// Counting rules to hand to the host when it counts players
    pub fn counting_rules(&self) -> CountingRules {
        CountingRules {
            count_game_masters: self.count_game_masters,
            count_automated_agents: self.count_automated_agents,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Load a policy from a TOML file (sanitized)
pub fn load_policy(path: &Path) -> Result<PolicyConfig, ConfigError> {
    let config: PolicyConfig = super::load_toml(path)?;
    Ok(config.sanitized())
}

/// Load a policy from a TOML string (sanitized)
pub fn parse_policy(content: &str) -> Result<PolicyConfig, ConfigError> {
    let config: PolicyConfig = super::parse_toml(content)?;
    Ok(config.sanitized())
}

/// The policy shipped in `autobalance_core/config/autobalance.toml`
pub fn default_policy() -> PolicyConfig {
    let toml = include_str!("../../config/autobalance.toml");
    parse_policy(toml).unwrap_or_default()
}
