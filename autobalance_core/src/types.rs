//! Core types shared by the scaling components

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a live entity in the host simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        EntityId(raw)
    }
}

/// Identity of a map/area instance in the host simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area#{}", self.0)
    }
}

impl From<u32> for AreaId {
    fn from(raw: u32) -> Self {
        AreaId(raw)
    }
}

/// What side of a fight an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Hostile creature controlled by the simulation
    Hostile,
    /// A player character
    Player,
    /// Pet, totem or guardian fighting on a player's behalf
    PlayerProxy,
    /// Anything else (neutral objects, vehicles, ...)
    Other,
}

impl EntityKind {
    /// Whether damage from this entity counts as player damage
    pub fn is_player_side(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::PlayerProxy)
    }
}

/// Weapon attack channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackChannel {
    Primary,
    Offhand,
}

impl AttackChannel {
    /// Get all attack channels
    pub fn all() -> &'static [AttackChannel] {
        &[AttackChannel::Primary, AttackChannel::Offhand]
    }

    /// Index into per-channel arrays
    pub fn index(&self) -> usize {
        match self {
            AttackChannel::Primary => 0,
            AttackChannel::Offhand => 1,
        }
    }
}

/// Base weapon damage range for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: f64,
    pub max: f64,
}

impl DamageRange {
    pub fn new(min: f64, max: f64) -> Self {
        DamageRange { min, max }
    }

    /// Both ends positive; only such ranges are scaled
    pub fn is_scalable(&self) -> bool {
        self.min > 0.0 && self.max > 0.0
    }

    /// Multiply both ends by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        DamageRange {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Shape of a damage event routed through the interceptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    /// Weapon swing
    Melee,
    /// Direct spell hit
    Spell,
    /// Periodic tick (damage over time)
    Periodic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_side() {
        assert!(EntityKind::Player.is_player_side());
        assert!(EntityKind::PlayerProxy.is_player_side());
        assert!(!EntityKind::Hostile.is_player_side());
        assert!(!EntityKind::Other.is_player_side());
    }

    #[test]
    fn test_channel_indices() {
        let indices: Vec<usize> = AttackChannel::all().iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_damage_range_scalable() {
        assert!(DamageRange::new(10.0, 20.0).is_scalable());
        assert!(!DamageRange::new(0.0, 20.0).is_scalable());
        assert!(!DamageRange::default().is_scalable());

        let scaled = DamageRange::new(10.0, 20.0).scaled(0.5);
        assert!((scaled.min - 5.0).abs() < f64::EPSILON);
        assert!((scaled.max - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityId(42).to_string(), "entity#42");
        assert_eq!(AreaId(7).to_string(), "area#7");
    }
}
