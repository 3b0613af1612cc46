//! ScalingLedger - per-entity apply/revert bookkeeping
//!
//! The ledger is the only owner of saved baseline stats. An entity with no
//! record is unscaled; a record exists exactly while a scaling effect is live.

mod scaler;

use crate::host::ScalableEntity;
use crate::model::Multipliers;
use crate::types::{DamageRange, EntityId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Saved baseline for one scaled entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityScalingRecord {
    saved_max_health: u32,
    /// Per-channel base damage, only when damage is scaled too
    saved_damage: Option<[DamageRange; 2]>,
    multipliers: Multipliers,
    applied: bool,
}

/// Result of [`ScalingLedger::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Entity is already scaled for this engagement
    AlreadyApplied,
    /// Every factor was exactly 1.0
    Unity,
}

/// Result of [`ScalingLedger::revert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertOutcome {
    Reverted,
    /// No live scaling effect to undo
    NotScaled,
}

/// Map from live entity to its saved stats
///
/// All operations take `&self`; one mutex guards the map and is held for the
/// whole of a single apply or revert, entity mutation included, so the two can
/// never interleave on the same entity.
#[derive(Debug, Default)]
pub struct ScalingLedger {
    records: Mutex<HashMap<EntityId, EntityScalingRecord>>,
}

impl ScalingLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<EntityId, EntityScalingRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Scale an entity once per engagement
    ///
    /// Saves the entity's current max health (and base damage when
    /// `scale_damage` is set), then writes the scaled values. A second apply
    /// before a revert changes nothing.
    pub fn apply<E: ScalableEntity + ?Sized>(
        &self,
        id: EntityId,
        entity: &mut E,
        multipliers: Multipliers,
        scale_damage: bool,
    ) -> ApplyOutcome {
        if multipliers.is_unity() {
            return ApplyOutcome::Unity;
        }

        let mut records = self.records();
        if records.get(&id).is_some_and(|r| r.applied) {
            return ApplyOutcome::AlreadyApplied;
        }

        let (saved_max_health, saved_damage) = scaler::snapshot(entity, scale_damage);
        let record = EntityScalingRecord {
            saved_max_health,
            saved_damage,
            multipliers,
            applied: true,
        };
        scaler::scale_entity(entity, &record);
        records.insert(id, record);

        ApplyOutcome::Applied
    }

    /// Undo a live scaling effect and forget the entity
    ///
    /// Safe to call at any time; without a live record this is a no-op.
    pub fn revert<E: ScalableEntity + ?Sized>(&self, id: EntityId, entity: &mut E) -> RevertOutcome {
        let mut records = self.records();
        match records.get(&id) {
            Some(record) if record.applied => {}
            _ => return RevertOutcome::NotScaled,
        }

        if let Some(record) = records.remove(&id) {
            scaler::restore_entity(entity, &record);
        }
        RevertOutcome::Reverted
    }

    /// Drop an entity's record without touching the entity
    ///
    /// For entities that vanished and can no longer be restored.
    pub fn discard(&self, id: EntityId) -> bool {
        self.records().remove(&id).is_some()
    }

    /// Drop records for every entity `is_live` rejects, returning how many went
    pub fn prune(&self, mut is_live: impl FnMut(EntityId) -> bool) -> usize {
        let mut records = self.records();
        let before = records.len();
        records.retain(|id, _| is_live(*id));
        before - records.len()
    }

    /// Whether the entity currently carries a scaling effect
    pub fn is_applied(&self, id: EntityId) -> bool {
        self.records().get(&id).is_some_and(|r| r.applied)
    }

    /// Factors currently applied to an entity
    pub fn applied_multipliers(&self, id: EntityId) -> Option<Multipliers> {
        self.records()
            .get(&id)
            .filter(|r| r.applied)
            .map(|r| r.multipliers)
    }

    /// Number of tracked entities
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::SandboxEntity;
    use crate::types::AttackChannel;

    fn boss() -> SandboxEntity {
        SandboxEntity::hostile(1000)
            .with_weapon(AttackChannel::Primary, DamageRange::new(100.0, 150.0))
            .with_weapon(AttackChannel::Offhand, DamageRange::new(40.0, 60.0))
    }

    #[test]
    fn test_apply_scales_health_and_damage() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();

        let outcome = ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.2), true);

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(entity.max_health(), 200);
        assert_eq!(entity.health(), 200);
        let primary = entity.weapon_damage(AttackChannel::Primary);
        assert!((primary.min - 20.0).abs() < 1e-9);
        assert!((primary.max - 30.0).abs() < 1e-9);
        assert_eq!(entity.recalculations(), 2);
        assert!(ledger.is_applied(EntityId(1)));
    }

    #[test]
    fn test_unity_is_noop() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();
        let before = entity.clone();

        let outcome = ledger.apply(EntityId(1), &mut entity, Multipliers::unity(), true);

        assert_eq!(outcome, ApplyOutcome::Unity);
        assert_eq!(entity, before);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let ledger = ScalingLedger::new();
        let mut once = boss();
        let mut twice = boss();

        ledger.apply(EntityId(1), &mut once, Multipliers::uniform(0.4), true);
        ledger.apply(EntityId(2), &mut twice, Multipliers::uniform(0.4), true);
        let second = ledger.apply(EntityId(2), &mut twice, Multipliers::uniform(0.4), true);

        assert_eq!(second, ApplyOutcome::AlreadyApplied);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_second_apply_with_new_factor_ignored() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.2), true);
        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.6), true);

        assert_eq!(entity.max_health(), 200);
        assert_eq!(
            ledger.applied_multipliers(EntityId(1)),
            Some(Multipliers::uniform(0.2))
        );
    }

    #[test]
    fn test_revert_restores_snapshot() {
        let ledger = ScalingLedger::new();
        let original = boss();
        let mut entity = original.clone();

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.2), true);
        let outcome = ledger.revert(EntityId(1), &mut entity);

        assert_eq!(outcome, RevertOutcome::Reverted);
        assert_eq!(entity.max_health(), 1000);
        for channel in AttackChannel::all() {
            assert_eq!(entity.weapon_damage(*channel), original.weapon_damage(*channel));
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_revert_does_not_heal() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.2), true);
        entity.set_health(50);
        ledger.revert(EntityId(1), &mut entity);

        assert_eq!(entity.max_health(), 1000);
        assert_eq!(entity.health(), 50);
    }

    #[test]
    fn test_revert_clamps_health_after_upscale() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(2.0), false);
        assert_eq!(entity.max_health(), 2000);
        assert_eq!(entity.health(), 2000);

        ledger.revert(EntityId(1), &mut entity);
        assert_eq!(entity.max_health(), 1000);
        assert_eq!(entity.health(), 1000);
    }

    #[test]
    fn test_revert_without_apply_is_noop() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();
        let before = entity.clone();

        assert_eq!(ledger.revert(EntityId(1), &mut entity), RevertOutcome::NotScaled);
        assert_eq!(entity, before);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_health_only_leaves_damage() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.5), false);

        assert_eq!(entity.max_health(), 500);
        assert_eq!(
            entity.weapon_damage(AttackChannel::Primary),
            DamageRange::new(100.0, 150.0)
        );
        assert_eq!(entity.recalculations(), 0);

        ledger.revert(EntityId(1), &mut entity);
        assert_eq!(entity.recalculations(), 0);
    }

    #[test]
    fn test_unarmed_channel_not_scaled() {
        let ledger = ScalingLedger::new();
        let mut entity = SandboxEntity::hostile(1000)
            .with_weapon(AttackChannel::Primary, DamageRange::new(10.0, 20.0));

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.5), true);

        assert_eq!(entity.weapon_damage(AttackChannel::Offhand), DamageRange::default());
        assert_eq!(entity.recalculations(), 1);
    }

    #[test]
    fn test_split_factors() {
        let ledger = ScalingLedger::new();
        let mut entity = boss();
        let factors = Multipliers {
            health: 2.0,
            damage: 1.5,
        };

        ledger.apply(EntityId(1), &mut entity, factors, true);

        assert_eq!(entity.max_health(), 2000);
        let primary = entity.weapon_damage(AttackChannel::Primary);
        assert!((primary.min - 150.0).abs() < 1e-9);
        assert!((primary.max - 225.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_health_floor() {
        let ledger = ScalingLedger::new();
        let mut entity = SandboxEntity::hostile(3);

        ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.2), false);

        assert_eq!(entity.max_health(), 1);
        assert!(entity.health() <= 1);
    }

    #[test]
    fn test_discard_and_prune() {
        let ledger = ScalingLedger::new();
        for raw in 1..=4 {
            let mut entity = boss();
            ledger.apply(EntityId(raw), &mut entity, Multipliers::uniform(0.5), true);
        }

        assert!(ledger.discard(EntityId(1)));
        assert!(!ledger.discard(EntityId(1)));

        let pruned = ledger.prune(|id| id.0 % 2 == 0);
        assert_eq!(pruned, 1);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.is_applied(EntityId(2)));
        assert!(ledger.is_applied(EntityId(4)));
    }

    #[test]
    fn test_repeated_cycles_do_not_drift() {
        let ledger = ScalingLedger::new();
        let original = boss();
        let mut entity = original.clone();

        for _ in 0..50 {
            ledger.apply(EntityId(1), &mut entity, Multipliers::uniform(0.37), true);
            ledger.revert(EntityId(1), &mut entity);
            entity.set_health(entity.max_health());
        }

        // Always scaled from the saved values, so no rounding accumulates
        assert_eq!(entity.max_health(), original.max_health());
        assert_eq!(entity.health(), original.health());
        for channel in AttackChannel::all() {
            assert_eq!(entity.weapon_damage(*channel), original.weapon_damage(*channel));
        }
    }
}
