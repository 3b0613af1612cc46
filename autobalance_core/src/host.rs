//! Host seams - what the engine needs from the simulation around it

use crate::config::{CountingRules, PolicyConfig};
use crate::types::{AreaId, AttackChannel, DamageRange, EntityId, EntityKind};

/// An entity whose persistent stats can be scaled
pub trait ScalableEntity {
    fn max_health(&self) -> u32;
    fn set_max_health(&mut self, value: u32);

    fn health(&self) -> u32;
    fn set_health(&mut self, value: u32);

    /// Base weapon damage range for a channel
    fn weapon_damage(&self, channel: AttackChannel) -> DamageRange;
    fn set_weapon_damage(&mut self, channel: AttackChannel, range: DamageRange);

    /// Recompute derived damage after the base range changed
    fn recalculate_damage(&mut self, channel: AttackChannel);
}

/// The simulation hosting the engine
///
/// Every query may fail (entity despawned, area unloaded); a `None` or `false`
/// answer makes the engine treat the entity as ineligible.
pub trait ScalingHost {
    type Entity: ScalableEntity;

    /// What side of the fight an entity is on
    fn entity_kind(&self, entity: EntityId) -> Option<EntityKind>;

    /// Area the entity is currently in
    fn area_of(&self, entity: EntityId) -> Option<AreaId>;

    /// Whether an area is instanced (dungeon/raid) rather than open world
    fn is_eligible_area(&self, area: AreaId) -> bool;

    /// Players physically present in the area, filtered by the counting rules
    fn relevant_player_count(&self, area: AreaId, rules: &CountingRules) -> Option<u32>;

    /// Mutable access to an entity's stats
    fn entity_mut(&mut self, entity: EntityId) -> Option<&mut Self::Entity>;
}

/// Enabled and, under `instance_only`, an instanced area
pub(crate) fn area_in_scope<H: ScalingHost + ?Sized>(
    host: &H,
    policy: &PolicyConfig,
    area: AreaId,
) -> bool {
    policy.enabled && (!policy.instance_only || host.is_eligible_area(area))
}
