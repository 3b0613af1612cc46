//! In-memory host for simulations and tests
//!
//! A minimal world of areas and entities implementing [`ScalingHost`].

use crate::census::{count_relevant, PlayerPresence, PresenceRole};
use crate::config::CountingRules;
use crate::host::{ScalableEntity, ScalingHost};
use crate::types::{AreaId, AttackChannel, DamageRange, EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An entity living in a [`SandboxWorld`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxEntity {
    pub kind: EntityKind,
    pub area: Option<AreaId>,
    /// Presence role, for players only
    pub presence: Option<PresenceRole>,
    max_health: u32,
    health: u32,
    weapons: [DamageRange; 2],
    /// How many times derived damage was recomputed
    recalculations: u32,
}

impl SandboxEntity {
    fn new(kind: EntityKind, max_health: u32) -> Self {
        SandboxEntity {
            kind,
            area: None,
            presence: None,
            max_health,
            health: max_health,
            weapons: [DamageRange::default(); 2],
            recalculations: 0,
        }
    }

    /// Hostile creature at full health
    pub fn hostile(max_health: u32) -> Self {
        Self::new(EntityKind::Hostile, max_health)
    }

    /// Player with the given presence role
    pub fn player(max_health: u32, role: PresenceRole) -> Self {
        let mut entity = Self::new(EntityKind::Player, max_health);
        entity.presence = Some(role);
        entity
    }

    /// Pet or guardian fighting for a player
    pub fn proxy(max_health: u32) -> Self {
        Self::new(EntityKind::PlayerProxy, max_health)
    }

    /// Set a base weapon damage range
    pub fn with_weapon(mut self, channel: AttackChannel, range: DamageRange) -> Self {
        self.weapons[channel.index()] = range;
        self
    }

    /// Place the entity in an area
    pub fn in_area(mut self, area: AreaId) -> Self {
        self.area = Some(area);
        self
    }

    pub fn recalculations(&self) -> u32 {
        self.recalculations
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage from current health, returning the amount actually lost
    pub fn take_damage(&mut self, amount: i32) -> u32 {
        let amount = u32::try_from(amount).unwrap_or(0);
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }
}

impl ScalableEntity for SandboxEntity {
    fn max_health(&self) -> u32 {
        self.max_health
    }

    fn set_max_health(&mut self, value: u32) {
        self.max_health = value;
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn set_health(&mut self, value: u32) {
        self.health = value;
    }

    fn weapon_damage(&self, channel: AttackChannel) -> DamageRange {
        self.weapons[channel.index()]
    }

    fn set_weapon_damage(&mut self, channel: AttackChannel, range: DamageRange) {
        self.weapons[channel.index()] = range;
    }

    fn recalculate_damage(&mut self, _channel: AttackChannel) {
        self.recalculations += 1;
    }
}

/// A world of areas and entities
#[derive(Debug, Default)]
pub struct SandboxWorld {
    /// Area -> instanced?
    areas: HashMap<AreaId, bool>,
    entities: HashMap<EntityId, SandboxEntity>,
    next_id: u64,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// World whose entity ids start after `offset`, for hosts sharing one ledger
    pub fn with_id_offset(offset: u64) -> Self {
        SandboxWorld {
            next_id: offset,
            ..Self::default()
        }
    }

    /// Register an area; `instanced` marks dungeons and raids
    pub fn add_area(&mut self, area: AreaId, instanced: bool) {
        self.areas.insert(area, instanced);
    }

    /// Remove an area (entities inside keep pointing at it)
    pub fn remove_area(&mut self, area: AreaId) {
        self.areas.remove(&area);
    }

    /// Add an entity and return its id
    pub fn spawn(&mut self, entity: SandboxEntity) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity without any notification
    pub fn despawn(&mut self, id: EntityId) -> Option<SandboxEntity> {
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&SandboxEntity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Move an entity to another area
    pub fn move_to(&mut self, id: EntityId, area: Option<AreaId>) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.area = area;
        }
    }

    /// Presence of every player in an area
    pub fn roster(&self, area: AreaId) -> Vec<PlayerPresence> {
        self.entities
            .values()
            .filter(|e| e.kind == EntityKind::Player && e.area == Some(area))
            .filter_map(|e| e.presence.map(PlayerPresence::new))
            .collect()
    }

    /// Ids of living entities of a kind in an area
    pub fn living(&self, area: AreaId, kind: EntityKind) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, e)| e.kind == kind && e.area == Some(area) && e.is_alive())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

impl ScalingHost for SandboxWorld {
    type Entity = SandboxEntity;

    fn entity_kind(&self, entity: EntityId) -> Option<EntityKind> {
        self.entities.get(&entity).map(|e| e.kind)
    }

    fn area_of(&self, entity: EntityId) -> Option<AreaId> {
        self.entities.get(&entity).and_then(|e| e.area)
    }

    fn is_eligible_area(&self, area: AreaId) -> bool {
        self.areas.get(&area).copied().unwrap_or(false)
    }

    fn relevant_player_count(&self, area: AreaId, rules: &CountingRules) -> Option<u32> {
        if !self.areas.contains_key(&area) {
            return None;
        }
        Some(count_relevant(&self.roster(area), rules))
    }

    fn entity_mut(&mut self, entity: EntityId) -> Option<&mut SandboxEntity> {
        self.entities.get_mut(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_and_count() {
        let mut world = SandboxWorld::new();
        let dungeon = AreaId(1);
        let town = AreaId(2);
        world.add_area(dungeon, true);
        world.add_area(town, false);

        world.spawn(SandboxEntity::player(100, PresenceRole::Combatant).in_area(dungeon));
        world.spawn(SandboxEntity::player(100, PresenceRole::GameMaster).in_area(dungeon));
        world.spawn(SandboxEntity::player(100, PresenceRole::Combatant).in_area(town));
        world.spawn(SandboxEntity::proxy(50).in_area(dungeon));

        assert_eq!(world.roster(dungeon).len(), 2);
        assert_eq!(
            world.relevant_player_count(dungeon, &CountingRules::default()),
            Some(1)
        );
        assert_eq!(world.relevant_player_count(AreaId(99), &CountingRules::default()), None);
        assert!(world.is_eligible_area(dungeon));
        assert!(!world.is_eligible_area(town));
        assert!(!world.is_eligible_area(AreaId(99)));
    }

    #[test]
    fn test_take_damage() {
        let mut entity = SandboxEntity::hostile(100);
        assert_eq!(entity.take_damage(30), 30);
        assert_eq!(entity.take_damage(-5), 0);
        assert_eq!(entity.take_damage(500), 70);
        assert!(!entity.is_alive());
    }

    #[test]
    fn test_id_offset() {
        let mut world = SandboxWorld::with_id_offset(1000);
        assert_eq!(world.spawn(SandboxEntity::hostile(1)), EntityId(1001));
    }

    #[test]
    fn test_despawn() {
        let mut world = SandboxWorld::new();
        let id = world.spawn(SandboxEntity::hostile(100));
        assert!(world.contains(id));
        assert!(world.despawn(id).is_some());
        assert_eq!(world.entity_kind(id), None);
        assert!(world.entity_mut(id).is_none());
    }
}
