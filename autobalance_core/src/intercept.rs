//! DamageInterceptor - rescale damage in flight
//!
//! Nothing is stored: every event recomputes the factor from the live player
//! count and one policy snapshot, so there is nothing to revert.

use crate::config::{PolicyConfig, Strategy};
use crate::host::{area_in_scope, ScalingHost};
use crate::model;
use crate::types::{DamageKind, EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One damage event offered by the host's damage pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    pub kind: DamageKind,
    pub source: EntityId,
    pub target: EntityId,
    pub amount: i32,
}

impl DamageEvent {
    pub fn new(kind: DamageKind, source: EntityId, target: EntityId, amount: i32) -> Self {
        DamageEvent {
            kind,
            source,
            target,
            amount,
        }
    }
}

/// Who is hitting whom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Hostile creature hitting a player or player proxy
    MonsterToPlayer,
    /// Player or player proxy hitting a hostile creature
    PlayerToMonster,
}

impl Direction {
    /// Classify a source/target pair; `None` for fights the engine ignores
    pub fn between(source: EntityKind, target: EntityKind) -> Option<Direction> {
        match (source, target) {
            (EntityKind::Hostile, t) if t.is_player_side() => Some(Direction::MonsterToPlayer),
            (s, EntityKind::Hostile) if s.is_player_side() => Some(Direction::PlayerToMonster),
            _ => None,
        }
    }
}

/// Stateless damage rescaler
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageInterceptor;

impl DamageInterceptor {
    pub fn new() -> Self {
        DamageInterceptor
    }

    /// Rewrite the amount of a damage event
    ///
    /// Returns the amount unchanged for non-positive damage and for events out
    /// of scope: strategy not `DamageInterception`, scaling disabled, source and
    /// target in different areas, ineligible area, or any failed host lookup.
    pub fn intercept<H: ScalingHost + ?Sized>(
        &self,
        host: &H,
        policy: &PolicyConfig,
        event: &DamageEvent,
    ) -> i32 {
        if event.amount <= 0 {
            return event.amount;
        }
        let Some(factor) = self.factor_for(host, policy, event.source, event.target) else {
            return event.amount;
        };

        let scaled = scale_amount(event.amount, factor);
        trace!(
            kind = ?event.kind,
            source = %event.source,
            target = %event.target,
            amount = event.amount,
            factor,
            scaled,
            "damage_scaled"
        );
        scaled
    }

    /// Factor that would apply between two entities right now
    pub fn factor_for<H: ScalingHost + ?Sized>(
        &self,
        host: &H,
        policy: &PolicyConfig,
        source: EntityId,
        target: EntityId,
    ) -> Option<f64> {
        if policy.strategy != Strategy::DamageInterception || !policy.enabled {
            return None;
        }

        let direction = Direction::between(host.entity_kind(source)?, host.entity_kind(target)?)?;

        let area = host.area_of(source)?;
        if host.area_of(target)? != area || !area_in_scope(host, policy, area) {
            return None;
        }

        let players = host.relevant_player_count(area, &policy.counting_rules())?;
        let factor = match direction {
            Direction::MonsterToPlayer => model::monster_strength(players, policy),
            Direction::PlayerToMonster => model::player_compensation(players, policy),
        };
        Some(factor)
    }
}

/// Multiply and round to nearest; never negative, never from a bad factor
pub fn scale_amount(amount: i32, factor: f64) -> i32 {
    if amount <= 0 || !(factor > 0.0 && factor.is_finite()) {
        return amount;
    }
    let scaled = (f64::from(amount) * factor).round();
    if scaled >= f64::from(i32::MAX) {
        i32::MAX
    } else {
        scaled.max(0.0) as i32
    }
}
