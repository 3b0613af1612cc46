//! CombatLifecycleBinder - drive stat scaling from combat notifications
//!
//! Per entity: `Unscaled --combat-enter--> Scaled --evade/death--> Unscaled`.

use crate::config::{PolicyConfig, Strategy};
use crate::host::{area_in_scope, ScalingHost};
use crate::ledger::{ApplyOutcome, RevertOutcome, ScalingLedger};
use crate::model;
use crate::types::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Scaling state of one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingState {
    Unscaled,
    Scaled,
}

/// Why a lifecycle event ended a scaling effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevertReason {
    Evade,
    Death,
    Despawn,
}

impl RevertReason {
    fn as_str(&self) -> &'static str {
        match self {
            RevertReason::Evade => "evade",
            RevertReason::Death => "death",
            RevertReason::Despawn => "despawn",
        }
    }
}

/// Reacts to combat enter / evade / death and applies or reverts stat scaling
#[derive(Debug, Default)]
pub struct CombatLifecycleBinder {
    ledger: ScalingLedger,
}

impl CombatLifecycleBinder {
    pub fn new(ledger: ScalingLedger) -> Self {
        CombatLifecycleBinder { ledger }
    }

    pub fn ledger(&self) -> &ScalingLedger {
        &self.ledger
    }

    pub fn state(&self, entity: EntityId) -> ScalingState {
        if self.ledger.is_applied(entity) {
            ScalingState::Scaled
        } else {
            ScalingState::Unscaled
        }
    }

    /// A hostile entity engaged an opponent
    ///
    /// Returns `None` when the entity is not eligible (wrong kind, scaling off,
    /// other strategy, area out of scope, or a host lookup failed).
    pub fn on_combat_enter<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        policy: &PolicyConfig,
        entity: EntityId,
        opponent: Option<EntityId>,
    ) -> Option<ApplyOutcome> {
        if !policy.enabled || policy.strategy != Strategy::StatMutation {
            return None;
        }
        if host.entity_kind(entity)? != EntityKind::Hostile {
            return None;
        }

        let Some(area) = host.area_of(entity) else {
            debug!(%entity, "scaling_skipped_no_area");
            return None;
        };
        if !area_in_scope(&*host, policy, area) {
            debug!(%entity, %area, "scaling_skipped_area_ineligible");
            return None;
        }

        let players = host.relevant_player_count(area, &policy.counting_rules())?;
        let multipliers = model::compute(players, policy);
        let target = host.entity_mut(entity)?;

        let outcome = self.ledger.apply(entity, target, multipliers, policy.scale_damage);
        match outcome {
            ApplyOutcome::Applied => info!(
                %entity,
                %area,
                opponent = ?opponent,
                players,
                health_factor = multipliers.health,
                damage_factor = multipliers.damage,
                "scaling_applied"
            ),
            ApplyOutcome::AlreadyApplied => debug!(%entity, "scaling_already_applied"),
            ApplyOutcome::Unity => debug!(%entity, players, "scaling_not_needed"),
        }
        Some(outcome)
    }

    /// The entity left combat and reset
    pub fn on_evade<H: ScalingHost + ?Sized>(&self, host: &mut H, entity: EntityId) -> RevertOutcome {
        self.revert(host, entity, RevertReason::Evade)
    }

    /// The entity died
    pub fn on_death<H: ScalingHost + ?Sized>(&self, host: &mut H, entity: EntityId) -> RevertOutcome {
        self.revert(host, entity, RevertReason::Death)
    }

    /// The entity is about to be destroyed
    ///
    /// Reverts when the entity is still reachable; otherwise the record is
    /// dropped so it cannot leak.
    pub fn on_despawn<H: ScalingHost + ?Sized>(&self, host: &mut H, entity: EntityId) -> RevertOutcome {
        if host.entity_mut(entity).is_some() {
            return self.revert(host, entity, RevertReason::Despawn);
        }
        if self.ledger.discard(entity) {
            info!(%entity, "scaling_discarded");
            RevertOutcome::Reverted
        } else {
            RevertOutcome::NotScaled
        }
    }

    /// Drop records of entities the host no longer knows about
    pub fn prune<H: ScalingHost + ?Sized>(&self, host: &H) -> usize {
        let pruned = self.ledger.prune(|id| host.entity_kind(id).is_some());
        if pruned > 0 {
            info!(pruned, "scaling_records_pruned");
        }
        pruned
    }

    // Revert ignores the policy: an effect applied before a reload that
    // disabled scaling must still be undone.
    fn revert<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        entity: EntityId,
        reason: RevertReason,
    ) -> RevertOutcome {
        let Some(target) = host.entity_mut(entity) else {
            return RevertOutcome::NotScaled;
        };
        let outcome = self.ledger.revert(entity, target);
        if outcome == RevertOutcome::Reverted {
            info!(%entity, reason = reason.as_str(), "scaling_reverted");
        }
        outcome
    }
}
