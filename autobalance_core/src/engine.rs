//! ScalingEngine - one service object for a host to hold
//!
//! Bundles the live policy, the lifecycle binder (and its ledger) and the
//! damage interceptor. Every call takes exactly one policy snapshot.

use crate::config::{ConfigError, PolicyConfig, PolicyHandle};
use crate::host::ScalingHost;
use crate::intercept::{DamageEvent, DamageInterceptor};
use crate::ledger::{ApplyOutcome, RevertOutcome, ScalingLedger};
use crate::lifecycle::{CombatLifecycleBinder, ScalingState};
use crate::types::EntityId;
use std::path::Path;

/// Player-count scaling engine
#[derive(Debug, Default)]
pub struct ScalingEngine {
    policy: PolicyHandle,
    binder: CombatLifecycleBinder,
    interceptor: DamageInterceptor,
}

impl ScalingEngine {
    /// Create an engine around a shared policy handle
    pub fn new(policy: PolicyHandle) -> Self {
        Self::with_ledger(policy, ScalingLedger::new())
    }

    /// Create an engine with a specific ledger (e.g. one per world shard)
    pub fn with_ledger(policy: PolicyHandle, ledger: ScalingLedger) -> Self {
        ScalingEngine {
            policy,
            binder: CombatLifecycleBinder::new(ledger),
            interceptor: DamageInterceptor::new(),
        }
    }

    /// Engine with a fixed policy
    pub fn from_config(config: PolicyConfig) -> Self {
        Self::new(PolicyHandle::new(config))
    }

    pub fn policy(&self) -> &PolicyHandle {
        &self.policy
    }

    pub fn binder(&self) -> &CombatLifecycleBinder {
        &self.binder
    }

    pub fn state(&self, entity: EntityId) -> ScalingState {
        self.binder.state(entity)
    }

    /// Swap in a new policy; live effects keep their saved values
    pub fn reload(&self, config: PolicyConfig) {
        self.policy.replace(config);
    }

    /// Re-read the policy file; the old policy stays on failure
    pub fn reload_from(&self, path: &Path) -> Result<(), ConfigError> {
        self.policy.reload_from(path)
    }

    pub fn on_combat_enter<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        entity: EntityId,
        opponent: Option<EntityId>,
    ) -> Option<ApplyOutcome> {
        let policy = self.policy.snapshot();
        self.binder.on_combat_enter(host, &policy, entity, opponent)
    }

    pub fn on_evade<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        entity: EntityId,
    ) -> RevertOutcome {
        self.binder.on_evade(host, entity)
    }

    pub fn on_death<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        entity: EntityId,
    ) -> RevertOutcome {
        self.binder.on_death(host, entity)
    }

    pub fn on_despawn<H: ScalingHost + ?Sized>(
        &self,
        host: &mut H,
        entity: EntityId,
    ) -> RevertOutcome {
        self.binder.on_despawn(host, entity)
    }

    /// Forget entities the host no longer knows about
    pub fn prune<H: ScalingHost + ?Sized>(&self, host: &H) -> usize {
        self.binder.prune(host)
    }

    /// Rewrite a damage amount in flight
    pub fn on_damage<H: ScalingHost + ?Sized>(&self, host: &H, event: &DamageEvent) -> i32 {
        let policy = self.policy.snapshot();
        self.interceptor.intercept(host, &policy, event)
    }
}
