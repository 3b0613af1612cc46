//! autobalance_core - Player-count difficulty scaling for hostile entities
//!
//! This library provides:
//! - PolicyConfig / PolicyHandle: Tunable scaling policy with atomic reload
//! - Multiplier models: Ratio and additive player-count -> factor functions
//! - ScalingLedger: Apply-once / revert-once bookkeeping of scaled entity stats
//! - DamageInterceptor: Stateless rescaling of damage in flight
//! - CombatLifecycleBinder: Combat enter / evade / death glue
//! - ScalingEngine: All of the above behind one service object

pub mod census;
pub mod config;
pub mod engine;
pub mod host;
pub mod intercept;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod prelude;
pub mod sandbox;
pub mod types;

// Re-export core types for convenience
pub use census::{count_relevant, PlayerPresence, PresenceRole};
pub use config::{
    default_policy, load_policy, parse_policy, ConfigError, CountingRules, ModelKind,
    PolicyConfig, PolicyHandle, Strategy,
};
pub use engine::ScalingEngine;
pub use host::{ScalableEntity, ScalingHost};
pub use intercept::{DamageEvent, DamageInterceptor, Direction};
pub use ledger::{ApplyOutcome, EntityScalingRecord, RevertOutcome, ScalingLedger};
pub use lifecycle::{CombatLifecycleBinder, ScalingState};
pub use model::Multipliers;
pub use types::{AreaId, AttackChannel, DamageKind, DamageRange, EntityId, EntityKind};
