//! Prelude module for convenient imports
//!
//! ```rust
//! use autobalance_core::prelude::*;
//! ```

// Engine
pub use crate::engine::ScalingEngine;
pub use crate::lifecycle::ScalingState;

// Host seams
pub use crate::host::{ScalableEntity, ScalingHost};
pub use crate::types::{AreaId, AttackChannel, DamageKind, DamageRange, EntityId, EntityKind};

// Damage path
pub use crate::intercept::DamageEvent;

// Config
pub use crate::config::{CountingRules, ModelKind, PolicyConfig, PolicyHandle, Strategy};
