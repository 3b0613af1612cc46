//! StatScaler - write scaled stats into an entity and restore them

use super::EntityScalingRecord;
use crate::host::ScalableEntity;
use crate::types::{AttackChannel, DamageRange};

/// Capture the values a later restore needs
pub(crate) fn snapshot<E: ScalableEntity + ?Sized>(
    entity: &E,
    scale_damage: bool,
) -> (u32, Option<[DamageRange; 2]>) {
    let saved_damage = scale_damage.then(|| {
        [
            entity.weapon_damage(AttackChannel::Primary),
            entity.weapon_damage(AttackChannel::Offhand),
        ]
    });
    (entity.max_health(), saved_damage)
}

/// Scale an entity from the values saved in its record
///
/// Max health is `floor(saved * factor)` (never below 1); current health is
/// scaled and clamped to the new max. Only channels with a positive min and max
/// are scaled.
pub(crate) fn scale_entity<E: ScalableEntity + ?Sized>(entity: &mut E, record: &EntityScalingRecord) {
    let factors = record.multipliers;

    let new_max = scale_health(record.saved_max_health, factors.health).max(1);
    entity.set_max_health(new_max);
    let current = scale_health(entity.health(), factors.health).min(new_max);
    entity.set_health(current);

    if let Some(saved) = &record.saved_damage {
        for channel in AttackChannel::all() {
            let range = saved[channel.index()];
            if range.is_scalable() {
                entity.set_weapon_damage(*channel, range.scaled(factors.damage));
                entity.recalculate_damage(*channel);
            }
        }
    }
}

/// Put back everything the record saved
pub(crate) fn restore_entity<E: ScalableEntity + ?Sized>(entity: &mut E, record: &EntityScalingRecord) {
    entity.set_max_health(record.saved_max_health);
    if entity.health() > record.saved_max_health {
        entity.set_health(record.saved_max_health);
    }

    if let Some(saved) = &record.saved_damage {
        for channel in AttackChannel::all() {
            entity.set_weapon_damage(*channel, saved[channel.index()]);
            entity.recalculate_damage(*channel);
        }
    }
}

/// `floor(value * factor)`, saturating into `u32`
fn scale_health(value: u32, factor: f64) -> u32 {
    let scaled = (f64::from(value) * factor).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}
