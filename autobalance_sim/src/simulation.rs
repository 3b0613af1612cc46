//! Encounter simulation: one boss against a party in a sandbox dungeon

use autobalance_core::model;
use autobalance_core::prelude::*;
use autobalance_core::sandbox::{SandboxEntity, SandboxWorld};
use autobalance_core::{ApplyOutcome, PresenceRole};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

const DUNGEON: AreaId = AreaId(1);

/// Encounter parameters
#[derive(Debug, Clone)]
pub struct EncounterSetup {
    pub players: u32,
    pub rounds: u32,
    pub boss_health: u32,
    pub boss_weapon: DamageRange,
    pub player_health: u32,
    pub player_weapon: DamageRange,
}

impl Default for EncounterSetup {
    fn default() -> Self {
        EncounterSetup {
            players: 1,
            rounds: 30,
            boss_health: 20_000,
            boss_weapon: DamageRange::new(150.0, 250.0),
            player_health: 3_000,
            player_weapon: DamageRange::new(180.0, 260.0),
        }
    }
}

/// What happened during an encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterReport {
    pub players: u32,
    /// Players counted by the policy's counting rules
    pub relevant_players: u32,
    pub model: ModelKind,
    pub strategy: Strategy,
    pub health_factor: f64,
    pub damage_factor: f64,
    /// Whether the boss's stats were mutated on pull
    pub scaled: bool,
    pub boss_max_health_before: u32,
    pub boss_max_health_engaged: u32,
    pub boss_max_health_after: u32,
    /// Boss health when the fight ended, before any revert
    pub boss_health_at_end: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub rounds_fought: u32,
    pub boss_killed: bool,
    pub party_wiped: bool,
}

/// Run one pull: combat enter, melee rounds, then death or evade
pub fn run(engine: &ScalingEngine, setup: &EncounterSetup, rng: &mut impl Rng) -> EncounterReport {
    let policy = engine.policy().snapshot();

    let mut world = SandboxWorld::new();
    world.add_area(DUNGEON, true);
    let boss = world.spawn(
        SandboxEntity::hostile(setup.boss_health)
            .with_weapon(AttackChannel::Primary, setup.boss_weapon)
            .in_area(DUNGEON),
    );
    for _ in 0..setup.players {
        world.spawn(
            SandboxEntity::player(setup.player_health, PresenceRole::Combatant)
                .with_weapon(AttackChannel::Primary, setup.player_weapon)
                .in_area(DUNGEON),
        );
    }

    let relevant = world
        .relevant_player_count(DUNGEON, &policy.counting_rules())
        .unwrap_or(0);
    let factors = model::compute(relevant, &policy);

    let before = max_health(&world, boss);
    let puller = world.living(DUNGEON, EntityKind::Player).first().copied();
    let outcome = engine.on_combat_enter(&mut world, boss, puller);
    let engaged = max_health(&world, boss);

    let mut report = EncounterReport {
        players: setup.players,
        relevant_players: relevant,
        model: policy.model,
        strategy: policy.strategy,
        health_factor: factors.health,
        damage_factor: factors.damage,
        scaled: outcome == Some(ApplyOutcome::Applied),
        boss_max_health_before: before,
        boss_max_health_engaged: engaged,
        boss_max_health_after: engaged,
        boss_health_at_end: 0,
        damage_dealt: 0,
        damage_taken: 0,
        rounds_fought: 0,
        boss_killed: false,
        party_wiped: false,
    };

    for round in 1..=setup.rounds {
        let party = world.living(DUNGEON, EntityKind::Player);
        if party.is_empty() {
            report.party_wiped = true;
            break;
        }
        report.rounds_fought = round;

        for &attacker in &party {
            let amount = roll(setup.player_weapon, rng);
            report.damage_dealt += u64::from(strike(engine, &mut world, attacker, boss, amount));
        }
        if !is_alive(&world, boss) {
            report.boss_killed = true;
            break;
        }

        // Boss swings with whatever its weapon currently reads, scaled or not
        let target = party[rng.gen_range(0..party.len())];
        let weapon = world
            .entity(boss)
            .map(|e| e.weapon_damage(AttackChannel::Primary))
            .unwrap_or_default();
        let amount = roll(weapon, rng);
        report.damage_taken += u64::from(strike(engine, &mut world, boss, target, amount));
        debug!(round, dealt = report.damage_dealt, taken = report.damage_taken, "round_done");
    }
    if !report.boss_killed && world.living(DUNGEON, EntityKind::Player).is_empty() {
        report.party_wiped = true;
    }

    report.boss_health_at_end = world.entity(boss).map(|e| e.health()).unwrap_or(0);
    if report.boss_killed {
        engine.on_death(&mut world, boss);
    } else {
        engine.on_evade(&mut world, boss);
    }
    report.boss_max_health_after = max_health(&world, boss);

    report
}

/// Route one melee hit through the engine and apply it
fn strike(
    engine: &ScalingEngine,
    world: &mut SandboxWorld,
    source: EntityId,
    target: EntityId,
    amount: i32,
) -> u32 {
    let event = DamageEvent::new(DamageKind::Melee, source, target, amount);
    let amount = engine.on_damage(&*world, &event);
    world
        .entity_mut(target)
        .map(|e| e.take_damage(amount))
        .unwrap_or(0)
}

fn roll(range: DamageRange, rng: &mut impl Rng) -> i32 {
    let low = range.min.min(range.max).max(0.0);
    let high = range.max.max(range.min).max(0.0);
    rng.gen_range(low..=high).round() as i32
}

fn max_health(world: &SandboxWorld, entity: EntityId) -> u32 {
    world.entity(entity).map(|e| e.max_health()).unwrap_or(0)
}

fn is_alive(world: &SandboxWorld, entity: EntityId) -> bool {
    world.entity(entity).map(|e| e.is_alive()).unwrap_or(false)
}
