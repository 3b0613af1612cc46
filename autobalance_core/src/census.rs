//! Relevant player counting
//!
//! Hosts own the roster of who is in an area; this module holds the policy of
//! who among them counts.

use crate::config::CountingRules;
use serde::{Deserialize, Serialize};

/// What a present player is doing in the area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceRole {
    /// Regular player
    Combatant,
    /// Game master / administrator with GM mode on
    GameMaster,
    /// Automated agent playing a character
    AutomatedAgent,
    /// Spectator or other non-combatant
    Observer,
}

/// One player physically present in an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPresence {
    pub role: PresenceRole,
}

impl PlayerPresence {
    pub fn new(role: PresenceRole) -> Self {
        PlayerPresence { role }
    }

    /// Whether this presence counts under the given rules
    pub fn counts(&self, rules: &CountingRules) -> bool {
        match self.role {
            PresenceRole::Combatant => true,
            PresenceRole::GameMaster => rules.count_game_masters,
            PresenceRole::AutomatedAgent => rules.count_automated_agents,
            PresenceRole::Observer => false,
        }
    }
}

/// Count the players relevant to scaling
pub fn count_relevant<'a, I>(roster: I, rules: &CountingRules) -> u32
where
    I: IntoIterator<Item = &'a PlayerPresence>,
{
    let count = roster.into_iter().filter(|p| p.counts(rules)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
