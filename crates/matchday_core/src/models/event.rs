use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::player::{pool_for, Pool, Position};
use super::{EventId, PlayerId, TeamId};

/// Where a player stands on an event roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Unregistered,
    Registered,
    Reserved,
}

/// The two roster lists of an event document, the only fields this core
/// ever writes back.
///
/// `registered_players` order carries no meaning beyond display;
/// `reserve_players` order is the promotion priority and must only change
/// through the documented insertion rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterLists {
    #[serde(default)]
    pub registered_players: Vec<PlayerId>,
    #[serde(default)]
    pub reserve_players: Vec<PlayerId>,
}

impl RosterLists {
    pub fn status_of(&self, player_id: &str) -> RegistrationStatus {
        if self.registered_players.iter().any(|id| id == player_id) {
            RegistrationStatus::Registered
        } else if self.reserve_players.iter().any(|id| id == player_id) {
            RegistrationStatus::Reserved
        } else {
            RegistrationStatus::Unregistered
        }
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.status_of(player_id) != RegistrationStatus::Unregistered
    }

    /// Remove a player from the registered list. Returns whether an entry
    /// was removed.
    pub fn remove_registered(&mut self, player_id: &str) -> bool {
        if let Some(idx) = self.registered_players.iter().position(|id| id == player_id) {
            self.registered_players.remove(idx);
            true
        } else {
            false
        }
    }

    /// Remove a player from the reserve list, leaving the order of the
    /// remaining entries untouched. Returns whether an entry was removed.
    pub fn remove_reserve(&mut self, player_id: &str) -> bool {
        if let Some(idx) = self.reserve_players.iter().position(|id| id == player_id) {
            self.reserve_players.remove(idx);
            true
        } else {
            false
        }
    }

    /// Count of registered players classified into `pool`.
    pub fn registered_in_pool(
        &self,
        positions: &HashMap<PlayerId, Position>,
        pool: Pool,
    ) -> u32 {
        self.registered_players.iter().filter(|id| pool_for(positions, id) == pool).count() as u32
    }

    /// Structural invariants that hold regardless of positions: both lists
    /// duplicate-free and disjoint.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen: HashMap<&str, &'static str> = HashMap::new();
        for id in &self.registered_players {
            if seen.insert(id.as_str(), "registered").is_some() {
                return Err(format!("duplicate entry in registered_players: {}", id));
            }
        }
        for id in &self.reserve_players {
            match seen.insert(id.as_str(), "reserve") {
                Some("registered") => {
                    return Err(format!("player in both registered and reserve: {}", id));
                }
                Some(_) => {
                    return Err(format!("duplicate entry in reserve_players: {}", id));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// Event document as the store persists it. Capacities are per pool;
/// `None` means unlimited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub team_id: TeamId,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_goalkeepers: Option<u32>,
    #[serde(flatten)]
    pub rosters: RosterLists,
}

impl Event {
    pub fn new(id: impl Into<EventId>, team_id: impl Into<TeamId>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            date,
            max_players: None,
            max_goalkeepers: None,
            rosters: RosterLists::default(),
        }
    }

    pub fn with_capacities(
        mut self,
        max_players: Option<u32>,
        max_goalkeepers: Option<u32>,
    ) -> Self {
        self.max_players = max_players;
        self.max_goalkeepers = max_goalkeepers;
        self
    }

    pub fn pool_capacity(&self, pool: Pool) -> Option<u32> {
        match pool {
            Pool::Field => self.max_players,
            Pool::Goalkeeper => self.max_goalkeepers,
        }
    }

    /// Full invariant check: the structural list invariants plus the
    /// per-pool capacity bounds, evaluated against resolved positions.
    pub fn check_invariants(
        &self,
        positions: &HashMap<PlayerId, Position>,
    ) -> Result<(), String> {
        self.rosters.check_invariants()?;

        for pool in [Pool::Field, Pool::Goalkeeper] {
            if let Some(capacity) = self.pool_capacity(pool) {
                let count = self.rosters.registered_in_pool(positions, pool);
                if count > capacity {
                    return Err(format!(
                        "over capacity for {}: {} registered, {} allowed",
                        pool.display_name(),
                        count,
                        capacity
                    ));
                }
            }
        }
        Ok(())
    }
}
