//! In-memory implementation of all four store ports.
//!
//! Backs the test suite and single-process embeddings that keep the whole
//! document set in memory. Production deployments adapt their real
//! document store instead; this one still enforces the same version-guard
//! contract so callers cannot tell the difference.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;

use crate::error::{Result, RosterError};
use crate::models::{Event, EventId, Player, PlayerId, Position, RosterLists, TeamId, TeamSettings};

use super::{PlayerDirectory, RosterStore, TeamDirectory, TeamMembershipResolver, Versioned};

/// Process-wide store instance for embedders that share one document set
/// across an FFI or RPC boundary.
pub static SHARED_STORE: Lazy<Arc<MemoryRosterStore>> =
    Lazy::new(|| Arc::new(MemoryRosterStore::new()));

#[derive(Default)]
pub struct MemoryRosterStore {
    inner: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    events: HashMap<EventId, StoredEvent>,
    teams: HashMap<TeamId, TeamSettings>,
    members: HashMap<TeamId, HashSet<PlayerId>>,
    positions: HashMap<PlayerId, Position>,
}

struct StoredEvent {
    event: Event,
    version: u64,
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Seeding
    // ========================

    /// Insert or replace an event document. Replacing bumps the version,
    /// so commits against the old snapshot fail their guard.
    pub fn put_event(&self, event: Event) {
        let mut state = self.write();
        let version = state.events.get(&event.id).map_or(1, |stored| stored.version + 1);
        state.events.insert(event.id.clone(), StoredEvent { event, version });
    }

    pub fn put_team(&self, team: TeamSettings) {
        self.write().teams.insert(team.id.clone(), team);
    }

    pub fn put_player(&self, player: Player) {
        self.write().positions.insert(player.id, player.position);
    }

    pub fn add_member(&self, team_id: &str, player_id: &str) {
        self.write()
            .members
            .entry(team_id.to_string())
            .or_default()
            .insert(player_id.to_string());
    }

    // ========================
    // Inspection
    // ========================

    /// Copy of the current event document, mainly for assertions.
    pub fn event(&self, event_id: &str) -> Option<Event> {
        self.read().events.get(event_id).map(|stored| stored.event.clone())
    }

    pub fn version_of(&self, event_id: &str) -> Option<u64> {
        self.read().events.get(event_id).map(|stored| stored.version)
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.inner.read().expect("roster store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.inner.write().expect("roster store lock poisoned")
    }
}

impl RosterStore for MemoryRosterStore {
    fn load(&self, event_id: &str) -> Result<Versioned<Event>> {
        let state = self.read();
        let stored = state
            .events
            .get(event_id)
            .ok_or_else(|| RosterError::event_not_found(event_id))?;
        Ok(Versioned { value: stored.event.clone(), version: stored.version })
    }

    fn commit(
        &self,
        event_id: &str,
        expected_version: u64,
        rosters: &RosterLists,
    ) -> Result<Option<u64>> {
        let mut state = self.write();
        let stored = state
            .events
            .get_mut(event_id)
            .ok_or_else(|| RosterError::event_not_found(event_id))?;
        if stored.version != expected_version {
            return Ok(None);
        }
        debug_assert!(rosters.check_invariants().is_ok(), "commit with inconsistent lists");
        stored.event.rosters = rosters.clone();
        stored.version += 1;
        Ok(Some(stored.version))
    }
}

impl TeamMembershipResolver for MemoryRosterStore {
    fn members_of(&self, team_id: &str, player_ids: &[PlayerId]) -> Result<HashSet<PlayerId>> {
        let state = self.read();
        let Some(roster) = state.members.get(team_id) else {
            return Ok(HashSet::new());
        };
        Ok(player_ids.iter().filter(|id| roster.contains(id.as_str())).cloned().collect())
    }
}

impl PlayerDirectory for MemoryRosterStore {
    fn positions_of(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, Position>> {
        let state = self.read();
        Ok(player_ids
            .iter()
            .filter_map(|id| state.positions.get(id).map(|position| (id.clone(), *position)))
            .collect())
    }
}

impl TeamDirectory for MemoryRosterStore {
    fn guest_window_hours(&self, team_id: &str) -> Result<Option<i64>> {
        Ok(self.read().teams.get(team_id).map(|team| team.guest_registration_hours))
    }
}
