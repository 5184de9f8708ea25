//! Ports to the external world: the roster document store plus the three
//! read-only directories (membership, player profiles, team settings).
//!
//! All ports are synchronous and object-safe; embedders running on an
//! async runtime wrap the calls at their own boundary. The in-memory
//! implementation in [`memory`] backs tests and single-process
//! embeddings.

pub mod memory;

pub use memory::MemoryRosterStore;

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::models::{Event, PlayerId, Position, RosterLists};

/// A loaded document together with the version token that guards its
/// write-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

/// Authoritative registered/reserve lists per event.
pub trait RosterStore: Send + Sync {
    /// Load the event document and its current version token.
    fn load(&self, event_id: &str) -> Result<Versioned<Event>>;

    /// Write both roster lists in one shot, but only if the document is
    /// still at `expected_version`. Returns the new version on success and
    /// `None` when the document has moved on, in which case nothing may
    /// have been written. The write is all-or-nothing across both lists.
    fn commit(
        &self,
        event_id: &str,
        expected_version: u64,
        rosters: &RosterLists,
    ) -> Result<Option<u64>>;
}

/// Team membership facts, read-only for this core.
pub trait TeamMembershipResolver: Send + Sync {
    /// Which of `player_ids` are recognized members of `team_id`. One
    /// batched round trip per operation; ids not in the result are guests.
    fn members_of(&self, team_id: &str, player_ids: &[PlayerId]) -> Result<HashSet<PlayerId>>;
}

/// Player profile data, read-only for this core.
pub trait PlayerDirectory: Send + Sync {
    /// Positions for the given players, batched. Ids absent from the
    /// result have no stored profile; roster entries without one count as
    /// field players.
    fn positions_of(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, Position>>;
}

/// Team settings, read-only for this core.
pub trait TeamDirectory: Send + Sync {
    /// The team's guest window width in hours, or `None` when the team
    /// record is absent and the configured default applies.
    fn guest_window_hours(&self, team_id: &str) -> Result<Option<i64>>;
}
