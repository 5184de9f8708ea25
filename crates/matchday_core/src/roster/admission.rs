use std::collections::{HashMap, HashSet};

use crate::models::{Event, PlayerId, Pool, Position, RegistrationStatus, RosterLists};

use super::partition::partition_insert;
use super::window::WindowPhase;

/// Resolved inputs a registration decision needs besides the event
/// snapshot. Everything here comes out of the batched directory lookups;
/// the decision itself performs no I/O.
pub struct AdmissionContext<'a> {
    pub candidate_id: &'a str,
    pub candidate_pool: Pool,
    /// Positions of the registered players, for pool counting.
    pub positions: &'a HashMap<PlayerId, Position>,
    /// Team members among the candidate and the current reserve entries.
    /// Only consulted while the phase is member priority.
    pub members: &'a HashSet<PlayerId>,
    pub phase: WindowPhase,
}

/// Outcome of a registration attempt against one event snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Candidate already holds a place; nothing to write.
    AlreadyPresent(RegistrationStatus),
    /// A slot was free and the candidate takes it directly.
    Admitted { rosters: RosterLists },
    /// Pool full, or a guest arrived ahead of the window. The returned
    /// reserve list is already in priority order.
    Waitlisted { rosters: RosterLists },
}

/// Decide one registration attempt. Pure: the result describes the lists
/// to commit, the caller owns the write.
pub fn attempt(event: &Event, ctx: &AdmissionContext) -> AdmissionDecision {
    let status = event.rosters.status_of(ctx.candidate_id);
    if status != RegistrationStatus::Unregistered {
        return AdmissionDecision::AlreadyPresent(status);
    }

    let member_priority = ctx.phase.is_member_priority();
    let is_member = ctx.members.contains(ctx.candidate_id);

    let has_slot = match event.pool_capacity(ctx.candidate_pool) {
        None => true,
        Some(capacity) => {
            event.rosters.registered_in_pool(ctx.positions, ctx.candidate_pool) < capacity
        }
    };

    // A free slot is directly takeable unless the taker is a guest while
    // members still hold first refusal.
    if has_slot && (is_member || !member_priority) {
        let mut rosters = event.rosters.clone();
        rosters.registered_players.push(ctx.candidate_id.to_string());
        return AdmissionDecision::Admitted { rosters };
    }

    let mut rosters = event.rosters.clone();
    if member_priority {
        rosters.reserve_players = partition_insert(
            &event.rosters.reserve_players,
            ctx.candidate_id.to_string(),
            |id| ctx.members.contains(id),
        );
    } else {
        rosters.reserve_players.push(ctx.candidate_id.to_string());
    }
    AdmissionDecision::Waitlisted { rosters }
}
