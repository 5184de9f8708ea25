use std::collections::{HashMap, HashSet};

use crate::models::{pool_for, Event, PlayerId, Pool, Position, RosterLists};

use super::window::WindowPhase;

/// Resolved inputs for the cancellation side. `positions` must cover the
/// reserve entries (ids without a profile count as field players);
/// `members` is only consulted while the phase is member priority.
pub struct CancellationContext<'a> {
    pub leaver_id: &'a str,
    pub vacated_pool: Pool,
    pub positions: &'a HashMap<PlayerId, Position>,
    pub members: &'a HashSet<PlayerId>,
    pub phase: WindowPhase,
}

/// Outcome of a cancellation against one event snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelDecision {
    /// Leaver was not on the registered list; nothing to write.
    NotRegistered,
    /// Leaver removed; at most one reserve entry moved up into the slot.
    Cancelled {
        rosters: RosterLists,
        promoted: Option<PlayerId>,
    },
}

/// Outcome of a voluntary reserve cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReserveDecision {
    /// Leaver was not on the reserve list; nothing to write.
    NotReserved,
    /// Leaver removed from the reserve list. No slot freed up, so nobody
    /// is promoted.
    Cancelled { rosters: RosterLists },
}

/// Decide one cancellation: drop the leaver from the registered list and
/// pick the reserve entry, if any, that inherits the vacated slot.
pub fn on_cancel(event: &Event, ctx: &CancellationContext) -> CancelDecision {
    let mut rosters = event.rosters.clone();
    if !rosters.remove_registered(ctx.leaver_id) {
        return CancelDecision::NotRegistered;
    }

    let promoted = select_candidate(&rosters.reserve_players, ctx);
    if let Some(id) = &promoted {
        rosters.remove_reserve(id);
        rosters.registered_players.push(id.clone());
    }
    CancelDecision::Cancelled { rosters, promoted }
}

/// Decide one reserve cancellation. Never promotes.
pub fn on_cancel_reserve(event: &Event, leaver_id: &str) -> CancelReserveDecision {
    let mut rosters = event.rosters.clone();
    if !rosters.remove_reserve(leaver_id) {
        return CancelReserveDecision::NotReserved;
    }
    CancelReserveDecision::Cancelled { rosters }
}

/// First reserve entry eligible for the vacated slot, scanning in priority
/// order. During the window only members may move up, even if that leaves
/// the slot open; afterwards the scan is pure FIFO within the pool.
fn select_candidate(reserve: &[PlayerId], ctx: &CancellationContext) -> Option<PlayerId> {
    let member_priority = ctx.phase.is_member_priority();
    reserve
        .iter()
        .find(|id| {
            let id = id.as_str();
            pool_for(ctx.positions, id) == ctx.vacated_pool
                && (!member_priority || ctx.members.contains(id))
        })
        .cloned()
}
