//! The roster service: the one canonical implementation of Register,
//! Cancel, and CancelReserve that every screen calls.
//!
//! Each operation is a read-decide-commit cycle against the store. The
//! decision itself is pure and lives in the admission/promotion modules;
//! the commit is guarded by the version token of the snapshot it was
//! decided on, and the whole cycle retries on conflicts up to the
//! configured budget.

mod admission;
mod partition;
mod promotion;
mod window;


use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{pool_for, Event, EventId, PlayerId, Pool, RegistrationStatus, RosterLists};
use crate::store::{PlayerDirectory, RosterStore, TeamDirectory, TeamMembershipResolver};

use self::admission::{AdmissionContext, AdmissionDecision};
use self::promotion::{CancelDecision, CancelReserveDecision, CancellationContext};
use self::window::WindowPhase;

/// Caller-facing outcome of [`RosterService::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A slot was free; the player is on the registered roster.
    Admitted,
    /// No direct slot; the player holds the given 1-based spot on the
    /// reserve list.
    Waitlisted { queue_position: usize },
    /// The player already held a place. Nothing changed.
    AlreadyPresent { status: RegistrationStatus },
}

/// Caller-facing outcome of [`RosterService::cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Registration dropped; `promoted` names the reserve entry that
    /// moved up into the vacated slot, if anyone was eligible.
    Cancelled { promoted: Option<PlayerId> },
    /// The player was not on the registered list. Nothing changed.
    NotRegistered,
}

/// Caller-facing outcome of [`RosterService::cancel_reserve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReserveOutcome {
    /// Reserve spot given up. No slot freed, so nobody is promoted.
    Cancelled,
    /// The player was not on the reserve list. Nothing changed.
    NotReserved,
}

/// Display snapshot of an event roster with per-pool usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub event_id: EventId,
    pub registered: Vec<PlayerId>,
    pub reserve: Vec<PlayerId>,
    pub field: PoolUsage,
    pub goalkeepers: PoolUsage,
}

/// Occupancy of one capacity pool. `capacity: None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolUsage {
    pub used: u32,
    pub capacity: Option<u32>,
}

/// How a decision cycle ends: either the outcome was reached without a
/// write, or these lists must land behind the version guard first.
enum Step<T> {
    Done(T),
    Commit(RosterLists, T),
}

/// The admission and waitlist engine, wired to its four ports. Clones
/// share the underlying ports and are safe to hand to other threads.
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn RosterStore>,
    membership: Arc<dyn TeamMembershipResolver>,
    players: Arc<dyn PlayerDirectory>,
    teams: Arc<dyn TeamDirectory>,
    config: RosterConfig,
}

impl RosterService {
    pub fn new(
        store: Arc<dyn RosterStore>,
        membership: Arc<dyn TeamMembershipResolver>,
        players: Arc<dyn PlayerDirectory>,
        teams: Arc<dyn TeamDirectory>,
    ) -> Self {
        Self { store, membership, players, teams, config: RosterConfig::default() }
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = config;
        self
    }

    /// Wire all four ports to one backend. This is the usual way to set
    /// up a [`MemoryRosterStore`](crate::store::MemoryRosterStore), which
    /// implements them all.
    pub fn with_backend<B>(backend: Arc<B>) -> Self
    where
        B: RosterStore + TeamMembershipResolver + PlayerDirectory + TeamDirectory + 'static,
    {
        Self::new(backend.clone(), backend.clone(), backend.clone(), backend)
    }

    /// Service over the process-wide in-memory store, for embeddings that
    /// keep the whole document set in process.
    pub fn shared() -> Self {
        Self::with_backend(Arc::clone(&crate::store::memory::SHARED_STORE))
    }

    // ========================
    // Operations
    // ========================

    /// Attempt to register a player for an event at the current time.
    pub fn register(&self, event_id: &str, player_id: &str) -> Result<RegisterOutcome> {
        self.register_at(event_id, player_id, Utc::now())
    }

    /// Clock-explicit variant of [`RosterService::register`].
    pub fn register_at(
        &self,
        event_id: &str,
        player_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RegisterOutcome> {
        let outcome = self.with_version_guard(event_id, "register", |event| {
            let status = event.rosters.status_of(player_id);
            if status != RegistrationStatus::Unregistered {
                return Ok(Step::Done(RegisterOutcome::AlreadyPresent { status }));
            }

            let phase = self.window_phase(event, now)?;

            // One batched profile read: the candidate plus everyone whose
            // pool counts against a capacity.
            let mut profile_ids = Vec::with_capacity(event.rosters.registered_players.len() + 1);
            profile_ids.push(player_id.to_string());
            profile_ids.extend(event.rosters.registered_players.iter().cloned());
            let positions = self.players.positions_of(&profile_ids)?;
            if !positions.contains_key(player_id) {
                return Err(RosterError::player_not_found(player_id));
            }
            let candidate_pool = pool_for(&positions, player_id);

            // Membership only matters while the window holds, and then for
            // the candidate and the reserve entries being partitioned.
            let members = if phase.is_member_priority() {
                let mut member_ids = Vec::with_capacity(event.rosters.reserve_players.len() + 1);
                member_ids.push(player_id.to_string());
                member_ids.extend(event.rosters.reserve_players.iter().cloned());
                self.membership.members_of(&event.team_id, &member_ids)?
            } else {
                HashSet::new()
            };

            let context = AdmissionContext {
                candidate_id: player_id,
                candidate_pool,
                positions: &positions,
                members: &members,
                phase,
            };
            Ok(match admission::attempt(event, &context) {
                AdmissionDecision::AlreadyPresent(status) => {
                    Step::Done(RegisterOutcome::AlreadyPresent { status })
                }
                AdmissionDecision::Admitted { rosters } => {
                    Step::Commit(rosters, RegisterOutcome::Admitted)
                }
                AdmissionDecision::Waitlisted { rosters } => {
                    let queue_position = rosters
                        .reserve_players
                        .iter()
                        .position(|id| id == player_id)
                        .map_or(rosters.reserve_players.len(), |idx| idx + 1);
                    Step::Commit(rosters, RegisterOutcome::Waitlisted { queue_position })
                }
            })
        })?;

        match &outcome {
            RegisterOutcome::Admitted => {
                log::info!("Player {} admitted to event {}", player_id, event_id);
            }
            RegisterOutcome::Waitlisted { queue_position } => {
                log::info!(
                    "Player {} waitlisted for event {} at spot {}",
                    player_id,
                    event_id,
                    queue_position
                );
            }
            RegisterOutcome::AlreadyPresent { .. } => {
                log::debug!("Register no-op for player {} on event {}", player_id, event_id);
            }
        }
        Ok(outcome)
    }

    /// Cancel a registration at the current time, promoting the first
    /// eligible reserve entry into the vacated slot.
    pub fn cancel(&self, event_id: &str, player_id: &str) -> Result<CancelOutcome> {
        self.cancel_at(event_id, player_id, Utc::now())
    }

    /// Clock-explicit variant of [`RosterService::cancel`].
    pub fn cancel_at(
        &self,
        event_id: &str,
        player_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CancelOutcome> {
        let outcome = self.with_version_guard(event_id, "cancel", |event| {
            if event.rosters.status_of(player_id) != RegistrationStatus::Registered {
                return Ok(Step::Done(CancelOutcome::NotRegistered));
            }

            let phase = self.window_phase(event, now)?;

            // One batched profile read: the leaver decides the vacated
            // pool, the reserve entries their promotion eligibility.
            let mut profile_ids = Vec::with_capacity(event.rosters.reserve_players.len() + 1);
            profile_ids.push(player_id.to_string());
            profile_ids.extend(event.rosters.reserve_players.iter().cloned());
            let positions = self.players.positions_of(&profile_ids)?;
            if !positions.contains_key(player_id) {
                return Err(RosterError::player_not_found(player_id));
            }
            let vacated_pool = pool_for(&positions, player_id);

            let members = if phase.is_member_priority() {
                self.membership.members_of(&event.team_id, &event.rosters.reserve_players)?
            } else {
                HashSet::new()
            };

            let context = CancellationContext {
                leaver_id: player_id,
                vacated_pool,
                positions: &positions,
                members: &members,
                phase,
            };
            Ok(match promotion::on_cancel(event, &context) {
                CancelDecision::NotRegistered => Step::Done(CancelOutcome::NotRegistered),
                CancelDecision::Cancelled { rosters, promoted } => {
                    Step::Commit(rosters, CancelOutcome::Cancelled { promoted })
                }
            })
        })?;

        match &outcome {
            CancelOutcome::Cancelled { promoted: Some(promoted) } => {
                log::info!(
                    "Player {} cancelled on event {}; {} promoted from the reserve",
                    player_id,
                    event_id,
                    promoted
                );
            }
            CancelOutcome::Cancelled { promoted: None } => {
                log::info!("Player {} cancelled on event {}; slot stays open", player_id, event_id);
            }
            CancelOutcome::NotRegistered => {
                log::debug!("Cancel no-op for player {} on event {}", player_id, event_id);
            }
        }
        Ok(outcome)
    }

    /// Give up a reserve spot. Never promotes anyone: no registered slot
    /// frees up, and the remaining reserve order is untouched.
    pub fn cancel_reserve(&self, event_id: &str, player_id: &str) -> Result<CancelReserveOutcome> {
        let outcome = self.with_version_guard(event_id, "cancel_reserve", |event| {
            Ok(match promotion::on_cancel_reserve(event, player_id) {
                CancelReserveDecision::NotReserved => Step::Done(CancelReserveOutcome::NotReserved),
                CancelReserveDecision::Cancelled { rosters } => {
                    Step::Commit(rosters, CancelReserveOutcome::Cancelled)
                }
            })
        })?;

        match &outcome {
            CancelReserveOutcome::Cancelled => {
                log::info!("Player {} left the reserve of event {}", player_id, event_id);
            }
            CancelReserveOutcome::NotReserved => {
                log::debug!("Reserve cancel no-op for player {} on event {}", player_id, event_id);
            }
        }
        Ok(outcome)
    }

    // ========================
    // Queries
    // ========================

    /// Where a player currently stands on an event roster.
    pub fn status(&self, event_id: &str, player_id: &str) -> Result<RegistrationStatus> {
        let snapshot = self.store.load(event_id)?;
        Ok(snapshot.value.rosters.status_of(player_id))
    }

    /// Display snapshot of an event roster with per-pool usage.
    pub fn roster_view(&self, event_id: &str) -> Result<RosterView> {
        let event = self.store.load(event_id)?.value;
        let positions = self.players.positions_of(&event.rosters.registered_players)?;
        let field = PoolUsage {
            used: event.rosters.registered_in_pool(&positions, Pool::Field),
            capacity: event.max_players,
        };
        let goalkeepers = PoolUsage {
            used: event.rosters.registered_in_pool(&positions, Pool::Goalkeeper),
            capacity: event.max_goalkeepers,
        };
        Ok(RosterView {
            event_id: event.id,
            registered: event.rosters.registered_players,
            reserve: event.rosters.reserve_players,
            field,
            goalkeepers,
        })
    }

    // ========================
    // Internals
    // ========================

    fn window_phase(&self, event: &Event, now: DateTime<Utc>) -> Result<WindowPhase> {
        let hours = self
            .teams
            .guest_window_hours(&event.team_id)?
            .unwrap_or(self.config.default_guest_window_hours);
        Ok(WindowPhase::at(event.date, hours, now))
    }

    /// Run one read-decide-commit cycle, retrying on version conflicts up
    /// to the configured budget. The decision closure sees a fresh
    /// snapshot on every attempt.
    fn with_version_guard<T>(
        &self,
        event_id: &str,
        op: &str,
        mut decide: impl FnMut(&Event) -> Result<Step<T>>,
    ) -> Result<T> {
        let budget = self.config.attempt_budget();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let snapshot = self.store.load(event_id)?;
            match decide(&snapshot.value)? {
                Step::Done(outcome) => return Ok(outcome),
                Step::Commit(rosters, outcome) => {
                    if let Some(version) = self.store.commit(event_id, snapshot.version, &rosters)? {
                        log::debug!("{} on event {} committed version {}", op, event_id, version);
                        return Ok(outcome);
                    }
                    if attempts >= budget {
                        log::warn!(
                            "{} on event {} exhausted {} attempts on version conflicts",
                            op,
                            event_id,
                            attempts
                        );
                        return Err(RosterError::conflict(event_id, attempts));
                    }
                    log::debug!(
                        "{} on event {} lost a write race, retrying ({}/{})",
                        op,
                        event_id,
                        attempts,
                        budget
                    );
                }
            }
        }
    }
}
