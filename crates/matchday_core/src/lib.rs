//! # matchday_core - Event Roster Admission & Waitlist Engine
//!
//! This library decides who plays and who waits when players sign up for
//! recurring team events. Field players and goalkeepers compete for
//! separate capacity pools, and until shortly before kickoff team members
//! are seated ahead of guests.
//!
//! ## Features
//! - Two capacity pools per event (field players, goalkeepers)
//! - Member-priority window that flips to first-come-first-served near kickoff
//! - Ordered waitlist with automatic promotion on cancellation
//! - Optimistic versioned writes with bounded retry
//! - JSON API for easy integration

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod store;

// Re-export main API functions
pub use api::{
    cancel_json, cancel_reserve_json, register_json, roster_view_json, status_json, RosterRequest,
    RosterViewRequest,
};
pub use error::{Result, RosterError};

// Re-export the roster service and its outcomes
pub use roster::{
    CancelOutcome, CancelReserveOutcome, PoolUsage, RegisterOutcome, RosterService, RosterView,
};

// Re-export model types
pub use models::{
    Event, EventId, Player, PlayerId, Pool, Position, RegistrationStatus, RosterLists, TeamId,
    TeamSettings,
};

// Re-export storage ports
pub use store::{
    MemoryRosterStore, PlayerDirectory, RosterStore, TeamDirectory, TeamMembershipResolver,
    Versioned,
};

// Re-export configuration
pub use config::RosterConfig;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
