pub mod event;
pub mod player;
pub mod team;

pub use event::{Event, RegistrationStatus, RosterLists};
pub use player::{pool_for, Player, Pool, Position};
pub use team::{TeamSettings, DEFAULT_GUEST_WINDOW_HOURS};

/// Document ids exactly as the external store issues them.
pub type PlayerId = String;
pub type EventId = String;
pub type TeamId = String;
