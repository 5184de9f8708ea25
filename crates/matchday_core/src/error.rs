use thiserror::Error;

/// Error taxonomy of the roster core.
///
/// `AlreadyPresent` and the cancel variants are deliberately absent: an
/// attempt that finds the player already on a list is a no-op outcome,
/// not a failure (see the operation outcome enums in `roster`).
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("storage failure: {source}")]
    Storage {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("concurrent update on event {event_id} ({attempts} attempts)")]
    Conflict { event_id: String, attempts: u32 },
}

impl RosterError {
    pub fn event_not_found(event_id: impl Into<String>) -> Self {
        RosterError::EventNotFound { event_id: event_id.into() }
    }

    pub fn player_not_found(player_id: impl Into<String>) -> Self {
        RosterError::PlayerNotFound { player_id: player_id.into() }
    }

    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        RosterError::Storage { source: source.into() }
    }

    pub fn conflict(event_id: impl Into<String>, attempts: u32) -> Self {
        RosterError::Conflict { event_id: event_id.into(), attempts }
    }

    /// Whether a caller-side retry can reasonably succeed. Conflicts are
    /// transient by construction; storage failures depend on the backend
    /// but are usually network hiccups. Missing documents are not going
    /// to appear by retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            RosterError::Conflict { .. } => true,
            RosterError::Storage { .. } => true,
            RosterError::EventNotFound { .. } => false,
            RosterError::PlayerNotFound { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
