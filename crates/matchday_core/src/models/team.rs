use serde::{Deserialize, Serialize};

use super::TeamId;

/// Hours before kickoff at which an event opens to guests when the team
/// record carries no explicit setting.
pub const DEFAULT_GUEST_WINDOW_HOURS: i64 = 24;

/// Team settings consumed by the roster core. The surrounding app manages
/// the rest of the team document; only the guest window matters here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSettings {
    pub id: TeamId,
    /// Width of the member-priority window in hours. More than this many
    /// hours before kickoff, members are served before guests; at or
    /// inside it, first come first served. Zero or negative disables the
    /// window entirely.
    #[serde(default = "default_guest_window")]
    pub guest_registration_hours: i64,
}

fn default_guest_window() -> i64 {
    DEFAULT_GUEST_WINDOW_HOURS
}

impl TeamSettings {
    pub fn new(id: impl Into<TeamId>) -> Self {
        Self { id: id.into(), guest_registration_hours: DEFAULT_GUEST_WINDOW_HOURS }
    }

    pub fn with_guest_window(id: impl Into<TeamId>, hours: i64) -> Self {
        Self { id: id.into(), guest_registration_hours: hours }
    }
}
