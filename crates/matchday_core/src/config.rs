use std::env;

use crate::models::DEFAULT_GUEST_WINDOW_HOURS;

pub const MAX_WRITE_ATTEMPTS_ENV: &str = "MATCHDAY_MAX_WRITE_ATTEMPTS";
pub const GUEST_WINDOW_HOURS_ENV: &str = "MATCHDAY_GUEST_WINDOW_HOURS";

const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 3;

/// Tuning knobs of the roster service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// How many read-decide-commit cycles an operation may run before a
    /// version conflict is surfaced to the caller. Never below 1.
    pub max_write_attempts: u32,
    /// Guest window applied when a team record carries no
    /// `guest_registration_hours` of its own.
    pub default_guest_window_hours: i64,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
            default_guest_window_hours: DEFAULT_GUEST_WINDOW_HOURS,
        }
    }
}

impl RosterConfig {
    /// Build a config from the defaults plus any environment overrides.
    /// Unset variables keep their defaults; present but malformed values
    /// are reported instead of silently ignored.
    pub fn from_env() -> Result<Self, String> {
        let mut config = RosterConfig::default();

        if let Some(attempts) = read_env(MAX_WRITE_ATTEMPTS_ENV)? {
            let attempts: u32 = attempts.parse().map_err(|e| {
                format!("Invalid {MAX_WRITE_ATTEMPTS_ENV}='{attempts}': {e}")
            })?;
            if attempts == 0 {
                return Err(format!("Invalid {MAX_WRITE_ATTEMPTS_ENV}: must be at least 1"));
            }
            config.max_write_attempts = attempts;
        }

        if let Some(hours) = read_env(GUEST_WINDOW_HOURS_ENV)? {
            config.default_guest_window_hours = hours.parse().map_err(|e| {
                format!("Invalid {GUEST_WINDOW_HOURS_ENV}='{hours}': {e}")
            })?;
        }

        Ok(config)
    }

    /// Attempt budget with the at-least-one floor applied, so a
    /// hand-built config with a zero cannot disable writes entirely.
    pub(crate) fn attempt_budget(&self) -> u32 {
        self.max_write_attempts.max(1)
    }
}

fn read_env(name: &str) -> Result<Option<String>, String> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Ok(Some(value.to_string()))
}
