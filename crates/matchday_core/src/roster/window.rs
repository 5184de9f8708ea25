use chrono::{DateTime, Duration, Utc};

/// Where an instant falls relative to an event's guest window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    /// More than the guest window before kickoff. Members take precedence
    /// over guests for free slots, waitlist placement, and promotion.
    MemberPriority,
    /// The window has elapsed (or is disabled). Strict first come, first
    /// served for everyone.
    FirstComeFirstServed,
}

impl WindowPhase {
    /// Classify `now` against the event date.
    ///
    /// The comparison is exact duration arithmetic: the window closes at
    /// the instant exactly `guest_window_hours` before the event, and that
    /// boundary instant already counts as first come, first served. A zero
    /// or negative window disables member priority outright, so past-dated
    /// events can never report an open window.
    pub fn at(event_date: DateTime<Utc>, guest_window_hours: i64, now: DateTime<Utc>) -> Self {
        if guest_window_hours <= 0 {
            return WindowPhase::FirstComeFirstServed;
        }
        if event_date - now > Duration::hours(guest_window_hours) {
            WindowPhase::MemberPriority
        } else {
            WindowPhase::FirstComeFirstServed
        }
    }

    pub fn is_member_priority(self) -> bool {
        matches!(self, WindowPhase::MemberPriority)
    }
}
