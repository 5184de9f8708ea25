use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::PlayerId;

/// Position vocabulary as stored on player documents.
///
/// Only the goalkeeper marker matters for capacity accounting; every other
/// value (including anything the parser does not recognize) counts against
/// the field pool. See [`Pool`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    /// Capacity pool this position registers against.
    pub fn pool(&self) -> Pool {
        if self.is_goalkeeper() {
            Pool::Goalkeeper
        } else {
            Pool::Field
        }
    }

    /// Total parse for store data: unrecognized values become a generic
    /// field position instead of an error.
    pub fn parse_lenient(value: &str) -> Position {
        Position::from_str(value).unwrap_or_default()
    }

    /// Get position display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::DF => "Defender",
            Position::MF => "Midfielder",
            Position::FW => "Forward",
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        // Missing position data counts as a field player.
        Position::MF
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GK" | "KEEPER" | "GOALKEEPER" => Ok(Position::GK),
            "DF" | "DEF" | "DEFENDER" => Ok(Position::DF),
            "MF" | "MID" | "MIDFIELDER" => Ok(Position::MF),
            "FW" | "FWD" | "FORWARD" | "STRIKER" => Ok(Position::FW),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Position::parse_lenient(&value)
    }
}

/// The two independent capacity pools of an event roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pool {
    Field,
    Goalkeeper,
}

impl Pool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Pool::Field => "field players",
            Pool::Goalkeeper => "goalkeepers",
        }
    }
}

/// Pool classification for a roster entry whose profile may be missing
/// from a directory read. Missing profiles count as field players, the
/// same rule as an unrecognized position value.
pub fn pool_for(positions: &HashMap<PlayerId, Position>, player_id: &str) -> Pool {
    positions.get(player_id).map(Position::pool).unwrap_or(Pool::Field)
}

/// Player profile as the core consumes it: the id the roster lists carry
/// plus the position that decides the capacity pool. Profile data is
/// read-only from this crate's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Position,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, position: Position) -> Self {
        Self { id: id.into(), name: name.into(), position }
    }

    pub fn pool(&self) -> Pool {
        self.position.pool()
    }
}
