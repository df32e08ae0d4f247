//! Player tokens.

use super::{EntityId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Team a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Offense,
    Defense,
}

impl Team {
    /// Outline color of the token glyph.
    pub fn color(self) -> SerializableColor {
        match self {
            Team::Offense => SerializableColor::rgb(0xe11d48),
            Team::Defense => SerializableColor::rgb(0x1d4ed8),
        }
    }

    /// Fill color of the token glyph.
    pub fn fill(self) -> SerializableColor {
        match self {
            Team::Offense => SerializableColor::rgb(0xffe4e6),
            Team::Defense => SerializableColor::rgb(0xdbeafe),
        }
    }

    /// Label for the `number`-th player of this team ("3" or "X3").
    pub fn label(self, number: usize) -> String {
        match self {
            Team::Offense => number.to_string(),
            Team::Defense => format!("X{number}"),
        }
    }
}

/// A player on the court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerToken {
    pub id: EntityId,
    pub team: Team,
    pub position: Point,
    pub label: String,
    pub color: SerializableColor,
}

impl PlayerToken {
    /// Create a player with the team's default color.
    pub fn new(team: Team, position: Point, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team,
            position,
            label: label.into(),
            color: team.color(),
        }
    }

    /// Defense tokens carry an extra cap glyph.
    pub fn has_cap(&self) -> bool {
        self.team == Team::Defense
    }
}
