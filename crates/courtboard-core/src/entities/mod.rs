//! Entity definitions for the play diagram.

mod connector;
mod object;
mod player;
mod stroke;

pub use connector::{ConnectorGeometry, ConnectorKind, TacticalConnector, connector_path};
pub use object::{ObjectKind, ObjectToken};
pub use player::{PlayerToken, Team};
pub use stroke::FreehandStroke;

use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities.
pub type EntityId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn rgb(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// What a token placement tool creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Player(Team),
    Object(ObjectKind),
}

/// Any entity that can live on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player(PlayerToken),
    Object(ObjectToken),
    Stroke(FreehandStroke),
    Connector(TacticalConnector),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Player(p) => p.id,
            Entity::Object(o) => o.id,
            Entity::Stroke(s) => s.id,
            Entity::Connector(c) => c.id,
        }
    }

    /// Position of point-like entities (tokens). Strokes and connectors have none.
    pub fn position(&self) -> Option<Point> {
        match self {
            Entity::Player(p) => Some(p.position),
            Entity::Object(o) => Some(o.position),
            Entity::Stroke(_) | Entity::Connector(_) => None,
        }
    }
}
