//! Ball and cone tokens.

use super::{EntityId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Ball,
    Cone,
}

impl ObjectKind {
    pub fn color(self) -> SerializableColor {
        match self {
            ObjectKind::Ball => SerializableColor::rgb(0xf97316),
            ObjectKind::Cone => SerializableColor::rgb(0xf59e0b),
        }
    }
}

/// A non-player token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectToken {
    pub id: EntityId,
    pub kind: ObjectKind,
    pub position: Point,
}

impl ObjectToken {
    pub fn new(kind: ObjectKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
        }
    }
}
