//! Tactical connectors (pass, move, dribble).

use super::{EntityId, SerializableColor};
use crate::geometry;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of action a connector represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Dashed line with arrowhead.
    Pass,
    /// Solid line with arrowhead.
    Move,
    /// Wavy line with arrowhead.
    Dribble,
}

impl ConnectorKind {
    pub fn color(self) -> SerializableColor {
        match self {
            ConnectorKind::Pass => SerializableColor::rgb(0x0a7ea4),
            ConnectorKind::Move => SerializableColor::rgb(0x222222),
            ConnectorKind::Dribble => SerializableColor::rgb(0xf97316),
        }
    }
}

/// Parameters for turning a connector into geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorGeometry {
    pub dash_length: f64,
    pub gap_length: f64,
    pub wave_count: u32,
    pub wave_amplitude: f64,
    pub arrow_head_size: f64,
}

/// A typed directed line between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticalConnector {
    pub id: EntityId,
    pub kind: ConnectorKind,
    pub from: Point,
    pub to: Point,
}

impl TacticalConnector {
    pub fn new(kind: ConnectorKind, from: Point, to: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            from,
            to,
        }
    }
}

/// Shaft and arrowhead for a connector of `kind` from `from` to `to`.
///
/// Zero-length connectors get no arrowhead.
pub fn connector_path(kind: ConnectorKind, from: Point, to: Point, params: &ConnectorGeometry) -> BezPath {
    let mut path = match kind {
        ConnectorKind::Pass => geometry::dashed_path(from, to, params.dash_length, params.gap_length),
        ConnectorKind::Move => geometry::straight_path(from, to),
        ConnectorKind::Dribble => geometry::wavy_path(from, to, params.wave_count, params.wave_amplitude),
    };
    if (to - from).hypot() >= f64::EPSILON {
        let head = geometry::arrow_head(to, from, params.arrow_head_size);
        path.extend(head.elements().iter().copied());
    }
    path
}
