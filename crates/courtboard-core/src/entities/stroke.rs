//! Freehand annotation strokes.

use super::{EntityId, SerializableColor};
use crate::geometry;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand drawing (series of points). Color and width are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandStroke {
    pub id: EntityId,
    /// Points in recording order.
    pub points: Vec<Point>,
    pub color: SerializableColor,
    pub width: f64,
}

impl FreehandStroke {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
        }
    }

    /// Continuous polyline through every recorded point.
    pub fn to_path(&self) -> BezPath {
        geometry::polyline(&self.points)
    }
}
