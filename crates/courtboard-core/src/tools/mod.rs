//! Tool system: turns gesture streams into board edits.

use crate::board::Board;
use crate::entities::{ConnectorKind, EntityId, ObjectKind, Team, TokenKind};
use crate::input::{GestureEvent, GesturePhase};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Offense,
    Defense,
    Ball,
    Cone,
    Erase,
    Pass,
    Move,
    Dribble,
    Freehand,
    Drag,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Offense,
        ToolKind::Defense,
        ToolKind::Ball,
        ToolKind::Cone,
        ToolKind::Erase,
        ToolKind::Pass,
        ToolKind::Move,
        ToolKind::Dribble,
        ToolKind::Freehand,
        ToolKind::Drag,
    ];

    /// Token created by a placement tool.
    pub fn token_kind(self) -> Option<TokenKind> {
        match self {
            ToolKind::Offense => Some(TokenKind::Player(Team::Offense)),
            ToolKind::Defense => Some(TokenKind::Player(Team::Defense)),
            ToolKind::Ball => Some(TokenKind::Object(ObjectKind::Ball)),
            ToolKind::Cone => Some(TokenKind::Object(ObjectKind::Cone)),
            _ => None,
        }
    }

    /// Connector drawn by a connector tool.
    pub fn connector_kind(self) -> Option<ConnectorKind> {
        match self {
            ToolKind::Pass => Some(ConnectorKind::Pass),
            ToolKind::Move => Some(ConnectorKind::Move),
            ToolKind::Dribble => Some(ConnectorKind::Dribble),
            _ => None,
        }
    }
}

/// In-flight edit that has not been committed to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum Transient {
    Stroke {
        points: Vec<Point>,
    },
    Connector {
        kind: ConnectorKind,
        from: Point,
        to: Point,
    },
    Drag {
        id: EntityId,
        /// Token position minus the pointer position at grab time.
        offset: Vec2,
        position: Point,
    },
}

/// Coarse interpreter state, derived from the transient slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    DrawingFreehand,
    DrawingConnector,
    Dragging,
}

/// Manages the current tool and its transient preview.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    transient: Option<Transient>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Any open transient is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.transient = None;
    }

    pub fn state(&self) -> GestureState {
        match self.transient {
            None => GestureState::Idle,
            Some(Transient::Stroke { .. }) => GestureState::DrawingFreehand,
            Some(Transient::Connector { .. }) => GestureState::DrawingConnector,
            Some(Transient::Drag { .. }) => GestureState::Dragging,
        }
    }

    /// The uncommitted edit to draw on top of the board, if any.
    pub fn preview(&self) -> Option<&Transient> {
        self.transient.as_ref()
    }

    /// Drop the open transient without committing it.
    pub fn cancel(&mut self) {
        if self.transient.take().is_some() {
            log::debug!("Gesture cancelled");
        }
    }

    /// Feed one gesture event. Returns true if the board or the preview changed.
    ///
    /// Events from non-primary pointers are ignored, except `Cancel`.
    pub fn handle_event(&mut self, event: &GestureEvent, board: &mut Board) -> bool {
        match event.phase {
            GesturePhase::Cancel => self.transient.take().is_some(),
            _ if !event.is_primary() => false,
            GesturePhase::Start => self.begin(event.position, board),
            GesturePhase::Move => self.update(event.position),
            GesturePhase::End => self.end(board),
        }
    }

    fn begin(&mut self, point: Point, board: &mut Board) -> bool {
        if let Some(stale) = self.transient.take() {
            log::debug!("Discarding unfinished gesture: {stale:?}");
        }

        let tool = self.current_tool;
        if let Some(kind) = tool.token_kind() {
            board.add_token(kind, point);
            return true;
        }
        if let Some(kind) = tool.connector_kind() {
            self.transient = Some(Transient::Connector {
                kind,
                from: point,
                to: point,
            });
            return true;
        }
        match tool {
            ToolKind::Erase => board.remove_nearest(point).is_some(),
            ToolKind::Freehand => {
                self.transient = Some(Transient::Stroke { points: vec![point] });
                true
            }
            ToolKind::Drag => match board.token_at(point) {
                Some(hit) => {
                    self.transient = Some(Transient::Drag {
                        id: hit.id,
                        offset: hit.position - point,
                        position: hit.position,
                    });
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn update(&mut self, point: Point) -> bool {
        match &mut self.transient {
            Some(Transient::Stroke { points }) => points.push(point),
            Some(Transient::Connector { to, .. }) => *to = point,
            Some(Transient::Drag { offset, position, .. }) => *position = point + *offset,
            None => return false,
        }
        true
    }

    /// Commit the transient exactly as previewed. The end point is not used.
    fn end(&mut self, board: &mut Board) -> bool {
        let Some(transient) = self.transient.take() else {
            return false;
        };
        match transient {
            Transient::Stroke { points } => {
                board.add_stroke(points);
            }
            Transient::Connector { kind, from, to } => {
                board.add_connector(kind, from, to);
            }
            Transient::Drag { id, position, .. } => {
                board.move_token(id, position);
            }
        }
        true
    }
}
