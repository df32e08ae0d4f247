//! Frame description handed to a presentation layer.
//!
//! A [`Scene`] is a flat, ordered list of filled and/or stroked paths plus
//! text labels. It owns no renderer state; backends walk it in order.

use crate::board::Board;
use crate::config::EditorConfig;
use crate::court::{CourtCache, CourtMarking};
use crate::entities::{
    ConnectorKind, EntityId, FreehandStroke, ObjectKind, ObjectToken, PlayerToken, SerializableColor,
    connector_path,
};
use crate::geometry;
use crate::tools::{ToolManager, Transient};
use kurbo::{BezPath, Point, Size};

const COURT_FILL: SerializableColor = SerializableColor::rgb(0xf7fbff);
const COURT_STROKE: SerializableColor = SerializableColor::rgb(0xbed3ff);
const RIM_COLOR: SerializableColor = SerializableColor::rgb(0xff6b6b);
const BACKBOARD_COLOR: SerializableColor = SerializableColor::rgb(0x666666);
const COURT_LINE_WIDTH: f64 = 2.0;
const TOKEN_OUTLINE_WIDTH: f64 = 2.0;
const CONNECTOR_WIDTH: f64 = 3.0;

/// Stroke color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: SerializableColor, width: f64) -> Self {
        Self { color, width }
    }
}

/// Which part of the board a draw item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Court,
    Strokes,
    Connectors,
    Preview,
    Tokens,
}

/// One path to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub path: BezPath,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<StrokeStyle>,
}

impl DrawItem {
    fn stroked(layer: Layer, path: BezPath, stroke: StrokeStyle) -> Self {
        Self {
            layer,
            path,
            fill: None,
            stroke: Some(stroke),
        }
    }

    fn filled(layer: Layer, path: BezPath, fill: SerializableColor, stroke: Option<StrokeStyle>) -> Self {
        Self {
            layer,
            path,
            fill: Some(fill),
            stroke,
        }
    }
}

/// Centered text drawn on top of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Point,
    pub text: String,
    pub color: SerializableColor,
    pub size: f64,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Size,
    pub items: Vec<DrawItem>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Items belonging to `layer`, in drawing order.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| item.layer == layer)
    }
}

/// Build the frame for the current board, tool preview and surface size.
///
/// Drawing order: court, freehand strokes, connectors, transient preview,
/// tokens. A zero-size surface produces a scene without court markings.
pub fn build_scene(board: &Board, tools: &ToolManager, size: Size, court: &mut CourtCache) -> Scene {
    let config = board.config();
    let state = board.state();
    let mut scene = Scene {
        size,
        items: Vec::new(),
        labels: Vec::new(),
    };

    if let Some(layout) = court.get(size) {
        for (marking, path) in layout.markings() {
            scene.items.push(court_item(marking, path.clone()));
        }
    }

    for stroke in &state.strokes {
        scene.items.push(stroke_item(Layer::Strokes, stroke));
    }
    for connector in &state.connectors {
        scene.items.push(connector_item(
            Layer::Connectors,
            connector.kind,
            connector.from,
            connector.to,
            config,
        ));
    }

    let mut dragged: Option<(EntityId, Point)> = None;
    match tools.preview() {
        Some(Transient::Stroke { points }) => {
            scene.items.push(DrawItem::stroked(
                Layer::Preview,
                geometry::polyline(points),
                StrokeStyle::new(config.stroke_color, config.stroke_width),
            ));
        }
        Some(Transient::Connector { kind, from, to }) => {
            scene.items.push(connector_item(Layer::Preview, *kind, *from, *to, config));
        }
        Some(Transient::Drag { id, position, .. }) => dragged = Some((*id, *position)),
        None => {}
    }
    let at = |id: EntityId, position: Point| match dragged {
        Some((drag_id, preview)) if drag_id == id => preview,
        _ => position,
    };

    for player in state.players() {
        push_player(&mut scene, player, at(player.id, player.position), config.token_radius);
    }
    for object in state.objects() {
        scene.items.push(object_item(object, at(object.id, object.position), config.token_radius));
    }

    scene
}

fn court_item(marking: CourtMarking, path: BezPath) -> DrawItem {
    if marking == CourtMarking::Boundary {
        return DrawItem::filled(
            Layer::Court,
            path,
            COURT_FILL,
            Some(StrokeStyle::new(COURT_STROKE, COURT_LINE_WIDTH)),
        );
    }
    let color = if marking.is_rim() {
        RIM_COLOR
    } else if marking.is_backboard() {
        BACKBOARD_COLOR
    } else {
        COURT_STROKE
    };
    let width = if color == COURT_STROKE {
        COURT_LINE_WIDTH
    } else {
        COURT_LINE_WIDTH + 1.0
    };
    DrawItem::stroked(Layer::Court, path, StrokeStyle::new(color, width))
}

fn stroke_item(layer: Layer, stroke: &FreehandStroke) -> DrawItem {
    DrawItem::stroked(layer, stroke.to_path(), StrokeStyle::new(stroke.color, stroke.width))
}

fn connector_item(layer: Layer, kind: ConnectorKind, from: Point, to: Point, config: &EditorConfig) -> DrawItem {
    let path = connector_path(kind, from, to, &config.connector_geometry());
    let width = match kind {
        ConnectorKind::Dribble => CONNECTOR_WIDTH - 1.0,
        ConnectorKind::Pass | ConnectorKind::Move => CONNECTOR_WIDTH,
    };
    DrawItem::stroked(layer, path, StrokeStyle::new(kind.color(), width))
}

fn push_player(scene: &mut Scene, player: &PlayerToken, center: Point, radius: f64) {
    scene.items.push(DrawItem::filled(
        Layer::Tokens,
        geometry::circle(center, radius),
        player.team.fill(),
        Some(StrokeStyle::new(player.color, TOKEN_OUTLINE_WIDTH)),
    ));
    if player.has_cap() {
        // Brim over the top of the token.
        scene.items.push(DrawItem::stroked(
            Layer::Tokens,
            geometry::arc(center, radius * 1.35, 210.0, 120.0),
            StrokeStyle::new(player.color, TOKEN_OUTLINE_WIDTH + 1.0),
        ));
    }
    scene.labels.push(Label {
        position: center,
        text: player.label.clone(),
        color: player.color,
        size: radius,
    });
}

fn object_item(object: &ObjectToken, center: Point, radius: f64) -> DrawItem {
    let outline = Some(StrokeStyle::new(SerializableColor::rgb(0x7c2d12), 1.0));
    match object.kind {
        ObjectKind::Ball => DrawItem::filled(
            Layer::Tokens,
            geometry::circle(center, radius * 0.6),
            object.kind.color(),
            outline,
        ),
        ObjectKind::Cone => {
            let triangle = [
                Point::new(center.x, center.y - radius * 0.8),
                Point::new(center.x + radius * 0.7, center.y + radius * 0.6),
                Point::new(center.x - radius * 0.7, center.y + radius * 0.6),
            ];
            DrawItem::filled(Layer::Tokens, geometry::polygon(&triangle), object.kind.color(), outline)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Team, TokenKind};
    use crate::input::GestureEvent;
    use crate::tools::ToolKind;

    const SIZE: Size = Size::new(400.0, 700.0);

    #[test]
    fn test_empty_board_has_court_only() {
        let board = Board::default();
        let scene = build_scene(&board, &ToolManager::new(), SIZE, &mut CourtCache::new());
        assert_eq!(scene.items.len(), CourtMarking::ALL.len());
        assert!(scene.items.iter().all(|i| i.layer == Layer::Court));
        assert_eq!(scene.items[0].fill, Some(COURT_FILL));
        assert!(scene.labels.is_empty());
    }

    #[test]
    fn test_zero_size_has_no_court() {
        let mut board = Board::default();
        board.add_token(TokenKind::Player(Team::Offense), Point::new(10.0, 10.0));
        let scene = build_scene(&board, &ToolManager::new(), Size::ZERO, &mut CourtCache::new());
        assert_eq!(scene.layer(Layer::Court).count(), 0);
        assert_eq!(scene.layer(Layer::Tokens).count(), 1);
    }

    #[test]
    fn test_defense_has_cap_and_label() {
        let mut board = Board::default();
        board.add_token(TokenKind::Player(Team::Offense), Point::new(10.0, 10.0));
        board.add_token(TokenKind::Player(Team::Defense), Point::new(50.0, 10.0));
        let scene = build_scene(&board, &ToolManager::new(), SIZE, &mut CourtCache::new());
        assert_eq!(scene.layer(Layer::Tokens).count(), 3);
        let labels: Vec<&str> = scene.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(labels, vec!["1", "X1"]);
    }

    #[test]
    fn test_connectors_use_kind_color() {
        let mut board = Board::default();
        board.add_connector(ConnectorKind::Pass, Point::ZERO, Point::new(100.0, 0.0));
        let scene = build_scene(&board, &ToolManager::new(), SIZE, &mut CourtCache::new());
        let item = scene.layer(Layer::Connectors).next().unwrap();
        assert_eq!(item.stroke.unwrap().color, ConnectorKind::Pass.color());
        assert!(item.fill.is_none());
    }

    #[test]
    fn test_preview_layer() {
        let mut board = Board::default();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Freehand);
        tools.handle_event(&GestureEvent::start(Point::new(5.0, 5.0)), &mut board);
        tools.handle_event(&GestureEvent::moved(Point::new(9.0, 5.0)), &mut board);

        let scene = build_scene(&board, &tools, SIZE, &mut CourtCache::new());
        let preview = scene.layer(Layer::Preview).next().unwrap();
        assert_eq!(preview.stroke.unwrap().width, board.config().stroke_width);
        assert_eq!(scene.layer(Layer::Strokes).count(), 0);
    }

    #[test]
    fn test_connector_preview_matches_committed_path() {
        let mut board = Board::default();
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Dribble);
        tools.handle_event(&GestureEvent::start(Point::ZERO), &mut board);
        tools.handle_event(&GestureEvent::moved(Point::new(120.0, 30.0)), &mut board);
        let previewed = build_scene(&board, &tools, SIZE, &mut CourtCache::new());
        let preview = previewed.layer(Layer::Preview).next().unwrap().clone();

        tools.handle_event(&GestureEvent::end(Point::new(120.0, 30.0)), &mut board);
        let committed = build_scene(&board, &tools, SIZE, &mut CourtCache::new());
        let item = committed.layer(Layer::Connectors).next().unwrap();
        assert_eq!(item.path, preview.path);
        assert_eq!(item.stroke, preview.stroke);
        assert_eq!(committed.layer(Layer::Preview).count(), 0);
    }

    #[test]
    fn test_drag_preview_moves_glyph() {
        let mut board = Board::default();
        let mut tools = ToolManager::new();
        board.add_token(TokenKind::Object(ObjectKind::Ball), Point::new(50.0, 50.0));
        tools.set_tool(ToolKind::Drag);
        tools.handle_event(&GestureEvent::start(Point::new(50.0, 50.0)), &mut board);
        tools.handle_event(&GestureEvent::moved(Point::new(150.0, 50.0)), &mut board);

        let scene = build_scene(&board, &tools, Size::ZERO, &mut CourtCache::new());
        let ball = scene.layer(Layer::Tokens).next().unwrap();
        let points = geometry::path_points(&ball.path);
        assert!(points.iter().all(|p| p.x > 100.0));
    }
}
