//! Board state and the history-wrapped entity store.

use crate::config::EditorConfig;
use crate::entities::{
    ConnectorKind, Entity, EntityId, FreehandStroke, ObjectKind, ObjectToken, PlayerToken,
    TacticalConnector, Team, TokenKind,
};
use crate::history::History;
use crate::hit_test::{self, TokenHit, TokenSlot};
use crate::timeline::{Action, Keyframe, Timeline};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything drawn on the court, plus the playback timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardState {
    pub offense: Vec<PlayerToken>,
    pub defense: Vec<PlayerToken>,
    pub balls: Vec<ObjectToken>,
    pub cones: Vec<ObjectToken>,
    pub strokes: Vec<FreehandStroke>,
    pub connectors: Vec<TacticalConnector>,
    pub timeline: Timeline,
}

impl BoardState {
    /// All players, offense first.
    pub fn players(&self) -> impl Iterator<Item = &PlayerToken> {
        self.offense.iter().chain(&self.defense)
    }

    pub fn player(&self, id: EntityId) -> Option<&PlayerToken> {
        self.players().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut PlayerToken> {
        self.offense
            .iter_mut()
            .chain(self.defense.iter_mut())
            .find(|p| p.id == id)
    }

    /// All balls and cones, balls first.
    pub fn objects(&self) -> impl Iterator<Item = &ObjectToken> {
        self.balls.iter().chain(&self.cones)
    }

    /// Mutable position of any token (player, ball or cone).
    pub fn token_position_mut(&mut self, id: EntityId) -> Option<&mut Point> {
        if self.player(id).is_some() {
            return self.player_mut(id).map(|p| &mut p.position);
        }
        self.balls
            .iter_mut()
            .chain(self.cones.iter_mut())
            .find(|o| o.id == id)
            .map(|o| &mut o.position)
    }

    /// Number of entities of every kind (timeline excluded).
    pub fn entity_count(&self) -> usize {
        self.offense.len()
            + self.defense.len()
            + self.balls.len()
            + self.cones.len()
            + self.strokes.len()
            + self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0 && self.timeline.is_empty()
    }

    /// Insert an entity into its partition.
    pub fn insert(&mut self, entity: Entity) {
        match entity {
            Entity::Player(p) => match p.team {
                Team::Offense => self.offense.push(p),
                Team::Defense => self.defense.push(p),
            },
            Entity::Object(o) => match o.kind {
                ObjectKind::Ball => self.balls.push(o),
                ObjectKind::Cone => self.cones.push(o),
            },
            Entity::Stroke(s) => self.strokes.push(s),
            Entity::Connector(c) => self.connectors.push(c),
        }
    }

    /// Remove the token at `slot`.
    fn remove_slot(&mut self, slot: TokenSlot) -> Entity {
        match slot {
            TokenSlot::Offense(i) => Entity::Player(self.offense.remove(i)),
            TokenSlot::Defense(i) => Entity::Player(self.defense.remove(i)),
            TokenSlot::Ball(i) => Entity::Object(self.balls.remove(i)),
            TokenSlot::Cone(i) => Entity::Object(self.cones.remove(i)),
        }
    }

    /// Serialize to the persisted JSON blob.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a persisted JSON blob. Missing sections default to empty.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

type ChangeListener = Box<dyn FnMut(u64)>;

/// The live board: current state, undo history and change notification.
///
/// Every mutating edit pushes a snapshot of the current state first, which
/// clears the redo stack. Edits that would change nothing push nothing.
pub struct Board {
    state: BoardState,
    history: History,
    config: EditorConfig,
    version: u64,
    listener: Option<ChangeListener>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("state", &self.state)
            .field("history", &self.history)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Board {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_state(config, BoardState::default())
    }

    /// Start from an existing state with empty history.
    pub fn with_state(config: EditorConfig, state: BoardState) -> Self {
        Self {
            state,
            history: History::with_limit(config.history_limit),
            config,
            version: 0,
            listener: None,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Monotonic counter bumped on every state change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a callback invoked with the new version after every change.
    pub fn set_listener(&mut self, listener: impl FnMut(u64) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    fn changed(&mut self) {
        self.version += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(self.version);
        }
    }

    /// Structural copy of the current state.
    pub fn snapshot(&self) -> BoardState {
        self.state.clone()
    }

    /// Replace the current state without recording history.
    pub fn restore(&mut self, state: BoardState) {
        self.state = state;
        self.changed();
    }

    /// Replace the current state and discard all history.
    pub fn reset(&mut self, state: BoardState) {
        self.history.clear();
        self.restore(state);
    }

    /// Push the current state onto the undo stack (call before making changes).
    fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Place a token. Players get the next team label and the team color.
    pub fn add_token(&mut self, kind: TokenKind, point: Point) -> EntityId {
        let entity = match kind {
            TokenKind::Player(team) => {
                let count = match team {
                    Team::Offense => self.state.offense.len(),
                    Team::Defense => self.state.defense.len(),
                };
                Entity::Player(PlayerToken::new(team, point, team.label(count + 1)))
            }
            TokenKind::Object(kind) => Entity::Object(ObjectToken::new(kind, point)),
        };
        self.add_entity(entity)
    }

    /// Commit a freehand stroke with the configured color and width.
    /// Returns `None` (no history entry) for an empty point list.
    pub fn add_stroke(&mut self, points: Vec<Point>) -> Option<EntityId> {
        if points.is_empty() {
            return None;
        }
        let stroke = FreehandStroke::from_points(points, self.config.stroke_color, self.config.stroke_width);
        Some(self.add_entity(Entity::Stroke(stroke)))
    }

    pub fn add_connector(&mut self, kind: ConnectorKind, from: Point, to: Point) -> EntityId {
        self.add_entity(Entity::Connector(TacticalConnector::new(kind, from, to)))
    }

    /// Commit any entity.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.push_undo();
        let id = entity.id();
        log::debug!("Adding entity {id}");
        self.state.insert(entity);
        self.changed();
        id
    }

    /// Nearest token within the pick radius of `point`.
    pub fn token_at(&self, point: Point) -> Option<TokenHit> {
        hit_test::token_in_range(&self.state, point, self.config.hit_radius())
    }

    /// Erase the token nearest to `point` if it lies within the pick radius.
    /// Nothing in range is a no-op with no history entry.
    pub fn remove_nearest(&mut self, point: Point) -> Option<Entity> {
        let hit = self.token_at(point)?;
        self.push_undo();
        let removed = self.state.remove_slot(hit.slot);
        log::debug!("Erased token {} at {:?}", hit.id, removed.position());
        self.changed();
        Some(removed)
    }

    /// Move a token. Unknown ids and unchanged positions are no-ops.
    pub fn move_token(&mut self, id: EntityId, point: Point) -> bool {
        match self.state.token_position_mut(id) {
            Some(position) if *position != point => {}
            _ => return false,
        }
        self.push_undo();
        if let Some(position) = self.state.token_position_mut(id) {
            *position = point;
        }
        self.changed();
        true
    }

    /// Remove every entity and the timeline.
    pub fn clear_all(&mut self) {
        self.push_undo();
        self.state = BoardState::default();
        self.changed();
    }

    /// Capture every player position into a keyframe at `t`.
    pub fn record_keyframe(&mut self, t: f64) {
        let keyframe = self
            .state
            .players()
            .fold(Keyframe::new(t), |k, p| k.with_entity(p.id, p.position));
        self.push_undo();
        self.state.timeline.insert_keyframe(keyframe);
        self.changed();
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.push_undo();
        self.state.timeline.duration = duration.max(0.0);
        self.changed();
    }

    pub fn add_action(&mut self, t: f64, action: Action) {
        self.push_undo();
        self.state.timeline.add_action(t, action);
        self.changed();
    }

    /// Drop all keyframes and actions. No-op on an empty timeline.
    pub fn clear_timeline(&mut self) -> bool {
        if self.state.timeline == Timeline::default() {
            return false;
        }
        self.push_undo();
        self.state.timeline = Timeline::default();
        self.changed();
        true
    }

    /// Write player positions directly, bypassing history (used by playback).
    /// Ids without a matching player are skipped.
    pub fn apply_positions(&mut self, positions: &[(EntityId, Point)]) {
        for (id, position) in positions {
            if let Some(player) = self.state.player_mut(*id) {
                player.position = *position;
            }
        }
        self.changed();
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history.undo(&mut self.state) {
            self.changed();
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.history.redo(&mut self.state) {
            self.changed();
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn offense() -> TokenKind {
        TokenKind::Player(Team::Offense)
    }

    #[test]
    fn test_add_token_labels() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(10.0, 10.0));
        board.add_token(offense(), Point::new(20.0, 10.0));
        board.add_token(TokenKind::Player(Team::Defense), Point::new(30.0, 10.0));
        let labels: Vec<&str> = board.state().players().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "X1"]);
    }

    #[test]
    fn test_history_round_trip() {
        let mut board = Board::default();
        let initial = board.snapshot();
        board.add_token(offense(), Point::new(10.0, 10.0));
        board.add_token(TokenKind::Object(ObjectKind::Ball), Point::new(20.0, 20.0));
        board.add_connector(ConnectorKind::Pass, Point::ZERO, Point::new(50.0, 0.0));
        board.add_stroke(vec![Point::ZERO, Point::new(1.0, 1.0)]);
        board.clear_all();

        for _ in 0..5 {
            assert!(board.undo());
        }
        assert_eq!(board.state(), &initial);
        assert!(!board.undo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(10.0, 10.0));
        board.add_token(offense(), Point::new(30.0, 10.0));
        let latest = board.snapshot();

        assert!(board.undo());
        assert_eq!(board.state().offense.len(), 1);
        assert!(board.redo());
        assert_eq!(board.state(), &latest);
    }

    #[test]
    fn test_undo_clears_redo() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(10.0, 10.0));
        board.add_token(offense(), Point::new(30.0, 10.0));
        board.undo();
        board.undo();
        assert!(board.can_redo());

        board.add_token(TokenKind::Object(ObjectKind::Cone), Point::new(5.0, 5.0));
        assert!(!board.can_redo());
        assert!(!board.redo());
        assert_eq!(board.state().cones.len(), 1);
        assert!(board.state().offense.is_empty());
    }

    #[test]
    fn test_snapshots_independent_of_live_edits() {
        let mut board = Board::default();
        let id = board.add_token(offense(), Point::new(10.0, 10.0));
        board.add_token(offense(), Point::new(50.0, 50.0));
        // Playback-style write mutates the live state in place.
        board.apply_positions(&[(id, Point::new(99.0, 99.0))]);
        board.undo();
        assert_eq!(board.state().offense[0].position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_remove_nearest() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(0.0, 0.0));
        board.add_token(offense(), Point::new(100.0, 100.0));

        let removed = board.remove_nearest(Point::new(2.0, 2.0)).unwrap();
        assert_eq!(removed.position(), Some(Point::new(0.0, 0.0)));
        assert_eq!(board.state().offense.len(), 1);
        assert_eq!(board.state().offense[0].position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_ineffective_erase_leaves_history_untouched() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(0.0, 0.0));
        let depth = board.history().undo_depth();
        let version = board.version();

        assert!(board.remove_nearest(Point::new(500.0, 500.0)).is_none());
        assert_eq!(board.history().undo_depth(), depth);
        assert_eq!(board.version(), version);
        assert_eq!(board.state().offense.len(), 1);
    }

    #[test]
    fn test_move_token() {
        let mut board = Board::default();
        let id = board.add_token(TokenKind::Object(ObjectKind::Ball), Point::new(0.0, 0.0));
        assert!(board.move_token(id, Point::new(5.0, 5.0)));
        assert_eq!(board.state().balls[0].position, Point::new(5.0, 5.0));
        assert_eq!(board.history().undo_depth(), 2);

        // Same position and unknown id are no-ops.
        assert!(!board.move_token(id, Point::new(5.0, 5.0)));
        assert!(!board.move_token(uuid::Uuid::new_v4(), Point::ZERO));
        assert_eq!(board.history().undo_depth(), 2);
    }

    #[test]
    fn test_token_position_mut_every_partition() {
        let kinds = [
            TokenKind::Player(Team::Offense),
            TokenKind::Player(Team::Defense),
            TokenKind::Object(ObjectKind::Ball),
            TokenKind::Object(ObjectKind::Cone),
        ];
        let mut board = Board::default();
        let ids: Vec<EntityId> = kinds
            .iter()
            .map(|&kind| board.add_token(kind, Point::ZERO))
            .collect();
        let mut state = board.snapshot();

        for (i, id) in ids.iter().enumerate() {
            let target = Point::new(i as f64 + 1.0, 0.0);
            *state.token_position_mut(*id).unwrap() = target;
        }
        assert_eq!(state.offense[0].position, Point::new(1.0, 0.0));
        assert_eq!(state.defense[0].position, Point::new(2.0, 0.0));
        assert_eq!(state.balls[0].position, Point::new(3.0, 0.0));
        assert_eq!(state.cones[0].position, Point::new(4.0, 0.0));
        assert!(state.token_position_mut(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_empty_stroke_is_noop() {
        let mut board = Board::default();
        assert!(board.add_stroke(Vec::new()).is_none());
        assert!(!board.can_undo());
    }

    #[test]
    fn test_stroke_uses_config_style() {
        let config = EditorConfig {
            stroke_width: 7.0,
            ..EditorConfig::default()
        };
        let mut board = Board::new(config);
        board.add_stroke(vec![Point::ZERO]);
        assert_eq!(board.state().strokes[0].width, 7.0);
    }

    #[test]
    fn test_record_keyframe_captures_players() {
        let mut board = Board::default();
        let a = board.add_token(offense(), Point::new(1.0, 2.0));
        let b = board.add_token(TokenKind::Player(Team::Defense), Point::new(3.0, 4.0));
        board.add_token(TokenKind::Object(ObjectKind::Ball), Point::new(9.0, 9.0));
        board.record_keyframe(250.0);

        let timeline = &board.state().timeline;
        assert_eq!(timeline.keyframes.len(), 1);
        assert_eq!(timeline.keyframes[0].entities.len(), 2);
        assert_eq!(timeline.keyframes[0].entities[&a], Point::new(1.0, 2.0));
        assert_eq!(timeline.keyframes[0].entities[&b], Point::new(3.0, 4.0));
        assert_eq!(timeline.duration, 250.0);

        assert!(board.undo());
        assert!(board.state().timeline.keyframes.is_empty());
    }

    #[test]
    fn test_apply_positions_skips_deleted_and_bypasses_history() {
        let mut board = Board::default();
        let id = board.add_token(offense(), Point::ZERO);
        let depth = board.history().undo_depth();
        board.apply_positions(&[(id, Point::new(7.0, 7.0)), (uuid::Uuid::new_v4(), Point::ZERO)]);
        assert_eq!(board.state().offense[0].position, Point::new(7.0, 7.0));
        assert_eq!(board.history().undo_depth(), depth);
    }

    #[test]
    fn test_clear_timeline() {
        let mut board = Board::default();
        assert!(!board.clear_timeline());
        board.set_duration(1000.0);
        assert!(board.clear_timeline());
        assert_eq!(board.state().timeline, Timeline::default());
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig {
            history_limit: Some(1),
            ..EditorConfig::default()
        };
        let mut board = Board::new(config);
        board.add_token(offense(), Point::ZERO);
        board.add_token(offense(), Point::ZERO);
        assert_eq!(board.history().undo_depth(), 1);
    }

    #[test]
    fn test_listener_sees_versions() {
        let seen = Rc::new(Cell::new(0));
        let mut board = Board::default();
        let sink = Rc::clone(&seen);
        board.set_listener(move |v| sink.set(v));
        board.add_token(offense(), Point::ZERO);
        board.undo();
        assert_eq!(seen.get(), 2);
        assert_eq!(board.version(), 2);
    }

    #[test]
    fn test_reset_discards_history() {
        let mut board = Board::default();
        board.add_token(offense(), Point::ZERO);
        board.reset(BoardState::default());
        assert!(!board.can_undo());
        assert!(board.state().is_empty());
    }

    #[test]
    fn test_json_round_trip_and_partial_blob() {
        let mut board = Board::default();
        board.add_token(offense(), Point::new(1.0, 1.0));
        board.add_connector(ConnectorKind::Dribble, Point::ZERO, Point::new(3.0, 3.0));
        let json = board.state().to_json().unwrap();
        assert_eq!(&BoardState::from_json(&json).unwrap(), board.state());

        let partial = BoardState::from_json(r#"{ "connectors": [] }"#).unwrap();
        assert!(partial.is_empty());
    }
}
