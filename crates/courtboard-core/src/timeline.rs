//! Keyframe timeline and playback.
//!
//! Timestamps are milliseconds. Playback interpolates player positions
//! between the two keyframes bracketing the virtual clock and writes them
//! straight into the board, bypassing undo history.

use crate::board::Board;
use crate::entities::EntityId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum duration used when wrapping the clock, and minimum keyframe spacing
/// used when computing interpolation progress.
const MIN_SPAN: f64 = 1.0;

/// Timestamped snapshot of entity positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub t: f64,
    pub entities: HashMap<EntityId, Point>,
}

impl Keyframe {
    pub fn new(t: f64) -> Self {
        Self {
            t,
            entities: HashMap::new(),
        }
    }

    pub fn with_entity(mut self, id: EntityId, position: Point) -> Self {
        self.entities.insert(id, position);
        self
    }
}

/// Descriptive play action. Actions annotate the timeline; playback does not
/// interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Move { entity: EntityId, to: Point },
    Pass { from: EntityId, to: EntityId },
    Screen { screener: EntityId, target: EntityId, angle: f64 },
    Shot { shooter: EntityId, spot: Point },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    pub t: f64,
    pub action: Action,
}

/// Ordered keyframes and actions plus the total duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    pub duration: f64,
    pub keyframes: Vec<Keyframe>,
    pub actions: Vec<TimedAction>,
}

impl Timeline {
    /// Insert a keyframe, replacing one with the same timestamp.
    ///
    /// Keyframes stay ordered by `t` and the duration grows to cover the new frame.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) {
        self.duration = self.duration.max(keyframe.t);
        match self.keyframes.iter().position(|k| k.t >= keyframe.t) {
            Some(i) if self.keyframes[i].t == keyframe.t => self.keyframes[i] = keyframe,
            Some(i) => self.keyframes.insert(i, keyframe),
            None => self.keyframes.push(keyframe),
        }
    }

    /// Insert an action after any existing action with the same or earlier timestamp.
    pub fn add_action(&mut self, t: f64, action: Action) {
        let i = self.actions.partition_point(|a| a.t <= t);
        self.actions.insert(i, TimedAction { t, action });
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty() && self.actions.is_empty()
    }

    /// Wrap elapsed time into `[0, duration)`.
    pub fn wrap(&self, elapsed: f64) -> f64 {
        elapsed.rem_euclid(self.duration.max(MIN_SPAN))
    }

    /// Indices of the keyframe pair bracketing `t`.
    ///
    /// Before the first keyframe this is the first pair; after the last it is
    /// the last pair. `None` with fewer than two keyframes.
    pub fn bracket(&self, t: f64) -> Option<(usize, usize)> {
        let len = self.keyframes.len();
        if len < 2 {
            return None;
        }
        let passed = self.keyframes.partition_point(|k| k.t <= t);
        let i1 = passed.clamp(1, len - 1);
        Some((i1 - 1, i1))
    }

    /// Interpolated positions at time `t` for every entity in the earlier keyframe.
    ///
    /// Entities missing from the later keyframe hold their earlier position.
    pub fn sample(&self, t: f64) -> Vec<(EntityId, Point)> {
        let Some((i0, i1)) = self.bracket(t) else {
            return Vec::new();
        };
        let (k0, k1) = (&self.keyframes[i0], &self.keyframes[i1]);
        let alpha = ((t - k0.t) / (k1.t - k0.t).max(MIN_SPAN)).clamp(0.0, 1.0);
        let eased = ease_in_out_quad(alpha);

        k0.entities
            .iter()
            .map(|(id, p0)| {
                let p1 = k1.entities.get(id).unwrap_or(p0);
                (*id, p0.lerp(*p1, eased))
            })
            .collect()
    }
}

/// Quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out_quad(x: f64) -> f64 {
    if x < 0.5 {
        2.0 * x * x
    } else {
        1.0 - (2.0 - 2.0 * x).powi(2) / 2.0
    }
}

/// Result of a playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next frame.
    Continue,
    /// Playback is stopped; do not schedule again.
    Stopped,
}

/// Cancellable per-frame playback task.
///
/// The host calls [`Playback::tick`] once per display frame and schedules the
/// next frame only while it returns [`TickOutcome::Continue`].
#[derive(Debug, Clone, Default)]
pub struct Playback {
    playing: bool,
    origin: Option<f64>,
    clock: f64,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing. The next tick anchors the clock at zero.
    pub fn play(&mut self) {
        self.playing = true;
        self.origin = None;
    }

    /// Stop playing. Positions stay wherever the last tick left them.
    pub fn stop(&mut self) {
        self.playing = false;
        self.origin = None;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Virtual clock value computed by the last tick.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Advance to frame timestamp `now` (ms) and write interpolated positions.
    pub fn tick(&mut self, now: f64, board: &mut Board) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Stopped;
        }
        let origin = *self.origin.get_or_insert(now);
        let timeline = &board.state().timeline;
        self.clock = timeline.wrap(now - origin);
        let positions = timeline.sample(self.clock);
        if !positions.is_empty() {
            board.apply_positions(&positions);
        }
        TickOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn two_frame_timeline(id: EntityId) -> Timeline {
        let mut timeline = Timeline::default();
        timeline.insert_keyframe(Keyframe::new(0.0).with_entity(id, Point::new(0.0, 0.0)));
        timeline.insert_keyframe(Keyframe::new(1000.0).with_entity(id, Point::new(100.0, 0.0)));
        timeline
    }

    fn position_at(timeline: &Timeline, t: f64, id: EntityId) -> Point {
        timeline
            .sample(t)
            .into_iter()
            .find(|(i, _)| *i == id)
            .map(|(_, p)| p)
            .unwrap()
    }

    #[test]
    fn test_ease_in_out_quad() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-12);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_boundaries() {
        let id = Uuid::new_v4();
        let timeline = two_frame_timeline(id);
        assert_eq!(position_at(&timeline, 0.0, id), Point::new(0.0, 0.0));
        assert_eq!(position_at(&timeline, timeline.wrap(1000.0), id), Point::new(0.0, 0.0));
        assert_eq!(position_at(&timeline, 500.0, id), Point::new(50.0, 0.0));
        let quarter = position_at(&timeline, 250.0, id);
        assert!((quarter.x - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_in_later_keyframe_holds_position() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut timeline = Timeline::default();
        timeline.insert_keyframe(
            Keyframe::new(0.0)
                .with_entity(a, Point::new(0.0, 0.0))
                .with_entity(b, Point::new(5.0, 5.0)),
        );
        timeline.insert_keyframe(Keyframe::new(100.0).with_entity(a, Point::new(10.0, 0.0)));
        assert_eq!(position_at(&timeline, 50.0, b), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_fewer_than_two_keyframes_is_noop() {
        let mut timeline = Timeline::default();
        assert!(timeline.sample(0.0).is_empty());
        timeline.insert_keyframe(Keyframe::new(0.0).with_entity(Uuid::new_v4(), Point::ZERO));
        assert!(timeline.bracket(0.0).is_none());
        assert!(timeline.sample(0.0).is_empty());
    }

    #[test]
    fn test_bracket_selection() {
        let mut timeline = Timeline::default();
        for t in [0.0, 100.0, 300.0] {
            timeline.insert_keyframe(Keyframe::new(t));
        }
        assert_eq!(timeline.bracket(0.0), Some((0, 1)));
        assert_eq!(timeline.bracket(99.0), Some((0, 1)));
        assert_eq!(timeline.bracket(100.0), Some((1, 2)));
        assert_eq!(timeline.bracket(500.0), Some((1, 2)));
    }

    #[test]
    fn test_insert_keyframe_orders_and_replaces() {
        let mut timeline = Timeline::default();
        timeline.insert_keyframe(Keyframe::new(500.0));
        timeline.insert_keyframe(Keyframe::new(100.0));
        let id = Uuid::new_v4();
        timeline.insert_keyframe(Keyframe::new(500.0).with_entity(id, Point::ZERO));
        assert_eq!(timeline.keyframes.len(), 2);
        assert_eq!(timeline.keyframes[0].t, 100.0);
        assert!(timeline.keyframes[1].entities.contains_key(&id));
        assert_eq!(timeline.duration, 500.0);
    }

    #[test]
    fn test_wrap_zero_duration() {
        let timeline = Timeline::default();
        assert_eq!(timeline.wrap(12345.0), 0.0);
    }

    #[test]
    fn test_actions_stay_ordered() {
        let mut timeline = Timeline::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        timeline.add_action(200.0, Action::Pass { from: a, to: b });
        timeline.add_action(100.0, Action::Move { entity: a, to: Point::new(1.0, 1.0) });
        timeline.add_action(200.0, Action::Shot { shooter: b, spot: Point::ZERO });
        let times: Vec<f64> = timeline.actions.iter().map(|a| a.t).collect();
        assert_eq!(times, vec![100.0, 200.0, 200.0]);
        assert!(matches!(timeline.actions[2].action, Action::Shot { .. }));
    }

    #[test]
    fn test_action_serde_tag() {
        let json = serde_json::to_value(Action::Screen {
            screener: Uuid::nil(),
            target: Uuid::nil(),
            angle: 0.5,
        })
        .unwrap();
        assert_eq!(json["type"], "screen");
    }
}
