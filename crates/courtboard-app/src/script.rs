//! Recorded gesture scripts, replayed through the tool system.
//!
//! ```json
//! { "width": 400, "height": 700,
//!   "steps": [
//!     { "tool": "pass" },
//!     { "phase": "start", "x": 10, "y": 10 },
//!     { "phase": "end", "x": 90, "y": 40, "pointer": "mouse", "button": "left" },
//!     { "command": "keyframe", "t": 0 },
//!     { "command": "undo" } ] }
//! ```

use crate::app::App;
use anyhow::Context as _;
use courtboard_core::{GestureEvent, GesturePhase, MouseButton, PointerKind, TickOutcome, ToolKind};
use kurbo::Point;
use serde::Deserialize;
use std::path::Path;

/// Pointer device named in a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerName {
    #[default]
    Touch,
    Mouse,
    Pen,
}

/// Non-gesture operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Undo,
    Redo,
    Clear,
    /// Record a keyframe at `t`.
    Keyframe,
    /// Set the timeline duration to `t`.
    Duration,
    /// Start playback.
    Play,
    /// Run one playback frame at timestamp `t`.
    Tick,
    Stop,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Tool {
        tool: ToolKind,
    },
    Gesture {
        phase: GesturePhase,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        pointer: PointerName,
        #[serde(default)]
        button: MouseButton,
    },
    Command {
        command: Command,
        #[serde(default)]
        t: Option<f64>,
    },
}

/// A drawing-surface size and the steps to replay on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// What a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps that changed the board or the preview.
    pub effective: usize,
}

impl Script {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid gesture script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Replay every step against `app`, resizing its surface first.
    pub fn replay(&self, app: &mut App) -> ReplayReport {
        app.set_size(self.width, self.height);
        let mut report = ReplayReport::default();
        for step in &self.steps {
            report.steps += 1;
            if apply(step, app) {
                report.effective += 1;
            }
        }
        log::info!("Replayed {} steps ({} effective)", report.steps, report.effective);
        report
    }
}

fn apply(step: &Step, app: &mut App) -> bool {
    match *step {
        Step::Tool { tool } => {
            app.set_tool(tool);
            true
        }
        Step::Gesture {
            phase,
            x,
            y,
            pointer,
            button,
        } => {
            let pointer = match pointer {
                PointerName::Touch => PointerKind::Touch,
                PointerName::Mouse => PointerKind::Mouse(button),
                PointerName::Pen => PointerKind::Pen,
            };
            app.handle_gesture(&GestureEvent::new(phase, Point::new(x, y), pointer))
        }
        Step::Command { command, t } => run_command(command, t, app),
    }
}

fn run_command(command: Command, t: Option<f64>, app: &mut App) -> bool {
    let t = t.unwrap_or(0.0);
    match command {
        Command::Undo => app.board_mut().undo(),
        Command::Redo => app.board_mut().redo(),
        Command::Clear => {
            app.board_mut().clear_all();
            true
        }
        Command::Keyframe => {
            app.board_mut().record_keyframe(t);
            true
        }
        Command::Duration => {
            app.board_mut().set_duration(t);
            true
        }
        Command::Play => {
            app.play();
            true
        }
        Command::Tick => app.tick(t) == TickOutcome::Continue,
        Command::Stop => {
            app.stop();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use courtboard_core::entities::ConnectorKind;
    use pollster::block_on;

    fn open_app(dir: &Path) -> App {
        let config = AppConfig {
            data_dir: Some(dir.to_path_buf()),
            ..AppConfig::default()
        };
        block_on(App::open(config)).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        let script = Script::from_json(
            r#"{ "width": 300, "height": 500, "steps": [
                { "tool": "dribble" },
                { "phase": "start", "x": 1, "y": 2, "pointer": "mouse", "button": "middle" },
                { "command": "keyframe", "t": 250 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[0], Step::Tool { tool: ToolKind::Dribble });
        assert_eq!(
            script.steps[1],
            Step::Gesture {
                phase: GesturePhase::Start,
                x: 1.0,
                y: 2.0,
                pointer: PointerName::Mouse,
                button: MouseButton::Middle,
            }
        );
        assert_eq!(
            script.steps[2],
            Step::Command {
                command: Command::Keyframe,
                t: Some(250.0),
            }
        );
    }

    #[test]
    fn test_invalid_script() {
        assert!(Script::from_json(r#"{ "steps": [] }"#).is_err());
        assert!(Script::from_json(r#"{ "width": 1, "height": 1, "steps": [{ "tool": "laser" }] }"#).is_err());
    }

    #[test]
    fn test_replay_connector_and_undo() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_app(dir.path());
        let script = Script::from_json(
            r#"{ "width": 400, "height": 700, "steps": [
                { "tool": "pass" },
                { "phase": "start", "x": 10, "y": 10 },
                { "phase": "move", "x": 50, "y": 10 },
                { "phase": "end", "x": 90, "y": 10 },
                { "tool": "offense" },
                { "phase": "start", "x": 200, "y": 200 },
                { "command": "undo" }
            ] }"#,
        )
        .unwrap();
        let report = script.replay(&mut app);
        assert_eq!(report.steps, 7);
        assert_eq!(report.effective, 7);

        let state = app.board().state();
        assert_eq!(state.connectors.len(), 1);
        assert_eq!(state.connectors[0].kind, ConnectorKind::Pass);
        // The lift-off point is not part of the connector.
        assert_eq!(state.connectors[0].to, Point::new(50.0, 10.0));
        assert!(state.offense.is_empty());
        assert_eq!(app.config().width, 400.0);
    }

    #[test]
    fn test_replay_rejects_secondary_button() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_app(dir.path());
        let script = Script::from_json(
            r#"{ "width": 400, "height": 700, "steps": [
                { "phase": "start", "x": 10, "y": 10, "pointer": "mouse", "button": "right" }
            ] }"#,
        )
        .unwrap();
        let report = script.replay(&mut app);
        assert_eq!(report.effective, 0);
        assert!(app.board().state().is_empty());
    }

    #[test]
    fn test_replay_playback() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_app(dir.path());
        let script = Script::from_json(
            r#"{ "width": 400, "height": 700, "steps": [
                { "tool": "offense" },
                { "phase": "start", "x": 0, "y": 0 },
                { "command": "keyframe", "t": 0 },
                { "tool": "drag" },
                { "phase": "start", "x": 0, "y": 0 },
                { "phase": "move", "x": 100, "y": 0 },
                { "phase": "end", "x": 100, "y": 0 },
                { "command": "keyframe", "t": 1000 },
                { "command": "play" },
                { "command": "tick", "t": 5000 },
                { "command": "tick", "t": 5500 },
                { "command": "stop" },
                { "command": "tick", "t": 5600 }
            ] }"#,
        )
        .unwrap();
        let report = script.replay(&mut app);
        assert_eq!(report.steps, 13);
        // The final tick after stop does nothing.
        assert_eq!(report.effective, 12);
        assert_eq!(app.board().state().offense[0].position, Point::new(50.0, 0.0));
    }
}
