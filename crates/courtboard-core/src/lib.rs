//! Courtboard Core Library
//!
//! Platform-agnostic editing engine for basketball play diagrams: entities,
//! undo history, gesture tools, court geometry, keyframe playback and
//! persistence.

pub mod board;
pub mod config;
pub mod court;
pub mod entities;
pub mod geometry;
pub mod history;
pub mod input;
pub mod scene;
pub mod storage;
pub mod timeline;
pub mod tools;

pub use board::{Board, BoardState};
pub use config::{ConfigError, EditorConfig};
pub use court::{CourtCache, CourtLayout, CourtMarking};
pub use entities::{Entity, EntityId, SerializableColor, TokenKind};
pub use history::History;
pub use input::{GestureEvent, GesturePhase, MouseButton, PointerKind};
pub use scene::{DrawItem, Label, Layer, Scene, StrokeStyle, build_scene};
pub use timeline::{Action, Keyframe, Playback, TickOutcome, Timeline};
pub use tools::{GestureState, ToolKind, ToolManager, Transient};
