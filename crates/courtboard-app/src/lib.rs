//! Courtboard Application
//!
//! Command-line shell around the editing engine: restores and saves the
//! board, replays recorded gesture scripts and exports SVG.

mod app;
mod script;

pub use app::{App, AppConfig};
pub use script::{Command, PointerName, ReplayReport, Script, Step};
