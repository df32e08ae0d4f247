//! Application shell: owns the board, tools, playback and persistence.

use anyhow::Context as _;
use courtboard_core::storage::{BoardStore, FileStorage};
use courtboard_core::{
    Board, CourtCache, EditorConfig, GestureEvent, Playback, Scene, TickOutcome, ToolKind, ToolManager,
    build_scene,
};
use courtboard_render::{Exporter, SvgExporter, SvgRenderer};
use kurbo::Size;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub editor: EditorConfig,
    /// Directory holding saved boards (platform data dir when `None`).
    pub data_dir: Option<PathBuf>,
    /// Drawing-surface size.
    pub width: f64,
    pub height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            data_dir: None,
            width: 500.0,
            height: 900.0,
        }
    }
}

impl AppConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    board: Board,
    tools: ToolManager,
    court: CourtCache,
    playback: Playback,
    store: BoardStore<FileStorage>,
}

impl App {
    /// Open the storage directory and restore the last saved board.
    pub async fn open(config: AppConfig) -> anyhow::Result<Self> {
        let storage = match &config.data_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::default_location(),
        }
        .context("Failed to open board storage")?;
        log::info!("Using board storage at {}", storage.base_path().display());

        let mut store = BoardStore::new(Arc::new(storage), config.editor.storage_key.clone());
        let board = store.load(config.editor.clone()).await;
        log::info!("Loaded board with {} entities", board.state().entity_count());

        Ok(Self {
            config,
            board,
            tools: ToolManager::new(),
            court: CourtCache::new(),
            playback: Playback::new(),
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Resize the drawing surface.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.config.width = width;
        self.config.height = height;
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {tool:?}");
        self.tools.set_tool(tool);
    }

    /// Feed a gesture to the active tool. Gestures are ignored while playing.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> bool {
        if self.playback.is_playing() {
            return false;
        }
        self.tools.handle_event(event, &mut self.board)
    }

    pub fn play(&mut self) {
        self.tools.cancel();
        self.playback.play();
    }

    pub fn stop(&mut self) {
        self.playback.stop();
    }

    /// Run one playback frame at timestamp `now` (ms).
    pub fn tick(&mut self, now: f64) -> TickOutcome {
        self.playback.tick(now, &mut self.board)
    }

    /// Current frame description.
    pub fn scene(&mut self) -> Scene {
        build_scene(&self.board, &self.tools, self.config.size(), &mut self.court)
    }

    pub fn render_svg(&mut self) -> anyhow::Result<String> {
        let scene = self.scene();
        Ok(SvgRenderer::render(&scene)?)
    }

    pub fn export_svg(&mut self, path: &Path) -> anyhow::Result<()> {
        let scene = self.scene();
        SvgExporter.export(&scene, path)?;
        Ok(())
    }

    /// Persist the board if it changed. Failures are logged, not returned.
    pub async fn save(&mut self) -> bool {
        self.store.maybe_save(&self.board).await
    }

    /// Remove every entity and delete the saved board.
    pub async fn clear(&mut self) -> bool {
        self.board.clear_all();
        match self.store.clear().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to delete saved board '{}': {e}", self.store.key());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtboard_core::entities::{Team, TokenKind};
    use kurbo::Point;
    use pollster::block_on;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: Some(dir.to_path_buf()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_open_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let app = block_on(App::open(config_in(dir.path()))).unwrap();
        assert!(app.board().state().is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = block_on(App::open(config_in(dir.path()))).unwrap();
        app.board_mut()
            .add_token(TokenKind::Player(Team::Offense), Point::new(100.0, 100.0));
        assert!(block_on(app.save()));
        assert!(!block_on(app.save()));

        let reopened = block_on(App::open(config_in(dir.path()))).unwrap();
        assert_eq!(reopened.board().state(), app.board().state());
    }

    #[test]
    fn test_clear_deletes_saved_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = block_on(App::open(config_in(dir.path()))).unwrap();
        app.board_mut()
            .add_token(TokenKind::Player(Team::Defense), Point::new(10.0, 10.0));
        assert!(block_on(app.save()));
        assert!(dir.path().join("board_current.json").exists());

        assert!(block_on(app.clear()));
        assert!(app.board().state().is_empty());
        assert!(!dir.path().join("board_current.json").exists());

        let reopened = block_on(App::open(config_in(dir.path()))).unwrap();
        assert!(reopened.board().state().is_empty());
    }

    #[test]
    fn test_gestures_ignored_while_playing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = block_on(App::open(config_in(dir.path()))).unwrap();
        app.play();
        assert!(!app.handle_gesture(&GestureEvent::start(Point::new(5.0, 5.0))));
        app.stop();
        assert!(app.handle_gesture(&GestureEvent::start(Point::new(5.0, 5.0))));
        assert_eq!(app.board().state().offense.len(), 1);
    }

    #[test]
    fn test_render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = block_on(App::open(config_in(dir.path()))).unwrap();
        app.set_size(200.0, 300.0);
        let svg = app.render_svg().unwrap();
        assert!(svg.contains(r#"viewBox="0 0 200 300""#));
    }
}
