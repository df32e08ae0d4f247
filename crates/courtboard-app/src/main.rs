//! Main application entry point.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use courtboard_app::{App, AppConfig, Script};
use courtboard_core::EditorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "courtboard", about = "Basketball play diagram editor")]
struct Cli {
    /// Editor config (JSON). Missing fields use defaults.
    #[arg(long, env = "COURTBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding saved boards.
    #[arg(long, env = "COURTBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script onto the saved board and save the result.
    Replay {
        script: PathBuf,
        /// Also export the final board as SVG.
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Replay without saving.
        #[arg(long)]
        dry_run: bool,
    },
    /// Export the saved board as SVG (stdout when no path is given).
    Render {
        #[arg(long)]
        svg: Option<PathBuf>,
        #[arg(long, default_value_t = 500.0)]
        width: f64,
        #[arg(long, default_value_t = 900.0)]
        height: f64,
    },
    /// Erase the saved board.
    Clear,
    /// Print the effective editor config.
    Config,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let editor = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    let config = AppConfig {
        editor,
        data_dir: cli.data_dir,
        ..AppConfig::default()
    };

    pollster::block_on(run(cli.command, config))
}

async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Config => {
            println!("{}", config.editor.to_json()?);
        }
        Command::Clear => {
            let mut app = App::open(config).await?;
            app.clear().await;
            log::info!("Board cleared");
        }
        Command::Render { svg, width, height } => {
            let mut app = App::open(config).await?;
            app.set_size(width, height);
            match svg {
                Some(path) => app.export_svg(&path)?,
                None => print!("{}", app.render_svg()?),
            }
        }
        Command::Replay { script, svg, dry_run } => {
            let script = Script::load(&script)?;
            let mut app = App::open(config).await?;
            let report = script.replay(&mut app);
            println!(
                "{} steps, {} effective, {} entities on board, {} undoable edits",
                report.steps,
                report.effective,
                app.board().state().entity_count(),
                app.board().history().undo_depth()
            );
            if !dry_run {
                app.save().await;
            }
            if let Some(path) = svg {
                app.export_svg(&path)?;
            }
        }
    }
    Ok(())
}
