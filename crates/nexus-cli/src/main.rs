//! `nexus`: terminal UI for the AIML Nexus department assistant.
//!
//! # Usage
//!
//! ```text
//! nexus --store ~/.local/share/nexus/nexus.db
//! nexus --config nexus.toml --reply-delay-ms 500
//! ```

mod app;
mod settings;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use nexus_store_sqlite::SqliteStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nexus", version, about = "Terminal UI for the AIML Nexus assistant")]
pub struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "nexus.toml")]
  config: PathBuf,

  /// SQLite file holding the registered user.
  #[arg(long, value_name = "PATH", env = "NEXUS_STORE_PATH")]
  store: Option<PathBuf>,

  /// Milliseconds the assistant waits before replying.
  #[arg(long, value_name = "MS")]
  reply_delay_ms: Option<u64>,

  /// File that log output is appended to.
  #[arg(long, value_name = "PATH")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // CLI flags override the config file and environment.
  let mut settings = Settings::load(&args.config)?;
  if let Some(path) = args.store {
    settings.store_path = path;
  }
  if let Some(ms) = args.reply_delay_ms {
    settings.reply_delay_ms = ms;
  }
  if let Some(path) = args.log_file {
    settings.log_file = path;
  }

  init_tracing(&settings)?;

  let store_path = settings::expand_tilde(&settings.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating store directory {}", parent.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(store = %store_path.display(), "store opened");

  let mut app = App::new(Arc::new(store), settings.reply_delay());

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Send log output to the configured file; the terminal is in raw mode.
fn init_tracing(settings: &Settings) -> Result<()> {
  let path = settings::expand_tilde(&settings.log_file);
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(&path)
    .with_context(|| format!("opening log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(std::sync::Mutex::new(file))
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    // Land any bot replies whose delay has elapsed.
    app.drain_replies();

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      let cont = app.handle_key(key).await?;
      if !cont {
        break;
      }
    }
  }

  Ok(())
}
