//! `til`: sync markdown notes into SQLite and serve them as a website.
//!
//! Reads `til.toml` (or the path given with `--config`) and `TIL_*`
//! environment variables.
//!
//! ```text
//! til sync               # ingest <notes_root>/<topic>/<slug>.md into the store
//! til sync --prune       # ...and drop records whose file is gone
//! til serve              # serve the site on host:port
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use til_core::{render::CommonMark, scan::NoteSource, sync::Syncer};
use til_server::{AppState, Settings};
use til_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "TIL notes: sync markdown into SQLite and serve it")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "til.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Ingest note files into the store, writing only notes whose body changed.
  Sync {
    /// Notes directory; overrides `notes_root` from the config.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Delete stored notes whose source file no longer exists.
    #[arg(long)]
    prune: bool,
  },

  /// Start the HTTP server.
  Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config).context("failed to read configuration")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&settings.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Sync { root, prune } => {
      let root = expand_tilde(root.as_deref().unwrap_or(settings.notes_root.as_path()));
      let url_base = settings
        .url_base()
        .context("repo_url must be set before syncing; records store links into it")?;
      let source = NoteSource::new(&root)?;
      Syncer::new(&store, &CommonMark, url_base)
        .prune(prune)
        .run(&source)
        .await
        .context("sync failed")?;
    }
    Command::Serve => {
      let address = format!("{}:{}", settings.host, settings.port);
      let app = til_server::router(AppState {
        store:    Arc::new(store),
        settings: Arc::new(settings),
      });

      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app).await.context("server error")?;
    }
  }

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
