//! Website for the TIL note store.
//!
//! Exposes an axum [`Router`] serving HTML pages backed by any
//! [`NoteStore`]. The `til` binary wires it to a [`SqliteStore`] and also runs
//! the sync engine.
//!
//! | Method | Path | Page |
//! |--------|------|------|
//! | `GET`  | `/` | topic counts and recent notes with previews |
//! | `GET`  | `/{topic}` | recent notes in one topic |
//! | `GET`  | `/{topic}/{slug}` | one note; 404 if unknown |
//!
//! [`SqliteStore`]: til_store_sqlite::SqliteStore

pub mod error;
pub mod pages;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Path, State},
  response::{Html, IntoResponse, Response},
  routing::get,
};
use serde::Deserialize;
use til_core::{query, scan::note_path, store::NoteStore};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `til.toml` and `TIL_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
  pub host:          String,
  pub port:          u16,
  pub store_path:    PathBuf,
  /// Directory holding `<topic>/<slug>.md` files.
  pub notes_root:    PathBuf,
  pub site_title:    String,
  /// Repository the notes live in, e.g. `https://github.com/someone/til`.
  pub repo_url:      String,
  pub branch:        String,
  /// Notes shown on the index and topic pages.
  pub listing_limit: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          3000,
      store_path:    PathBuf::from("tils.db"),
      notes_root:    PathBuf::from("."),
      site_title:    "TILs".to_string(),
      repo_url:      String::new(),
      branch:        "main".to_string(),
      listing_limit: 30,
    }
  }
}

impl Settings {
  /// Layer an optional TOML file under `TIL_*` environment variables.
  pub fn load(file: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(file.into()).required(false))
      .add_source(config::Environment::with_prefix("TIL").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  /// Prefix for each record's canonical `url`, if a repository is
  /// configured.
  pub fn url_base(&self) -> Option<String> {
    (!self.repo_url.is_empty()).then(|| {
      format!("{}/blob/{}", self.repo_url.trim_end_matches('/'), self.branch)
    })
  }

  /// Commit history link for a note, if a repository is configured.
  pub fn history_url(&self, path: &str) -> Option<String> {
    (!self.repo_url.is_empty()).then(|| {
      format!(
        "{}/commits/{}/{path}",
        self.repo_url.trim_end_matches('/'),
        self.branch
      )
    })
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: NoteStore> {
  pub store:    Arc<S>,
  pub settings: Arc<Settings>,
}

impl<S: NoteStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    self.store.clone(),
      settings: self.settings.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: NoteStore + 'static,
{
  Router::new()
    .route("/",               get(index_handler::<S>))
    .route("/{topic}",        get(topic_handler::<S>))
    .route("/{topic}/{slug}", get(note_handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Route handlers ──────────────────────────────────────────────────────────

async fn index_handler<S>(State(state): State<AppState<S>>) -> Result<Response, Error>
where
  S: NoteStore + 'static,
{
  let store = state.store.as_ref();
  let notes = query::get_notes(store, "", state.settings.listing_limit, true)
    .await
    .map_err(Error::store)?;
  let counts = query::get_topic_counts(store).await.map_err(Error::store)?;

  Ok(Html(pages::index(&state.settings, &counts, &notes).into_string()).into_response())
}

async fn topic_handler<S>(
  State(state): State<AppState<S>>,
  Path(topic): Path<String>,
) -> Result<Response, Error>
where
  S: NoteStore + 'static,
{
  let notes = query::get_notes(state.store.as_ref(), &topic, state.settings.listing_limit, true)
    .await
    .map_err(Error::store)?;

  Ok(Html(pages::topic(&state.settings, &topic, &notes).into_string()).into_response())
}

async fn note_handler<S>(
  State(state): State<AppState<S>>,
  Path((topic, slug)): Path<(String, String)>,
) -> Result<Response, Error>
where
  S: NoteStore + 'static,
{
  let note = query::get_note(state.store.as_ref(), &note_path(&topic, &slug))
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  Ok(Html(pages::note(&state.settings, &note).into_string()).into_response())
}

// ─── Integration tests ────────────────────────────────────────────────────────
