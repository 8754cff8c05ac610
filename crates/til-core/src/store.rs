//! The `NoteStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `til-store-sqlite`).
//! The sync engine and the web layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::record::{Record, TopicCount};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`NoteStore::list_notes`].
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
  /// Restrict to a single topic; `None` lists every topic.
  pub topic: Option<String>,
  pub limit: usize,
}

impl NoteQuery {
  /// Build a query from the web-facing convention where `""` means "any".
  pub fn new(topic: &str, limit: usize) -> Self {
    Self {
      topic: (!topic.is_empty()).then(|| topic.to_owned()),
      limit,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a keyed table of [`Record`]s.
///
/// Records are keyed by `path`. Listings are ordered by `created_at`,
/// newest first.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Point lookup by primary key. Returns `None` if not found.
  fn get_note<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Insert a record whose `path` is not yet present.
  fn insert_note<'a>(
    &'a self,
    record: &'a Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Overwrite every column of the record at `record.path` except
  /// `created_at`.
  fn update_note<'a>(
    &'a self,
    record: &'a Record,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Newest-first listing, optionally filtered by topic.
  fn list_notes<'a>(
    &'a self,
    query: &'a NoteQuery,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Note count per topic, ordered by topic name.
  fn topic_counts(
    &self,
  ) -> impl Future<Output = Result<Vec<TopicCount>, Self::Error>> + Send + '_;

  /// Every stored primary key.
  fn list_paths(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Remove a record. Returns `false` if nothing was stored at `path`.
  fn delete_note<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
