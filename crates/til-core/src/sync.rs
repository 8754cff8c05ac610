//! Sync engine: reconciles note files on disk into a [`NoteStore`].
//!
//! Every discovered file is classified exactly once per run:
//!
//! | State       | Condition                              | Action |
//! |-------------|----------------------------------------|--------|
//! | `New`       | nothing stored at the note's `path`    | insert |
//! | `Unchanged` | stored `body` equals the file's body   | none   |
//! | `Changed`   | stored `body` differs                  | update |
//!
//! Writes are issued one at a time with no transaction around the run, so an
//! aborted run leaves earlier notes synced and later ones untouched. Running
//! twice over an unchanged tree performs no writes the second time.
//!
//! Timestamps never run ahead of the sync clock on insert, and every update
//! moves `updated_at` strictly forward, even when the clock lags behind what
//! is already stored.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
  Error, Result,
  record::{Record, title_of},
  render::Renderer,
  scan::{NoteFile, NoteSource},
  store::NoteStore,
};

// ─── State machine ───────────────────────────────────────────────────────────

/// How a note compares with what the store already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
  New,
  Unchanged,
  Changed,
}

impl NoteState {
  /// Decide by body equality alone; metadata drift (title, url, timestamps)
  /// never triggers a write on its own.
  pub fn classify(existing: Option<&Record>, body: &str) -> Self {
    match existing {
      None => Self::New,
      Some(old) if old.body == body => Self::Unchanged,
      Some(_) => Self::Changed,
    }
  }
}

/// Counters for one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub scanned:   usize,
  pub inserted:  usize,
  pub updated:   usize,
  pub unchanged: usize,
  /// Files that could not be read and were left out of this run.
  pub skipped:   usize,
  /// Records deleted because their source file is gone (prune mode only).
  pub pruned:    usize,
}

impl SyncReport {
  pub fn writes(&self) -> usize { self.inserted + self.updated + self.pruned }

  fn record(&mut self, state: NoteState) {
    match state {
      NoteState::New => self.inserted += 1,
      NoteState::Unchanged => self.unchanged += 1,
      NoteState::Changed => self.updated += 1,
    }
  }
}

// ─── Syncer ──────────────────────────────────────────────────────────────────

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Drives a sync run against a store with a given renderer.
pub struct Syncer<'a, S, R> {
  store:    &'a S,
  renderer: &'a R,
  url_base: String,
  clock:    Clock,
  prune:    bool,
}

impl<'a, S, R> Syncer<'a, S, R>
where
  S: NoteStore,
  R: Renderer,
{
  /// `url_base` is the canonical source location that note paths are
  /// appended to, e.g. `https://github.com/user/til/blob/main`.
  pub fn new(store: &'a S, renderer: &'a R, url_base: impl Into<String>) -> Self {
    Self {
      store,
      renderer,
      url_base: url_base.into().trim_end_matches('/').to_owned(),
      clock: Box::new(Utc::now),
      prune: false,
    }
  }

  /// Replace the wall clock that bounds `created_at` on insert and sets
  /// `updated_at` on changed notes.
  pub fn with_clock(
    mut self,
    clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
  ) -> Self {
    self.clock = Box::new(clock);
    self
  }

  /// Also delete stored records whose source file was not seen in the scan.
  pub fn prune(mut self, prune: bool) -> Self {
    self.prune = prune;
    self
  }

  /// Sync every note under `source`.
  ///
  /// Unreadable files are logged and skipped. A missing modification time,
  /// a renderer failure, or any store error aborts the run.
  pub async fn run(&self, source: &NoteSource) -> Result<SyncReport> {
    let mut report = SyncReport::default();
    let mut seen = HashSet::new();

    tracing::info!(root = %source.root().display(), "syncing notes");

    for note in source.iter() {
      report.scanned += 1;
      seen.insert(note.path.clone());
      match self.sync_note(&note).await? {
        Some(state) => report.record(state),
        None => report.skipped += 1,
      }
    }

    if self.prune {
      report.pruned = self.prune_missing(&seen).await?;
    }

    tracing::info!(
      scanned = report.scanned,
      inserted = report.inserted,
      updated = report.updated,
      unchanged = report.unchanged,
      skipped = report.skipped,
      pruned = report.pruned,
      "sync finished"
    );
    Ok(report)
  }

  /// Sync a single note. Returns `None` if the file could not be read.
  pub async fn sync_note(&self, note: &NoteFile) -> Result<Option<NoteState>> {
    let raw = match tokio::fs::read(&note.file).await {
      Ok(bytes) => bytes,
      Err(e) => {
        tracing::warn!(path = %note.file.display(), error = %e, "skipping unreadable note");
        return Ok(None);
      }
    };
    let text = match String::from_utf8(raw) {
      Ok(text) => text,
      Err(e) => {
        tracing::warn!(path = %note.file.display(), error = %e, "skipping note that is not UTF-8");
        return Ok(None);
      }
    };

    let modified = modified_at(note).await?;
    let now = (self.clock)();
    let candidate = self.candidate(note, text.trim(), modified.min(now))?;

    let existing = self
      .store
      .get_note(&note.path)
      .await
      .map_err(Error::store)?;

    let state = NoteState::classify(existing.as_ref(), &candidate.body);
    match existing {
      None => {
        tracing::info!(path = %note.path, "inserting note");
        self.store.insert_note(&candidate).await.map_err(Error::store)?;
      }
      Some(_) if state == NoteState::Unchanged => {
        tracing::debug!(path = %note.path, "note unchanged");
      }
      Some(old) => {
        tracing::info!(path = %note.path, "updating note");
        let record = Record {
          created_at: old.created_at,
          updated_at: now.max(old.updated_at + TimeDelta::microseconds(1)),
          ..candidate
        };
        self.store.update_note(&record).await.map_err(Error::store)?;
      }
    }

    Ok(Some(state))
  }

  /// Build the record a first insert would write.
  fn candidate(
    &self,
    note: &NoteFile,
    body: &str,
    modified: DateTime<Utc>,
  ) -> Result<Record> {
    let html = self.renderer.render(&note.path, body)?;
    Ok(Record {
      created_at: modified,
      updated_at: modified,
      path:       note.path.clone(),
      slug:       note.slug.clone(),
      topic:      note.topic.clone(),
      title:      title_of(body),
      url:        format!("{}/{}", self.url_base, note.path),
      body:       body.to_owned(),
      html,
    })
  }

  async fn prune_missing(&self, seen: &HashSet<String>) -> Result<usize> {
    let stored = self.store.list_paths().await.map_err(Error::store)?;
    let mut pruned = 0;
    for path in stored.iter().filter(|p| !seen.contains(*p)) {
      tracing::info!(%path, "pruning note with no source file");
      if self.store.delete_note(path).await.map_err(Error::store)? {
        pruned += 1;
      }
    }
    Ok(pruned)
  }
}

async fn modified_at(note: &NoteFile) -> Result<DateTime<Utc>> {
  tokio::fs::metadata(&note.file)
    .await
    .and_then(|m| m.modified())
    .map(DateTime::<Utc>::from)
    .map_err(|source| Error::Modified { path: note.file.clone(), source })
}
