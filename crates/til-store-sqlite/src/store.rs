//! [`SqliteStore`]: the SQLite implementation of [`NoteStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use til_core::{
  record::{Record, TopicCount},
  store::{NoteQuery, NoteStore},
};

use crate::{
  Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A note store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = crate::Error;

  async fn get_note(&self, path: &str) -> Result<Option<Record>> {
    let path = path.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {RECORD_COLUMNS} FROM notes WHERE path = ?1"),
              rusqlite::params![path],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn insert_note(&self, record: &Record) -> Result<()> {
    let created_at = encode_dt(record.created_at);
    let updated_at = encode_dt(record.updated_at);
    let record     = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notes (created_at, updated_at, path, slug, topic, title, url, body, html)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            created_at,
            updated_at,
            record.path,
            record.slug,
            record.topic,
            record.title,
            record.url,
            record.body,
            record.html,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn update_note(&self, record: &Record) -> Result<()> {
    let updated_at = encode_dt(record.updated_at);
    let record     = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE notes
           SET updated_at = ?1, body = ?2, html = ?3, title = ?4, url = ?5, slug = ?6, topic = ?7
           WHERE path = ?8",
          rusqlite::params![
            updated_at,
            record.body,
            record.html,
            record.title,
            record.url,
            record.slug,
            record.topic,
            record.path,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_notes(&self, query: &NoteQuery) -> Result<Vec<Record>> {
    let topic = query.topic.clone();
    let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS} FROM notes
           WHERE ?1 IS NULL OR topic = ?1
           ORDER BY created_at DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![topic, limit], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  async fn topic_counts(&self) -> Result<Vec<TopicCount>> {
    let counts = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT topic, COUNT(*) FROM notes GROUP BY topic ORDER BY topic")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(TopicCount {
              topic: row.get(0)?,
              count: row.get::<_, i64>(1)? as u64,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(counts)
  }

  async fn list_paths(&self) -> Result<Vec<String>> {
    let paths = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT path FROM notes ORDER BY path")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(paths)
  }

  async fn delete_note(&self, path: &str) -> Result<bool> {
    let path = path.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM notes WHERE path = ?1", rusqlite::params![path])?)
      })
      .await?;
    Ok(deleted > 0)
  }
}
