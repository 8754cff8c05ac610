//! SQL schema for the TIL SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per note file, keyed by `topic/slug.md`.
CREATE TABLE IF NOT EXISTS notes (
    created_at TEXT NOT NULL,          -- RFC 3339 UTC, fixed width; set once
    updated_at TEXT NOT NULL,          -- RFC 3339 UTC, fixed width
    path       TEXT PRIMARY KEY NOT NULL,
    slug       TEXT NOT NULL,
    topic      TEXT NOT NULL,
    title      TEXT NOT NULL,
    url        TEXT NOT NULL,
    body       TEXT NOT NULL,
    html       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS notes_topic_idx   ON notes(topic);
CREATE INDEX IF NOT EXISTS notes_created_idx ON notes(created_at);

PRAGMA user_version = 1;
";
