//! Conversions between [`Record`] and its SQLite row.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! precision and a `Z` suffix, so lexical order in SQL matches chronological
//! order.

use chrono::{DateTime, SecondsFormat, Utc};
use til_core::record::Record;

use crate::{Error, Result};

/// Column list shared by every `SELECT` that materialises a [`Record`].
pub const RECORD_COLUMNS: &str =
  "created_at, updated_at, path, slug, topic, title, url, body, html";

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `notes` row with timestamps still in their text form.
pub struct RawRecord {
  pub created_at: String,
  pub updated_at: String,
  pub path:       String,
  pub slug:       String,
  pub topic:      String,
  pub title:      String,
  pub url:        String,
  pub body:       String,
  pub html:       String,
}

impl RawRecord {
  /// Read a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      created_at: row.get(0)?,
      updated_at: row.get(1)?,
      path:       row.get(2)?,
      slug:       row.get(3)?,
      topic:      row.get(4)?,
      title:      row.get(5)?,
      url:        row.get(6)?,
      body:       row.get(7)?,
      html:       row.get(8)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      path:       self.path,
      slug:       self.slug,
      topic:      self.topic,
      title:      self.title,
      url:        self.url,
      body:       self.body,
      html:       self.html,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width_and_sortable() {
    let a = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1_500);
    assert_eq!(encode_dt(a), "2024-05-01T10:00:00.000000Z");
    assert_eq!(encode_dt(b), "2024-05-01T10:00:00.001500Z");
    assert!(encode_dt(a) < encode_dt(b));
  }

  #[test]
  fn timestamp_roundtrip() {
    let a = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(decode_dt(&encode_dt(a)).unwrap(), a);
  }

  #[test]
  fn bad_timestamp_is_an_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
