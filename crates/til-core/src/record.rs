//! Record: the unit of persistence and of rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as stored: raw markdown, rendered HTML and identity metadata.
///
/// `path` is the primary key (`topic/slug.md`). `created_at` is fixed at the
/// first insert; `updated_at` moves forward whenever `body` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub path:       String,
  pub slug:       String,
  pub topic:      String,
  pub title:      String,
  pub url:        String,
  pub body:       String,
  pub html:       String,
}

impl Record {
  /// The site-relative link to this note's page, e.g. `rust/lifetimes`.
  pub fn href(&self) -> String { format!("{}/{}", self.topic, self.slug) }
}

/// Number of notes filed under a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
  pub topic: String,
  pub count: u64,
}

/// Derive a note title from its trimmed body.
///
/// Takes the first line and strips a single leading `"# "`. Any other line is
/// used verbatim; this is a literal prefix match, not a heading parser.
pub fn title_of(body: &str) -> String {
  let first = body.lines().next().unwrap_or_default().trim();
  first.strip_prefix("# ").unwrap_or(first).to_owned()
}
