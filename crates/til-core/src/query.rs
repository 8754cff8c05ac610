//! Read-side operations used by the web layer.
//!
//! Thin wrappers over [`NoteStore`] that apply the site's conventions: an
//! empty topic means "all topics", and listings can swap each note's HTML for
//! its [`preview`](crate::preview::preview).

use crate::{
  preview::{DEFAULT_PREVIEW_ELEMENTS, preview},
  record::{Record, TopicCount},
  store::{NoteQuery, NoteStore},
};

/// Look up a single note by its `topic/slug.md` path.
pub async fn get_note<S: NoteStore>(
  store: &S,
  path: &str,
) -> Result<Option<Record>, S::Error> {
  store.get_note(path).await
}

/// Newest notes first, at most `limit` of them.
///
/// `topic == ""` lists every topic; an unknown topic yields an empty list.
pub async fn get_notes<S: NoteStore>(
  store: &S,
  topic: &str,
  limit: usize,
  with_preview: bool,
) -> Result<Vec<Record>, S::Error> {
  let mut notes = store.list_notes(&NoteQuery::new(topic, limit)).await?;
  if with_preview {
    for note in &mut notes {
      note.html = preview(&note.html, DEFAULT_PREVIEW_ELEMENTS);
    }
  }
  Ok(notes)
}

pub async fn get_topic_counts<S: NoteStore>(store: &S) -> Result<Vec<TopicCount>, S::Error> {
  store.topic_counts().await
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::testing::MemoryStore;

  fn note(topic: &str, slug: &str, created: i64) -> Record {
    let at = Utc.timestamp_opt(created, 0).unwrap();
    Record {
      created_at: at,
      updated_at: at,
      path:       format!("{topic}/{slug}.md"),
      slug:       slug.into(),
      topic:      topic.into(),
      title:      slug.into(),
      url:        String::new(),
      body:       format!("# {slug}"),
      html:       format!("<h1>{slug}</h1><p>one</p><p>two</p><p>three</p>"),
    }
  }

  async fn seeded(n: i64) -> MemoryStore {
    let store = MemoryStore::default();
    for i in 0..n {
      let topic = if i % 2 == 0 { "rust" } else { "sql" };
      store.insert_note(&note(topic, &format!("n{i}"), 1_000 + i)).await.unwrap();
    }
    store
  }

  #[tokio::test]
  async fn empty_topic_lists_all_topics_newest_first() {
    let store = seeded(40).await;
    let notes = get_notes(&store, "", 30, false).await.unwrap();

    assert_eq!(notes.len(), 30);
    assert!(notes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(notes.iter().any(|n| n.topic == "rust"));
    assert!(notes.iter().any(|n| n.topic == "sql"));
    assert_eq!(notes[0].slug, "n39");
  }

  #[tokio::test]
  async fn topic_filter_restricts_listing() {
    let store = seeded(6).await;
    let notes = get_notes(&store, "sql", 30, false).await.unwrap();
    assert_eq!(notes.len(), 3);
    assert!(notes.iter().all(|n| n.topic == "sql"));
  }

  #[tokio::test]
  async fn unknown_topic_is_an_empty_list() {
    let store = seeded(4).await;
    let notes = get_notes(&store, "haskell", 30, true).await.unwrap();
    assert!(notes.is_empty());
  }

  #[tokio::test]
  async fn preview_replaces_html() {
    let store = seeded(1).await;
    let notes = get_notes(&store, "", 30, true).await.unwrap();
    assert_eq!(notes[0].html, "<p>one</p><p>two</p>");

    let full = get_notes(&store, "", 30, false).await.unwrap();
    assert!(full[0].html.starts_with("<h1>n0</h1>"));
  }

  #[tokio::test]
  async fn missing_note_is_none() {
    let store = seeded(1).await;
    assert!(get_note(&store, "rust/missing.md").await.unwrap().is_none());
    assert!(get_note(&store, "rust/n0.md").await.unwrap().is_some());
  }

  #[tokio::test]
  async fn counts_per_topic() {
    let store = seeded(5).await;
    let counts = get_topic_counts(&store).await.unwrap();
    assert_eq!(
      counts,
      vec![
        TopicCount { topic: "rust".into(), count: 3 },
        TopicCount { topic: "sql".into(), count: 2 },
      ]
    );
  }
}
