//! In-memory [`NoteStore`] used by this crate's tests.

use std::{
  collections::BTreeMap,
  convert::Infallible,
  sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  },
};

use crate::{
  record::{Record, TopicCount},
  store::{NoteQuery, NoteStore},
};

#[derive(Default)]
pub struct MemoryStore {
  notes:       Mutex<BTreeMap<String, Record>>,
  pub inserts: AtomicUsize,
  pub updates: AtomicUsize,
}

impl NoteStore for MemoryStore {
  type Error = Infallible;

  async fn get_note(&self, path: &str) -> Result<Option<Record>, Infallible> {
    Ok(self.notes.lock().unwrap().get(path).cloned())
  }

  async fn insert_note(&self, record: &Record) -> Result<(), Infallible> {
    self.inserts.fetch_add(1, Ordering::SeqCst);
    let prev = self
      .notes
      .lock()
      .unwrap()
      .insert(record.path.clone(), record.clone());
    assert!(prev.is_none(), "duplicate insert of {}", record.path);
    Ok(())
  }

  async fn update_note(&self, record: &Record) -> Result<(), Infallible> {
    self.updates.fetch_add(1, Ordering::SeqCst);
    let mut notes = self.notes.lock().unwrap();
    let stored = notes.get_mut(&record.path).expect("update of missing note");
    *stored = Record { created_at: stored.created_at, ..record.clone() };
    Ok(())
  }

  async fn list_notes(&self, query: &NoteQuery) -> Result<Vec<Record>, Infallible> {
    let mut notes: Vec<Record> = self
      .notes
      .lock()
      .unwrap()
      .values()
      .filter(|r| query.topic.as_deref().is_none_or(|t| r.topic == t))
      .cloned()
      .collect();
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notes.truncate(query.limit);
    Ok(notes)
  }

  async fn topic_counts(&self) -> Result<Vec<TopicCount>, Infallible> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for r in self.notes.lock().unwrap().values() {
      *counts.entry(r.topic.clone()).or_default() += 1;
    }
    Ok(
      counts
        .into_iter()
        .map(|(topic, count)| TopicCount { topic, count })
        .collect(),
    )
  }

  async fn list_paths(&self) -> Result<Vec<String>, Infallible> {
    Ok(self.notes.lock().unwrap().keys().cloned().collect())
  }

  async fn delete_note(&self, path: &str) -> Result<bool, Infallible> {
    Ok(self.notes.lock().unwrap().remove(path).is_some())
  }
}
