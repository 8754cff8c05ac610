//! Error types for `til-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("notes root does not exist: {0}")]
  MissingRoot(PathBuf),

  #[error("cannot read modification time of {path}: {source}")]
  Modified {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("markdown rendering failed for {path}: {message}")]
  Render { path: String, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error coming out of a [`NoteStore`](crate::store::NoteStore).
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
