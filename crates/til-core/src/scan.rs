//! Note Source Scanner: discovers `<topic>/<slug>.md` files under a root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// Extension of note files; also used when building a note's `path` key.
pub const NOTE_EXTENSION: &str = "md";

/// A discovered note file and the identity derived from its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
  /// Immediate parent directory name.
  pub topic: String,
  /// File name without extension.
  pub slug:  String,
  /// Store key, `topic/slug.md`, always `/`-separated.
  pub path:  String,
  /// Location on disk.
  pub file:  PathBuf,
}

impl NoteFile {
  /// Derive identity from `file`, which must sit exactly two levels below a
  /// notes root. Returns `None` for anything that is not `<dir>/<name>.md`.
  pub fn from_file(file: &Path) -> Option<Self> {
    if file.extension()? != NOTE_EXTENSION {
      return None;
    }
    let slug  = file.file_stem()?.to_str()?.to_owned();
    let topic = file.parent()?.file_name()?.to_str()?.to_owned();
    Some(Self {
      path: note_path(&topic, &slug),
      topic,
      slug,
      file: file.to_path_buf(),
    })
  }
}

/// Build the primary key for a note.
pub fn note_path(topic: &str, slug: &str) -> String {
  format!("{topic}/{slug}.{NOTE_EXTENSION}")
}

/// A notes root directory.
///
/// [`NoteSource::iter`] can be called any number of times; each call walks the
/// tree afresh.
#[derive(Debug, Clone)]
pub struct NoteSource {
  root: PathBuf,
}

impl NoteSource {
  /// Fails if `root` is not an existing directory.
  pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
    let root = root.into();
    if !root.is_dir() {
      return Err(Error::MissingRoot(root));
    }
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path { &self.root }

  /// Lazily enumerate note files in filesystem order.
  ///
  /// Entries that cannot be read are logged and skipped.
  pub fn iter(&self) -> impl Iterator<Item = NoteFile> + '_ {
    WalkDir::new(&self.root)
      .min_depth(2)
      .max_depth(2)
      .into_iter()
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
          tracing::warn!(error = %e, "skipping unreadable directory entry");
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .filter(|entry| entry.path().extension().is_some_and(|ext| ext == NOTE_EXTENSION))
      .filter_map(|entry| {
        let note = NoteFile::from_file(entry.path());
        if note.is_none() {
          tracing::warn!(file = %entry.path().display(), "skipping note with a non UTF-8 name");
        }
        note
      })
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn derives_identity_from_location() {
    let note = NoteFile::from_file(Path::new("/notes/rust/lifetimes.md")).unwrap();
    assert_eq!(note.topic, "rust");
    assert_eq!(note.slug, "lifetimes");
    assert_eq!(note.path, "rust/lifetimes.md");
  }

  #[test]
  fn ignores_other_extensions() {
    assert!(NoteFile::from_file(Path::new("/notes/rust/image.png")).is_none());
    assert!(NoteFile::from_file(Path::new("/notes/rust/Makefile")).is_none());
  }

  #[test]
  fn scans_exactly_two_levels() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "# top level").unwrap();
    fs::create_dir_all(dir.path().join("git/deep")).unwrap();
    fs::write(dir.path().join("git/rebase.md"), "# Rebase").unwrap();
    fs::write(dir.path().join("git/notes.txt"), "ignored").unwrap();
    fs::write(dir.path().join("git/deep/nested.md"), "# Too deep").unwrap();
    fs::create_dir_all(dir.path().join("sql")).unwrap();
    fs::write(dir.path().join("sql/upsert.md"), "# Upsert").unwrap();

    let source = NoteSource::new(dir.path()).unwrap();
    let mut paths: Vec<String> = source.iter().map(|n| n.path).collect();
    paths.sort();
    assert_eq!(paths, ["git/rebase.md", "sql/upsert.md"]);

    // Restartable: a second pass sees the same files.
    assert_eq!(source.iter().count(), 2);
  }

  #[cfg(target_os = "linux")]
  #[test]
  fn non_utf8_names_are_skipped() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("git")).unwrap();
    fs::write(dir.path().join("git/rebase.md"), "# Rebase").unwrap();
    let bad = dir.path().join("git").join(OsStr::from_bytes(b"caf\xe9.md"));
    fs::write(bad, "# Latin-1").unwrap();
    let bad_dir = dir.path().join(OsStr::from_bytes(b"\xff"));
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("note.md"), "# Lost").unwrap();

    let source = NoteSource::new(dir.path()).unwrap();
    let paths: Vec<String> = source.iter().map(|n| n.path).collect();
    assert_eq!(paths, ["git/rebase.md"]);
  }

  #[test]
  fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NoteSource::new(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, Error::MissingRoot(_)));
  }
}
