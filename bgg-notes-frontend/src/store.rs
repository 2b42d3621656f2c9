//! Where rendered notes end up.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use crate::FrontendError;

/// Storage contract for notes, addressed by vault-relative paths.
///
/// `write` creates or overwrites; notes are regenerated in full every time so
/// there is no separate update path.
pub trait NoteStore {
    fn read(&self, path: &str) -> Result<Option<String>, FrontendError>;
    fn write(&self, path: &str, text: &str) -> Result<(), FrontendError>;
}

/// Notes stored as files under a vault directory.
#[derive(Debug, Clone)]
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a vault-relative path. Absolute paths and `..`
    /// components are rejected so notes cannot land outside the vault.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FrontendError> {
        let rel = Path::new(path);
        if path.is_empty() {
            return Err(FrontendError::invalid_path("empty path"));
        }
        for component in rel.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(FrontendError::invalid_path(format!(
                        "{path} escapes the vault"
                    )));
                }
            }
        }
        Ok(self.root.join(rel))
    }
}

impl NoteStore for FsNoteStore {
    fn read(&self, path: &str) -> Result<Option<String>, FrontendError> {
        match fs::read_to_string(self.resolve(path)?) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, path: &str, text: &str) -> Result<(), FrontendError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let tmp = target.with_extension("md.tmp");
        fs::write(&tmp, text)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        log::debug!("Wrote {} bytes to {}", text.len(), target.display());
        Ok(())
    }
}

/// In-memory store, used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<BTreeMap<String, String>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored note, keyed by path.
    pub fn notes(&self) -> BTreeMap<String, String> {
        self.notes
            .lock()
            .map(|n| n.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl NoteStore for MemoryNoteStore {
    fn read(&self, path: &str) -> Result<Option<String>, FrontendError> {
        let notes = self
            .notes
            .lock()
            .map_err(|_| FrontendError::Io(io::Error::other("note store lock poisoned")))?;
        Ok(notes.get(path).cloned())
    }

    fn write(&self, path: &str, text: &str) -> Result<(), FrontendError> {
        let mut notes = self
            .notes
            .lock()
            .map_err(|_| FrontendError::Io(io::Error::other("note store lock poisoned")))?;
        notes.insert(path.to_string(), text.to_string());
        Ok(())
    }
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn read(&self, path: &str) -> Result<Option<String>, FrontendError> {
        (**self).read(path)
    }

    fn write(&self, path: &str, text: &str) -> Result<(), FrontendError> {
        (**self).write(path, text)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
