//! Persistence adapters for the session flag.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{EvdirError, EvdirResult};

/// Where the session flag is persisted. Values are the strings `"true"` and
/// `"false"`; anything else reads as signed out.
pub trait SessionStore: Send + Sync {
    /// Raw stored value, `None` when nothing has been stored yet.
    fn load(&self) -> EvdirResult<Option<String>>;

    fn save(&self, value: &str) -> EvdirResult<()>;
}

/// Single-file store, shared by every evdir process of the same user.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> EvdirResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EvdirError::Session(format!(
                "Could not read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Writes a sibling temp file and renames it over the session file, so
    /// a concurrent reader sees either the old value or the new one.
    fn save(&self, value: &str) -> EvdirResult<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| {
            EvdirError::Session(format!("Could not create {}: {e}", parent.display()))
        })?;

        let write_err = |e: std::io::Error| {
            EvdirError::Session(format!("Could not write {}: {e}", self.path.display()))
        };

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_value(value: &str) -> Self {
        MemorySessionStore {
            value: Mutex::new(Some(value.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> EvdirResult<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|_| EvdirError::Session("session store lock poisoned".into()))?;
        Ok(value.clone())
    }

    fn save(&self, value: &str) -> EvdirResult<()> {
        let mut slot = self
            .value
            .lock()
            .map_err(|_| EvdirError::Session("session store lock poisoned".into()))?;
        *slot = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session"));

        store.save("true").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("true"));
        assert!(store.path().exists());
    }

    #[test]
    fn file_store_replaces_value_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));

        store.save("true").unwrap();
        store.save("false").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("false"));
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("session")]);
    }
}
