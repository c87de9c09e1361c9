// Preference store for the selected pet kind.
// Persists a small JSON file atomically and publishes the value on a watch channel.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::model::Kind;

/// On-disk shape of the preference file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPrefs {
    selected_kind: Kind,
    saved_at: DateTime<Utc>,
}

struct Inner {
    path: PathBuf,
    tx: watch::Sender<Option<Kind>>,
}

/// Holds the user's selected kind. Cheap to clone.
#[derive(Clone)]
pub struct PreferenceStore {
    inner: Arc<Inner>,
}

impl PreferenceStore {
    /// Load preferences from `path`. A missing file means nothing selected yet.
    pub fn load(path: &Path) -> Result<Self> {
        let current = read_prefs(path)?.map(|prefs| prefs.selected_kind);
        let (tx, _) = watch::channel(current);
        Ok(Self {
            inner: Arc::new(Inner {
                path: path.to_path_buf(),
                tx,
            }),
        })
    }

    pub fn get(&self) -> Option<Kind> {
        *self.inner.tx.borrow()
    }

    /// Current value, then every change. `None` until a kind is chosen.
    pub fn observe(&self) -> watch::Receiver<Option<Kind>> {
        self.inner.tx.subscribe()
    }

    /// Persist `kind`; returns once it is on disk.
    pub fn save(&self, kind: Kind) -> Result<()> {
        let prefs = StoredPrefs {
            selected_kind: kind,
            saved_at: Utc::now(),
        };
        write_prefs(&self.inner.path, &prefs)?;
        self.inner.tx.send_replace(Some(kind));
        Ok(())
    }

    /// Persist `kind` on a detached blocking task.
    ///
    /// The caller gets no handle: a failure is only logged, and a `get` or
    /// `save` issued right after may run before or after this write. Must be
    /// called from within a tokio runtime.
    pub fn save_detached(&self, kind: Kind) {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = store.save(kind) {
                log::warn!("Saving selected kind {} failed: {}", kind, e);
            }
        });
    }

    /// Forget the selection.
    pub fn clear(&self) -> Result<()> {
        if self.inner.path.exists() {
            fs::remove_file(&self.inner.path)?;
        }
        self.inner.tx.send_replace(None);
        Ok(())
    }
}

fn read_prefs(path: &Path) -> Result<Option<StoredPrefs>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    match serde_json::from_str(&contents) {
        Ok(prefs) => Ok(Some(prefs)),
        Err(e) => {
            log::warn!("Ignoring unreadable preferences at {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

fn write_prefs(path: &Path, prefs: &StoredPrefs) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(prefs)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_nothing_selected_initially() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::load(&temp_dir.path().join("prefs.json")).unwrap();
        assert_eq!(prefs.get(), None);
        assert_eq!(*prefs.observe().borrow(), None);
    }

    #[test]
    fn test_save_persists_across_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("prefs.json");

        let prefs = PreferenceStore::load(&path).unwrap();
        prefs.save(Kind::Dog).unwrap();
        assert_eq!(prefs.get(), Some(Kind::Dog));

        let reloaded = PreferenceStore::load(&path).unwrap();
        assert_eq!(reloaded.get(), Some(Kind::Dog));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_observe_sees_changes() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceStore::load(&temp_dir.path().join("prefs.json")).unwrap();
        let mut rx = prefs.observe();

        prefs.save(Kind::Cat).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(Kind::Cat));

        prefs.clear().unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let prefs = PreferenceStore::load(&path).unwrap();
        prefs.save(Kind::Cat).unwrap();
        prefs.clear().unwrap();

        assert!(!path.exists());
        assert_eq!(PreferenceStore::load(&path).unwrap().get(), None);
        // Clearing twice is fine.
        prefs.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_unset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(PreferenceStore::load(&path).unwrap().get(), None);
    }

    #[tokio::test]
    async fn test_save_detached_eventually_lands() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        let prefs = PreferenceStore::load(&path).unwrap();
        let mut rx = prefs.observe();

        prefs.save_detached(Kind::Dog);

        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(*rx.borrow(), Some(Kind::Dog));
        assert!(path.exists());
    }
}
