//! Ranking snapshot persistence
//!
//! Snapshots are full images of the board. Each write goes to a temporary file
//! next to the target and is renamed over it, so a reader never sees a torn
//! file. Writing is best-effort: failures are logged and never reach the
//! request path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tokio::{sync::watch, task::JoinHandle};

use crate::{error::PersistenceError, models::RankingSnapshot};

/// Destination for board snapshots
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    fn save(&self, snapshot: RankingSnapshot) -> Result<(), PersistenceError>;
}

/// Writes snapshots as JSON to a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the last written snapshot
    pub fn load(&self) -> Result<RankingSnapshot, PersistenceError> {
        let buf = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&buf)?)
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: RankingSnapshot) -> Result<(), PersistenceError> {
        let buf = serde_json::to_vec(&snapshot)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&buf)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Work handed to the snapshot writer
#[derive(Debug, Clone, Default)]
enum Pending {
    #[default]
    Idle,
    Write(Arc<RankingSnapshot>),
    Close,
}

/// Hands snapshots to a background task that writes only the newest one.
///
/// Must be created inside a tokio runtime. Call [`close`](Self::close) before
/// writing a final snapshot directly, otherwise an in-flight write may land
/// after it.
#[derive(Debug)]
pub struct BackgroundSnapshotter {
    tx: watch::Sender<Pending>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundSnapshotter {
    pub fn spawn(store: JsonFileStore) -> Self {
        let (tx, mut rx) = watch::channel(Pending::Idle);

        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let snapshot = match rx.borrow_and_update().clone() {
                    Pending::Idle => continue,
                    Pending::Write(snapshot) => snapshot,
                    Pending::Close => break,
                };
                let store = store.clone();
                let result = tokio::task::spawn_blocking(move || {
                    store.save(Arc::unwrap_or_clone(snapshot))
                })
                .await
                .unwrap_or_else(|e| Err(PersistenceError::Task(e.to_string())));

                if let Err(e) = result {
                    tracing::error!(error = %e, "Failed to write ranking snapshot");
                }
            }
            tracing::debug!("Snapshot writer stopped");
        });

        Self {
            tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Stop the writer and wait for any write in progress.
    ///
    /// A snapshot still queued is dropped. Later saves are ignored.
    pub async fn close(&self) {
        self.tx.send_replace(Pending::Close);

        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Snapshot writer task failed");
            }
        }
    }
}

impl SnapshotStore for BackgroundSnapshotter {
    fn save(&self, snapshot: RankingSnapshot) -> Result<(), PersistenceError> {
        self.tx.send_if_modified(|pending| {
            if matches!(pending, Pending::Close) {
                return false;
            }
            *pending = Pending::Write(Arc::new(snapshot));
            true
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    use crate::models::RankingEntry;

    fn sample() -> RankingSnapshot {
        let mut snapshot = RankingSnapshot::new(Utc::now(), 2);
        let mut entry = RankingEntry::new("10.0.0.7", "alpha", 2);
        entry.raise(1, 42);
        snapshot.teams.insert("alpha".to_string(), entry);
        snapshot
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ranking.json"));
        let snapshot = sample();

        store.save(snapshot.clone()).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn test_json_store_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing").join("ranking.json"));
        assert!(matches!(
            store.save(sample()),
            Err(PersistenceError::Io(_))
        ));
        assert!(store.load().is_err());
    }

    #[tokio::test]
    async fn test_background_snapshotter_writes_latest() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileStore::new(dir.path().join("ranking.json"));
        let writer = BackgroundSnapshotter::spawn(file.clone());

        let first = RankingSnapshot::new(Utc::now(), 2);
        let last = sample();
        writer.save(first).unwrap();
        writer.save(last.clone()).unwrap();

        let mut written = None;
        for _ in 0..100 {
            if let Ok(snapshot) = file.load() {
                if snapshot == last {
                    written = Some(snapshot);
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(written, Some(last));
    }

    #[test]
    fn test_json_store_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ranking.json"));

        let snapshot = sample();
        store.save(RankingSnapshot::new(Utc::now(), 2)).unwrap();
        store.save(snapshot.clone()).unwrap();

        assert_eq!(store.load().unwrap(), snapshot);
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("ranking.json")]);
    }

    #[tokio::test]
    async fn test_final_save_after_close_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFileStore::new(dir.path().join("ranking.json"));
        let writer = BackgroundSnapshotter::spawn(file.clone());

        // large enough that its write is likely still running at close
        let mut stale = RankingSnapshot::new(Utc::now(), 1);
        for i in 0..50_000 {
            let name = format!("team{i}");
            let entry = RankingEntry::new(format!("10.{}.{}.1", i / 256, i % 256), &name, 1);
            stale.teams.insert(name, entry);
        }
        writer.save(stale.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        writer.close().await;
        let last = sample();
        file.save(last.clone()).unwrap();

        // ignored once closed
        writer.save(stale).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(file.load().unwrap(), last);
    }
}
