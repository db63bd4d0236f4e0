use std::path::PathBuf;

use futures::future::BoxFuture;
use tokio::fs;
use tracing::debug;

use crate::dao::{
    models::SessionEntity,
    session_store::SessionStore,
    storage::{StorageError, StorageResult},
};

/// Session store writing pretty-printed JSON to a single file on local disk.
///
/// Writes go through a sibling `.tmp` file followed by a rename so a crash
/// mid-write never truncates the last good snapshot.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, snapshot: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        let tmp = self.tmp_path();
        Box::pin(async move {
            let payload = serde_json::to_vec_pretty(&snapshot)
                .map_err(|err| StorageError::corrupt("encoding snapshot".into(), err))?;

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|err| {
                        StorageError::unavailable(
                            format!("creating snapshot directory `{}`", parent.display()),
                            err,
                        )
                    })?;
                }
            }

            fs::write(&tmp, &payload).await.map_err(|err| {
                StorageError::unavailable(format!("writing `{}`", tmp.display()), err)
            })?;
            fs::rename(&tmp, &path).await.map_err(|err| {
                StorageError::unavailable(format!("renaming into `{}`", path.display()), err)
            })?;

            debug!(path = %path.display(), bytes = payload.len(), "session snapshot written");
            Ok(())
        })
    }

    fn load(&self) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let path = self.path.clone();
        Box::pin(async move {
            let contents = match fs::read(&path).await {
                Ok(contents) => contents,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(err) => {
                    return Err(StorageError::unavailable(
                        format!("reading `{}`", path.display()),
                        err,
                    ));
                }
            };

            let snapshot = serde_json::from_slice(&contents).map_err(|err| {
                StorageError::corrupt(format!("decoding `{}`", path.display()), err)
            })?;
            Ok(Some(snapshot))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            let parent = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            fs::metadata(&parent).await.map_err(|err| {
                StorageError::unavailable(
                    format!("snapshot directory `{}` unavailable", parent.display()),
                    err,
                )
            })?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("koshtina-store-{}.json", Uuid::new_v4()))
    }

    fn empty_snapshot() -> SessionEntity {
        SessionEntity {
            burn_limit: 31,
            players: Vec::new(),
            current: None,
            archive: Vec::new(),
            next_round_number: 1,
        }
    }

    #[tokio::test]
    async fn load_on_missing_file_is_none() {
        let store = FileSessionStore::new(scratch_path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let path = scratch_path();
        let store = FileSessionStore::new(path.clone());

        let mut snapshot = empty_snapshot();
        snapshot.next_round_number = 7;
        store.save(snapshot).await.unwrap();

        let loaded = store.load().await.unwrap().expect("snapshot present");
        assert_eq!(loaded.next_round_number, 7);
        assert_eq!(loaded.burn_limit, 31);

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let path = scratch_path();
        let store = FileSessionStore::new(path.clone());

        store.save(empty_snapshot()).await.unwrap();
        let mut second = empty_snapshot();
        second.next_round_number = 2;
        store.save(second).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.next_round_number, 2);

        let _ = std::fs::remove_file(path);
    }
}
