use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::dao::{models::SessionEntity, session_store::SessionStore, storage::StorageResult};

/// In-memory session store used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<SessionEntity>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, snapshot: SessionEntity) -> BoxFuture<'static, StorageResult<()>> {
        let slot = self.slot.clone();
        Box::pin(async move {
            *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot);
            Ok(())
        })
    }

    fn load(&self) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>> {
        let slot = self.slot.clone();
        Box::pin(async move { Ok(slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
