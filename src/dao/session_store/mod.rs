mod file;
mod memory;

use futures::future::BoxFuture;

use crate::dao::{models::SessionEntity, storage::StorageResult};

pub use self::file::FileSessionStore;
pub use self::memory::MemorySessionStore;

/// Abstraction over the persistence layer for whole-session snapshots.
///
/// The engine never decides when to persist; callers snapshot the session
/// into a [`SessionEntity`] and hand it here. There is exactly one snapshot
/// slot per store: saves replace the previous snapshot.
pub trait SessionStore: Send + Sync {
    /// Replace the stored snapshot.
    fn save(&self, snapshot: SessionEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored snapshot, if one exists.
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<SessionEntity>>>;
    /// Verify the backend is usable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
