//! Shared application state: the session under its single write lock, the
//! SSE hub, and the persistence handle.

mod sse;

use std::sync::Arc;

use tokio::sync::{Notify, RwLock};

use crate::{dao::session_store::SessionStore, engine::Session};

pub use self::sse::SseHub;
use self::sse::SseState;

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

const BOARD_SSE_CAPACITY: usize = 16;

/// Central application state owned by the router and background tasks.
///
/// Every engine mutation runs under the session write lock, which is the
/// single serialization point the scoring rules require: hero and burn
/// detection always observe a consistent snapshot of the entry list.
pub struct AppState {
    session: RwLock<Session>,
    sse: SseState,
    store: Arc<dyn SessionStore>,
    dirty: Notify,
}

impl AppState {
    /// Construct the shared state wrapped in an [`Arc`] so it can be cloned
    /// cheaply into handlers and supervisors.
    pub fn new(session: Session, store: Arc<dyn SessionStore>) -> SharedState {
        Arc::new(Self {
            session: RwLock::new(session),
            sse: SseState::new(BOARD_SSE_CAPACITY),
            store,
            dirty: Notify::new(),
        })
    }

    /// Run a closure against a read-locked view of the session.
    pub async fn read_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let guard = self.session.read().await;
        f(&guard)
    }

    /// Run a closure against the write-locked session.
    pub async fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut guard = self.session.write().await;
        f(&mut guard)
    }

    /// Broadcast hub used for the board SSE stream.
    pub fn board_sse(&self) -> &SseHub {
        self.sse.board()
    }

    /// Handle to the configured snapshot store.
    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    /// Signal the persistence supervisor that the session changed.
    pub fn mark_dirty(&self) {
        self.dirty.notify_one();
    }

    /// Wait until the session is marked dirty.
    pub async fn dirty_notified(&self) {
        self.dirty.notified().await;
    }
}
