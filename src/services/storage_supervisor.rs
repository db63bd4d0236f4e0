use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{dao::models::SessionEntity, state::SharedState};

const DEBOUNCE: Duration = Duration::from_millis(500);
const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Persist the session whenever it is marked dirty, debouncing bursts of
/// mutations into a single snapshot write.
///
/// A failed write is retried with exponential backoff; after exhausting the
/// attempts the snapshot is dropped and the next mutation triggers a fresh
/// one. The board keeps serving from memory either way.
pub async fn run(state: SharedState) {
    loop {
        state.dirty_notified().await;
        sleep(DEBOUNCE).await;

        let snapshot: SessionEntity = state.read_session(|session| session.clone().into()).await;

        let store = state.store();
        let mut attempt = 0;
        let mut delay = INITIAL_RETRY_DELAY;
        loop {
            match store.save(snapshot.clone()).await {
                Ok(()) => {
                    debug!("session snapshot persisted");
                    break;
                }
                Err(err) => {
                    attempt += 1;
                    if attempt >= MAX_SAVE_ATTEMPTS {
                        warn!(error = %err, "giving up on snapshot save until the next change");
                        break;
                    }
                    warn!(attempt, error = %err, "snapshot save failed; retrying");
                    sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
            }
        }
    }
}
