//! Persistence boundary: snapshot entities, storage errors, and the session
//! store abstraction with its backends.

pub mod models;
pub mod session_store;
pub mod storage;
