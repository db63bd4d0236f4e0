//! Service layer sitting between the HTTP routes and the scoring engine.

/// Scoreboard operations: players, rounds, entries, archive.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Snapshot persistence coordinator with debouncing.
pub mod storage_supervisor;
