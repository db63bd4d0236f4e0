//! Orchestrates scoreboard mutations: takes the session lock, runs the engine
//! command, publishes SSE notifications, and schedules a snapshot save.

use indexmap::IndexMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::board::{ArchivedRoundSummary, PlayerSummary, RoundSummary, SessionSummary},
    engine::{EngineError, RoundEvent, Session},
    error::ServiceError,
    services::sse_events,
    state::SharedState,
};

/// Snapshot of the whole session: players, current round, archive.
pub async fn session_summary(state: &SharedState) -> SessionSummary {
    state.read_session(|session| session.clone().into()).await
}

/// All registered players in registration order.
pub async fn list_players(state: &SharedState) -> Vec<PlayerSummary> {
    state
        .read_session(|session| {
            session
                .registry
                .players
                .values()
                .cloned()
                .map(Into::into)
                .collect()
        })
        .await
}

/// Register a new player.
pub async fn add_player(state: &SharedState, name: &str) -> Result<PlayerSummary, ServiceError> {
    let summary = state
        .with_session_mut(|session| {
            let id = session.add_player(name)?;
            Ok::<_, EngineError>(PlayerSummary {
                id,
                name: session.display_name(id),
            })
        })
        .await?;

    info!(player_id = %summary.id, name = %summary.name, "player registered");
    sse_events::broadcast_player_created(state, summary.clone());
    state.mark_dirty();
    Ok(summary)
}

/// Rename an existing player.
pub async fn rename_player(
    state: &SharedState,
    id: Uuid,
    name: &str,
) -> Result<PlayerSummary, ServiceError> {
    let summary = state
        .with_session_mut(|session| {
            if !session.registry.contains(id) {
                return Err(ServiceError::NotFound(format!("unknown player `{id}`")));
            }
            session.rename_player(id, name)?;
            Ok(PlayerSummary {
                id,
                name: session.display_name(id),
            })
        })
        .await?;

    sse_events::broadcast_player_updated(state, summary.clone());
    state.mark_dirty();
    Ok(summary)
}

/// Start a fresh round, archiving any round still on the board.
pub async fn start_round(
    state: &SharedState,
    participant_ids: Vec<Uuid>,
) -> Result<RoundSummary, ServiceError> {
    let summary = state
        .with_session_mut(|session| {
            session.start_round(participant_ids)?;
            current_summary(session)
        })
        .await?;

    info!(round = summary.number, participants = summary.participants.len(), "round started");
    sse_events::broadcast_round_updated(state, summary.clone());
    state.mark_dirty();
    Ok(summary)
}

/// Projection of the round currently on the board.
pub async fn current_round(state: &SharedState) -> Result<RoundSummary, ServiceError> {
    state
        .read_session(|session| {
            session
                .current
                .clone()
                .map(Into::into)
                .ok_or_else(|| ServiceError::NotFound("no current round".into()))
        })
        .await
}

/// Append a regular scoring entry to the current round.
pub async fn add_entry(
    state: &SharedState,
    deltas: IndexMap<Uuid, i32>,
    label: Option<String>,
) -> Result<RoundSummary, ServiceError> {
    let (events, summary) = state
        .with_session_mut(|session| {
            let events = session.add_entry(&deltas, label)?;
            Ok::<_, ServiceError>((events, current_summary(session)?))
        })
        .await?;

    publish_round_mutation(state, &summary, &events);
    Ok(summary)
}

/// Apply a signed correction to one player's total.
pub async fn edit_score(
    state: &SharedState,
    player_id: Uuid,
    adjustment: i32,
) -> Result<RoundSummary, ServiceError> {
    let (events, summary) = state
        .with_session_mut(|session| {
            let events = session.edit_score(player_id, adjustment)?;
            Ok::<_, ServiceError>((events, current_summary(session)?))
        })
        .await?;

    publish_round_mutation(state, &summary, &events);
    Ok(summary)
}

/// Bring a registered player into the round in progress.
pub async fn join_round(
    state: &SharedState,
    player_id: Uuid,
) -> Result<RoundSummary, ServiceError> {
    let (events, summary) = state
        .with_session_mut(|session| {
            let events = session.join_current_round(player_id)?;
            Ok::<_, ServiceError>((events, current_summary(session)?))
        })
        .await?;

    publish_round_mutation(state, &summary, &events);
    Ok(summary)
}

/// Conclude the current round and move it into the archive.
pub async fn archive_round(state: &SharedState) -> Result<ArchivedRoundSummary, ServiceError> {
    let summary = state
        .with_session_mut(|session| {
            session.archive_current()?;
            session
                .archive
                .last()
                .cloned()
                .map(ArchivedRoundSummary::from)
                .ok_or_else(|| ServiceError::InvalidState("archive is empty".into()))
        })
        .await?;

    info!(round = summary.round.number, "round archived");
    sse_events::broadcast_round_updated(state, summary.round.clone());
    state.mark_dirty();
    Ok(summary)
}

/// All archived rounds, oldest first.
pub async fn archive_list(state: &SharedState) -> Vec<ArchivedRoundSummary> {
    state
        .read_session(|session| session.archive.iter().cloned().map(Into::into).collect())
        .await
}

/// Restore the most recently archived round as the current round.
pub async fn undo_archive(state: &SharedState) -> Result<RoundSummary, ServiceError> {
    let summary = state
        .with_session_mut(|session| {
            session.undo_last_archive()?;
            current_summary(session)
        })
        .await?;

    info!(round = summary.number, "archive undone");
    sse_events::broadcast_round_updated(state, summary.clone());
    state.mark_dirty();
    Ok(summary)
}

/// Project the round the engine just mutated. The engine guarantees a current
/// round after a successful command, so a missing one is an internal fault.
fn current_summary(session: &Session) -> Result<RoundSummary, ServiceError> {
    session
        .current
        .clone()
        .map(Into::into)
        .ok_or_else(|| ServiceError::InvalidState("no current round".into()))
}

fn publish_round_mutation(state: &SharedState, summary: &RoundSummary, events: &[RoundEvent]) {
    sse_events::broadcast_round_outcomes(state, summary, events);
    sse_events::broadcast_round_updated(state, summary.clone());
    state.mark_dirty();
}
