use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::board::{
        AddEntryRequest, AddPlayerRequest, ArchivedRoundSummary, EditScoreRequest,
        JoinRoundRequest, PlayerSummary, RenamePlayerRequest, RoundSummary, SessionSummary,
        StartRoundRequest,
    },
    error::AppError,
    services::board_service,
    state::SharedState,
};

/// Routes handling players, rounds, the score ledger, and the archive.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/players", get(list_players).post(add_player))
        .route("/players/{id}", put(rename_player))
        .route("/rounds", post(start_round))
        .route("/rounds/current", get(current_round))
        .route("/rounds/current/entries", post(add_entry))
        .route("/rounds/current/corrections", post(edit_score))
        .route("/rounds/current/players", post(join_round))
        .route("/rounds/current/archive", post(archive_round))
        .route("/archive", get(list_archive))
        .route("/archive/undo", post(undo_archive))
}

/// Return a snapshot of the whole session.
#[utoipa::path(
    get,
    path = "/session",
    tag = "board",
    responses((status = 200, description = "Session snapshot", body = SessionSummary))
)]
pub async fn get_session(State(state): State<SharedState>) -> Json<SessionSummary> {
    Json(board_service::session_summary(&state).await)
}

/// List all registered players.
#[utoipa::path(
    get,
    path = "/players",
    tag = "board",
    responses((status = 200, description = "Registered players", body = Vec<PlayerSummary>))
)]
pub async fn list_players(State(state): State<SharedState>) -> Json<Vec<PlayerSummary>> {
    Json(board_service::list_players(&state).await)
}

/// Register a new player.
#[utoipa::path(
    post,
    path = "/players",
    tag = "board",
    request_body = AddPlayerRequest,
    responses(
        (status = 200, description = "Player registered", body = PlayerSummary),
        (status = 409, description = "Registration blocked while a participant is burned")
    )
)]
pub async fn add_player(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<AddPlayerRequest>>,
) -> Result<Json<PlayerSummary>, AppError> {
    let summary = board_service::add_player(&state, &payload.name).await?;
    Ok(Json(summary))
}

/// Rename an existing player.
#[utoipa::path(
    put,
    path = "/players/{id}",
    tag = "board",
    params(("id" = Uuid, Path, description = "Identifier of the player to rename")),
    request_body = RenamePlayerRequest,
    responses(
        (status = 200, description = "Player renamed", body = PlayerSummary),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn rename_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<RenamePlayerRequest>>,
) -> Result<Json<PlayerSummary>, AppError> {
    let summary = board_service::rename_player(&state, id, &payload.name).await?;
    Ok(Json(summary))
}

/// Start a fresh round with the given participants.
#[utoipa::path(
    post,
    path = "/rounds",
    tag = "board",
    request_body = StartRoundRequest,
    responses(
        (status = 200, description = "Round started", body = RoundSummary),
        (status = 400, description = "Empty, unknown, or duplicate participants")
    )
)]
pub async fn start_round(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<StartRoundRequest>>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::start_round(&state, payload.participant_ids).await?;
    Ok(Json(summary))
}

/// Return the round currently on the board.
#[utoipa::path(
    get,
    path = "/rounds/current",
    tag = "board",
    responses(
        (status = 200, description = "Current round", body = RoundSummary),
        (status = 404, description = "No round on the board")
    )
)]
pub async fn current_round(
    State(state): State<SharedState>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::current_round(&state).await?;
    Ok(Json(summary))
}

/// Append a regular scoring entry to the current round.
#[utoipa::path(
    post,
    path = "/rounds/current/entries",
    tag = "board",
    request_body = AddEntryRequest,
    responses(
        (status = 200, description = "Entry recorded", body = RoundSummary),
        (status = 409, description = "No open round")
    )
)]
pub async fn add_entry(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<AddEntryRequest>>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::add_entry(&state, payload.deltas, payload.label).await?;
    Ok(Json(summary))
}

/// Apply a correction to one player's total.
#[utoipa::path(
    post,
    path = "/rounds/current/corrections",
    tag = "board",
    request_body = EditScoreRequest,
    responses(
        (status = 200, description = "Correction recorded", body = RoundSummary),
        (status = 409, description = "No round on the board")
    )
)]
pub async fn edit_score(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<EditScoreRequest>>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::edit_score(&state, payload.player_id, payload.adjustment).await?;
    Ok(Json(summary))
}

/// Bring a registered player into the round in progress.
#[utoipa::path(
    post,
    path = "/rounds/current/players",
    tag = "board",
    request_body = JoinRoundRequest,
    responses(
        (status = 200, description = "Player joined", body = RoundSummary),
        (status = 409, description = "No open round")
    )
)]
pub async fn join_round(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<JoinRoundRequest>>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::join_round(&state, payload.player_id).await?;
    Ok(Json(summary))
}

/// Conclude the current round and move it into the archive.
#[utoipa::path(
    post,
    path = "/rounds/current/archive",
    tag = "board",
    responses(
        (status = 200, description = "Round archived", body = ArchivedRoundSummary),
        (status = 409, description = "No round on the board")
    )
)]
pub async fn archive_round(
    State(state): State<SharedState>,
) -> Result<Json<ArchivedRoundSummary>, AppError> {
    let summary = board_service::archive_round(&state).await?;
    Ok(Json(summary))
}

/// List archived rounds, oldest first.
#[utoipa::path(
    get,
    path = "/archive",
    tag = "board",
    responses((status = 200, description = "Archived rounds", body = Vec<ArchivedRoundSummary>))
)]
pub async fn list_archive(State(state): State<SharedState>) -> Json<Vec<ArchivedRoundSummary>> {
    Json(board_service::archive_list(&state).await)
}

/// Restore the most recently archived round onto the board.
#[utoipa::path(
    post,
    path = "/archive/undo",
    tag = "board",
    responses(
        (status = 200, description = "Round restored", body = RoundSummary),
        (status = 409, description = "Nothing to undo, or the open round has regular entries")
    )
)]
pub async fn undo_archive(
    State(state): State<SharedState>,
) -> Result<Json<RoundSummary>, AppError> {
    let summary = board_service::undo_archive(&state).await?;
    Ok(Json(summary))
}
