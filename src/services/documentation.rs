use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Koshtina Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::board_stream,
        crate::routes::board::get_session,
        crate::routes::board::list_players,
        crate::routes::board::add_player,
        crate::routes::board::rename_player,
        crate::routes::board::start_round,
        crate::routes::board::current_round,
        crate::routes::board::add_entry,
        crate::routes::board::edit_score,
        crate::routes::board::join_round,
        crate::routes::board::archive_round,
        crate::routes::board::list_archive,
        crate::routes::board::undo_archive,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::board::AddPlayerRequest,
            crate::dto::board::RenamePlayerRequest,
            crate::dto::board::StartRoundRequest,
            crate::dto::board::AddEntryRequest,
            crate::dto::board::EditScoreRequest,
            crate::dto::board::JoinRoundRequest,
            crate::dto::board::PlayerSummary,
            crate::dto::board::StatusSummary,
            crate::dto::board::EntryKindDto,
            crate::dto::board::EntrySummary,
            crate::dto::board::RoundSummary,
            crate::dto::board::ArchivedRoundSummary,
            crate::dto::board::SessionSummary,
            crate::dto::sse::Handshake,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "board", description = "Players, rounds, score ledger, and archive"),
    )
)]
pub struct ApiDoc;
