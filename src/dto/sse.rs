use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::board::{PlayerSummary, RoundSummary};

#[derive(Clone, Debug)]
/// Dispatched payload carried across the board SSE channel.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Build an event from a name and a pre-rendered data string.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream (`board`).
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a sole un-burned player becomes the round's hero.
pub struct HeroDeclaredEvent {
    pub player_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a player's total crosses the burn limit.
pub struct PlayerBurnedEvent {
    pub player_id: Uuid,
    pub name: String,
    pub total_score: i32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a correction brings a burned player back under the limit.
pub struct PlayerRecoveredEvent {
    pub player_id: Uuid,
    pub name: String,
    pub total_score: i32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when every participant burned and the round concluded heroless.
pub struct AllBurnedEvent {
    pub round_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a player joined the round in progress.
pub struct PlayerJoinedEvent {
    pub player_id: Uuid,
    pub name: String,
    /// Catch-up score credited so the joiner matches the current leader.
    pub catch_up_score: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast after every mutation of the current round.
pub struct RoundUpdatedEvent(pub RoundSummary);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a new player is registered.
pub struct PlayerCreatedEvent {
    pub player: PlayerSummary,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when an existing player was renamed.
pub struct PlayerUpdatedEvent {
    pub player: PlayerSummary,
}
