use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        board::{PlayerSummary, RoundSummary},
        sse::{
            AllBurnedEvent, HeroDeclaredEvent, PlayerBurnedEvent, PlayerCreatedEvent,
            PlayerJoinedEvent, PlayerRecoveredEvent, PlayerUpdatedEvent, RoundUpdatedEvent,
            ServerEvent,
        },
    },
    engine::RoundEvent,
    state::SharedState,
};

const EVENT_HERO_DECLARED: &str = "hero.declared";
const EVENT_PLAYER_BURNED: &str = "player.burned";
const EVENT_PLAYER_RECOVERED: &str = "player.recovered";
const EVENT_ALL_BURNED: &str = "round.all_burned";
const EVENT_PLAYER_JOINED: &str = "round.player_joined";
const EVENT_ROUND_UPDATED: &str = "round.updated";
const EVENT_PLAYER_CREATED: &str = "player.created";
const EVENT_PLAYER_UPDATED: &str = "player.updated";

/// Broadcast the outcome events produced by one engine mutation, resolving
/// names and totals against the freshly derived round projection.
pub fn broadcast_round_outcomes(state: &SharedState, round: &RoundSummary, events: &[RoundEvent]) {
    for event in events {
        match *event {
            RoundEvent::HeroDeclared { player_id } => {
                let payload = HeroDeclaredEvent {
                    player_id,
                    name: status_name(round, player_id),
                };
                send_board_event(state, EVENT_HERO_DECLARED, &payload);
            }
            RoundEvent::PlayerBurned { player_id } => {
                let payload = PlayerBurnedEvent {
                    player_id,
                    name: status_name(round, player_id),
                    total_score: status_total(round, player_id),
                };
                send_board_event(state, EVENT_PLAYER_BURNED, &payload);
            }
            RoundEvent::PlayerRecovered { player_id } => {
                let payload = PlayerRecoveredEvent {
                    player_id,
                    name: status_name(round, player_id),
                    total_score: status_total(round, player_id),
                };
                send_board_event(state, EVENT_PLAYER_RECOVERED, &payload);
            }
            RoundEvent::AllBurned => {
                let payload = AllBurnedEvent { round_id: round.id };
                send_board_event(state, EVENT_ALL_BURNED, &payload);
            }
            RoundEvent::PlayerJoined {
                player_id,
                catch_up_score,
            } => {
                let payload = PlayerJoinedEvent {
                    player_id,
                    name: status_name(round, player_id),
                    catch_up_score,
                };
                send_board_event(state, EVENT_PLAYER_JOINED, &payload);
            }
        }
    }
}

/// Broadcast the full round projection after a mutation.
pub fn broadcast_round_updated(state: &SharedState, round: RoundSummary) {
    let payload = RoundUpdatedEvent(round);
    send_board_event(state, EVENT_ROUND_UPDATED, &payload);
}

/// Broadcast the registration of a new player.
pub fn broadcast_player_created(state: &SharedState, player: PlayerSummary) {
    let payload = PlayerCreatedEvent { player };
    send_board_event(state, EVENT_PLAYER_CREATED, &payload);
}

/// Broadcast that an existing player was renamed.
pub fn broadcast_player_updated(state: &SharedState, player: PlayerSummary) {
    let payload = PlayerUpdatedEvent { player };
    send_board_event(state, EVENT_PLAYER_UPDATED, &payload);
}

fn status_name(round: &RoundSummary, player_id: Uuid) -> String {
    round
        .statuses
        .iter()
        .find(|status| status.player_id == player_id)
        .map(|status| status.name.clone())
        .unwrap_or_default()
}

fn status_total(round: &RoundSummary, player_id: Uuid) -> i32 {
    round
        .statuses
        .iter()
        .find(|status| status.player_id == player_id)
        .map(|status| status.total_score)
        .unwrap_or(0)
}

fn send_board_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.board_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize board SSE payload"),
    }
}
