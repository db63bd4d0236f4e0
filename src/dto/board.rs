use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::format_system_time,
    engine::{ArchivedRound, EntryKind, Player, PlayerStatus, Round, ScoreEntry, Session},
};

/// Payload used to register a new player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPlayerRequest {
    /// Display name. Leading and trailing whitespace is trimmed.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Payload used to rename an existing player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RenamePlayerRequest {
    /// New display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Payload used to start a fresh round.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StartRoundRequest {
    /// Ordered participant ids; must be non-empty, known, and duplicate-free.
    #[validate(length(min = 1))]
    pub participant_ids: Vec<Uuid>,
}

/// Payload used to append a regular scoring entry to the current round.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddEntryRequest {
    /// Signed point deltas keyed by player id. Missing participants read as 0.
    #[schema(value_type = Object)]
    pub deltas: IndexMap<Uuid, i32>,
    /// Optional caption; the server numbers the entry when omitted.
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub label: Option<String>,
}

/// Payload used to apply a correction to one player's total.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct EditScoreRequest {
    /// Player whose total is adjusted.
    pub player_id: Uuid,
    /// Signed adjustment, applied on top of the current total.
    pub adjustment: i32,
}

/// Payload used to bring a registered player into the round in progress.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinRoundRequest {
    /// Player joining the current round.
    pub player_id: Uuid,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Public projection of a registered player.
pub struct PlayerSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Derived per-player scoreboard line.
pub struct StatusSummary {
    pub player_id: Uuid,
    pub name: String,
    pub total_score: i32,
    pub burned: bool,
    pub hero: bool,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Structural tag carried by each ledger entry.
pub enum EntryKindDto {
    /// Ordinary distribution scored during play.
    Regular,
    /// Catch-up entry recorded when a player joined mid-round.
    Join {
        /// Player who joined.
        player_id: Uuid,
    },
    /// Manual single-player adjustment.
    Correction {
        /// Player whose total was adjusted.
        player_id: Uuid,
        /// Signed adjustment applied.
        adjustment: i32,
    },
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// One row of the round's score ledger.
pub struct EntrySummary {
    pub id: Uuid,
    pub label: String,
    pub kind: EntryKindDto,
    /// Signed point delta per participating player.
    #[schema(value_type = Object)]
    pub deltas: IndexMap<Uuid, i32>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// Full projection of a round, entries and derived statuses included.
pub struct RoundSummary {
    pub id: Uuid,
    pub number: u64,
    pub started_at: String,
    pub participants: Vec<Uuid>,
    pub entries: Vec<EntrySummary>,
    pub statuses: Vec<StatusSummary>,
    pub hero_id: Option<Uuid>,
    pub concluded: bool,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
/// A concluded round as stored in the archive.
pub struct ArchivedRoundSummary {
    pub round: RoundSummary,
    pub ended_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Snapshot of the whole session returned by the root resource.
pub struct SessionSummary {
    pub burn_limit: i32,
    pub players: Vec<PlayerSummary>,
    pub current: Option<RoundSummary>,
    pub archive: Vec<ArchivedRoundSummary>,
    pub next_round_number: u64,
}

impl From<Player> for PlayerSummary {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
        }
    }
}

impl From<PlayerStatus> for StatusSummary {
    fn from(status: PlayerStatus) -> Self {
        Self {
            player_id: status.player_id,
            name: status.name,
            total_score: status.total_score,
            burned: status.burned,
            hero: status.hero,
        }
    }
}

impl From<EntryKind> for EntryKindDto {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Regular => EntryKindDto::Regular,
            EntryKind::Join { player_id } => EntryKindDto::Join { player_id },
            EntryKind::Correction {
                player_id,
                adjustment,
            } => EntryKindDto::Correction {
                player_id,
                adjustment,
            },
        }
    }
}

impl From<ScoreEntry> for EntrySummary {
    fn from(entry: ScoreEntry) -> Self {
        Self {
            id: entry.id,
            label: entry.label,
            kind: entry.kind.into(),
            deltas: entry.deltas,
        }
    }
}

impl From<Round> for RoundSummary {
    fn from(round: Round) -> Self {
        Self {
            id: round.id,
            number: round.number,
            started_at: format_system_time(round.started_at),
            participants: round.participants,
            entries: round.entries.into_iter().map(Into::into).collect(),
            statuses: round.statuses.into_values().map(Into::into).collect(),
            hero_id: round.hero_id,
            concluded: round.concluded,
        }
    }
}

impl From<ArchivedRound> for ArchivedRoundSummary {
    fn from(archived: ArchivedRound) -> Self {
        Self {
            round: archived.round.into(),
            ended_at: format_system_time(archived.ended_at),
        }
    }
}

impl From<Session> for SessionSummary {
    fn from(session: Session) -> Self {
        Self {
            burn_limit: session.burn_limit,
            players: session.registry.players.into_values().map(Into::into).collect(),
            current: session.current.map(Into::into),
            archive: session.archive.into_iter().map(Into::into).collect(),
            next_round_number: session.next_round_number,
        }
    }
}
