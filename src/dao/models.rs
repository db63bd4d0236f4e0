//! Plain serializable entities mirroring the engine state field-for-field.
//!
//! The engine only guarantees its state is representable as acyclic data;
//! these are that representation. Conversions to and from the runtime types
//! live next to the engine structs.

use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted form of a registered player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntity {
    /// Stable player id.
    pub id: Uuid,
    /// Display name at snapshot time.
    pub name: String,
}

/// Persisted form of an entry's structural tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKindEntity {
    /// Ordinary distribution.
    Regular,
    /// Late-join catch-up entry.
    Join {
        /// Player who joined.
        player_id: Uuid,
    },
    /// Manual single-player adjustment.
    Correction {
        /// Adjusted player.
        player_id: Uuid,
        /// Signed adjustment.
        adjustment: i32,
    },
}

/// Persisted form of one score entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntryEntity {
    /// Entry id.
    pub id: Uuid,
    /// Display caption.
    pub label: String,
    /// Structural tag.
    pub kind: EntryKindEntity,
    /// Signed delta per player id.
    pub deltas: IndexMap<Uuid, i32>,
}

/// Persisted form of a derived player status. Stored with the round so undo
/// can recover players that dropped out of the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatusEntity {
    /// Player id.
    pub player_id: Uuid,
    /// Name snapshot.
    pub name: String,
    /// Cumulative total.
    pub total_score: i32,
    /// Burned flag.
    pub burned: bool,
    /// Hero flag.
    pub hero: bool,
}

/// Persisted form of a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEntity {
    /// Round id.
    pub id: Uuid,
    /// Sequence number.
    pub number: u64,
    /// Start timestamp.
    pub started_at: SystemTime,
    /// Participant ids in seat order.
    pub participants: Vec<Uuid>,
    /// Entry ledger, oldest first.
    pub entries: Vec<ScoreEntryEntity>,
    /// Status snapshots in participant order.
    pub statuses: Vec<PlayerStatusEntity>,
    /// Hero, when determined.
    pub hero_id: Option<Uuid>,
    /// Conclusion flag.
    pub concluded: bool,
}

/// Persisted form of an archived round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedRoundEntity {
    /// The archived round.
    pub round: RoundEntity,
    /// End timestamp stamped at archival.
    pub ended_at: SystemTime,
}

/// Persisted form of a whole session: the snapshot unit written to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntity {
    /// Configured burn threshold.
    pub burn_limit: i32,
    /// Registered players in insertion order.
    pub players: Vec<PlayerEntity>,
    /// Round currently on the board.
    pub current: Option<RoundEntity>,
    /// Archived rounds, oldest first.
    pub archive: Vec<ArchivedRoundEntity>,
    /// Sequence number the next round will take.
    pub next_round_number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_survives_json_round_trip() {
        let player = Uuid::new_v4();
        let entity = SessionEntity {
            burn_limit: 31,
            players: vec![PlayerEntity {
                id: player,
                name: "A".into(),
            }],
            current: Some(RoundEntity {
                id: Uuid::new_v4(),
                number: 3,
                started_at: SystemTime::now(),
                participants: vec![player],
                entries: vec![ScoreEntryEntity {
                    id: Uuid::new_v4(),
                    label: "correction for A (-2)".into(),
                    kind: EntryKindEntity::Correction {
                        player_id: player,
                        adjustment: -2,
                    },
                    deltas: [(player, -2)].into_iter().collect(),
                }],
                statuses: vec![PlayerStatusEntity {
                    player_id: player,
                    name: "A".into(),
                    total_score: -2,
                    burned: false,
                    hero: false,
                }],
                hero_id: None,
                concluded: false,
            }),
            archive: Vec::new(),
            next_round_number: 4,
        };

        let json = serde_json::to_string(&entity).unwrap();
        let back: SessionEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.next_round_number, 4);
        let round = back.current.unwrap();
        assert_eq!(round.number, 3);
        assert_eq!(round.entries[0].deltas[&player], -2);
        assert!(matches!(
            round.entries[0].kind,
            EntryKindEntity::Correction { adjustment: -2, .. }
        ));
    }
}
