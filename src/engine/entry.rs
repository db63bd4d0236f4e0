use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::{EntryKindEntity, ScoreEntryEntity};
use crate::engine::PlayerId;

/// Why an entry exists. Logic decisions (entry numbering, undo eligibility)
/// key off this tag, never off the display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Ordinary distribution scored during play.
    Regular,
    /// Catch-up entry created when a player joined mid-round.
    Join {
        /// Player who joined.
        player_id: PlayerId,
    },
    /// Manual single-player adjustment.
    Correction {
        /// Player whose total was adjusted.
        player_id: PlayerId,
        /// Signed adjustment applied.
        adjustment: i32,
    },
}

/// One row of points applied simultaneously to all participants of a round.
///
/// Immutable once appended: corrections are modeled as new entries, never as
/// mutation of history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    /// Unique id of this entry.
    pub id: Uuid,
    /// Display caption (e.g. `entry 3`, `join: Huda`). Informational only.
    pub label: String,
    /// Structural tag distinguishing regular play, joins, and corrections.
    pub kind: EntryKind,
    /// Signed point delta per participating player.
    pub deltas: IndexMap<PlayerId, i32>,
}

impl ScoreEntry {
    /// Build an entry with a fresh id.
    pub fn new(label: String, kind: EntryKind, deltas: IndexMap<PlayerId, i32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            kind,
            deltas,
        }
    }

    /// Delta recorded for a player, defaulting to 0 when absent.
    pub fn delta_for(&self, player_id: PlayerId) -> i32 {
        self.deltas.get(&player_id).copied().unwrap_or(0)
    }

    /// Whether this entry counts as real scoring work. Join and correction
    /// entries are bookkeeping and never block an archive undo.
    pub fn is_substantive(&self) -> bool {
        matches!(self.kind, EntryKind::Regular)
    }
}

impl From<EntryKindEntity> for EntryKind {
    fn from(value: EntryKindEntity) -> Self {
        match value {
            EntryKindEntity::Regular => EntryKind::Regular,
            EntryKindEntity::Join { player_id } => EntryKind::Join { player_id },
            EntryKindEntity::Correction {
                player_id,
                adjustment,
            } => EntryKind::Correction {
                player_id,
                adjustment,
            },
        }
    }
}

impl From<EntryKind> for EntryKindEntity {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Regular => EntryKindEntity::Regular,
            EntryKind::Join { player_id } => EntryKindEntity::Join { player_id },
            EntryKind::Correction {
                player_id,
                adjustment,
            } => EntryKindEntity::Correction {
                player_id,
                adjustment,
            },
        }
    }
}

impl From<ScoreEntryEntity> for ScoreEntry {
    fn from(value: ScoreEntryEntity) -> Self {
        Self {
            id: value.id,
            label: value.label,
            kind: value.kind.into(),
            deltas: value.deltas,
        }
    }
}

impl From<ScoreEntry> for ScoreEntryEntity {
    fn from(value: ScoreEntry) -> Self {
        Self {
            id: value.id,
            label: value.label,
            kind: value.kind.into(),
            deltas: value.deltas,
        }
    }
}
