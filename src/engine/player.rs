use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::PlayerEntity;
use crate::engine::{EngineError, PlayerId};

/// Sentinel name returned when a looked-up id is not in the registry.
///
/// Display code must tolerate stale or foreign ids, e.g. after a partial
/// snapshot restore, so lookups never fail fatally.
pub const UNKNOWN_PLAYER: &str = "unknown player";

/// A registered player. The registry is the source of truth for names; other
/// structures only keep denormalized snapshots taken at derivation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable opaque identifier.
    pub id: PlayerId,
    /// Display name, mutable in place.
    pub name: String,
}

/// Mapping of player identity to display name, independent of round state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    /// Registered players in insertion order.
    pub players: IndexMap<PlayerId, Player>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new player with a fresh id.
    ///
    /// Rejects blank or whitespace-only names with
    /// [`EngineError::InvalidInput`].
    pub fn add(&mut self, name: &str) -> Result<PlayerId, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "player name must not be empty".into(),
            ));
        }

        let id = Uuid::new_v4();
        self.players.insert(
            id,
            Player {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    /// Rename a player in place. Snapshots already taken keep the old name
    /// until the next status recomputation.
    pub fn rename(&mut self, id: PlayerId, name: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "player name must not be empty".into(),
            ));
        }

        let Some(player) = self.players.get_mut(&id) else {
            return Err(EngineError::InvalidInput(format!("unknown player `{id}`")));
        };
        player.name = name.to_string();
        Ok(())
    }

    /// Display name for an id, falling back to [`UNKNOWN_PLAYER`].
    pub fn display_name(&self, id: PlayerId) -> String {
        self.players
            .get(&id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| UNKNOWN_PLAYER.to_string())
    }

    /// Whether the id is registered.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Re-insert a player recovered from an archived snapshot, keeping the
    /// existing record when the id is already present.
    pub fn merge_missing(&mut self, id: PlayerId, name: &str) {
        self.players
            .entry(id)
            .or_insert_with(|| Player {
                id,
                name: name.to_string(),
            });
    }
}

impl From<PlayerEntity> for Player {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<Player> for PlayerEntity {
    fn from(value: Player) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_blank_names() {
        let mut registry = PlayerRegistry::new();
        assert!(matches!(
            registry.add("   "),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(registry.players.is_empty());
    }

    #[test]
    fn add_trims_and_stores() {
        let mut registry = PlayerRegistry::new();
        let id = registry.add("  Samir ").unwrap();
        assert_eq!(registry.display_name(id), "Samir");
    }

    #[test]
    fn lookup_of_foreign_id_yields_sentinel() {
        let registry = PlayerRegistry::new();
        assert_eq!(registry.display_name(Uuid::new_v4()), UNKNOWN_PLAYER);
    }

    #[test]
    fn merge_missing_keeps_existing_name() {
        let mut registry = PlayerRegistry::new();
        let id = registry.add("Huda").unwrap();
        registry.merge_missing(id, "Old Snapshot Name");
        assert_eq!(registry.display_name(id), "Huda");

        let orphan = Uuid::new_v4();
        registry.merge_missing(orphan, "Recovered");
        assert_eq!(registry.display_name(orphan), "Recovered");
    }
}
