use std::time::SystemTime;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::{ArchivedRoundEntity, PlayerStatusEntity, RoundEntity};
use crate::engine::{PlayerId, PlayerRegistry, ScoreEntry};

/// Derived per-player view of a round. Never stored as source of truth:
/// recomputed from the entry list after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Player this status belongs to.
    pub player_id: PlayerId,
    /// Name snapshot taken from the registry at derivation time.
    pub name: String,
    /// Sum of this player's deltas across all entries so far.
    pub total_score: i32,
    /// True once the total meets or exceeds the burn limit.
    pub burned: bool,
    /// True only for the round's hero.
    pub hero: bool,
}

/// One scoring session among a fixed (possibly growing) set of participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Unique id of the round.
    pub id: Uuid,
    /// Sequence number, monotonically increasing across the session.
    pub number: u64,
    /// When the round was started.
    pub started_at: SystemTime,
    /// Participating player ids; fixes column order. Grows via late join,
    /// never shrinks.
    pub participants: Vec<PlayerId>,
    /// Append-only ledger of score entries.
    pub entries: Vec<ScoreEntry>,
    /// Derived statuses keyed by player id, in participant order.
    pub statuses: IndexMap<PlayerId, PlayerStatus>,
    /// Hero of the round, sticky once determined.
    pub hero_id: Option<PlayerId>,
    /// Whether the round has concluded. Sticky: corrections never re-open a
    /// concluded round.
    pub concluded: bool,
}

/// Sum every participant's deltas over the entry list and flag burns.
///
/// Pure and total for any input: participants missing from an entry's delta
/// map count as 0. Hero flags are left unset here; hero detection is applied
/// by [`Round::refresh`] because it depends on sticky round state.
pub fn compute_statuses(
    entries: &[ScoreEntry],
    participants: &[PlayerId],
    registry: &PlayerRegistry,
    burn_limit: i32,
) -> IndexMap<PlayerId, PlayerStatus> {
    participants
        .iter()
        .map(|&player_id| {
            let total_score: i32 = entries.iter().map(|entry| entry.delta_for(player_id)).sum();
            (
                player_id,
                PlayerStatus {
                    player_id,
                    name: registry.display_name(player_id),
                    total_score,
                    burned: total_score >= burn_limit,
                    hero: false,
                },
            )
        })
        .collect()
}

impl Round {
    /// Create a fresh open round with statuses derived from an empty ledger.
    pub fn start(
        number: u64,
        participants: Vec<PlayerId>,
        registry: &PlayerRegistry,
        burn_limit: i32,
    ) -> Self {
        let mut round = Self {
            id: Uuid::new_v4(),
            number,
            started_at: SystemTime::now(),
            participants,
            entries: Vec::new(),
            statuses: IndexMap::new(),
            hero_id: None,
            concluded: false,
        };
        round.refresh(registry, burn_limit);
        round
    }

    /// Recompute statuses from scratch and re-apply hero/conclusion
    /// detection.
    ///
    /// Hero is sticky: once `hero_id` is set it is re-flagged verbatim and
    /// never reassigned or cleared. A round with a single participant never
    /// produces a hero. Conclusion is likewise one-way.
    pub fn refresh(&mut self, registry: &PlayerRegistry, burn_limit: i32) {
        self.statuses = compute_statuses(&self.entries, &self.participants, registry, burn_limit);

        match self.hero_id {
            Some(hero_id) => {
                if let Some(status) = self.statuses.get_mut(&hero_id) {
                    status.hero = true;
                }
            }
            None => {
                let active: Vec<PlayerId> = self
                    .participants
                    .iter()
                    .copied()
                    .filter(|id| self.statuses.get(id).is_some_and(|s| !s.burned))
                    .collect();
                if active.len() == 1 && self.participants.len() > 1 {
                    let hero_id = active[0];
                    if let Some(status) = self.statuses.get_mut(&hero_id) {
                        status.hero = true;
                    }
                    self.hero_id = Some(hero_id);
                }
            }
        }

        self.concluded =
            self.concluded || self.hero_id.is_some() || self.all_burned();
    }

    /// True when the round has participants and every one of them is burned.
    pub fn all_burned(&self) -> bool {
        !self.participants.is_empty()
            && self
                .participants
                .iter()
                .all(|id| self.statuses.get(id).is_some_and(|s| s.burned))
    }

    /// Whether any participant is currently burned.
    pub fn any_burned(&self) -> bool {
        self.statuses.values().any(|status| status.burned)
    }

    /// Number of regular (non-join, non-correction) entries recorded.
    pub fn regular_entry_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.is_substantive())
            .count()
    }

    /// Highest cumulative total among current participants, floored at 0.
    /// Used to peg a late joiner to the current leader.
    pub fn catch_up_score(&self) -> i32 {
        self.statuses
            .values()
            .map(|status| status.total_score)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Caption for the next regular entry. Join and correction entries are
    /// excluded from the counter so regular entries stay numbered
    /// contiguously.
    pub fn next_regular_label(&self) -> String {
        format!("entry {}", self.regular_entry_count() + 1)
    }
}

/// A concluded round moved out of the active session, plus its end timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedRound {
    /// The archived round, immutable from here on.
    pub round: Round,
    /// When the round was archived.
    pub ended_at: SystemTime,
}

impl From<PlayerStatusEntity> for PlayerStatus {
    fn from(value: PlayerStatusEntity) -> Self {
        Self {
            player_id: value.player_id,
            name: value.name,
            total_score: value.total_score,
            burned: value.burned,
            hero: value.hero,
        }
    }
}

impl From<PlayerStatus> for PlayerStatusEntity {
    fn from(value: PlayerStatus) -> Self {
        Self {
            player_id: value.player_id,
            name: value.name,
            total_score: value.total_score,
            burned: value.burned,
            hero: value.hero,
        }
    }
}

impl From<RoundEntity> for Round {
    fn from(value: RoundEntity) -> Self {
        Self {
            id: value.id,
            number: value.number,
            started_at: value.started_at,
            participants: value.participants,
            entries: value.entries.into_iter().map(Into::into).collect(),
            statuses: value
                .statuses
                .into_iter()
                .map(|status| (status.player_id, status.into()))
                .collect(),
            hero_id: value.hero_id,
            concluded: value.concluded,
        }
    }
}

impl From<Round> for RoundEntity {
    fn from(value: Round) -> Self {
        Self {
            id: value.id,
            number: value.number,
            started_at: value.started_at,
            participants: value.participants,
            entries: value.entries.into_iter().map(Into::into).collect(),
            statuses: value.statuses.into_values().map(Into::into).collect(),
            hero_id: value.hero_id,
            concluded: value.concluded,
        }
    }
}

impl From<ArchivedRoundEntity> for ArchivedRound {
    fn from(value: ArchivedRoundEntity) -> Self {
        Self {
            round: value.round.into(),
            ended_at: value.ended_at,
        }
    }
}

impl From<ArchivedRound> for ArchivedRoundEntity {
    fn from(value: ArchivedRound) -> Self {
        Self {
            round: value.round.into(),
            ended_at: value.ended_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::engine::EntryKind;

    const LIMIT: i32 = 31;

    fn registry_with(names: &[&str]) -> (PlayerRegistry, Vec<PlayerId>) {
        let mut registry = PlayerRegistry::new();
        let ids = names
            .iter()
            .map(|name| registry.add(name).unwrap())
            .collect();
        (registry, ids)
    }

    fn regular_entry(deltas: &[(PlayerId, i32)]) -> ScoreEntry {
        ScoreEntry::new(
            "entry".into(),
            EntryKind::Regular,
            deltas.iter().copied().collect(),
        )
    }

    #[test]
    fn totals_sum_entries_with_zero_default() {
        let (registry, ids) = registry_with(&["A", "B"]);
        let entries = vec![
            regular_entry(&[(ids[0], 5)]),
            regular_entry(&[(ids[0], 3), (ids[1], -2)]),
        ];

        let statuses = compute_statuses(&entries, &ids, &registry, LIMIT);
        assert_eq!(statuses[&ids[0]].total_score, 8);
        assert_eq!(statuses[&ids[1]].total_score, -2);
        assert!(!statuses[&ids[0]].burned);
    }

    #[test]
    fn burn_is_meets_or_exceeds() {
        let (registry, ids) = registry_with(&["A"]);
        let entries = vec![regular_entry(&[(ids[0], LIMIT)])];
        let statuses = compute_statuses(&entries, &ids, &registry, LIMIT);
        assert!(statuses[&ids[0]].burned);

        let entries = vec![regular_entry(&[(ids[0], LIMIT - 1)])];
        let statuses = compute_statuses(&entries, &ids, &registry, LIMIT);
        assert!(!statuses[&ids[0]].burned);
    }

    #[test]
    fn solo_round_never_gets_a_hero() {
        let (registry, ids) = registry_with(&["A"]);
        let mut round = Round::start(1, ids.clone(), &registry, LIMIT);
        round.entries.push(regular_entry(&[(ids[0], LIMIT)]));
        round.refresh(&registry, LIMIT);

        assert!(round.hero_id.is_none());
        // All participants burned still concludes the round.
        assert!(round.concluded);
    }

    #[test]
    fn hero_requires_sole_active_among_many() {
        let (registry, ids) = registry_with(&["A", "B", "C"]);
        let mut round = Round::start(1, ids.clone(), &registry, LIMIT);
        round
            .entries
            .push(regular_entry(&[(ids[0], 31), (ids[1], 31), (ids[2], 5)]));
        round.refresh(&registry, LIMIT);

        assert_eq!(round.hero_id, Some(ids[2]));
        assert!(round.statuses[&ids[2]].hero);
        assert!(round.concluded);
        assert_eq!(
            round.statuses.values().filter(|s| s.hero).count(),
            1,
            "at most one hero"
        );
    }

    #[test]
    fn hero_is_sticky_across_refresh() {
        let (registry, ids) = registry_with(&["A", "B"]);
        let mut round = Round::start(1, ids.clone(), &registry, LIMIT);
        round.entries.push(regular_entry(&[(ids[0], 31)]));
        round.refresh(&registry, LIMIT);
        assert_eq!(round.hero_id, Some(ids[1]));

        // A later correction un-burns A; the hero must not move.
        round.entries.push(ScoreEntry::new(
            "correction".into(),
            EntryKind::Correction {
                player_id: ids[0],
                adjustment: -5,
            },
            [(ids[0], -5)].into_iter().collect(),
        ));
        round.refresh(&registry, LIMIT);

        assert_eq!(round.hero_id, Some(ids[1]));
        assert!(round.statuses[&ids[1]].hero);
        assert!(!round.statuses[&ids[0]].burned);
        assert!(round.concluded);
    }

    #[test]
    fn regular_labels_skip_join_and_correction_entries() {
        let (registry, ids) = registry_with(&["A", "B"]);
        let mut round = Round::start(1, ids.clone(), &registry, LIMIT);
        assert_eq!(round.next_regular_label(), "entry 1");

        round.entries.push(regular_entry(&[(ids[0], 1)]));
        round.entries.push(ScoreEntry::new(
            "join: C".into(),
            EntryKind::Join { player_id: ids[1] },
            IndexMap::new(),
        ));
        round.refresh(&registry, LIMIT);

        assert_eq!(round.next_regular_label(), "entry 2");
    }

    #[test]
    fn catch_up_score_floors_at_zero() {
        let (registry, ids) = registry_with(&["A", "B"]);
        let mut round = Round::start(1, ids.clone(), &registry, LIMIT);
        round
            .entries
            .push(regular_entry(&[(ids[0], -4), (ids[1], -1)]));
        round.refresh(&registry, LIMIT);
        assert_eq!(round.catch_up_score(), 0);

        round.entries.push(regular_entry(&[(ids[1], 21)]));
        round.refresh(&registry, LIMIT);
        assert_eq!(round.catch_up_score(), 20);
    }

    proptest! {
        // Property: each participant's total equals the ordered sum of its
        // deltas, with missing deltas read as zero.
        #[test]
        fn total_sum_invariant(rows in prop::collection::vec(
            (any::<i16>(), any::<i16>(), prop::bool::ANY),
            0..24,
        )) {
            let (registry, ids) = registry_with(&["A", "B"]);
            let entries: Vec<ScoreEntry> = rows
                .iter()
                .map(|&(a, b, skip_b)| {
                    let mut deltas: IndexMap<PlayerId, i32> = IndexMap::new();
                    deltas.insert(ids[0], i32::from(a));
                    if !skip_b {
                        deltas.insert(ids[1], i32::from(b));
                    }
                    ScoreEntry::new("entry".into(), EntryKind::Regular, deltas)
                })
                .collect();

            let statuses = compute_statuses(&entries, &ids, &registry, LIMIT);

            let expected_a: i32 = rows.iter().map(|&(a, _, _)| i32::from(a)).sum();
            let expected_b: i32 = rows
                .iter()
                .filter(|&&(_, _, skip_b)| !skip_b)
                .map(|&(_, b, _)| i32::from(b))
                .sum();

            prop_assert_eq!(statuses[&ids[0]].total_score, expected_a);
            prop_assert_eq!(statuses[&ids[1]].total_score, expected_b);
            prop_assert_eq!(statuses[&ids[0]].burned, expected_a >= LIMIT);
        }
    }
}
