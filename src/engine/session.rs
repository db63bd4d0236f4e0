use std::collections::HashSet;
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::dao::models::SessionEntity;
use crate::engine::{
    ArchivedRound, EngineError, EntryKind, PlayerId, PlayerRegistry, Round, ScoreEntry,
};

/// Discrete outcome surfaced by a session mutation, handed to the
/// notification collaborator as plain data. The engine itself announces
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// A sole un-burned player remained and became the round's hero.
    HeroDeclared {
        /// The hero.
        player_id: PlayerId,
    },
    /// A player's total crossed the burn limit.
    PlayerBurned {
        /// The burned player.
        player_id: PlayerId,
    },
    /// A correction brought a previously burned player back under the limit.
    PlayerRecovered {
        /// The recovered player.
        player_id: PlayerId,
    },
    /// Every participant burned; the round concluded without a hero.
    AllBurned,
    /// A player joined the round in progress.
    PlayerJoined {
        /// The joining player.
        player_id: PlayerId,
        /// Catch-up score credited so the joiner matches the leader.
        catch_up_score: i32,
    },
}

/// The whole bookkeeping state for one scoring session.
///
/// Owned by the caller and passed into every operation; the engine keeps no
/// ambient state. All operations validate first and mutate second, so a
/// returned error guarantees nothing changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Cumulative total at which a player burns.
    pub burn_limit: i32,
    /// All players ever registered in this session.
    pub registry: PlayerRegistry,
    /// Round currently on the board, if any.
    pub current: Option<Round>,
    /// Concluded rounds, oldest first.
    pub archive: Vec<ArchivedRound>,
    /// Sequence number the next started round will take.
    pub next_round_number: u64,
}

impl Session {
    /// Create an empty session with the given burn threshold.
    pub fn new(burn_limit: i32) -> Self {
        Self {
            burn_limit,
            registry: PlayerRegistry::new(),
            current: None,
            archive: Vec::new(),
            next_round_number: 1,
        }
    }

    /// Register a new player.
    ///
    /// Does not touch the current round; joining is the separate
    /// [`Session::join_current_round`]. Blocked while the open round has a
    /// burned participant, since growing the roster mid-crisis is ambiguous.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, EngineError> {
        if let Some(round) = &self.current {
            if !round.concluded && round.any_burned() {
                return Err(EngineError::AddPlayerBlocked);
            }
        }
        self.registry.add(name)
    }

    /// Rename a registered player. Status snapshots pick the new name up at
    /// the next recomputation.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), EngineError> {
        self.registry.rename(id, name)
    }

    /// Start a new round with the given ordered participants, archiving any
    /// round still on the board.
    pub fn start_round(&mut self, participant_ids: Vec<PlayerId>) -> Result<(), EngineError> {
        if participant_ids.is_empty() {
            return Err(EngineError::InvalidInput(
                "a round requires at least one participant".into(),
            ));
        }

        let mut seen = HashSet::new();
        for &id in &participant_ids {
            if !self.registry.contains(id) {
                return Err(EngineError::InvalidInput(format!("unknown player `{id}`")));
            }
            if !seen.insert(id) {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate participant `{id}`"
                )));
            }
        }

        if self.current.is_some() {
            // Superseding an unfinished round concludes it.
            self.archive_current()?;
        }

        let number = self.next_round_number;
        self.next_round_number += 1;
        self.current = Some(Round::start(
            number,
            participant_ids,
            &self.registry,
            self.burn_limit,
        ));
        Ok(())
    }

    /// Append a regular distribution to the open round.
    ///
    /// Deltas for burned participants are forced to 0 regardless of what the
    /// caller supplied; deltas for unnamed participants default to 0. Deltas
    /// for ids outside the participant list are ignored.
    pub fn add_entry(
        &mut self,
        deltas: &IndexMap<PlayerId, i32>,
        label: Option<String>,
    ) -> Result<Vec<RoundEvent>, EngineError> {
        {
            let round = self.current.as_ref().ok_or(EngineError::RoundNotActive)?;
            if round.concluded {
                return Err(EngineError::RoundNotActive);
            }
        }
        let round = self.current.as_mut().expect("checked above");

        let complete: IndexMap<PlayerId, i32> = round
            .participants
            .iter()
            .map(|&id| {
                let burned = round.statuses.get(&id).is_some_and(|s| s.burned);
                let delta = if burned {
                    0
                } else {
                    deltas.get(&id).copied().unwrap_or(0)
                };
                (id, delta)
            })
            .collect();

        let label = label.unwrap_or_else(|| round.next_regular_label());
        let entry = ScoreEntry::new(label, EntryKind::Regular, complete);
        Ok(self.apply_entry(entry))
    }

    /// Apply a signed adjustment to exactly one player, recorded as a
    /// correction entry.
    ///
    /// Unlike regular entries, corrections stay possible on a concluded (not
    /// yet archived) round and may move a total across the burn threshold in
    /// either direction; hero and conclusion remain sticky.
    pub fn edit_score(
        &mut self,
        player_id: PlayerId,
        adjustment: i32,
    ) -> Result<Vec<RoundEvent>, EngineError> {
        let round = self.current.as_ref().ok_or(EngineError::RoundNotActive)?;
        if !round.participants.contains(&player_id) {
            return Err(EngineError::InvalidInput(format!(
                "player `{player_id}` is not part of the current round"
            )));
        }

        let deltas: IndexMap<PlayerId, i32> = round
            .participants
            .iter()
            .map(|&id| (id, if id == player_id { adjustment } else { 0 }))
            .collect();

        let name = self.registry.display_name(player_id);
        let signed = if adjustment >= 0 {
            format!("+{adjustment}")
        } else {
            adjustment.to_string()
        };
        let entry = ScoreEntry::new(
            format!("correction for {name} ({signed})"),
            EntryKind::Correction {
                player_id,
                adjustment,
            },
            deltas,
        );
        Ok(self.apply_entry(entry))
    }

    /// Bring a registered player into the open round.
    ///
    /// When the round already has regular entries, the joiner is credited a
    /// catch-up entry pegging them to the current leader's total (floored at
    /// 0) so they start neither ahead nor behind. With no regular entries
    /// yet, the player is simply appended with an implicit 0.
    pub fn join_current_round(
        &mut self,
        player_id: PlayerId,
    ) -> Result<Vec<RoundEvent>, EngineError> {
        if !self.registry.contains(player_id) {
            return Err(EngineError::InvalidInput(format!(
                "unknown player `{player_id}`"
            )));
        }

        let round = self.current.as_ref().ok_or(EngineError::RoundNotActive)?;
        if round.concluded {
            return Err(EngineError::RoundNotActive);
        }
        if round.participants.contains(&player_id) {
            return Err(EngineError::InvalidInput(format!(
                "player `{player_id}` already participates in the current round"
            )));
        }

        let needs_catch_up = round.regular_entry_count() > 0;
        let catch_up_score = if needs_catch_up {
            round.catch_up_score()
        } else {
            0
        };

        let round = self.current.as_mut().expect("checked above");
        round.participants.push(player_id);

        let mut events = if needs_catch_up {
            let deltas: IndexMap<PlayerId, i32> = round
                .participants
                .iter()
                .map(|&id| (id, if id == player_id { catch_up_score } else { 0 }))
                .collect();
            let name = self.registry.display_name(player_id);
            let entry = ScoreEntry::new(
                format!("join: {name}"),
                EntryKind::Join { player_id },
                deltas,
            );
            self.apply_entry(entry)
        } else {
            // Nothing scored yet: no catch-up row is needed.
            let round = self.current.as_mut().expect("checked above");
            round.refresh(&self.registry, self.burn_limit);
            Vec::new()
        };

        events.push(RoundEvent::PlayerJoined {
            player_id,
            catch_up_score,
        });
        Ok(events)
    }

    /// Conclude the current round and move it into the archive.
    ///
    /// Statuses are recomputed one last time so renames land in the stored
    /// snapshot, and a hero is determined now if the entry list supports one.
    /// Archiving is idempotent by round id: an already-archived id is
    /// replaced, not duplicated.
    pub fn archive_current(&mut self) -> Result<(), EngineError> {
        let mut round = self.current.take().ok_or(EngineError::RoundNotActive)?;
        round.refresh(&self.registry, self.burn_limit);
        round.concluded = true;

        let archived = ArchivedRound {
            round,
            ended_at: SystemTime::now(),
        };

        match self
            .archive
            .iter()
            .position(|existing| existing.round.id == archived.round.id)
        {
            Some(index) => self.archive[index] = archived,
            None => self.archive.push(archived),
        }
        Ok(())
    }

    /// Restore the most recently archived round as the current round.
    ///
    /// Refused while the round on the board has regular entries, since those
    /// would be silently discarded. Join- and correction-only rounds are
    /// replaceable. Players present in the restored round's snapshots but
    /// missing from the registry are merged back in, and the round counter is
    /// rewound so the next started round reuses the discarded number.
    pub fn undo_last_archive(&mut self) -> Result<(), EngineError> {
        if self.archive.is_empty() {
            return Err(EngineError::NothingToUndo);
        }

        if let Some(round) = &self.current {
            if !round.concluded && round.regular_entry_count() > 0 {
                return Err(EngineError::UndoBlocked);
            }
        }

        let restored = self.archive.pop().expect("archive checked non-empty");
        for status in restored.round.statuses.values() {
            self.registry.merge_missing(status.player_id, &status.name);
        }
        self.next_round_number = restored.round.number + 1;
        self.current = Some(restored.round);
        Ok(())
    }

    /// Name lookup with the `"unknown player"` sentinel for foreign ids.
    pub fn display_name(&self, id: PlayerId) -> String {
        self.registry.display_name(id)
    }

    /// Append an entry to the current round, recompute derived state, and
    /// diff the before/after view into notification events.
    fn apply_entry(&mut self, entry: ScoreEntry) -> Vec<RoundEvent> {
        let round = self
            .current
            .as_mut()
            .expect("apply_entry requires a current round");

        let burned_before: HashSet<PlayerId> = round
            .statuses
            .values()
            .filter(|s| s.burned)
            .map(|s| s.player_id)
            .collect();
        let hero_before = round.hero_id;
        let concluded_before = round.concluded;

        round.entries.push(entry);
        round.refresh(&self.registry, self.burn_limit);

        let mut events = Vec::new();
        for status in round.statuses.values() {
            let was_burned = burned_before.contains(&status.player_id);
            if status.burned && !was_burned {
                events.push(RoundEvent::PlayerBurned {
                    player_id: status.player_id,
                });
            } else if !status.burned && was_burned {
                events.push(RoundEvent::PlayerRecovered {
                    player_id: status.player_id,
                });
            }
        }

        if hero_before.is_none() {
            if let Some(player_id) = round.hero_id {
                events.push(RoundEvent::HeroDeclared { player_id });
            }
        }

        if !concluded_before && round.concluded && round.hero_id.is_none() && round.all_burned() {
            events.push(RoundEvent::AllBurned);
        }

        events
    }
}

impl From<SessionEntity> for Session {
    fn from(value: SessionEntity) -> Self {
        Self {
            burn_limit: value.burn_limit,
            registry: PlayerRegistry {
                players: value
                    .players
                    .into_iter()
                    .map(|player| (player.id, player.into()))
                    .collect(),
            },
            current: value.current.map(Into::into),
            archive: value.archive.into_iter().map(Into::into).collect(),
            next_round_number: value.next_round_number,
        }
    }
}

impl From<Session> for SessionEntity {
    fn from(value: Session) -> Self {
        Self {
            burn_limit: value.burn_limit,
            players: value
                .registry
                .players
                .into_values()
                .map(Into::into)
                .collect(),
            current: value.current.map(Into::into),
            archive: value.archive.into_iter().map(Into::into).collect(),
            next_round_number: value.next_round_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: i32 = 31;

    fn session_with(names: &[&str]) -> (Session, Vec<PlayerId>) {
        let mut session = Session::new(LIMIT);
        let ids = names
            .iter()
            .map(|name| session.add_player(name).unwrap())
            .collect();
        (session, ids)
    }

    fn deltas(pairs: &[(PlayerId, i32)]) -> IndexMap<PlayerId, i32> {
        pairs.iter().copied().collect()
    }

    fn current(session: &Session) -> &Round {
        session.current.as_ref().expect("current round")
    }

    #[test]
    fn start_round_requires_participants() {
        let (mut session, _) = session_with(&["A"]);
        assert_eq!(
            session.start_round(Vec::new()),
            Err(EngineError::InvalidInput(
                "a round requires at least one participant".into()
            ))
        );
        assert!(session.current.is_none());
    }

    #[test]
    fn start_round_rejects_unknown_and_duplicate_ids() {
        let (mut session, ids) = session_with(&["A"]);
        let foreign = uuid::Uuid::new_v4();
        assert!(matches!(
            session.start_round(vec![foreign]),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            session.start_round(vec![ids[0], ids[0]]),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn fresh_round_has_zero_totals_and_no_burns() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        let round = current(&session);
        assert_eq!(round.number, 1);
        assert!(round.entries.is_empty());
        assert!(round.statuses.values().all(|s| s.total_score == 0 && !s.burned));
        assert!(!round.concluded);
    }

    #[test]
    fn burn_and_hero_in_single_entry() {
        // Spec scenario: {A: 31, B: 10} for [A, B].
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();

        let events = session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 10)]), None)
            .unwrap();

        let round = current(&session);
        assert_eq!(round.statuses[&ids[0]].total_score, 31);
        assert!(round.statuses[&ids[0]].burned);
        assert_eq!(round.statuses[&ids[1]].total_score, 10);
        assert!(!round.statuses[&ids[1]].burned);
        assert_eq!(round.hero_id, Some(ids[1]));
        assert!(round.concluded);

        assert!(events.contains(&RoundEvent::PlayerBurned { player_id: ids[0] }));
        assert!(events.contains(&RoundEvent::HeroDeclared { player_id: ids[1] }));
    }

    #[test]
    fn hero_survives_correction_that_unburns_a_rival() {
        // Spec scenario: hero C stays hero after A is corrected below the limit.
        let (mut session, ids) = session_with(&["A", "B", "C"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 31), (ids[2], 5)]), None)
            .unwrap();
        session.add_entry(&deltas(&[]), None).unwrap_err();

        let round = current(&session);
        assert_eq!(round.hero_id, Some(ids[2]));
        assert!(round.concluded);

        let events = session.edit_score(ids[0], -5).unwrap();
        let round = current(&session);
        assert_eq!(round.statuses[&ids[0]].total_score, 26);
        assert!(!round.statuses[&ids[0]].burned);
        assert_eq!(round.hero_id, Some(ids[2]), "hero is sticky");
        assert!(round.concluded, "conclusion is sticky");
        assert!(events.contains(&RoundEvent::PlayerRecovered { player_id: ids[0] }));
    }

    #[test]
    fn regular_entries_rejected_once_concluded() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31)]), None)
            .unwrap();
        assert!(current(&session).concluded);

        assert_eq!(
            session.add_entry(&deltas(&[(ids[1], 1)]), None),
            Err(EngineError::RoundNotActive)
        );
    }

    #[test]
    fn add_entry_without_round_is_rejected() {
        let (mut session, ids) = session_with(&["A"]);
        assert_eq!(
            session.add_entry(&deltas(&[(ids[0], 1)]), None),
            Err(EngineError::RoundNotActive)
        );
    }

    #[test]
    fn burned_players_are_forced_to_zero_delta() {
        let (mut session, ids) = session_with(&["A", "B", "C"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 1), (ids[2], 2)]), None)
            .unwrap();
        assert!(current(&session).statuses[&ids[0]].burned);

        session
            .add_entry(&deltas(&[(ids[0], 10), (ids[1], 3)]), None)
            .unwrap();

        let round = current(&session);
        assert_eq!(
            round.statuses[&ids[0]].total_score, 31,
            "burned player accrues nothing"
        );
        assert_eq!(round.entries[1].delta_for(ids[0]), 0);
        assert_eq!(round.statuses[&ids[1]].total_score, 4);
    }

    #[test]
    fn correction_can_cross_the_threshold_both_ways() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 30), (ids[1], 1)]), None)
            .unwrap();

        let events = session.edit_score(ids[0], 1).unwrap();
        assert!(current(&session).statuses[&ids[0]].burned);
        assert!(events.contains(&RoundEvent::PlayerBurned { player_id: ids[0] }));

        let events = session.edit_score(ids[0], -10).unwrap();
        assert!(!current(&session).statuses[&ids[0]].burned);
        assert!(events.contains(&RoundEvent::PlayerRecovered { player_id: ids[0] }));
    }

    #[test]
    fn all_burned_concludes_without_hero() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        let events = session
            .add_entry(&deltas(&[(ids[0], 40), (ids[1], 35)]), None)
            .unwrap();

        let round = current(&session);
        assert!(round.concluded);
        assert!(round.hero_id.is_none());
        assert!(events.contains(&RoundEvent::AllBurned));
    }

    #[test]
    fn entry_labels_number_regular_entries_contiguously() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 1)]), None).unwrap();
        session.edit_score(ids[1], 2).unwrap();
        session.add_entry(&deltas(&[(ids[0], 1)]), None).unwrap();

        let labels: Vec<&str> = current(&session)
            .entries
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(labels[0], "entry 1");
        assert_eq!(labels[2], "entry 2");
    }

    #[test]
    fn add_player_blocked_while_a_participant_is_burned() {
        let (mut session, ids) = session_with(&["A", "B", "C"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 1)]), None)
            .unwrap();
        assert!(!current(&session).concluded);

        assert_eq!(session.add_player("D"), Err(EngineError::AddPlayerBlocked));

        // Once the round concludes the registry opens up again.
        session
            .add_entry(&deltas(&[(ids[1], 31)]), None)
            .unwrap();
        assert!(current(&session).concluded);
        assert!(session.add_player("D").is_ok());
    }

    #[test]
    fn join_credits_the_leaders_total() {
        // Spec scenario: leader at 20, D joins with a single catch-up entry.
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 20), (ids[1], 7)]), None)
            .unwrap();

        let d = session.add_player("D").unwrap();
        let events = session.join_current_round(d).unwrap();

        let round = current(&session);
        assert_eq!(round.participants.last(), Some(&d));
        assert_eq!(round.statuses[&d].total_score, 20);

        let join_entry = round.entries.last().unwrap();
        assert!(matches!(join_entry.kind, EntryKind::Join { player_id } if player_id == d));
        assert_eq!(join_entry.delta_for(d), 20);
        assert_eq!(join_entry.delta_for(ids[0]), 0);

        assert!(events.contains(&RoundEvent::PlayerJoined {
            player_id: d,
            catch_up_score: 20,
        }));
    }

    #[test]
    fn join_before_any_scoring_needs_no_entry() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();

        let c = session.add_player("C").unwrap();
        session.join_current_round(c).unwrap();

        let round = current(&session);
        assert_eq!(round.participants.len(), 3);
        assert!(round.entries.is_empty());
        assert_eq!(round.statuses[&c].total_score, 0);
    }

    #[test]
    fn join_preserves_an_existing_hero() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 4)]), None)
            .unwrap();
        assert_eq!(current(&session).hero_id, Some(ids[1]));

        // Round is concluded, so a join is refused outright.
        let c = session.add_player("C").unwrap();
        assert_eq!(
            session.join_current_round(c),
            Err(EngineError::RoundNotActive)
        );
        assert_eq!(current(&session).hero_id, Some(ids[1]));
    }

    #[test]
    fn archive_is_idempotent_by_round_id() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 5)]), None).unwrap();
        session.archive_current().unwrap();
        assert_eq!(session.archive.len(), 1);

        // Undo puts the same round id back on the board; re-archiving must
        // replace the stored record, not duplicate it.
        session.undo_last_archive().unwrap();
        session.archive_current().unwrap();
        assert_eq!(session.archive.len(), 1);
    }

    #[test]
    fn archive_refreshes_renamed_snapshots() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 3)]), None).unwrap();

        session.rename_player(ids[0], "Renamed").unwrap();
        session.archive_current().unwrap();

        let archived = session.archive.last().unwrap();
        assert_eq!(archived.round.statuses[&ids[0]].name, "Renamed");
        assert!(archived.round.concluded);
    }

    #[test]
    fn undo_with_empty_archive_fails() {
        let (mut session, _) = session_with(&["A"]);
        assert_eq!(session.undo_last_archive(), Err(EngineError::NothingToUndo));
    }

    #[test]
    fn undo_blocked_by_regular_entries_only() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 5)]), None).unwrap();
        session.start_round(ids.clone()).unwrap();

        // Correction and join entries do not block the undo.
        session.edit_score(ids[0], 2).unwrap();
        let c = session.add_player("C").unwrap();
        session.join_current_round(c).unwrap();
        assert!(session.undo_last_archive().is_ok());

        // But a regular entry does.
        session.archive_current().unwrap();
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[1], 1)]), None).unwrap();
        assert_eq!(session.undo_last_archive(), Err(EngineError::UndoBlocked));
    }

    #[test]
    fn undo_restores_round_verbatim_and_rewinds_counter() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 2)]), None)
            .unwrap();
        let before = current(&session).clone();

        session.start_round(ids.clone()).unwrap();
        assert_eq!(current(&session).number, 2);

        session.undo_last_archive().unwrap();
        let restored = current(&session);
        assert_eq!(restored.id, before.id);
        assert_eq!(restored.participants, before.participants);
        assert_eq!(restored.entries, before.entries);
        assert_eq!(restored.hero_id, before.hero_id);
        assert!(restored.concluded);

        // The next started round reuses the discarded number.
        session.start_round(ids.clone()).unwrap();
        assert_eq!(current(&session).number, 2);
    }

    #[test]
    fn undo_recovers_players_missing_from_the_registry() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 4)]), None).unwrap();
        session.archive_current().unwrap();

        // Simulate a partial restore that lost player B.
        session.registry.players.shift_remove(&ids[1]);
        assert_eq!(session.display_name(ids[1]), super::super::UNKNOWN_PLAYER);

        session.undo_last_archive().unwrap();
        assert_eq!(session.display_name(ids[1]), "B");
    }

    #[test]
    fn starting_a_round_archives_the_previous_one() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session.add_entry(&deltas(&[(ids[0], 9)]), None).unwrap();

        session.start_round(ids.clone()).unwrap();
        assert_eq!(session.archive.len(), 1);
        assert!(session.archive[0].round.concluded);
        assert_eq!(current(&session).number, 2);
        assert!(current(&session).entries.is_empty());
    }

    #[test]
    fn session_round_trips_through_the_snapshot_entity() {
        let (mut session, ids) = session_with(&["A", "B"]);
        session.start_round(ids.clone()).unwrap();
        session
            .add_entry(&deltas(&[(ids[0], 31), (ids[1], 2)]), None)
            .unwrap();
        session.edit_score(ids[1], 3).unwrap();

        let entity: SessionEntity = session.clone().into();
        let restored: Session = entity.into();
        assert_eq!(restored, session);
    }
}
