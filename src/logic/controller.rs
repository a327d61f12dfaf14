//! Tournament controller: the only component that changes the tournament phase.
//!
//! Every operation reads what it needs from the store, computes, and writes the result
//! back. Nothing is cached between calls. A step that changes more than one record
//! hands the store a single [`StoreCommit`].

use crate::error::{ConsistencyError, TournamentError, ValidationError};
use crate::logic::advancement::{advance_knockout, round_complete};
use crate::logic::knockout::{generate_knockout_bracket, BracketShape};
use crate::logic::roster::{parse_roster_csv, validate_registration, validate_start};
use crate::logic::round_robin::schedule_round_robin;
use crate::logic::standings::{league_champion, league_complete, rank_participants, Standing};
use crate::models::{
    Fixture, FixtureId, Participant, ParticipantId, TournamentFormat, TournamentPhase,
    TournamentState,
};
use crate::random::RandomSource;
use crate::store::{CounterUpdate, FixtureResult, StoreCommit, TournamentStore};
use serde::Serialize;
use std::io::Read;

/// Read-only view of everything a caller needs to render a tournament.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentSnapshot {
    pub status: TournamentState,
    pub standings: Vec<Standing>,
    /// Sorted by round, then match number.
    pub fixtures: Vec<Fixture>,
    /// Present for knockout tournaments with at least one participant.
    pub bracket: Option<BracketShape>,
}

pub struct TournamentController<S, R> {
    store: S,
    rng: R,
}

fn require_phase(state: &TournamentState, expected: TournamentPhase) -> Result<(), ValidationError> {
    if state.phase != expected {
        return Err(ValidationError::WrongPhase {
            expected,
            actual: state.phase,
        });
    }
    Ok(())
}

fn find_participant(
    participants: &[Participant],
    id: ParticipantId,
) -> Result<&Participant, ConsistencyError> {
    participants
        .iter()
        .find(|p| p.id == id)
        .ok_or(ConsistencyError::ParticipantNotFound(id))
}

/// Queue the next knockout round into `commit` once `round` is decided.
/// Returns the champion's name when the bracket is finished.
fn knockout_outcome(
    fixtures: &[Fixture],
    round: u32,
    participants: &[Participant],
    commit: &mut StoreCommit,
) -> Result<Option<String>, TournamentError> {
    if !round_complete(fixtures, round) {
        return Ok(None);
    }
    let advancement = advance_knockout(fixtures, round)?;
    commit.new_fixtures = advancement.fixtures;
    match advancement.champion {
        Some(id) => Ok(Some(find_participant(participants, id)?.name.clone())),
        None => Ok(None),
    }
}

/// The league champion once every fixture is completed, ranked on the
/// counters about to be written.
fn league_outcome(
    fixtures: &[Fixture],
    participants: &[Participant],
    counters: &[CounterUpdate],
) -> Option<String> {
    if !league_complete(fixtures) {
        return None;
    }
    let updated: Vec<Participant> = participants
        .iter()
        .cloned()
        .map(|mut p| {
            if let Some(c) = counters.iter().find(|c| c.participant == p.id) {
                p.wins = c.wins;
                p.losses = c.losses;
            }
            p
        })
        .collect();
    Some(league_champion(&updated))
}

impl<S: TournamentStore, R: RandomSource> TournamentController<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand the store back, e.g. to reopen it with a different random source.
    pub fn into_store(self) -> S {
        self.store
    }

    fn state(&self) -> Result<TournamentState, TournamentError> {
        Ok(self.store.get_state()?.unwrap_or_default())
    }

    /// Register a participant (setup only). Names are trimmed and unique ignoring case.
    pub fn register_participant(&mut self, name: &str) -> Result<Participant, TournamentError> {
        require_phase(&self.state()?, TournamentPhase::Setup)?;
        let existing = self.store.list_participants()?;
        let name = validate_registration(&existing, name)?;
        let participant = self.store.create_participant(&name)?;
        log::debug!("Registered participant {} ({})", participant.name, participant.id);
        Ok(participant)
    }

    /// Register every name in a CSV roster (setup only). If any name is rejected,
    /// nobody from the file is registered.
    pub fn import_roster<Rd: Read>(&mut self, reader: Rd) -> Result<Vec<Participant>, TournamentError> {
        require_phase(&self.state()?, TournamentPhase::Setup)?;
        let names = parse_roster_csv(reader)?;

        let mut roster = self.store.list_participants()?;
        let mut accepted = Vec::with_capacity(names.len());
        for name in &names {
            let name = validate_registration(&roster, name)?;
            roster.push(Participant::new(name.clone()));
            accepted.push(name);
        }

        let created = self.store.create_participants(&accepted)?;
        log::info!("Imported {} participants from roster", created.len());
        Ok(created)
    }

    /// Remove a participant (setup only).
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), TournamentError> {
        require_phase(&self.state()?, TournamentPhase::Setup)?;
        let participants = self.store.list_participants()?;
        find_participant(&participants, id)?;
        self.store.remove_participant(id)?;
        Ok(())
    }

    /// Choose knockout or league (setup only).
    pub fn set_format(&mut self, format: TournamentFormat) -> Result<TournamentState, TournamentError> {
        let mut state = self.state()?;
        require_phase(&state, TournamentPhase::Setup)?;
        state.format = format;
        self.store.set_state(state.clone())?;
        Ok(state)
    }

    /// Generate the initial fixtures and move to active.
    ///
    /// Knockout entrants are shuffled; a league is scheduled in registration order.
    pub fn start_tournament(&mut self) -> Result<TournamentState, TournamentError> {
        let mut state = self.state()?;
        require_phase(&state, TournamentPhase::Setup)?;

        let participants = self.store.list_participants()?;
        validate_start(&participants)?;
        let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();

        let fixtures = match state.format {
            TournamentFormat::Knockout => generate_knockout_bracket(&ids, &mut self.rng)?,
            TournamentFormat::League => schedule_round_robin(&ids)?,
        };
        let count = fixtures.len();

        state.phase = TournamentPhase::Active;
        state.champion = None;
        self.store.commit(StoreCommit {
            new_fixtures: fixtures,
            state: Some(state.clone()),
            ..StoreCommit::default()
        })?;
        log::info!(
            "Tournament started: {:?}, {} participants, {} fixtures",
            state.format,
            participants.len(),
            count
        );
        Ok(state)
    }

    /// Record a fixture result and move the tournament on.
    ///
    /// Credits the winner with a win and the loser with a loss. In a knockout, a
    /// now-complete round is advanced; in a league, the last result decides the champion.
    /// All of it reaches the store as one commit.
    pub fn report_result(
        &mut self,
        fixture_id: FixtureId,
        winner: ParticipantId,
        score: &str,
    ) -> Result<TournamentState, TournamentError> {
        let mut state = self.state()?;
        require_phase(&state, TournamentPhase::Active)?;

        let score = score.trim();
        if score.is_empty() {
            return Err(ValidationError::EmptyScore.into());
        }

        let mut fixtures = self.store.list_fixtures()?;
        let fixture = fixtures
            .iter_mut()
            .find(|f| f.id == fixture_id)
            .ok_or(ConsistencyError::FixtureNotFound(fixture_id))?;
        if fixture.is_completed() {
            return Err(ConsistencyError::FixtureNotScheduled(fixture_id).into());
        }
        let (a, b) = fixture
            .contestants()
            .ok_or(ConsistencyError::UnassignedSlot(fixture_id))?;
        let loser = match winner {
            w if w == a => b,
            w if w == b => a,
            _ => {
                return Err(ValidationError::InvalidWinner {
                    fixture: fixture_id,
                    winner,
                }
                .into())
            }
        };
        let round = fixture.round;

        let participants = self.store.list_participants()?;
        let winner_record = find_participant(&participants, winner)?;
        let loser_record = find_participant(&participants, loser)?;
        fixture.complete(winner, score);

        let mut commit = StoreCommit {
            result: Some(FixtureResult {
                fixture: fixture_id,
                winner,
                score: score.to_string(),
            }),
            counters: vec![
                CounterUpdate {
                    participant: winner,
                    wins: winner_record.wins + 1,
                    losses: winner_record.losses,
                },
                CounterUpdate {
                    participant: loser,
                    wins: loser_record.wins,
                    losses: loser_record.losses + 1,
                },
            ],
            ..StoreCommit::default()
        };
        log::debug!(
            "Result: {} beat {} in round {round} ({score})",
            winner_record.name,
            loser_record.name
        );

        let champion = match state.format {
            TournamentFormat::Knockout => knockout_outcome(&fixtures, round, &participants, &mut commit)?,
            TournamentFormat::League => league_outcome(&fixtures, &participants, &commit.counters),
        };
        if let Some(champion) = &champion {
            state.phase = TournamentPhase::Completed;
            state.champion = Some(champion.clone());
            commit.state = Some(state.clone());
        }

        self.store.commit(commit)?;
        if let Some(champion) = champion {
            log::info!("Tournament completed; champion: {champion}");
        }
        Ok(state)
    }

    /// Back to setup: drop all fixtures and zero every record, keeping the roster and format.
    /// Not allowed while a tournament is active.
    pub fn reset_tournament(&mut self) -> Result<TournamentState, TournamentError> {
        let state = self.state()?;
        if state.phase == TournamentPhase::Active {
            return Err(ValidationError::WrongPhase {
                expected: TournamentPhase::Completed,
                actual: state.phase,
            }
            .into());
        }

        let counters = self
            .store
            .list_participants()?
            .into_iter()
            .map(|p| CounterUpdate {
                participant: p.id,
                wins: 0,
                losses: 0,
            })
            .collect();
        let state = TournamentState::new(state.format);
        self.store.commit(StoreCommit {
            clear_fixtures: true,
            counters,
            state: Some(state.clone()),
            ..StoreCommit::default()
        })?;
        log::info!("Tournament reset to setup");
        Ok(state)
    }

    /// Fixtures sorted by round, then match number.
    pub fn current_fixtures(&self) -> Result<Vec<Fixture>, TournamentError> {
        let mut fixtures = self.store.list_fixtures()?;
        fixtures.sort_by_key(|f| (f.round, f.match_number));
        Ok(fixtures)
    }

    pub fn standings(&self) -> Result<Vec<Standing>, TournamentError> {
        Ok(rank_participants(&self.store.list_participants()?))
    }

    pub fn tournament_status(&self) -> Result<TournamentState, TournamentError> {
        self.state()
    }

    pub fn snapshot(&self) -> Result<TournamentSnapshot, TournamentError> {
        let status = self.state()?;
        let participants = self.store.list_participants()?;
        let bracket = (status.format == TournamentFormat::Knockout && !participants.is_empty())
            .then(|| BracketShape::for_entrants(participants.len()));
        Ok(TournamentSnapshot {
            status,
            standings: rank_participants(&participants),
            fixtures: self.current_fixtures()?,
            bracket,
        })
    }
}
