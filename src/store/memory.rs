//! In-memory store: one tournament's roster, fixtures and state.

use crate::error::{StoreError, TournamentError};
use crate::logic::validate_registration;
use crate::models::{Fixture, FixtureId, Participant, ParticipantId, TournamentState};
use crate::store::{FixtureStore, ParticipantStore, StoreCommit, TournamentStateStore, TournamentStore};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    participants: Vec<Participant>,
    fixtures: Vec<Fixture>,
    state: Option<TournamentState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn participant_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, StoreError> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::new(format!("no participant with id {id}")))
    }

    /// Apply `commit` step by step. Callers run this on a copy so a failure leaves
    /// the live store untouched.
    fn apply(&mut self, commit: StoreCommit) -> Result<(), StoreError> {
        if commit.clear_fixtures {
            self.delete_all_fixtures()?;
        }
        if let Some(result) = commit.result {
            self.update_result(result.fixture, result.winner, &result.score)?;
        }
        for c in commit.counters {
            self.update_counters(c.participant, c.wins, c.losses)?;
        }
        if !commit.new_fixtures.is_empty() {
            self.create_fixtures(commit.new_fixtures)?;
        }
        if let Some(state) = commit.state {
            self.set_state(state)?;
        }
        Ok(())
    }
}

impl ParticipantStore for MemoryStore {
    fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        Ok(self.participants.clone())
    }

    fn create_participant(&mut self, name: &str) -> Result<Participant, TournamentError> {
        let name = validate_registration(&self.participants, name)?;
        let participant = Participant::new(name);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    fn create_participants(&mut self, names: &[String]) -> Result<Vec<Participant>, TournamentError> {
        let mut staged = self.clone();
        let created = names
            .iter()
            .map(|name| staged.create_participant(name))
            .collect::<Result<Vec<_>, _>>()?;
        *self = staged;
        Ok(created)
    }

    fn remove_participant(&mut self, id: ParticipantId) -> Result<(), StoreError> {
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::new(format!("no participant with id {id}")))?;
        self.participants.remove(idx);
        Ok(())
    }

    fn update_counters(&mut self, id: ParticipantId, wins: u32, losses: u32) -> Result<(), StoreError> {
        let p = self.participant_mut(id)?;
        p.wins = wins;
        p.losses = losses;
        Ok(())
    }
}

impl FixtureStore for MemoryStore {
    fn list_fixtures(&self) -> Result<Vec<Fixture>, StoreError> {
        Ok(self.fixtures.clone())
    }

    fn create_fixtures(&mut self, fixtures: Vec<Fixture>) -> Result<(), StoreError> {
        self.fixtures.extend(fixtures);
        Ok(())
    }

    fn update_result(&mut self, id: FixtureId, winner: ParticipantId, score: &str) -> Result<(), StoreError> {
        let fixture = self
            .fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StoreError::new(format!("no fixture with id {id}")))?;
        if fixture.is_completed() {
            return Err(StoreError::new(format!("fixture {id} already has a result")));
        }
        fixture.complete(winner, score);
        Ok(())
    }

    fn delete_all_fixtures(&mut self) -> Result<(), StoreError> {
        self.fixtures.clear();
        Ok(())
    }
}

impl TournamentStateStore for MemoryStore {
    fn get_state(&self) -> Result<Option<TournamentState>, StoreError> {
        Ok(self.state.clone())
    }

    fn set_state(&mut self, state: TournamentState) -> Result<(), StoreError> {
        self.state = Some(state);
        Ok(())
    }
}

impl TournamentStore for MemoryStore {
    fn commit(&mut self, commit: StoreCommit) -> Result<(), StoreError> {
        let mut staged = self.clone();
        staged.apply(commit)?;
        *self = staged;
        Ok(())
    }
}
