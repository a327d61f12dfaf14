//! Store traits the controller reads and writes through.
//!
//! Any backend (file, database, remote service) can implement these. Mutating calls on
//! one store must be serialized by the caller; the controller takes `&mut self` for that.
//! Every controller step that writes more than one record goes through
//! [`TournamentStore::commit`], which must apply all of it or none of it.

mod memory;

pub use memory::MemoryStore;

use crate::error::{StoreError, TournamentError};
use crate::models::{Fixture, FixtureId, Participant, ParticipantId, TournamentState};

pub trait ParticipantStore {
    /// Participants in registration order.
    fn list_participants(&self) -> Result<Vec<Participant>, StoreError>;

    /// Register a new participant. May reject the name with a validation error.
    fn create_participant(&mut self, name: &str) -> Result<Participant, TournamentError>;

    /// Register several participants in order. Either all are created or none are.
    fn create_participants(&mut self, names: &[String]) -> Result<Vec<Participant>, TournamentError>;

    fn remove_participant(&mut self, id: ParticipantId) -> Result<(), StoreError>;

    /// Overwrite a participant's win and loss counters.
    fn update_counters(&mut self, id: ParticipantId, wins: u32, losses: u32) -> Result<(), StoreError>;
}

pub trait FixtureStore {
    fn list_fixtures(&self) -> Result<Vec<Fixture>, StoreError>;

    fn create_fixtures(&mut self, fixtures: Vec<Fixture>) -> Result<(), StoreError>;

    /// Mark a scheduled fixture completed with the given winner and score.
    fn update_result(&mut self, id: FixtureId, winner: ParticipantId, score: &str) -> Result<(), StoreError>;

    fn delete_all_fixtures(&mut self) -> Result<(), StoreError>;
}

pub trait TournamentStateStore {
    /// `None` when nothing has been saved yet.
    fn get_state(&self) -> Result<Option<TournamentState>, StoreError>;

    fn set_state(&mut self, state: TournamentState) -> Result<(), StoreError>;
}

/// A fixture result to record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixtureResult {
    pub fixture: FixtureId,
    pub winner: ParticipantId,
    pub score: String,
}

/// New absolute counters for one participant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CounterUpdate {
    pub participant: ParticipantId,
    pub wins: u32,
    pub losses: u32,
}

/// Writes that belong together. Applied in field order: clear fixtures, record the
/// result, update counters, add fixtures, save the state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StoreCommit {
    pub clear_fixtures: bool,
    pub result: Option<FixtureResult>,
    pub counters: Vec<CounterUpdate>,
    pub new_fixtures: Vec<Fixture>,
    pub state: Option<TournamentState>,
}

/// Everything the controller needs from one backend.
pub trait TournamentStore: ParticipantStore + FixtureStore + TournamentStateStore {
    /// Apply every write in `commit`, or none of them if any fails.
    fn commit(&mut self, commit: StoreCommit) -> Result<(), StoreError>;
}
