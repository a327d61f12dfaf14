//! Knockout and league tournament scheduler: models, scheduling logic and store seams.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod random;
pub mod store;

pub use config::ServerConfig;
pub use error::{ConsistencyError, StoreError, TournamentError, ValidationError};
pub use logic::{
    advance_knockout, generate_knockout_bracket, league_champion, league_complete, league_rounds,
    rank_participants, round_complete, schedule_round_robin, write_standings_csv, Advancement,
    BracketShape, Standing, TournamentController, TournamentSnapshot,
};
pub use models::{
    Fixture, FixtureId, FixtureStatus, Participant, ParticipantId, Slot, TournamentFormat,
    TournamentId, TournamentPhase, TournamentState, BYE_SCORE,
};
pub use random::{RandomSource, RngSource};
pub use store::{
    CounterUpdate, FixtureResult, FixtureStore, MemoryStore, ParticipantStore, StoreCommit,
    TournamentStateStore, TournamentStore,
};
