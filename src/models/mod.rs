//! Data structures for the tournament: participants, fixtures, tournament state.

mod fixture;
mod participant;
mod tournament;

pub use fixture::{Fixture, FixtureId, FixtureStatus, Slot, BYE_SCORE};
pub use participant::{Participant, ParticipantId};
pub use tournament::{TournamentFormat, TournamentId, TournamentPhase, TournamentState};
