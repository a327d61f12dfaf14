//! Error taxonomy: caller mistakes, orchestration bugs, and store failures.

use crate::models::{FixtureId, ParticipantId, TournamentPhase};
use thiserror::Error;

/// Top-level error returned by the controller.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Bad input from the caller; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The fixtures or roster disagree with the requested step. Indicates an orchestration bug.
    #[error("inconsistent tournament state: {0}")]
    Consistency(#[from] ConsistencyError),

    /// Failure from the backing store, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Only validation errors are safe to show the user and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TournamentError::Validation(_))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    #[error("Participant name must not be empty")]
    EmptyName,

    #[error("A participant named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Need at least {required} participants to start (registered {registered})")]
    NotEnoughParticipants { required: usize, registered: usize },

    #[error("Score must not be empty")]
    EmptyScore,

    #[error("Winner {winner} is not playing in fixture {fixture}")]
    InvalidWinner {
        fixture: FixtureId,
        winner: ParticipantId,
    },

    #[error("Action requires the tournament to be in {expected} (currently {actual})")]
    WrongPhase {
        expected: TournamentPhase,
        actual: TournamentPhase,
    },

    #[error("Roster row {row}: {reason}")]
    MalformedRoster { row: usize, reason: String },
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConsistencyError {
    #[error("fixture {0} not found")]
    FixtureNotFound(FixtureId),

    #[error("participant {0} not found")]
    ParticipantNotFound(ParticipantId),

    #[error("fixture {0} is not scheduled")]
    FixtureNotScheduled(FixtureId),

    #[error("fixture {0} has an unassigned slot")]
    UnassignedSlot(FixtureId),

    #[error("round {0} still has scheduled fixtures")]
    RoundIncomplete(u32),

    #[error("round {0} has no fixtures")]
    EmptyRound(u32),
}

/// Opaque failure from a store implementation.
#[derive(Debug, Error)]
#[error("store failure: {message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying cause so callers can inspect it.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
