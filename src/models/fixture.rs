//! Fixture (a single contest), its slots and status.

use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Score recorded on fixtures decided by a bye.
pub const BYE_SCORE: &str = "BYE";

/// One side of a fixture.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "participant_id")]
pub enum Slot {
    Participant(ParticipantId),
    /// Waiting for a winner from an earlier round.
    #[default]
    Unassigned,
    Bye,
}

impl Slot {
    pub fn participant(self) -> Option<ParticipantId> {
        match self {
            Slot::Participant(id) => Some(id),
            Slot::Unassigned | Slot::Bye => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    Completed,
}

/// A scheduled or decided contest.
///
/// `status == Completed` exactly when `winner` is set; the constructors and
/// [`Fixture::complete`] are the only ways to change either.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    /// 1-based, contiguous within a bracket or league.
    pub round: u32,
    /// 1-based, unique within the round. Orders winners for the next round.
    pub match_number: u32,
    pub slot_1: Slot,
    pub slot_2: Slot,
    pub winner: Option<ParticipantId>,
    /// Free-form; empty until decided.
    pub score: String,
    pub status: FixtureStatus,
    /// When the result was reported. Byes carry none.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Fixture {
    /// A fixture between two participants, waiting for a result.
    pub fn scheduled(round: u32, match_number: u32, a: ParticipantId, b: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            slot_1: Slot::Participant(a),
            slot_2: Slot::Participant(b),
            winner: None,
            score: String::new(),
            status: FixtureStatus::Scheduled,
            completed_at: None,
        }
    }

    /// A fixture auto-completed in favour of `participant`, who has no opponent.
    pub fn bye(round: u32, match_number: u32, participant: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            slot_1: Slot::Participant(participant),
            slot_2: Slot::Bye,
            winner: Some(participant),
            score: BYE_SCORE.to_string(),
            status: FixtureStatus::Completed,
            completed_at: None,
        }
    }

    /// Record the result. Callers check the fixture is still scheduled.
    pub fn complete(&mut self, winner: ParticipantId, score: impl Into<String>) {
        self.winner = Some(winner);
        self.score = score.into();
        self.status = FixtureStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn is_completed(&self) -> bool {
        self.status == FixtureStatus::Completed
    }

    pub fn is_bye(&self) -> bool {
        self.slot_1 == Slot::Bye || self.slot_2 == Slot::Bye
    }

    /// Both participants, if both slots hold one.
    pub fn contestants(&self) -> Option<(ParticipantId, ParticipantId)> {
        Some((self.slot_1.participant()?, self.slot_2.participant()?))
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.slot_1.participant() == Some(participant) || self.slot_2.participant() == Some(participant)
    }
}
