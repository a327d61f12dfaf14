//! League schedule via the circle method.

use crate::error::ValidationError;
use crate::logic::roster::MIN_PARTICIPANTS;
use crate::models::{Fixture, ParticipantId};

/// Number of rounds a league of `participants` needs.
pub fn league_rounds(participants: usize) -> usize {
    let table = participants + participants % 2;
    table.saturating_sub(1)
}

/// Build every round of a league in which each participant meets every other once.
///
/// An odd roster gets a placeholder entry (`None`); whoever is paired with it sits the
/// round out and no fixture is produced. Position 0 stays fixed and the last entry moves
/// to position 1 after each round. Within a round, fixtures are numbered in the order
/// the real pairs come out.
pub fn schedule_round_robin(participants: &[ParticipantId]) -> Result<Vec<Fixture>, ValidationError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(ValidationError::NotEnoughParticipants {
            required: MIN_PARTICIPANTS,
            registered: participants.len(),
        });
    }

    let mut table: Vec<Option<ParticipantId>> = participants.iter().copied().map(Some).collect();
    if table.len() % 2 == 1 {
        table.push(None);
    }
    let size = table.len();
    let rounds = league_rounds(participants.len());

    let mut fixtures = Vec::with_capacity(participants.len() * (participants.len() - 1) / 2);
    for round in 1..=rounds as u32 {
        let real_pairs = (0..size / 2).filter_map(|i| match (table[i], table[size - 1 - i]) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        });
        fixtures.extend(
            real_pairs
                .zip(1u32..)
                .map(|((a, b), number)| Fixture::scheduled(round, number, a, b)),
        );

        if let Some(last) = table.pop() {
            table.insert(1, last);
        }
    }

    log::debug!(
        "League schedule: {} participants, {} rounds, {} fixtures",
        participants.len(),
        rounds,
        fixtures.len()
    );
    Ok(fixtures)
}
