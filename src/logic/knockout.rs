//! Single elimination: bracket sizing and first-round fixtures with byes.

use crate::error::ValidationError;
use crate::logic::roster::MIN_PARTICIPANTS;
use crate::models::{Fixture, ParticipantId};
use crate::random::RandomSource;
use serde::Serialize;

/// Size of a single-elimination bracket for a given roster.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct BracketShape {
    /// ceil(log2(entrants)).
    pub total_rounds: u32,
    /// 2^total_rounds.
    pub bracket_size: usize,
    /// bracket_size - entrants; always less than entrants.
    pub byes: usize,
}

impl BracketShape {
    pub fn for_entrants(entrants: usize) -> Self {
        let bracket_size = entrants.max(1).next_power_of_two();
        Self {
            total_rounds: bracket_size.trailing_zeros(),
            bracket_size,
            byes: bracket_size - entrants.max(1),
        }
    }

    pub fn first_round_fixtures(&self) -> usize {
        self.bracket_size / 2
    }
}

/// Build round 1 of a knockout bracket.
///
/// 1. Shuffle the entrants with `rng`.
/// 2. The first `byes` fixtures each take one entrant and are already decided (score "BYE").
/// 3. The remaining fixtures pair the next two entrants and wait for a result.
///
/// Fixtures are numbered 1..=bracket_size/2 in that order.
pub fn generate_knockout_bracket<R: RandomSource>(
    entrants: &[ParticipantId],
    rng: &mut R,
) -> Result<Vec<Fixture>, ValidationError> {
    if entrants.len() < MIN_PARTICIPANTS {
        return Err(ValidationError::NotEnoughParticipants {
            required: MIN_PARTICIPANTS,
            registered: entrants.len(),
        });
    }

    let mut order = entrants.to_vec();
    rng.shuffle(&mut order);

    let shape = BracketShape::for_entrants(order.len());
    let (bye_entrants, paired) = order.split_at(shape.byes);

    let byes = bye_entrants.iter().map(|&p| (p, None));
    let pairs = paired.chunks_exact(2).map(|pair| (pair[0], Some(pair[1])));

    let fixtures: Vec<Fixture> = byes
        .chain(pairs)
        .zip(1u32..)
        .map(|((a, b), number)| match b {
            Some(b) => Fixture::scheduled(1, number, a, b),
            None => Fixture::bye(1, number, a),
        })
        .collect();

    debug_assert_eq!(fixtures.len(), shape.first_round_fixtures());
    log::debug!(
        "Knockout bracket: {} entrants, size {}, {} byes, {} rounds",
        entrants.len(),
        shape.bracket_size,
        shape.byes,
        shape.total_rounds
    );
    Ok(fixtures)
}
