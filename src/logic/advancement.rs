//! Knockout advancement: turn a decided round into the next one, or a champion.

use crate::error::ConsistencyError;
use crate::models::{Fixture, ParticipantId};

/// What advancing a round produced.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Advancement {
    /// New fixtures for every round created, in round then match order.
    /// Bye fixtures among them are already completed.
    pub fixtures: Vec<Fixture>,
    /// Set when a single winner remains.
    pub champion: Option<ParticipantId>,
}

/// Every fixture of `round` is completed. An empty round counts as not complete.
pub fn round_complete(fixtures: &[Fixture], round: u32) -> bool {
    let mut in_round = fixtures.iter().filter(|f| f.round == round).peekable();
    in_round.peek().is_some() && in_round.all(Fixture::is_completed)
}

/// Winners of `round`, ordered by match number.
fn round_winners(fixtures: &[Fixture], round: u32) -> Result<Vec<ParticipantId>, ConsistencyError> {
    let mut in_round: Vec<&Fixture> = fixtures.iter().filter(|f| f.round == round).collect();
    if in_round.is_empty() {
        return Err(ConsistencyError::EmptyRound(round));
    }
    in_round.sort_by_key(|f| f.match_number);
    in_round
        .into_iter()
        .map(|f| f.winner.ok_or(ConsistencyError::RoundIncomplete(round)))
        .collect()
}

/// Pair winners 1v2, 3v4, ... into `round`; an odd one out gets a bye.
fn pair_winners(winners: &[ParticipantId], round: u32) -> Vec<Fixture> {
    winners
        .chunks(2)
        .zip(1u32..)
        .filter_map(|(pair, number)| match *pair {
            [a, b, ..] => Some(Fixture::scheduled(round, number, a, b)),
            [a] => Some(Fixture::bye(round, number, a)),
            [] => None,
        })
        .collect()
}

/// Advance a knockout bracket from a fully decided `round`.
///
/// One winner left means a champion. Otherwise the winners are paired into the
/// next round. If that round is decided by byes alone, it is advanced too, and so on
/// until a round has a real fixture waiting or a champion emerges.
pub fn advance_knockout(fixtures: &[Fixture], round: u32) -> Result<Advancement, ConsistencyError> {
    if !round_complete(fixtures, round) {
        if fixtures.iter().any(|f| f.round == round) {
            return Err(ConsistencyError::RoundIncomplete(round));
        }
        return Err(ConsistencyError::EmptyRound(round));
    }

    let mut created: Vec<Fixture> = Vec::new();
    let mut current = round;
    let mut winners = round_winners(fixtures, current)?;

    loop {
        if let [champion] = winners[..] {
            log::info!("Round {current} leaves a single winner; champion decided");
            return Ok(Advancement {
                fixtures: created,
                champion: Some(champion),
            });
        }

        let next_round = current + 1;
        let next = pair_winners(&winners, next_round);
        let pending = next.iter().filter(|f| !f.is_completed()).count();
        log::info!(
            "Created round {next_round}: {} fixtures, {pending} awaiting results",
            next.len()
        );

        if pending > 0 {
            created.extend(next);
            return Ok(Advancement {
                fixtures: created,
                champion: None,
            });
        }

        winners = round_winners(&next, next_round)?;
        created.extend(next);
        current = next_round;
    }
}
