//! Integration tests for knockout advancement.

use bracket_league_web::{
    advance_knockout, generate_knockout_bracket, round_complete, BracketShape, ConsistencyError,
    Fixture, ParticipantId, RngSource, Slot, BYE_SCORE,
};
use uuid::Uuid;

fn ids(n: usize) -> Vec<ParticipantId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn decided(round: u32, number: u32, a: ParticipantId, b: ParticipantId, winner: ParticipantId) -> Fixture {
    let mut f = Fixture::scheduled(round, number, a, b);
    f.complete(winner, "3-1");
    f
}

/// A decided round of `winners.len()` fixtures, each won by the matching winner.
fn decided_round(round: u32, winners: &[ParticipantId]) -> Vec<Fixture> {
    winners
        .iter()
        .zip(1u32..)
        .map(|(&w, number)| decided(round, number, w, Uuid::new_v4(), w))
        .collect()
}

#[test]
fn winners_pair_in_match_number_order() {
    let p = ids(4);
    let mut round = decided_round(1, &p);
    round.reverse();

    let adv = advance_knockout(&round, 1).unwrap();
    assert!(adv.champion.is_none());
    assert_eq!(adv.fixtures.len(), 2);
    assert_eq!(adv.fixtures[0].round, 2);
    assert_eq!(adv.fixtures[0].match_number, 1);
    assert_eq!(adv.fixtures[0].contestants(), Some((p[0], p[1])));
    assert_eq!(adv.fixtures[1].match_number, 2);
    assert_eq!(adv.fixtures[1].contestants(), Some((p[2], p[3])));
}

#[test]
fn odd_winner_out_gets_a_bye() {
    let p = ids(3);
    let adv = advance_knockout(&decided_round(2, &p), 2).unwrap();

    assert!(adv.champion.is_none());
    assert_eq!(adv.fixtures.len(), 2);
    assert_eq!(adv.fixtures[0].contestants(), Some((p[0], p[1])));
    let bye = &adv.fixtures[1];
    assert_eq!(bye.round, 3);
    assert_eq!(bye.slot_1, Slot::Participant(p[2]));
    assert_eq!(bye.slot_2, Slot::Bye);
    assert_eq!(bye.winner, Some(p[2]));
    assert_eq!(bye.score, BYE_SCORE);
}

#[test]
fn single_winner_is_champion() {
    let p = ids(2);
    let final_round = vec![decided(3, 1, p[0], p[1], p[1])];
    let adv = advance_knockout(&final_round, 3).unwrap();
    assert_eq!(adv.champion, Some(p[1]));
    assert!(adv.fixtures.is_empty());
}

#[test]
fn incomplete_round_is_rejected() {
    let p = ids(4);
    let fixtures = vec![
        decided(1, 1, p[0], p[1], p[0]),
        Fixture::scheduled(1, 2, p[2], p[3]),
    ];
    assert!(!round_complete(&fixtures, 1));
    assert_eq!(advance_knockout(&fixtures, 1), Err(ConsistencyError::RoundIncomplete(1)));
}

#[test]
fn missing_round_is_rejected() {
    let fixtures = decided_round(1, &ids(2));
    assert!(!round_complete(&fixtures, 2));
    assert_eq!(advance_knockout(&fixtures, 2), Err(ConsistencyError::EmptyRound(2)));
}

#[test]
fn only_the_requested_round_is_read() {
    let p = ids(4);
    let mut fixtures = decided_round(1, &p);
    fixtures.push(Fixture::scheduled(2, 1, Uuid::new_v4(), Uuid::new_v4()));
    fixtures.push(Fixture::scheduled(1, 99, Uuid::new_v4(), Uuid::new_v4()));
    assert_eq!(advance_knockout(&fixtures, 1), Err(ConsistencyError::RoundIncomplete(1)));

    fixtures.pop();
    let adv = advance_knockout(&fixtures, 1).unwrap();
    assert_eq!(adv.fixtures.len(), 2);
}

#[test]
fn next_round_has_half_the_winners_rounded_up() {
    for w in 2..=33 {
        let adv = advance_knockout(&decided_round(1, &ids(w)), 1).unwrap();
        assert!(adv.champion.is_none());
        assert_eq!(adv.fixtures.len(), (w + 1) / 2, "fixtures for {w} winners");
        assert_eq!(adv.fixtures.iter().filter(|f| f.is_bye()).count(), w % 2);
        assert!(adv.fixtures.iter().any(|f| !f.is_completed()));
    }
}

#[test]
fn full_bracket_reaches_a_champion_within_total_rounds() {
    for n in 2..=40 {
        let entrants = ids(n);
        let shape = BracketShape::for_entrants(n);
        let mut fixtures = generate_knockout_bracket(&entrants, &mut RngSource::seeded(7)).unwrap();
        let mut round = 1;

        let champion = loop {
            for f in fixtures.iter_mut().filter(|f| f.round == round && !f.is_completed()) {
                let (a, _) = f.contestants().unwrap();
                f.complete(a, "1-0");
            }
            let adv = advance_knockout(&fixtures, round).unwrap();
            round = adv.fixtures.iter().map(|f| f.round).max().unwrap_or(round);
            fixtures.extend(adv.fixtures);
            if let Some(champion) = adv.champion {
                break champion;
            }
        };

        assert!(round <= shape.total_rounds, "{n} entrants took {round} rounds");
        assert!(entrants.contains(&champion));
        let final_fixture = fixtures.iter().filter(|f| f.round == round).collect::<Vec<_>>();
        assert_eq!(final_fixture.len(), 1);
        assert_eq!(final_fixture[0].winner, Some(champion));
    }
}
