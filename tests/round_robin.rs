//! Integration tests for the league schedule.

use bracket_league_web::{league_rounds, schedule_round_robin, Fixture, ParticipantId, ValidationError};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

fn roster(n: usize) -> Vec<ParticipantId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn pair_key(f: &Fixture) -> (ParticipantId, ParticipantId) {
    let (a, b) = f.contestants().expect("league fixtures have two participants");
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn by_round(fixtures: &[Fixture]) -> HashMap<u32, Vec<&Fixture>> {
    let mut rounds: HashMap<u32, Vec<&Fixture>> = HashMap::new();
    for f in fixtures {
        rounds.entry(f.round).or_default().push(f);
    }
    rounds
}

#[test]
fn rejects_a_single_participant() {
    assert!(matches!(
        schedule_round_robin(&roster(1)),
        Err(ValidationError::NotEnoughParticipants { registered: 1, .. })
    ));
}

#[test]
fn four_participants_play_three_rounds_of_two() {
    let ids = roster(4);
    let fixtures = schedule_round_robin(&ids).unwrap();
    assert_eq!(fixtures.len(), 6);

    let rounds: Vec<(u32, u32, ParticipantId, ParticipantId)> = fixtures
        .iter()
        .map(|f| {
            let (a, b) = f.contestants().unwrap();
            (f.round, f.match_number, a, b)
        })
        .collect();
    assert_eq!(
        rounds,
        vec![
            (1, 1, ids[0], ids[3]),
            (1, 2, ids[1], ids[2]),
            (2, 1, ids[0], ids[2]),
            (2, 2, ids[3], ids[1]),
            (3, 1, ids[0], ids[1]),
            (3, 2, ids[2], ids[3]),
        ]
    );
}

#[test]
fn five_participants_each_sit_out_once() {
    let ids = roster(5);
    let fixtures = schedule_round_robin(&ids).unwrap();
    assert_eq!(league_rounds(5), 5);
    assert_eq!(fixtures.len(), 10);

    let rounds = by_round(&fixtures);
    assert_eq!(rounds.len(), 5);
    let mut sat_out: HashMap<ParticipantId, usize> = HashMap::new();
    for fixtures in rounds.values() {
        assert_eq!(fixtures.len(), 2);
        for id in &ids {
            if !fixtures.iter().any(|f| f.involves(*id)) {
                *sat_out.entry(*id).or_default() += 1;
            }
        }
    }
    assert_eq!(sat_out.len(), 5);
    assert!(sat_out.values().all(|&n| n == 1));
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=12 {
        let ids = roster(n);
        let fixtures = schedule_round_robin(&ids).unwrap();
        assert_eq!(fixtures.len(), n * (n - 1) / 2, "fixture count for {n}");

        let pairs: HashSet<_> = fixtures.iter().map(pair_key).collect();
        assert_eq!(pairs.len(), fixtures.len(), "duplicate pairing for {n}");
        assert!(fixtures.iter().all(|f| !f.is_completed() && !f.is_bye()));
    }
}

#[test]
fn rounds_are_contiguous_and_numbered_per_round() {
    for n in 2..=11 {
        let fixtures = schedule_round_robin(&roster(n)).unwrap();
        let rounds = by_round(&fixtures);
        assert_eq!(rounds.len(), league_rounds(n), "round count for {n}");

        for round in 1..=league_rounds(n) as u32 {
            let in_round = &rounds[&round];
            assert_eq!(in_round.len(), n / 2, "round {round} size for {n}");

            let numbers: Vec<u32> = in_round.iter().map(|f| f.match_number).collect();
            let expected: Vec<u32> = (1..=in_round.len() as u32).collect();
            assert_eq!(numbers, expected);

            let playing: HashSet<ParticipantId> = in_round
                .iter()
                .flat_map(|f| {
                    let (a, b) = f.contestants().unwrap();
                    [a, b]
                })
                .collect();
            assert_eq!(playing.len(), in_round.len() * 2, "nobody plays twice in a round");
        }
    }
}
