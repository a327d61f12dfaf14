//! Integration tests for the in-memory store's batched writes.

use bracket_league_web::{
    CounterUpdate, Fixture, FixtureResult, FixtureStore, MemoryStore, ParticipantStore, StoreCommit,
    TournamentError, TournamentFormat, TournamentPhase, TournamentState, TournamentStateStore,
    TournamentStore, ValidationError,
};
use uuid::Uuid;

/// Two registered participants and one scheduled fixture between them.
fn store_with_fixture() -> (MemoryStore, Fixture) {
    let mut store = MemoryStore::new();
    let ann = store.create_participant("Ann").unwrap();
    let bob = store.create_participant("Bob").unwrap();
    let fixture = Fixture::scheduled(1, 1, ann.id, bob.id);
    store.create_fixtures(vec![fixture.clone()]).unwrap();
    (store, fixture)
}

fn result_for(fixture: &Fixture) -> FixtureResult {
    let (winner, _) = fixture.contestants().unwrap();
    FixtureResult {
        fixture: fixture.id,
        winner,
        score: "2-0".to_string(),
    }
}

#[test]
fn commit_applies_every_write() {
    let (mut store, fixture) = store_with_fixture();
    let (ann, bob) = fixture.contestants().unwrap();
    let mut done = TournamentState::new(TournamentFormat::Knockout);
    done.phase = TournamentPhase::Completed;
    done.champion = Some("Ann".to_string());

    store
        .commit(StoreCommit {
            result: Some(result_for(&fixture)),
            counters: vec![
                CounterUpdate { participant: ann, wins: 1, losses: 0 },
                CounterUpdate { participant: bob, wins: 0, losses: 1 },
            ],
            state: Some(done.clone()),
            ..StoreCommit::default()
        })
        .unwrap();

    let stored = store.list_fixtures().unwrap();
    assert!(stored[0].is_completed());
    assert_eq!(stored[0].winner, Some(ann));
    let records: Vec<(u32, u32)> = store
        .list_participants()
        .unwrap()
        .iter()
        .map(|p| (p.wins, p.losses))
        .collect();
    assert_eq!(records, [(1, 0), (0, 1)]);
    assert_eq!(store.get_state().unwrap(), Some(done));
}

#[test]
fn failing_counter_update_rolls_back_the_result() {
    let (mut store, fixture) = store_with_fixture();
    let (ann, _) = fixture.contestants().unwrap();

    let err = store
        .commit(StoreCommit {
            result: Some(result_for(&fixture)),
            counters: vec![
                CounterUpdate { participant: ann, wins: 1, losses: 0 },
                CounterUpdate { participant: Uuid::new_v4(), wins: 0, losses: 1 },
            ],
            ..StoreCommit::default()
        })
        .unwrap_err();

    assert!(err.message().starts_with("no participant with id"));
    assert_eq!(store.list_fixtures().unwrap(), [fixture]);
    assert!(store
        .list_participants()
        .unwrap()
        .iter()
        .all(|p| p.wins == 0 && p.losses == 0));
    assert_eq!(store.get_state().unwrap(), None);
}

#[test]
fn second_result_for_a_fixture_is_refused_without_side_effects() {
    let (mut store, fixture) = store_with_fixture();
    store
        .commit(StoreCommit {
            result: Some(result_for(&fixture)),
            ..StoreCommit::default()
        })
        .unwrap();
    let before = store.list_fixtures().unwrap();

    let err = store
        .commit(StoreCommit {
            result: Some(result_for(&fixture)),
            new_fixtures: vec![Fixture::bye(2, 1, Uuid::new_v4())],
            ..StoreCommit::default()
        })
        .unwrap_err();

    assert_eq!(err.message(), format!("fixture {} already has a result", fixture.id));
    assert_eq!(store.list_fixtures().unwrap(), before);
}

#[test]
fn batch_registration_is_all_or_nothing() {
    let mut store = MemoryStore::new();
    store.create_participant("Ann").unwrap();

    let names = vec!["Bob".to_string(), "ANN".to_string()];
    let err = store.create_participants(&names).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Validation(ValidationError::DuplicateName(ref n)) if n == "ANN"
    ));
    assert_eq!(store.list_participants().unwrap().len(), 1);

    let names = vec!["Bob".to_string(), "Cara".to_string()];
    let created = store.create_participants(&names).unwrap();
    assert_eq!(created.len(), 2);
    let all: Vec<String> = store.list_participants().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(all, ["Ann", "Bob", "Cara"]);
}
