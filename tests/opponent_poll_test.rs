//! Tests for waiting on the opponent's result.

use std::sync::Arc;
use std::time::Duration;

use word_hunt::{GameResult, MemoryArea, OpponentPoll, Perspective, ResultStore, Slot};

fn finished(score: u32, timestamp: i64) -> GameResult {
    GameResult::finished(score, vec![], timestamp)
}

fn store() -> ResultStore {
    ResultStore::new(Arc::new(MemoryArea::new()))
}

#[tokio::test]
async fn test_poll_resolves_on_interval() {
    let store = store();
    let mine = finished(500, 1_000);
    store.save_game_result("g1", mine.clone()).expect("save mine");

    let poll = OpponentPoll::spawn(
        store.clone(),
        "g1".to_string(),
        Perspective::Submission(mine),
        Duration::from_millis(20),
    );
    assert_eq!(poll.game_id(), "g1");

    let theirs = finished(700, 2_000);
    tokio::time::sleep(Duration::from_millis(50)).await;
    store.save_game_result("g1", theirs.clone()).expect("save theirs");

    let found = tokio::time::timeout(Duration::from_secs(5), poll.wait())
        .await
        .expect("poll timed out");
    assert_eq!(found, Some(theirs));
}

#[tokio::test]
async fn test_poll_wakes_on_change_notification() {
    let store = store();
    let mine = finished(500, 1_000);
    store.save_game_result("g1", mine.clone()).expect("save mine");

    // Interval far beyond the test timeout: only the notification can resolve it.
    let poll = OpponentPoll::spawn(
        store.clone(),
        "g1".to_string(),
        Perspective::Submission(mine),
        Duration::from_secs(3600),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;
    let theirs = finished(700, 2_000);
    store.save_game_result("g1", theirs.clone()).expect("save theirs");

    let found = tokio::time::timeout(Duration::from_secs(5), poll.wait())
        .await
        .expect("poll timed out");
    assert_eq!(found, Some(theirs));
}

#[tokio::test]
async fn test_second_party_sees_first_result() {
    let store = store();
    let first = finished(500, 1_000);
    let second = finished(700, 2_000);
    store.save_game_result("g1", first.clone()).expect("save first");
    store.save_game_result("g1", second.clone()).expect("save second");

    let poll = OpponentPoll::spawn(
        store.clone(),
        "g1".to_string(),
        Perspective::Submission(second),
        Duration::from_millis(20),
    );
    let found = tokio::time::timeout(Duration::from_secs(5), poll.wait())
        .await
        .expect("poll timed out");
    assert_eq!(found, Some(first));
}

#[tokio::test]
async fn test_cancelled_poll_yields_nothing() {
    let store = store();
    let mine = finished(500, 1_000);
    store.save_game_result("g1", mine.clone()).expect("save mine");

    let mut poll = OpponentPoll::spawn(
        store.clone(),
        "g1".to_string(),
        Perspective::Submission(mine),
        Duration::from_millis(20),
    );
    assert!(!poll.is_finished());
    poll.cancel();
    assert!(poll.is_finished());
    assert_eq!(poll.wait().await, None);
}

#[tokio::test]
async fn test_unstamped_second_party_polls_by_slot() {
    let store = store();
    let first = GameResult::new(500, vec![], true, 0);
    let second = GameResult::new(700, vec![], true, 0);
    store.save_game_result_at("g1", first, 1_000).expect("save first");
    let slot = store
        .save_game_result_at("g1", second, 2_000)
        .expect("save second");
    assert_eq!(slot, Slot::Opponent);

    let poll = OpponentPoll::spawn(
        store.clone(),
        "g1".to_string(),
        Perspective::Slot(slot),
        Duration::from_millis(20),
    );
    let found = tokio::time::timeout(Duration::from_secs(5), poll.wait())
        .await
        .expect("poll timed out")
        .expect("first result");
    assert_eq!(*found.score(), 500);
    assert_eq!(*found.timestamp(), 1_000);
}
