//! Tests for a full game session on a known board.

use std::time::{Duration, Instant};
use word_hunt::{
    Difficulty, GAME_DURATION, GameEvent, GameSession, WordOutcome, WordSet, points_for_length,
    word_points,
};

fn words() -> WordSet {
    ["rode", "rude", "dude", "bud", "ode"].into_iter().collect()
}

fn started_session() -> GameSession {
    let mut session = GameSession::new("42", Difficulty::Easy, GAME_DURATION);
    session.start();
    session
}

#[test]
fn test_found_word_scores_once() {
    let words = words();
    let mut session = started_session();
    assert_eq!(session.board().letters_string(), "ycburdredudolbjy");

    let first = session.trace_path(&[6, 11, 10, 7], &words);
    assert_eq!(
        first,
        Some(WordOutcome::Accepted {
            word: "rode".to_string(),
            points: 400
        })
    );
    assert_eq!(session.score(), 400);
    assert_eq!(session.found_words().as_slice(), ["rode"]);

    let second = session.trace_path(&[6, 11, 10, 7], &words);
    assert_eq!(second, Some(WordOutcome::Duplicate("rode".to_string())));
    assert_eq!(second.map(|o| o.to_string()), Some("Word already found".to_string()));
    assert_eq!(session.score(), 400);
}

#[test]
fn test_rejected_candidates() {
    let words = words();
    let mut session = started_session();

    // "rd": too short, silent.
    let short = session.trace_path(&[6, 5], &words).expect("outcome");
    assert!(!short.is_notice());

    // "dud" is not in the list.
    let unknown = session.trace_path(&[8, 9, 10], &words).expect("outcome");
    assert_eq!(unknown, WordOutcome::NotRecognized("dud".to_string()));
    assert_eq!(unknown.to_string(), "Not in word list");
    assert_eq!(session.score(), 0);
    assert!(session.found_words().is_empty());
}

#[test]
fn test_several_words_accumulate() {
    let words = words();
    let mut session = started_session();
    for path in [&[4, 9, 10, 7][..], &[8, 9, 10, 7], &[13, 9, 8]] {
        let outcome = session.trace_path(path, &words).expect("outcome");
        assert!(outcome.is_accepted(), "{:?}", outcome);
    }
    assert_eq!(session.score(), 400 + 400 + 100);
    assert_eq!(session.found_words().as_slice(), ["rude", "dude", "bud"]);
}

#[test]
fn test_input_before_start_is_ignored() {
    let words = words();
    let mut session = GameSession::new("42", Difficulty::Easy, GAME_DURATION);
    assert_eq!(session.trace_path(&[6, 11, 10, 7], &words), None);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_countdown_ends_game_once() {
    let words = words();
    let mut session = GameSession::new("42", Difficulty::Easy, Duration::from_secs(120));
    let start = Instant::now();
    session.start_at(start);
    session.trace_path(&[6, 11, 10, 7], &words);

    assert!(session.tick_at(start + Duration::from_secs(60)).is_none());
    assert_eq!(session.time_left(), Duration::from_secs(60));

    let result = session
        .tick_at(start + Duration::from_secs(121))
        .expect("game over on expiry");
    assert_eq!(*result.score(), 400);
    assert!(*result.completed());
    assert!(*result.timestamp() > 0);
    assert!(session.is_over());
    assert!(session.tick_at(start + Duration::from_secs(200)).is_none());

    // The board is locked after game over.
    assert_eq!(session.trace_path(&[4, 9, 10, 7], &words), None);
    assert_eq!(session.finish(), result);
}

#[test]
fn test_events_are_drained() {
    let words = words();
    let mut session = started_session();
    session.trace_path(&[13, 9, 8], &words);
    let result = session.finish();

    let events = session.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::WordFound {
                word: "bud".to_string(),
                points: 100
            },
            GameEvent::GameOver { result },
        ]
    );
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_new_game_resets_state() {
    let words = words();
    let mut session = started_session().with_player_name("Ada");
    session.trace_path(&[6, 11, 10, 7], &words);
    session.finish();

    session.new_game("7");
    assert_eq!(session.game_id(), "7");
    assert_eq!(session.board().letters_string(), "nreanseyriauhesa");
    assert_eq!(session.score(), 0);
    assert!(!session.is_started());
    assert!(!session.is_over());

    session.start();
    let result = session.finish();
    assert_eq!(result.player_name().as_deref(), Some("Ada"));
}

#[test]
fn test_score_table() {
    let expected = [
        (3, 100),
        (4, 400),
        (5, 800),
        (6, 1400),
        (7, 1800),
        (8, 2200),
        (9, 2600),
        (10, 3000),
    ];
    for (length, points) in expected {
        assert_eq!(points_for_length(length), points, "length {}", length);
    }
    assert_eq!(points_for_length(2), 0);
    assert_eq!(word_points("rode"), 400);
}
