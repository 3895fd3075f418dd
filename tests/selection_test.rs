//! Tests for path selection and the pointer input layer.

use word_hunt::invariants::{InvariantSet, SelectionInvariants};
use word_hunt::{
    BoardGeometry, Difficulty, GameSession, InputRouter, PathSelector, Point, PointerEvent,
    SeededRandom, SelectionState, Step, WordOutcome, WordSet, cells_adjacent,
};

fn enabled_selector() -> PathSelector {
    let mut selector = PathSelector::new(4);
    selector.set_enabled(true);
    selector
}

#[test]
fn test_disabled_selector_ignores_input() {
    let mut selector = PathSelector::new(4);
    assert_eq!(selector.press(0), Step::Ignored);
    assert_eq!(selector.enter(1), Step::Ignored);
    assert_eq!(selector.release(), None);
    assert_eq!(selector.state(), SelectionState::Idle);
}

#[test]
fn test_trace_adjacent_path() {
    let mut selector = enabled_selector();
    assert_eq!(selector.press(6), Step::Started(6));
    assert_eq!(selector.enter(11), Step::Extended(11));
    assert_eq!(selector.enter(10), Step::Extended(10));
    assert_eq!(selector.enter(7), Step::Extended(7));
    assert_eq!(selector.path(), [6, 11, 10, 7]);
    assert!(SelectionInvariants::check_all(&selector).is_ok());
    assert_eq!(selector.release(), Some(vec![6, 11, 10, 7]));
    assert_eq!(selector.state(), SelectionState::Idle);
}

#[test]
fn test_non_adjacent_and_revisit_ignored() {
    let mut selector = enabled_selector();
    selector.press(0);
    assert_eq!(selector.enter(2), Step::Ignored);
    assert_eq!(selector.enter(3), Step::Ignored);
    selector.enter(5);
    selector.enter(10);
    // 0 is in the path but is not the second-to-last cell.
    assert_eq!(selector.enter(0), Step::Ignored);
    assert_eq!(selector.path(), [0, 5, 10]);
}

#[test]
fn test_backtrack_pops_last_cell() {
    let mut selector = enabled_selector();
    selector.press(0);
    selector.enter(1);
    selector.enter(2);
    assert_eq!(selector.enter(1), Step::Backtracked(1));
    assert_eq!(selector.path(), [0, 1]);
    assert_eq!(selector.enter(0), Step::Backtracked(0));
    assert_eq!(selector.path(), [0]);
    // A single-cell path cannot backtrack further.
    assert_eq!(selector.enter(0), Step::Ignored);
}

#[test]
fn test_enter_before_press_ignored() {
    let mut selector = enabled_selector();
    assert_eq!(selector.enter(5), Step::Ignored);
    assert!(selector.path().is_empty());
}

#[test]
fn test_press_restarts_path() {
    let mut selector = enabled_selector();
    selector.press(0);
    selector.enter(1);
    assert_eq!(selector.press(15), Step::Started(15));
    assert_eq!(selector.path(), [15]);
}

#[test]
fn test_disabling_clears_path() {
    let mut selector = enabled_selector();
    selector.press(0);
    selector.enter(1);
    selector.set_enabled(false);
    assert!(selector.path().is_empty());
    assert_eq!(selector.release(), None);
}

#[test]
fn test_touch_input_hit_tests_cells() {
    let words: WordSet = ["rode"].into_iter().collect();
    let mut session = GameSession::new("42", Difficulty::Easy, word_hunt::GAME_DURATION);
    session.start();

    let geometry = BoardGeometry::new(Point::new(0.0, 0.0), 50.0, 10.0, 4);
    let router = InputRouter::new(geometry);

    let pressed = router.handle(&mut session, PointerEvent::Press(6), &words);
    assert_eq!(pressed.step, Some(Step::Started(6)));
    assert!(pressed.suppress_default);

    for index in [11, 10, 7] {
        let point = geometry.cell_center(index).expect("cell center");
        let moved = router.handle(&mut session, PointerEvent::TouchMove(point), &words);
        assert_eq!(moved.step, Some(Step::Extended(index)));
        assert!(moved.suppress_default);
    }

    // Moving through a gap changes nothing but still blocks scrolling.
    let gap = router.handle(
        &mut session,
        PointerEvent::TouchMove(Point::new(55.0, 55.0)),
        &words,
    );
    assert_eq!(gap.step, Some(Step::Ignored));
    assert!(gap.suppress_default);

    let released = router.handle(&mut session, PointerEvent::Release, &words);
    assert_eq!(
        released.outcome,
        Some(WordOutcome::Accepted {
            word: "rode".to_string(),
            points: 400
        })
    );
    assert!(released.suppress_default);
    assert_eq!(session.score(), 400);
}

#[test]
fn test_touch_move_while_idle_keeps_default_gesture() {
    let words = WordSet::new();
    let mut session = GameSession::new("42", Difficulty::Easy, word_hunt::GAME_DURATION);
    session.start();
    let geometry = BoardGeometry::new(Point::new(0.0, 0.0), 50.0, 10.0, 4);
    let router = InputRouter::new(geometry);

    let moved = router.handle(
        &mut session,
        PointerEvent::TouchMove(Point::new(25.0, 25.0)),
        &words,
    );
    assert_eq!(moved.step, Some(Step::Ignored));
    assert!(!moved.suppress_default);
    assert!(router.handle(&mut session, PointerEvent::Release, &words).outcome.is_none());
}

/// Picks a cell next to `last`, stepping off the grid or wrapping across a
/// row edge when the offset lands there.
fn nearby_cell(rng: &mut SeededRandom, size: usize, last: usize) -> usize {
    let cells = (size * size) as isize;
    let dr = rng.next_int(0, 3) as isize - 1;
    let dc = rng.next_int(0, 3) as isize - 1;
    let cell = last as isize + dr * size as isize + dc;
    if (0..cells).contains(&cell) {
        cell as usize
    } else {
        cells as usize
    }
}

#[test]
fn test_random_input_keeps_path_valid() {
    let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    for difficulty in difficulties {
        let size = difficulty.board_size();
        let cells = size * size;
        for seed in 1..=25 {
            let mut rng = SeededRandom::new(seed);
            let mut selector = PathSelector::new(size);
            selector.set_enabled(true);

            for step in 0..400 {
                match rng.next_int(0, 10) {
                    0 => {
                        selector.press(rng.next_int(0, cells + size));
                    }
                    1 => {
                        if let Some(path) = selector.release() {
                            assert!(!path.is_empty());
                            assert!(path.iter().all(|&cell| cell < cells));
                            assert!(
                                path.windows(2)
                                    .all(|pair| cells_adjacent(size, pair[0], pair[1])),
                                "non-adjacent path {:?}",
                                path
                            );
                            let mut distinct = path.clone();
                            distinct.sort_unstable();
                            distinct.dedup();
                            assert_eq!(distinct.len(), path.len(), "revisit in {:?}", path);
                        }
                    }
                    2 => {
                        selector.enter(rng.next_int(0, cells + size));
                    }
                    _ => {
                        let last = selector.path().last().copied().unwrap_or(0);
                        selector.enter(nearby_cell(&mut rng, size, last));
                    }
                }
                assert!(
                    SelectionInvariants::check_all(&selector).is_ok(),
                    "size {} seed {} step {}: {:?}",
                    size,
                    seed,
                    step,
                    selector.path()
                );
            }
        }
    }
}
