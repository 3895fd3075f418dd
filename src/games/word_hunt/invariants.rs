//! First-class invariants for selection paths.
//!
//! Invariants are logical properties that must hold after every selector
//! transition. They are checked in debug builds and testable on their own.

use super::board::cells_adjacent;
use super::selection::PathSelector;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: every consecutive pair of the path is 8-adjacent.
pub struct AdjacentSteps;

impl Invariant<PathSelector> for AdjacentSteps {
    fn holds(selector: &PathSelector) -> bool {
        selector
            .path()
            .windows(2)
            .all(|pair| cells_adjacent(selector.board_size(), pair[0], pair[1]))
    }

    fn description() -> &'static str {
        "Consecutive path cells are 8-adjacent"
    }
}

/// Invariant: no cell appears twice in the path.
pub struct DistinctCells;

impl Invariant<PathSelector> for DistinctCells {
    fn holds(selector: &PathSelector) -> bool {
        let mut seen = HashSet::new();
        selector.path().iter().all(|cell| seen.insert(*cell))
    }

    fn description() -> &'static str {
        "Path cells are distinct"
    }
}

/// Invariant: every path cell lies on the board.
pub struct CellsOnBoard;

impl Invariant<PathSelector> for CellsOnBoard {
    fn holds(selector: &PathSelector) -> bool {
        let cells = selector.board_size() * selector.board_size();
        selector.path().iter().all(|cell| *cell < cells)
    }

    fn description() -> &'static str {
        "Path cells lie on the board"
    }
}

/// All selection-path invariants as a composable set.
pub type SelectionInvariants = (AdjacentSteps, DistinctCells, CellsOnBoard);

#[cfg(test)]
mod tests {
    use super::*;

    fn started(size: usize) -> PathSelector {
        let mut selector = PathSelector::new(size);
        selector.set_enabled(true);
        selector
    }

    #[test]
    fn test_idle_selector_holds() {
        let selector = PathSelector::new(4);
        assert!(SelectionInvariants::check_all(&selector).is_ok());
    }

    #[test]
    fn test_holds_after_diagonal_walk() {
        let mut selector = started(4);
        selector.press(0);
        selector.enter(5);
        selector.enter(10);
        selector.enter(15);
        assert_eq!(selector.path(), &[0, 5, 10, 15]);
        assert!(SelectionInvariants::check_all(&selector).is_ok());
    }

    #[test]
    fn test_holds_after_rejected_moves() {
        let mut selector = started(5);
        selector.press(12);
        selector.enter(0);
        selector.enter(13);
        selector.enter(12);
        selector.enter(7);
        selector.enter(13);
        assert!(AdjacentSteps::holds(&selector));
        assert!(DistinctCells::holds(&selector));
        assert!(CellsOnBoard::holds(&selector));
    }
}
