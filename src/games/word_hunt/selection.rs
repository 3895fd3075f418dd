//! Drag-path selection state machine.
//!
//! The selector turns press / enter / release input into an ordered path of
//! distinct, 8-adjacent cells. Moving back onto the previous cell pops the
//! last step; every other revisit and every non-adjacent cell is ignored.
//! While the selector is disabled (game not started) all input is ignored.

use super::board::cells_adjacent;
#[cfg(debug_assertions)]
use super::invariants::{InvariantSet, SelectionInvariants};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Coarse state of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum SelectionState {
    /// No selection in progress.
    Idle,
    /// A path is being traced.
    Selecting,
}

/// Effect of one input step on the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// A new path was started at the cell.
    Started(usize),
    /// The cell was appended.
    Extended(usize),
    /// The last cell was popped; the path now ends at the given cell.
    Backtracked(usize),
    /// The input changed nothing.
    Ignored,
}

/// Path selection state machine for one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelector {
    board_size: usize,
    enabled: bool,
    path: Vec<usize>,
}

impl PathSelector {
    /// Creates a disabled, idle selector for a `board_size` x `board_size`
    /// board.
    #[instrument]
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            enabled: false,
            path: Vec::new(),
        }
    }

    /// Side length of the board this selector addresses.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Whether input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables input. Disabling drops any path in progress.
    #[instrument(skip(self))]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.path.clear();
        }
    }

    /// Current state.
    pub fn state(&self) -> SelectionState {
        if self.path.is_empty() {
            SelectionState::Idle
        } else {
            SelectionState::Selecting
        }
    }

    /// Whether a path is being traced.
    pub fn is_selecting(&self) -> bool {
        self.state() == SelectionState::Selecting
    }

    /// Selected cells in selection order.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Starts a new path at `cell`, replacing any path in progress.
    #[instrument(skip(self), fields(path_len = self.path.len()))]
    pub fn press(&mut self, cell: usize) -> Step {
        if !self.enabled || cell >= self.cell_count() {
            trace!(enabled = self.enabled, "Press ignored");
            return Step::Ignored;
        }
        self.path.clear();
        self.path.push(cell);
        self.check_invariants();
        debug!(cell, "Selection started");
        Step::Started(cell)
    }

    /// Handles the pointer entering `cell` while a path is being traced.
    #[instrument(skip(self), fields(path_len = self.path.len()))]
    pub fn enter(&mut self, cell: usize) -> Step {
        if !self.enabled {
            return Step::Ignored;
        }
        let Some(&last) = self.path.last() else {
            return Step::Ignored;
        };

        let step = if self.path.len() > 1 && self.path[self.path.len() - 2] == cell {
            self.path.pop();
            Step::Backtracked(cell)
        } else if self.path.contains(&cell) {
            Step::Ignored
        } else if cells_adjacent(self.board_size, last, cell) {
            self.path.push(cell);
            Step::Extended(cell)
        } else {
            Step::Ignored
        };

        self.check_invariants();
        trace!(?step, "Enter handled");
        step
    }

    /// Ends the selection, returning the traced path and leaving the selector
    /// idle. Returns `None` when disabled or idle.
    #[instrument(skip(self), fields(path_len = self.path.len()))]
    pub fn release(&mut self) -> Option<Vec<usize>> {
        if !self.enabled || self.path.is_empty() {
            return None;
        }
        let path = std::mem::take(&mut self.path);
        debug!(?path, "Selection released");
        Some(path)
    }

    /// Drops the path in progress without producing a candidate.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        self.path.clear();
    }

    fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        debug_assert!(
            SelectionInvariants::check_all(self).is_ok(),
            "selection invariants violated: {:?}",
            self.path
        );
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}
