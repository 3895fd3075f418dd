//! Pointer and touch input, unified as "pointer over cell" steps.
//!
//! Mouse input reports the cell it entered; touch input reports screen
//! points, which are hit-tested against the board geometry here. Either way
//! the selector only ever sees cell indices.

use super::selection::Step;
use super::session::{GameSession, WordOutcome};
use super::words::WordList;
use tracing::{instrument, trace};

/// Screen point in board-container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Layout of the rendered board: square cells separated by a uniform gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    origin: Point,
    cell_size: f64,
    gap: f64,
    size: usize,
}

impl BoardGeometry {
    /// Describes a `size` x `size` grid whose top-left cell starts at `origin`.
    #[instrument]
    pub fn new(origin: Point, cell_size: f64, gap: f64, size: usize) -> Self {
        Self {
            origin,
            cell_size,
            gap: gap.max(0.0),
            size,
        }
    }

    /// Side length of the grid in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maps a point to the cell under it. Points in gaps or outside the grid
    /// hit nothing.
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        let col = self.axis_cell(point.x - self.origin.x)?;
        let row = self.axis_cell(point.y - self.origin.y)?;
        Some(row * self.size + col)
    }

    /// Center of a cell, for drawing the selection trail.
    pub fn cell_center(&self, index: usize) -> Option<Point> {
        if index >= self.size * self.size {
            return None;
        }
        let pitch = self.cell_size + self.gap;
        let (row, col) = (index / self.size, index % self.size);
        Some(Point::new(
            self.origin.x + col as f64 * pitch + self.cell_size / 2.0,
            self.origin.y + row as f64 * pitch + self.cell_size / 2.0,
        ))
    }

    fn axis_cell(&self, offset: f64) -> Option<usize> {
        if !offset.is_finite() || offset < 0.0 || self.cell_size <= 0.0 {
            return None;
        }
        let pitch = self.cell_size + self.gap;
        let cell = (offset / pitch).floor();
        if cell >= self.size as f64 {
            return None;
        }
        let within = offset - cell * pitch;
        (within < self.cell_size).then_some(cell as usize)
    }
}

/// Raw input from the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Mouse down or touch start on a cell.
    Press(usize),
    /// Mouse pointer entered a cell.
    Enter(usize),
    /// Touch moved to a screen point.
    TouchMove(Point),
    /// Mouse up or touch end.
    Release,
}

/// What an input event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputResponse {
    /// Effect on the path, for press and move events.
    pub step: Option<Step>,
    /// Verdict on the released word, for release events.
    pub outcome: Option<WordOutcome>,
    /// Whether the platform's default gesture (scroll, zoom) must be
    /// suppressed for this event.
    pub suppress_default: bool,
}

/// Routes pointer events into a game session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRouter {
    geometry: BoardGeometry,
}

impl InputRouter {
    /// Creates a router for the given board layout.
    #[instrument]
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    /// Board layout used for touch hit testing.
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Applies one event to the session.
    #[instrument(skip(self, session, words))]
    pub fn handle(
        &self,
        session: &mut GameSession,
        event: PointerEvent,
        words: &dyn WordList,
    ) -> InputResponse {
        let was_selecting = session.selector().is_selecting();
        let (step, outcome) = match event {
            PointerEvent::Press(cell) => (Some(session.press(cell)), None),
            PointerEvent::Enter(cell) => (Some(session.enter(cell)), None),
            PointerEvent::TouchMove(point) => {
                let step = match self.geometry.cell_at(point) {
                    Some(cell) if was_selecting => session.enter(cell),
                    _ => Step::Ignored,
                };
                (Some(step), None)
            }
            PointerEvent::Release => (None, session.release(words)),
        };
        let suppress_default = was_selecting || session.selector().is_selecting();
        trace!(?step, suppress_default, "Input handled");
        InputResponse {
            step,
            outcome,
            suppress_default,
        }
    }
}
