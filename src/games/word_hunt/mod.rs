//! Word hunt: trace adjacent letters on a seeded grid to form words before
//! the clock runs out.
//!
//! Two players given the same game identifier get the same board, so their
//! results can be compared once both are in the shared store.

mod board;
mod input;
pub mod invariants;
mod random;
mod scoring;
mod selection;
mod session;
mod summary;
mod timer;
mod words;

pub use board::{Board, Difficulty, Seed, cells_adjacent};
pub use input::{BoardGeometry, InputResponse, InputRouter, Point, PointerEvent};
pub use random::{RANDOM_SEED_BOUND, SeededRandom, generate_random_seed};
pub use scoring::{MIN_WORD_LENGTH, points_for_length, word_points};
pub use selection::{PathSelector, SelectionState, Step};
pub use session::{FoundWords, GameEvent, GameSession, WordOutcome};
pub use summary::{MatchSummary, Verdict};
pub use timer::{Countdown, GAME_DURATION};
pub use words::{WordList, WordListError, WordSet};
