//! Word Hunt library - timed letter-grid word search
//!
//! Players trace paths through adjacent letters on a seeded grid to form
//! words before a countdown ends. A game identifier doubles as the board
//! seed, so two players sharing an identifier hunt on the same board and
//! their results are reconciled through a shared store.
//!
//! # Architecture
//!
//! - **Board**: deterministic generation from a seed (`Board`, `SeededRandom`)
//! - **Selection**: pointer/touch path tracing (`PathSelector`, `InputRouter`)
//! - **Session**: scoring, found words and game over (`GameSession`)
//! - **Store**: shared persistence, slot reconciliation and opponent polling
//!   (`ResultStore`, `OpponentPoll`)
//!
//! # Example
//!
//! ```no_run
//! use word_hunt::{Difficulty, GameSession, GAME_DURATION, WordSet};
//!
//! let words: WordSet = ["rode", "rude"].into_iter().collect();
//! let mut session = GameSession::new("42", Difficulty::Easy, GAME_DURATION);
//! session.start();
//! let outcome = session.trace_path(&[6, 11, 10, 7], &words);
//! println!("{:?}, score {}", outcome, session.score());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod share;
mod store;

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, DEFAULT_CONFIG_PATH, GameConfig};

// Crate-level exports - Board and generation
pub use games::word_hunt::{
    Board, Difficulty, RANDOM_SEED_BOUND, Seed, SeededRandom, cells_adjacent,
    generate_random_seed,
};

// Crate-level exports - Selection and input
pub use games::word_hunt::{
    BoardGeometry, InputResponse, InputRouter, PathSelector, Point, PointerEvent, SelectionState,
    Step,
};

// Crate-level exports - Path invariants
pub use games::word_hunt::invariants;

// Crate-level exports - Scoring, words and sessions
pub use games::word_hunt::{
    Countdown, FoundWords, GAME_DURATION, GameEvent, GameSession, MIN_WORD_LENGTH, MatchSummary,
    Verdict, WordList, WordListError, WordOutcome, WordSet, points_for_length, word_points,
};

// Crate-level exports - Share links
pub use share::{DEFAULT_BASE_URL, GameMode, ShareLink, ShareLinkError};

// Crate-level exports - Result store
pub use store::{
    DEFAULT_POLL_INTERVAL, DEFAULT_RETENTION, FileArea, GameResult, MemoryArea, OpponentPoll,
    OpponentStatus, Perspective, ResultStore, STORAGE_KEY, Slot, StorageArea, StoreError, StoredGame,
    assign_slot, check_opponent, generate_game_id, now_millis,
};
