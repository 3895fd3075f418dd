//! One player's active game: board, selection, found words and score.
//!
//! The session evaluates each released path exactly once, credits a word at
//! most once, and produces its [`GameResult`] exactly once when the game
//! ends. Events for presentation are queued and drained by the caller.

use super::board::{Board, Difficulty, Seed};
use super::scoring::{MIN_WORD_LENGTH, word_points};
use super::selection::{PathSelector, Step};
use super::timer::Countdown;
use super::words::WordList;
use crate::store::{GameResult, now_millis};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Words found in one game: unique, in the order found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundWords {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FoundWords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word in lowercase form. Returns false if it was already found.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.to_lowercase();
        if !self.seen.insert(word.clone()) {
            return false;
        }
        self.order.push(word);
        true
    }

    /// Whether the word, compared case-insensitively, was found.
    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(&word.to_lowercase())
    }

    /// Found words in the order found.
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Number of found words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was found yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forgets every word.
    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

/// Verdict on a candidate word.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum WordOutcome {
    /// New valid word; points were credited.
    #[display("Found \"{}\" +{}", word, points)]
    Accepted {
        /// The word, lowercase.
        word: String,
        /// Points credited.
        points: u32,
    },
    /// Valid word that was already credited.
    #[display("Word already found")]
    Duplicate(String),
    /// Long enough but not in the word list.
    #[display("Not in word list")]
    NotRecognized(String),
    /// Shorter than the minimum length; ignored silently.
    #[display("")]
    TooShort(String),
}

impl WordOutcome {
    /// Whether points were credited.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Whether the player should see a notice for this outcome.
    pub fn is_notice(&self) -> bool {
        !matches!(self, Self::TooShort(_))
    }
}

/// Event for presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A word was credited.
    WordFound {
        /// The word, lowercase.
        word: String,
        /// Points credited.
        points: u32,
    },
    /// The game ended and produced its result.
    GameOver {
        /// Final result.
        result: GameResult,
    },
}

/// Active game session.
#[derive(Debug, Clone)]
pub struct GameSession {
    game_id: String,
    difficulty: Difficulty,
    seed: Seed,
    board: Board,
    selector: PathSelector,
    found: FoundWords,
    score: u32,
    countdown: Countdown,
    started: bool,
    player_name: Option<String>,
    result: Option<GameResult>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates a session for `game_id`, dealing its board. The board is not
    /// interactive until [`GameSession::start_at`].
    #[instrument]
    pub fn new(game_id: &str, difficulty: Difficulty, duration: Duration) -> Self {
        let seed = Seed::from_game_id(game_id);
        let board = Board::generate(seed, difficulty);
        info!(game_id, seed = seed.0, %difficulty, "Game session created");
        Self {
            game_id: game_id.to_string(),
            difficulty,
            seed,
            selector: PathSelector::new(board.size()),
            board,
            found: FoundWords::new(),
            score: 0,
            countdown: Countdown::new(duration),
            started: false,
            player_name: None,
            result: None,
            events: Vec::new(),
        }
    }

    /// Attaches a display name carried into the result.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Game identifier.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Board tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Seed the board was dealt from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The path selector.
    pub fn selector(&self) -> &PathSelector {
        &self.selector
    }

    /// Words credited so far.
    pub fn found_words(&self) -> &FoundWords {
        &self.found
    }

    /// Points so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The countdown.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Time left.
    pub fn time_left(&self) -> Duration {
        self.countdown.remaining()
    }

    /// Whether the game was started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the game ended.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Final result, once the game ended.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Starts the game: the board accepts input and the countdown runs.
    /// Starting an ended or running game does nothing.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn start_at(&mut self, now: Instant) {
        if self.started || self.is_over() {
            debug!("Start ignored");
            return;
        }
        self.started = true;
        self.selector.set_enabled(true);
        self.countdown.start_at(now);
        info!("Game started");
    }

    /// Starts the game now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Press on a cell.
    pub fn press(&mut self, cell: usize) -> Step {
        self.selector.press(cell)
    }

    /// Pointer entered a cell.
    pub fn enter(&mut self, cell: usize) -> Step {
        self.selector.enter(cell)
    }

    /// Release: evaluates the traced path once. Returns `None` when there was
    /// no selection.
    #[instrument(skip(self, words), fields(game_id = %self.game_id))]
    pub fn release(&mut self, words: &dyn WordList) -> Option<WordOutcome> {
        let path = self.selector.release()?;
        let candidate = self.board.word_for(&path);
        Some(self.evaluate(candidate, words))
    }

    /// Traces `path` as one press / enter / release gesture.
    ///
    /// Cells the selector rejects are skipped, exactly as for pointer input.
    #[instrument(skip(self, words), fields(game_id = %self.game_id))]
    pub fn trace_path(&mut self, path: &[usize], words: &dyn WordList) -> Option<WordOutcome> {
        let (&first, rest) = path.split_first()?;
        self.press(first);
        for &cell in rest {
            self.enter(cell);
        }
        self.release(words)
    }

    fn evaluate(&mut self, candidate: String, words: &dyn WordList) -> WordOutcome {
        let word = candidate.to_lowercase();
        let outcome = if word.chars().count() < MIN_WORD_LENGTH {
            WordOutcome::TooShort(word)
        } else if self.found.contains(&word) {
            WordOutcome::Duplicate(word)
        } else if !words.contains(&word) {
            WordOutcome::NotRecognized(word)
        } else {
            let points = word_points(&word);
            self.found.insert(&word);
            self.score += points;
            info!(word = %word, points, score = self.score, "Word found");
            self.events.push(GameEvent::WordFound {
                word: word.clone(),
                points,
            });
            WordOutcome::Accepted { word, points }
        };
        debug!(?outcome, "Candidate evaluated");
        outcome
    }

    /// Advances the countdown. Returns the result on the tick that ends the
    /// game.
    pub fn tick_at(&mut self, now: Instant) -> Option<GameResult> {
        if self.countdown.tick_at(now) {
            return Some(self.finish());
        }
        None
    }

    /// Ends the game and returns its result. Ending twice returns the first
    /// result unchanged.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn finish(&mut self) -> GameResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        self.selector.set_enabled(false);
        self.countdown.stop();

        let mut result =
            GameResult::finished(self.score, self.found.as_slice().to_vec(), now_millis());
        if let Some(name) = &self.player_name {
            result = result.with_player_name(name.clone());
        }
        info!(score = self.score, words = self.found.len(), "Game over");
        self.events.push(GameEvent::GameOver {
            result: result.clone(),
        });
        self.result = Some(result.clone());
        result
    }

    /// Replaces this game with a fresh one for `game_id`, keeping difficulty,
    /// duration and player name.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, game_id: &str) {
        let player_name = self.player_name.take();
        *self = Self::new(game_id, self.difficulty, self.countdown.duration());
        self.player_name = player_name;
    }

    /// Takes the queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
