//! Persisted result records.
//!
//! Field names serialize in camelCase so records stay readable by every
//! client sharing the persistence area.

use crate::store::Slot;
use derive_getters::Getters;
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Milliseconds since the Unix epoch, from the system clock.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Outcome of one session's game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters, new)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_")]
pub struct GameResult {
    /// Total points.
    score: u32,
    /// Found words in the order they were found.
    found_words: Vec<String>,
    /// Display name of the player, if they gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    #[new(default)]
    player_name: Option<String>,
    /// Whether the game ran to its end.
    completed: bool,
    /// When the result was produced, in epoch milliseconds. Zero means
    /// "stamp on save".
    #[serde(default)]
    timestamp: i64,
}

impl GameResult {
    /// Creates a completed result.
    #[instrument(skip(found_words), fields(words = found_words.len()))]
    pub fn finished(score: u32, found_words: Vec<String>, timestamp: i64) -> Self {
        Self::new(score, found_words, true, timestamp)
    }

    /// Whether `other` is this same submission, possibly before the store
    /// stamped it.
    ///
    /// Score, words, player name and completion must match. Timestamps must
    /// match too unless either side is still unstamped (zero).
    pub fn is_same_submission(&self, other: &GameResult) -> bool {
        self.score == other.score
            && self.found_words == other.found_words
            && self.player_name == other.player_name
            && self.completed == other.completed
            && (self.timestamp == 0 || other.timestamp == 0 || self.timestamp == other.timestamp)
    }
}

/// One shared game record: up to two results under a game id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    /// Shared game identifier.
    game_id: String,
    /// First result written for the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getter(skip)]
    pub(crate) player_result: Option<GameResult>,
    /// Second result written for the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getter(skip)]
    pub(crate) opponent_result: Option<GameResult>,
    /// When the record was created, in epoch milliseconds.
    created_at: i64,
}

impl StoredGame {
    /// Creates a record holding its first result.
    #[instrument(skip(first))]
    pub fn new(game_id: String, first: GameResult, created_at: i64) -> Self {
        Self {
            game_id,
            player_result: Some(first),
            opponent_result: None,
            created_at,
        }
    }

    /// First result written for the game.
    pub fn player_result(&self) -> Option<&GameResult> {
        self.player_result.as_ref()
    }

    /// Second result written for the game.
    pub fn opponent_result(&self) -> Option<&GameResult> {
        self.opponent_result.as_ref()
    }

    /// Number of filled result slots.
    pub fn filled_slots(&self) -> usize {
        usize::from(self.player_result.is_some()) + usize::from(self.opponent_result.is_some())
    }

    /// Result held in `slot`.
    pub fn slot(&self, slot: Slot) -> Option<&GameResult> {
        match slot {
            Slot::Player => self.player_result.as_ref(),
            Slot::Opponent => self.opponent_result.as_ref(),
        }
    }

    /// Slot holding `result` as the same submission, player slot first.
    pub fn slot_of(&self, result: &GameResult) -> Option<Slot> {
        [Slot::Player, Slot::Opponent]
            .into_iter()
            .find(|&slot| self.slot(slot).is_some_and(|r| r.is_same_submission(result)))
    }

    /// Returns the result belonging to the other party, seen from `mine`.
    ///
    /// `None` when `mine` is in neither slot or the other slot is empty.
    pub fn counterpart_of(&self, mine: &GameResult) -> Option<&GameResult> {
        self.slot_of(mine).and_then(|slot| self.slot(slot.other()))
    }

    /// Age of the record at `now`, in milliseconds.
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.created_at)
    }
}
