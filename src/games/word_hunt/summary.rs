//! Side-by-side comparison of two results for the same board.

use crate::store::GameResult;
use std::collections::HashSet;
use tracing::instrument;

/// Outcome of a two-party match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Verdict {
    /// Strictly more points.
    #[strum(to_string = "You Win!")]
    Win,
    /// Strictly fewer points.
    #[strum(to_string = "Opponent Wins!")]
    Loss,
    /// Equal points.
    #[strum(to_string = "It's a Tie!")]
    Tie,
}

/// Comparison of my result against the opponent's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    my_score: u32,
    their_score: u32,
    verdict: Verdict,
    common_words: Vec<String>,
    my_unique_words: Vec<String>,
    their_unique_words: Vec<String>,
}

impl MatchSummary {
    /// Compares two results. Word lists keep each side's finding order.
    #[instrument(skip_all, fields(mine = *mine.score(), theirs = *theirs.score()))]
    pub fn compare(mine: &GameResult, theirs: &GameResult) -> Self {
        let my_set: HashSet<&str> = mine.found_words().iter().map(String::as_str).collect();
        let their_set: HashSet<&str> = theirs.found_words().iter().map(String::as_str).collect();

        let (common_words, my_unique_words) = mine
            .found_words()
            .iter()
            .cloned()
            .partition(|w| their_set.contains(w.as_str()));
        let their_unique_words = theirs
            .found_words()
            .iter()
            .filter(|w| !my_set.contains(w.as_str()))
            .cloned()
            .collect();

        let verdict = match mine.score().cmp(theirs.score()) {
            std::cmp::Ordering::Greater => Verdict::Win,
            std::cmp::Ordering::Less => Verdict::Loss,
            std::cmp::Ordering::Equal => Verdict::Tie,
        };

        Self {
            my_score: *mine.score(),
            their_score: *theirs.score(),
            verdict,
            common_words,
            my_unique_words,
            their_unique_words,
        }
    }

    /// My points.
    pub fn my_score(&self) -> u32 {
        self.my_score
    }

    /// The opponent's points.
    pub fn their_score(&self) -> u32 {
        self.their_score
    }

    /// Who won.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Words both sides found.
    pub fn common_words(&self) -> &[String] {
        &self.common_words
    }

    /// Words only I found.
    pub fn my_unique_words(&self) -> &[String] {
        &self.my_unique_words
    }

    /// Words only the opponent found.
    pub fn their_unique_words(&self) -> &[String] {
        &self.their_unique_words
    }
}
