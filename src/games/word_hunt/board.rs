//! Letter grid, difficulty tiers and seed derivation.

use super::random::{SeededRandom, generate_random_seed};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Board size tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// 4x4 grid.
    Easy,
    /// 5x5 grid.
    #[default]
    Medium,
    /// 6x6 grid.
    Hard,
}

impl Difficulty {
    /// Returns the side length of the board for this tier.
    #[instrument]
    pub fn board_size(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 5,
            Self::Hard => 6,
        }
    }
}

/// Board seed derived from a game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct Seed(pub u64);

impl Seed {
    /// Parses a game identifier as a seed.
    ///
    /// Reads the leading integer of the identifier: surrounding whitespace
    /// and a `+` sign are skipped, a `0x` prefix switches to hexadecimal and
    /// parsing stops at the first non-digit, so `"42abc"` is seed 42.
    /// Returns `None` when there are no leading digits, the value is zero or
    /// negative, or it does not fit in a `u64`.
    #[instrument]
    pub fn parse(game_id: &str) -> Option<Self> {
        let trimmed = game_id.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let (digits, radix) = match unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (unsigned, 10),
        };
        let end = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        match u64::from_str_radix(&digits[..end], radix) {
            Ok(0) | Err(_) => None,
            Ok(value) => Some(Self(value)),
        }
    }

    /// Derives the seed for a game identifier, falling back to a fresh random
    /// seed when [`Seed::parse`] finds no usable integer.
    ///
    /// A fallback seed breaks board sharing: the other session will deal a
    /// different board for the same identifier.
    #[instrument]
    pub fn from_game_id(game_id: &str) -> Self {
        match Self::parse(game_id) {
            Some(seed) => seed,
            None => {
                let seed = Self::random();
                warn!(game_id, seed = seed.0, "Game id has no usable seed, using a fresh one");
                seed
            }
        }
    }

    /// Returns a fresh random seed.
    #[instrument]
    pub fn random() -> Self {
        Self(generate_random_seed())
    }
}

/// Checks the 8-neighbour relation between two cells of a `size` x `size`
/// grid: both cells exist, they differ, and row and column each differ by at
/// most one.
pub fn cells_adjacent(size: usize, a: usize, b: usize) -> bool {
    let cells = size * size;
    if a == b || a >= cells || b >= cells {
        return false;
    }
    let (ra, ca) = (a / size, a % size);
    let (rb, cb) = (b / size, b % size);
    ra.abs_diff(rb) <= 1 && ca.abs_diff(cb) <= 1
}

/// Square letter grid in row-major order.
///
/// Letters are lowercase ASCII. A board never changes after it is dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    letters: Vec<char>,
}

impl Board {
    /// Deals a board for the given seed and difficulty.
    #[instrument]
    pub fn generate(seed: Seed, difficulty: Difficulty) -> Self {
        let board = Self::generate_with_size(seed, difficulty.board_size());
        info!(seed = seed.0, %difficulty, letters = %board.letters_string(), "Board generated");
        board
    }

    /// Deals a `size` x `size` board by drawing one weighted letter per cell.
    /// A zero size deals an empty board.
    #[instrument]
    pub fn generate_with_size(seed: Seed, size: usize) -> Self {
        let mut rng = SeededRandom::new(seed.0);
        let letters = (0..size * size)
            .map(|_| rng.weighted_letter().to_ascii_lowercase())
            .collect();
        Self { size, letters }
    }

    /// Builds a board from explicit letters.
    ///
    /// Returns `None` unless `letters` holds exactly `size * size` ASCII
    /// letters.
    #[instrument]
    pub fn from_letters(size: usize, letters: &str) -> Option<Self> {
        let letters: Vec<char> = letters.chars().map(|c| c.to_ascii_lowercase()).collect();
        if size == 0 || letters.len() != size * size || !letters.iter().all(char::is_ascii_lowercase)
        {
            debug!(size, count = letters.len(), "Rejected letters for board");
            return None;
        }
        Some(Self { size, letters })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True only for a zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in row-major order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Letters concatenated into a string.
    pub fn letters_string(&self) -> String {
        self.letters.iter().collect()
    }

    /// Letter at a cell index.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Converts a cell index into `(row, col)`, or `None` off the board.
    pub fn coord(&self, index: usize) -> Option<(usize, usize)> {
        self.contains(index)
            .then(|| (index / self.size, index % self.size))
    }

    /// Returns true when `index` addresses a cell of this board.
    pub fn contains(&self, index: usize) -> bool {
        index < self.letters.len()
    }

    /// Checks the 8-neighbour relation: row and column each differ by at most
    /// one, and the cells are distinct.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        cells_adjacent(self.size, a, b)
    }

    /// Concatenates the letters along a path. Out-of-range indices are skipped.
    pub fn word_for(&self, path: &[usize]) -> String {
        path.iter().filter_map(|&i| self.letter(i)).collect()
    }

    /// Formats the board as a grid of uppercase letters, one row per line.
    pub fn display(&self) -> String {
        self.letters
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|c| c.to_ascii_uppercase().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
