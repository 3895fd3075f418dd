//! Length-tiered word scoring.

use tracing::instrument;

/// Shortest word that can score.
pub const MIN_WORD_LENGTH: usize = 3;

/// Points for a word of the given length (in letters).
///
/// | length | points |
/// |---|---|
/// | 3 | 100 |
/// | 4 | 400 |
/// | 5 | 800 |
/// | 6 | 1400 |
/// | 7 | 1800 |
/// | 8 | 2200 |
/// | n > 8 | 2200 + 400 * (n - 8) |
///
/// Lengths below three score nothing.
#[instrument]
pub fn points_for_length(length: usize) -> u32 {
    match length {
        0..=2 => 0,
        3 => 100,
        4 => 400,
        5 => 800,
        6 => 1400,
        7 => 1800,
        8 => 2200,
        n => {
            let extra = u32::try_from(n - 8).unwrap_or(u32::MAX / 400);
            2200u32.saturating_add(extra.saturating_mul(400))
        }
    }
}

/// Points for a word, counting letters rather than bytes.
#[instrument]
pub fn word_points(word: &str) -> u32 {
    points_for_length(word.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        assert_eq!(points_for_length(3), 100);
        assert_eq!(points_for_length(4), 400);
        assert_eq!(points_for_length(5), 800);
        assert_eq!(points_for_length(6), 1400);
        assert_eq!(points_for_length(7), 1800);
        assert_eq!(points_for_length(8), 2200);
        assert_eq!(points_for_length(9), 2600);
        assert_eq!(points_for_length(12), 3800);
    }

    #[test]
    fn test_short_words_score_nothing() {
        assert_eq!(points_for_length(0), 0);
        assert_eq!(points_for_length(1), 0);
        assert_eq!(points_for_length(2), 0);
    }

    #[test]
    fn test_monotonic() {
        for len in MIN_WORD_LENGTH..40 {
            assert!(points_for_length(len + 1) >= points_for_length(len));
        }
    }

    #[test]
    fn test_word_points_counts_letters() {
        assert_eq!(word_points("cat"), 100);
        assert_eq!(word_points("word"), 400);
        assert_eq!(word_points("go"), 0);
    }
}
