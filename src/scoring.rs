//! Guess scoring: closest without going over.
//!
//! An exact guess earns 100 points and any overshoot earns nothing. Guesses
//! below the answer decay in two segments: within half of the answer they
//! scale from 99 down, further away they earn a small 1..=5 consolation.

use crate::questions;
use crate::types::QuestionId;
use std::collections::BTreeMap;

pub const EXACT_SCORE: u32 = 100;

/// Score a raw (stringly-typed) guess against the true answer.
///
/// Missing, blank or unparsable guesses score 0. Formatting rules such as the
/// scientific-notation ban are enforced at submission time, not here.
pub fn calculate_score(guess: Option<&str>, actual: i64) -> u32 {
    let Some(raw) = guess.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => score_value(value, actual),
        _ => 0,
    }
}

/// Score a numeric guess against the true answer
pub fn score_value(guess: f64, actual: i64) -> u32 {
    let actual_f = actual as f64;
    if guess > actual_f {
        return 0;
    }
    if guess == actual_f {
        return EXACT_SCORE;
    }

    let percent_off = (actual_f - guess) / actual_f.abs();
    let score = if percent_off >= 0.5 {
        (10.0 * (1.0 - percent_off)).floor()
    } else {
        (99.0 * (1.0 - percent_off * 2.0)).floor()
    };

    // floor() can go very negative for huge undershoots
    score.max(1.0) as u32
}

/// Sum of per-question scores over the full question list; unanswered
/// questions score 0.
pub fn calculate_total_score(answers: &BTreeMap<QuestionId, String>) -> u32 {
    questions::all()
        .iter()
        .map(|q| calculate_score(answers.get(&q.id).map(String::as_str), q.answer))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_answers_score_100() {
        for q in questions::all() {
            let guess = q.answer.to_string();
            assert_eq!(calculate_score(Some(guess.as_str()), q.answer), 100, "q{}", q.id);
        }
    }

    #[test]
    fn test_overshoot_scores_zero() {
        assert_eq!(calculate_score(Some("101"), 100), 0);
        assert_eq!(calculate_score(Some("100.5"), 100), 0);
        assert_eq!(calculate_score(Some("-100"), -109), 0);
        assert_eq!(calculate_score(Some("0"), -109), 0);
    }

    #[test]
    fn test_missing_or_invalid_guess_scores_zero() {
        assert_eq!(calculate_score(None, 100), 0);
        assert_eq!(calculate_score(Some(""), 100), 0);
        assert_eq!(calculate_score(Some("   "), 100), 0);
        assert_eq!(calculate_score(Some("abc"), 100), 0);
        assert_eq!(calculate_score(Some("NaN"), 100), 0);
        assert_eq!(calculate_score(Some("-inf"), 100), 0);
    }

    #[test]
    fn test_branch_boundaries() {
        // percent_off = 0.5 takes the consolation branch
        assert_eq!(calculate_score(Some("50"), 100), 5);
        // percent_off = 0.1
        assert_eq!(calculate_score(Some("90"), 100), 79);
        // percent_off = 0.01
        assert_eq!(calculate_score(Some("99"), 100), 97);
        // Just inside the close branch: floor(99 * 0.02) = 1
        assert_eq!(calculate_score(Some("51"), 100), 1);
    }

    #[test]
    fn test_consolation_floor_is_one() {
        assert_eq!(calculate_score(Some("25"), 100), 2);
        assert_eq!(calculate_score(Some("1"), 100), 1);
        assert_eq!(calculate_score(Some("0"), 100), 1);
        assert_eq!(calculate_score(Some("-5000"), 100), 1);
        assert_eq!(calculate_score(Some("-1000000000"), 336), 1);
    }

    #[test]
    fn test_negative_actual() {
        // percent_off = 41 / 109
        assert_eq!(calculate_score(Some("-150"), -109), 24);
        assert_eq!(calculate_score(Some("-109"), -109), 100);
    }

    #[test]
    fn test_fractional_and_padded_guesses() {
        // percent_off = 0.005 -> floor(98.01)
        assert_eq!(calculate_score(Some("99.5"), 100), 98);
        assert_eq!(calculate_score(Some("  90 "), 100), 79);
    }

    #[test]
    fn test_scores_stay_in_range() {
        for actual in [15_i64, 336, -109, 300000] {
            for guess in [-1e9, -500.0, 0.0, 1.0, 7.5, 14.0, 200.0, 1e9] {
                let score = score_value(guess, actual);
                assert!(score <= 100, "{guess} vs {actual} -> {score}");
            }
        }
    }

    #[test]
    fn test_total_score_sums_individual_scores() {
        let mut answers = BTreeMap::new();
        let mut expected = 0;
        for q in questions::all() {
            // Alternate exact, close, far and overshooting guesses
            let guess = match q.id % 4 {
                0 => q.answer,
                1 => q.answer - q.answer.abs() / 10,
                2 => q.answer - q.answer.abs(),
                _ => q.answer + 1,
            };
            let guess = guess.to_string();
            expected += calculate_score(Some(guess.as_str()), q.answer);
            answers.insert(q.id, guess);
        }

        assert_eq!(calculate_total_score(&answers), expected);
    }

    #[test]
    fn test_total_score_ignores_missing_entries() {
        let mut answers = BTreeMap::new();
        answers.insert(1, "336".to_string());
        answers.insert(6, "".to_string());
        assert_eq!(calculate_total_score(&answers), 100);
        assert_eq!(calculate_total_score(&BTreeMap::new()), 0);
    }
}
