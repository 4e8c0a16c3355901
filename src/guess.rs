//! Submission-time validation of guesses and player names

use crate::error::GuessError;

/// Largest magnitude accepted for a guess
pub const GUESS_LIMIT: f64 = 1_000_000_000.0;

/// Characters that cannot appear in a storage key
const RESERVED_KEY_CHARS: &[char] = &['.', '#', '$', '/', '[', ']'];

/// Validate a raw guess and return its numeric value.
///
/// Checks run in order: empty, not a finite number, out of range, then the
/// scientific-notation ban, which applies even when the value itself is fine.
pub fn validate_guess(raw: &str) -> Result<f64, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::Empty);
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(GuessError::NotANumber)?;

    if !(-GUESS_LIMIT..=GUESS_LIMIT).contains(&value) {
        return Err(GuessError::OutOfRange);
    }

    if trimmed.contains(['e', 'E']) {
        return Err(GuessError::ScientificNotation);
    }

    Ok(value)
}

/// Turn a display name into a storage key: trim, then replace reserved
/// characters with `_`
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if RESERVED_KEY_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Normalize a display name for duplicate comparison
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
