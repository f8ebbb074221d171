//! Text helpers shared by the record and report formatters.

use std::fmt;

/// Compare two strings ignoring case, folding one character at a time.
///
/// Each character is lowered on its own, so a word-final `Σ` folds to `σ`
/// on both sides and no intermediate `String` is built.
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

/// Renders a value with one decimal place, rounding halves away from zero.
///
/// Report lines round `6.25` to `6.3`; `{:.1}` alone would print `6.2`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OneDecimal(pub(crate) f64);

impl fmt::Display for OneDecimal {
    #[expect(
        clippy::float_arithmetic,
        reason = "scaling to tenths is how the half-up rounding is applied"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 10.0).round() / 10.0;
        write!(f, "{rounded:.1}")
    }
}
