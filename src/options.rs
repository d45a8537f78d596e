//! User-configurable generator options.
//!
//! Options are entered as free text and validated into a [`Validated`]
//! value: the value to store plus an optional [`Warning`] to show the user.
//! Invalid input never fails; it resets to the documented defaults.
//!
//! Text is read with leading-integer semantics, so `"  42abc"` is `42`,
//! `"3.9"` is `3` and `"abc"` is not a number at all.

use std::fmt;

/// Prompt shown when asking for the lower bound of a [`Range`].
pub const MIN_PROMPT: &str = "Enter minimum value (min: 1)";

/// Prompt shown when asking for the upper bound of a [`Range`].
pub const MAX_PROMPT: &str = "Enter maximum value (max: 9999)";

/// Prompt shown when asking for a [`WordLength`].
pub const LENGTH_PROMPT: &str = "Enter word length (min: 3 / max: 9)";

/// Outcome of validating user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Validated<T> {
    /// Value to store, either the input or a default.
    pub value: T,

    /// Set when the input was rejected and a default substituted.
    pub warning: Option<Warning>,
}

impl<T> Validated<T> {
    fn accepted(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn rejected(value: T, warning: Warning) -> Self {
        warn!("{warning}");
        Self {
            value,
            warning: Some(warning),
        }
    }
}

/// Reasons for rejecting option input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Warning {
    MinAboveMax,
    NotANumber,
    LengthTooLong,
    LengthTooShort,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinAboveMax => write!(f, "Minimum value cannot be greater than maximum value."),
            Self::NotANumber => write!(f, "Invalid input. Please enter a number."),
            Self::LengthTooLong => write!(
                f,
                "Word length cannot be greater than {}.",
                WordLength::MAX
            ),
            Self::LengthTooShort => {
                write!(f, "Word length cannot be less than {}.", WordLength::MIN)
            }
        }
    }
}

/// Parses the leading integer of `input`.
///
/// Skips leading whitespace, accepts one optional sign and then takes the
/// longest run of ASCII digits. Returns `None` when there are no digits or
/// the number does not fit an `i64`.
#[must_use]
pub fn parse_int(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let unsigned = input.trim_start_matches(['+', '-']);

    // At most one sign.
    let sign_len = input.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .find(|chr: char| !chr.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    input[..sign_len + digits].parse().ok()
}

/// Inclusive range of numbers to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    min: i64,
    max: i64,
}

impl Range {
    pub const DEFAULT_MIN: i64 = 1;
    pub const DEFAULT_MAX: i64 = 999;

    /// Creates a range, or `None` if `min > max`.
    #[must_use]
    pub fn new(min: i64, max: i64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Validates the answers to [`MIN_PROMPT`] and [`MAX_PROMPT`].
    ///
    /// A field that is not a number silently takes its default. If the
    /// minimum ends up above the maximum, both take their defaults and
    /// [`Warning::MinAboveMax`] is raised.
    #[must_use]
    pub fn from_input(min: &str, max: &str) -> Validated<Self> {
        let min = parse_int(min).unwrap_or_else(|| {
            debug!("minimum is not a number, using {}", Self::DEFAULT_MIN);
            Self::DEFAULT_MIN
        });
        let max = parse_int(max).unwrap_or_else(|| {
            debug!("maximum is not a number, using {}", Self::DEFAULT_MAX);
            Self::DEFAULT_MAX
        });

        match Self::new(min, max) {
            Some(range) => Validated::accepted(range),
            None => Validated::rejected(Self::default(), Warning::MinAboveMax),
        }
    }

    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Number of letters in a generated word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordLength(u8);

impl WordLength {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 9;
    pub const DEFAULT: u8 = 5;

    /// Creates a word length, or `None` if outside `MIN..=MAX`.
    #[must_use]
    pub fn new(length: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&length)
            .then_some(Self(length))
    }

    /// Validates the answer to [`LENGTH_PROMPT`].
    ///
    /// Anything unusable resets to [`DEFAULT`](Self::DEFAULT) with the
    /// matching warning.
    #[must_use]
    pub fn from_input(input: &str) -> Validated<Self> {
        let Some(length) = parse_int(input) else {
            return Validated::rejected(Self::default(), Warning::NotANumber);
        };

        if length > i64::from(Self::MAX) {
            return Validated::rejected(Self::default(), Warning::LengthTooLong);
        }

        match u8::try_from(length).ok().and_then(Self::new) {
            Some(length) => Validated::accepted(length),
            None => Validated::rejected(Self::default(), Warning::LengthTooShort),
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for WordLength {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for WordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_takes_leading_digits() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  42abc"), Some(42));
        assert_eq!(parse_int("3.9"), Some(3));
        assert_eq!(parse_int("-17"), Some(-17));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("+-3"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn range_accepts_valid_input() {
        let range = Range::from_input("10", "20");
        assert_eq!(range.value, Range::new(10, 20).unwrap());
        assert_eq!(range.warning, None);

        let single = Range::from_input("7", "7");
        assert_eq!(single.value, Range::new(7, 7).unwrap());
    }

    #[test]
    fn range_defaults_non_numeric_fields_independently() {
        let range = Range::from_input("abc", "50");
        assert_eq!(range.value, Range::new(1, 50).unwrap());
        assert_eq!(range.warning, None);

        let range = Range::from_input("10", "");
        assert_eq!(range.value, Range::new(10, 999).unwrap());
        assert_eq!(range.warning, None);
    }

    #[test]
    fn range_resets_when_min_above_max() {
        let range = Range::from_input("50", "10");
        assert_eq!(range.value, Range::default());
        assert_eq!(range.warning, Some(Warning::MinAboveMax));

        // Default maximum applies before the comparison.
        let range = Range::from_input("1000", "x");
        assert_eq!(range.value, Range::default());
        assert_eq!(range.warning, Some(Warning::MinAboveMax));
    }

    #[test]
    fn range_allows_any_magnitude() {
        let range = Range::from_input("-5000", "100000");
        assert_eq!(range.value, Range::new(-5000, 100_000).unwrap());
    }

    #[test]
    fn word_length_bounds() {
        assert_eq!(WordLength::from_input("3").value.get(), 3);
        assert_eq!(WordLength::from_input("9").value.get(), 9);
        assert_eq!(WordLength::from_input("7").warning, None);

        let long = WordLength::from_input("10");
        assert_eq!(long.value, WordLength::default());
        assert_eq!(long.warning, Some(Warning::LengthTooLong));

        let short = WordLength::from_input("2");
        assert_eq!(short.value.get(), 5);
        assert_eq!(short.warning, Some(Warning::LengthTooShort));

        let nan = WordLength::from_input("five");
        assert_eq!(nan.value.get(), 5);
        assert_eq!(nan.warning, Some(Warning::NotANumber));
    }

    #[test]
    fn warnings_read_like_alerts() {
        assert_eq!(
            Warning::LengthTooLong.to_string(),
            "Word length cannot be greater than 9."
        );
        assert_eq!(
            Warning::LengthTooShort.to_string(),
            "Word length cannot be less than 3."
        );
    }
}
