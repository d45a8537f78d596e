//! Clients for the public APIs that feed the generators.
//!
//! * [`trivia`]: a plain-text fact about a number
//! * [`random_word`]: one random English word of a given length
//! * [`dictionary`]: definitions and part of speech of a word
//!
//! Each module exposes its fallback message next to its fetch function. The
//! fetch functions themselves return errors; substituting the fallback is up
//! to the caller (see [`crate::pipeline`]).

pub mod dictionary;
pub mod random_word;
pub mod trivia;

use url::Url;

use crate::error::{Error, Result};

/// Appends one path segment to `base`, percent-encoding it as needed.
///
/// A trailing slash on `base` does not produce an empty segment.
///
/// # Errors
///
/// Will return `Err` if `base` cannot have path segments, like `mailto:`.
pub(crate) fn with_segment(base: &Url, segment: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::invalid_argument(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_join_without_double_slashes() {
        let base = Url::parse("http://numbersapi.com").unwrap();
        assert_eq!(with_segment(&base, "42").unwrap().as_str(), "http://numbersapi.com/42");

        let base = Url::parse("https://api.dictionaryapi.dev/api/v2/entries/en/").unwrap();
        assert_eq!(
            with_segment(&base, "Dog").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/Dog"
        );
    }

    #[test]
    fn segments_are_encoded() {
        let base = Url::parse("https://www.wordnik.com/words").unwrap();
        assert_eq!(
            with_segment(&base, "a/b c").unwrap().as_str(),
            "https://www.wordnik.com/words/a%2Fb%20c"
        );
    }

    #[test]
    fn opaque_bases_are_rejected() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(with_segment(&base, "42").is_err());
    }
}
