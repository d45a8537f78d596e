//! Number trivia, served as plain text.
//!
//! `GET {base}/{n}` answers with one sentence such as
//! `"42 is the answer to the Ultimate Question of Life, the Universe, and Everything."`.

use url::Url;

use crate::{error::Result, http::Client};

/// Shown instead of trivia when it cannot be fetched.
pub const FALLBACK: &str = "Sorry, we couldn't fetch the trivia.";

/// Builds the trivia URL for `n`.
///
/// # Errors
///
/// Will return `Err` if `base` cannot be a base URL.
pub fn url(base: &Url, n: i64) -> Result<Url> {
    super::with_segment(base, &n.to_string())
}

/// Fetches the trivia sentence for `n`.
///
/// # Errors
///
/// Will return `Err` on network failure or a non-success status.
pub async fn fetch(client: &Client, base: &Url, n: i64) -> Result<String> {
    let url = url(base, n)?;
    client.text(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_numbers_become_segments() {
        let base = Url::parse("http://numbersapi.com").unwrap();
        assert_eq!(url(&base, -3).unwrap().as_str(), "http://numbersapi.com/-3");
    }
}
