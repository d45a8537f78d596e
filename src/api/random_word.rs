//! Random words of a requested length.
//!
//! `GET {base}?words=1&length={n}` answers with a JSON array holding exactly
//! one word, like `["crane"]`.

use url::Url;

use crate::{
    error::{Error, Result},
    http::Client,
    options::WordLength,
};

/// Builds the request URL for one word of `length` letters.
#[must_use]
pub fn url(base: &Url, length: WordLength) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("words", "1")
        .append_pair("length", &length.to_string());
    url
}

/// Fetches one random word.
///
/// # Errors
///
/// Will return `Err` on network failure, a non-success status, a body that
/// is not a JSON array of strings, or an empty array.
pub async fn fetch(client: &Client, base: &Url, length: WordLength) -> Result<String> {
    let words: Vec<String> = client.json(url(base, length)).await?;
    words
        .into_iter()
        .next()
        .ok_or_else(|| Error::not_found("no word in response"))
}
