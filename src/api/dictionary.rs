//! English dictionary entries.
//!
//! `GET {base}/{word}` answers with an array of entries:
//!
//! ```json
//! [{
//!     "word": "dog",
//!     "meanings": [{
//!         "partOfSpeech": "noun",
//!         "definitions": [{ "definition": "a domesticated carnivorous mammal" }]
//!     }]
//! }]
//! ```
//!
//! Unknown words answer with `404 Not Found` and an object body.

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::{
    error::{Error, Result},
    http::Client,
};

/// Shown instead of a definition when it cannot be fetched.
pub const FALLBACK: &str = "Sorry, we couldn't fetch the definition.";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Definition {
    pub definition: String,
}

/// The first definition of the first meaning of the first entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sense {
    pub part_of_speech: String,
    pub definition: String,
}

impl Sense {
    /// Picks the first sense out of `entries`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if there is no entry, the entry has no meaning, or
    /// the meaning has no definition.
    pub fn first(entries: &[Entry]) -> Result<Self> {
        let meaning = entries
            .first()
            .and_then(|entry| entry.meanings.first())
            .ok_or_else(|| Error::not_found("no meaning in dictionary entry"))?;
        let definition = meaning
            .definitions
            .first()
            .ok_or_else(|| Error::not_found("no definition in dictionary entry"))?;

        Ok(Self {
            part_of_speech: meaning.part_of_speech.clone(),
            definition: definition.definition.clone(),
        })
    }

    /// Formats the sense for display, with or without the part of speech.
    #[must_use]
    pub fn describe(&self, part_of_speech: bool) -> String {
        if part_of_speech {
            self.to_string()
        } else {
            self.definition.clone()
        }
    }
}

/// Formats like `(noun) a domesticated carnivorous mammal`.
impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.part_of_speech, self.definition)
    }
}

/// Upper-cases the first character of `word`.
#[must_use]
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds the lookup URL for `word`.
///
/// # Errors
///
/// Will return `Err` if `base` cannot be a base URL.
pub fn url(base: &Url, word: &str) -> Result<Url> {
    super::with_segment(base, word)
}

/// Looks up the first sense of `word`.
///
/// # Errors
///
/// Will return `Err` on network failure, a non-success status (including
/// unknown words), malformed JSON, or an entry without a definition.
pub async fn lookup(client: &Client, base: &Url, word: &str) -> Result<Sense> {
    let entries: Vec<Entry> = client.json(url(base, word)?).await?;
    Sense::first(&entries)
}

/// Builds the Wordnik page URL for `word`.
///
/// # Errors
///
/// Will return `Err` if `base` cannot be a base URL.
pub fn wordnik_url(base: &Url, word: &str) -> Result<Url> {
    super::with_segment(base, word)
}
