//! Descriptive feature cards shown by the `features` command.
//!
//! Each widget ships a JSON description of its features:
//!
//! ```json
//! { "contents": [{ "header": { "icon": "...", "title": "..." }, "description": "..." }] }
//! ```

use std::{fmt, fs, path::Path};

use serde::Deserialize;

use crate::{error::Result, session::Widget};

const NUMBER_FEATURES: &str = include_str!("../assets/number-features.json");
const WORD_FEATURES: &str = include_str!("../assets/word-features.json");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Features {
    pub contents: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Card {
    pub header: Header,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Header {
    pub icon: String,
    pub title: String,
}

impl Features {
    /// The cards shipped with `widget`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the embedded JSON is malformed.
    pub fn builtin(widget: Widget) -> Result<Self> {
        let json = match widget {
            Widget::Number => NUMBER_FEATURES,
            Widget::Word => WORD_FEATURES,
        };
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Loads cards from a JSON file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be read or is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(Into::into)
    }
}

/// Formats like `Random: Every number ... likely to come up.`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.header.title, self.description)
    }
}
