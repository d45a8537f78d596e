//! Runtime configuration.
//!
//! Settings come from an optional TOML file (see `genum.toml.example`) with
//! every field defaulted, so a missing file or an empty one yields the
//! public endpoints and a 1.5 second copy reset.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Public endpoint used for number trivia.
pub const TRIVIA_URL: &str = "http://numbersapi.com";

/// Public endpoint used to draw a random word.
pub const RANDOM_WORD_URL: &str = "https://random-word-api.vercel.app/api";

/// Public endpoint used to look up English definitions.
pub const DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Page that shows a fuller dictionary entry for a word.
pub const WORDNIK_URL: &str = "https://www.wordnik.com/words";

/// Endpoints consulted by the generators.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub trivia: Url,
    pub random_word: Url,
    pub dictionary: Url,
    pub wordnik: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        // Constants above are known-good.
        let parse = |url: &str| Url::parse(url).expect("invalid built-in endpoint");

        Self {
            trivia: parse(TRIVIA_URL),
            random_word: parse(RANDOM_WORD_URL),
            dictionary: parse(DICTIONARY_URL),
            wordnik: parse(WORDNIK_URL),
        }
    }
}

/// Contents of the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub endpoints: Endpoints,

    /// Upper bound on a single request, in seconds.
    pub request_timeout_secs: u64,

    /// Delay before the copy icon reverts, in milliseconds.
    pub copy_reset_ms: u64,

    /// Prefix definitions with their part of speech, like `(noun) ...`.
    pub part_of_speech: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout_secs: 10,
            copy_reset_ms: 1500,
            part_of_speech: true,
        }
    }
}

impl Settings {
    /// Configuration files should be small.
    const MAX_FILE_SIZE: u64 = 64 * 1024;

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be read, is unreasonably large,
    /// or is not valid TOML for these settings.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file_size = fs::metadata(path)?.len();
        if file_size > Self::MAX_FILE_SIZE {
            return Err(Error::invalid_argument(format!(
                "{} is too large",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        contents.parse()
    }
}

impl std::str::FromStr for Settings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(Into::into)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub app_lang: String,

    pub user_agent: String,

    pub endpoints: Endpoints,
    pub request_timeout: Duration,
    pub copy_reset: Duration,
    pub part_of_speech: bool,
}

impl Config {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let app_name = env!("CARGO_PKG_NAME").to_owned();
        let app_version = env!("CARGO_PKG_VERSION").to_owned();
        let app_lang = "en".to_owned();

        let os_name = match std::env::consts::OS {
            "macos" => "osx",
            other => other,
        };
        let os_version = sysinfo::System::os_version()
            .filter(|version| !version.contains(['/', ';']))
            .unwrap_or_else(|| String::from("0"));

        let user_agent =
            format!("{app_name}/{app_version} (Rust; {os_name}/{os_version}; Terminal; {app_lang})");
        trace!("user agent: {user_agent}");

        Self {
            app_name,
            app_version,
            app_lang,

            user_agent,

            endpoints: settings.endpoints,
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            copy_reset: Duration::from_millis(settings.copy_reset_ms),
            part_of_speech: settings.part_of_speech,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings: Settings = "".parse().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.copy_reset_ms, 1500);
        assert!(settings.part_of_speech);
        assert_eq!(settings.endpoints.trivia.as_str(), "http://numbersapi.com/");
    }

    #[test]
    fn partial_file_overrides_fields() {
        let settings: Settings = r#"
            part_of_speech = false
            copy_reset_ms = 500

            [endpoints]
            trivia = "http://127.0.0.1:8080/"
        "#
        .parse()
        .unwrap();

        assert!(!settings.part_of_speech);
        assert_eq!(settings.copy_reset_ms, 500);
        assert_eq!(settings.endpoints.trivia.as_str(), "http://127.0.0.1:8080/");
        assert_eq!(settings.endpoints.dictionary.as_str(), DICTIONARY_URL);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!("rate_limit = 5".parse::<Settings>().is_err());
    }

    #[test]
    fn user_agent_names_the_app() {
        let config = Config::default();
        assert!(config.user_agent.starts_with("genum/"));
        assert_eq!(config.copy_reset, Duration::from_millis(1500));
    }
}
