//! Lexer configuration files.
//!
//! A configuration is a JSON object:
//!
//! ```json
//! {
//!     "dialect": "vba",
//!     "keywords": { "constants": "vbCrLf vbTab MY_LIMIT" }
//! }
//! ```
//!
//! Every field is optional. A category listed under `keywords` replaces the
//! built-in list for that category; the other categories keep their defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vb_lexer_core::Dialect;

use crate::keywords::{KeywordCategory, KeywordList, KeywordLists};

/// Errors from [`LexerConfig::load`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Dialect and keyword overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    pub dialect: Dialect,
    /// Whitespace-separated words per category.
    pub keywords: BTreeMap<KeywordCategory, String>,
}

impl LexerConfig {
    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The built-in lists with this configuration's overrides applied.
    pub fn keyword_lists(&self) -> KeywordLists {
        let mut lists = KeywordLists::vb_defaults();
        for (&category, words) in &self.keywords {
            lists.set(category, KeywordList::from_words(words));
        }
        lists
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
