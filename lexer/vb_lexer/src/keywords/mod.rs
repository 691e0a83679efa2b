//! Keyword categories and their word lists.
//!
//! Classification consults six independent lists. Each list is a set of
//! lowercase words; lookups are made with the already-lowercased token
//! text, so matching is case-insensitive.
//!
//! Preprocessor words are stored without their leading `#`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

mod defaults;

/// Which list a word is looked up in.
///
/// Configuration files name each category by its serde name (`"types"`,
/// `"constants"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeywordCategory {
    /// Statements and declarations (`Dim`, `If`, `End`, `Sub`, ...).
    #[serde(rename = "keywords")]
    Keywords,
    /// Built-in type names (`Integer`, `String`, ...).
    #[serde(rename = "types")]
    TypeKeywords,
    /// Contextual and secondary keywords, and member-access keywords.
    #[serde(rename = "context")]
    ContextKeywords,
    /// Directive names after `#` (`If`, `Region`, `Const`, ...).
    #[serde(rename = "preprocessor")]
    Preprocessor,
    /// Attribute names.
    #[serde(rename = "attributes")]
    Attributes,
    /// Named constants (`vbCrLf`, `True`, ...).
    #[serde(rename = "constants")]
    Constants,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 6] = [
        KeywordCategory::Keywords,
        KeywordCategory::TypeKeywords,
        KeywordCategory::ContextKeywords,
        KeywordCategory::Preprocessor,
        KeywordCategory::Attributes,
        KeywordCategory::Constants,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// One case-insensitive word list.
#[derive(Clone, Debug, Default)]
pub struct KeywordList {
    words: FxHashSet<Box<str>>,
}

impl KeywordList {
    /// Build from whitespace-separated words.
    pub fn from_words(words: &str) -> Self {
        let mut list = Self::default();
        list.extend_words(words);
        list
    }

    pub fn extend_words(&mut self, words: &str) {
        self.words.extend(
            words
                .split_ascii_whitespace()
                .map(|w| w.to_ascii_lowercase().into_boxed_str()),
        );
    }

    /// `word` must already be lowercase.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The six lists, addressed by [`KeywordCategory`].
#[derive(Clone, Debug, Default)]
pub struct KeywordLists {
    lists: [KeywordList; 6],
}

impl KeywordLists {
    /// Built-in word lists covering VB.NET, VBA and VBScript.
    pub fn vb_defaults() -> Self {
        let mut lists = Self::default();
        for (category, words) in defaults::DEFAULT_WORDS {
            lists.set(category, KeywordList::from_words(words));
        }
        lists
    }

    pub fn get(&self, category: KeywordCategory) -> &KeywordList {
        &self.lists[category.index()]
    }

    pub fn set(&mut self, category: KeywordCategory, list: KeywordList) {
        self.lists[category.index()] = list;
    }

    #[inline]
    pub fn in_list(&self, category: KeywordCategory, word: &str) -> bool {
        self.get(category).contains(word)
    }
}
