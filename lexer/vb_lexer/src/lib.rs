//! Incremental editor lexer for Visual Basic (VB.NET, VBA, VBScript).
//!
//! Two passes run over a host document through [`LexAccessor`]:
//!
//! 1. [`tokenize`] assigns a [`Style`] to every byte of a range and stores a
//!    [`LineState`](vb_lexer_core::LineState) for every line it finishes.
//! 2. [`fold`] reads those styles and line states back and stores a packed
//!    [`FoldLevel`](vb_lexer_core::FoldLevel) per line.
//!
//! Both passes may start at any line start; the stored per-line integers
//! carry everything needed to resume. [`VbLexer`] bundles a dialect with its
//! keyword lists for hosts that do not need the free functions.

pub mod backtrack;
pub mod config;
mod folder;
pub mod keywords;
mod property;
mod tokenizer;

use std::ops::Range;

pub use config::{ConfigError, LexerConfig};
pub use folder::fold;
pub use keywords::{KeywordCategory, KeywordList, KeywordLists};
pub use property::{classify_property, PropertyForm};
pub use tokenizer::tokenize;
pub use vb_lexer_core::{Dialect, Document, LexAccessor, Style};

/// A dialect together with the keyword lists used to classify words.
#[derive(Clone, Debug)]
pub struct VbLexer {
    dialect: Dialect,
    keywords: KeywordLists,
}

impl Default for VbLexer {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl VbLexer {
    /// Lexer for `dialect` with the built-in keyword lists.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_keywords(dialect, KeywordLists::vb_defaults())
    }

    pub fn with_keywords(dialect: Dialect, keywords: KeywordLists) -> Self {
        Self { dialect, keywords }
    }

    pub fn from_config(config: &LexerConfig) -> Self {
        Self::with_keywords(config.dialect, config.keyword_lists())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn keywords(&self) -> &KeywordLists {
        &self.keywords
    }

    /// Style `len` bytes from `start`. Returns the range actually styled.
    pub fn colourise<A: LexAccessor + ?Sized>(
        &self,
        doc: &mut A,
        start: usize,
        len: usize,
        init_style: Style,
    ) -> Range<usize> {
        tokenize(doc, start, len, init_style, &self.keywords, self.dialect)
    }

    /// Fold the lines covered by `len` bytes from `start`.
    pub fn fold<A: LexAccessor + ?Sized>(
        &self,
        doc: &mut A,
        start: usize,
        len: usize,
        init_style: Style,
    ) {
        fold(doc, start, len, init_style);
    }

    /// Style a whole document from scratch.
    pub fn colourise_all<A: LexAccessor + ?Sized>(&self, doc: &mut A) {
        let len = doc.len();
        self.colourise(doc, 0, len, Style::Default);
    }

    /// Fold a whole, already styled document.
    pub fn fold_all<A: LexAccessor + ?Sized>(&self, doc: &mut A) {
        let len = doc.len();
        self.fold(doc, 0, len, Style::Default);
    }
}
