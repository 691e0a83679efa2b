//! Building blocks for the Visual Basic editor lexer.
//!
//! This crate has no dependency on the tokenizer itself. It defines the
//! vocabulary shared between the lexer and its host editor:
//!
//! - [`Style`]: the lexical state assigned to each byte
//! - [`LineState`]: the decoded per-line integer that makes scans resumable
//! - [`FoldLevel`]: the packed per-line fold level
//! - [`LexAccessor`]: how the lexer reads and writes host storage, with the
//!   in-memory [`Document`] implementation
//! - [`StyleContext`]: the byte cursor that colours as it scans
//! - [`Dialect`] and the byte classifiers in [`char_class`]

pub mod char_class;
mod dialect;
mod document;
mod fold_level;
mod line_state;
mod style;
mod style_context;

pub use dialect::{Dialect, UnknownDialect};
pub use document::{Document, LexAccessor, StyleSpan};
pub use fold_level::FoldLevel;
pub use line_state::{LineFlags, LineState, LineType};
pub use style::Style;
pub use style_context::{StyleContext, MAX_WORD_LEN};
