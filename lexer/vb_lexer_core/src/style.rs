//! Lexical styles assigned to each byte of a Visual Basic document.
//!
//! The discriminants are stable and persisted by hosts alongside the text,
//! so they must never be reordered. Everything up to and including
//! [`Style::LineContinuation`] is "space equivalent": the tokenizer treats
//! those spans like whitespace when it looks back for the previous
//! significant character.

/// Classification tag for a span of source bytes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Style {
    #[default]
    Default = 0,
    CommentLine = 1,
    LineContinuation = 2,
    Number = 3,
    Keyword = 4,
    String = 5,
    Preprocessor = 6,
    Operator = 7,
    Identifier = 8,
    Date = 9,
    Keyword2 = 10,
    Keyword3 = 11,
    Attribute = 12,
    Constant = 13,
    FunctionDefinition = 14,
    Label = 15,
    FileNumber = 16,
    InterpolatedString = 17,
    /// Operator inside an interpolated-string expression, including the
    /// `{` and `}` delimiting the expression.
    Operator2 = 18,
    FormatSpecifier = 19,
}

impl Style {
    /// Every style, in discriminant order.
    pub const ALL: [Style; 20] = [
        Style::Default,
        Style::CommentLine,
        Style::LineContinuation,
        Style::Number,
        Style::Keyword,
        Style::String,
        Style::Preprocessor,
        Style::Operator,
        Style::Identifier,
        Style::Date,
        Style::Keyword2,
        Style::Keyword3,
        Style::Attribute,
        Style::Constant,
        Style::FunctionDefinition,
        Style::Label,
        Style::FileNumber,
        Style::InterpolatedString,
        Style::Operator2,
        Style::FormatSpecifier,
    ];

    /// Whitespace, comments and line continuations.
    #[inline]
    pub const fn is_space_equiv(self) -> bool {
        self as u8 <= Style::LineContinuation as u8
    }

    /// Decode a persisted style byte. Unknown values map to `Default`.
    pub fn from_u8(raw: u8) -> Self {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .unwrap_or(Style::Default)
    }

    /// Short display name used by the CLI dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::CommentLine => "comment",
            Style::LineContinuation => "continuation",
            Style::Number => "number",
            Style::Keyword => "keyword",
            Style::String => "string",
            Style::Preprocessor => "preprocessor",
            Style::Operator => "operator",
            Style::Identifier => "identifier",
            Style::Date => "date",
            Style::Keyword2 => "keyword2",
            Style::Keyword3 => "keyword3",
            Style::Attribute => "attribute",
            Style::Constant => "constant",
            Style::FunctionDefinition => "function",
            Style::Label => "label",
            Style::FileNumber => "file-number",
            Style::InterpolatedString => "interpolated",
            Style::Operator2 => "operator2",
            Style::FormatSpecifier => "format",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
