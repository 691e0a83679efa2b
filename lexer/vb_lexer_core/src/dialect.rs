//! Visual Basic dialect selector.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which member of the Visual Basic family is being scanned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    VbNet,
    Vba,
    VbScript,
}

/// Returned by [`Dialect::from_str`] for an unrecognised name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dialect '{0}' (expected vbnet, vba or vbscript)")]
pub struct UnknownDialect(pub String);

impl Dialect {
    /// Identifiers may end with a type character (`name$`, `count%`).
    pub const fn allows_type_characters(self) -> bool {
        !matches!(self, Dialect::VbScript)
    }

    /// String literals may span line breaks (VB.NET 14 and later).
    pub const fn allows_multiline_strings(self) -> bool {
        matches!(self, Dialect::VbNet)
    }

    /// `$"..."` interpolated strings.
    pub const fn allows_interpolation(self) -> bool {
        matches!(self, Dialect::VbNet)
    }

    /// A trailing ` _` continues a comment onto the next line.
    pub const fn continues_comments(self) -> bool {
        matches!(self, Dialect::Vba)
    }

    /// `#If`/`#Const`/`#Region` directives are looked up in the preprocessor list.
    pub const fn has_preprocessor(self) -> bool {
        !matches!(self, Dialect::VbScript)
    }

    /// Only VB.NET has the `If(cond, a, b)` operator.
    pub const fn has_if_operator(self) -> bool {
        matches!(self, Dialect::VbNet)
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vbnet" | "vb.net" | "vb" => Ok(Dialect::VbNet),
            "vba" | "vb6" => Ok(Dialect::Vba),
            "vbscript" | "vbs" => Ok(Dialect::VbScript),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Dialect::VbNet => "vbnet",
            Dialect::Vba => "vba",
            Dialect::VbScript => "vbscript",
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("VBNet".parse::<Dialect>(), Ok(Dialect::VbNet));
        assert_eq!("vb6".parse::<Dialect>(), Ok(Dialect::Vba));
        assert_eq!("VBS".parse::<Dialect>(), Ok(Dialect::VbScript));
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "cobol".parse::<Dialect>().unwrap_err();
        assert_eq!(err, UnknownDialect("cobol".to_string()));
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn capabilities_follow_dialect() {
        assert!(Dialect::VbNet.allows_interpolation());
        assert!(!Dialect::Vba.allows_interpolation());
        assert!(Dialect::Vba.continues_comments());
        assert!(!Dialect::VbScript.allows_type_characters());
        assert!(!Dialect::VbScript.has_preprocessor());
        assert!(Dialect::VbNet.allows_multiline_strings());
        assert!(!Dialect::VbScript.allows_multiline_strings());
    }
}
