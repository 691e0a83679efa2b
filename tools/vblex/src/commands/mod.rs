//! Command handlers for the `vblex` CLI.
//!
//! Each submodule implements one command. Option parsing, file reading and
//! tracing setup are shared and live here.

use vb_lexer::{Dialect, Document, LexerConfig, VbLexer};

mod fold;
mod lex;

pub use fold::fold_file;
pub use lex::lex_file;

/// Options shared by `lex` and `fold`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LexOptions {
    pub path: String,
    /// Overrides the dialect named in the config file.
    pub dialect: Option<Dialect>,
    pub config: Option<String>,
}

/// Parse `<file> [--dialect=<name>] [--config=<path>]`.
pub fn parse_options(args: &[String]) -> Result<LexOptions, String> {
    let mut options = LexOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(name) = arg.strip_prefix("--dialect=") {
            options.dialect = Some(name.parse::<Dialect>().map_err(|e| e.to_string())?);
        } else if let Some(config) = arg.strip_prefix("--config=") {
            options.config = Some(config.to_string());
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    options.path = path.ok_or_else(|| "missing file path".to_string())?;
    Ok(options)
}

/// Build the lexer described by `options`, exiting on a bad config file.
pub(super) fn build_lexer(options: &LexOptions) -> VbLexer {
    let mut config = match &options.config {
        Some(path) => match LexerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => LexerConfig::default(),
    };
    if let Some(dialect) = options.dialect {
        config.dialect = dialect;
    }
    VbLexer::from_config(&config)
}

/// Read, style and fold the file named in `options`.
pub(super) fn lex_document(options: &LexOptions) -> Document {
    let lexer = build_lexer(options);
    let mut doc = Document::new(read_file(&options.path));
    lexer.colourise_all(&mut doc);
    lexer.fold_all(&mut doc);
    doc
}

/// Read a file as raw bytes, exiting with a readable message on failure.
///
/// Legacy VBA and VBScript sources are often not UTF-8, so no decoding
/// happens here.
pub(super) fn read_file(path: &str) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Install a `fmt` subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn path_only() {
        let options = parse_options(&args(&["Module1.bas"])).unwrap();
        assert_eq!(
            options,
            LexOptions {
                path: "Module1.bas".to_string(),
                ..LexOptions::default()
            }
        );
    }

    #[test]
    fn options_in_any_order() {
        let options =
            parse_options(&args(&["--config=vb.json", "a.vbs", "--dialect=VBScript"])).unwrap();
        assert_eq!(options.path, "a.vbs");
        assert_eq!(options.dialect, Some(Dialect::VbScript));
        assert_eq!(options.config.as_deref(), Some("vb.json"));
    }

    #[test]
    fn bad_dialect_is_reported() {
        let err = parse_options(&args(&["a.bas", "--dialect=cobol"])).unwrap_err();
        assert!(err.contains("cobol"), "{err}");
    }

    #[test]
    fn missing_path_and_extra_arguments() {
        assert_eq!(
            parse_options(&args(&["--dialect=vba"])).unwrap_err(),
            "missing file path"
        );
        assert!(parse_options(&args(&["a.bas", "b.bas"])).is_err());
        assert!(parse_options(&args(&["a.bas", "--verbose"])).is_err());
    }

    #[test]
    fn dialect_flag_overrides_config() {
        let options = LexOptions {
            path: String::new(),
            dialect: Some(Dialect::Vba),
            config: None,
        };
        assert_eq!(build_lexer(&options).dialect(), Dialect::Vba);
        assert_eq!(
            build_lexer(&LexOptions::default()).dialect(),
            Dialect::VbNet
        );
    }
}
