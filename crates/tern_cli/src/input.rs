//! Reading sources and options from disk.

use std::path::Path;

use tern_parser::{ParseOptions, TextChangeRange, TextSpan};

use crate::error::{CliError, Result};

/// Read `path` as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if let Err(error) = simdutf8::compat::from_utf8(&bytes) {
        return Err(CliError::InvalidUtf8 {
            path: path.to_path_buf(),
            valid_up_to: error.valid_up_to(),
        });
    }
    // SAFETY: `bytes` was validated as UTF-8 above.
    Ok(unsafe { String::from_utf8_unchecked(bytes) })
}

/// Options from an optional JSON file. Command-line flags are applied by
/// the caller on top.
pub fn load_options(config: Option<&Path>) -> Result<ParseOptions> {
    let Some(path) = config else {
        return Ok(ParseOptions::default());
    };
    let text = read_source(path)?;
    parse_options(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_options(text: &str) -> std::result::Result<ParseOptions, serde_json::Error> {
    serde_json::from_str(text)
}

/// Replace `delete` chars at `start` with `insert`, in chars as the parser
/// counts them.
pub fn apply_edit(
    path: &Path,
    text: &str,
    start: usize,
    delete: usize,
    insert: &str,
) -> Result<(String, TextChangeRange)> {
    let chars: Vec<char> = text.chars().collect();
    let out_of_range = || CliError::EditOutOfRange {
        path: path.to_path_buf(),
        start,
        delete,
        len: chars.len(),
    };
    let end = start.checked_add(delete).ok_or_else(out_of_range)?;
    if end > chars.len() {
        return Err(out_of_range());
    }
    let mut new_text: String = chars[..start].iter().collect();
    new_text.push_str(insert);
    new_text.extend(&chars[end..]);
    let change = TextChangeRange::new(
        TextSpan::new(start as u32, delete as u32),
        insert.chars().count() as u32,
    );
    Ok((new_text, change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tern_parser::{ScriptKind, SourceType};

    #[test]
    fn test_options_json() {
        let options = parse_options(r#"{ "scriptKind": "TSX", "sourceType": "module" }"#).unwrap();
        assert_eq!(options.script_kind, ScriptKind::TSX);
        assert_eq!(options.source_type, SourceType::Module);
        assert!(parse_options(r#"{ "sourceType": 3 }"#).is_err());
    }

    #[test]
    fn test_apply_edit_counts_chars() {
        let path = Path::new("a.ts");
        let (text, change) = apply_edit(path, "let é = 1;", 4, 1, "ee").unwrap();
        assert_eq!(text, "let ee = 1;");
        assert_eq!(change.span, TextSpan::new(4, 1));
        assert_eq!(change.new_length, 2);
    }

    #[test]
    fn test_apply_edit_rejects_out_of_range() {
        let path = Path::new("a.ts");
        assert!(matches!(
            apply_edit(path, "abc", 2, 5, ""),
            Err(CliError::EditOutOfRange { len: 3, .. })
        ));
        assert!(apply_edit(path, "abc", 3, 0, "d").is_ok());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let error = read_source(Path::new("/nonexistent/tern/input.ts")).unwrap_err();
        assert!(matches!(error, CliError::Io { .. }));
    }
}
