//! Scanner integration tests.
//!
//! Token streams, positions and error reports for whole snippets.

use tern_ast::{LanguageVariant, SyntaxKind, TokenFlags};
use tern_scanner::{leading_comment_ranges, Scanner};

/// Helper: scan all tokens from source and return as (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
    tokens
}

fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: (full_start, token_start, token_end) of every token, EOF included.
fn scan_positions(source: &str) -> Vec<(usize, usize, usize)> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        out.push((scanner.full_start(), scanner.token_start(), scanner.token_end()));
        if kind == SyntaxKind::EndOfFileToken {
            return out;
        }
    }
}

fn error_codes(source: &str) -> Vec<u32> {
    let mut scanner = Scanner::new(source);
    let mut codes = Vec::new();
    while scanner.scan() != SyntaxKind::EndOfFileToken {
        codes.extend(scanner.take_errors().iter().map(|e| e.message.code));
    }
    codes.extend(scanner.take_errors().iter().map(|e| e.message.code));
    codes
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
    assert_eq!(scan_positions(""), vec![(0, 0, 0)]);
}

#[test]
fn test_whitespace_only() {
    assert!(scan_all("   \n\t  ").is_empty());
    assert_eq!(scan_positions("  \n "), vec![(0, 4, 4)]);
}

#[test]
fn test_positions_cover_text() {
    // every char belongs to exactly one token's [full_start, end)
    let source = "let  x /* c */ = 1 ;\n";
    let positions = scan_positions(source);
    let mut expected_start = 0;
    for (full_start, token_start, end) in &positions {
        assert_eq!(*full_start, expected_start);
        assert!(token_start >= full_start);
        assert!(end >= token_start);
        expected_start = *end;
    }
    assert_eq!(expected_start, source.chars().count());
}

#[test]
fn test_keywords() {
    assert_eq!(
        scan_kinds("const let var function class interface type enum"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::LetKeyword,
            SyntaxKind::VarKeyword,
            SyntaxKind::FunctionKeyword,
            SyntaxKind::ClassKeyword,
            SyntaxKind::InterfaceKeyword,
            SyntaxKind::TypeKeyword,
            SyntaxKind::EnumKeyword,
        ]
    );
}

#[test]
fn test_contextual_keywords_are_identifier_like() {
    let mut scanner = Scanner::new("async of satisfies");
    for expected in [SyntaxKind::AsyncKeyword, SyntaxKind::OfKeyword, SyntaxKind::SatisfiesKeyword] {
        assert_eq!(scanner.scan(), expected);
        assert!(scanner.is_identifier());
        assert!(!scanner.is_reserved_word());
    }
}

#[test]
fn test_non_ascii_identifiers() {
    let tokens = scan_all("café π_2");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], (SyntaxKind::Identifier, "café".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::Identifier, "π_2".to_string()));

    // positions are counted in chars
    assert_eq!(scan_positions("é x")[1], (1, 2, 3));
}

#[test]
fn test_optional_chaining_vs_conditional_number() {
    assert_eq!(
        scan_kinds("a?.b"),
        vec![SyntaxKind::Identifier, SyntaxKind::QuestionDotToken, SyntaxKind::Identifier]
    );
    // `?.5` is a conditional followed by a number
    assert_eq!(
        scan_kinds("a?.5:1"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral,
        ]
    );
}

#[test]
fn test_greater_than_is_never_combined_by_scan() {
    assert_eq!(
        scan_kinds("a >> b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_less_than_slash_only_in_jsx() {
    let mut scanner = Scanner::new("</");
    assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);

    let mut scanner = Scanner::new("</");
    scanner.set_language_variant(LanguageVariant::Jsx);
    assert_eq!(scanner.scan(), SyntaxKind::LessThanSlashToken);
}

#[test]
fn test_template_without_substitution() {
    let tokens = scan_all("`line1\r\nline2`");
    assert_eq!(tokens, vec![(SyntaxKind::NoSubstitutionTemplateLiteral, "line1\nline2".to_string())]);
}

#[test]
fn test_unterminated_template() {
    assert_eq!(error_codes("`abc"), vec![1160]);
}

#[test]
fn test_invalid_character() {
    let mut scanner = Scanner::new("a ¤ b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    let errors = scanner.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message.code, 1127);
    assert_eq!((errors[0].pos, errors[0].length), (2, 1));
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_lone_hash_is_private_identifier_with_error() {
    let mut scanner = Scanner::new("# x");
    assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
    assert_eq!(scanner.token_value(), "#");
    assert_eq!(scanner.take_errors()[0].message.code, 1127);
}

#[test]
fn test_misplaced_shebang() {
    assert_eq!(error_codes("x\n#!foo"), vec![18026]);
}

#[test]
fn test_hex_digit_errors() {
    assert_eq!(error_codes("0x"), vec![1125]);
    assert_eq!(error_codes("'\\xZZ'"), vec![1125]);
    assert_eq!(error_codes("'\\u{41'"), vec![1199]);
}

#[test]
fn test_bigint_fraction_error() {
    assert_eq!(error_codes("1.5n"), vec![1353]);
}

#[test]
fn test_exponent_requires_digits() {
    assert_eq!(error_codes("1e"), vec![1124]);
    assert_eq!(scan_all("2E-3"), vec![(SyntaxKind::NumericLiteral, "2e-3".to_string())]);
}

#[test]
fn test_numeric_literal_flags() {
    let mut scanner = Scanner::new("0x1F 1e3 1_0 017");
    scanner.scan();
    assert!(scanner.token_flags().contains(TokenFlags::HEX_SPECIFIER));
    scanner.scan();
    assert!(scanner.token_flags().contains(TokenFlags::SCIENTIFIC));
    scanner.scan();
    assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
    scanner.scan();
    assert!(scanner.token_flags().contains(TokenFlags::OCTAL));
}

#[test]
fn test_line_continuation_in_string() {
    let tokens = scan_all("'a\\\nb'");
    assert_eq!(tokens, vec![(SyntaxKind::StringLiteral, "ab".to_string())]);
}

#[test]
fn test_tagged_template_invalid_escape_is_silent() {
    let mut scanner = Scanner::new("`\\unicode`");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.has_errors());

    scanner.take_errors();
    assert_eq!(scanner.rescan_template_token(true), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(!scanner.has_errors());
    assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_INVALID_ESCAPE));
}

#[test]
fn test_unterminated_regex() {
    let mut scanner = Scanner::new("/abc\n");
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert!(scanner.is_unterminated());
    assert_eq!(scanner.take_errors()[0].message.code, 1161);
}

#[test]
fn test_jsx_text_errors_on_stray_brace() {
    let mut scanner = Scanner::new("a } b<");
    scanner.set_language_variant(LanguageVariant::Jsx);
    assert_eq!(scanner.scan_jsx_token(true), SyntaxKind::JsxText);
    assert_eq!(scanner.token_value(), "a } b");
    assert_eq!(scanner.take_errors()[0].message.code, 1381);
}

#[test]
fn test_jsx_attribute_string_keeps_backslashes() {
    let mut scanner = Scanner::new(r#""a\nb""#);
    assert_eq!(scanner.scan_jsx_attribute_value(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), r"a\nb");
}

#[test]
fn test_comment_ranges_agree_with_scanner_trivia() {
    let source = "/** doc */\nfunction f() {}";
    let chars: Vec<char> = source.chars().collect();
    let mut scanner = Scanner::new(source);
    assert_eq!(scanner.scan(), SyntaxKind::FunctionKeyword);
    let ranges = leading_comment_ranges(&chars, scanner.full_start());
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].end as usize, 10);
    assert!(ranges[0].has_trailing_new_line);
}
