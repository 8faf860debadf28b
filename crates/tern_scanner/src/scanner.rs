//! The tokenizer.
//!
//! Positions are char offsets into the text. The scanner never reports
//! errors directly: it queues [`ScanError`]s that the parser drains after
//! each token and turns into located diagnostics.

use tern_ast::{LanguageVariant, SyntaxKind, TokenFlags};
use tern_diagnostics::messages;
use tern_diagnostics::DiagnosticMessage;

use crate::char_codes::*;

const MERGE_CONFLICT_MARKER_LENGTH: usize = 7;

/// A malformed-token report, located in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub pos: u32,
    pub length: u32,
    pub message: &'static DiagnosticMessage,
}

/// Cursor state saved by [`Scanner::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
}

/// Converts source text into tokens on demand.
///
/// One scanner can be reused for many files with [`Scanner::set_text`],
/// but it drives only one parse at a time.
#[derive(Debug, Clone)]
pub struct Scanner {
    text: Vec<char>,
    /// Scanning stops here (exclusive).
    end: usize,
    pos: usize,
    /// Start of the current token including leading trivia.
    full_start: usize,
    /// Start of the current token after trivia.
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    language_variant: LanguageVariant,
    errors: Vec<ScanError>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            text: Vec::new(),
            end: 0,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            language_variant: LanguageVariant::Standard,
            errors: Vec::new(),
        }
    }
}

impl Scanner {
    /// Create a scanner over the whole of `text`.
    pub fn new(text: &str) -> Self {
        let mut scanner = Self::default();
        scanner.set_text(text, 0, None);
        scanner
    }

    /// Point the scanner at `length` chars of `text` starting at `start`
    /// (to the end when `length` is `None`). Buffers are reused.
    pub fn set_text(&mut self, text: &str, start: usize, length: Option<usize>) {
        self.text.clear();
        self.text.extend(text.chars());
        let len = self.text.len();
        let start = start.min(len);
        self.end = length.map_or(len, |l| (start + l).min(len));
        self.errors.clear();
        self.reset_token_state(start);
    }

    pub fn set_language_variant(&mut self, variant: LanguageVariant) {
        self.language_variant = variant;
    }

    pub fn language_variant(&self) -> LanguageVariant {
        self.language_variant
    }

    /// Put the cursor at `pos` with no current token. The next
    /// [`Scanner::scan`] starts there.
    pub fn reset_token_state(&mut self, pos: usize) {
        debug_assert!(pos <= self.text.len());
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    pub fn snapshot(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn rewind(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Cooked value of the current identifier, literal or template piece.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn full_start(&self) -> usize {
        self.full_start
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn text_end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn has_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNICODE_ESCAPE)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    /// Identifiers and every keyword that is not reserved.
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.token.is_identifier_like()
    }

    #[inline]
    pub fn is_reserved_word(&self) -> bool {
        self.token.is_reserved_word()
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> String {
        self.slice(self.token_start, self.pos)
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos < self.end {
            Some(self.text[pos])
        } else {
            None
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let e = end.min(self.text.len());
        let s = start.min(e);
        self.text[s..e].iter().collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take the queued scan errors.
    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[inline]
    fn current(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<char> {
        self.char_at(self.pos + offset)
    }

    fn error(&mut self, message: &'static DiagnosticMessage, pos: usize, length: usize) {
        self.errors.push(ScanError {
            pos: pos as u32,
            length: length as u32,
            message,
        });
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.current() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if ch == '#' && self.pos == 0 && self.peek(1) == Some('!') {
                self.skip_to_line_end();
                continue;
            }

            match ch {
                '\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += if self.peek(1) == Some('\n') { 2 } else { 1 };
                }
                '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                c if is_white_space_single_line(c) => {
                    self.pos += 1;
                    while self.current().is_some_and(is_white_space_single_line) {
                        self.pos += 1;
                    }
                }
                '/' if self.peek(1) == Some('/') => self.skip_to_line_end(),
                '/' if self.peek(1) == Some('*') => self.skip_multi_line_comment(),
                '<' | '>' | '=' | '|' if self.is_conflict_marker_trivia(self.pos) => {
                    self.skip_conflict_marker_trivia();
                }
                _ => break,
            }
        }

        let ch = self.text[self.pos];
        self.token = self.scan_token(ch);
        self.token
    }

    fn skip_to_line_end(&mut self) {
        while self.current().is_some_and(|c| !is_line_break(c)) {
            self.pos += 1;
        }
    }

    fn skip_multi_line_comment(&mut self) {
        let start = self.pos;
        if self.peek(2) == Some('*') && self.peek(3) != Some('/') {
            self.token_flags |= TokenFlags::PRECEDING_JSDOC_COMMENT;
        }
        self.pos += 2;
        loop {
            match self.current() {
                None => {
                    self.error(&messages::ASTERISK_SLASH_EXPECTED, self.pos, 0);
                    break;
                }
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    break;
                }
                Some(c) => {
                    if is_line_break(c) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    self.pos += 1;
                }
            }
        }
        debug_assert!(self.pos > start);
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        match ch {
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '@' => self.single(SyntaxKind::AtToken),
            ':' => self.single(SyntaxKind::ColonToken),
            '>' => self.single(SyntaxKind::GreaterThanToken),
            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '=' => self.scan_with_equals(
                SyntaxKind::EqualsToken,
                SyntaxKind::EqualsEqualsToken,
                Some(SyntaxKind::EqualsEqualsEqualsToken),
            ),
            '!' => self.scan_with_equals(
                SyntaxKind::ExclamationToken,
                SyntaxKind::ExclamationEqualsToken,
                Some(SyntaxKind::ExclamationEqualsEqualsToken),
            ),
            '+' => self.scan_doubled(SyntaxKind::PlusToken, SyntaxKind::PlusPlusToken, SyntaxKind::PlusEqualsToken, None),
            '-' => self.scan_doubled(SyntaxKind::MinusToken, SyntaxKind::MinusMinusToken, SyntaxKind::MinusEqualsToken, None),
            '*' => self.scan_doubled(
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AsteriskEqualsToken,
                Some(SyntaxKind::AsteriskAsteriskEqualsToken),
            ),
            '&' => self.scan_doubled(
                SyntaxKind::AmpersandToken,
                SyntaxKind::AmpersandAmpersandToken,
                SyntaxKind::AmpersandEqualsToken,
                Some(SyntaxKind::AmpersandAmpersandEqualsToken),
            ),
            '|' => self.scan_doubled(
                SyntaxKind::BarToken,
                SyntaxKind::BarBarToken,
                SyntaxKind::BarEqualsToken,
                Some(SyntaxKind::BarBarEqualsToken),
            ),
            '/' => self.scan_with_equals(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken, None),
            '%' => self.scan_with_equals(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken, None),
            '^' => self.scan_with_equals(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken, None),
            '\'' | '"' => {
                self.token_value = self.scan_string(ch, false);
                SyntaxKind::StringLiteral
            }
            '`' => self.scan_template(false),
            '0'..='9' => self.scan_number(),
            '#' => self.scan_private_identifier(),
            '\\' => match self.peek_unicode_escape() {
                Some((c, _)) if is_identifier_start(c) => self.scan_identifier(),
                _ => {
                    self.error(&messages::INVALID_CHARACTER, self.pos, 1);
                    self.pos += 1;
                    SyntaxKind::Unknown
                }
            },
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ => {
                self.error(&messages::INVALID_CHARACTER, self.pos, 1);
                self.pos += 1;
                SyntaxKind::Unknown
            }
        }
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// `x`, `x=` and optionally `x==`.
    fn scan_with_equals(&mut self, base: SyntaxKind, eq: SyntaxKind, eq_eq: Option<SyntaxKind>) -> SyntaxKind {
        if base == SyntaxKind::EqualsToken && self.peek(1) == Some('>') {
            self.pos += 2;
            return SyntaxKind::EqualsGreaterThanToken;
        }
        if self.peek(1) == Some('=') {
            if let Some(triple) = eq_eq {
                if self.peek(2) == Some('=') {
                    self.pos += 3;
                    return triple;
                }
            }
            self.pos += 2;
            return eq;
        }
        self.pos += 1;
        base
    }

    /// `x`, `xx`, `x=` and optionally `xx=`.
    fn scan_doubled(
        &mut self,
        base: SyntaxKind,
        doubled: SyntaxKind,
        eq: SyntaxKind,
        doubled_eq: Option<SyntaxKind>,
    ) -> SyntaxKind {
        let ch = self.text[self.pos];
        if self.peek(1) == Some(ch) {
            if let Some(doubled_eq) = doubled_eq {
                if self.peek(2) == Some('=') {
                    self.pos += 3;
                    return doubled_eq;
                }
            }
            self.pos += 2;
            return doubled;
        }
        if self.peek(1) == Some('=') {
            self.pos += 2;
            return eq;
        }
        self.pos += 1;
        base
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1).is_some_and(is_digit) {
            return self.scan_number();
        }
        if self.peek(1) == Some('.') && self.peek(2) == Some('.') {
            self.pos += 3;
            return SyntaxKind::DotDotDotToken;
        }
        self.pos += 1;
        SyntaxKind::DotToken
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.peek(1) == Some('.') && !self.peek(2).is_some_and(is_digit) {
            self.pos += 2;
            return SyntaxKind::QuestionDotToken;
        }
        if self.peek(1) == Some('?') {
            if self.peek(2) == Some('=') {
                self.pos += 3;
                return SyntaxKind::QuestionQuestionEqualsToken;
            }
            self.pos += 2;
            return SyntaxKind::QuestionQuestionToken;
        }
        self.pos += 1;
        SyntaxKind::QuestionToken
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match self.peek(1) {
            Some('<') => {
                if self.peek(2) == Some('=') {
                    self.pos += 3;
                    SyntaxKind::LessThanLessThanEqualsToken
                } else {
                    self.pos += 2;
                    SyntaxKind::LessThanLessThanToken
                }
            }
            Some('=') => {
                self.pos += 2;
                SyntaxKind::LessThanEqualsToken
            }
            Some('/') if self.language_variant == LanguageVariant::Jsx && self.peek(2) != Some('*') => {
                self.pos += 2;
                SyntaxKind::LessThanSlashToken
            }
            _ => {
                self.pos += 1;
                SyntaxKind::LessThanToken
            }
        }
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        if self.pos != 0 && self.peek(1) == Some('!') {
            self.error(&messages::SHEBANG_CAN_ONLY_BE_USED_AT_THE_START_OF_A_FILE, self.pos, 2);
            self.pos += 1;
            return SyntaxKind::Unknown;
        }
        let starts_identifier = match self.peek(1) {
            Some('\\') => {
                self.pos += 1;
                let ok = matches!(self.peek_unicode_escape(), Some((c, _)) if is_identifier_start(c));
                self.pos -= 1;
                ok
            }
            Some(c) => is_identifier_start(c),
            None => false,
        };
        if starts_identifier {
            self.pos += 1;
            self.scan_identifier();
            self.token_value.insert(0, '#');
        } else {
            self.token_value = "#".to_string();
            self.error(&messages::INVALID_CHARACTER, self.pos, 1);
            self.pos += 1;
        }
        SyntaxKind::PrivateIdentifier
    }

    /// Decode `\uXXXX` or `\u{X...}` at the cursor without consuming it.
    fn peek_unicode_escape(&self) -> Option<(char, usize)> {
        if self.current() != Some('\\') || self.peek(1) != Some('u') {
            return None;
        }
        if self.peek(2) == Some('{') {
            let mut value: u32 = 0;
            let mut i = 3;
            while let Some(c) = self.peek(i) {
                if c == '}' {
                    return if i > 3 { char::from_u32(value).map(|c| (c, i + 1)) } else { None };
                }
                value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
                i += 1;
            }
            return None;
        }
        let mut value = 0;
        for i in 2..6 {
            value = value * 16 + self.peek(i)?.to_digit(16)?;
        }
        char::from_u32(value).map(|c| (c, 6))
    }

    fn scan_identifier_parts(&mut self) {
        loop {
            match self.current() {
                Some(c) if is_identifier_part(c) => {
                    self.token_value.push(c);
                    self.pos += 1;
                }
                Some('\\') => match self.peek_unicode_escape() {
                    Some((c, len)) if is_identifier_part(c) => {
                        self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                        if self.peek(2) == Some('{') {
                            self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
                        }
                        self.token_value.push(c);
                        self.pos += len;
                    }
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.token_value.clear();
        self.scan_identifier_parts();
        self.identifier_token()
    }

    fn identifier_token(&self) -> SyntaxKind {
        let len = self.token_value.len();
        if (2..=12).contains(&len) && self.token_value.as_bytes()[0].is_ascii_lowercase() {
            if let Some(keyword) = SyntaxKind::from_keyword(&self.token_value) {
                return keyword;
            }
        }
        SyntaxKind::Identifier
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string(&mut self, quote: char, jsx_attribute: bool) -> String {
        self.pos += 1;
        let mut result = String::new();
        loop {
            let Some(ch) = self.current() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' && !jsx_attribute {
                let cooked = self.scan_escape_sequence(true);
                result.push_str(&cooked);
                continue;
            }
            if (ch == '\n' || ch == '\r') && !jsx_attribute {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                break;
            }
            result.push(ch);
            self.pos += 1;
        }
        result
    }

    /// Scan from a backtick or a `}` to the next `${` or closing backtick.
    fn scan_template(&mut self, report_invalid_escapes: bool) -> SyntaxKind {
        let started_with_backtick = self.text[self.pos] == '`';
        self.pos += 1;
        let mut contents = String::new();
        let kind = loop {
            let Some(ch) = self.current() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, self.pos, 0);
                break if started_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if started_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.peek(1) == Some('{') => {
                    self.pos += 2;
                    break if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    let cooked = self.scan_escape_sequence(report_invalid_escapes);
                    contents.push_str(&cooked);
                }
                '\r' => {
                    self.pos += if self.peek(1) == Some('\n') { 2 } else { 1 };
                    contents.push('\n');
                }
                _ => {
                    contents.push(ch);
                    self.pos += 1;
                }
            }
        };
        self.token_value = contents;
        kind
    }

    fn scan_escape_sequence(&mut self, report_errors: bool) -> String {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.current() else {
            if report_errors {
                self.error(&messages::UNEXPECTED_END_OF_TEXT, self.pos, 0);
            }
            return String::new();
        };
        self.pos += 1;
        match ch {
            '0' if !self.current().is_some_and(is_digit) => "\0".to_string(),
            '0'..='9' => {
                self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
                ch.to_string()
            }
            'b' => "\u{8}".to_string(),
            't' => "\t".to_string(),
            'n' => "\n".to_string(),
            'v' => "\u{B}".to_string(),
            'f' => "\u{C}".to_string(),
            'r' => "\r".to_string(),
            'x' => {
                let digits = self.take_hex_digits(2, 2);
                match digits.and_then(char::from_u32) {
                    Some(c) => c.to_string(),
                    None => self.invalid_escape(start, report_errors, &messages::HEXADECIMAL_DIGIT_EXPECTED),
                }
            }
            'u' if self.current() == Some('{') => {
                self.pos += 1;
                self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
                let value = self.take_hex_digits(1, 8);
                if value.is_none() {
                    return self.invalid_escape(start, report_errors, &messages::HEXADECIMAL_DIGIT_EXPECTED);
                }
                if self.current() != Some('}') {
                    return self.invalid_escape(start, report_errors, &messages::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE);
                }
                self.pos += 1;
                match value.and_then(char::from_u32) {
                    Some(c) => c.to_string(),
                    None => self.invalid_escape(start, report_errors, &messages::HEXADECIMAL_DIGIT_EXPECTED),
                }
            }
            'u' => {
                self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                match self.take_hex_digits(4, 4) {
                    Some(v) => char::from_u32(v).unwrap_or('\u{FFFD}').to_string(),
                    None => self.invalid_escape(start, report_errors, &messages::HEXADECIMAL_DIGIT_EXPECTED),
                }
            }
            '\r' => {
                if self.current() == Some('\n') {
                    self.pos += 1;
                }
                String::new()
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => String::new(),
            other => other.to_string(),
        }
    }

    fn invalid_escape(&mut self, start: usize, report: bool, message: &'static DiagnosticMessage) -> String {
        self.token_flags |= TokenFlags::CONTAINS_INVALID_ESCAPE;
        if report {
            self.error(message, self.pos, 1);
        }
        self.slice(start, self.pos)
    }

    /// Read between `min` and `max` hex digits.
    fn take_hex_digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while self.pos - start < max {
            let Some(digit) = self.current().and_then(|c| c.to_digit(16)) else {
                break;
            };
            value = value.saturating_mul(16).saturating_add(digit);
            self.pos += 1;
        }
        if self.pos - start < min {
            None
        } else {
            Some(value)
        }
    }

    /// Digits accepted by `is_digit`, with `_` separators validated and removed.
    fn scan_number_fragment(&mut self, is_digit: fn(char) -> bool) -> String {
        let mut result = String::new();
        let mut allow_separator = false;
        let mut previous_was_separator = false;
        while let Some(ch) = self.current() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if allow_separator {
                    allow_separator = false;
                    previous_was_separator = true;
                } else if previous_was_separator {
                    self.error(&messages::MULTIPLE_CONSECUTIVE_NUMERIC_SEPARATORS_ARE_NOT_PERMITTED, self.pos, 1);
                } else {
                    self.error(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, self.pos, 1);
                }
                self.pos += 1;
                continue;
            }
            if !is_digit(ch) {
                break;
            }
            allow_separator = true;
            previous_was_separator = false;
            result.push(ch);
            self.pos += 1;
        }
        if self.pos > 0 && self.text[self.pos - 1] == '_' {
            self.error(&messages::NUMERIC_SEPARATORS_ARE_NOT_ALLOWED_HERE, self.pos - 1, 1);
        }
        result
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.text[start] == '0' {
            let radix = match self.peek(1) {
                Some('x' | 'X') => Some((TokenFlags::HEX_SPECIFIER, is_hex_digit as fn(char) -> bool)),
                Some('b' | 'B') => Some((TokenFlags::BINARY_SPECIFIER, is_binary_digit as fn(char) -> bool)),
                Some('o' | 'O') => Some((TokenFlags::OCTAL_SPECIFIER, is_octal_digit as fn(char) -> bool)),
                _ => None,
            };
            if let Some((flag, is_radix_digit)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                let digits = self.scan_number_fragment(is_radix_digit);
                if digits.is_empty() {
                    let message = if flag == TokenFlags::HEX_SPECIFIER {
                        &messages::HEXADECIMAL_DIGIT_EXPECTED
                    } else {
                        &messages::DIGIT_EXPECTED
                    };
                    self.error(message, self.pos, 0);
                }
                self.token_value = format!("{}{}", self.slice(start, start + 2), digits);
                let kind = self.check_big_int_suffix();
                self.check_for_identifier_start_after_numeric_literal(start);
                return kind;
            }
        }

        let mut value = self.scan_number_fragment(is_digit);
        if value.len() > 1 && value.starts_with('0') && value.chars().all(is_octal_digit) {
            self.token_flags |= TokenFlags::OCTAL;
        }
        let mut has_fraction = false;
        if self.current() == Some('.') {
            has_fraction = true;
            self.pos += 1;
            value.push('.');
            let fraction = self.scan_number_fragment(is_digit);
            value.push_str(&fraction);
        }
        let mut is_scientific = false;
        if matches!(self.current(), Some('e' | 'E')) {
            is_scientific = true;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            value.push('e');
            self.pos += 1;
            if let Some(sign @ ('+' | '-')) = self.current() {
                value.push(sign);
                self.pos += 1;
            }
            let exponent = self.scan_number_fragment(is_digit);
            if exponent.is_empty() {
                self.error(&messages::DIGIT_EXPECTED, self.pos, 0);
            }
            value.push_str(&exponent);
        }
        self.token_value = value;

        if has_fraction || is_scientific {
            self.check_for_identifier_start_after_numeric_literal(start);
            return SyntaxKind::NumericLiteral;
        }
        let kind = self.check_big_int_suffix();
        self.check_for_identifier_start_after_numeric_literal(start);
        kind
    }

    fn check_big_int_suffix(&mut self) -> SyntaxKind {
        if self.current() == Some('n') {
            self.token_value.push('n');
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        }
    }

    fn check_for_identifier_start_after_numeric_literal(&mut self, numeric_start: usize) {
        if !self.current().is_some_and(is_identifier_start) {
            return;
        }
        let identifier_start = self.pos;
        let saved_value = std::mem::take(&mut self.token_value);
        self.scan_identifier_parts();
        let length = self.pos - identifier_start;
        self.token_value = saved_value;
        if length == 1 && self.text[identifier_start] == 'n' {
            self.error(
                &messages::A_BIGINT_LITERAL_MUST_BE_AN_INTEGER,
                numeric_start,
                identifier_start - numeric_start + 1,
            );
        } else {
            self.error(
                &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
                identifier_start,
                length,
            );
            self.pos = identifier_start;
        }
    }

    // ========================================================================
    // Conflict markers
    // ========================================================================

    fn is_conflict_marker_trivia(&self, pos: usize) -> bool {
        if pos != 0 && !is_line_break(self.text[pos - 1]) {
            return false;
        }
        if pos + MERGE_CONFLICT_MARKER_LENGTH >= self.end {
            return false;
        }
        let ch = self.text[pos];
        if (1..MERGE_CONFLICT_MARKER_LENGTH).any(|i| self.text[pos + i] != ch) {
            return false;
        }
        ch == '=' || self.text[pos + MERGE_CONFLICT_MARKER_LENGTH] == ' '
    }

    fn skip_conflict_marker_trivia(&mut self) {
        self.error(&messages::MERGE_CONFLICT_MARKER_ENCOUNTERED, self.pos, MERGE_CONFLICT_MARKER_LENGTH);
        let ch = self.text[self.pos];
        if ch == '<' || ch == '>' {
            self.skip_to_line_end();
        } else {
            while let Some(current) = self.current() {
                if (current == '=' || current == '>') && current != ch && self.is_conflict_marker_trivia(self.pos) {
                    break;
                }
                self.pos += 1;
            }
        }
    }

    // ========================================================================
    // Rescans
    // ========================================================================

    /// Rescan `>` as `>=`, `>>`, `>>=`, `>>>`, or `>>>=`.
    pub fn rescan_greater_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::GreaterThanToken {
            self.token = match self.current() {
                Some('>') => match self.peek(1) {
                    Some('>') if self.peek(2) == Some('=') => {
                        self.pos += 3;
                        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
                    }
                    Some('>') => {
                        self.pos += 2;
                        SyntaxKind::GreaterThanGreaterThanGreaterThanToken
                    }
                    Some('=') => {
                        self.pos += 2;
                        SyntaxKind::GreaterThanGreaterThanEqualsToken
                    }
                    _ => {
                        self.pos += 1;
                        SyntaxKind::GreaterThanGreaterThanToken
                    }
                },
                Some('=') => {
                    self.pos += 1;
                    SyntaxKind::GreaterThanEqualsToken
                }
                _ => SyntaxKind::GreaterThanToken,
            };
        }
        self.token
    }

    /// Rescan `/` or `/=` as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_escape = false;
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.current().filter(|&c| !is_line_break(c)) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(
                    &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    self.token_start,
                    self.pos - self.token_start,
                );
                break;
            };
            if in_escape {
                in_escape = false;
            } else if ch == '/' && !in_character_class {
                self.pos += 1;
                break;
            } else if ch == '[' {
                in_character_class = true;
            } else if ch == '\\' {
                in_escape = true;
            } else if ch == ']' {
                in_character_class = false;
            }
            self.pos += 1;
        }
        while self.current().is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        self.token_value = self.slice(self.token_start, self.pos);
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Rescan a `}` (or a backtick) as the next piece of a template.
    pub fn rescan_template_token(&mut self, is_tagged: bool) -> SyntaxKind {
        self.pos = self.token_start;
        self.token_flags &= TokenFlags::PRECEDING_LINE_BREAK;
        self.token = self.scan_template(!is_tagged);
        self.token
    }

    /// Split `<<` into `<` for type argument lists.
    pub fn rescan_less_than_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::LessThanLessThanToken {
            self.pos = self.token_start + 1;
            self.token = SyntaxKind::LessThanToken;
        }
        self.token
    }

    // ========================================================================
    // JSX
    // ========================================================================

    /// Scan the next token in JSX child position: `<`, `</`, `{` or text.
    pub fn scan_jsx_token(&mut self, allow_multiline_jsx_text: bool) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        let Some(ch) = self.current() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        if ch == '<' {
            if self.peek(1) == Some('/') {
                self.pos += 2;
                self.token = SyntaxKind::LessThanSlashToken;
            } else {
                self.pos += 1;
                self.token = SyntaxKind::LessThanToken;
            }
            return self.token;
        }
        if ch == '{' {
            self.pos += 1;
            self.token = SyntaxKind::OpenBraceToken;
            return self.token;
        }

        // -1: only whitespace containing a line break so far
        let mut first_non_whitespace: isize = 0;
        while let Some(c) = self.current() {
            if c == '{' {
                break;
            }
            if c == '<' {
                if self.is_conflict_marker_trivia(self.pos) {
                    self.skip_conflict_marker_trivia();
                    self.token = SyntaxKind::ConflictMarkerTrivia;
                    return self.token;
                }
                break;
            }
            if c == '>' {
                self.error(&messages::UNEXPECTED_TOKEN_DID_YOU_MEAN_OR_GT, self.pos, 1);
            }
            if c == '}' {
                self.error(&messages::UNEXPECTED_TOKEN_DID_YOU_MEAN_OR_RBRACE, self.pos, 1);
            }
            if is_line_break(c) && first_non_whitespace == 0 {
                first_non_whitespace = -1;
            } else if !allow_multiline_jsx_text && is_line_break(c) && first_non_whitespace > 0 {
                break;
            } else if !is_white_space_like(c) {
                first_non_whitespace = self.pos as isize;
            }
            self.pos += 1;
        }
        self.token_value = self.slice(self.full_start, self.pos);
        self.token = if first_non_whitespace == -1 {
            SyntaxKind::JsxTextAllWhiteSpaces
        } else {
            SyntaxKind::JsxText
        };
        self.token
    }

    pub fn rescan_jsx_token(&mut self, allow_multiline_jsx_text: bool) -> SyntaxKind {
        self.pos = self.full_start;
        self.token_start = self.full_start;
        self.scan_jsx_token(allow_multiline_jsx_text)
    }

    /// Extend an identifier or keyword token with `-` separated parts, as
    /// JSX tag and attribute names allow.
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if self.token.is_identifier_or_keyword() {
            self.token_value = self.token_text();
            while let Some(ch) = self.current() {
                if ch == '-' {
                    self.token_value.push('-');
                    self.pos += 1;
                    continue;
                }
                let before = self.pos;
                self.scan_identifier_parts();
                if self.pos == before {
                    break;
                }
            }
            self.token = self.identifier_token();
        }
        self.token
    }

    /// Scan a JSX attribute value: a quoted string without escapes, or any token.
    pub fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        match self.current() {
            Some(quote @ ('"' | '\'')) => {
                self.token_start = self.pos;
                self.token_flags = TokenFlags::NONE;
                self.token_value = self.scan_string(quote, true);
                self.token = SyntaxKind::StringLiteral;
                self.token
            }
            _ => self.scan(),
        }
    }

    pub fn rescan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.pos = self.full_start;
        self.token_start = self.full_start;
        self.scan_jsx_attribute_value()
    }

    // ========================================================================
    // Documentation comments
    // ========================================================================

    /// Scan one token of documentation-comment text. Whitespace and line
    /// breaks come back as trivia tokens; words as identifiers or keywords.
    pub fn scan_jsdoc_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        let Some(ch) = self.current() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        self.pos += 1;
        self.token = match ch {
            '\t' | '\u{000B}' | '\u{000C}' | ' ' => {
                while self.current().is_some_and(is_white_space_single_line) {
                    self.pos += 1;
                }
                SyntaxKind::WhitespaceTrivia
            }
            '@' => SyntaxKind::AtToken,
            '\r' | '\n' => {
                if ch == '\r' && self.current() == Some('\n') {
                    self.pos += 1;
                }
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                SyntaxKind::NewLineTrivia
            }
            '*' => SyntaxKind::AsteriskToken,
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '<' => SyntaxKind::LessThanToken,
            '>' => SyntaxKind::GreaterThanToken,
            '=' => SyntaxKind::EqualsToken,
            ',' => SyntaxKind::CommaToken,
            '.' => SyntaxKind::DotToken,
            '`' => SyntaxKind::BacktickToken,
            '#' => SyntaxKind::HashToken,
            c if is_identifier_start(c) => {
                self.token_value.push(c);
                while let Some(next) = self.current() {
                    if !(is_identifier_part(next) || next == '-') {
                        break;
                    }
                    self.token_value.push(next);
                    self.pos += 1;
                }
                self.identifier_token()
            }
            _ => SyntaxKind::Unknown,
        };
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return out;
            }
            out.push(kind);
        }
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , :"),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("+ ++ += - -- -= * ** *= **= / /= % %= === !== == != => ??= &&= ||="),
            vec![
                SyntaxKind::PlusToken,
                SyntaxKind::PlusPlusToken,
                SyntaxKind::PlusEqualsToken,
                SyntaxKind::MinusToken,
                SyntaxKind::MinusMinusToken,
                SyntaxKind::MinusEqualsToken,
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AsteriskEqualsToken,
                SyntaxKind::AsteriskAsteriskEqualsToken,
                SyntaxKind::SlashToken,
                SyntaxKind::SlashEqualsToken,
                SyntaxKind::PercentToken,
                SyntaxKind::PercentEqualsToken,
                SyntaxKind::EqualsEqualsEqualsToken,
                SyntaxKind::ExclamationEqualsEqualsToken,
                SyntaxKind::EqualsEqualsToken,
                SyntaxKind::ExclamationEqualsToken,
                SyntaxKind::EqualsGreaterThanToken,
                SyntaxKind::QuestionQuestionEqualsToken,
                SyntaxKind::AmpersandAmpersandEqualsToken,
                SyntaxKind::BarBarEqualsToken,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = Scanner::new("let x = 42;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.full_start(), 3);
        assert_eq!(scanner.token_start(), 4);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_string_escapes() {
        let mut scanner = Scanner::new(r#""a\nb" 'cA\x42\u{43}'"#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "a\nb");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "cABC");
        assert!(!scanner.has_errors());
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("'abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.is_unterminated());
        let errors = scanner.take_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message.code, 1002);
        assert_eq!(errors[0].pos, 4);
    }

    #[test]
    fn test_scan_template_pieces() {
        let mut scanner = Scanner::new("`a${x}b${y}c`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(false), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(false), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "c");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_number_formats() {
        let mut scanner = Scanner::new("42 3.14 0xff 0b1010 0o777 1_000 .5 1e10");
        let expected = ["42", "3.14", "0xff", "0b1010", "0o777", "1000", ".5", "1e10"];
        for value in expected {
            assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
            assert_eq!(scanner.token_value(), value);
        }
        assert!(!scanner.has_errors());
    }

    #[test]
    fn test_numeric_separator_errors() {
        let mut scanner = Scanner::new("1__0 2_");
        scanner.scan();
        scanner.scan();
        let codes: Vec<u32> = scanner.take_errors().iter().map(|e| e.message.code).collect();
        assert_eq!(codes, vec![6189, 6188]);
    }

    #[test]
    fn test_identifier_after_number() {
        let mut scanner = Scanner::new("3px");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        let errors = scanner.take_errors();
        assert_eq!(errors[0].message.code, 1351);
        assert_eq!((errors[0].pos, errors[0].length), (1, 2));
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "px");
    }

    #[test]
    fn test_scan_bigint() {
        let mut scanner = Scanner::new("42n 0xFFn");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "42n");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "0xFFn");
    }

    #[test]
    fn test_comments_and_line_breaks() {
        let mut scanner = Scanner::new("// comment\nlet /** doc */ x");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.full_start(), 0);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.token_flags().contains(TokenFlags::PRECEDING_JSDOC_COMMENT));
        assert!(!scanner.has_preceding_line_break());
    }

    #[test]
    fn test_unterminated_comment() {
        let mut scanner = Scanner::new("a /* b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.take_errors()[0].message.code, 1010);
    }

    #[test]
    fn test_private_identifier_and_shebang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\n#x");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#x");
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_unicode_escape_identifier() {
        let mut scanner = Scanner::new("\\u0061bc");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "abc");
        assert!(scanner.has_unicode_escape());
    }

    #[test]
    fn test_rescan_greater() {
        let mut scanner = Scanner::new(">>>= >= >");
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.rescan_greater_token(), SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.rescan_greater_token(), SyntaxKind::GreaterThanEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.rescan_greater_token(), SyntaxKind::GreaterThanToken);
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = Scanner::new("/a[/]b/gi;");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/a[/]b/gi");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
    }

    #[test]
    fn test_rescan_less_than() {
        let mut scanner = Scanner::new("<<T");
        assert_eq!(scanner.scan(), SyntaxKind::LessThanLessThanToken);
        assert_eq!(scanner.rescan_less_than_token(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::LessThanToken);
    }

    #[test]
    fn test_snapshot_and_rewind() {
        let mut scanner = Scanner::new("let x = 1;");
        scanner.scan();
        let state = scanner.snapshot();
        scanner.scan();
        scanner.scan();
        scanner.rewind(state.clone());
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.snapshot(), state);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_set_text_range() {
        let mut scanner = Scanner::default();
        scanner.set_text("a b c", 2, Some(1));
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "b");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_reset_token_state() {
        let mut scanner = Scanner::new("a b c");
        scanner.scan();
        scanner.reset_token_state(3);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.full_start(), 3);
        assert_eq!(scanner.token_start(), 4);
    }

    #[test]
    fn test_jsx_text_and_identifier() {
        let mut scanner = Scanner::new("Hello World{");
        scanner.set_language_variant(LanguageVariant::Jsx);
        assert_eq!(scanner.scan_jsx_token(true), SyntaxKind::JsxText);
        assert_eq!(scanner.token_value(), "Hello World");
        assert_eq!(scanner.scan_jsx_token(true), SyntaxKind::OpenBraceToken);

        let mut scanner = Scanner::new("data-id=");
        scanner.scan();
        assert_eq!(scanner.scan_jsx_identifier(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "data-id");
    }

    #[test]
    fn test_jsx_whitespace_text() {
        let mut scanner = Scanner::new("\n   <");
        assert_eq!(scanner.scan_jsx_token(true), SyntaxKind::JsxTextAllWhiteSpaces);
        assert_eq!(scanner.scan_jsx_token(true), SyntaxKind::LessThanToken);
    }

    #[test]
    fn test_conflict_marker() {
        let mut scanner = Scanner::new("<<<<<<< HEAD\na\n>>>>>>> b\n");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        let errors = scanner.take_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message.code == 1185));
    }

    #[test]
    fn test_jsdoc_tokens() {
        let mut scanner = Scanner::new("@param {x} a-b\n");
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::AtToken);
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "param");
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::WhitespaceTrivia);
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::OpenBraceToken);
        scanner.scan_jsdoc_token();
        scanner.scan_jsdoc_token();
        scanner.scan_jsdoc_token();
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "a-b");
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::NewLineTrivia);
        assert_eq!(scanner.scan_jsdoc_token(), SyntaxKind::EndOfFileToken);
    }
}
