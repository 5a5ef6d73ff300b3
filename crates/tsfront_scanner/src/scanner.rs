//! The scanner/lexer.
//!
//! Converts source text into the token stream the parser consumes. The
//! parser drives it one token at a time and asks for a rescan whenever the
//! grammar gives a character sequence a different meaning (`>>` in type
//! arguments, `/` that starts a regex, `}` that resumes a template, JSX).

use crate::char_codes::*;
use crate::token::{ScanError, TokenInfo};
use crate::trivia::{
    is_conflict_marker_trivia, is_shebang_trivia, scan_shebang_trivia,
    skip_conflict_marker_trivia,
};
use std::sync::Arc;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::TokenFlags;
use tsfront_core::text::SourceText;
use tsfront_diagnostics::messages;
use tsfront_diagnostics::DiagnosticMessage;

/// Receives lexical errors as `(message, start, length)`.
pub type ErrorCallback = Box<dyn FnMut(&'static DiagnosticMessage, u32, u32)>;

/// Saved scanner state for speculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    error_count: usize,
}

/// The scanner converts source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Arc<[char]>,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token, leading trivia included.
    full_start: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value of the current token.
    token_value: String,
    token_flags: TokenFlags,
    on_error: Option<ErrorCallback>,
    /// Errors queued while no callback is installed.
    errors: Vec<ScanError>,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect())
    }

    /// Scan text that has already been decoded, sharing its buffer.
    pub fn from_source(source: &SourceText) -> Self {
        Self::from_chars(source.chars().clone())
    }

    pub fn from_chars(text: Arc<[char]>) -> Self {
        Self {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            on_error: None,
            errors: Vec::new(),
        }
    }

    /// Install or clear the error callback. Without one, errors are queued
    /// and rolled back along with speculative scans.
    pub fn set_on_error(&mut self, callback: Option<ErrorCallback>) {
        self.on_error = callback;
    }

    /// Drain the queued errors.
    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    pub fn has_pending_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    // ========================================================================
    // Current token
    // ========================================================================

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Cooked value: identifier name, string contents with escapes
    /// resolved, numeric source text without separators, regex source.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> String {
        self.text[self.token_start..self.pos].iter().collect()
    }

    /// Start including leading trivia.
    #[inline]
    pub fn full_start(&self) -> u32 {
        self.full_start as u32
    }

    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn has_preceding_jsdoc_comment(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_JSDOC_COMMENT)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    #[inline]
    pub fn has_extended_unicode_escape(&self) -> bool {
        self.token_flags.contains(TokenFlags::EXTENDED_UNICODE_ESCAPE)
    }

    #[inline]
    pub fn is_octal_literal(&self) -> bool {
        self.token_flags.contains(TokenFlags::OCTAL)
    }

    /// Identifiers and keywords that are not reserved words.
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.token == SyntaxKind::Identifier
            || (self.token.is_keyword() && !self.token.is_reserved_word())
    }

    #[inline]
    pub fn is_reserved_word(&self) -> bool {
        self.token.is_reserved_word()
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            full_start: self.full_start as u32,
            start: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    pub fn state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            error_count: self.errors.len(),
        }
    }

    /// Restore a saved state. Queued errors recorded since are dropped.
    pub fn set_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.full_start = state.full_start;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
        self.errors.truncate(state.error_count);
    }

    /// Run `f` and rewind, whatever it returns.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.state();
        let result = f(self);
        self.set_state(saved);
        result
    }

    /// Run `f` and rewind only if it returns `None`.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let saved = self.state();
        let result = f(self);
        if result.is_none() {
            self.set_state(saved);
        }
        result
    }

    /// Move to `pos` and forget the current token.
    pub fn set_text_pos(&mut self, pos: u32) {
        let pos = (pos as usize).min(self.text.len());
        self.pos = pos;
        self.full_start = pos;
        self.token_start = pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error(&mut self, message: &'static DiagnosticMessage, start: usize, length: usize) {
        let (start, length) = (start as u32, length as u32);
        match self.on_error.as_mut() {
            Some(callback) => callback(message, start, length),
            None => self.errors.push(ScanError { message, start, length }),
        }
    }

    /// Scan the next token, skipping leading trivia.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.current_char() else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if ch == '#' && is_shebang_trivia(&self.text, self.pos) {
                self.pos = scan_shebang_trivia(&self.text, self.pos);
                continue;
            }

            self.token = match ch {
                '\r' | '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                    if ch == '\r' && self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
                    continue;
                }
                c if is_white_space_single_line(c) => {
                    self.pos += 1;
                    continue;
                }
                '/' if self.char_at(1) == Some('/') => {
                    self.pos += 2;
                    while !self.is_eof() && !is_line_break(self.text[self.pos]) {
                        self.pos += 1;
                    }
                    continue;
                }
                '/' if self.char_at(1) == Some('*') => {
                    self.skip_multi_line_comment();
                    continue;
                }
                '<' | '=' | '>' | '|' if is_conflict_marker_trivia(&self.text, self.pos) => {
                    self.error(&messages::MERGE_CONFLICT_MARKER_ENCOUNTERED, self.pos, 7);
                    self.pos = skip_conflict_marker_trivia(&self.text, self.pos);
                    continue;
                }

                '(' => { self.pos += 1; SyntaxKind::OpenParenToken }
                ')' => { self.pos += 1; SyntaxKind::CloseParenToken }
                '{' => { self.pos += 1; SyntaxKind::OpenBraceToken }
                '}' => { self.pos += 1; SyntaxKind::CloseBraceToken }
                '[' => { self.pos += 1; SyntaxKind::OpenBracketToken }
                ']' => { self.pos += 1; SyntaxKind::CloseBracketToken }
                ';' => { self.pos += 1; SyntaxKind::SemicolonToken }
                ',' => { self.pos += 1; SyntaxKind::CommaToken }
                '~' => { self.pos += 1; SyntaxKind::TildeToken }
                '@' => { self.pos += 1; SyntaxKind::AtToken }
                ':' => { self.pos += 1; SyntaxKind::ColonToken }
                // `>>` and friends are produced by rescan_greater_token.
                '>' => { self.pos += 1; SyntaxKind::GreaterThanToken }

                '.' => self.scan_dot(),
                '?' => self.scan_question(),
                '<' => self.scan_less_than(),
                '=' => self.scan_equals(),
                '!' => self.scan_exclamation(),
                '+' => self.scan_plus(),
                '-' => self.scan_minus(),
                '*' => self.scan_asterisk(),
                '/' => self.scan_slash(),
                '%' => self.scan_percent(),
                '&' => self.scan_ampersand(),
                '|' => self.scan_bar(),
                '^' => self.scan_caret(),

                '\'' | '"' => self.scan_string_literal(ch),
                '`' => self.scan_template_and_set_token_value(),

                '0'..='9' => self.scan_number(),

                c if is_identifier_start(c) => self.scan_identifier(),
                '\\' => match self.peek_unicode_escape() {
                    Some((c, _)) if is_identifier_start(c) => self.scan_identifier(),
                    _ => self.invalid_character(),
                },

                _ => self.invalid_character(),
            };
            return self.token;
        }
    }

    fn invalid_character(&mut self) -> SyntaxKind {
        self.error(&messages::INVALID_CHARACTER, self.pos, 1);
        self.pos += 1;
        SyntaxKind::Unknown
    }

    fn skip_multi_line_comment(&mut self) {
        // `/**` opens a JSDoc block, `/**/` does not.
        if self.char_at(2) == Some('*') && self.char_at(3) != Some('/') {
            self.token_flags |= TokenFlags::PRECEDING_JSDOC_COMMENT;
        }
        self.pos += 2;
        let mut closed = false;
        while let Some(ch) = self.current_char() {
            if ch == '*' && self.char_at(1) == Some('/') {
                self.pos += 2;
                closed = true;
                break;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
            self.pos += 1;
        }
        if !closed {
            self.error(&messages::ASTERISK_SLASH_EXPECTED, self.pos, 0);
        }
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    /// Consume `len` characters and produce `kind`.
    #[inline]
    fn take(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1).is_some_and(is_digit) {
            self.scan_number()
        } else if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.take(3, SyntaxKind::DotDotDotToken)
        } else {
            self.take(1, SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('?'), Some('=')) => self.take(3, SyntaxKind::QuestionQuestionEqualsToken),
            (Some('?'), _) => self.take(2, SyntaxKind::QuestionQuestionToken),
            // `a?.5:b` is a conditional, not optional chaining.
            (Some('.'), next) if !next.is_some_and(is_digit) => {
                self.take(2, SyntaxKind::QuestionDotToken)
            }
            _ => self.take(1, SyntaxKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('<'), Some('=')) => self.take(3, SyntaxKind::LessThanLessThanEqualsToken),
            (Some('<'), _) => self.take(2, SyntaxKind::LessThanLessThanToken),
            (Some('='), _) => self.take(2, SyntaxKind::LessThanEqualsToken),
            _ => self.take(1, SyntaxKind::LessThanToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::EqualsEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::EqualsEqualsToken),
            (Some('>'), _) => self.take(2, SyntaxKind::EqualsGreaterThanToken),
            _ => self.take(1, SyntaxKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::ExclamationEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::ExclamationEqualsToken),
            _ => self.take(1, SyntaxKind::ExclamationToken),
        }
    }

    fn scan_plus(&mut self) -> SyntaxKind {
        match self.char_at(1) {
            Some('+') => self.take(2, SyntaxKind::PlusPlusToken),
            Some('=') => self.take(2, SyntaxKind::PlusEqualsToken),
            _ => self.take(1, SyntaxKind::PlusToken),
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        match self.char_at(1) {
            Some('-') => self.take(2, SyntaxKind::MinusMinusToken),
            Some('=') => self.take(2, SyntaxKind::MinusEqualsToken),
            _ => self.take(1, SyntaxKind::MinusToken),
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('*'), Some('=')) => self.take(3, SyntaxKind::AsteriskAsteriskEqualsToken),
            (Some('*'), _) => self.take(2, SyntaxKind::AsteriskAsteriskToken),
            (Some('='), _) => self.take(2, SyntaxKind::AsteriskEqualsToken),
            _ => self.take(1, SyntaxKind::AsteriskToken),
        }
    }

    fn scan_slash(&mut self) -> SyntaxKind {
        // Comments were consumed as trivia; regexes come from rescan_slash_token.
        match self.char_at(1) {
            Some('=') => self.take(2, SyntaxKind::SlashEqualsToken),
            _ => self.take(1, SyntaxKind::SlashToken),
        }
    }

    fn scan_percent(&mut self) -> SyntaxKind {
        match self.char_at(1) {
            Some('=') => self.take(2, SyntaxKind::PercentEqualsToken),
            _ => self.take(1, SyntaxKind::PercentToken),
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('&'), Some('=')) => self.take(3, SyntaxKind::AmpersandAmpersandEqualsToken),
            (Some('&'), _) => self.take(2, SyntaxKind::AmpersandAmpersandToken),
            (Some('='), _) => self.take(2, SyntaxKind::AmpersandEqualsToken),
            _ => self.take(1, SyntaxKind::AmpersandToken),
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('|'), Some('=')) => self.take(3, SyntaxKind::BarBarEqualsToken),
            (Some('|'), _) => self.take(2, SyntaxKind::BarBarToken),
            (Some('='), _) => self.take(2, SyntaxKind::BarEqualsToken),
            _ => self.take(1, SyntaxKind::BarToken),
        }
    }

    fn scan_caret(&mut self) -> SyntaxKind {
        match self.char_at(1) {
            Some('=') => self.take(2, SyntaxKind::CaretEqualsToken),
            _ => self.take(1, SyntaxKind::CaretToken),
        }
    }

    // ========================================================================
    // Strings, templates and escapes
    // ========================================================================

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1; // opening quote
        let mut result = String::new();
        loop {
            let Some(ch) = self.current_char() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.scan_escape_sequence(&mut result);
                continue;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                break;
            }
            result.push(ch);
            self.pos += 1;
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    /// Scan from a backtick or a `}` up to the next `${` or closing
    /// backtick. Which kind comes out depends on both ends.
    fn scan_template_and_set_token_value(&mut self) -> SyntaxKind {
        let started_with_backtick = self.current_char() == Some('`');
        self.pos += 1;
        let mut contents = String::new();
        let kind = loop {
            let Some(ch) = self.current_char() else {
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
                '$' if self.char_at(1) == Some('{') => {
                    self.pos += 2;
                    break if started_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => self.scan_escape_sequence(&mut contents),
                // Template line endings are normalized to `\n`.
                '\r' => {
                    self.pos += 1;
                    if self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
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

    /// Positioned on a backslash; appends the cooked character(s).
    fn scan_escape_sequence(&mut self, out: &mut String) {
        self.pos += 1;
        let Some(ch) = self.current_char() else {
            self.error(&messages::UNEXPECTED_END_OF_TEXT, self.pos, 0);
            return;
        };
        self.pos += 1;
        match ch {
            '0' if !self.current_char().is_some_and(is_digit) => out.push('\0'),
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{B}'),
            'f' => out.push('\u{C}'),
            'r' => out.push('\r'),
            'u' if self.current_char() == Some('{') => {
                self.pos += 1;
                self.token_flags |= TokenFlags::EXTENDED_UNICODE_ESCAPE;
                if let Some(c) = self.scan_extended_unicode_escape() {
                    out.push(c);
                }
            }
            'u' => {
                if let Some(unit) = self.scan_exact_hex_digits(4) {
                    self.push_code_unit(unit, out);
                }
            }
            'x' => {
                if let Some(value) = self.scan_exact_hex_digits(2) {
                    out.extend(char::from_u32(value));
                }
            }
            // Line continuation.
            '\r' => {
                if self.current_char() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            other => out.push(other),
        }
    }

    /// A `\uXXXX` code unit. High surrogates pair with a following `\uXXXX`
    /// low surrogate; unpaired halves become U+FFFD.
    fn push_code_unit(&mut self, unit: u32, out: &mut String) {
        if (0xD800..0xDC00).contains(&unit)
            && self.current_char() == Some('\\')
            && self.char_at(1) == Some('u')
        {
            let low = self.text.get(self.pos + 2..self.pos + 6).and_then(|digits| {
                digits
                    .iter()
                    .try_fold(0u32, |acc, c| Some(acc * 16 + c.to_digit(16)?))
            });
            if let Some(low @ 0xDC00..=0xDFFF) = low {
                self.pos += 6;
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                out.extend(char::from_u32(combined));
                return;
            }
        }
        out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    fn scan_exact_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            match self.current_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.pos += 1;
                }
                None => {
                    self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, 0);
                    return None;
                }
            }
        }
        Some(value)
    }

    /// After `\u{`. Consumes the closing brace.
    fn scan_extended_unicode_escape(&mut self) -> Option<char> {
        let start = self.pos;
        let mut value: u32 = 0;
        let mut overflow = false;
        while let Some(digit) = self.current_char().and_then(|c| c.to_digit(16)) {
            value = value.saturating_mul(16).saturating_add(digit);
            overflow |= value > 0x10FFFF;
            self.pos += 1;
        }
        let mut valid = true;
        if self.pos == start {
            self.error(&messages::HEXADECIMAL_DIGIT_EXPECTED, self.pos, 0);
            valid = false;
        } else if overflow {
            self.error(
                &messages::AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE,
                start,
                self.pos - start,
            );
            valid = false;
        }
        if self.current_char() == Some('}') {
            self.pos += 1;
        } else {
            self.error(&messages::UNTERMINATED_UNICODE_ESCAPE_SEQUENCE, self.pos, 0);
            valid = false;
        }
        valid.then(|| char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Decode a `\uXXXX` or `\u{...}` escape at the current position
    /// without consuming it. Returns the character and the escape length.
    fn peek_unicode_escape(&self) -> Option<(char, usize)> {
        if self.current_char() != Some('\\') || self.char_at(1) != Some('u') {
            return None;
        }
        let hex_value = |digits: &[char]| {
            digits
                .iter()
                .try_fold(0u32, |acc, c| acc.checked_mul(16)?.checked_add(c.to_digit(16)?))
        };
        if self.char_at(2) == Some('{') {
            let digits_start = self.pos + 3;
            let close = self.text[digits_start..].iter().position(|&c| c == '}')?;
            if close == 0 {
                return None;
            }
            let value = hex_value(&self.text[digits_start..digits_start + close])?;
            Some((char::from_u32(value)?, close + 4))
        } else {
            let digits = self.text.get(self.pos + 2..self.pos + 6)?;
            Some((char::from_u32(hex_value(digits)?)?, 6))
        }
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let first = self.text[self.pos];

        if first == '0' {
            let radix = match self.char_at(1) {
                Some('x') | Some('X') => Some((16, TokenFlags::HEX_SPECIFIER, &messages::HEXADECIMAL_DIGIT_EXPECTED)),
                Some('b') | Some('B') => Some((2, TokenFlags::BINARY_SPECIFIER, &messages::BINARY_DIGIT_EXPECTED)),
                Some('o') | Some('O') => Some((8, TokenFlags::OCTAL_SPECIFIER, &messages::OCTAL_DIGIT_EXPECTED)),
                _ => None,
            };
            if let Some((radix, flag, missing)) = radix {
                self.pos += 2;
                self.token_flags |= flag;
                if self.scan_digits(|c| c.is_digit(radix)) == 0 {
                    self.error(missing, self.pos, 0);
                }
                return self.finish_number(start, true);
            }
            if self.is_legacy_octal() {
                self.pos += 1;
                self.scan_digits(is_octal_digit);
                self.token_flags |= TokenFlags::OCTAL;
                return self.finish_number(start, false);
            }
        }

        let mut is_integer = true;
        if first != '.' {
            self.scan_digits(is_digit);
        }
        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits(is_digit);
            is_integer = false;
        }
        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            if self.scan_digits(is_digit) == 0 {
                self.error(&messages::DIGIT_EXPECTED, self.pos, 0);
            }
            is_integer = false;
        }
        self.finish_number(start, is_integer)
    }

    /// `0` followed only by octal digits, as in `017`.
    fn is_legacy_octal(&self) -> bool {
        let digits = self.text[self.pos + 1..]
            .iter()
            .take_while(|c| is_digit(**c))
            .collect::<Vec<_>>();
        !digits.is_empty() && digits.iter().all(|c| is_octal_digit(**c))
    }

    /// Consume digits and `_` separators; returns how many digits were read.
    fn scan_digits(&mut self, is_valid: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current_char() {
            if ch == '_' && count > 0 && self.char_at(1).is_some_and(&is_valid) {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if is_valid(ch) {
                count += 1;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }

    fn finish_number(&mut self, start: usize, is_integer: bool) -> SyntaxKind {
        let kind = if is_integer && self.current_char() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.text[start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();
        self.check_for_identifier_start_after_numeric_literal();
        kind
    }

    fn check_for_identifier_start_after_numeric_literal(&mut self) {
        if !self.current_char().is_some_and(is_identifier_start) {
            return;
        }
        let start = self.pos;
        let length = self.text[start..]
            .iter()
            .take_while(|c| is_identifier_part(**c))
            .count();
        self.error(
            &messages::AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL,
            start,
            length,
        );
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    fn scan_identifier(&mut self) -> SyntaxKind {
        let mut value = String::new();
        loop {
            match self.current_char() {
                Some(ch) if is_identifier_part(ch) => {
                    value.push(ch);
                    self.pos += 1;
                }
                Some('\\') => match self.peek_unicode_escape() {
                    Some((ch, len)) if is_identifier_part(ch) => {
                        value.push(ch);
                        self.token_flags |= TokenFlags::UNICODE_ESCAPE;
                        self.pos += len;
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        let kind = SyntaxKind::from_keyword(&value).unwrap_or(SyntaxKind::Identifier);
        self.token_value = value;
        kind
    }

    // ========================================================================
    // Rescans
    // ========================================================================

    /// Extend `>` into `>=`, `>>`, `>>=`, `>>>` or `>>>=`. The scanner always
    /// produces a lone `>` so type argument lists can close one at a time.
    pub fn rescan_greater_token(&mut self) -> SyntaxKind {
        if self.token == SyntaxKind::GreaterThanToken {
            self.token = match (self.current_char(), self.char_at(1), self.char_at(2)) {
                (Some('>'), Some('>'), Some('=')) => {
                    self.take(3, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken)
                }
                (Some('>'), Some('>'), _) => {
                    self.take(2, SyntaxKind::GreaterThanGreaterThanGreaterThanToken)
                }
                (Some('>'), Some('='), _) => {
                    self.take(2, SyntaxKind::GreaterThanGreaterThanEqualsToken)
                }
                (Some('>'), _, _) => self.take(1, SyntaxKind::GreaterThanGreaterThanToken),
                (Some('='), _, _) => self.take(1, SyntaxKind::GreaterThanEqualsToken),
                _ => SyntaxKind::GreaterThanToken,
            };
        }
        self.token
    }

    /// Reinterpret `/` or `/=` as the start of a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let mut p = self.token_start + 1;
        let mut in_escape = false;
        let mut in_character_class = false;
        loop {
            let Some(&ch) = self.text.get(p) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, p, 0);
                break;
            };
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, p, 0);
                break;
            }
            if in_escape {
                in_escape = false;
            } else if ch == '/' && !in_character_class {
                p += 1;
                break;
            } else if ch == '[' {
                in_character_class = true;
            } else if ch == '\\' {
                in_escape = true;
            } else if ch == ']' {
                in_character_class = false;
            }
            p += 1;
        }
        // Flags.
        while p < self.text.len() && is_identifier_part(self.text[p]) {
            p += 1;
        }
        self.pos = p;
        self.token_value = self.text[self.token_start..p].iter().collect();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Positioned on the `}` that ends a template substitution: scan the
    /// following template middle or tail.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start;
        self.token = self.scan_template_and_set_token_value();
        self.token
    }

    /// Split `<<` so a type argument list can open on the first `<`.
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

    /// Extend an identifier or keyword with `-` segments, as in `data-id`.
    pub fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        if self.token.is_identifier_or_keyword() {
            let first = self.pos;
            while let Some(ch) = self.current_char() {
                if ch == '-' || is_identifier_part(ch) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            self.token_value.extend(self.text[first..self.pos].iter());
        }
        self.token
    }

    /// Scan in JSX child position: `<`, `</`, `{`, or a run of text.
    pub fn scan_jsx_token(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        self.token = match ch {
            '<' if self.char_at(1) == Some('/') => self.take(2, SyntaxKind::LessThanSlashToken),
            '<' => self.take(1, SyntaxKind::LessThanToken),
            '{' => self.take(1, SyntaxKind::OpenBraceToken),
            _ => self.scan_jsx_text(),
        };
        self.token
    }

    /// Text runs up to the next `{` or `<`. A run of whitespace that spans
    /// a line break is reported as `JsxTextAllWhiteSpaces`.
    fn scan_jsx_text(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut only_white_space_with_line_break = false;
        let mut seen_text = false;
        while let Some(ch) = self.current_char() {
            if ch == '{' {
                break;
            }
            if ch == '<' {
                if is_conflict_marker_trivia(&self.text, self.pos) {
                    self.error(&messages::MERGE_CONFLICT_MARKER_ENCOUNTERED, self.pos, 7);
                    self.pos = skip_conflict_marker_trivia(&self.text, self.pos);
                    continue;
                }
                break;
            }
            if is_line_break(ch) && !seen_text {
                only_white_space_with_line_break = true;
            } else if !is_white_space_like(ch) {
                seen_text = true;
                only_white_space_with_line_break = false;
            }
            self.pos += 1;
        }
        self.token_value = self.text[start..self.pos].iter().collect();
        if only_white_space_with_line_break {
            SyntaxKind::JsxTextAllWhiteSpaces
        } else {
            SyntaxKind::JsxText
        }
    }

    /// After `=` in an attribute: a quoted string taken verbatim, or
    /// anything else scanned normally.
    pub fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        match self.current_char() {
            Some(quote @ ('"' | '\'')) => {
                self.full_start = self.pos;
                self.token_start = self.pos;
                self.token_flags = TokenFlags::NONE;
                self.pos += 1;
                let start = self.pos;
                while let Some(ch) = self.current_char() {
                    if ch == quote {
                        break;
                    }
                    self.pos += 1;
                }
                self.token_value = self.text[start..self.pos].iter().collect();
                if self.is_eof() {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(&messages::UNTERMINATED_STRING_LITERAL, self.pos, 0);
                } else {
                    self.pos += 1;
                }
                self.token = SyntaxKind::StringLiteral;
                self.token
            }
            _ => self.scan(),
        }
    }

    /// Rescan the current token from its full start as a JSX child token.
    pub fn rescan_jsx_token(&mut self) -> SyntaxKind {
        self.pos = self.full_start;
        self.scan_jsx_token()
    }
}

/// Scan every token of `text`, trivia skipped. Errors are discarded.
pub fn tokenize(text: &str) -> Vec<TokenInfo> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push(scanner.token_info());
    }
    tokens
}
