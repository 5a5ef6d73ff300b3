//! Values the scanner hands out besides the current-token accessors.

use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::TokenFlags;
use tsfront_diagnostics::DiagnosticMessage;

/// A snapshot of one scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub kind: SyntaxKind,
    /// Start including leading trivia.
    pub full_start: u32,
    /// Start of the token itself.
    pub start: u32,
    /// End position (exclusive).
    pub end: u32,
    /// Cooked value for identifiers and literals, empty otherwise.
    pub text: String,
    pub flags: TokenFlags,
}

/// A lexical error. Positions are character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    pub message: &'static DiagnosticMessage,
    pub start: u32,
    pub length: u32,
}
