//! tsfront_scanner: Lexer for TypeScript and TSX source text.
//!
//! The [`Scanner`] produces one token at a time, skipping trivia, and
//! supports the rescans the parser needs for context-sensitive tokens:
//! - `>` sequences in type argument lists
//! - regular expression literals
//! - template continuations after a substitution
//! - JSX text, identifiers and attribute values
//!
//! Raw-text trivia helpers (comment ranges, trivia skipping) live in
//! [`trivia`] and work without a scanner.

pub mod char_codes;
mod scanner;
mod token;
pub mod trivia;

pub use scanner::{tokenize, ErrorCallback, Scanner, ScannerState};
pub use token::{ScanError, TokenInfo};
pub use trivia::{leading_comment_ranges, skip_trivia, trailing_comment_ranges, CommentRange};
