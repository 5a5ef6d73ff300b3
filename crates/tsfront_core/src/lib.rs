//! tsfront_core: Core utilities shared by the tsfront front end.
//!
//! Provides character-offset text types, the source text container used for
//! slicing by node position, and the identifier interning table.

pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{IdentifierTable, InternedString};
pub use text::{LineAndColumn, LineMap, SourceText, TextPos, TextRange, TextSpan};
