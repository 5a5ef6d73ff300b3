//! tsfront_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! The message catalog lives in [`messages`]; it is compile-time constant
//! data shared by every parse. A [`Diagnostic`] is a plain value with a
//! resolved message text and a location in character offsets.

pub mod messages;
pub mod report;

use std::fmt;
use tsfront_core::text::TextSpan;

pub use report::DiagnosticReport;

/// Diagnostic category, matching TypeScript's DiagnosticCategory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g. 1005).
    pub code: u32,
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file this diagnostic belongs to, if any.
    pub file: Option<String>,
    /// Location in character offsets, if any.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// A diagnostic not tied to any file.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    pub fn with_location(
        file: impl Into<String>,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.into()),
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Start offset, or 0 for a global diagnostic.
    pub fn start(&self) -> u32 {
        self.span.map(|s| s.start).unwrap_or(0)
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Whether this diagnostic was produced from the given template.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == message.code
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} TS{}: {}", self.category, self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, ... in a template with the given arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a parse.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.diagnostics.last()
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Order by file, then start offset. Global diagnostics come first and
    /// ties keep their insertion order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| (&a.file, a.start()).cmp(&(&b.file, b.start())));
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Attach `related` to the most recent diagnostic.
    pub fn relate_to_last(&mut self, related: Diagnostic) {
        if let Some(last) = self.diagnostics.last_mut() {
            last.related_information.push(related);
        }
    }

    /// Drop every diagnostic recorded after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.diagnostics.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Expected corresponding JSX closing tag for '{0}'.", &["div"]);
        assert_eq!(msg, "Expected corresponding JSX closing tag for 'div'.");
    }

    #[test]
    fn test_format_message_no_args() {
        let msg = format_message("Unexpected token.", &[]);
        assert_eq!(msg, "Unexpected token.");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::with_location(
            "test.ts",
            TextSpan::new(10, 5),
            &messages::_0_EXPECTED,
            &[";"],
        );
        assert_eq!(format!("{}", diag), "test.ts(10): error TS1005: ';' expected.");
    }

    #[test]
    fn test_diagnostic_fields() {
        let diag = Diagnostic::with_location("a.ts", TextSpan::new(3, 2), &messages::UNEXPECTED_TOKEN, &[]);
        assert_eq!(diag.start(), 3);
        assert_eq!(diag.code, 1012);
        assert!(diag.is_error());
        assert!(diag.is(&messages::UNEXPECTED_TOKEN));
        assert!(!diag.is(&messages::IDENTIFIER_EXPECTED));
    }

    #[test]
    fn test_diagnostic_collection() {
        let at = |start| Diagnostic::with_location("a.ts", TextSpan::new(start, 1), &messages::UNEXPECTED_TOKEN, &[]);
        let mut collection = DiagnosticCollection::new();
        assert!(collection.is_empty());

        collection.add(at(1));
        collection.add(at(4));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.last().map(Diagnostic::start), Some(4));

        collection.truncate(1);
        assert_eq!(collection.into_diagnostics(), vec![at(1)]);
    }

    #[test]
    fn test_global_diagnostic() {
        let diag = Diagnostic::new(&messages::_0_EXPECTED, &["}"]);
        assert_eq!(diag.file, None);
        assert_eq!(diag.span, None);
        assert_eq!(diag.start(), 0);
        assert_eq!(format!("{}", diag), "error TS1005: '}' expected.");
    }

    #[test]
    fn test_collection_counts_errors() {
        let mut collection = DiagnosticCollection::new();
        assert!(!collection.has_errors());
        let mut warning = Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]);
        warning.category = DiagnosticCategory::Warning;
        collection.add(warning);
        assert!(!collection.has_errors());
        assert_eq!(collection.error_count(), 0);

        collection.extend([
            Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]),
            Diagnostic::new(&messages::IDENTIFIER_EXPECTED, &[]),
        ]);
        assert_eq!(collection.len(), 3);
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 2);
    }

    #[test]
    fn test_collection_sort() {
        let at = |file: &str, start, message| Diagnostic::with_location(file, TextSpan::new(start, 1), message, &[]);
        let mut collection = DiagnosticCollection::new();
        collection.extend([
            at("b.ts", 2, &messages::UNEXPECTED_TOKEN),
            at("a.ts", 9, &messages::UNEXPECTED_TOKEN),
            at("a.ts", 4, &messages::UNEXPECTED_TOKEN),
            at("a.ts", 4, &messages::IDENTIFIER_EXPECTED),
        ]);
        collection.add(Diagnostic::new(&messages::UNEXPECTED_TOKEN, &[]));
        collection.sort();
        let diagnostics = collection.into_diagnostics();
        let order: Vec<(Option<&str>, u32, u32)> =
            diagnostics.iter().map(|d| (d.file.as_deref(), d.start(), d.code)).collect();
        assert_eq!(
            order,
            vec![(None, 0, 1012), (Some("a.ts"), 4, 1012), (Some("a.ts"), 4, 1003), (Some("a.ts"), 9, 1012), (Some("b.ts"), 2, 1012)]
        );
    }
}
