//! Rich rendering of diagnostics through `miette`.
//!
//! Diagnostics carry character offsets; miette wants byte offsets into the
//! source it prints, so a report is built against the file's [`SourceText`].

use crate::{Diagnostic, DiagnosticCategory};
use miette::{LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use std::fmt;
use tsfront_core::text::SourceText;

/// A diagnostic bundled with the source it points into, ready for a
/// `miette` report handler.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    code: u32,
    category: DiagnosticCategory,
    source_code: NamedSource<String>,
    span: Option<SourceSpan>,
    related: Vec<DiagnosticReport>,
}

impl DiagnosticReport {
    pub fn new(diagnostic: &Diagnostic, file_name: &str, source: &SourceText) -> Self {
        let span = diagnostic.span.map(|span| {
            let start = source.byte_offset(span.start);
            let end = source.byte_offset(span.end());
            SourceSpan::new(start.into(), end - start)
        });
        Self {
            message: diagnostic.message_text.clone(),
            code: diagnostic.code,
            category: diagnostic.category,
            source_code: NamedSource::new(file_name, source.as_str().to_string()),
            span,
            related: diagnostic
                .related_information
                .iter()
                .map(|related| DiagnosticReport::new(related, file_name, source))
                .collect(),
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }
}

impl miette::Diagnostic for DiagnosticReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("TS{}", self.code)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.category {
            DiagnosticCategory::Error => Severity::Error,
            DiagnosticCategory::Warning => Severity::Warning,
            DiagnosticCategory::Suggestion | DiagnosticCategory::Message => Severity::Advice,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.source_code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(None, span))))
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        if self.related.is_empty() {
            return None;
        }
        Some(Box::new(
            self.related.iter().map(|r| r as &dyn miette::Diagnostic),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;
    use miette::Diagnostic as _;
    use tsfront_core::text::TextSpan;

    #[test]
    fn test_report_translates_char_offsets() {
        let source = SourceText::new("let é = ;");
        let diag = Diagnostic::with_location(
            "a.ts",
            TextSpan::new(8, 1),
            &messages::EXPRESSION_EXPECTED,
            &[],
        );
        let report = DiagnosticReport::new(&diag, "a.ts", &source);
        let label = report.labels().and_then(|mut it| it.next());
        assert_eq!(label.map(|l| l.offset()), Some(9));
        assert_eq!(report.to_string(), "Expression expected.");
        assert_eq!(report.severity(), Some(Severity::Error));
    }
}
