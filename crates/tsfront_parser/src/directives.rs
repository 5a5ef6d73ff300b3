//! Triple-slash directives and `@ts-check` pragmas.
//!
//! Only the comments before the first token of the file are looked at.

use std::sync::OnceLock;

use log::trace;
use regex::Regex;
use serde::Serialize;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_core::text::{SourceText, TextSpan};
use tsfront_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use tsfront_scanner::{leading_comment_ranges, CommentRange};

/// A `/// <reference path="..."/>` or `/// <reference types="..."/>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReference {
    pub pos: u32,
    pub end: u32,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmdDependency {
    pub path: String,
    pub name: Option<String>,
}

/// `// @ts-check` or `// @ts-nocheck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckJsDirective {
    pub enabled: bool,
    pub pos: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directives {
    pub referenced_files: Vec<FileReference>,
    pub type_reference_directives: Vec<FileReference>,
    pub has_no_default_lib: bool,
    pub amd_dependencies: Vec<AmdDependency>,
    /// Name from `/// <amd-module name="..."/>`.
    pub module_name: Option<String>,
    pub check_js_directive: Option<CheckJsDirective>,
}

macro_rules! regex {
    ($pattern:expr) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($pattern).unwrap_or_else(|err| panic!("bad directive pattern: {err}")))
    }};
}

enum Reference {
    NoDefaultLib,
    Path(String),
    Types(String),
    Invalid,
}

fn parse_reference(comment: &str) -> Option<Reference> {
    if !regex!(r"^///\s*<reference\s+").is_match(comment) {
        return None;
    }
    if regex!(r#"^///\s*<reference\s+no-default-lib\s*=\s*("[^"]*"|'[^']*')\s*/>"#).is_match(comment) {
        return Some(Reference::NoDefaultLib);
    }
    let quoted = |re: &Regex| re.captures(comment).and_then(|c| c.get(2).or_else(|| c.get(3))).map(|m| m.as_str().to_string());
    if let Some(path) = quoted(regex!(r#"^///\s*<reference\s+path\s*=\s*("(.+?)"|'(.+?)').*?/>"#)) {
        return Some(Reference::Path(path));
    }
    if let Some(types) = quoted(regex!(r#"^///\s*<reference\s+types\s*=\s*("(.+?)"|'(.+?)').*?/>"#)) {
        return Some(Reference::Types(types));
    }
    Some(Reference::Invalid)
}

fn quoted_attribute(comment: &str, re: &Regex) -> Option<String> {
    re.captures(comment)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
}

/// Read the directives in the file's leading comments. Malformed ones are
/// reported, never fatal.
pub fn process_directives(file_name: &str, source: &SourceText) -> (Directives, Vec<Diagnostic>) {
    let mut directives = Directives::default();
    let mut diagnostics = Vec::new();
    let mut report = |range: &CommentRange, message: &DiagnosticMessage| {
        diagnostics.push(Diagnostic::with_location(
            file_name,
            TextSpan::from_bounds(range.pos, range.end),
            message,
            &[],
        ));
    };

    for range in leading_comment_ranges(source.chars(), 0) {
        if range.kind != SyntaxKind::SingleLineCommentTrivia {
            continue;
        }
        let comment = source.slice(range.pos, range.end);
        match parse_reference(comment) {
            Some(Reference::NoDefaultLib) => directives.has_no_default_lib = true,
            Some(Reference::Path(file_name)) => directives.referenced_files.push(FileReference {
                pos: range.pos,
                end: range.end,
                file_name,
            }),
            Some(Reference::Types(file_name)) => directives.type_reference_directives.push(FileReference {
                pos: range.pos,
                end: range.end,
                file_name,
            }),
            Some(Reference::Invalid) => report(&range, &messages::INVALID_REFERENCE_DIRECTIVE_SYNTAX),
            None => {
                if let Some(name) =
                    quoted_attribute(comment, regex!(r#"^///\s*<amd-module\s+name\s*=\s*(?:"(.+?)"|'(.+?)')"#))
                {
                    if directives.module_name.is_some() {
                        report(&range, &messages::AN_AMD_MODULE_CANNOT_HAVE_MULTIPLE_NAME_ASSIGNMENTS);
                    }
                    directives.module_name = Some(name);
                }
                if regex!(r"^///\s*<amd-dependency\s").is_match(comment) {
                    if let Some(path) = quoted_attribute(comment, regex!(r#"\spath\s*=\s*(?:"(.+?)"|'(.+?)')"#)) {
                        let name = quoted_attribute(comment, regex!(r#"\sname\s*=\s*(?:"(.+?)"|'(.+?)')"#));
                        directives.amd_dependencies.push(AmdDependency { path, name });
                    }
                }
                if let Some(captures) = regex!(r"(?i)^///?\s*@(ts-check|ts-nocheck)\s*$").captures(comment) {
                    directives.check_js_directive = Some(CheckJsDirective {
                        enabled: captures[1].eq_ignore_ascii_case("ts-check"),
                        pos: range.pos,
                        end: range.end,
                    });
                }
            }
        }
    }

    trace!(
        "{}: {} references, {} type references, {} amd dependencies",
        file_name,
        directives.referenced_files.len(),
        directives.type_reference_directives.len(),
        directives.amd_dependencies.len()
    );
    (directives, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn scan(text: &str) -> (Directives, Vec<Diagnostic>) {
        process_directives("test.ts", &SourceText::new(text))
    }

    #[test]
    fn test_references() {
        let (directives, diagnostics) = scan(indoc! {r#"
            /// <reference path="./lib.d.ts" />
            /// <reference types='node'/>
            /// <reference no-default-lib="true"/>
            let a = 1;
        "#});
        assert!(diagnostics.is_empty());
        assert_eq!(directives.referenced_files.len(), 1);
        assert_eq!(directives.referenced_files[0].file_name, "./lib.d.ts");
        assert_eq!(directives.referenced_files[0].pos, 0);
        assert_eq!(directives.type_reference_directives[0].file_name, "node");
        assert!(directives.has_no_default_lib);
    }

    #[test]
    fn test_invalid_reference() {
        let (directives, diagnostics) = scan("/// <reference lib=\"es2015\" />\n");
        assert!(directives.referenced_files.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, 1084);
        assert_eq!(diagnostics[0].start(), 0);
    }

    #[test]
    fn test_amd_directives() {
        let (directives, diagnostics) = scan(indoc! {r#"
            /// <amd-module name="first"/>
            /// <amd-module name="second"/>
            /// <amd-dependency path="dep" name="Dep"/>
            /// <amd-dependency name="nameless"/>
        "#});
        assert_eq!(directives.module_name.as_deref(), Some("second"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, 2458);
        assert_eq!(
            directives.amd_dependencies,
            [AmdDependency { path: "dep".to_string(), name: Some("Dep".to_string()) }]
        );
    }

    #[test]
    fn test_check_js_pragma() {
        let (directives, _) = scan("// @ts-nocheck\nlet a;");
        assert_eq!(directives.check_js_directive.map(|d| d.enabled), Some(false));
        let (directives, _) = scan("/* leading */\n// @ts-check\n");
        assert_eq!(directives.check_js_directive.map(|d| d.enabled), Some(true));
    }

    #[test]
    fn test_only_leading_comments_count() {
        let (directives, _) = scan("let a;\n/// <reference path=\"late.ts\" />\n");
        assert!(directives.referenced_files.is_empty());
    }
}
