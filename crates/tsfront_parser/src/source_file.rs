//! The result of parsing one file.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tsfront_ast::node::{AstArena, Node, NodeData};
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::{ModifierFlags, NodeId};
use tsfront_ast::{ancestors, children, contains_parse_error, descendants, descendants_of_kind, find_ancestor};
use tsfront_core::intern::IdentifierTable;
use tsfront_core::text::{LineAndColumn, LineMap, SourceText, TextPos};
use tsfront_diagnostics::{Diagnostic, DiagnosticReport};
use tsfront_path::{LanguageVariant, ScriptKind};
use tsfront_scanner::{leading_comment_ranges, skip_trivia, CommentRange};

use crate::directives::Directives;
use crate::jsdoc::JsDoc;

/// A parsed file: the node arena, its root, and everything the parse
/// learned about the file on the way.
pub struct SourceFile {
    pub file_name: String,
    pub text: SourceText,
    pub arena: AstArena,
    pub root: NodeId,
    pub script_kind: ScriptKind,
    pub language_variant: LanguageVariant,
    pub is_declaration_file: bool,
    /// First statement that makes the file a module, if any.
    pub external_module_indicator: Option<NodeId>,
    pub node_count: usize,
    pub identifier_count: usize,
    pub parse_diagnostics: Vec<Diagnostic>,
    pub directives: Directives,
    pub(crate) identifiers: IdentifierTable,
    pub(crate) jsdoc: FxHashMap<NodeId, Vec<JsDoc>>,
    pub(crate) line_map: OnceLock<LineMap>,
}

impl SourceFile {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.arena.kind(id)
    }

    pub fn statements(&self) -> &[NodeId] {
        match &self.arena[self.root].data {
            NodeData::SourceFile { statements, .. } => &statements.nodes,
            _ => &[],
        }
    }

    pub fn end_of_file_token(&self) -> Option<NodeId> {
        match self.arena[self.root].data {
            NodeData::SourceFile { end_of_file_token, .. } => Some(end_of_file_token),
            _ => None,
        }
    }

    pub fn is_external_module(&self) -> bool {
        self.external_module_indicator.is_some()
    }

    pub fn has_parse_errors(&self) -> bool {
        self.parse_diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Distinct identifier texts, in first-seen order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.identifiers.strings().filter(|name| !name.is_empty())
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .identifier_text()
            .map(|text| self.identifiers.resolve(text))
    }

    /// Raw `pos..end` text, leading trivia included.
    pub fn get_source_text_of_node(&self, id: NodeId) -> &str {
        let node = self.node(id);
        self.text.slice(node.pos, node.end)
    }

    /// Text of the node starting at its first token.
    pub fn get_text_of_node(&self, id: NodeId) -> &str {
        let node = self.node(id);
        if node.is_missing() {
            return "";
        }
        self.text.slice(self.token_start(id), node.end)
    }

    /// Start of the node's first token.
    pub fn token_start(&self, id: NodeId) -> u32 {
        let node = self.node(id);
        skip_trivia(self.text.chars(), node.pos, false, false).min(node.end)
    }

    /// Text of a declaration's name: identifier, string or numeric literal,
    /// or the source text of anything else.
    pub fn declaration_name_text(&self, id: NodeId) -> Option<&str> {
        let name = self.node(id).name()?;
        match &self.node(name).data {
            NodeData::Identifier(_) => self.identifier_text(name),
            NodeData::Literal(literal) => Some(literal.text.as_str()),
            _ => Some(self.get_text_of_node(name)),
        }
    }

    pub fn modifier_flags(&self, id: NodeId) -> ModifierFlags {
        self.arena.modifier_flags(id)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        children(&self.arena, id)
    }

    /// Every node in the file in source order, the root excluded.
    pub fn descendants(&self) -> Vec<NodeId> {
        descendants(&self.arena, self.root)
    }

    pub fn descendants_of_kind(&self, kind: SyntaxKind) -> Vec<NodeId> {
        descendants_of_kind(&self.arena, self.root, kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Parent chain of `id`. Empty when parent nodes weren't set.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        ancestors(&self.arena, id)
    }

    pub fn find_ancestor(&self, id: NodeId, pred: impl FnMut(NodeId, &Node) -> bool) -> Option<NodeId> {
        find_ancestor(&self.arena, id, pred)
    }

    pub fn contains_parse_error(&self, id: NodeId) -> bool {
        contains_parse_error(&self.arena, id)
    }

    /// Comments in the node's leading trivia.
    pub fn leading_comment_ranges_of(&self, id: NodeId) -> Vec<CommentRange> {
        leading_comment_ranges(self.text.chars(), self.node(id).pos)
    }

    /// Documentation blocks attached to `id`, nearest last.
    pub fn jsdoc_of(&self, id: NodeId) -> &[JsDoc] {
        self.jsdoc.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Zero-based line and column of a character offset. The line map is
    /// built on first use.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        self.line_map.get_or_init(|| self.text.line_map()).line_and_column_of(pos)
    }

    /// The parse diagnostics as `miette` reports over this file's text.
    pub fn diagnostic_reports(&self) -> Vec<DiagnosticReport> {
        self.parse_diagnostics
            .iter()
            .map(|diagnostic| DiagnosticReport::new(diagnostic, &self.file_name, &self.text))
            .collect()
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("file_name", &self.file_name)
            .field("script_kind", &self.script_kind)
            .field("node_count", &self.node_count)
            .field("identifier_count", &self.identifier_count)
            .field("parse_diagnostics", &self.parse_diagnostics.len())
            .finish_non_exhaustive()
    }
}

/// The first statement that makes a file a module: anything exported, an
/// import, an `import x = require(...)`, or an export assignment or
/// declaration.
pub(crate) fn external_module_indicator(arena: &AstArena, root: NodeId) -> Option<NodeId> {
    let NodeData::SourceFile { statements, .. } = &arena[root].data else {
        return None;
    };
    statements.iter().find(|&statement| {
        let node = &arena[statement];
        arena.has_modifier(statement, ModifierFlags::EXPORT)
            || match node.kind {
                SyntaxKind::ImportDeclaration | SyntaxKind::ExportAssignment | SyntaxKind::ExportDeclaration => true,
                SyntaxKind::ImportEqualsDeclaration => matches!(
                    node.data,
                    NodeData::ImportEquals { module_reference, .. }
                        if arena.kind(module_reference) == SyntaxKind::ExternalModuleReference
                ),
                _ => false,
            }
    })
}

#[cfg(test)]
mod tests {
    use crate::parse_source_file;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_core::text::LineAndColumn;

    #[test]
    fn test_node_text_queries() {
        let file = parse_source_file("test.ts", "let a = 1;\n  function  foo() {}");
        let function = file.statements()[1];
        assert_eq!(file.get_source_text_of_node(function), "\n  function  foo() {}");
        assert_eq!(file.get_text_of_node(function), "function  foo() {}");
        assert_eq!(file.declaration_name_text(function), Some("foo"));
        assert_eq!(file.token_start(function), 13);
    }

    #[test]
    fn test_identifiers_and_counts() {
        let file = parse_source_file("test.ts", "let a = b + a;");
        let names: Vec<_> = file.identifiers().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(file.identifier_count, 3);
        assert_eq!(file.node_count, file.arena.len());
    }

    #[test]
    fn test_external_module_indicator() {
        for (text, is_module) in [
            ("let a = 1;", false),
            ("export const a = 1;", true),
            ("import a from 'a';", true),
            ("import a = require('a');", true),
            ("import a = b.c;", false),
            ("export = a;", true),
            ("export { a };", true),
            ("declare module 'a' {}", false),
        ] {
            let file = parse_source_file("test.ts", text);
            assert_eq!(file.is_external_module(), is_module, "{text}");
        }
    }

    #[test]
    fn test_ancestors_after_linking() {
        let file = parse_source_file("test.ts", "function f() { return 1; }");
        let literal = file.descendants_of_kind(SyntaxKind::NumericLiteral)[0];
        let kinds: Vec<_> = file.ancestors(literal).map(|id| file.kind(id)).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::ReturnStatement,
                SyntaxKind::Block,
                SyntaxKind::FunctionDeclaration,
                SyntaxKind::SourceFile
            ]
        );
        let function = file.find_ancestor(literal, |_, node| node.kind == SyntaxKind::FunctionDeclaration);
        assert_eq!(function, Some(file.statements()[0]));
    }

    #[test]
    fn test_line_and_column() {
        let file = parse_source_file("test.ts", "let a;\r\nlet b = ;\n");
        let start = file.parse_diagnostics[0].start();
        assert_eq!(file.line_and_column_of(start), LineAndColumn::new(1, 8));
        assert_eq!(file.line_and_column_of(0), LineAndColumn::new(0, 0));
    }

    #[test]
    fn test_leading_comments() {
        let file = parse_source_file("test.ts", "let a;\n// one\n/* two */\nlet b;");
        let ranges = file.leading_comment_ranges_of(file.statements()[1]);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].kind, SyntaxKind::SingleLineCommentTrivia);
        assert_eq!(ranges[1].kind, SyntaxKind::MultiLineCommentTrivia);
    }

    #[test]
    fn test_contains_parse_error() {
        let file = parse_source_file("test.ts", "let x: ;\nlet y = 1;");
        assert!(file.contains_parse_error(file.statements()[0]));
        assert!(!file.contains_parse_error(file.statements()[1]));
    }

    #[test]
    fn test_unclosed_brace_points_at_its_opener() {
        use miette::Diagnostic as _;

        let file = parse_source_file("test.ts", "function f() {\n  let a = 1;\n");
        assert_eq!(file.parse_diagnostics.len(), 1);
        let diagnostic = &file.parse_diagnostics[0];
        assert_eq!(diagnostic.message_text, "'}' expected.");
        assert_eq!(diagnostic.related_information.len(), 1);
        assert_eq!(diagnostic.related_information[0].code, 1007);
        assert_eq!(diagnostic.related_information[0].start(), 13);

        let reports = file.diagnostic_reports();
        assert_eq!(reports[0].code(), 1005);
        assert_eq!(reports[0].related().map(Iterator::count), Some(1));
    }
}
