//! The recursive descent parser.
//!
//! The parser pulls tokens from a [`Scanner`] one at a time and allocates
//! each node into the file's [`AstArena`] when the node is finished, so a
//! node's children always have smaller ids than the node itself. Grammar
//! productions are split by area; every submodule adds an `impl Parser`
//! block:
//!
//! - `lists`: the generic list engine and its per-context predicates
//! - `statements`: statements and blocks
//! - `declarations`: functions, classes, interfaces, modules, imports
//! - `types`: type annotations and type members
//! - `expressions`: precedence climbing, arrows, member and call chains
//! - `jsx`: elements, fragments, attributes and children

mod declarations;
mod expressions;
mod jsx;
mod lists;
mod statements;
mod types;

use std::sync::OnceLock;

use log::{debug, trace};
use tsfront_ast::link::link_parents;
use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_core::intern::IdentifierTable;
use tsfront_core::text::{SourceText, TextSpan};
use tsfront_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use tsfront_path::{is_declaration_file_name, normalize_path, LanguageVariant, ScriptKind};
use tsfront_scanner::{Scanner, ScannerState};

use crate::options::ParseOptions;
use crate::source_file::{self, SourceFile};
use crate::{directives, jsdoc, ParseError};

pub(crate) use lists::ParsingContext;

/// Maximum nesting of statements, expressions and types before the parser
/// stops descending.
const MAX_RECURSION_DEPTH: u32 = 100;

/// Answer of a look-ahead that can't always decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tristate {
    False,
    True,
    Unknown,
}

bitflags::bitflags! {
    /// How a signature's parameter list and body are parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct SignatureFlags: u8 {
        const NONE = 0;
        const YIELD = 1 << 0;
        const AWAIT = 1 << 1;
        const TYPE = 1 << 2;
        const IGNORE_MISSING_OPEN_BRACE = 1 << 3;
        /// Fail instead of recovering when `(` or `)` is missing.
        const REQUIRE_COMPLETE_PARAMETER_LIST = 1 << 4;
    }
}

/// Everything a speculative parse may change.
struct Snapshot {
    scanner: ScannerState,
    diagnostic_count: usize,
    parse_error_pending: bool,
    context_flags: NodeFlags,
    node_count: usize,
    identifier_count: usize,
}

/// Parses one file. Consumed by the parse.
pub struct Parser {
    scanner: Scanner,
    file_name: String,
    source: SourceText,
    options: ParseOptions,
    script_kind: ScriptKind,
    language_variant: LanguageVariant,
    arena: AstArena,
    identifiers: IdentifierTable,
    diagnostics: DiagnosticCollection,
    context_flags: NodeFlags,
    /// Bit set of the list contexts currently open.
    parsing_context: u32,
    /// Set by every reported error, consumed by the next finished node.
    parse_error_before_next_finished_node: bool,
    identifier_count: usize,
    recursion_depth: u32,
    internal_error: Option<String>,
}

impl Parser {
    pub fn new(file_name: &str, text: &str, options: ParseOptions) -> Self {
        Self::from_source(file_name, SourceText::new(text), options)
    }

    pub fn from_source(file_name: &str, source: SourceText, options: ParseOptions) -> Self {
        let script_kind = options.script_kind_for(file_name);
        let context_flags = if script_kind.is_javascript() {
            NodeFlags::JAVASCRIPT_FILE
        } else {
            NodeFlags::NONE
        };
        Self {
            scanner: Scanner::from_source(&source),
            file_name: normalize_path(file_name),
            arena: AstArena::with_capacity(source.len() as usize / 4),
            source,
            options,
            script_kind,
            language_variant: script_kind.language_variant(),
            identifiers: IdentifierTable::new(),
            diagnostics: DiagnosticCollection::new(),
            context_flags,
            parsing_context: 0,
            parse_error_before_next_finished_node: false,
            identifier_count: 0,
            recursion_depth: 0,
            internal_error: None,
        }
    }

    /// Parse the whole file. Syntax errors become diagnostics on the
    /// result; only a broken parser invariant is an `Err`.
    pub fn try_parse_source_file(mut self) -> Result<SourceFile, ParseError> {
        debug!("parsing {} as {:?}", self.file_name, self.script_kind);
        self.next_token();
        let statements = self.parse_list(ParsingContext::SourceElements, Self::parse_statement);
        if self.token() != SyntaxKind::EndOfFileToken {
            self.report_internal_error(format!(
                "statement list stopped at {:?} before the end of the file",
                self.token()
            ));
        }
        let end_of_file_token = self.parse_token_node();
        let root = self.finish_at(Node::new(
            SyntaxKind::SourceFile,
            0,
            self.source.len(),
            NodeData::SourceFile {
                statements,
                end_of_file_token,
            },
        ));
        self.into_source_file(root)
    }

    /// Like [`Parser::try_parse_source_file`], for callers that treat a
    /// parser bug as fatal.
    pub fn parse_source_file(self) -> SourceFile {
        match self.try_parse_source_file() {
            Ok(file) => file,
            Err(err) => panic!("{err}"),
        }
    }

    /// Parse the whole text as one possibly dotted name such as `a.b.c`.
    /// `None` unless the name covers the text without errors. The name is
    /// not attached to the returned file's root.
    pub fn parse_isolated_entity_name(mut self) -> Option<(SourceFile, NodeId)> {
        self.next_token();
        let entity_name = self.parse_entity_name(true, None);
        if self.token() != SyntaxKind::EndOfFileToken || !self.diagnostics.is_empty() {
            return None;
        }
        let end_of_file_token = self.parse_token_node();
        let root = self.finish_at(Node::new(
            SyntaxKind::SourceFile,
            0,
            self.source.len(),
            NodeData::SourceFile {
                statements: NodeArray::empty(0),
                end_of_file_token,
            },
        ));
        self.into_source_file(root).ok().map(|file| (file, entity_name))
    }

    fn into_source_file(self, root: NodeId) -> Result<SourceFile, ParseError> {
        if let Some(message) = self.internal_error {
            return Err(ParseError::Internal { message });
        }
        let Parser {
            file_name,
            source,
            options,
            script_kind,
            language_variant,
            mut arena,
            identifiers,
            mut diagnostics,
            identifier_count,
            ..
        } = self;

        if options.set_parent_nodes {
            link_parents(&mut arena, root);
        }
        let directives = if options.process_reference_directives {
            let (directives, errors) = directives::process_directives(&file_name, &source);
            diagnostics.extend(errors);
            directives
        } else {
            Default::default()
        };
        let parse_diagnostics = diagnostics.into_diagnostics();
        let jsdoc = if options.collect_jsdoc {
            jsdoc::collect_jsdoc(&arena, &source)
        } else {
            Default::default()
        };
        let external_module_indicator = source_file::external_module_indicator(&arena, root);

        debug!(
            "parsed {}: {} nodes, {} identifiers, {} diagnostics",
            file_name,
            arena.len(),
            identifier_count,
            parse_diagnostics.len()
        );
        Ok(SourceFile {
            is_declaration_file: is_declaration_file_name(&file_name),
            node_count: arena.len(),
            file_name,
            text: source,
            arena,
            root,
            script_kind,
            language_variant,
            external_module_indicator,
            identifier_count,
            parse_diagnostics,
            directives,
            identifiers,
            jsdoc,
            line_map: OnceLock::new(),
        })
    }

    fn report_internal_error(&mut self, message: String) {
        debug!("internal parser error in {}: {}", self.file_name, message);
        self.internal_error.get_or_insert(message);
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn token(&self) -> SyntaxKind { self.scanner.token() }

    fn next_token(&mut self) -> SyntaxKind {
        self.scanner.scan();
        self.report_scan_errors()
    }

    /// Full start of the current token: where a node starting here begins.
    #[inline]
    fn node_pos(&self) -> u32 { self.scanner.full_start() }

    #[inline]
    fn token_pos(&self) -> u32 { self.scanner.token_start() }

    #[inline]
    fn has_preceding_line_break(&self) -> bool { self.scanner.has_preceding_line_break() }

    /// Move queued lexical errors into the diagnostics, then return the
    /// current token.
    fn report_scan_errors(&mut self) -> SyntaxKind {
        if self.scanner.has_pending_errors() {
            for error in self.scanner.take_errors() {
                self.parse_error_at_position(error.start, error.length, error.message, &[]);
            }
        }
        self.token()
    }

    fn re_scan_greater_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_greater_token();
        self.report_scan_errors()
    }

    fn re_scan_slash_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_slash_token();
        self.report_scan_errors()
    }

    fn re_scan_template_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_template_token();
        self.report_scan_errors()
    }

    fn re_scan_less_than_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_less_than_token();
        self.report_scan_errors()
    }

    fn re_scan_jsx_token(&mut self) -> SyntaxKind {
        self.scanner.rescan_jsx_token();
        self.report_scan_errors()
    }

    fn scan_jsx_identifier(&mut self) -> SyntaxKind {
        self.scanner.scan_jsx_identifier();
        self.report_scan_errors()
    }

    fn scan_jsx_text(&mut self) -> SyntaxKind {
        self.scanner.scan_jsx_token();
        self.report_scan_errors()
    }

    fn scan_jsx_attribute_value(&mut self) -> SyntaxKind {
        self.scanner.scan_jsx_attribute_value();
        self.report_scan_errors()
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        self.parse_expected_with(kind, None, true)
    }

    /// Consume `kind` or report `message` (default: "'kind' expected.").
    fn parse_expected_with(
        &mut self,
        kind: SyntaxKind,
        message: Option<&DiagnosticMessage>,
        should_advance: bool,
    ) -> bool {
        if self.token() == kind {
            if should_advance {
                self.next_token();
            }
            return true;
        }
        match message {
            Some(message) => self.parse_error_at_current_token(message, &[]),
            None => self.parse_error_at_current_token(
                &messages::_0_EXPECTED,
                &[kind.token_text().unwrap_or_default()],
            ),
        }
        false
    }

    /// Consume the `close` bracket. When it is missing and this is a new
    /// error, point back at the `open` bracket at `open_pos`.
    fn parse_expected_matching_brackets(&mut self, open: SyntaxKind, close: SyntaxKind, open_parsed: bool, open_pos: u32) {
        if self.token() == close {
            self.next_token();
            return;
        }
        let close_text = close.token_text().unwrap_or_default();
        let count = self.diagnostics.len();
        self.parse_error_at_current_token(&messages::_0_EXPECTED, &[close_text]);
        if open_parsed && self.diagnostics.len() > count {
            let related = Diagnostic::with_location(
                self.file_name.as_str(),
                TextSpan::new(open_pos, 1),
                &messages::THE_PARSER_EXPECTED_TO_FIND_A_0_TO_MATCH_THE_1_TOKEN_HERE,
                &[close_text, open.token_text().unwrap_or_default()],
            );
            self.diagnostics.relate_to_last(related);
        }
    }

    fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    fn parse_optional_token(&mut self, kind: SyntaxKind) -> Option<NodeId> {
        if self.token() == kind {
            Some(self.parse_token_node())
        } else {
            None
        }
    }

    /// The token as a node, or a missing node of that kind.
    fn parse_expected_token(&mut self, kind: SyntaxKind, report_at_current_position: bool) -> NodeId {
        match self.parse_optional_token(kind) {
            Some(token) => token,
            None => self.create_missing_node(
                kind,
                report_at_current_position,
                Some(&messages::_0_EXPECTED),
                &[kind.token_text().unwrap_or_default()],
            ),
        }
    }

    fn parse_token_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        self.next_token();
        self.finish_node(kind, pos, NodeData::Token)
    }

    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Automatic semicolon insertion: a `;` is optional before `}`, at the
    /// end of the file and after a line break.
    fn parse_semicolon(&mut self) -> bool {
        if self.can_parse_semicolon() {
            if self.token() == SyntaxKind::SemicolonToken {
                self.next_token();
            }
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn parse_error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.scanner.token_start();
        let end = self.scanner.token_end();
        self.parse_error_at_position(start, end - start, message, args);
    }

    fn parse_error_at_range(&mut self, pos: u32, end: u32, message: &DiagnosticMessage, args: &[&str]) {
        self.parse_error_at_position(pos, end.saturating_sub(pos), message, args);
    }

    /// Report at most one error per start position. The next finished node
    /// is flagged either way.
    fn parse_error_at_position(&mut self, start: u32, length: u32, message: &DiagnosticMessage, args: &[&str]) {
        if self.diagnostics.last().map_or(true, |last| last.start() != start) {
            let diagnostic = Diagnostic::with_location(
                self.file_name.as_str(),
                TextSpan::new(start, length),
                message,
                args,
            );
            self.diagnostics.add(diagnostic);
        }
        self.parse_error_before_next_finished_node = true;
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Stamp `node` with the current context and error flag, end it at the
    /// current token's full start and move it into the arena.
    fn finish(&mut self, mut node: Node) -> NodeId {
        let end = self.node_pos();
        if end < node.pos {
            self.report_internal_error(format!(
                "{:?} would end at {} before its start {}",
                node.kind, end, node.pos
            ));
        }
        node.end = end.max(node.pos);
        self.finish_at(node)
    }

    /// Like [`Parser::finish`] for a node whose end is already set.
    fn finish_at(&mut self, mut node: Node) -> NodeId {
        node.flags |= self.context_flags;
        if self.parse_error_before_next_finished_node {
            self.parse_error_before_next_finished_node = false;
            node.flags |= NodeFlags::THIS_NODE_HAS_ERROR;
        }
        self.arena.alloc(node)
    }

    fn finish_node(&mut self, kind: SyntaxKind, pos: u32, data: NodeData) -> NodeId {
        self.finish(Node::new(kind, pos, pos, data))
    }

    fn finish_node_with_flags(&mut self, kind: SyntaxKind, pos: u32, flags: NodeFlags, data: NodeData) -> NodeId {
        let mut node = Node::new(kind, pos, pos, data);
        node.flags = flags;
        self.finish(node)
    }

    fn finish_declaration(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        data: NodeData,
    ) -> NodeId {
        let mut node = Node::new(kind, pos, pos, data);
        node.decorators = decorators;
        node.modifiers = modifiers;
        self.finish(node)
    }

    /// An empty node standing in for something that isn't there. With a
    /// message, the error goes at the current token, or at the current
    /// full start with zero length when `report_at_current_position`.
    fn create_missing_node(
        &mut self,
        kind: SyntaxKind,
        report_at_current_position: bool,
        message: Option<&DiagnosticMessage>,
        args: &[&str],
    ) -> NodeId {
        if let Some(message) = message {
            if report_at_current_position {
                self.parse_error_at_position(self.node_pos(), 0, message, args);
            } else {
                self.parse_error_at_current_token(message, args);
            }
        }
        let pos = self.node_pos();
        let data = self.missing_node_data(kind);
        self.finish_at(Node::new(kind, pos, pos, data))
    }

    fn missing_node_data(&mut self, kind: SyntaxKind) -> NodeData {
        match kind {
            SyntaxKind::Identifier => NodeData::Identifier(Identifier {
                text: self.identifiers.intern(""),
                original_keyword: None,
            }),
            kind if kind.is_literal() || kind.is_template_literal() => NodeData::Literal(Literal {
                text: String::new(),
                token_flags: TokenFlags::NONE,
            }),
            _ => NodeData::Token,
        }
    }

    fn create_missing_list(&self) -> NodeArray {
        NodeArray::empty(self.node_pos())
    }

    fn create_identifier(&mut self, is_identifier: bool, message: Option<&DiagnosticMessage>) -> NodeId {
        self.identifier_count += 1;
        if is_identifier {
            let pos = self.node_pos();
            let kind = self.token();
            let text = self.identifiers.intern(self.scanner.token_value());
            self.next_token();
            let original_keyword = (kind != SyntaxKind::Identifier).then_some(kind);
            return self.finish_node(
                SyntaxKind::Identifier,
                pos,
                NodeData::Identifier(Identifier { text, original_keyword }),
            );
        }
        let message = message.unwrap_or(&messages::IDENTIFIER_EXPECTED);
        self.create_missing_node(SyntaxKind::Identifier, false, Some(message), &[])
    }

    fn parse_identifier(&mut self) -> NodeId {
        self.create_identifier(self.is_identifier(), None)
    }

    fn parse_identifier_with(&mut self, message: &DiagnosticMessage) -> NodeId {
        self.create_identifier(self.is_identifier(), Some(message))
    }

    /// Any identifier or keyword, as after a `.`.
    fn parse_identifier_name(&mut self) -> NodeId {
        self.create_identifier(self.token_is_identifier_or_keyword(), None)
    }

    fn parse_optional_identifier(&mut self) -> Option<NodeId> {
        if self.is_identifier() {
            Some(self.parse_identifier())
        } else {
            None
        }
    }

    /// Literal token as a node, cooked text included.
    fn parse_literal_node(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        let literal = Literal {
            text: self.scanner.token_value().to_string(),
            token_flags: self.scanner.token_flags(),
        };
        self.next_token();
        self.finish_node(kind, pos, NodeData::Literal(literal))
    }

    /// Skip the current token in place of a production nested too deeply.
    fn parse_too_deeply_nested(&mut self, message: &DiagnosticMessage) -> NodeId {
        debug!("nesting limit reached at {} in {}", self.token_pos(), self.file_name);
        self.parse_error_at_current_token(message, &[]);
        let pos = self.node_pos();
        if self.token() != SyntaxKind::EndOfFileToken {
            self.next_token();
        }
        self.identifier_count += 1;
        let text = self.identifiers.intern("");
        self.finish_node(
            SyntaxKind::Identifier,
            pos,
            NodeData::Identifier(Identifier { text, original_keyword: None }),
        )
    }

    /// Run `parse` one nesting level deeper, or skip a token once the
    /// limit is reached.
    fn nested(&mut self, message: &DiagnosticMessage, parse: impl FnOnce(&mut Self) -> NodeId) -> Result<NodeId, NodeId> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(self.parse_too_deeply_nested(message));
        }
        self.recursion_depth += 1;
        let result = parse(self);
        self.recursion_depth -= 1;
        Ok(result)
    }

    // ========================================================================
    // Context flags
    // ========================================================================

    #[inline]
    fn in_context(&self, flags: NodeFlags) -> bool { self.context_flags.intersects(flags) }

    #[inline]
    fn in_yield_context(&self) -> bool { self.in_context(NodeFlags::YIELD_CONTEXT) }

    #[inline]
    fn in_await_context(&self) -> bool { self.in_context(NodeFlags::AWAIT_CONTEXT) }

    #[inline]
    fn in_disallow_in_context(&self) -> bool { self.in_context(NodeFlags::DISALLOW_IN_CONTEXT) }

    #[inline]
    fn in_decorator_context(&self) -> bool { self.in_context(NodeFlags::DECORATOR_CONTEXT) }

    #[inline]
    fn in_disallow_conditional_types_context(&self) -> bool {
        self.in_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT)
    }

    /// Run `f` with `set` turned on and `clear` turned off, then restore.
    fn with_context<T>(&mut self, set: NodeFlags, clear: NodeFlags, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags = (saved | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    fn do_inside_of_context<T>(&mut self, flags: NodeFlags, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_context(flags, NodeFlags::NONE, f)
    }

    fn do_outside_of_context<T>(&mut self, flags: NodeFlags, f: impl FnOnce(&mut Self) -> T) -> T {
        self.with_context(NodeFlags::NONE, flags, f)
    }

    fn allow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_outside_of_context(NodeFlags::DISALLOW_IN_CONTEXT, f)
    }

    fn disallow_in_and<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_inside_of_context(NodeFlags::DISALLOW_IN_CONTEXT, f)
    }

    #[cfg(test)]
    fn do_in_yield_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_inside_of_context(NodeFlags::YIELD_CONTEXT, f)
    }

    fn do_in_await_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_inside_of_context(NodeFlags::AWAIT_CONTEXT, f)
    }

    fn do_outside_of_await_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_outside_of_context(NodeFlags::AWAIT_CONTEXT, f)
    }

    fn do_in_decorator_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_inside_of_context(NodeFlags::DECORATOR_CONTEXT, f)
    }

    /// Yield and await context exactly as the signature flags say.
    fn do_in_signature_context<T>(&mut self, flags: SignatureFlags, f: impl FnOnce(&mut Self) -> T) -> T {
        let mut set = NodeFlags::NONE;
        let mut clear = NodeFlags::NONE;
        if flags.contains(SignatureFlags::YIELD) {
            set |= NodeFlags::YIELD_CONTEXT;
        } else {
            clear |= NodeFlags::YIELD_CONTEXT;
        }
        if flags.contains(SignatureFlags::AWAIT) {
            set |= NodeFlags::AWAIT_CONTEXT;
        } else {
            clear |= NodeFlags::AWAIT_CONTEXT;
        }
        self.with_context(set, clear, f)
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            scanner: self.scanner.state(),
            diagnostic_count: self.diagnostics.len(),
            parse_error_pending: self.parse_error_before_next_finished_node,
            context_flags: self.context_flags,
            node_count: self.arena.len(),
            identifier_count: self.identifier_count,
        }
    }

    fn rewind(&mut self, snapshot: Snapshot) {
        self.scanner.set_state(snapshot.scanner);
        self.diagnostics.truncate(snapshot.diagnostic_count);
        self.parse_error_before_next_finished_node = snapshot.parse_error_pending;
        self.context_flags = snapshot.context_flags;
        self.arena.truncate(snapshot.node_count);
        self.identifier_count = snapshot.identifier_count;
    }

    /// Run `f`, then rewind everything it did unless `keep` accepts the
    /// result.
    fn speculation_helper<T>(&mut self, f: impl FnOnce(&mut Self) -> T, keep: impl FnOnce(&T) -> bool) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        if !keep(&result) {
            self.rewind(snapshot);
        }
        result
    }

    /// Run `f` and always rewind.
    fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.speculation_helper(f, |_| false)
    }

    /// Run `f` and rewind if it returns `None`.
    fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.token_pos();
        let result = self.speculation_helper(f, Option::is_some);
        trace!(
            "speculative parse at {} {}",
            start,
            if result.is_some() { "kept" } else { "rewound" }
        );
        result
    }

    fn try_parse_bool(&mut self, f: impl FnOnce(&mut Self) -> bool) -> bool {
        self.speculation_helper(f, |kept| *kept)
    }

    // ========================================================================
    // Token predicates and look-ahead helpers
    // ========================================================================

    /// Whether the current token can be used as an identifier here.
    /// `yield` and `await` are keywords inside generators and async
    /// functions.
    fn is_identifier(&self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => true,
            SyntaxKind::YieldKeyword if self.in_yield_context() => false,
            SyntaxKind::AwaitKeyword if self.in_await_context() => false,
            kind => kind > SyntaxKind::LAST_RESERVED_WORD && kind <= SyntaxKind::LAST_KEYWORD,
        }
    }

    #[inline]
    fn token_is_identifier_or_keyword(&self) -> bool { self.token().is_identifier_or_keyword() }

    fn is_literal_property_name(&self) -> bool {
        self.token_is_identifier_or_keyword()
            || matches!(self.token(), SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral)
    }

    fn next_token_is_identifier(&mut self) -> bool {
        self.next_token();
        self.is_identifier()
    }

    fn next_token_is_identifier_or_keyword(&mut self) -> bool {
        self.next_token();
        self.token_is_identifier_or_keyword()
    }

    fn next_token_is_identifier_or_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.token_is_identifier_or_keyword() && !self.has_preceding_line_break()
    }

    fn next_token_is_identifier_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.is_identifier()
    }

    fn next_token_is_identifier_or_string_literal_on_same_line(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break()
            && (self.is_identifier() || self.token() == SyntaxKind::StringLiteral)
    }

    fn next_token_is_identifier_or_keyword_or_literal_on_same_line(&mut self) -> bool {
        self.next_token();
        (self.token_is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral | SyntaxKind::StringLiteral
            ))
            && !self.has_preceding_line_break()
    }

    fn next_token_is_function_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::FunctionKeyword && !self.has_preceding_line_break()
    }

    fn next_token_is_class_keyword_on_same_line(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::ClassKeyword && !self.has_preceding_line_break()
    }

    fn next_token_is_open_paren(&mut self) -> bool {
        self.next_token() == SyntaxKind::OpenParenToken
    }

    fn next_token_is_open_paren_or_less_than(&mut self) -> bool {
        matches!(self.next_token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken)
    }

    fn next_token_is_open_paren_or_less_than_or_dot(&mut self) -> bool {
        matches!(
            self.next_token(),
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::DotToken
        )
    }

    fn next_token_is_dot(&mut self) -> bool {
        self.next_token() == SyntaxKind::DotToken
    }

    fn next_token_is_numeric_literal(&mut self) -> bool {
        matches!(self.next_token(), SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)
    }

    fn next_token_is_identifier_or_keyword_or_greater_than(&mut self) -> bool {
        self.next_token();
        self.token_is_identifier_or_keyword() || self.token() == SyntaxKind::GreaterThanToken
    }

    fn next_token_is_identifier_or_keyword_or_open_bracket_or_template(&mut self) -> bool {
        self.next_token();
        self.token_is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::OpenBracketToken
                    | SyntaxKind::NoSubstitutionTemplateLiteral
                    | SyntaxKind::TemplateHead
            )
    }

    fn next_token_is_identifier_or_start_of_destructuring(&mut self) -> bool {
        self.next_token();
        self.is_identifier()
            || matches!(self.token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(text: &str) -> Parser {
        let mut parser = Parser::new("test.ts", text, ParseOptions::default());
        parser.next_token();
        parser
    }

    #[test]
    fn test_look_ahead_rewinds_everything() {
        let mut p = parser("a b c");
        let nodes = p.arena.len();
        let seen = p.look_ahead(|p| {
            p.parse_identifier();
            p.parse_expected(SyntaxKind::SemicolonToken);
            p.token()
        });
        assert_eq!(seen, SyntaxKind::Identifier);
        assert_eq!(p.token_pos(), 0);
        assert_eq!(p.arena.len(), nodes);
        assert!(p.diagnostics.is_empty());
        assert!(!p.parse_error_before_next_finished_node);
        assert_eq!(p.identifier_count, 0);
    }

    #[test]
    fn test_try_parse_keeps_success() {
        let mut p = parser("a b");
        let kept = p.try_parse(|p| Some(p.parse_identifier()));
        assert!(kept.is_some());
        assert_eq!(p.token_pos(), 2);
        let rewound = p.try_parse(|p| {
            p.next_token();
            None::<()>
        });
        assert!(rewound.is_none());
        assert_eq!(p.token_pos(), 2);
    }

    #[test]
    fn test_errors_dedupe_by_position_but_flag_next_node() {
        let mut p = parser(")");
        p.parse_expected(SyntaxKind::SemicolonToken);
        p.parse_expected(SyntaxKind::CommaToken);
        assert_eq!(p.diagnostics.len(), 1);
        let missing = p.create_missing_node(SyntaxKind::Identifier, false, None, &[]);
        assert!(p.arena[missing].has_error());
        assert!(p.arena[missing].is_missing());
        let next = p.create_missing_node(SyntaxKind::Identifier, false, None, &[]);
        assert!(!p.arena[next].has_error());
    }

    #[test]
    fn test_context_helpers_restore_flags() {
        let mut p = parser("x");
        let inside = p.disallow_in_and(|p| {
            let nested = p.allow_in_and(|p| p.in_disallow_in_context());
            (nested, p.in_disallow_in_context())
        });
        assert_eq!(inside, (false, true));
        assert!(!p.in_disallow_in_context());
        let flags = p.do_in_signature_context(SignatureFlags::AWAIT, |p| (p.in_yield_context(), p.in_await_context()));
        assert_eq!(flags, (false, true));
    }

    #[test]
    fn test_yield_is_identifier_outside_generators() {
        let mut p = parser("yield");
        assert!(p.is_identifier());
        assert!(!p.do_in_yield_context(|p| p.is_identifier()));
    }

    #[test]
    fn test_javascript_files_stamp_every_node() {
        let file = Parser::new("a.js", "x;", ParseOptions::default()).parse_source_file();
        assert!(file
            .arena
            .iter()
            .all(|(_, node)| node.flags.contains(NodeFlags::JAVASCRIPT_FILE)));
    }
}
