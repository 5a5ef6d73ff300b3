//! The list engine.
//!
//! Every repeated construct is parsed by [`Parser::parse_list`] or
//! [`Parser::parse_delimited_list`] under a [`ParsingContext`]. The context
//! decides which tokens start an element and which end the list. On a token
//! that is neither, the engine reports the context's error and either skips
//! the token or, when an enclosing list can use it, gives up so that list
//! can resume.

use tsfront_ast::node::NodeArray;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::NodeId;
use tsfront_diagnostics::{messages, DiagnosticMessage};

use super::Parser;
use crate::utilities::{is_heritage_clause_keyword, is_in_or_of_keyword};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsingContext {
    SourceElements,
    BlockStatements,
    SwitchClauses,
    SwitchClauseStatements,
    TypeMembers,
    ClassMembers,
    EnumMembers,
    HeritageClauseElement,
    VariableDeclarations,
    ObjectBindingElements,
    ArrayBindingElements,
    ArgumentExpressions,
    ObjectLiteralMembers,
    JsxAttributes,
    JsxChildren,
    ArrayLiteralMembers,
    Parameters,
    TypeParameters,
    TypeArguments,
    TupleElementTypes,
    HeritageClauses,
    ImportOrExportSpecifiers,
}

impl ParsingContext {
    const ALL: [ParsingContext; 22] = [
        ParsingContext::SourceElements,
        ParsingContext::BlockStatements,
        ParsingContext::SwitchClauses,
        ParsingContext::SwitchClauseStatements,
        ParsingContext::TypeMembers,
        ParsingContext::ClassMembers,
        ParsingContext::EnumMembers,
        ParsingContext::HeritageClauseElement,
        ParsingContext::VariableDeclarations,
        ParsingContext::ObjectBindingElements,
        ParsingContext::ArrayBindingElements,
        ParsingContext::ArgumentExpressions,
        ParsingContext::ObjectLiteralMembers,
        ParsingContext::JsxAttributes,
        ParsingContext::JsxChildren,
        ParsingContext::ArrayLiteralMembers,
        ParsingContext::Parameters,
        ParsingContext::TypeParameters,
        ParsingContext::TypeArguments,
        ParsingContext::TupleElementTypes,
        ParsingContext::HeritageClauses,
        ParsingContext::ImportOrExportSpecifiers,
    ];

    #[inline]
    pub(super) fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Reported when a token can neither start an element nor end the list.
    fn error(self) -> &'static DiagnosticMessage {
        match self {
            ParsingContext::SourceElements | ParsingContext::BlockStatements => {
                &messages::DECLARATION_OR_STATEMENT_EXPECTED
            }
            ParsingContext::SwitchClauses => &messages::CASE_OR_DEFAULT_EXPECTED,
            ParsingContext::SwitchClauseStatements => &messages::STATEMENT_EXPECTED,
            ParsingContext::TypeMembers => &messages::PROPERTY_OR_SIGNATURE_EXPECTED,
            ParsingContext::ClassMembers => {
                &messages::UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED
            }
            ParsingContext::EnumMembers => &messages::ENUM_MEMBER_EXPECTED,
            ParsingContext::HeritageClauseElement => &messages::EXPRESSION_EXPECTED,
            ParsingContext::VariableDeclarations => &messages::VARIABLE_DECLARATION_EXPECTED,
            ParsingContext::ObjectBindingElements => &messages::PROPERTY_DESTRUCTURING_PATTERN_EXPECTED,
            ParsingContext::ArrayBindingElements => &messages::ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED,
            ParsingContext::ArgumentExpressions => &messages::ARGUMENT_EXPRESSION_EXPECTED,
            ParsingContext::ObjectLiteralMembers => &messages::PROPERTY_ASSIGNMENT_EXPECTED,
            ParsingContext::ArrayLiteralMembers => &messages::EXPRESSION_OR_COMMA_EXPECTED,
            ParsingContext::Parameters => &messages::PARAMETER_DECLARATION_EXPECTED,
            ParsingContext::TypeParameters => &messages::TYPE_PARAMETER_DECLARATION_EXPECTED,
            ParsingContext::TypeArguments => &messages::TYPE_ARGUMENT_EXPECTED,
            ParsingContext::TupleElementTypes => &messages::TYPE_EXPECTED,
            ParsingContext::HeritageClauses => &messages::UNEXPECTED_TOKEN,
            ParsingContext::ImportOrExportSpecifiers
            | ParsingContext::JsxAttributes
            | ParsingContext::JsxChildren => &messages::IDENTIFIER_EXPECTED,
        }
    }
}

impl Parser {
    /// Whether the current token starts an element of `context`. In error
    /// recovery a few contexts are stricter so that a stray token doesn't
    /// pull an enclosing list into a bogus element.
    pub(super) fn is_list_element(&mut self, context: ParsingContext, in_error_recovery: bool) -> bool {
        match context {
            ParsingContext::SourceElements
            | ParsingContext::BlockStatements
            | ParsingContext::SwitchClauseStatements => {
                !(self.token() == SyntaxKind::SemicolonToken && in_error_recovery) && self.is_start_of_statement()
            }
            ParsingContext::SwitchClauses => {
                matches!(self.token(), SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword)
            }
            ParsingContext::TypeMembers => self.look_ahead(Self::is_type_member_start),
            ParsingContext::ClassMembers => {
                self.look_ahead(Self::is_class_member_start)
                    || (self.token() == SyntaxKind::SemicolonToken && !in_error_recovery)
            }
            ParsingContext::EnumMembers => {
                self.token() == SyntaxKind::OpenBracketToken || self.is_literal_property_name()
            }
            ParsingContext::ObjectLiteralMembers => {
                matches!(
                    self.token(),
                    SyntaxKind::OpenBracketToken | SyntaxKind::AsteriskToken | SyntaxKind::DotDotDotToken | SyntaxKind::DotToken
                ) || self.is_literal_property_name()
            }
            ParsingContext::ObjectBindingElements => {
                matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::DotDotDotToken)
                    || self.is_literal_property_name()
            }
            ParsingContext::HeritageClauseElement => {
                if self.token() == SyntaxKind::OpenBraceToken {
                    return self.look_ahead(Self::is_valid_heritage_clause_object_literal);
                }
                if in_error_recovery {
                    self.is_identifier() && !self.is_heritage_clause_extends_or_implements_keyword()
                } else {
                    self.is_start_of_left_hand_side_expression() && !self.is_heritage_clause_extends_or_implements_keyword()
                }
            }
            ParsingContext::VariableDeclarations => self.is_identifier_or_pattern(),
            ParsingContext::ArrayBindingElements => {
                matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::DotDotDotToken)
                    || self.is_identifier_or_pattern()
            }
            ParsingContext::TypeParameters => self.is_identifier(),
            ParsingContext::ArrayLiteralMembers => {
                matches!(
                    self.token(),
                    SyntaxKind::CommaToken | SyntaxKind::DotToken | SyntaxKind::DotDotDotToken
                ) || self.is_start_of_expression()
            }
            ParsingContext::ArgumentExpressions => {
                self.token() == SyntaxKind::DotDotDotToken || self.is_start_of_expression()
            }
            ParsingContext::Parameters => self.is_start_of_parameter(),
            ParsingContext::TypeArguments | ParsingContext::TupleElementTypes => {
                self.token() == SyntaxKind::CommaToken || self.is_start_of_type()
            }
            ParsingContext::HeritageClauses => self.is_heritage_clause(),
            ParsingContext::ImportOrExportSpecifiers => self.token_is_identifier_or_keyword(),
            ParsingContext::JsxAttributes => {
                self.token_is_identifier_or_keyword() || self.token() == SyntaxKind::OpenBraceToken
            }
            ParsingContext::JsxChildren => true,
        }
    }

    pub(super) fn is_list_terminator(&mut self, context: ParsingContext) -> bool {
        let token = self.token();
        if token == SyntaxKind::EndOfFileToken {
            return true;
        }
        match context {
            ParsingContext::BlockStatements
            | ParsingContext::SwitchClauses
            | ParsingContext::TypeMembers
            | ParsingContext::ClassMembers
            | ParsingContext::EnumMembers
            | ParsingContext::ObjectLiteralMembers
            | ParsingContext::ObjectBindingElements
            | ParsingContext::ImportOrExportSpecifiers => token == SyntaxKind::CloseBraceToken,
            ParsingContext::SwitchClauseStatements => matches!(
                token,
                SyntaxKind::CloseBraceToken | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
            ),
            ParsingContext::HeritageClauseElement => matches!(
                token,
                SyntaxKind::OpenBraceToken | SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::VariableDeclarations => self.is_variable_declarator_list_terminator(),
            ParsingContext::TypeParameters => matches!(
                token,
                SyntaxKind::GreaterThanToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            ),
            ParsingContext::ArgumentExpressions => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::SemicolonToken)
            }
            ParsingContext::ArrayLiteralMembers
            | ParsingContext::TupleElementTypes
            | ParsingContext::ArrayBindingElements => token == SyntaxKind::CloseBracketToken,
            ParsingContext::Parameters => {
                matches!(token, SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken)
            }
            // Only a comma continues a type argument list.
            ParsingContext::TypeArguments => token != SyntaxKind::CommaToken,
            ParsingContext::HeritageClauses => {
                matches!(token, SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken)
            }
            ParsingContext::JsxAttributes => {
                matches!(token, SyntaxKind::GreaterThanToken | SyntaxKind::SlashToken)
            }
            ParsingContext::JsxChildren => token == SyntaxKind::LessThanSlashToken,
            ParsingContext::SourceElements => false,
        }
    }

    fn is_variable_declarator_list_terminator(&self) -> bool {
        self.can_parse_semicolon()
            || is_in_or_of_keyword(self.token())
            || self.token() == SyntaxKind::EqualsGreaterThanToken
    }

    /// Whether an enclosing list could make use of the current token.
    fn is_in_some_parsing_context(&mut self) -> bool {
        for context in ParsingContext::ALL {
            if self.parsing_context & context.bit() != 0
                && (self.is_list_element(context, true) || self.is_list_terminator(context))
            {
                return true;
            }
        }
        false
    }

    /// Report the unexpected token. Returns true when the list should stop;
    /// otherwise the token has been skipped.
    fn abort_parsing_list_or_move_to_next_token(&mut self, context: ParsingContext) -> bool {
        self.parse_error_at_current_token(context.error(), &[]);
        if self.is_in_some_parsing_context() {
            return true;
        }
        self.next_token();
        false
    }

    pub(super) fn parse_list(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> NodeId,
    ) -> NodeArray {
        let saved_parsing_context = self.parsing_context;
        self.parsing_context |= context.bit();
        let pos = self.node_pos();
        let mut nodes = Vec::new();
        while !self.is_list_terminator(context) {
            if self.is_list_element(context, false) {
                nodes.push(parse_element(self));
                continue;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }
        self.parsing_context = saved_parsing_context;
        NodeArray::new(pos, self.node_pos(), nodes)
    }

    /// Comma separated elements. A missing comma is reported and parsing
    /// goes on; a trailing comma is recorded on the array.
    pub(super) fn parse_delimited_list(
        &mut self,
        context: ParsingContext,
        mut parse_element: impl FnMut(&mut Self) -> NodeId,
        consider_semicolon_as_delimiter: bool,
    ) -> NodeArray {
        let saved_parsing_context = self.parsing_context;
        self.parsing_context |= context.bit();
        let pos = self.node_pos();
        let mut nodes = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.is_list_element(context, false) {
                let start = self.node_pos();
                nodes.push(parse_element(self));
                if self.parse_optional(SyntaxKind::CommaToken) {
                    trailing_comma = true;
                    continue;
                }
                trailing_comma = false;
                if self.is_list_terminator(context) {
                    break;
                }
                self.parse_expected(SyntaxKind::CommaToken);
                if consider_semicolon_as_delimiter
                    && self.token() == SyntaxKind::SemicolonToken
                    && !self.has_preceding_line_break()
                {
                    self.next_token();
                }
                // The element consumed nothing; skip a token to make progress.
                if start == self.node_pos() {
                    self.next_token();
                }
                continue;
            }
            if self.is_list_terminator(context) {
                break;
            }
            if self.abort_parsing_list_or_move_to_next_token(context) {
                break;
            }
        }
        self.parsing_context = saved_parsing_context;
        let mut array = NodeArray::new(pos, self.node_pos(), nodes);
        array.has_trailing_comma = trailing_comma;
        array
    }

    pub(super) fn parse_bracketed_list(
        &mut self,
        context: ParsingContext,
        parse_element: impl FnMut(&mut Self) -> NodeId,
        open: SyntaxKind,
        close: SyntaxKind,
    ) -> NodeArray {
        if self.parse_expected(open) {
            let list = self.parse_delimited_list(context, parse_element, false);
            self.parse_expected(close);
            return list;
        }
        self.create_missing_list()
    }

    /// `{` at the start of a heritage element is an object literal base
    /// expression unless it is the class body.
    fn is_valid_heritage_clause_object_literal(&mut self) -> bool {
        if self.next_token() == SyntaxKind::CloseBraceToken {
            let next = self.next_token();
            return matches!(
                next,
                SyntaxKind::CommaToken
                    | SyntaxKind::OpenBraceToken
                    | SyntaxKind::ExtendsKeyword
                    | SyntaxKind::ImplementsKeyword
            );
        }
        true
    }

    pub(super) fn is_heritage_clause_extends_or_implements_keyword(&mut self) -> bool {
        if is_heritage_clause_keyword(self.token()) {
            return self.look_ahead(|p| {
                p.next_token();
                p.is_start_of_expression()
            });
        }
        false
    }

    pub(super) fn is_heritage_clause(&self) -> bool {
        is_heritage_clause_keyword(self.token())
    }

    pub(super) fn is_identifier_or_pattern(&self) -> bool {
        matches!(self.token(), SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken) || self.is_identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;

    fn parser(text: &str) -> Parser {
        let mut parser = Parser::new("test.ts", text, ParseOptions::default());
        parser.next_token();
        parser
    }

    #[test]
    fn test_every_context_has_a_distinct_bit() {
        let bits: u32 = ParsingContext::ALL.iter().fold(0, |acc, c| {
            assert_eq!(acc & c.bit(), 0);
            acc | c.bit()
        });
        assert_eq!(bits.count_ones() as usize, ParsingContext::ALL.len());
    }

    #[test]
    fn test_delimited_list_records_trailing_comma() {
        let mut p = parser("a, b, )");
        let list = p.parse_delimited_list(ParsingContext::ArgumentExpressions, Parser::parse_identifier, false);
        assert_eq!(list.len(), 2);
        assert!(list.has_trailing_comma);
        assert_eq!(p.token(), SyntaxKind::CloseParenToken);
        assert!(p.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_comma_is_reported_once() {
        let mut p = parser("a b)");
        let list = p.parse_delimited_list(ParsingContext::ArgumentExpressions, Parser::parse_identifier, false);
        assert_eq!(list.len(), 2);
        assert_eq!(p.diagnostics.len(), 1);
        assert_eq!(p.diagnostics.last().map(|d| d.message_text.as_str()), Some("',' expected."));
    }

    #[test]
    fn test_list_skips_tokens_no_context_wants() {
        let mut p = parser(") ) x");
        let list = p.parse_list(ParsingContext::SourceElements, Parser::parse_statement);
        assert_eq!(list.len(), 1);
        assert_eq!(p.diagnostics.len(), 2);
        assert!(p.diagnostics.last().is_some_and(|d| d.is(&messages::DECLARATION_OR_STATEMENT_EXPECTED)));
    }

    #[test]
    fn test_enclosing_context_stops_inner_list() {
        // `}` ends the block, so the argument list gives up on it.
        let mut p = parser("f(a, }");
        p.parsing_context |= ParsingContext::BlockStatements.bit();
        p.next_token();
        p.next_token();
        let list = p.parse_delimited_list(ParsingContext::ArgumentExpressions, Parser::parse_identifier, false);
        assert_eq!(list.len(), 1);
        assert_eq!(p.token(), SyntaxKind::CloseBraceToken);
    }
}
