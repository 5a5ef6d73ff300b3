//! Expressions: precedence climbing over binary operators, the unary and
//! update layers, member and call chains, primaries and arrow functions.
//!
//! Arrow functions are the one place where the grammar is ambiguous for a
//! bounded look-ahead: `(a, b)` may be a parenthesized comma expression or
//! a parameter list. [`Parser::is_parenthesized_arrow_function_expression`]
//! answers with a [`Tristate`]; an `Unknown` answer is settled by a
//! speculative parse of the arrow head.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_diagnostics::messages;
use tsfront_path::LanguageVariant;
use tsfront_scanner::skip_trivia;

use super::{ParsingContext, Parser, SignatureFlags, Tristate};
use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::utilities::{is_left_hand_side_expression_start, is_unary_operator_start};

/// Everything of an arrow function before its `=>`.
struct ArrowHead {
    pos: u32,
    modifiers: Option<NodeArray>,
    signature: SignatureDecl,
}

impl Parser {
    // ========================================================================
    // Comma and assignment
    // ========================================================================

    /// `Expression : AssignmentExpression ("," AssignmentExpression)*`
    pub(super) fn parse_expression(&mut self) -> NodeId {
        // Decorator context only covers the decorator's own member chain,
        // not expressions nested inside it.
        self.do_outside_of_context(NodeFlags::DECORATOR_CONTEXT, |p| {
            let pos = p.node_pos();
            let mut expression = p.parse_assignment_expression_or_higher();
            while let Some(operator_token) = p.parse_optional_token(SyntaxKind::CommaToken) {
                let right = p.parse_assignment_expression_or_higher();
                expression = p.make_binary_expression(expression, operator_token, right, pos);
            }
            expression
        })
    }

    pub(super) fn parse_assignment_expression_or_higher(&mut self) -> NodeId {
        match self.nested(&messages::EXPRESSION_EXPECTED, Self::parse_assignment_expression_worker) {
            Ok(expression) | Err(expression) => expression,
        }
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeId {
        if self.is_yield_expression() {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_parenthesized_arrow_function_expression() {
            return arrow;
        }
        if let Some(arrow) = self.try_parse_async_simple_arrow_function_expression() {
            return arrow;
        }

        let pos = self.node_pos();
        let expression = self.parse_binary_expression_or_higher(OperatorPrecedence::LOWEST);

        // `x => ...` is only known to be an arrow once `=>` shows up.
        if self.arena.kind(expression) == SyntaxKind::Identifier && self.token() == SyntaxKind::EqualsGreaterThanToken {
            return self.parse_simple_arrow_function_expression(pos, expression, None);
        }

        if self.arena.kind(expression).is_left_hand_side_expression_kind()
            && self.re_scan_greater_token().is_assignment_operator()
        {
            let operator_token = self.parse_token_node();
            let right = self.parse_assignment_expression_or_higher();
            return self.make_binary_expression(expression, operator_token, right, pos);
        }

        self.parse_conditional_expression_rest(expression, pos)
    }

    fn make_binary_expression(&mut self, left: NodeId, operator_token: NodeId, right: NodeId, pos: u32) -> NodeId {
        self.finish_node(
            SyntaxKind::BinaryExpression,
            pos,
            NodeData::Binary { left, operator_token, right },
        )
    }

    fn is_yield_expression(&mut self) -> bool {
        if self.token() != SyntaxKind::YieldKeyword {
            return false;
        }
        // Outside a generator `yield` is an identifier unless what follows
        // only makes sense for a yield.
        self.in_yield_context() || self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line)
    }

    fn parse_yield_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let (asterisk_token, expression) = if !self.has_preceding_line_break()
            && (self.token() == SyntaxKind::AsteriskToken || self.is_start_of_expression())
        {
            let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
            (asterisk_token, Some(self.parse_assignment_expression_or_higher()))
        } else {
            (None, None)
        };
        self.finish_node(SyntaxKind::YieldExpression, pos, NodeData::Yield { asterisk_token, expression })
    }

    fn parse_conditional_expression_rest(&mut self, condition: NodeId, pos: u32) -> NodeId {
        let Some(question_token) = self.parse_optional_token(SyntaxKind::QuestionToken) else {
            return condition;
        };
        let when_true = self.do_outside_of_context(NodeFlags::DISALLOW_IN_CONTEXT, Self::parse_assignment_expression_or_higher);
        let colon_token = self.parse_expected_token(SyntaxKind::ColonToken, false);
        let when_false = if self.arena[colon_token].is_missing() {
            self.create_missing_node(SyntaxKind::Identifier, false, Some(&messages::_0_EXPECTED), &[":"])
        } else {
            self.parse_assignment_expression_or_higher()
        };
        self.finish_node(
            SyntaxKind::ConditionalExpression,
            pos,
            NodeData::Conditional { condition, question_token, when_true, colon_token, when_false },
        )
    }

    // ========================================================================
    // Binary expressions
    // ========================================================================

    fn parse_binary_expression_or_higher(&mut self, precedence: OperatorPrecedence) -> NodeId {
        let pos = self.node_pos();
        let left = self.parse_unary_expression_or_higher();
        self.parse_binary_expression_rest(precedence, left, pos)
    }

    /// Consume operators binding tighter than `precedence`. `**` is right
    /// associative, so an equal level still binds.
    fn parse_binary_expression_rest(&mut self, precedence: OperatorPrecedence, mut left: NodeId, pos: u32) -> NodeId {
        loop {
            // `>` is scanned alone; glue `>=`, `>>` and friends back together.
            self.re_scan_greater_token();
            let new_precedence = get_binary_operator_precedence(self.token());
            if !new_precedence.is_valid() {
                break;
            }
            let consume = if self.token() == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume {
                break;
            }
            if self.token() == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }
            if self.token() == SyntaxKind::AsKeyword {
                // `x\nas y` is two statements: `as` is a contextual keyword.
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let ty = self.parse_type();
                left = self.finish_node(SyntaxKind::AsExpression, pos, NodeData::As { expression: left, ty });
            } else {
                let operator_token = self.parse_token_node();
                let right = self.parse_binary_expression_or_higher(new_precedence);
                left = self.make_binary_expression(left, operator_token, right, pos);
            }
        }
        left
    }

    // ========================================================================
    // Unary and update expressions
    // ========================================================================

    /// A unary operator applied directly to the left operand of `**` is
    /// ambiguous (`-2 ** 2`) and reported.
    fn parse_unary_expression_or_higher(&mut self) -> NodeId {
        if self.is_update_expression() {
            let pos = self.node_pos();
            let update = self.parse_update_expression();
            return if self.token() == SyntaxKind::AsteriskAsteriskToken {
                let precedence = get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken);
                self.parse_binary_expression_rest(precedence, update, pos)
            } else {
                update
            };
        }

        let unary_operator = self.token();
        let simple = self.parse_simple_unary_expression();
        if self.token() == SyntaxKind::AsteriskAsteriskToken {
            let node = &self.arena[simple];
            let (kind, node_pos, end) = (node.kind, node.pos, node.end);
            let start = skip_trivia(self.source.chars(), node_pos, false, false);
            if kind == SyntaxKind::TypeAssertionExpression {
                self.parse_error_at_range(
                    start,
                    end,
                    &messages::A_TYPE_ASSERTION_EXPRESSION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[],
                );
            } else {
                self.parse_error_at_range(
                    start,
                    end,
                    &messages::AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION,
                    &[unary_operator.token_text().unwrap_or_default()],
                );
            }
        }
        simple
    }

    fn is_update_expression(&self) -> bool {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::AwaitKeyword => false,
            // Only a type assertion in non-JSX files.
            SyntaxKind::LessThanToken => self.language_variant == LanguageVariant::Jsx,
            _ => true,
        }
    }

    fn parse_simple_unary_expression(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::TildeToken | SyntaxKind::ExclamationToken => {
                let pos = self.node_pos();
                let operator = self.token();
                self.next_token();
                let operand = self.parse_simple_unary_expression();
                self.finish_node(SyntaxKind::PrefixUnaryExpression, pos, NodeData::Unary { operator, operand })
            }
            SyntaxKind::DeleteKeyword => self.parse_keyword_unary(SyntaxKind::DeleteExpression),
            SyntaxKind::TypeOfKeyword => self.parse_keyword_unary(SyntaxKind::TypeOfExpression),
            SyntaxKind::VoidKeyword => self.parse_keyword_unary(SyntaxKind::VoidExpression),
            SyntaxKind::LessThanToken => self.parse_type_assertion(),
            SyntaxKind::AwaitKeyword if self.is_await_expression() => {
                self.parse_keyword_unary(SyntaxKind::AwaitExpression)
            }
            _ => self.parse_update_expression(),
        }
    }

    /// `delete x`, `typeof x`, `void x` and `await x`.
    fn parse_keyword_unary(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let expression = self.parse_simple_unary_expression();
        self.finish_node(kind, pos, NodeData::Expression { expression })
    }

    fn is_await_expression(&mut self) -> bool {
        self.token() == SyntaxKind::AwaitKeyword
            && (self.in_await_context()
                || self.look_ahead(Self::next_token_is_identifier_or_keyword_or_literal_on_same_line))
    }

    fn parse_type_assertion(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        let ty = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_simple_unary_expression();
        self.finish_node(SyntaxKind::TypeAssertionExpression, pos, NodeData::TypeAssertion { ty, expression })
    }

    fn parse_update_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            let operator = self.token();
            self.next_token();
            let operand = self.parse_left_hand_side_expression_or_higher();
            return self.finish_node(SyntaxKind::PrefixUnaryExpression, pos, NodeData::Unary { operator, operand });
        }
        if self.language_variant == LanguageVariant::Jsx
            && self.token() == SyntaxKind::LessThanToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_greater_than)
        {
            return self.parse_jsx_element_or_self_closing_element_or_fragment(true);
        }

        let expression = self.parse_left_hand_side_expression_or_higher();
        if matches!(self.token(), SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            return self.finish_node(
                SyntaxKind::PostfixUnaryExpression,
                pos,
                NodeData::Unary { operator, operand: expression },
            );
        }
        expression
    }

    // ========================================================================
    // Left-hand side, member and call expressions
    // ========================================================================

    pub(super) fn parse_left_hand_side_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = match self.token() {
            SyntaxKind::ImportKeyword if self.look_ahead(Self::next_token_is_open_paren_or_less_than) => {
                // import("module")
                self.parse_token_node()
            }
            SyntaxKind::ImportKeyword if self.look_ahead(Self::next_token_is_dot) => {
                // import.meta
                self.next_token();
                self.next_token();
                let name = self.parse_identifier_name();
                self.finish_node(
                    SyntaxKind::MetaProperty,
                    pos,
                    NodeData::MetaProperty { keyword_token: SyntaxKind::ImportKeyword, name },
                )
            }
            SyntaxKind::SuperKeyword => self.parse_super_expression(),
            _ => self.parse_member_expression_or_higher(),
        };
        self.parse_call_expression_rest(pos, expression)
    }

    fn parse_super_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_token_node();
        if matches!(
            self.token(),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
        ) {
            return expression;
        }
        // A bare `super` becomes `super.<missing>`.
        self.parse_expected_with(
            SyntaxKind::DotToken,
            Some(&messages::SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS),
            false,
        );
        let name = self.parse_right_side_of_dot(true);
        self.finish_node(
            SyntaxKind::PropertyAccessExpression,
            pos,
            NodeData::PropertyAccess { expression, question_dot_token: None, name },
        )
    }

    pub(super) fn parse_member_expression_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_primary_expression();
        self.parse_member_expression_rest(pos, expression, true)
    }

    /// Flags for a link of a member or call chain: an optional chain stays
    /// one until something breaks it.
    fn chain_flags(&self, expression: NodeId, question_dot_token: Option<NodeId>) -> NodeFlags {
        if question_dot_token.is_some() || self.arena[expression].flags.contains(NodeFlags::OPTIONAL_CHAIN) {
            NodeFlags::OPTIONAL_CHAIN
        } else {
            NodeFlags::NONE
        }
    }

    fn is_start_of_optional_property_or_element_access_chain(&mut self) -> bool {
        self.token() == SyntaxKind::QuestionDotToken
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_or_open_bracket_or_template)
    }

    fn parse_member_expression_rest(&mut self, pos: u32, mut expression: NodeId, allow_optional_chain: bool) -> NodeId {
        loop {
            let mut question_dot_token = None;
            let is_property_access = if allow_optional_chain && self.is_start_of_optional_property_or_element_access_chain() {
                question_dot_token = Some(self.parse_expected_token(SyntaxKind::QuestionDotToken, false));
                self.token_is_identifier_or_keyword()
            } else {
                self.parse_optional(SyntaxKind::DotToken)
            };

            if is_property_access {
                let flags = self.chain_flags(expression, question_dot_token);
                let name = self.parse_right_side_of_dot(true);
                expression = self.finish_node_with_flags(
                    SyntaxKind::PropertyAccessExpression,
                    pos,
                    flags,
                    NodeData::PropertyAccess { expression, question_dot_token, name },
                );
                continue;
            }

            if question_dot_token.is_none()
                && self.token() == SyntaxKind::ExclamationToken
                && !self.has_preceding_line_break()
            {
                self.next_token();
                expression = self.finish_node(SyntaxKind::NonNullExpression, pos, NodeData::Expression { expression });
                continue;
            }

            // `@dec [x]` would otherwise swallow a computed member name.
            if (question_dot_token.is_some() || !self.in_decorator_context())
                && self.parse_optional(SyntaxKind::OpenBracketToken)
            {
                let flags = self.chain_flags(expression, question_dot_token);
                let argument_expression = if self.token() == SyntaxKind::CloseBracketToken {
                    self.create_missing_node(SyntaxKind::Identifier, true, Some(&messages::EXPRESSION_EXPECTED), &[])
                } else {
                    self.allow_in_and(Self::parse_expression)
                };
                self.parse_expected(SyntaxKind::CloseBracketToken);
                expression = self.finish_node_with_flags(
                    SyntaxKind::ElementAccessExpression,
                    pos,
                    flags,
                    NodeData::ElementAccess { expression, question_dot_token, argument_expression },
                );
                continue;
            }

            if matches!(
                self.token(),
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
            ) {
                let template = if self.token() == SyntaxKind::NoSubstitutionTemplateLiteral {
                    self.parse_literal_node()
                } else {
                    self.parse_template_expression()
                };
                expression = self.finish_node(
                    SyntaxKind::TaggedTemplateExpression,
                    pos,
                    NodeData::TaggedTemplate { tag: expression, template },
                );
                continue;
            }

            return expression;
        }
    }

    fn parse_call_expression_rest(&mut self, pos: u32, mut expression: NodeId) -> NodeId {
        loop {
            expression = self.parse_member_expression_rest(pos, expression, true);
            let question_dot_token = self.parse_optional_token(SyntaxKind::QuestionDotToken);

            let type_arguments = if matches!(
                self.token(),
                SyntaxKind::LessThanToken | SyntaxKind::LessThanLessThanToken
            ) {
                self.try_parse(Self::parse_type_arguments_in_expression)
            } else {
                None
            };
            if type_arguments.is_some() || self.token() == SyntaxKind::OpenParenToken {
                let flags = self.chain_flags(expression, question_dot_token);
                let arguments = Some(self.parse_argument_list());
                expression = self.finish_node_with_flags(
                    SyntaxKind::CallExpression,
                    pos,
                    flags,
                    NodeData::Call { expression, question_dot_token, type_arguments, arguments },
                );
                continue;
            }

            if let Some(question_dot_token) = question_dot_token {
                // `a?.` with nothing usable after it.
                let name = self.create_missing_node(SyntaxKind::Identifier, false, Some(&messages::IDENTIFIER_EXPECTED), &[]);
                expression = self.finish_node_with_flags(
                    SyntaxKind::PropertyAccessExpression,
                    pos,
                    NodeFlags::OPTIONAL_CHAIN,
                    NodeData::PropertyAccess { expression, question_dot_token: Some(question_dot_token), name },
                );
            }
            return expression;
        }
    }

    /// `<T>` in `f<T>(x)`. Fails, so the caller rewinds, unless an
    /// argument list follows; `a < b > (c)` is then parsed as comparisons.
    fn parse_type_arguments_in_expression(&mut self) -> Option<NodeArray> {
        if self.re_scan_less_than_token() != SyntaxKind::LessThanToken {
            return None;
        }
        self.next_token();
        let type_arguments = self.parse_delimited_list(ParsingContext::TypeArguments, Self::parse_type, false);
        if !self.parse_expected(SyntaxKind::GreaterThanToken) {
            return None;
        }
        (self.token() == SyntaxKind::OpenParenToken).then_some(type_arguments)
    }

    fn parse_argument_list(&mut self) -> NodeArray {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.parse_delimited_list(ParsingContext::ArgumentExpressions, Self::parse_argument_expression, false);
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_argument_expression(&mut self) -> NodeId {
        self.do_outside_of_context(
            NodeFlags::DISALLOW_IN_CONTEXT | NodeFlags::DECORATOR_CONTEXT,
            Self::parse_argument_or_array_literal_element,
        )
    }

    fn parse_argument_or_array_literal_element(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::DotDotDotToken => {
                let pos = self.node_pos();
                self.next_token();
                let expression = self.parse_assignment_expression_or_higher();
                self.finish_node(SyntaxKind::SpreadElement, pos, NodeData::Expression { expression })
            }
            SyntaxKind::CommaToken => {
                let pos = self.node_pos();
                self.finish_node(SyntaxKind::OmittedExpression, pos, NodeData::Token)
            }
            _ => self.parse_assignment_expression_or_higher(),
        }
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary_expression(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal_node(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_token_node(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal_expression(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal_expression(),
            SyntaxKind::AsyncKeyword if self.look_ahead(Self::next_token_is_function_keyword_on_same_line) => {
                self.parse_function_expression()
            }
            SyntaxKind::ClassKeyword => {
                let pos = self.node_pos();
                self.parse_class_declaration_or_expression(pos, None, None, SyntaxKind::ClassExpression)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::NewKeyword => self.parse_new_expression_or_new_dot_target(),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
                if self.re_scan_slash_token() == SyntaxKind::RegularExpressionLiteral =>
            {
                self.parse_literal_node()
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            _ => self.parse_identifier_with(&messages::EXPRESSION_EXPECTED),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::ParenthesizedExpression, pos, NodeData::Expression { expression })
    }

    fn parse_array_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenBracketToken);
        let multi_line = self.has_preceding_line_break();
        let elements = self.parse_delimited_list(
            ParsingContext::ArrayLiteralMembers,
            Self::parse_argument_or_array_literal_element,
            false,
        );
        self.parse_expected_matching_brackets(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken, open_parsed, open_pos);
        self.finish_node(SyntaxKind::ArrayLiteralExpression, pos, NodeData::Elements { elements, multi_line })
    }

    fn parse_object_literal_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenBraceToken);
        let multi_line = self.has_preceding_line_break();
        let properties = self.parse_delimited_list(
            ParsingContext::ObjectLiteralMembers,
            Self::parse_object_literal_element,
            true,
        );
        self.parse_expected_matching_brackets(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken, open_parsed, open_pos);
        self.finish_node(SyntaxKind::ObjectLiteralExpression, pos, NodeData::ObjectLiteral { properties, multi_line })
    }

    fn parse_object_literal_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_or_higher();
            return self.finish_node(SyntaxKind::SpreadAssignment, pos, NodeData::Expression { expression });
        }

        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(false);
        if self.parse_accessor_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::GetAccessor);
        }
        if self.parse_accessor_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::SetAccessor);
        }

        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let token_is_identifier = self.is_identifier();
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some() || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_method_declaration(pos, decorators, modifiers, asterisk_token, name, question_token, None);
        }

        // `{ a }` and `{ a = 1 }`; the latter is only valid once the
        // literal turns out to be a destructuring target.
        if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            let equals_token = self.parse_optional_token(SyntaxKind::EqualsToken);
            let initializer = if equals_token.is_some() {
                Some(self.allow_in_and(Self::parse_assignment_expression_or_higher))
            } else {
                None
            };
            let property = VariableLike { question_token, equals_token, initializer, ..VariableLike::named(name) };
            return self.finish_declaration(
                SyntaxKind::ShorthandPropertyAssignment,
                pos,
                decorators,
                modifiers,
                NodeData::VariableLike(Box::new(property)),
            );
        }

        self.parse_expected(SyntaxKind::ColonToken);
        let initializer = Some(self.allow_in_and(Self::parse_assignment_expression_or_higher));
        let property = VariableLike { question_token, initializer, ..VariableLike::named(name) };
        self.finish_declaration(
            SyntaxKind::PropertyAssignment,
            pos,
            decorators,
            modifiers,
            NodeData::VariableLike(Box::new(property)),
        )
    }

    /// `get`/`set` in an object literal, where `{ get: 1 }` and `{ get() {} }`
    /// still name a property.
    fn parse_accessor_modifier(&mut self, kind: SyntaxKind) -> bool {
        self.token() == kind
            && self.try_parse_bool(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (matches!(p.token(), SyntaxKind::OpenBracketToken) || p.is_literal_property_name())
            })
    }

    fn parse_function_expression(&mut self) -> NodeId {
        self.do_outside_of_context(NodeFlags::DECORATOR_CONTEXT, |p| {
            let pos = p.node_pos();
            let modifiers = p.parse_modifiers(false);
            p.parse_expected(SyntaxKind::FunctionKeyword);
            let asterisk_token = p.parse_optional_token(SyntaxKind::AsteriskToken);
            let flags = p.function_signature_flags(asterisk_token, &modifiers);
            // `function* yield() {}` names the function in its own context.
            let name = p.do_in_signature_context(flags, Self::parse_optional_identifier);
            let signature = p.fill_signature(SyntaxKind::ColonToken, flags).unwrap_or_default();
            let body = p.parse_function_block(flags, None);
            let function = FunctionLike {
                asterisk_token,
                name,
                type_parameters: signature.type_parameters,
                parameters: signature.parameters,
                ty: signature.ty,
                body: Some(body),
                ..FunctionLike::default()
            };
            p.finish_declaration(
                SyntaxKind::FunctionExpression,
                pos,
                None,
                modifiers,
                NodeData::FunctionLike(Box::new(function)),
            )
        })
    }

    fn parse_new_expression_or_new_dot_target(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::NewKeyword);
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return self.finish_node(
                SyntaxKind::MetaProperty,
                pos,
                NodeData::MetaProperty { keyword_token: SyntaxKind::NewKeyword, name },
            );
        }
        let expression_pos = self.node_pos();
        let primary = self.parse_primary_expression();
        let expression = self.parse_member_expression_rest(expression_pos, primary, false);
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            self.try_parse(Self::parse_type_arguments_in_expression)
        } else {
            None
        };
        let arguments = if self.token() == SyntaxKind::OpenParenToken {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::NewExpression,
            pos,
            NodeData::Call { expression, question_dot_token: None, type_arguments, arguments },
        )
    }

    fn parse_template_expression(&mut self) -> NodeId {
        let pos = self.node_pos();
        let head = self.parse_literal_node();
        let spans_pos = self.node_pos();
        let mut spans = Vec::new();
        loop {
            let span = self.parse_template_span();
            spans.push(span);
            let NodeData::TemplateSpan { literal, .. } = self.arena[span].data else {
                break;
            };
            if self.arena.kind(literal) != SyntaxKind::TemplateMiddle {
                break;
            }
        }
        let template_spans = NodeArray::new(spans_pos, self.node_pos(), spans);
        self.finish_node(SyntaxKind::TemplateExpression, pos, NodeData::Template { head, template_spans })
    }

    fn parse_template_span(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.allow_in_and(Self::parse_expression);
        let literal = if self.token() == SyntaxKind::CloseBraceToken {
            self.re_scan_template_token();
            self.parse_literal_node()
        } else {
            self.create_missing_node(SyntaxKind::TemplateTail, false, Some(&messages::_0_EXPECTED), &["}"])
        };
        self.finish_node(SyntaxKind::TemplateSpan, pos, NodeData::TemplateSpan { expression, literal })
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    fn try_parse_parenthesized_arrow_function_expression(&mut self) -> Option<NodeId> {
        let head = match self.is_parenthesized_arrow_function_expression() {
            Tristate::False => return None,
            Tristate::True => self.parse_parenthesized_arrow_function_expression_head(true)?,
            Tristate::Unknown => self.try_parse(|p| p.parse_parenthesized_arrow_function_expression_head(false))?,
        };
        let is_async = head.modifiers.is_some();
        let last_token = self.token();
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken, false);
        // A recovered head with neither `=>` nor `{` gets a missing body.
        let body = if matches!(last_token, SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken) {
            self.parse_arrow_function_expression_body(is_async)
        } else {
            self.parse_identifier()
        };
        let arrow = FunctionLike {
            type_parameters: head.signature.type_parameters,
            parameters: head.signature.parameters,
            ty: head.signature.ty,
            equals_greater_than_token: Some(equals_greater_than_token),
            body: Some(body),
            ..FunctionLike::default()
        };
        Some(self.finish_declaration(
            SyntaxKind::ArrowFunction,
            head.pos,
            None,
            head.modifiers,
            NodeData::FunctionLike(Box::new(arrow)),
        ))
    }

    /// Whether `(`, `<` or `async` starts an arrow function: definitely,
    /// definitely not, or only a full parse of the head can tell.
    fn is_parenthesized_arrow_function_expression(&mut self) -> Tristate {
        match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken | SyntaxKind::AsyncKeyword => {
                self.look_ahead(Self::is_parenthesized_arrow_function_expression_worker)
            }
            // `=> x` with no parameters at all; parse it as an arrow to recover.
            SyntaxKind::EqualsGreaterThanToken => Tristate::True,
            _ => Tristate::False,
        }
    }

    fn is_parenthesized_arrow_function_expression_worker(&mut self) -> Tristate {
        if self.token() == SyntaxKind::AsyncKeyword {
            self.next_token();
            if self.has_preceding_line_break() {
                return Tristate::False;
            }
            if !matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
                return Tristate::False;
            }
        }

        let first = self.token();
        let second = self.next_token();

        if first == SyntaxKind::OpenParenToken {
            if second == SyntaxKind::CloseParenToken {
                // `() =>`, `():` and `() {` only make sense for an arrow.
                return match self.next_token() {
                    SyntaxKind::EqualsGreaterThanToken | SyntaxKind::ColonToken | SyntaxKind::OpenBraceToken => {
                        Tristate::True
                    }
                    _ => Tristate::False,
                };
            }
            // `([` and `({` may be destructuring parameters or literals.
            if matches!(second, SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
                return Tristate::Unknown;
            }
            if second == SyntaxKind::DotDotDotToken {
                return Tristate::True;
            }
            // `(public x` is a parameter property, never an expression.
            if second.is_modifier_kind()
                && second != SyntaxKind::AsyncKeyword
                && self.look_ahead(Self::next_token_is_identifier)
            {
                return Tristate::True;
            }
            if !self.is_identifier() && second != SyntaxKind::ThisKeyword {
                return Tristate::False;
            }
            return match self.next_token() {
                // `(x:` is always a typed parameter.
                SyntaxKind::ColonToken => Tristate::True,
                SyntaxKind::QuestionToken => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken
                    ) {
                        Tristate::True
                    } else {
                        Tristate::False
                    }
                }
                SyntaxKind::CommaToken | SyntaxKind::EqualsToken | SyntaxKind::CloseParenToken => Tristate::Unknown,
                _ => Tristate::False,
            };
        }

        // first is `<`
        if !self.is_identifier() {
            return Tristate::False;
        }
        if self.language_variant == LanguageVariant::Jsx {
            // `<T,>` and `<T extends U>` are generic arrows; `<T>`,
            // `<T extends>` and `<T extends=` are JSX.
            let is_arrow_in_jsx = self.look_ahead(|p| match p.next_token() {
                SyntaxKind::ExtendsKeyword => {
                    !matches!(p.next_token(), SyntaxKind::EqualsToken | SyntaxKind::GreaterThanToken)
                }
                SyntaxKind::CommaToken => true,
                _ => false,
            });
            return if is_arrow_in_jsx { Tristate::True } else { Tristate::False };
        }
        Tristate::Unknown
    }

    /// Modifiers, type parameters, parameters and return type. Without
    /// `allow_ambiguity` the head must be complete and be followed by `=>`
    /// or `{`, or there is no arrow here.
    fn parse_parenthesized_arrow_function_expression_head(&mut self, allow_ambiguity: bool) -> Option<ArrowHead> {
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers_for_arrow_function();
        let mut flags = if modifiers.is_some() {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        if !allow_ambiguity {
            flags |= SignatureFlags::REQUIRE_COMPLETE_PARAMETER_LIST;
        }
        let signature = self.fill_signature(SyntaxKind::ColonToken, flags)?;
        if !allow_ambiguity
            && !matches!(
                self.token(),
                SyntaxKind::EqualsGreaterThanToken | SyntaxKind::OpenBraceToken
            )
        {
            return None;
        }
        Some(ArrowHead { pos, modifiers, signature })
    }

    fn parse_arrow_function_expression_body(&mut self, is_async: bool) -> NodeId {
        let await_flag = if is_async {
            SignatureFlags::AWAIT
        } else {
            SignatureFlags::NONE
        };
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_function_block(await_flag, None);
        }
        // `() => var x = 1` and friends: a statement where a block was
        // meant. Parse the statements as a block with the brace missing.
        if !matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword
        ) && self.is_start_of_statement()
            && !self.is_start_of_expression_statement()
        {
            return self.parse_function_block(await_flag | SignatureFlags::IGNORE_MISSING_OPEN_BRACE, None);
        }
        if is_async {
            self.do_in_await_context(Self::parse_assignment_expression_or_higher)
        } else {
            self.do_outside_of_await_context(Self::parse_assignment_expression_or_higher)
        }
    }

    fn is_start_of_expression_statement(&mut self) -> bool {
        !matches!(
            self.token(),
            SyntaxKind::OpenBraceToken | SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword | SyntaxKind::AtToken
        ) && self.is_start_of_expression()
    }

    fn try_parse_async_simple_arrow_function_expression(&mut self) -> Option<NodeId> {
        if self.token() != SyntaxKind::AsyncKeyword || !self.look_ahead(Self::is_unparenthesized_async_arrow_function) {
            return None;
        }
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers_for_arrow_function();
        let parameter = self.parse_identifier();
        Some(self.parse_simple_arrow_function_expression(pos, parameter, modifiers))
    }

    /// `async x =>` all on one line.
    fn is_unparenthesized_async_arrow_function(&mut self) -> bool {
        self.next_token();
        if self.has_preceding_line_break() || !self.is_identifier() {
            return false;
        }
        self.next_token();
        !self.has_preceding_line_break() && self.token() == SyntaxKind::EqualsGreaterThanToken
    }

    fn parse_simple_arrow_function_expression(
        &mut self,
        pos: u32,
        identifier: NodeId,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let parameter_pos = self.arena[identifier].pos;
        let parameter = self.finish_node(
            SyntaxKind::Parameter,
            parameter_pos,
            NodeData::VariableLike(Box::new(VariableLike::named(identifier))),
        );
        let parameters = NodeArray::new(parameter_pos, self.arena[parameter].end, vec![parameter]);
        let equals_greater_than_token = self.parse_expected_token(SyntaxKind::EqualsGreaterThanToken, false);
        let body = self.parse_arrow_function_expression_body(modifiers.is_some());
        let arrow = FunctionLike {
            parameters,
            equals_greater_than_token: Some(equals_greater_than_token),
            body: Some(body),
            ..FunctionLike::default()
        };
        self.finish_declaration(
            SyntaxKind::ArrowFunction,
            pos,
            None,
            modifiers,
            NodeData::FunctionLike(Box::new(arrow)),
        )
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    pub(super) fn is_start_of_left_hand_side_expression(&mut self) -> bool {
        if is_left_hand_side_expression_start(self.token()) {
            return true;
        }
        match self.token() {
            SyntaxKind::ImportKeyword => self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot),
            _ => self.is_identifier(),
        }
    }

    pub(super) fn is_start_of_expression(&mut self) -> bool {
        if self.is_start_of_left_hand_side_expression() {
            return true;
        }
        let token = self.token();
        if is_unary_operator_start(token)
            || matches!(
                token,
                SyntaxKind::LessThanToken | SyntaxKind::AwaitKeyword | SyntaxKind::YieldKeyword
            )
        {
            return true;
        }
        // A binary operator where an operand was expected: treat it as the
        // start of an expression so the missing operand gets reported.
        if self.is_binary_operator() {
            return true;
        }
        self.is_identifier()
    }

    fn is_binary_operator(&self) -> bool {
        if self.in_disallow_in_context() && self.token() == SyntaxKind::InKeyword {
            return false;
        }
        let precedence = get_binary_operator_precedence(self.token());
        precedence.is_valid() && precedence > OperatorPrecedence::Comma
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_source_file, SourceFile};
    use tsfront_ast::node::NodeData;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_ast::types::NodeFlags;

    /// The expression of the first statement.
    fn expression(file: &SourceFile) -> tsfront_ast::types::NodeId {
        let NodeData::Expression { expression } = file.node(file.statements()[0]).data else {
            panic!("expected an expression statement");
        };
        expression
    }

    fn operator(file: &SourceFile, binary: tsfront_ast::types::NodeId) -> SyntaxKind {
        let NodeData::Binary { operator_token, .. } = file.node(binary).data else {
            panic!("expected a binary expression");
        };
        file.kind(operator_token)
    }

    #[test]
    fn test_precedence_and_associativity() {
        let file = parse_source_file("test.ts", "a + b * c;");
        let root = expression(&file);
        assert_eq!(operator(&file, root), SyntaxKind::PlusToken);
        let NodeData::Binary { right, .. } = file.node(root).data else { unreachable!() };
        assert_eq!(operator(&file, right), SyntaxKind::AsteriskToken);

        // `**` is right associative.
        let file = parse_source_file("test.ts", "a ** b ** c;");
        let NodeData::Binary { left, right, .. } = file.node(expression(&file)).data else { unreachable!() };
        assert_eq!(file.kind(left), SyntaxKind::Identifier);
        assert_eq!(file.kind(right), SyntaxKind::BinaryExpression);

        // Assignment is right associative too.
        let file = parse_source_file("test.ts", "a = b = c;");
        let NodeData::Binary { right, .. } = file.node(expression(&file)).data else { unreachable!() };
        assert_eq!(operator(&file, right), SyntaxKind::EqualsToken);
    }

    #[test]
    fn test_greater_than_rescans_into_compound_operators() {
        for (text, kind) in [
            ("a >= b;", SyntaxKind::GreaterThanEqualsToken),
            ("a >> b;", SyntaxKind::GreaterThanGreaterThanToken),
            ("a >>> b;", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            ("a >>= b;", SyntaxKind::GreaterThanGreaterThanEqualsToken),
        ] {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}");
            assert_eq!(operator(&file, expression(&file)), kind, "{text}");
        }
    }

    #[test]
    fn test_unary_left_of_exponentiation_is_reported() {
        let file = parse_source_file("test.ts", "-2 ** 2;");
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(file.parse_diagnostics[0].code, 17006);
        assert_eq!(file.parse_diagnostics[0].start(), 0);

        let file = parse_source_file("test.ts", "<number>x ** 2;");
        assert_eq!(file.parse_diagnostics[0].code, 17007);

        let file = parse_source_file("test.ts", "(-2) ** 2;");
        assert!(file.parse_diagnostics.is_empty());
    }

    #[test]
    fn test_arrow_function_shapes() {
        let cases = [
            "x => x;",
            "async x => await x;",
            "() => {};",
            "(a, b) => a + b;",
            "(a: number, b?: string): void => {};",
            "({ a, b }) => a;",
            "([a, b] = [1, 2]) => a;",
            "(...rest) => rest;",
            "async (a) => a;",
            "<T>(x: T) => x;",
        ];
        for text in cases {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            assert_eq!(file.kind(expression(&file)), SyntaxKind::ArrowFunction, "{text}");
        }
    }

    #[test]
    fn test_parenthesized_expressions_are_not_arrows() {
        for text in ["(a, b);", "(a);", "({ a: 1 });", "([1, 2]);", "(a = 1);"] {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            assert_eq!(file.kind(expression(&file)), SyntaxKind::ParenthesizedExpression, "{text}");
        }
    }

    #[test]
    fn test_generic_arrow_in_tsx_needs_disambiguation() {
        let file = parse_source_file("test.tsx", "<T,>(x: T) => x;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(file.kind(expression(&file)), SyntaxKind::ArrowFunction);

        let file = parse_source_file("test.tsx", "<T extends unknown>(x: T) => x;");
        assert_eq!(file.kind(expression(&file)), SyntaxKind::ArrowFunction);
    }

    #[test]
    fn test_call_type_arguments_need_argument_list() {
        let file = parse_source_file("test.ts", "f<T>(x);");
        let NodeData::Call { type_arguments, .. } = &file.node(expression(&file)).data else {
            panic!("expected a call");
        };
        assert_eq!(type_arguments.as_ref().map(|list| list.len()), Some(1));

        // Without `(` this is two comparisons.
        let file = parse_source_file("test.ts", "a < b > c;");
        assert!(file.parse_diagnostics.is_empty());
        assert_eq!(file.kind(expression(&file)), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_optional_chain_flags_propagate() {
        let file = parse_source_file("test.ts", "a?.b.c();");
        let call = expression(&file);
        assert_eq!(file.kind(call), SyntaxKind::CallExpression);
        assert!(file.node(call).flags.contains(NodeFlags::OPTIONAL_CHAIN));

        let file = parse_source_file("test.ts", "(a?.b).c;");
        assert!(!file.node(expression(&file)).flags.contains(NodeFlags::OPTIONAL_CHAIN));
    }

    #[test]
    fn test_member_and_primary_forms() {
        let cases = [
            ("new Foo<T>(1);", SyntaxKind::NewExpression),
            ("new Foo;", SyntaxKind::NewExpression),
            ("new.target;", SyntaxKind::MetaProperty),
            ("import.meta;", SyntaxKind::MetaProperty),
            ("import('m');", SyntaxKind::CallExpression),
            ("tag`a${b}c`;", SyntaxKind::TaggedTemplateExpression),
            ("`a${b}c${d}e`;", SyntaxKind::TemplateExpression),
            ("/ab+c/gi;", SyntaxKind::RegularExpressionLiteral),
            ("x!;", SyntaxKind::NonNullExpression),
            ("a[0];", SyntaxKind::ElementAccessExpression),
            ("x as string;", SyntaxKind::AsExpression),
            ("a ? b : c;", SyntaxKind::ConditionalExpression),
            ("typeof x;", SyntaxKind::TypeOfExpression),
            ("void 0;", SyntaxKind::VoidExpression),
            ("delete a.b;", SyntaxKind::DeleteExpression),
            ("x++;", SyntaxKind::PostfixUnaryExpression),
            ("--x;", SyntaxKind::PrefixUnaryExpression),
            ("[1, , ...rest];", SyntaxKind::ArrayLiteralExpression),
            ("({ a, b: 1, [c]: 2, ...d, m() {}, get g() { return 1; } });", SyntaxKind::ParenthesizedExpression),
            ("(class {});", SyntaxKind::ParenthesizedExpression),
        ];
        for (text, kind) in cases {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            let statement = file.statements()[0];
            let actual = match file.node(statement).data {
                NodeData::Expression { expression } => file.kind(expression),
                _ => file.kind(statement),
            };
            assert_eq!(actual, kind, "{text}");
        }
    }

    #[test]
    fn test_yield_and_await_follow_context() {
        let file = parse_source_file("test.ts", "function* g() { yield 1; }\nasync function f() { await x; }");
        assert_eq!(file.descendants_of_kind(SyntaxKind::YieldExpression).len(), 1);
        assert_eq!(file.descendants_of_kind(SyntaxKind::AwaitExpression).len(), 1);

        // Plain functions see both as identifiers.
        let file = parse_source_file("test.ts", "function f() { yield; await; }");
        assert!(file.parse_diagnostics.is_empty());
        assert!(file.descendants_of_kind(SyntaxKind::YieldExpression).is_empty());
    }

    #[test]
    fn test_as_after_line_break_starts_statement() {
        let file = parse_source_file("test.ts", "x\nas\nstring;");
        assert_eq!(file.statements().len(), 3);
    }

    #[test]
    fn test_missing_operand_reports_expression_expected() {
        let file = parse_source_file("test.ts", "a + ;");
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(file.parse_diagnostics[0].message_text, "Expression expected.");
    }
}
