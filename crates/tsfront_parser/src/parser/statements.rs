//! Statements, blocks and variable declarations.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_diagnostics::{messages, DiagnosticMessage};

use super::{ParsingContext, Parser, SignatureFlags};
use crate::utilities::{is_class_member_modifier, is_in_or_of_keyword, is_statement_keyword};

impl Parser {
    // ========================================================================
    // Statement dispatch
    // ========================================================================

    pub(super) fn parse_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        match self.nested(&messages::STATEMENT_EXPECTED, Self::parse_statement_worker) {
            Ok(statement) => statement,
            Err(skipped) => self.finish_node(
                SyntaxKind::ExpressionStatement,
                pos,
                NodeData::Expression { expression: skipped },
            ),
        }
    }

    fn parse_statement_worker(&mut self) -> NodeId {
        let pos = self.node_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return self.finish_node(SyntaxKind::EmptyStatement, pos, NodeData::Token);
            }
            SyntaxKind::OpenBraceToken => return self.parse_block(false, None),
            SyntaxKind::VarKeyword => return self.parse_variable_statement(pos, None, None),
            SyntaxKind::LetKeyword if self.is_let_declaration() => {
                return self.parse_variable_statement(pos, None, None);
            }
            SyntaxKind::FunctionKeyword => return self.parse_function_declaration(pos, None, None),
            SyntaxKind::ClassKeyword => {
                return self.parse_class_declaration_or_expression(pos, None, None, SyntaxKind::ClassDeclaration);
            }
            SyntaxKind::IfKeyword => return self.parse_if_statement(),
            SyntaxKind::DoKeyword => return self.parse_do_statement(),
            SyntaxKind::WhileKeyword => return self.parse_while_statement(),
            SyntaxKind::ForKeyword => return self.parse_for_or_for_in_or_for_of_statement(),
            SyntaxKind::ContinueKeyword => return self.parse_break_or_continue_statement(SyntaxKind::ContinueStatement),
            SyntaxKind::BreakKeyword => return self.parse_break_or_continue_statement(SyntaxKind::BreakStatement),
            SyntaxKind::ReturnKeyword => return self.parse_return_statement(),
            SyntaxKind::WithKeyword => return self.parse_with_statement(),
            SyntaxKind::SwitchKeyword => return self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => return self.parse_throw_statement(),
            // A stray `catch` or `finally` still parses as a try statement
            // with a missing try block.
            SyntaxKind::TryKeyword | SyntaxKind::CatchKeyword | SyntaxKind::FinallyKeyword => {
                return self.parse_try_statement();
            }
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                return self.finish_node(SyntaxKind::DebuggerStatement, pos, NodeData::Token);
            }
            SyntaxKind::AtToken => return self.parse_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::ExportKeyword
            | SyntaxKind::ImportKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::GlobalKeyword
                if self.is_start_of_declaration() =>
            {
                return self.parse_declaration();
            }
            _ => {}
        }
        self.parse_expression_or_labeled_statement()
    }

    pub(super) fn is_start_of_statement(&mut self) -> bool {
        let token = self.token();
        if is_statement_keyword(token) {
            return true;
        }
        match token {
            SyntaxKind::ImportKeyword => {
                self.is_start_of_declaration() || self.look_ahead(Self::next_token_is_open_paren_or_less_than_or_dot)
            }
            SyntaxKind::ConstKeyword | SyntaxKind::ExportKeyword => self.is_start_of_declaration(),
            SyntaxKind::AsyncKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::ModuleKeyword
            | SyntaxKind::NamespaceKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::GlobalKeyword => true,
            kind if is_class_member_modifier(kind) => {
                self.is_start_of_declaration()
                    || !self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
            }
            _ => self.is_start_of_expression(),
        }
    }

    pub(super) fn is_start_of_declaration(&mut self) -> bool {
        self.look_ahead(Self::is_declaration)
    }

    /// Walks past modifier-like keywords to the token that decides whether
    /// a declaration starts here. Always run under `look_ahead`.
    fn is_declaration(&mut self) -> bool {
        loop {
            match self.token() {
                SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::EnumKeyword => return true,
                SyntaxKind::InterfaceKeyword | SyntaxKind::TypeKeyword => {
                    return self.next_token_is_identifier_on_same_line();
                }
                SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                    return self.next_token_is_identifier_or_string_literal_on_same_line();
                }
                SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword => {
                    self.next_token();
                    if self.has_preceding_line_break() {
                        return false;
                    }
                }
                SyntaxKind::GlobalKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::Identifier | SyntaxKind::ExportKeyword
                    );
                }
                SyntaxKind::ImportKeyword => {
                    self.next_token();
                    return matches!(
                        self.token(),
                        SyntaxKind::StringLiteral | SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken
                    ) || self.token_is_identifier_or_keyword();
                }
                SyntaxKind::ExportKeyword => {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::EqualsToken
                            | SyntaxKind::AsteriskToken
                            | SyntaxKind::OpenBraceToken
                            | SyntaxKind::DefaultKeyword
                            | SyntaxKind::AsKeyword
                    ) {
                        return true;
                    }
                }
                SyntaxKind::StaticKeyword => {
                    self.next_token();
                }
                _ => return false,
            }
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(Self::next_token_is_identifier_or_start_of_destructuring)
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    pub(super) fn parse_block(&mut self, ignore_missing_open_brace: bool, message: Option<&DiagnosticMessage>) -> NodeId {
        let pos = self.node_pos();
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected_with(SyntaxKind::OpenBraceToken, message, true);
        let (statements, multi_line) =
            if open_parsed || ignore_missing_open_brace {
                let multi_line = self.has_preceding_line_break();
                let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
                self.parse_expected_matching_brackets(
                    SyntaxKind::OpenBraceToken,
                    SyntaxKind::CloseBraceToken,
                    open_parsed,
                    open_pos,
                );
                (statements, multi_line)
            } else {
                (self.create_missing_list(), false)
            };
        self.finish_node(SyntaxKind::Block, pos, NodeData::Block { statements, multi_line })
    }

    /// A function body: yield and await context come from `flags`, and a
    /// decorator context does not leak in.
    pub(super) fn parse_function_block(&mut self, flags: SignatureFlags, message: Option<&DiagnosticMessage>) -> NodeId {
        self.do_in_signature_context(flags, |p| {
            p.do_outside_of_context(NodeFlags::DECORATOR_CONTEXT, |p| {
                p.parse_block(flags.contains(SignatureFlags::IGNORE_MISSING_OPEN_BRACE), message)
            })
        })
    }

    /// Overloads and ambient declarations end in `;` instead of a body.
    pub(super) fn parse_function_block_or_semicolon(
        &mut self,
        flags: SignatureFlags,
        message: Option<&DiagnosticMessage>,
    ) -> Option<NodeId> {
        if self.token() != SyntaxKind::OpenBraceToken && self.can_parse_semicolon() {
            self.parse_semicolon();
            return None;
        }
        Some(self.parse_function_block(flags, message))
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `( expression )` as in `if`, `while`, `with` and `switch` heads.
    fn parse_parenthesized_head(&mut self) -> NodeId {
        let open_pos = self.token_pos();
        let open_parsed = self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected_matching_brackets(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken, open_parsed, open_pos);
        expression
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::IfKeyword);
        let expression = self.parse_parenthesized_head();
        let then_statement = self.parse_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement())
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::IfStatement,
            pos,
            NodeData::If { expression, then_statement, else_statement },
        )
    }

    fn parse_do_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::DoKeyword);
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_head();
        // `do x; while (y) z` is two statements even without a `;`.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(SyntaxKind::DoStatement, pos, NodeData::Do { statement, expression })
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_head();
        let statement = self.parse_statement();
        self.finish_node(SyntaxKind::WhileStatement, pos, NodeData::While { expression, statement })
    }

    fn parse_with_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::WithKeyword);
        let expression = self.parse_parenthesized_head();
        let statement = self.parse_statement();
        self.finish_node(SyntaxKind::WithStatement, pos, NodeData::While { expression, statement })
    }

    fn parse_for_or_for_in_or_for_of_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ForKeyword);
        let await_modifier = self.parse_optional_token(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let initializer = if self.token() == SyntaxKind::SemicolonToken {
            None
        } else if matches!(
            self.token(),
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
        ) {
            Some(self.parse_variable_declaration_list(true))
        } else {
            Some(self.disallow_in_and(Self::parse_expression))
        };

        // `for await` only admits `of`.
        let in_or_of = if await_modifier.is_some() { SyntaxKind::OfKeyword } else { self.token() };
        if is_in_or_of_keyword(in_or_of) {
            self.parse_expected(in_or_of);
            let initializer = match initializer {
                Some(initializer) => initializer,
                None => self.create_missing_node(
                    SyntaxKind::Identifier,
                    true,
                    Some(&messages::VARIABLE_DECLARATION_EXPECTED),
                    &[],
                ),
            };
            let expression = if in_or_of == SyntaxKind::InKeyword {
                self.allow_in_and(Self::parse_expression)
            } else {
                self.allow_in_and(Self::parse_assignment_expression_or_higher)
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_statement();
            let kind = if in_or_of == SyntaxKind::InKeyword {
                SyntaxKind::ForInStatement
            } else {
                SyntaxKind::ForOfStatement
            };
            return self.finish_node(kind, pos, NodeData::ForInOf { await_modifier, initializer, expression, statement });
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if !matches!(self.token(), SyntaxKind::SemicolonToken | SyntaxKind::CloseParenToken) {
            Some(self.allow_in_and(Self::parse_expression))
        } else {
            None
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.token() != SyntaxKind::CloseParenToken {
            Some(self.allow_in_and(Self::parse_expression))
        } else {
            None
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.finish_node(
            SyntaxKind::ForStatement,
            pos,
            NodeData::For { initializer, condition, incrementor, statement },
        )
    }

    fn parse_break_or_continue_statement(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        self.next_token();
        let label = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_identifier())
        };
        self.parse_semicolon();
        self.finish_node(kind, pos, NodeData::Jump { label })
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ReturnKeyword);
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.allow_in_and(Self::parse_expression))
        };
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ReturnStatement, pos, NodeData::Return { expression })
    }

    fn parse_switch_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword);
        let expression = self.parse_parenthesized_head();
        let case_block_pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let clauses = self.parse_list(ParsingContext::SwitchClauses, Self::parse_case_or_default_clause);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let case_block = self.finish_node(SyntaxKind::CaseBlock, case_block_pos, NodeData::CaseBlock { clauses });
        self.finish_node(SyntaxKind::SwitchStatement, pos, NodeData::Switch { expression, case_block })
    }

    fn parse_case_or_default_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
            (SyntaxKind::CaseClause, Some(self.allow_in_and(Self::parse_expression)))
        } else {
            self.parse_expected(SyntaxKind::DefaultKeyword);
            (SyntaxKind::DefaultClause, None)
        };
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_list(ParsingContext::SwitchClauseStatements, Self::parse_statement);
        self.finish_node(kind, pos, NodeData::CaseClause { expression, statements })
    }

    fn parse_throw_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::ThrowKeyword);
        // No automatic semicolon between `throw` and its operand.
        let expression = if self.has_preceding_line_break() {
            self.create_missing_node(
                SyntaxKind::Identifier,
                false,
                Some(&messages::LINE_BREAK_NOT_PERMITTED_HERE),
                &[],
            )
        } else {
            self.allow_in_and(Self::parse_expression)
        };
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ThrowStatement, pos, NodeData::Expression { expression })
    }

    fn parse_try_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TryKeyword);
        let try_block = self.parse_block(false, None);
        let catch_clause = if self.token() == SyntaxKind::CatchKeyword {
            Some(self.parse_catch_clause())
        } else {
            None
        };
        let finally_block = if catch_clause.is_none() || self.token() == SyntaxKind::FinallyKeyword {
            self.parse_expected(SyntaxKind::FinallyKeyword);
            Some(self.parse_block(false, None))
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::TryStatement,
            pos,
            NodeData::Try { try_block, catch_clause, finally_block },
        )
    }

    fn parse_catch_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::CatchKeyword);
        let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
            let declaration = self.parse_variable_declaration();
            self.parse_expected(SyntaxKind::CloseParenToken);
            Some(declaration)
        } else {
            None
        };
        let block = self.parse_block(false, None);
        self.finish_node(SyntaxKind::CatchClause, pos, NodeData::CatchClause { variable_declaration, block })
    }

    /// An identifier followed by `:` is a label; anything else is an
    /// expression statement.
    fn parse_expression_or_labeled_statement(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.allow_in_and(Self::parse_expression);
        if self.arena.kind(expression) == SyntaxKind::Identifier && self.parse_optional(SyntaxKind::ColonToken) {
            let statement = self.parse_statement();
            return self.finish_node(
                SyntaxKind::LabeledStatement,
                pos,
                NodeData::Labeled { label: expression, statement },
            );
        }
        self.parse_semicolon();
        self.finish_node(SyntaxKind::ExpressionStatement, pos, NodeData::Expression { expression })
    }

    // ========================================================================
    // Variables and binding patterns
    // ========================================================================

    pub(super) fn parse_variable_statement(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let declaration_list = self.parse_variable_declaration_list(false);
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::VariableStatement,
            pos,
            decorators,
            modifiers,
            NodeData::VariableStatement { declaration_list },
        )
    }

    /// `var`/`let`/`const` and its declarations. Inside a `for` head the
    /// `in` operator is off so `for (var x in y)` reads as for-in.
    pub(super) fn parse_variable_declaration_list(&mut self, in_for_statement_initializer: bool) -> NodeId {
        let pos = self.node_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        // `for (let of x)` declares nothing; `of` is the loop keyword.
        let declarations = if self.token() == SyntaxKind::OfKeyword && self.look_ahead(Self::can_follow_contextual_of_keyword) {
            self.create_missing_list()
        } else {
            let (set, clear) = if in_for_statement_initializer {
                (NodeFlags::DISALLOW_IN_CONTEXT, NodeFlags::NONE)
            } else {
                (NodeFlags::NONE, NodeFlags::DISALLOW_IN_CONTEXT)
            };
            self.with_context(set, clear, |p| {
                p.parse_delimited_list(ParsingContext::VariableDeclarations, Self::parse_variable_declaration, false)
            })
        };
        self.finish_node_with_flags(
            SyntaxKind::VariableDeclarationList,
            pos,
            flags,
            NodeData::VariableDeclarationList { declarations },
        )
    }

    fn can_follow_contextual_of_keyword(&mut self) -> bool {
        self.next_token_is_identifier() && self.next_token() == SyntaxKind::CloseParenToken
    }

    pub(super) fn parse_variable_declaration(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_identifier_or_pattern();
        let ty = self.parse_type_annotation();
        let initializer = if is_in_or_of_keyword(self.token()) {
            None
        } else {
            self.parse_initializer(false)
        };
        let declaration = VariableLike { ty, initializer, ..VariableLike::named(name) };
        self.finish_node(
            SyntaxKind::VariableDeclaration,
            pos,
            NodeData::VariableLike(Box::new(declaration)),
        )
    }

    /// `= expression`, if present. Without the `=`, an expression that
    /// starts on the same line is taken as an initializer with the `=`
    /// reported missing.
    pub(super) fn parse_initializer(&mut self, in_parameter: bool) -> Option<NodeId> {
        if self.token() != SyntaxKind::EqualsToken
            && (self.has_preceding_line_break()
                || (in_parameter && self.token() == SyntaxKind::OpenBraceToken)
                || !self.is_start_of_expression())
        {
            return None;
        }
        self.parse_expected(SyntaxKind::EqualsToken);
        Some(self.parse_assignment_expression_or_higher())
    }

    pub(super) fn parse_identifier_or_pattern(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_array_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.parse_delimited_list(ParsingContext::ArrayBindingElements, Self::parse_array_binding_element, false);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            SyntaxKind::ArrayBindingPattern,
            pos,
            NodeData::Elements { elements, multi_line: false },
        )
    }

    fn parse_array_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.token() == SyntaxKind::CommaToken {
            return self.finish_node(SyntaxKind::OmittedExpression, pos, NodeData::Token);
        }
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        let initializer = self.parse_initializer(false);
        let element = VariableLike { dot_dot_dot_token, initializer, ..VariableLike::named(name) };
        self.finish_node(SyntaxKind::BindingElement, pos, NodeData::VariableLike(Box::new(element)))
    }

    fn parse_object_binding_pattern(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let elements = self.parse_delimited_list(ParsingContext::ObjectBindingElements, Self::parse_object_binding_element, false);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::ObjectBindingPattern,
            pos,
            NodeData::Elements { elements, multi_line: false },
        )
    }

    /// `a`, `a = 1`, `a: b`, `a: { c }`, `[k]: v` or `...rest`.
    fn parse_object_binding_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let token_is_identifier = self.is_identifier();
        let property_name = self.parse_property_name();
        let (property_name, name) = if token_is_identifier && self.token() != SyntaxKind::ColonToken {
            (None, property_name)
        } else {
            self.parse_expected(SyntaxKind::ColonToken);
            (Some(property_name), self.parse_identifier_or_pattern())
        };
        let initializer = self.parse_initializer(false);
        let element = VariableLike {
            property_name,
            dot_dot_dot_token,
            initializer,
            ..VariableLike::named(name)
        };
        self.finish_node(SyntaxKind::BindingElement, pos, NodeData::VariableLike(Box::new(element)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_source_file, SourceFile};
    use tsfront_ast::node::NodeData;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_ast::types::NodeFlags;

    fn first_statement(file: &SourceFile) -> SyntaxKind {
        file.kind(file.statements()[0])
    }

    #[test]
    fn test_statement_kinds() {
        let cases = [
            (";", SyntaxKind::EmptyStatement),
            ("{}", SyntaxKind::Block),
            ("if (a) b; else c;", SyntaxKind::IfStatement),
            ("do x++; while (x < 3)", SyntaxKind::DoStatement),
            ("while (a) {}", SyntaxKind::WhileStatement),
            ("for (;;) {}", SyntaxKind::ForStatement),
            ("for (const k in o) {}", SyntaxKind::ForInStatement),
            ("for (const v of xs) {}", SyntaxKind::ForOfStatement),
            ("switch (a) { case 1: break; default: }", SyntaxKind::SwitchStatement),
            ("try {} catch (e) {} finally {}", SyntaxKind::TryStatement),
            ("try {} catch {}", SyntaxKind::TryStatement),
            ("outer: for (;;) { continue outer; }", SyntaxKind::LabeledStatement),
            ("throw new Error()", SyntaxKind::ThrowStatement),
            ("debugger;", SyntaxKind::DebuggerStatement),
            ("with (o) {}", SyntaxKind::WithStatement),
        ];
        for (text, kind) in cases {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            assert_eq!(first_statement(&file), kind, "{text}");
        }
    }

    #[test]
    fn test_let_is_an_identifier_when_nothing_is_declared() {
        let file = parse_source_file("test.ts", "let = 1;");
        assert_eq!(first_statement(&file), SyntaxKind::ExpressionStatement);
        let file = parse_source_file("test.ts", "let [a, b] = c;");
        assert_eq!(first_statement(&file), SyntaxKind::VariableStatement);
    }

    #[test]
    fn test_declaration_list_flags() {
        let file = parse_source_file("test.ts", "const a = 1, b = 2;");
        let NodeData::VariableStatement { declaration_list } = file.node(file.statements()[0]).data else {
            panic!("expected a variable statement");
        };
        let list = file.node(declaration_list);
        assert!(list.flags.contains(NodeFlags::CONST));
        let NodeData::VariableDeclarationList { declarations } = &list.data else {
            panic!("expected a declaration list");
        };
        assert_eq!(declarations.len(), 2);
    }

    #[test]
    fn test_in_is_disallowed_only_in_for_head() {
        let file = parse_source_file("test.ts", "for (var i = 0 in o;;) {}");
        assert!(!file.parse_diagnostics.is_empty());
        let file = parse_source_file("test.ts", "for (var i = ('a' in o); i;) {}");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    }

    #[test]
    fn test_throw_needs_operand_on_same_line() {
        let file = parse_source_file("test.ts", "throw\nx;");
        assert!(file.parse_diagnostics[0].message_text.contains("Line break not permitted here"));
    }

    #[test]
    fn test_binding_patterns() {
        let file = parse_source_file("test.ts", "const { a, b: [c, , ...d], ...e } = f;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(file.descendants_of_kind(SyntaxKind::BindingElement).len(), 5);
        assert_eq!(file.descendants_of_kind(SyntaxKind::OmittedExpression).len(), 1);
    }

    #[test]
    fn test_block_recovers_at_close_brace() {
        let file = parse_source_file("test.ts", "function f() { let x = ; }\nlet y = 1;");
        assert_eq!(file.statements().len(), 2);
        assert!(file.parse_diagnostics[0].message_text.contains("Expression expected."));
    }
}
