//! Declarations: modifiers and decorators, functions, classes and their
//! members, interfaces, type aliases, enums, namespaces, imports and
//! exports.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_diagnostics::{messages, DiagnosticMessage};

use super::{ParsingContext, Parser, SignatureFlags};
use crate::utilities::is_class_member_modifier;

/// Whether a not yet finished modifier list holds `kind`.
fn has_modifier_kind(arena: &AstArena, modifiers: &Option<NodeArray>, kind: SyntaxKind) -> bool {
    modifiers
        .as_ref()
        .is_some_and(|modifiers| modifiers.iter().any(|id| arena.kind(id) == kind))
}

impl Parser {
    // ========================================================================
    // Decorators and modifiers
    // ========================================================================

    pub(super) fn parse_declaration(&mut self) -> NodeId {
        let pos = self.node_pos();
        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(false);
        self.parse_declaration_worker(pos, decorators, modifiers)
    }

    fn parse_declaration_worker(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, decorators, modifiers)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, decorators, modifiers),
            SyntaxKind::ClassKeyword => {
                self.parse_class_declaration_or_expression(pos, decorators, modifiers, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::InterfaceKeyword => self.parse_interface_declaration(pos, decorators, modifiers),
            SyntaxKind::TypeKeyword => self.parse_type_alias_declaration(pos, decorators, modifiers),
            SyntaxKind::EnumKeyword => self.parse_enum_declaration(pos, decorators, modifiers),
            SyntaxKind::GlobalKeyword | SyntaxKind::ModuleKeyword | SyntaxKind::NamespaceKeyword => {
                self.parse_module_declaration(pos, decorators, modifiers)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration_or_import_equals(pos, decorators, modifiers),
            SyntaxKind::ExportKeyword => {
                self.next_token();
                match self.token() {
                    SyntaxKind::DefaultKeyword | SyntaxKind::EqualsToken => {
                        self.parse_export_assignment(pos, decorators, modifiers)
                    }
                    SyntaxKind::AsKeyword => self.parse_namespace_export_declaration(pos, decorators, modifiers),
                    _ => self.parse_export_declaration(pos, decorators, modifiers),
                }
            }
            _ => {
                // Decorators or modifiers promised a declaration that isn't there.
                self.parse_error_at_current_token(&messages::DECLARATION_EXPECTED, &[]);
                self.finish_declaration(SyntaxKind::MissingDeclaration, pos, decorators, modifiers, NodeData::Token)
            }
        }
    }

    pub(super) fn parse_decorators(&mut self) -> Option<NodeArray> {
        let list_pos = self.node_pos();
        let mut decorators = Vec::new();
        loop {
            let pos = self.node_pos();
            if !self.parse_optional(SyntaxKind::AtToken) {
                break;
            }
            let expression = self.do_in_decorator_context(Self::parse_left_hand_side_expression_or_higher);
            decorators.push(self.finish_node(SyntaxKind::Decorator, pos, NodeData::Expression { expression }));
        }
        if decorators.is_empty() {
            None
        } else {
            Some(NodeArray::new(list_pos, self.node_pos(), decorators))
        }
    }

    /// Modifier keywords, each only when the token after it can follow a
    /// modifier. With `permit_invalid_const_as_modifier`, `const` is taken
    /// in class bodies so that `const x = 1` inside a class recovers.
    pub(super) fn parse_modifiers(&mut self, permit_invalid_const_as_modifier: bool) -> Option<NodeArray> {
        let list_pos = self.node_pos();
        let mut modifiers = Vec::new();
        loop {
            let pos = self.node_pos();
            let kind = self.token();
            let accepted = if kind == SyntaxKind::ConstKeyword && permit_invalid_const_as_modifier {
                self.try_parse_bool(Self::next_token_is_on_same_line_and_can_follow_modifier)
            } else {
                self.parse_any_contextual_modifier()
            };
            if !accepted {
                break;
            }
            modifiers.push(self.finish_node(kind, pos, NodeData::Token));
        }
        if modifiers.is_empty() {
            None
        } else {
            Some(NodeArray::new(list_pos, self.node_pos(), modifiers))
        }
    }

    /// `async` is the only modifier an arrow function takes.
    pub(super) fn parse_modifiers_for_arrow_function(&mut self) -> Option<NodeArray> {
        if self.token() != SyntaxKind::AsyncKeyword {
            return None;
        }
        let pos = self.node_pos();
        self.next_token();
        let modifier = self.finish_node(SyntaxKind::AsyncKeyword, pos, NodeData::Token);
        Some(NodeArray::new(pos, self.node_pos(), vec![modifier]))
    }

    fn parse_any_contextual_modifier(&mut self) -> bool {
        self.token().is_modifier_kind() && self.try_parse_bool(Self::next_token_can_follow_modifier)
    }

    fn parse_contextual_modifier(&mut self, kind: SyntaxKind) -> bool {
        self.token() == kind && self.try_parse_bool(Self::next_token_can_follow_modifier)
    }

    fn next_token_can_follow_modifier(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ConstKeyword => self.next_token() == SyntaxKind::EnumKeyword,
            SyntaxKind::ExportKeyword => {
                self.next_token();
                if self.token() == SyntaxKind::DefaultKeyword {
                    return self.look_ahead(Self::next_token_can_follow_default_keyword);
                }
                !matches!(
                    self.token(),
                    SyntaxKind::AsteriskToken | SyntaxKind::AsKeyword | SyntaxKind::OpenBraceToken
                ) && self.can_follow_modifier()
            }
            SyntaxKind::DefaultKeyword => self.next_token_can_follow_default_keyword(),
            SyntaxKind::StaticKeyword => {
                self.next_token();
                self.can_follow_modifier()
            }
            _ => self.next_token_is_on_same_line_and_can_follow_modifier(),
        }
    }

    fn next_token_is_on_same_line_and_can_follow_modifier(&mut self) -> bool {
        self.next_token();
        !self.has_preceding_line_break() && self.can_follow_modifier()
    }

    fn can_follow_modifier(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::DotDotDotToken
        ) || self.is_literal_property_name()
    }

    /// `export default` only becomes two modifiers in front of a class,
    /// function or interface; otherwise it starts an export assignment.
    fn next_token_can_follow_default_keyword(&mut self) -> bool {
        self.next_token();
        match self.token() {
            SyntaxKind::ClassKeyword | SyntaxKind::FunctionKeyword | SyntaxKind::InterfaceKeyword => true,
            SyntaxKind::AbstractKeyword => self.look_ahead(Self::next_token_is_class_keyword_on_same_line),
            SyntaxKind::AsyncKeyword => self.look_ahead(Self::next_token_is_function_keyword_on_same_line),
            _ => false,
        }
    }

    // ========================================================================
    // Functions and signatures
    // ========================================================================

    pub(super) fn parse_function_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = if has_modifier_kind(&self.arena, &modifiers, SyntaxKind::DefaultKeyword) {
            self.parse_optional_identifier()
        } else {
            Some(self.parse_identifier())
        };
        let flags = self.function_signature_flags(asterisk_token, &modifiers);
        let signature = self.fill_signature(SyntaxKind::ColonToken, flags).unwrap_or_default();
        let body = self.parse_function_block_or_semicolon(flags, Some(&messages::OR_EXPECTED));
        let function = FunctionLike {
            asterisk_token,
            name,
            type_parameters: signature.type_parameters,
            parameters: signature.parameters,
            ty: signature.ty,
            body,
            ..FunctionLike::default()
        };
        self.finish_declaration(
            SyntaxKind::FunctionDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::FunctionLike(Box::new(function)),
        )
    }

    /// `*` makes a generator, `async` an async function.
    pub(super) fn function_signature_flags(&self, asterisk_token: Option<NodeId>, modifiers: &Option<NodeArray>) -> SignatureFlags {
        let mut flags = SignatureFlags::NONE;
        if asterisk_token.is_some() {
            flags |= SignatureFlags::YIELD;
        }
        if has_modifier_kind(&self.arena, modifiers, SyntaxKind::AsyncKeyword) {
            flags |= SignatureFlags::AWAIT;
        }
        flags
    }

    /// Type parameters, parameter list and return type. `None` only when
    /// `REQUIRE_COMPLETE_PARAMETER_LIST` is set and a parenthesis is
    /// missing, which tells arrow speculation to give up.
    pub(super) fn fill_signature(&mut self, return_token: SyntaxKind, flags: SignatureFlags) -> Option<SignatureDecl> {
        let type_parameters = self.parse_type_parameters();
        let parameters = self.parse_parameter_list(flags)?;
        let ty = if return_token == SyntaxKind::EqualsGreaterThanToken {
            self.parse_expected(return_token);
            Some(self.parse_type_or_type_predicate())
        } else if self.parse_optional(return_token) {
            Some(self.parse_type_or_type_predicate())
        } else if flags.contains(SignatureFlags::TYPE) && self.token() == SyntaxKind::EqualsGreaterThanToken {
            // `(a): => T` style mix-ups in type members.
            self.parse_error_at_current_token(&messages::_0_EXPECTED, &[":"]);
            self.next_token();
            Some(self.parse_type_or_type_predicate())
        } else {
            None
        };
        Some(SignatureDecl { type_parameters, parameters, ty })
    }

    fn parse_parameter_list(&mut self, flags: SignatureFlags) -> Option<NodeArray> {
        let require_complete = flags.contains(SignatureFlags::REQUIRE_COMPLETE_PARAMETER_LIST);
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return if require_complete { None } else { Some(self.create_missing_list()) };
        }
        let parameters = self.do_in_signature_context(flags, |p| {
            p.parse_delimited_list(ParsingContext::Parameters, Self::parse_parameter, false)
        });
        if !self.parse_expected(SyntaxKind::CloseParenToken) && require_complete {
            return None;
        }
        Some(parameters)
    }

    pub(super) fn is_start_of_parameter(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::DotDotDotToken | SyntaxKind::AtToken | SyntaxKind::ThisKeyword
        ) || self.is_identifier_or_pattern()
            || self.token().is_modifier_kind()
    }

    fn parse_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        let decorators = self.parse_decorators();
        if self.token() == SyntaxKind::ThisKeyword {
            let name = self.create_identifier(true, None);
            let ty = self.parse_type_annotation();
            let parameter = VariableLike { ty, ..VariableLike::named(name) };
            return self.finish_declaration(
                SyntaxKind::Parameter,
                pos,
                decorators,
                None,
                NodeData::VariableLike(Box::new(parameter)),
            );
        }
        let modifiers = self.parse_modifiers(false);
        let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_identifier_or_pattern();
        if self.arena[name].is_missing() && modifiers.is_none() && self.token().is_modifier_kind() {
            // `(public)`: the modifier ends up as the name's missing
            // position; step over it so the list can go on.
            self.next_token();
        }
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        let ty = self.parse_type_annotation();
        let initializer = self.parse_initializer(true);
        let parameter = VariableLike {
            dot_dot_dot_token,
            question_token,
            ty,
            initializer,
            ..VariableLike::named(name)
        };
        self.finish_declaration(
            SyntaxKind::Parameter,
            pos,
            decorators,
            modifiers,
            NodeData::VariableLike(Box::new(parameter)),
        )
    }

    pub(super) fn parse_type_parameters(&mut self) -> Option<NodeArray> {
        if self.token() != SyntaxKind::LessThanToken {
            return None;
        }
        Some(self.parse_bracketed_list(
            ParsingContext::TypeParameters,
            Self::parse_type_parameter,
            SyntaxKind::LessThanToken,
            SyntaxKind::GreaterThanToken,
        ))
    }

    fn parse_type_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_identifier();
        let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(self.parse_type())
        } else {
            None
        };
        let default = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_type())
        } else {
            None
        };
        self.finish_node(SyntaxKind::TypeParameter, pos, NodeData::TypeParameter { name, constraint, default })
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(super) fn parse_class_declaration_or_expression(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        kind: SyntaxKind,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_implements_clause() {
            Some(self.parse_identifier())
        } else {
            None
        };
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_list(ParsingContext::ClassMembers, Self::parse_class_element);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        };
        let class = ClassLike { name, type_parameters, heritage_clauses, members };
        self.finish_declaration(kind, pos, decorators, modifiers, NodeData::ClassLike(Box::new(class)))
    }

    fn is_implements_clause(&mut self) -> bool {
        self.token() == SyntaxKind::ImplementsKeyword && self.look_ahead(Self::next_token_is_identifier_or_keyword)
    }

    fn parse_heritage_clauses(&mut self) -> Option<NodeArray> {
        if !self.is_heritage_clause() {
            return None;
        }
        Some(self.parse_list(ParsingContext::HeritageClauses, Self::parse_heritage_clause))
    }

    fn parse_heritage_clause(&mut self) -> NodeId {
        let pos = self.node_pos();
        let token = self.token();
        self.next_token();
        let types = self.parse_delimited_list(
            ParsingContext::HeritageClauseElement,
            Self::parse_expression_with_type_arguments,
            false,
        );
        self.finish_node(SyntaxKind::HeritageClause, pos, NodeData::HeritageClause { token, types })
    }

    fn parse_expression_with_type_arguments(&mut self) -> NodeId {
        let pos = self.node_pos();
        let expression = self.parse_left_hand_side_expression_or_higher();
        let type_arguments = if self.token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_argument_list())
        } else {
            None
        };
        self.finish_node(
            SyntaxKind::ExpressionWithTypeArguments,
            pos,
            NodeData::ExpressionWithTypeArguments { expression, type_arguments },
        )
    }

    pub(super) fn is_class_member_start(&mut self) -> bool {
        if self.token() == SyntaxKind::AtToken {
            return true;
        }
        let mut id_token = None;
        while self.token().is_modifier_kind() {
            id_token = Some(self.token());
            if is_class_member_modifier(self.token()) {
                return true;
            }
            self.next_token();
        }
        if self.token() == SyntaxKind::AsteriskToken {
            return true;
        }
        if self.is_literal_property_name() {
            id_token = Some(self.token());
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        let Some(id_token) = id_token else {
            return false;
        };
        // A non-keyword name, or `get`/`set`, always starts a member; any
        // other keyword needs a member-like token after it.
        if !id_token.is_keyword() || matches!(id_token, SyntaxKind::GetKeyword | SyntaxKind::SetKeyword) {
            return true;
        }
        match self.token() {
            SyntaxKind::OpenParenToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::QuestionToken => true,
            _ => self.can_parse_semicolon(),
        }
    }

    fn parse_class_element(&mut self) -> NodeId {
        let pos = self.node_pos();
        if self.token() == SyntaxKind::SemicolonToken {
            self.next_token();
            return self.finish_node(SyntaxKind::SemicolonClassElement, pos, NodeData::Token);
        }
        let decorators = self.parse_decorators();
        let modifiers = self.parse_modifiers(true);

        if self.parse_contextual_modifier(SyntaxKind::GetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::GetAccessor);
        }
        if self.parse_contextual_modifier(SyntaxKind::SetKeyword) {
            return self.parse_accessor_declaration(pos, decorators, modifiers, SyntaxKind::SetAccessor);
        }
        if self.token() == SyntaxKind::ConstructorKeyword {
            return self.parse_constructor_declaration(pos, decorators, modifiers);
        }
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, decorators, modifiers);
        }
        if self.token_is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::OpenBracketToken
            )
        {
            return self.parse_property_or_method_declaration(pos, decorators, modifiers);
        }
        // Only decorators or modifiers: a property whose name is missing.
        let name = self.create_missing_node(SyntaxKind::Identifier, true, Some(&messages::DECLARATION_EXPECTED), &[]);
        self.parse_property_declaration(pos, decorators, modifiers, name, None)
    }

    pub(super) fn parse_accessor_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        kind: SyntaxKind,
    ) -> NodeId {
        let name = self.parse_property_name();
        let signature = self.fill_signature(SyntaxKind::ColonToken, SignatureFlags::NONE).unwrap_or_default();
        let body = self.parse_function_block_or_semicolon(SignatureFlags::NONE, None);
        let accessor = FunctionLike {
            name: Some(name),
            type_parameters: signature.type_parameters,
            parameters: signature.parameters,
            ty: signature.ty,
            body,
            ..FunctionLike::default()
        };
        self.finish_declaration(kind, pos, decorators, modifiers, NodeData::FunctionLike(Box::new(accessor)))
    }

    fn parse_constructor_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ConstructorKeyword);
        let signature = self.fill_signature(SyntaxKind::ColonToken, SignatureFlags::NONE).unwrap_or_default();
        let body = self.parse_function_block_or_semicolon(SignatureFlags::NONE, Some(&messages::OR_EXPECTED));
        let constructor = FunctionLike {
            type_parameters: signature.type_parameters,
            parameters: signature.parameters,
            ty: signature.ty,
            body,
            ..FunctionLike::default()
        };
        self.finish_declaration(
            SyntaxKind::Constructor,
            pos,
            decorators,
            modifiers,
            NodeData::FunctionLike(Box::new(constructor)),
        )
    }

    fn parse_property_or_method_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let asterisk_token = self.parse_optional_token(SyntaxKind::AsteriskToken);
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if asterisk_token.is_some() || matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_method_declaration(
                pos,
                decorators,
                modifiers,
                asterisk_token,
                name,
                question_token,
                Some(&messages::OR_EXPECTED),
            );
        }
        self.parse_property_declaration(pos, decorators, modifiers, name, question_token)
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn parse_method_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        asterisk_token: Option<NodeId>,
        name: NodeId,
        question_token: Option<NodeId>,
        message: Option<&DiagnosticMessage>,
    ) -> NodeId {
        let flags = self.function_signature_flags(asterisk_token, &modifiers);
        let signature = self.fill_signature(SyntaxKind::ColonToken, flags).unwrap_or_default();
        let body = self.parse_function_block_or_semicolon(flags, message);
        let method = FunctionLike {
            asterisk_token,
            name: Some(name),
            question_token,
            type_parameters: signature.type_parameters,
            parameters: signature.parameters,
            ty: signature.ty,
            body,
            ..FunctionLike::default()
        };
        self.finish_declaration(
            SyntaxKind::MethodDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::FunctionLike(Box::new(method)),
        )
    }

    fn parse_property_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        name: NodeId,
        question_token: Option<NodeId>,
    ) -> NodeId {
        let ty = self.parse_type_annotation();
        // Instance initializers run in the constructor, so they see no
        // generator context.
        let initializer = if has_modifier_kind(&self.arena, &modifiers, SyntaxKind::StaticKeyword) {
            self.allow_in_and(|p| p.parse_initializer(false))
        } else {
            self.do_outside_of_context(NodeFlags::YIELD_CONTEXT | NodeFlags::DISALLOW_IN_CONTEXT, |p| {
                p.parse_initializer(false)
            })
        };
        self.parse_semicolon();
        let property = VariableLike { question_token, ty, initializer, ..VariableLike::named(name) };
        self.finish_declaration(
            SyntaxKind::PropertyDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::VariableLike(Box::new(property)),
        )
    }

    /// A string, number, computed or plain identifier-or-keyword name.
    pub(super) fn parse_property_name(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal_node(),
            SyntaxKind::OpenBracketToken => self.parse_computed_property_name(),
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_computed_property_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let expression = self.allow_in_and(Self::parse_expression);
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(SyntaxKind::ComputedPropertyName, pos, NodeData::Expression { expression })
    }

    pub(super) fn is_index_signature(&mut self) -> bool {
        self.token() == SyntaxKind::OpenBracketToken && self.look_ahead(Self::is_unambiguously_index_signature)
    }

    /// `[a: T]`, `[a, ...]`, `[a?: T]`, `[...a]` or `[]`, as opposed to a
    /// computed property name.
    fn is_unambiguously_index_signature(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::DotDotDotToken | SyntaxKind::CloseBracketToken) {
            return true;
        }
        if self.token().is_modifier_kind() {
            self.next_token();
            if self.is_identifier() {
                return true;
            }
        } else if !self.is_identifier() {
            return false;
        } else {
            self.next_token();
        }
        if matches!(self.token(), SyntaxKind::ColonToken | SyntaxKind::CommaToken) {
            return true;
        }
        if self.token() != SyntaxKind::QuestionToken {
            return false;
        }
        self.next_token();
        matches!(
            self.token(),
            SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
        )
    }

    pub(super) fn parse_index_signature_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let parameters = self.parse_bracketed_list(
            ParsingContext::Parameters,
            Self::parse_parameter,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
        );
        let ty = self.parse_type_annotation();
        self.parse_type_member_semicolon();
        let signature = SignatureDecl { type_parameters: None, parameters, ty };
        self.finish_declaration(
            SyntaxKind::IndexSignature,
            pos,
            decorators,
            modifiers,
            NodeData::Signature(Box::new(signature)),
        )
    }

    // ========================================================================
    // Interfaces, type aliases and enums
    // ========================================================================

    fn parse_interface_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        let heritage_clauses = self.parse_heritage_clauses();
        let members = self.parse_object_type_members();
        let interface = ClassLike { name: Some(name), type_parameters, heritage_clauses, members };
        self.finish_declaration(
            SyntaxKind::InterfaceDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::ClassLike(Box::new(interface)),
        )
    }

    fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        let ty = self.parse_type();
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::TypeAliasDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::TypeAlias { name, type_parameters, ty },
        )
    }

    fn parse_enum_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_delimited_list(ParsingContext::EnumMembers, Self::parse_enum_member, false);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            self.create_missing_list()
        };
        self.finish_declaration(
            SyntaxKind::EnumDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::Enum { name, members },
        )
    }

    fn parse_enum_member(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_property_name();
        let initializer = self.allow_in_and(|p| p.parse_initializer(false));
        let member = VariableLike { initializer, ..VariableLike::named(name) };
        self.finish_node(SyntaxKind::EnumMember, pos, NodeData::VariableLike(Box::new(member)))
    }

    // ========================================================================
    // Modules and namespaces
    // ========================================================================

    fn parse_module_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        if self.token() == SyntaxKind::GlobalKeyword {
            return self.parse_ambient_external_module_declaration(pos, decorators, modifiers);
        }
        let flags = if self.parse_optional(SyntaxKind::NamespaceKeyword) {
            NodeFlags::NAMESPACE
        } else {
            self.parse_expected(SyntaxKind::ModuleKeyword);
            if self.token() == SyntaxKind::StringLiteral {
                return self.parse_ambient_external_module_declaration(pos, decorators, modifiers);
            }
            NodeFlags::NONE
        };
        self.parse_module_or_namespace_declaration(pos, decorators, modifiers, flags)
    }

    /// `namespace A.B.C {}` nests one module declaration per dotted part.
    fn parse_module_or_namespace_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        flags: NodeFlags,
    ) -> NodeId {
        let name = self.parse_identifier();
        let body = if self.parse_optional(SyntaxKind::DotToken) {
            let nested_pos = self.node_pos();
            let nested_flags = NodeFlags::NESTED_NAMESPACE | (flags & NodeFlags::NAMESPACE);
            self.parse_module_or_namespace_declaration(nested_pos, None, None, nested_flags)
        } else {
            self.parse_module_block()
        };
        let mut node = Node::new(SyntaxKind::ModuleDeclaration, pos, pos, NodeData::Module { name, body: Some(body) });
        node.flags = flags;
        node.decorators = decorators;
        node.modifiers = modifiers;
        self.finish(node)
    }

    /// `declare module "name" { ... }` and `declare global { ... }`.
    fn parse_ambient_external_module_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let (name, flags) = if self.token() == SyntaxKind::GlobalKeyword {
            (self.parse_identifier(), NodeFlags::GLOBAL_AUGMENTATION)
        } else {
            (self.parse_literal_node(), NodeFlags::NONE)
        };
        let body = if self.token() == SyntaxKind::OpenBraceToken {
            Some(self.parse_module_block())
        } else {
            self.parse_semicolon();
            None
        };
        let mut node = Node::new(SyntaxKind::ModuleDeclaration, pos, pos, NodeData::Module { name, body });
        node.flags = flags;
        node.decorators = decorators;
        node.modifiers = modifiers;
        self.finish(node)
    }

    fn parse_module_block(&mut self) -> NodeId {
        let pos = self.node_pos();
        let statements = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let statements = self.parse_list(ParsingContext::BlockStatements, Self::parse_statement);
            self.parse_expected(SyntaxKind::CloseBraceToken);
            statements
        } else {
            self.create_missing_list()
        };
        self.finish_node(SyntaxKind::ModuleBlock, pos, NodeData::Block { statements, multi_line: true })
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn parse_import_declaration_or_import_equals(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::ImportKeyword);
        let after_import_pos = self.node_pos();
        let mut identifier = None;
        if self.is_identifier() {
            let name = self.parse_identifier();
            if !matches!(self.token(), SyntaxKind::CommaToken | SyntaxKind::FromKeyword) {
                return self.parse_import_equals_declaration(pos, decorators, modifiers, name);
            }
            identifier = Some(name);
        }

        // import d from "m"; import { a } from "m"; import * as ns from "m"; import "m";
        let import_clause = if identifier.is_some()
            || matches!(self.token(), SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken)
        {
            let clause = self.parse_import_clause(identifier, after_import_pos);
            self.parse_expected(SyntaxKind::FromKeyword);
            Some(clause)
        } else {
            None
        };
        let module_specifier = self.parse_module_specifier();
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::ImportDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::ImportDeclaration { import_clause, module_specifier },
        )
    }

    fn parse_import_equals_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
        name: NodeId,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::EqualsToken);
        let module_reference = if self.token() == SyntaxKind::RequireKeyword && self.look_ahead(Self::next_token_is_open_paren) {
            self.parse_external_module_reference()
        } else {
            self.parse_entity_name(false, None)
        };
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::ImportEqualsDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::ImportEquals { name, module_reference },
        )
    }

    fn parse_external_module_reference(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::RequireKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_module_specifier();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::ExternalModuleReference, pos, NodeData::Expression { expression })
    }

    /// Only string literals are valid, but any expression is accepted so
    /// the tree stays intact.
    fn parse_module_specifier(&mut self) -> NodeId {
        if self.token() == SyntaxKind::StringLiteral {
            self.parse_literal_node()
        } else {
            self.parse_expression()
        }
    }

    fn parse_import_clause(&mut self, name: Option<NodeId>, pos: u32) -> NodeId {
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            Some(if self.token() == SyntaxKind::AsteriskToken {
                self.parse_namespace_import()
            } else {
                self.parse_named_imports_or_exports(SyntaxKind::NamedImports)
            })
        } else {
            None
        };
        self.finish_node(SyntaxKind::ImportClause, pos, NodeData::ImportClause { name, named_bindings })
    }

    fn parse_namespace_import(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected(SyntaxKind::AsKeyword);
        let name = self.parse_identifier();
        self.finish_node(SyntaxKind::NamespaceImport, pos, NodeData::NamespaceImport { name })
    }

    fn parse_named_imports_or_exports(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let specifier_kind = if kind == SyntaxKind::NamedImports {
            SyntaxKind::ImportSpecifier
        } else {
            SyntaxKind::ExportSpecifier
        };
        let elements = self.parse_bracketed_list(
            ParsingContext::ImportOrExportSpecifiers,
            |p| p.parse_import_or_export_specifier(specifier_kind),
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        );
        self.finish_node(kind, pos, NodeData::NamedImportsOrExports { elements })
    }

    /// `a` or `a as b`. Exports may name keywords (`export { default }`);
    /// the local name of an import must be a real identifier.
    fn parse_import_or_export_specifier(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        let mut is_reserved = self.token().is_keyword() && !self.is_identifier();
        let mut check_start = self.token_pos();
        let mut check_end = self.scanner.token_end();
        let identifier_name = self.parse_identifier_name();
        let (property_name, name) = if self.token() == SyntaxKind::AsKeyword {
            self.next_token();
            is_reserved = self.token().is_keyword() && !self.is_identifier();
            check_start = self.token_pos();
            check_end = self.scanner.token_end();
            (Some(identifier_name), self.parse_identifier_name())
        } else {
            (None, identifier_name)
        };
        if kind == SyntaxKind::ImportSpecifier && is_reserved {
            self.parse_error_at_range(check_start, check_end, &messages::IDENTIFIER_EXPECTED, &[]);
        }
        self.finish_node(kind, pos, NodeData::ImportOrExportSpecifier { property_name, name })
    }

    /// Positioned after `export`, on `=` or `default`.
    fn parse_export_assignment(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let is_export_equals = self.parse_optional(SyntaxKind::EqualsToken);
        if !is_export_equals {
            self.parse_expected(SyntaxKind::DefaultKeyword);
        }
        let expression = self.parse_assignment_expression_or_higher();
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::ExportAssignment,
            pos,
            decorators,
            modifiers,
            NodeData::ExportAssignment { is_export_equals, expression },
        )
    }

    /// `export as namespace X;`
    fn parse_namespace_export_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        self.parse_expected(SyntaxKind::AsKeyword);
        self.parse_expected(SyntaxKind::NamespaceKeyword);
        let name = self.parse_identifier();
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::NamespaceExportDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::NamespaceExportDeclaration { name },
        )
    }

    /// `export * from "m"`, `export { a, b as c }` and
    /// `export { a } from "m"`.
    fn parse_export_declaration(
        &mut self,
        pos: u32,
        decorators: Option<NodeArray>,
        modifiers: Option<NodeArray>,
    ) -> NodeId {
        let (export_clause, module_specifier) = if self.parse_optional(SyntaxKind::AsteriskToken) {
            self.parse_expected(SyntaxKind::FromKeyword);
            (None, Some(self.parse_module_specifier()))
        } else {
            let clause = self.parse_named_imports_or_exports(SyntaxKind::NamedExports);
            let specifier = if self.token() == SyntaxKind::FromKeyword
                || (self.token() == SyntaxKind::StringLiteral && !self.has_preceding_line_break())
            {
                self.parse_expected(SyntaxKind::FromKeyword);
                Some(self.parse_module_specifier())
            } else {
                None
            };
            (Some(clause), specifier)
        };
        self.parse_semicolon();
        self.finish_declaration(
            SyntaxKind::ExportDeclaration,
            pos,
            decorators,
            modifiers,
            NodeData::ExportDeclaration { export_clause, module_specifier },
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source_file;
    use tsfront_ast::node::NodeData;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_ast::types::{ModifierFlags, NodeFlags};

    #[test]
    fn test_declaration_kinds() {
        let cases = [
            ("function f<T>(a: T, ...rest: T[]): T { return a; }", SyntaxKind::FunctionDeclaration),
            ("declare function f(): void;", SyntaxKind::FunctionDeclaration),
            ("abstract class A<T> extends B<T> implements C, D {}", SyntaxKind::ClassDeclaration),
            ("interface I extends J { (x: number): string; new (): I; [key: string]: any; m?(): void; readonly p: number }", SyntaxKind::InterfaceDeclaration),
            ("type Pair<T = string> = [T, T];", SyntaxKind::TypeAliasDeclaration),
            ("const enum E { A = 1, B, 'c' }", SyntaxKind::EnumDeclaration),
            ("namespace A.B { export const x = 1; }", SyntaxKind::ModuleDeclaration),
            ("declare module \"fs\" { export function read(): void; }", SyntaxKind::ModuleDeclaration),
            ("declare global { interface Window {} }", SyntaxKind::ModuleDeclaration),
            ("import fs = require(\"fs\");", SyntaxKind::ImportEqualsDeclaration),
            ("import d, { a as b, c } from \"m\";", SyntaxKind::ImportDeclaration),
            ("import * as ns from \"m\";", SyntaxKind::ImportDeclaration),
            ("import \"side-effect\";", SyntaxKind::ImportDeclaration),
            ("export * from \"m\";", SyntaxKind::ExportDeclaration),
            ("export { a as default, b } from \"m\";", SyntaxKind::ExportDeclaration),
            ("export default 42;", SyntaxKind::ExportAssignment),
            ("export = x;", SyntaxKind::ExportAssignment),
            ("export as namespace Lib;", SyntaxKind::NamespaceExportDeclaration),
            ("@sealed class C {}", SyntaxKind::ClassDeclaration),
        ];
        for (text, kind) in cases {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            assert_eq!(file.kind(file.statements()[0]), kind, "{text}");
        }
    }

    #[test]
    fn test_export_default_class_takes_modifiers() {
        let file = parse_source_file("test.ts", "export default class {}");
        let class = file.statements()[0];
        assert_eq!(file.kind(class), SyntaxKind::ClassDeclaration);
        assert_eq!(file.modifier_flags(class), ModifierFlags::EXPORT_DEFAULT);
        assert!(file.is_external_module());
    }

    #[test]
    fn test_class_members() {
        let file = parse_source_file(
            "test.ts",
            "class C {\n  private static readonly x: number = 1;\n  constructor(public a: string) {}\n  get v() { return 1; }\n  set v(value) {}\n  *gen() { yield 1; }\n  async run() { await this.gen(); }\n  [key: string]: any;\n  ;\n}",
        );
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        let NodeData::ClassLike(class) = &file.node(file.statements()[0]).data else {
            panic!("expected a class");
        };
        let kinds: Vec<_> = class.members.iter().map(|m| file.kind(m)).collect();
        assert_eq!(
            kinds,
            [
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::Constructor,
                SyntaxKind::GetAccessor,
                SyntaxKind::SetAccessor,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::MethodDeclaration,
                SyntaxKind::IndexSignature,
                SyntaxKind::SemicolonClassElement,
            ]
        );
    }

    #[test]
    fn test_contextual_keywords_stay_identifiers() {
        let file = parse_source_file("test.ts", "type = 1;\nnamespace\nfoo;\ndeclare;\nasync();");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert!(file
            .statements()
            .iter()
            .all(|&s| file.kind(s) == SyntaxKind::ExpressionStatement));
    }

    #[test]
    fn test_nested_namespace_flags() {
        let file = parse_source_file("test.ts", "namespace A.B {}");
        let outer = file.statements()[0];
        let NodeData::Module { body: Some(inner), .. } = file.node(outer).data else {
            panic!("expected a module body");
        };
        assert!(file.node(outer).flags.contains(NodeFlags::NAMESPACE));
        assert!(file.node(inner).flags.contains(NodeFlags::NESTED_NAMESPACE | NodeFlags::NAMESPACE));
    }

    #[test]
    fn test_import_specifier_rejects_reserved_word() {
        let file = parse_source_file("test.ts", "import { a as class } from \"m\";");
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(file.parse_diagnostics[0].message_text, "Identifier expected.");
    }

    #[test]
    fn test_unclosed_class_reports_close_brace() {
        let file = parse_source_file("test.ts", "class Foo {");
        assert_eq!(file.statements().len(), 1);
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(file.parse_diagnostics[0].message_text, "'}' expected.");
    }

    #[test]
    fn test_decorator_without_declaration() {
        let file = parse_source_file("test.ts", "@dec");
        assert_eq!(file.kind(file.statements()[0]), SyntaxKind::MissingDeclaration);
        assert!(file.parse_diagnostics[0].message_text.contains("Declaration expected."));
    }
}
