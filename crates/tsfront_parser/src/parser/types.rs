//! Type annotations, type members and entity names.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_diagnostics::{messages, DiagnosticMessage};

use super::{ParsingContext, Parser, SignatureFlags};

impl Parser {
    pub(super) fn parse_type_annotation(&mut self) -> Option<NodeId> {
        if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_type())
        } else {
            None
        }
    }

    /// Types never see the yield or await context of the code around them.
    pub(super) fn parse_type(&mut self) -> NodeId {
        self.do_outside_of_context(NodeFlags::YIELD_CONTEXT | NodeFlags::AWAIT_CONTEXT, |p| {
            match p.nested(&messages::TYPE_EXPECTED, Self::parse_type_worker) {
                Ok(ty) => ty,
                Err(placeholder) => {
                    let pos = p.arena[placeholder].pos;
                    p.finish_node(
                        SyntaxKind::TypeReference,
                        pos,
                        NodeData::TypeReference { type_name: placeholder, type_arguments: None },
                    )
                }
            }
        })
    }

    fn parse_type_worker(&mut self) -> NodeId {
        if self.is_start_of_function_type() {
            return self.parse_function_or_constructor_type(SyntaxKind::FunctionType);
        }
        if self.token() == SyntaxKind::NewKeyword {
            return self.parse_function_or_constructor_type(SyntaxKind::ConstructorType);
        }
        let pos = self.node_pos();
        let check_type = self.parse_union_type_or_higher();
        if self.in_disallow_conditional_types_context()
            || self.has_preceding_line_break()
            || !self.parse_optional(SyntaxKind::ExtendsKeyword)
        {
            return check_type;
        }
        let extends_type = self.do_inside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, Self::parse_type);
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.parse_type_allowing_conditionals();
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.parse_type_allowing_conditionals();
        self.finish_node(
            SyntaxKind::ConditionalType,
            pos,
            NodeData::ConditionalType { check_type, extends_type, true_type, false_type },
        )
    }

    fn parse_type_allowing_conditionals(&mut self) -> NodeId {
        self.do_outside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, Self::parse_type)
    }

    /// A return type, where `x is T` and `this is T` are allowed.
    pub(super) fn parse_type_or_type_predicate(&mut self) -> NodeId {
        let pos = self.node_pos();
        let parameter_name = if self.is_identifier() {
            self.try_parse(Self::parse_type_predicate_prefix)
        } else {
            None
        };
        let ty = self.parse_type();
        match parameter_name {
            Some(parameter_name) => {
                self.finish_node(SyntaxKind::TypePredicate, pos, NodeData::TypePredicate { parameter_name, ty })
            }
            None => ty,
        }
    }

    fn parse_type_predicate_prefix(&mut self) -> Option<NodeId> {
        let name = self.parse_identifier();
        if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
            self.next_token();
            return Some(name);
        }
        None
    }

    // ========================================================================
    // Function and constructor types
    // ========================================================================

    fn is_start_of_function_type(&mut self) -> bool {
        self.token() == SyntaxKind::LessThanToken
            || (self.token() == SyntaxKind::OpenParenToken && self.look_ahead(Self::is_unambiguously_start_of_function_type))
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::CloseParenToken | SyntaxKind::DotDotDotToken) {
            // ( )
            // ( ...
            return true;
        }
        if self.skip_parameter_start() {
            // ( x :    ( x ,    ( x ?    ( x =
            if matches!(
                self.token(),
                SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken
            ) {
                return true;
            }
            // ( x ) =>
            if self.token() == SyntaxKind::CloseParenToken && self.next_token() == SyntaxKind::EqualsGreaterThanToken {
                return true;
            }
        }
        false
    }

    fn skip_parameter_start(&mut self) -> bool {
        if self.token().is_modifier_kind() {
            self.parse_modifiers(false);
        }
        if self.is_identifier() || self.token() == SyntaxKind::ThisKeyword {
            self.next_token();
            return true;
        }
        if matches!(self.token(), SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken) {
            // A binding pattern only counts if it parsed cleanly.
            let error_count = self.diagnostics.len();
            self.parse_identifier_or_pattern();
            return error_count == self.diagnostics.len();
        }
        false
    }

    fn parse_function_or_constructor_type(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        if kind == SyntaxKind::ConstructorType {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let signature = self
            .fill_signature(SyntaxKind::EqualsGreaterThanToken, SignatureFlags::TYPE)
            .unwrap_or_default();
        self.finish_node(kind, pos, NodeData::Signature(Box::new(signature)))
    }

    // ========================================================================
    // Unions, intersections and type operators
    // ========================================================================

    fn parse_union_type_or_higher(&mut self) -> NodeId {
        self.parse_union_or_intersection_type(
            SyntaxKind::UnionType,
            Self::parse_intersection_type_or_higher,
            SyntaxKind::BarToken,
        )
    }

    fn parse_intersection_type_or_higher(&mut self) -> NodeId {
        self.parse_union_or_intersection_type(
            SyntaxKind::IntersectionType,
            Self::parse_type_operator_or_higher,
            SyntaxKind::AmpersandToken,
        )
    }

    /// A leading `|` or `&` is allowed and always produces a list node,
    /// even with one constituent.
    fn parse_union_or_intersection_type(
        &mut self,
        kind: SyntaxKind,
        parse_constituent: fn(&mut Self) -> NodeId,
        operator: SyntaxKind,
    ) -> NodeId {
        let pos = self.node_pos();
        let has_leading_operator = self.parse_optional(operator);
        let first = parse_constituent(self);
        if self.token() != operator && !has_leading_operator {
            return first;
        }
        let list_pos = self.arena[first].pos;
        let mut types = vec![first];
        while self.parse_optional(operator) {
            types.push(parse_constituent(self));
        }
        let types = NodeArray::new(list_pos, self.node_pos(), types);
        self.finish_node(kind, pos, NodeData::TypeList { types })
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::UniqueKeyword | SyntaxKind::ReadonlyKeyword => {
                let pos = self.node_pos();
                let operator = self.token();
                self.next_token();
                let ty = self.parse_type_operator_or_higher();
                self.finish_node(SyntaxKind::TypeOperator, pos, NodeData::TypeOperator { operator, ty })
            }
            SyntaxKind::InferKeyword => self.parse_infer_type(),
            _ => self.parse_postfix_type_or_higher(),
        }
    }

    fn parse_infer_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::InferKeyword);
        let parameter_pos = self.node_pos();
        let name = self.parse_identifier();
        let type_parameter = self.finish_node(
            SyntaxKind::TypeParameter,
            parameter_pos,
            NodeData::TypeParameter { name, constraint: None, default: None },
        );
        self.finish_node(SyntaxKind::InferType, pos, NodeData::InferType { type_parameter })
    }

    /// `T[]` and `T[K]`. A line break ends the type.
    fn parse_postfix_type_or_higher(&mut self) -> NodeId {
        let pos = self.node_pos();
        let mut ty = self.parse_non_array_type();
        while !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::OpenBracketToken) {
            if self.is_start_of_type() {
                let index_type = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                ty = self.finish_node(
                    SyntaxKind::IndexedAccessType,
                    pos,
                    NodeData::IndexedAccessType { object_type: ty, index_type },
                );
            } else {
                self.parse_expected(SyntaxKind::CloseBracketToken);
                ty = self.finish_node(SyntaxKind::ArrayType, pos, NodeData::ArrayType { element_type: ty });
            }
        }
        ty
    }

    // ========================================================================
    // Primary types
    // ========================================================================

    fn parse_non_array_type(&mut self) -> NodeId {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::ObjectKeyword => self
                .try_parse(Self::parse_keyword_and_no_dot)
                .unwrap_or_else(|| self.parse_type_reference()),
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_literal_type_node(false),
            SyntaxKind::MinusToken => {
                if self.look_ahead(Self::next_token_is_numeric_literal) {
                    self.parse_literal_type_node(true)
                } else {
                    self.parse_type_reference()
                }
            }
            SyntaxKind::VoidKeyword | SyntaxKind::NullKeyword => self.parse_token_node(),
            SyntaxKind::ThisKeyword => {
                let pos = self.node_pos();
                self.next_token();
                let this_type = self.finish_node(SyntaxKind::ThisType, pos, NodeData::Token);
                if self.token() == SyntaxKind::IsKeyword && !self.has_preceding_line_break() {
                    self.next_token();
                    let ty = self.parse_type();
                    return self.finish_node(
                        SyntaxKind::TypePredicate,
                        pos,
                        NodeData::TypePredicate { parameter_name: this_type, ty },
                    );
                }
                this_type
            }
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(Self::is_start_of_mapped_type) {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            _ => self.parse_type_reference(),
        }
    }

    /// `string` is a keyword type, `string.x` a qualified reference.
    fn parse_keyword_and_no_dot(&mut self) -> Option<NodeId> {
        let node = self.parse_token_node();
        (self.token() != SyntaxKind::DotToken).then_some(node)
    }

    fn parse_literal_type_node(&mut self, negative: bool) -> NodeId {
        let pos = self.node_pos();
        let literal = if negative {
            self.next_token();
            let operand = self.parse_literal_node();
            self.finish_node(
                SyntaxKind::PrefixUnaryExpression,
                pos,
                NodeData::Unary { operator: SyntaxKind::MinusToken, operand },
            )
        } else if matches!(self.token(), SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword) {
            self.parse_token_node()
        } else {
            self.parse_literal_node()
        };
        self.finish_node(SyntaxKind::LiteralType, pos, NodeData::LiteralType { literal })
    }

    fn parse_type_reference(&mut self) -> NodeId {
        let pos = self.node_pos();
        let type_name = self.parse_entity_name(true, Some(&messages::TYPE_EXPECTED));
        let type_arguments = if !self.has_preceding_line_break() && self.re_scan_less_than_token() == SyntaxKind::LessThanToken {
            Some(self.parse_type_argument_list())
        } else {
            None
        };
        // The missing name took the error flag; the reference must carry it too.
        let flags = if self.arena[type_name].is_missing() {
            NodeFlags::THIS_NODE_HAS_ERROR
        } else {
            NodeFlags::NONE
        };
        self.finish_node_with_flags(
            SyntaxKind::TypeReference,
            pos,
            flags,
            NodeData::TypeReference { type_name, type_arguments },
        )
    }

    pub(super) fn parse_type_argument_list(&mut self) -> NodeArray {
        self.do_outside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, |p| {
            p.parse_bracketed_list(
                ParsingContext::TypeArguments,
                Self::parse_type,
                SyntaxKind::LessThanToken,
                SyntaxKind::GreaterThanToken,
            )
        })
    }

    fn parse_type_query(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::TypeOfKeyword);
        let expr_name = self.parse_entity_name(true, None);
        self.finish_node(SyntaxKind::TypeQuery, pos, NodeData::TypeQuery { expr_name })
    }

    fn parse_tuple_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        let types = self.do_outside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, |p| {
            p.parse_bracketed_list(
                ParsingContext::TupleElementTypes,
                Self::parse_type,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
            )
        });
        self.finish_node(SyntaxKind::TupleType, pos, NodeData::TypeList { types })
    }

    fn parse_parenthesized_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let ty = self.parse_type_allowing_conditionals();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(SyntaxKind::ParenthesizedType, pos, NodeData::ParenthesizedType { ty })
    }

    // ========================================================================
    // Mapped types and type literals
    // ========================================================================

    /// `{ [K in`, optionally after `readonly`, `+readonly` or `-readonly`.
    fn is_start_of_mapped_type(&mut self) -> bool {
        self.next_token();
        if matches!(self.token(), SyntaxKind::PlusToken | SyntaxKind::MinusToken) {
            return self.next_token() == SyntaxKind::ReadonlyKeyword;
        }
        if self.token() == SyntaxKind::ReadonlyKeyword {
            self.next_token();
        }
        self.token() == SyntaxKind::OpenBracketToken
            && self.next_token_is_identifier()
            && self.next_token() == SyntaxKind::InKeyword
    }

    fn parse_mapped_type(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let readonly_token = if matches!(
            self.token(),
            SyntaxKind::ReadonlyKeyword | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if self.arena.kind(token) != SyntaxKind::ReadonlyKeyword {
                self.parse_expected(SyntaxKind::ReadonlyKeyword);
            }
            Some(token)
        } else {
            None
        };
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let type_parameter = self.parse_mapped_type_parameter();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let question_token = if matches!(
            self.token(),
            SyntaxKind::QuestionToken | SyntaxKind::PlusToken | SyntaxKind::MinusToken
        ) {
            let token = self.parse_token_node();
            if self.arena.kind(token) != SyntaxKind::QuestionToken {
                self.parse_expected(SyntaxKind::QuestionToken);
            }
            Some(token)
        } else {
            None
        };
        let ty = self.do_outside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, Self::parse_type_annotation);
        self.parse_semicolon();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            SyntaxKind::MappedType,
            pos,
            NodeData::MappedType { readonly_token, type_parameter, question_token, ty },
        )
    }

    fn parse_mapped_type_parameter(&mut self) -> NodeId {
        let pos = self.node_pos();
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = Some(self.parse_type());
        self.finish_node(SyntaxKind::TypeParameter, pos, NodeData::TypeParameter { name, constraint, default: None })
    }

    fn parse_type_literal(&mut self) -> NodeId {
        let pos = self.node_pos();
        let members = self.do_outside_of_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, Self::parse_object_type_members);
        self.finish_node(SyntaxKind::TypeLiteral, pos, NodeData::Members { members })
    }

    pub(super) fn parse_object_type_members(&mut self) -> NodeArray {
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return self.create_missing_list();
        }
        let members = self.parse_list(ParsingContext::TypeMembers, Self::parse_type_member);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    // ========================================================================
    // Type members
    // ========================================================================

    pub(super) fn is_type_member_start(&mut self) -> bool {
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return true;
        }
        let mut id_token = false;
        while self.token().is_modifier_kind() {
            id_token = true;
            self.next_token();
        }
        if self.token() == SyntaxKind::OpenBracketToken {
            return true;
        }
        if self.is_literal_property_name() {
            id_token = true;
            self.next_token();
        }
        if !id_token {
            return false;
        }
        matches!(
            self.token(),
            SyntaxKind::OpenParenToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::ColonToken
                | SyntaxKind::CommaToken
        ) || self.can_parse_semicolon()
    }

    fn parse_type_member(&mut self) -> NodeId {
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return self.parse_signature_member(SyntaxKind::CallSignature);
        }
        if self.token() == SyntaxKind::NewKeyword && self.look_ahead(Self::next_token_is_open_paren_or_less_than) {
            return self.parse_signature_member(SyntaxKind::ConstructSignature);
        }
        let pos = self.node_pos();
        let modifiers = self.parse_modifiers(false);
        if self.is_index_signature() {
            return self.parse_index_signature_declaration(pos, None, modifiers);
        }
        self.parse_property_or_method_signature(pos, modifiers)
    }

    fn parse_signature_member(&mut self, kind: SyntaxKind) -> NodeId {
        let pos = self.node_pos();
        if kind == SyntaxKind::ConstructSignature {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let signature = self.fill_signature(SyntaxKind::ColonToken, SignatureFlags::TYPE).unwrap_or_default();
        self.parse_type_member_semicolon();
        self.finish_node(kind, pos, NodeData::Signature(Box::new(signature)))
    }

    fn parse_property_or_method_signature(&mut self, pos: u32, modifiers: Option<NodeArray>) -> NodeId {
        let name = self.parse_property_name();
        let question_token = self.parse_optional_token(SyntaxKind::QuestionToken);
        if matches!(self.token(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let signature = self.fill_signature(SyntaxKind::ColonToken, SignatureFlags::TYPE).unwrap_or_default();
            self.parse_type_member_semicolon();
            let method = FunctionLike {
                name: Some(name),
                question_token,
                type_parameters: signature.type_parameters,
                parameters: signature.parameters,
                ty: signature.ty,
                ..FunctionLike::default()
            };
            return self.finish_declaration(
                SyntaxKind::MethodSignature,
                pos,
                None,
                modifiers,
                NodeData::FunctionLike(Box::new(method)),
            );
        }
        let ty = self.parse_type_annotation();
        // Initializers aren't valid here, but keeping them gives a later
        // pass something to point at.
        let initializer = if self.token() == SyntaxKind::EqualsToken {
            self.parse_initializer(false)
        } else {
            None
        };
        self.parse_type_member_semicolon();
        let property = VariableLike { question_token, ty, initializer, ..VariableLike::named(name) };
        self.finish_declaration(
            SyntaxKind::PropertySignature,
            pos,
            None,
            modifiers,
            NodeData::VariableLike(Box::new(property)),
        )
    }

    /// Members are separated by `,` or `;`, with the usual semicolon
    /// insertion.
    pub(super) fn parse_type_member_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::CommaToken) {
            return;
        }
        self.parse_semicolon();
    }

    // ========================================================================
    // Entity names
    // ========================================================================

    /// `a.b.c` as nested qualified names. With `allow_reserved_words`,
    /// keywords are accepted as name parts.
    pub(super) fn parse_entity_name(&mut self, allow_reserved_words: bool, message: Option<&DiagnosticMessage>) -> NodeId {
        let pos = self.node_pos();
        let is_name = if allow_reserved_words {
            self.token_is_identifier_or_keyword()
        } else {
            self.is_identifier()
        };
        let mut entity = self.create_identifier(is_name, message);
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_right_side_of_dot(allow_reserved_words);
            entity = self.finish_node(SyntaxKind::QualifiedName, pos, NodeData::QualifiedName { left: entity, right });
        }
        entity
    }

    /// The name after a `.`. When the name sits on the next line and is
    /// itself followed by a name, the user is most likely still typing:
    ///
    /// ```text
    /// foo.
    /// var x = 1;
    /// ```
    ///
    /// The name is then left missing so `var` starts the next statement.
    pub(super) fn parse_right_side_of_dot(&mut self, allow_identifier_names: bool) -> NodeId {
        if self.has_preceding_line_break()
            && self.token_is_identifier_or_keyword()
            && self.look_ahead(Self::next_token_is_identifier_or_keyword_on_same_line)
        {
            return self.create_missing_node(SyntaxKind::Identifier, true, Some(&messages::IDENTIFIER_EXPECTED), &[]);
        }
        if allow_identifier_names {
            self.parse_identifier_name()
        } else {
            self.parse_identifier()
        }
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    pub(super) fn is_start_of_type(&mut self) -> bool {
        match self.token() {
            SyntaxKind::AnyKeyword
            | SyntaxKind::UnknownKeyword
            | SyntaxKind::StringKeyword
            | SyntaxKind::NumberKeyword
            | SyntaxKind::BigIntKeyword
            | SyntaxKind::BooleanKeyword
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::SymbolKeyword
            | SyntaxKind::UniqueKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::UndefinedKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ThisKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::NeverKeyword
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::NewKeyword
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::ObjectKeyword
            | SyntaxKind::InferKeyword
            | SyntaxKind::KeyOfKeyword => true,
            SyntaxKind::MinusToken => self.look_ahead(Self::next_token_is_numeric_literal),
            SyntaxKind::OpenParenToken => self.look_ahead(Self::is_start_of_parenthesized_or_function_type),
            _ => self.is_identifier(),
        }
    }

    fn is_start_of_parenthesized_or_function_type(&mut self) -> bool {
        self.next_token();
        self.token() == SyntaxKind::CloseParenToken || self.is_start_of_parameter() || self.is_start_of_type()
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_source_file, SourceFile};
    use tsfront_ast::node::NodeData;
    use tsfront_ast::syntax_kind::SyntaxKind;
    use tsfront_ast::types::NodeFlags;

    fn alias_type(file: &SourceFile) -> SyntaxKind {
        let NodeData::TypeAlias { ty, .. } = file.node(file.statements()[0]).data else {
            panic!("expected a type alias");
        };
        file.kind(ty)
    }

    #[test]
    fn test_type_kinds() {
        let cases = [
            ("type T = string;", SyntaxKind::StringKeyword),
            ("type T = string.Sub;", SyntaxKind::TypeReference),
            ("type T = (a: string, b?: number) => void;", SyntaxKind::FunctionType),
            ("type T = new () => object;", SyntaxKind::ConstructorType),
            ("type T = (string);", SyntaxKind::ParenthesizedType),
            ("type T = | 'a' | 'b';", SyntaxKind::UnionType),
            ("type T = A & B;", SyntaxKind::IntersectionType),
            ("type T = [number, string];", SyntaxKind::TupleType),
            ("type T = number[][];", SyntaxKind::ArrayType),
            ("type T = U['key'];", SyntaxKind::IndexedAccessType),
            ("type T = keyof U;", SyntaxKind::TypeOperator),
            ("type T = typeof a.b.c;", SyntaxKind::TypeQuery),
            ("type T = { a: string; b(): void };", SyntaxKind::TypeLiteral),
            ("type T = { readonly [K in keyof U]?: U[K] };", SyntaxKind::MappedType),
            ("type T = -1;", SyntaxKind::LiteralType),
            ("type T = Map<string, Array<number>>;", SyntaxKind::TypeReference),
            ("type T = U extends infer V ? V : never;", SyntaxKind::ConditionalType),
        ];
        for (text, kind) in cases {
            let file = parse_source_file("test.ts", text);
            assert!(file.parse_diagnostics.is_empty(), "{text}: {:?}", file.parse_diagnostics);
            assert_eq!(alias_type(&file), kind, "{text}");
        }
    }

    #[test]
    fn test_conditional_extends_type_cannot_be_conditional() {
        // The inner `extends` would make the extends clause conditional,
        // so it must be parenthesized.
        let file = parse_source_file("test.ts", "type T = A extends B extends C ? 1 : 2 ? 3 : 4;");
        assert!(!file.parse_diagnostics.is_empty());

        let file = parse_source_file("test.ts", "type T = A extends (B extends C ? 1 : 2) ? 3 : 4;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(file.descendants_of_kind(SyntaxKind::ConditionalType).len(), 2);
    }

    #[test]
    fn test_type_predicates() {
        let file = parse_source_file(
            "test.ts",
            "function isString(x: unknown): x is string { return true; }\nclass C { isD(): this is D { return false; } }",
        );
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(file.descendants_of_kind(SyntaxKind::TypePredicate).len(), 2);
    }

    #[test]
    fn test_negative_literal_type_wraps_prefix_unary() {
        let file = parse_source_file("test.ts", "type T = -1;");
        let literal_type = file.descendants_of_kind(SyntaxKind::LiteralType)[0];
        let NodeData::LiteralType { literal } = file.node(literal_type).data else {
            panic!("expected a literal type");
        };
        assert_eq!(file.kind(literal), SyntaxKind::PrefixUnaryExpression);
    }

    #[test]
    fn test_missing_type_marks_reference() {
        let file = parse_source_file("test.ts", "let x: = 1;");
        assert_eq!(file.parse_diagnostics[0].message_text, "Type expected.");
        let reference = file.descendants_of_kind(SyntaxKind::TypeReference)[0];
        assert!(file.node(reference).flags.contains(NodeFlags::THIS_NODE_HAS_ERROR));
    }

    #[test]
    fn test_dotted_name_on_next_line_is_left_missing() {
        let file = parse_source_file("test.ts", "let x: a.\nlet y = 1;");
        assert_eq!(file.statements().len(), 2);
        assert_eq!(file.parse_diagnostics[0].message_text, "Identifier expected.");
    }
}
