//! JSX elements, fragments, attributes and children.
//!
//! Inside an element the scanner runs in JSX mode: after every `>` that
//! opens children, and after every child, the next token is scanned as JSX
//! text, `<`, `</` or `{`. A tag that closes in expression context goes
//! back to ordinary scanning instead.

use tsfront_ast::node::*;
use tsfront_ast::syntax_kind::SyntaxKind;
use tsfront_ast::types::*;
use tsfront_diagnostics::messages;
use tsfront_scanner::skip_trivia;

use super::{ParsingContext, Parser};

impl Parser {
    pub(super) fn parse_jsx_element_or_self_closing_element_or_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        let opening = self.parse_jsx_opening_or_self_closing_element_or_opening_fragment(in_expression_context);
        let result = match self.arena.kind(opening) {
            SyntaxKind::JsxOpeningElement => {
                let children = self.parse_jsx_children(opening);
                let closing_element = self.parse_jsx_closing_element(in_expression_context);
                let opening_name = self.jsx_tag_name(opening);
                let closing_name = self.jsx_tag_name(closing_element);
                if !self.tag_names_are_equivalent(opening_name, closing_name) {
                    let closing = &self.arena[closing_element];
                    let (start, end) = (closing.pos, closing.end);
                    let name = self.node_text(opening_name);
                    self.parse_error_at_range(start, end, &messages::EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0, &[&name]);
                }
                self.finish_node(
                    SyntaxKind::JsxElement,
                    pos,
                    NodeData::JsxElement { opening_element: opening, children, closing_element },
                )
            }
            SyntaxKind::JsxOpeningFragment => {
                let children = self.parse_jsx_children(opening);
                let closing_fragment = self.parse_jsx_closing_fragment(in_expression_context);
                self.finish_node(
                    SyntaxKind::JsxFragment,
                    pos,
                    NodeData::JsxFragment { opening_fragment: opening, children, closing_fragment },
                )
            }
            _ => opening,
        };

        // `<a></a><b></b>` in expression position: parse the second element
        // too and join both under a comma with a missing operator, so the
        // error names the real problem instead of a stray `<`.
        if in_expression_context && self.token() == SyntaxKind::LessThanToken {
            let sibling = self.try_parse(|p| {
                p.nested(&messages::EXPRESSION_EXPECTED, |p| {
                    p.parse_jsx_element_or_self_closing_element_or_fragment(true)
                })
                .ok()
            });
            if let Some(invalid) = sibling {
                self.parse_error_at_current_token(&messages::JSX_EXPRESSIONS_MUST_HAVE_ONE_PARENT_ELEMENT, &[]);
                let (right_pos, right_end) = (self.arena[invalid].pos, self.arena[invalid].end);
                let operator_token =
                    self.finish_at(Node::new(SyntaxKind::CommaToken, right_pos, right_pos, NodeData::Token));
                let binary = Node::new(
                    SyntaxKind::BinaryExpression,
                    self.arena[result].pos,
                    right_end,
                    NodeData::Binary { left: result, operator_token, right: invalid },
                );
                return self.finish_at(binary);
            }
        }
        result
    }

    fn jsx_tag_name(&self, tag: NodeId) -> NodeId {
        match self.arena[tag].data {
            NodeData::JsxTag { tag_name, .. } => tag_name,
            _ => tag,
        }
    }

    /// Source text of a node without its leading trivia.
    fn node_text(&self, id: NodeId) -> String {
        let node = &self.arena[id];
        let start = skip_trivia(self.source.chars(), node.pos, false, false);
        self.source.slice(start, node.end).to_string()
    }

    fn tag_names_are_equivalent(&self, lhs: NodeId, rhs: NodeId) -> bool {
        let (left, right) = (&self.arena[lhs], &self.arena[rhs]);
        if left.kind != right.kind {
            return false;
        }
        match (&left.data, &right.data) {
            (NodeData::Identifier(a), NodeData::Identifier(b)) => a.text == b.text,
            (
                NodeData::PropertyAccess { expression: left_expression, name: left_name, .. },
                NodeData::PropertyAccess { expression: right_expression, name: right_name, .. },
            ) => {
                self.tag_names_are_equivalent(*left_name, *right_name)
                    && self.tag_names_are_equivalent(*left_expression, *right_expression)
            }
            // `this`
            _ => left.kind == SyntaxKind::ThisKeyword,
        }
    }

    /// Children up to `</`. Every child is scanned in JSX mode.
    fn parse_jsx_children(&mut self, opening: NodeId) -> NodeArray {
        let saved_parsing_context = self.parsing_context;
        self.parsing_context |= ParsingContext::JsxChildren.bit();
        let pos = self.node_pos();
        let mut children = Vec::new();
        loop {
            let token = self.re_scan_jsx_token();
            let child = match token {
                SyntaxKind::EndOfFileToken => {
                    self.report_unclosed_jsx(opening);
                    None
                }
                SyntaxKind::LessThanSlashToken | SyntaxKind::ConflictMarkerTrivia => None,
                SyntaxKind::JsxText | SyntaxKind::JsxTextAllWhiteSpaces => Some(self.parse_jsx_text()),
                SyntaxKind::OpenBraceToken => self.parse_jsx_expression(false),
                SyntaxKind::LessThanToken => {
                    match self.nested(&messages::EXPRESSION_EXPECTED, |p| {
                        p.parse_jsx_element_or_self_closing_element_or_fragment(false)
                    }) {
                        Ok(element) | Err(element) => Some(element),
                    }
                }
                _ => {
                    self.report_internal_error(format!("unexpected JSX child token {token:?}"));
                    None
                }
            };
            match child {
                Some(child) => children.push(child),
                None => break,
            }
        }
        self.parsing_context = saved_parsing_context;
        NodeArray::new(pos, self.node_pos(), children)
    }

    fn report_unclosed_jsx(&mut self, opening: NodeId) {
        if self.arena.kind(opening) == SyntaxKind::JsxOpeningFragment {
            let node = &self.arena[opening];
            let (start, end) = (node.pos, node.end);
            self.parse_error_at_range(start, end, &messages::JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG, &[]);
            return;
        }
        let tag_name = self.jsx_tag_name(opening);
        let start = skip_trivia(self.source.chars(), self.arena[tag_name].pos, false, false);
        let end = self.arena[tag_name].end;
        let name = self.node_text(tag_name);
        self.parse_error_at_range(start, end, &messages::JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG, &[&name]);
    }

    fn parse_jsx_text(&mut self) -> NodeId {
        let pos = self.node_pos();
        let kind = self.token();
        let literal = Literal {
            text: self.scanner.token_value().to_string(),
            token_flags: self.scanner.token_flags(),
        };
        self.scan_jsx_text();
        self.finish_node(kind, pos, NodeData::Literal(literal))
    }

    /// Ends a tag. Children follow only outside expression context, so
    /// the next token is scanned as JSX there.
    fn parse_jsx_tag_end(&mut self, in_expression_context: bool) {
        if in_expression_context {
            self.parse_expected(SyntaxKind::GreaterThanToken);
        } else {
            self.parse_expected_with(SyntaxKind::GreaterThanToken, None, false);
            self.scan_jsx_text();
        }
    }

    fn parse_jsx_opening_or_self_closing_element_or_opening_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanToken);

        if self.token() == SyntaxKind::GreaterThanToken {
            // `<>`: scan what follows as JSX so illegal characters in the
            // text aren't reported as scan errors.
            self.scan_jsx_text();
            return self.finish_node(SyntaxKind::JsxOpeningFragment, pos, NodeData::Token);
        }

        let tag_name = self.parse_jsx_element_name();
        let attributes = self.parse_jsx_attributes();
        let kind = if self.token() == SyntaxKind::GreaterThanToken {
            self.scan_jsx_text();
            SyntaxKind::JsxOpeningElement
        } else {
            self.parse_expected(SyntaxKind::SlashToken);
            self.parse_jsx_tag_end(in_expression_context);
            SyntaxKind::JsxSelfClosingElement
        };
        self.finish_node(kind, pos, NodeData::JsxTag { tag_name, attributes: Some(attributes) })
    }

    /// `div`, `my-element`, `this` or `a.b.c`.
    fn parse_jsx_element_name(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.scan_jsx_identifier();
        let mut expression = if self.token() == SyntaxKind::ThisKeyword {
            self.parse_token_node()
        } else {
            self.parse_identifier_name()
        };
        while self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_right_side_of_dot(true);
            expression = self.finish_node(
                SyntaxKind::PropertyAccessExpression,
                pos,
                NodeData::PropertyAccess { expression, question_dot_token: None, name },
            );
        }
        expression
    }

    fn parse_jsx_attributes(&mut self) -> NodeId {
        let pos = self.node_pos();
        let properties = self.parse_list(ParsingContext::JsxAttributes, Self::parse_jsx_attribute);
        self.finish_node(SyntaxKind::JsxAttributes, pos, NodeData::JsxAttributes { properties })
    }

    fn parse_jsx_attribute(&mut self) -> NodeId {
        if self.token() == SyntaxKind::OpenBraceToken {
            return self.parse_jsx_spread_attribute();
        }
        let pos = self.node_pos();
        self.scan_jsx_identifier();
        let name = self.parse_identifier_name();
        let initializer = if self.token() == SyntaxKind::EqualsToken {
            match self.scan_jsx_attribute_value() {
                SyntaxKind::StringLiteral => Some(self.parse_literal_node()),
                _ => self.parse_jsx_expression(true),
            }
        } else {
            None
        };
        self.finish_node(SyntaxKind::JsxAttribute, pos, NodeData::JsxAttribute { name, initializer })
    }

    fn parse_jsx_spread_attribute(&mut self) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        self.parse_expected(SyntaxKind::DotDotDotToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(SyntaxKind::JsxSpreadAttribute, pos, NodeData::Expression { expression })
    }

    /// `{expr}`, `{...expr}` or the empty `{}`. `None` when the `{` is
    /// missing.
    fn parse_jsx_expression(&mut self, in_expression_context: bool) -> Option<NodeId> {
        let pos = self.node_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return None;
        }
        let (dot_dot_dot_token, expression) = if self.token() != SyntaxKind::CloseBraceToken {
            let dot_dot_dot_token = self.parse_optional_token(SyntaxKind::DotDotDotToken);
            (dot_dot_dot_token, Some(self.parse_expression()))
        } else {
            (None, None)
        };
        if in_expression_context {
            self.parse_expected(SyntaxKind::CloseBraceToken);
        } else if self.parse_expected_with(SyntaxKind::CloseBraceToken, None, false) {
            self.scan_jsx_text();
        }
        Some(self.finish_node(
            SyntaxKind::JsxExpression,
            pos,
            NodeData::JsxExpression { dot_dot_dot_token, expression },
        ))
    }

    fn parse_jsx_closing_element(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        let tag_name = self.parse_jsx_element_name();
        self.parse_jsx_tag_end(in_expression_context);
        self.finish_node(SyntaxKind::JsxClosingElement, pos, NodeData::JsxTag { tag_name, attributes: None })
    }

    fn parse_jsx_closing_fragment(&mut self, in_expression_context: bool) -> NodeId {
        let pos = self.node_pos();
        self.parse_expected(SyntaxKind::LessThanSlashToken);
        if self.token_is_identifier_or_keyword() {
            let name = self.parse_jsx_element_name();
            let node = &self.arena[name];
            let (start, end) = (node.pos, node.end);
            self.parse_error_at_range(start, end, &messages::EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT, &[]);
        }
        self.parse_jsx_tag_end(in_expression_context);
        self.finish_node(SyntaxKind::JsxClosingFragment, pos, NodeData::Token)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_source_file;
    use tsfront_ast::node::NodeData;
    use tsfront_ast::syntax_kind::SyntaxKind;

    #[test]
    fn test_element_with_attributes_and_children() {
        let file = parse_source_file(
            "test.tsx",
            "const a = <div className=\"box\" data-id={id} {...props}>hello {name}<br /></div>;",
        );
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        let element = file.descendants_of_kind(SyntaxKind::JsxElement)[0];
        let NodeData::JsxElement { opening_element, children, .. } = &file.node(element).data else {
            panic!("expected a JSX element");
        };
        let child_kinds: Vec<_> = children.iter().map(|c| file.kind(c)).collect();
        assert_eq!(
            child_kinds,
            [SyntaxKind::JsxText, SyntaxKind::JsxExpression, SyntaxKind::JsxSelfClosingElement]
        );
        let NodeData::JsxTag { attributes: Some(attributes), .. } = file.node(*opening_element).data else {
            panic!("expected attributes");
        };
        let NodeData::JsxAttributes { properties } = &file.node(attributes).data else {
            panic!("expected an attribute list");
        };
        assert_eq!(properties.len(), 3);
        assert_eq!(file.kind(properties[2]), SyntaxKind::JsxSpreadAttribute);
        let NodeData::JsxAttribute { name, .. } = file.node(properties[1]).data else {
            panic!("expected an attribute");
        };
        assert_eq!(file.identifier_text(name), Some("data-id"));
    }

    #[test]
    fn test_fragment_and_member_tags() {
        let file = parse_source_file("test.tsx", "<><Foo.Bar /><this.x></this.x></>;");
        assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
        assert_eq!(file.descendants_of_kind(SyntaxKind::JsxFragment).len(), 1);
        assert_eq!(file.descendants_of_kind(SyntaxKind::JsxSelfClosingElement).len(), 1);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let file = parse_source_file("test.tsx", "<a></b>;");
        assert_eq!(file.parse_diagnostics.len(), 1);
        assert_eq!(file.parse_diagnostics[0].code, 17002);
        assert_eq!(file.parse_diagnostics[0].message_text, "Expected corresponding JSX closing tag for 'a'.");
    }

    #[test]
    fn test_unclosed_element_and_fragment() {
        let file = parse_source_file("test.tsx", "<a>text");
        assert!(file.parse_diagnostics.iter().any(|d| d.code == 17008));

        let file = parse_source_file("test.tsx", "<>text");
        assert!(file.parse_diagnostics.iter().any(|d| d.code == 17014));

        let file = parse_source_file("test.tsx", "<>text</a>;");
        assert!(file.parse_diagnostics.iter().any(|d| d.code == 17015));
    }

    #[test]
    fn test_sibling_elements_need_a_parent() {
        let file = parse_source_file("test.tsx", "<a></a><b></b>;");
        assert!(file.parse_diagnostics.iter().any(|d| d.code == 2657));
        let NodeData::Expression { expression } = file.node(file.statements()[0]).data else {
            panic!("expected an expression statement");
        };
        let NodeData::Binary { operator_token, .. } = file.node(expression).data else {
            panic!("expected the elements joined by a binary expression");
        };
        assert_eq!(file.kind(operator_token), SyntaxKind::CommaToken);
        assert!(file.node(operator_token).is_missing());
    }

    #[test]
    fn test_angle_bracket_is_type_assertion_outside_jsx() {
        let file = parse_source_file("test.ts", "<div>x;");
        assert!(file.parse_diagnostics.is_empty());
        assert_eq!(file.descendants_of_kind(SyntaxKind::TypeAssertionExpression).len(), 1);
    }
}
