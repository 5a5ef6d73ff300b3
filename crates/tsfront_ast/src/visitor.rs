//! Generic child iteration over the syntax tree.
//!
//! [`for_each_child`] is the one dispatch table that knows where each node
//! keeps its children. Linking, the descendant queries and [`AstVisitor`]
//! all go through it, so a new payload only needs a case here.

use crate::node::*;
use crate::types::NodeId;

/// One step of a child walk: a single node, or a whole list.
enum Child<'a> {
    Node(NodeId),
    Array(&'a NodeArray),
}

/// Walk the children of `node` in source order: decorators, modifiers,
/// then payload fields. Stops at the first callback result that is `Some`.
fn walk<'a, T>(node: &'a Node, visit: &mut dyn FnMut(Child<'a>) -> Option<T>) -> Option<T> {
    macro_rules! node {
        ($id:expr) => {
            if let Some(result) = visit(Child::Node($id)) {
                return Some(result);
            }
        };
    }
    macro_rules! opt {
        ($($id:expr),+) => {
            $(if let Some(id) = $id {
                node!(id);
            })+
        };
    }
    macro_rules! list {
        ($array:expr) => {
            if let Some(result) = visit(Child::Array($array)) {
                return Some(result);
            }
        };
    }
    macro_rules! opt_list {
        ($array:expr) => {
            if let Some(array) = $array {
                list!(array);
            }
        };
    }

    opt_list!(&node.decorators);
    opt_list!(&node.modifiers);

    match &node.data {
        NodeData::Token | NodeData::Identifier(_) | NodeData::Literal(_) => {}

        NodeData::QualifiedName { left, right } => {
            node!(*left);
            node!(*right);
        }
        NodeData::TypeParameter { name, constraint, default } => {
            node!(*name);
            opt!(*constraint, *default);
        }
        NodeData::FunctionLike(f) => {
            opt!(f.asterisk_token, f.name, f.question_token);
            opt_list!(&f.type_parameters);
            list!(&f.parameters);
            opt!(f.ty, f.equals_greater_than_token, f.body);
        }
        NodeData::Signature(s) => {
            opt_list!(&s.type_parameters);
            list!(&s.parameters);
            opt!(s.ty);
        }
        NodeData::VariableLike(v) => {
            opt!(v.property_name, v.dot_dot_dot_token);
            node!(v.name);
            opt!(v.question_token, v.equals_token, v.ty, v.initializer);
        }
        NodeData::ClassLike(c) => {
            opt!(c.name);
            opt_list!(&c.type_parameters);
            opt_list!(&c.heritage_clauses);
            list!(&c.members);
        }
        NodeData::Expression { expression } => node!(*expression),

        NodeData::TypePredicate { parameter_name, ty } => {
            node!(*parameter_name);
            node!(*ty);
        }
        NodeData::TypeReference { type_name, type_arguments } => {
            node!(*type_name);
            opt_list!(type_arguments);
        }
        NodeData::TypeQuery { expr_name } => node!(*expr_name),
        NodeData::Members { members } => list!(members),
        NodeData::ArrayType { element_type } => node!(*element_type),
        NodeData::TypeList { types } => list!(types),
        NodeData::ConditionalType { check_type, extends_type, true_type, false_type } => {
            node!(*check_type);
            node!(*extends_type);
            node!(*true_type);
            node!(*false_type);
        }
        NodeData::InferType { type_parameter } => node!(*type_parameter),
        NodeData::ParenthesizedType { ty } | NodeData::TypeOperator { ty, .. } => node!(*ty),
        NodeData::IndexedAccessType { object_type, index_type } => {
            node!(*object_type);
            node!(*index_type);
        }
        NodeData::MappedType { readonly_token, type_parameter, question_token, ty } => {
            opt!(*readonly_token);
            node!(*type_parameter);
            opt!(*question_token, *ty);
        }
        NodeData::LiteralType { literal } => node!(*literal),

        NodeData::Elements { elements, .. } => list!(elements),
        NodeData::ObjectLiteral { properties, .. } => list!(properties),
        NodeData::PropertyAccess { expression, question_dot_token, name } => {
            node!(*expression);
            opt!(*question_dot_token);
            node!(*name);
        }
        NodeData::ElementAccess { expression, question_dot_token, argument_expression } => {
            node!(*expression);
            opt!(*question_dot_token);
            node!(*argument_expression);
        }
        NodeData::Call { expression, question_dot_token, type_arguments, arguments } => {
            node!(*expression);
            opt!(*question_dot_token);
            opt_list!(type_arguments);
            opt_list!(arguments);
        }
        NodeData::TaggedTemplate { tag, template } => {
            node!(*tag);
            node!(*template);
        }
        NodeData::TypeAssertion { ty, expression } => {
            node!(*ty);
            node!(*expression);
        }
        NodeData::Unary { operand, .. } => node!(*operand),
        NodeData::Binary { left, operator_token, right } => {
            node!(*left);
            node!(*operator_token);
            node!(*right);
        }
        NodeData::Conditional { condition, question_token, when_true, colon_token, when_false } => {
            node!(*condition);
            node!(*question_token);
            node!(*when_true);
            node!(*colon_token);
            node!(*when_false);
        }
        NodeData::Template { head, template_spans } => {
            node!(*head);
            list!(template_spans);
        }
        NodeData::TemplateSpan { expression, literal } => {
            node!(*expression);
            node!(*literal);
        }
        NodeData::Yield { asterisk_token, expression } => {
            opt!(*asterisk_token, *expression);
        }
        NodeData::ExpressionWithTypeArguments { expression, type_arguments } => {
            node!(*expression);
            opt_list!(type_arguments);
        }
        NodeData::As { expression, ty } => {
            node!(*expression);
            node!(*ty);
        }
        NodeData::MetaProperty { name, .. } => node!(*name),

        NodeData::Block { statements, .. } => list!(statements),
        NodeData::VariableStatement { declaration_list } => node!(*declaration_list),
        NodeData::If { expression, then_statement, else_statement } => {
            node!(*expression);
            node!(*then_statement);
            opt!(*else_statement);
        }
        NodeData::Do { statement, expression } => {
            node!(*statement);
            node!(*expression);
        }
        NodeData::While { expression, statement } => {
            node!(*expression);
            node!(*statement);
        }
        NodeData::For { initializer, condition, incrementor, statement } => {
            opt!(*initializer, *condition, *incrementor);
            node!(*statement);
        }
        NodeData::ForInOf { await_modifier, initializer, expression, statement } => {
            opt!(*await_modifier);
            node!(*initializer);
            node!(*expression);
            node!(*statement);
        }
        NodeData::Jump { label } => {
            opt!(*label);
        }
        NodeData::Return { expression } => {
            opt!(*expression);
        }
        NodeData::Switch { expression, case_block } => {
            node!(*expression);
            node!(*case_block);
        }
        NodeData::Labeled { label, statement } => {
            node!(*label);
            node!(*statement);
        }
        NodeData::Try { try_block, catch_clause, finally_block } => {
            node!(*try_block);
            opt!(*catch_clause, *finally_block);
        }
        NodeData::VariableDeclarationList { declarations } => list!(declarations),
        NodeData::TypeAlias { name, type_parameters, ty } => {
            node!(*name);
            opt_list!(type_parameters);
            node!(*ty);
        }
        NodeData::Enum { name, members } => {
            node!(*name);
            list!(members);
        }
        NodeData::Module { name, body } => {
            node!(*name);
            opt!(*body);
        }
        NodeData::CaseBlock { clauses } => list!(clauses),
        NodeData::NamespaceExportDeclaration { name } | NodeData::NamespaceImport { name } => node!(*name),
        NodeData::ImportEquals { name, module_reference } => {
            node!(*name);
            node!(*module_reference);
        }
        NodeData::ImportDeclaration { import_clause, module_specifier } => {
            opt!(*import_clause);
            node!(*module_specifier);
        }
        NodeData::ImportClause { name, named_bindings } => {
            opt!(*name, *named_bindings);
        }
        NodeData::NamedImportsOrExports { elements } => list!(elements),
        NodeData::ImportOrExportSpecifier { property_name, name } => {
            opt!(*property_name);
            node!(*name);
        }
        NodeData::ExportAssignment { expression, .. } => node!(*expression),
        NodeData::ExportDeclaration { export_clause, module_specifier } => {
            opt!(*export_clause, *module_specifier);
        }

        NodeData::JsxElement { opening_element, children, closing_element } => {
            node!(*opening_element);
            list!(children);
            node!(*closing_element);
        }
        NodeData::JsxTag { tag_name, attributes } => {
            node!(*tag_name);
            opt!(*attributes);
        }
        NodeData::JsxFragment { opening_fragment, children, closing_fragment } => {
            node!(*opening_fragment);
            list!(children);
            node!(*closing_fragment);
        }
        NodeData::JsxAttribute { name, initializer } => {
            node!(*name);
            opt!(*initializer);
        }
        NodeData::JsxAttributes { properties } => list!(properties),
        NodeData::JsxExpression { dot_dot_dot_token, expression } => {
            opt!(*dot_dot_dot_token, *expression);
        }

        NodeData::CaseClause { expression, statements } => {
            opt!(*expression);
            list!(statements);
        }
        NodeData::HeritageClause { types, .. } => list!(types),
        NodeData::CatchClause { variable_declaration, block } => {
            opt!(*variable_declaration);
            node!(*block);
        }

        NodeData::SourceFile { statements, end_of_file_token } => {
            list!(statements);
            node!(*end_of_file_token);
        }
    }
    None
}

/// Invoke `f` on each immediate child of `id` in source order, elements of
/// child lists included. Returns the first `Some` the callback produces.
pub fn for_each_child<T>(
    arena: &AstArena,
    id: NodeId,
    mut f: impl FnMut(NodeId) -> Option<T>,
) -> Option<T> {
    walk(arena.get(id), &mut |child| match child {
        Child::Node(id) => f(id),
        Child::Array(array) => array.iter().find_map(&mut f),
    })
}

/// Like [`for_each_child`], but hands each child list to `f_array` as a
/// whole instead of element by element.
pub fn for_each_child_with_arrays<T>(
    arena: &AstArena,
    id: NodeId,
    mut f_node: impl FnMut(NodeId) -> Option<T>,
    mut f_array: impl FnMut(&NodeArray) -> Option<T>,
) -> Option<T> {
    walk(arena.get(id), &mut |child| match child {
        Child::Node(id) => f_node(id),
        Child::Array(array) => f_array(array),
    })
}

/// The immediate children of `id`, in source order.
pub fn children(arena: &AstArena, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    for_each_child(arena, id, |child| {
        out.push(child);
        None::<()>
    });
    out
}

/// A visitor over the tree. Override `visit_node` and call
/// [`walk_children`] to keep descending.
pub trait AstVisitor {
    fn visit_node(&mut self, arena: &AstArena, id: NodeId) {
        walk_children(self, arena, id);
    }
}

/// Visit every immediate child of `id` with `visitor`.
pub fn walk_children<V: AstVisitor + ?Sized>(visitor: &mut V, arena: &AstArena, id: NodeId) {
    for_each_child(arena, id, |child| {
        visitor.visit_node(arena, child);
        None::<()>
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind;

    // `a + b;` built by hand.
    fn binary_statement(arena: &mut AstArena) -> (NodeId, [NodeId; 4]) {
        let mut table = tsfront_core::intern::IdentifierTable::new();
        let mut ident = |arena: &mut AstArena, text: &str, pos: u32, end: u32| {
            arena.alloc(Node::new(
                SyntaxKind::Identifier,
                pos,
                end,
                NodeData::Identifier(Identifier { text: table.intern(text), original_keyword: None }),
            ))
        };
        let a = ident(arena, "a", 0, 1);
        let plus = arena.alloc(Node::new(SyntaxKind::PlusToken, 1, 3, NodeData::Token));
        let b = ident(arena, "b", 3, 5);
        let binary = arena.alloc(Node::new(
            SyntaxKind::BinaryExpression,
            0,
            5,
            NodeData::Binary { left: a, operator_token: plus, right: b },
        ));
        let stmt = arena.alloc(Node::new(
            SyntaxKind::ExpressionStatement,
            0,
            6,
            NodeData::Expression { expression: binary },
        ));
        (stmt, [a, plus, b, binary])
    }

    #[test]
    fn test_children_in_source_order() {
        let mut arena = AstArena::new();
        let (stmt, [a, plus, b, binary]) = binary_statement(&mut arena);
        assert_eq!(children(&arena, stmt), vec![binary]);
        assert_eq!(children(&arena, binary), vec![a, plus, b]);
        assert!(children(&arena, a).is_empty());
    }

    #[test]
    fn test_for_each_child_short_circuits() {
        let mut arena = AstArena::new();
        let (_, [a, plus, _, binary]) = binary_statement(&mut arena);
        let mut seen = Vec::new();
        let found = for_each_child(&arena, binary, |child| {
            seen.push(child);
            (arena.kind(child) == SyntaxKind::PlusToken).then_some(child)
        });
        assert_eq!(found, Some(plus));
        assert_eq!(seen, vec![a, plus]);
    }

    #[test]
    fn test_for_each_child_with_arrays() {
        let mut arena = AstArena::new();
        let (stmt, _) = binary_statement(&mut arena);
        let eof = arena.alloc(Node::new(SyntaxKind::EndOfFileToken, 6, 6, NodeData::Token));
        let root = arena.alloc(Node::new(
            SyntaxKind::SourceFile,
            0,
            6,
            NodeData::SourceFile { statements: NodeArray::new(0, 6, vec![stmt]), end_of_file_token: eof },
        ));

        let mut arrays = 0;
        let mut nodes = Vec::new();
        for_each_child_with_arrays(
            &arena,
            root,
            |id| {
                nodes.push(id);
                None::<()>
            },
            |array| {
                arrays += 1;
                assert_eq!(array.nodes, vec![stmt]);
                None
            },
        );
        assert_eq!(arrays, 1);
        assert_eq!(nodes, vec![eof]);
    }

    #[test]
    fn test_visitor_default_walks_everything() {
        struct Counter(usize);
        impl AstVisitor for Counter {
            fn visit_node(&mut self, arena: &AstArena, id: NodeId) {
                self.0 += 1;
                walk_children(self, arena, id);
            }
        }

        let mut arena = AstArena::new();
        let (stmt, _) = binary_statement(&mut arena);
        let mut counter = Counter(0);
        counter.visit_node(&arena, stmt);
        assert_eq!(counter.0, 5);
    }
}
