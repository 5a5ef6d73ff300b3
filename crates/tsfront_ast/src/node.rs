//! AST node definitions.
//!
//! Nodes live in an [`AstArena`] and refer to each other by [`NodeId`].
//! Every grammar production has its own [`SyntaxKind`]; productions that
//! share a shape share a [`NodeData`] variant, so `kind` is the real
//! discriminant and `data` is the payload.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use tsfront_core::intern::InternedString;
use tsfront_core::text::TextRange;

// ============================================================================
// Node and NodeArray
// ============================================================================

/// A single node. Created once by the parser's finishing step and
/// immutable afterwards, except for `parent` which the linking pass fills.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Full start, leading trivia included.
    pub pos: u32,
    pub end: u32,
    pub flags: NodeFlags,
    pub parent: Option<NodeId>,
    pub decorators: Option<NodeArray>,
    pub modifiers: Option<NodeArray>,
    pub data: NodeData,
}

impl Node {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32, data: NodeData) -> Self {
        Self {
            kind,
            pos,
            end,
            flags: NodeFlags::NONE,
            parent: None,
            decorators: None,
            modifiers: None,
            data,
        }
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    /// A node the parser synthesized in place of something it expected.
    /// The end-of-file token is legitimately empty and is never missing.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.pos == self.end && self.kind != SyntaxKind::EndOfFileToken
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.flags.contains(NodeFlags::THIS_NODE_HAS_ERROR)
    }

    #[inline]
    pub fn is_expression(&self) -> bool {
        self.kind.is_expression_kind()
    }

    #[inline]
    pub fn is_statement(&self) -> bool {
        self.kind.is_statement_kind()
    }

    #[inline]
    pub fn is_declaration(&self) -> bool {
        self.kind.is_declaration_kind()
    }

    #[inline]
    pub fn is_type_node(&self) -> bool {
        self.kind.is_type_node()
    }

    /// The name node of a declaration, if it has one.
    pub fn name(&self) -> Option<NodeId> {
        match &self.data {
            NodeData::FunctionLike(f) => f.name,
            NodeData::VariableLike(v) => Some(v.name),
            NodeData::ClassLike(c) => c.name,
            NodeData::TypeParameter { name, .. }
            | NodeData::TypeAlias { name, .. }
            | NodeData::Enum { name, .. }
            | NodeData::Module { name, .. }
            | NodeData::ImportEquals { name, .. }
            | NodeData::NamespaceImport { name }
            | NodeData::NamespaceExportDeclaration { name }
            | NodeData::ImportOrExportSpecifier { name, .. }
            | NodeData::JsxAttribute { name, .. }
            | NodeData::PropertyAccess { name, .. } => Some(*name),
            NodeData::ImportClause { name, .. } => *name,
            _ => None,
        }
    }

    /// Fold the modifier keywords into flags.
    pub fn modifier_flags(&self, arena: &AstArena) -> ModifierFlags {
        self.modifiers
            .iter()
            .flat_map(|m| m.iter())
            .fold(ModifierFlags::NONE, |flags, id| {
                flags | ModifierFlags::from_modifier_kind(arena.get(id).kind)
            })
    }

    /// Interned text if this node is an identifier.
    pub fn identifier_text(&self) -> Option<InternedString> {
        match &self.data {
            NodeData::Identifier(ident) => Some(ident.text),
            _ => None,
        }
    }

    /// Cooked text if this node is a literal.
    pub fn literal_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Literal(lit) => Some(&lit.text),
            _ => None,
        }
    }
}

/// An ordered list of children with its own span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeArray {
    pub pos: u32,
    pub end: u32,
    pub has_trailing_comma: bool,
    pub nodes: Vec<NodeId>,
}

impl NodeArray {
    pub fn new(pos: u32, end: u32, nodes: Vec<NodeId>) -> Self {
        Self {
            pos,
            end,
            has_trailing_comma: false,
            nodes,
        }
    }

    /// An empty list positioned at `pos`.
    pub fn empty(pos: u32) -> Self {
        Self::new(pos, pos, Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        self.nodes.iter().copied()
    }

    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

impl std::ops::Index<usize> for NodeArray {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.nodes[index]
    }
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    pub text: InternedString,
    /// Set when a keyword was parsed in identifier position.
    pub original_keyword: Option<SyntaxKind>,
}

/// Literal tokens, template pieces and JSX text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// Cooked value: escapes resolved, quotes stripped.
    pub text: String,
    pub token_flags: TokenFlags,
}

impl Literal {
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }
}

/// Methods, constructors, accessors, functions and arrows.
#[derive(Debug, Clone, Default)]
pub struct FunctionLike {
    pub asterisk_token: Option<NodeId>,
    pub name: Option<NodeId>,
    pub question_token: Option<NodeId>,
    pub type_parameters: Option<NodeArray>,
    pub parameters: NodeArray,
    pub ty: Option<NodeId>,
    /// Arrow functions only.
    pub equals_greater_than_token: Option<NodeId>,
    pub body: Option<NodeId>,
}

/// Call, construct and index signatures, and function/constructor types.
#[derive(Debug, Clone, Default)]
pub struct SignatureDecl {
    pub type_parameters: Option<NodeArray>,
    pub parameters: NodeArray,
    pub ty: Option<NodeId>,
}

/// Parameters, properties, variable declarations, binding elements,
/// property assignments and enum members.
#[derive(Debug, Clone)]
pub struct VariableLike {
    /// `a` in the binding element `{ a: b }`.
    pub property_name: Option<NodeId>,
    pub dot_dot_dot_token: Option<NodeId>,
    pub name: NodeId,
    pub question_token: Option<NodeId>,
    /// Shorthand property assignments with a default (`{ a = 1 }`).
    pub equals_token: Option<NodeId>,
    pub ty: Option<NodeId>,
    pub initializer: Option<NodeId>,
}

impl VariableLike {
    pub fn named(name: NodeId) -> Self {
        Self {
            property_name: None,
            dot_dot_dot_token: None,
            name,
            question_token: None,
            equals_token: None,
            ty: None,
            initializer: None,
        }
    }
}

/// Class declarations and expressions, and interfaces.
#[derive(Debug, Clone, Default)]
pub struct ClassLike {
    pub name: Option<NodeId>,
    pub type_parameters: Option<NodeArray>,
    pub heritage_clauses: Option<NodeArray>,
    pub members: NodeArray,
}

/// Per-kind payload. See the module docs for how kinds map onto variants.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Keywords, punctuation and childless productions such as
    /// `EmptyStatement`, `ThisType` or `OmittedExpression`.
    Token,
    Identifier(Identifier),
    Literal(Literal),

    QualifiedName { left: NodeId, right: NodeId },
    TypeParameter { name: NodeId, constraint: Option<NodeId>, default: Option<NodeId> },
    FunctionLike(Box<FunctionLike>),
    Signature(Box<SignatureDecl>),
    VariableLike(Box<VariableLike>),
    ClassLike(Box<ClassLike>),

    /// Nodes whose only child is one expression: computed property names,
    /// decorators, parenthesized/delete/typeof/void/await/non-null
    /// expressions, spreads, expression statements, throw statements,
    /// external module references and JSX spread attributes.
    Expression { expression: NodeId },

    // Types
    TypePredicate { parameter_name: NodeId, ty: NodeId },
    TypeReference { type_name: NodeId, type_arguments: Option<NodeArray> },
    TypeQuery { expr_name: NodeId },
    /// Type literals.
    Members { members: NodeArray },
    ArrayType { element_type: NodeId },
    /// Tuple, union and intersection types.
    TypeList { types: NodeArray },
    ConditionalType { check_type: NodeId, extends_type: NodeId, true_type: NodeId, false_type: NodeId },
    InferType { type_parameter: NodeId },
    ParenthesizedType { ty: NodeId },
    TypeOperator { operator: SyntaxKind, ty: NodeId },
    IndexedAccessType { object_type: NodeId, index_type: NodeId },
    MappedType {
        readonly_token: Option<NodeId>,
        type_parameter: NodeId,
        question_token: Option<NodeId>,
        ty: Option<NodeId>,
    },
    LiteralType { literal: NodeId },

    // Expressions
    /// Binding patterns and array literals.
    Elements { elements: NodeArray, multi_line: bool },
    ObjectLiteral { properties: NodeArray, multi_line: bool },
    PropertyAccess { expression: NodeId, question_dot_token: Option<NodeId>, name: NodeId },
    ElementAccess { expression: NodeId, question_dot_token: Option<NodeId>, argument_expression: NodeId },
    /// Call and `new` expressions. `new X` without parens has no arguments.
    Call {
        expression: NodeId,
        question_dot_token: Option<NodeId>,
        type_arguments: Option<NodeArray>,
        arguments: Option<NodeArray>,
    },
    TaggedTemplate { tag: NodeId, template: NodeId },
    TypeAssertion { ty: NodeId, expression: NodeId },
    /// Prefix and postfix unary expressions.
    Unary { operator: SyntaxKind, operand: NodeId },
    Binary { left: NodeId, operator_token: NodeId, right: NodeId },
    Conditional { condition: NodeId, question_token: NodeId, when_true: NodeId, colon_token: NodeId, when_false: NodeId },
    Template { head: NodeId, template_spans: NodeArray },
    TemplateSpan { expression: NodeId, literal: NodeId },
    Yield { asterisk_token: Option<NodeId>, expression: Option<NodeId> },
    ExpressionWithTypeArguments { expression: NodeId, type_arguments: Option<NodeArray> },
    As { expression: NodeId, ty: NodeId },
    MetaProperty { keyword_token: SyntaxKind, name: NodeId },

    // Statements
    /// Blocks and module blocks.
    Block { statements: NodeArray, multi_line: bool },
    VariableStatement { declaration_list: NodeId },
    If { expression: NodeId, then_statement: NodeId, else_statement: Option<NodeId> },
    Do { statement: NodeId, expression: NodeId },
    /// `while` and `with` statements.
    While { expression: NodeId, statement: NodeId },
    For { initializer: Option<NodeId>, condition: Option<NodeId>, incrementor: Option<NodeId>, statement: NodeId },
    /// `for..in`, `for..of` and `for await..of`.
    ForInOf { await_modifier: Option<NodeId>, initializer: NodeId, expression: NodeId, statement: NodeId },
    /// `break` and `continue`.
    Jump { label: Option<NodeId> },
    Return { expression: Option<NodeId> },
    Switch { expression: NodeId, case_block: NodeId },
    Labeled { label: NodeId, statement: NodeId },
    Try { try_block: NodeId, catch_clause: Option<NodeId>, finally_block: Option<NodeId> },
    VariableDeclarationList { declarations: NodeArray },
    TypeAlias { name: NodeId, type_parameters: Option<NodeArray>, ty: NodeId },
    Enum { name: NodeId, members: NodeArray },
    /// `body` is a module block, or a nested module for `namespace A.B`.
    Module { name: NodeId, body: Option<NodeId> },
    CaseBlock { clauses: NodeArray },
    NamespaceExportDeclaration { name: NodeId },
    ImportEquals { name: NodeId, module_reference: NodeId },
    ImportDeclaration { import_clause: Option<NodeId>, module_specifier: NodeId },
    ImportClause { name: Option<NodeId>, named_bindings: Option<NodeId> },
    NamespaceImport { name: NodeId },
    /// `{ a, b as c }` in imports and exports.
    NamedImportsOrExports { elements: NodeArray },
    ImportOrExportSpecifier { property_name: Option<NodeId>, name: NodeId },
    ExportAssignment { is_export_equals: bool, expression: NodeId },
    ExportDeclaration { export_clause: Option<NodeId>, module_specifier: Option<NodeId> },

    // JSX
    JsxElement { opening_element: NodeId, children: NodeArray, closing_element: NodeId },
    /// Opening, self-closing and closing elements. Closing tags carry no attributes.
    JsxTag { tag_name: NodeId, attributes: Option<NodeId> },
    JsxFragment { opening_fragment: NodeId, children: NodeArray, closing_fragment: NodeId },
    JsxAttribute { name: NodeId, initializer: Option<NodeId> },
    JsxAttributes { properties: NodeArray },
    JsxExpression { dot_dot_dot_token: Option<NodeId>, expression: Option<NodeId> },

    // Clauses
    /// `expression` is `None` for `default:`.
    CaseClause { expression: Option<NodeId>, statements: NodeArray },
    HeritageClause { token: SyntaxKind, types: NodeArray },
    CatchClause { variable_declaration: Option<NodeId>, block: NodeId },

    SourceFile { statements: NodeArray, end_of_file_token: NodeId },
}

// ============================================================================
// Arena
// ============================================================================

/// Owns every node of one parsed file. Node ids are indices into it.
#[derive(Debug, Clone, Default)]
pub struct AstArena {
    nodes: Vec<Node>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Panics on an id from another arena that is out of range; ids are
    /// only handed out by `alloc`.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.get(id).kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node allocated after the first `len`. Used to roll back
    /// speculative parses.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn modifier_flags(&self, id: NodeId) -> ModifierFlags {
        self.get(id).modifier_flags(self)
    }

    pub fn has_modifier(&self, id: NodeId, flag: ModifierFlags) -> bool {
        self.modifier_flags(id).intersects(flag)
    }
}

impl std::ops::Index<NodeId> for AstArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}
