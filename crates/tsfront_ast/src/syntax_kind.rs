//! SyntaxKind enum - every token and node kind the front end produces.
//!
//! Tokens come first, then keywords, then parsed nodes. The ordering is
//! load-bearing: the range predicates below compare discriminants, so new
//! variants must be added inside the group they belong to.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // Trivia
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    NewLineTrivia,
    WhitespaceTrivia,
    ShebangTrivia,
    ConflictMarkerTrivia,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    JsxText,
    JsxTextAllWhiteSpaces,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,

    // Template pieces
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    LessThanSlashToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AsKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BigIntKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    RequireKeyword,
    NumberKeyword,
    ObjectKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    FromKeyword,
    GlobalKeyword,
    OfKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,
    Decorator,

    // Type members
    PropertySignature,
    PropertyDeclaration,
    MethodSignature,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    DeleteExpression,
    TypeOfExpression,
    VoidExpression,
    AwaitExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    YieldExpression,
    SpreadElement,
    ClassExpression,
    OmittedExpression,
    ExpressionWithTypeArguments,
    AsExpression,
    NonNullExpression,
    MetaProperty,

    // Elements
    TemplateSpan,
    SemicolonClassElement,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    CaseBlock,
    NamespaceExportDeclaration,
    ImportEqualsDeclaration,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportAssignment,
    ExportDeclaration,
    NamedExports,
    ExportSpecifier,
    MissingDeclaration,

    // Module references
    ExternalModuleReference,

    // JSX
    JsxElement,
    JsxSelfClosingElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxFragment,
    JsxOpeningFragment,
    JsxClosingFragment,
    JsxAttribute,
    JsxAttributes,
    JsxSpreadAttribute,
    JsxExpression,

    // Clauses
    CaseClause,
    DefaultClause,
    HeritageClause,
    CatchClause,

    // Property assignments
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    // Enum
    EnumMember,

    // Top-level
    SourceFile,

    // Sentinel: number of kinds.
    Count,
}

// Range markers. These can't be enum variants because Rust doesn't allow
// duplicate discriminants.
impl SyntaxKind {
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_COMPOUND_ASSIGNMENT: SyntaxKind = SyntaxKind::PlusEqualsToken;
    pub const LAST_COMPOUND_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const LAST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_TYPE_NODE: SyntaxKind = SyntaxKind::TypePredicate;
    pub const LAST_TYPE_NODE: SyntaxKind = SyntaxKind::LiteralType;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_TOKEN: SyntaxKind = SyntaxKind::Unknown;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::SingleLineCommentTrivia;
    pub const LAST_TRIVIA_TOKEN: SyntaxKind = SyntaxKind::ConflictMarkerTrivia;
    pub const FIRST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const FIRST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const LAST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::TemplateTail;
    pub const FIRST_BINARY_OPERATOR: SyntaxKind = SyntaxKind::LessThanToken;
    pub const LAST_BINARY_OPERATOR: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_STATEMENT: SyntaxKind = SyntaxKind::VariableStatement;
    pub const LAST_STATEMENT: SyntaxKind = SyntaxKind::DebuggerStatement;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::QualifiedName;
}

#[inline]
fn in_range(kind: SyntaxKind, first: SyntaxKind, last: SyntaxKind) -> bool {
    let v = kind as u16;
    v >= first as u16 && v <= last as u16
}

impl SyntaxKind {
    /// Any keyword, reserved or contextual.
    #[inline]
    pub fn is_keyword(self) -> bool {
        in_range(self, Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Keywords that can never be used as identifiers.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        in_range(self, Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Reserved in strict mode only.
    #[inline]
    pub fn is_future_reserved_word(self) -> bool {
        in_range(self, Self::FIRST_FUTURE_RESERVED_WORD, Self::LAST_FUTURE_RESERVED_WORD)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        in_range(self, Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_CONTEXTUAL_KEYWORD)
    }

    /// `Identifier` or any keyword.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self == SyntaxKind::Identifier || self.is_keyword()
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        in_range(self, Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        in_range(self, Self::FIRST_LITERAL_TOKEN, Self::LAST_LITERAL_TOKEN)
    }

    /// No-substitution templates and the three template pieces.
    #[inline]
    pub fn is_template_literal(self) -> bool {
        in_range(self, Self::FIRST_TEMPLATE_TOKEN, Self::LAST_TEMPLATE_TOKEN)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        in_range(self, Self::FIRST_TRIVIA_TOKEN, Self::LAST_TRIVIA_TOKEN)
    }

    #[inline]
    pub fn is_token(self) -> bool {
        in_range(self, Self::FIRST_TOKEN, Self::LAST_TOKEN)
    }

    #[inline]
    pub fn is_node(self) -> bool {
        (self as u16) >= Self::FIRST_NODE as u16 && self != SyntaxKind::Count
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        in_range(self, Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        in_range(self, Self::FIRST_COMPOUND_ASSIGNMENT, Self::LAST_COMPOUND_ASSIGNMENT)
    }

    /// Keywords that may appear in a declaration's modifier list.
    #[inline]
    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Keywords that stand for a predefined type when used as a type node.
    #[inline]
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::NeverKeyword
        )
    }

    #[inline]
    pub fn is_type_node(self) -> bool {
        in_range(self, Self::FIRST_TYPE_NODE, Self::LAST_TYPE_NODE)
            || self.is_keyword_type()
            || self == SyntaxKind::ExpressionWithTypeArguments
    }

    /// Statement kinds, declarations that appear in statement position included.
    #[inline]
    pub fn is_statement_kind(self) -> bool {
        in_range(self, Self::FIRST_STATEMENT, Self::LAST_STATEMENT)
            || matches!(
                self,
                SyntaxKind::Block
                    | SyntaxKind::EmptyStatement
                    | SyntaxKind::FunctionDeclaration
                    | SyntaxKind::ClassDeclaration
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::TypeAliasDeclaration
                    | SyntaxKind::EnumDeclaration
                    | SyntaxKind::ModuleDeclaration
                    | SyntaxKind::ImportDeclaration
                    | SyntaxKind::ImportEqualsDeclaration
                    | SyntaxKind::ExportDeclaration
                    | SyntaxKind::ExportAssignment
                    | SyntaxKind::NamespaceExportDeclaration
                    | SyntaxKind::MissingDeclaration
            )
    }

    /// Kinds that introduce a named entity.
    #[inline]
    pub fn is_declaration_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::ArrowFunction
                | SyntaxKind::BindingElement
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::ClassExpression
                | SyntaxKind::Constructor
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::EnumMember
                | SyntaxKind::ExportSpecifier
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::GetAccessor
                | SyntaxKind::ImportClause
                | SyntaxKind::ImportEqualsDeclaration
                | SyntaxKind::ImportSpecifier
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::JsxAttribute
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::MethodSignature
                | SyntaxKind::ModuleDeclaration
                | SyntaxKind::NamespaceExportDeclaration
                | SyntaxKind::NamespaceImport
                | SyntaxKind::Parameter
                | SyntaxKind::PropertyAssignment
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::PropertySignature
                | SyntaxKind::SetAccessor
                | SyntaxKind::ShorthandPropertyAssignment
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::TypeParameter
                | SyntaxKind::VariableDeclaration
        )
    }

    /// Expressions that may appear on the left of `=` or as a call target.
    #[inline]
    pub fn is_left_hand_side_expression_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::PropertyAccessExpression
                | SyntaxKind::ElementAccessExpression
                | SyntaxKind::NewExpression
                | SyntaxKind::CallExpression
                | SyntaxKind::JsxElement
                | SyntaxKind::JsxSelfClosingElement
                | SyntaxKind::JsxFragment
                | SyntaxKind::TaggedTemplateExpression
                | SyntaxKind::ArrayLiteralExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::ObjectLiteralExpression
                | SyntaxKind::ClassExpression
                | SyntaxKind::FunctionExpression
                | SyntaxKind::Identifier
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::TemplateExpression
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::NonNullExpression
                | SyntaxKind::MetaProperty
        )
    }

    /// Unary, binary and other expression kinds on top of the left-hand-side ones.
    #[inline]
    pub fn is_expression_kind(self) -> bool {
        self.is_left_hand_side_expression_kind()
            || matches!(
                self,
                SyntaxKind::ConditionalExpression
                    | SyntaxKind::YieldExpression
                    | SyntaxKind::ArrowFunction
                    | SyntaxKind::BinaryExpression
                    | SyntaxKind::SpreadElement
                    | SyntaxKind::AsExpression
                    | SyntaxKind::OmittedExpression
                    | SyntaxKind::PrefixUnaryExpression
                    | SyntaxKind::PostfixUnaryExpression
                    | SyntaxKind::DeleteExpression
                    | SyntaxKind::TypeOfExpression
                    | SyntaxKind::VoidExpression
                    | SyntaxKind::AwaitExpression
                    | SyntaxKind::TypeAssertionExpression
            )
    }

    /// Source text of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Look up a keyword SyntaxKind from text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        // Every keyword is 2..=11 ASCII lowercase letters.
        let bytes = text.as_bytes();
        if bytes.len() < 2 || bytes.len() > 11 || !bytes[0].is_ascii_lowercase() {
            return None;
        }
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map(|(_, kind)| *kind)
    }

    /// Source text of a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::LessThanSlashToken => "</",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::AtToken => "@",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Fixed source text of a keyword or punctuation kind. Used to build
    /// "'{0}' expected." messages.
    pub fn token_text(self) -> Option<&'static str> {
        self.punctuation_text().or_else(|| self.keyword_text())
    }
}

static KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("bigint", SyntaxKind::BigIntKeyword),
    ("boolean", SyntaxKind::BooleanKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("constructor", SyntaxKind::ConstructorKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("declare", SyntaxKind::DeclareKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("global", SyntaxKind::GlobalKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("implements", SyntaxKind::ImplementsKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("infer", SyntaxKind::InferKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("keyof", SyntaxKind::KeyOfKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("module", SyntaxKind::ModuleKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("never", SyntaxKind::NeverKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("number", SyntaxKind::NumberKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("of", SyntaxKind::OfKeyword),
    ("package", SyntaxKind::PackageKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("readonly", SyntaxKind::ReadonlyKeyword),
    ("require", SyntaxKind::RequireKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("type", SyntaxKind::TypeKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("undefined", SyntaxKind::UndefinedKeyword),
    ("unique", SyntaxKind::UniqueKeyword),
    ("unknown", SyntaxKind::UnknownKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("yield", SyntaxKind::YieldKeyword),
];

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for (text, kind) in KEYWORDS {
            assert!(kind.is_keyword(), "{kind:?}");
            assert_eq!(SyntaxKind::from_keyword(text), Some(*kind));
            assert_eq!(kind.keyword_text(), Some(*text));
        }
        assert_eq!(
            KEYWORDS.len(),
            (SyntaxKind::LAST_KEYWORD as u16 - SyntaxKind::FIRST_KEYWORD as u16 + 1) as usize
        );
    }

    #[test]
    fn test_from_keyword_rejects_non_keywords() {
        assert_eq!(SyntaxKind::from_keyword("foo"), None);
        assert_eq!(SyntaxKind::from_keyword("Class"), None);
        assert_eq!(SyntaxKind::from_keyword(""), None);
    }

    #[test]
    fn test_range_predicates() {
        assert!(SyntaxKind::PlusEqualsToken.is_assignment_operator());
        assert!(SyntaxKind::PlusEqualsToken.is_compound_assignment());
        assert!(!SyntaxKind::EqualsToken.is_compound_assignment());
        assert!(SyntaxKind::TemplateMiddle.is_template_literal());
        assert!(!SyntaxKind::StringLiteral.is_template_literal());
        assert!(SyntaxKind::NewLineTrivia.is_trivia());
        assert!(SyntaxKind::WithKeyword.is_reserved_word());
        assert!(!SyntaxKind::TypeKeyword.is_reserved_word());
        assert!(SyntaxKind::TypeKeyword.is_contextual_keyword());
        assert!(SyntaxKind::MappedType.is_type_node());
        assert!(SyntaxKind::StringKeyword.is_type_node());
        assert!(SyntaxKind::IfStatement.is_statement_kind());
        assert!(SyntaxKind::ClassDeclaration.is_statement_kind());
        assert!(SyntaxKind::SourceFile.is_node());
        assert!(!SyntaxKind::Count.is_node());
        assert!(SyntaxKind::LetKeyword.is_future_reserved_word());
        assert!(!SyntaxKind::ClassKeyword.is_future_reserved_word());
        assert!(SyntaxKind::OpenBraceToken.is_punctuation());
        assert!(!SyntaxKind::Identifier.is_punctuation());
        assert!(SyntaxKind::OfKeyword.is_token());
        assert!(!SyntaxKind::QualifiedName.is_token());
    }

    #[test]
    fn test_token_text() {
        assert_eq!(SyntaxKind::CloseBraceToken.token_text(), Some("}"));
        assert_eq!(SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken.token_text(), Some(">>>="));
        assert_eq!(SyntaxKind::InstanceOfKeyword.token_text(), Some("instanceof"));
        assert_eq!(SyntaxKind::Identifier.token_text(), None);
    }
}
