//! Token-level predicates that need no parser state.

use tsfront_ast::syntax_kind::SyntaxKind;

/// Tokens that always begin a left-hand-side expression. `import` and
/// identifier-like keywords need look-ahead and are handled by the parser.
pub fn is_left_hand_side_expression_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TemplateHead
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::NewKeyword
            | SyntaxKind::SlashToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::Identifier
    )
}

/// Prefix operators and keyword operators that start a unary expression.
pub fn is_unary_operator_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
    )
}

/// Keywords that unambiguously start a statement.
pub fn is_statement_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AtToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword
    )
}

/// Modifiers that only make sense on class members; seeing one means a
/// member starts here.
pub fn is_class_member_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::ReadonlyKeyword
    )
}

#[inline]
pub fn is_in_or_of_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::InKeyword || kind == SyntaxKind::OfKeyword
}

#[inline]
pub fn is_heritage_clause_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::ExtendsKeyword || kind == SyntaxKind::ImplementsKeyword
}

/// Kinds that take a `/** ... */` comment as documentation.
pub fn can_have_jsdoc(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Parameter
            | SyntaxKind::TypeParameter
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunction
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::ClassExpression
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::TypeAliasDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::EnumMember
            | SyntaxKind::ModuleDeclaration
            | SyntaxKind::VariableStatement
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::LabeledStatement
            | SyntaxKind::PropertyDeclaration
            | SyntaxKind::PropertySignature
            | SyntaxKind::PropertyAssignment
            | SyntaxKind::ShorthandPropertyAssignment
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::MethodSignature
            | SyntaxKind::Constructor
            | SyntaxKind::GetAccessor
            | SyntaxKind::SetAccessor
            | SyntaxKind::CallSignature
            | SyntaxKind::ConstructSignature
            | SyntaxKind::IndexSignature
            | SyntaxKind::ImportEqualsDeclaration
            | SyntaxKind::ExportAssignment
            | SyntaxKind::ExportDeclaration
    )
}

/// Kinds whose documentation may also trail the opening token on the same
/// line, as in `function (/** @type {number} */ a) {}`.
pub fn takes_trailing_jsdoc(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Parameter
            | SyntaxKind::TypeParameter
            | SyntaxKind::FunctionExpression
            | SyntaxKind::ArrowFunction
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_starts() {
        assert!(is_statement_keyword(SyntaxKind::IfKeyword));
        assert!(is_statement_keyword(SyntaxKind::CatchKeyword));
        assert!(!is_statement_keyword(SyntaxKind::Identifier));
        assert!(is_left_hand_side_expression_start(SyntaxKind::TemplateHead));
        assert!(!is_left_hand_side_expression_start(SyntaxKind::PlusToken));
        assert!(is_unary_operator_start(SyntaxKind::TypeOfKeyword));
    }

    #[test]
    fn test_jsdoc_kinds() {
        assert!(can_have_jsdoc(SyntaxKind::FunctionDeclaration));
        assert!(!can_have_jsdoc(SyntaxKind::Identifier));
        assert!(takes_trailing_jsdoc(SyntaxKind::Parameter));
        assert!(!takes_trailing_jsdoc(SyntaxKind::ClassDeclaration));
    }
}
