//! Binary operator precedence.

use tsfront_ast::syntax_kind::SyntaxKind;

/// Binary precedence levels from loosest to tightest. `Comma` is the
/// floor a full expression is parsed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OperatorPrecedence {
    Comma,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponentiation,
    /// Not a binary operator.
    Invalid,
}

impl OperatorPrecedence {
    /// The loosest level a binary expression can be parsed at.
    pub const LOWEST: OperatorPrecedence = OperatorPrecedence::Comma;

    #[inline]
    pub fn is_valid(self) -> bool {
        self != OperatorPrecedence::Invalid
    }
}

pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::Coalesce,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword
        | SyntaxKind::AsKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_levels_are_ordered() {
        let plus = get_binary_operator_precedence(SyntaxKind::PlusToken);
        let times = get_binary_operator_precedence(SyntaxKind::AsteriskToken);
        let power = get_binary_operator_precedence(SyntaxKind::AsteriskAsteriskToken);
        assert!(plus < times && times < power);
        assert!(
            get_binary_operator_precedence(SyntaxKind::QuestionQuestionToken)
                < get_binary_operator_precedence(SyntaxKind::BarBarToken)
        );
        assert!(get_binary_operator_precedence(SyntaxKind::BarBarToken) > OperatorPrecedence::LOWEST);
    }

    #[test]
    fn test_non_operators_are_invalid() {
        assert!(!get_binary_operator_precedence(SyntaxKind::EqualsToken).is_valid());
        assert!(!get_binary_operator_precedence(SyntaxKind::Identifier).is_valid());
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::AsKeyword),
            OperatorPrecedence::Relational
        );
    }
}
