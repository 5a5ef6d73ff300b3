//! The diagnostic message catalog.
//!
//! Codes and texts follow TypeScript's `diagnosticMessages.json` so output
//! lines up with what users of the language already know. The table is
//! constant data; [`lookup`] searches it by code.

use crate::{DiagnosticCategory, DiagnosticMessage};

macro_rules! catalog {
    ($($name:ident = ($code:expr, $category:ident, $text:expr);)*) => {
        $(
            pub const $name: DiagnosticMessage = DiagnosticMessage {
                code: $code,
                category: DiagnosticCategory::$category,
                message: $text,
            };
        )*

        /// Every message in the catalog, in declaration order.
        pub static ALL: &[DiagnosticMessage] = &[$($name),*];
    };
}

catalog! {
    // Scanner
    UNTERMINATED_STRING_LITERAL = (1002, Error, "Unterminated string literal.");
    ASTERISK_SLASH_EXPECTED = (1010, Error, "'*/' expected.");
    DIGIT_EXPECTED = (1124, Error, "Digit expected.");
    HEXADECIMAL_DIGIT_EXPECTED = (1125, Error, "Hexadecimal digit expected.");
    UNEXPECTED_END_OF_TEXT = (1126, Error, "Unexpected end of text.");
    INVALID_CHARACTER = (1127, Error, "Invalid character.");
    UNTERMINATED_TEMPLATE_LITERAL = (1160, Error, "Unterminated template literal.");
    UNTERMINATED_REGULAR_EXPRESSION_LITERAL = (1161, Error, "Unterminated regular expression literal.");
    BINARY_DIGIT_EXPECTED = (1177, Error, "Binary digit expected.");
    OCTAL_DIGIT_EXPECTED = (1178, Error, "Octal digit expected.");
    MERGE_CONFLICT_MARKER_ENCOUNTERED = (1185, Error, "Merge conflict marker encountered.");
    AN_EXTENDED_UNICODE_ESCAPE_VALUE_MUST_BE_BETWEEN_0X0_AND_0X10FFFF_INCLUSIVE = (1198, Error, "An extended Unicode escape value must be between 0x0 and 0x10FFFF inclusive.");
    UNTERMINATED_UNICODE_ESCAPE_SEQUENCE = (1199, Error, "Unterminated Unicode escape sequence.");
    AN_IDENTIFIER_OR_KEYWORD_CANNOT_IMMEDIATELY_FOLLOW_A_NUMERIC_LITERAL = (1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");

    // Parser: expected tokens
    IDENTIFIER_EXPECTED = (1003, Error, "Identifier expected.");
    _0_EXPECTED = (1005, Error, "'{0}' expected.");
    THE_PARSER_EXPECTED_TO_FIND_A_0_TO_MATCH_THE_1_TOKEN_HERE = (1007, Error, "The parser expected to find a '{0}' to match the '{1}' token here.");
    TRAILING_COMMA_NOT_ALLOWED = (1009, Error, "Trailing comma not allowed.");
    UNEXPECTED_TOKEN = (1012, Error, "Unexpected token.");
    SUPER_MUST_BE_FOLLOWED_BY_AN_ARGUMENT_LIST_OR_MEMBER_ACCESS = (1034, Error, "'super' must be followed by an argument list or member access.");
    UNEXPECTED_TOKEN_A_CONSTRUCTOR_METHOD_ACCESSOR_OR_PROPERTY_WAS_EXPECTED = (1068, Error, "Unexpected token. A constructor, method, accessor, or property was expected.");
    INVALID_REFERENCE_DIRECTIVE_SYNTAX = (1084, Error, "Invalid 'reference' directive syntax.");
    TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY = (1099, Error, "Type argument list cannot be empty.");
    EXPRESSION_EXPECTED = (1109, Error, "Expression expected.");
    TYPE_EXPECTED = (1110, Error, "Type expected.");
    DECLARATION_OR_STATEMENT_EXPECTED = (1128, Error, "Declaration or statement expected.");
    STATEMENT_EXPECTED = (1129, Error, "Statement expected.");
    CASE_OR_DEFAULT_EXPECTED = (1130, Error, "'case' or 'default' expected.");
    PROPERTY_OR_SIGNATURE_EXPECTED = (1131, Error, "Property or signature expected.");
    ENUM_MEMBER_EXPECTED = (1132, Error, "Enum member expected.");
    VARIABLE_DECLARATION_EXPECTED = (1134, Error, "Variable declaration expected.");
    ARGUMENT_EXPRESSION_EXPECTED = (1135, Error, "Argument expression expected.");
    PROPERTY_ASSIGNMENT_EXPECTED = (1136, Error, "Property assignment expected.");
    EXPRESSION_OR_COMMA_EXPECTED = (1137, Error, "Expression or comma expected.");
    PARAMETER_DECLARATION_EXPECTED = (1138, Error, "Parameter declaration expected.");
    TYPE_PARAMETER_DECLARATION_EXPECTED = (1139, Error, "Type parameter declaration expected.");
    TYPE_ARGUMENT_EXPECTED = (1140, Error, "Type argument expected.");
    LINE_BREAK_NOT_PERMITTED_HERE = (1142, Error, "Line break not permitted here.");
    OR_EXPECTED = (1144, Error, "'{' or ';' expected.");
    DECLARATION_EXPECTED = (1146, Error, "Declaration expected.");
    PROPERTY_DESTRUCTURING_PATTERN_EXPECTED = (1180, Error, "Property destructuring pattern expected.");
    ARRAY_ELEMENT_DESTRUCTURING_PATTERN_EXPECTED = (1181, Error, "Array element destructuring pattern expected.");
    _0_TAG_ALREADY_SPECIFIED = (1223, Error, "'{0}' tag already specified.");
    AN_AMD_MODULE_CANNOT_HAVE_MULTIPLE_NAME_ASSIGNMENTS = (2458, Error, "An AMD module cannot have multiple name assignments.");

    // Parser: JSX and operator restrictions
    JSX_EXPRESSIONS_MUST_HAVE_ONE_PARENT_ELEMENT = (2657, Error, "JSX expressions must have one parent element.");
    EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0 = (17002, Error, "Expected corresponding JSX closing tag for '{0}'.");
    AN_UNARY_EXPRESSION_WITH_THE_0_OPERATOR_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION = (17006, Error, "An unary expression with the '{0}' operator is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");
    A_TYPE_ASSERTION_EXPRESSION_IS_NOT_ALLOWED_IN_THE_LEFT_HAND_SIDE_OF_AN_EXPONENTIATION_EXPRESSION = (17007, Error, "A type assertion expression is not allowed in the left-hand side of an exponentiation expression. Consider enclosing the expression in parentheses.");
    JSX_ELEMENT_0_HAS_NO_CORRESPONDING_CLOSING_TAG = (17008, Error, "JSX element '{0}' has no corresponding closing tag.");
    JSX_FRAGMENT_HAS_NO_CORRESPONDING_CLOSING_TAG = (17014, Error, "JSX fragment has no corresponding closing tag.");
    EXPECTED_CORRESPONDING_CLOSING_TAG_FOR_JSX_FRAGMENT = (17015, Error, "Expected corresponding closing tag for JSX fragment.");
}

/// Find a catalog entry by its numeric code.
pub fn lookup(code: u32) -> Option<&'static DiagnosticMessage> {
    ALL.iter().find(|m| m.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_code() {
        assert_eq!(lookup(1110), Some(&TYPE_EXPECTED));
        assert_eq!(lookup(17002).map(|m| m.message), Some(EXPECTED_CORRESPONDING_JSX_CLOSING_TAG_FOR_0.message));
        assert!(lookup(9999).is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<u32> = ALL.iter().map(|m| m.code).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }
}
