//! Flag types and handles shared by the scanner, parser and tree walkers.

use std::fmt;

bitflags::bitflags! {
    /// Flags stamped on a node when it is finished.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        const LET                           = 1 << 0;
        const CONST                         = 1 << 1;
        const NESTED_NAMESPACE              = 1 << 2;
        const NAMESPACE                     = 1 << 3;
        const GLOBAL_AUGMENTATION           = 1 << 4;
        const OPTIONAL_CHAIN                = 1 << 5;
        const EXPORT_CONTEXT                = 1 << 6;
        const DISALLOW_IN_CONTEXT           = 1 << 7;
        const YIELD_CONTEXT                 = 1 << 8;
        const DECORATOR_CONTEXT             = 1 << 9;
        const AWAIT_CONTEXT                 = 1 << 10;
        const DISALLOW_CONDITIONAL_TYPES_CONTEXT = 1 << 11;
        const THIS_NODE_HAS_ERROR           = 1 << 12;
        const JAVASCRIPT_FILE               = 1 << 13;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();

        /// Parser context bits that `finish_node` copies onto every node.
        const CONTEXT_FLAGS = Self::DISALLOW_IN_CONTEXT.bits()
            | Self::YIELD_CONTEXT.bits()
            | Self::DECORATOR_CONTEXT.bits()
            | Self::AWAIT_CONTEXT.bits()
            | Self::DISALLOW_CONDITIONAL_TYPES_CONTEXT.bits()
            | Self::JAVASCRIPT_FILE.bits();
    }
}

bitflags::bitflags! {
    /// Modifier keywords folded into one set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE              = 0;
        const EXPORT            = 1 << 0;
        const AMBIENT           = 1 << 1;
        const PUBLIC            = 1 << 2;
        const PRIVATE           = 1 << 3;
        const PROTECTED         = 1 << 4;
        const STATIC            = 1 << 5;
        const READONLY          = 1 << 6;
        const ABSTRACT          = 1 << 7;
        const ASYNC             = 1 << 8;
        const DEFAULT           = 1 << 9;
        const CONST             = 1 << 10;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits();
        const EXPORT_DEFAULT = Self::EXPORT.bits() | Self::DEFAULT.bits();
    }
}

impl ModifierFlags {
    /// The flag a modifier keyword contributes, or `NONE` for other kinds.
    pub fn from_modifier_kind(kind: crate::SyntaxKind) -> ModifierFlags {
        use crate::SyntaxKind;
        match kind {
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::ExportKeyword => ModifierFlags::EXPORT,
            SyntaxKind::DeclareKeyword => ModifierFlags::AMBIENT,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::DefaultKeyword => ModifierFlags::DEFAULT,
            SyntaxKind::AsyncKeyword => ModifierFlags::ASYNC,
            SyntaxKind::ReadonlyKeyword => ModifierFlags::READONLY,
            _ => ModifierFlags::NONE,
        }
    }
}

bitflags::bitflags! {
    /// Facts the scanner records about the current token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const PRECEDING_JSDOC_COMMENT           = 1 << 1;
        const UNTERMINATED                      = 1 << 2;
        const EXTENDED_UNICODE_ESCAPE           = 1 << 3;
        const SCIENTIFIC                        = 1 << 4;
        const OCTAL                             = 1 << 5;
        const HEX_SPECIFIER                     = 1 << 6;
        const BINARY_SPECIFIER                  = 1 << 7;
        const OCTAL_SPECIFIER                   = 1 << 8;
        const CONTAINS_SEPARATOR                = 1 << 9;
        const UNICODE_ESCAPE                    = 1 << 10;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

/// Index of a node in its file's [`AstArena`](crate::AstArena).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind;

    #[test]
    fn test_context_flags_exclude_error_bit() {
        assert!(!NodeFlags::CONTEXT_FLAGS.contains(NodeFlags::THIS_NODE_HAS_ERROR));
        assert!(NodeFlags::CONTEXT_FLAGS.contains(NodeFlags::JAVASCRIPT_FILE));
    }

    #[test]
    fn test_modifier_flags_from_kind() {
        assert_eq!(ModifierFlags::from_modifier_kind(SyntaxKind::DeclareKeyword), ModifierFlags::AMBIENT);
        assert_eq!(ModifierFlags::from_modifier_kind(SyntaxKind::Identifier), ModifierFlags::NONE);
        let every = [
            SyntaxKind::AbstractKeyword,
            SyntaxKind::AsyncKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::DeclareKeyword,
            SyntaxKind::DefaultKeyword,
            SyntaxKind::ExportKeyword,
            SyntaxKind::PublicKeyword,
            SyntaxKind::PrivateKeyword,
            SyntaxKind::ProtectedKeyword,
            SyntaxKind::ReadonlyKeyword,
            SyntaxKind::StaticKeyword,
        ];
        for kind in every {
            assert!(kind.is_modifier_kind());
            assert!(!ModifierFlags::from_modifier_kind(kind).is_empty());
        }
    }
}
