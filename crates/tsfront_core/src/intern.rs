//! Identifier interning.
//!
//! Every identifier the parser produces is interned once per file, so
//! identifier nodes carry a 4-byte handle instead of their own string.

use lasso::{Rodeo, Spur};
use std::fmt;

/// An interned string handle. Comparing two handles is an integer
/// comparison; resolving one needs the table that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Per-file identifier table.
///
/// Owned by a single parser; one table never outlives or crosses into
/// another file's parse.
#[derive(Default)]
pub struct IdentifierTable {
    rodeo: Rodeo,
}

impl IdentifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the existing handle if already present.
    #[inline]
    pub fn intern(&mut self, s: &str) -> InternedString {
        InternedString(self.rodeo.get_or_intern(s))
    }

    /// Look up an already-interned string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    /// All distinct strings, in first-interned order.
    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.rodeo.strings()
    }
}

impl fmt::Debug for IdentifierTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierTable")
            .field("len", &self.len())
            .finish()
    }
}
