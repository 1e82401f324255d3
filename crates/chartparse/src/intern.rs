//! String interning for grammar symbols.
//!
//! Every symbol that occurs in a grammar — non-terminals, terminals and the
//! literal input tokens they produce — is stored once and referred to by a
//! small `Copy` key. Symbol comparison during chart construction is O(1),
//! and edge deduplication hashes keys instead of string contents.
//!
//! An [`Interner`] is only needed while a grammar is being built; once the
//! grammar is finished it keeps a read-only [`InternerReader`], so a finished
//! grammar can be shared across threads.

use lasso::{Rodeo, RodeoReader, Spur};
use std::fmt;

/// An interned grammar symbol.
///
/// This is a lightweight handle to a string stored in the owning grammar's
/// interner. Keys are only meaningful together with the interner that created
/// them; resolving a symbol through a different grammar is a logic error.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Spur);

impl Symbol {
    pub(crate) const fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.0)
    }
}

/// A mutable string interner used while a grammar is under construction.
pub struct Interner {
    rodeo: Rodeo,
}

impl Interner {
    /// Create a new empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rodeo: Rodeo::new(),
        }
    }

    /// Intern a string, returning its key.
    ///
    /// If the string has already been interned, returns the existing key.
    pub fn intern(&mut self, s: &str) -> Symbol {
        Symbol(self.rodeo.get_or_intern(s))
    }

    /// Get the key for an already-interned string, if it exists.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.rodeo.get(s).map(Symbol)
    }

    /// Resolve an interned symbol to its text.
    #[must_use]
    pub fn resolve(&self, key: Symbol) -> &str {
        self.rodeo.resolve(&key.0)
    }

    /// Number of distinct interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Whether nothing has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }

    /// Freeze this interner into a read-only view.
    #[must_use]
    pub fn into_reader(self) -> InternerReader {
        InternerReader {
            reader: self.rodeo.into_reader(),
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen, read-only interner.
///
/// Supports lookup and resolution but no further interning. Unlike the
/// mutable [`Interner`] it is `Sync`, which is what lets a finished grammar
/// serve concurrent parses.
pub struct InternerReader {
    reader: RodeoReader,
}

impl InternerReader {
    /// Get the key for an interned string, if it exists.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.reader.get(s).map(Symbol)
    }

    /// Resolve an interned symbol to its text.
    #[must_use]
    pub fn resolve(&self, key: Symbol) -> &str {
        self.reader.resolve(&key.0)
    }

    /// Number of distinct interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reader.len()
    }

    /// Whether the interner is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_basic() {
        let mut interner = Interner::new();

        let key1 = interner.intern("NP");
        let key2 = interner.intern("NP");
        let key3 = interner.intern("VP");

        // Same string should produce same key
        assert_eq!(key1, key2);
        // Different strings should produce different keys
        assert_ne!(key1, key3);

        assert_eq!(interner.resolve(key1), "NP");
        assert_eq!(interner.resolve(key3), "VP");
    }

    #[test]
    fn get_without_interning() {
        let mut interner = Interner::new();

        assert!(interner.get("NP").is_none());
        let key = interner.intern("NP");
        assert_eq!(interner.get("NP"), Some(key));
    }

    #[test]
    fn len_ignores_duplicates() {
        let mut interner = Interner::new();

        assert!(interner.is_empty());
        interner.intern("a");
        interner.intern("b");
        interner.intern("a");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn reader_preserves_keys() {
        let mut interner = Interner::new();
        let key = interner.intern("Det");

        let reader = interner.into_reader();
        assert_eq!(reader.get("Det"), Some(key));
        assert_eq!(reader.resolve(key), "Det");
        assert!(reader.get("N").is_none());
        assert_eq!(reader.len(), 1);
    }
}
