//! String interning for HIR names.
//!
//! Every name the Monomorphizer touches — function names, parameter names,
//! class names, basic block labels — is an interned `Symbol` rather than an
//! owned `String`, so that specialization-key comparisons (spec.md's
//! `(function_name, concrete_type_strings)`) are pointer/integer comparisons
//! instead of string comparisons on the hot path.

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::sync::{Arc, Mutex};

/// Thread-safe string interner shared by every HIR entity in a program.
#[derive(Clone)]
pub struct Interner {
    inner: Arc<Mutex<ThreadedRodeo>>,
}

impl Interner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ThreadedRodeo::new())),
        }
    }

    /// Interns `s`, returning the existing symbol if already interned.
    pub fn intern(&self, s: &str) -> Symbol {
        self.inner.lock().unwrap().get_or_intern(s)
    }

    /// Resolves a symbol back to its owned string.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> String {
        self.inner.lock().unwrap().resolve(&sym).to_string()
    }

    /// Resolves a symbol, returning `None` if it was never interned by this
    /// interner.
    #[must_use]
    pub fn try_resolve(&self, sym: Symbol) -> Option<String> {
        self.inner.lock().unwrap().try_resolve(&sym).map(str::to_string)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Interner;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let interner = Interner::new();
        let first = interner.intern("identity");
        let second = interner.intern("identity");
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_strings_intern_to_distinct_symbols() {
        let interner = Interner::new();
        let first = interner.intern("identity");
        let second = interner.intern("other");
        assert_ne!(first, second);
        assert_eq!(interner.resolve(first), "identity");
        assert_eq!(interner.resolve(second), "other");
    }
}
