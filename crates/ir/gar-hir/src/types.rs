//! The `Type` data model produced by the upstream TypeInfo oracle (type
//! inference plus user-supplied RBS union signatures).
//!
//! The Monomorphizer never constructs these values itself — it only reads
//! them off HIR instructions — but it owns the shape, per spec.md §3.

use gar_intern::Symbol;

/// A type as reported by type inference / RBS ingestion.
///
/// `Union` uses a `Vec` rather than a `HashSet`: spec.md §3 requires
/// order-insensitive equality but deterministic iteration order, and the
/// only operation the Monomorphizer performs on a union is iterating its
/// members in construction order (`expand`, spec.md §4.1) — never an
/// equality check between two unions — so preserving insertion order and
/// never re-sorting is sufficient and cheaper than a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A nominal class, e.g. `Integer` or `Array[Integer]`.
    ClassInstance {
        /// The class name.
        name: Symbol,
        /// Type arguments, if the class is generic.
        args: Option<Vec<Type>>,
    },
    /// The `nil` singleton type.
    Nil,
    /// The `bool` singleton type (`true`/`false`).
    Bool,
    /// A sum of two or more member types.
    Union {
        /// Member types, in declaration order.
        members: Vec<Type>,
    },
    /// Type inference gave up on this position.
    Untyped,
    /// A free inference variable that was never solved.
    TypeVar {
        /// Inference-internal variable id.
        id: u32,
    },
}

impl Type {
    /// Convenience constructor for a non-generic class instance.
    #[must_use]
    pub fn class(name: Symbol) -> Self {
        Self::ClassInstance { name, args: None }
    }

    /// Convenience constructor for a union of the given members.
    #[must_use]
    pub fn union(members: Vec<Type>) -> Self {
        Self::Union { members }
    }
}
