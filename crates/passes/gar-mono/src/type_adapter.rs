//! The Type Adapter (spec.md §4.1).
//!
//! Classifies types as concrete, polymorphic, union, or unresolved generic
//! parameter; produces a stable textual key; yields expansion members for
//! unions.
#![allow(clippy::min_ident_chars, reason = "s/c are conventional for a single-character scan")]

use gar_hir::Type;
use gar_intern::Interner;

/// Reserved generic parameter names — single-letter or short identifiers
/// conventionally used for unresolved type parameters in RBS signatures.
/// A `ClassInstance` whose name is one of these is never specialized on,
/// regardless of how many distinct concrete types are observed at call
/// sites for that position.
pub const RESERVED_GENERICS: [&str; 14] = [
    "Elem", "K", "V", "U", "T", "S", "R", "E", "A", "B", "C", "D", "N", "M",
];

/// True when `ty` is absent type information the Monomorphizer cannot
/// specialize on: `Untyped` or an unsolved `TypeVar`.
#[must_use]
pub fn is_polymorphic(ty: &Type) -> bool {
    matches!(ty, Type::Untyped | Type::TypeVar { .. })
}

/// True when `ty` is a sum type.
#[must_use]
pub fn is_union(ty: &Type) -> bool {
    matches!(ty, Type::Union { .. })
}

/// True when `ty` is a `ClassInstance` whose name is a reserved generic
/// parameter name, e.g. the `Elem` in `Array[Elem]` before monomorphization
/// resolves it.
#[must_use]
pub fn is_unresolved_generic(ty: &Type, interner: &Interner) -> bool {
    match ty {
        Type::ClassInstance { name, .. } => {
            let resolved = interner.resolve(*name);
            RESERVED_GENERICS.contains(&resolved.as_str())
        }
        _ => false,
    }
}

/// Produces the stable identifier fragment for `ty` used both to group call
/// sites by "types-as-strings" (spec.md §4.3 Step B) and to synthesize
/// specialized function names (spec.md §4.1).
#[must_use]
pub fn to_suffix(ty: &Type, interner: &Interner) -> String {
    match ty {
        Type::ClassInstance { name, .. } => {
            let resolved = interner.resolve(*name);
            if RESERVED_GENERICS.contains(&resolved.as_str()) {
                "Any".to_string()
            } else {
                sanitize(&resolved)
            }
        }
        Type::Nil => "Nil".to_string(),
        Type::Bool => "Bool".to_string(),
        other => sanitize(&format!("{other:?}")),
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Builds a specialized function name from an original name and its
/// per-position type suffixes: `"{original}_{s1}_{s2}_..._{sN}"`.
#[must_use]
pub fn specialized_function_name(original: &str, suffixes: &[String]) -> String {
    let mut name = original.to_string();
    for suffix in suffixes {
        name.push('_');
        name.push_str(suffix);
    }
    name
}

/// Cartesian product over union positions: for `[T0, T1, ...]`, yields every
/// sequence obtainable by replacing each `Union{m1,...,mk}` position with
/// exactly one of its members, in left-to-right position order, preserving
/// each union's own member order. Non-union positions pass through
/// unchanged in every produced sequence.
#[must_use]
pub fn expand(types: &[Type]) -> Vec<Vec<Type>> {
    let mut sequences = vec![Vec::with_capacity(types.len())];
    for ty in types {
        let options: Vec<&Type> = match ty {
            Type::Union { members } => members.iter().collect(),
            other => vec![other],
        };
        let mut next = Vec::with_capacity(sequences.len() * options.len());
        for sequence in &sequences {
            for option in &options {
                let mut extended = sequence.clone();
                extended.push((*option).clone());
                next.push(extended);
            }
        }
        sequences = next;
    }
    sequences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_is_cartesian_product_in_position_order() {
        let interner = Interner::new();
        let integer = Type::class(interner.intern("Integer"));
        let string = Type::class(interner.intern("String"));
        let bool_sym = Type::Bool;

        let types = vec![Type::union(vec![integer.clone(), string.clone()]), bool_sym.clone()];
        let expanded = expand(&types);

        assert_eq!(
            expanded,
            vec![
                vec![integer, bool_sym.clone()],
                vec![string, bool_sym],
            ]
        );
    }

    #[test]
    fn non_union_positions_pass_through() {
        let interner = Interner::new();
        let integer = Type::class(interner.intern("Integer"));
        let expanded = expand(std::slice::from_ref(&integer));
        assert_eq!(expanded, vec![vec![integer]]);
    }

    #[test]
    fn reserved_generic_suffix_is_any() {
        let interner = Interner::new();
        let elem = Type::class(interner.intern("Elem"));
        assert_eq!(to_suffix(&elem, &interner), "Any");
        assert!(is_unresolved_generic(&elem, &interner));
    }

    #[test]
    fn ordinary_class_suffix_is_its_name() {
        let interner = Interner::new();
        let integer = Type::class(interner.intern("Integer"));
        assert_eq!(to_suffix(&integer, &interner), "Integer");
        assert!(!is_unresolved_generic(&integer, &interner));
    }

    #[test]
    fn specialized_name_joins_with_underscores() {
        let name = specialized_function_name("identity", &["Integer".to_string()]);
        assert_eq!(name, "identity_Integer");
    }
}
