//! HIR instructions, call annotations, and union-dispatch descriptors.

use crate::types::Type;
use gar_intern::Symbol;
use indexmap::IndexMap;

/// Identifies a `Call` instruction for the purposes of the planner's
/// "track processed call nodes by identity" rule (spec.md §4.3 Step E) and
/// for `specialized_name`'s round-trip lookups (spec.md §8 "Round-trip").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(pub u32);

/// A value-producing node in a function body.
///
/// HIR is tree-shaped rather than the flat SSA form of a MIR: a `Call`'s
/// receiver and arguments are themselves instructions, nested inline, which
/// is what lets the nil-comparison filter (spec.md §4.3.A2) pattern-match
/// directly on a call's own receiver/argument shape without an auxiliary
/// def-use index.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// A method call, `receiver.method_name(args...)`.
    Call(Call),
    /// Reads a local variable's current value.
    LoadLocal {
        /// The local being read.
        var: Symbol,
        /// The local's declared/inferred type.
        ty: Type,
    },
    /// The `nil` literal.
    NilLit,
    /// A reference to the enclosing instance (`self`).
    SelfRef {
        /// The instance's type.
        ty: Type,
    },
}

impl Instruction {
    /// Reads back the type attached to this instruction by the upstream
    /// TypeInfo oracle (spec.md §6.1(a)). `NilLit` needs no stored field —
    /// it is always `Type::Nil`.
    #[must_use]
    pub fn get_concrete_type(&self) -> Type {
        match self {
            Self::Call(call) => call.ty.clone(),
            Self::LoadLocal { ty, .. } | Self::SelfRef { ty } => ty.clone(),
            Self::NilLit => Type::Nil,
        }
    }

    /// True if this instruction is `LoadLocal` reading the given variable.
    #[must_use]
    pub fn is_load_of(&self, var: Symbol) -> bool {
        matches!(self, Self::LoadLocal { var: v, .. } if *v == var)
    }

    /// True if this instruction is any `LoadLocal`, regardless of which
    /// variable — used by the nil? widening described in spec.md §4.3.A2
    /// and §9 Open Question 1.
    #[must_use]
    pub fn is_any_load_local(&self) -> bool {
        matches!(self, Self::LoadLocal { .. })
    }

    /// True if this instruction is the `nil` literal.
    #[must_use]
    pub fn is_nil_lit(&self) -> bool {
        matches!(self, Self::NilLit)
    }
}

/// A method call instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Identity used for annotation tracking.
    pub id: CallId,
    /// The call's receiver expression.
    pub receiver: Box<Instruction>,
    /// The method being called.
    pub method_name: Symbol,
    /// Positional arguments, in call-site order.
    pub args: Vec<Instruction>,
    /// This call expression's own inferred/attached type.
    pub ty: Type,
    /// Populated by the Monomorphizer after `transform`; exactly one of
    /// `CallAnnotation`'s two variants is ever attached (spec.md §3).
    pub annotation: Option<CallAnnotation>,
}

/// The two mutually exclusive outcomes of specializing a call site.
#[derive(Debug, Clone, PartialEq)]
pub enum CallAnnotation {
    /// The call was rewritten to target a single specialized clone
    /// directly (spec.md §6.2 "Specialized target annotation").
    Specialized {
        /// The specialized function's name.
        target: Symbol,
    },
    /// The call's argument types involve a union; the back end must emit a
    /// type-discriminating switch (spec.md §6.2 "Union-dispatch
    /// descriptor").
    UnionDispatch(UnionDispatchInfo),
}

/// Metadata telling the back end how to choose among specialized clones at
/// run time for a call whose argument types are (partly) unions.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDispatchInfo {
    /// The original call target's name.
    pub target: Symbol,
    /// The per-position types the union was expanded from (spec.md §4.3
    /// Step C), before Cartesian expansion.
    pub original_types: Vec<Type>,
    /// Indices into `original_types` that are actually unions — the only
    /// positions the back end needs to test (spec.md §9 "Dispatch
    /// descriptor emission").
    pub union_positions: Vec<usize>,
    /// Maps a concrete-type-sequence (as its string suffixes, one per
    /// parameter position) to the specialized function that handles it.
    /// `IndexMap` preserves registration order so two runs over
    /// structurally equal input produce byte-identical iteration order
    /// (spec.md §5 determinism requirement).
    pub specializations: IndexMap<Vec<String>, Symbol>,
}
