//! The whole HIR program, mutated in place by the Monomorphizer.

use crate::builder::FunctionBuilder;
use crate::call::CallIdAllocator;
use crate::function::Function;
use gar_intern::Symbol;

/// An ordered sequence of functions.
///
/// `transform` (in `gar-mono`) only ever appends to `functions` and
/// attaches annotations to existing `Call` nodes — it never removes or
/// reorders an original function (spec.md §8 invariant 1, "Additivity").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// All functions currently in the program, in declaration/registration
    /// order.
    pub functions: Vec<Function>,
    /// Allocates `CallId`s for every function built into this program via
    /// [`Program::builder`]. Owned here, not per-function, so that ids are
    /// unique across the whole program rather than merely within one
    /// function — see `CallIdAllocator`'s own doc comment for why that
    /// matters to `gar_mono::transform`.
    call_ids: CallIdAllocator,
}

impl Program {
    /// An empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a function by name (spec.md §4.2 rule 2: "local-function
    /// lookup only"). Returns the first match — name uniqueness among
    /// original functions and synthesized specialization names together is
    /// an invariant the planner maintains (spec.md §8 invariant 2).
    #[must_use]
    pub fn find_function(&self, name: Symbol) -> Option<&Function> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// Appends a new function to the program.
    pub fn push_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    /// Starts building a new function whose `CallId`s are drawn from this
    /// program's own allocator, keeping them unique across every function
    /// in the program. Callers push the finished function back with
    /// [`Program::push_function`].
    pub fn builder(&mut self, name: Symbol, entry_label: Symbol) -> FunctionBuilder<'_> {
        FunctionBuilder::new(name, entry_label, &mut self.call_ids)
    }
}
