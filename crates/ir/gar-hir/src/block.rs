//! Basic blocks and terminators.

use crate::instruction::Instruction;
use gar_intern::Symbol;

/// How control flow exits a basic block.
///
/// Spec.md §3 treats the terminator as opaque to the Monomorphizer beyond
/// "optional terminator" — it is deep-copied verbatim into every
/// specialized clone (spec.md §4.3 Step D) and its instruction contents are
/// never rewritten. The planner's nil-comparison filter (spec.md §4.3.A2)
/// does read a `Return`/`Branch` terminator's condition, since a parameter
/// compared with `nil` there must skip the function just as it would
/// inside an ordinary instruction (spec.md §8 invariant 6, "compared with
/// nil *anywhere* in F").
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Returns from the function, optionally with a value.
    Return(Option<Instruction>),
    /// Unconditionally jumps to the named block.
    Goto(Symbol),
    /// Jumps to one of two blocks depending on `condition`.
    Branch {
        /// The branch condition.
        condition: Instruction,
        /// Block to jump to when `condition` is truthy.
        if_true: Symbol,
        /// Block to jump to otherwise.
        if_false: Symbol,
    },
}

/// An ordered sequence of instructions ending in an optional terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    /// The block's label, unique within its function.
    pub label: Symbol,
    /// Instructions, in execution order.
    pub instructions: Vec<Instruction>,
    /// How this block's control flow exits, if determined.
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    /// Creates an empty block with the given label.
    #[must_use]
    pub fn new(label: Symbol) -> Self {
        Self {
            label,
            instructions: Vec::new(),
            terminator: None,
        }
    }
}
