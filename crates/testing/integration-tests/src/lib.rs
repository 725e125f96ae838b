//! Shared helpers for assembling small HIR programs and reading back the
//! Monomorphizer's output in the integration tests under `tests/`.

use gar_hir::{Call, CallAnnotation, Function, Instruction, Program};

/// Finds a function by its resolved name.
#[must_use]
pub fn find(program: &Program, interner: &gar_intern::Interner, name: &str) -> Option<Function> {
    let target = interner.intern(name);
    program.find_function(target).cloned()
}

/// True if a function with the given resolved name exists in `program`.
#[must_use]
pub fn has_function(program: &Program, interner: &gar_intern::Interner, name: &str) -> bool {
    find(program, interner, name).is_some()
}

/// Collects every `Call` instruction directly present in a function's
/// blocks (non-recursive — sufficient for the flat call sites these tests
/// build).
#[must_use]
pub fn calls_in(function: &Function) -> Vec<&Call> {
    function
        .body
        .iter()
        .flat_map(|block| &block.instructions)
        .filter_map(|instruction| match instruction {
            Instruction::Call(call) => Some(call),
            Instruction::LoadLocal { .. } | Instruction::NilLit | Instruction::SelfRef { .. } => None,
        })
        .collect()
}

/// The annotation attached to the `index`th call instruction in `function`,
/// if any.
#[must_use]
pub fn nth_call_annotation(function: &Function, index: usize) -> Option<CallAnnotation> {
    calls_in(function).get(index).and_then(|call| call.annotation.clone())
}

/// All function names currently in `program`, resolved to owned strings.
#[must_use]
pub fn function_names(program: &Program, interner: &gar_intern::Interner) -> Vec<String> {
    program
        .functions
        .iter()
        .map(|function| interner.resolve(function.name))
        .collect()
}
