//! The Monomorphizer — the core middle-end pass of this workspace
//! (spec.md).
//!
//! Given a typed HIR `Program`, this crate produces type-specialized clones
//! of polymorphic functions and rewritten call sites that either point
//! directly at a clone or carry a runtime-dispatch descriptor. See
//! `type_adapter`, `collector`, `planner`, and `rewriter` for the three
//! cooperating components (spec.md §2).
//!
//! All state is created in [`analyze`], applied in [`transform`], then
//! discarded — the Monomorphizer is single-threaded, synchronous, and
//! performs exactly one pass per program (spec.md §5).

mod collector;
mod planner;
mod rewriter;
pub mod type_adapter;
mod walk;

use gar_hir::{CallAnnotation, CallId, Function, Program, Type};
use gar_intern::{Interner, Symbol};
use indexmap::IndexMap;

/// The outcome of analyzing a program: the clones to append and the
/// annotations to attach, plus the lookup table backing
/// [`AnalysisResult::specialized_name`] (spec.md §6.3).
pub struct AnalysisResult {
    new_functions: Vec<Function>,
    call_annotations: IndexMap<CallId, CallAnnotation>,
    specialized_names: IndexMap<(Symbol, Vec<String>), Symbol>,
}

impl AnalysisResult {
    /// Looks up the specialized clone's name for `target` called with
    /// `concrete_types`, using the same key the planner used (spec.md
    /// §6.3). Returns `None` if no clone was planned for that key — either
    /// because it was never observed, or because it was dropped in Step B
    /// (inconsistent types, unresolved generic, skip-listed target, or an
    /// untyped argument).
    #[must_use]
    pub fn specialized_name(&self, target: Symbol, concrete_types: &[Type], interner: &Interner) -> Option<Symbol> {
        let key = (
            target,
            concrete_types.iter().map(|ty| type_adapter::to_suffix(ty, interner)).collect(),
        );
        self.specialized_names.get(&key).copied()
    }
}

/// Analyzes `program` without mutating it: runs the collector (spec.md
/// §4.2) and the planner (spec.md §4.3 Steps A–D), producing the clones and
/// call annotations that [`transform`] will apply.
#[must_use]
pub fn analyze(program: &Program, interner: &Interner) -> AnalysisResult {
    let sites = collector::collect(program);
    let skip = planner::build_skip_set(program, &sites, interner);
    let plan = planner::plan(program, &sites, &skip, interner);
    let new_functions = planner::synthesize(program, &plan);
    let call_annotations = rewriter::rewrite(&sites, &plan, interner);

    let specialized_names = plan
        .groups
        .iter()
        .map(|(key, group)| (key.clone(), group.specialized_name))
        .collect();

    AnalysisResult {
        new_functions,
        call_annotations,
        specialized_names,
    }
}

/// Applies a previously computed [`AnalysisResult`] to `program`: appends
/// the specialized clones (in registration order) and attaches each
/// call's annotation.
///
/// Clones are literal deep copies of their originals, so a clone's own
/// internal calls carry the same `CallId`s as the original body's —
/// walking the whole post-append program and matching by `CallId`
/// therefore annotates a clone's internal calls identically to how the
/// original function's calls were annotated, consistent with spec.md §9's
/// note that instruction-level type rewriting is deliberately omitted.
pub fn transform(program: &mut Program, analysis: &AnalysisResult) {
    for function in &analysis.new_functions {
        program.push_function(function.clone());
    }
    walk::for_each_call_in_program_mut(program, |call| {
        if let Some(annotation) = analysis.call_annotations.get(&call.id) {
            call.annotation = Some(annotation.clone());
        }
    });
}

/// Convenience entry point running both phases in sequence, for callers
/// that don't need to inspect the `AnalysisResult` afterward. Callers that
/// need the §6.3 query surface once `transform` has run should call
/// [`analyze`] and [`transform`] directly and keep the `AnalysisResult`
/// alive.
pub fn monomorphize(program: &mut Program, interner: &Interner) {
    let analysis = analyze(program, interner);
    transform(program, &analysis);
}
