//! The Call-Site Collector (spec.md §4.2).
//!
//! Walks all HIR functions; for each intra-instance call to a local
//! function, captures the pair `(target, concrete-argument-types)` and
//! records whether expansion from union types produced it.
#![allow(clippy::min_ident_chars, reason = "i is conventional for a position index")]

use crate::type_adapter::{expand, is_polymorphic, is_union};
use crate::walk::for_each_call;
use gar_hir::{Call, CallId, Instruction, Program, Type};
use gar_intern::Symbol;

/// One recorded call site, after the inclusion filter has accepted it.
#[derive(Debug, Clone)]
pub(crate) struct CallSite {
    /// Identity of the call node this entry was derived from.
    pub call_id: CallId,
    /// The function whose body contains the call (recorded for fidelity
    /// with spec.md §4.2's entry shape; not consulted by any filter).
    #[allow(dead_code, reason = "carried for parity with spec.md's recorded entry shape")]
    pub context_function: Symbol,
    /// The name of the local function being called.
    pub target_name: Symbol,
    /// This entry's concrete types (one expansion member, for a union
    /// site; the call's own argument types, for a non-union site).
    pub types: Vec<Type>,
    /// True if this entry was produced by union expansion.
    pub union_dispatch: bool,
    /// The pre-expansion per-position types, present only when
    /// `union_dispatch` is true.
    pub original_types: Option<Vec<Type>>,
}

/// Collects call sites from every function in `program`.
pub(crate) fn collect(program: &Program) -> Vec<CallSite> {
    let mut sites = Vec::new();
    for function in &program.functions {
        for_each_call(function, |call| {
            collect_call(program, function.name, call, &mut sites);
        });
    }
    sites
}

fn collect_call(program: &Program, context_function: Symbol, call: &Call, sites: &mut Vec<CallSite>) {
    // Filter 1: cross-instance calls are left to the back end.
    if !matches!(&*call.receiver, Instruction::SelfRef { .. }) {
        return;
    }
    // Filter 2: local-function lookup only.
    let Some(target) = program.find_function(call.method_name) else {
        return;
    };
    // Filter 3: a target with no parameters is never specialized.
    if target.params.is_empty() {
        return;
    }
    // Filter 4: aggregating parameters make per-element specialization unsound.
    if target.has_aggregating_param() {
        return;
    }

    let param_types: Vec<Type> = target.params.iter().map(|param| param.ty.clone()).collect();
    let arg_types: Vec<Type> = call.args.iter().map(Instruction::get_concrete_type).collect();

    let has_union = param_types.iter().any(is_union) || arg_types.iter().any(is_union);

    if has_union {
        let types_to_expand = choose_types_to_expand(&param_types, &arg_types);
        for expanded in expand(&types_to_expand) {
            sites.push(CallSite {
                call_id: call.id,
                context_function,
                target_name: call.method_name,
                types: expanded,
                union_dispatch: true,
                original_types: Some(types_to_expand.clone()),
            });
        }
    } else if !arg_types.iter().any(is_polymorphic) {
        sites.push(CallSite {
            call_id: call.id,
            context_function,
            target_name: call.method_name,
            types: arg_types,
            union_dispatch: false,
            original_types: None,
        });
    }
    // else: an untyped argument in the non-union branch aborts the whole
    // site (spec.md §9 Open Question 3) — no entry is recorded.
}

/// Per spec.md §4.2's union branch: for each position, prefer the
/// parameter's declared type if it is a union, else the argument's
/// inferred type if it is a union, else the argument's type, else fall
/// back to the parameter's type (covers positions the call under-supplies,
/// e.g. a trailing default).
fn choose_types_to_expand(param_types: &[Type], arg_types: &[Type]) -> Vec<Type> {
    param_types
        .iter()
        .enumerate()
        .map(|(i, param_ty)| {
            let arg_ty = arg_types.get(i);
            if is_union(param_ty) {
                param_ty.clone()
            } else if arg_ty.is_some_and(is_union) {
                arg_ty.unwrap_or(param_ty).clone()
            } else if let Some(arg_ty) = arg_ty {
                arg_ty.clone()
            } else {
                param_ty.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gar_hir::Param;
    use gar_intern::Interner;

    fn program_with_sum(interner: &Interner) -> Program {
        let sum = interner.intern("sum");
        let xs = interner.intern("xs");
        let mut program = Program::new();
        let mut builder = program.builder(sum, interner.intern("entry"));
        builder.param(Param::rest(xs, Type::class(interner.intern("Integer"))));
        let function = builder.finish();
        program.push_function(function);
        program
    }

    #[test]
    fn rest_parameter_target_is_never_collected() {
        let interner = Interner::new();
        let mut program = program_with_sum(&interner);
        let sum = interner.intern("sum");

        let mut builder = program.builder(interner.intern("caller"), interner.intern("entry"));
        builder.is_instance_method(true);
        let integer = Type::class(interner.intern("Integer"));
        builder.push_call(
            Instruction::SelfRef { ty: Type::Untyped },
            sum,
            vec![
                Instruction::LoadLocal { var: interner.intern("first"), ty: integer.clone() },
                Instruction::LoadLocal { var: interner.intern("second"), ty: integer },
            ],
            Type::Untyped,
        );
        let function = builder.finish();
        program.push_function(function);

        let sites = collect(&program);
        assert!(sites.is_empty());
    }

    #[test]
    fn cross_instance_call_is_ignored() {
        let interner = Interner::new();
        let identity = interner.intern("identity");
        let param_name = interner.intern("value");
        let mut program = Program::new();
        let mut target_builder = program.builder(identity, interner.intern("entry"));
        target_builder.param(Param::positional(param_name, Type::Untyped));
        let target = target_builder.finish();
        program.push_function(target);

        let mut builder = program.builder(interner.intern("caller"), interner.intern("entry"));
        let other_obj = interner.intern("other");
        builder.push_call(
            Instruction::LoadLocal { var: other_obj, ty: Type::class(interner.intern("Foo")) },
            identity,
            vec![Instruction::NilLit],
            Type::Untyped,
        );
        let caller = builder.finish();
        program.push_function(caller);

        assert!(collect(&program).is_empty());
    }
}
