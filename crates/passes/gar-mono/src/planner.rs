//! The Specialization Planner (spec.md §4.3, Steps A–D).
//!
//! Filters collected call sites (inconsistency detection, nil-sensitivity
//! filter, unresolved-generic filter), synthesizes specialized function
//! names, and clones function bodies with updated parameter types. Step E
//! (call-site rewriting) lives in `rewriter`.
#![allow(clippy::min_ident_chars, reason = "i is conventional for a position index")]

use crate::collector::CallSite;
use crate::type_adapter::{is_unresolved_generic, specialized_function_name, to_suffix};
use gar_hir::{BasicBlock, Function, Instruction, Param, Program, Terminator, Type, UnionDispatchInfo};
use gar_intern::{Interner, Symbol};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// A specialization key: the target function and the concrete types
/// (already stringified via the Type Adapter) it was keyed on.
pub(crate) type Key = (Symbol, Vec<String>);

/// One planned clone: its synthesized name and the concrete types used to
/// retype its parameters.
pub(crate) struct PlannedGroup {
    pub specialized_name: Symbol,
    pub concrete_types: Vec<Type>,
}

/// The result of Steps A–D: the set of clones to synthesize, keyed for
/// direct lookup, plus the union-dispatch descriptors built in Step C.
pub(crate) struct Plan {
    /// `(target, types-as-strings) -> planned clone`, in first-observed
    /// (registration) order — iterated in Step D to append clones
    /// deterministically.
    pub groups: IndexMap<Key, PlannedGroup>,
    /// `(target, original-types-as-strings) -> union-dispatch descriptor`.
    pub union_dispatch_table: IndexMap<Key, UnionDispatchInfo>,
}

/// Step A — builds the skip set: functions that must not be specialized at
/// all, for either of two independent reasons (A1, A2).
pub(crate) fn build_skip_set(program: &Program, sites: &[CallSite], interner: &Interner) -> FxHashSet<Symbol> {
    let mut skip = inconsistent_targets(sites, interner);
    skip.extend(nil_compared_functions(program, interner));
    skip
}

/// A1 — inconsistent-arity/type sites: a target with more than one
/// recorded non-union site where some position has more than one distinct
/// type string form is unspecializable (callers could not tell the clones
/// apart without a runtime test the user never asked for).
fn inconsistent_targets(sites: &[CallSite], interner: &Interner) -> FxHashSet<Symbol> {
    let mut by_target: IndexMap<Symbol, Vec<&CallSite>> = IndexMap::default();
    for site in sites.iter().filter(|site| !site.union_dispatch) {
        by_target.entry(site.target_name).or_default().push(site);
    }

    let mut skip = FxHashSet::default();
    for (target, group) in &by_target {
        if group.len() <= 1 {
            continue;
        }
        let max_arity = group.iter().map(|site| site.types.len()).max().unwrap_or(0);
        for position in 0..max_arity {
            let mut distinct: FxHashSet<String> = FxHashSet::default();
            for site in group {
                if let Some(ty) = site.types.get(position) {
                    distinct.insert(to_suffix(ty, interner));
                }
            }
            if distinct.len() > 1 {
                skip.insert(*target);
                break;
            }
        }
    }
    skip
}

/// A2 — nil-compared parameters: a function that ever compares a parameter
/// against `nil` (or calls `nil?` on any local — see spec.md §9 Open
/// Question 1) is never specialized, since a clone would change what
/// "nil" means for that parameter's position.
fn nil_compared_functions(program: &Program, interner: &Interner) -> FxHashSet<Symbol> {
    let eq = interner.intern("==");
    let nil_p = interner.intern("nil?");

    let mut skip = FxHashSet::default();
    for function in &program.functions {
        let param_names: FxHashSet<Symbol> = function.params.iter().map(|param| param.name).collect();
        if function_has_nil_comparison(function, &param_names, eq, nil_p) {
            skip.insert(function.name);
        }
    }
    skip
}

fn function_has_nil_comparison(function: &Function, params: &FxHashSet<Symbol>, eq: Symbol, nil_p: Symbol) -> bool {
    for block in &function.body {
        for instruction in &block.instructions {
            if instruction_has_nil_comparison(instruction, params, eq, nil_p) {
                return true;
            }
        }
        if let Some(terminator) = &block.terminator {
            let condition = match terminator {
                Terminator::Return(Some(instruction)) => Some(instruction),
                Terminator::Branch { condition, .. } => Some(condition),
                Terminator::Return(None) | Terminator::Goto(_) => None,
            };
            if let Some(instruction) = condition {
                if instruction_has_nil_comparison(instruction, params, eq, nil_p) {
                    return true;
                }
            }
        }
    }
    false
}

fn instruction_has_nil_comparison(instruction: &Instruction, params: &FxHashSet<Symbol>, eq: Symbol, nil_p: Symbol) -> bool {
    let Instruction::Call(call) = instruction else {
        return false;
    };

    let receiver_is_param_load = matches!(&*call.receiver, Instruction::LoadLocal { var, .. } if params.contains(var));
    let receiver_is_nil = call.receiver.is_nil_lit();
    let first_arg = call.args.first();
    let arg_is_nil = first_arg.is_some_and(Instruction::is_nil_lit);
    let arg_is_param_load = first_arg
        .is_some_and(|arg| matches!(arg, Instruction::LoadLocal { var, .. } if params.contains(var)));

    let is_eq_nil_check = call.method_name == eq && ((receiver_is_param_load && arg_is_nil) || (receiver_is_nil && arg_is_param_load));
    // Widening (spec.md §9 Open Question 1): `nil?` on *any* LoadLocal
    // receiver triggers the skip, not only ones bound to a parameter.
    let is_nil_p_check = call.method_name == nil_p && call.receiver.is_any_load_local();

    if is_eq_nil_check || is_nil_p_check {
        return true;
    }

    instruction_has_nil_comparison(&call.receiver, params, eq, nil_p)
        || call.args.iter().any(|arg| instruction_has_nil_comparison(arg, params, eq, nil_p))
}

/// Steps B–C — groups collected sites into clones to synthesize and
/// consolidates union sites into dispatch descriptors.
pub(crate) fn plan(program: &Program, sites: &[CallSite], skip: &FxHashSet<Symbol>, interner: &Interner) -> Plan {
    let _ = program; // Steps B/C operate purely on collected sites.
    let mut groups: IndexMap<Key, PlannedGroup> = IndexMap::new();
    // One contribution per (group membership, union-site) pair that survived
    // the Step B drop rules: the original (pre-expansion) key and types, the
    // union positions, and the concrete-type key of the clone it resolves to.
    let mut union_contributions: Vec<(Key, Vec<Type>, Vec<usize>, Vec<String>, Symbol)> = Vec::new();

    for site in sites {
        if skip.contains(&site.target_name) {
            continue;
        }
        if site.types.iter().any(|ty| matches!(ty, Type::Untyped)) {
            continue;
        }
        if site.types.iter().any(|ty| is_unresolved_generic(ty, interner)) {
            continue;
        }

        let suffixes: Vec<String> = site.types.iter().map(|ty| to_suffix(ty, interner)).collect();
        let key: Key = (site.target_name, suffixes.clone());

        let specialized_name = groups
            .entry(key.clone())
            .or_insert_with(|| PlannedGroup {
                specialized_name: interner.intern(&specialized_function_name(
                    &interner.resolve(site.target_name),
                    &suffixes,
                )),
                concrete_types: site.types.clone(),
            })
            .specialized_name;

        if site.union_dispatch {
            let Some(original_types) = site.original_types.clone() else {
                continue;
            };
            let union_positions: Vec<usize> = original_types
                .iter()
                .enumerate()
                .filter(|(_, ty)| matches!(ty, Type::Union { .. }))
                .map(|(i, _)| i)
                .collect();
            let original_key: Key = (
                site.target_name,
                original_types.iter().map(|ty| to_suffix(ty, interner)).collect(),
            );
            union_contributions.push((original_key, original_types, union_positions, suffixes, specialized_name));
        }
    }

    // Step C: consolidate union sites by (target, original_types-as-strings).
    let mut union_dispatch_table: IndexMap<Key, UnionDispatchInfo> = IndexMap::new();
    for (original_key, original_types, union_positions, concrete_suffixes, specialized_name) in union_contributions {
        let target = original_key.0;
        let entry = union_dispatch_table.entry(original_key).or_insert_with(|| UnionDispatchInfo {
            target,
            original_types,
            union_positions,
            specializations: IndexMap::new(),
        });
        entry.specializations.insert(concrete_suffixes, specialized_name);
    }

    Plan {
        groups,
        union_dispatch_table,
    }
}

/// Step D — synthesizes one specialized clone per planned group.
pub(crate) fn synthesize(program: &Program, plan: &Plan) -> Vec<Function> {
    let mut clones = Vec::with_capacity(plan.groups.len());
    for ((target, _), group) in &plan.groups {
        let Some(original) = program.find_function(*target) else {
            // Missing target function: skip this specialization silently
            // (spec.md §7).
            continue;
        };
        clones.push(clone_specialized(original, &group.specialized_name, &group.concrete_types));
    }
    clones
}

fn clone_specialized(original: &Function, specialized_name: &Symbol, concrete_types: &[Type]) -> Function {
    let params = original
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let ty = concrete_types.get(i).cloned().unwrap_or_else(|| param.ty.clone());
            Param { ty, ..param.clone() }
        })
        .collect();

    Function {
        name: *specialized_name,
        params,
        body: clone_body(&original.body),
        return_type: original.return_type.clone(),
        is_instance_method: original.is_instance_method,
        owner_class: original.owner_class,
    }
}

/// Deep-copies the function body. Every node here is owned (`Vec`, `Box`,
/// `String`), so a structural clone is already an independent copy — no
/// specialized clone's body can be reached by mutating the original's
/// (spec.md §3 invariant, §9 "Cyclic HIR references").
fn clone_body(body: &[BasicBlock]) -> Vec<BasicBlock> {
    body.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_sites_are_skipped() {
        let interner = Interner::new();
        let target_fn = interner.intern("pair");
        let first_param = interner.intern("first");
        let second_param = interner.intern("second");
        let integer = Type::class(interner.intern("Integer"));
        let string = Type::class(interner.intern("String"));

        let mut program = Program::new();
        let target = {
            let mut builder = program.builder(target_fn, interner.intern("entry"));
            builder
                .param(Param::positional(first_param, integer.clone()))
                .param(Param::positional(second_param, integer.clone()));
            builder.finish()
        };
        program.push_function(target);

        let sites = vec![
            CallSite {
                call_id: gar_hir::CallId(0),
                context_function: target_fn,
                target_name: target_fn,
                types: vec![integer.clone(), integer.clone()],
                union_dispatch: false,
                original_types: None,
            },
            CallSite {
                call_id: gar_hir::CallId(1),
                context_function: target_fn,
                target_name: target_fn,
                types: vec![string.clone(), string],
                union_dispatch: false,
                original_types: None,
            },
        ];

        let skip = build_skip_set(&program, &sites, &interner);
        assert!(skip.contains(&target_fn));
    }
}
