//! Shared traversal over HIR call instructions.
//!
//! Both the collector (read-only) and the rewriter (mutating) need to visit
//! every `Call` in a function's blocks, in declared order, recursing into a
//! call's own receiver/arguments first since those execute before the call
//! itself.

use gar_hir::{Call, Function, Instruction, Program, Terminator};

/// Visits every `Call` instruction reachable from `function`'s body, in
/// program order.
pub(crate) fn for_each_call<'hir>(function: &'hir Function, mut visit: impl FnMut(&'hir Call)) {
    for block in &function.body {
        for instruction in &block.instructions {
            walk_instruction(instruction, &mut visit);
        }
        if let Some(terminator) = &block.terminator {
            walk_terminator(terminator, &mut visit);
        }
    }
}

fn walk_instruction<'hir>(instruction: &'hir Instruction, visit: &mut impl FnMut(&'hir Call)) {
    if let Instruction::Call(call) = instruction {
        walk_instruction(&call.receiver, visit);
        for arg in &call.args {
            walk_instruction(arg, visit);
        }
        visit(call);
    }
}

fn walk_terminator<'hir>(terminator: &'hir Terminator, visit: &mut impl FnMut(&'hir Call)) {
    match terminator {
        Terminator::Return(Some(instruction)) => walk_instruction(instruction, visit),
        Terminator::Branch { condition, .. } => walk_instruction(condition, visit),
        Terminator::Return(None) | Terminator::Goto(_) => {}
    }
}

/// Visits every `Call` instruction in every function of `program`, allowing
/// mutation — used by the rewriter (spec.md §4.3 Step E) to attach
/// annotations.
pub(crate) fn for_each_call_in_program_mut(program: &mut Program, mut visit: impl FnMut(&mut Call)) {
    for function in &mut program.functions {
        for block in &mut function.body {
            for instruction in &mut block.instructions {
                walk_instruction_mut(instruction, &mut visit);
            }
            if let Some(terminator) = &mut block.terminator {
                walk_terminator_mut(terminator, &mut visit);
            }
        }
    }
}

fn walk_instruction_mut(instruction: &mut Instruction, visit: &mut impl FnMut(&mut Call)) {
    if let Instruction::Call(call) = instruction {
        walk_instruction_mut(&mut call.receiver, visit);
        for arg in &mut call.args {
            walk_instruction_mut(arg, visit);
        }
        visit(call);
    }
}

fn walk_terminator_mut(terminator: &mut Terminator, visit: &mut impl FnMut(&mut Call)) {
    match terminator {
        Terminator::Return(Some(instruction)) => walk_instruction_mut(instruction, visit),
        Terminator::Branch { condition, .. } => walk_instruction_mut(condition, visit),
        Terminator::Return(None) | Terminator::Goto(_) => {}
    }
}
