//! The six concrete scenarios from spec.md §8, built directly against
//! `gar_hir::Program::builder` and run through the full `analyze`/
//! `transform` pipeline.

use gar_hir::{CallAnnotation, Instruction, Param, Program, Type};
use gar_intern::Interner;
use integration_tests::{calls_in, find, function_names, has_function, nth_call_annotation};

#[test]
fn scenario_1_simple_specialization() {
    let interner = Interner::new();
    let identity = interner.intern("identity");

    let mut program = Program::new();
    let mut target = program.builder(identity, interner.intern("entry"));
    target.param(Param::positional(interner.intern("x"), Type::Untyped));
    let target = target.finish();
    program.push_function(target);

    let integer = Type::class(interner.intern("Integer"));
    let string = Type::class(interner.intern("String"));
    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.is_instance_method(true);
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        identity,
        vec![Instruction::LoadLocal { var: interner.intern("int_val"), ty: integer }],
        Type::Untyped,
    );
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        identity,
        vec![Instruction::LoadLocal { var: interner.intern("str_val"), ty: string }],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    let names = function_names(&program, &interner);
    assert_eq!(names.len(), 3);
    assert!(has_function(&program, &interner, "identity"));
    assert!(has_function(&program, &interner, "identity_Integer"));
    assert!(has_function(&program, &interner, "identity_String"));

    let run = find(&program, &interner, "run").expect("run function must survive transform");
    let calls = calls_in(&run);
    assert_eq!(calls.len(), 2);
    assert_eq!(
        nth_call_annotation(&run, 0),
        Some(CallAnnotation::Specialized { target: interner.intern("identity_Integer") })
    );
    assert_eq!(
        nth_call_annotation(&run, 1),
        Some(CallAnnotation::Specialized { target: interner.intern("identity_String") })
    );
}

#[test]
fn scenario_2_union_expansion() {
    let interner = Interner::new();
    let target_fn = interner.intern("f");
    let integer = Type::class(interner.intern("Integer"));
    let string = Type::class(interner.intern("String"));
    let union_ty = Type::union(vec![integer.clone(), string.clone()]);

    let mut program = Program::new();
    let mut target = program.builder(target_fn, interner.intern("entry"));
    target.param(Param::positional(interner.intern("x"), union_ty.clone()));
    let target = target.finish();
    program.push_function(target);

    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![Instruction::LoadLocal { var: interner.intern("v"), ty: union_ty }],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    assert!(has_function(&program, &interner, "f_Integer"));
    assert!(has_function(&program, &interner, "f_String"));

    let run = find(&program, &interner, "run").expect("run function must survive transform");
    let Some(CallAnnotation::UnionDispatch(info)) = nth_call_annotation(&run, 0) else {
        panic!("expected a union-dispatch annotation");
    };
    assert_eq!(info.union_positions, vec![0]);
    assert_eq!(
        info.specializations.get(&vec!["Integer".to_string()]),
        Some(&interner.intern("f_Integer"))
    );
    assert_eq!(
        info.specializations.get(&vec!["String".to_string()]),
        Some(&interner.intern("f_String"))
    );
}

#[test]
fn scenario_3_nil_comparison_skip() {
    let interner = Interner::new();
    let target_fn = interner.intern("g");
    let param_name = interner.intern("x");
    let eq = interner.intern("==");

    let mut program = Program::new();
    let mut target = program.builder(target_fn, interner.intern("entry"));
    target.param(Param::positional(param_name, Type::Untyped));
    target.push_call(
        Instruction::LoadLocal { var: param_name, ty: Type::Untyped },
        eq,
        vec![Instruction::NilLit],
        Type::Bool,
    );
    let target = target.finish();
    program.push_function(target);

    let integer = Type::class(interner.intern("Integer"));
    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![Instruction::LoadLocal { var: interner.intern("int_val"), ty: integer }],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    assert!(!has_function(&program, &interner, "g_Integer"));
    let run = find(&program, &interner, "run").expect("run function must survive transform");
    assert_eq!(nth_call_annotation(&run, 0), None);
}

#[test]
fn scenario_4_inconsistent_sites() {
    let interner = Interner::new();
    let target_fn = interner.intern("h");
    let integer = Type::class(interner.intern("Integer"));
    let string = Type::class(interner.intern("String"));

    let mut program = Program::new();
    let mut target = program.builder(target_fn, interner.intern("entry"));
    target
        .param(Param::positional(interner.intern("a_param"), Type::Untyped))
        .param(Param::positional(interner.intern("b_param"), Type::Untyped));
    let target = target.finish();
    program.push_function(target);

    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![
            Instruction::LoadLocal { var: interner.intern("one"), ty: integer.clone() },
            Instruction::LoadLocal { var: interner.intern("two"), ty: integer },
        ],
        Type::Untyped,
    );
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![
            Instruction::LoadLocal { var: interner.intern("ex"), ty: string.clone() },
            Instruction::LoadLocal { var: interner.intern("why"), ty: string },
        ],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    assert!(!has_function(&program, &interner, "h_Integer_Integer"));
    assert!(!has_function(&program, &interner, "h_String_String"));
    let run = find(&program, &interner, "run").expect("run function must survive transform");
    assert_eq!(nth_call_annotation(&run, 0), None);
    assert_eq!(nth_call_annotation(&run, 1), None);
}

#[test]
fn scenario_5_generic_parameter_suppression() {
    let interner = Interner::new();
    let target_fn = interner.intern("map");
    let elem = Type::class(interner.intern("Elem"));

    let mut program = Program::new();
    let mut target = program.builder(target_fn, interner.intern("entry"));
    target.param(Param::positional(interner.intern("x"), elem.clone()));
    let target = target.finish();
    program.push_function(target);

    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![Instruction::LoadLocal { var: interner.intern("v"), ty: elem }],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    assert_eq!(function_names(&program, &interner).len(), 2);
    let run = find(&program, &interner, "run").expect("run function must survive transform");
    assert_eq!(nth_call_annotation(&run, 0), None);
}

#[test]
fn scenario_6_rest_parameter_skip() {
    let interner = Interner::new();
    let target_fn = interner.intern("sum");
    let integer = Type::class(interner.intern("Integer"));

    let mut program = Program::new();
    let mut target = program.builder(target_fn, interner.intern("entry"));
    target.param(Param::rest(interner.intern("xs"), integer.clone()));
    let target = target.finish();
    program.push_function(target);

    let mut caller = program.builder(interner.intern("run"), interner.intern("entry"));
    caller.push_call(
        Instruction::SelfRef { ty: Type::Untyped },
        target_fn,
        vec![
            Instruction::LoadLocal { var: interner.intern("one"), ty: integer.clone() },
            Instruction::LoadLocal { var: interner.intern("two"), ty: integer.clone() },
            Instruction::LoadLocal { var: interner.intern("three"), ty: integer },
        ],
        Type::Untyped,
    );
    let caller = caller.finish();
    program.push_function(caller);

    let analysis = gar_mono::analyze(&program, &interner);
    gar_mono::transform(&mut program, &analysis);

    assert_eq!(function_names(&program, &interner).len(), 2);
    let run = find(&program, &interner, "run").expect("run function must survive transform");
    assert_eq!(nth_call_annotation(&run, 0), None);
}
