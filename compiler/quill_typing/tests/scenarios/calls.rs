//! Call-site reification end to end.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quill_diagnostic::ErrorCode;
use quill_ir::{Parameter, TemplateParameter, TypeDef};
use quill_types::ConditionKind;
use quill_typing::CallsiteReifier;

use crate::common::{declare_generic, placeholder, seq_of, setup, simple, union, url};

#[test]
fn identity_call() {
    let (mut cache, mut symbols) = setup();
    let id = declare_generic(
        &mut cache,
        &mut symbols,
        "id",
        vec![TemplateParameter::new(0, "T").extends(simple("Any"))],
    );
    let t = placeholder(&id, 0);
    let params = vec![Parameter::list(0, "x", t.clone())];

    // `id` itself has type Function1[T, T].
    let fn_type = cache
        .declare_function_type(&mut symbols, &t, &params, None)
        .unwrap();
    assert_eq!(
        cache.type_def(fn_type),
        &TypeDef::concrete(url("Function1"), vec![t.clone(), t.clone()])
    );

    let mut reifier = CallsiteReifier::for_template(&mut cache, &symbols, &id, params, None).unwrap();
    reifier.reify_next_argument(&simple("Int")).unwrap();
    let result = reifier.reify_result(&t).unwrap();
    assert_eq!(cache.type_def(result), &simple("Int"));

    // A second, non-generic call.
    let numbers = union(&[simple("Int"), simple("Float")]);
    let mut reifier = CallsiteReifier::new(
        &mut cache,
        &symbols,
        vec![Parameter::list(0, "n", numbers.clone())],
        None,
    );
    reifier.reify_next_argument(&numbers).unwrap();
    let result = reifier.reify_result(&numbers).unwrap();
    assert_eq!(cache.type_def(result), &numbers);
}

#[test]
fn bound_violation_reaches_diagnostics() {
    let (mut cache, mut symbols) = setup();
    let sum = declare_generic(
        &mut cache,
        &mut symbols,
        "sum",
        vec![TemplateParameter::new(0, "N").extends(simple("Number"))],
    );

    let mut reifier = CallsiteReifier::for_template(
        &mut cache,
        &symbols,
        &sum,
        vec![Parameter::list(0, "xs", seq_of(placeholder(&sum, 0)))],
        None,
    )
    .unwrap();
    let err = reifier
        .reify_next_argument(&seq_of(simple("String")))
        .unwrap_err();
    assert_eq!(err.kind, ConditionKind::IncompatibleType);

    let diagnostics = cache.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2001);
    assert_eq!(diagnostics[0].message, err.message);
    assert!(cache.diagnostics().is_empty());
}

#[test]
fn too_many_arguments() {
    let (mut cache, symbols) = setup();
    let mut reifier = CallsiteReifier::new(&mut cache, &symbols, Vec::new(), None);
    let err = reifier.reify_next_argument(&simple("Int")).unwrap_err();
    assert_eq!(err.message, "wrong number of arguments; expected 0 but found 1");
    assert_eq!(cache.take_diagnostics()[0].code, ErrorCode::E2003);
}

fn argument_type() -> impl Strategy<Value = TypeDef> {
    prop_oneof![
        Just(simple("Int")),
        Just(simple("Float")),
        Just(simple("String")),
        Just(simple("Circle")),
        Just(seq_of(simple("Int"))),
        Just(union(&[simple("Int"), simple("String")])),
    ]
}

proptest! {
    /// Assignable arguments for every parameter bind every placeholder.
    #[test]
    fn reification_is_total(args in prop::collection::vec(argument_type(), 1..=3)) {
        let (mut cache, mut symbols) = setup();
        let arity = u32::try_from(args.len()).unwrap();
        let f = declare_generic(
            &mut cache,
            &mut symbols,
            "f",
            (0..arity).map(|i| TemplateParameter::new(i, format!("T{i}"))).collect(),
        );
        let params: Vec<Parameter> = (0..arity)
            .map(|i| Parameter::list(i, format!("p{i}"), placeholder(&f, i)))
            .collect();
        let ret = TypeDef::concrete(
            url(&format!("Function{}", arity - 1)),
            (0..arity).map(|i| placeholder(&f, i)).collect(),
        );

        let mut reifier = CallsiteReifier::for_template(&mut cache, &symbols, &f, params, None).unwrap();
        for arg in &args {
            reifier.reify_next_argument(arg).unwrap();
        }
        prop_assert!(reifier.is_complete());
        for (i, arg) in args.iter().enumerate() {
            prop_assert_eq!(reifier.reified_placeholder(i), Some(arg));
        }
        let result = reifier.reify_result(&ret).unwrap();

        prop_assert_eq!(cache.type_def(result).type_arguments(), args.as_slice());
        for arg in &args {
            prop_assert!(cache.has_type(arg));
        }
    }
}
