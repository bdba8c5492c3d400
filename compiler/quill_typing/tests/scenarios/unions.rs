//! Union construction and union-typed parameters.

use pretty_assertions::assert_eq;
use quill_ir::{Parameter, TemplateParameter};
use quill_types::ConditionKind;
use quill_typing::{compare_assignable, CallsiteReifier, TypeComparison};

use crate::common::{declare_generic, placeholder, setup, simple, union};

#[test]
fn related_members_are_rejected() {
    let (mut cache, symbols) = setup();

    let err = cache
        .resolve_union(&symbols, &[simple("Number"), simple("Int")])
        .unwrap_err();
    assert_eq!(err.kind, ConditionKind::TypeError);

    let id = cache
        .resolve_union(&symbols, &[simple("Int"), simple("String")])
        .unwrap();
    assert_eq!(cache.type_def(id), &union(&[simple("String"), simple("Int")]));
}

#[test]
fn bounded_placeholder_counts_as_its_bound() {
    let (mut cache, mut symbols) = setup();
    let f = declare_generic(
        &mut cache,
        &mut symbols,
        "f",
        vec![TemplateParameter::new(0, "N").extends(simple("Number"))],
    );

    let err = cache
        .resolve_union(&symbols, &[placeholder(&f, 0), simple("Float")])
        .unwrap_err();
    assert_eq!(err.kind, ConditionKind::TypeError);
    assert!(cache
        .resolve_union(&symbols, &[placeholder(&f, 0), simple("String")])
        .is_ok());
}

#[test]
fn sealed_parent_accepts_subclass() {
    let (mut cache, symbols) = setup();
    let shapes = union(&[simple("Shape")]);

    let mut reifier = CallsiteReifier::new(
        &mut cache,
        &symbols,
        vec![Parameter::list(0, "s", shapes.clone())],
        None,
    );
    reifier.reify_next_argument(&simple("Circle")).unwrap();
    assert_eq!(reifier.num_arguments(), 1);

    assert_eq!(
        compare_assignable(&cache, &symbols, &shapes, &simple("Square")).unwrap(),
        TypeComparison::Extends
    );
}

#[test]
fn union_argument_against_wider_union() {
    let (mut cache, symbols) = setup();
    let declared = union(&[simple("Number"), simple("String")]);
    let argument = union(&[simple("Int"), simple("String")]);

    let mut reifier = CallsiteReifier::new(
        &mut cache,
        &symbols,
        vec![Parameter::list(0, "v", declared.clone())],
        None,
    );
    reifier.reify_next_argument(&argument).unwrap();

    assert_eq!(
        compare_assignable(&cache, &symbols, &declared, &argument).unwrap(),
        TypeComparison::Extends
    );
    assert_eq!(
        compare_assignable(&cache, &symbols, &argument, &declared).unwrap(),
        TypeComparison::Disjoint
    );
}
