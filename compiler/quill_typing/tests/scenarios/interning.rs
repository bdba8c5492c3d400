//! Interning, addressing and member lookup.

use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;
use quill_ir::TypeDef;
use quill_types::{ConditionKind, SymbolStore};
use quill_typing::MemberReifier;

use crate::common::{placeholder, seq_of, setup, simple, url};

#[test]
fn arity_is_enforced() {
    let (mut cache, mut symbols) = setup();
    let err = cache
        .declare_parameterized_type(&mut symbols, &url("Seq"), &[simple("Int"), simple("String")])
        .unwrap_err();

    assert_eq!(err.kind, ConditionKind::IncompatibleType);
    assert_eq!(
        err.message,
        "wrong number of type parameters for prelude#Seq; expected 1 but found 2"
    );
}

#[test]
fn supertypes_are_addressed_first() {
    let (mut cache, mut symbols) = setup();
    let id = cache
        .declare_parameterized_type(&mut symbols, &url("Seq"), &[simple("Int")])
        .unwrap();
    let seq = cache.touch_type(&mut symbols, id);

    let int = cache.touch_type_def(&mut symbols, &simple("Int")).unwrap();
    let number = cache.touch_type_def(&mut symbols, &simple("Number")).unwrap();
    let any = cache.touch_type_def(&mut symbols, &simple("Any")).unwrap();
    assert!(any < number && number < int && int < seq);
    assert_eq!(cache.get_type_at(seq), Some(id));
    assert!(symbols.is_reachable(&url("Int")));

    // Touching is idempotent.
    assert_eq!(cache.touch_type(&mut symbols, id), seq);
}

#[test]
fn untouched_type_cannot_be_addressed() {
    let (mut cache, mut symbols) = setup();
    let err = cache
        .touch_type_def(&mut symbols, &seq_of(simple("Float")))
        .unwrap_err();
    assert_eq!(err.kind, ConditionKind::MissingType);
    assert_eq!(cache.take_diagnostics()[0].code, ErrorCode::E1001);
}

#[test]
fn member_of_generic_receiver() {
    let (mut cache, symbols) = setup();
    let receiver = seq_of(simple("Circle"));
    assert!(symbols.symbol_exists(&url("Seq")));

    let mut members = MemberReifier::for_receiver(&mut cache, &symbols, &receiver).unwrap();
    let head = members
        .reify_member("head", &placeholder(&url("Seq"), 0))
        .unwrap();
    let map = members
        .reify_member(
            "map",
            &TypeDef::concrete(url("Function1"), vec![simple("Any"), placeholder(&url("Seq"), 0)]),
        )
        .unwrap();

    assert_eq!(cache.type_def(head), &simple("Circle"));
    assert_eq!(
        cache.type_def(map),
        &TypeDef::concrete(url("Function1"), vec![simple("Any"), simple("Circle")])
    );
}
