//! Prelude shared by the scenario tests.

use std::sync::Once;

use quill_ir::{SymbolUrl, TemplateParameter, TypeDef, Variance};
use quill_types::{DeriveType, SymbolDecl, SymbolKind, SymbolTable, TypeCache};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

pub fn url(name: &str) -> SymbolUrl {
    SymbolUrl::new("prelude", name)
}

pub fn simple(name: &str) -> TypeDef {
    TypeDef::simple(url(name))
}

pub fn seq_of(arg: TypeDef) -> TypeDef {
    TypeDef::concrete(url("Seq"), vec![arg])
}

pub fn union(members: &[TypeDef]) -> TypeDef {
    TypeDef::union(members.iter().cloned()).unwrap()
}

fn class_of(parent: &str) -> SymbolDecl {
    SymbolDecl::new(SymbolKind::Class).extending(simple(parent))
}

/// Core classes, `Seq[T]` and `Function0` through `Function3`.
pub fn setup() -> (TypeCache, SymbolTable) {
    init_tracing();

    let mut symbols = SymbolTable::new();
    symbols.declare(url("Any"), SymbolDecl::new(SymbolKind::Class));
    symbols.declare(url("Number"), class_of("Any").with_derive(DeriveType::Sealed));
    symbols.declare(url("Int"), class_of("Number").with_derive(DeriveType::Final));
    symbols.declare(url("Float"), class_of("Number").with_derive(DeriveType::Final));
    symbols.declare(url("String"), class_of("Any"));
    symbols.declare(url("Shape"), class_of("Any").with_derive(DeriveType::Sealed));
    symbols.declare(url("Circle"), class_of("Shape"));
    symbols.declare(url("Square"), class_of("Shape"));
    symbols.declare(url("Seq"), class_of("Any").with_template(url("Seq")));
    for arity in 0..4 {
        let name = format!("Function{arity}");
        symbols.declare(
            url(&name),
            SymbolDecl::new(SymbolKind::Existential)
                .extending(simple("Any"))
                .with_template(url(&name)),
        );
    }

    let mut cache = TypeCache::new();
    cache
        .make_template(
            &mut symbols,
            url("Seq"),
            vec![TemplateParameter::new(0, "T").with_variance(Variance::Covariant)],
            None,
        )
        .unwrap();
    for arity in 0..4u32 {
        let mut params = vec![TemplateParameter::new(0, "R").with_variance(Variance::Covariant)];
        for i in 0..arity {
            params.push(
                TemplateParameter::new(i + 1, format!("P{i}"))
                    .with_variance(Variance::Contravariant),
            );
        }
        cache
            .make_template(&mut symbols, url(&format!("Function{arity}")), params, None)
            .unwrap();
    }
    (cache, symbols)
}

/// Declare a local generic callable `name` and register its template.
pub fn declare_generic(
    cache: &mut TypeCache,
    symbols: &mut SymbolTable,
    name: &str,
    parameters: Vec<TemplateParameter>,
) -> SymbolUrl {
    let template = SymbolUrl::local(name);
    symbols.declare(
        template.clone(),
        SymbolDecl::new(SymbolKind::Call).with_template(template.clone()),
    );
    cache
        .make_template(symbols, template.clone(), parameters, None)
        .unwrap();
    template
}

pub fn placeholder(template: &SymbolUrl, index: u32) -> TypeDef {
    TypeDef::placeholder(template.clone(), index, Vec::new())
}
