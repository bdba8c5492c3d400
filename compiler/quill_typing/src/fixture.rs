//! Shared symbols for unit tests.
//!
//! ```text
//! Any
//! ├── Number (sealed) ── Int (final, Equals + Hash), Float (final)
//! ├── String
//! ├── Shape (sealed) ── Circle, Square
//! ├── Color (enum)
//! ├── Seq[T]
//! └── Pair[A, B]
//! Equals, Hash (sealed concepts), Iterable (open concept)
//! ```

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use quill_ir::{SymbolUrl, TemplateParameter, TypeDef};
use quill_types::{DeriveType, SymbolDecl, SymbolKind, SymbolTable, TypeCache};

pub(crate) fn url(name: &str) -> SymbolUrl {
    SymbolUrl::new("prelude", name)
}

pub(crate) fn simple(name: &str) -> TypeDef {
    TypeDef::simple(url(name))
}

pub(crate) fn seq_of(arg: TypeDef) -> TypeDef {
    TypeDef::concrete(url("Seq"), vec![arg])
}

pub(crate) fn pair_of(a: TypeDef, b: TypeDef) -> TypeDef {
    TypeDef::concrete(url("Pair"), vec![a, b])
}

pub(crate) fn union(members: &[TypeDef]) -> TypeDef {
    TypeDef::union(members.iter().cloned()).unwrap()
}

pub(crate) fn placeholder(template: &SymbolUrl, index: u32) -> TypeDef {
    TypeDef::placeholder(template.clone(), index, vec![])
}

fn class_of(parent: &str) -> SymbolDecl {
    SymbolDecl::new(SymbolKind::Class).extending(simple(parent))
}

pub(crate) fn prelude() -> SymbolTable {
    let mut table = SymbolTable::new();
    table.declare(url("Any"), SymbolDecl::new(SymbolKind::Class));
    table.declare(url("Number"), class_of("Any").with_derive(DeriveType::Sealed));
    table.declare(
        url("Int"),
        class_of("Number")
            .with_derive(DeriveType::Final)
            .implementing(url("Equals"))
            .implementing(url("Hash")),
    );
    table.declare(url("Float"), class_of("Number").with_derive(DeriveType::Final));
    table.declare(url("String"), class_of("Any").implementing(url("Equals")));
    table.declare(url("Shape"), class_of("Any").with_derive(DeriveType::Sealed));
    table.declare(url("Circle"), class_of("Shape"));
    table.declare(url("Square"), class_of("Shape"));
    table.declare(
        url("Color"),
        SymbolDecl::new(SymbolKind::Enum).extending(simple("Any")),
    );
    table.declare(url("Seq"), class_of("Any").with_template(url("Seq")));
    table.declare(url("Pair"), class_of("Any").with_template(url("Pair")));
    for concept in ["Equals", "Hash"] {
        table.declare(
            url(concept),
            SymbolDecl::new(SymbolKind::Concept).with_derive(DeriveType::Sealed),
        );
    }
    table.declare(url("Iterable"), SymbolDecl::new(SymbolKind::Concept));
    table
}

/// Prelude symbols with the `Seq` and `Pair` templates registered.
pub(crate) fn setup() -> (TypeCache, SymbolTable) {
    let mut symbols = prelude();
    let mut cache = TypeCache::new();
    cache
        .make_template(
            &mut symbols,
            url("Seq"),
            vec![TemplateParameter::new(0, "T")],
            None,
        )
        .unwrap();
    cache
        .make_template(
            &mut symbols,
            url("Pair"),
            vec![TemplateParameter::new(0, "A"), TemplateParameter::new(1, "B")],
            None,
        )
        .unwrap();
    (cache, symbols)
}

/// Register a generic callable `name` and return its template url.
pub(crate) fn generic(
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
