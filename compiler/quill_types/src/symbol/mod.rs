//! Symbol store seam.
//!
//! The type cache needs a handful of facts about declarations: whether they
//! exist, what kind they are, their declared supertype, their derive policy
//! and their template. It also reports which declarations became reachable
//! while touching types. [`SymbolStore`] is that contract.

use std::fmt;

use quill_ir::{SymbolUrl, TypeDef};
use rustc_hash::{FxHashMap, FxHashSet};

/// What a declaration is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Action,
    Binding,
    Call,
    Class,
    Concept,
    Enum,
    Existential,
    Field,
    Instance,
    Namespace,
    Static,
    Struct,
}

impl SymbolKind {
    /// Declares a type that values can have.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Concept
                | SymbolKind::Enum
                | SymbolKind::Existential
                | SymbolKind::Instance
                | SymbolKind::Struct
        )
    }

    /// May be the effective base of a union member.
    pub fn is_union_member(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Enum
                | SymbolKind::Existential
                | SymbolKind::Instance
                | SymbolKind::Struct
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolKind::Action => "action",
            SymbolKind::Binding => "binding",
            SymbolKind::Call => "call",
            SymbolKind::Class => "class",
            SymbolKind::Concept => "concept",
            SymbolKind::Enum => "enum",
            SymbolKind::Existential => "existential",
            SymbolKind::Field => "field",
            SymbolKind::Instance => "instance",
            SymbolKind::Namespace => "namespace",
            SymbolKind::Static => "static",
            SymbolKind::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// Which declarations may extend a type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeriveType {
    /// Anyone.
    #[default]
    Any,
    /// No one.
    Final,
    /// Only declarations in the same module.
    Sealed,
}

/// Read access to declarations, plus the reachability signal.
pub trait SymbolStore {
    fn symbol_exists(&self, url: &SymbolUrl) -> bool;

    fn symbol_kind(&self, url: &SymbolUrl) -> Option<SymbolKind>;

    /// The type `url` directly extends, if any.
    fn declared_supertype(&self, url: &SymbolUrl) -> Option<TypeDef>;

    fn derive_type(&self, url: &SymbolUrl) -> DeriveType;

    /// Url of the template registered for a generic declaration.
    fn template(&self, url: &SymbolUrl) -> Option<SymbolUrl>;

    /// Whether `url` declares an implementation of `concept`.
    fn implements(&self, url: &SymbolUrl, concept: &SymbolUrl) -> bool;

    /// Called when a type built on `url` is assigned an address.
    fn mark_reachable(&mut self, url: &SymbolUrl);
}

/// One declaration in a [`SymbolTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolDecl {
    pub kind: SymbolKind,
    pub supertype: Option<TypeDef>,
    pub derive: DeriveType,
    pub template: Option<SymbolUrl>,
    pub impls: Vec<SymbolUrl>,
}

impl SymbolDecl {
    pub fn new(kind: SymbolKind) -> Self {
        SymbolDecl {
            kind,
            supertype: None,
            derive: DeriveType::Any,
            template: None,
            impls: Vec::new(),
        }
    }

    #[must_use]
    pub fn extending(mut self, supertype: TypeDef) -> Self {
        self.supertype = Some(supertype);
        self
    }

    #[must_use]
    pub fn with_derive(mut self, derive: DeriveType) -> Self {
        self.derive = derive;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: SymbolUrl) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub fn implementing(mut self, concept: SymbolUrl) -> Self {
        self.impls.push(concept);
        self
    }
}

/// In-memory [`SymbolStore`].
///
/// Records reachable symbols in the order they were first marked.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    decls: FxHashMap<SymbolUrl, SymbolDecl>,
    reachable: Vec<SymbolUrl>,
    reachable_set: FxHashSet<SymbolUrl>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a declaration. Returns the replaced one.
    pub fn declare(&mut self, url: SymbolUrl, decl: SymbolDecl) -> Option<SymbolDecl> {
        self.decls.insert(url, decl)
    }

    pub fn get(&self, url: &SymbolUrl) -> Option<&SymbolDecl> {
        self.decls.get(url)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn is_reachable(&self, url: &SymbolUrl) -> bool {
        self.reachable_set.contains(url)
    }

    /// Reachable symbols in marking order.
    pub fn reachable(&self) -> &[SymbolUrl] {
        &self.reachable
    }
}

impl SymbolStore for SymbolTable {
    fn symbol_exists(&self, url: &SymbolUrl) -> bool {
        self.decls.contains_key(url)
    }

    fn symbol_kind(&self, url: &SymbolUrl) -> Option<SymbolKind> {
        self.decls.get(url).map(|d| d.kind)
    }

    fn declared_supertype(&self, url: &SymbolUrl) -> Option<TypeDef> {
        self.decls.get(url).and_then(|d| d.supertype.clone())
    }

    fn derive_type(&self, url: &SymbolUrl) -> DeriveType {
        self.decls.get(url).map_or(DeriveType::Any, |d| d.derive)
    }

    fn template(&self, url: &SymbolUrl) -> Option<SymbolUrl> {
        self.decls.get(url).and_then(|d| d.template.clone())
    }

    fn implements(&self, url: &SymbolUrl, concept: &SymbolUrl) -> bool {
        self.decls
            .get(url)
            .is_some_and(|d| d.impls.iter().any(|c| c == concept))
    }

    fn mark_reachable(&mut self, url: &SymbolUrl) {
        if self.reachable_set.insert(url.clone()) {
            self.reachable.push(url.clone());
        }
    }
}
