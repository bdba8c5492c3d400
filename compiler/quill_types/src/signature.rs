//! Supertype chains.

use quill_ir::{SymbolUrl, TypeDef};
use rustc_hash::FxHashSet;

use crate::SymbolStore;

/// A type followed by its supertypes, nearest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSignature {
    chain: Vec<TypeDef>,
}

impl TypeSignature {
    pub(crate) fn from_chain(chain: Vec<TypeDef>) -> Self {
        TypeSignature { chain }
    }

    /// Walk declared supertypes through the symbol store.
    ///
    /// Stops at the first non-concrete link or at a repeated symbol.
    pub fn from_store(symbols: &dyn SymbolStore, type_def: &TypeDef) -> Self {
        let mut chain = vec![type_def.clone()];
        let mut seen = FxHashSet::default();
        let mut current = type_def.concrete_url().cloned();
        while let Some(url) = current {
            if !seen.insert(url.clone()) {
                break;
            }
            current = match symbols.declared_supertype(&url) {
                Some(supertype) => {
                    let next = supertype.concrete_url().cloned();
                    chain.push(supertype);
                    next
                }
                None => None,
            };
        }
        TypeSignature { chain }
    }

    /// The type itself.
    pub fn type_def(&self) -> &TypeDef {
        &self.chain[0]
    }

    pub fn chain(&self) -> &[TypeDef] {
        &self.chain
    }

    /// Supertypes only, nearest first.
    pub fn supertypes(&self) -> &[TypeDef] {
        &self.chain[1..]
    }

    /// Nearest supertype built on `base`.
    pub fn ancestor_with_base(&self, base: &SymbolUrl) -> Option<&TypeDef> {
        self.supertypes()
            .iter()
            .find(|t| t.concrete_url() == Some(base))
    }
}
