//! Pairwise-disjointness check for union members.

use quill_ir::SymbolUrl;
use rustc_hash::FxHashSet;

use crate::{Condition, SymbolStore, TypeResult};

/// Base symbols admitted so far in one union, each with its ancestors.
///
/// Lives for a single union validation.
pub struct DisjointTypeSet<'s> {
    symbols: &'s dyn SymbolStore,
    admitted: Vec<(SymbolUrl, FxHashSet<SymbolUrl>)>,
}

impl<'s> DisjointTypeSet<'s> {
    pub fn new(symbols: &'s dyn SymbolStore) -> Self {
        DisjointTypeSet {
            symbols,
            admitted: Vec::new(),
        }
    }

    /// Admit `candidate` unless it equals, extends, or is extended by a member.
    pub fn put_type(&mut self, candidate: &SymbolUrl) -> TypeResult<()> {
        let ancestors = self.ancestors(candidate);
        for (member, member_ancestors) in &self.admitted {
            if member == candidate {
                return Err(Condition::type_error(format!(
                    "duplicate union member {candidate}"
                )));
            }
            if ancestors.contains(member) || member_ancestors.contains(candidate) {
                return Err(Condition::type_error(format!(
                    "union member {candidate} overlaps with {member}"
                )));
            }
        }
        self.admitted.push((candidate.clone(), ancestors));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    fn ancestors(&self, url: &SymbolUrl) -> FxHashSet<SymbolUrl> {
        let mut ancestors = FxHashSet::default();
        let mut current = self
            .symbols
            .declared_supertype(url)
            .and_then(|t| t.concrete_url().cloned());
        while let Some(next) = current {
            if next == *url || !ancestors.insert(next.clone()) {
                break;
            }
            current = self
                .symbols
                .declared_supertype(&next)
                .and_then(|t| t.concrete_url().cloned());
        }
        ancestors
    }
}
