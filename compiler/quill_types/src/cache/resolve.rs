//! Validated construction of concrete, union and intersection types, and
//! receiver signatures.

use quill_ir::{BoundType, SymbolUrl, TypeDef};
use rustc_hash::FxHashSet;

use super::TypeCache;
use crate::{
    Condition, DeriveType, DisjointTypeSet, SymbolKind, SymbolStore, TypeHandleId, TypeResult,
    TypeSignature,
};

impl TypeCache {
    /// Intern `url[args]`.
    pub fn resolve_concrete(
        &mut self,
        symbols: &dyn SymbolStore,
        url: &SymbolUrl,
        args: &[TypeDef],
    ) -> TypeResult<TypeHandleId> {
        self.get_or_make_type(symbols, &TypeDef::concrete(url.clone(), args.to_vec()))
    }

    /// Symbol that stands for `member` when checking union disjointness.
    ///
    /// A concrete type stands for itself. A placeholder stands for the
    /// concrete type of its `extends` bound.
    pub fn effective_union_base(&self, member: &TypeDef) -> Option<SymbolUrl> {
        match member {
            TypeDef::Concrete { base, .. } => Some(base.clone()),
            TypeDef::Placeholder { .. } => {
                let parameter = self.template_parameter(member)?;
                if parameter.bound != BoundType::Extends {
                    return None;
                }
                parameter.bound_type.as_ref()?.concrete_url().cloned()
            }
            TypeDef::Union(_) | TypeDef::Intersection(_) | TypeDef::NoReturn => None,
        }
    }

    /// Intern the union of `members` after checking they can be combined.
    ///
    /// Each member's effective base must be a class, enum, existential,
    /// instance or struct, and no two effective bases may be related by
    /// inheritance.
    #[tracing::instrument(level = "trace", skip_all, fields(members = members.len()))]
    pub fn resolve_union(
        &mut self,
        symbols: &dyn SymbolStore,
        members: &[TypeDef],
    ) -> TypeResult<TypeHandleId> {
        if members.is_empty() {
            return Err(self.report(Condition::type_error(
                "union must have at least one member",
            )));
        }

        let mut disjoint = DisjointTypeSet::new(symbols);
        for member in members {
            let Some(base) = self.effective_union_base(member) else {
                return Err(self.report(Condition::type_error(format!(
                    "invalid union member {member}"
                ))));
            };
            match symbols.symbol_kind(&base) {
                Some(kind) if kind.is_union_member() => {}
                Some(kind) => {
                    return Err(self.report(Condition::type_error(format!(
                        "{kind} {base} cannot be a union member"
                    ))));
                }
                None => return Err(self.report(Condition::missing_symbol(&base))),
            }
            if let Err(condition) = disjoint.put_type(&base) {
                return Err(self.report(condition));
            }
        }

        let union = match TypeDef::union(members.iter().cloned()) {
            Ok(union) => union,
            Err(err) => return Err(self.report(Condition::type_error(err.to_string()))),
        };
        self.get_or_make_type(symbols, &union)
    }

    /// Intern the intersection of `members`.
    ///
    /// Every member must be a concrete sealed or final concept, each named
    /// once.
    #[tracing::instrument(level = "trace", skip_all, fields(members = members.len()))]
    pub fn resolve_intersection(
        &mut self,
        symbols: &dyn SymbolStore,
        members: &[TypeDef],
    ) -> TypeResult<TypeHandleId> {
        if members.is_empty() {
            return Err(self.report(Condition::type_error(
                "intersection must have at least one member",
            )));
        }

        let mut seen = FxHashSet::default();
        for member in members {
            let Some(base) = member.concrete_url() else {
                return Err(self.report(Condition::type_error(format!(
                    "invalid intersection member {member}"
                ))));
            };
            if !seen.insert(base.clone()) {
                return Err(self.report(Condition::type_error(format!(
                    "duplicate intersection member {base}"
                ))));
            }
            match symbols.symbol_kind(base) {
                Some(SymbolKind::Concept) => {}
                Some(kind) => {
                    return Err(self.report(Condition::type_error(format!(
                        "{kind} {base} cannot be an intersection member"
                    ))));
                }
                None => return Err(self.report(Condition::missing_symbol(base))),
            }
            if symbols.derive_type(base) == DeriveType::Any {
                return Err(self.report(Condition::type_error(format!(
                    "concept {base} must be sealed or final to be intersected"
                ))));
            }
        }

        let intersection = match TypeDef::intersection(members.iter().cloned()) {
            Ok(intersection) => intersection,
            Err(err) => return Err(self.report(Condition::type_error(err.to_string()))),
        };
        self.get_or_make_type(symbols, &intersection)
    }

    /// Type of the declaration `url` and its supertype chain, for use as a
    /// receiver. Marks the declaration reachable.
    pub fn resolve_signature(
        &mut self,
        symbols: &mut dyn SymbolStore,
        url: &SymbolUrl,
    ) -> TypeResult<TypeSignature> {
        match symbols.symbol_kind(url) {
            Some(kind) if kind.is_type() => {}
            Some(kind) => {
                return Err(self.report(Condition::type_error(format!(
                    "{kind} {url} does not declare a type"
                ))));
            }
            None => return Err(self.report(Condition::missing_symbol(url))),
        }

        let own_type = self.declared_type(&*symbols, url);
        let id = self.get_or_make_type(&*symbols, &own_type)?;
        symbols.mark_reachable(url);
        Ok(self.signature(id))
    }

    /// Type a declaration gives its own instances: the base applied to its
    /// template's placeholders.
    pub fn declared_type(&self, symbols: &dyn SymbolStore, url: &SymbolUrl) -> TypeDef {
        let placeholders = symbols
            .template(url)
            .and_then(|template| self.get_template(&template))
            .map(|template| template.placeholders().to_vec())
            .unwrap_or_default();
        TypeDef::concrete(url.clone(), placeholders)
    }

    /// Supertype chain of an interned type, following handle links.
    pub fn signature(&self, id: TypeHandleId) -> TypeSignature {
        let mut chain = vec![self.type_def(id).clone()];
        let mut current = self.handle(id).supertype();
        while let Some(next) = current {
            chain.push(self.type_def(next).clone());
            current = self.handle(next).supertype();
        }
        TypeSignature::from_chain(chain)
    }
}
