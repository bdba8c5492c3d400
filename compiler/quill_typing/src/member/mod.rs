//! Member types of a known receiver.
//!
//! Given `xs: Seq[Int]`, a field declared as `head: T` on `Seq[T]` has type
//! `Int` on `xs`. The receiver's type arguments bind the owner's
//! placeholders positionally.

use quill_ir::{SymbolUrl, TypeDef};
use quill_types::{invariant, Condition, SymbolStore, TypeCache, TypeHandleId, TypeResult};
use rustc_hash::FxHashMap;

use crate::compare::check_bound;
use crate::subst::{substitute, SubstError};

/// Substitutes one receiver's type arguments into its members' types.
pub struct MemberReifier<'a> {
    cache: &'a mut TypeCache,
    symbols: &'a dyn SymbolStore,
    template: Option<SymbolUrl>,
    bindings: Vec<Option<TypeDef>>,
    reified: FxHashMap<String, TypeHandleId>,
}

impl<'a> MemberReifier<'a> {
    /// Reifier for the members of `receiver`.
    ///
    /// A placeholder receiver stands for its `extends` bound.
    pub fn for_receiver(
        cache: &'a mut TypeCache,
        symbols: &'a dyn SymbolStore,
        receiver: &TypeDef,
    ) -> TypeResult<Self> {
        let receiver = match receiver {
            TypeDef::Concrete { .. } => receiver.clone(),
            TypeDef::Placeholder { .. } => match cache
                .template_parameter(receiver)
                .and_then(|parameter| parameter.bound_type.clone())
            {
                Some(bound) if bound.is_concrete() => bound,
                _ => {
                    return Err(cache.report(Condition::incompatible(format!(
                        "receiver {receiver} has no members"
                    ))))
                }
            },
            TypeDef::Union(_) | TypeDef::Intersection(_) | TypeDef::NoReturn => {
                return Err(cache.report(Condition::incompatible(format!(
                    "receiver {receiver} has no members"
                ))))
            }
        };
        let Some(base) = receiver.concrete_url() else {
            invariant!("receiver {receiver} is not concrete");
        };

        match symbols.template(base) {
            Some(template) => {
                MemberReifier::from_arguments(cache, symbols, &template, receiver.type_arguments())
            }
            None if receiver.type_arguments().is_empty() => Ok(MemberReifier {
                cache,
                symbols,
                template: None,
                bindings: Vec::new(),
                reified: FxHashMap::default(),
            }),
            None => Err(cache.report(Condition::incompatible(format!(
                "wrong number of type arguments for {base}; expected 0 but found {}",
                receiver.type_arguments().len()
            )))),
        }
    }

    /// Reifier binding `template`'s parameters to `arguments`.
    ///
    /// Concrete arguments are checked against the parameter bounds.
    pub fn from_arguments(
        cache: &'a mut TypeCache,
        symbols: &'a dyn SymbolStore,
        template: &SymbolUrl,
        arguments: &[TypeDef],
    ) -> TypeResult<Self> {
        let Some(handle) = cache.get_template(template) else {
            return Err(cache.report(Condition::missing_template(template)));
        };
        let parameters = handle.parameters().to_vec();
        let expected = parameters.len();
        if arguments.len() != expected {
            return Err(cache.report(Condition::incompatible(format!(
                "wrong number of type arguments for {template}; expected {expected} but found {}",
                arguments.len()
            ))));
        }

        for (parameter, argument) in parameters.iter().zip(arguments) {
            if !argument.is_concrete() {
                continue;
            }
            match check_bound(cache, symbols, parameter, argument) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(cache.report(Condition::incompatible(format!(
                        "argument type {argument} is not substitutable for constraint {parameter}"
                    ))))
                }
                Err(condition) => return Err(cache.report(condition)),
            }
        }

        Ok(MemberReifier {
            cache,
            symbols,
            template: Some(template.clone()),
            bindings: arguments.iter().cloned().map(Some).collect(),
            reified: FxHashMap::default(),
        })
    }

    /// Type of member `name`, declared as `declared` on the owner.
    #[tracing::instrument(level = "trace", skip(self, declared), fields(declared = %declared))]
    pub fn reify_member(&mut self, name: &str, declared: &TypeDef) -> TypeResult<TypeHandleId> {
        if let Some(&id) = self.reified.get(name) {
            return Ok(id);
        }

        let type_def = match substitute(declared, self.template.as_ref(), &self.bindings) {
            Ok(type_def) => type_def,
            Err(SubstError::Unbound(placeholder)) => {
                invariant!("member {name} refers to {placeholder} outside its owner")
            }
            Err(SubstError::Member(err)) => {
                return Err(self.cache.report(Condition::type_error(err.to_string())))
            }
        };

        let id = match &type_def {
            TypeDef::Union(members) => self.cache.resolve_union(self.symbols, members.as_slice())?,
            _ => self.cache.get_or_make_type(self.symbols, &type_def)?,
        };
        tracing::trace!(member = name, reified = %type_def, "reified member");
        self.reified.insert(name.to_owned(), id);
        Ok(id)
    }

    pub fn template(&self) -> Option<&SymbolUrl> {
        self.template.as_ref()
    }

    /// Receiver type argument bound to placeholder `index`.
    pub fn argument(&self, index: usize) -> Option<&TypeDef> {
        self.bindings.get(index).and_then(Option::as_ref)
    }

    pub fn num_reified(&self) -> usize {
        self.reified.len()
    }
}
