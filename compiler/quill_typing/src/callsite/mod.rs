//! Per-call reification of a generic callee.
//!
//! A [`CallsiteReifier`] is fed the call's arguments in parameter order.
//! Each argument is unified with the declared parameter type, binding the
//! callee's placeholders on first sight. Once the arguments are in,
//! [`CallsiteReifier::reify_result`] substitutes the bindings into the
//! declared return type.
//!
//! ```text
//! def first[T](xs: Seq[T]) -> T
//! first(ints)            // T := Int, result Int
//! ```

use quill_ir::{Parameter, SymbolUrl, TemplateParameter, TypeDef};
use quill_stack::guarded;
use quill_types::{
    invariant, Condition, SymbolStore, TypeCache, TypeHandleId, TypeResult, TypeSignature,
};
use rustc_hash::FxHashMap;

use crate::compare::{check_bound, is_assignable};
use crate::subst::{substitute, SubstError};

/// Unifies one call's arguments with its callee's declared parameters.
pub struct CallsiteReifier<'a> {
    cache: &'a mut TypeCache,
    symbols: &'a dyn SymbolStore,
    parameters: Vec<Parameter>,
    rest: Option<Parameter>,
    template: Option<SymbolUrl>,
    /// Binding of each template parameter, by placeholder index.
    reified: Vec<Option<TypeDef>>,
    arguments: Vec<TypeDef>,
    next_param: usize,
}

impl<'a> CallsiteReifier<'a> {
    /// Reifier for a callee without generic parameters.
    pub fn new(
        cache: &'a mut TypeCache,
        symbols: &'a dyn SymbolStore,
        parameters: Vec<Parameter>,
        rest: Option<Parameter>,
    ) -> Self {
        CallsiteReifier {
            cache,
            symbols,
            parameters,
            rest,
            template: None,
            reified: Vec::new(),
            arguments: Vec::new(),
            next_param: 0,
        }
    }

    /// Reifier for a callee generic over `template`.
    pub fn for_template(
        cache: &'a mut TypeCache,
        symbols: &'a dyn SymbolStore,
        template: &SymbolUrl,
        parameters: Vec<Parameter>,
        rest: Option<Parameter>,
    ) -> TypeResult<Self> {
        let Some(handle) = cache.get_template(template) else {
            return Err(cache.report(Condition::missing_template(template)));
        };
        let slots = handle.num_parameters();
        let mut reifier = CallsiteReifier::new(cache, symbols, parameters, rest);
        reifier.template = Some(template.clone());
        reifier.reified = vec![None; slots];
        Ok(reifier)
    }

    /// Bind the leading placeholders to explicit type arguments, as in
    /// `f[Int](x)`.
    pub fn with_type_arguments(mut self, type_arguments: &[TypeDef]) -> TypeResult<Self> {
        if type_arguments.len() > self.reified.len() {
            let callee = self.callee();
            return Err(self.report(Condition::incompatible(format!(
                "too many type arguments for {callee}; expected {} but found {}",
                self.reified.len(),
                type_arguments.len()
            ))));
        }
        for (slot, argument) in type_arguments.iter().enumerate() {
            let Some(parameter) = self.template_parameter(slot) else {
                invariant!("template {} has no parameter {slot}", self.callee());
            };
            self.check_placeholder(&parameter, argument)?;
            self.reified[slot] = Some(argument.clone());
        }
        Ok(self)
    }

    /// Unify the next positional argument with its parameter and intern it.
    #[tracing::instrument(level = "trace", skip_all, fields(arg = %arg))]
    pub fn reify_next_argument(&mut self, arg: &TypeDef) -> TypeResult<TypeHandleId> {
        let parameter = match (self.parameters.get(self.next_param), &self.rest) {
            (Some(parameter), _) | (None, Some(parameter)) => parameter.clone(),
            (None, None) => {
                let expected = self.parameters.len();
                return Err(self.report(Condition::unexpected_argument(format!(
                    "wrong number of arguments; expected {expected} but found {}",
                    expected + 1
                ))));
            }
        };
        if parameter.is_ctx() {
            invariant!(
                "context parameter {} supplied as a positional argument",
                parameter.name
            );
        }

        let declared = &parameter.type_def;
        let reified = match declared {
            TypeDef::Concrete { .. } | TypeDef::Placeholder { .. } => {
                self.reify_singular(declared, arg)?
            }
            TypeDef::Union(_) => self.reify_union(declared, arg)?,
            TypeDef::Intersection(_) | TypeDef::NoReturn => invariant!(
                "cannot reify parameter {} of {} type {declared}",
                parameter.name,
                declared.kind()
            ),
        };

        let assignable = match is_assignable(self.cache, self.symbols, &reified, arg) {
            Ok(assignable) => assignable,
            Err(condition) => return Err(self.report(condition)),
        };
        if !assignable {
            return Err(self.report(Condition::incompatible(format!(
                "argument type {arg} is not compatible with parameter {} of type {reified}",
                parameter.name
            ))));
        }

        let id = self.cache.get_or_make_type(self.symbols, arg)?;
        self.arguments.push(arg.clone());
        if self.next_param < self.parameters.len() {
            self.next_param += 1;
        }
        Ok(id)
    }

    /// Resolve the next parameter, which must be a context parameter, from
    /// the bindings made so far.
    pub fn reify_next_context(&mut self) -> TypeResult<TypeHandleId> {
        let Some(parameter) = self.parameters.get(self.next_param).cloned() else {
            let expected = self.parameters.len();
            return Err(self.report(Condition::unexpected_argument(format!(
                "wrong number of arguments; expected {expected} but found {}",
                expected + 1
            ))));
        };
        if !parameter.is_ctx() {
            invariant!("parameter {} is not a context parameter", parameter.name);
        }
        let reified = self.substitute_bound(&parameter.type_def, "context type")?;
        let id = self.cache.get_or_make_type(self.symbols, &reified)?;
        self.next_param += 1;
        Ok(id)
    }

    /// Intern `return_type` with the bindings substituted.
    ///
    /// Does not bind anything; the result is interned but not touched.
    #[tracing::instrument(level = "trace", skip_all, fields(ret = %return_type))]
    pub fn reify_result(&mut self, return_type: &TypeDef) -> TypeResult<TypeHandleId> {
        let reified = self.substitute_bound(return_type, "return type")?;
        tracing::trace!(result = %reified, "reified call result");
        self.cache.get_or_make_type(self.symbols, &reified)
    }

    pub fn argument(&self, index: usize) -> Option<&TypeDef> {
        self.arguments.get(index)
    }

    pub fn arguments(&self) -> &[TypeDef] {
        &self.arguments
    }

    pub fn num_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// Binding of placeholder `index`, if one has been made.
    pub fn reified_placeholder(&self, index: usize) -> Option<&TypeDef> {
        self.reified.get(index).and_then(Option::as_ref)
    }

    /// Whether every fixed parameter has been consumed.
    pub fn is_complete(&self) -> bool {
        self.next_param == self.parameters.len()
    }

    pub fn template(&self) -> Option<&SymbolUrl> {
        self.template.as_ref()
    }

    // Unification

    fn reify_singular(&mut self, param: &TypeDef, arg: &TypeDef) -> TypeResult<TypeDef> {
        guarded(|| match param {
            // A bare base takes the arguments of the matching ancestor, so an
            // `Any` parameter stays `Any` rather than `Any[Int]` for `Seq[Int]`.
            TypeDef::Concrete { base, args } if args.is_empty() => Ok(param
                .with_arguments(self.arguments_as(base, arg).unwrap_or_default())),
            TypeDef::Concrete { base, args } => {
                let actual = self.arguments_as(base, arg).unwrap_or_default();
                let nested = self.reify_arguments(args, &actual)?;
                Ok(param.with_arguments(nested))
            }
            TypeDef::Placeholder {
                template,
                index,
                args,
            } if Some(template) == self.template.as_ref() => {
                self.reify_placeholder(param, *index, args, arg)
            }
            TypeDef::Placeholder { args, .. } => {
                if args.is_empty() {
                    return Ok(param.clone());
                }
                let nested = self.reify_arguments(args, arg.type_arguments())?;
                Ok(param.with_arguments(nested))
            }
            TypeDef::Union(_) => self.reify_union(param, arg),
            TypeDef::Intersection(_) | TypeDef::NoReturn => Err(self.report(
                Condition::incompatible(format!(
                    "argument type {arg} is not compatible with {param}"
                )),
            )),
        })
    }

    fn reify_placeholder(
        &mut self,
        param: &TypeDef,
        index: u32,
        nested: &[TypeDef],
        arg: &TypeDef,
    ) -> TypeResult<TypeDef> {
        let Some(slot) = usize::try_from(index)
            .ok()
            .filter(|slot| *slot < self.reified.len())
        else {
            invariant!("placeholder {param} is outside template {}", self.callee());
        };

        let binding = if let Some(existing) = &self.reified[slot] {
            existing.clone()
        } else {
            let binding = if nested.is_empty() {
                arg.clone()
            } else {
                arg.with_arguments(Vec::new())
            };
            let Some(parameter) = self.template_parameter(slot) else {
                invariant!("template {} has no parameter {slot}", self.callee());
            };
            self.check_placeholder(&parameter, &binding)?;
            tracing::trace!(placeholder = %param, binding = %binding, "bound placeholder");
            self.reified[slot] = Some(binding.clone());
            binding
        };

        if nested.is_empty() {
            return Ok(binding);
        }
        let nested = self.reify_arguments(nested, arg.type_arguments())?;
        Ok(binding.with_arguments(nested))
    }

    fn reify_arguments(
        &mut self,
        declared: &[TypeDef],
        actual: &[TypeDef],
    ) -> TypeResult<Vec<TypeDef>> {
        if let Some(missing) = declared.get(actual.len()) {
            return Err(self.report(Condition::incompatible(format!(
                "missing type argument for {missing}"
            ))));
        }
        if let Some(extra) = actual.get(declared.len()) {
            return Err(self.report(Condition::incompatible(format!(
                "no type parameter for argument {extra}"
            ))));
        }
        declared
            .iter()
            .zip(actual)
            .map(|(param, arg)| self.reify_singular(param, arg))
            .collect()
    }

    fn reify_union(&mut self, param: &TypeDef, arg: &TypeDef) -> TypeResult<TypeDef> {
        let declared = param.members();
        let mut by_base = FxHashMap::default();
        for (slot, member) in declared.iter().enumerate() {
            let Some(base) = self.cache.effective_union_base(member) else {
                invariant!("union {param} has member {member} without a base type");
            };
            if by_base.insert(base.clone(), slot).is_some() {
                invariant!("union {param} names {base} twice");
            }
        }

        let arg_members = match arg {
            TypeDef::Union(members) => members.as_slice().to_vec(),
            other => vec![other.clone()],
        };

        let mut reified: Vec<Option<TypeDef>> = vec![None; declared.len()];
        for member in &arg_members {
            let slot = self
                .cache
                .effective_union_base(member)
                .and_then(|base| self.match_union_member(&mut by_base, &base));
            let Some(slot) = slot else {
                return Err(self.report(Condition::incompatible(format!(
                    "argument type {member} is not compatible with union {param}"
                ))));
            };
            reified[slot] = Some(self.reify_singular(&declared[slot], member)?);
        }

        let members: Vec<TypeDef> = reified
            .into_iter()
            .zip(declared)
            .map(|(reified, declared)| reified.unwrap_or_else(|| declared.clone()))
            .collect();
        let id = self.cache.resolve_union(self.symbols, &members)?;
        Ok(self.cache.type_def(id).clone())
    }

    /// Take the declared member matching `base`, or its immediate supertype.
    fn match_union_member(
        &self,
        by_base: &mut FxHashMap<SymbolUrl, usize>,
        base: &SymbolUrl,
    ) -> Option<usize> {
        if let Some(slot) = by_base.remove(base) {
            return Some(slot);
        }
        let parent = self.symbols.declared_supertype(base)?;
        by_base.remove(parent.concrete_url()?)
    }

    /// Arguments of `arg` seen as an instance of `base`: its own when the
    /// base matches, otherwise those of its ancestor with that base.
    fn arguments_as(&self, base: &SymbolUrl, arg: &TypeDef) -> Option<Vec<TypeDef>> {
        match arg {
            TypeDef::Concrete { base: own, args } if own == base => Some(args.clone()),
            TypeDef::Concrete { .. } => TypeSignature::from_store(self.symbols, arg)
                .ancestor_with_base(base)
                .map(|ancestor| ancestor.type_arguments().to_vec()),
            TypeDef::Placeholder { args, .. } => Some(args.clone()),
            TypeDef::Union(_) | TypeDef::Intersection(_) | TypeDef::NoReturn => None,
        }
    }

    fn check_placeholder(&mut self, parameter: &TemplateParameter, arg: &TypeDef) -> TypeResult<()> {
        match check_bound(self.cache, self.symbols, parameter, arg) {
            Ok(true) => Ok(()),
            Ok(false) => Err(self.report(Condition::incompatible(format!(
                "argument type {arg} is not substitutable for constraint {parameter}"
            )))),
            Err(condition) => Err(self.report(condition)),
        }
    }

    // Helpers

    fn substitute_bound(&mut self, type_def: &TypeDef, position: &str) -> TypeResult<TypeDef> {
        match substitute(type_def, self.template.as_ref(), &self.reified) {
            Ok(reified) => Ok(reified),
            Err(SubstError::Unbound(placeholder)) => invariant!(
                "call cannot be parameterized by {position} only ({placeholder} is unbound)"
            ),
            Err(SubstError::Member(err)) => Err(self.report(Condition::type_error(err.to_string()))),
        }
    }

    fn template_parameter(&self, slot: usize) -> Option<TemplateParameter> {
        let index = u32::try_from(slot).ok()?;
        let template = self.cache.get_template(self.template.as_ref()?)?;
        template.parameter(index).cloned()
    }

    fn callee(&self) -> String {
        self.template
            .as_ref()
            .map_or_else(|| "call".to_owned(), ToString::to_string)
    }

    fn report(&mut self, condition: Condition) -> Condition {
        self.cache.report(condition)
    }
}
