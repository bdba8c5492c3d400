//! Declarations: subtypes, parameterized types, function types, templates.

use quill_ir::{Parameter, SymbolUrl, TemplateParameter, TypeDef};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::{id_from_len, TypeCache};
use crate::{Condition, SymbolStore, TemplateHandle, TemplateId, TypeHandleId, TypeResult};

impl TypeCache {
    /// Create the type of a declaration being defined under `super_type`.
    ///
    /// `placeholders` are the declaration's own generic parameters. The
    /// supertype link comes from `super_type`, not from the symbol store,
    /// since the declaration may not be visible there yet.
    #[tracing::instrument(level = "trace", skip_all, fields(sub = %sub_url))]
    pub fn declare_sub_type(
        &mut self,
        sub_url: &SymbolUrl,
        placeholders: &[TypeDef],
        super_type: &TypeDef,
    ) -> TypeResult<TypeHandleId> {
        let sub_type = TypeDef::concrete(sub_url.clone(), placeholders.to_vec());
        if self.has_type(&sub_type) {
            return Err(self.report(Condition::type_error(format!(
                "type {sub_type} is already defined"
            ))));
        }

        let mut arguments = SmallVec::new();
        for placeholder in placeholders {
            if !placeholder.is_placeholder() {
                return Err(self.report(Condition::type_error(format!(
                    "invalid type parameter {placeholder} for {sub_url}"
                ))));
            }
            match self.get_type(placeholder) {
                Some(id) => arguments.push(id),
                None => return Err(self.report(Condition::missing_type(placeholder))),
            }
        }

        let Some(super_id) = self.get_type(super_type) else {
            return Err(self.report(Condition::missing_type(super_type)));
        };

        Ok(self.insert(sub_type, Some(super_id), arguments))
    }

    /// Intern `base[args]`, checking the argument count against the base's
    /// template.
    ///
    /// Touches the template and the base's declared supertype. The returned
    /// type itself is interned but not touched.
    #[tracing::instrument(level = "trace", skip_all, fields(base = %base, arity = args.len()))]
    pub fn declare_parameterized_type(
        &mut self,
        symbols: &mut dyn SymbolStore,
        base: &SymbolUrl,
        args: &[TypeDef],
    ) -> TypeResult<TypeHandleId> {
        if !symbols.symbol_exists(base) {
            return Err(self.report(Condition::missing_symbol(base)));
        }

        let template = match symbols.template(base) {
            Some(url) => match self.template_id(&url) {
                Some(id) => Some(id),
                None => return Err(self.report(Condition::missing_template(&url))),
            },
            None if args.is_empty() => None,
            // Type arguments on a base that never declared parameters.
            None => return Err(self.report(Condition::missing_template(base))),
        };

        let expected = template.map_or(0, |id| self.template(id).num_parameters());
        if args.len() < expected {
            let missing = template
                .and_then(|id| self.template(id).parameters().get(args.len()))
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(self.report(Condition::incompatible(format!(
                "missing type parameter {missing} for {base}"
            ))));
        }
        if args.len() > expected {
            return Err(self.report(Condition::incompatible(format!(
                "wrong number of type parameters for {base}; expected {expected} but found {}",
                args.len()
            ))));
        }

        if let Some(id) = template {
            self.touch_template(symbols, id);
        }
        if let Some(declared) = symbols.declared_supertype(base) {
            let super_id = self.get_or_make_type(&*symbols, &declared)?;
            self.touch_type(symbols, super_id);
        }

        self.get_or_make_type(&*symbols, &TypeDef::concrete(base.clone(), args.to_vec()))
    }

    /// Intern the type of a callable: `FunctionN[return, param0, ...]`.
    ///
    /// Rest parameters are not supported.
    pub fn declare_function_type(
        &mut self,
        symbols: &mut dyn SymbolStore,
        return_type: &TypeDef,
        parameters: &[Parameter],
        rest: Option<&Parameter>,
    ) -> TypeResult<TypeHandleId> {
        if let Some(rest) = rest {
            crate::invariant!(
                "variadic function type not supported (rest parameter {})",
                rest.name
            );
        }

        let arity = parameters.len();
        let base = self.config.function_url(arity);
        if arity > self.config.max_function_arity {
            return Err(self.report(Condition::missing_symbol(&base)));
        }

        let mut args = Vec::with_capacity(arity + 1);
        args.push(return_type.clone());
        args.extend(parameters.iter().map(|p| p.type_def.clone()));
        self.declare_parameterized_type(symbols, &base, &args)
    }

    /// Register the template of generic declaration `url`.
    ///
    /// Placeholder handles are created immediately. Bound types are interned
    /// and touched; they may refer to the template's own placeholders.
    #[tracing::instrument(level = "trace", skip_all, fields(template = %url, params = parameters.len()))]
    pub fn make_template(
        &mut self,
        symbols: &mut dyn SymbolStore,
        url: SymbolUrl,
        parameters: Vec<TemplateParameter>,
        scope: Option<SymbolUrl>,
    ) -> TypeResult<TemplateId> {
        if parameters.is_empty() {
            crate::invariant!("template {url} must have at least one parameter");
        }
        if self.has_template(&url) {
            crate::invariant!("template {url} is already defined");
        }
        let mut names = FxHashSet::default();
        for (position, parameter) in parameters.iter().enumerate() {
            if parameter.index as usize != position {
                crate::invariant!(
                    "template {url} parameter {} has index {} at position {position}",
                    parameter.name,
                    parameter.index
                );
            }
            if !names.insert(parameter.name.as_str()) {
                crate::invariant!(
                    "template {url} declares parameter {} twice",
                    parameter.name
                );
            }
        }

        let id = TemplateId::from_raw(id_from_len(self.templates.len()));
        let mut template = TemplateHandle::new(url.clone(), parameters, scope);

        // Placeholders survive a failed registration and are reused on retry.
        let placeholder_ids: Vec<TypeHandleId> = template
            .placeholders()
            .iter()
            .map(|p| match self.get_type(p) {
                Some(existing) => existing,
                None => self.insert(p.clone(), None, SmallVec::new()),
            })
            .collect();
        template.set_placeholder_handles(placeholder_ids);

        let bounds: Vec<TypeDef> = template
            .parameters()
            .iter()
            .filter_map(|p| p.bound_type.clone())
            .collect();
        self.template_index.insert(url.clone(), id);
        self.templates.push(template);

        // Bounds may mention the template's own placeholders, so they are
        // interned after registration. A failure unregisters the template.
        let mut bound_ids = Vec::with_capacity(bounds.len());
        for bound in &bounds {
            match self.get_or_make_type(&*symbols, bound) {
                Ok(bound_id) => bound_ids.push(bound_id),
                Err(condition) => {
                    self.template_index.remove(&url);
                    self.templates.pop();
                    tracing::debug!(template = %url, "template registration rolled back");
                    return Err(condition);
                }
            }
        }
        for bound_id in bound_ids {
            self.touch_type(symbols, bound_id);
        }

        Ok(id)
    }
}
