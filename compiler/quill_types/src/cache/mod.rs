//! The type intern table.
//!
//! Every distinct [`TypeDef`] gets one [`TypeHandle`], created only after
//! the types it is built from (arguments, members, supertype) exist. Handle
//! ids therefore only point backwards, which keeps the touch walk finite.
//!
//! Split by concern:
//! - this module: storage, lookups, interning
//! - `touch`: reachability and address assignment
//! - `declare`: declarations, function types, templates
//! - `resolve`: validated unions, intersections and signatures

mod declare;
mod resolve;
mod touch;

use quill_diagnostic::{Diagnostic, DiagnosticQueue};
use quill_ir::{SymbolUrl, TemplateParameter, TypeDef};
use quill_stack::guarded;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    CacheConfig, Condition, SymbolStore, TemplateHandle, TemplateId, TypeAddress, TypeHandle,
    TypeHandleId, TypeResult,
};

/// Intern table and address authority for one compilation unit.
#[derive(Clone, Debug)]
pub struct TypeCache {
    config: CacheConfig,
    handles: Vec<TypeHandle>,
    index: FxHashMap<TypeDef, TypeHandleId>,
    templates: Vec<TemplateHandle>,
    template_index: FxHashMap<SymbolUrl, TemplateId>,
    /// Touched handles; position is the address.
    addressed: Vec<TypeHandleId>,
    diagnostics: DiagnosticQueue,
}

impl Default for TypeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrow an arena length to a `u32` id.
fn id_from_len(len: usize) -> u32 {
    u32::try_from(len)
        .unwrap_or_else(|_| crate::invariant!("type cache exceeded u32::MAX entries"))
}

impl TypeCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        TypeCache {
            diagnostics: DiagnosticQueue::with_config(config.diagnostics.clone()),
            config,
            handles: Vec::new(),
            index: FxHashMap::default(),
            templates: Vec::new(),
            template_index: FxHashMap::default(),
            addressed: Vec::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // Lookups

    pub fn has_type(&self, type_def: &TypeDef) -> bool {
        self.index.contains_key(type_def)
    }

    pub fn get_type(&self, type_def: &TypeDef) -> Option<TypeHandleId> {
        self.index.get(type_def).copied()
    }

    pub fn handle(&self, id: TypeHandleId) -> &TypeHandle {
        &self.handles[id.index()]
    }

    pub fn type_def(&self, id: TypeHandleId) -> &TypeDef {
        self.handle(id).type_def()
    }

    pub fn num_handles(&self) -> usize {
        self.handles.len()
    }

    /// Every handle in creation order.
    pub fn handles(&self) -> impl Iterator<Item = (TypeHandleId, &TypeHandle)> {
        self.handles
            .iter()
            .enumerate()
            .map(|(i, h)| (TypeHandleId::from_raw(id_from_len(i)), h))
    }

    /// Handle holding `address`, if that many types have been touched.
    pub fn get_type_at(&self, address: TypeAddress) -> Option<TypeHandleId> {
        self.addressed.get(address.raw() as usize).copied()
    }

    pub fn num_addressed(&self) -> usize {
        self.addressed.len()
    }

    /// Touched types in address order.
    pub fn addressed_types(&self) -> impl Iterator<Item = (TypeAddress, &TypeHandle)> {
        self.addressed
            .iter()
            .enumerate()
            .map(|(i, id)| (TypeAddress::from_raw(id_from_len(i)), self.handle(*id)))
    }

    pub fn has_template(&self, url: &SymbolUrl) -> bool {
        self.template_index.contains_key(url)
    }

    pub fn template_id(&self, url: &SymbolUrl) -> Option<TemplateId> {
        self.template_index.get(url).copied()
    }

    pub fn get_template(&self, url: &SymbolUrl) -> Option<&TemplateHandle> {
        self.template_id(url).map(|id| self.template(id))
    }

    pub fn template(&self, id: TemplateId) -> &TemplateHandle {
        &self.templates[id.index()]
    }

    /// Registered templates in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &TemplateHandle> {
        self.templates.iter()
    }

    /// Declaration of the generic parameter a placeholder stands for.
    pub fn template_parameter(&self, placeholder: &TypeDef) -> Option<&TemplateParameter> {
        let (template, index) = placeholder.placeholder_of()?;
        self.get_template(template)?.parameter(index)
    }

    // Diagnostics

    /// Log `condition` and record it in the diagnostic queue.
    ///
    /// Returns the condition so call sites can write
    /// `return Err(self.report(...))`.
    pub fn report(&mut self, condition: Condition) -> Condition {
        tracing::debug!(
            kind = ?condition.kind,
            message = %condition.message,
            "type condition"
        );
        self.diagnostics.push(condition.to_diagnostic());
        condition
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Drain recorded diagnostics in report order.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    // Interning

    /// Intern `type_def`, whose dependencies must already be interned.
    ///
    /// A concrete type needs its base symbol declared, and its arguments and
    /// the base symbol's declared supertype interned. A placeholder needs its
    /// template registered and its arguments interned. Unions and
    /// intersections need their members interned. Does not assign an address.
    pub fn make_type(
        &mut self,
        symbols: &dyn SymbolStore,
        type_def: &TypeDef,
    ) -> TypeResult<TypeHandleId> {
        if let Some(id) = self.get_type(type_def) {
            return Ok(id);
        }

        match type_def {
            TypeDef::Concrete { base, .. } if !symbols.symbol_exists(base) => {
                return Err(self.report(Condition::missing_symbol(base)));
            }
            TypeDef::Placeholder { template, .. } if !self.has_template(template) => {
                return Err(self.report(Condition::missing_template(template)));
            }
            _ => {}
        }

        let mut arguments = SmallVec::new();
        for component in type_def.components() {
            match self.get_type(component) {
                Some(id) => arguments.push(id),
                None => return Err(self.report(Condition::missing_type(component))),
            }
        }

        let supertype = match type_def.concrete_url() {
            Some(base) => match symbols.declared_supertype(base) {
                Some(declared) => match self.get_type(&declared) {
                    Some(id) => Some(id),
                    None => return Err(self.report(Condition::missing_type(&declared))),
                },
                None => None,
            },
            None => None,
        };

        Ok(self.insert(type_def.clone(), supertype, arguments))
    }

    /// Intern `type_def` after interning whatever it depends on.
    ///
    /// Recurses through arguments, members and declared supertypes. A type
    /// that depends on itself through its supertype chain is a type error.
    pub fn get_or_make_type(
        &mut self,
        symbols: &dyn SymbolStore,
        type_def: &TypeDef,
    ) -> TypeResult<TypeHandleId> {
        let mut pending = Vec::new();
        self.get_or_make_inner(symbols, type_def, &mut pending)
    }

    fn get_or_make_inner(
        &mut self,
        symbols: &dyn SymbolStore,
        type_def: &TypeDef,
        pending: &mut Vec<TypeDef>,
    ) -> TypeResult<TypeHandleId> {
        if let Some(id) = self.get_type(type_def) {
            return Ok(id);
        }
        if pending.contains(type_def) {
            return Err(self.report(Condition::type_error(format!(
                "type {type_def} depends on itself"
            ))));
        }

        pending.push(type_def.clone());
        let result = guarded(|| {
            for component in type_def.components() {
                self.get_or_make_inner(symbols, component, pending)?;
            }
            if let Some(declared) = type_def
                .concrete_url()
                .and_then(|base| symbols.declared_supertype(base))
            {
                self.get_or_make_inner(symbols, &declared, pending)?;
            }
            self.make_type(symbols, type_def)
        });
        pending.pop();
        result
    }

    /// Create a handle; callers have checked every dependency.
    fn insert(
        &mut self,
        type_def: TypeDef,
        supertype: Option<TypeHandleId>,
        arguments: SmallVec<[TypeHandleId; 4]>,
    ) -> TypeHandleId {
        let id = TypeHandleId::from_raw(id_from_len(self.handles.len()));
        tracing::trace!(id = id.raw(), type_def = %type_def, "interned type");
        self.index.insert(type_def.clone(), id);
        self.handles
            .push(TypeHandle::new(type_def, supertype, arguments));
        id
    }
}
