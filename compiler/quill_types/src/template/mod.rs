//! Generic declarations and their placeholders.

use quill_ir::{SymbolUrl, TemplateParameter, TypeDef};
use rustc_hash::FxHashMap;

use crate::TypeHandleId;

/// Index of a [`TemplateHandle`] in the cache that registered it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(u32);

impl TemplateId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TemplateId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered generic parameters of one declaration.
///
/// Placeholder `i` is `TypeDef::Placeholder { template: url, index: i }`;
/// its handle is interned when the template is registered.
#[derive(Clone, Debug)]
pub struct TemplateHandle {
    url: SymbolUrl,
    parameters: Vec<TemplateParameter>,
    placeholders: Vec<TypeDef>,
    placeholder_handles: Vec<TypeHandleId>,
    by_name: FxHashMap<String, u32>,
    scope: Option<SymbolUrl>,
}

impl TemplateHandle {
    /// Build a template from already-validated parameters.
    pub(crate) fn new(
        url: SymbolUrl,
        parameters: Vec<TemplateParameter>,
        scope: Option<SymbolUrl>,
    ) -> Self {
        let placeholders = parameters
            .iter()
            .map(|p| TypeDef::placeholder(url.clone(), p.index, Vec::new()))
            .collect();
        let by_name = parameters
            .iter()
            .map(|p| (p.name.clone(), p.index))
            .collect();
        TemplateHandle {
            url,
            parameters,
            placeholders,
            placeholder_handles: Vec::new(),
            by_name,
            scope,
        }
    }

    pub(crate) fn set_placeholder_handles(&mut self, handles: Vec<TypeHandleId>) {
        self.placeholder_handles = handles;
    }

    pub fn url(&self) -> &SymbolUrl {
        &self.url
    }

    /// Declaration the template was declared inside, if nested.
    pub fn scope(&self) -> Option<&SymbolUrl> {
        self.scope.as_ref()
    }

    pub fn parameters(&self) -> &[TemplateParameter] {
        &self.parameters
    }

    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameter(&self, index: u32) -> Option<&TemplateParameter> {
        self.parameters.get(index as usize)
    }

    pub fn parameter_by_name(&self, name: &str) -> Option<&TemplateParameter> {
        self.index_of(name).and_then(|i| self.parameter(i))
    }

    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn placeholders(&self) -> &[TypeDef] {
        &self.placeholders
    }

    pub fn placeholder(&self, index: u32) -> Option<&TypeDef> {
        self.placeholders.get(index as usize)
    }

    pub fn placeholder_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.index_of(name).and_then(|i| self.placeholder(i))
    }

    pub fn placeholder_handle(&self, index: u32) -> Option<TypeHandleId> {
        self.placeholder_handles.get(index as usize).copied()
    }

    pub fn placeholder_handles(&self) -> &[TypeHandleId] {
        &self.placeholder_handles
    }

    /// Whether `type_def` is a placeholder of this template.
    pub fn owns(&self, type_def: &TypeDef) -> bool {
        type_def
            .placeholder_of()
            .is_some_and(|(template, _)| *template == self.url)
    }

    /// Parameter declaration behind one of this template's placeholders.
    pub fn parameter_for(&self, type_def: &TypeDef) -> Option<&TemplateParameter> {
        match type_def.placeholder_of() {
            Some((template, index)) if *template == self.url => self.parameter(index),
            _ => None,
        }
    }
}
