//! Declared parameters of callables.

use crate::TypeDef;

/// How an argument reaches a parameter at a call site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Positional.
    List,
    /// Passed by keyword.
    Named,
    /// Keyword with a default value.
    Opt,
    /// Resolved from the calling context, never written at the call.
    Ctx,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub index: u32,
    pub name: String,
    pub placement: Placement,
    pub type_def: TypeDef,
}

impl Parameter {
    pub fn new(index: u32, name: impl Into<String>, placement: Placement, type_def: TypeDef) -> Self {
        Parameter {
            index,
            name: name.into(),
            placement,
            type_def,
        }
    }

    /// A positional parameter.
    pub fn list(index: u32, name: impl Into<String>, type_def: TypeDef) -> Self {
        Parameter::new(index, name, Placement::List, type_def)
    }

    /// A context parameter.
    pub fn ctx(index: u32, name: impl Into<String>, type_def: TypeDef) -> Self {
        Parameter::new(index, name, Placement::Ctx, type_def)
    }

    pub fn is_ctx(&self) -> bool {
        self.placement == Placement::Ctx
    }
}
