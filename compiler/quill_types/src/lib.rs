//! Type identity for the Quill compiler.
//!
//! [`TypeCache`] gives every structurally distinct [`TypeDef`] one handle and
//! numbers only the types that are actually reachable from emitted output.
//! Generic declarations register a [`TemplateHandle`], which owns the
//! placeholder types of its parameters.
//!
//! # Ownership
//!
//! The cache owns every [`TypeHandle`] and [`TemplateHandle`] in creation
//! order. Everything else refers to them by [`TypeHandleId`] or
//! [`TemplateId`].
//!
//! # Symbols
//!
//! Declarations live outside this crate. The cache reads them through the
//! [`SymbolStore`] trait and tells the store which symbols became reachable.
//! [`SymbolTable`] is an in-memory store for hosts without one.
//!
//! # Errors
//!
//! Fallible operations return a [`Condition`] and record it in the cache's
//! diagnostic queue. Broken internal invariants panic through
//! [`invariant!`] instead; they are compiler bugs, not user errors.

mod cache;
mod config;
mod disjoint;
pub mod error;
mod handle;
mod signature;
mod symbol;
mod template;

pub use cache::TypeCache;
pub use config::CacheConfig;
pub use disjoint::DisjointTypeSet;
pub use error::{Condition, ConditionKind, TypeResult};
pub use handle::{TypeAddress, TypeHandle, TypeHandleId};
pub use signature::TypeSignature;
pub use symbol::{DeriveType, SymbolDecl, SymbolKind, SymbolStore, SymbolTable};
pub use template::{TemplateHandle, TemplateId};

pub use quill_ir::{
    BoundType, Parameter, Placement, Span, SymbolUrl, TemplateParameter, TypeDef, TypeDefKind,
    Variance,
};
