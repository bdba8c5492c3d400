//! Shared vocabulary of the Quill type core.
//!
//! Everything here is a plain value: hashable, comparable, cheap to clone.
//! The intern table in `quill_types` keys on [`TypeDef`] structure, so two
//! descriptions that compare equal are the same type everywhere in the
//! toolchain.

mod param;
mod span;
mod template;
mod type_def;
mod url;

pub use param::{Parameter, Placement};
pub use span::Span;
pub use template::{BoundType, TemplateParameter, Variance};
pub use type_def::{MemberError, Members, TypeDef, TypeDefKind};
pub use url::SymbolUrl;
