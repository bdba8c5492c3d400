//! Assignability and generic reification.
//!
//! - [`compare_assignable`] relates two types through declared supertypes,
//!   concept implementations and placeholder bounds.
//! - [`CallsiteReifier`] binds a generic callee's placeholders from the
//!   argument types at one call and produces the concrete result type.
//! - [`MemberReifier`] substitutes a receiver's type arguments into the
//!   declared types of its members.
//!
//! Both reifiers borrow the [`TypeCache`](quill_types::TypeCache) mutably for
//! their whole life and are used for exactly one call or receiver.

mod callsite;
mod compare;
mod member;
mod subst;

#[cfg(test)]
mod fixture;

pub use callsite::CallsiteReifier;
pub use compare::{check_bound, compare_assignable, is_assignable, is_implementable, TypeComparison};
pub use member::MemberReifier;
