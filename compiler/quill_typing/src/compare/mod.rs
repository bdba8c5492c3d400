//! Assignability between types.
//!
//! `compare_assignable(to, from)` answers how a value of type `from` relates
//! to a slot of type `to`:
//!
//! | result     | meaning                                     |
//! |------------|---------------------------------------------|
//! | `Equal`    | same type                                   |
//! | `Extends`  | `from` is a subtype of, or implements, `to` |
//! | `Super`    | `from` is a supertype of `to`               |
//! | `Disjoint` | unrelated                                   |
//!
//! Subtyping follows declared supertypes from the symbol store. Placeholders
//! compare through their `extends` bound.

use quill_ir::{BoundType, SymbolUrl, TemplateParameter, TypeDef};
use quill_stack::guarded;
use quill_types::{Condition, SymbolKind, SymbolStore, TypeCache, TypeResult, TypeSignature};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeComparison {
    Equal,
    Extends,
    Super,
    Disjoint,
}

impl TypeComparison {
    /// `Equal` or `Extends`: a `from` value fits a `to` slot.
    pub fn is_assignable(self) -> bool {
        matches!(self, TypeComparison::Equal | TypeComparison::Extends)
    }
}

/// Relate `from` to `to`.
///
/// Fails only when a placeholder's template is not registered.
pub fn compare_assignable(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    to: &TypeDef,
    from: &TypeDef,
) -> TypeResult<TypeComparison> {
    guarded(|| compare_inner(cache, symbols, to, from))
}

/// Whether a `from` value can be stored in a `to` slot.
pub fn is_assignable(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    to: &TypeDef,
    from: &TypeDef,
) -> TypeResult<bool> {
    compare_assignable(cache, symbols, to, from).map(TypeComparison::is_assignable)
}

/// Whether `from` satisfies `concept`, directly, through a supertype, or
/// through a placeholder bound.
pub fn is_implementable(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    concept: &SymbolUrl,
    from: &TypeDef,
) -> bool {
    match from {
        TypeDef::Concrete { .. } => TypeSignature::from_store(symbols, from)
            .chain()
            .iter()
            .filter_map(TypeDef::concrete_url)
            .any(|url| url == concept || symbols.implements(url, concept)),
        TypeDef::Placeholder { .. } => extends_bound(cache, from)
            .is_some_and(|bound| is_implementable(cache, symbols, concept, bound)),
        TypeDef::Union(members) => members
            .iter()
            .all(|m| is_implementable(cache, symbols, concept, m)),
        TypeDef::Intersection(members) => members
            .iter()
            .any(|m| is_implementable(cache, symbols, concept, m)),
        TypeDef::NoReturn => false,
    }
}

/// Whether `arg` satisfies the bound of generic parameter `parameter`.
///
/// `extends B` accepts `B` and its subtypes; `super B` accepts `B` and its
/// supertypes.
pub fn check_bound(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    parameter: &TemplateParameter,
    arg: &TypeDef,
) -> TypeResult<bool> {
    if parameter.bound == BoundType::None {
        return Ok(true);
    }
    let Some(bound_type) = &parameter.bound_type else {
        quill_types::invariant!(
            "template parameter {} has a {} bound but no bound type",
            parameter.name,
            parameter.bound
        );
    };
    let comparison = compare_assignable(cache, symbols, bound_type, arg)?;
    Ok(match parameter.bound {
        BoundType::Extends => comparison.is_assignable(),
        BoundType::Super => matches!(comparison, TypeComparison::Equal | TypeComparison::Super),
        BoundType::None => true,
    })
}

fn extends_bound<'c>(cache: &'c TypeCache, placeholder: &TypeDef) -> Option<&'c TypeDef> {
    let parameter = cache.template_parameter(placeholder)?;
    match parameter.bound {
        BoundType::Extends => parameter.bound_type.as_ref(),
        BoundType::None | BoundType::Super => None,
    }
}

fn compare_inner(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    to: &TypeDef,
    from: &TypeDef,
) -> TypeResult<TypeComparison> {
    if to == from {
        return Ok(TypeComparison::Equal);
    }

    match (to, from) {
        (TypeDef::Concrete { .. }, TypeDef::Concrete { .. }) => {
            Ok(compare_concrete(cache, symbols, to, from))
        }

        (TypeDef::Concrete { .. }, TypeDef::Union(members)) => {
            let mut all_equal = true;
            for member in members {
                match compare_assignable(cache, symbols, to, member)? {
                    TypeComparison::Equal => {}
                    TypeComparison::Extends => all_equal = false,
                    TypeComparison::Super | TypeComparison::Disjoint => {
                        return Ok(TypeComparison::Disjoint)
                    }
                }
            }
            Ok(if all_equal {
                TypeComparison::Equal
            } else {
                TypeComparison::Extends
            })
        }

        (TypeDef::Concrete { .. }, TypeDef::Placeholder { template, .. }) => {
            if !cache.has_template(template) {
                return Err(Condition::missing_template(template));
            }
            match extends_bound(cache, from) {
                Some(bound) if is_assignable(cache, symbols, to, bound)? => {
                    Ok(TypeComparison::Extends)
                }
                _ => Ok(TypeComparison::Disjoint),
            }
        }

        (TypeDef::Concrete { .. }, TypeDef::Intersection(members)) => {
            for member in members {
                if is_assignable(cache, symbols, to, member)? {
                    return Ok(TypeComparison::Extends);
                }
            }
            Ok(TypeComparison::Disjoint)
        }

        (
            TypeDef::Placeholder {
                template: to_template,
                index: to_index,
                ..
            },
            TypeDef::Placeholder {
                template, index, ..
            },
        ) => Ok(if to_template == template && to_index == index {
            TypeComparison::Equal
        } else {
            TypeComparison::Disjoint
        }),

        (TypeDef::Union(_), TypeDef::Union(from_members)) => {
            for member in from_members {
                if !compare_assignable(cache, symbols, to, member)?.is_assignable() {
                    return Ok(TypeComparison::Disjoint);
                }
            }
            Ok(TypeComparison::Extends)
        }

        (TypeDef::Union(to_members), _) => {
            let mut result = TypeComparison::Disjoint;
            for member in to_members {
                match compare_assignable(cache, symbols, member, from)? {
                    TypeComparison::Equal => return Ok(TypeComparison::Equal),
                    TypeComparison::Extends => result = TypeComparison::Extends,
                    TypeComparison::Super | TypeComparison::Disjoint => {}
                }
            }
            Ok(result)
        }

        (TypeDef::Intersection(to_members), _) => {
            for member in to_members {
                if !compare_assignable(cache, symbols, member, from)?.is_assignable() {
                    return Ok(TypeComparison::Disjoint);
                }
            }
            Ok(TypeComparison::Extends)
        }

        _ => Ok(TypeComparison::Disjoint),
    }
}

fn compare_concrete(
    cache: &TypeCache,
    symbols: &dyn SymbolStore,
    to: &TypeDef,
    from: &TypeDef,
) -> TypeComparison {
    let (Some(to_base), Some(from_base)) = (to.concrete_url(), from.concrete_url()) else {
        return TypeComparison::Disjoint;
    };
    let to_args = to.type_arguments();
    let from_args = from.type_arguments();

    if to_base == from_base {
        // A bare base accepts any instantiation of itself.
        return if to_args.is_empty() {
            TypeComparison::Extends
        } else {
            TypeComparison::Disjoint
        };
    }

    let from_signature = TypeSignature::from_store(symbols, from);
    if let Some(ancestor) = from_signature.ancestor_with_base(to_base) {
        if to_args.is_empty() || ancestor.type_arguments() == to_args {
            return TypeComparison::Extends;
        }
    }

    let to_signature = TypeSignature::from_store(symbols, to);
    if let Some(ancestor) = to_signature.ancestor_with_base(from_base) {
        if from_args.is_empty() || ancestor.type_arguments() == from_args {
            return TypeComparison::Super;
        }
    }

    if symbols.symbol_kind(to_base) == Some(SymbolKind::Concept)
        && is_implementable(cache, symbols, to_base, from)
    {
        return TypeComparison::Extends;
    }

    TypeComparison::Disjoint
}
