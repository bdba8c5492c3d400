//! Placeholder substitution shared by both reifiers.

use quill_ir::{MemberError, SymbolUrl, TypeDef};
use quill_stack::guarded;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubstError {
    /// A placeholder of the substituted template has no binding.
    Unbound(TypeDef),
    /// Rebuilding a union or intersection failed.
    Member(MemberError),
}

/// Replace every placeholder of `template` in `type_def` with its binding.
///
/// Placeholders of other templates are kept; their arguments are still
/// substituted. A bound placeholder applied to arguments takes the binding's
/// base with the substituted arguments.
pub(crate) fn substitute(
    type_def: &TypeDef,
    template: Option<&SymbolUrl>,
    bindings: &[Option<TypeDef>],
) -> Result<TypeDef, SubstError> {
    guarded(|| match type_def {
        TypeDef::Concrete { args, .. } => {
            Ok(type_def.with_arguments(substitute_all(args, template, bindings)?))
        }
        TypeDef::Placeholder {
            template: owner,
            index,
            args,
        } => {
            let args = substitute_all(args, template, bindings)?;
            if Some(owner) != template {
                return Ok(type_def.with_arguments(args));
            }
            let Some(Some(binding)) = usize::try_from(*index)
                .ok()
                .and_then(|slot| bindings.get(slot))
            else {
                return Err(SubstError::Unbound(type_def.clone()));
            };
            Ok(if args.is_empty() {
                binding.clone()
            } else {
                binding.with_arguments(args)
            })
        }
        TypeDef::Union(members) => {
            let members = substitute_all(members.as_slice(), template, bindings)?;
            TypeDef::union(members).map_err(SubstError::Member)
        }
        TypeDef::Intersection(members) => {
            let members = substitute_all(members.as_slice(), template, bindings)?;
            TypeDef::intersection(members).map_err(SubstError::Member)
        }
        TypeDef::NoReturn => Ok(TypeDef::NoReturn),
    })
}

fn substitute_all(
    defs: &[TypeDef],
    template: Option<&SymbolUrl>,
    bindings: &[Option<TypeDef>],
) -> Result<Vec<TypeDef>, SubstError> {
    defs.iter()
        .map(|def| substitute(def, template, bindings))
        .collect()
}
