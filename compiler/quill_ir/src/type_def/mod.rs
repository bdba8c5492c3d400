//! Structural type descriptions.
//!
//! A [`TypeDef`] is the intern key of the type cache: two descriptions are the
//! same type iff they compare equal. Union and intersection member lists are
//! canonical (deduplicated, ordered by display form), so `Int | Float` and
//! `Float | Int` are one key. [`Members`] can only be built through
//! [`TypeDef::union`] and [`TypeDef::intersection`], which enforce that.

use std::fmt;

use crate::SymbolUrl;

/// One type, described by value.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeDef {
    /// A declared type applied to zero or more arguments: `Seq[Int]`.
    Concrete { base: SymbolUrl, args: Vec<TypeDef> },
    /// Generic parameter `index` of the template declared by `template`.
    Placeholder {
        template: SymbolUrl,
        index: u32,
        args: Vec<TypeDef>,
    },
    Union(Members),
    Intersection(Members),
    /// Result type of a call that never returns.
    NoReturn,
}

/// Variant tag of a [`TypeDef`], for logging and messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Concrete,
    Placeholder,
    Union,
    Intersection,
    NoReturn,
}

impl fmt::Display for TypeDefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeDefKind::Concrete => "concrete",
            TypeDefKind::Placeholder => "placeholder",
            TypeDefKind::Union => "union",
            TypeDefKind::Intersection => "intersection",
            TypeDefKind::NoReturn => "no-return",
        };
        f.write_str(name)
    }
}

/// Canonical member list of a union or intersection. Never empty.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Members(Vec<TypeDef>);

impl Members {
    pub fn as_slice(&self) -> &[TypeDef] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeDef> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn canonical(mut members: Vec<TypeDef>) -> Self {
        members.sort_by_cached_key(ToString::to_string);
        members.dedup();
        Members(members)
    }
}

impl<'a> IntoIterator for &'a Members {
    type Item = &'a TypeDef;
    type IntoIter = std::slice::Iter<'a, TypeDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Why a union or intersection could not be formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberError {
    /// No members were given.
    Empty,
    /// A member of a kind that cannot appear at that position.
    InvalidMember { kind: TypeDefKind, member: TypeDef },
}

impl fmt::Display for MemberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberError::Empty => write!(f, "type set must have at least one member"),
            MemberError::InvalidMember { kind, member } => {
                write!(f, "{member} is not a valid {kind} member")
            }
        }
    }
}

impl std::error::Error for MemberError {}

impl TypeDef {
    pub fn concrete(base: SymbolUrl, args: Vec<TypeDef>) -> Self {
        TypeDef::Concrete { base, args }
    }

    /// A concrete type with no arguments.
    pub fn simple(base: SymbolUrl) -> Self {
        TypeDef::Concrete {
            base,
            args: Vec::new(),
        }
    }

    pub fn placeholder(template: SymbolUrl, index: u32, args: Vec<TypeDef>) -> Self {
        TypeDef::Placeholder {
            template,
            index,
            args,
        }
    }

    /// Build a canonical union.
    ///
    /// Members may be concrete, placeholder or intersection types. Nested
    /// unions are flattened into the result.
    pub fn union(members: impl IntoIterator<Item = TypeDef>) -> Result<Self, MemberError> {
        let mut flat = Vec::new();
        for member in members {
            match member {
                TypeDef::Concrete { .. } | TypeDef::Placeholder { .. } | TypeDef::Intersection(_) => {
                    flat.push(member);
                }
                TypeDef::Union(inner) => flat.extend(inner.0),
                TypeDef::NoReturn => {
                    return Err(MemberError::InvalidMember {
                        kind: TypeDefKind::Union,
                        member,
                    })
                }
            }
        }
        if flat.is_empty() {
            return Err(MemberError::Empty);
        }
        Ok(TypeDef::Union(Members::canonical(flat)))
    }

    /// Build a canonical intersection of concrete or placeholder members.
    pub fn intersection(members: impl IntoIterator<Item = TypeDef>) -> Result<Self, MemberError> {
        let mut list = Vec::new();
        for member in members {
            match member {
                TypeDef::Concrete { .. } | TypeDef::Placeholder { .. } => list.push(member),
                other => {
                    return Err(MemberError::InvalidMember {
                        kind: TypeDefKind::Intersection,
                        member: other,
                    })
                }
            }
        }
        if list.is_empty() {
            return Err(MemberError::Empty);
        }
        Ok(TypeDef::Intersection(Members::canonical(list)))
    }

    pub fn kind(&self) -> TypeDefKind {
        match self {
            TypeDef::Concrete { .. } => TypeDefKind::Concrete,
            TypeDef::Placeholder { .. } => TypeDefKind::Placeholder,
            TypeDef::Union(_) => TypeDefKind::Union,
            TypeDef::Intersection(_) => TypeDefKind::Intersection,
            TypeDef::NoReturn => TypeDefKind::NoReturn,
        }
    }

    /// Base symbol of a concrete type.
    pub fn concrete_url(&self) -> Option<&SymbolUrl> {
        match self {
            TypeDef::Concrete { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Owning template and index of a placeholder.
    pub fn placeholder_of(&self) -> Option<(&SymbolUrl, u32)> {
        match self {
            TypeDef::Placeholder {
                template, index, ..
            } => Some((template, *index)),
            _ => None,
        }
    }

    /// Own type arguments of a concrete or placeholder type; empty otherwise.
    pub fn type_arguments(&self) -> &[TypeDef] {
        match self {
            TypeDef::Concrete { args, .. } | TypeDef::Placeholder { args, .. } => args,
            _ => &[],
        }
    }

    /// Members of a union or intersection; empty otherwise.
    pub fn members(&self) -> &[TypeDef] {
        match self {
            TypeDef::Union(members) | TypeDef::Intersection(members) => members.as_slice(),
            _ => &[],
        }
    }

    /// Every type this one is built from: arguments or members.
    pub fn components(&self) -> &[TypeDef] {
        match self {
            TypeDef::Concrete { args, .. } | TypeDef::Placeholder { args, .. } => args,
            TypeDef::Union(members) | TypeDef::Intersection(members) => members.as_slice(),
            TypeDef::NoReturn => &[],
        }
    }

    /// Same type with its own arguments replaced.
    ///
    /// Only meaningful for concrete and placeholder types; other variants are
    /// returned unchanged.
    #[must_use]
    pub fn with_arguments(&self, new_args: Vec<TypeDef>) -> TypeDef {
        match self {
            TypeDef::Concrete { base, .. } => TypeDef::concrete(base.clone(), new_args),
            TypeDef::Placeholder {
                template, index, ..
            } => TypeDef::placeholder(template.clone(), *index, new_args),
            other => other.clone(),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, TypeDef::Concrete { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TypeDef::Placeholder { .. })
    }

    pub fn is_union(&self) -> bool {
        matches!(self, TypeDef::Union(_))
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[TypeDef]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str("]")
}

fn write_members(f: &mut fmt::Formatter<'_>, members: &Members, sep: &str) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{member}")?;
    }
    Ok(())
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDef::Concrete { base, args } => {
                write!(f, "{base}")?;
                write_args(f, args)
            }
            TypeDef::Placeholder {
                template,
                index,
                args,
            } => {
                write!(f, "{index}@{template}")?;
                write_args(f, args)
            }
            TypeDef::Union(members) => write_members(f, members, " | "),
            TypeDef::Intersection(members) => write_members(f, members, " & "),
            TypeDef::NoReturn => f.write_str("(No Return)"),
        }
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDef({self})")
    }
}
