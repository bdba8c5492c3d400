//! Generic parameter declarations.

use std::fmt;

use crate::TypeDef;

/// Direction in which a generic parameter may vary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Variance {
    Covariant,
    Contravariant,
    #[default]
    Invariant,
}

/// Constraint relating a generic parameter to its bound type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    #[default]
    None,
    /// The argument must be the bound or one of its subtypes.
    Extends,
    /// The argument must be the bound or one of its supertypes.
    Super,
}

impl fmt::Display for BoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundType::None => f.write_str("none"),
            BoundType::Extends => f.write_str("extends"),
            BoundType::Super => f.write_str("super"),
        }
    }
}

/// One generic parameter of a template, e.g. `T extends Number`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateParameter {
    /// Position within the template, starting at zero.
    pub index: u32,
    pub name: String,
    pub variance: Variance,
    pub bound: BoundType,
    /// Present iff `bound` is not [`BoundType::None`].
    pub bound_type: Option<TypeDef>,
}

impl TemplateParameter {
    /// An unbounded invariant parameter.
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        TemplateParameter {
            index,
            name: name.into(),
            variance: Variance::Invariant,
            bound: BoundType::None,
            bound_type: None,
        }
    }

    #[must_use]
    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    #[must_use]
    pub fn extends(mut self, bound_type: TypeDef) -> Self {
        self.bound = BoundType::Extends;
        self.bound_type = Some(bound_type);
        self
    }

    #[must_use]
    pub fn super_of(mut self, bound_type: TypeDef) -> Self {
        self.bound = BoundType::Super;
        self.bound_type = Some(bound_type);
        self
    }
}

impl fmt::Display for TemplateParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound_type {
            Some(bound_type) if self.bound != BoundType::None => {
                write!(f, "{} {} {bound_type}", self.name, self.bound)
            }
            _ => f.write_str(&self.name),
        }
    }
}
