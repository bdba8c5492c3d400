//! Interned type handles.

use std::fmt;

use quill_ir::{SymbolUrl, TypeDef};
use smallvec::SmallVec;

/// Index of a [`TypeHandle`] in the cache that created it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeHandleId(u32);

impl TypeHandleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeHandleId(raw)
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

/// Dense serialization address of a touched type.
///
/// Addresses run `0..N` in touch order and index the type-descriptor table
/// of the emitted object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAddress(u32);

impl TypeAddress {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeAddress(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One interned type.
///
/// Created once per distinct [`TypeDef`]; the address is assigned at most
/// once, when the type is first touched.
#[derive(Clone, Debug)]
pub struct TypeHandle {
    type_def: TypeDef,
    address: Option<TypeAddress>,
    supertype: Option<TypeHandleId>,
    /// Argument handles; member handles for unions and intersections.
    arguments: SmallVec<[TypeHandleId; 4]>,
    type_symbol: Option<SymbolUrl>,
}

impl TypeHandle {
    pub(crate) fn new(
        type_def: TypeDef,
        supertype: Option<TypeHandleId>,
        arguments: SmallVec<[TypeHandleId; 4]>,
    ) -> Self {
        let type_symbol = type_def.concrete_url().cloned();
        TypeHandle {
            type_def,
            address: None,
            supertype,
            arguments,
            type_symbol,
        }
    }

    pub fn type_def(&self) -> &TypeDef {
        &self.type_def
    }

    pub fn address(&self) -> Option<TypeAddress> {
        self.address
    }

    pub fn is_addressed(&self) -> bool {
        self.address.is_some()
    }

    pub fn supertype(&self) -> Option<TypeHandleId> {
        self.supertype
    }

    pub fn arguments(&self) -> &[TypeHandleId] {
        &self.arguments
    }

    /// Declaration the type is built on, for concrete types.
    pub fn type_symbol(&self) -> Option<&SymbolUrl> {
        self.type_symbol.as_ref()
    }

    pub(crate) fn assign_address(&mut self, address: TypeAddress) {
        if let Some(existing) = self.address {
            crate::invariant!(
                "type {} already has address {existing}, cannot assign {address}",
                self.type_def
            );
        }
        self.address = Some(address);
    }
}
