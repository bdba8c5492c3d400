//! Symbol addresses.

use std::fmt;
use std::sync::Arc;

/// Identity of a declaration: the module it lives in plus its dotted path.
///
/// A url without a location refers to a symbol in the module being compiled.
/// Cloning shares the underlying strings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolUrl {
    location: Option<Arc<str>>,
    path: Arc<str>,
}

impl SymbolUrl {
    /// A symbol declared in module `location`.
    pub fn new(location: &str, path: &str) -> Self {
        SymbolUrl {
            location: Some(Arc::from(location)),
            path: Arc::from(path),
        }
    }

    /// A symbol declared in the current module.
    pub fn local(path: &str) -> Self {
        SymbolUrl {
            location: None,
            path: Arc::from(path),
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the dotted path.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// A sibling url in the same module with `name` appended to this path.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        SymbolUrl {
            location: self.location.clone(),
            path: Arc::from(format!("{}.{name}", self.path)),
        }
    }

    pub fn is_local(&self) -> bool {
        self.location.is_none()
    }
}

impl fmt::Display for SymbolUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{location}#{}", self.path),
            None => write!(f, "#{}", self.path),
        }
    }
}

impl fmt::Debug for SymbolUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolUrl({self})")
    }
}
