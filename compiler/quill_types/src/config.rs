//! Type cache configuration.

use quill_diagnostic::DiagnosticConfig;
use quill_ir::SymbolUrl;

/// Settings for one [`TypeCache`](crate::TypeCache).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Module declaring the synthetic function types.
    pub function_location: String,
    /// Name prefix of the function types; arity is appended.
    pub function_prefix: String,
    /// Largest arity with a declared function type.
    pub max_function_arity: usize,
    pub diagnostics: DiagnosticConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            function_location: "prelude".to_string(),
            function_prefix: "Function".to_string(),
            max_function_arity: 7,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Base symbol of function types taking `arity` parameters.
    pub fn function_url(&self, arity: usize) -> SymbolUrl {
        SymbolUrl::new(
            &self.function_location,
            &format!("{}{arity}", self.function_prefix),
        )
    }
}
