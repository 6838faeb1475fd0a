//! Transform options.
//!
//! Options deserialize from the camelCase JSON an SWC plugin host passes in;
//! every field has a default, so `{}` is a valid configuration.

use serde::Deserialize;

/// Import sources recognized as the GraphQL macro when none are configured.
pub const DEFAULT_MODULES: &[&str] = &["graphql-tag.macro", "graphql.macro"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Modules whose default import (or named `gql` import) tags literals.
    pub modules: Vec<String>,
    /// Drop the macro import declarations after the pass.
    pub remove_imports: bool,
    /// Warn when a fragment name reappears with a different body.
    pub fragment_warnings: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            remove_imports: true,
            fragment_warnings: true,
        }
    }
}

impl TransformConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns true if `src` is one of the macro modules.
    pub fn is_macro_module(&self, src: &str) -> bool {
        self.modules.iter().any(|m| m == src)
    }
}
