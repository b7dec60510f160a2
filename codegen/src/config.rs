//! Generator configuration.

use std::collections::BTreeMap;

use heck::ToSnakeCase;

/// Default path of the runtime crate referenced by generated code.
pub const DEFAULT_RUNTIME_PATH: &str = "bytestream";

/// Options controlling the shape of generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Path of the crate providing `EoReader`, `EoWriter` and `EoSerialize`.
    pub runtime_path: String,
    /// Module path each package is generated into, by package name.
    ///
    /// Packages without an entry live at `crate::{package}`.
    pub module_paths: BTreeMap<String, String>,
    /// Name of the enum listing packet families.
    pub family_type: String,
    /// Name of the enum listing packet actions.
    pub action_type: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            module_paths: BTreeMap::new(),
            family_type: "PacketFamily".to_string(),
            action_type: "PacketAction".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the runtime crate path.
    #[must_use]
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Maps a package to the module path its types are generated into.
    #[must_use]
    pub fn with_module_path(mut self, package: impl Into<String>, path: impl Into<String>) -> Self {
        self.module_paths.insert(package.into(), path.into());
        self
    }

    /// The module path a package's types are reachable at.
    pub fn module_path(&self, package: &str) -> String {
        self.module_paths
            .get(package)
            .cloned()
            .unwrap_or_else(|| format!("crate::{}", package.to_snake_case()))
    }
}
