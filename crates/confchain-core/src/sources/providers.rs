//! Concrete source implementations.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use super::types::Source;

/// Process environment variables.
pub struct EnvSource;

impl Source for EnvSource {
    fn name(&self) -> &'static str {
        "env"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Context-local properties supplied by the host (e.g. per-project
/// overrides). Also the deterministic source used by tests.
pub struct MapSource {
    name: &'static str,
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self {
            name: "local",
            values,
        }
    }

    pub fn named(name: &'static str, values: HashMap<String, String>) -> Self {
        Self { name, values }
    }
}

impl Source for MapSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

// Process-wide property table, the analog of JVM system properties for a
// build host that wants -D-style overrides visible to every environment.
static GLOBAL_PROPERTIES: LazyLock<RwLock<HashMap<String, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Set a process-wide property. Intended for host startup (e.g. parsing
/// `-D key=value` CLI arguments) before resolution begins.
pub fn set_global_property(key: impl Into<String>, value: impl Into<String>) {
    let mut properties = GLOBAL_PROPERTIES
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    properties.insert(key.into(), value.into());
}

/// Process-wide properties table.
pub struct GlobalPropsSource;

impl Source for GlobalPropsSource {
    fn name(&self) -> &'static str {
        "global"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let properties = GLOBAL_PROPERTIES
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        properties.get(key).cloned()
    }
}
