//! The environment layer.
//!
//! Every recognized key is bound to exactly one environment variable (see
//! [`super::keys::env_var_for`]). The layer reads variables lazily at lookup
//! time rather than snapshotting at bind time, so a variable set after
//! binding is still visible through the merged view without re-binding.
//!
//! The environment itself is injected through [`EnvSource`], so the resolver
//! stays deterministic under test: scenarios use a [`MockEnv`] instead of
//! mutating process-global state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::keys::{env_var_for, key_env_bindings};
use super::value::ConfigValue;

/// A source of environment variables.
pub trait EnvSource: Send + Sync {
    /// Get the value of a variable by name, if set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A synthetic environment backed by a shared map.
///
/// Clones share the underlying map, so a test can keep a handle and mutate
/// the environment after the layer has been bound.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: Arc<RwLock<HashMap<String, String>>>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = Self::new();
        for (name, value) in pairs {
            env.set(name, value);
        }
        env
    }

    /// Set a variable. Visible to every clone of this environment.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.vars
            .write()
            .expect("env lock poisoned")
            .insert(name.into(), value.into());
    }

    /// Unset a variable.
    pub fn remove(&self, name: &str) {
        self.vars.write().expect("env lock poisoned").remove(name);
    }

    /// Unset every variable.
    pub fn clear(&self) {
        self.vars.write().expect("env lock poisoned").clear();
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.read().expect("env lock poisoned").get(name).cloned()
    }
}

/// The environment layer of the merged view.
///
/// Holds the key -> variable binding table and the injected source. A key
/// contributes a binding only while its variable is actually set; otherwise
/// lookup falls through to the file and default layers.
pub struct EnvLayer {
    source: Arc<dyn EnvSource>,
    bindings: HashMap<String, String>,
}

impl EnvLayer {
    /// Bind every recognized key to its canonical variable name.
    ///
    /// Binding registers names only; no variable is read until lookup.
    /// Re-binding the same source is idempotent.
    pub fn bind(source: Arc<dyn EnvSource>) -> Self {
        let bindings = key_env_bindings()
            .into_iter()
            .map(|(key, var)| (key.to_string(), var))
            .collect();
        Self { source, bindings }
    }

    /// Resolve a key through its bound variable, reading the environment now.
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        let var = match self.bindings.get(key) {
            Some(var) => var.clone(),
            // Unrecognized keys still honor the naming convention, so a
            // flag-only key like `verbose` can be overridden from the
            // environment without an entry in the default table.
            None => env_var_for(key),
        };
        self.source.get(&var).map(ConfigValue::from)
    }

    /// Number of recognized keys whose variable is currently set.
    pub fn bound_count(&self) -> usize {
        self.bindings
            .values()
            .filter(|var| self.source.get(var).is_some())
            .count()
    }
}

impl std::fmt::Debug for EnvLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvLayer")
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}
