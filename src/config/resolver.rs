//! Layer composition and the merged settings view.
//!
//! [`configure`] assembles the four layers in fixed ascending precedence:
//! defaults, file, environment, flags. The layers stay separate lookup
//! surfaces; resolution scans them from highest to lowest and takes the
//! first binding. Eagerly merging into one map was rejected because an
//! unset flag's default value would then shadow real file and environment
//! bindings — only flags the user explicitly set may participate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::env::{EnvLayer, EnvSource, StdEnv};
use super::file::{FileLayer, default_search_paths};
use super::keys::base_defaults;
use super::value::ConfigValue;
use crate::cli::FlagSet;
use crate::error::ConfigError;

/// Where to look for the configuration file.
#[derive(Debug, Clone)]
pub struct SearchPaths {
    /// Ranked directories searched for the recognized file name.
    pub dirs: Vec<PathBuf>,
    /// Explicit file path (`--config`); set, it bypasses the search and a
    /// missing file becomes an error.
    pub explicit_file: Option<PathBuf>,
}

impl SearchPaths {
    /// The production search order.
    pub fn discover() -> Self {
        Self {
            dirs: default_search_paths(),
            explicit_file: None,
        }
    }

    /// Search only the given directories.
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            explicit_file: None,
        }
    }

    /// Check `dir` before everything else. Tests prepend their tempdir so
    /// a fixture file is found first.
    pub fn prepend(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(0, dir.into());
        self
    }

    /// Load exactly this file instead of searching.
    pub fn explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self::discover()
    }
}

/// The read-only merged configuration view.
///
/// Constructed once per invocation by [`configure`]; safe for concurrent
/// reads afterwards. The only mutation path is [`Settings::reload_file`],
/// which must not race in-flight reads.
pub struct Settings {
    defaults: HashMap<String, ConfigValue>,
    file: FileLayer,
    env: EnvLayer,
    flags: FlagSet,
}

impl Settings {
    /// Resolve a key against the layers, highest precedence first.
    ///
    /// Keys are case-insensitive. Returns `None` only when no layer binds
    /// the key; recognized keys always resolve because the default table
    /// binds all of them.
    pub fn lookup(&self, key: &str) -> Option<ConfigValue> {
        let key = key.to_ascii_lowercase();
        self.flags
            .get(&key)
            .cloned()
            .or_else(|| self.env.get(&key))
            .or_else(|| self.file.get(&key).cloned())
            .or_else(|| self.defaults.get(&key).cloned())
    }

    /// The key's value as a string; empty when unbound.
    pub fn get_string(&self, key: &str) -> String {
        self.lookup(key)
            .map(|value| value.to_string_value())
            .unwrap_or_default()
    }

    /// The key's value as a string list; empty when unbound. Scalar values
    /// are split on whitespace.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .map(|value| value.to_list())
            .unwrap_or_default()
    }

    /// Path of the config file actually loaded, or `None`.
    pub fn config_path(&self) -> Option<&Path> {
        self.file.path()
    }

    /// Replace the file layer's bindings with newly parsed content.
    ///
    /// Overwrites rather than merges, so reloading with empty content makes
    /// file-sourced keys fall through to defaults again.
    pub fn reload_file(&mut self, content: &str) -> Result<(), ConfigError> {
        self.file.reload_from_str(content)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("defaults", &self.defaults.len())
            .field("file", &self.file.len())
            .field("config_path", &self.file.path())
            .finish_non_exhaustive()
    }
}

/// Build the merged view from the process environment.
pub fn configure(paths: &SearchPaths, flags: FlagSet) -> Result<Settings, ConfigError> {
    configure_with_env(paths, flags, Arc::new(StdEnv))
}

/// Build the merged view with an injected environment source.
///
/// Steps, in layer order: install the default table, locate and load the
/// config file (absence leaves the layer empty), bind the environment, and
/// install the explicitly-set flags.
pub fn configure_with_env(
    paths: &SearchPaths,
    flags: FlagSet,
    source: Arc<dyn EnvSource>,
) -> Result<Settings, ConfigError> {
    let defaults: HashMap<String, ConfigValue> = base_defaults()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let file = match &paths.explicit_file {
        Some(path) => FileLayer::load_path(path)?,
        None => FileLayer::locate_and_load(&paths.dirs)?,
    };
    match file.path() {
        Some(path) => debug!(path = %path.display(), keys = file.len(), "loaded config file"),
        None => debug!("no config file found; file layer is empty"),
    }

    let env = EnvLayer::bind(source);

    Ok(Settings {
        defaults,
        file,
        env,
        flags,
    })
}
