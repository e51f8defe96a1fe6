//! The file layer: locate, parse, and (re)load the configuration file.
//!
//! Directories are searched in order for `notica.yaml`; the first hit wins
//! and at most one file is loaded. A missing file is not an error, the layer
//! simply stays empty. A file that exists but fails to parse is a fatal
//! [`ConfigError::Parse`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::value::ConfigValue;
use crate::error::ConfigError;

/// Recognized configuration file name.
pub const CONFIG_FILE_NAME: &str = "notica.yaml";

/// Default ranked search directories: the working directory, the platform
/// config directory, then the home directory. Callers may prepend more.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("notica"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home);
    }
    paths
}

/// The file layer of the merged view.
#[derive(Debug, Clone, Default)]
pub struct FileLayer {
    bindings: HashMap<String, ConfigValue>,
    path: Option<PathBuf>,
}

impl FileLayer {
    /// An empty layer, as used when no config file was found.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Search the ranked directories for [`CONFIG_FILE_NAME`] and load the
    /// first match. Finding nothing returns an empty layer, not an error.
    pub fn locate_and_load(search_paths: &[PathBuf]) -> Result<Self, ConfigError> {
        for dir in search_paths {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load_path(&candidate);
            }
        }
        Ok(Self::empty())
    }

    /// Load an explicitly named config file. Unlike discovery, a missing
    /// explicit file is an error: the user asked for that file.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bindings = parse_bindings(&content, path)?;
        Ok(Self {
            bindings,
            path: Some(path.to_path_buf()),
        })
    }

    /// Replace this layer's bindings with the parsed content.
    ///
    /// Prior bindings are overwritten, never merged into, so reloading with
    /// empty content simulates "no file" and leaves nothing stale behind.
    pub fn reload_from_str(&mut self, content: &str) -> Result<(), ConfigError> {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from("<inline>"));
        self.bindings = parse_bindings(content, &path)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.bindings.get(key)
    }

    /// Path of the file actually loaded, or `None` if discovery found none.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Parse YAML content into flat dotted-key bindings.
///
/// Nested mappings become dotted paths (`banner: {sound: Hero}` binds
/// `banner.sound`); scalars and sequences of scalars become values. Keys are
/// lowercased on install so lookups are case-insensitive.
fn parse_bindings(content: &str, path: &Path) -> Result<HashMap<String, ConfigValue>, ConfigError> {
    let doc: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut bindings = HashMap::new();
    match doc {
        serde_yaml::Value::Null => {}
        serde_yaml::Value::Mapping(mapping) => {
            flatten_mapping(&mapping, "", path, &mut bindings);
        }
        other => {
            warn!(
                path = %path.display(),
                "config file root is {}, expected a mapping; ignoring content",
                yaml_kind(&other)
            );
        }
    }
    Ok(bindings)
}

fn flatten_mapping(
    mapping: &serde_yaml::Mapping,
    prefix: &str,
    path: &Path,
    out: &mut HashMap<String, ConfigValue>,
) {
    for (key, value) in mapping {
        let Some(name) = key.as_str() else {
            warn!(path = %path.display(), "skipping non-string config key {:?}", key);
            continue;
        };
        let dotted = if prefix.is_empty() {
            name.to_ascii_lowercase()
        } else {
            format!("{prefix}.{}", name.to_ascii_lowercase())
        };

        match value {
            serde_yaml::Value::Mapping(nested) => {
                flatten_mapping(nested, &dotted, path, out);
            }
            serde_yaml::Value::Sequence(items) => {
                let list: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
                if list.len() != items.len() {
                    warn!(
                        path = %path.display(),
                        key = %dotted,
                        "skipping non-scalar entries in sequence"
                    );
                }
                out.insert(dotted, ConfigValue::List(list));
            }
            serde_yaml::Value::Null => {
                // Null means "not specified"; the key falls through to
                // lower-precedence layers.
            }
            scalar => {
                if let Some(s) = scalar_to_string(scalar) {
                    out.insert(dotted, ConfigValue::Str(s));
                } else {
                    warn!(path = %path.display(), key = %dotted, "skipping unsupported value");
                }
            }
        }
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
