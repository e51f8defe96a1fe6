//! Configuration values.
//!
//! The merged view only deals in two value kinds: a single string, or an
//! ordered sequence of strings (used for multi-valued settings such as the
//! default-service list). Every layer normalizes into this shape.

use serde::{Deserialize, Serialize};

/// A single configuration binding's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A scalar setting.
    Str(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

impl ConfigValue {
    /// Render the value as a single string.
    ///
    /// Lists are joined with a single space, the inverse of the
    /// whitespace-splitting coercion in [`ConfigValue::to_list`].
    pub fn to_string_value(&self) -> String {
        match self {
            ConfigValue::Str(s) => s.clone(),
            ConfigValue::List(items) => items.join(" "),
        }
    }

    /// Render the value as a list of strings.
    ///
    /// A scalar is split on whitespace, so an environment variable like
    /// `NOTICA_DEFAULT="slack banner"` yields a two-element sequence. An
    /// empty scalar yields an empty list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            ConfigValue::Str(s) => s.split_whitespace().map(str::to_string).collect(),
            ConfigValue::List(items) => items.clone(),
        }
    }

    /// True for both the empty string and the empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            ConfigValue::Str(s) => s.is_empty(),
            ConfigValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Str(s)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        ConfigValue::List(items)
    }
}

impl From<&[&str]> for ConfigValue {
    fn from(items: &[&str]) -> Self {
        ConfigValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}
