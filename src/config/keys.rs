//! The recognized key catalogue: built-in defaults and environment bindings.
//!
//! The default table is the only layer guaranteed to bind every recognized
//! key. Its entry count is pinned by [`BASE_DEFAULT_COUNT`] so that adding or
//! removing a key forces the regression tests to be updated deliberately.

use super::value::ConfigValue;

/// Common prefix for every bound environment variable.
pub const ENV_PREFIX: &str = "NOTICA";

/// Number of entries in the default table.
///
/// Bump this when a default key is added or removed.
pub const BASE_DEFAULT_COUNT: usize = 20;

/// Built-in default for a single key.
enum DefaultValue {
    Str(&'static str),
    List(&'static [&'static str]),
}

/// The default table. Keys are dotted, lowercase paths: flat keys for global
/// settings, `<service>.<setting>` for per-service settings.
///
/// `default` is the default-service selector consulted by service activation
/// when no service flag is explicitly set.
const BASE_DEFAULTS: &[(&str, DefaultValue)] = &[
    ("default", DefaultValue::List(&["banner"])),
    ("message", DefaultValue::Str("Done!")),
    ("banner.sound", DefaultValue::Str("Ping")),
    ("banner.sound_fail", DefaultValue::Str("Basso")),
    ("bearychat.incoming_hook_uri", DefaultValue::Str("")),
    ("bearychat.channel", DefaultValue::Str("")),
    ("hipchat.token", DefaultValue::Str("")),
    ("hipchat.room", DefaultValue::Str("")),
    ("pushbullet.token", DefaultValue::Str("")),
    ("pushbullet.device", DefaultValue::Str("")),
    ("pushover.token", DefaultValue::Str("")),
    ("pushover.user", DefaultValue::Str("")),
    ("pushsafer.key", DefaultValue::Str("")),
    ("simplepush.key", DefaultValue::Str("")),
    ("simplepush.event", DefaultValue::Str("")),
    ("slack.token", DefaultValue::Str("")),
    ("slack.channel", DefaultValue::Str("")),
    ("slack.username", DefaultValue::Str("notica")),
    ("speech.voice", DefaultValue::Str("Alex")),
    ("speech.rate", DefaultValue::Str("200")),
];

/// Iterate the default table as concrete bindings.
pub fn base_defaults() -> impl Iterator<Item = (&'static str, ConfigValue)> {
    BASE_DEFAULTS.iter().map(|(key, default)| {
        let value = match default {
            DefaultValue::Str(s) => ConfigValue::from(*s),
            DefaultValue::List(items) => ConfigValue::from(*items),
        };
        (*key, value)
    })
}

/// The canonical environment variable name for a recognized key.
///
/// `banner.sound_fail` maps to `NOTICA_BANNER_SOUND_FAIL`; the flat
/// `default` key maps to `NOTICA_DEFAULT`.
pub fn env_var_for(key: &str) -> String {
    format!("{ENV_PREFIX}_{}", key.to_ascii_uppercase().replace('.', "_"))
}

/// The full key -> environment variable binding table, one entry per
/// recognized key. Tests use this to enumerate and clear all relevant
/// environment state.
pub fn key_env_bindings() -> Vec<(&'static str, String)> {
    BASE_DEFAULTS
        .iter()
        .map(|(key, _)| (*key, env_var_for(key)))
        .collect()
}
