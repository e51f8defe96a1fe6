//! Layered configuration resolution.
//!
//! One effective configuration is resolved per invocation from four ranked
//! sources, in ascending precedence (later overrides earlier):
//!
//! 1. **Defaults** - the built-in key catalogue in [`keys`]
//! 2. **File** - `notica.yaml`, discovered in ranked directories
//! 3. **Environment** - `NOTICA_*` variables, read lazily at lookup time
//! 4. **Flags** - only flags the user explicitly set on the command line
//!
//! ## Environment Variables
//! Every recognized key binds exactly one variable, derived from the dotted
//! key: `banner.sound` -> `NOTICA_BANNER_SOUND`. The flat selector and
//! message keys bind `NOTICA_DEFAULT` and `NOTICA_MESSAGE`.
//!
//! ## Lookup
//! [`Settings`] scans the layers from highest to lowest precedence and
//! returns the first binding; absence is an empty value, never an error.

mod env;
mod file;
mod keys;
mod resolver;
mod value;

pub use env::{EnvLayer, EnvSource, MockEnv, StdEnv};
pub use file::{CONFIG_FILE_NAME, FileLayer, default_search_paths};
pub use keys::{BASE_DEFAULT_COUNT, ENV_PREFIX, base_defaults, env_var_for, key_env_bindings};
pub use resolver::{SearchPaths, Settings, configure, configure_with_env};
pub use value::ConfigValue;
