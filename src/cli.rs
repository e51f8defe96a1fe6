//! Command-line flag definitions.
//!
//! The flag surface splits in two: one boolean selector flag per known
//! service, and auxiliary flags (message, verbosity, logging target, config
//! path). Service flags are `Option<bool>` so that "the user touched this
//! flag" is distinguishable from "left at default" — precedence depends on
//! that bit, and `--slack=false` must not behave like `--slack`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigValue;
use crate::services::ServiceName;

/// Trigger a notification through one or more configured services.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Notification message body (overrides config)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Path to configuration file (skips directory search)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: off, stdout, stderr (default), or a filename
    #[arg(long, default_value = "stderr")]
    pub log: String,

    /// Send a desktop banner notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub banner: Option<bool>,

    /// Send a BearyChat notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub bearychat: Option<bool>,

    /// Send a HipChat notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub hipchat: Option<bool>,

    /// Send a Pushbullet notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub pushbullet: Option<bool>,

    /// Send a Pushover notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub pushover: Option<bool>,

    /// Send a Pushsafer notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub pushsafer: Option<bool>,

    /// Send a Simplepush notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub simplepush: Option<bool>,

    /// Send a Slack notification
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub slack: Option<bool>,

    /// Speak the notification out loud
    #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub speech: Option<bool>,
}

impl Cli {
    /// The parsed service-selector flags, touched or not.
    fn service_flags(&self) -> [(ServiceName, Option<bool>); 9] {
        [
            (ServiceName::Banner, self.banner),
            (ServiceName::Bearychat, self.bearychat),
            (ServiceName::Hipchat, self.hipchat),
            (ServiceName::Pushbullet, self.pushbullet),
            (ServiceName::Pushover, self.pushover),
            (ServiceName::Pushsafer, self.pushsafer),
            (ServiceName::Simplepush, self.simplepush),
            (ServiceName::Slack, self.slack),
            (ServiceName::Speech, self.speech),
        ]
    }

    /// Reduce the parsed command line to the flags the user actually set.
    pub fn flag_set(&self) -> FlagSet {
        let mut flags = FlagSet::new();
        for (service, state) in self.service_flags() {
            if let Some(enabled) = state {
                flags.set_service(service, enabled);
            }
        }
        if let Some(message) = &self.message {
            flags.set("message", message.as_str());
        }
        if self.verbose {
            flags.set("verbose", "true");
        }
        flags
    }
}

/// The explicitly-set flags for one invocation.
///
/// Only touched flags appear here; an unset flag contributes nothing and so
/// can never shadow a file, environment, or default binding. Service
/// selectors are kept typed alongside their key bindings so activation never
/// has to guess which flags select services.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    values: BTreeMap<String, ConfigValue>,
    services: BTreeMap<ServiceName, bool>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-service flag as explicitly set.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(key.to_ascii_lowercase(), value.into());
    }

    /// Record a service-selector flag as explicitly set.
    pub fn set_service(&mut self, service: ServiceName, enabled: bool) {
        self.services.insert(service, enabled);
        self.values
            .insert(service.as_str().to_string(), ConfigValue::from(enabled.to_string()));
    }

    /// Layer lookup: the value of a touched flag bound to `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Touched service-selector flags with their resolved values.
    pub fn service_overrides(&self) -> impl Iterator<Item = (ServiceName, bool)> + '_ {
        self.services.iter().map(|(&service, &enabled)| (service, enabled))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
