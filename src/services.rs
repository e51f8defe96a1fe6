//! Known notification services and activation resolution.
//!
//! Backends form a closed enumeration so the activation resolver can
//! partition command-line flags into service selectors and everything else
//! without string matching. The actual transports live behind the
//! [`crate::dispatch::Notifier`] seam and are not this crate's concern.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::cli::FlagSet;
use crate::config::Settings;

/// A notification backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceName {
    Banner,
    Bearychat,
    Hipchat,
    Pushbullet,
    Pushover,
    Pushsafer,
    Simplepush,
    Slack,
    Speech,
}

impl ServiceName {
    /// Every known service, in flag-declaration order.
    pub const ALL: [ServiceName; 9] = [
        ServiceName::Banner,
        ServiceName::Bearychat,
        ServiceName::Hipchat,
        ServiceName::Pushbullet,
        ServiceName::Pushover,
        ServiceName::Pushsafer,
        ServiceName::Simplepush,
        ServiceName::Slack,
        ServiceName::Speech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Banner => "banner",
            ServiceName::Bearychat => "bearychat",
            ServiceName::Hipchat => "hipchat",
            ServiceName::Pushbullet => "pushbullet",
            ServiceName::Pushover => "pushover",
            ServiceName::Pushsafer => "pushsafer",
            ServiceName::Simplepush => "simplepush",
            ServiceName::Slack => "slack",
            ServiceName::Speech => "speech",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured service name that is not in the known set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown service '{0}'")]
pub struct UnknownService(pub String);

impl FromStr for ServiceName {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ServiceName::ALL
            .into_iter()
            .find(|service| service.as_str() == lower)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// Compute the set of services to activate for this invocation.
///
/// Signals are reconciled in priority order:
///
/// 1. Service flags the user explicitly set to `true`: the result is exactly
///    those services, and every other signal is ignored. A flag explicitly
///    set to `false` does not count as an override on its own; it merely
///    fails to select, and resolution falls through.
/// 2. Otherwise, the merged `default` key. The general layer precedence
///    already orders environment over file over built-in defaults, and the
///    default table always binds the key, so the built-in fallback is the
///    same lookup rather than a special case.
///
/// Unknown names in a configured sequence are skipped with a warning. The
/// result can be empty (e.g. the selector was explicitly bound to an empty
/// value); callers treat that as "send nothing".
pub fn enabled_services(settings: &Settings, flags: &FlagSet) -> BTreeSet<ServiceName> {
    let explicit: BTreeSet<ServiceName> = flags
        .service_overrides()
        .filter(|(_, enabled)| *enabled)
        .map(|(service, _)| service)
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }

    let mut selected = BTreeSet::new();
    for name in settings.get_string_list("default") {
        match name.parse::<ServiceName>() {
            Ok(service) => {
                selected.insert(service);
            }
            Err(err) => warn!("{err} in default service list; skipping"),
        }
    }
    selected
}
