//! Notification dispatch.
//!
//! The core hands each active service to a [`Notifier`] together with the
//! merged settings view. Backends are black boxes behind this seam; the only
//! contract the core relies on is that `send` does not mutate the view and
//! that one backend's failure never blocks the others.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::DispatchError;
use crate::services::ServiceName;

/// A capability that delivers a notification through one backend.
pub trait Notifier {
    fn send(&self, service: ServiceName, settings: &Settings) -> Result<(), DispatchError>;
}

/// Deliver to every active service, collecting per-service failures.
///
/// Failures are reported and returned but never abort sibling dispatches.
/// An empty activation set is fine: nothing is sent and nothing fails.
pub fn dispatch(
    notifier: &dyn Notifier,
    services: &BTreeSet<ServiceName>,
    settings: &Settings,
) -> Vec<(ServiceName, DispatchError)> {
    let mut failures = Vec::new();
    for &service in services {
        match notifier.send(service, settings) {
            Ok(()) => debug!(service = %service, "notification sent"),
            Err(err) => {
                warn!(service = %service, error = %err, "notification failed");
                failures.push((service, err));
            }
        }
    }
    failures
}

/// Stand-in backend that prints the notification to stdout.
///
/// Real transports (Slack API, desktop banners, speech synthesis) live
/// outside this crate; the binary uses this notifier so an invocation is
/// observable end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, service: ServiceName, settings: &Settings) -> Result<(), DispatchError> {
        let message = settings.get_string("message");
        println!("[{service}] {message}");
        Ok(())
    }
}
