//! Integration tests for service activation and dispatch.
//!
//! Covers the three-branch activation priority (explicit service flags,
//! configured default sequence, built-in default) and the per-service
//! error-isolation contract of dispatch.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use notica::cli::{Cli, FlagSet};
use notica::config::{CONFIG_FILE_NAME, MockEnv, SearchPaths, Settings, configure_with_env};
use notica::dispatch::{Notifier, dispatch};
use notica::error::DispatchError;
use notica::services::{ServiceName, enabled_services};
use clap::Parser;
use tempfile::TempDir;

fn settings_with(temp: &TempDir, flags: FlagSet, env: MockEnv) -> Settings {
    let paths = SearchPaths::with_dirs(vec![temp.path().to_path_buf()]);
    configure_with_env(&paths, flags, Arc::new(env)).expect("configure failed")
}

fn names(set: &BTreeSet<ServiceName>) -> Vec<&'static str> {
    set.iter().map(|s| s.as_str()).collect()
}

#[test]
fn explicit_service_flag_overrides_everything() {
    let temp = TempDir::new().unwrap();
    // File and env both nominate other services; the flag must win.
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "default:\n  - hipchat\n",
    )
    .unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "pushover")]);

    let cli = Cli::try_parse_from(["notica", "--slack"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), env);

    let services = enabled_services(&settings, &flags);
    assert_eq!(names(&services), vec!["slack"]);
}

#[test]
fn multiple_service_flags_activate_all_of_them() {
    let temp = TempDir::new().unwrap();
    let cli = Cli::try_parse_from(["notica", "--slack", "--banner"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), MockEnv::new());

    let services = enabled_services(&settings, &flags);
    assert_eq!(names(&services), vec!["banner", "slack"]);
}

#[test]
fn non_service_flags_do_not_trigger_the_override() {
    let temp = TempDir::new().unwrap();
    let cli = Cli::try_parse_from(["notica", "--verbose"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), MockEnv::new());

    // We should end up taking the built-in default.
    let services = enabled_services(&settings, &flags);
    assert_eq!(names(&services), vec!["banner"]);
}

#[test]
fn service_flag_alongside_verbosity_still_wins() {
    let temp = TempDir::new().unwrap();
    let cli = Cli::try_parse_from(["notica", "--verbose", "--slack"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), MockEnv::new());

    let services = enabled_services(&settings, &flags);
    assert_eq!(names(&services), vec!["slack"]);
}

#[test]
fn false_only_service_flag_falls_through() {
    let temp = TempDir::new().unwrap();
    let cli = Cli::try_parse_from(["notica", "--slack=false"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), MockEnv::new());

    // "--slack=false" alone is not an override; the default applies, and
    // the activation set is not cleared to empty.
    let services = enabled_services(&settings, &flags);
    assert_eq!(names(&services), vec!["banner"]);
}

#[test]
fn env_default_overrides_builtin_default() {
    let temp = TempDir::new().unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "slack")]);
    let settings = settings_with(&temp, FlagSet::new(), env);

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["slack"]);
}

#[test]
fn env_default_accepts_a_whitespace_separated_list() {
    let temp = TempDir::new().unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "slack banner")]);
    let settings = settings_with(&temp, FlagSet::new(), env);

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["banner", "slack"]);
}

#[test]
fn file_default_overrides_builtin_but_not_env() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "default:\n  - hipchat\n",
    )
    .unwrap();

    let env = MockEnv::new();
    let settings = settings_with(&temp, FlagSet::new(), env.clone());

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["hipchat"]);

    // Environment outranks file for the selector key, same as any other.
    env.set("NOTICA_DEFAULT", "pushover");
    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["pushover"]);
}

#[test]
fn duplicate_names_in_the_sequence_are_deduplicated() {
    let temp = TempDir::new().unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "slack slack banner")]);
    let settings = settings_with(&temp, FlagSet::new(), env);

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["banner", "slack"]);
}

#[test]
fn unknown_names_in_the_sequence_are_skipped() {
    let temp = TempDir::new().unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "slack carrier_pigeon")]);
    let settings = settings_with(&temp, FlagSet::new(), env);

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["slack"]);
}

#[test]
fn no_flags_and_no_overrides_yields_builtin_default() {
    let temp = TempDir::new().unwrap();
    let settings = settings_with(&temp, FlagSet::new(), MockEnv::new());

    let services = enabled_services(&settings, &FlagSet::new());
    assert_eq!(names(&services), vec!["banner"]);
}

#[test]
fn empty_selector_yields_empty_set_without_panicking() {
    let temp = TempDir::new().unwrap();
    let env = MockEnv::from_pairs([("NOTICA_DEFAULT", "")]);
    let settings = settings_with(&temp, FlagSet::new(), env);

    let services = enabled_services(&settings, &FlagSet::new());
    assert!(services.is_empty());

    // Dispatching an empty set sends nothing and fails nothing.
    let recorder = RecordingNotifier::default();
    let failures = dispatch(&recorder, &services, &settings);
    assert!(failures.is_empty());
    assert!(recorder.sent().is_empty());
}

/// Notifier test double: records sends and fails a chosen set of services.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<ServiceName>>,
    fail: BTreeSet<ServiceName>,
}

impl RecordingNotifier {
    fn failing(services: impl IntoIterator<Item = ServiceName>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: services.into_iter().collect(),
        }
    }

    fn sent(&self) -> Vec<ServiceName> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, service: ServiceName, _settings: &Settings) -> Result<(), DispatchError> {
        if self.fail.contains(&service) {
            return Err(DispatchError::backend(service.as_str(), "simulated outage"));
        }
        self.sent.lock().unwrap().push(service);
        Ok(())
    }
}

#[test]
fn one_backend_failure_does_not_block_the_others() {
    let temp = TempDir::new().unwrap();
    let settings = settings_with(&temp, FlagSet::new(), MockEnv::new());

    let services: BTreeSet<ServiceName> =
        [ServiceName::Banner, ServiceName::Slack, ServiceName::Speech]
            .into_iter()
            .collect();
    let recorder = RecordingNotifier::failing([ServiceName::Slack]);

    let failures = dispatch(&recorder, &services, &settings);

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, ServiceName::Slack);
    // The siblings were still delivered.
    assert_eq!(
        recorder.sent(),
        vec![ServiceName::Banner, ServiceName::Speech]
    );
}

#[test]
fn dispatch_reads_the_merged_message() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "message: ship it\n").unwrap();

    let cli = Cli::try_parse_from(["notica", "--banner"]).unwrap();
    let flags = cli.flag_set();
    let settings = settings_with(&temp, flags.clone(), MockEnv::new());

    struct MessageCapture(Mutex<Vec<String>>);
    impl Notifier for MessageCapture {
        fn send(&self, _service: ServiceName, settings: &Settings) -> Result<(), DispatchError> {
            self.0.lock().unwrap().push(settings.get_string("message"));
            Ok(())
        }
    }

    let capture = MessageCapture(Mutex::new(Vec::new()));
    let services = enabled_services(&settings, &flags);
    let failures = dispatch(&capture, &services, &settings);

    assert!(failures.is_empty());
    assert_eq!(*capture.0.lock().unwrap(), vec!["ship it".to_string()]);
}
