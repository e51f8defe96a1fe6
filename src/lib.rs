//! notica - a command-line notification dispatcher.
//!
//! Resolves one effective configuration per invocation from built-in
//! defaults, a discovered config file, environment variables, and
//! command-line flags, then derives the set of notification services to
//! activate and fans the notification out to them.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod services;
