//! # d24-cli: Command-line client for Drivers24
//!
//! Provides the `d24` binary on top of `d24-client`.
//!
//! ## Subcommands
//!
//! - `d24 login` / `whoami` / `logout` / `complete`: account and session.
//! - `d24 search`: drivers in a city, one page at a time.
//! - `d24 book` / `bookings` / `cancel` / `contact`: the requester's side.
//! - `d24 requests` / `respond`: the driver's side.
//! - `d24 driver`: the driver's own profile and availability.
//! - `d24 register`: guest driver registration, step by step.
//! - `d24 admin`: counters, analytics, verification and booking history.
//!
//! The session (token, cached user, pending registration email) lives in a
//! JSON file between invocations, see [`context::CliContext`].

pub mod account;
pub mod admin;
pub mod bookings;
pub mod context;
pub mod driver;
pub mod register;
pub mod search;

use d24_client::{ClientError, Surface};

/// What to print for a failed command.
///
/// Client errors are shown the way the client classifies them. Transport
/// failures get the generic banner with details left to the log.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) => match client_err.surface() {
            Surface::Inline(msg) | Surface::Verbatim(msg) => msg,
            Surface::Banner(msg) => {
                tracing::debug!(error = %client_err, "request failed");
                msg
            }
            Surface::Redirect(route) => {
                format!("{client_err}; sign in again with `d24 login` ({route})")
            }
        },
        None => format!("{err:#}"),
    }
}
