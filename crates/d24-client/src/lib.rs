//! # d24-client: Typed client for the Drivers24 backend
//!
//! Sub-clients by resource:
//! - **Auth** (`/api/auth`): role selection, profile lookup, guest
//!   registration completion
//! - **Drivers** (`/api/drivers`): profiles, availability, city search,
//!   admin verification
//! - **Bookings** (`/api/bookings`): requests, answers, cancellation, contact
//!   disclosure
//! - **Guest** (`/api/drivers/register-guest`): pre-account registration
//! - **Admin** (`/api/admin`): counters, analytics, booking history
//!
//! ## Conventions
//!
//! Every response is an [`envelope::Envelope`] and is turned into
//! `Result<Reply<T>, ClientError>`. The bearer token comes from the
//! [`Session`] passed to each call; there is no ambient session. Requests
//! are never retried.
//!
//! Lifecycle checks from `d24-state` run before a request is built, so a
//! refused booking transition or an incomplete registration never reaches
//! the backend.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod config;
pub mod drivers;
pub mod envelope;
pub mod error;
pub mod guest;
pub mod inflight;
pub mod session;

pub use admin::{AdminBookingFilter, AdminClient};
pub use auth::{AuthClient, Identity};
pub use bookings::{BookingClient, NewBooking};
pub use config::{ApiConfig, ConfigError};
pub use drivers::{DriverClient, DriverProfileForm};
pub use envelope::Reply;
pub use error::{ClientError, Surface};
pub use guest::GuestClient;
pub use inflight::{ActionTicket, InFlight};
pub use session::{FileSessionStore, MemorySessionStore, Route, Session, SessionStore};

use std::time::Duration;

use envelope::Transport;

/// Top-level Drivers24 client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct D24Client {
    auth: AuthClient,
    drivers: DriverClient,
    bookings: BookingClient,
    guest: GuestClient,
    admin: AdminClient,
}

impl D24Client {
    /// Create a client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "client ready");
        let transport = Transport::new(http, config.base_url);

        Ok(Self {
            auth: AuthClient::new(transport.clone()),
            drivers: DriverClient::new(transport.clone()),
            bookings: BookingClient::new(transport.clone()),
            guest: GuestClient::new(transport.clone()),
            admin: AdminClient::new(transport),
        })
    }

    /// Access the auth client.
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Access the drivers client.
    pub fn drivers(&self) -> &DriverClient {
        &self.drivers
    }

    /// Access the bookings client.
    pub fn bookings(&self) -> &BookingClient {
        &self.bookings
    }

    /// Access the guest-registration client.
    pub fn guest(&self) -> &GuestClient {
        &self.guest
    }

    /// Access the admin client.
    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }
}
