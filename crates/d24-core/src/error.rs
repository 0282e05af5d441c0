//! # Error Hierarchy
//!
//! Structured error types for the Drivers24 client stack, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Every error raised here is a *local* error: it is produced before any
//! request reaches the backend, and the caller surfaces it inline.

use thiserror::Error;

/// Errors during state machine transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateTransitionError {
    /// The attempted event is not valid from the current state for this actor.
    #[error("invalid transition: cannot {event} a {from} booking as {actor}: {reason}")]
    InvalidTransition {
        /// The current state name.
        from: String,
        /// The attempted event name.
        event: String,
        /// The actor who attempted the event.
        actor: String,
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// The record is already in a state no client action can leave.
    #[error("{entity} is already in terminal state {state}")]
    AlreadyTerminal {
        /// What kind of record (e.g. "booking").
        entity: String,
        /// The terminal state name.
        state: String,
    },

    /// A status observed from the backend would move the record backwards.
    #[error("status regression from {from} to {to}")]
    Regression {
        /// The locally held state.
        from: String,
        /// The state reported by the backend.
        to: String,
    },
}

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces its format at construction time. The
/// message is the same human-readable reason the field validator reports,
/// so the two never drift apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email address is empty or not shaped like `local@domain.tld`.
    #[error("invalid email \"{value}\": {reason}")]
    InvalidEmail {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Phone number is not a 10-digit Indian mobile number.
    #[error("invalid phone number \"{0}\" (expected 10 digits starting with 6-9)")]
    InvalidPhone(String),

    /// Driving licence number does not follow the state/RTO/year/serial layout.
    #[error("invalid DL number \"{0}\" (expected e.g. MH01-20230001234)")]
    InvalidDlNumber(String),

    /// PAN does not match `AAAAA9999A`.
    #[error("invalid PAN \"{0}\" (expected e.g. ABCDE1234F)")]
    InvalidPan(String),

    /// Aadhar number is not 12 digits.
    #[error("invalid Aadhar number \"{0}\" (expected 12 digits)")]
    InvalidAadhar(String),

    /// Pincode is not 6 digits.
    #[error("invalid pincode \"{0}\" (expected 6 digits)")]
    InvalidPincode(String),

    /// A backend-issued identifier is empty.
    #[error("invalid {kind} identifier: must be non-empty")]
    EmptyIdentifier {
        /// Identifier kind (e.g. "driver").
        kind: &'static str,
    },

    /// Role string is not one of USER, DRIVER, ADMIN.
    #[error("invalid role \"{0}\" (expected USER, DRIVER or ADMIN)")]
    InvalidRole(String),
}

/// Errors while building a driver search query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The city field was empty after trimming.
    #[error("Please enter a city")]
    MissingCity,

    /// Requested page is zero.
    #[error("page numbers start at 1")]
    ZeroPage,
}
