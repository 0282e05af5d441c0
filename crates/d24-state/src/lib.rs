//! # d24-state: Lifecycle Rules
//!
//! The rules that decide what may happen next to a Drivers24 record. All
//! checks run locally, before any request reaches the backend.
//!
//! ## State Machines
//!
//! - **Booking** ([`booking`]): `PENDING → ACCEPTED | REJECTED | CANCELLED`,
//!   and `ACCEPTED → COMPLETED` as observed from the backend. Each edge has
//!   exactly one permitted actor.
//!
//! - **Registration wizard** ([`wizard`]): six fixed steps, each gated on
//!   its own validators, ending in a guest-registration submission.
//!
//! - **Verification** ([`verification`]): admin-only, unverified to verified
//!   and never back. Availability is driver-only.

pub mod booking;
pub mod verification;
pub mod wizard;

// Re-export primary types.
pub use booking::{Actor, BookingAction, BookingEvent, DriverDecision};
pub use wizard::{
    Attachment, Attachments, GuestRegistrationPayload, RegistrationForm, RegistrationWizard, Step,
    Submission, WizardError, STEPS,
};
