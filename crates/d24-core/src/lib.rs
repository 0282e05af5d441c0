#![deny(missing_docs)]
//! # d24-core: Foundational Types for Drivers24
//!
//! This crate holds the pieces of the Drivers24 marketplace client that do
//! not touch the network: field validators, validated identifier newtypes,
//! account roles, marketplace records, the driver search query contract and the error hierarchy.
//! Every other crate in the workspace depends on `d24-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validators are pure.** [`validation`] functions take a raw string and
//!    return a [`ValidationResult`] with a fixed, human-readable reason. The
//!    same reasons back the newtype constructors in [`identity`].
//!
//! 2. **Newtype wrappers for identifiers.** `DriverId`, `BookingId`,
//!    `UserId`, `DlNumber`, `PanNumber`, `AadharNumber` and friends. No bare
//!    strings where a document number or backend id is meant.
//!
//! 3. **Deterministic search queries.** [`SearchQuery`] yields the same
//!    path and query pairs for the same inputs, with unset filters omitted.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `d24-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod identity;
pub mod role;
pub mod search;
pub mod validation;

// Re-export primary types for ergonomic imports.
pub use domain::{
    Booking, BookingStatus, DriverFullInfo, DriverProfile, DriverSummary, GuestDriverRegistration,
    User, UserSummary,
};
pub use error::{SearchError, StateTransitionError, ValidationError};
pub use identity::{
    AadharNumber, BookingId, DlNumber, DriverId, Email, PanNumber, PhoneNumber, Pincode, UserId,
};
pub use role::Role;
pub use search::{
    DriverFilters, Pagination, SearchFeedback, SearchQuery, SearchState, NO_DRIVERS_MESSAGE, PAGE_SIZE,
};
pub use validation::{Field, FieldFailure, ValidationResult};
