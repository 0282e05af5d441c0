//! # Driver Verification and Availability
//!
//! Verification is admin-controlled and only ever moves from unverified to
//! verified. Availability belongs to the driver: only they toggle it, and
//! toggling it never touches existing bookings. Only available drivers are
//! offered for new bookings.

use chrono::{DateTime, Utc};

use d24_core::{DriverProfile, Role, StateTransitionError};

/// Mark a driver verified.
///
/// # Errors
///
/// [`StateTransitionError::InvalidTransition`] if `actor` is not an admin,
/// or [`StateTransitionError::AlreadyTerminal`] if the driver is already
/// verified.
pub fn verify(
    profile: &mut DriverProfile,
    actor: Role,
    at: DateTime<Utc>,
) -> Result<(), StateTransitionError> {
    if actor != Role::Admin {
        return Err(StateTransitionError::InvalidTransition {
            from: verification_state(profile.is_verified).to_string(),
            event: "verify".to_string(),
            actor: actor.to_string(),
            reason: "only admins verify drivers".to_string(),
        });
    }
    if profile.is_verified {
        return Err(StateTransitionError::AlreadyTerminal {
            entity: "driver".to_string(),
            state: verification_state(true).to_string(),
        });
    }
    tracing::debug!(driver = %profile.id, "driver verified");
    profile.is_verified = true;
    profile.verified_at = Some(at);
    Ok(())
}

/// Reconcile a local verification flag with the backend's.
///
/// # Errors
///
/// [`StateTransitionError::Regression`] if the backend reports a verified
/// driver as unverified.
pub fn observe_verification(
    local: bool,
    remote: bool,
) -> Result<bool, StateTransitionError> {
    if local && !remote {
        return Err(StateTransitionError::Regression {
            from: verification_state(local).to_string(),
            to: verification_state(remote).to_string(),
        });
    }
    Ok(remote)
}

fn verification_state(verified: bool) -> &'static str {
    if verified {
        "VERIFIED"
    } else {
        "UNVERIFIED"
    }
}

/// Set a driver's availability.
///
/// Returns whether the value changed.
///
/// # Errors
///
/// [`StateTransitionError::InvalidTransition`] if `actor` is not a driver.
pub fn set_availability(
    profile: &mut DriverProfile,
    actor: Role,
    available: bool,
) -> Result<bool, StateTransitionError> {
    if actor != Role::Driver {
        return Err(StateTransitionError::InvalidTransition {
            from: availability_state(profile.availability).to_string(),
            event: "set availability".to_string(),
            actor: actor.to_string(),
            reason: "availability is controlled by the driver".to_string(),
        });
    }
    let changed = profile.availability != available;
    profile.availability = available;
    Ok(changed)
}

fn availability_state(available: bool) -> &'static str {
    if available {
        "AVAILABLE"
    } else {
        "UNAVAILABLE"
    }
}

/// Whether a new booking may be offered for this driver.
pub fn is_bookable(profile: &DriverProfile) -> bool {
    profile.availability
}
