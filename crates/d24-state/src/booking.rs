//! # Booking State Machine
//!
//! A booking starts `PENDING`. The requested driver accepts or rejects it,
//! or the requester cancels it while it is still pending. The backend alone
//! marks an accepted booking `COMPLETED`.
//!
//! ```text
//! PENDING ──accept (driver)──▶ ACCEPTED ──complete (backend)──▶ COMPLETED
//!    │
//!    ├────reject (driver)────▶ REJECTED
//!    │
//!    └────cancel (user)──────▶ CANCELLED
//! ```
//!
//! Every client-initiated event is checked here before a request is sent.
//! Statuses read back from the backend go through [`observe`], which accepts
//! forward moves (including completion) and rejects regressions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use d24_core::{Booking, BookingStatus, StateTransitionError};

/// Who is acting on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    /// The person who requested the booking.
    User,
    /// The driver the booking was sent to.
    Driver,
    /// The backend (or an admin acting through it).
    Backend,
}

impl Actor {
    /// The canonical string name of this actor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Driver => "DRIVER",
            Self::Backend => "BACKEND",
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event that moves a booking between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingEvent {
    /// Driver accepts.
    Accept,
    /// Driver declines.
    Reject,
    /// Requester withdraws.
    Cancel,
    /// Backend marks the job done.
    Complete,
}

impl BookingEvent {
    /// The canonical string name of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control a booking screen may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingAction {
    /// Accept the request (driver).
    Accept,
    /// Reject the request (driver).
    Reject,
    /// Cancel the request (requester).
    Cancel,
    /// Fetch the driver's contact details (requester, accepted only).
    ViewContact,
}

/// A driver's answer to a pending booking. Serializes to the status the
/// backend expects in the respond request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverDecision {
    /// Take the job.
    #[serde(rename = "ACCEPTED")]
    Accept,
    /// Decline the job.
    #[serde(rename = "REJECTED")]
    Reject,
}

impl DriverDecision {
    /// The event this decision fires.
    pub fn event(&self) -> BookingEvent {
        match self {
            Self::Accept => BookingEvent::Accept,
            Self::Reject => BookingEvent::Reject,
        }
    }

    /// The status the booking ends up in.
    pub fn status(&self) -> BookingStatus {
        match self {
            Self::Accept => BookingStatus::Accepted,
            Self::Reject => BookingStatus::Rejected,
        }
    }
}

impl std::str::FromStr for DriverDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" | "accepted" => Ok(Self::Accept),
            "reject" | "rejected" => Ok(Self::Reject),
            other => Err(format!("expected accept or reject, got \"{other}\"")),
        }
    }
}

struct Edge {
    from: BookingStatus,
    event: BookingEvent,
    actor: Actor,
    to: BookingStatus,
}

const EDGES: [Edge; 4] = [
    Edge {
        from: BookingStatus::Pending,
        event: BookingEvent::Accept,
        actor: Actor::Driver,
        to: BookingStatus::Accepted,
    },
    Edge {
        from: BookingStatus::Pending,
        event: BookingEvent::Reject,
        actor: Actor::Driver,
        to: BookingStatus::Rejected,
    },
    Edge {
        from: BookingStatus::Pending,
        event: BookingEvent::Cancel,
        actor: Actor::User,
        to: BookingStatus::Cancelled,
    },
    Edge {
        from: BookingStatus::Accepted,
        event: BookingEvent::Complete,
        actor: Actor::Backend,
        to: BookingStatus::Completed,
    },
];

fn invalid(
    from: BookingStatus,
    event: BookingEvent,
    actor: Actor,
    reason: impl Into<String>,
) -> StateTransitionError {
    StateTransitionError::InvalidTransition {
        from: from.to_string(),
        event: event.to_string(),
        actor: actor.to_string(),
        reason: reason.into(),
    }
}

/// Check a client-initiated event and return the status it leads to.
///
/// Only `USER` and `DRIVER` actors initiate events; completion is never
/// initiated by the client and is only seen through [`observe`].
///
/// # Errors
///
/// Returns [`StateTransitionError::InvalidTransition`] for any
/// (status, event, actor) combination not in the transition table.
pub fn transition(
    from: BookingStatus,
    event: BookingEvent,
    actor: Actor,
) -> Result<BookingStatus, StateTransitionError> {
    if actor == Actor::Backend || event == BookingEvent::Complete {
        return Err(invalid(
            from,
            event,
            actor,
            "completion is recorded by the backend, not requested by the client",
        ));
    }
    if from.is_terminal() {
        return Err(invalid(from, event, actor, format!("booking is already {from}")));
    }
    match EDGES.iter().find(|e| e.from == from && e.event == event) {
        Some(edge) if edge.actor == actor => Ok(edge.to),
        Some(edge) => Err(invalid(
            from,
            event,
            actor,
            format!("only the {} may {event} a booking", edge.actor.as_str().to_ascii_lowercase()),
        )),
        None => Err(invalid(from, event, actor, "no such transition")),
    }
}

/// Controls to show `actor` for a booking in `status`.
pub fn available_actions(status: BookingStatus, actor: Actor) -> Vec<BookingAction> {
    match (status, actor) {
        (BookingStatus::Pending, Actor::Driver) => vec![BookingAction::Accept, BookingAction::Reject],
        (BookingStatus::Pending, Actor::User) => vec![BookingAction::Cancel],
        (BookingStatus::Accepted, Actor::User) => vec![BookingAction::ViewContact],
        _ => Vec::new(),
    }
}

/// Whether the requester may ask for the driver's full contact record.
pub fn may_request_full_info(status: BookingStatus) -> bool {
    status == BookingStatus::Accepted
}

/// Reconcile a locally held status with one reported by the backend.
///
/// Equal statuses and forward moves along the transition table (completion
/// included) are accepted. A status the client does not recognize is taken
/// as-is.
///
/// # Errors
///
/// Returns [`StateTransitionError::Regression`] if `remote` is not reachable
/// from `local`.
pub fn observe(
    local: BookingStatus,
    remote: BookingStatus,
) -> Result<BookingStatus, StateTransitionError> {
    if local == remote {
        return Ok(remote);
    }
    if remote == BookingStatus::Unknown {
        tracing::warn!(%local, "backend reported an unrecognized booking status");
        return Ok(remote);
    }
    if EDGES.iter().any(|e| e.from == local && e.to == remote) {
        return Ok(remote);
    }
    Err(StateTransitionError::Regression {
        from: local.to_string(),
        to: remote.to_string(),
    })
}

/// Record a driver's answer on a pending booking.
///
/// # Errors
///
/// Returns [`StateTransitionError::InvalidTransition`] if the booking is not
/// pending; the booking is left untouched.
pub fn apply_response(
    booking: &mut Booking,
    decision: DriverDecision,
    response: Option<String>,
    at: DateTime<Utc>,
) -> Result<(), StateTransitionError> {
    let to = transition(booking.status, decision.event(), Actor::Driver)?;
    tracing::debug!(booking = %booking.id, from = %booking.status, %to, "driver responded");
    booking.status = to;
    booking.driver_response = response.filter(|r| !r.trim().is_empty());
    booking.responded_at = Some(at);
    Ok(())
}

/// Record the requester withdrawing a pending booking.
///
/// # Errors
///
/// Returns [`StateTransitionError::InvalidTransition`] if the booking is not
/// pending.
pub fn apply_cancel(booking: &mut Booking) -> Result<(), StateTransitionError> {
    let to = transition(booking.status, BookingEvent::Cancel, Actor::User)?;
    tracing::debug!(booking = %booking.id, from = %booking.status, %to, "booking cancelled");
    booking.status = to;
    Ok(())
}

/// Replace a local booking with the backend's copy, refusing regressions.
///
/// # Errors
///
/// Returns [`StateTransitionError::Regression`] if the backend copy is
/// behind the local one; the local booking is left untouched.
pub fn sync(local: &mut Booking, remote: Booking) -> Result<(), StateTransitionError> {
    observe(local.status, remote.status)?;
    *local = remote;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use d24_core::BookingId;

    const ALL_EVENTS: [BookingEvent; 4] = [
        BookingEvent::Accept,
        BookingEvent::Reject,
        BookingEvent::Cancel,
        BookingEvent::Complete,
    ];
    const ALL_ACTORS: [Actor; 3] = [Actor::User, Actor::Driver, Actor::Backend];

    fn pending() -> Booking {
        Booking {
            id: BookingId::new("bk_1").unwrap(),
            status: BookingStatus::Pending,
            pickup_location: Some("Andheri".into()),
            drop_location: None,
            scheduled_date: None,
            notes: None,
            driver_response: None,
            responded_at: None,
            created_at: None,
            user: None,
            driver: None,
        }
    }

    #[test]
    fn table_edges_are_allowed() {
        assert_eq!(
            transition(BookingStatus::Pending, BookingEvent::Accept, Actor::Driver),
            Ok(BookingStatus::Accepted)
        );
        assert_eq!(
            transition(BookingStatus::Pending, BookingEvent::Reject, Actor::Driver),
            Ok(BookingStatus::Rejected)
        );
        assert_eq!(
            transition(BookingStatus::Pending, BookingEvent::Cancel, Actor::User),
            Ok(BookingStatus::Cancelled)
        );
    }

    #[test]
    fn wrong_actor_is_rejected() {
        let err = transition(BookingStatus::Pending, BookingEvent::Accept, Actor::User).unwrap_err();
        assert!(err.to_string().contains("only the driver"));
        assert!(transition(BookingStatus::Pending, BookingEvent::Cancel, Actor::Driver).is_err());
    }

    #[test]
    fn client_never_completes() {
        for actor in ALL_ACTORS {
            assert!(transition(BookingStatus::Accepted, BookingEvent::Complete, actor).is_err());
        }
    }

    #[test]
    fn accepted_then_everything_rejected() {
        let mut b = pending();
        apply_response(&mut b, DriverDecision::Accept, None, Utc::now()).unwrap();
        for event in ALL_EVENTS {
            for actor in ALL_ACTORS {
                let err = transition(b.status, event, actor).unwrap_err();
                assert!(err.to_string().starts_with("invalid transition"), "{err}");
            }
        }
    }

    #[test]
    fn terminal_states_reject_all() {
        for status in [
            BookingStatus::Accepted,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::Unknown,
        ] {
            for event in ALL_EVENTS {
                for actor in ALL_ACTORS {
                    assert!(transition(status, event, actor).is_err(), "{status} {event} {actor}");
                }
            }
        }
    }

    #[test]
    fn accept_with_message_updates_booking() {
        let mut b = pending();
        let at = Utc::now();
        apply_response(&mut b, DriverDecision::Accept, Some("On my way".into()), at).unwrap();
        assert_eq!(b.status, BookingStatus::Accepted);
        assert_eq!(b.driver_response.as_deref(), Some("On my way"));
        assert_eq!(b.responded_at, Some(at));
        assert!(available_actions(b.status, Actor::Driver).is_empty());
        assert_eq!(available_actions(b.status, Actor::User), vec![BookingAction::ViewContact]);
        assert!(may_request_full_info(b.status));
    }

    #[test]
    fn second_response_leaves_booking_untouched() {
        let mut b = pending();
        apply_response(&mut b, DriverDecision::Reject, None, Utc::now()).unwrap();
        let before = b.clone();
        assert!(apply_response(&mut b, DriverDecision::Accept, Some("x".into()), Utc::now()).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn blank_response_is_dropped() {
        let mut b = pending();
        apply_response(&mut b, DriverDecision::Reject, Some("  ".into()), Utc::now()).unwrap();
        assert!(b.driver_response.is_none());
    }

    #[test]
    fn cancel_only_from_pending() {
        let mut b = pending();
        apply_cancel(&mut b).unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(apply_cancel(&mut b).is_err());
    }

    #[test]
    fn pending_actions_by_actor() {
        assert_eq!(
            available_actions(BookingStatus::Pending, Actor::Driver),
            vec![BookingAction::Accept, BookingAction::Reject]
        );
        assert_eq!(available_actions(BookingStatus::Pending, Actor::User), vec![BookingAction::Cancel]);
        assert!(!may_request_full_info(BookingStatus::Pending));
        assert!(available_actions(BookingStatus::Completed, Actor::User).is_empty());
    }

    #[test]
    fn observe_accepts_forward_and_rejects_regression() {
        assert_eq!(
            observe(BookingStatus::Accepted, BookingStatus::Completed),
            Ok(BookingStatus::Completed)
        );
        assert_eq!(
            observe(BookingStatus::Pending, BookingStatus::Cancelled),
            Ok(BookingStatus::Cancelled)
        );
        assert_eq!(observe(BookingStatus::Accepted, BookingStatus::Accepted), Ok(BookingStatus::Accepted));
        let err = observe(BookingStatus::Accepted, BookingStatus::Pending).unwrap_err();
        assert_eq!(err.to_string(), "status regression from ACCEPTED to PENDING");
        assert!(observe(BookingStatus::Rejected, BookingStatus::Accepted).is_err());
    }

    #[test]
    fn sync_replaces_whole_record() {
        let mut local = pending();
        let mut remote = pending();
        remote.status = BookingStatus::Accepted;
        remote.driver_response = Some("See you".into());
        sync(&mut local, remote.clone()).unwrap();
        assert_eq!(local, remote);

        let stale = pending();
        assert!(sync(&mut local, stale).is_err());
        assert_eq!(local.status, BookingStatus::Accepted);
    }

    #[test]
    fn decision_serializes_as_target_status() {
        assert_eq!(serde_json::to_string(&DriverDecision::Accept).unwrap(), "\"ACCEPTED\"");
        assert_eq!("reject".parse::<DriverDecision>(), Ok(DriverDecision::Reject));
        assert!("maybe".parse::<DriverDecision>().is_err());
    }
}
