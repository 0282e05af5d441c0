//! Booking requests: create, list, respond, cancel and the contact
//! disclosure for accepted bookings.
//!
//! `respond` and `cancel` run the transition table against the locally held
//! booking before any request. A refused transition never reaches the
//! backend.

use chrono::Utc;
use serde::Serialize;

use d24_core::{Booking, BookingStatus, DriverFullInfo, DriverId};
use d24_state::booking::{self, BookingEvent};
use d24_state::{Actor, DriverDecision};

use crate::envelope::{Reply, Transport};
use crate::error::ClientError;
use crate::session::Session;

/// A booking request as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Driver to book.
    pub driver_id: DriverId,
    /// Pickup location.
    pub pickup_location: Option<String>,
    /// Drop location.
    pub drop_location: Option<String>,
    /// Requested date, free text.
    pub scheduled_date: Option<String>,
    /// Notes for the driver.
    pub notes: Option<String>,
}

impl NewBooking {
    /// A request with only the driver set.
    pub fn for_driver(driver_id: DriverId) -> Self {
        Self {
            driver_id,
            pickup_location: None,
            drop_location: None,
            scheduled_date: None,
            notes: None,
        }
    }

    fn body(&self) -> NewBookingBody<'_> {
        fn text(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        NewBookingBody {
            driver_id: &self.driver_id,
            pickup_location: text(&self.pickup_location),
            drop_location: text(&self.drop_location),
            scheduled_date: text(&self.scheduled_date),
            notes: text(&self.notes),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBookingBody<'a> {
    driver_id: &'a DriverId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pickup_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drop_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RespondRequest<'a> {
    status: DriverDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    driver_response: Option<&'a str>,
}

/// Client for the `/api/bookings` endpoints.
#[derive(Debug, Clone)]
pub struct BookingClient {
    transport: Transport,
}

impl BookingClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Request a driver.
    ///
    /// Calls `POST {base_url}/api/bookings`.
    pub async fn create(
        &self,
        session: &Session,
        booking: &NewBooking,
    ) -> Result<Reply<Booking>, ClientError> {
        let endpoint = "POST /api/bookings";
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "bookings"])?;
        let request = self
            .transport
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&booking.body());
        let reply = self.transport.call(endpoint, request).await?.into_reply(endpoint)?;
        tracing::info!(driver = %booking.driver_id, "booking requested");
        Ok(reply)
    }

    /// The signed-in user's bookings, with the driver embedded.
    ///
    /// Calls `GET {base_url}/api/bookings/my-bookings`.
    pub async fn mine(&self, session: &Session) -> Result<Reply<Vec<Booking>>, ClientError> {
        self.list(session, "GET /api/bookings/my-bookings", "my-bookings").await
    }

    /// Requests addressed to the signed-in driver, with the user embedded.
    ///
    /// Calls `GET {base_url}/api/bookings/driver-requests`.
    pub async fn driver_requests(&self, session: &Session) -> Result<Reply<Vec<Booking>>, ClientError> {
        self.list(session, "GET /api/bookings/driver-requests", "driver-requests").await
    }

    async fn list(
        &self,
        session: &Session,
        endpoint: &str,
        segment: &str,
    ) -> Result<Reply<Vec<Booking>>, ClientError> {
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "bookings", segment])?;
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// Accept or reject a pending booking as its driver.
    ///
    /// On success `booking` moves to the decided status and carries the
    /// response text. A blank response is not sent.
    ///
    /// Calls `PATCH {base_url}/api/bookings/{id}/respond`.
    pub async fn respond(
        &self,
        session: &Session,
        booking: &mut Booking,
        decision: DriverDecision,
        response: Option<&str>,
    ) -> Result<Option<String>, ClientError> {
        let endpoint = "PATCH /api/bookings/{id}/respond";
        booking::transition(booking.status, decision.event(), Actor::Driver)?;
        let token = session.bearer()?;
        let response = response.map(str::trim).filter(|r| !r.is_empty());
        let url = self
            .transport
            .url(&["api", "bookings", booking.id.as_str(), "respond"])?;
        let request = self
            .transport
            .http()
            .patch(url)
            .bearer_auth(token)
            .json(&RespondRequest {
                status: decision,
                driver_response: response,
            });
        let envelope = self.transport.call::<serde_json::Value>(endpoint, request).await?;
        let remote = returned_booking(envelope.data.clone());
        let message = envelope.into_ack(endpoint)?;

        booking::apply_response(booking, decision, response.map(str::to_string), Utc::now())?;
        if let Some(remote) = remote {
            reconcile(booking, remote);
        }
        tracing::info!(booking = %booking.id, status = %booking.status, "booking answered");
        Ok(message)
    }

    /// Withdraw a pending booking as its requester.
    ///
    /// Calls `PATCH {base_url}/api/bookings/{id}/cancel`.
    pub async fn cancel(
        &self,
        session: &Session,
        booking: &mut Booking,
    ) -> Result<Option<String>, ClientError> {
        let endpoint = "PATCH /api/bookings/{id}/cancel";
        booking::transition(booking.status, BookingEvent::Cancel, Actor::User)?;
        let token = session.bearer()?;
        let url = self
            .transport
            .url(&["api", "bookings", booking.id.as_str(), "cancel"])?;
        let request = self.transport.http().patch(url).bearer_auth(token);
        let envelope = self.transport.call::<serde_json::Value>(endpoint, request).await?;
        let remote = returned_booking(envelope.data.clone());
        let message = envelope.into_ack(endpoint)?;

        booking::apply_cancel(booking)?;
        if let Some(remote) = remote {
            reconcile(booking, remote);
        }
        tracing::info!(booking = %booking.id, "booking cancelled");
        Ok(message)
    }

    /// The driver's contact record for an accepted booking.
    ///
    /// # Errors
    ///
    /// [`ClientError::FullInfoNotDisclosed`] unless the booking is
    /// `ACCEPTED`, and [`ClientError::Validation`] if the booking carries no
    /// driver. Neither sends a request.
    ///
    /// Calls `GET {base_url}/api/bookings/driver/{driverId}/full-info`.
    pub async fn driver_full_info(
        &self,
        session: &Session,
        booking: &Booking,
    ) -> Result<Reply<DriverFullInfo>, ClientError> {
        let endpoint = "GET /api/bookings/driver/{id}/full-info";
        if !booking::may_request_full_info(booking.status) {
            return Err(ClientError::FullInfoNotDisclosed {
                status: booking.status,
            });
        }
        let driver = booking
            .driver
            .as_ref()
            .ok_or_else(|| ClientError::Validation("Booking has no driver".to_string()))?;
        let token = session.bearer()?;
        let url = self
            .transport
            .url(&["api", "bookings", "driver", driver.id.as_str(), "full-info"])?;
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }
}

/// The updated booking, if the backend echoed one back.
fn returned_booking(data: Option<serde_json::Value>) -> Option<Booking> {
    data.and_then(|v| serde_json::from_value(v).ok())
}

/// Adopt the backend's copy when it agrees with the local move. The
/// backend copy may omit the embedded party, so the local one is kept.
fn reconcile(local: &mut Booking, mut remote: Booking) {
    if remote.status == BookingStatus::Unknown {
        return;
    }
    remote.user = remote.user.or_else(|| local.user.clone());
    remote.driver = remote.driver.or_else(|| local.driver.clone());
    let status = local.status;
    let mut candidate = local.clone();
    match booking::sync(&mut candidate, remote) {
        Ok(()) => *local = candidate,
        Err(e) => tracing::warn!(booking = %local.id, %status, error = %e, "ignoring stale backend copy"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_are_omitted() {
        let mut b = NewBooking::for_driver(DriverId::new("drv_1").unwrap());
        b.pickup_location = Some("Andheri".into());
        b.notes = Some("   ".into());
        let json = serde_json::to_value(b.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"driverId": "drv_1", "pickupLocation": "Andheri"})
        );
    }

    #[test]
    fn respond_request_serializes_status() {
        let body = RespondRequest {
            status: DriverDecision::Accept,
            driver_response: Some("On my way"),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"status": "ACCEPTED", "driverResponse": "On my way"})
        );
        let body = RespondRequest {
            status: DriverDecision::Reject,
            driver_response: None,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"status": "REJECTED"})
        );
    }

    fn booking(status: BookingStatus) -> Booking {
        serde_json::from_value(serde_json::json!({
            "id": "bk_1", "status": status.as_str(),
            "driver": {"id": "drv_1", "name": "Ravi Kumar"}
        }))
        .unwrap()
    }

    #[test]
    fn reconcile_keeps_embedded_driver() {
        let mut local = booking(BookingStatus::Accepted);
        let mut remote = booking(BookingStatus::Accepted);
        remote.driver = None;
        remote.driver_response = Some("On my way".into());
        reconcile(&mut local, remote);
        assert!(local.driver.is_some());
        assert_eq!(local.driver_response.as_deref(), Some("On my way"));
    }

    #[test]
    fn reconcile_ignores_regression() {
        let mut local = booking(BookingStatus::Accepted);
        reconcile(&mut local, booking(BookingStatus::Pending));
        assert_eq!(local.status, BookingStatus::Accepted);
    }
}
