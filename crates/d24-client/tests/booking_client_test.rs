//! Contract tests for BookingClient.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/api/bookings` | `create_*` |
//! | GET    | `/api/bookings/my-bookings` | `mine_*` |
//! | GET    | `/api/bookings/driver-requests` | `driver_requests_*` |
//! | PATCH  | `/api/bookings/{id}/respond` | `respond_*` |
//! | PATCH  | `/api/bookings/{id}/cancel` | `cancel_*` |
//! | GET    | `/api/bookings/driver/{id}/full-info` | `full_info_*` |

use d24_client::{ApiConfig, ClientError, D24Client, NewBooking, Session, Surface};
use d24_core::{Booking, BookingStatus, DriverId, User};
use d24_state::booking::available_actions;
use d24_state::{Actor, BookingAction, DriverDecision};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> D24Client {
    D24Client::new(ApiConfig::new(&mock_server.uri()).unwrap()).unwrap()
}

fn session_as(role: &str, token: &str) -> Session {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "usr_1", "email": "someone@example.com", "role": role
    }))
    .unwrap();
    let mut session = Session::new();
    session.sign_in(token, user);
    session
}

fn booking(status: &str) -> Booking {
    serde_json::from_value(serde_json::json!({
        "id": "bk_42",
        "status": status,
        "pickupLocation": "Andheri",
        "user": {"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com"},
        "driver": {"id": "drv_9", "name": "Ravi Kumar", "city": "Mumbai"}
    }))
    .unwrap()
}

// ── POST /api/bookings ───────────────────────────────────────────────

#[tokio::test]
async fn create_sends_only_filled_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(header("authorization", "Bearer user-token"))
        .and(body_json(serde_json::json!({
            "driverId": "drv_9",
            "pickupLocation": "Andheri",
            "scheduledDate": "2024-06-01"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "data": {"id": "bk_42", "status": "PENDING", "pickupLocation": "Andheri"},
            "message": "Booking request sent"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut request = NewBooking::for_driver(DriverId::new("drv_9").unwrap());
    request.pickup_location = Some("Andheri".into());
    request.drop_location = Some(String::new());
    request.scheduled_date = Some("2024-06-01".into());

    let reply = client
        .bookings()
        .create(&session_as("USER", "user-token"), &request)
        .await
        .unwrap();
    assert_eq!(reply.data.status, BookingStatus::Pending);
    assert_eq!(reply.message.as_deref(), Some("Booking request sent"));
}

#[tokio::test]
async fn create_surfaces_backend_refusal_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false, "error": "Driver is not available"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let request = NewBooking::for_driver(DriverId::new("drv_9").unwrap());
    let err = client
        .bookings()
        .create(&session_as("USER", "user-token"), &request)
        .await
        .unwrap_err();
    assert_eq!(err.surface(), Surface::Verbatim("Driver is not available".into()));
}

// ── GET lists ────────────────────────────────────────────────────────

#[tokio::test]
async fn mine_decodes_unknown_status_without_failing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/my-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "count": 2,
            "data": [
                {"id": "bk_1", "status": "ACCEPTED", "driver": {"id": "drv_9", "name": "Ravi Kumar"}},
                {"id": "bk_2", "status": "ON_HOLD"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let reply = client.bookings().mine(&session_as("USER", "t")).await.unwrap();
    assert_eq!(reply.count, Some(2));
    assert_eq!(reply.data[0].status, BookingStatus::Accepted);
    assert_eq!(reply.data[1].status, BookingStatus::Unknown);
}

#[tokio::test]
async fn driver_requests_uses_driver_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/driver-requests"))
        .and(header("authorization", "Bearer driver-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{"id": "bk_42", "status": "PENDING",
                      "user": {"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let reply = client
        .bookings()
        .driver_requests(&session_as("DRIVER", "driver-token"))
        .await
        .unwrap();
    let requester = reply.data[0].user.as_ref().unwrap();
    assert_eq!(requester.display_name(), "Asha Rao");
}

// ── PATCH /api/bookings/{id}/respond ─────────────────────────────────

#[tokio::test]
async fn respond_accept_with_message_updates_booking_and_actions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/bookings/bk_42/respond"))
        .and(header("authorization", "Bearer driver-token"))
        .and(body_json(serde_json::json!({
            "status": "ACCEPTED",
            "driverResponse": "On my way"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"id": "bk_42", "status": "ACCEPTED", "driverResponse": "On my way"},
            "message": "Booking accepted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("PENDING");
    let message = client
        .bookings()
        .respond(
            &session_as("DRIVER", "driver-token"),
            &mut b,
            DriverDecision::Accept,
            Some("On my way"),
        )
        .await
        .unwrap();

    assert_eq!(message.as_deref(), Some("Booking accepted"));
    assert_eq!(b.status, BookingStatus::Accepted);
    assert_eq!(b.driver_response.as_deref(), Some("On my way"));
    assert!(b.driver.is_some());
    assert!(available_actions(b.status, Actor::Driver).is_empty());
    assert_eq!(available_actions(b.status, Actor::User), vec![BookingAction::ViewContact]);
}

#[tokio::test]
async fn respond_reject_without_message_omits_driver_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/bookings/bk_42/respond"))
        .and(body_json(serde_json::json!({"status": "REJECTED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "Booking rejected"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("PENDING");
    client
        .bookings()
        .respond(&session_as("DRIVER", "t"), &mut b, DriverDecision::Reject, Some("  "))
        .await
        .unwrap();
    assert_eq!(b.status, BookingStatus::Rejected);
    assert_eq!(b.driver_response, None);
}

#[tokio::test]
async fn respond_on_answered_booking_is_refused_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("ACCEPTED");
    let err = client
        .bookings()
        .respond(&session_as("DRIVER", "t"), &mut b, DriverDecision::Reject, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)));
    assert!(err.is_local());
    assert_eq!(b.status, BookingStatus::Accepted);
}

#[tokio::test]
async fn respond_failure_leaves_booking_pending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/bookings/bk_42/respond"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "success": false, "error": "Booking was cancelled by the user"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("PENDING");
    let err = client
        .bookings()
        .respond(&session_as("DRIVER", "t"), &mut b, DriverDecision::Accept, None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Booking was cancelled by the user");
    assert_eq!(b.status, BookingStatus::Pending);
}

// ── PATCH /api/bookings/{id}/cancel ──────────────────────────────────

#[tokio::test]
async fn cancel_pending_booking() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/bookings/bk_42/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "message": "Booking cancelled"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("PENDING");
    client
        .bookings()
        .cancel(&session_as("USER", "t"), &mut b)
        .await
        .unwrap();
    assert_eq!(b.status, BookingStatus::Cancelled);
    assert!(available_actions(b.status, Actor::User).is_empty());
}

#[tokio::test]
async fn cancel_accepted_booking_is_refused_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut b = booking("ACCEPTED");
    let err = client
        .bookings()
        .cancel(&session_as("USER", "t"), &mut b)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)));
}

// ── GET /api/bookings/driver/{id}/full-info ──────────────────────────

#[tokio::test]
async fn full_info_for_accepted_booking_uses_driver_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings/driver/drv_9/full-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {"id": "drv_9", "name": "Ravi Kumar", "phoneNumber": "9876543210",
                     "vehicleNumber": "MH01AB1234"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let info = client
        .bookings()
        .driver_full_info(&session_as("USER", "t"), &booking("ACCEPTED"))
        .await
        .unwrap()
        .data;
    assert_eq!(info.phone_number, "9876543210");
    assert_eq!(info.vehicle_number.as_deref(), Some("MH01AB1234"));
}

#[tokio::test]
async fn full_info_for_pending_booking_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .bookings()
        .driver_full_info(&session_as("USER", "t"), &booking("PENDING"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::FullInfoNotDisclosed {
            status: BookingStatus::Pending
        }
    ));
}
