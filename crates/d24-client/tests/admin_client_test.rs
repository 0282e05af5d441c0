//! Contract tests for AdminClient.

use d24_client::{AdminBookingFilter, ApiConfig, D24Client, Session};
use d24_core::{BookingStatus, DriverId, User, UserId};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> D24Client {
    D24Client::new(ApiConfig::new(&mock_server.uri()).unwrap()).unwrap()
}

fn admin_session() -> Session {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "usr_admin", "email": "admin@example.com", "role": "ADMIN"
    }))
    .unwrap();
    let mut session = Session::new();
    session.sign_in("admin-token", user);
    session
}

#[tokio::test]
async fn overview_decodes_stats_and_activity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "stats": {"totalUsers": 40, "totalDrivers": 12, "verifiedDrivers": 9,
                          "pendingVerification": 3, "totalBookings": 57,
                          "pendingBookings": 6, "acceptedBookings": 30},
                "recentActivity": {"bookings": [], "users": []}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let overview = client.admin().overview(&admin_session()).await.unwrap().data;
    assert_eq!(overview.stats.total_bookings, 57);
    assert_eq!(overview.stats.pending_verification, 3);
}

#[tokio::test]
async fn booking_analytics_keeps_status_breakdown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "overview": {"totalBookings": 10, "bookingsThisMonth": 4, "bookingsToday": 1,
                             "bookingsByStatus": {"PENDING": 2, "ACCEPTED": 7, "CANCELLED": 1}},
                "topDrivers": [{"driver": {"id": "drv_1", "name": "Ravi Kumar", "city": "Mumbai"},
                                "bookingCount": 5}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let a = client
        .admin()
        .booking_analytics(&admin_session())
        .await
        .unwrap()
        .data;
    assert_eq!(a.overview.bookings_by_status.get("ACCEPTED"), Some(&7));
    assert_eq!(a.top_drivers[0].booking_count, 5);
}

#[tokio::test]
async fn user_and_driver_analytics_decode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "overview": {"totalUsers": 40, "usersThisMonth": 8, "usersToday": 0,
                             "usersByRole": {"USER": 28, "DRIVER": 11, "ADMIN": 1}},
                "activeUsers": [{"user": {"id": "usr_2", "email": "asha@example.com"},
                                 "bookingCount": 6}]
            }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "overview": {"totalDrivers": 12, "verifiedDrivers": 9, "availableDrivers": 7,
                             "pendingVerification": 3, "averageSalaryExpectation": 21500.5,
                             "averageExperience": 4.2},
                "driversByCity": [{"city": "Mumbai", "count": 8}],
                "driversByVehicle": [{"vehicleType": "Sedan", "count": 5}, {"vehicleType": null, "count": 2}],
                "topPerformers": [{"driver": {"id": "drv_1", "name": "Ravi Kumar"}, "acceptedBookings": 9}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let session = admin_session();
    let users = client.admin().user_analytics(&session).await.unwrap().data;
    assert_eq!(users.overview.users_by_role.get("DRIVER"), Some(&11));
    assert_eq!(users.active_users[0].booking_count, 6);

    let drivers = client.admin().driver_analytics(&session).await.unwrap().data;
    assert_eq!(drivers.overview.available_drivers, 7);
    assert_eq!(drivers.drivers_by_vehicle[1].vehicle_type, None);
    assert_eq!(drivers.top_performers[0].accepted_bookings, 9);
}

#[tokio::test]
async fn bookings_sends_only_set_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/bookings"))
        .and(query_param("page", "1"))
        .and(query_param("status", "PENDING"))
        .and(query_param("driverId", "drv_1"))
        .and(query_param_is_missing("userId"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{"id": "bk_1", "status": "PENDING"}],
            "pagination": {"page": 1, "limit": 20, "totalCount": 1, "totalPages": 1,
                           "hasNextPage": false, "hasPrevPage": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let filter = AdminBookingFilter {
        page: Some(1),
        status: Some(BookingStatus::Pending),
        driver_id: Some(DriverId::new("drv_1").unwrap()),
        ..AdminBookingFilter::default()
    };
    let reply = client
        .admin()
        .bookings(&admin_session(), &filter)
        .await
        .unwrap();
    assert_eq!(reply.data.len(), 1);
    assert_eq!(reply.pagination.map(|p| p.total_count), Some(1));
}

#[tokio::test]
async fn history_endpoints_use_ids_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/bookings/driver/drv_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "data": [{"id": "bk_1", "status": "COMPLETED"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/bookings/user/usr_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "data": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let session = admin_session();
    let driver = client
        .admin()
        .driver_history(&session, &DriverId::new("drv_1").unwrap())
        .await
        .unwrap();
    assert_eq!(driver.data[0].status, BookingStatus::Completed);
    let user = client
        .admin()
        .user_history(&session, &UserId::new("usr_2").unwrap())
        .await
        .unwrap();
    assert!(user.data.is_empty());
}
