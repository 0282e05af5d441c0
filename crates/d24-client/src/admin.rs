//! Admin dashboard: platform counters, analytics and booking history.
//!
//! Every call needs an admin token; the backend enforces the role and a
//! non-admin gets HTTP 403, surfaced as [`ClientError::Unauthorized`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use d24_core::{Booking, BookingStatus, DriverId, Role, UserId};

use crate::envelope::{Reply, Transport};
use crate::error::ClientError;
use crate::session::Session;

/// Platform-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_drivers: u64,
    pub verified_drivers: u64,
    pub pending_verification: u64,
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub accepted_bookings: u64,
}

/// Name-only driver reference in activity feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DriverName {
    pub name: String,
}

/// Name-only user reference in activity feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A recent booking on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentBooking {
    pub id: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub driver: Option<DriverName>,
    #[serde(default)]
    pub user: Option<UserName>,
}

/// A recent sign-up on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Latest bookings and sign-ups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecentActivity {
    pub bookings: Vec<RecentBooking>,
    pub users: Vec<RecentUser>,
}

/// `GET /api/admin/dashboard/overview`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    pub stats: PlatformStats,
    pub recent_activity: RecentActivity,
}

/// Booking totals over time and by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingTotals {
    pub total_bookings: u64,
    pub bookings_this_month: u64,
    pub bookings_today: u64,
    /// Keyed by status string; unrecognized statuses are kept.
    pub bookings_by_status: BTreeMap<String, u64>,
}

/// Minimal driver reference in rankings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriverRef {
    pub id: DriverId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
}

/// A driver ranked by bookings received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDriver {
    pub driver: DriverRef,
    #[serde(default)]
    pub booking_count: u64,
}

/// `GET /api/admin/analytics/bookings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingAnalytics {
    pub overview: BookingTotals,
    pub top_drivers: Vec<TopDriver>,
}

/// User totals over time and by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserTotals {
    pub total_users: u64,
    pub users_this_month: u64,
    pub users_today: u64,
    pub users_by_role: BTreeMap<String, u64>,
}

/// Minimal user reference in rankings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A user ranked by bookings made.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUser {
    pub user: UserRef,
    #[serde(default)]
    pub booking_count: u64,
}

/// `GET /api/admin/analytics/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAnalytics {
    pub overview: UserTotals,
    pub active_users: Vec<ActiveUser>,
}

/// Driver pool totals.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverTotals {
    pub total_drivers: u64,
    pub verified_drivers: u64,
    pub available_drivers: u64,
    pub pending_verification: u64,
    pub average_salary_expectation: f64,
    pub average_experience: f64,
}

/// Driver count for one city.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityCount {
    pub city: String,
    #[serde(default)]
    pub count: u64,
}

/// Driver count for one vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCount {
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub count: u64,
}

/// A driver ranked by accepted bookings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub driver: DriverRef,
    #[serde(default)]
    pub accepted_bookings: u64,
}

/// `GET /api/admin/analytics/drivers`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverAnalytics {
    pub overview: DriverTotals,
    pub drivers_by_city: Vec<CityCount>,
    pub drivers_by_vehicle: Vec<VehicleCount>,
    pub top_performers: Vec<TopPerformer>,
}

/// Filter for the admin booking list. Unset values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminBookingFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<BookingStatus>,
    pub driver_id: Option<DriverId>,
    pub user_id: Option<UserId>,
}

impl AdminBookingFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(status) = self.status.filter(|s| *s != BookingStatus::Unknown) {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(id) = &self.driver_id {
            pairs.push(("driverId", id.to_string()));
        }
        if let Some(id) = &self.user_id {
            pairs.push(("userId", id.to_string()));
        }
        pairs
    }
}

/// Client for the `/api/admin` endpoints.
#[derive(Debug, Clone)]
pub struct AdminClient {
    transport: Transport,
}

impl AdminClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: &str,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<Reply<T>, ClientError> {
        let token = session.bearer()?;
        let mut url = self.transport.url(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// Calls `GET {base_url}/api/admin/dashboard/overview`.
    pub async fn overview(&self, session: &Session) -> Result<Reply<Overview>, ClientError> {
        self.get(
            session,
            "GET /api/admin/dashboard/overview",
            &["api", "admin", "dashboard", "overview"],
            &[],
        )
        .await
    }

    /// Calls `GET {base_url}/api/admin/analytics/bookings`.
    pub async fn booking_analytics(
        &self,
        session: &Session,
    ) -> Result<Reply<BookingAnalytics>, ClientError> {
        self.get(
            session,
            "GET /api/admin/analytics/bookings",
            &["api", "admin", "analytics", "bookings"],
            &[],
        )
        .await
    }

    /// Calls `GET {base_url}/api/admin/analytics/users`.
    pub async fn user_analytics(&self, session: &Session) -> Result<Reply<UserAnalytics>, ClientError> {
        self.get(
            session,
            "GET /api/admin/analytics/users",
            &["api", "admin", "analytics", "users"],
            &[],
        )
        .await
    }

    /// Calls `GET {base_url}/api/admin/analytics/drivers`.
    pub async fn driver_analytics(
        &self,
        session: &Session,
    ) -> Result<Reply<DriverAnalytics>, ClientError> {
        self.get(
            session,
            "GET /api/admin/analytics/drivers",
            &["api", "admin", "analytics", "drivers"],
            &[],
        )
        .await
    }

    /// All bookings, filtered and paginated.
    ///
    /// Calls `GET {base_url}/api/admin/bookings?page&limit&status&driverId&userId`.
    pub async fn bookings(
        &self,
        session: &Session,
        filter: &AdminBookingFilter,
    ) -> Result<Reply<Vec<Booking>>, ClientError> {
        self.get(
            session,
            "GET /api/admin/bookings",
            &["api", "admin", "bookings"],
            &filter.query_pairs(),
        )
        .await
    }

    /// Every booking a driver has received.
    ///
    /// Calls `GET {base_url}/api/admin/bookings/driver/{id}`.
    pub async fn driver_history(
        &self,
        session: &Session,
        id: &DriverId,
    ) -> Result<Reply<Vec<Booking>>, ClientError> {
        self.get(
            session,
            "GET /api/admin/bookings/driver/{id}",
            &["api", "admin", "bookings", "driver", id.as_str()],
            &[],
        )
        .await
    }

    /// Every booking a user has made.
    ///
    /// Calls `GET {base_url}/api/admin/bookings/user/{id}`.
    pub async fn user_history(
        &self,
        session: &Session,
        id: &UserId,
    ) -> Result<Reply<Vec<Booking>>, ClientError> {
        self.get(
            session,
            "GET /api/admin/bookings/user/{id}",
            &["api", "admin", "bookings", "user", id.as_str()],
            &[],
        )
        .await
    }
}
