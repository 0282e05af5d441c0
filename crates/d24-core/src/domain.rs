//! # Marketplace Records
//!
//! Records exchanged with the Drivers24 backend: users, driver profiles,
//! bookings and pending guest registrations.
//!
//! Fields use `#[serde(default)]` for resilience against schema evolution
//! in the backend. Unknown fields are ignored; unknown booking statuses map
//! to [`BookingStatus::Unknown`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{BookingId, DriverId, UserId};
use crate::role::Role;

/// Booking lifecycle status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Requested by a user, awaiting the driver.
    Pending,
    /// The driver accepted. Contact details may now be requested.
    Accepted,
    /// The driver declined.
    Rejected,
    /// The requester withdrew before the driver answered.
    Cancelled,
    /// Marked done by the backend.
    Completed,
    /// Forward-compatible catch-all for statuses this client does not know.
    #[serde(other)]
    Unknown,
}

impl BookingStatus {
    /// The wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether no client-initiated event can leave this status.
    ///
    /// `Accepted` is terminal for the client even though the backend may
    /// still move it to `Completed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(format!("unknown booking status \"{other}\"")),
        }
    }
}

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    pub id: UserId,
    /// Identity-provider subject the account is linked to.
    #[serde(default)]
    pub clerk_id: Option<String>,
    /// Account email.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Handle, if the identity provider has one.
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Assigned role; `None` until role selection.
    #[serde(default)]
    pub role: Option<Role>,
    /// Home city chosen at role selection.
    #[serde(default)]
    pub city: Option<String>,
    /// Account creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// First and last name joined, or the email when neither is set.
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
            .unwrap_or_else(|| self.email.clone())
    }
}

/// User fields embedded in booking and driver records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Backend identifier, when included.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Account email.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Home city.
    #[serde(default)]
    pub city: Option<String>,
}

impl UserSummary {
    /// First and last name joined, or the email when neither is set.
    pub fn display_name(&self) -> String {
        display_name(self.first_name.as_deref(), self.last_name.as_deref())
            .unwrap_or_else(|| self.email.clone())
    }
}

fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// A driver's profile as listed in search results and on the driver's own
/// dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    /// Backend identifier.
    pub id: DriverId,
    /// Full name.
    pub name: String,
    /// Contact number.
    #[serde(default)]
    pub phone_number: String,
    /// Registration certificate number.
    #[serde(default)]
    pub rc_number: String,
    /// Uploaded RC image reference.
    #[serde(default)]
    pub rc_image: Option<String>,
    /// Driving licence number.
    #[serde(default)]
    pub dl_number: String,
    /// Uploaded DL image reference.
    #[serde(default)]
    pub dl_image: Option<String>,
    /// Permanent address.
    #[serde(default)]
    pub permanent_address: String,
    /// Address the driver operates from.
    #[serde(default)]
    pub operating_address: String,
    /// City of operation.
    pub city: String,
    /// State.
    #[serde(default)]
    pub state: Option<String>,
    /// Pincode.
    #[serde(default)]
    pub pincode: Option<String>,
    /// Vehicle type (e.g. "Sedan").
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Vehicle model.
    #[serde(default)]
    pub vehicle_model: Option<String>,
    /// Vehicle registration plate.
    #[serde(default)]
    pub vehicle_number: Option<String>,
    /// Years of driving experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Expected monthly salary.
    #[serde(default)]
    pub salary_expectation: Option<u64>,
    /// Whether the driver is taking bookings.
    #[serde(default)]
    pub availability: bool,
    /// Whether an admin verified the driver's documents.
    #[serde(default)]
    pub is_verified: bool,
    /// When verification happened.
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    /// Profile creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Owning account, when embedded.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// Driver fields embedded in a booking seen by the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    /// Backend identifier.
    pub id: DriverId,
    /// Full name.
    pub name: String,
    /// City of operation.
    #[serde(default)]
    pub city: String,
    /// Vehicle type.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Vehicle model.
    #[serde(default)]
    pub vehicle_model: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Expected monthly salary.
    #[serde(default)]
    pub salary_expectation: Option<u64>,
    /// Owning account.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// The elevated-disclosure contact record, released only for an accepted
/// booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFullInfo {
    /// Backend identifier.
    pub id: DriverId,
    /// Full name.
    pub name: String,
    /// Contact number.
    pub phone_number: String,
    /// City of operation.
    #[serde(default)]
    pub city: String,
    /// Vehicle type.
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Vehicle model.
    #[serde(default)]
    pub vehicle_model: Option<String>,
    /// Vehicle registration plate.
    #[serde(default)]
    pub vehicle_number: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Expected monthly salary.
    #[serde(default)]
    pub salary_expectation: Option<u64>,
    /// Permanent address.
    #[serde(default)]
    pub permanent_address: String,
    /// Operating address.
    #[serde(default)]
    pub operating_address: String,
    /// Registration certificate number.
    #[serde(default)]
    pub rc_number: String,
    /// Driving licence number.
    #[serde(default)]
    pub dl_number: String,
    /// Owning account.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// A booking request between a user and a driver.
///
/// The driver dashboard receives it with `user` embedded; the requester's
/// view embeds `driver` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Backend identifier.
    pub id: BookingId,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Pickup location.
    #[serde(default)]
    pub pickup_location: Option<String>,
    /// Drop location.
    #[serde(default)]
    pub drop_location: Option<String>,
    /// Requested date, as entered by the user.
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// Free-form notes for the driver.
    #[serde(default)]
    pub notes: Option<String>,
    /// Message the driver attached to their answer.
    #[serde(default)]
    pub driver_response: Option<String>,
    /// When the driver answered.
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
    /// When the booking was requested.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Requester, in the driver's view.
    #[serde(default)]
    pub user: Option<UserSummary>,
    /// Driver, in the requester's view.
    #[serde(default)]
    pub driver: Option<DriverSummary>,
}

/// A pending driver registration captured before the person has an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDriverRegistration {
    /// Backend identifier of the pending record.
    #[serde(default)]
    pub id: Option<String>,
    /// Email the registration will be matched against after sign-up.
    pub email: String,
    /// Contact number.
    #[serde(default)]
    pub phone_number: String,
    /// When the pending record lapses.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
