//! Driver profiles: the driver's own profile and availability, city search,
//! and the admin verification endpoints.

use serde::Serialize;

use d24_core::validation::{self, Field, FieldFailure};
use d24_core::{DlNumber, DriverId, DriverProfile, PhoneNumber, Pincode, Role, SearchQuery};
use d24_state::verification;

use crate::envelope::{Reply, Transport};
use crate::error::ClientError;
use crate::session::Session;

/// Raw text of the driver profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverProfileForm {
    /// Full name.
    pub name: String,
    /// Mobile number.
    pub phone_number: String,
    /// Registration certificate number.
    pub rc_number: String,
    /// RC image reference.
    pub rc_image: String,
    /// Driving licence number.
    pub dl_number: String,
    /// DL image reference.
    pub dl_image: String,
    /// Permanent address.
    pub permanent_address: String,
    /// Operating address.
    pub operating_address: String,
    /// City.
    pub city: String,
    /// State (optional).
    pub state: String,
    /// Pincode (optional).
    pub pincode: String,
    /// Vehicle type (optional).
    pub vehicle_type: String,
    /// Vehicle model (optional).
    pub vehicle_model: String,
    /// Vehicle plate (optional).
    pub vehicle_number: String,
    /// Years of experience (optional).
    pub experience: String,
    /// Monthly salary expectation (optional).
    pub salary_expectation: String,
}

const REQUIRED: [Field; 7] = [
    Field::Name,
    Field::PhoneNumber,
    Field::DlNumber,
    Field::RcNumber,
    Field::PermanentAddress,
    Field::OperatingAddress,
    Field::City,
];

const OPTIONAL: [Field; 4] = [
    Field::State,
    Field::Pincode,
    Field::Experience,
    Field::SalaryExpectation,
];

impl DriverProfileForm {
    /// A blank form, pre-filled with the person's home city.
    pub fn for_new_profile(city: Option<&str>) -> Self {
        Self {
            city: city.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// A form holding an existing profile's values.
    pub fn from_profile(p: &DriverProfile) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: p.name.clone(),
            phone_number: p.phone_number.clone(),
            rc_number: p.rc_number.clone(),
            rc_image: text(&p.rc_image),
            dl_number: p.dl_number.clone(),
            dl_image: text(&p.dl_image),
            permanent_address: p.permanent_address.clone(),
            operating_address: p.operating_address.clone(),
            city: p.city.clone(),
            state: text(&p.state),
            pincode: text(&p.pincode),
            vehicle_type: text(&p.vehicle_type),
            vehicle_model: text(&p.vehicle_model),
            vehicle_number: text(&p.vehicle_number),
            experience: p.experience.map(|v| v.to_string()).unwrap_or_default(),
            salary_expectation: p.salary_expectation.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::PhoneNumber => &self.phone_number,
            Field::DlNumber => &self.dl_number,
            Field::RcNumber => &self.rc_number,
            Field::PermanentAddress => &self.permanent_address,
            Field::OperatingAddress => &self.operating_address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Pincode => &self.pincode,
            Field::Experience => &self.experience,
            Field::SalaryExpectation => &self.salary_expectation,
            _ => "",
        }
    }

    /// Run every validator, returning failures only.
    pub fn validate(&self) -> Vec<FieldFailure> {
        let required = REQUIRED
            .iter()
            .map(|&f| (f, validation::validate(f, self.value(f))));
        let optional = OPTIONAL
            .iter()
            .map(|&f| (f, validation::validate_optional(f, self.value(f))));
        required
            .chain(optional)
            .filter_map(|(f, r)| validation::failure(f, r))
            .collect()
    }

    /// Validate and build the request body.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] with the first failing reason.
    pub fn to_body(&self) -> Result<DriverProfileBody, ClientError> {
        if let Some(first) = self.validate().into_iter().next() {
            return Err(first.into());
        }
        let opt = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        Ok(DriverProfileBody {
            name: self.name.trim().to_string(),
            phone_number: PhoneNumber::new(self.phone_number.as_str())?,
            rc_number: self.rc_number.trim().to_uppercase(),
            rc_image: opt(&self.rc_image),
            dl_number: DlNumber::new(self.dl_number.as_str())?,
            dl_image: opt(&self.dl_image),
            permanent_address: self.permanent_address.trim().to_string(),
            operating_address: self.operating_address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: opt(&self.state),
            pincode: opt(&self.pincode).map(Pincode::new).transpose()?,
            vehicle_type: opt(&self.vehicle_type),
            vehicle_model: opt(&self.vehicle_model),
            vehicle_number: opt(&self.vehicle_number).map(|v| v.to_uppercase()),
            experience: whole_number(Field::Experience, opt(&self.experience))?,
            salary_expectation: whole_number(Field::SalaryExpectation, opt(&self.salary_expectation))?,
        })
    }
}

fn whole_number<T: std::str::FromStr>(field: Field, value: Option<String>) -> Result<Option<T>, ClientError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ClientError::Validation(format!("{} is not a valid number", field.label())))
        })
        .transpose()
}

/// Body of the profile create-or-update request. Empty optional values are
/// left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfileBody {
    name: String,
    phone_number: PhoneNumber,
    rc_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rc_image: Option<String>,
    dl_number: DlNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    dl_image: Option<String>,
    permanent_address: String,
    operating_address: String,
    city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pincode: Option<Pincode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary_expectation: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AvailabilityRequest {
    availability: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkVerifyRequest<'a> {
    driver_ids: &'a [DriverId],
}

/// Client for the `/api/drivers` endpoints.
#[derive(Debug, Clone)]
pub struct DriverClient {
    transport: Transport,
}

impl DriverClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Create or update the signed-in driver's profile.
    ///
    /// Calls `POST {base_url}/api/drivers/profile` after validating the form.
    pub async fn upsert_profile(
        &self,
        session: &Session,
        form: &DriverProfileForm,
    ) -> Result<Reply<DriverProfile>, ClientError> {
        let endpoint = "POST /api/drivers/profile";
        let body = form.to_body()?;
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", "profile"])?;
        let request = self.transport.http().post(url).bearer_auth(token).json(&body);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// Fetch the signed-in driver's profile, or `None` if they have none yet.
    ///
    /// Calls `GET {base_url}/api/drivers/profile/me`.
    pub async fn my_profile(&self, session: &Session) -> Result<Option<DriverProfile>, ClientError> {
        let endpoint = "GET /api/drivers/profile/me";
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", "profile", "me"])?;
        let request = self.transport.http().get(url).bearer_auth(token);
        match self.transport.call_optional(endpoint, request).await? {
            None => Ok(None),
            Some(envelope) => {
                if envelope.success && envelope.data.is_none() {
                    return Ok(None);
                }
                envelope.into_reply(endpoint).map(|r| Some(r.data))
            }
        }
    }

    /// Turn the driver's availability on or off.
    ///
    /// `actor` is the role from a fresh profile check; only drivers may
    /// toggle. On success `profile` is updated. Existing bookings are not
    /// affected.
    ///
    /// Calls `PATCH {base_url}/api/drivers/availability`.
    pub async fn set_availability(
        &self,
        session: &Session,
        actor: Role,
        profile: &mut DriverProfile,
        available: bool,
    ) -> Result<Option<String>, ClientError> {
        let endpoint = "PATCH /api/drivers/availability";
        let mut next = profile.clone();
        verification::set_availability(&mut next, actor, available)?;
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", "availability"])?;
        let request = self
            .transport
            .http()
            .patch(url)
            .bearer_auth(token)
            .json(&AvailabilityRequest {
                availability: available,
            });
        let message = self.transport.call::<serde_json::Value>(endpoint, request).await?.into_ack(endpoint)?;
        *profile = next;
        tracing::info!(available, "availability updated");
        Ok(message)
    }

    /// Search drivers in a city, one page at a time.
    ///
    /// Calls `GET {base_url}/api/drivers/city/{city}?page&limit&...`.
    pub async fn search(
        &self,
        session: &Session,
        query: &SearchQuery,
    ) -> Result<Reply<Vec<DriverProfile>>, ClientError> {
        let endpoint = "GET /api/drivers/city/{city}";
        let token = session.bearer()?;
        let mut url = self.transport.url(&query.path_segments())?;
        url.query_pairs_mut()
            .extend_pairs(query.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));
        tracing::debug!(city = query.city(), page = query.page(), "searching drivers");
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// All drivers, optionally filtered. Admin only.
    ///
    /// Calls `GET {base_url}/api/drivers/all?verified&city`.
    pub async fn list_all(
        &self,
        session: &Session,
        verified: Option<bool>,
        city: Option<&str>,
    ) -> Result<Reply<Vec<DriverProfile>>, ClientError> {
        let endpoint = "GET /api/drivers/all";
        let token = session.bearer()?;
        let mut url = self.transport.url(&["api", "drivers", "all"])?;
        let mut pairs = Vec::new();
        if let Some(v) = verified {
            pairs.push(("verified", if v { "true" } else { "false" }));
        }
        if let Some(c) = city.map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("city", c));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// Drivers awaiting verification. Admin only.
    ///
    /// Calls `GET {base_url}/api/drivers/pending`.
    pub async fn pending(&self, session: &Session) -> Result<Reply<Vec<DriverProfile>>, ClientError> {
        self.list_simple(session, "GET /api/drivers/pending", "pending").await
    }

    /// Verified drivers. Admin only.
    ///
    /// Calls `GET {base_url}/api/drivers/verified`.
    pub async fn verified(&self, session: &Session) -> Result<Reply<Vec<DriverProfile>>, ClientError> {
        self.list_simple(session, "GET /api/drivers/verified", "verified").await
    }

    async fn list_simple(
        &self,
        session: &Session,
        endpoint: &str,
        segment: &str,
    ) -> Result<Reply<Vec<DriverProfile>>, ClientError> {
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", segment])?;
        let request = self.transport.http().get(url).bearer_auth(token);
        self.transport.call(endpoint, request).await?.into_reply(endpoint)
    }

    /// Mark one driver verified. Admin only.
    ///
    /// The local copy is checked first: an already verified driver is
    /// refused without a request. On success `profile` is replaced with the
    /// backend's copy.
    ///
    /// Calls `PATCH {base_url}/api/drivers/{id}/verify`.
    pub async fn verify(
        &self,
        session: &Session,
        actor: Role,
        profile: &mut DriverProfile,
    ) -> Result<Option<String>, ClientError> {
        let mut next = profile.clone();
        verification::verify(&mut next, actor, chrono::Utc::now())?;
        let reply = self.verify_id(session, &profile.id).await?;
        let message = reply.message.clone();
        match reply.data {
            Some(remote) => {
                verification::observe_verification(next.is_verified, remote.is_verified)?;
                *profile = remote;
            }
            None => *profile = next,
        }
        Ok(message)
    }

    /// Mark a driver verified by id. Admin only.
    ///
    /// Calls `PATCH {base_url}/api/drivers/{id}/verify`.
    pub async fn verify_id(
        &self,
        session: &Session,
        id: &DriverId,
    ) -> Result<Reply<Option<DriverProfile>>, ClientError> {
        let endpoint = "PATCH /api/drivers/{id}/verify";
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", id.as_str(), "verify"])?;
        let request = self.transport.http().patch(url).bearer_auth(token);
        let envelope = self.transport.call::<serde_json::Value>(endpoint, request).await?;
        let count = envelope.count;
        let pagination = envelope.pagination;
        let data = envelope
            .data
            .clone()
            .and_then(|v| serde_json::from_value::<DriverProfile>(v).ok());
        let message = envelope.into_ack(endpoint)?;
        tracing::info!(driver = %id, "driver verified");
        Ok(Reply {
            data,
            message,
            count,
            pagination,
        })
    }

    /// Verify several drivers at once. Admin only.
    ///
    /// Calls `POST {base_url}/api/drivers/bulk-verify`.
    pub async fn bulk_verify(
        &self,
        session: &Session,
        ids: &[DriverId],
    ) -> Result<Option<String>, ClientError> {
        let endpoint = "POST /api/drivers/bulk-verify";
        if ids.is_empty() {
            return Err(ClientError::Validation("Select at least one driver to verify".to_string()));
        }
        let token = session.bearer()?;
        let url = self.transport.url(&["api", "drivers", "bulk-verify"])?;
        let request = self
            .transport
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&BulkVerifyRequest { driver_ids: ids });
        let message = self
            .transport
            .call::<serde_json::Value>(endpoint, request)
            .await?
            .into_ack(endpoint)?;
        tracing::info!(count = ids.len(), "drivers verified in bulk");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> DriverProfileForm {
        DriverProfileForm {
            name: "Ravi Kumar".into(),
            phone_number: "98765-43210".into(),
            rc_number: "mh01ab1234".into(),
            dl_number: "MH01 2023 0001234".into(),
            permanent_address: "12 MG Road, Andheri East".into(),
            operating_address: "45 Link Road, Malad West".into(),
            city: "Mumbai".into(),
            ..DriverProfileForm::default()
        }
    }

    #[test]
    fn optional_fields_may_be_empty() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn optional_fields_are_checked_when_present() {
        let mut f = valid_form();
        f.pincode = "4000".into();
        f.experience = "-2".into();
        let fields: Vec<_> = f.validate().into_iter().map(|x| x.field).collect();
        assert_eq!(fields, vec![Field::Pincode, Field::Experience]);
    }

    #[test]
    fn rc_number_is_required() {
        let mut f = valid_form();
        f.rc_number = "  ".into();
        let err = f.to_body().unwrap_err();
        assert_eq!(err.to_string(), "RC number is required");
    }

    #[test]
    fn body_omits_empty_values() {
        let mut f = valid_form();
        f.experience = "4".into();
        let json = serde_json::to_value(f.to_body().unwrap()).unwrap();
        assert_eq!(json["phoneNumber"], "9876543210");
        assert_eq!(json["dlNumber"], "MH0120230001234");
        assert_eq!(json["experience"], 4);
        assert!(json.get("state").is_none());
        assert!(json.get("salaryExpectation").is_none());
    }

    #[test]
    fn out_of_range_experience_is_rejected_not_dropped() {
        let mut f = valid_form();
        f.experience = "5000000000".into();
        let fields: Vec<_> = f.validate().into_iter().map(|x| x.field).collect();
        assert_eq!(fields, vec![Field::Experience]);
        let err = f.to_body().unwrap_err();
        assert_eq!(err.to_string(), "Experience is too large");
    }

    #[test]
    fn body_carries_canonical_pincode() {
        let mut f = valid_form();
        f.pincode = " 400069 ".into();
        let json = serde_json::to_value(f.to_body().unwrap()).unwrap();
        assert_eq!(json["pincode"], "400069");
    }

    #[test]
    fn new_profile_form_prefills_city() {
        assert_eq!(DriverProfileForm::for_new_profile(Some("Pune")).city, "Pune");
        assert_eq!(DriverProfileForm::for_new_profile(None).city, "");
    }

    #[test]
    fn profile_round_trips_into_form() {
        let p: DriverProfile = serde_json::from_value(serde_json::json!({
            "id": "drv_1", "name": "Ravi Kumar", "city": "Mumbai",
            "phoneNumber": "9876543210", "experience": 3
        }))
        .unwrap();
        let f = DriverProfileForm::from_profile(&p);
        assert_eq!(f.experience, "3");
        assert_eq!(f.salary_expectation, "");
    }
}
