//! Role selection, profile lookup and guest-registration completion.
//!
//! Identity itself (sign-in, sign-up, identity tokens) belongs to an
//! external provider. This client only exchanges the provider's facts,
//! carried in [`Identity`], for a backend token and user record.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use d24_core::{DriverProfile, Role, User};

use crate::envelope::{Reply, Transport};
use crate::error::ClientError;
use crate::session::{require_role, Route, Session};

/// Shown when the signed-in email differs from the guest registration's.
pub const EMAIL_MISMATCH: &str =
    "Email mismatch. Please sign in with the email you used for registration.";

/// What the identity provider says about the signed-in person.
///
/// Custom `Debug` implementation redacts the token.
#[derive(Clone)]
pub struct Identity {
    /// Provider subject id.
    pub clerk_id: String,
    /// Primary email, if the provider has one.
    pub email: Option<String>,
    /// Provider session token, for the registration-completion call.
    pub token: Option<Zeroizing<String>>,
}

impl Identity {
    /// Identity with only a subject id.
    pub fn new(clerk_id: impl Into<String>) -> Self {
        Self {
            clerk_id: clerk_id.into(),
            email: None,
            token: None,
        }
    }

    /// Attach the primary email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach the provider session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Zeroizing::new(token.into()));
        self
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("clerk_id", &self.clerk_id)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectRoleRequest<'a> {
    clerk_id: &'a str,
    role: Role,
    city: &'a str,
}

/// Token and user issued by role selection.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    /// The account, now with a role.
    pub user: User,
    /// Backend bearer token.
    pub token: String,
}

/// Result of a profile lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    /// The account.
    pub user: User,
    /// Backend bearer token; absent until a role is selected.
    #[serde(default)]
    pub token: Option<String>,
}

/// Result of linking a guest registration to an account.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedRegistration {
    /// The account, now a driver.
    pub user: User,
    /// The driver profile created from the pending registration.
    #[serde(default)]
    pub driver: Option<DriverProfile>,
    /// Backend bearer token.
    pub token: String,
}

#[derive(Debug, Serialize)]
struct CompleteRegistrationRequest<'a> {
    email: &'a str,
}

/// Client for the `/api/auth` endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Assign a role and home city to the account.
    ///
    /// Calls `POST {base_url}/api/auth/select-role`. No token required.
    pub async fn select_role(
        &self,
        clerk_id: &str,
        role: Role,
        city: &str,
    ) -> Result<Reply<AuthGrant>, ClientError> {
        let endpoint = "POST /api/auth/select-role";
        if clerk_id.trim().is_empty() || city.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please select a role and enter your city".to_string(),
            ));
        }
        if !role.is_self_selectable() {
            return Err(ClientError::Validation(format!("The {role} role cannot be selected")));
        }
        let url = self.transport.url(&["api", "auth", "select-role"])?;
        let body = SelectRoleRequest {
            clerk_id,
            role,
            city: city.trim(),
        };
        self.transport
            .call(endpoint, self.transport.http().post(url).json(&body))
            .await?
            .into_reply(endpoint)
    }

    /// Select a role and store the issued token and user in `session`.
    pub async fn sign_in_with_role(
        &self,
        session: &mut Session,
        identity: &Identity,
        role: Role,
        city: &str,
    ) -> Result<Route, ClientError> {
        let grant = self.select_role(&identity.clerk_id, role, city).await?.data;
        tracing::info!(%role, "role selected");
        session.sign_in(grant.token, grant.user);
        Ok(Route::Dashboard(role))
    }

    /// Look up the account linked to a provider subject.
    ///
    /// Calls `GET {base_url}/api/auth/profile?clerkId=`. No token required.
    pub async fn profile(&self, clerk_id: &str) -> Result<Reply<ProfileData>, ClientError> {
        let endpoint = "GET /api/auth/profile";
        let mut url = self.transport.url(&["api", "auth", "profile"])?;
        url.query_pairs_mut().append_pair("clerkId", clerk_id);
        self.transport
            .call(endpoint, self.transport.http().get(url))
            .await?
            .into_reply(endpoint)
    }

    /// Decide where a signed-in person belongs, refreshing `session`.
    ///
    /// The profile is always fetched again; the cached user is never
    /// trusted for this. With a role and token the session is refreshed and
    /// the role's dashboard returned. A missing role, missing token or any
    /// failure routes to role selection.
    pub async fn gate(&self, session: &mut Session, identity: Option<&Identity>) -> Route {
        let Some(identity) = identity else {
            return Route::SignIn;
        };
        match self.profile(&identity.clerk_id).await {
            Ok(reply) => {
                let ProfileData { user, token } = reply.data;
                match (user.role, token) {
                    (Some(role), Some(token)) => {
                        session.sign_in(token, user);
                        Route::Dashboard(role)
                    }
                    _ => Route::SelectRole,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile lookup failed");
                Route::SelectRole
            }
        }
    }

    /// [`AuthClient::gate`] for a screen that needs `required`.
    ///
    /// # Errors
    ///
    /// Returns the redirect when the person may not open the screen.
    pub async fn require(
        &self,
        session: &mut Session,
        identity: Option<&Identity>,
        required: Role,
    ) -> Result<User, Route> {
        match self.gate(session, identity).await {
            Route::Dashboard(_) => require_role(required, session.user()).cloned(),
            other => Err(other),
        }
    }

    /// Link the pending guest registration to the signed-in account.
    ///
    /// Calls `POST {base_url}/api/auth/complete-driver-registration` with the
    /// provider token as bearer.
    pub async fn complete_driver_registration(
        &self,
        identity_token: &str,
        email: &str,
    ) -> Result<Reply<CompletedRegistration>, ClientError> {
        let endpoint = "POST /api/auth/complete-driver-registration";
        let url = self
            .transport
            .url(&["api", "auth", "complete-driver-registration"])?;
        let request = self
            .transport
            .http()
            .post(url)
            .bearer_auth(identity_token)
            .json(&CompleteRegistrationRequest { email });
        self.transport
            .call(endpoint, request)
            .await?
            .into_reply(endpoint)
    }

    /// Run the post-sign-up callback.
    ///
    /// Without a pending registration the person goes to role selection.
    /// The signed-in email must equal the pending one exactly. On success
    /// the session holds the new token and user and the driver dashboard is
    /// returned. The pending email is cleared whatever happens once a
    /// registration was pending.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] with [`EMAIL_MISMATCH`] for a different
    /// email or when the provider token is missing, or the error from the
    /// completion call.
    pub async fn complete_pending_registration(
        &self,
        session: &mut Session,
        identity: &Identity,
    ) -> Result<Route, ClientError> {
        let Some(pending) = session.pending_driver_email().map(str::to_string) else {
            return Ok(Route::SelectRole);
        };
        session.clear_pending_driver_email();

        if identity.email.as_deref() != Some(pending.as_str()) {
            tracing::warn!("signed-in email does not match pending registration");
            return Err(ClientError::Validation(EMAIL_MISMATCH.to_string()));
        }
        let token = identity.token.as_deref().ok_or_else(|| {
            ClientError::Validation("Failed to get authentication token".to_string())
        })?;

        let completed = self
            .complete_driver_registration(token, &pending)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "registration completion failed");
                e
            })?
            .data;
        let mut user = completed.user;
        if user.clerk_id.is_none() {
            user.clerk_id = Some(identity.clerk_id.clone());
        }
        tracing::info!("guest registration linked to account");
        session.sign_in(completed.token, user);
        Ok(Route::Dashboard(Role::Driver))
    }
}
