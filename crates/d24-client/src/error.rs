//! Drivers24 client error types.
//!
//! Every variant belongs to one class of failure, and each class is shown
//! to the person in one way, see [`ClientError::surface`].

use d24_core::{BookingStatus, FieldFailure, SearchError, StateTransitionError, ValidationError};
use d24_state::WizardError;

use crate::config::ConfigError;
use crate::session::{Route, SessionError};

/// Banner text for transport failures.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Errors from Drivers24 client calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A form value was rejected locally. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// A booking or verification action is not allowed from the current
    /// state. No request was sent.
    #[error(transparent)]
    Transition(#[from] StateTransitionError),

    /// Contact details were requested for a booking that is not accepted.
    #[error("driver contact details are only shared for accepted bookings (this booking is {status})")]
    FullInfoNotDisclosed { status: BookingStatus },

    /// The registration wizard refused to submit.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The response body was not the expected envelope.
    #[error("failed to decode response from {endpoint} (HTTP {status}): {source}")]
    Deserialization {
        endpoint: String,
        status: u16,
        source: serde_json::Error,
    },

    /// The backend answered with `success: false`.
    #[error("{message}")]
    Backend { endpoint: String, message: String },

    /// The backend refused the token (HTTP 401/403).
    #[error("not authorized to call {endpoint} (HTTP {status})")]
    Unauthorized { endpoint: String, status: u16 },

    /// No bearer token is held. No request was sent.
    #[error("not signed in")]
    NoSession,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session store error.
    #[error("session store error: {0}")]
    Session(#[from] SessionError),
}

impl From<FieldFailure> for ClientError {
    fn from(f: FieldFailure) -> Self {
        Self::Validation(f.reason.to_string())
    }
}

impl From<SearchError> for ClientError {
    fn from(e: SearchError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

/// How an error is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    /// Next to the field or control that caused it.
    Inline(String),
    /// A generic banner; details go to the log.
    Banner(String),
    /// The backend's own message, shown as-is.
    Verbatim(String),
    /// Navigate away.
    Redirect(Route),
}

impl ClientError {
    /// How this error should be shown.
    pub fn surface(&self) -> Surface {
        match self {
            Self::Validation(_)
            | Self::Transition(_)
            | Self::FullInfoNotDisclosed { .. }
            | Self::Wizard(_) => Surface::Inline(self.to_string()),
            Self::Http { .. } | Self::Deserialization { .. } | Self::Config(_) | Self::Session(_) => {
                Surface::Banner(GENERIC_FAILURE.to_string())
            }
            Self::Backend { message, .. } => Surface::Verbatim(message.clone()),
            Self::Unauthorized { .. } | Self::NoSession => Surface::Redirect(Route::SignIn),
        }
    }

    /// Whether no request reached the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Transition(_)
                | Self::FullInfoNotDisclosed { .. }
                | Self::Wizard(_)
                | Self::NoSession
                | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_surface_inline() {
        let e = ClientError::from(SearchError::MissingCity);
        assert_eq!(e.surface(), Surface::Inline("Please enter a city".into()));
        assert!(e.is_local());
        let e = ClientError::from(WizardError::MissingDlImage);
        assert_eq!(e.surface(), Surface::Inline("DL image is required".into()));
    }

    #[test]
    fn backend_message_is_verbatim() {
        let e = ClientError::Backend {
            endpoint: "POST /api/bookings".into(),
            message: "Driver is not available".into(),
        };
        assert_eq!(e.surface(), Surface::Verbatim("Driver is not available".into()));
        assert!(!e.is_local());
    }

    #[test]
    fn decode_failure_is_a_banner() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let e = ClientError::Deserialization {
            endpoint: "GET /api/drivers/pending".into(),
            status: 502,
            source,
        };
        assert_eq!(e.surface(), Surface::Banner(GENERIC_FAILURE.into()));
    }

    #[test]
    fn session_errors_redirect_to_sign_in() {
        assert_eq!(ClientError::NoSession.surface(), Surface::Redirect(Route::SignIn));
        let e = ClientError::Unauthorized {
            endpoint: "GET /api/bookings/my-bookings".into(),
            status: 401,
        };
        assert_eq!(e.surface(), Surface::Redirect(Route::SignIn));
    }

    #[test]
    fn full_info_message_names_status() {
        let e = ClientError::FullInfoNotDisclosed {
            status: BookingStatus::Pending,
        };
        assert!(e.to_string().contains("PENDING"));
    }
}
