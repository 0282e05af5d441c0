//! Response envelope and the shared request path.
//!
//! Every backend response has the shape
//! `{success, data?, error?, message?, count?, pagination?}`. Callers branch
//! on `success`, never on the HTTP status alone; only 401 and 403 are read
//! from the status line, as session failures.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use d24_core::Pagination;

use crate::config::ConfigError;
use crate::error::ClientError;

/// Fallback message for a failure envelope that carries none.
const UNSPECIFIED_FAILURE: &str = "Request failed";

/// Raw response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the backend considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Payload on success.
    pub data: Option<T>,
    /// Failure reason.
    pub error: Option<String>,
    /// Informational message.
    pub message: Option<String>,
    /// Item count, on list endpoints.
    pub count: Option<u64>,
    /// Page counters, on paginated endpoints.
    pub pagination: Option<Pagination>,
}

/// A successful response with its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    /// Payload.
    pub data: T,
    /// Informational message.
    pub message: Option<String>,
    /// Item count, on list endpoints.
    pub count: Option<u64>,
    /// Page counters, on paginated endpoints.
    pub pagination: Option<Pagination>,
}

impl<T> Reply<T> {
    /// Transform the payload, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            data: f(self.data),
            message: self.message,
            count: self.count,
            pagination: self.pagination,
        }
    }
}

impl<T> Envelope<T> {
    fn failure(&self, endpoint: &str) -> Option<ClientError> {
        if self.success {
            return None;
        }
        let message = self
            .error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| UNSPECIFIED_FAILURE.to_string());
        tracing::warn!(endpoint, %message, "backend rejected request");
        Some(ClientError::Backend {
            endpoint: endpoint.to_string(),
            message,
        })
    }

    /// Convert into a [`Reply`], requiring a payload.
    ///
    /// # Errors
    ///
    /// [`ClientError::Backend`] for `success: false`;
    /// [`ClientError::Deserialization`] for a success without `data`.
    pub fn into_reply(self, endpoint: &str) -> Result<Reply<T>, ClientError> {
        if let Some(err) = self.failure(endpoint) {
            return Err(err);
        }
        let data = self.data.ok_or_else(|| ClientError::Deserialization {
            endpoint: endpoint.to_string(),
            status: StatusCode::OK.as_u16(),
            source: <serde_json::Error as serde::de::Error>::missing_field("data"),
        })?;
        Ok(Reply {
            data,
            message: self.message,
            count: self.count,
            pagination: self.pagination,
        })
    }

    /// Convert into the informational message only, for calls whose payload
    /// the client does not use.
    ///
    /// # Errors
    ///
    /// [`ClientError::Backend`] for `success: false`.
    pub fn into_ack(self, endpoint: &str) -> Result<Option<String>, ClientError> {
        match self.failure(endpoint) {
            Some(err) => Err(err),
            None => Ok(self.message),
        }
    }
}

/// HTTP client plus base URL, shared by every sub-client.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Build `{base_url}/seg/seg/...`. Each segment is percent-encoded, so
    /// a city like `New Delhi` stays one segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::InvalidUrl(
                    "base_url".to_string(),
                    "URL cannot be used as a base".to_string(),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the envelope.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ClientError> {
        let resp = self.send(endpoint, request).await?;
        self.decode(endpoint, resp).await
    }

    /// Like [`Transport::call`], but HTTP 404 means "no such record".
    pub(crate) async fn call_optional<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<Envelope<T>>, ClientError> {
        let resp = self.send(endpoint, request).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.decode(endpoint, resp).await.map(Some)
    }

    async fn send(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let resp = request.send().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        tracing::debug!(endpoint, status = resp.status().as_u16(), "response received");
        Ok(resp)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<Envelope<T>, ClientError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_prefers_error_over_message() {
        let env: Envelope<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "success": false, "error": "Booking not found", "message": "ignored"
        }))
        .unwrap();
        match env.into_reply("GET /x") {
            Err(ClientError::Backend { message, .. }) => assert_eq!(message, "Booking not found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_without_reason_gets_fallback() {
        let env: Envelope<()> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(env.into_ack("PATCH /x").unwrap_err().to_string(), UNSPECIFIED_FAILURE);
    }

    #[test]
    fn success_without_data_is_a_decode_error() {
        let env: Envelope<Vec<u8>> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            env.into_reply("GET /x"),
            Err(ClientError::Deserialization { .. })
        ));
    }

    #[test]
    fn ack_keeps_message() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"success": true, "message": "Booking cancelled"}"#).unwrap();
        assert_eq!(env.into_ack("PATCH /x").unwrap().as_deref(), Some("Booking cancelled"));
    }

    #[test]
    fn url_encodes_segments() {
        let t = Transport::new(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:3000").unwrap(),
        );
        let url = t.url(&["api", "drivers", "city", "New Delhi"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/drivers/city/New%20Delhi");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let t = Transport::new(
            reqwest::Client::new(),
            Url::parse("https://example.com/backend/").unwrap(),
        );
        let url = t.url(&["api", "bookings"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/backend/api/bookings");
    }
}
