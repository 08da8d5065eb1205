//! HTTP client for the KOPIS open-data REST API.
//!
//! Wraps `reqwest` with KOPIS-specific URL building, service-key handling,
//! and transport error mapping. Every endpoint answers with XML; this module
//! returns the raw body and leaves deserialization to the callers, except for
//! the error envelope, which is checked here and surfaced as
//! [`FetchError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::types::ApiErrorEnvelope;

pub const DEFAULT_BASE_URL: &str = "http://www.kopis.or.kr/openApi/restful";

/// `returncode` KOPIS uses for a successful request.
const RETURN_CODE_OK: &str = "00";

/// Client for the KOPIS open-data API.
///
/// Holds the HTTP client, service key, and base URL. Use [`KopisClient::new`]
/// for production or [`KopisClient::with_base_url`] to point at a mock
/// server in tests. Cloning is cheap; the connection pool is shared.
#[derive(Clone)]
pub struct KopisClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for KopisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KopisClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl KopisClient {
    /// Creates a new client pointed at the production KOPIS API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if `base_url`
    /// is not an absolute hierarchical URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let base = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            FetchError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot carry path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base,
        })
    }

    /// Fetches the raw performance-detail XML for one show.
    ///
    /// Calls `pblprfr/{show_id}`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::UnexpectedStatus`] on a non-2xx status.
    /// - [`FetchError::EmptyBody`] if the body is blank.
    /// - [`FetchError::Api`] if KOPIS reports a request-level error.
    pub async fn fetch_show_document(&self, show_id: &str) -> Result<String, FetchError> {
        let url = self.build_url(&["pblprfr", show_id.trim()], &[]);
        self.request_xml(&url).await
    }

    /// Builds the full request URL: base path, then `segments` (each
    /// percent-encoded), then `service` and any additional query parameters.
    pub(crate) fn build_url(&self, segments: &[&str], extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // Construction guarantees a hierarchical URL, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("service", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status and a non-blank body,
    /// and checks the KOPIS error envelope.
    ///
    /// Errors name the request path only; the query string carries the
    /// service key.
    pub(crate) async fn request_xml(&self, url: &Url) -> Result<String, FetchError> {
        let resource = url.path().to_string();
        tracing::debug!(resource = %resource, "KOPIS request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                resource,
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody { resource });
        }

        Self::check_api_error(&body)?;
        Ok(body)
    }

    /// Returns [`FetchError::Api`] when the body is a KOPIS error envelope
    /// (`<returncode>` other than `00`). Bodies that are not valid XML pass
    /// through; the caller's deserializer reports those.
    fn check_api_error(body: &str) -> Result<(), FetchError> {
        let Ok(envelope) = quick_xml::de::from_str::<ApiErrorEnvelope>(body) else {
            return Ok(());
        };

        let failure = envelope.db.into_iter().find_map(|record| {
            let code = record.returncode?.trim().to_string();
            (!code.is_empty() && code != RETURN_CODE_OK).then_some((code, record.errmsg))
        });

        match failure {
            Some((code, message)) => Err(FetchError::Api {
                code,
                message: message
                    .map(|m| m.trim().to_string())
                    .unwrap_or_else(|| "unknown error".to_string()),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
