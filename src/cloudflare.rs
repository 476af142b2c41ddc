//! Cloudflare API Client
//!
//! Read-only wrapper around the Cloudflare v4 REST API.
//! Authenticates with the global API key (`X-Auth-Key` / `X-Auth-Email`)
//! and exposes the two calls this tool needs: zone listing and DNS record listing.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::credentials::Credentials;

/// Default Cloudflare v4 API endpoint
pub const CLOUDFLARE_API: &str = "https://api.cloudflare.com/client/v4";

const AUTH_KEY_HEADER: &str = "x-auth-key";
const AUTH_EMAIL_HEADER: &str = "x-auth-email";

// ============================================================
// API Response Types
// ============================================================

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i32,
    message: String,
}

/// A zone visible to the account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A DNS record as returned by `/zones/{id}/dns_records`.
///
/// Only the fields this tool shows are modelled; missing fields decode as
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub modified_on: String,
}

/// Transport and API failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` holds the provider's errors, or the raw body
    #[error("Cloudflare API returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Cloudflare API error: {0}")]
    Api(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

fn join_errors(errors: &[ApiMessage]) -> String {
    let errors: Vec<String> = errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.code))
        .collect();
    errors.join(", ")
}

/// Unwrap the `{ success, errors, result }` envelope.
fn into_result<T: Default>(response: ApiResponse<T>) -> Result<T, ApiError> {
    if !response.success {
        return Err(ApiError::Api(join_errors(&response.errors)));
    }

    Ok(response.result.unwrap_or_default())
}

/// Error text for a non-2xx body: the envelope's messages when it has any
fn status_message(body: String) -> String {
    match serde_json::from_str::<ApiResponse<IgnoredAny>>(&body) {
        Ok(envelope) if !envelope.errors.is_empty() => join_errors(&envelope.errors),
        _ => body,
    }
}

// ============================================================
// Provider Seam
// ============================================================

/// The read-only Cloudflare operations this tool depends on
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// `GET /zones`, optionally filtered by exact zone name
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>, ApiError>;

    /// `GET /zones/{zone_id}/dns_records`
    async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, ApiError>;
}

// ============================================================
// Client Implementation
// ============================================================

/// Cloudflare API client bound to one account
pub struct CloudflareClient {
    client: Client,
    base_url: String,
}

impl CloudflareClient {
    /// Create a client for `base_url` carrying the auth headers on every request
    pub fn new(credentials: &Credentials, base_url: &str) -> Result<Self, ApiError> {
        Self::build(credentials, base_url, Client::builder())
    }

    fn build(
        credentials: &Credentials,
        base_url: &str,
        builder: ClientBuilder,
    ) -> Result<Self, ApiError> {
        let client = builder
            .user_agent(concat!("cf-check-dns/", env!("CARGO_PKG_VERSION")))
            .default_headers(Self::auth_headers(credentials)?)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_headers(credentials: &Credentials) -> Result<HeaderMap, ApiError> {
        let mut key = HeaderValue::from_str(credentials.api_key())?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_KEY_HEADER), key);
        headers.insert(
            HeaderName::from_static(AUTH_EMAIL_HEADER),
            HeaderValue::from_str(credentials.api_email())?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: status_message(body),
            });
        }

        let response: ApiResponse<T> = response.json().await?;
        into_result(response)
    }
}

#[async_trait]
impl DnsApi for CloudflareClient {
    async fn list_zones(&self, name: Option<&str>) -> Result<Vec<Zone>, ApiError> {
        match name {
            Some(name) => self.get("/zones", &[("name", name)]).await,
            None => self.get("/zones", &[]).await,
        }
    }

    async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, ApiError> {
        self.get(&format!("/zones/{}/dns_records", zone_id), &[])
            .await
    }
}
