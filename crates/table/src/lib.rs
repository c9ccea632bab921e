//! PostgREST-style table client for the Folio portfolio backend
//!
//! Every managed resource (blog posts, products, photos, ...) lives in its
//! own table behind a PostgREST-compatible REST API. This crate provides the
//! row-level operations the admin panels are built on: select with equality
//! filters, ordering and pagination, insert, update and delete. Row-level
//! security is enforced server-side; this client only carries the caller's
//! token.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Structured error body returned by the REST layer.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorDetails {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(details) = &self.details {
            parts.push(format!("Details: {}", details));
        }
        if let Some(hint) = &self.hint {
            parts.push(format!("Hint: {}", hint));
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("API error: {details} (Status: {status})")]
    ApiError {
        details: ApiErrorDetails,
        status: reqwest::StatusCode,
    },

    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApiError {
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

/// Sort direction for `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One table (or view) scoped request builder.
///
/// A builder is cheap to construct and consumed per request; the shared
/// `reqwest::Client` is cloned in from the umbrella client.
pub struct TableClient {
    base_url: String,
    table: String,
    http_client: Client,
    headers: HeaderMap,
    query_params: HashMap<String, String>,
}

impl TableClient {
    /// Create a client scoped to one table.
    pub fn new(base_url: &str, api_key: &str, table: &str, http_client: Client) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(api_key) {
            headers.insert("apikey", value);
        }
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            base_url: base_url.to_string(),
            table: table.to_string(),
            http_client,
            headers,
            query_params: HashMap::new(),
        }
    }

    /// Add a header to every request issued by this builder.
    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self> {
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| TableError::InvalidParameters(format!("Invalid header value: {}", value)))?;
        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| TableError::InvalidParameters(format!("Invalid header name: {}", key)))?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Attach the signed-in user's access token so row-level security sees
    /// the caller rather than the anonymous role.
    pub fn with_auth(self, token: &str) -> Result<Self> {
        self.with_header("Authorization", &format!("Bearer {}", token))
    }

    /// Restrict the selected columns (defaults to `*`).
    pub fn select(mut self, columns: &str) -> Self {
        self.query_params
            .insert("select".to_string(), columns.to_string());
        self
    }

    /// Equality filter.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.query_params
            .insert(column.to_string(), format!("eq.{}", value));
        self
    }

    /// Case-insensitive pattern filter.
    pub fn ilike(mut self, column: &str, pattern: &str) -> Self {
        self.query_params
            .insert(column.to_string(), format!("ilike.{}", pattern));
        self
    }

    /// IN filter.
    pub fn in_list(mut self, column: &str, values: &[&str]) -> Self {
        let value_list = values.join(",");
        self.query_params
            .insert(column.to_string(), format!("in.({})", value_list));
        self
    }

    /// Sort by a single column.
    pub fn order(mut self, column: &str, order: SortOrder) -> Self {
        let order_str = match order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        self.query_params
            .insert("order".to_string(), format!("{}.{}", column, order_str));
        self
    }

    /// Limit the number of returned rows.
    pub fn limit(mut self, count: i32) -> Self {
        self.query_params
            .insert("limit".to_string(), count.to_string());
        self
    }

    /// Skip the first `count` rows.
    pub fn offset(mut self, count: i32) -> Self {
        self.query_params
            .insert("offset".to_string(), count.to_string());
        self
    }

    /// Fetch the matching rows and deserialize them.
    pub async fn execute<T: for<'de> Deserialize<'de>>(&self) -> Result<Vec<T>> {
        let url = self.build_url()?;

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(TableError::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status, response).await);
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| TableError::DeserializationError(e.to_string()))
    }

    /// Insert one row (or several, when `values` serializes to an array).
    ///
    /// Returns the stored representation, including server-assigned id and
    /// timestamps.
    pub async fn insert<T: Serialize>(&self, values: T) -> Result<Value> {
        let url = self.build_url()?;

        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=representation"),
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&values)
            .send()
            .await
            .map_err(TableError::NetworkError)?;

        Self::representation_from(response).await
    }

    /// Patch the rows selected by the current filters.
    pub async fn update<T: Serialize>(&self, values: T) -> Result<Value> {
        let url = self.build_url()?;

        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=representation"),
        );

        let response = self
            .http_client
            .patch(&url)
            .headers(headers)
            .json(&values)
            .send()
            .await
            .map_err(TableError::NetworkError)?;

        Self::representation_from(response).await
    }

    /// Delete the rows selected by the current filters.
    pub async fn delete(&self) -> Result<Value> {
        let url = self.build_url()?;

        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=representation"),
        );

        let response = self
            .http_client
            .delete(&url)
            .headers(headers)
            .send()
            .await
            .map_err(TableError::NetworkError)?;

        Self::representation_from(response).await
    }

    fn build_url(&self) -> Result<String> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, self.table))?;

        for (key, value) in &self.query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url.to_string())
    }

    /// Shared success path for mutations: the body may be the stored
    /// representation or empty (204 No Content).
    async fn representation_from(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let body_text = response.text().await.map_err(|e| {
                TableError::DeserializationError(format!("Failed to read response body: {}", e))
            })?;

            if body_text.trim().is_empty() {
                Ok(Value::Null)
            } else {
                serde_json::from_str::<Value>(&body_text)
                    .map_err(|e| TableError::DeserializationError(e.to_string()))
            }
        } else {
            Err(Self::error_from_body(status, response).await)
        }
    }

    async fn error_from_body(status: reqwest::StatusCode, response: reqwest::Response) -> TableError {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error response".to_string());
        log::debug!("table request failed with status {}: {}", status, error_text);

        match serde_json::from_str::<ApiErrorDetails>(&error_text) {
            Ok(details) => TableError::ApiError { details, status },
            Err(_) => TableError::UnparsedApiError {
                message: error_text,
                status,
            },
        }
    }
}
