//! Store: read-only client for the hosted database's PostgREST API.
//!
//! DESIGN
//! ======
//! `StoreClient` is built once in `main` from [`config::StoreConfig`] and
//! shared through `AppState` as `Arc<dyn RecordStore>`. There is no global
//! connection: the client lives exactly as long as the server does, and tests
//! swap in in-memory stores through the same trait.
//!
//! ERROR HANDLING
//! ==============
//! Network, auth, and query failures all surface as [`StoreError`]. Nothing
//! is retried here; callers decide whether a failure is fatal or skippable.

pub mod config;
pub mod postgrest;
pub mod types;

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use tracing::debug;

use config::StoreConfig;
pub use types::{Direction, Page, Record, RecordStore, SelectQuery, StoreError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct StoreClient {
    http: reqwest::Client,
    rest_url: Url,
    api_key: String,
}

impl StoreClient {
    /// Build a store client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or the HTTP client
    /// fails to build.
    pub fn from_env() -> Result<(Self, StoreConfig), StoreError> {
        let config = StoreConfig::from_env()?;
        let client = Self::from_config(&config)?;
        Ok((client, config))
    }

    /// Build a store client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid base URL or the HTTP client
    /// fails to build.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let rest_url = Url::parse(&format!("{}/rest/v1", config.url))
            .map_err(|e| StoreError::ConfigParse(format!("invalid STORE_URL '{}': {e}", config.url)))?;
        if rest_url.cannot_be_a_base() {
            return Err(StoreError::ConfigParse(format!("STORE_URL '{}' cannot be a base URL", config.url)));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, rest_url, api_key: config.api_key.clone() })
    }

    /// Base REST endpoint (`{url}/rest/v1`).
    #[must_use]
    pub fn rest_url(&self) -> &str {
        self.rest_url.as_str()
    }

    /// Endpoint for one collection. The name is a single percent-encoded
    /// path segment.
    fn collection_url(&self, collection: &str) -> Url {
        let mut url = self.rest_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(collection);
        }
        url
    }

    fn get(&self, collection: &str, query: &SelectQuery) -> RequestBuilder {
        let url = self.collection_url(collection);
        let mut request = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&postgrest::query_pairs(query));
        if let Some(prefer) = postgrest::prefer_header(query) {
            request = request.header("Prefer", prefer);
        }
        if let Some(schema) = &query.schema {
            request = request.header(postgrest::ACCEPT_PROFILE, schema);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Page, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(postgrest::parse_content_range);
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(StoreError::ApiResponse { status: status.as_u16(), body: text });
        }

        let rows = postgrest::decode_rows(&text)?;
        Ok(Page { rows, total })
    }
}

#[async_trait::async_trait]
impl RecordStore for StoreClient {
    async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Page, StoreError> {
        debug!(collection, ?query, "store select");
        self.send(self.get(collection, query)).await
    }

    async fn list_collections(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>, StoreError> {
        let query = postgrest::list_tables_query(schema, excluded);
        let page = self.send(self.get(postgrest::METADATA_TABLES, &query)).await?;
        Ok(postgrest::table_names(&page.rows))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
