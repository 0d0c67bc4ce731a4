//! Store types: untyped records, query descriptions, and errors.
//!
//! Records coming back from the hosted database carry no schema contract, so
//! they stay as raw JSON objects here. Typed projections (claims, summaries)
//! live with the services that need them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ErrorCode;

/// One row as returned by the store. Every field may be absent or null.
pub type Record = Map<String, Value>;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by store client operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the store failed before a response arrived.
    #[error("store request failed: {0}")]
    ApiRequest(String),

    /// The store answered with a non-success status.
    #[error("store response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be decoded into records.
    #[error("store response parse failed: {0}")]
    ApiParse(String),

    /// A single-row lookup matched more than one row.
    #[error("expected at most one row from {collection}, got {count}")]
    MultipleRows { collection: String, count: usize },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::ApiRequest(_) => "E_STORE_REQUEST",
            Self::ApiResponse { .. } => "E_STORE_RESPONSE",
            Self::ApiParse(_) => "E_STORE_PARSE",
            Self::MultipleRows { .. } => "E_MULTIPLE_ROWS",
        }
    }
}

// =============================================================================
// QUERY
// =============================================================================

/// A row filter understood by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// `column NOT IN (values...)`
    NotIn { column: String, values: Vec<String> },
}

/// Sort direction for [`SelectQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
}

/// Description of one read against a collection.
///
/// Built with the chained helpers below; an empty column list selects `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
    /// Ask the store for an exact total row count alongside the rows.
    pub exact_count: bool,
    /// Schema to read from; the store's default schema when `None`.
    pub schema: Option<String>,
}

impl SelectQuery {
    /// Select every column.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Select only the named columns.
    #[must_use]
    pub fn columns(columns: &[&str]) -> Self {
        Self { columns: columns.iter().map(|c| (*c).to_string()).collect(), ..Self::default() }
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq { column: column.to_string(), value: value.to_string() });
        self
    }

    #[must_use]
    pub fn not_in(mut self, column: &str, values: &[String]) -> Self {
        if !values.is_empty() {
            self.filters.push(Filter::NotIn { column: column.to_string(), values: values.to_vec() });
        }
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn in_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    #[must_use]
    pub fn with_exact_count(mut self) -> Self {
        self.exact_count = true;
        self
    }
}

/// Rows returned by a select, plus the total count when one was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub rows: Vec<Record>,
    pub total: Option<u64>,
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Read-only access to the hosted database.
///
/// Implemented by [`super::StoreClient`] for production and by in-memory
/// mocks in tests.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Run a select against one collection.
    async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Page, StoreError>;

    /// List collection names in `schema`, skipping any name in `excluded`.
    async fn list_collections(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>, StoreError>;
}
