//! Table overview: discover every collection and fetch a page of each.
//!
//! DESIGN
//! ======
//! Listing runs first; if it fails the whole overview fails. Per-collection
//! fetches then run concurrently and the overview is assembled once all of
//! them settle, in discovery order.
//!
//! ERROR HANDLING
//! ==============
//! A failing collection is logged and left out of `tables`, but its name and
//! error are kept in `failed` so callers can tell "empty" from "partially
//! failed". Neither case is an error.

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::store::config::{DEFAULT_EXCLUDED_TABLES, DEFAULT_PAGE_LIMIT, DEFAULT_SCHEMA, StoreConfig};
use crate::store::{Record, RecordStore, SelectQuery, StoreError};

// =============================================================================
// TYPES
// =============================================================================

/// Which collections to discover and how much of each to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScope {
    pub schema: String,
    pub excluded: Vec<String>,
    pub page_limit: usize,
}

impl TableScope {
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            schema: config.schema.clone(),
            excluded: config.excluded_tables.clone(),
            page_limit: config.page_limit,
        }
    }
}

impl Default for TableScope {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            excluded: vec![DEFAULT_EXCLUDED_TABLES.to_string()],
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// First page of one collection plus its total row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSnapshot {
    pub name: String,
    pub rows: Vec<Record>,
    /// Total rows in the collection; may exceed `rows.len()`.
    pub row_count: u64,
}

impl CollectionSnapshot {
    /// Column names, taken from the first row.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCollection {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableOverview {
    pub tables: Vec<CollectionSnapshot>,
    pub failed: Vec<FailedCollection>,
}

impl TableOverview {
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.row_count).sum()
    }

    /// `true` when there is nothing to show (no collections, or none fetched).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Discover collections in `scope.schema` and fetch the first page of each.
///
/// # Errors
///
/// Returns the store error only when listing collections fails.
/// Per-collection failures are reported in [`TableOverview::failed`].
pub async fn fetch_overview(store: &dyn RecordStore, scope: &TableScope) -> Result<TableOverview, StoreError> {
    let names: Vec<String> = store
        .list_collections(&scope.schema, &scope.excluded)
        .await?
        .into_iter()
        .filter(|name| !scope.excluded.contains(name))
        .collect();
    info!(schema = %scope.schema, count = names.len(), "discovered collections");

    let query = SelectQuery::all()
        .in_schema(&scope.schema)
        .limit(scope.page_limit)
        .with_exact_count();
    let results = join_all(names.iter().map(|name| {
        let query = &query;
        async move { (name, store.select(name, query).await) }
    }))
    .await;

    let mut overview = TableOverview::default();
    for (name, result) in results {
        match result {
            Ok(page) => {
                let row_count = page.total.unwrap_or(page.rows.len() as u64);
                overview.tables.push(CollectionSnapshot { name: name.clone(), rows: page.rows, row_count });
            }
            Err(e) => {
                warn!(collection = %name, error = %e, "collection fetch failed; skipping");
                overview.failed.push(FailedCollection { name: name.clone(), error: e.to_string() });
            }
        }
    }
    Ok(overview)
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
