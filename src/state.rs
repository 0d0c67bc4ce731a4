//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the store client, the dashboard settings derived from the store
//! config, and the view slot for the currently selected claim.

use std::sync::Arc;

use crate::services::claim::SelectedClaim;
use crate::services::selection::ViewSlot;
use crate::services::tables::TableScope;
use crate::store::RecordStore;
use crate::store::config::{DEFAULT_CLAIMS_TABLE, StoreConfig};

// =============================================================================
// SETTINGS
// =============================================================================

/// Read-only settings for the dashboard views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub claims_table: String,
    pub tables: TableScope,
}

impl DashboardSettings {
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self { claims_table: config.claims_table.clone(), tables: TableScope::from_config(config) }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { claims_table: DEFAULT_CLAIMS_TABLE.to_string(), tables: TableScope::default() }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub settings: Arc<DashboardSettings>,
    /// Currently selected claim, fed by `POST /api/claims/selection`.
    pub selection: Arc<ViewSlot<SelectedClaim>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, settings: DashboardSettings) -> Self {
        Self { store, settings: Arc::new(settings), selection: Arc::new(ViewSlot::new()) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::cmp::Ordering;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use super::*;
    use crate::format::cell_display;
    use crate::store::types::Filter;
    use crate::store::{Direction, Page, Record, SelectQuery, StoreError};

    /// In-memory store. Collections hold either rows or a canned failure.
    pub struct MockStore {
        listing: Result<Vec<String>, String>,
        collections: HashMap<String, Result<Vec<Record>, String>>,
        gates: Vec<(String, Arc<Notify>)>,
        selects: Mutex<Vec<(String, SelectQuery)>>,
        listings: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl MockStore {
        #[must_use]
        pub fn new() -> Self {
            Self {
                listing: Ok(Vec::new()),
                collections: HashMap::new(),
                gates: Vec::new(),
                selects: Mutex::new(Vec::new()),
                listings: Mutex::new(Vec::new()),
            }
        }

        #[must_use]
        pub fn with_collections(mut self, names: &[&str]) -> Self {
            self.listing = Ok(names.iter().map(|n| (*n).to_string()).collect());
            self
        }

        #[must_use]
        pub fn failing_listing(mut self, message: &str) -> Self {
            self.listing = Err(message.to_string());
            self
        }

        #[must_use]
        pub fn with_rows(mut self, collection: &str, rows: Vec<Value>) -> Self {
            let rows = rows
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            self.collections.insert(collection.to_string(), Ok(rows));
            self
        }

        #[must_use]
        pub fn failing(mut self, collection: &str, message: &str) -> Self {
            self.collections.insert(collection.to_string(), Err(message.to_string()));
            self
        }

        /// Hold any select filtering on `value` until `gate` is notified.
        #[must_use]
        pub fn gated_on(mut self, value: i64, gate: Arc<Notify>) -> Self {
            self.gates.push((value.to_string(), gate));
            self
        }

        pub fn selects(&self) -> Vec<(String, SelectQuery)> {
            self.selects.lock().unwrap().clone()
        }

        pub fn listings(&self) -> Vec<(String, Vec<String>)> {
            self.listings.lock().unwrap().clone()
        }

        fn gate_for(&self, query: &SelectQuery) -> Option<Arc<Notify>> {
            query.filters.iter().find_map(|f| match f {
                Filter::Eq { value, .. } => self
                    .gates
                    .iter()
                    .find(|(gated, _)| gated == value)
                    .map(|(_, gate)| Arc::clone(gate)),
                Filter::NotIn { .. } => None,
            })
        }
    }

    fn row_matches(row: &Record, filters: &[Filter]) -> bool {
        filters.iter().all(|f| match f {
            Filter::Eq { column, value } => cell_display(row.get(column)) == *value,
            Filter::NotIn { column, values } => !values.contains(&cell_display(row.get(column))),
        })
    }

    fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => cell_display(a).cmp(&cell_display(b)),
        }
    }

    #[async_trait::async_trait]
    impl RecordStore for MockStore {
        async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Page, StoreError> {
            self.selects
                .lock()
                .unwrap()
                .push((collection.to_string(), query.clone()));
            if let Some(gate) = self.gate_for(query) {
                gate.notified().await;
            }

            let rows = match self.collections.get(collection) {
                Some(Ok(rows)) => rows,
                Some(Err(message)) => {
                    return Err(StoreError::ApiResponse { status: 400, body: message.clone() });
                }
                None => {
                    return Err(StoreError::ApiResponse { status: 404, body: format!("no table {collection}") });
                }
            };
            let mut matching: Vec<Record> = rows
                .iter()
                .filter(|row| row_matches(row, &query.filters))
                .cloned()
                .collect();
            if let Some((column, Direction::Asc)) = &query.order {
                matching.sort_by(|a, b| compare_cells(a.get(column), b.get(column)));
            }
            let total = query.exact_count.then_some(matching.len() as u64);
            let rows = match query.limit {
                Some(limit) => matching.into_iter().take(limit).collect(),
                None => matching,
            };
            Ok(Page { rows, total })
        }

        async fn list_collections(&self, schema: &str, excluded: &[String]) -> Result<Vec<String>, StoreError> {
            self.listings
                .lock()
                .unwrap()
                .push((schema.to_string(), excluded.to_vec()));
            self.listing.clone().map_err(StoreError::ApiRequest)
        }
    }

    /// A fully populated claim row as the store would return it.
    #[must_use]
    pub fn claim_row(claim_id: i64) -> Value {
        json!({
            "claim_id": claim_id,
            "Customer Name": "Dana Reyes",
            "Policy ID": format!("POL-{claim_id:04}"),
            "Date Reported": "2024-03-15",
            "Incident Date": "2024-03-10",
            "Incident Type": "Auto Collision",
            "Description": "Rear bumper damage <after> stop",
            "Location": "Austin, TX",
            "Status": "Pending Review",
            "Estimated Damage": 12500,
            "Approved Amount": 9800.5,
            "claim_prediction": "Likely staged.\nSecond opinion advised.",
            "elevenlabs_transcript": "Caller reported rear-end collision.",
            "Agent Notes": "Follow up with body shop.",
            "evidence_url": "https://cdn.example.test/evidence/7.jpg",
            "evidence_description": "Photo of rear bumper",
            "evidence_ai-score": "0.82",
            "evidence_classification": "staged collision"
        })
    }

    /// `AppState` backed by `store` with default settings.
    #[must_use]
    pub fn test_app_state(store: MockStore) -> AppState {
        AppState::new(Arc::new(store), DashboardSettings::default())
    }
}
