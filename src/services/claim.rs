//! Claim service: typed projection of claim rows and claim lookups.
//!
//! DESIGN
//! ======
//! Claim rows come back as untyped [`Record`]s. `Claim::from_record` is the
//! single place that knows the column names; every field is optional and
//! numbers are accepted either as JSON numbers or numeric strings.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::services::selection::ViewSlot;
use crate::services::selection::ViewState;
use crate::store::{Direction, Record, RecordStore, SelectQuery, StoreError};

pub const COL_CLAIM_ID: &str = "claim_id";
pub const COL_CUSTOMER_NAME: &str = "Customer Name";
pub const COL_POLICY_ID: &str = "Policy ID";
pub const COL_DATE_REPORTED: &str = "Date Reported";
pub const COL_INCIDENT_DATE: &str = "Incident Date";
pub const COL_INCIDENT_TYPE: &str = "Incident Type";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_LOCATION: &str = "Location";
pub const COL_STATUS: &str = "Status";
pub const COL_ESTIMATED_DAMAGE: &str = "Estimated Damage";
pub const COL_APPROVED_AMOUNT: &str = "Approved Amount";
pub const COL_PREDICTION: &str = "claim_prediction";
pub const COL_TRANSCRIPT: &str = "elevenlabs_transcript";
pub const COL_AGENT_NOTES: &str = "Agent Notes";
pub const COL_EVIDENCE_URL: &str = "evidence_url";
pub const COL_EVIDENCE_DESCRIPTION: &str = "evidence_description";
pub const COL_EVIDENCE_SCORE: &str = "evidence_ai-score";
pub const COL_EVIDENCE_CLASSIFICATION: &str = "evidence_classification";

// =============================================================================
// TYPES
// =============================================================================

/// One insurance claim with its AI analysis fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Claim {
    pub claim_id: Option<i64>,
    pub customer_name: Option<String>,
    pub policy_id: Option<String>,
    pub date_reported: Option<String>,
    pub incident_date: Option<String>,
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub estimated_damage: Option<f64>,
    pub approved_amount: Option<f64>,
    pub claim_prediction: Option<String>,
    pub transcript: Option<String>,
    pub agent_notes: Option<String>,
    pub evidence_url: Option<String>,
    pub evidence_description: Option<String>,
    pub evidence_ai_score: Option<String>,
    pub evidence_classification: Option<String>,
}

impl Claim {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            claim_id: int_field(record, COL_CLAIM_ID),
            customer_name: text_field(record, COL_CUSTOMER_NAME),
            policy_id: text_field(record, COL_POLICY_ID),
            date_reported: text_field(record, COL_DATE_REPORTED),
            incident_date: text_field(record, COL_INCIDENT_DATE),
            incident_type: text_field(record, COL_INCIDENT_TYPE),
            description: text_field(record, COL_DESCRIPTION),
            location: text_field(record, COL_LOCATION),
            status: text_field(record, COL_STATUS),
            estimated_damage: number_field(record, COL_ESTIMATED_DAMAGE),
            approved_amount: number_field(record, COL_APPROVED_AMOUNT),
            claim_prediction: text_field(record, COL_PREDICTION),
            transcript: text_field(record, COL_TRANSCRIPT),
            agent_notes: text_field(record, COL_AGENT_NOTES),
            evidence_url: text_field(record, COL_EVIDENCE_URL),
            evidence_description: text_field(record, COL_EVIDENCE_DESCRIPTION),
            evidence_ai_score: text_field(record, COL_EVIDENCE_SCORE),
            evidence_classification: text_field(record, COL_EVIDENCE_CLASSIFICATION),
        }
    }
}

/// Row shown in the claim selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClaimSummary {
    pub claim_id: Option<i64>,
    pub customer_name: Option<String>,
    pub status: Option<String>,
    pub date_reported: Option<String>,
}

impl ClaimSummary {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            claim_id: int_field(record, COL_CLAIM_ID),
            customer_name: text_field(record, COL_CUSTOMER_NAME),
            status: text_field(record, COL_STATUS),
            date_reported: text_field(record, COL_DATE_REPORTED),
        }
    }
}

/// Payload of the selected-claim view: the requested id and the claim, if
/// one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedClaim {
    pub claim_id: i64,
    pub claim: Option<Claim>,
}

// =============================================================================
// FIELD ACCESS
// =============================================================================

/// Text value of a field. Numbers and booleans are rendered as text; null,
/// arrays, and objects count as missing.
#[must_use]
pub fn text_field(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric value of a field, accepting numeric strings.
#[must_use]
pub fn number_field(record: &Record, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Integer value of a field, accepting integral floats and numeric strings.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn int_field(record: &Record, key: &str) -> Option<i64> {
    match record.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

// =============================================================================
// QUERIES
// =============================================================================

/// Fetch the claim with `claim_id`. `Ok(None)` when no row matches.
///
/// # Errors
///
/// Returns the store error when the request fails, or
/// [`StoreError::MultipleRows`] when the id is not unique.
pub async fn fetch_claim(store: &dyn RecordStore, table: &str, claim_id: i64) -> Result<Option<Claim>, StoreError> {
    let query = SelectQuery::all().eq(COL_CLAIM_ID, claim_id);
    let page = store.select(table, &query).await?;
    match page.rows.as_slice() {
        [] => Ok(None),
        [row] => Ok(Some(Claim::from_record(row))),
        rows => Err(StoreError::MultipleRows { collection: table.to_string(), count: rows.len() }),
    }
}

/// List claim summaries ordered by `claim_id` ascending.
///
/// # Errors
///
/// Returns the store error when the request fails.
pub async fn list_claims(store: &dyn RecordStore, table: &str) -> Result<Vec<ClaimSummary>, StoreError> {
    let query = SelectQuery::columns(&[COL_CLAIM_ID, COL_CUSTOMER_NAME, COL_STATUS, COL_DATE_REPORTED])
        .order(COL_CLAIM_ID, Direction::Asc);
    let page = store.select(table, &query).await?;
    Ok(page.rows.iter().map(ClaimSummary::from_record).collect())
}

/// Make `claim_id` the selected claim and load it into `slot`.
///
/// The slot shows `Loading` while the fetch is in flight. If another
/// selection starts before this one settles, this response is dropped and
/// the returned state reflects the newer selection.
pub async fn select_claim(
    store: &dyn RecordStore,
    table: &str,
    slot: &ViewSlot<SelectedClaim>,
    claim_id: i64,
) -> ViewState<SelectedClaim> {
    let ticket = slot.begin();
    let result = fetch_claim(store, table, claim_id)
        .await
        .map(|claim| SelectedClaim { claim_id, claim })
        .map_err(|e| e.to_string());
    if !slot.settle(ticket, result) {
        debug!(claim_id, "stale claim response discarded");
    }
    slot.snapshot()
}

#[cfg(test)]
#[path = "claim_test.rs"]
mod tests;
