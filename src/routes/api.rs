//! JSON API routes.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as `{ "error": { "code", "message" } }`. Store
//! failures are upstream problems and map to 502; a missing claim is 404.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ErrorBody, ErrorCode};
use crate::services::claim::{self, Claim, ClaimSummary, SelectedClaim};
use crate::services::selection::ViewState;
use crate::services::tables::{self, TableOverview};
use crate::state::AppState;
use crate::store::StoreError;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("claim {0} not found")]
    ClaimNotFound(i64),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::ClaimNotFound(_) => "E_CLAIM_NOT_FOUND",
        }
    }
}

pub(crate) fn store_error_to_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::ConfigParse(_) | StoreError::MissingApiKey { .. } | StoreError::HttpClientBuild(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        StoreError::ApiRequest(_)
        | StoreError::ApiResponse { .. }
        | StoreError::ApiParse(_)
        | StoreError::MultipleRows { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Store(e) => store_error_to_status(e),
            Self::ClaimNotFound(_) => StatusCode::NOT_FOUND,
        };
        if status.is_server_error() {
            warn!(code = self.error_code(), error = %self, "api request failed");
        }
        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}

// =============================================================================
// TABLES
// =============================================================================

#[derive(Serialize)]
pub struct TablesResponse {
    #[serde(flatten)]
    pub overview: TableOverview,
    pub total_rows: u64,
}

/// `GET /api/tables`: first page and row count of every collection.
pub async fn list_tables(State(state): State<AppState>) -> Result<Json<TablesResponse>, ApiError> {
    let overview = tables::fetch_overview(state.store.as_ref(), &state.settings.tables).await?;
    let total_rows = overview.total_rows();
    Ok(Json(TablesResponse { overview, total_rows }))
}

// =============================================================================
// CLAIMS
// =============================================================================

/// `GET /api/claims`: claim summaries ordered by id.
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<Vec<ClaimSummary>>, ApiError> {
    let claims = claim::list_claims(state.store.as_ref(), &state.settings.claims_table).await?;
    Ok(Json(claims))
}

/// `GET /api/claims/:id`: one claim.
pub async fn get_claim(State(state): State<AppState>, Path(claim_id): Path<i64>) -> Result<Json<Claim>, ApiError> {
    claim::fetch_claim(state.store.as_ref(), &state.settings.claims_table, claim_id)
        .await?
        .map(Json)
        .ok_or(ApiError::ClaimNotFound(claim_id))
}

#[derive(Deserialize)]
pub struct SelectClaimBody {
    pub claim_id: i64,
}

/// `POST /api/claims/selection`: select a claim and load it.
///
/// Returns the selection state once this request settles. A fetch failure
/// is reported inside the state, not as an error status.
pub async fn select_claim(
    State(state): State<AppState>,
    Json(body): Json<SelectClaimBody>,
) -> Json<ViewState<SelectedClaim>> {
    info!(claim_id = body.claim_id, "claim selected");
    let view = claim::select_claim(
        state.store.as_ref(),
        &state.settings.claims_table,
        &state.selection,
        body.claim_id,
    )
    .await;
    Json(view)
}

/// `GET /api/claims/selection`: current selection state.
pub async fn current_selection(State(state): State<AppState>) -> Json<ViewState<SelectedClaim>> {
    Json(state.selection.snapshot())
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
