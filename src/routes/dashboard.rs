//! Server-rendered dashboard pages.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::render::pages::{self, ClaimDetail, ClaimsPage};
use crate::services::claim;
use crate::services::tables;
use crate::state::AppState;

/// `GET /`: tables overview.
pub async fn tables_page(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match tables::fetch_overview(state.store.as_ref(), &state.settings.tables).await {
        Ok(overview) => (StatusCode::OK, Html(pages::overview_page(Ok(&overview)))),
        Err(e) => {
            error!(error = %e, "table listing failed");
            (StatusCode::BAD_GATEWAY, Html(pages::overview_page(Err(&e.to_string()))))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClaimsQuery {
    pub claim_id: Option<String>,
}

impl ClaimsQuery {
    /// Selected id; blank or non-numeric input means no selection.
    #[must_use]
    pub fn selected_id(&self) -> Option<i64> {
        self.claim_id.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

/// `GET /claims?claim_id=N`: fraud analyst dashboard.
///
/// The claim list and the selected claim are fetched concurrently. A failed
/// claim list leaves the selector empty; a failed claim fetch is shown as an
/// error in place of the claim.
pub async fn claims_page(
    State(state): State<AppState>,
    Query(query): Query<ClaimsQuery>,
) -> (StatusCode, Html<String>) {
    let store = state.store.as_ref();
    let table = state.settings.claims_table.as_str();
    let selected_id = query.selected_id();

    let (claims, selected) = tokio::join!(claim::list_claims(store, table), async {
        match selected_id {
            Some(id) => Some((id, claim::fetch_claim(store, table, id).await)),
            None => None,
        }
    });

    let claims = claims.unwrap_or_else(|e| {
        warn!(error = %e, "claim list fetch failed; selector left empty");
        Vec::new()
    });

    let failure;
    let (status, detail) = match &selected {
        None => (StatusCode::OK, ClaimDetail::NoSelection),
        Some((_, Ok(Some(claim)))) => (StatusCode::OK, ClaimDetail::Loaded(claim)),
        Some((id, Ok(None))) => (StatusCode::NOT_FOUND, ClaimDetail::NotFound(*id)),
        Some((id, Err(e))) => {
            error!(claim_id = *id, error = %e, "claim fetch failed");
            failure = e.to_string();
            (StatusCode::BAD_GATEWAY, ClaimDetail::Failed(&failure))
        }
    };

    let html = pages::claims_page(&ClaimsPage { claims: &claims, selected_id, detail, now: OffsetDateTime::now_utc() });
    (status, Html(html))
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
