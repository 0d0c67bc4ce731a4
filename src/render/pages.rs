//! Page templates for the dashboard views.

use time::OffsetDateTime;

use super::escape_html;
use super::templates::{
    AlertKind, alert, badge, card, data_table, empty_state, field, icon_title, layout, page_header, progress,
    stat_card, text_block,
};
use crate::format::{
    assess_risk, badge_variant, cell_display, format_currency, format_date, format_days_since, format_financial_delta,
    group_thousands, or_na, status_tone,
};
use crate::services::claim::{Claim, ClaimSummary};
use crate::services::tables::{CollectionSnapshot, TableOverview};

const SECURITY_NOTICE: &str = "A service_role key bypasses Row Level Security. Keep this dashboard on a private \
network, or configure the anon (public) key together with Row Level Security policies.";

// =============================================================================
// Tables Overview Page
// =============================================================================

/// Overview of every discovered table, or the listing error.
#[must_use]
pub fn overview_page(overview: Result<&TableOverview, &str>) -> String {
    let header = page_header("database", "Database Dashboard", "Overview of your database tables and data");
    let notice = alert(AlertKind::Warning, "Security Notice", SECURITY_NOTICE);

    let body = match overview {
        Err(message) => alert(AlertKind::Error, "Error", message),
        Ok(overview) => overview_body(overview),
    };

    layout("Tables", &format!("{header}\n{notice}\n{body}"))
}

fn overview_body(overview: &TableOverview) -> String {
    let stats = format!(
        r##"<div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">
            {tables}
            {rows}
            {connection}
        </div>"##,
        tables = stat_card("Total Tables", &overview.tables.len().to_string(), "table", "Public schema tables"),
        rows = stat_card("Total Rows", &group_thousands(overview.total_rows()), "database", "Across all tables"),
        connection = stat_card("Connection Status", "Connected", "plug", "Database instance reachable"),
    );

    let failed = if overview.failed.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = overview.failed.iter().map(|f| f.name.as_str()).collect();
        alert(
            AlertKind::Warning,
            "Some tables could not be loaded",
            &format!("Skipped: {}", names.join(", ")),
        )
    };

    let tables = if overview.is_empty() {
        empty_state(
            "database",
            "No tables found",
            "No tables found in your database. Create tables to see them here.",
        )
    } else {
        overview.tables.iter().map(table_card).collect::<Vec<_>>().join("\n")
    };

    format!("{stats}\n{failed}\n<div class=\"space-y-6\">{tables}</div>")
}

fn table_card(snapshot: &CollectionSnapshot) -> String {
    let columns = snapshot.columns();
    let rows: Vec<Vec<String>> = snapshot
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| cell_display(row.get(*c))).collect())
        .collect();
    let title = format!(
        r#"{} <span class="text-sm font-normal text-gray-500 ml-2">({} rows)</span>"#,
        icon_title("table", &snapshot.name),
        snapshot.row_count
    );
    card(&title, &data_table(&columns, &rows))
}

// =============================================================================
// Fraud Dashboard Page
// =============================================================================

/// What the detail area of the fraud dashboard shows.
#[derive(Debug, Clone, Copy)]
pub enum ClaimDetail<'a> {
    NoSelection,
    NotFound(i64),
    Loaded(&'a Claim),
    Failed(&'a str),
}

pub struct ClaimsPage<'a> {
    pub claims: &'a [ClaimSummary],
    pub selected_id: Option<i64>,
    pub detail: ClaimDetail<'a>,
    pub now: OffsetDateTime,
}

#[must_use]
pub fn claims_page(page: &ClaimsPage<'_>) -> String {
    let header = page_header("user-shield", "Insurance Fraud Analyst Dashboard", "Review claims and their AI fraud analysis");
    let selector = claim_selector(page.claims, page.selected_id);

    let detail = match page.detail {
        ClaimDetail::NoSelection => {
            empty_state("magnifying-glass", "No claim selected", "Select a claim to view details")
        }
        ClaimDetail::NotFound(id) => {
            empty_state("circle-question", "Claim not found", &format!("No claim with id {id} exists."))
        }
        ClaimDetail::Failed(message) => alert(AlertKind::Error, "Error loading claim", message),
        ClaimDetail::Loaded(claim) => format!(
            r##"{stats}
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                {evidence}
                {analysis}
            </div>
            {details}"##,
            stats = claim_stats(claim, page.now),
            evidence = evidence_viewer(claim),
            analysis = analysis_panel(claim),
            details = details_card(claim),
        ),
    };

    layout("Fraud Analysis", &format!("{header}\n{selector}\n{detail}"))
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn claim_selector(claims: &[ClaimSummary], selected_id: Option<i64>) -> String {
    let items: String = claims
        .iter()
        .filter_map(|summary| {
            let id = summary.claim_id?;
            let ring = if selected_id == Some(id) { "ring-2 ring-indigo-500" } else { "" };
            let status = summary.status.as_deref();
            Some(format!(
                r##"<a href="/claims?claim_id={id}" class="flex items-center justify-between gap-3 px-4 py-2 rounded-lg hover:bg-gray-50 {ring}">
                    <span class="font-medium">Claim #{id}</span>
                    <span class="text-gray-500">{name}</span>
                    <span class="ml-auto">{badge}</span>
                </a>"##,
                name = escape_html(present(summary.customer_name.as_ref()).unwrap_or("Unknown")),
                badge = badge(or_na(status), badge_variant(status).class()),
            ))
        })
        .collect();

    let list = if items.is_empty() {
        r#"<p class="text-sm text-gray-500">No claims available</p>"#.to_string()
    } else {
        format!(r#"<div class="max-h-80 overflow-y-auto space-y-1">{items}</div>"#)
    };
    card(&icon_title("list", "Select Claim"), &list)
}

fn claim_stats(claim: &Claim, now: OffsetDateTime) -> String {
    let status = claim.status.as_deref();
    format!(
        r##"<div class="grid grid-cols-1 md:grid-cols-4 gap-4">
            {status}
            {score}
            {delta}
            {days}
        </div>"##,
        status = stat_card(
            "Status",
            &badge(present(claim.status.as_ref()).unwrap_or("Unknown"), status_tone(status).class()),
            "shield-halved",
            "Current claim status",
        ),
        score = stat_card(
            "AI Fraud Score",
            &escape_html(or_na(claim.evidence_ai_score.as_deref())),
            "arrow-trend-up",
            "Risk assessment",
        ),
        delta = stat_card(
            "Financial Delta",
            &escape_html(&format_financial_delta(claim.estimated_damage, claim.approved_amount)),
            "dollar-sign",
            "Estimated vs Approved",
        ),
        days = stat_card(
            "Days Since Report",
            &escape_html(&format_days_since(claim.date_reported.as_deref(), now)),
            "clock",
            "Time elapsed",
        ),
    )
}

fn evidence_viewer(claim: &Claim) -> String {
    let url = present(claim.evidence_url.as_ref());
    let image = match url {
        Some(url) => format!(
            r##"<img src="{src}" alt="Claim evidence" class="w-full h-full object-contain"
                     onerror="this.style.display='none'; this.nextElementSibling.classList.remove('hidden');">
                <div class="hidden flex-col items-center gap-2 text-gray-500">
                    <i class="fas fa-triangle-exclamation text-4xl"></i>
                    <p class="text-sm">Failed to load image</p>
                </div>"##,
            src = escape_html(url),
        ),
        None => r##"<div class="flex flex-col items-center gap-3 text-gray-500">
                    <i class="fas fa-file-circle-question text-5xl"></i>
                    <p class="text-sm font-medium">No evidence image available</p>
                </div>"##
            .to_string(),
    };

    let description = match (present(claim.evidence_description.as_ref()), url) {
        (Some(text), _) => text_block("file-lines", "Evidence Description", text),
        (None, Some(_)) => r#"<p class="text-sm text-gray-500 text-center">No description provided</p>"#.to_string(),
        (None, None) => String::new(),
    };

    card(
        &icon_title("image", "Evidence"),
        &format!(
            r##"<div class="aspect-video bg-gray-100 rounded-lg overflow-hidden border border-gray-200 flex items-center justify-center">
                {image}
            </div>
            {description}"##
        ),
    )
}

fn analysis_panel(claim: &Claim) -> String {
    let risk = assess_risk(claim.evidence_ai_score.as_deref());
    let score = format!(
        r##"<div class="space-y-3">
            <div class="flex items-center justify-between">
                <span class="text-sm font-medium text-gray-900"><i class="fas fa-shield-halved text-indigo-600"></i> Fraud Detection Score</span>
                {risk_badge}
            </div>
            <div class="flex items-center justify-between text-sm">
                <span class="text-gray-500">Risk Level</span>
                <span class="font-bold text-gray-900">{raw}</span>
            </div>
            {bar}
        </div>"##,
        risk_badge = badge(risk.label, risk.tone.class()),
        raw = escape_html(or_na(claim.evidence_ai_score.as_deref())),
        bar = progress(risk.percent),
    );

    let mut sections = vec![score];
    if let Some(text) = present(claim.evidence_classification.as_ref()) {
        sections.push(text_block("file-lines", "Evidence Classification", text));
    }
    if let Some(text) = present(claim.claim_prediction.as_ref()) {
        sections.push(format!(
            r##"<details class="p-4 bg-gray-50 rounded-lg border border-gray-200">
                <summary class="cursor-pointer text-sm font-medium text-gray-900"><i class="fas fa-brain text-indigo-600"></i> AI Prediction Summary</summary>
                <p class="text-sm text-gray-500 whitespace-pre-wrap pt-2">{}</p>
            </details>"##,
            escape_html(text)
        ));
    }
    if let Some(text) = present(claim.transcript.as_ref()) {
        sections.push(text_block("message", "Call Transcript", text));
    }
    if let Some(text) = present(claim.agent_notes.as_ref()) {
        sections.push(text_block("file-lines", "Agent Notes", text));
    }

    card(&icon_title("brain", "AI Fraud Analysis"), &sections.join("\n"))
}

fn details_card(claim: &Claim) -> String {
    let section = |title: &str, fields: &[String]| {
        format!(
            r##"<div>
                <h3 class="text-sm font-semibold text-gray-500 mb-3 uppercase tracking-wide">{}</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">{}</div>
            </div>"##,
            escape_html(title),
            fields.join("\n")
        )
    };

    let incident = section(
        "Incident Information",
        &[
            field("file-lines", "Type", or_na(claim.incident_type.as_deref())),
            field("calendar", "Incident Date", &format_date(claim.incident_date.as_deref())),
            field("location-dot", "Location", or_na(claim.location.as_deref())),
            field("calendar", "Date Reported", &format_date(claim.date_reported.as_deref())),
        ],
    );
    let description = present(claim.description.as_ref())
        .map(|text| text_block("align-left", "Description", text))
        .unwrap_or_default();
    let financial = section(
        "Financial Details",
        &[
            field("dollar-sign", "Estimated Damage", &format_currency(claim.estimated_damage)),
            field("dollar-sign", "Approved Amount", &format_currency(claim.approved_amount)),
        ],
    );
    let policy = section(
        "Policy Information",
        &[
            field("user", "Customer Name", or_na(claim.customer_name.as_deref())),
            field("credit-card", "Policy ID", or_na(claim.policy_id.as_deref())),
        ],
    );

    card("Claim Details", &format!("{incident}\n{description}\n{financial}\n{policy}"))
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
