//! Display formatting for claim and table fields.
//!
//! Every function here is pure and total: missing, null, or malformed input
//! maps to a fixed placeholder instead of an error.

use serde::Serialize;
use serde_json::Value;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_DATE: &str = "Invalid Date";
pub const NULL_CELL: &str = "NULL";
pub const ZERO_CURRENCY: &str = "$0.00";

const LOW_RISK_MAX: f64 = 0.3;
const MEDIUM_RISK_MAX: f64 = 0.7;
const MS_PER_DAY: i128 = 86_400_000;

// =============================================================================
// TONES
// =============================================================================

/// Color classification shared by status badges and risk badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Warning,
    Negative,
    Neutral,
}

impl Tone {
    /// CSS classes for a badge or tile in this tone.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Positive => "bg-success text-success-foreground",
            Self::Warning => "bg-warning text-warning-foreground",
            Self::Negative => "bg-destructive text-destructive-foreground",
            Self::Neutral => "bg-muted text-muted-foreground",
        }
    }
}

/// Badge variant used by the claim selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Default,
    Outline,
}

impl BadgeVariant {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Destructive => "bg-destructive text-destructive-foreground",
            Self::Secondary => "bg-secondary text-secondary-foreground",
            Self::Default => "bg-primary text-primary-foreground",
            Self::Outline => "border border-border text-foreground",
        }
    }
}

/// Classify a free-text claim status by keyword, ignoring case.
#[must_use]
pub fn status_tone(status: Option<&str>) -> Tone {
    let lower = status.unwrap_or_default().to_lowercase();
    if lower.contains("approved") || lower.contains("paid") {
        Tone::Positive
    } else if lower.contains("pending") || lower.contains("review") {
        Tone::Warning
    } else if lower.contains("denied") || lower.contains("flagged") {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Selector badge for a claim's fraud verdict status.
#[must_use]
pub fn badge_variant(status: Option<&str>) -> BadgeVariant {
    let lower = status.unwrap_or_default().to_lowercase();
    if lower.contains("fraudulent") {
        BadgeVariant::Destructive
    } else if lower.contains("uncertain") {
        BadgeVariant::Secondary
    } else if lower.contains("valid") {
        BadgeVariant::Default
    } else {
        BadgeVariant::Outline
    }
}

// =============================================================================
// RISK SCORE
// =============================================================================

/// Interpretation of an AI fraud score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Parsed score, `None` when the input is not numeric.
    pub score: Option<f64>,
    /// Score as a percentage, clamped to `[0, 100]` for progress bars.
    pub percent: f64,
    pub label: &'static str,
    pub tone: Tone,
}

/// Assess a textual risk score (`"0.82"`, `"0.4 (v2)"`, `""`).
#[must_use]
pub fn assess_risk(raw: Option<&str>) -> RiskAssessment {
    let Some(score) = raw.and_then(parse_float_prefix) else {
        return RiskAssessment { score: None, percent: 0.0, label: "Unknown", tone: Tone::Neutral };
    };
    let (label, tone) = if score <= LOW_RISK_MAX {
        ("Low Risk", Tone::Positive)
    } else if score <= MEDIUM_RISK_MAX {
        ("Medium Risk", Tone::Warning)
    } else {
        ("High Risk", Tone::Negative)
    };
    RiskAssessment { score: Some(score), percent: (score * 100.0).clamp(0.0, 100.0), label, tone }
}

/// Parse the longest leading decimal number in `raw`, skipping leading
/// whitespace. Trailing text is ignored.
#[must_use]
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (end + 1);
        if digits > 0 {
            end = j;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// NUMBERS
// =============================================================================

/// Format an amount as US dollars (`$1,234.50`). Missing, zero, and
/// non-finite amounts render as `$0.00`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|v| v.is_finite() && *v != 0.0) else {
        return ZERO_CURRENCY.to_string();
    };
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Format a number with thousands separators and at most three fraction
/// digits (`1,234.5`).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let scaled = (value.abs() * 1000.0).round() as u64;
    let whole = group_thousands(scaled / 1000);
    let frac = format!("{:03}", scaled % 1000);
    let frac = frac.trim_end_matches('0');
    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };
    if frac.is_empty() { format!("{sign}{whole}") } else { format!("{sign}{whole}.{frac}") }
}

/// Insert `,` every three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Absolute gap between the estimated damage and the approved amount.
#[must_use]
pub fn financial_delta(estimated: Option<f64>, approved: Option<f64>) -> f64 {
    let estimated = estimated.filter(|v| v.is_finite()).unwrap_or(0.0);
    let approved = approved.filter(|v| v.is_finite()).unwrap_or(0.0);
    (estimated - approved).abs()
}

/// Dollar-prefixed [`financial_delta`] (`$1,234.5`).
#[must_use]
pub fn format_financial_delta(estimated: Option<f64>, approved: Option<f64>) -> String {
    format!("${}", format_number(financial_delta(estimated, approved)))
}

// =============================================================================
// DATES
// =============================================================================

/// Parse the calendar date at the start of `raw`.
///
/// Accepts `YYYY-MM-DD` on its own or followed by a `T` or space time part
/// (RFC 3339 timestamps, Postgres `timestamp` text).
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let head = raw.get(..10)?;
    match raw.as_bytes().get(10) {
        None | Some(b'T' | b't' | b' ') => {}
        Some(_) => return None,
    }
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

/// Long-form date (`March 15, 2024`). Missing input renders `N/A`; input
/// that is not a date renders `Invalid Date`.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    match parse_date(raw) {
        Some(date) => format!("{} {}, {}", date.month(), date.day(), date.year()),
        None => INVALID_DATE.to_string(),
    }
}

/// Whole days between the reported date and `now`, rounded up.
#[must_use]
pub fn days_since(raw: Option<&str>, now: OffsetDateTime) -> Option<i64> {
    let date = parse_date(raw?)?;
    let elapsed = (now - date.midnight().assume_utc()).abs();
    let ms = elapsed.whole_milliseconds();
    i64::try_from((ms + MS_PER_DAY - 1) / MS_PER_DAY).ok()
}

/// [`days_since`] as display text, `N/A` when unknown.
#[must_use]
pub fn format_days_since(raw: Option<&str>, now: OffsetDateTime) -> String {
    days_since(raw, now).map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.to_string())
}

// =============================================================================
// TABLE CELLS
// =============================================================================

/// Display text for one table cell of an untyped record.
#[must_use]
pub fn cell_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_CELL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Text, or `N/A` when missing or blank.
#[must_use]
pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
