//! PostgREST wire format: query parameters, count headers, response bodies.
//!
//! Pure helpers used by [`super::StoreClient`]. Nothing here performs I/O.

use serde_json::Value;

use super::types::{Direction, Filter, Record, SelectQuery, StoreError};

/// Header carrying the schema a read should target.
pub const ACCEPT_PROFILE: &str = "Accept-Profile";
/// Schema exposing table metadata.
pub const METADATA_SCHEMA: &str = "information_schema";
/// Metadata view listing tables.
pub const METADATA_TABLES: &str = "tables";

/// Translate a [`SelectQuery`] into PostgREST query-string pairs.
#[must_use]
pub fn query_pairs(query: &SelectQuery) -> Vec<(String, String)> {
    let select = if query.columns.is_empty() {
        "*".to_string()
    } else {
        query
            .columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(",")
    };

    let mut pairs = vec![("select".to_string(), select)];
    for filter in &query.filters {
        match filter {
            Filter::Eq { column, value } => pairs.push((column.clone(), format!("eq.{value}"))),
            Filter::NotIn { column, values } => {
                let list = values.iter().map(|v| quote_value(v)).collect::<Vec<_>>().join(",");
                pairs.push((column.clone(), format!("not.in.({list})")));
            }
        }
    }
    if let Some((column, direction)) = &query.order {
        let dir = match direction {
            Direction::Asc => "asc",
        };
        pairs.push(("order".to_string(), format!("{}.{dir}", quote_ident(column))));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    pairs
}

/// Query used to list the tables of `schema`.
#[must_use]
pub fn list_tables_query(schema: &str, excluded: &[String]) -> SelectQuery {
    SelectQuery::columns(&["table_name"])
        .in_schema(METADATA_SCHEMA)
        .eq("table_schema", schema)
        .not_in("table_name", excluded)
}

/// `Prefer` header value for a query, if any.
#[must_use]
pub fn prefer_header(query: &SelectQuery) -> Option<&'static str> {
    query.exact_count.then_some("count=exact")
}

/// Parse the total out of a `Content-Range` header (`0-99/1234`, `*/0`).
///
/// Returns `None` when the total is unknown (`0-99/*`) or the header is
/// malformed.
#[must_use]
pub fn parse_content_range(raw: &str) -> Option<u64> {
    let (_, total) = raw.trim().rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Decode a response body into records. The body must be a JSON array of
/// objects.
pub fn decode_rows(body: &str) -> Result<Vec<Record>, StoreError> {
    let value: Value = serde_json::from_str(body).map_err(|e| StoreError::ApiParse(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(StoreError::ApiParse("expected a JSON array of rows".into()));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::ApiParse(format!("row {i} is not an object: {other}"))),
        })
        .collect()
}

/// Pull `table_name` values out of metadata rows, skipping rows without one.
#[must_use]
pub fn table_names(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get("table_name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Quote a column name when it is not a bare identifier (`"Customer Name"`).
fn quote_ident(name: &str) -> String {
    if name == "*" || is_bare(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\\\""))
    }
}

/// Quote a list value when it contains PostgREST reserved characters.
fn quote_value(value: &str) -> String {
    if value.chars().any(|c| matches!(c, ',' | '(' | ')' | '"' | ' ' | '.' | ':')) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

fn is_bare(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "postgrest_test.rs"]
mod tests;
