//! Store configuration parsed from environment variables.

use super::types::StoreError;

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_EXCLUDED_TABLES: &str = "schema_migrations";
pub const DEFAULT_CLAIMS_TABLE: &str = "claims_table";
pub const DEFAULT_PAGE_LIMIT: usize = 100;
pub const DEFAULT_STORE_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STORE_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Project URL without the `/rest/v1` suffix.
    pub url: String,
    pub api_key: String,
    pub schema: String,
    pub excluded_tables: Vec<String>,
    pub claims_table: String,
    pub page_limit: usize,
    pub timeouts: StoreTimeouts,
}

impl StoreConfig {
    /// Build typed store config from environment variables.
    ///
    /// Required:
    /// - `STORE_URL`
    /// - `STORE_API_KEY_ENV` (names the env var containing the key)
    ///
    /// Optional:
    /// - `STORE_SCHEMA`: default `public`
    /// - `STORE_EXCLUDED_TABLES`: comma separated, default `schema_migrations`
    /// - `STORE_CLAIMS_TABLE`: default `claims_table`
    /// - `STORE_PAGE_LIMIT`: default 100
    /// - `STORE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STORE_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, StoreError> {
        let url = std::env::var("STORE_URL")
            .map_err(|_| StoreError::ConfigParse("STORE_URL not set".into()))
            .and_then(|raw| parse_url(&raw))?;

        let key_var = std::env::var("STORE_API_KEY_ENV")
            .map_err(|_| StoreError::MissingApiKey { var: "STORE_API_KEY_ENV".into() })?;
        let api_key = std::env::var(&key_var).map_err(|_| StoreError::MissingApiKey { var: key_var.clone() })?;

        let schema = std::env::var("STORE_SCHEMA").unwrap_or_else(|_| DEFAULT_SCHEMA.to_string());
        let excluded_tables = parse_list(
            &std::env::var("STORE_EXCLUDED_TABLES").unwrap_or_else(|_| DEFAULT_EXCLUDED_TABLES.to_string()),
        );
        let claims_table = std::env::var("STORE_CLAIMS_TABLE").unwrap_or_else(|_| DEFAULT_CLAIMS_TABLE.to_string());
        let page_limit = parse_page_limit(std::env::var("STORE_PAGE_LIMIT").ok().as_deref())?;
        let timeouts = StoreTimeouts {
            request_secs: env_parse_u64("STORE_REQUEST_TIMEOUT_SECS", DEFAULT_STORE_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("STORE_CONNECT_TIMEOUT_SECS", DEFAULT_STORE_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { url, api_key, schema, excluded_tables, claims_table, page_limit, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_url(raw: &str) -> Result<String, StoreError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(StoreError::ConfigParse(format!("STORE_URL must be an http(s) URL, got '{raw}'")));
    }
    Ok(trimmed.trim_end_matches("/rest/v1").to_string())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_page_limit(raw: Option<&str>) -> Result<usize, StoreError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE_LIMIT);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(StoreError::ConfigParse(format!("invalid STORE_PAGE_LIMIT: {raw}"))),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
