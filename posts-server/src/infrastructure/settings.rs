use anyhow::{Context, Result, anyhow};

use super::logging::LogFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) store: StoreBackend,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) log_format: LogFormat,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match get("POST_STORE")
            .unwrap_or_else(|| "postgres".to_string())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres {
                database_url: get_required(&get, "DATABASE_URL")
                    .context("DATABASE_URL is required when POST_STORE=postgres")?,
                max_connections: parse_positive(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(anyhow!(
                    "unknown POST_STORE '{other}', expected postgres or memory"
                ));
            }
        };

        let http_addr = get("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            get("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".to_string()),
        );
        let log_level = get("LOG_LEVEL")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let log_format = LogFormat::parse(&get("LOG_FORMAT").unwrap_or_else(|| "compact".into()))?;
        let http_request_body_limit_bytes =
            parse_positive(&get, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_positive(&get, "HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_positive(&get, "HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            store,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = get(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default + ToString,
{
    let value = get(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
