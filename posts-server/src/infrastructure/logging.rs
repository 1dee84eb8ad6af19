use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub(crate) fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown LOG_FORMAT '{other}', expected compact or json")),
        }
    }
}

/// `RUST_LOG` wins over `default_level` when both are set.
pub(crate) fn init_logging(default_level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::LogFormat;

    #[test]
    fn log_format_parses_known_values() {
        assert_eq!(LogFormat::parse("json").expect("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" Compact ").expect("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("text").expect("text"), LogFormat::Compact);
    }

    #[test]
    fn log_format_rejects_unknown_value() {
        assert!(LogFormat::parse("xml").is_err());
    }
}
