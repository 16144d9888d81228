use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparsable values fall back to the default with a warning instead of
    /// refusing to boot.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("TIMECLOCK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(lookup("TIMECLOCK_PORT"), "TIMECLOCK_PORT", DEFAULT_PORT);
        let store_timeout_ms = parse_or_default(
            lookup("TIMECLOCK_STORE_TIMEOUT_MS"),
            "TIMECLOCK_STORE_TIMEOUT_MS",
            DEFAULT_STORE_TIMEOUT_MS,
        );
        Self {
            host,
            port,
            store_timeout_ms,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(
    value: Option<String>,
    key: &str,
    default: T,
) -> T {
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, %raw, "unparsable config value, using default");
            default
        }),
    }
}
