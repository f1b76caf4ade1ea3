//! Endpoint and timeout resolution.
//!
//! Precedence for the endpoint:
//! 1. `--endpoint`
//! 2. `ETCD_ENDPOINT`
//! 3. `http://{ETCD_HOST}:{ETCD_PORT}`, defaulting to `localhost` and `4001`

use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "4001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolve from flags and the process environment.
    pub fn resolve(endpoint: Option<String>, timeout_secs: Option<u64>) -> Self {
        Self::resolve_with(endpoint, timeout_secs, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with(
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());

        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .or_else(|| non_empty("ETCD_ENDPOINT"))
            .unwrap_or_else(|| {
                let host = non_empty("ETCD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = non_empty("ETCD_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
                format!("http://{}:{}", host, port)
            });

        Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
