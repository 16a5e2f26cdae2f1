use std::time::Duration;

use crate::error::ConfigError;

/// Default AFFiNE deployment used when `AFFINE_BASE_URL` is unset.
const DEFAULT_BASE_URL: &str = "https://app.affine.pro";

/// Default transport timeout for upstream calls (30 seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server configuration loaded from environment variables.
///
/// Captured once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    pub api_token: String,
    pub default_workspace_id: Option<String>,
    pub request_timeout: Duration,
    pub skip_startup_check: bool,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `AFFINE_API_TOKEN` (required): bearer credential for the GraphQL API
    /// - `AFFINE_BASE_URL` (optional, default `https://app.affine.pro`)
    /// - `AFFINE_WORKSPACE_ID` (optional): workspace used when a tool omits `workspaceId`
    /// - `AFFINE_REQUEST_TIMEOUT_SECS` (optional, default 30): transport timeout per call
    /// - `AFFINE_SKIP_STARTUP_CHECK` (optional): skip the startup connectivity probe
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_token = non_blank("AFFINE_API_TOKEN").ok_or(ConfigError::MissingVar {
            name: "AFFINE_API_TOKEN",
        })?;

        let base_url = non_blank("AFFINE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs = match non_blank("AFFINE_REQUEST_TIMEOUT_SECS") {
            Some(val) => val
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidVar {
                    name: "AFFINE_REQUEST_TIMEOUT_SECS",
                    reason: "must be a positive integer",
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let skip_startup_check = match non_blank("AFFINE_SKIP_STARTUP_CHECK") {
            Some(val) => parse_flag(&val).ok_or(ConfigError::InvalidVar {
                name: "AFFINE_SKIP_STARTUP_CHECK",
                reason: "must be a boolean (1/0, true/false, yes/no)",
            })?,
            None => false,
        };

        Ok(Self {
            base_url,
            api_token,
            default_workspace_id: non_blank("AFFINE_WORKSPACE_ID"),
            request_timeout: Duration::from_secs(request_timeout_secs),
            skip_startup_check,
        })
    }

    /// The GraphQL endpoint derived from the base address.
    pub fn graphql_endpoint(&self) -> String {
        format!("{}/graphql", self.base_url)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
