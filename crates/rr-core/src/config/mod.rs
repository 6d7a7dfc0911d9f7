//! # Pure Data Module - Data Transfer Objects Only
//!
//! Configuration data structures and the TOML -> DTO mapping.
//!
//! This module contains data only: no validation and no default value
//! calculation. Missing keys become empty or zero values, which are facts,
//! not errors. Resolving zeros to defaults happens in the consuming domain
//! (see [`crate::objective::ObjectiveTimings::from_config`]).

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Rewards API base URL, e.g. `http://localhost:3000/api`
    pub api_base_url: String,

    /// Per-request timeout handed to the HTTP client (0 = client default)
    pub request_timeout_secs: u64,

    pub reveal_interval_ms: u64,
    pub celebration_delay_ms: u64,
    pub celebration_duration_ms: u64,
    pub completion_dwell_ms: u64,
    pub max_visible: u64,

    /// Directory for rolling log files (empty = stdout only)
    pub log_directory: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let int = |section: &str, key: &str| {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64
        };
        Ok(Self {
            api_base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: int("api", "request_timeout_secs"),
            reveal_interval_ms: int("objectives", "reveal_interval_ms"),
            celebration_delay_ms: int("objectives", "celebration_delay_ms"),
            celebration_duration_ms: int("objectives", "celebration_duration_ms"),
            completion_dwell_ms: int("objectives", "completion_dwell_ms"),
            max_visible: int("objectives", "max_visible"),
            log_directory: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            reveal_interval_ms: 0,
            celebration_delay_ms: 0,
            celebration_duration_ms: 0,
            completion_dwell_ms: 0,
            max_visible: 0,
            log_directory: PathBuf::new(),
        }
    }

    /// Create AppConfig for local development against the default API,
    /// logging under `data_dir`.
    ///
    /// The base directory should be computed by the caller (e.g. with the
    /// `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            request_timeout_secs: 15,
            log_directory: data_dir.join("logs"),
            ..Self::empty()
        }
    }
}
