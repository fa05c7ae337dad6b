//! Environment-driven configuration for the planner and the HTTP server.
//!
//! Unset or unparsable values fall back to [`Default`]. The API key is the only
//! setting without a default; its absence is reported when a plan is requested,
//! not at startup.

use std::time::Duration;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const SERVICE_NAME: &str = "wandr.ai";

/// Settings for the two-call orchestration.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub intent_max_tokens: u32,
    pub plan_max_tokens: u32,
    pub intent_timeout: Duration,
    pub plan_timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            intent_max_tokens: 400,
            plan_max_tokens: 4000,
            intent_timeout: Duration::from_secs(30),
            plan_timeout: Duration::from_secs(60),
        }
    }
}

impl PlannerConfig {
    /// Reads the planner settings from the process environment.
    ///
    /// - `ANTHROPIC_API_KEY` (required to plan)
    /// - `ANTHROPIC_BASE_URL` (default `https://api.anthropic.com`)
    /// - `WANDR_MODEL` (default `claude-sonnet-4-20250514`)
    /// - `WANDR_INTENT_TIMEOUT_SECS` (default 30)
    /// - `WANDR_PLAN_TIMEOUT_SECS` (default 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let seconds = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(fallback)
        };

        Self {
            api_key: lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()),
            base_url: lookup("ANTHROPIC_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(default.base_url),
            model: lookup("WANDR_MODEL")
                .filter(|model| !model.trim().is_empty())
                .unwrap_or(default.model),
            intent_max_tokens: default.intent_max_tokens,
            plan_max_tokens: default.plan_max_tokens,
            intent_timeout: seconds("WANDR_INTENT_TIMEOUT_SECS", default.intent_timeout),
            plan_timeout: seconds("WANDR_PLAN_TIMEOUT_SECS", default.plan_timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The credential, or a configuration error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| PlannerError::Config(format!("{API_KEY_ENV} environment variable not set")))
    }
}

/// Bind address for `wandr serve`.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST` and `PORT`.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            host: std::env::var("HOST").ok().unwrap_or(default.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
