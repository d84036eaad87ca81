use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::Method;
use payload_redactor_engine::{
    ConfigError, KeywordSet, NumberHandling, RedactionMode, RedactionPolicy,
    DEFAULT_MASK_PLACEHOLDER, DEFAULT_MAX_DEPTH, DEFAULT_SENSITIVE_KEYWORDS,
};
use serde::{Deserialize, Serialize};

/// What to do with a body selected for redaction that does not parse as JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseFailurePolicy {
    /// Forward the original bytes unmodified.
    #[default]
    FailOpen,
    /// Reject the request with 400.
    FailClosed,
}

impl FromStr for ParseFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(ParseFailurePolicy::FailOpen),
            "fail-closed" | "closed" => Ok(ParseFailurePolicy::FailClosed),
            _ => anyhow::bail!("Unsupported parse failure policy: {}", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen host address
    pub server_host: String,

    /// Listen port
    pub server_port: u16,

    /// How matched fields are redacted
    pub redaction_mode: RedactionMode,

    /// Exact, case-sensitive object keys to redact
    pub sensitive_keywords: Vec<String>,

    /// Replacement string used in mask mode
    pub mask_placeholder: String,

    /// Number representation on non-redacted paths
    pub number_handling: NumberHandling,

    /// Maximum request body size in bytes
    pub max_body_size_bytes: usize,

    /// Maximum JSON nesting accepted before the request is rejected
    pub max_json_depth: usize,

    /// Behavior for bodies that are not valid JSON
    pub parse_failure_policy: ParseFailurePolicy,

    /// HTTP methods whose bodies are redacted
    pub redact_methods: Vec<Method>,

    /// Handler timeout in seconds
    pub request_timeout_secs: u64,

    /// Log level
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            redaction_mode: RedactionMode::default(),
            sensitive_keywords: DEFAULT_SENSITIVE_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            mask_placeholder: DEFAULT_MASK_PLACEHOLDER.to_string(),
            number_handling: NumberHandling::default(),
            max_body_size_bytes: 1024 * 1024,
            max_json_depth: DEFAULT_MAX_DEPTH,
            parse_failure_policy: ParseFailurePolicy::default(),
            redact_methods: vec![Method::POST],
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which resolves a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(host) = lookup("GATEWAY_HOST") {
            if !host.trim().is_empty() {
                cfg.server_host = host;
            }
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            cfg.server_port = port.parse().context("GATEWAY_PORT must be a valid u16")?;
        }

        cfg.redaction_mode = match lookup("REDACTION_MODE") {
            Some(mode) => mode.parse().context("Invalid REDACTION_MODE")?,
            None => {
                let mask = match lookup("MASK_SENSITIVE_DATA") {
                    Some(flag) => parse_bool(&flag)
                        .with_context(|| format!("MASK_SENSITIVE_DATA is invalid: {flag}"))?,
                    None => true,
                };
                let remove = match lookup("REMOVE_SENSITIVE_FIELDS") {
                    Some(flag) => parse_bool(&flag)
                        .with_context(|| format!("REMOVE_SENSITIVE_FIELDS is invalid: {flag}"))?,
                    None => false,
                };
                RedactionMode::from_flags(mask, remove)
            }
        };

        if let Some(path) = lookup("SENSITIVE_KEYWORDS_FILE") {
            cfg.sensitive_keywords = load_keywords_file(PathBuf::from(path))?;
        } else if let Some(list) = lookup("SENSITIVE_KEYWORDS") {
            cfg.sensitive_keywords = parse_list(&list);
        }

        if let Some(placeholder) = lookup("MASK_PLACEHOLDER") {
            cfg.mask_placeholder = placeholder;
        }
        if let Some(handling) = lookup("NUMBER_HANDLING") {
            cfg.number_handling = handling.parse().context("Invalid NUMBER_HANDLING")?;
        }
        if let Some(size) = lookup("MAX_BODY_SIZE_BYTES") {
            cfg.max_body_size_bytes = size
                .parse()
                .context("MAX_BODY_SIZE_BYTES must be a positive integer")?;
        }
        if let Some(depth) = lookup("MAX_JSON_DEPTH") {
            cfg.max_json_depth = depth
                .parse()
                .context("MAX_JSON_DEPTH must be a positive integer")?;
        }
        if let Some(policy) = lookup("PARSE_FAILURE_POLICY") {
            cfg.parse_failure_policy = policy.parse()?;
        }
        if let Some(methods) = lookup("REDACT_METHODS") {
            cfg.redact_methods = parse_list(&methods)
                .iter()
                .map(|method| {
                    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                        .with_context(|| format!("REDACT_METHODS contains invalid method {method}"))
                })
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout_secs = timeout
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a positive integer")?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            cfg.log_level = level;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server_host.trim().is_empty() {
            anyhow::bail!("GATEWAY_HOST cannot be empty");
        }
        if self.sensitive_keywords.is_empty() {
            anyhow::bail!("At least one sensitive keyword must be configured");
        }
        if self.max_body_size_bytes == 0 {
            anyhow::bail!("MAX_BODY_SIZE_BYTES must be greater than 0");
        }
        if self.redact_methods.is_empty() {
            anyhow::bail!("REDACT_METHODS must name at least one HTTP method");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        self.redaction_policy()
            .context("Invalid redaction configuration")?;

        Ok(())
    }

    /// Build the engine policy described by this configuration
    pub fn redaction_policy(&self) -> Result<RedactionPolicy, ConfigError> {
        let keywords = KeywordSet::try_new(self.sensitive_keywords.iter().cloned())?;
        let policy = RedactionPolicy::new(keywords, self.redaction_mode)
            .with_mask_placeholder(self.mask_placeholder.clone())
            .with_max_depth(self.max_json_depth)
            .with_number_handling(self.number_handling);
        policy.validate()?;
        Ok(policy)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn load_keywords_file(path: PathBuf) -> Result<Vec<String>> {
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("unable to read keywords file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "keywords file {} must contain a JSON array of strings",
            path.display()
        )
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => anyhow::bail!("invalid boolean value {value}"),
    }
}
