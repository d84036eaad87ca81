use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// What happens to a value stored under a sensitive key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionMode {
    /// Replace the value with the mask placeholder string.
    Mask,
    /// Replace the value with `null`.
    Nullify,
    /// Drop the key from the enclosing object.
    Remove,
}

impl RedactionMode {
    /// Maps the legacy `mask` / `remove` switches onto a single mode.
    ///
    /// Masking takes priority over removal, and with both switches off the
    /// value is nulled.
    pub const fn from_flags(mask: bool, remove: bool) -> Self {
        match (mask, remove) {
            (true, _) => RedactionMode::Mask,
            (false, true) => RedactionMode::Remove,
            (false, false) => RedactionMode::Nullify,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionMode::Mask => "mask",
            RedactionMode::Nullify => "nullify",
            RedactionMode::Remove => "remove",
        }
    }
}

impl Default for RedactionMode {
    fn default() -> Self {
        RedactionMode::from_flags(true, false)
    }
}

impl fmt::Display for RedactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedactionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mask" => Ok(RedactionMode::Mask),
            "nullify" | "null" => Ok(RedactionMode::Nullify),
            "remove" => Ok(RedactionMode::Remove),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// How numbers on non-redacted paths are carried through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberHandling {
    /// Keep the parsed number exactly, integer or float.
    #[default]
    Preserve,
    /// Re-encode every number as an IEEE-754 double. Whole values within
    /// 2^53 are written without a fraction; integers beyond 2^53 lose
    /// precision.
    Float64,
}

impl FromStr for NumberHandling {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(NumberHandling::Preserve),
            "float64" | "double" => Ok(NumberHandling::Float64),
            _ => Err(ConfigError::UnknownNumberHandling(s.to_string())),
        }
    }
}
