//! Payload Redactor engine.
//!
//! Walks an already-parsed JSON tree and rewrites the values stored under
//! sensitive object keys. Matching is by exact, case-sensitive key name; the
//! content of a value is never inspected. A matched value is masked, nulled or
//! dropped wholesale according to the configured [`RedactionMode`], and
//! everything else is carried through unchanged.
//!
//! The engine performs no I/O and keeps no state between calls, so a single
//! [`RedactionEngine`] can be shared across any number of threads.
//!
//! # Example
//! ```
//! use payload_redactor_engine::{redact, KeywordSet, RedactionMode};
//! use serde_json::json;
//!
//! let keywords = KeywordSet::new(["password"]);
//! let redacted = redact(
//!     json!({"user": "bob", "password": "hunter2"}),
//!     &keywords,
//!     RedactionMode::Mask,
//! );
//! assert_eq!(redacted, json!({"user": "bob", "password": "*****"}));
//! ```

mod engine;
mod error;
mod keywords;
mod mode;
mod policy;

pub use engine::{redact, RedactedPayload, Redacted, RedactionEngine};
pub use error::{ConfigError, RedactionError};
pub use keywords::{KeywordSet, DEFAULT_SENSITIVE_KEYWORDS};
pub use mode::{NumberHandling, RedactionMode};
pub use policy::RedactionPolicy;

/// Sentinel written in place of a matched value in [`RedactionMode::Mask`].
pub const DEFAULT_MASK_PLACEHOLDER: &str = "*****";

/// Default nesting limit used by callers that do not configure one.
pub const DEFAULT_MAX_DEPTH: usize = 64;
