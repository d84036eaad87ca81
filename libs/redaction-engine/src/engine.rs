use std::convert::Infallible;

use serde_json::{Map, Number, Value};

use crate::{
    ConfigError, KeywordSet, NumberHandling, RedactionError, RedactionMode, RedactionPolicy,
    DEFAULT_MASK_PLACEHOLDER,
};

// serde_json refuses to nest deeper than this while parsing.
const PARSER_RECURSION_LIMIT: usize = 128;
const RECURSION_LIMIT_MESSAGE: &str = "recursion limit exceeded";
/// Doubles represent every integer up to 2^53 exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Redacts `value` with the default mask placeholder and no depth limit.
///
/// Objects and arrays are rebuilt; a value stored under a key from `keywords`
/// is replaced according to `mode` without being walked. All other values,
/// numbers included, come back unchanged.
pub fn redact(value: Value, keywords: &KeywordSet, mode: RedactionMode) -> Value {
    let mut walker = Walker {
        keywords,
        mode,
        placeholder: DEFAULT_MASK_PLACEHOLDER,
        numbers: NumberHandling::Preserve,
        guard: Unbounded,
        redacted: 0,
    };
    walker.walk(value, 0).unwrap_or_else(|never| match never {})
}

/// Result of a bounded walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Redacted {
    pub value: Value,
    /// Number of object keys that matched a sensitive keyword.
    pub fields_redacted: usize,
}

/// Result of [`RedactionEngine::redact_slice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedPayload {
    pub bytes: Vec<u8>,
    pub fields_redacted: usize,
}

/// Applies a fixed [`RedactionPolicy`] to JSON trees.
#[derive(Debug, Clone)]
pub struct RedactionEngine {
    policy: RedactionPolicy,
}

impl RedactionEngine {
    pub fn new(policy: RedactionPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// Redacts `value` ignoring the policy's depth limit.
    pub fn redact(&self, value: Value) -> Value {
        self.walker(Unbounded)
            .run(value)
            .unwrap_or_else(|never| match never {})
            .value
    }

    /// Redacts `value`, rejecting trees nested deeper than the policy allows.
    pub fn try_redact(&self, value: Value) -> Result<Redacted, RedactionError> {
        match self.policy.max_depth() {
            Some(limit) => self.walker(Bounded { limit }).run(value),
            None => Ok(self
                .walker(Unbounded)
                .run(value)
                .unwrap_or_else(|never| match never {})),
        }
    }

    /// Parses `payload`, redacts it with [`RedactionEngine::try_redact`] and
    /// serializes the result.
    ///
    /// Payloads nested beyond the parser's own recursion limit are reported as
    /// [`RedactionError::DepthExceeded`], not as parse failures.
    pub fn redact_slice(&self, payload: &[u8]) -> Result<RedactedPayload, RedactionError> {
        let value: Value = serde_json::from_slice(payload).map_err(|err| {
            if err.to_string().starts_with(RECURSION_LIMIT_MESSAGE) {
                let limit = self
                    .policy
                    .max_depth()
                    .map_or(PARSER_RECURSION_LIMIT, |depth| {
                        depth.min(PARSER_RECURSION_LIMIT)
                    });
                RedactionError::DepthExceeded { limit }
            } else {
                RedactionError::from(err)
            }
        })?;
        let redacted = self.try_redact(value)?;
        let bytes = serde_json::to_vec(&redacted.value)
            .map_err(|err| RedactionError::Serialize(err.to_string()))?;

        Ok(RedactedPayload {
            bytes,
            fields_redacted: redacted.fields_redacted,
        })
    }

    fn walker<G: DepthGuard>(&self, guard: G) -> Walker<'_, G> {
        Walker {
            keywords: self.policy.keywords(),
            mode: self.policy.mode(),
            placeholder: self.policy.mask_placeholder(),
            numbers: self.policy.number_handling(),
            guard,
            redacted: 0,
        }
    }
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self {
            policy: RedactionPolicy::default(),
        }
    }
}

trait DepthGuard {
    type Error;

    /// Called before descending into a container at `depth` (root is 0).
    fn enter(&self, depth: usize) -> Result<(), Self::Error>;
}

struct Unbounded;

impl DepthGuard for Unbounded {
    type Error = Infallible;

    fn enter(&self, _depth: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

struct Bounded {
    limit: usize,
}

impl DepthGuard for Bounded {
    type Error = RedactionError;

    fn enter(&self, depth: usize) -> Result<(), RedactionError> {
        if depth >= self.limit {
            return Err(RedactionError::DepthExceeded { limit: self.limit });
        }
        Ok(())
    }
}

struct Walker<'a, G> {
    keywords: &'a KeywordSet,
    mode: RedactionMode,
    placeholder: &'a str,
    numbers: NumberHandling,
    guard: G,
    redacted: usize,
}

impl<G: DepthGuard> Walker<'_, G> {
    fn run(mut self, value: Value) -> Result<Redacted, G::Error> {
        let value = self.walk(value, 0)?;
        Ok(Redacted {
            value,
            fields_redacted: self.redacted,
        })
    }

    fn walk(&mut self, value: Value, depth: usize) -> Result<Value, G::Error> {
        match value {
            Value::Object(map) => {
                self.guard.enter(depth)?;
                let mut redacted = Map::with_capacity(map.len());

                for (key, nested_value) in map {
                    if self.keywords.contains(&key) {
                        self.redacted += 1;
                        match self.mode {
                            RedactionMode::Mask => {
                                redacted.insert(key, Value::String(self.placeholder.to_string()));
                            }
                            RedactionMode::Nullify => {
                                redacted.insert(key, Value::Null);
                            }
                            RedactionMode::Remove => {}
                        }
                    } else {
                        let nested_value = self.walk(nested_value, depth + 1)?;
                        redacted.insert(key, nested_value);
                    }
                }

                Ok(Value::Object(redacted))
            }
            Value::Array(items) => {
                self.guard.enter(depth)?;
                items
                    .into_iter()
                    .map(|item| self.walk(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            Value::Number(number) => Ok(Value::Number(self.number(number))),
            scalar => Ok(scalar),
        }
    }

    fn number(&self, number: Number) -> Number {
        match self.numbers {
            NumberHandling::Preserve => number,
            NumberHandling::Float64 => match number.as_f64() {
                Some(double) if double.fract() == 0.0 && double.abs() <= MAX_SAFE_INTEGER => {
                    Number::from(double as i64)
                }
                Some(double) => Number::from_f64(double).unwrap_or(number),
                None => number,
            },
        }
    }
}
