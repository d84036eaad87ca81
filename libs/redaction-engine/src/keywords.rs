use std::collections::HashSet;

use crate::ConfigError;

/// Keys redacted when no vocabulary is configured.
pub const DEFAULT_SENSITIVE_KEYWORDS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "accessToken",
    "refreshToken",
    "apiKey",
    "api_key",
    "authorization",
    "creditCard",
    "cardNumber",
    "cvv",
    "ssn",
    "pin",
];

/// Immutable set of object keys whose values must be redacted.
///
/// Matching is exact and case-sensitive: `"Password"` and `"password"` are
/// different keywords, and no trimming is applied to either side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: HashSet<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Like [`KeywordSet::new`], but rejects empty keywords.
    pub fn try_new<I, S>(keywords: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self::new(keywords);
        if set.keywords.contains("") {
            return Err(ConfigError::EmptyKeyword);
        }
        Ok(set)
    }

    /// The built-in vocabulary from [`DEFAULT_SENSITIVE_KEYWORDS`].
    pub fn builtin() -> Self {
        Self::new(DEFAULT_SENSITIVE_KEYWORDS.iter().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keywords.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub(crate) fn has_empty_keyword(&self) -> bool {
        self.keywords.contains("")
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
