use crate::{
    ConfigError, KeywordSet, NumberHandling, RedactionMode, DEFAULT_MASK_PLACEHOLDER,
};

/// Immutable configuration for a [`crate::RedactionEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RedactionPolicy {
    keywords: KeywordSet,
    mode: RedactionMode,
    mask_placeholder: String,
    max_depth: Option<usize>,
    number_handling: NumberHandling,
}

impl RedactionPolicy {
    pub fn new(keywords: KeywordSet, mode: RedactionMode) -> Self {
        Self {
            keywords,
            mode,
            mask_placeholder: DEFAULT_MASK_PLACEHOLDER.to_string(),
            max_depth: None,
            number_handling: NumberHandling::default(),
        }
    }

    pub fn with_mask_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.mask_placeholder = placeholder.into();
        self
    }

    /// Maximum container nesting accepted by
    /// [`crate::RedactionEngine::try_redact`]. The root object or array is
    /// level one.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_number_handling(mut self, number_handling: NumberHandling) -> Self {
        self.number_handling = number_handling;
        self
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn mode(&self) -> RedactionMode {
        self.mode
    }

    pub fn mask_placeholder(&self) -> &str {
        &self.mask_placeholder
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn number_handling(&self) -> NumberHandling {
        self.number_handling
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.has_empty_keyword() {
            return Err(ConfigError::EmptyKeyword);
        }
        if self.mask_placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(KeywordSet::builtin(), RedactionMode::default())
    }
}
