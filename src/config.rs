//! Configuration options shared by every extractor.
//!
//! [`ExtractionConfig`] carries the few switches that change extractor output
//! without changing which fields are read. It deserializes from JSON with
//! every key optional.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for field extraction.
///
/// # Examples
///
/// ```
/// use marc_discovery::ExtractionConfig;
///
/// let config = ExtractionConfig::new().with_alternates(false);
/// assert!(!config.include_alternates);
///
/// let parsed = ExtractionConfig::from_json_str(r#"{"translate_relators": false}"#).unwrap();
/// assert!(parsed.include_alternates);
/// assert!(!parsed.translate_relators);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Merge linked 880 alternates into multi-valued results.
    pub include_alternates: bool,

    /// Translate subfield 4 relator codes.
    ///
    /// When false, only literal role terms (`e`/`j`) are used.
    pub translate_relators: bool,

    /// Language codes that never produce a language value.
    pub undetermined_language_codes: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            include_alternates: true,
            translate_relators: true,
            undetermined_language_codes: vec!["und".to_string(), "zxx".to_string()],
        }
    }
}

impl ExtractionConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExtractError::Json`] for malformed JSON or mistyped keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enables or disables merging of 880 alternates.
    #[must_use]
    pub fn with_alternates(mut self, enabled: bool) -> Self {
        self.include_alternates = enabled;
        self
    }

    /// Enables or disables relator code translation.
    #[must_use]
    pub fn with_relator_translation(mut self, enabled: bool) -> Self {
        self.translate_relators = enabled;
        self
    }

    /// Replaces the list of undetermined language codes.
    #[must_use]
    pub fn with_undetermined_language_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.undetermined_language_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// True if `code` is configured as undetermined.
    #[must_use]
    pub fn is_undetermined_language(&self, code: &str) -> bool {
        self.undetermined_language_codes
            .iter()
            .any(|c| c.as_str() == code.trim())
    }
}
