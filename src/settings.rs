//! Validator settings
//!
//! Policy knobs that are not part of the HTML data itself: which attribute
//! prefixes pass through unchecked, how `rel` tokens are compared, and the
//! vendor-specific link types a deployment wants to accept.
//!
//! Settings are plain data and can be loaded from JSON:
//!
//! ```json
//! {
//!   "rel_token_case": "ascii-insensitive",
//!   "extra_link_types": [
//!     { "token": "me", "hosts": ["a", "link"] }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::{is_html_whitespace, normalize_name};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How tokens of a closed token set are compared against the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCase {
    /// Tokens must match the vocabulary spelling exactly
    #[default]
    Sensitive,
    /// Tokens match after ASCII lowercasing
    AsciiInsensitive,
}

impl TokenCase {
    /// Get the policy as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCase::Sensitive => "sensitive",
            TokenCase::AsciiInsensitive => "ascii-insensitive",
        }
    }
}

/// A vendor link type added on top of the built-in vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeConfig {
    /// The `rel` keyword
    pub token: String,
    /// Elements the keyword may appear on
    pub hosts: Vec<String>,
    /// Whether the keyword is deprecated
    #[serde(default)]
    pub deprecated: bool,
    /// Whether the keyword is experimental
    #[serde(default)]
    pub experimental: bool,
    /// Free-text semantics
    #[serde(default)]
    pub description: String,
}

impl LinkTypeConfig {
    /// Create a vendor link type allowed on the given hosts
    pub fn new<I, S>(token: impl Into<String>, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token: token.into(),
            hosts: hosts.into_iter().map(Into::into).collect(),
            deprecated: false,
            experimental: false,
            description: String::new(),
        }
    }
}

/// Validation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Attribute prefixes accepted as free strings without being declared
    pub passthrough_prefixes: Vec<String>,
    /// Comparison policy for `rel` tokens
    pub rel_token_case: TokenCase,
    /// Link types accepted in addition to the built-in vocabulary
    pub extra_link_types: Vec<LinkTypeConfig>,
    /// Construction limits
    #[serde(skip_serializing)]
    pub limits: Limits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            passthrough_prefixes: vec!["data-".to_string(), "aria-".to_string()],
            rel_token_case: TokenCase::Sensitive,
            extra_link_types: Vec::new(),
            limits: Limits::default(),
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Set the `rel` token comparison policy
    pub fn with_rel_token_case(mut self, case: TokenCase) -> Self {
        self.rel_token_case = case;
        self
    }

    /// Add a vendor link type
    pub fn with_link_type(mut self, link_type: LinkTypeConfig) -> Self {
        self.extra_link_types.push(link_type);
        self
    }

    /// Replace the passthrough prefixes
    pub fn with_passthrough_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.passthrough_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Check internal consistency
    pub fn check(&self) -> Result<()> {
        for prefix in &self.passthrough_prefixes {
            if prefix.is_empty() {
                return Err(Error::Settings(
                    "passthrough prefix must not be empty".to_string(),
                ));
            }
        }

        for link_type in &self.extra_link_types {
            if link_type.token.is_empty() || link_type.token.contains(is_html_whitespace) {
                return Err(Error::Settings(format!(
                    "invalid link type token '{}'",
                    link_type.token
                )));
            }
            if link_type.hosts.iter().all(|h| normalize_name(h).is_empty()) {
                return Err(Error::Settings(format!(
                    "link type '{}' must allow at least one host element",
                    link_type.token
                )));
            }
        }

        self.limits
            .check_vocabulary_size(self.extra_link_types.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.passthrough_prefixes, vec!["data-", "aria-"]);
        assert_eq!(settings.rel_token_case, TokenCase::Sensitive);
        assert!(settings.extra_link_types.is_empty());
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(
            r#"{
                "rel_token_case": "ascii-insensitive",
                "extra_link_types": [
                    { "token": "me", "hosts": ["a", "link"], "experimental": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(settings.rel_token_case, TokenCase::AsciiInsensitive);
        assert_eq!(settings.passthrough_prefixes, vec!["data-", "aria-"]);
        assert_eq!(settings.extra_link_types.len(), 1);
        assert!(settings.extra_link_types[0].experimental);
        assert!(!settings.extra_link_types[0].deprecated);
    }

    #[test]
    fn test_from_json_rejects_empty_hosts() {
        let result = Settings::from_json(r#"{"extra_link_types": [{"token": "x", "hosts": []}]}"#);
        assert!(matches!(result, Err(Error::Settings(_))));
    }

    #[test]
    fn test_from_json_rejects_whitespace_token() {
        let result =
            Settings::from_json(r#"{"extra_link_types": [{"token": "a b", "hosts": ["a"]}]}"#);
        assert!(matches!(result, Err(Error::Settings(_))));
    }

    #[test]
    fn test_from_json_rejects_unknown_case_policy() {
        let result = Settings::from_json(r#"{"rel_token_case": "sometimes"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_builder_methods() {
        let settings = Settings::new()
            .with_rel_token_case(TokenCase::AsciiInsensitive)
            .with_passthrough_prefixes(["x-"])
            .with_link_type(LinkTypeConfig::new("me", ["a"]));

        assert_eq!(settings.rel_token_case.as_str(), "ascii-insensitive");
        assert_eq!(settings.passthrough_prefixes, vec!["x-"]);
        assert_eq!(settings.extra_link_types[0].hosts, vec!["a"]);
    }
}
