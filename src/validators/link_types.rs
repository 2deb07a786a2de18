//! Link type vocabulary
//!
//! The `rel` attribute holds a space-separated list of link types. Each link
//! type is only meaningful on some hyperlink-bearing elements (`a`, `area`,
//! `form`, `link`), so the vocabulary records an explicit host set per token.

use crate::names::normalize_name;
use crate::settings::{LinkTypeConfig, TokenCase};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Name of the vocabulary referenced by the `rel` attribute
pub const LINK_TYPES: &str = "link-types";

/// One vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkType {
    /// The keyword as written in markup
    pub token: String,
    /// Host elements the keyword is meaningful on (lowercase tags)
    pub hosts: IndexSet<String>,
    /// Advisory: the keyword is deprecated
    pub deprecated: bool,
    /// Advisory: the keyword is experimental
    pub experimental: bool,
    /// Free-text semantics, not machine-checked
    pub description: String,
}

impl LinkType {
    /// Create a link type allowed on the given hosts
    pub fn new(token: &str, hosts: &[&str]) -> Self {
        Self {
            token: token.to_string(),
            hosts: hosts.iter().map(|h| normalize_name(h)).collect(),
            deprecated: false,
            experimental: false,
            description: String::new(),
        }
    }

    /// Mark the link type as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Mark the link type as experimental
    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }

    /// Attach a description
    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Check whether the keyword may appear on `tag`
    pub fn allows_host(&self, tag: &str) -> bool {
        self.hosts.contains(tag) || self.hosts.contains(&normalize_name(tag))
    }

    /// Host tags as a comma-separated list, for messages
    pub fn hosts_display(&self) -> String {
        self.hosts.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl From<&LinkTypeConfig> for LinkType {
    fn from(config: &LinkTypeConfig) -> Self {
        Self {
            token: config.token.clone(),
            hosts: config
                .hosts
                .iter()
                .map(|h| normalize_name(h))
                .filter(|h| !h.is_empty())
                .collect(),
            deprecated: config.deprecated,
            experimental: config.experimental,
            description: config.description.clone(),
        }
    }
}

/// Closed vocabulary of tokens with per-token host restrictions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkTypeVocabulary {
    entries: IndexMap<String, LinkType>,
}

impl LinkTypeVocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; a later entry with the same token replaces the earlier one
    pub fn insert(&mut self, link_type: LinkType) {
        self.entries.insert(link_type.token.clone(), link_type);
    }

    /// Exact lookup
    pub fn get(&self, token: &str) -> Option<&LinkType> {
        self.entries.get(token)
    }

    /// Lookup honoring a comparison policy
    pub fn lookup(&self, token: &str, case: TokenCase) -> Option<&LinkType> {
        match case {
            TokenCase::Sensitive => self.get(token),
            TokenCase::AsciiInsensitive => self.get(token).or_else(|| {
                self.entries
                    .values()
                    .find(|entry| entry.token.eq_ignore_ascii_case(token))
            }),
        }
    }

    /// Tokens that may appear on `tag`, in vocabulary order
    pub fn tokens_for_host(&self, tag: &str) -> Vec<String> {
        self.entries
            .values()
            .filter(|entry| entry.allows_host(tag))
            .map(|entry| entry.token.clone())
            .collect()
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> impl Iterator<Item = &LinkType> {
        self.entries.values()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
