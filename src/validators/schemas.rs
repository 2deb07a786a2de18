//! Schema table
//!
//! The immutable attribute data every validation reads from: global
//! attributes, element families, element schemas and token vocabularies.
//! Tables are built once (see [`SchemaTableBuilder`]) and then shared
//! read-only, typically behind an `Arc`.

use indexmap::IndexMap;

use crate::error::Result;
use crate::names::normalize_name;
use crate::settings::Settings;

use super::attributes::AttributeSet;
use super::builders::SchemaTableBuilder;
use super::builtins;
use super::elements::{ElementFamily, ElementSchema};
use super::link_types::{LinkType, LinkTypeVocabulary, LINK_TYPES};

/// Immutable attribute schema data
#[derive(Debug, Clone)]
pub struct SchemaTable {
    globals: AttributeSet,
    families: IndexMap<String, ElementFamily>,
    elements: IndexMap<String, ElementSchema>,
    vocabularies: IndexMap<String, LinkTypeVocabulary>,
}

impl SchemaTable {
    pub(crate) fn from_parts(
        globals: AttributeSet,
        families: IndexMap<String, ElementFamily>,
        elements: IndexMap<String, ElementSchema>,
        vocabularies: IndexMap<String, LinkTypeVocabulary>,
    ) -> Self {
        Self {
            globals,
            families,
            elements,
            vocabularies,
        }
    }

    /// Start building a custom table
    pub fn builder() -> SchemaTableBuilder {
        SchemaTableBuilder::new()
    }

    /// The built-in HTML Living Standard attribute table
    pub fn html() -> Result<Self> {
        builtins::html_builder()?.build()
    }

    /// The built-in HTML table extended by deployment settings
    pub fn html_with_settings(settings: &Settings) -> Result<Self> {
        settings.check()?;
        let mut builder = builtins::html_builder()?;
        builder.apply_settings(settings);
        builder.build()
    }

    /// Look up an element schema by tag (case-insensitive)
    pub fn lookup_element(&self, tag: &str) -> Option<&ElementSchema> {
        self.elements
            .get(tag)
            .or_else(|| self.elements.get(&normalize_name(tag)))
    }

    /// Attributes legal on every element
    pub fn global_attributes(&self) -> &AttributeSet {
        &self.globals
    }

    /// Look up a `rel` link type (exact match)
    pub fn lookup_link_type(&self, token: &str) -> Option<&LinkType> {
        self.link_types().and_then(|vocab| vocab.get(token))
    }

    /// The `rel` link type vocabulary
    pub fn link_types(&self) -> Option<&LinkTypeVocabulary> {
        self.vocabulary(LINK_TYPES)
    }

    /// Look up a named token vocabulary
    pub fn vocabulary(&self, name: &str) -> Option<&LinkTypeVocabulary> {
        self.vocabularies.get(name)
    }

    /// Look up an element family
    pub fn lookup_family(&self, name: &str) -> Option<&ElementFamily> {
        self.families.get(name)
    }

    /// A family and its ancestors, nearest first
    pub fn family_chain(&self, name: &str) -> Vec<&ElementFamily> {
        let mut chain: Vec<&ElementFamily> = Vec::new();
        let mut next = self.families.get(name);

        while let Some(family) = next {
            if chain.iter().any(|f| f.name == family.name) {
                break;
            }
            chain.push(family);
            next = family
                .extends
                .as_deref()
                .and_then(|parent| self.families.get(parent));
        }
        chain
    }

    /// Whether `tag` is a known empty (void) element
    pub fn is_empty_element(&self, tag: &str) -> bool {
        self.lookup_element(tag)
            .map(|e| e.is_empty_element)
            .unwrap_or(false)
    }

    /// Iterate over element schemas in declaration order
    pub fn elements(&self) -> impl Iterator<Item = &ElementSchema> {
        self.elements.values()
    }

    /// Iterate over families in declaration order
    pub fn families(&self) -> impl Iterator<Item = &ElementFamily> {
        self.families.values()
    }

    /// Get the number of element schemas
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}
