//! Attribute declarations
//!
//! This module implements attribute declarations and the ordered,
//! case-insensitive attribute sets that global attributes, element families
//! and element schemas are made of.

use crate::error::{BuildError, Result};
use crate::names::normalize_name;
use indexmap::IndexMap;
use serde::Serialize;

use super::facets::ValueConstraint;

/// One declared attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSpec {
    /// Attribute name (lowercase)
    name: String,
    /// Declared value constraint
    pub constraint: ValueConstraint,
    /// Advisory: the attribute is deprecated
    pub deprecated: bool,
    /// Advisory: the attribute is experimental / draft
    pub experimental: bool,
}

impl AttributeSpec {
    /// Create a new attribute declaration
    pub fn new(name: &str, constraint: ValueConstraint) -> Self {
        Self {
            name: normalize_name(name),
            constraint,
            deprecated: false,
            experimental: false,
        }
    }

    /// Free-string attribute
    pub fn string(name: &str) -> Self {
        Self::new(name, ValueConstraint::FreeString)
    }

    /// Presence-only boolean attribute
    pub fn boolean(name: &str) -> Self {
        Self::new(name, ValueConstraint::Boolean)
    }

    /// Attribute accepting a boolean or its `"true"`/`"false"` spelling
    pub fn booleanish(name: &str) -> Self {
        Self::new(name, ValueConstraint::BooleanishString)
    }

    /// Numeric attribute
    pub fn number(name: &str) -> Self {
        Self::new(name, ValueConstraint::Number)
    }

    /// Enumerated attribute
    pub fn enumeration(name: &str, values: &[&str]) -> Self {
        Self::new(name, ValueConstraint::enumeration(values))
    }

    /// Space-separated token list drawn from a named vocabulary
    pub fn tokens(name: &str, vocabulary: &str) -> Self {
        Self::new(name, ValueConstraint::ClosedTokenSet(vocabulary.to_string()))
    }

    /// Mark the attribute as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Mark the attribute as experimental
    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }

    /// Get the attribute name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered attribute set keyed by lowercase name
///
/// Iteration order is declaration order; an override keeps the position of
/// the entry it replaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: IndexMap<String, AttributeSpec>,
}

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from declarations, rejecting duplicates
    pub fn from_specs(specs: impl IntoIterator<Item = AttributeSpec>) -> Result<Self> {
        let mut set = Self::new();
        for spec in specs {
            set.add_attribute(spec)?;
        }
        Ok(set)
    }

    /// Add an attribute, failing if one with the same name is declared
    pub fn add_attribute(&mut self, spec: AttributeSpec) -> Result<()> {
        if self.attributes.contains_key(spec.name()) {
            return Err(BuildError::new(format!(
                "duplicate attribute declaration: '{}'",
                spec.name()
            ))
            .into());
        }
        self.attributes.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Set (update or add) an attribute
    ///
    /// Unlike `add_attribute`, this replaces an existing attribute with the same name.
    pub fn set_attribute(&mut self, spec: AttributeSpec) {
        self.attributes.insert(spec.name.clone(), spec);
    }

    /// Merge another set into this one; entries of `other` win
    pub fn merge(&mut self, other: &AttributeSet) {
        for spec in other.iter() {
            self.set_attribute(spec.clone());
        }
    }

    /// Get an attribute by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        match self.attributes.get(name) {
            Some(spec) => Some(spec),
            None => self.attributes.get(&normalize_name(name)),
        }
    }

    /// Check if an attribute is declared (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over declarations in order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.attributes.values()
    }

    /// Iterate over declared names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Get the number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
