//! Element schemas and element families
//!
//! An element family is a named attribute group shared by several elements
//! (e.g. everything that can act as a hyperlink). Families may extend one
//! parent family; element schemas name zero or one family and add their own
//! attributes on top.

use crate::error::Result;
use crate::names::normalize_name;
use serde::Serialize;

use super::attributes::{AttributeSet, AttributeSpec};

/// A named group of attributes shared by a set of elements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementFamily {
    /// Family name
    pub name: String,
    /// Attributes declared by this family
    pub attributes: AttributeSet,
    /// Parent family
    pub extends: Option<String>,
}

impl ElementFamily {
    /// Create a new family from its attribute declarations
    pub fn new(name: &str, attributes: impl IntoIterator<Item = AttributeSpec>) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            attributes: AttributeSet::from_specs(attributes)?,
            extends: None,
        })
    }

    /// Set the parent family
    pub fn extending(mut self, parent: &str) -> Self {
        self.extends = Some(parent.to_string());
        self
    }
}

/// Per-tag attribute schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSchema {
    /// Tag name (lowercase)
    pub tag: String,
    /// Family the element belongs to
    pub family: Option<String>,
    /// Element-specific attributes, overriding family and global ones
    pub own_attributes: AttributeSet,
    /// The element cannot have children (`<br>`, `<img>`, ...)
    pub is_empty_element: bool,
    /// The element itself is deprecated
    pub deprecated: bool,
}

impl ElementSchema {
    /// Create an element with no family and no own attributes
    pub fn new(tag: &str) -> Self {
        Self {
            tag: normalize_name(tag),
            family: None,
            own_attributes: AttributeSet::new(),
            is_empty_element: false,
            deprecated: false,
        }
    }

    /// Set the family
    pub fn in_family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }

    /// Set the element-specific attributes
    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = AttributeSpec>,
    ) -> Result<Self> {
        for spec in attributes {
            self.own_attributes.add_attribute(spec)?;
        }
        Ok(self)
    }

    /// Mark the element as empty (void)
    pub fn empty(mut self) -> Self {
        self.is_empty_element = true;
        self
    }

    /// Mark the element as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}
