//! Effective attribute schema resolution
//!
//! The attributes legal on an element are composed from three layers:
//! global attributes, the element's family chain (furthest ancestor first)
//! and the element's own attributes. Each layer overrides same-named entries
//! of the layers before it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::trace;

use crate::names::normalize_name;

use super::attributes::{AttributeSet, AttributeSpec};
use super::schemas::SchemaTable;

/// The effective attribute schema of one tag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSchema {
    /// Tag the schema was resolved for (lowercase)
    pub tag: String,
    /// Effective attributes
    pub attributes: AttributeSet,
    /// Family lineage, nearest first
    pub lineage: Vec<String>,
    known: bool,
    is_empty_element: bool,
    deprecated: bool,
}

impl ResolvedSchema {
    /// Whether the tag was found in the schema table
    ///
    /// Unknown tags resolve to the global attributes only.
    pub fn is_known(&self) -> bool {
        self.known
    }

    /// Whether the element is an empty (void) element
    pub fn is_empty_element(&self) -> bool {
        self.is_empty_element
    }

    /// Whether the element itself is deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Look up an effective attribute (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }
}

/// Resolves and memoizes per-tag attribute schemas
///
/// The cache only ever holds the first value computed for a tag, so
/// concurrent resolutions of the same tag observe the same schema.
#[derive(Debug)]
pub struct SchemaResolver {
    table: Arc<SchemaTable>,
    cache: RwLock<HashMap<String, Arc<ResolvedSchema>>>,
}

impl SchemaResolver {
    /// Create a resolver over a schema table
    pub fn new(table: Arc<SchemaTable>) -> Self {
        Self {
            table,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The schema table this resolver reads from
    pub fn table(&self) -> &Arc<SchemaTable> {
        &self.table
    }

    /// Resolve the effective schema for `tag`
    pub fn resolve(&self, tag: &str) -> Arc<ResolvedSchema> {
        let tag = normalize_name(tag);

        if let Ok(cache) = self.cache.read() {
            if let Some(resolved) = cache.get(&tag) {
                trace!(tag = %tag, "schema cache hit");
                return Arc::clone(resolved);
            }
        }

        let resolved = Arc::new(self.compute(&tag));
        match self.cache.write() {
            Ok(mut cache) => Arc::clone(cache.entry(tag).or_insert(resolved)),
            // Poisoned cache: serve the fresh value uncached
            Err(_) => resolved,
        }
    }

    /// Resolve without touching the cache
    pub fn compute(&self, tag: &str) -> ResolvedSchema {
        let tag = normalize_name(tag);
        let mut attributes = self.table.global_attributes().clone();

        let Some(element) = self.table.lookup_element(&tag) else {
            trace!(tag = %tag, "unknown element, global attributes only");
            return ResolvedSchema {
                tag,
                attributes,
                lineage: Vec::new(),
                known: false,
                is_empty_element: false,
                deprecated: false,
            };
        };

        let chain = element
            .family
            .as_deref()
            .map(|family| self.table.family_chain(family))
            .unwrap_or_default();
        for family in chain.iter().rev() {
            attributes.merge(&family.attributes);
        }
        attributes.merge(&element.own_attributes);

        trace!(tag = %tag, attributes = attributes.len(), families = chain.len(), "schema resolved");

        ResolvedSchema {
            lineage: chain.iter().map(|f| f.name.clone()).collect(),
            tag,
            attributes,
            known: true,
            is_empty_element: element.is_empty_element,
            deprecated: element.deprecated,
        }
    }

    /// Number of cached tags
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }
}
