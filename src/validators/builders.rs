//! Schema table builder
//!
//! A [`SchemaTable`] is only ever created through this builder. Declarations
//! are collected first; [`SchemaTableBuilder::build`] then checks references
//! between them (family parents, element families, token vocabularies, link
//! type hosts) before the table is published.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{BuildError, Result};
use crate::limits::Limits;
use crate::settings::Settings;

use super::attributes::{AttributeSet, AttributeSpec};
use super::elements::{ElementFamily, ElementSchema};
use super::facets::ValueConstraint;
use super::link_types::{LinkType, LinkTypeVocabulary, LINK_TYPES};
use super::schemas::SchemaTable;

/// Collects declarations and produces a checked [`SchemaTable`]
#[derive(Debug, Default)]
pub struct SchemaTableBuilder {
    globals: AttributeSet,
    families: IndexMap<String, ElementFamily>,
    elements: IndexMap<String, ElementSchema>,
    vocabularies: IndexMap<String, LinkTypeVocabulary>,
    limits: Limits,
    errors: Vec<BuildError>,
}

impl SchemaTableBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set construction limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Declare a global attribute
    pub fn global(&mut self, spec: AttributeSpec) -> &mut Self {
        if self.globals.contains(spec.name()) {
            self.errors.push(
                BuildError::new(format!("duplicate attribute declaration: '{}'", spec.name()))
                    .with_location("global attributes"),
            );
        } else {
            self.globals.set_attribute(spec);
        }
        self
    }

    /// Declare several global attributes
    pub fn globals(&mut self, specs: impl IntoIterator<Item = AttributeSpec>) -> &mut Self {
        for spec in specs {
            self.global(spec);
        }
        self
    }

    /// Declare an element family
    pub fn family(&mut self, family: ElementFamily) -> &mut Self {
        if self.families.contains_key(&family.name) {
            self.errors.push(
                BuildError::new("duplicate family declaration")
                    .with_location(format!("family '{}'", family.name)),
            );
        } else {
            self.families.insert(family.name.clone(), family);
        }
        self
    }

    /// Declare an element
    pub fn element(&mut self, element: ElementSchema) -> &mut Self {
        if self.elements.contains_key(&element.tag) {
            self.errors.push(
                BuildError::new("duplicate element declaration")
                    .with_location(format!("element '{}'", element.tag)),
            );
        } else {
            self.elements.insert(element.tag.clone(), element);
        }
        self
    }

    /// Add a token to a named vocabulary, creating the vocabulary if needed
    pub fn token(&mut self, vocabulary: &str, entry: LinkType) -> &mut Self {
        self.vocabularies
            .entry(vocabulary.to_string())
            .or_default()
            .insert(entry);
        self
    }

    /// Add a link type to the `rel` vocabulary
    pub fn link_type(&mut self, entry: LinkType) -> &mut Self {
        self.token(LINK_TYPES, entry)
    }

    /// Apply deployment settings (vendor link types, limits)
    pub fn apply_settings(&mut self, settings: &Settings) -> &mut Self {
        self.limits = settings.limits.clone();
        for config in &settings.extra_link_types {
            self.link_type(LinkType::from(config));
        }
        self
    }

    /// Check all declarations and publish the table
    pub fn build(mut self) -> Result<SchemaTable> {
        self.check_families()?;
        self.check_elements();
        self.check_vocabularies()?;
        self.check_constraints();

        if let Some(first) = self.errors.first() {
            let mut error = first.clone();
            if self.errors.len() > 1 {
                error.message = format!(
                    "{} (and {} more schema errors)",
                    error.message,
                    self.errors.len() - 1
                );
            }
            return Err(error.into());
        }

        debug!(
            globals = self.globals.len(),
            families = self.families.len(),
            elements = self.elements.len(),
            vocabularies = self.vocabularies.len(),
            "schema table built"
        );

        Ok(SchemaTable::from_parts(
            self.globals,
            self.families,
            self.elements,
            self.vocabularies,
        ))
    }

    fn check_families(&mut self) -> Result<()> {
        for family in self.families.values() {
            let mut depth = 0;
            let mut current = family;
            let mut visited = vec![family.name.as_str()];

            while let Some(parent_name) = current.extends.as_deref() {
                depth += 1;
                self.limits.check_family_depth(depth)?;

                if visited.contains(&parent_name) {
                    self.errors.push(
                        BuildError::new(format!("cyclic family chain through '{}'", parent_name))
                            .with_location(format!("family '{}'", family.name)),
                    );
                    break;
                }
                match self.families.get(parent_name) {
                    Some(parent) => {
                        visited.push(parent_name);
                        current = parent;
                    }
                    None => {
                        self.errors.push(
                            BuildError::new(format!("unknown parent family '{}'", parent_name))
                                .with_location(format!("family '{}'", current.name)),
                        );
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_elements(&mut self) {
        for element in self.elements.values() {
            if let Some(family) = element.family.as_deref() {
                if !self.families.contains_key(family) {
                    self.errors.push(
                        BuildError::new(format!("unknown family '{}'", family))
                            .with_location(format!("element '{}'", element.tag)),
                    );
                }
            }
        }
    }

    fn check_vocabularies(&mut self) -> Result<()> {
        for (name, vocabulary) in &self.vocabularies {
            self.limits.check_vocabulary_size(vocabulary.len())?;

            for entry in vocabulary.iter() {
                if entry.hosts.is_empty() {
                    self.errors.push(
                        BuildError::new(format!("token '{}' has no host elements", entry.token))
                            .with_location(format!("vocabulary '{}'", name)),
                    );
                }
            }
        }
        Ok(())
    }

    fn check_constraints(&mut self) {
        let mut declared: Vec<(String, &AttributeSpec)> = self
            .globals
            .iter()
            .map(|spec| ("global attributes".to_string(), spec))
            .collect();
        for family in self.families.values() {
            declared.extend(
                family
                    .attributes
                    .iter()
                    .map(|spec| (format!("family '{}'", family.name), spec)),
            );
        }
        for element in self.elements.values() {
            declared.extend(
                element
                    .own_attributes
                    .iter()
                    .map(|spec| (format!("element '{}'", element.tag), spec)),
            );
        }

        let mut missing = Vec::new();
        for (location, spec) in declared {
            check_constraint(&spec.constraint, &self.vocabularies, &mut |vocabulary| {
                missing.push(
                    BuildError::new(format!(
                        "attribute '{}' references unknown vocabulary '{}'",
                        spec.name(),
                        vocabulary
                    ))
                    .with_location(location.clone()),
                )
            });
        }
        self.errors.extend(missing);
    }
}

fn check_constraint(
    constraint: &ValueConstraint,
    vocabularies: &IndexMap<String, LinkTypeVocabulary>,
    report: &mut dyn FnMut(&str),
) {
    match constraint {
        ValueConstraint::ClosedTokenSet(name) if !vocabularies.contains_key(name) => report(name),
        ValueConstraint::Union(members) => {
            for member in members {
                check_constraint(member, vocabularies, report);
            }
        }
        _ => {}
    }
}
