//! HTML attribute validators
//!
//! This module contains the schema model and the validation logic for HTML
//! element attributes.

// Schema model
pub mod attributes;
pub mod elements;
pub mod facets;
pub mod link_types;

// Schema construction
pub mod builders;
pub mod builtins;
pub mod schemas;

// Validation
pub mod diagnostics;
pub mod resolver;
pub mod validation;

// Re-exports
pub use attributes::{AttributeSet, AttributeSpec};
pub use builders::SchemaTableBuilder;
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use elements::{ElementFamily, ElementSchema};
pub use facets::{AttributeValue, ConstraintEvaluator, Evaluation, ValueConstraint, Violation, ViolationKind};
pub use link_types::{LinkType, LinkTypeVocabulary, LINK_TYPES};
pub use resolver::{ResolvedSchema, SchemaResolver};
pub use schemas::SchemaTable;
pub use validation::Validator;
