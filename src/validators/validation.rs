//! Attribute validation
//!
//! [`Validator`] checks one element's attribute bag against the schema
//! table and reports everything it finds as an ordered list of
//! [`Diagnostic`]s. Element-level findings come first, then the findings for
//! each attribute in input order.
//!
//! ```rust
//! use htmlschema::validators::{DiagnosticCode, Validator};
//!
//! let validator = Validator::html()?;
//! let diagnostics = validator.validate("link", [("rel", "stylesheet nofollow")]);
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code, DiagnosticCode::RelTypeHostMismatch);
//! # Ok::<(), htmlschema::Error>(())
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::names::{is_passthrough, is_valid_custom_element_name};
use crate::settings::Settings;

use super::diagnostics::{Diagnostic, DiagnosticCode};
use super::facets::{AttributeValue, ConstraintEvaluator, ViolationKind};
use super::resolver::{ResolvedSchema, SchemaResolver};
use super::schemas::SchemaTable;

/// Validates element attribute bags
///
/// A validator is `Send + Sync` and can be shared between threads; the only
/// state it carries is the memoized per-tag schema cache.
#[derive(Debug)]
pub struct Validator {
    resolver: SchemaResolver,
    settings: Settings,
}

impl Validator {
    /// Create a validator over an existing table
    pub fn new(table: Arc<SchemaTable>, settings: Settings) -> Self {
        Self {
            resolver: SchemaResolver::new(table),
            settings,
        }
    }

    /// Create a validator for the built-in HTML table with default settings
    pub fn html() -> Result<Self> {
        Ok(Self::new(Arc::new(SchemaTable::html()?), Settings::default()))
    }

    /// Create a validator for the built-in HTML table extended by `settings`
    pub fn with_settings(settings: Settings) -> Result<Self> {
        let table = SchemaTable::html_with_settings(&settings)?;
        Ok(Self::new(Arc::new(table), settings))
    }

    /// The schema table
    pub fn table(&self) -> &Arc<SchemaTable> {
        self.resolver.table()
    }

    /// The validation settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve the effective attribute schema of `tag`
    pub fn resolve(&self, tag: &str) -> Arc<ResolvedSchema> {
        self.resolver.resolve(tag)
    }

    /// Validate an element's attributes
    ///
    /// Attributes are `(name, value)` pairs in source order. Values convert
    /// from `&str`, `String`, `bool` or `Option<&str>` (`None` for an
    /// attribute written without a value).
    pub fn validate<I, K, V>(&self, tag: &str, attributes: I) -> Vec<Diagnostic>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttributeValue>,
    {
        let schema = self.resolver.resolve(tag);
        let mut diagnostics = Vec::new();

        if !schema.is_known() {
            let message = if is_valid_custom_element_name(&schema.tag) {
                format!(
                    "unknown element <{}> (custom element; only global attributes are checked)",
                    schema.tag
                )
            } else {
                format!("unknown element <{}>", schema.tag)
            };
            diagnostics.push(Diagnostic::element(DiagnosticCode::UnknownElement, tag, message));
        }
        if schema.is_deprecated() {
            diagnostics.push(Diagnostic::element(
                DiagnosticCode::DeprecatedElement,
                tag,
                format!("<{}> is deprecated", schema.tag),
            ));
        }

        for (name, value) in attributes {
            self.check_attribute(&schema, tag, name.as_ref(), &value.into(), &mut diagnostics);
        }

        debug!(tag = %schema.tag, diagnostics = diagnostics.len(), "validated attributes");
        diagnostics
    }

    /// Validate a single attribute
    ///
    /// Only attribute-level diagnostics are reported.
    pub fn validate_attribute(
        &self,
        tag: &str,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Vec<Diagnostic> {
        let schema = self.resolver.resolve(tag);
        let mut diagnostics = Vec::new();
        self.check_attribute(&schema, tag, name, &value.into(), &mut diagnostics);
        diagnostics
    }

    /// Check that validation yields no warning-level diagnostics
    pub fn is_valid<I, K, V>(&self, tag: &str, attributes: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttributeValue>,
    {
        !self
            .validate(tag, attributes)
            .iter()
            .any(Diagnostic::is_warning)
    }

    fn check_attribute(
        &self,
        schema: &ResolvedSchema,
        tag: &str,
        name: &str,
        value: &AttributeValue,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(spec) = schema.get(name) else {
            if !is_passthrough(name, self.settings.passthrough_prefixes.as_slice()) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::UnknownAttribute,
                    tag,
                    name,
                    format!("attribute '{}' is not allowed on <{}>", name, schema.tag),
                ));
            }
            return;
        };

        let evaluator = ConstraintEvaluator::new(self.resolver.table())
            .with_token_case(self.settings.rel_token_case);

        for violation in evaluator.evaluate(&spec.constraint, value, &schema.tag).violations() {
            let diagnostic = match violation.kind {
                ViolationKind::HostMismatch => Diagnostic::new(
                    DiagnosticCode::RelTypeHostMismatch,
                    tag,
                    name,
                    violation.reason.clone(),
                ),
                ViolationKind::Mismatch | ViolationKind::UnknownToken => Diagnostic::new(
                    DiagnosticCode::InvalidValue,
                    tag,
                    name,
                    format!("invalid value for '{}': {}", name, violation.reason),
                ),
            };
            diagnostics.push(
                diagnostic
                    .with_allowed_values(violation.allowed.clone())
                    .with_token(violation.token.clone()),
            );
        }

        if spec.deprecated {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::DeprecatedAttribute,
                tag,
                name,
                format!("attribute '{}' is deprecated on <{}>", name, schema.tag),
            ));
        }
        if spec.experimental {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::ExperimentalAttribute,
                tag,
                name,
                format!("attribute '{}' is experimental", name),
            ));
        }

        let Some(vocabulary) = spec.constraint.vocabulary() else {
            return;
        };
        let value = value.normalized_for(&spec.constraint);
        for entry in evaluator.recognized_tokens(vocabulary, &value) {
            if entry.deprecated {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::DeprecatedAttribute,
                        tag,
                        name,
                        format!("{}=\"{}\" is deprecated", name, entry.token),
                    )
                    .with_token(Some(entry.token.clone())),
                );
            }
            if entry.experimental {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::ExperimentalAttribute,
                        tag,
                        name,
                        format!("{}=\"{}\" is experimental", name, entry.token),
                    )
                    .with_token(Some(entry.token.clone())),
                );
            }
        }
    }
}
