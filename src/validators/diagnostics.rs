//! Validation diagnostics
//!
//! Validation never fails; every anomaly found in an attribute bag is
//! reported as a [`Diagnostic`].

use serde::Serialize;
use std::fmt;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory only
    Info,
    /// The markup is not valid HTML
    Warning,
}

impl Severity {
    /// Get the severity as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// Attribute not legal on the element
    UnknownAttribute,
    /// Attribute value violates its constraint
    InvalidValue,
    /// Deprecated attribute or link type
    DeprecatedAttribute,
    /// Experimental attribute or link type
    ExperimentalAttribute,
    /// Link type not allowed on the host element
    RelTypeHostMismatch,
    /// Tag not in the schema table
    UnknownElement,
    /// Deprecated element
    DeprecatedElement,
}

impl DiagnosticCode {
    /// Get the code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnknownAttribute => "UnknownAttribute",
            DiagnosticCode::InvalidValue => "InvalidValue",
            DiagnosticCode::DeprecatedAttribute => "DeprecatedAttribute",
            DiagnosticCode::ExperimentalAttribute => "ExperimentalAttribute",
            DiagnosticCode::RelTypeHostMismatch => "RelTypeHostMismatch",
            DiagnosticCode::UnknownElement => "UnknownElement",
            DiagnosticCode::DeprecatedElement => "DeprecatedElement",
        }
    }

    /// Severity attached to this code
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::UnknownAttribute
            | DiagnosticCode::InvalidValue
            | DiagnosticCode::RelTypeHostMismatch => Severity::Warning,
            DiagnosticCode::DeprecatedAttribute
            | DiagnosticCode::ExperimentalAttribute
            | DiagnosticCode::UnknownElement
            | DiagnosticCode::DeprecatedElement => Severity::Info,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding about a tag and its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Diagnostic code
    pub code: DiagnosticCode,
    /// Severity (derived from the code)
    pub severity: Severity,
    /// Element tag, as supplied
    pub tag: String,
    /// Attribute name, as supplied; empty for element-level diagnostics
    pub attribute: String,
    /// Human-readable message
    pub message: String,
    /// Values that would have been accepted
    pub allowed_values: Option<Vec<String>>,
    /// Offending or flagged token
    pub token: Option<String>,
}

impl Diagnostic {
    /// Create an attribute-level diagnostic
    pub fn new(
        code: DiagnosticCode,
        tag: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity: code.severity(),
            tag: tag.into(),
            attribute: attribute.into(),
            message: message.into(),
            allowed_values: None,
            token: None,
        }
    }

    /// Create an element-level diagnostic
    pub fn element(code: DiagnosticCode, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, tag, String::new(), message)
    }

    /// Set the allowed values
    pub fn with_allowed_values(mut self, values: Option<Vec<String>>) -> Self {
        self.allowed_values = values;
        self
    }

    /// Set the token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Check if this diagnostic is about the element rather than an attribute
    pub fn is_element_level(&self) -> bool {
        self.attribute.is_empty()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] <{}", self.severity, self.code, self.tag)?;
        if !self.attribute.is_empty() {
            write!(f, " {}", self.attribute)?;
        }
        write!(f, ">: {}", self.message)
    }
}
