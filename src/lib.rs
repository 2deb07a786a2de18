//! # htmlschema
//!
//! HTML attribute schema resolution and validation.
//!
//! The crate holds a table of the attributes the HTML Living Standard allows
//! on each element (global attributes, element families such as hyperlinks,
//! per-element attributes and the `rel` link-type vocabulary) and checks an
//! element's attribute bag against it.
//!
//! ## Features
//!
//! - Global, family and per-element attribute declarations
//! - Value constraints: free strings, booleans, booleanish strings,
//!   enumerations, numbers and closed token sets
//! - `rel` link types with per-token host elements
//! - Deprecated and experimental attributes and link types
//! - JSON-configurable vendor link types and passthrough prefixes
//!
//! ## Example
//!
//! ```rust
//! use htmlschema::validators::{DiagnosticCode, Validator};
//!
//! let validator = Validator::html()?;
//!
//! let diagnostics = validator.validate("area", [("shape", "Rect"), ("data-id", "7")]);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidValue);
//!
//! assert!(validator.is_valid("a", [("href", "/"), ("rel", "noopener")]));
//! # Ok::<(), htmlschema::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod names;
pub mod settings;

// Schema model and validation
pub mod validators;

// Re-exports for convenience
pub use error::{Error, Result};
pub use settings::{LinkTypeConfig, Settings, TokenCase};
pub use validators::{Diagnostic, DiagnosticCode, SchemaTable, Severity, Validator};

/// Version of the htmlschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
