//! Attribute value constraints
//!
//! This module implements the constraint language attribute declarations
//! are written in, and the evaluator that checks a literal value against a
//! constraint.

use serde::Serialize;
use std::fmt;

use super::link_types::{LinkType, LinkTypeVocabulary};
use super::schemas::SchemaTable;
use crate::names::{normalize_name, split_tokens};
use crate::settings::TokenCase;

/// Declared value constraint of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueConstraint {
    /// Any string, including the empty string
    FreeString,
    /// A real boolean (presence-only attribute)
    Boolean,
    /// A boolean or the strings `"true"` / `"false"`
    BooleanishString,
    /// One of a fixed set of literals (case-sensitive)
    Enum(Vec<String>),
    /// A finite number
    Number,
    /// Space-separated tokens from the named vocabulary
    ClosedTokenSet(String),
    /// Satisfied when any member constraint is satisfied
    Union(Vec<ValueConstraint>),
}

impl ValueConstraint {
    /// Build an enumeration from literals
    pub fn enumeration(values: &[&str]) -> Self {
        ValueConstraint::Enum(values.iter().map(|v| v.to_string()).collect())
    }

    /// Get the constraint kind as a string
    pub fn kind(&self) -> &'static str {
        match self {
            ValueConstraint::FreeString => "string",
            ValueConstraint::Boolean => "boolean",
            ValueConstraint::BooleanishString => "booleanish",
            ValueConstraint::Enum(_) => "enum",
            ValueConstraint::Number => "number",
            ValueConstraint::ClosedTokenSet(_) => "tokens",
            ValueConstraint::Union(_) => "union",
        }
    }

    /// Whether presence without a value means `true`
    pub fn presence_means_true(&self) -> bool {
        match self {
            ValueConstraint::Boolean => true,
            ValueConstraint::Union(members) => members.iter().any(|m| m.presence_means_true()),
            _ => false,
        }
    }

    /// Literal values listed by the constraint, for diagnostics
    pub fn allowed_values(&self) -> Option<Vec<String>> {
        match self {
            ValueConstraint::Enum(values) => Some(values.clone()),
            ValueConstraint::BooleanishString => {
                Some(vec!["true".to_string(), "false".to_string()])
            }
            ValueConstraint::Union(members) => {
                let mut values: Vec<String> = Vec::new();
                for member in members {
                    for value in member.allowed_values().unwrap_or_default() {
                        if !values.contains(&value) {
                            values.push(value);
                        }
                    }
                }
                if values.is_empty() {
                    None
                } else {
                    Some(values)
                }
            }
            _ => None,
        }
    }

    /// Vocabulary referenced by a token-set constraint
    pub fn vocabulary(&self) -> Option<&str> {
        match self {
            ValueConstraint::ClosedTokenSet(name) => Some(name),
            ValueConstraint::Union(members) => members.iter().find_map(|m| m.vocabulary()),
            _ => None,
        }
    }
}

impl fmt::Display for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueConstraint::Enum(values) => write!(f, "enum({})", values.join(" | ")),
            ValueConstraint::ClosedTokenSet(name) => write!(f, "tokens({})", name),
            ValueConstraint::Union(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "{}", parts.join(" | "))
            }
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// An attribute value as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A real boolean (e.g. from a typed template binding)
    Bool(bool),
    /// A string value
    Text(String),
    /// The attribute was written without a value (`<input disabled>`)
    Absent,
}

impl AttributeValue {
    /// Normalize presence-only and empty values for a constraint
    ///
    /// `Absent` becomes `true` where presence means true and `""` otherwise;
    /// an empty string becomes `true` only for a plain `Boolean` constraint.
    pub fn normalized_for(&self, constraint: &ValueConstraint) -> AttributeValue {
        match self {
            AttributeValue::Absent if constraint.presence_means_true() => AttributeValue::Bool(true),
            AttributeValue::Absent => AttributeValue::Text(String::new()),
            AttributeValue::Text(text)
                if text.is_empty() && matches!(constraint, ValueConstraint::Boolean) =>
            {
                AttributeValue::Bool(true)
            }
            other => other.clone(),
        }
    }

    /// Get the text, if this is a string value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Text(text) => write!(f, "\"{}\"", text),
            AttributeValue::Absent => write!(f, "(no value)"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<Option<&str>> for AttributeValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(AttributeValue::Absent, AttributeValue::from)
    }
}

/// Why a value failed its constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The value does not have the declared shape
    Mismatch,
    /// A token is not in the vocabulary
    UnknownToken,
    /// A token is in the vocabulary but not allowed on the host element
    HostMismatch,
}

/// One constraint violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Violation kind
    pub kind: ViolationKind,
    /// Human-readable explanation
    pub reason: String,
    /// Values (or host tags, for `HostMismatch`) that would have been accepted
    pub allowed: Option<Vec<String>>,
    /// Offending token, for token-set constraints
    pub token: Option<String>,
}

impl Violation {
    /// Create a shape mismatch
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Mismatch,
            reason: reason.into(),
            allowed: None,
            token: None,
        }
    }

    /// Set the allowed values
    pub fn with_allowed(mut self, allowed: Option<Vec<String>>) -> Self {
        self.allowed = allowed;
        self
    }

    /// Set the offending token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Result of checking a value against a constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The value satisfies the constraint
    Satisfied,
    /// The value violates the constraint (never empty)
    Violated(Vec<Violation>),
}

impl Evaluation {
    /// Check if the value satisfied the constraint
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Evaluation::Satisfied)
    }

    /// Get the violations (empty when satisfied)
    pub fn violations(&self) -> &[Violation] {
        match self {
            Evaluation::Satisfied => &[],
            Evaluation::Violated(violations) => violations,
        }
    }

    fn single(violation: Violation) -> Self {
        Evaluation::Violated(vec![violation])
    }
}

/// Checks values against constraints
///
/// Token-set constraints need the schema table (for vocabularies) and the
/// host element; every other constraint is checked in isolation.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    table: &'a SchemaTable,
    token_case: TokenCase,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Create an evaluator with case-sensitive token matching
    pub fn new(table: &'a SchemaTable) -> Self {
        Self {
            table,
            token_case: TokenCase::Sensitive,
        }
    }

    /// Set the token comparison policy
    pub fn with_token_case(mut self, token_case: TokenCase) -> Self {
        self.token_case = token_case;
        self
    }

    /// Check `value` against `constraint` for an attribute on `host`
    pub fn evaluate(
        &self,
        constraint: &ValueConstraint,
        value: &AttributeValue,
        host: &str,
    ) -> Evaluation {
        let value = value.normalized_for(constraint);

        match constraint {
            ValueConstraint::FreeString => match value {
                AttributeValue::Bool(b) => {
                    Evaluation::single(Violation::mismatch(format!("expected a string, got {}", b)))
                }
                _ => Evaluation::Satisfied,
            },
            ValueConstraint::Boolean => match value {
                AttributeValue::Bool(_) => Evaluation::Satisfied,
                other => Evaluation::single(Violation::mismatch(format!(
                    "boolean attribute takes no value, got {}",
                    other
                ))),
            },
            ValueConstraint::BooleanishString => match value {
                AttributeValue::Bool(_) => Evaluation::Satisfied,
                AttributeValue::Text(ref text) if text == "true" || text == "false" => {
                    Evaluation::Satisfied
                }
                other => Evaluation::single(
                    Violation::mismatch(format!("expected \"true\" or \"false\", got {}", other))
                        .with_allowed(constraint.allowed_values()),
                ),
            },
            ValueConstraint::Enum(values) => match value.as_text() {
                Some(text) if values.iter().any(|v| v == text) => Evaluation::Satisfied,
                _ => Evaluation::single(
                    Violation::mismatch(format!(
                        "{} is not one of: {}",
                        value,
                        values.join(", ")
                    ))
                    .with_allowed(Some(values.clone())),
                ),
            },
            ValueConstraint::Number => match value.as_text().map(str::parse::<f64>) {
                Some(Ok(n)) if n.is_finite() => Evaluation::Satisfied,
                _ => Evaluation::single(Violation::mismatch(format!(
                    "{} is not a finite number",
                    value
                ))),
            },
            ValueConstraint::ClosedTokenSet(name) => self.evaluate_tokens(name, &value, host),
            ValueConstraint::Union(members) => {
                if members
                    .iter()
                    .any(|m| self.evaluate(m, &value, host).is_satisfied())
                {
                    Evaluation::Satisfied
                } else {
                    Evaluation::single(
                        Violation::mismatch(format!("{} does not match {}", value, constraint))
                            .with_allowed(constraint.allowed_values()),
                    )
                }
            }
        }
    }

    /// Recognized vocabulary entries in a token list, deduplicated, in order
    pub fn recognized_tokens(&self, vocabulary: &str, value: &AttributeValue) -> Vec<&'a LinkType> {
        let mut found: Vec<&'a LinkType> = Vec::new();
        let (Some(vocab), Some(text)) = (self.table.vocabulary(vocabulary), value.as_text()) else {
            return found;
        };

        for token in split_tokens(text) {
            if let Some(entry) = vocab.lookup(token, self.token_case) {
                if !found.iter().any(|e| e.token == entry.token) {
                    found.push(entry);
                }
            }
        }
        found
    }

    fn evaluate_tokens(&self, name: &str, value: &AttributeValue, host: &str) -> Evaluation {
        let Some(vocab) = self.table.vocabulary(name) else {
            return Evaluation::single(Violation::mismatch(format!(
                "no vocabulary named '{}'",
                name
            )));
        };
        let Some(text) = value.as_text() else {
            return Evaluation::single(Violation::mismatch(format!(
                "expected a space-separated token list, got {}",
                value
            )));
        };

        let host = normalize_name(host);
        let mut seen: Vec<String> = Vec::new();
        let mut violations = Vec::new();

        for token in split_tokens(text) {
            let key = self.dedup_key(vocab, token);
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            if let Some(violation) = self.check_token(vocab, name, token, &host) {
                violations.push(violation);
            }
        }

        if violations.is_empty() {
            Evaluation::Satisfied
        } else {
            Evaluation::Violated(violations)
        }
    }

    /// Tokens with the same key are one token under the comparison policy
    fn dedup_key(&self, vocab: &LinkTypeVocabulary, token: &str) -> String {
        match (vocab.lookup(token, self.token_case), self.token_case) {
            (Some(entry), _) => entry.token.clone(),
            (None, TokenCase::AsciiInsensitive) => token.to_ascii_lowercase(),
            (None, TokenCase::Sensitive) => token.to_string(),
        }
    }

    fn check_token(
        &self,
        vocab: &LinkTypeVocabulary,
        name: &str,
        token: &str,
        host: &str,
    ) -> Option<Violation> {
        match vocab.lookup(token, self.token_case) {
            None => Some(Violation {
                kind: ViolationKind::UnknownToken,
                reason: format!("unrecognized token \"{}\" in vocabulary '{}'", token, name),
                allowed: Some(vocab.tokens_for_host(host)),
                token: Some(token.to_string()),
            }),
            Some(entry) if !entry.allows_host(host) => Some(Violation {
                kind: ViolationKind::HostMismatch,
                reason: format!(
                    "\"{}\" is not allowed on <{}>; allowed on: {}",
                    token,
                    host,
                    entry.hosts_display()
                ),
                allowed: Some(entry.hosts.iter().cloned().collect()),
                token: Some(token.to_string()),
            }),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::link_types::LINK_TYPES;

    fn text(s: &str) -> AttributeValue {
        AttributeValue::from(s)
    }

    #[test]
    fn test_free_string() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);

        assert!(eval.evaluate(&ValueConstraint::FreeString, &text(""), "abbr").is_satisfied());
        assert!(eval.evaluate(&ValueConstraint::FreeString, &text("anything at all"), "abbr").is_satisfied());
        assert!(!eval.evaluate(&ValueConstraint::FreeString, &true.into(), "abbr").is_satisfied());
    }

    #[test]
    fn test_boolean() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::Boolean;

        assert!(eval.evaluate(&c, &true.into(), "input").is_satisfied());
        assert!(eval.evaluate(&c, &false.into(), "input").is_satisfied());
        assert!(eval.evaluate(&c, &AttributeValue::Absent, "input").is_satisfied());
        assert!(eval.evaluate(&c, &text(""), "input").is_satisfied());
        assert!(!eval.evaluate(&c, &text("true"), "input").is_satisfied());
        assert!(!eval.evaluate(&c, &text("disabled"), "input").is_satisfied());
    }

    #[test]
    fn test_booleanish() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::BooleanishString;

        for ok in [true.into(), false.into(), text("true"), text("false")] {
            assert!(eval.evaluate(&c, &ok, "abbr").is_satisfied(), "{} should pass", ok);
        }
        for bad in [text("1"), text("yes"), text(""), text("True")] {
            let result = eval.evaluate(&c, &bad, "abbr");
            assert!(!result.is_satisfied(), "{} should fail", bad);
            assert_eq!(
                result.violations()[0].allowed,
                Some(vec!["true".to_string(), "false".to_string()])
            );
        }
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::enumeration(&["circle", "default", "poly", "rect"]);

        assert!(eval.evaluate(&c, &text("rect"), "area").is_satisfied());

        let result = eval.evaluate(&c, &text("Rect"), "area");
        let violations = result.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Mismatch);
        assert_eq!(violations[0].allowed.as_ref().map(Vec::len), Some(4));
        assert!(violations[0].reason.contains("\"Rect\""));
    }

    #[test]
    fn test_number() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::Number;

        assert!(eval.evaluate(&c, &text("0"), "abbr").is_satisfied());
        assert!(eval.evaluate(&c, &text("-1"), "abbr").is_satisfied());
        assert!(eval.evaluate(&c, &text("2.5"), "abbr").is_satisfied());
        assert!(!eval.evaluate(&c, &text("abc"), "abbr").is_satisfied());
        assert!(!eval.evaluate(&c, &text(""), "abbr").is_satisfied());
        assert!(!eval.evaluate(&c, &text("inf"), "abbr").is_satisfied());
        assert!(!eval.evaluate(&c, &text("NaN"), "abbr").is_satisfied());
        assert!(!eval.evaluate(&c, &true.into(), "abbr").is_satisfied());
    }

    #[test]
    fn test_union() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::Union(vec![
            ValueConstraint::BooleanishString,
            ValueConstraint::enumeration(&["inherit"]),
        ]);

        assert!(eval.evaluate(&c, &text("inherit"), "abbr").is_satisfied());
        assert!(eval.evaluate(&c, &text("true"), "abbr").is_satisfied());
        assert!(eval.evaluate(&c, &false.into(), "abbr").is_satisfied());

        let result = eval.evaluate(&c, &text("plaintext"), "abbr");
        assert_eq!(
            result.violations()[0].allowed,
            Some(vec!["true".to_string(), "false".to_string(), "inherit".to_string()])
        );
    }

    #[test]
    fn test_tokens_one_violation_per_offending_token() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::ClosedTokenSet(LINK_TYPES.to_string());

        let result = eval.evaluate(&c, &text("stylesheet nofollow bogus nofollow"), "link");
        let violations = result.violations();
        assert_eq!(violations.len(), 2);

        assert_eq!(violations[0].kind, ViolationKind::HostMismatch);
        assert_eq!(violations[0].token.as_deref(), Some("nofollow"));
        assert_eq!(
            violations[0].allowed,
            Some(vec!["a".to_string(), "area".to_string(), "form".to_string()])
        );

        assert_eq!(violations[1].kind, ViolationKind::UnknownToken);
        assert_eq!(violations[1].token.as_deref(), Some("bogus"));
        assert!(violations[1]
            .allowed
            .as_ref()
            .unwrap()
            .contains(&"stylesheet".to_string()));
    }

    #[test]
    fn test_tokens_empty_and_duplicates() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::ClosedTokenSet(LINK_TYPES.to_string());

        assert!(eval.evaluate(&c, &text(""), "a").is_satisfied());
        assert!(eval.evaluate(&c, &AttributeValue::Absent, "a").is_satisfied());
        assert!(eval.evaluate(&c, &text("noopener noopener  noreferrer"), "a").is_satisfied());
    }

    #[test]
    fn test_tokens_case_policy() {
        let table = SchemaTable::html().unwrap();
        let c = ValueConstraint::ClosedTokenSet(LINK_TYPES.to_string());

        let sensitive = ConstraintEvaluator::new(&table);
        assert!(!sensitive.evaluate(&c, &text("StyleSheet"), "link").is_satisfied());

        let insensitive = sensitive.with_token_case(TokenCase::AsciiInsensitive);
        assert!(insensitive.evaluate(&c, &text("StyleSheet"), "link").is_satisfied());
    }

    #[test]
    fn test_tokens_unknown_vocabulary() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);
        let c = ValueConstraint::ClosedTokenSet("no-such-vocabulary".to_string());

        assert!(!eval.evaluate(&c, &text("x"), "a").is_satisfied());
    }

    #[test]
    fn test_recognized_tokens() {
        let table = SchemaTable::html().unwrap();
        let eval = ConstraintEvaluator::new(&table);

        let found = eval.recognized_tokens(LINK_TYPES, &text("archives bogus archives up"));
        let tokens: Vec<_> = found.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, vec!["archives", "up"]);
        assert!(found.iter().all(|e| e.deprecated));
    }

    #[test]
    fn test_normalization() {
        let boolean = ValueConstraint::Boolean;
        let string = ValueConstraint::FreeString;

        assert_eq!(AttributeValue::Absent.normalized_for(&boolean), AttributeValue::Bool(true));
        assert_eq!(text("").normalized_for(&boolean), AttributeValue::Bool(true));
        assert_eq!(AttributeValue::Absent.normalized_for(&string), text(""));
        assert_eq!(text("").normalized_for(&string), text(""));
        assert_eq!(text("x").normalized_for(&boolean), text("x"));

        let any = ValueConstraint::Union(vec![ValueConstraint::Boolean, ValueConstraint::FreeString]);
        assert_eq!(AttributeValue::Absent.normalized_for(&any), AttributeValue::Bool(true));
        assert_eq!(text("").normalized_for(&any), text(""));
    }

    #[test]
    fn test_tokens_dedup_follows_case_policy() {
        let table = SchemaTable::html().unwrap();
        let c = ValueConstraint::ClosedTokenSet(LINK_TYPES.to_string());
        let insensitive = ConstraintEvaluator::new(&table).with_token_case(TokenCase::AsciiInsensitive);

        let result = insensitive.evaluate(&c, &text("NoFollow nofollow"), "link");
        assert_eq!(result.violations().len(), 1);
        assert_eq!(result.violations()[0].kind, ViolationKind::HostMismatch);

        let result = insensitive.evaluate(&c, &text("Bogus bogus BOGUS"), "a");
        assert_eq!(result.violations().len(), 1);

        let sensitive = ConstraintEvaluator::new(&table);
        let result = sensitive.evaluate(&c, &text("Bogus bogus"), "a");
        assert_eq!(result.violations().len(), 2);
    }

    #[test]
    fn test_constraint_display() {
        assert_eq!(ValueConstraint::enumeration(&["yes", "no"]).to_string(), "enum(yes | no)");
        assert_eq!(ValueConstraint::ClosedTokenSet(LINK_TYPES.into()).to_string(), "tokens(link-types)");
        assert_eq!(ValueConstraint::Number.to_string(), "number");
    }
}
