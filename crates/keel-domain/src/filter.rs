//! Filter AST
//!
//! Tagged-variant boolean predicate evaluated against live entity records.
//! Leaf nodes are null-safe: a test on an absent or null field is false,
//! never an error, so predicates built over sparse object graphs evaluate
//! without guarding at every step.

use crate::metadata::{FieldValue, Record};

/// Scalar literal for equality comparisons
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Text literal, compared case-sensitively
    Text(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Boolean filter expression over entity records
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring test on a text field; the stored term
    /// must already be lowercased. False when the field is null.
    Contains {
        /// Field name on the evaluated record
        field: &'static str,
        /// Lowercased search term
        term: String,
    },
    /// Scalar equality on a field; false when the field is null
    Equals {
        /// Field name on the evaluated record
        field: &'static str,
        /// Expected value
        value: Literal,
    },
    /// Descend into a single navigation; false when the reference is null
    Nav {
        /// Navigation field name
        field: &'static str,
        /// Predicate applied to the navigation target
        inner: Box<Filter>,
    },
    /// True when any element of a collection navigation matches; false for
    /// a null or empty collection
    AnyOf {
        /// Collection field name
        field: &'static str,
        /// Predicate applied to each element
        inner: Box<Filter>,
    },
    /// All sub-filters must match; an empty conjunction matches everything
    And(Vec<Filter>),
    /// Any sub-filter must match; an empty disjunction matches nothing
    Or(Vec<Filter>),
    /// Negation
    Not(Box<Filter>),
    /// Matches no record
    MatchNone,
}

impl Filter {
    /// Build a contains node, lowercasing the term once up front
    pub fn contains<S: AsRef<str>>(field: &'static str, term: S) -> Self {
        Self::Contains {
            field,
            term: term.as_ref().to_lowercase(),
        }
    }

    /// Build an equality node
    pub fn equals<V: Into<Literal>>(field: &'static str, value: V) -> Self {
        Self::Equals {
            field,
            value: value.into(),
        }
    }

    /// Conjunction of `self` and `other`
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Disjunction of `self` and `other`
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut parts) => {
                parts.push(other);
                Self::Or(parts)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    /// OR with absent operands as identity: `None ∨ f = f`
    pub fn or_opt(left: Option<Self>, right: Option<Self>) -> Option<Self> {
        match (left, right) {
            (Some(l), Some(r)) => Some(l.or(r)),
            (Some(l), None) => Some(l),
            (None, r) => r,
        }
    }

    /// Evaluate against a record
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self {
            Self::Contains { field, term } => match record.field(field) {
                Some(FieldValue::Text(Some(value))) => value.to_lowercase().contains(term),
                _ => false,
            },
            Self::Equals { field, value } => match (record.field(field), value) {
                (Some(FieldValue::Text(Some(actual))), Literal::Text(expected)) => {
                    actual == expected
                }
                (Some(FieldValue::Int(Some(actual))), Literal::Int(expected)) => {
                    actual == *expected
                }
                (Some(FieldValue::Bool(Some(actual))), Literal::Bool(expected)) => {
                    actual == *expected
                }
                _ => false,
            },
            Self::Nav { field, inner } => match record.field(field) {
                Some(FieldValue::Entity(Some(target))) => inner.matches(target),
                _ => false,
            },
            Self::AnyOf { field, inner } => match record.field(field) {
                Some(FieldValue::Collection(Some(items))) => {
                    items.iter().any(|item| inner.matches(*item))
                }
                _ => false,
            },
            Self::And(parts) => parts.iter().all(|part| part.matches(record)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(record)),
            Self::Not(inner) => !inner.matches(record),
            Self::MatchNone => false,
        }
    }
}
