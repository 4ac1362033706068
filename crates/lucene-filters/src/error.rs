//! Error types for filter conversion and field registries.

use std::fmt;
use std::io;
use std::path::PathBuf;

use lucene_ast::Operator;
use thiserror::Error;

use crate::field::FieldType;
use crate::operator::PositiveOperator;

/// Result type for query-to-filter conversion.
pub type DeserializeResult<T> = Result<T, Rejection>;

/// Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type for registry construction and loading.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A query that cannot be represented as a list of typed filters.
///
/// Every variant means the same thing to a caller: the query is outside the
/// supported subset and should be edited as raw text. The variant only says
/// which construct triggered the rejection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejection {
    /// A term carries a modifier that has no typed equivalent.
    #[error("term on field '{field}' uses unsupported {modifier}")]
    UnsupportedModifier {
        /// Field of the offending term.
        field: String,
        /// The modifier found.
        modifier: Modifier,
    },

    /// The field name is not in the registry.
    #[error("unknown field '{name}'")]
    UnknownField {
        /// The field name as written in the query.
        name: String,
    },

    /// A range was given for a field that does not hold ranges.
    #[error("field '{field}' does not accept a range")]
    UnexpectedRange {
        /// The field name.
        field: String,
    },

    /// A single term was given for a range field.
    #[error("field '{field}' expects a range")]
    MissingRange {
        /// The field name.
        field: String,
    },

    /// Text that should be numeric is not.
    #[error("'{text}' is not a valid {field_type} for field '{field}'")]
    InvalidNumber {
        /// The field name.
        field: String,
        /// The field type the text was parsed as.
        field_type: FieldType,
        /// The offending text.
        text: String,
    },

    /// Text for a boolean field is neither `true` nor `false`.
    #[error("'{text}' is not a boolean for field '{field}'")]
    InvalidBoolean {
        /// The field name.
        field: String,
        /// The offending text.
        text: String,
    },

    /// The query joins filters with an operator other than the requested one
    /// or its negation.
    #[error("operator {found} cannot be used when filters are joined by {requested}")]
    UnsupportedOperator {
        /// The operator found in the query.
        found: Operator,
        /// The operator filters were requested for.
        requested: PositiveOperator,
    },

    /// A parenthesized group is attached to a field that is not an enum.
    #[error("field '{field}' does not accept a parenthesized group")]
    GroupedNonEnumField {
        /// The field name.
        field: String,
    },

    /// A parenthesized enum group is not a plain `OR` chain of values.
    #[error("malformed enum group: {reason}")]
    MalformedEnumGroup {
        /// What is wrong with the group.
        reason: &'static str,
    },

    /// The query is nested deeper than the walker allows.
    #[error("query nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
    },
}

impl Rejection {
    pub(crate) fn unknown_field(name: impl Into<String>) -> Self {
        Rejection::UnknownField { name: name.into() }
    }

    pub(crate) fn malformed_enum_group(reason: &'static str) -> Self {
        Rejection::MalformedEnumGroup { reason }
    }
}

/// Term modifiers without a typed-filter equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `term^2`
    Boost,
    /// `+term` / `-term`
    Prefix,
    /// `/term/`
    Regex,
    /// `term~0.8`
    Similarity,
    /// `"a b"~2`
    Proximity,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modifier::Boost => "boost",
            Modifier::Prefix => "prefix operator",
            Modifier::Regex => "regular expression",
            Modifier::Similarity => "fuzzy similarity",
            Modifier::Proximity => "proximity",
        })
    }
}

/// Errors that can occur when building a [`Filter`](crate::Filter).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The value's shape does not match the field's declared type.
    #[error("field '{field}' is of type {expected}, got a {found} value")]
    ValueTypeMismatch {
        /// The field name.
        field: String,
        /// The declared field type.
        expected: FieldType,
        /// The kind of value supplied.
        found: &'static str,
    },

    /// A float value is NaN or infinite.
    #[error("field '{field}' requires finite numbers")]
    NonFiniteValue {
        /// The field name.
        field: String,
    },
}

/// Errors that can occur when building or loading a field registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors share a name.
    #[error("field '{name}' is defined more than once")]
    DuplicateField {
        /// The repeated name.
        name: String,
    },

    /// A descriptor's default value does not fit its type.
    #[error("invalid default value: {0}")]
    InvalidDefault(#[source] FilterError),

    /// I/O error while reading a registry file.
    #[error("failed to read field registry '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
