//! Filter values and their coercion from query text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DeserializeResult, FilterError, FilterResult, Rejection};
use crate::field::{FieldDescriptor, FieldType};

/// The value of a filter. Which variant is valid depends on the field type.
///
/// Deserializes from plain JSON/TOML values: `5`, `0.5`, `true`, `"text"`,
/// `[2, 8]`, `["red", "green"]`. Integers given for a float field are
/// widened when the filter is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    IntegerRange(i64, i64),
    FloatRange(f64, f64),
    Enum(Vec<String>),
}

impl FilterValue {
    /// Coerces a term's text to a value of the field's type.
    ///
    /// # Errors
    ///
    /// Rejects range fields (a term is not a range) and text that does not
    /// parse as the field's number or boolean type.
    ///
    /// ```
    /// use lucene_filters::{FieldDescriptor, FieldType, FilterValue};
    ///
    /// let flag = FieldDescriptor::new("flag", "Flag", FieldType::Boolean, FilterValue::Boolean(false));
    /// assert_eq!(FilterValue::from_term(&flag, "true"), Ok(FilterValue::Boolean(true)));
    /// assert!(FilterValue::from_term(&flag, "yes").is_err());
    /// ```
    pub fn from_term(field: &FieldDescriptor, text: &str) -> DeserializeResult<Self> {
        match field.field_type {
            FieldType::String => Ok(FilterValue::String(text.to_string())),
            FieldType::Integer => parse_integer(field, text).map(FilterValue::Integer),
            FieldType::Float => parse_float(field, text).map(FilterValue::Float),
            FieldType::Boolean => match text {
                "true" => Ok(FilterValue::Boolean(true)),
                "false" => Ok(FilterValue::Boolean(false)),
                _ => Err(Rejection::InvalidBoolean {
                    field: field.name.clone(),
                    text: text.to_string(),
                }),
            },
            FieldType::Enum => Ok(FilterValue::Enum(vec![text.to_string()])),
            FieldType::IntegerRange | FieldType::FloatRange => Err(Rejection::MissingRange {
                field: field.name.clone(),
            }),
        }
    }

    /// Coerces range bounds to a value of the field's range type.
    ///
    /// # Errors
    ///
    /// Rejects fields that are not ranges and bounds that are not numbers.
    pub fn from_range(field: &FieldDescriptor, min: &str, max: &str) -> DeserializeResult<Self> {
        match field.field_type {
            FieldType::IntegerRange => Ok(FilterValue::IntegerRange(
                parse_integer(field, min)?,
                parse_integer(field, max)?,
            )),
            FieldType::FloatRange => Ok(FilterValue::FloatRange(
                parse_float(field, min)?,
                parse_float(field, max)?,
            )),
            _ => Err(Rejection::UnexpectedRange {
                field: field.name.clone(),
            }),
        }
    }

    /// Returns the field type this value shape belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FilterValue::Boolean(_) => FieldType::Boolean,
            FilterValue::Integer(_) => FieldType::Integer,
            FilterValue::Float(_) => FieldType::Float,
            FilterValue::String(_) => FieldType::String,
            FilterValue::IntegerRange(..) => FieldType::IntegerRange,
            FilterValue::FloatRange(..) => FieldType::FloatRange,
            FilterValue::Enum(_) => FieldType::Enum,
        }
    }

    /// Returns true for a negative integer or float.
    pub fn is_negative(&self) -> bool {
        match *self {
            FilterValue::Integer(n) => n < 0,
            FilterValue::Float(n) => n < 0.0,
            _ => false,
        }
    }

    /// Checks the value against the field and widens integers given for
    /// float types.
    pub(crate) fn conform_to(self, field: &FieldDescriptor) -> FilterResult<Self> {
        let value = match (field.field_type, self) {
            (FieldType::Float, FilterValue::Integer(n)) => FilterValue::Float(n as f64),
            (FieldType::FloatRange, FilterValue::IntegerRange(min, max)) => {
                FilterValue::FloatRange(min as f64, max as f64)
            }
            (_, value) => value,
        };

        if value.field_type() != field.field_type {
            return Err(FilterError::ValueTypeMismatch {
                field: field.name.clone(),
                expected: field.field_type,
                found: value.field_type().as_str(),
            });
        }

        let finite = match value {
            FilterValue::Float(n) => n.is_finite(),
            FilterValue::FloatRange(min, max) => min.is_finite() && max.is_finite(),
            _ => true,
        };
        if !finite {
            return Err(FilterError::NonFiniteValue {
                field: field.name.clone(),
            });
        }

        Ok(value)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Boolean(b) => write!(f, "{b}"),
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::Float(n) => write!(f, "{n}"),
            FilterValue::String(s) => f.write_str(s),
            FilterValue::IntegerRange(min, max) => write!(f, "[{min} TO {max}]"),
            FilterValue::FloatRange(min, max) => write!(f, "[{min} TO {max}]"),
            FilterValue::Enum(values) => f.write_str(&values.join(", ")),
        }
    }
}

fn invalid_number(field: &FieldDescriptor, text: &str) -> Rejection {
    Rejection::InvalidNumber {
        field: field.name.clone(),
        field_type: field.field_type,
        text: text.to_string(),
    }
}

fn parse_integer(field: &FieldDescriptor, text: &str) -> DeserializeResult<i64> {
    text.parse().map_err(|_| invalid_number(field, text))
}

fn parse_float(field: &FieldDescriptor, text: &str) -> DeserializeResult<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid_number(field, text))
}
