//! Field descriptors: the static metadata behind every filter.

use std::fmt;

use indexmap::IndexMap;
use lucene_ast::IMPLICIT_FIELD;
use serde::{Deserialize, Serialize};

use crate::value::FilterValue;

/// The value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    IntegerRange,
    FloatRange,
    Boolean,
    Enum,
}

impl FieldType {
    /// Returns true for the two range types.
    pub fn is_range(self) -> bool {
        matches!(self, FieldType::IntegerRange | FieldType::FloatRange)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::IntegerRange => "integer-range",
            FieldType::FloatRange => "float-range",
            FieldType::Boolean => "boolean",
            FieldType::Enum => "enum",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Optional constraints of a field.
///
/// Numeric fields carry bounds, enum fields their options. Options map a key
/// (the text used in queries) to a display label and keep declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldConstraints {
    Numeric { min: f64, max: f64 },
    Options { options: IndexMap<String, String> },
}

/// Static metadata for one field.
///
/// # Example
///
/// ```
/// use lucene_filters::{FieldDescriptor, FieldType, FilterValue};
///
/// let size = FieldDescriptor::new("size", "Size", FieldType::Integer, FilterValue::Integer(5))
///     .with_bounds(0.0, 10.0);
/// assert_eq!(size.name, "size");
/// assert!(!size.is_implicit());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique name, as written before the `:` in queries.
    pub name: String,

    /// Label shown to users.
    #[serde(alias = "displayName")]
    pub display_name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Value of a freshly added filter on this field.
    #[serde(alias = "defaultValue")]
    pub default_value: FilterValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<FieldConstraints>,

    /// Whether an enum field offers completion of its options.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        field_type: FieldType,
        default_value: FilterValue,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            field_type,
            default_value,
            constraints: None,
            autocomplete: false,
        }
    }

    /// Creates the string field that unqualified terms belong to.
    pub fn implicit(display_name: impl Into<String>) -> Self {
        Self::new(
            IMPLICIT_FIELD,
            display_name,
            FieldType::String,
            FilterValue::String(String::new()),
        )
    }

    /// Sets numeric bounds.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.constraints = Some(FieldConstraints::Numeric { min, max });
        self
    }

    /// Sets enum options from `(key, label)` pairs, keeping their order.
    pub fn with_options<K, L>(mut self, options: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        let options = options
            .into_iter()
            .map(|(key, label)| (key.into(), label.into()))
            .collect();
        self.constraints = Some(FieldConstraints::Options { options });
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    /// Returns true for the field that unqualified terms belong to.
    pub fn is_implicit(&self) -> bool {
        self.name == IMPLICIT_FIELD
    }

    /// Returns the enum options, if any were declared.
    pub fn options(&self) -> Option<&IndexMap<String, String>> {
        match &self.constraints {
            Some(FieldConstraints::Options { options }) => Some(options),
            _ => None,
        }
    }

    /// Returns the numeric bounds, if any were declared.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.constraints {
            Some(FieldConstraints::Numeric { min, max }) => Some((min, max)),
            _ => None,
        }
    }

    /// Returns the values that are not among the declared options.
    ///
    /// Serialization and deserialization accept any enum value; callers that
    /// want to restrict values to the options check them here. A field
    /// without options reports nothing.
    pub fn unknown_options<'a>(&self, values: &'a [String]) -> Vec<&'a str> {
        let Some(options) = self.options() else {
            return Vec::new();
        };
        values
            .iter()
            .filter(|value| !options.contains_key(value.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> FieldDescriptor {
        FieldDescriptor::new(
            "color",
            "Color",
            FieldType::Enum,
            FilterValue::Enum(vec!["red".to_string()]),
        )
        .with_options([("red", "Red"), ("green", "Green"), ("blue", "Blue-ish")])
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::IntegerRange.to_string(), "integer-range");
        let parsed: FieldType = serde_json::from_str("\"float-range\"").unwrap();
        assert_eq!(parsed, FieldType::FloatRange);
        assert!(parsed.is_range());
        assert!(!FieldType::Enum.is_range());
        assert_eq!(format!("{:<8}|", FieldType::Enum), "enum    |");
    }

    #[test]
    fn test_options_keep_order() {
        let field = colors();
        let keys: Vec<&str> = field.options().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["red", "green", "blue"]);
    }

    #[test]
    fn test_unknown_options() {
        let field = colors();
        let values = vec!["red".to_string(), "purple".to_string()];
        assert_eq!(field.unknown_options(&values), vec!["purple"]);

        let plain = FieldDescriptor::implicit("Text");
        assert!(plain.unknown_options(&values).is_empty());
    }

    #[test]
    fn test_deserialize_descriptor_json() {
        let json = r#"{
            "name": "enum-field",
            "displayName": "Enum field",
            "type": "enum",
            "defaultValue": ["red"],
            "autocomplete": true,
            "constraints": { "options": { "red": "Red", "black and white": "Black and white" } }
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_type, FieldType::Enum);
        assert!(field.autocomplete);
        assert_eq!(field.default_value, FilterValue::Enum(vec!["red".to_string()]));
        assert_eq!(field.options().unwrap().len(), 2);
    }

    #[test]
    fn test_deserialize_numeric_constraints() {
        let json = r#"{
            "name": "n",
            "display_name": "N",
            "type": "integer",
            "default_value": 5,
            "constraints": { "min": 0, "max": 10 }
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(field.bounds(), Some((0.0, 10.0)));
    }
}
