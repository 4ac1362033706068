//! Shared field registry for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lucene_filters::{
    DeserializeResult, Deserializer, FieldDescriptor, FieldRegistry, FieldType, Filter,
    FilterValue, Polarity, PositiveOperator,
};

/// One field of every type, plus the implicit field.
pub fn registry() -> FieldRegistry {
    FieldRegistry::new(vec![
        FieldDescriptor::new(
            "<implicit>",
            "Implicit field",
            FieldType::String,
            FilterValue::String("test".to_string()),
        ),
        FieldDescriptor::new(
            "string-field",
            "String field",
            FieldType::String,
            FilterValue::String("test".to_string()),
        ),
        FieldDescriptor::new(
            "integer-field",
            "Integer field",
            FieldType::Integer,
            FilterValue::Integer(5),
        )
        .with_bounds(0.0, 10.0),
        FieldDescriptor::new(
            "float-field",
            "Float field",
            FieldType::Float,
            FilterValue::Float(0.5),
        )
        .with_bounds(0.0, 1.0),
        FieldDescriptor::new(
            "integer-range-field",
            "Integer range field",
            FieldType::IntegerRange,
            FilterValue::IntegerRange(2, 8),
        )
        .with_bounds(0.0, 10.0),
        FieldDescriptor::new(
            "float-range-field",
            "Float range field",
            FieldType::FloatRange,
            FilterValue::FloatRange(0.2, 0.8),
        )
        .with_bounds(0.0, 1.0),
        FieldDescriptor::new(
            "boolean-field",
            "Boolean field",
            FieldType::Boolean,
            FilterValue::Boolean(false),
        ),
        FieldDescriptor::new(
            "enum-field",
            "Enum field",
            FieldType::Enum,
            FilterValue::Enum(vec!["red".to_string()]),
        )
        .with_autocomplete(true)
        .with_options([
            ("red", "Red"),
            ("green", "Green"),
            ("blue", "Blue-ish"),
            ("black and white", "Black and white"),
        ]),
    ])
    .expect("fixture registry is valid")
}

/// Builds a filter on a registry field.
pub fn filter(registry: &FieldRegistry, field: &str, value: FilterValue) -> Filter {
    let field = registry.get(field).expect("field exists");
    Filter::new(Arc::clone(field), value).expect("value fits field")
}

pub fn enum_value(values: &[&str]) -> FilterValue {
    FilterValue::Enum(values.iter().map(|v| v.to_string()).collect())
}

/// Parses `query` and extracts filters at the given operator and polarity.
pub fn filters(
    registry: &FieldRegistry,
    query: &str,
    operator: PositiveOperator,
    polarity: Polarity,
) -> DeserializeResult<Vec<Filter>> {
    let node = lucene_ast::parse(query).expect("query parses");
    Deserializer::new(registry)
        .operator(operator)
        .polarity(polarity)
        .deserialize(&node)
}

/// Positive filters joined by whitespace.
pub fn positive(registry: &FieldRegistry, query: &str) -> DeserializeResult<Vec<Filter>> {
    filters(registry, query, PositiveOperator::Implicit, Polarity::Positive)
}

/// Negative filters joined by whitespace.
pub fn negative(registry: &FieldRegistry, query: &str) -> DeserializeResult<Vec<Filter>> {
    filters(registry, query, PositiveOperator::Implicit, Polarity::Negative)
}
