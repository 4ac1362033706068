//! Serialize, print, parse and deserialize filters of every field type.

mod common;

use common::{enum_value, filter, positive, registry};
use lucene_filters::{deserialize, serialize, Filter, FilterValue, Polarity, PositiveOperator};

/// Prints a filter the way a UI writes it back into the query.
fn print(filter: &Filter) -> String {
    lucene_ast::print(&serialize(filter))
}

fn assert_roundtrip(filter: Filter) {
    let registry = registry();
    let query = print(&filter);

    let parsed = positive(&registry, &query)
        .unwrap_or_else(|rejection| panic!("{query} rejected: {rejection}"));
    assert_eq!(parsed, vec![filter.clone()], "query {query}");

    // The serializer output is also accepted without a trip through text.
    let direct = deserialize(
        &serialize(&filter),
        &registry,
        PositiveOperator::Implicit,
        Polarity::Positive,
    )
    .unwrap();
    assert_eq!(direct, vec![filter], "query {query}");
}

// ==================== Scalar Types ====================

#[test]
fn test_roundtrip_implicit_field() {
    let registry = registry();
    assert_roundtrip(filter(&registry, "<implicit>", FilterValue::String("test".to_string())));
}

#[test]
fn test_roundtrip_string() {
    let registry = registry();
    for value in [
        "hello",
        "good bye",
        "-hello",
        "+hello",
        "hello/world",
        "hello~world",
        "hello^world",
        "hello:world",
        "hell(o)",
        "h[ell]o",
        "h{ell}o",
        "say \"hi\"",
        "back\\slash",
        "AND",
        "",
    ] {
        assert_roundtrip(filter(&registry, "string-field", FilterValue::String(value.to_string())));
    }
}

#[test]
fn test_roundtrip_integer() {
    let registry = registry();
    for value in [0, 5, 123, -3] {
        assert_roundtrip(filter(&registry, "integer-field", FilterValue::Integer(value)));
    }
}

#[test]
fn test_roundtrip_float() {
    let registry = registry();
    for value in [0.0, 0.5, 0.25, -0.75, 12.0] {
        assert_roundtrip(filter(&registry, "float-field", FilterValue::Float(value)));
    }
}

#[test]
fn test_roundtrip_boolean() {
    let registry = registry();
    assert_roundtrip(filter(&registry, "boolean-field", FilterValue::Boolean(true)));
    assert_roundtrip(filter(&registry, "boolean-field", FilterValue::Boolean(false)));
}

#[test]
fn test_negative_number_is_quoted() {
    let registry = registry();
    let filter = filter(&registry, "integer-field", FilterValue::Integer(-3));
    assert_eq!(print(&filter), r#"integer-field:"-3""#);
}

// ==================== Ranges ====================

#[test]
fn test_roundtrip_integer_range() {
    let registry = registry();
    for (min, max) in [(2, 8), (-5, 5), (0, 0)] {
        assert_roundtrip(filter(
            &registry,
            "integer-range-field",
            FilterValue::IntegerRange(min, max),
        ));
    }
}

#[test]
fn test_roundtrip_float_range() {
    let registry = registry();
    assert_roundtrip(filter(
        &registry,
        "float-range-field",
        FilterValue::FloatRange(0.2, 0.6),
    ));
    assert_eq!(
        print(&filter(&registry, "float-range-field", FilterValue::FloatRange(0.2, 0.6))),
        "float-range-field:[0.2 TO 0.6]"
    );
}

// ==================== Enums ====================

#[test]
fn test_roundtrip_enum() {
    let registry = registry();
    for values in [
        vec!["red"],
        vec!["red", "green"],
        vec!["red", "black and white", "blue"],
        vec!["red", "green", "blue", "black and white"],
    ] {
        assert_roundtrip(filter(&registry, "enum-field", enum_value(&values)));
    }
}

#[test]
fn test_enum_prints_or_group() {
    let registry = registry();
    let filter = filter(&registry, "enum-field", enum_value(&["red", "black and white"]));
    assert_eq!(print(&filter), r#"enum-field:(red OR "black and white")"#);
}

#[test]
fn test_empty_enum_reads_back_as_empty_value() {
    let registry = registry();
    let empty = filter(&registry, "enum-field", enum_value(&[]));
    assert_eq!(print(&empty), r#"enum-field:"""#);

    let parsed = positive(&registry, &print(&empty)).unwrap();
    assert_eq!(parsed, vec![filter(&registry, "enum-field", enum_value(&[""]))]);
}

#[test]
fn test_enum_single_unparenthesized_value() {
    let registry = registry();
    assert_eq!(
        positive(&registry, "enum-field:red").unwrap(),
        vec![filter(&registry, "enum-field", enum_value(&["red"]))]
    );
}

#[test]
fn test_enum_values_outside_options_pass_through() {
    let registry = registry();
    let parsed = positive(&registry, "enum-field:(red OR purple)").unwrap();
    assert_eq!(parsed[0].value(), &enum_value(&["red", "purple"]));

    let FilterValue::Enum(values) = parsed[0].value() else {
        panic!("expected enum value");
    };
    assert_eq!(parsed[0].field().unknown_options(values), vec!["purple"]);
}

// ==================== Compound Queries ====================

#[test]
fn test_compound_query_equals_its_parts() {
    let registry = registry();
    let parts = [
        "test",
        "string-field:hello",
        r#""hello world""#,
        r#"string-field:"good bye""#,
        "enum-field:red",
        r#"enum-field:(red OR "black and white")"#,
        "float-range-field:[0.2 TO 0.6]",
    ];

    let expected: Vec<Filter> = parts
        .iter()
        .flat_map(|part| positive(&registry, part).unwrap())
        .collect();
    assert_eq!(expected.len(), parts.len());

    let compound = positive(&registry, &parts.join(" ")).unwrap();
    assert_eq!(compound, expected);
}

#[test]
fn test_long_enum_roundtrip() {
    let registry = registry();
    let values: Vec<String> = (0..100_000).map(|i| format!("v{i}")).collect();
    let long = filter(&registry, "enum-field", FilterValue::Enum(values));

    let query = print(&long);
    assert!(query.starts_with("enum-field:(v0 OR v1 OR "));
    assert!(query.ends_with(" OR v99999)"));

    let parsed = positive(&registry, &query).unwrap();
    assert_eq!(parsed, vec![long]);
}
