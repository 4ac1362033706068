//! Filter to syntax tree conversion.

use lucene_ast::{BinaryGroup, Inclusive, LeftOnlyGroup, Node, Operator, RangedTerm, Term};

use crate::filter::Filter;
use crate::quoting::needs_quoting;
use crate::value::FilterValue;

/// Converts a filter to a query fragment.
///
/// Ranges become an inclusive ranged term and enums a parenthesized `OR`
/// chain on the field (`field:(a OR b)`); an empty enum becomes `field:""`.
/// Everything else is a single term, quoted when its text would not read
/// back as one term. Negative numbers are always quoted so the `-` is not
/// taken for a prefix.
///
/// The output never carries modifiers, so [`deserialize`](crate::deserialize)
/// accepts it back.
///
/// ```
/// use std::sync::Arc;
/// use lucene_filters::{serialize, FieldDescriptor, FieldType, Filter, FilterValue};
///
/// let field = Arc::new(FieldDescriptor::new("size", "Size", FieldType::Integer, FilterValue::Integer(0)));
/// let filter = Filter::new(field, FilterValue::Integer(-3)).unwrap();
/// assert_eq!(lucene_ast::print(&serialize(&filter)), r#"size:"-3""#);
/// ```
pub fn serialize(filter: &Filter) -> Node {
    let name = filter.field().name.clone();

    match filter.value() {
        FilterValue::IntegerRange(min, max) => ranged_term(name, min.to_string(), max.to_string()),
        FilterValue::FloatRange(min, max) => ranged_term(name, min.to_string(), max.to_string()),
        FilterValue::Enum(values) => enum_group(name, values),
        scalar => {
            let text = scalar.to_string();
            let quoted = needs_quoting(&text) || text.is_empty() || scalar.is_negative();
            Node::Term(Term::new(name, text).with_quoted(quoted))
        }
    }
}

fn ranged_term(field: String, term_min: String, term_max: String) -> Node {
    Node::RangedTerm(RangedTerm {
        field,
        term_min,
        term_max,
        inclusive: Inclusive::Both,
    })
}

fn enum_term(value: &str) -> Node {
    let quoted = needs_quoting(value) || value.is_empty();
    Node::Term(Term::implicit(value).with_quoted(quoted))
}

/// Builds `field:(v1 OR v2 OR ...)` as a right-leaning chain whose innermost
/// link is a one-term group.
fn enum_group(field: String, values: &[String]) -> Node {
    let Some((first, rest)) = values.split_first() else {
        return Node::LeftOnly(LeftOnlyGroup {
            field: Some(field),
            left: Box::new(enum_term("")),
            parenthesized: false,
            start_not: false,
        });
    };

    // Build the tail from the back, then hang it off the root.
    let mut tail: Option<Node> = None;
    for value in rest.iter().rev() {
        tail = Some(match tail {
            None => Node::left_only(enum_term(value)),
            Some(right) => Node::binary(enum_term(value), Operator::Or, right),
        });
    }

    match tail {
        None => Node::LeftOnly(LeftOnlyGroup {
            field: Some(field),
            left: Box::new(enum_term(first)),
            parenthesized: true,
            start_not: false,
        }),
        Some(right) => Node::Binary(BinaryGroup {
            field: Some(field),
            left: Box::new(enum_term(first)),
            operator: Operator::Or,
            right: Box::new(right),
            parenthesized: true,
            start_not: false,
        }),
    }
}
