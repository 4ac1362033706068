//! Syntax tree to filter conversion.
//!
//! A query is read as a list of filters joined by one operator, where each
//! filter is either asserted or negated:
//!
//! ```text
//! string-field:a AND NOT integer-field:3 AND boolean-field:true
//! ```
//!
//! asks for `[string-field:a, boolean-field:true]` when filters joined by
//! `AND` are requested at positive polarity, and `[integer-field:3]` at
//! negative polarity. Anything outside that shape is rejected as a whole.

use std::sync::Arc;

use lucene_ast::{Node, Operator, RangedTerm, Term, MAX_NESTING_DEPTH};

use crate::enum_terms::extract_enum_terms;
use crate::error::{DeserializeResult, Modifier, Rejection};
use crate::field::{FieldDescriptor, FieldType};
use crate::filter::Filter;
use crate::operator::{Polarity, PositiveOperator};
use crate::registry::FieldRegistry;
use crate::value::FilterValue;

/// Whether the first filter a subtree produces belongs to the other polarity
/// and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjust {
    Keep,
    DropFirst,
}

impl Adjust {
    /// Adjustment of the first filter of a query, which is negated exactly
    /// when the query opens with `NOT`.
    fn leading(polarity: Polarity, start_not: bool) -> Self {
        if polarity.is_positive() == start_not {
            Adjust::DropFirst
        } else {
            Adjust::Keep
        }
    }
}

/// Extracts filters of one polarity joined by one operator from a query.
///
/// # Example
///
/// ```
/// use lucene_filters::{Deserializer, FieldDescriptor, FieldRegistry, Polarity};
///
/// let registry = FieldRegistry::new(vec![FieldDescriptor::implicit("Text")]).unwrap();
/// let node = lucene_ast::parse("hello NOT world").unwrap();
///
/// let deserializer = Deserializer::new(&registry);
/// assert_eq!(deserializer.deserialize(&node).unwrap().len(), 1);
///
/// let negated = deserializer.polarity(Polarity::Negative).deserialize(&node).unwrap();
/// assert_eq!(negated[0].value().to_string(), "world");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deserializer<'a> {
    registry: &'a FieldRegistry,
    operator: PositiveOperator,
    polarity: Polarity,
}

impl<'a> Deserializer<'a> {
    /// Creates a deserializer for positive filters joined by whitespace.
    pub fn new(registry: &'a FieldRegistry) -> Self {
        Self {
            registry,
            operator: PositiveOperator::default(),
            polarity: Polarity::default(),
        }
    }

    /// Sets the operator filters are joined by.
    pub fn operator(mut self, operator: PositiveOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Sets the polarity of the filters to extract.
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Extracts the filters, in source order.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] as soon as any part of the query has no typed
    /// equivalent. No partial result is produced.
    pub fn deserialize(&self, node: &Node) -> DeserializeResult<Vec<Filter>> {
        let mut filters = Vec::new();
        let result = match node {
            Node::LeftOnly(group) if group.field.is_none() => {
                let adjust = Adjust::leading(self.polarity, group.start_not);
                self.walk(&group.left, adjust, 0, &mut filters)
            }
            Node::Binary(group) if group.field.is_none() => {
                let adjust = Adjust::leading(self.polarity, group.start_not);
                self.walk(&group.left, adjust, 0, &mut filters)
                    .and_then(|()| self.walk_chain(node, 0, &mut filters))
            }
            // A bare leaf or field group has no leading NOT to account for.
            _ => self.walk(node, Adjust::Keep, 0, &mut filters),
        };

        match result {
            Ok(()) => Ok(filters),
            Err(rejection) => {
                tracing::debug!(
                    operator = %self.operator,
                    polarity = ?self.polarity,
                    %rejection,
                    "query rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Appends the filters of `node` to `out`, dropping the first one when
    /// `adjust` says so. `depth` counts the groups enclosing `node` below
    /// the top level.
    fn walk(
        &self,
        node: &Node,
        adjust: Adjust,
        depth: usize,
        out: &mut Vec<Filter>,
    ) -> DeserializeResult<()> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Rejection::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }

        let start = out.len();
        match node {
            Node::Term(term) => out.push(self.term_filter(term)?),
            Node::RangedTerm(range) => out.push(self.range_filter(range)?),
            Node::LeftOnly(group) => match &group.field {
                Some(field) => out.push(self.enum_filter(field, node)?),
                None => self.walk(&group.left, Adjust::Keep, depth + 1, out)?,
            },
            Node::Binary(group) => match &group.field {
                Some(field) => out.push(self.enum_filter(field, node)?),
                None => {
                    self.walk(&group.left, Adjust::Keep, depth + 1, out)?;
                    self.walk_chain(node, depth + 1, out)?;
                }
            },
        }

        if adjust == Adjust::DropFirst && out.len() > start {
            out.remove(start);
        }
        Ok(())
    }

    /// Walks the right-hand side of a binary chain whose left operand is
    /// already done. `a op b op c` chains are followed in a loop, with
    /// every operand at `depth`.
    ///
    /// The first filter of a chain always comes from its left operand, so
    /// the adjustment for a chain goes to that operand.
    fn walk_chain(
        &self,
        node: &Node,
        depth: usize,
        out: &mut Vec<Filter>,
    ) -> DeserializeResult<()> {
        let mut node = node;
        while let Node::Binary(group) = node {
            let adjust = self.operator_adjust(group.operator)?;
            match &*group.right {
                Node::Binary(next) if next.field.is_none() => {
                    self.walk(&next.left, adjust, depth, out)?;
                    node = &group.right;
                }
                right => {
                    self.walk(right, adjust, depth, out)?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Checks an operator of the query against the requested one. The
    /// operand after it is dropped when the operator negates it at the
    /// requested polarity or asserts it at the other one.
    fn operator_adjust(&self, found: Operator) -> DeserializeResult<Adjust> {
        let positive = self.polarity.is_positive();
        if found == Operator::from(self.operator) {
            Ok(if positive { Adjust::Keep } else { Adjust::DropFirst })
        } else if found == self.operator.negate() {
            Ok(if positive { Adjust::DropFirst } else { Adjust::Keep })
        } else {
            Err(Rejection::UnsupportedOperator {
                found,
                requested: self.operator,
            })
        }
    }

    fn field(&self, name: &str) -> DeserializeResult<&Arc<FieldDescriptor>> {
        self.registry
            .get(name)
            .ok_or_else(|| Rejection::unknown_field(name))
    }

    fn term_filter(&self, term: &Term) -> DeserializeResult<Filter> {
        reject_modifiers(term)?;
        let field = self.field(&term.field)?;
        let value = FilterValue::from_term(field, &term.term)?;
        Ok(Filter::coerced(Arc::clone(field), value))
    }

    fn range_filter(&self, range: &RangedTerm) -> DeserializeResult<Filter> {
        let field = self.field(&range.field)?;
        let value = FilterValue::from_range(field, &range.term_min, &range.term_max)?;
        Ok(Filter::coerced(Arc::clone(field), value))
    }

    fn enum_filter(&self, name: &str, group: &Node) -> DeserializeResult<Filter> {
        let field = self.field(name)?;
        if field.field_type != FieldType::Enum {
            return Err(Rejection::GroupedNonEnumField {
                field: name.to_string(),
            });
        }
        let terms = extract_enum_terms(group)?;
        Ok(Filter::coerced(Arc::clone(field), FilterValue::Enum(terms)))
    }
}

/// Rejects a term carrying any modifier without a typed equivalent.
fn reject_modifiers(term: &Term) -> DeserializeResult<()> {
    let modifier = if term.boost.is_some() {
        Modifier::Boost
    } else if term.prefix.is_some() {
        Modifier::Prefix
    } else if term.regex {
        Modifier::Regex
    } else if term.similarity.is_some() {
        Modifier::Similarity
    } else if term.proximity.is_some() {
        Modifier::Proximity
    } else {
        return Ok(());
    };

    Err(Rejection::UnsupportedModifier {
        field: term.field.clone(),
        modifier,
    })
}

/// Extracts filters of one polarity joined by one operator from a query.
///
/// Shorthand for configuring a [`Deserializer`].
pub fn deserialize(
    node: &Node,
    registry: &FieldRegistry,
    operator: PositiveOperator,
    polarity: Polarity,
) -> DeserializeResult<Vec<Filter>> {
    Deserializer::new(registry)
        .operator(operator)
        .polarity(polarity)
        .deserialize(node)
}

/// Extracts both the positive and the negative filters of a query.
///
/// Returns `(positive, negative)`.
pub fn split_by_polarity(
    node: &Node,
    registry: &FieldRegistry,
    operator: PositiveOperator,
) -> DeserializeResult<(Vec<Filter>, Vec<Filter>)> {
    let deserializer = Deserializer::new(registry).operator(operator);
    let positive = deserializer.polarity(Polarity::Positive).deserialize(node)?;
    let negative = deserializer.polarity(Polarity::Negative).deserialize(node)?;
    Ok((positive, negative))
}

#[cfg(test)]
mod tests {
    use lucene_ast::{BinaryGroup, LeftOnlyGroup, Prefix, IMPLICIT_FIELD};

    use super::*;

    fn registry() -> FieldRegistry {
        FieldRegistry::new(vec![
            FieldDescriptor::implicit("Text"),
            FieldDescriptor::new("n", "N", FieldType::Integer, FilterValue::Integer(0)),
            FieldDescriptor::new("e", "E", FieldType::Enum, FilterValue::Enum(vec![])),
        ])
        .unwrap()
    }

    fn term(text: &str) -> Node {
        Node::Term(Term::implicit(text))
    }

    fn values(filters: &[Filter]) -> Vec<String> {
        filters.iter().map(|f| f.value().to_string()).collect()
    }

    #[test]
    fn test_adjust_leading() {
        assert_eq!(Adjust::leading(Polarity::Positive, true), Adjust::DropFirst);
        assert_eq!(Adjust::leading(Polarity::Positive, false), Adjust::Keep);
        assert_eq!(Adjust::leading(Polarity::Negative, true), Adjust::Keep);
        assert_eq!(Adjust::leading(Polarity::Negative, false), Adjust::DropFirst);
    }

    #[test]
    fn test_bare_leaf() {
        let registry = registry();
        let filters = Deserializer::new(&registry).deserialize(&term("hello")).unwrap();
        assert_eq!(values(&filters), vec!["hello"]);
    }

    #[test]
    fn test_hand_built_chain() {
        let registry = registry();
        let node = Node::binary(
            term("a"),
            Operator::Not,
            Node::binary(term("b"), Operator::Implicit, term("c")),
        );
        let (positive, negative) =
            split_by_polarity(&node, &registry, PositiveOperator::Implicit).unwrap();
        assert_eq!(values(&positive), vec!["a", "c"]);
        assert_eq!(values(&negative), vec!["b"]);
    }

    #[test]
    fn test_inner_start_not_is_ignored() {
        // Only the top-level group's leading NOT shifts polarity.
        let registry = registry();
        let inner = Node::Binary(BinaryGroup {
            field: None,
            left: Box::new(term("a")),
            operator: Operator::Implicit,
            right: Box::new(term("b")),
            parenthesized: true,
            start_not: true,
        });
        let node = Node::left_only(inner);
        let filters = Deserializer::new(&registry).deserialize(&node).unwrap();
        assert_eq!(values(&filters), vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_prefix() {
        let registry = registry();
        let node = Node::Term(Term {
            prefix: Some(Prefix::Required),
            ..Term::implicit("a")
        });
        assert_eq!(
            Deserializer::new(&registry).deserialize(&node),
            Err(Rejection::UnsupportedModifier {
                field: IMPLICIT_FIELD.to_string(),
                modifier: Modifier::Prefix,
            })
        );
    }

    #[test]
    fn test_rejects_proximity() {
        let registry = registry();
        let node = Node::Term(Term {
            proximity: Some(2),
            ..Term::implicit("a b").with_quoted(true)
        });
        assert!(matches!(
            Deserializer::new(&registry).deserialize(&node),
            Err(Rejection::UnsupportedModifier {
                modifier: Modifier::Proximity,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_field_even_when_dropped() {
        let registry = registry();
        let node = Node::LeftOnly(LeftOnlyGroup {
            field: None,
            left: Box::new(Node::Term(Term::new("missing", "x"))),
            parenthesized: false,
            start_not: true,
        });
        assert_eq!(
            Deserializer::new(&registry).deserialize(&node),
            Err(Rejection::UnknownField {
                name: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_grouped_non_enum() {
        let registry = registry();
        let node = Node::LeftOnly(LeftOnlyGroup {
            field: Some("n".to_string()),
            left: Box::new(term("1")),
            parenthesized: true,
            start_not: false,
        });
        assert_eq!(
            Deserializer::new(&registry).deserialize(&node),
            Err(Rejection::GroupedNonEnumField {
                field: "n".to_string()
            })
        );
    }

    #[test]
    fn test_nesting_limit() {
        let registry = registry();
        let mut node = term("deep");
        // The top-level group does not count towards the limit.
        for _ in 0..MAX_NESTING_DEPTH + 2 {
            node = Node::left_only(node);
        }
        assert_eq!(
            Deserializer::new(&registry).deserialize(&node),
            Err(Rejection::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            })
        );
    }

    #[test]
    fn test_long_chain_is_not_limited() {
        let registry = registry();
        let count = 100_000;
        let mut node = term("last");
        for i in 0..count {
            node = Node::binary(term(&format!("t{i}")), Operator::Implicit, node);
        }
        let filters = Deserializer::new(&registry).deserialize(&node).unwrap();
        assert_eq!(filters.len(), count + 1);
        assert_eq!(filters[0].value(), &FilterValue::String("t0".to_string()));
    }
}
