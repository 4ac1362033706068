use lucene_ast::{Node, Operator, IMPLICIT_FIELD};

use crate::error::{DeserializeResult, Rejection};

/// Extracts the values of a parenthesized enum group such as
/// `field:(red OR "black and white" OR blue)`.
///
/// Every value must be a plain term without a field of its own, and values
/// must be joined by `OR`. Nested groups continuing the chain are followed,
/// so `(a OR (b OR c))` reads as `[a, b, c]`.
///
/// # Errors
///
/// Rejects the group with `Rejection::MalformedEnumGroup` when any value is
/// not a plain term, an operator other than `OR` appears, or a group in the
/// chain opens with `NOT` or names another field.
///
/// ```
/// use lucene_ast::Node;
/// use lucene_filters::extract_enum_terms;
///
/// let Node::LeftOnly(top) = lucene_ast::parse("color:(red OR blue)").unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(extract_enum_terms(&top.left).unwrap(), vec!["red", "blue"]);
/// ```
pub fn extract_enum_terms(group: &Node) -> DeserializeResult<Vec<String>> {
    let mut terms = Vec::new();
    let mut node = group;

    loop {
        let (left, rest) = match node {
            Node::LeftOnly(group) if !group.start_not => (&*group.left, None),
            Node::Binary(group) if !group.start_not => {
                (&*group.left, Some((group.operator, &*group.right)))
            }
            Node::LeftOnly(_) | Node::Binary(_) => {
                return Err(Rejection::malformed_enum_group("negated values"));
            }
            Node::Term(_) | Node::RangedTerm(_) => {
                return Err(Rejection::malformed_enum_group("expected a group"));
            }
        };
        terms.push(enum_value(left)?);

        let Some((operator, right)) = rest else {
            return Ok(terms);
        };
        if operator != Operator::Or {
            return Err(Rejection::malformed_enum_group("values must be joined by OR"));
        }

        match right {
            Node::Term(_) => {
                terms.push(enum_value(right)?);
                return Ok(terms);
            }
            Node::RangedTerm(_) => {
                return Err(Rejection::malformed_enum_group("ranges are not enum values"));
            }
            next => {
                if next.field().is_some_and(|field| field != IMPLICIT_FIELD) {
                    return Err(Rejection::malformed_enum_group("nested field group"));
                }
                node = next;
            }
        }
    }
}

fn enum_value(node: &Node) -> DeserializeResult<String> {
    match node {
        Node::Term(term) if term.field == IMPLICIT_FIELD && !term.has_modifiers() => {
            Ok(term.term.clone())
        }
        Node::Term(_) => Err(Rejection::malformed_enum_group(
            "values must be plain terms without a field",
        )),
        _ => Err(Rejection::malformed_enum_group("values must be terms")),
    }
}
