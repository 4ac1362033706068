//! Abstract Syntax Tree (AST) for Lucene query expressions.

use std::fmt;
use std::mem;

/// Field name used for terms written without an explicit `field:` prefix.
pub const IMPLICIT_FIELD: &str = "<implicit>";

/// A node of a parsed query.
///
/// The tree is a closed union of leaves ([`Term`], [`RangedTerm`]) and groups
/// ([`LeftOnlyGroup`], [`BinaryGroup`]). Each variant carries exactly the
/// fields that are valid for its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single term, e.g. `field:value` or `"quoted value"`.
    Term(Term),

    /// A range, e.g. `field:[1 TO 5]`.
    RangedTerm(RangedTerm),

    /// A group with only a left operand, e.g. `(a)` or `NOT a`.
    LeftOnly(LeftOnlyGroup),

    /// A group joining two operands with an operator, e.g. `a AND b`.
    Binary(BinaryGroup),
}

impl Node {
    /// Wraps a node in a bare left-only group.
    pub fn left_only(left: Node) -> Self {
        Node::LeftOnly(LeftOnlyGroup {
            field: None,
            left: Box::new(left),
            parenthesized: false,
            start_not: false,
        })
    }

    /// Joins two nodes with an operator.
    pub fn binary(left: Node, operator: Operator, right: Node) -> Self {
        Node::Binary(BinaryGroup {
            field: None,
            left: Box::new(left),
            operator,
            right: Box::new(right),
            parenthesized: false,
            start_not: false,
        })
    }

    /// Returns the field the node is attached to, if any.
    ///
    /// Leaves always have a field (possibly [`IMPLICIT_FIELD`]); groups only
    /// when written as `field:( ... )`.
    pub fn field(&self) -> Option<&str> {
        match self {
            Node::Term(term) => Some(&term.field),
            Node::RangedTerm(range) => Some(&range.field),
            Node::LeftOnly(group) => group.field.as_deref(),
            Node::Binary(group) => group.field.as_deref(),
        }
    }

    /// Returns true for term and ranged-term nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Term(_) | Node::RangedTerm(_))
    }

    /// Attaches a field to a group, or replaces the field of a leaf.
    pub(crate) fn set_field(&mut self, field: String) {
        match self {
            Node::Term(term) => term.field = field,
            Node::RangedTerm(range) => range.field = field,
            Node::LeftOnly(group) => group.field = Some(field),
            Node::Binary(group) => group.field = Some(field),
        }
    }

    /// Marks a group as written in parentheses. Leaves are wrapped first.
    pub(crate) fn into_parenthesized(self) -> Node {
        match self {
            Node::LeftOnly(mut group) => {
                group.parenthesized = true;
                Node::LeftOnly(group)
            }
            Node::Binary(mut group) => {
                group.parenthesized = true;
                Node::Binary(group)
            }
            leaf => Node::LeftOnly(LeftOnlyGroup {
                field: None,
                left: Box::new(leaf),
                parenthesized: true,
                start_not: false,
            }),
        }
    }
}

/// A term leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Field name, [`IMPLICIT_FIELD`] when none was written.
    pub field: String,
    /// The term text with quotes and escapes removed.
    pub term: String,
    /// Whether the term was written in double quotes.
    pub quoted: bool,
    /// Boost factor (`term^2`).
    pub boost: Option<f64>,
    /// Required/prohibited prefix (`+term`, `-term`).
    pub prefix: Option<Prefix>,
    /// Whether the term is a regular expression (`/term/`).
    pub regex: bool,
    /// Fuzzy similarity (`term~0.8`, `term~` means 0.5).
    pub similarity: Option<f64>,
    /// Phrase proximity (`"a b"~2`).
    pub proximity: Option<u32>,
}

impl Term {
    /// Creates an unquoted term without modifiers.
    pub fn new(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            term: term.into(),
            quoted: false,
            boost: None,
            prefix: None,
            regex: false,
            similarity: None,
            proximity: None,
        }
    }

    /// Creates an unquoted term on the implicit field.
    pub fn implicit(term: impl Into<String>) -> Self {
        Self::new(IMPLICIT_FIELD, term)
    }

    /// Sets whether the term is quoted.
    pub fn with_quoted(mut self, quoted: bool) -> Self {
        self.quoted = quoted;
        self
    }

    /// Returns true if the term carries any of boost, prefix, regex,
    /// similarity or proximity.
    pub fn has_modifiers(&self) -> bool {
        self.boost.is_some()
            || self.prefix.is_some()
            || self.regex
            || self.similarity.is_some()
            || self.proximity.is_some()
    }
}

/// The prefix operator of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `+term`
    Required,
    /// `-term`
    Prohibited,
}

impl Prefix {
    /// Returns the prefix character.
    pub fn as_char(self) -> char {
        match self {
            Prefix::Required => '+',
            Prefix::Prohibited => '-',
        }
    }
}

/// A range leaf, e.g. `field:[min TO max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangedTerm {
    /// Field name.
    pub field: String,
    /// Lower bound text.
    pub term_min: String,
    /// Upper bound text.
    pub term_max: String,
    /// Which bounds are inclusive.
    pub inclusive: Inclusive,
}

/// Bound inclusivity of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusive {
    /// `[min TO max]`
    Both,
    /// `[min TO max}`
    Left,
    /// `{min TO max]`
    Right,
    /// `{min TO max}`
    Neither,
}

impl Inclusive {
    pub(crate) fn from_brackets(open_inclusive: bool, close_inclusive: bool) -> Self {
        match (open_inclusive, close_inclusive) {
            (true, true) => Inclusive::Both,
            (true, false) => Inclusive::Left,
            (false, true) => Inclusive::Right,
            (false, false) => Inclusive::Neither,
        }
    }

    pub(crate) fn brackets(self) -> (char, char) {
        match self {
            Inclusive::Both => ('[', ']'),
            Inclusive::Left => ('[', '}'),
            Inclusive::Right => ('{', ']'),
            Inclusive::Neither => ('{', '}'),
        }
    }
}

/// A group with a single operand.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftOnlyGroup {
    /// Field the group is attached to (`field:(...)`).
    pub field: Option<String>,
    /// The operand.
    pub left: Box<Node>,
    /// Whether the group was written in parentheses.
    pub parenthesized: bool,
    /// Whether the expression opens with `NOT`.
    pub start_not: bool,
}

/// A group joining two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryGroup {
    /// Field the group is attached to (`field:(...)`).
    pub field: Option<String>,
    /// Left operand.
    pub left: Box<Node>,
    /// The joining operator.
    pub operator: Operator,
    /// Right operand.
    pub right: Box<Node>,
    /// Whether the group was written in parentheses.
    pub parenthesized: bool,
    /// Whether the expression opens with `NOT`.
    pub start_not: bool,
}

impl Drop for BinaryGroup {
    // Chains nest to the right, one link per operand. Unlink them in a loop
    // so dropping a long chain does not recurse once per operand.
    fn drop(&mut self) {
        let mut next = take_right(&mut self.right);
        while let Node::Binary(mut group) = next {
            next = take_right(&mut group.right);
        }
    }
}

fn take_right(right: &mut Node) -> Node {
    mem::replace(right, Node::Term(Term::new(String::new(), String::new())))
}

/// Boolean operators between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Two operands separated only by whitespace.
    Implicit,
    /// `AND` / `&&`
    And,
    /// `OR` / `||`
    Or,
    /// `NOT`
    Not,
    /// `AND NOT`
    AndNot,
    /// `OR NOT`
    OrNot,
}

impl Operator {
    /// Returns the canonical spelling of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Implicit => "<implicit>",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::AndNot => "AND NOT",
            Operator::OrNot => "OR NOT",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
