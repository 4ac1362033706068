//! Query printer: the inverse of the parser.

use std::fmt::{self, Write};

use crate::ast::{BinaryGroup, LeftOnlyGroup, Node, Operator, RangedTerm, Term, IMPLICIT_FIELD};
use crate::lexer::{is_delimiter, KEYWORDS};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Term(term) => fmt::Display::fmt(term, f),
            Node::RangedTerm(range) => fmt::Display::fmt(range, f),
            Node::LeftOnly(group) => fmt::Display::fmt(group, f),
            Node::Binary(group) => fmt::Display::fmt(group, f),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, Some(&self.field))?;
        if let Some(prefix) = self.prefix {
            f.write_char(prefix.as_char())?;
        }

        if self.regex {
            write!(f, "/{}/", self.term.replace('/', "\\/"))?;
        } else if self.quoted || self.term.is_empty() {
            write!(f, "\"{}\"", escape_quoted(&self.term))?;
        } else {
            f.write_str(&escape_unquoted(&self.term, self.prefix.is_none()))?;
        }

        if let Some(similarity) = self.similarity {
            write!(f, "~{similarity}")?;
        }
        if let Some(proximity) = self.proximity {
            write!(f, "~{proximity}")?;
        }
        if let Some(boost) = self.boost {
            write!(f, "^{boost}")?;
        }
        Ok(())
    }
}

impl fmt::Display for RangedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.inclusive.brackets();
        write_field(f, Some(&self.field))?;
        write!(
            f,
            "{open}{} TO {}{close}",
            escape_unquoted(&self.term_min, false),
            escape_unquoted(&self.term_max, false)
        )
    }
}

impl fmt::Display for LeftOnlyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `field:term` reads back the same without parentheses, anything
        // bigger does not.
        let parens = self.parenthesized
            || (has_named_field(self.field.as_deref()) && !self.left.is_leaf());
        write_group_open(f, self.field.as_deref(), self.start_not, parens)?;
        write_operand(f, &self.left)?;
        if parens {
            f.write_char(')')?;
        }
        Ok(())
    }
}

impl fmt::Display for BinaryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parens = self.parenthesized || has_named_field(self.field.as_deref());
        write_group_open(f, self.field.as_deref(), self.start_not, parens)?;

        // Walk the right spine in a loop; a bare link prints as a plain
        // continuation of this chain.
        let mut group = self;
        loop {
            write_operand(f, &group.left)?;
            match group.operator {
                Operator::Implicit => f.write_char(' ')?,
                operator => write!(f, " {operator} ")?,
            }
            match &*group.right {
                Node::Binary(next)
                    if !next.parenthesized
                        && !next.start_not
                        && !has_named_field(next.field.as_deref()) =>
                {
                    group = next;
                }
                right => {
                    fmt::Display::fmt(right, f)?;
                    break;
                }
            }
        }

        if parens {
            f.write_char(')')?;
        }
        Ok(())
    }
}

fn has_named_field(field: Option<&str>) -> bool {
    field.is_some_and(|name| name != IMPLICIT_FIELD)
}

fn write_field(f: &mut fmt::Formatter<'_>, field: Option<&str>) -> fmt::Result {
    match field {
        Some(name) if name != IMPLICIT_FIELD => write!(f, "{}:", escape_unquoted(name, true)),
        _ => Ok(()),
    }
}

fn write_group_open(
    f: &mut fmt::Formatter<'_>,
    field: Option<&str>,
    start_not: bool,
    parens: bool,
) -> fmt::Result {
    write_field(f, field)?;
    if start_not {
        f.write_str("NOT ")?;
    }
    if parens {
        f.write_char('(')?;
    }
    Ok(())
}

/// Writes the left operand of a group. A bare chain on the left would
/// re-associate when read back, so it gets parentheses.
fn write_operand(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    let bare_group = match node {
        Node::Binary(group) => !group.parenthesized && !has_named_field(group.field.as_deref()),
        _ => false,
    };
    if bare_group {
        write!(f, "({node})")
    } else {
        fmt::Display::fmt(node, f)
    }
}

fn escape_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes everything the lexer would not read back as part of one bare
/// word: delimiters, backslashes, a leading prefix or slash, and words that
/// would lex as keywords.
fn escape_unquoted(text: &str, escape_leading: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        let leading = i == 0
            && (KEYWORDS.contains(&text)
                || (escape_leading && matches!(c, '+' | '-' | '/')));
        if is_delimiter(c) || c == '\\' || leading {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
