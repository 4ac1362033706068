//! Lucene query syntax tree, parser and printer.
//!
//! This crate turns Lucene-style query text into a syntax tree and back.
//!
//! # Supported Syntax
//!
//! ## Terms
//! - `word`, `"quoted phrase"`, `/regex/`
//! - `field:term` - a term on a named field
//! - `+term`, `-term` - required/prohibited prefix
//!
//! ## Modifiers
//! - `term~`, `term~0.8` - fuzzy similarity
//! - `"a phrase"~2` - proximity
//! - `term^4` - boost
//!
//! ## Ranges
//! - `field:[1 TO 5]`, `field:{1 TO 5}` and the mixed forms
//!
//! ## Boolean Operators
//! - `AND` / `&&`, `OR` / `||`, `NOT`, `AND NOT`, `OR NOT`
//! - whitespace between operands (the implicit operator)
//! - `()` - grouping, `field:( ... )` - a group attached to a field
//!
//! # Example
//!
//! ```
//! use lucene_ast::{parse, Node};
//!
//! let node = parse("color:(red OR blue) AND size:[1 TO 5]").unwrap();
//! assert!(matches!(node, Node::Binary(_)));
//! assert_eq!(node.to_string(), "color:(red OR blue) AND size:[1 TO 5]");
//! ```

mod ast;
mod error;
mod lexer;
mod parser;
mod printer;

pub use ast::{
    BinaryGroup, Inclusive, LeftOnlyGroup, Node, Operator, Prefix, RangedTerm, Term,
    IMPLICIT_FIELD,
};
pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, PositionedToken, Token};
pub use parser::{QueryParser, MAX_NESTING_DEPTH};

/// Parses query text into a syntax tree.
///
/// Shorthand for [`QueryParser::parse`].
pub fn parse(input: &str) -> ParseResult<Node> {
    QueryParser::parse(input)
}

/// Prints a syntax tree back to query text.
pub fn print(node: &Node) -> String {
    node.to_string()
}
