//! Error types for the query parser.

use thiserror::Error;

/// A specialized Result type for query parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while tokenizing or parsing a query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The query is empty.
    #[error("query is empty")]
    EmptyExpression,

    /// An unexpected token was encountered during parsing.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The unexpected token that was encountered.
        token: String,
        /// Byte offset of the token.
        position: usize,
    },

    /// An unexpected end of input was encountered.
    #[error("unexpected end of query")]
    UnexpectedEndOfInput,

    /// An opening parenthesis was never closed.
    #[error("unclosed parenthesis at position {position}")]
    UnclosedParenthesis {
        /// Byte offset of the opening parenthesis.
        position: usize,
    },

    /// A quoted term was never closed.
    #[error("unclosed quote at position {position}")]
    UnclosedQuote {
        /// Byte offset of the opening quote.
        position: usize,
    },

    /// A regular expression term was never closed.
    #[error("unclosed regular expression at position {position}")]
    UnclosedRegex {
        /// Byte offset of the opening slash.
        position: usize,
    },

    /// A range was malformed or never closed.
    #[error("malformed range at position {position}")]
    UnclosedRange {
        /// Byte offset of the opening bracket.
        position: usize,
    },

    /// A `~` or `^` modifier had an invalid argument.
    #[error("invalid modifier '{modifier}' at position {position}")]
    InvalidModifier {
        /// The modifier as written.
        modifier: String,
        /// Byte offset of the modifier.
        position: usize,
    },

    /// Parentheses were nested deeper than the parser allows.
    #[error("query nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The nesting limit.
        limit: usize,
    },
}

impl ParseError {
    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        ParseError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an invalid modifier error.
    pub fn invalid_modifier(modifier: impl Into<String>, position: usize) -> Self {
        ParseError::InvalidModifier {
            modifier: modifier.into(),
            position,
        }
    }
}
