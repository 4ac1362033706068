//! Recursive descent parser for Lucene query expressions.

use crate::ast::{Inclusive, LeftOnlyGroup, Node, Operator, RangedTerm, Term, IMPLICIT_FIELD};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, PositionedToken, Token};

/// Maximum depth of nested parentheses.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Similarity assumed for a bare `~` on an unquoted term.
const DEFAULT_SIMILARITY: f64 = 0.5;

/// Parser for Lucene query expressions.
///
/// # Grammar
///
/// ```text
/// query    ::= node EOF
/// node     ::= ["NOT"] group (operator? group)*
/// operator ::= "AND" | "OR" | "NOT" | "AND NOT" | "OR NOT"
/// group    ::= [name ":"] ( "(" node ")" | range | term )
/// range    ::= ("[" | "{") bound "TO" bound ("]" | "}")
/// term     ::= ["+" | "-"] (word | quoted | regex) ("~" [number] | "^" number)*
/// ```
///
/// Operator chains are right-recursive: `a AND b OR c` parses as
/// `a AND (b OR c)` without parentheses, and the last operand of a chain is
/// stored as the bare node rather than a one-element group. The top-level
/// result is always a group.
///
/// # Example
///
/// ```
/// use lucene_ast::{Node, QueryParser};
///
/// let node = QueryParser::parse("title:hello").unwrap();
/// assert!(matches!(node, Node::LeftOnly(_)));
///
/// let node = QueryParser::parse("a AND b").unwrap();
/// assert!(matches!(node, Node::Binary(_)));
/// ```
pub struct QueryParser {
    tokens: Vec<PositionedToken>,
    position: usize,
    depth: usize,
}

impl QueryParser {
    /// Parses a query string into its syntax tree.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyExpression` if the input is blank,
    /// `ParseError::UnexpectedToken` for tokens out of place, and the
    /// unclosed-construct variants for unbalanced quotes, parentheses and
    /// ranges.
    pub fn parse(input: &str) -> ParseResult<Node> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Self {
            tokens,
            position: 0,
            depth: 0,
        };
        let node = parser.parse_node()?;

        if let Some(remaining) = parser.peek_positioned() {
            return Err(ParseError::unexpected_token(
                remaining.token.to_string(),
                remaining.position,
            ));
        }

        Ok(node)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|pt| &pt.token)
    }

    fn peek_positioned(&self) -> Option<&PositionedToken> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<PositionedToken> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected token.
    fn check(&self, expected: &Token) -> bool {
        self.peek() == Some(expected)
    }

    /// Parses `["NOT"] group (operator? group)*` into a right-leaning chain.
    fn parse_node(&mut self) -> ParseResult<Node> {
        let start_not = self.check(&Token::Not);
        if start_not {
            self.advance();
        }

        let mut operands = vec![self.parse_group()?];
        let mut operators = Vec::new();
        while let Some(token) = self.peek() {
            if *token == Token::CloseParen {
                break;
            }
            operators.push(self.parse_operator());
            operands.push(self.parse_group()?);
        }

        // Fold from the right so the last operand stays a bare node.
        let mut chain = operands.pop().ok_or(ParseError::UnexpectedEndOfInput)?;
        for (left, operator) in operands.into_iter().zip(operators).rev() {
            chain = Node::binary(left, operator, chain);
        }

        Ok(match chain {
            Node::Binary(mut group) if group.field.is_none() && !group.parenthesized => {
                group.start_not = start_not;
                Node::Binary(group)
            }
            single => Node::LeftOnly(LeftOnlyGroup {
                field: None,
                left: Box::new(single),
                parenthesized: false,
                start_not,
            }),
        })
    }

    /// Consumes an explicit operator, or returns `Operator::Implicit`.
    fn parse_operator(&mut self) -> Operator {
        let operator = match self.peek() {
            Some(Token::And) => Operator::And,
            Some(Token::Or) => Operator::Or,
            Some(Token::Not) => {
                self.advance();
                return Operator::Not;
            }
            _ => return Operator::Implicit,
        };
        self.advance();

        if self.check(&Token::Not) {
            self.advance();
            return match operator {
                Operator::And => Operator::AndNot,
                _ => Operator::OrNot,
            };
        }
        operator
    }

    /// Parses a field-qualified or bare operand.
    fn parse_group(&mut self) -> ParseResult<Node> {
        let is_field = matches!(
            (self.peek(), self.tokens.get(self.position + 1).map(|pt| &pt.token)),
            (
                Some(Token::Term {
                    quoted: false,
                    prefix: None,
                    ..
                }),
                Some(Token::Colon)
            )
        );

        if is_field {
            let Some(PositionedToken {
                token: Token::Term { text: field, .. },
                ..
            }) = self.advance()
            else {
                return Err(ParseError::UnexpectedEndOfInput);
            };
            self.advance(); // consume ':'
            let mut node = self.parse_operand()?;
            node.set_field(field);
            return Ok(node);
        }

        self.parse_operand()
    }

    /// Parses a parenthesized node, a range or a term.
    fn parse_operand(&mut self) -> ParseResult<Node> {
        let positioned = self.advance().ok_or(ParseError::UnexpectedEndOfInput)?;
        let position = positioned.position;

        match positioned.token {
            Token::OpenParen => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(ParseError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                self.depth += 1;
                let inner = self.parse_node()?;
                self.depth -= 1;

                if !self.check(&Token::CloseParen) {
                    return Err(ParseError::UnclosedParenthesis { position });
                }
                self.advance(); // consume ')'
                Ok(inner.into_parenthesized())
            }

            Token::OpenBracket => self.parse_range(true, position),
            Token::OpenBrace => self.parse_range(false, position),

            Token::Term {
                text,
                quoted,
                prefix,
            } => {
                let term = Term {
                    quoted,
                    prefix,
                    ..Term::new(IMPLICIT_FIELD, text)
                };
                self.parse_modifiers(term)
            }

            Token::Regex { text, prefix } => {
                let term = Term {
                    regex: true,
                    prefix,
                    ..Term::new(IMPLICIT_FIELD, text)
                };
                self.parse_modifiers(term)
            }

            other => Err(ParseError::unexpected_token(other.to_string(), position)),
        }
    }

    /// Parses the `~` and `^` modifiers trailing a term.
    fn parse_modifiers(&mut self, mut term: Term) -> ParseResult<Node> {
        while let Some(PositionedToken { token, position }) = self.peek_positioned().cloned() {
            let invalid = || ParseError::invalid_modifier(token.to_string(), position);
            match &token {
                // On a phrase `~n` is a proximity, on a word a fuzzy similarity.
                Token::Tilde(argument) if term.quoted => {
                    let proximity = argument.as_deref().and_then(|arg| arg.parse::<u32>().ok());
                    term.proximity = Some(proximity.ok_or_else(invalid)?);
                }
                Token::Tilde(argument) => {
                    let similarity = match argument.as_deref() {
                        None => DEFAULT_SIMILARITY,
                        Some(arg) => arg.parse::<f64>().map_err(|_| invalid())?,
                    };
                    term.similarity = Some(similarity);
                }
                Token::Caret(argument) => {
                    let boost = argument.as_deref().and_then(|arg| arg.parse::<f64>().ok());
                    term.boost = Some(boost.ok_or_else(invalid)?);
                }
                _ => break,
            }
            self.advance();
        }

        Ok(Node::Term(term))
    }

    /// Parses `bound TO bound` and the closing bracket; the opening one is
    /// already consumed.
    fn parse_range(&mut self, open_inclusive: bool, position: usize) -> ParseResult<Node> {
        let unclosed = ParseError::UnclosedRange { position };

        let term_min = self.parse_range_bound().ok_or_else(|| unclosed.clone())?;
        if !self.check(&Token::To) {
            return Err(unclosed);
        }
        self.advance(); // consume 'TO'
        let term_max = self.parse_range_bound().ok_or_else(|| unclosed.clone())?;

        let close_inclusive = match self.advance().map(|pt| pt.token) {
            Some(Token::CloseBracket) => true,
            Some(Token::CloseBrace) => false,
            _ => return Err(unclosed),
        };

        Ok(Node::RangedTerm(RangedTerm {
            field: IMPLICIT_FIELD.to_string(),
            term_min,
            term_max,
            inclusive: Inclusive::from_brackets(open_inclusive, close_inclusive),
        }))
    }

    /// Reads a range bound. A lexed prefix is part of the bound (`-5`).
    fn parse_range_bound(&mut self) -> Option<String> {
        let Some(Token::Term { text, prefix, .. }) = self.peek().cloned() else {
            return None;
        };
        self.advance();
        Some(match prefix {
            Some(prefix) => format!("{}{text}", prefix.as_char()),
            None => text,
        })
    }
}
