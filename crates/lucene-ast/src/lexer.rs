//! Lexer (tokenizer) for Lucene query expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::ast::Prefix;
use crate::error::{ParseError, ParseResult};

/// Characters, besides whitespace, that end an unquoted term.
const DELIMITERS: &[char] = &['(', ')', '[', ']', '{', '}', ':', '"', '^', '~'];

/// Words that lex as operators when written unquoted and unescaped.
pub(crate) const KEYWORDS: &[&str] = &["AND", "OR", "NOT", "TO", "&&", "||"];

/// Returns true if `c` ends an unquoted term.
pub(crate) fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(&c)
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken {
    /// The token.
    pub token: Token,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // ==================== Terms ====================
    /// A bare or double-quoted term, escapes already resolved.
    Term {
        /// The term text.
        text: String,
        /// Whether the term was written in double quotes.
        quoted: bool,
        /// A leading `+` or `-`.
        prefix: Option<Prefix>,
    },

    /// A regular expression term (`/pattern/`).
    Regex {
        /// The pattern between the slashes.
        text: String,
        /// A leading `+` or `-`.
        prefix: Option<Prefix>,
    },

    // ==================== Modifiers ====================
    /// `~` with an optional numeric argument.
    Tilde(Option<String>),

    /// `^` with an optional numeric argument.
    Caret(Option<String>),

    // ==================== Keywords ====================
    /// `AND` or `&&`.
    And,

    /// `OR` or `||`.
    Or,

    /// `NOT`.
    Not,

    /// `TO` inside ranges.
    To,

    // ==================== Punctuation ====================
    /// `:` between a field name and its value.
    Colon,

    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,

    /// Inclusive range start `[`.
    OpenBracket,

    /// Inclusive range end `]`.
    CloseBracket,

    /// Exclusive range start `{`.
    OpenBrace,

    /// Exclusive range end `}`.
    CloseBrace,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Term { text, quoted, .. } if *quoted => write!(f, "\"{text}\""),
            Token::Term { text, .. } => f.write_str(text),
            Token::Regex { text, .. } => write!(f, "/{text}/"),
            Token::Tilde(arg) => write!(f, "~{}", arg.as_deref().unwrap_or("")),
            Token::Caret(arg) => write!(f, "^{}", arg.as_deref().unwrap_or("")),
            Token::And => f.write_str("AND"),
            Token::Or => f.write_str("OR"),
            Token::Not => f.write_str("NOT"),
            Token::To => f.write_str("TO"),
            Token::Colon => f.write_str(":"),
            Token::OpenParen => f.write_str("("),
            Token::CloseParen => f.write_str(")"),
            Token::OpenBracket => f.write_str("["),
            Token::CloseBracket => f.write_str("]"),
            Token::OpenBrace => f.write_str("{"),
            Token::CloseBrace => f.write_str("}"),
        }
    }
}

/// Lexer for tokenizing query expressions.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks one character past the next one.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    /// Consumes and returns the next character.
    fn next_char(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Returns the byte offset of the next character.
    fn current_position(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Consumes a `+`/`-` prefix if a term follows it directly.
    fn read_prefix(&mut self) -> Option<Prefix> {
        let prefix = match self.peek()? {
            '+' => Prefix::Required,
            '-' => Prefix::Prohibited,
            _ => return None,
        };
        match self.peek_second() {
            Some(next) if next == '"' || !is_delimiter(next) => {
                self.next_char();
                Some(prefix)
            }
            _ => None,
        }
    }

    /// Reads an unquoted word. Returns the text and whether any character
    /// was escaped.
    fn read_word(&mut self) -> (String, bool) {
        let mut word = String::new();
        let mut escaped = false;
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            self.next_char();
            if c == '\\' {
                if let Some(next) = self.next_char() {
                    word.push(next);
                    escaped = true;
                }
            } else {
                word.push(c);
            }
        }
        (word, escaped)
    }

    /// Reads up to the closing character, the opening one already consumed.
    ///
    /// With `keep_escapes`, backslashes in front of anything other than the
    /// closing character are preserved (regular expressions need them).
    fn read_delimited(&mut self, close: char, keep_escapes: bool) -> Option<String> {
        let mut text = String::new();
        while let Some(c) = self.next_char() {
            if c == close {
                return Some(text);
            }
            if c == '\\' {
                let next = self.next_char()?;
                if keep_escapes && next != close {
                    text.push('\\');
                }
                text.push(next);
            } else {
                text.push(c);
            }
        }
        None
    }

    /// Reads the numeric argument of a `~` or `^` modifier.
    fn read_number(&mut self) -> Option<String> {
        let mut number = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                number.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        (!number.is_empty()).then_some(number)
    }

    /// Reads a bare, quoted or regex term, or a keyword.
    fn read_term(&mut self, position: usize) -> ParseResult<Token> {
        let prefix = self.read_prefix();
        match self.peek() {
            Some('"') => {
                self.next_char();
                let text = self
                    .read_delimited('"', false)
                    .ok_or(ParseError::UnclosedQuote { position })?;
                Ok(Token::Term {
                    text,
                    quoted: true,
                    prefix,
                })
            }
            Some('/') => {
                self.next_char();
                let text = self
                    .read_delimited('/', true)
                    .ok_or(ParseError::UnclosedRegex { position })?;
                Ok(Token::Regex { text, prefix })
            }
            _ => {
                let (text, escaped) = self.read_word();
                if prefix.is_none() && !escaped {
                    if let Some(keyword) = Self::keyword(&text) {
                        return Ok(keyword);
                    }
                }
                Ok(Token::Term {
                    text,
                    quoted: false,
                    prefix,
                })
            }
        }
    }

    /// Maps an operator word to its token. Keywords are case-sensitive.
    fn keyword(word: &str) -> Option<Token> {
        match word {
            "AND" | "&&" => Some(Token::And),
            "OR" | "||" => Some(Token::Or),
            "NOT" => Some(Token::Not),
            "TO" => Some(Token::To),
            _ => None,
        }
    }

    /// Returns the next token with its position, or `None` at end of input.
    pub fn next_token(&mut self) -> ParseResult<Option<PositionedToken>> {
        self.skip_whitespace();

        let position = self.current_position();
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ':' => {
                self.next_char();
                match c {
                    '(' => Token::OpenParen,
                    ')' => Token::CloseParen,
                    '[' => Token::OpenBracket,
                    ']' => Token::CloseBracket,
                    '{' => Token::OpenBrace,
                    '}' => Token::CloseBrace,
                    _ => Token::Colon,
                }
            }
            '~' => {
                self.next_char();
                Token::Tilde(self.read_number())
            }
            '^' => {
                self.next_char();
                Token::Caret(self.read_number())
            }
            _ => self.read_term(position)?,
        };

        Ok(Some(PositionedToken { token, position }))
    }

    /// Collects all tokens, failing on the first unterminated quote or regex.
    pub fn tokenize(mut self) -> ParseResult<Vec<PositionedToken>> {
        let mut tokens = Vec::new();
        while let Some(positioned_token) = self.next_token()? {
            tokens.push(positioned_token);
        }
        Ok(tokens)
    }
}
