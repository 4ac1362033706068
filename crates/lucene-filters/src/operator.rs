//! Requested operators and polarity.

use std::fmt;
use std::str::FromStr;

use lucene_ast::Operator;
use serde::{Deserialize, Serialize};

/// An operator that filters can be joined by.
///
/// Each has exactly one negated form in the query grammar, see
/// [`PositiveOperator::negate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositiveOperator {
    /// Filters separated by whitespace only.
    #[default]
    Implicit,
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl PositiveOperator {
    /// Returns the operator expressing `NOT` of this one.
    ///
    /// ```
    /// use lucene_ast::Operator;
    /// use lucene_filters::PositiveOperator;
    ///
    /// assert_eq!(PositiveOperator::Implicit.negate(), Operator::Not);
    /// assert_eq!(PositiveOperator::And.negate(), Operator::AndNot);
    /// assert_eq!(PositiveOperator::Or.negate(), Operator::OrNot);
    /// ```
    pub fn negate(self) -> Operator {
        match self {
            PositiveOperator::Implicit => Operator::Not,
            PositiveOperator::And => Operator::AndNot,
            PositiveOperator::Or => Operator::OrNot,
        }
    }

    /// Returns the lowercase name used in configuration and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            PositiveOperator::Implicit => "implicit",
            PositiveOperator::And => "and",
            PositiveOperator::Or => "or",
        }
    }
}

impl From<PositiveOperator> for Operator {
    fn from(operator: PositiveOperator) -> Self {
        match operator {
            PositiveOperator::Implicit => Operator::Implicit,
            PositiveOperator::And => Operator::And,
            PositiveOperator::Or => Operator::Or,
        }
    }
}

impl fmt::Display for PositiveOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Operator::from(*self), f)
    }
}

impl FromStr for PositiveOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "implicit" | "<implicit>" => Ok(PositiveOperator::Implicit),
            "and" => Ok(PositiveOperator::And),
            "or" => Ok(PositiveOperator::Or),
            _ => Err(format!(
                "unknown operator '{s}', expected one of: implicit, and, or"
            )),
        }
    }
}

/// Whether filters are asserted or negated by `NOT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Not under a `NOT`.
    #[default]
    Positive,
    /// Under a `NOT`.
    Negative,
}

impl Polarity {
    pub fn is_positive(self) -> bool {
        self == Polarity::Positive
    }
}
