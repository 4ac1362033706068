//! Typed search filters to and from Lucene query syntax trees.
//!
//! A search UI edits a query as a list of typed filters, each a field from a
//! [`FieldRegistry`] and a [`FilterValue`] of the field's type. The query
//! itself stays Lucene text. This crate converts in both directions:
//!
//! - [`serialize`] turns one [`Filter`] into a query fragment.
//! - [`deserialize`] (or a configured [`Deserializer`]) recovers the filters
//!   of one polarity, joined by one operator, from a parsed query.
//!
//! Only a narrow subset of the grammar maps to filters. Boosts, fuzzy and
//! proximity searches, prefix operators, regular expressions, mixed
//! operators and groups on non-enum fields are all rejected with a
//! [`Rejection`]; a rejected query is meant to be edited as raw text.
//!
//! # Example
//!
//! ```
//! use lucene_filters::{
//!     deserialize, serialize, FieldDescriptor, FieldRegistry, FieldType, FilterValue,
//!     Polarity, PositiveOperator,
//! };
//!
//! let registry = FieldRegistry::new(vec![
//!     FieldDescriptor::implicit("Text"),
//!     FieldDescriptor::new("size", "Size", FieldType::Integer, FilterValue::Integer(5)),
//!     FieldDescriptor::new("color", "Color", FieldType::Enum, FilterValue::Enum(vec![])),
//! ])
//! .unwrap();
//!
//! let node = lucene_ast::parse("size:3 AND NOT color:(red OR blue)").unwrap();
//! let positive = deserialize(&node, &registry, PositiveOperator::And, Polarity::Positive).unwrap();
//! let negative = deserialize(&node, &registry, PositiveOperator::And, Polarity::Negative).unwrap();
//!
//! assert_eq!(positive[0].value(), &FilterValue::Integer(3));
//! assert_eq!(lucene_ast::print(&serialize(&negative[0])), "color:(red OR blue)");
//! ```

mod deserialize;
mod enum_terms;
mod error;
mod field;
mod filter;
mod operator;
mod quoting;
mod registry;
mod serialize;
mod value;

pub use deserialize::{deserialize, split_by_polarity, Deserializer};
pub use enum_terms::extract_enum_terms;
pub use error::{
    DeserializeResult, FilterError, FilterResult, Modifier, RegistryError, RegistryResult,
    Rejection,
};
pub use field::{FieldConstraints, FieldDescriptor, FieldType};
pub use filter::Filter;
pub use operator::{Polarity, PositiveOperator};
pub use quoting::needs_quoting;
pub use registry::FieldRegistry;
pub use serialize::serialize;
pub use value::FilterValue;
