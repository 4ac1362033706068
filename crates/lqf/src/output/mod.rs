//! Output formatting utilities for the lqf CLI.
//!
//! - [`filters`] - Filters of a query, split by polarity
//! - [`fields`] - Field registry listing
//! - [`helpers`] - Common formatting utilities

mod fields;
mod filters;
pub mod helpers;

pub use fields::{format_fields_json, format_fields_table};
pub use filters::{format_filters_json, format_filters_table};
