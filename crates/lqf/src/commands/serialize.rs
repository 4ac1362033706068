//! Serialize command implementation.
//!
//! Builds a filter from command line values and prints its query fragment.

use lucene_filters::{serialize, FieldDescriptor, FieldRegistry, FieldType, Filter, FilterValue};
use serde::Serialize;

use super::{CommandContext, CommandError, Result};

/// Options for the serialize command.
#[derive(Debug)]
pub struct SerializeOptions {
    /// Field name.
    pub field: String,
    /// Raw values as given on the command line.
    pub values: Vec<String>,
}

/// JSON output structure for the serialize command.
#[derive(Serialize)]
struct SerializeOutput<'a> {
    filter: &'a Filter,
    query: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_options: Vec<&'a str>,
}

/// Executes the serialize command.
pub fn execute(ctx: &CommandContext, registry: &FieldRegistry, opts: &SerializeOptions) -> Result<()> {
    let field = registry
        .get(&opts.field)
        .ok_or_else(|| CommandError::unknown_field(registry, &opts.field))?;

    let value = value_from_args(field, &opts.values)?;
    let filter = Filter::new(field.clone(), value)?;
    let query = lucene_ast::print(&serialize(&filter));
    tracing::debug!(field = %field.name, query = %query, "serialized filter");

    let unknown_options = match filter.value() {
        FilterValue::Enum(values) => field.unknown_options(values),
        _ => Vec::new(),
    };
    if !unknown_options.is_empty() && !ctx.quiet && !ctx.json_output {
        eprintln!(
            "Warning: not an option of '{}': {}",
            field.name,
            unknown_options.join(", ")
        );
    }

    if ctx.json_output {
        let output = SerializeOutput {
            filter: &filter,
            query: &query,
            unknown_options,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{query}");
    }

    Ok(())
}

/// Reads command line values the way query terms are read.
fn value_from_args(field: &FieldDescriptor, values: &[String]) -> Result<FilterValue> {
    if field.field_type.is_range() {
        let [min, max] = values else {
            return Err(CommandError::InvalidArguments(format!(
                "range field '{}' takes a minimum and a maximum, got {} value(s)",
                field.name,
                values.len()
            )));
        };
        return Ok(FilterValue::from_range(field, min, max)?);
    }

    if field.field_type == FieldType::Enum {
        return Ok(FilterValue::Enum(values.to_vec()));
    }

    let [text] = values else {
        return Err(CommandError::InvalidArguments(format!(
            "field '{}' takes exactly one value, got {}",
            field.name,
            values.len()
        )));
    };
    Ok(FilterValue::from_term(field, text)?)
}
