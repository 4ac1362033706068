//! Filters command implementation.
//!
//! Parses a query and prints the filters it holds at each polarity.

use lucene_filters::{split_by_polarity, FieldRegistry, PositiveOperator, Rejection};

use super::{CommandContext, CommandError, Result};
use crate::output::{format_filters_json, format_filters_table};

/// Options for the filters command.
#[derive(Debug)]
pub struct FiltersOptions {
    /// Query text.
    pub query: String,
    /// Operator joining the filters.
    pub operator: PositiveOperator,
}

/// Executes the filters command.
pub fn execute(ctx: &CommandContext, registry: &FieldRegistry, opts: &FiltersOptions) -> Result<()> {
    let node = lucene_ast::parse(&opts.query)?;
    let (positive, negative) =
        split_by_polarity(&node, registry, opts.operator).map_err(|rejection| match rejection {
            Rejection::UnknownField { name } => CommandError::unknown_field(registry, &name),
            other => CommandError::Rejected(other),
        })?;

    if ctx.verbose {
        eprintln!(
            "{} positive, {} negative filter(s) with operator {}",
            positive.len(),
            negative.len(),
            opts.operator
        );
    }

    if ctx.json_output {
        let output = format_filters_json(&opts.query, opts.operator, &positive, &negative)?;
        println!("{output}");
    } else if !ctx.quiet {
        print!("{}", format_filters_table(&positive, &negative, ctx.use_colors));
    }

    Ok(())
}
