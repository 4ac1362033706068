//! Fields command implementation.
//!
//! Lists the fields queries may name.

use lucene_filters::FieldRegistry;

use super::{CommandContext, Result};
use crate::output::{format_fields_json, format_fields_table};

/// Executes the fields command.
pub fn execute(ctx: &CommandContext, registry: &FieldRegistry) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_fields_json(registry)?);
    } else if !ctx.quiet {
        print!("{}", format_fields_table(registry, ctx.use_colors));
    }

    Ok(())
}
