//! Field registry output formatting.

use lucene_filters::{FieldConstraints, FieldDescriptor, FieldRegistry};
use serde::Serialize;

use super::helpers::{format_header, truncate_str};

/// JSON output structure for the fields command.
#[derive(Serialize)]
pub struct FieldsListOutput<'a> {
    pub fields: Vec<&'a FieldDescriptor>,
}

/// Formats the registry as JSON.
pub fn format_fields_json(registry: &FieldRegistry) -> Result<String, serde_json::Error> {
    let output = FieldsListOutput {
        fields: registry.iter().collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the registry as a table.
pub fn format_fields_table(registry: &FieldRegistry, use_colors: bool) -> String {
    if registry.is_empty() {
        return "No fields found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format_header(
        &format!(
            "{:<20} {:<20} {:<14} {:<14} {}",
            "Name", "Display", "Type", "Default", "Constraints"
        ),
        use_colors,
    ));

    for field in registry.iter() {
        let line = format!(
            "{:<20} {:<20} {:<14} {:<14} {}",
            truncate_str(&field.name, 20),
            truncate_str(&field.display_name, 20),
            field.field_type.as_str(),
            truncate_str(&field.default_value.to_string(), 14),
            format_constraints(field)
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

fn format_constraints(field: &FieldDescriptor) -> String {
    match &field.constraints {
        None => String::new(),
        Some(FieldConstraints::Numeric { min, max }) => format!("{min}..{max}"),
        Some(FieldConstraints::Options { options }) => {
            let keys: Vec<&str> = options.keys().map(String::as_str).collect();
            truncate_str(&keys.join("|"), 40)
        }
    }
}
