//! Filter output formatting.

use lucene_filters::{Filter, PositiveOperator};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_header, truncate_str};

/// JSON output structure for the filters command.
#[derive(Serialize)]
pub struct FiltersOutput<'a> {
    pub query: &'a str,
    pub operator: &'static str,
    pub positive: &'a [Filter],
    pub negative: &'a [Filter],
}

/// Formats the filters of a query as JSON.
pub fn format_filters_json(
    query: &str,
    operator: PositiveOperator,
    positive: &[Filter],
    negative: &[Filter],
) -> Result<String, serde_json::Error> {
    let output = FiltersOutput {
        query,
        operator: operator.as_str(),
        positive,
        negative,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats the filters of a query as a table, positive filters first.
pub fn format_filters_table(positive: &[Filter], negative: &[Filter], use_colors: bool) -> String {
    if positive.is_empty() && negative.is_empty() {
        return "No filters found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format_header(
        &format!("{:<4} {:<20} {:<14} {}", "", "Field", "Type", "Value"),
        use_colors,
    ));

    let rows = positive
        .iter()
        .map(|filter| ("+", filter))
        .chain(negative.iter().map(|filter| ("-", filter)));

    for (sign, filter) in rows {
        let sign = if !use_colors {
            sign.to_string()
        } else if sign == "+" {
            sign.green().to_string()
        } else {
            sign.red().to_string()
        };
        let field = truncate_str(&filter.field().name, 20);
        let line = format!(
            "{:<4} {:<20} {:<14} {}",
            sign,
            field,
            filter.field().field_type.as_str(),
            filter.value()
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}
