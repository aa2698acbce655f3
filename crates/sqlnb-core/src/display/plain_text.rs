use super::display_options::RenderOptions;
use super::table::NULL_MARKER;
use super::view::status_summary;
use crate::core::result_model::ResultSet;
use crate::utils::text::{single_line, truncate_text};
use comfy_table::{Cell, ContentArrangement, Table, presets};

/// `[connection / database] `, or empty when both labels are empty.
pub fn context_prefix(connection_label: &str, database_label: &str) -> String {
    let labels: Vec<&str> = [connection_label, database_label]
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .collect();
    if labels.is_empty() {
        String::new()
    } else {
        format!("[{}] ", labels.join(" / "))
    }
}

fn text_cell(text: &str, options: &RenderOptions) -> Cell {
    Cell::new(truncate_text(&single_line(text), options.text_max_cell_width))
}

/// Plain-text fallback of one result set for non-interactive consumers.
pub fn render_plain_text(result: &ResultSet, context: &str, options: &RenderOptions) -> String {
    if !result.is_tabular() {
        return format!("{}{}", context, status_summary(result));
    }

    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Disabled);
    table.set_header(
        result
            .columns
            .iter()
            .map(|column| text_cell(&column.name, options))
            .collect::<Vec<_>>(),
    );

    for row in &result.rows {
        table.add_row(
            row.values()
                .iter()
                .map(|value| match value.display_text() {
                    Some(text) => text_cell(&text, options),
                    None => Cell::new(NULL_MARKER),
                })
                .collect::<Vec<_>>(),
        );
    }

    format!(
        "{}\n{}{} row(s) returned in {}ms",
        table, context, result.row_count, result.execution_time_ms
    )
}
