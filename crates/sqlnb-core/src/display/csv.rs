use crate::core::result_model::ResultSet;
use crate::core::value::CellValue;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// CSV export of a tabular result set, matching the view's copy button:
/// every field quoted, NULL written as an empty unquoted field.
pub fn to_csv(result: &ResultSet) -> String {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(
        result
            .columns
            .iter()
            .map(|c| quote(&c.name))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in &result.rows {
        lines.push(
            row.values()
                .iter()
                .map(|value| match value {
                    CellValue::Null => String::new(),
                    other => quote(&other.to_string()),
                })
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}
