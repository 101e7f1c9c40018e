//! Table formatting for the pretty report

use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde_json::Value as JsonValue;

/// Rows shown before a JSON array table is cut off
pub const MAX_TABLE_ROWS: usize = 20;

/// Empty table with a bold header row
pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|col| Cell::new(col).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

/// Two-column table of labels and values
pub fn key_value_table<K, V>(header: [&str; 2], rows: impl IntoIterator<Item = (K, V)>) -> Table
where
    K: ToString,
    V: ToString,
{
    let mut table = new_table(&header);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key.to_string()), Cell::new(value.to_string())]);
    }
    table
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Format a JSON array of objects as a table
///
/// Returns `None` for anything that is not a non-empty array of objects.
pub fn format_as_table(json: &JsonValue) -> Option<String> {
    let array = json.as_array()?;
    let columns = collect_columns(array);
    if columns.is_empty() {
        return None;
    }

    let header: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut table = new_table(&header);
    for obj in array.iter().filter_map(JsonValue::as_object).take(MAX_TABLE_ROWS) {
        let row: Vec<Cell> = columns
            .iter()
            .map(|col| Cell::new(obj.get(col).map(format_cell_value).unwrap_or_default()))
            .collect();
        table.add_row(row);
    }

    let mut out = table.to_string();
    if array.len() > MAX_TABLE_ROWS {
        out.push_str(&format!("\n... {} more rows", array.len() - MAX_TABLE_ROWS));
    }
    Some(out)
}

/// Collect unique column names from array of objects
fn collect_columns(array: &[JsonValue]) -> Vec<String> {
    let mut columns = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for item in array {
        if let Some(obj) = item.as_object() {
            for key in obj.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
        }
    }

    columns
}

/// Format a JSON value for table cell display
fn format_cell_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(arr) => {
            if arr.len() <= 3 {
                format!("[{}]", arr.iter()
                    .map(format_cell_value)
                    .collect::<Vec<_>>()
                    .join(", "))
            } else {
                format!("[{} items]", arr.len())
            }
        }
        JsonValue::Object(obj) => format!("{{...{} keys}}", obj.len()),
    }
}
