//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// One unit of a translation tree.
pub struct KeyRow {
    /// Full key path (e.g., "button.delete").
    pub path: String,
    /// The unit's value per locale, in header order.
    pub values: Vec<String>,
}

/// Format key paths and their localized values as a table.
pub fn format_keys_table(locales: &[String], rows: &[KeyRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Key path".to_string()];
    header.extend(locales.iter().cloned());
    table.set_header(header);

    for row in rows {
        let mut cells = vec![row.path.clone()];
        cells.extend(row.values.iter().cloned());
        table.add_row(cells);
    }

    table
}
