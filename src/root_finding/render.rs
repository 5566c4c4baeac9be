//! Tabular rendering of iteration traces.

use comfy_table::{presets::UTF8_FULL, Table};

use super::report::{IterationRecord, Trace};


/// Formats one cell; infinities print as `∞` / `-∞`.
pub fn format_value(v: f64) -> String {
    if v == f64::INFINITY {
        "∞".to_string()
    } else if v == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        v.to_string()
    }
}

/// Builds a table with the record type's columns and one row per iteration.
pub fn render<R: IterationRecord>(trace: &Trace<R>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(R::COLUMNS.to_vec());

    for record in trace.records() {
        let mut row = vec![record.iteration().to_string()];
        row.extend(record.values().into_iter().map(format_value));
        table.add_row(row);
    }

    table
}
