use std::collections::{BTreeMap, BTreeSet};

use super::model::{Table, Value};

/// Columns that get an equality-filter selector when present in the table.
pub const FILTER_COLUMNS: &[&str] = &["Category", "Country"];

// ---------------------------------------------------------------------------
// Filter selection: one chosen value (or "All") per filterable column
// ---------------------------------------------------------------------------

/// Per-column selection: column name → chosen value, `None` meaning "All".
/// Columns absent from the map are unconstrained.
pub type FilterSelection = BTreeMap<String, Option<Value>>;

/// Sorted unique values of a column, for populating a selector.
pub fn unique_values(table: &Table, column: &str) -> BTreeSet<Value> {
    table
        .column(column)
        .map(|c| c.values.iter().cloned().collect())
        .unwrap_or_default()
}

/// Apply all active equality filters conjunctively, returning a new table.
///
/// A row passes a column filter when:
/// * the selection for that column is `None` ("All") → passes
/// * the selected value no longer exists in the column → treated as "All"
/// * the row's cell equals the selected value exactly → passes
pub fn apply_filters(table: &Table, selections: &FilterSelection) -> Table {
    // Resolve stale selections up front so each is checked once, not per row.
    let active: Vec<(&str, &Value)> = selections
        .iter()
        .filter_map(|(col, sel)| {
            let value = sel.as_ref()?;
            let column = table.column(col)?;
            if !column.values.contains(value) {
                return None; // stale selection → "All"
            }
            Some((col.as_str(), value))
        })
        .collect();

    if active.is_empty() {
        return table.clone();
    }

    let indices: Vec<usize> = (0..table.n_rows())
        .filter(|&row| {
            active.iter().all(|(col, value)| {
                table
                    .column(col)
                    .map(|c| &c.values[row] == *value)
                    .unwrap_or(true)
            })
        })
        .collect();

    table.take_rows(&indices)
}
