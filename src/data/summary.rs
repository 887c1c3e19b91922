use super::model::{ColumnType, Table};

/// Per-column piece of the dataset information block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: ColumnType,
    pub missing: usize,
}

/// Shape and per-column statistics shown under "Dataset Information".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub rows: usize,
    pub cols: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Compute the summary block. Pure, read-only.
pub fn summarize(table: &Table) -> Summary {
    Summary {
        rows: table.n_rows(),
        cols: table.n_cols(),
        columns: table
            .columns
            .iter()
            .map(|c| ColumnSummary {
                name: c.name.clone(),
                dtype: c.dtype,
                missing: c.values.iter().filter(|v| v.is_null()).count(),
            })
            .collect(),
    }
}
