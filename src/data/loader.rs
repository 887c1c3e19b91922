use super::model::{Column, ColumnType, Table, Value};
use super::PipelineError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse uploaded bytes as comma-delimited text with a header row.
///
/// Dtypes are inferred per column from the cell contents: a column where every
/// non-empty cell parses as an integer becomes `Integer`, a mix of integers
/// and floats becomes `Float`, ISO dates become `Date`, `true`/`false` become
/// `Bool`, anything else stays `Text`. Empty cells become `Null` and do not
/// influence the inferred dtype.
pub fn load_bytes(bytes: &[u8]) -> Result<Table, PipelineError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Collect raw cells column-wise; dtype unification needs the whole column.
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        // The reader rejects ragged rows and invalid UTF-8 here.
        let record = result.map_err(|e| PipelineError::Parse(e.to_string()))?;
        for (col, field) in record.iter().enumerate() {
            raw_columns[col].push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| build_column(name, &raw))
        .collect();

    Ok(Table { columns })
}

// ---------------------------------------------------------------------------
// Column dtype inference
// ---------------------------------------------------------------------------

/// Per-cell dtype guess, before column-level unification.
fn guess_cell_type(s: &str) -> Option<ColumnType> {
    if s.is_empty() {
        return None;
    }
    if s.parse::<i64>().is_ok() {
        return Some(ColumnType::Integer);
    }
    if s.parse::<f64>().is_ok() {
        return Some(ColumnType::Float);
    }
    if s == "true" || s == "false" {
        return Some(ColumnType::Bool);
    }
    if is_iso_date(s) {
        return Some(ColumnType::Date);
    }
    Some(ColumnType::Text)
}

/// `YYYY-MM-DD` with plausible month and day ranges.
fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    let digits = |r: std::ops::Range<usize>| {
        b[r].iter().all(|c| c.is_ascii_digit())
    };
    if !digits(0..4) || !digits(5..7) || !digits(8..10) {
        return false;
    }
    let month: u8 = s[5..7].parse().unwrap_or(0);
    let day: u8 = s[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Unify per-cell guesses into one column dtype.
fn unify(types: impl Iterator<Item = ColumnType>) -> ColumnType {
    let mut unified: Option<ColumnType> = None;
    for t in types {
        unified = Some(match unified {
            None => t,
            Some(u) if u == t => u,
            // Integers widen to float; any other disagreement is text.
            Some(ColumnType::Integer) if t == ColumnType::Float => ColumnType::Float,
            Some(ColumnType::Float) if t == ColumnType::Integer => ColumnType::Float,
            Some(_) => ColumnType::Text,
        });
    }
    unified.unwrap_or(ColumnType::Text)
}

/// Convert a raw cell to the column's unified dtype. Empty cells are `Null`.
fn coerce(s: &str, dtype: ColumnType) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    match dtype {
        ColumnType::Integer => s
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(s.to_string())),
        ColumnType::Float => s
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Text(s.to_string())),
        ColumnType::Bool => Value::Bool(s == "true"),
        ColumnType::Date => Value::Date(s.to_string()),
        ColumnType::Text => Value::Text(s.to_string()),
    }
}

fn build_column(name: String, raw: &[String]) -> Column {
    let dtype = unify(raw.iter().filter_map(|s| guess_cell_type(s)));
    let values = raw.iter().map(|s| coerce(s, dtype)).collect();
    Column { name, dtype, values }
}

// ---------------------------------------------------------------------------
// Built-in demo table
// ---------------------------------------------------------------------------

/// The fixed 10-row sample shown by the "Show Demo Example" button.
pub fn demo_table() -> Table {
    let dates: Vec<Value> = (1..=10)
        .map(|d| Value::Date(format!("2024-01-{d:02}")))
        .collect();
    let ints = |vals: [i64; 10]| vals.into_iter().map(Value::Integer).collect();
    let texts = |vals: [&str; 10]| {
        vals.into_iter()
            .map(|s| Value::Text(s.to_string()))
            .collect()
    };

    Table {
        columns: vec![
            Column {
                name: "Date".into(),
                dtype: ColumnType::Date,
                values: dates,
            },
            Column {
                name: "Sales".into(),
                dtype: ColumnType::Integer,
                values: ints([150, 200, 250, 180, 220, 270, 300, 320, 310, 400]),
            },
            Column {
                name: "Profit".into(),
                dtype: ColumnType::Integer,
                values: ints([50, 70, 90, 60, 80, 100, 120, 130, 125, 150]),
            },
            Column {
                name: "Category".into(),
                dtype: ColumnType::Text,
                values: texts([
                    "Food", "Tech", "Food", "Tech", "Clothing", "Clothing", "Food", "Tech",
                    "Clothing", "Food",
                ]),
            },
            Column {
                name: "Country".into(),
                dtype: ColumnType::Text,
                values: texts([
                    "USA", "USA", "UK", "Germany", "Germany", "UK", "USA", "Germany", "UK", "USA",
                ]),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_csv_with_inferred_dtypes() {
        let csv = b"name,score,when\nalice,1.5,2024-03-01\nbob,2,2024-03-02\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 3);
        assert_eq!(table.column("name").unwrap().dtype, ColumnType::Text);
        // 1.5 and 2 unify to float
        assert_eq!(table.column("score").unwrap().dtype, ColumnType::Float);
        assert_eq!(table.column("when").unwrap().dtype, ColumnType::Date);
        assert_eq!(
            table.column("score").unwrap().values[1],
            Value::Float(2.0)
        );
    }

    #[test]
    fn empty_cells_become_null_without_breaking_dtype() {
        let csv = b"a,b\n1,x\n,y\n3,\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.column("a").unwrap().dtype, ColumnType::Integer);
        assert_eq!(table.column("a").unwrap().values[1], Value::Null);
        assert_eq!(table.column("b").unwrap().values[2], Value::Null);
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let csv = b"a,b\n1,2\n3\n";
        assert!(load_bytes(csv).is_err());
    }

    #[test]
    fn non_utf8_bytes_are_a_parse_error() {
        let bytes = [b'a', b',', b'b', b'\n', 0xff, 0xfe, b',', b'x', b'\n'];
        assert!(load_bytes(&bytes).is_err());
    }

    #[test]
    fn demo_table_shape_matches_sample() {
        let demo = demo_table();
        assert_eq!(demo.n_rows(), 10);
        assert_eq!(
            demo.column_names(),
            vec!["Date", "Sales", "Profit", "Category", "Country"]
        );
        assert_eq!(demo.numeric_column_names(), vec!["Sales", "Profit"]);
    }

    #[test]
    fn iso_date_detection() {
        assert!(is_iso_date("2024-01-31"));
        assert!(!is_iso_date("2024-13-01"));
        assert!(!is_iso_date("01/02/2024"));
        assert!(!is_iso_date("2024-1-1"));
    }
}
