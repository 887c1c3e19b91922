use super::model::Table;

/// Stable descending sort by one column, returning a new table.
///
/// Comparison follows the column's dtype: numeric for numbers, chronological
/// for dates, lexicographic for text. Ties keep their prior relative order.
/// An unknown column name leaves the table unchanged.
pub fn sort_descending(table: &Table, column: &str) -> Table {
    let Some(col) = table.column(column) else {
        return table.clone();
    };

    let mut indices: Vec<usize> = (0..table.n_rows()).collect();
    // sort_by is stable; reversing the comparison keeps ties in input order.
    indices.sort_by(|&a, &b| col.values[b].cmp(&col.values[a]));

    table.take_rows(&indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filters, FilterSelection};
    use crate::data::loader::demo_table;
    use crate::data::model::{Column, ColumnType, Table, Value};

    #[test]
    fn filtered_demo_sorts_descending_by_sales() {
        let demo = demo_table();
        let mut sel = FilterSelection::new();
        sel.insert("Category".into(), Some(Value::Text("Food".into())));
        let food = apply_filters(&demo, &sel);

        let sorted = sort_descending(&food, "Sales");
        let sales: Vec<_> = sorted.column("Sales").unwrap().values.clone();
        assert_eq!(
            sales,
            vec![
                Value::Integer(400),
                Value::Integer(300),
                Value::Integer(250),
                Value::Integer(150)
            ]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let demo = demo_table();
        let once = sort_descending(&demo, "Profit");
        let twice = sort_descending(&once, "Profit");
        for (a, b) in once.columns.iter().zip(&twice.columns) {
            assert_eq!(a.values, b.values);
        }
    }

    #[test]
    fn ties_preserve_prior_order() {
        let table = Table {
            columns: vec![
                Column {
                    name: "k".into(),
                    dtype: ColumnType::Integer,
                    values: vec![Value::Integer(1), Value::Integer(1), Value::Integer(2)],
                },
                Column {
                    name: "tag".into(),
                    dtype: ColumnType::Text,
                    values: vec![
                        Value::Text("first".into()),
                        Value::Text("second".into()),
                        Value::Text("third".into()),
                    ],
                },
            ],
        };
        let sorted = sort_descending(&table, "k");
        let tags: Vec<_> = sorted.column("tag").unwrap().values.clone();
        assert_eq!(
            tags,
            vec![
                Value::Text("third".into()),
                Value::Text("first".into()),
                Value::Text("second".into())
            ]
        );
    }

    #[test]
    fn dates_sort_chronologically() {
        let demo = demo_table();
        let sorted = sort_descending(&demo, "Date");
        assert_eq!(
            sorted.column("Date").unwrap().values[0],
            Value::Date("2024-01-10".into())
        );
    }

    #[test]
    fn unknown_column_is_a_noop() {
        let demo = demo_table();
        let out = sort_descending(&demo, "NoSuchColumn");
        assert_eq!(
            out.column("Date").unwrap().values,
            demo.column("Date").unwrap().values
        );
    }
}
