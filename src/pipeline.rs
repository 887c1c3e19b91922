//! One interaction = one `Request` through [`run`] = one `Response`.
//!
//! The UI never mutates a table in place; it rebuilds the request from the
//! current selections and renders whatever comes back.

use crate::chart::{build_chart, ChartError, ChartRequest, ChartSpec};
use crate::data::filter::{apply_filters, FilterSelection};
use crate::data::model::Table;
use crate::data::sort::sort_descending;
use crate::data::summary::{summarize, Summary};

/// Everything one interaction asks of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub filters: FilterSelection,
    /// Column for the descending sort of the second preview, if chosen.
    pub sort: Option<String>,
    pub chart: Option<ChartRequest>,
}

/// Everything the UI needs to render one interaction.
#[derive(Debug, Clone)]
pub struct Response {
    /// Filtered table, pre-sort: the preview and the export both use this.
    pub filtered: Table,
    /// Filtered table after the descending sort (equals `filtered` when no
    /// sort column is chosen).
    pub sorted: Table,
    pub summary: Summary,
    pub chart: Option<Result<ChartSpec, ChartError>>,
}

/// Run the full pipeline over the source table. Pure: the source is borrowed,
/// never changed.
pub fn run(source: &Table, request: &Request) -> Response {
    let filtered = apply_filters(source, &request.filters);

    let sorted = match &request.sort {
        Some(column) => sort_descending(&filtered, column),
        None => filtered.clone(),
    };

    let summary = summarize(&filtered);

    let chart = request
        .chart
        .as_ref()
        .map(|req| build_chart(&filtered, req));

    Response {
        filtered,
        sorted,
        summary,
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;
    use crate::data::loader::demo_table;
    use crate::data::model::Value;

    #[test]
    fn full_interaction_over_demo_table() {
        let demo = demo_table();
        let mut filters = FilterSelection::new();
        filters.insert("Category".into(), Some(Value::Text("Food".into())));

        let response = run(
            &demo,
            &Request {
                filters,
                sort: Some("Sales".into()),
                chart: Some(ChartRequest {
                    kind: ChartKind::Heatmap,
                    x: None,
                    y: None,
                }),
            },
        );

        assert_eq!(response.summary.rows, 4);
        assert_eq!(response.summary.cols, 5);
        assert_eq!(
            response.sorted.column("Sales").unwrap().values[0],
            Value::Integer(400)
        );
        // Export view keeps the filtered (unsorted) row order.
        assert_eq!(
            response.filtered.column("Sales").unwrap().values[0],
            Value::Integer(150)
        );
        assert!(response.chart.unwrap().is_ok());
        // Source untouched.
        assert_eq!(demo.n_rows(), 10);
    }

    #[test]
    fn empty_request_passes_the_table_through() {
        let demo = demo_table();
        let response = run(&demo, &Request::default());
        assert_eq!(response.filtered.n_rows(), 10);
        assert_eq!(response.sorted.n_rows(), 10);
        assert!(response.chart.is_none());
    }
}
