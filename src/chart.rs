use std::fmt;

use thiserror::Error;

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Chart request
// ---------------------------------------------------------------------------

/// The chart kinds offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Histogram,
    Heatmap,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Heatmap,
    ];

    /// Whether the kind takes an X column and a numeric Y column.
    pub fn is_xy(self) -> bool {
        matches!(self, ChartKind::Bar | ChartKind::Line | ChartKind::Scatter)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "Bar chart",
            ChartKind::Line => "Line chart",
            ChartKind::Scatter => "Scatter plot",
            ChartKind::Histogram => "Histogram",
            ChartKind::Heatmap => "Heatmap",
        };
        write!(f, "{name}")
    }
}

/// A chart kind plus the 0–2 column names it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// X column for bar/line/scatter, value column for histogram.
    pub x: Option<String>,
    /// Numeric Y column for bar/line/scatter.
    pub y: Option<String>,
}

/// Non-fatal chart failures: the rest of the dashboard stays usable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("no numeric columns available")]
    NoNumericColumns,
    #[error("select the column(s) to plot")]
    MissingSelection,
    #[error("selected column has no numeric values")]
    NoNumericValues,
}

// ---------------------------------------------------------------------------
// Chart spec – what the renderer draws
// ---------------------------------------------------------------------------

/// Renderer-independent description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// One bar per row: position, height, and the X cell's label.
    Bar {
        x_label: String,
        y_label: String,
        bars: Vec<(f64, f64, String)>,
    },
    /// Points in row order; categorical X falls back to row position.
    Line {
        x_label: String,
        y_label: String,
        points: Vec<[f64; 2]>,
    },
    Scatter {
        x_label: String,
        y_label: String,
        points: Vec<[f64; 2]>,
    },
    /// Equal-width bins over the value range.
    Histogram {
        label: String,
        bin_width: f64,
        /// (bin center, count)
        bins: Vec<(f64, usize)>,
    },
    /// Pairwise Pearson correlation of all numeric columns.
    Heatmap {
        columns: Vec<String>,
        /// Row-major n×n matrix; NaN where a column has zero variance.
        matrix: Vec<Vec<f64>>,
    },
}

/// Build the chart spec for a request, or report why it cannot be drawn.
pub fn build_chart(table: &Table, request: &ChartRequest) -> Result<ChartSpec, ChartError> {
    match request.kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Scatter => {
            build_xy(table, request)
        }
        ChartKind::Histogram => build_histogram(table, request),
        ChartKind::Heatmap => Ok(build_heatmap(table)),
    }
}

// ---------------------------------------------------------------------------
// Bar / line / scatter
// ---------------------------------------------------------------------------

fn build_xy(table: &Table, request: &ChartRequest) -> Result<ChartSpec, ChartError> {
    if table.numeric_column_names().is_empty() {
        return Err(ChartError::NoNumericColumns);
    }
    let x_name = request.x.as_deref().ok_or(ChartError::MissingSelection)?;
    let y_name = request.y.as_deref().ok_or(ChartError::MissingSelection)?;
    let x_col = table.column(x_name).ok_or(ChartError::MissingSelection)?;
    let y_col = table.column(y_name).ok_or(ChartError::MissingSelection)?;

    // Numeric X keeps its values; anything else is spread over row positions.
    let xs: Vec<f64> = x_col
        .values
        .iter()
        .enumerate()
        .map(|(row, v)| v.as_f64().unwrap_or(row as f64))
        .collect();
    let ys: Vec<f64> = y_col
        .values
        .iter()
        .map(|v| v.as_f64().unwrap_or(f64::NAN))
        .collect();

    let x_label = x_name.to_string();
    let y_label = y_name.to_string();

    Ok(match request.kind {
        ChartKind::Bar => {
            let bars = xs
                .iter()
                .zip(&ys)
                .zip(&x_col.values)
                .map(|((&x, &y), xv)| (x, y, xv.to_string()))
                .collect();
            ChartSpec::Bar { x_label, y_label, bars }
        }
        ChartKind::Line => ChartSpec::Line {
            x_label,
            y_label,
            points: xs.iter().zip(&ys).map(|(&x, &y)| [x, y]).collect(),
        },
        ChartKind::Scatter => ChartSpec::Scatter {
            x_label,
            y_label,
            points: xs.iter().zip(&ys).map(|(&x, &y)| [x, y]).collect(),
        },
        _ => unreachable!(),
    })
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

fn build_histogram(table: &Table, request: &ChartRequest) -> Result<ChartSpec, ChartError> {
    if table.numeric_column_names().is_empty() {
        return Err(ChartError::NoNumericColumns);
    }
    let name = request.x.as_deref().ok_or(ChartError::MissingSelection)?;
    let col = table.column(name).ok_or(ChartError::MissingSelection)?;

    let values: Vec<f64> = col.values.iter().filter_map(|v| v.as_f64()).collect();
    if values.is_empty() {
        return Err(ChartError::NoNumericValues);
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Sturges' rule, like most plotting defaults.
    let n_bins = ((values.len() as f64).log2().ceil() as usize + 1).max(1);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        // All values identical: one bin holding everything.
        return Ok(ChartSpec::Histogram {
            label: name.to_string(),
            bin_width: 1.0,
            bins: vec![(min, values.len())],
        });
    }
    let bin_width = range / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for &v in &values {
        let idx = (((v - min) / bin_width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + (i as f64 + 0.5) * bin_width, count))
        .collect();

    Ok(ChartSpec::Histogram {
        label: name.to_string(),
        bin_width,
        bins,
    })
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Pearson correlation of two row-aligned samples, using only rows where both
/// cells are present (pairwise-complete, as pandas' `corr` does). NaN when
/// fewer than two complete pairs exist or either sample has zero variance.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return f64::NAN;
    }

    let ma = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mb = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &(x, y) in &pairs {
        let da = x - ma;
        let db = y - mb;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Correlation matrix over every numeric column. Fewer than two numeric
/// columns yields a degenerate (1×1 or empty) matrix, which is allowed.
fn build_heatmap(table: &Table) -> ChartSpec {
    let columns = table.numeric_column_names();
    // Keep series row-aligned: nulls stay in place and drop out pairwise.
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| {
            table
                .column(name)
                .map(|c| c.values.iter().map(|v| v.as_f64()).collect())
                .unwrap_or_default()
        })
        .collect();

    let n = series.len();
    let matrix = (0..n)
        .map(|i| (0..n).map(|j| pearson(&series[i], &series[j])).collect())
        .collect();

    ChartSpec::Heatmap { columns, matrix }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{demo_table, load_bytes};

    fn request(kind: ChartKind, x: Option<&str>, y: Option<&str>) -> ChartRequest {
        ChartRequest {
            kind,
            x: x.map(String::from),
            y: y.map(String::from),
        }
    }

    #[test]
    fn demo_heatmap_is_two_by_two_with_unit_diagonal() {
        let spec = build_chart(&demo_table(), &request(ChartKind::Heatmap, None, None)).unwrap();
        let ChartSpec::Heatmap { columns, matrix } = spec else {
            panic!("expected heatmap");
        };
        assert_eq!(columns, vec!["Sales", "Profit"]);
        assert_eq!(matrix.len(), 2);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
        assert!((matrix[1][1] - 1.0).abs() < 1e-12);
        assert!((matrix[0][1] - matrix[1][0]).abs() < 1e-12);
        // Sales and Profit move together in the sample.
        assert!(matrix[0][1] > 0.9);
    }

    #[test]
    fn histogram_without_numeric_columns_reports_not_panics() {
        let text_only = load_bytes(b"name,city\nalice,Oslo\nbob,Paris\n").unwrap();
        let err = build_chart(&text_only, &request(ChartKind::Histogram, Some("name"), None));
        assert_eq!(err, Err(ChartError::NoNumericColumns));
    }

    #[test]
    fn xy_chart_without_numeric_columns_reports_not_panics() {
        let text_only = load_bytes(b"name,city\nalice,Oslo\n").unwrap();
        let err = build_chart(&text_only, &request(ChartKind::Bar, Some("name"), None));
        assert_eq!(err, Err(ChartError::NoNumericColumns));
    }

    #[test]
    fn bar_uses_one_bar_per_row_with_labels() {
        let spec = build_chart(
            &demo_table(),
            &request(ChartKind::Bar, Some("Category"), Some("Sales")),
        )
        .unwrap();
        let ChartSpec::Bar { bars, .. } = spec else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].2, "Food");
        assert_eq!(bars[0].1, 150.0);
    }

    #[test]
    fn line_with_numeric_x_keeps_values() {
        let spec = build_chart(
            &demo_table(),
            &request(ChartKind::Line, Some("Sales"), Some("Profit")),
        )
        .unwrap();
        let ChartSpec::Line { points, .. } = spec else {
            panic!("expected line");
        };
        assert_eq!(points[0], [150.0, 50.0]);
    }

    #[test]
    fn heatmap_on_single_numeric_column_is_degenerate_not_an_error() {
        let table = load_bytes(b"n\n1\n2\n3\n").unwrap();
        let spec = build_chart(&table, &request(ChartKind::Heatmap, None, None)).unwrap();
        let ChartSpec::Heatmap { matrix, .. } = spec else {
            panic!("expected heatmap");
        };
        assert_eq!(matrix.len(), 1);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_bins_cover_all_values() {
        let spec = build_chart(
            &demo_table(),
            &request(ChartKind::Histogram, Some("Sales"), None),
        )
        .unwrap();
        let ChartSpec::Histogram { bins, .. } = spec else {
            panic!("expected histogram");
        };
        let total: usize = bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn pearson_of_constant_series_is_nan() {
        let constant = [Some(1.0), Some(1.0), Some(1.0)];
        let rising = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(pearson(&constant, &rising).is_nan());
    }

    #[test]
    fn pearson_uses_pairwise_complete_rows() {
        // Complete rows are (1,2) and (2,1): perfectly anti-correlated. A
        // compacted (misaligned) pairing would report +1 instead.
        let table = load_bytes(b"a,b\n,1\n1,2\n2,1\n").unwrap();
        let spec = build_chart(&table, &request(ChartKind::Heatmap, None, None)).unwrap();
        let ChartSpec::Heatmap { matrix, .. } = spec else {
            panic!("expected heatmap");
        };
        assert!((matrix[0][1] - (-1.0)).abs() < 1e-12);
        assert!((matrix[1][0] - (-1.0)).abs() < 1e-12);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_needs_two_complete_pairs() {
        let a = [Some(1.0), None, Some(3.0)];
        let b = [None, Some(2.0), Some(1.0)];
        // Only one row has both cells present.
        assert!(pearson(&a, &b).is_nan());
    }

    #[test]
    fn histogram_on_all_null_column_reports_no_numeric_values() {
        // "a" has numeric cells so the table passes the numeric-columns check,
        // while the selected text column yields no values to bin.
        let table = load_bytes(b"a,b\n1,x\n2,y\n").unwrap();
        let err = build_chart(&table, &request(ChartKind::Histogram, Some("b"), None));
        assert_eq!(err, Err(ChartError::NoNumericValues));
    }

    #[test]
    fn missing_selection_is_reported() {
        let err = build_chart(&demo_table(), &request(ChartKind::Bar, None, None));
        assert_eq!(err, Err(ChartError::MissingSelection));
    }
}
