use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::ChartSpec;
use crate::color::{correlation_color, label_colors};

// ---------------------------------------------------------------------------
// Chart rendering (central panel)
// ---------------------------------------------------------------------------

/// Render one chart spec produced by the pipeline.
pub fn render_chart(ui: &mut Ui, spec: &ChartSpec) {
    match spec {
        ChartSpec::Bar { x_label, y_label, bars } => bar_chart(ui, x_label, y_label, bars),
        ChartSpec::Line { x_label, y_label, points } => {
            xy_plot(ui, "line_chart", x_label, y_label, |plot_ui| {
                let pts: PlotPoints = points.iter().copied().collect();
                plot_ui.line(Line::new(pts).width(1.5));
            });
        }
        ChartSpec::Scatter { x_label, y_label, points } => {
            xy_plot(ui, "scatter_plot", x_label, y_label, |plot_ui| {
                let pts: PlotPoints = points.iter().copied().collect();
                plot_ui.points(Points::new(pts).radius(3.0));
            });
        }
        ChartSpec::Histogram { label, bin_width, bins } => {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|&(center, count)| Bar::new(center, count as f64).width(*bin_width))
                .collect();
            xy_plot(ui, "histogram", label, "count", |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
            });
        }
        ChartSpec::Heatmap { columns, matrix } => heatmap(ui, columns, matrix),
    }
}

fn xy_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    draw: impl FnOnce(&mut egui_plot::PlotUi),
) {
    Plot::new(id.to_string())
        .legend(Legend::default())
        .x_axis_label(x_label.to_string())
        .y_axis_label(y_label.to_string())
        .height(320.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, draw);
}

// One BarChart per distinct X label so the legend shows the categories.
fn bar_chart(ui: &mut Ui, x_label: &str, y_label: &str, bars: &[(f64, f64, String)]) {
    let colors = label_colors(bars.iter().map(|(_, _, l)| l.as_str()));
    let width = bar_width(bars);

    xy_plot(ui, "bar_chart", x_label, y_label, |plot_ui| {
        for (label, color) in &colors {
            let group: Vec<Bar> = bars
                .iter()
                .filter(|(_, _, l)| l == label)
                .map(|&(x, y, _)| Bar::new(x, y).width(width))
                .collect();
            plot_ui.bar_chart(BarChart::new(group).name(label).color(*color));
        }
    });
}

/// Bars at 60% of the smallest gap between distinct positions.
fn bar_width(bars: &[(f64, f64, String)]) -> f64 {
    let mut xs: Vec<f64> = bars.iter().map(|(x, _, _)| *x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    let min_gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);
    if min_gap.is_finite() {
        min_gap * 0.6
    } else {
        0.6 // single distinct position
    }
}

// ---------------------------------------------------------------------------
// Correlation heatmap – painted colour grid with numeric labels
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, columns: &[String], matrix: &[Vec<f64>]) {
    if columns.is_empty() {
        ui.label("No numeric columns to correlate.");
        return;
    }

    let cell = Vec2::new(72.0, 44.0);
    egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for name in columns {
                ui.strong(name);
            }
            ui.end_row();

            for (name, row) in columns.iter().zip(matrix) {
                ui.strong(name);
                for &r in row {
                    let color = correlation_color(r);
                    let text = if r.is_nan() {
                        "n/a".to_string()
                    } else {
                        format!("{r:.2}")
                    };
                    let (rect, _) = ui.allocate_exact_size(cell, Sense::hover());
                    let painter = ui.painter();
                    painter.rect_filled(rect, CornerRadius::same(2), color);
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        text,
                        FontId::proportional(13.0),
                        contrast_text_color(color),
                    );
                }
                ui.end_row();
            }
        });
}

fn contrast_text_color(background: Color32) -> Color32 {
    let luminance = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luminance > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
