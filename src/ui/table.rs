use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Table;
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Table preview
// ---------------------------------------------------------------------------

/// Render a scrollable preview grid of the table.
pub fn table_preview(ui: &mut Ui, id: &str, table: &Table) {
    if table.n_cols() == 0 {
        ui.label("Empty table.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .columns(TableColumn::auto().at_least(60.0), table.n_cols())
            .max_scroll_height(220.0)
            .header(20.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui| {
                        ui.strong(&col.name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.n_rows(), |mut row| {
                    let i = row.index();
                    for col in &table.columns {
                        row.col(|ui| {
                            ui.label(col.values[i].to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Dataset information block
// ---------------------------------------------------------------------------

/// Render the summary: shape, missing counts, and dtypes per column.
pub fn summary_block(ui: &mut Ui, summary: &Summary) {
    ui.label(format!("Rows: {}, Columns: {}", summary.rows, summary.cols));
    ui.add_space(4.0);

    egui::Grid::new("summary_grid")
        .striped(true)
        .spacing([24.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Column");
            ui.strong("Missing");
            ui.strong("Dtype");
            ui.end_row();
            for col in &summary.columns {
                ui.label(&col.name);
                ui.label(col.missing.to_string());
                ui.label(col.dtype.to_string());
                ui.end_row();
            }
        });
}
