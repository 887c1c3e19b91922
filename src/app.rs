use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CsvVisualizerApp {
    pub state: AppState,
}

impl eframe::App for CsvVisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + status line ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter / sort / chart controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: previews, summary, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(response) = &state.response else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file (File → Open CSV…) or show the demo example.");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("DataFrame preview");
            table::table_preview(ui, "preview", &response.filtered);
            ui.add_space(8.0);

            ui.heading("Dataset Information");
            table::summary_block(ui, &response.summary);
            ui.add_space(8.0);

            ui.heading("Sorted DataFrame");
            table::table_preview(ui, "sorted_preview", &response.sorted);
            ui.add_space(8.0);

            match &response.chart {
                None => {}
                Some(Ok(spec)) => {
                    if let Some(kind) = state.chart_kind {
                        ui.heading(kind.to_string());
                    }
                    plot::render_chart(ui, spec);
                }
                // Non-fatal: the rest of the dashboard stays usable.
                Some(Err(e)) => {
                    ui.label(e.to_string());
                }
            }
        });
}
