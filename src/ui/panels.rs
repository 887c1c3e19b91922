use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::data::export::{to_csv_bytes, EXPORT_FILE_NAME};
use crate::data::filter::{unique_values, FILTER_COLUMNS};
use crate::data::loader;
use crate::data::model::Table;
use crate::state::{AppState, StatusKind};

// ---------------------------------------------------------------------------
// Left side panel – filter / sort / chart controls
// ---------------------------------------------------------------------------

/// Render the left control panel. Returns after queuing a pipeline refresh if
/// any selection changed.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    if ui.button("Show Demo Example").clicked() {
        state.show_demo();
    }
    ui.add_space(4.0);

    // Clone the source so we can mutate state inside the widget closures.
    let Some(source) = state.source.clone() else {
        ui.label("No data loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_controls(ui, state, &source);
            ui.separator();
            changed |= sort_control(ui, state, &source);
            ui.separator();
            changed |= chart_controls(ui, state, &source);
        });

    if changed {
        state.refresh();
    }
}

/// One "All + unique values" selector per filterable column present.
fn filter_controls(ui: &mut Ui, state: &mut AppState, source: &Table) -> bool {
    ui.strong("Filters");
    let mut changed = false;

    for &col in FILTER_COLUMNS {
        if source.column(col).is_none() {
            continue;
        }
        let selection = state.filters.entry(col.to_string()).or_insert(None);
        let selected_text = selection
            .as_ref()
            .map_or_else(|| "All".to_string(), |v| v.label());

        ui.label(format!("Filter by {col}:"));
        egui::ComboBox::from_id_salt(format!("filter_{col}"))
            .selected_text(selected_text)
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(selection.is_none(), "All").clicked() {
                    *selection = None;
                    changed = true;
                }
                for value in unique_values(source, col) {
                    let is_selected = selection.as_ref() == Some(&value);
                    if ui.selectable_label(is_selected, value.label()).clicked() {
                        *selection = Some(value);
                        changed = true;
                    }
                }
            });
    }
    changed
}

fn sort_control(ui: &mut Ui, state: &mut AppState, source: &Table) -> bool {
    ui.strong("Select column to sort by:");
    let mut changed = false;
    let current = state.sort_column.clone().unwrap_or_default();

    egui::ComboBox::from_id_salt("sort_column")
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for col in source.column_names() {
                if ui.selectable_label(current == col, &col).clicked() {
                    state.sort_column = Some(col);
                    changed = true;
                }
            }
        });
    changed
}

fn chart_controls(ui: &mut Ui, state: &mut AppState, source: &Table) -> bool {
    ui.strong("Choose a chart type");
    let mut changed = false;

    let kind_text = state
        .chart_kind
        .map_or_else(|| "-- Choose a chart --".to_string(), |k| k.to_string());
    egui::ComboBox::from_id_salt("chart_kind")
        .selected_text(kind_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.chart_kind.is_none(), "-- Choose a chart --")
                .clicked()
            {
                state.chart_kind = None;
                changed = true;
            }
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(state.chart_kind == Some(kind), kind.to_string())
                    .clicked()
                {
                    state.chart_kind = Some(kind);
                    // Kind changed: old column picks may not fit the new kind.
                    state.chart_x = None;
                    state.chart_y = None;
                    changed = true;
                }
            }
        });

    let Some(kind) = state.chart_kind else {
        return changed;
    };

    let numeric = source.numeric_column_names();
    if kind.is_xy() {
        changed |= column_combo(ui, "Select X column:", "chart_x", &source.column_names(), &mut state.chart_x);
        if numeric.is_empty() {
            ui.label(RichText::new("No numeric columns available.").color(Color32::YELLOW));
        } else {
            changed |= column_combo(ui, "Select Y column:", "chart_y", &numeric, &mut state.chart_y);
        }
    } else if kind == ChartKind::Histogram {
        if numeric.is_empty() {
            ui.label(RichText::new("No numeric columns available.").color(Color32::YELLOW));
        } else {
            changed |= column_combo(
                ui,
                "Select column for histogram:",
                "chart_x",
                &numeric,
                &mut state.chart_x,
            );
        }
    }
    // Heatmap needs no column picks.
    changed
}

fn column_combo(
    ui: &mut Ui,
    label: &str,
    id: &str,
    options: &[String],
    selection: &mut Option<String>,
) -> bool {
    // Drop selections that no longer exist (e.g. after a new upload).
    if let Some(sel) = selection.as_ref() {
        if !options.contains(sel) {
            *selection = None;
        }
    }
    let mut changed = false;
    ui.label(label);
    egui::ComboBox::from_id_salt(id.to_string())
        .selected_text(selection.clone().unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(selection.as_deref() == Some(option.as_str()), option)
                    .clicked()
                {
                    *selection = Some(option.clone());
                    changed = true;
                }
            }
        });
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.response.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Download filtered dataset…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(response) = &state.response {
            ui.label(format!(
                "{} rows × {} columns shown",
                response.filtered.n_rows(),
                response.filtered.n_cols()
            ));
            ui.separator();
        }

        if let Some(status) = &state.status {
            let color = match status.kind {
                StatusKind::Success => Color32::LIGHT_GREEN,
                StatusKind::Info => Color32::LIGHT_BLUE,
                StatusKind::Error => Color32::RED,
            };
            ui.label(RichText::new(&status.message).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload a CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let loaded = std::fs::read(&path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|bytes| loader::load_bytes(&bytes).map_err(Into::into));
        match loaded {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.column_names()
                );
                state.set_uploaded_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.set_load_error(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(response) = &state.response else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Download filtered dataset as CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = to_csv_bytes(&response.filtered)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| {
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing {}", path.display()))
            });
        match written {
            Ok(()) => {
                log::info!("Exported filtered dataset to {}", path.display());
                state.status = Some(crate::state::Status {
                    kind: StatusKind::Success,
                    message: "Filtered dataset exported.".into(),
                });
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.set_load_error(format!("Error: {e:#}"));
            }
        }
    }
}
