use crate::chart::{ChartKind, ChartRequest};
use crate::data::filter::FilterSelection;
use crate::data::loader;
use crate::data::model::Table;
use crate::pipeline::{self, Request, Response};
use crate::session::SessionState;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

/// Tone of the status line under the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Demo-mode state machine.
    pub session: SessionState,

    /// Source table (None until the user uploads a file or asks for the demo).
    pub source: Option<Table>,

    /// Current filter selections (column → value or "All").
    pub filters: FilterSelection,

    /// Column of the descending sort shown in the second preview.
    pub sort_column: Option<String>,

    /// Selected chart kind; None renders nothing ("-- Choose a chart --").
    pub chart_kind: Option<ChartKind>,

    /// X (or histogram value) column for the chart.
    pub chart_x: Option<String>,

    /// Numeric Y column for bar/line/scatter.
    pub chart_y: Option<String>,

    /// Pipeline output for the current selections (cached per interaction).
    pub response: Option<Response>,

    /// Status line shown in the toolbar.
    pub status: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::default(),
            source: None,
            filters: FilterSelection::default(),
            sort_column: None,
            chart_kind: None,
            chart_x: None,
            chart_y: None,
            response: None,
            status: None,
        }
    }
}

impl AppState {
    /// Ingest a successfully parsed upload; leaves demo mode.
    pub fn set_uploaded_table(&mut self, table: Table) {
        self.session.file_loaded();
        self.set_source(table);
        self.status = Some(Status {
            kind: StatusKind::Success,
            message: "File successfully loaded.".into(),
        });
    }

    /// Switch to the built-in demo table.
    pub fn show_demo(&mut self) {
        self.session.request_demo();
        self.set_source(loader::demo_table());
        self.status = Some(Status {
            kind: StatusKind::Info,
            message: "Showing demo example data.".into(),
        });
    }

    /// A load attempt failed: keep whatever was shown before, report the error.
    pub fn set_load_error(&mut self, message: String) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            message,
        });
    }

    fn set_source(&mut self, table: Table) {
        // Fresh table: previous selections may not apply to its columns.
        self.filters = FilterSelection::default();
        self.sort_column = table.column_names().first().cloned();
        self.chart_kind = None;
        self.chart_x = None;
        self.chart_y = None;
        self.source = Some(table);
        self.refresh();
    }

    /// Build the current [`Request`] from the selections.
    pub fn request(&self) -> Request {
        let chart = self.chart_kind.map(|kind| ChartRequest {
            kind,
            x: self.chart_x.clone(),
            y: self.chart_y.clone(),
        });
        Request {
            filters: self.filters.clone(),
            sort: self.sort_column.clone(),
            chart,
        }
    }

    /// Re-run the pipeline after any selection change.
    pub fn refresh(&mut self) {
        self.response = self
            .source
            .as_ref()
            .map(|source| pipeline::run(source, &self.request()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{demo_table, load_bytes};
    use crate::data::model::Value;
    use crate::session::SessionState;

    #[test]
    fn demo_then_upload_replaces_the_displayed_table() {
        let mut state = AppState::default();

        state.show_demo();
        assert_eq!(state.session, SessionState::DemoActive);
        assert_eq!(state.source.as_ref().unwrap().n_rows(), 10);

        let uploaded = load_bytes(b"a\n1\n2\n").unwrap();
        state.set_uploaded_table(uploaded);
        assert_eq!(state.session, SessionState::Idle);
        assert_eq!(state.source.as_ref().unwrap().n_rows(), 2);
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Success);
    }

    #[test]
    fn refresh_applies_current_selections() {
        let mut state = AppState::default();
        state.set_uploaded_table(demo_table());
        state
            .filters
            .insert("Category".into(), Some(Value::Text("Food".into())));
        state.sort_column = Some("Sales".into());
        state.refresh();

        let response = state.response.as_ref().unwrap();
        assert_eq!(response.filtered.n_rows(), 4);
        assert_eq!(
            response.sorted.column("Sales").unwrap().values[0],
            Value::Integer(400)
        );
    }

    #[test]
    fn load_error_keeps_previous_source() {
        let mut state = AppState::default();
        state.show_demo();
        state.set_load_error("could not parse file as CSV: bad".into());
        assert!(state.source.is_some());
        assert_eq!(state.status.as_ref().unwrap().kind, StatusKind::Error);
    }
}
