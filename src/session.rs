/// Where the currently displayed table came from.
///
/// Two-state machine: `Idle` until the user asks for the demo, `DemoActive`
/// until a real file loads. A successful upload always wins over demo mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    DemoActive,
}

impl SessionState {
    /// User pressed "Show Demo Example".
    pub fn request_demo(&mut self) {
        *self = SessionState::DemoActive;
    }

    /// A real file parsed successfully.
    pub fn file_loaded(&mut self) {
        *self = SessionState::Idle;
    }

    pub fn is_demo(self) -> bool {
        self == SessionState::DemoActive
    }
}
