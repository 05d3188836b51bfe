//! Tool Controllers: per-feature state machines over the AI service. Each
//! controller owns its state, exposes a narrow action interface to the UI
//! layer, and catches every pipeline error at a single boundary.

pub mod case_analysis;
pub mod email_buddy;
pub mod incident_report;

pub use case_analysis::{CaseAnalysisController, CaseAnalysisState};
pub use email_buddy::{EmailBuddyController, EmailBuddyState};
pub use incident_report::{IncidentReportController, IncidentReportState};

/// Request lifecycle state shared by all tools. `result` and `error` are
/// mutually exclusive, and loading implies both are cleared.
#[derive(Debug, Clone)]
pub struct ToolState<R> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<R>,
}

impl<R> Default for ToolState<R> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            result: None,
        }
    }
}

impl<R> ToolState<R> {
    /// Enter the requesting state: loading on, prior outcome cleared.
    pub(crate) fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.result = None;
    }
}
