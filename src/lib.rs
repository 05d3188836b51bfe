pub mod assembler;
pub mod config;
pub mod controllers;
pub mod dispatcher;
pub mod error;
pub mod example_data;
pub mod models;
pub mod prompts;
pub mod schemas;
pub mod service;
pub mod transport;
pub mod validation;

pub use crate::config::Config;
pub use crate::controllers::{
    CaseAnalysisController, EmailBuddyController, IncidentReportController, ToolState,
};
pub use crate::error::{CustodyBuddyError, Result, user_facing_message};
pub use crate::models::{
    CaseAnalysisReport, ContentSegment, EmailBuddyResponse, IncidentData, IncidentReport,
    JargonExplanation, SourceDocument, ToneOption,
};
pub use crate::prompts::Task;
pub use crate::service::AiService;

/// Initialize stderr tracing for the embedding host. Safe to call more than
/// once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
