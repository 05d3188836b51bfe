use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ToolState;
use crate::error::{CustodyBuddyError, Result, user_facing_message};
use crate::models::{IncidentData, IncidentReport};
use crate::service::AiService;

const ACTION: &str = "incident report generation";

#[derive(Debug, Clone, Default)]
pub struct IncidentReportState {
    pub incident_data: IncidentData,
    pub tool: ToolState<IncidentReport>,
}

/// Controller for the incident report generator.
pub struct IncidentReportController {
    service: Arc<AiService>,
    state: Mutex<IncidentReportState>,
    generation: AtomicU64,
}

impl IncidentReportController {
    pub fn new(service: Arc<AiService>) -> Self {
        Self {
            service,
            state: Mutex::new(IncidentReportState::default()),
            generation: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IncidentReportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> IncidentReportState {
        self.lock().clone()
    }

    pub fn set_incident_data(&self, data: IncidentData) {
        self.lock().incident_data = data;
    }

    /// Edit the incident form in place, mirroring field-level form updates.
    pub fn update_incident_data(&self, update: impl FnOnce(&mut IncidentData)) {
        update(&mut self.lock().incident_data);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.lock().tool.error = error;
    }

    /// Generate the report. Narrative, jurisdiction, and date are required
    /// before any request is dispatched.
    pub async fn submit(&self) -> Result<()> {
        let (data, generation) = {
            let mut state = self.lock();
            if state.tool.is_loading {
                return Err(CustodyBuddyError::Validation(
                    "A report is already being generated.".to_string(),
                ));
            }
            let missing_field = if state.incident_data.narrative.trim().is_empty() {
                Some("Please describe what happened in the incident narrative.")
            } else if state.incident_data.jurisdiction.trim().is_empty() {
                Some("Please provide the jurisdiction (province or state) for the incident.")
            } else if state.incident_data.incident_date.trim().is_empty() {
                Some("Please provide the date of the incident.")
            } else {
                None
            };
            if let Some(message) = missing_field {
                let err = CustodyBuddyError::Validation(message.to_string());
                state.tool.error = Some(user_facing_message(&err, ACTION));
                return Err(err);
            }
            state.tool.begin_request();
            (
                state.incident_data.clone(),
                self.generation.load(Ordering::SeqCst),
            )
        };

        let outcome = self.service.generate_incident_report(&data).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(());
        }
        state.tool.is_loading = false;
        match outcome {
            Ok(report) => {
                state.tool.result = Some(report);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Incident report generation failed: {err}");
                state.tool.error = Some(user_facing_message(&err, ACTION));
                Err(err)
            }
        }
    }

    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock() = IncidentReportState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Candidate, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, IncidentCategory,
        Severity,
    };
    use crate::transport::Transport;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    const INCIDENT_REPORT_JSON: &str = r#"{
        "title": "Unilateral schedule change at exchange",
        "category": "Schedule Violation",
        "severity": "Medium",
        "severityJustification": "A court-ordered exchange time was changed without agreement.",
        "professionalSummary": "On June 1 the scheduled 6 PM exchange was moved to 1 PM without consent.",
        "observedImpact": "The children experienced an abrupt change to their routine.",
        "legalInsights": "In Ontario, parenting order exchange terms are binding on both parties.",
        "sources": ["https://www.ontario.ca/page/family-law", "https://stepstojustice.ca"],
        "aiNotes": "Record exchange times contemporaneously."
    }"#;

    struct CountingTransport {
        calls: AtomicUsize,
        reply: String,
    }

    impl CountingTransport {
        fn new(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
            }
        }
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn generate(&self, _req: &GeminiRequest) -> Result<GeminiResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GeminiResponse {
                candidates: vec![Candidate {
                    content: GeminiContent {
                        role: Some("model".to_string()),
                        parts: vec![GeminiPart::text(self.reply.clone())],
                    },
                }],
            })
        }
    }

    fn controller_with(reply: &str) -> (IncidentReportController, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport::new(reply));
        let service = Arc::new(AiService::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            "test-model".to_string(),
        ));
        (IncidentReportController::new(service), transport)
    }

    fn filled_incident_data() -> IncidentData {
        IncidentData {
            narrative: "The other parent moved the exchange to 1 PM without asking.".to_string(),
            jurisdiction: "Ontario".to_string(),
            incident_date: "2025-06-01 18:00".to_string(),
            location: "School parking lot".to_string(),
            category: Some(IncidentCategory::ScheduleViolation),
            people_involved: vec!["Co-parent".to_string()],
        }
    }

    #[tokio::test]
    async fn blank_jurisdiction_is_rejected_before_any_request() {
        let (controller, transport) = controller_with(INCIDENT_REPORT_JSON);
        let mut data = filled_incident_data();
        data.jurisdiction = String::new();
        controller.set_incident_data(data);

        let err = controller.submit().await.expect_err("must reject");
        assert!(matches!(err, CustodyBuddyError::Validation(_)));

        let state = controller.snapshot();
        assert!(
            state
                .tool
                .error
                .as_deref()
                .is_some_and(|m| m.contains("jurisdiction"))
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_narrative_is_rejected_with_a_specific_message() {
        let (controller, transport) = controller_with(INCIDENT_REPORT_JSON);
        let mut data = filled_incident_data();
        data.narrative = "   ".to_string();
        controller.set_incident_data(data);

        let err = controller.submit().await.expect_err("must reject");
        assert!(err.to_string().contains("narrative"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn complete_form_generates_a_typed_report() {
        let (controller, transport) = controller_with(INCIDENT_REPORT_JSON);
        controller.set_incident_data(filled_incident_data());

        controller.submit().await.expect("submit should succeed");

        let state = controller.snapshot();
        assert!(!state.tool.is_loading);
        assert!(state.tool.error.is_none());
        let report = state.tool.result.expect("result should be stored");
        assert_eq!(report.category, IncidentCategory::ScheduleViolation);
        assert_eq!(report.severity, Severity::Medium);
        assert_eq!(report.sources.len(), 2);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_incident_data_edits_fields_in_place() {
        let (controller, _transport) = controller_with(INCIDENT_REPORT_JSON);
        controller.update_incident_data(|data| {
            data.jurisdiction = "British Columbia".to_string();
            data.people_involved.push("Witness".to_string());
        });

        let state = controller.snapshot();
        assert_eq!(state.incident_data.jurisdiction, "British Columbia");
        assert_eq!(state.incident_data.people_involved, vec!["Witness"]);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let (controller, _transport) = controller_with(INCIDENT_REPORT_JSON);
        controller.set_incident_data(filled_incident_data());
        controller.submit().await.expect("submit should succeed");

        controller.reset();
        let once = controller.snapshot();
        controller.reset();
        let twice = controller.snapshot();

        assert_eq!(once.incident_data, IncidentData::default());
        assert!(once.tool.result.is_none() && once.tool.error.is_none());
        assert_eq!(once.incident_data, twice.incident_data);
        assert_eq!(once.tool.error, twice.tool.error);
    }
}
