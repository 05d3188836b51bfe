use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ToolState;
use crate::error::{CustodyBuddyError, Result, user_facing_message};
use crate::models::{CaseAnalysisReport, SourceDocument};
use crate::service::AiService;

const ACTION: &str = "document analysis";

#[derive(Debug, Clone, Default)]
pub struct CaseAnalysisState {
    pub files: Vec<SourceDocument>,
    pub pasted_text: String,
    pub tool: ToolState<CaseAnalysisReport>,
}

/// Controller for the document/case analyzer.
pub struct CaseAnalysisController {
    service: Arc<AiService>,
    state: Mutex<CaseAnalysisState>,
    generation: AtomicU64,
}

impl CaseAnalysisController {
    pub fn new(service: Arc<AiService>) -> Self {
        Self {
            service,
            state: Mutex::new(CaseAnalysisState::default()),
            generation: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CaseAnalysisState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CaseAnalysisState {
        self.lock().clone()
    }

    pub fn set_files(&self, files: Vec<SourceDocument>) {
        self.lock().files = files;
    }

    pub fn add_file(&self, file: SourceDocument) {
        self.lock().files.push(file);
    }

    pub fn set_pasted_text(&self, text: impl Into<String>) {
        self.lock().pasted_text = text.into();
    }

    pub fn set_error(&self, error: Option<String>) {
        self.lock().tool.error = error;
    }

    /// Run the analysis. Exactly one outbound request per successful
    /// transition into the requesting state.
    pub async fn submit(&self) -> Result<()> {
        let (files, pasted_text, generation) = {
            let mut state = self.lock();
            if state.tool.is_loading {
                return Err(CustodyBuddyError::Validation(
                    "An analysis is already in progress.".to_string(),
                ));
            }
            if state.files.is_empty() && state.pasted_text.trim().is_empty() {
                let err = CustodyBuddyError::Validation(
                    "Please upload at least one document or paste some text to analyze."
                        .to_string(),
                );
                state.tool.error = Some(user_facing_message(&err, ACTION));
                return Err(err);
            }
            state.tool.begin_request();
            (
                state.files.clone(),
                state.pasted_text.clone(),
                self.generation.load(Ordering::SeqCst),
            )
        };

        let outcome = self.service.analyze_case(&files, &pasted_text).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            // Reset happened while the request was in flight; discard.
            return Ok(());
        }
        state.tool.is_loading = false;
        match outcome {
            Ok(report) => {
                state.tool.result = Some(report);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Case analysis failed: {err}");
                state.tool.error = Some(user_facing_message(&err, ACTION));
                Err(err)
            }
        }
    }

    /// Return to the idle state, discarding any in-flight request's outcome.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock() = CaseAnalysisState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Candidate, GeminiContent, GeminiPart, GeminiRequest, GeminiResponse,
    };
    use crate::transport::Transport;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    const CASE_REPORT_JSON: &str = r#"{
        "documentTypes": [{"type": "Court Order", "source": "order.pdf"}],
        "summary": "The order sets the parenting schedule.",
        "keyClauses": [{
            "clause": "Exchanges occur Saturdays at 6 PM.",
            "explanation": "You are required to hand over the children at 6 PM.",
            "source": "order.pdf"
        }],
        "discrepancies": [{
            "description": "The email proposes 1 PM, conflicting with order.pdf.",
            "sources": ["order.pdf", "email.txt"]
        }],
        "legalJargon": [{"term": "Right of First Refusal", "explanation": "An offer to the other parent before third-party care."}],
        "actionItems": [{"item": "Confirm the exchange time in writing.", "source": "order.pdf"}],
        "suggestedNextSteps": "Reply in writing citing the order.",
        "disclaimer": "This is an AI-generated analysis and does not constitute legal advice."
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

    fn controller_with(reply: &str) -> (CaseAnalysisController, Arc<CountingTransport>) {
        let transport = Arc::new(CountingTransport::new(reply));
        let service = Arc::new(AiService::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            "test-model".to_string(),
        ));
        (CaseAnalysisController::new(service), transport)
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_request() {
        let (controller, transport) = controller_with(CASE_REPORT_JSON);

        let err = controller.submit().await.expect_err("must reject");
        assert!(matches!(err, CustodyBuddyError::Validation(_)));

        let state = controller.snapshot();
        assert_eq!(
            state.tool.error.as_deref(),
            Some("Please upload at least one document or paste some text to analyze.")
        );
        assert!(!state.tool.is_loading);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn pasted_text_submission_succeeds() {
        let (controller, transport) = controller_with(CASE_REPORT_JSON);
        controller.set_pasted_text("Per the order, exchanges are at 6 PM.");

        controller.submit().await.expect("submit should succeed");

        let state = controller.snapshot();
        assert!(!state.tool.is_loading);
        assert!(state.tool.error.is_none());
        let report = state.tool.result.expect("result should be stored");
        assert_eq!(report.document_types[0].doc_type, "Court Order");
        assert_eq!(report.discrepancies.len(), 1);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unreadable_file_surfaces_as_a_named_error() {
        let (controller, transport) = controller_with(CASE_REPORT_JSON);
        controller.add_file(SourceDocument::Pdf {
            name: "blank.pdf".to_string(),
            pages: vec![],
        });

        let err = controller.submit().await.expect_err("must fail");
        assert!(matches!(err, CustodyBuddyError::UnreadableFile(_)));

        let state = controller.snapshot();
        assert!(
            state
                .tool
                .error
                .as_deref()
                .is_some_and(|m| m.contains("blank.pdf"))
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_reply_becomes_a_retryable_error_state() {
        let (controller, _transport) = controller_with("{\"summary\": \"only\"}");
        controller.set_pasted_text("some text");

        let err = controller.submit().await.expect_err("must fail");
        assert!(matches!(err, CustodyBuddyError::MalformedResponse(_)));

        let state = controller.snapshot();
        assert!(state.tool.result.is_none());
        assert!(
            state
                .tool
                .error
                .as_deref()
                .is_some_and(|m| m.contains("unexpected response"))
        );
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let (controller, _transport) = controller_with(CASE_REPORT_JSON);
        controller.set_pasted_text("notes");
        controller.submit().await.expect("submit should succeed");

        controller.reset();
        let once = controller.snapshot();
        controller.reset();
        let twice = controller.snapshot();

        assert!(once.files.is_empty() && once.pasted_text.is_empty());
        assert!(once.tool.result.is_none() && once.tool.error.is_none());
        assert_eq!(once.pasted_text, twice.pasted_text);
        assert_eq!(once.tool.result.is_none(), twice.tool.result.is_none());
        assert_eq!(once.tool.error, twice.tool.error);
    }
}
