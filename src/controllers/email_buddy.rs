use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ToolState;
use crate::error::{CustodyBuddyError, Result, user_facing_message};
use crate::example_data;
use crate::models::{EmailAnalysis, EmailBuddyResponse, JargonExplanation, ToneOption};
use crate::service::AiService;

const ANALYSIS_ACTION: &str = "email analysis";
const DRAFT_ACTION: &str = "draft generation";

#[derive(Debug, Clone, Default)]
pub struct EmailBuddyState {
    pub received_email: String,
    pub key_points: String,
    pub tone_drafts: HashMap<ToneOption, String>,
    pub active_draft_tone: Option<ToneOption>,
    pub is_loading_draft: bool,
    pub is_showing_example: bool,
    pub tool: ToolState<EmailBuddyResponse>,
}

/// Controller for the email analysis and drafting assistant.
pub struct EmailBuddyController {
    service: Arc<AiService>,
    state: Mutex<EmailBuddyState>,
    generation: AtomicU64,
}

impl EmailBuddyController {
    pub fn new(service: Arc<AiService>) -> Self {
        Self {
            service,
            state: Mutex::new(EmailBuddyState::default()),
            generation: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EmailBuddyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> EmailBuddyState {
        self.lock().clone()
    }

    pub fn set_received_email(&self, email: impl Into<String>) {
        let mut state = self.lock();
        state.received_email = email.into();
        state.is_showing_example = false;
    }

    /// Changing the key points invalidates any drafts built from them.
    pub fn set_key_points(&self, points: impl Into<String>) {
        let mut state = self.lock();
        state.key_points = points.into();
        state.tone_drafts.clear();
    }

    pub fn set_error(&self, error: Option<String>) {
        self.lock().tool.error = error;
    }

    /// Analyze the received email and produce the three method drafts.
    pub async fn submit(&self) -> Result<()> {
        let (received_email, generation) = {
            let mut state = self.lock();
            if state.tool.is_loading {
                return Err(CustodyBuddyError::Validation(
                    "An analysis is already in progress.".to_string(),
                ));
            }
            if state.received_email.trim().is_empty() {
                let err = CustodyBuddyError::Validation(
                    "Please paste the email you received to get started.".to_string(),
                );
                state.tool.error = Some(user_facing_message(&err, ANALYSIS_ACTION));
                return Err(err);
            }
            state.tool.begin_request();
            (
                state.received_email.clone(),
                self.generation.load(Ordering::SeqCst),
            )
        };

        let outcome = self.service.analyze_email(&received_email).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(());
        }
        state.tool.is_loading = false;
        match outcome {
            Ok(response) => {
                state.key_points = key_points_suggestion(&response.analysis);
                state.tool.result = Some(response);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Email analysis failed: {err}");
                state.tool.error = Some(user_facing_message(&err, ANALYSIS_ACTION));
                Err(err)
            }
        }
    }

    /// Draft a reply in one specific tone, cached per tone until the key
    /// points change.
    pub async fn generate_draft(&self, tone: ToneOption) -> Result<()> {
        let (received_email, key_points, generation) = {
            let mut state = self.lock();
            if state.is_loading_draft {
                return Err(CustodyBuddyError::Validation(
                    "A draft is already being generated.".to_string(),
                ));
            }
            if state.key_points.trim().is_empty() {
                let err = CustodyBuddyError::Validation(
                    "Please provide key points before generating a draft.".to_string(),
                );
                state.tool.error = Some(user_facing_message(&err, DRAFT_ACTION));
                return Err(err);
            }
            state.is_loading_draft = true;
            state.active_draft_tone = Some(tone);
            state.tool.error = None;
            (
                state.received_email.clone(),
                state.key_points.clone(),
                self.generation.load(Ordering::SeqCst),
            )
        };

        let outcome = self
            .service
            .draft_with_tone(tone, &received_email, &key_points)
            .await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(());
        }
        state.is_loading_draft = false;
        state.active_draft_tone = None;
        match outcome {
            Ok(draft) => {
                state.tone_drafts.insert(tone, draft);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Draft generation failed: {err}");
                state.tool.error = Some(user_facing_message(&err, DRAFT_ACTION));
                Err(err)
            }
        }
    }

    /// Explain a legal term found in the correspondence. Pass-through: the
    /// explanation goes straight to the caller without touching tool state.
    pub async fn explain_jargon(
        &self,
        term: &str,
        context_sentence: &str,
    ) -> Result<JargonExplanation> {
        self.service.explain_jargon(term, context_sentence).await
    }

    /// Load the canned demonstration exchange in place of user content.
    pub fn show_example(&self) {
        let example = example_data::email_buddy_example();
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        *state = EmailBuddyState::default();
        state.received_email = example.email.to_string();
        state.key_points = key_points_suggestion(&example.response.analysis);
        state.tool.result = Some(example.response);
        state.is_showing_example = true;
    }

    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock() = EmailBuddyState::default();
    }
}

fn key_points_suggestion(analysis: &EmailAnalysis) -> String {
    analysis
        .key_demands
        .iter()
        .map(|demand| format!("- Respond to the demand: \"{demand}\""))
        .collect::<Vec<_>>()
        .join("\n")
}
