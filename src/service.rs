use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::assembler;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{CustodyBuddyError, Result};
use crate::models::{
    CaseAnalysisReport, ContentSegment, EmailBuddyResponse, IncidentData, IncidentReport,
    JargonExplanation, SourceDocument, ToneOption,
};
use crate::prompts::Task;
use crate::transport::{GeminiTransport, Transport};
use crate::validation;

/// Typed operations behind the three assistant tools. One provider call per
/// operation; responses are schema-validated before deserialization.
pub struct AiService {
    dispatcher: Dispatcher,
}

impl AiService {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self {
            dispatcher: Dispatcher::new(tx, model),
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let transport = Arc::new(GeminiTransport::new(cfg.gemini.api_key.clone())?);
        Ok(Self::new(transport, cfg.gemini.model.clone()))
    }

    /// Analyze uploaded documents and pasted text into a case report.
    pub async fn analyze_case(
        &self,
        files: &[SourceDocument],
        pasted_text: &str,
    ) -> Result<CaseAnalysisReport> {
        let segments = assembler::assemble(files, pasted_text)?;
        let raw = self
            .dispatcher
            .dispatch(Task::CaseAnalysis, &segments, &[])
            .await?;
        parse_validated(Task::CaseAnalysis, &raw)
    }

    /// Analyze a received email and produce the three method drafts.
    pub async fn analyze_email(&self, received_email: &str) -> Result<EmailBuddyResponse> {
        let segments = vec![ContentSegment::Text(received_email.to_string())];
        let raw = self
            .dispatcher
            .dispatch(Task::EmailDraft, &segments, &[])
            .await?;
        parse_validated(Task::EmailDraft, &raw)
    }

    /// Draft a reply in one specific tone. The reply is the email text
    /// itself, not JSON.
    pub async fn draft_with_tone(
        &self,
        tone: ToneOption,
        received_email: &str,
        key_points: &str,
    ) -> Result<String> {
        let user_prompt = format!(
            "Please draft a response with the tone \"{}\".\n\n\
             **Original Email Received:**\n```\n{received_email}\n```\n\n\
             **My Key Points to Include:**\n```\n{key_points}\n```\n",
            tone.label()
        );
        let segments = vec![ContentSegment::Text(user_prompt)];
        let context = vec![("Requested Tone".to_string(), tone.label().to_string())];
        let raw = self
            .dispatcher
            .dispatch(Task::ToneDraft, &segments, &context)
            .await?;
        Ok(raw.trim().to_string())
    }

    /// Explain a legal term found in correspondence.
    pub async fn explain_jargon(
        &self,
        term: &str,
        context_sentence: &str,
    ) -> Result<JargonExplanation> {
        let user_prompt =
            format!("Please explain the following legal term:\n\nTerm: \"{term}\"\nContext: \"{context_sentence}\"\n");
        let segments = vec![ContentSegment::Text(user_prompt)];
        let raw = self
            .dispatcher
            .dispatch(Task::JargonExplain, &segments, &[])
            .await?;
        parse_validated(Task::JargonExplain, &raw)
    }

    /// Generate a structured incident report from the user's narrative. The
    /// jurisdiction travels as instruction context so the legal insights are
    /// scoped to it.
    pub async fn generate_incident_report(&self, data: &IncidentData) -> Result<IncidentReport> {
        let category = data
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "Unspecified".to_string());
        let user_prompt = format!(
            "Please analyze the following incident and generate a structured report.\n\n\
             **Incident Date & Time:** {}\n\
             **Location:** {}\n\
             **Category:** {category}\n\
             **People Involved:** {}\n\n\
             **User's Narrative of the Incident:**\n---\n{}\n---\n",
            data.incident_date,
            data.location,
            data.people_involved.join(", "),
            data.narrative,
        );
        let segments = vec![ContentSegment::Text(user_prompt)];
        let context = vec![("Jurisdiction".to_string(), data.jurisdiction.clone())];
        let raw = self
            .dispatcher
            .dispatch(Task::IncidentReport, &segments, &context)
            .await?;
        parse_validated(Task::IncidentReport, &raw)
    }
}

/// Validate a raw reply against the task schema, then deserialize into the
/// task's record type.
fn parse_validated<T: DeserializeOwned>(task: Task, raw: &str) -> Result<T> {
    let Some(schema) = task.schema() else {
        return Err(CustodyBuddyError::MalformedResponse(format!(
            "task '{}' has no response schema",
            task.key()
        )));
    };
    let value = validation::validate(raw, schema)?;
    serde_json::from_value(value).map_err(|e| {
        CustodyBuddyError::MalformedResponse(format!("response shape mismatch: {e}"))
    })
}
