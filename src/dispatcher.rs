use std::sync::Arc;

use crate::error::{CustodyBuddyError, Result};
use crate::models::{ContentSegment, GeminiContent, GeminiPart, GeminiRequest, GenerationConfig};
use crate::prompts::{self, Task};
use crate::transport::Transport;

/// Request Dispatcher: issues exactly one provider call per invocation and
/// returns the raw reply text unmodified. No retry; callers decide whether
/// to resubmit.
pub struct Dispatcher {
    tx: Arc<dyn Transport>,
    model: String,
}

impl Dispatcher {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self { tx, model }
    }

    /// Dispatch one task with the assembled content and optional user
    /// context (e.g. jurisdiction, tone).
    pub async fn dispatch(
        &self,
        task: Task,
        segments: &[ContentSegment],
        context: &[(String, String)],
    ) -> Result<String> {
        tracing::info!(
            task = task.key(),
            segments = segments.len(),
            "Dispatching model request"
        );

        let instruction = prompts::compose_instruction(task, context);
        let parts: Vec<GeminiPart> = segments.iter().map(GeminiPart::from).collect();

        let request = GeminiRequest {
            model: self.model.clone(),
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart::text(instruction)],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                response_mime_type: task
                    .wants_json()
                    .then(|| "application/json".to_string()),
                response_schema: task.provider_schema(),
                temperature: None,
            },
        };

        let response = self.tx.generate(&request).await?;
        response.first_text().ok_or_else(|| {
            CustodyBuddyError::Provider("Provider returned no candidates".to_string())
        })
    }
}
