use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use crate::error::{CustodyBuddyError, Result};
use crate::models::{GeminiRequest, GeminiResponse};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Provider seam. Process-wide, stateless between calls, safe for concurrent
/// use by independent tools.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Transport: Send + Sync {
    async fn generate(&self, req: &GeminiRequest) -> Result<GeminiResponse>;
}

pub struct GeminiTransport {
    client: Client,
    api_key: String,
}

impl GeminiTransport {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                CustodyBuddyError::Config(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    /// One attempt per call. Failed calls surface to the user as a
    /// retryable error; resubmission is a user decision.
    async fn generate(&self, req: &GeminiRequest) -> Result<GeminiResponse> {
        let url = format!("{GEMINI_API_URL}/{}:generateContent", req.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CustodyBuddyError::Provider(
                        "Request timed out - the API took too long to respond".to_string(),
                    )
                } else if e.is_connect() {
                    CustodyBuddyError::Provider(
                        "Connection error - unable to reach the API".to_string(),
                    )
                } else {
                    CustodyBuddyError::Provider(format!("Network error: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CustodyBuddyError::Provider(match status.as_u16() {
                401 => "Authentication failed - check your API key".to_string(),
                403 => "Access forbidden - insufficient permissions".to_string(),
                429 => "Rate limit exceeded - too many requests".to_string(),
                500..=599 => format!("Server error ({status}): {error_text}"),
                _ => format!("HTTP error {status}: {error_text}"),
            }));
        }

        response.json().await.map_err(|e| {
            CustodyBuddyError::Provider(format!("Failed to parse API response: {e}"))
        })
    }
}
