use thiserror::Error;

pub type Result<T> = std::result::Result<T, CustodyBuddyError>;

/// Error taxonomy for the AI pipeline. Every failure is scoped to a single
/// tool invocation; nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum CustodyBuddyError {
    /// Missing or invalid user input, caught before any request is sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport, auth, or rate-limit failure from the model endpoint.
    #[error("AI provider error: {0}")]
    Provider(String),

    /// The provider replied, but the content failed JSON parsing or schema
    /// validation. The message names the first offending field when known.
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// A user-supplied file could not be read or decoded.
    #[error("File could not be read: {0}")]
    UnreadableFile(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Converts any pipeline error into the inline message shown to the user.
/// `action` names the operation in progress, e.g. "document analysis".
pub fn user_facing_message(error: &CustodyBuddyError, action: &str) -> String {
    match error {
        CustodyBuddyError::Validation(message) => message.clone(),
        CustodyBuddyError::Provider(_) => format!(
            "The AI service encountered an error during {action}. Please try again."
        ),
        CustodyBuddyError::MalformedResponse(_) => format!(
            "The AI returned an unexpected response during {action}. Please try again."
        ),
        CustodyBuddyError::UnreadableFile(name) => format!(
            "The file \"{name}\" could not be read. It may be corrupted or in an unsupported format."
        ),
        CustodyBuddyError::Config(_) => {
            "The AI service is not configured correctly. Please try again later.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_passes_through_verbatim() {
        let err = CustodyBuddyError::Validation("Please provide a jurisdiction.".to_string());
        assert_eq!(
            user_facing_message(&err, "incident report generation"),
            "Please provide a jurisdiction."
        );
    }

    #[test]
    fn provider_and_malformed_messages_name_the_action() {
        let provider = CustodyBuddyError::Provider("429 rate limited".to_string());
        let malformed = CustodyBuddyError::MalformedResponse("invalid JSON".to_string());

        let provider_msg = user_facing_message(&provider, "email analysis");
        let malformed_msg = user_facing_message(&malformed, "email analysis");

        assert!(provider_msg.contains("email analysis"));
        assert!(malformed_msg.contains("email analysis"));
        // The raw provider detail must not leak into the UI message.
        assert!(!provider_msg.contains("429"));
    }

    #[test]
    fn unreadable_file_message_names_the_file() {
        let err = CustodyBuddyError::UnreadableFile("order.pdf".to_string());
        assert!(user_facing_message(&err, "document analysis").contains("order.pdf"));
    }
}
