use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// One unit of content sent to the model: plain text or inline binary data.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSegment {
    Text(String),
    InlineBinary { mime_type: String, data: Vec<u8> },
}

/// A user-supplied document, already decoded by the host's file ingestion
/// layer. PDF text extraction happens upstream; the pipeline receives the
/// extracted page texts and owns only framing and ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    Image {
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
    Pdf {
        name: String,
        pages: Vec<String>,
    },
}

impl SourceDocument {
    pub fn name(&self) -> &str {
        match self {
            SourceDocument::Image { name, .. } => name,
            SourceDocument::Pdf { name, .. } => name,
        }
    }
}

// --- Gemini wire format ---

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Path parameter of the generateContent endpoint, not part of the body.
    #[serde(skip)]
    pub model: String,
    pub system_instruction: GeminiContent,
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inline_data: Option<InlineData>,
}

impl GeminiPart {
    pub fn text(value: impl Into<String>) -> Self {
        GeminiPart {
            text: Some(value.into()),
            inline_data: None,
        }
    }
}

impl From<&ContentSegment> for GeminiPart {
    fn from(segment: &ContentSegment) -> Self {
        match segment {
            ContentSegment::Text(value) => GeminiPart::text(value.clone()),
            ContentSegment::InlineBinary { mime_type, data } => GeminiPart {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime_type.clone(),
                    data: BASE64.encode(data),
                }),
            },
        }
    }
}

/// Inline binary payload, base64-encoded on the wire.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: GeminiContent,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

// --- Tool inputs ---

/// Communication strategies offered by the Email Buddy drafting station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneOption {
    Biff,
    GreyRock,
    FriendlyAssertive,
    Professional,
    Passive,
    PassiveAggressive,
    Aggressive,
}

impl ToneOption {
    pub fn label(&self) -> &'static str {
        match self {
            ToneOption::Biff => "BIFF",
            ToneOption::GreyRock => "Grey Rock",
            ToneOption::FriendlyAssertive => "Friendly Assertive",
            ToneOption::Professional => "Professional (for Lawyers)",
            ToneOption::Passive => "Passive (not recommended)",
            ToneOption::PassiveAggressive => "Passive-Aggressive (not recommended)",
            ToneOption::Aggressive => "Aggressive (not recommended)",
        }
    }
}

/// User-entered details of a co-parenting incident. Held in controller state
/// only; never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentData {
    pub narrative: String,
    pub jurisdiction: String,
    pub incident_date: String,
    pub location: String,
    pub category: Option<IncidentCategory>,
    pub people_involved: Vec<String>,
}

// --- Parsed responses, one record per task ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseAnalysisReport {
    pub document_types: Vec<DocumentType>,
    pub summary: String,
    pub key_clauses: Vec<KeyClause>,
    pub discrepancies: Vec<Discrepancy>,
    #[serde(default)]
    pub legal_jargon: Vec<LegalTerm>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    pub suggested_next_steps: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub strategic_communication: Option<StrategicCommunication>,
    pub disclaimer: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocumentType {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct KeyClause {
    pub clause: String,
    pub explanation: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Discrepancy {
    pub description: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LegalTerm {
    pub term: String,
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActionItem {
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub deadline: Option<String>,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategicCommunication {
    pub recommendation: String,
    pub draft_email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailBuddyResponse {
    pub analysis: EmailAnalysis,
    pub drafts: EmailDrafts,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailAnalysis {
    pub tone: String,
    pub summary: String,
    pub key_demands: Vec<String>,
    #[serde(default)]
    pub legal_jargon: Vec<JargonItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JargonItem {
    pub term: String,
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailDrafts {
    pub biff: String,
    pub grey_rock: String,
    pub friendly_assertive: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JargonExplanation {
    pub explanation: String,
    pub suggested_question: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum IncidentCategory {
    #[serde(rename = "Communication Issue")]
    CommunicationIssue,
    #[serde(rename = "Schedule Violation")]
    ScheduleViolation,
    #[serde(rename = "Financial Dispute")]
    FinancialDispute,
    #[serde(rename = "Child Safety Concern")]
    ChildSafetyConcern,
    #[serde(rename = "Parental Alienation")]
    ParentalAlienation,
    #[serde(rename = "Legal/Court Matter")]
    LegalCourtMatter,
    #[serde(rename = "Other")]
    Other,
}

impl IncidentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            IncidentCategory::CommunicationIssue => "Communication Issue",
            IncidentCategory::ScheduleViolation => "Schedule Violation",
            IncidentCategory::FinancialDispute => "Financial Dispute",
            IncidentCategory::ChildSafetyConcern => "Child Safety Concern",
            IncidentCategory::ParentalAlienation => "Parental Alienation",
            IncidentCategory::LegalCourtMatter => "Legal/Court Matter",
            IncidentCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub title: String,
    pub category: IncidentCategory,
    pub severity: Severity,
    pub severity_justification: String,
    pub professional_summary: String,
    pub observed_impact: String,
    pub legal_insights: String,
    pub sources: Vec<String>,
    pub ai_notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_segment_becomes_base64_part() {
        let segment = ContentSegment::InlineBinary {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        let part = GeminiPart::from(&segment);
        let inline = part.inline_data.expect("should carry inline data");
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "AQID");
        assert!(part.text.is_none());
    }

    #[test]
    fn first_text_concatenates_parts_of_first_candidate() {
        let response = GeminiResponse {
            candidates: vec![Candidate {
                content: GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![GeminiPart::text("{\"a\":"), GeminiPart::text("1}")],
                },
            }],
        };
        assert_eq!(response.first_text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn first_text_is_none_for_empty_candidates() {
        let response = GeminiResponse { candidates: vec![] };
        assert!(response.first_text().is_none());
    }

    #[test]
    fn incident_category_round_trips_through_display_names() {
        let json = serde_json::to_string(&IncidentCategory::LegalCourtMatter)
            .expect("category should serialize");
        assert_eq!(json, "\"Legal/Court Matter\"");
        let back: IncidentCategory =
            serde_json::from_str(&json).expect("category should deserialize");
        assert_eq!(back, IncidentCategory::LegalCourtMatter);
    }

    #[test]
    fn generation_config_omits_unset_fields() {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: None,
            temperature: None,
        };
        let json = serde_json::to_value(&config).expect("config should serialize");
        assert_eq!(
            json,
            serde_json::json!({"responseMimeType": "application/json"})
        );
    }
}
