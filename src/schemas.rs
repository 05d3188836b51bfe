//! Declarative response schemas, paired 1:1 with the prompt catalog. The
//! Response Validator walks these client-side; tasks that opt in also send a
//! provider-enforced projection of the same schema with the request.

use serde_json::{Value, json};

use crate::prompts::Task;

/// Expected shape of one JSON value.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    String,
    Number,
    Bool,
    StringEnum(&'static [&'static str]),
    Array(&'static Shape),
    Object(&'static [FieldSpec]),
}

/// One field of an object shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub shape: Shape,
}

const fn required(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        shape,
    }
}

const fn optional(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        shape,
    }
}

/// Root schema for one task's JSON reply.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub fields: &'static [FieldSpec],
}

impl ResponseSchema {
    /// Project the schema into the provider's response-schema JSON so the
    /// model endpoint can enforce it server-side as well.
    pub fn to_provider_schema(&self) -> Value {
        object_schema(self.fields)
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required_names = Vec::new();
    for field in fields {
        properties.insert(field.name.to_string(), shape_schema(&field.shape));
        if field.required {
            required_names.push(Value::String(field.name.to_string()));
        }
    }
    json!({
        "type": "OBJECT",
        "properties": Value::Object(properties),
        "required": required_names,
    })
}

fn shape_schema(shape: &Shape) -> Value {
    match shape {
        Shape::String => json!({"type": "STRING"}),
        Shape::Number => json!({"type": "NUMBER"}),
        Shape::Bool => json!({"type": "BOOLEAN"}),
        Shape::StringEnum(values) => json!({"type": "STRING", "enum": values}),
        Shape::Array(inner) => json!({"type": "ARRAY", "items": shape_schema(inner)}),
        Shape::Object(fields) => object_schema(fields),
    }
}

// --- Case analysis ---

const DOCUMENT_TYPE_FIELDS: &[FieldSpec] = &[
    required("type", Shape::String),
    required("source", Shape::String),
];

const KEY_CLAUSE_FIELDS: &[FieldSpec] = &[
    required("clause", Shape::String),
    required("explanation", Shape::String),
    required("source", Shape::String),
];

const DISCREPANCY_FIELDS: &[FieldSpec] = &[
    required("description", Shape::String),
    required("sources", Shape::Array(&Shape::String)),
];

const LEGAL_TERM_FIELDS: &[FieldSpec] = &[
    required("term", Shape::String),
    required("explanation", Shape::String),
];

const ACTION_ITEM_FIELDS: &[FieldSpec] = &[
    required("item", Shape::String),
    optional("deadline", Shape::String),
    required("source", Shape::String),
];

const STRATEGIC_COMMUNICATION_FIELDS: &[FieldSpec] = &[
    required("recommendation", Shape::String),
    required("draftEmail", Shape::String),
];

pub static CASE_ANALYSIS: ResponseSchema = ResponseSchema {
    fields: &[
        required("documentTypes", Shape::Array(&Shape::Object(DOCUMENT_TYPE_FIELDS))),
        required("summary", Shape::String),
        required("keyClauses", Shape::Array(&Shape::Object(KEY_CLAUSE_FIELDS))),
        required("discrepancies", Shape::Array(&Shape::Object(DISCREPANCY_FIELDS))),
        optional("legalJargon", Shape::Array(&Shape::Object(LEGAL_TERM_FIELDS))),
        optional("actionItems", Shape::Array(&Shape::Object(ACTION_ITEM_FIELDS))),
        required("suggestedNextSteps", Shape::String),
        optional("strategicCommunication", Shape::Object(STRATEGIC_COMMUNICATION_FIELDS)),
        required("disclaimer", Shape::String),
    ],
};

// --- Email Buddy ---

const JARGON_ITEM_FIELDS: &[FieldSpec] = &[
    required("term", Shape::String),
    required("context", Shape::String),
];

const EMAIL_ANALYSIS_FIELDS: &[FieldSpec] = &[
    required("tone", Shape::String),
    required("summary", Shape::String),
    required("key_demands", Shape::Array(&Shape::String)),
    optional("legal_jargon", Shape::Array(&Shape::Object(JARGON_ITEM_FIELDS))),
];

const EMAIL_DRAFTS_FIELDS: &[FieldSpec] = &[
    required("biff", Shape::String),
    required("greyRock", Shape::String),
    required("friendlyAssertive", Shape::String),
];

pub static EMAIL_DRAFT: ResponseSchema = ResponseSchema {
    fields: &[
        required("analysis", Shape::Object(EMAIL_ANALYSIS_FIELDS)),
        required("drafts", Shape::Object(EMAIL_DRAFTS_FIELDS)),
    ],
};

// --- Jargon explanation ---

pub static JARGON_EXPLAIN: ResponseSchema = ResponseSchema {
    fields: &[
        required("explanation", Shape::String),
        required("suggested_question", Shape::String),
    ],
};

// --- Incident report ---

const INCIDENT_CATEGORIES: &[&str] = &[
    "Communication Issue",
    "Schedule Violation",
    "Financial Dispute",
    "Child Safety Concern",
    "Parental Alienation",
    "Legal/Court Matter",
    "Other",
];

const SEVERITY_LEVELS: &[&str] = &["Low", "Medium", "High"];

pub static INCIDENT_REPORT: ResponseSchema = ResponseSchema {
    fields: &[
        required("title", Shape::String),
        required("category", Shape::StringEnum(INCIDENT_CATEGORIES)),
        required("severity", Shape::StringEnum(SEVERITY_LEVELS)),
        required("severityJustification", Shape::String),
        required("professionalSummary", Shape::String),
        required("observedImpact", Shape::String),
        required("legalInsights", Shape::String),
        required("sources", Shape::Array(&Shape::String)),
        required("aiNotes", Shape::String),
    ],
};

impl Task {
    /// Client-side schema for the task's JSON reply, if it has one.
    pub fn schema(&self) -> Option<&'static ResponseSchema> {
        match self {
            Task::CaseAnalysis => Some(&CASE_ANALYSIS),
            Task::EmailDraft => Some(&EMAIL_DRAFT),
            Task::JargonExplain => Some(&JARGON_EXPLAIN),
            Task::IncidentReport => Some(&INCIDENT_REPORT),
            Task::ToneDraft => None,
        }
    }

    /// Provider-enforced schema for tasks that request one. Case analysis
    /// validates client-side only.
    pub fn provider_schema(&self) -> Option<Value> {
        match self {
            Task::EmailDraft => Some(EMAIL_DRAFT.to_provider_schema()),
            Task::JargonExplain => Some(JARGON_EXPLAIN.to_provider_schema()),
            Task::IncidentReport => Some(INCIDENT_REPORT.to_provider_schema()),
            Task::CaseAnalysis | Task::ToneDraft => None,
        }
    }
}
