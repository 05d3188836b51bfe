//! Response Validator: the only defense between the model provider and the
//! UI layer. The provider is not contractually guaranteed to produce
//! well-formed JSON on every call, so validation fails loudly and names the
//! first offending field rather than letting partial data through.

use serde_json::Value;

use crate::error::{CustodyBuddyError, Result};
use crate::schemas::{FieldSpec, ResponseSchema, Shape};

/// Parse and structurally validate a raw model reply against a task schema.
/// Returns the parsed value, now considered trusted.
pub fn validate(raw: &str, schema: &ResponseSchema) -> Result<Value> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!("Model reply failed JSON parsing: {e}");
        CustodyBuddyError::MalformedResponse(format!("invalid JSON: {e}"))
    })?;
    check_fields(&value, schema.fields, "")?;
    Ok(value)
}

/// Strip an optional leading ```json / ``` fence and its trailing mate.
/// Tolerates a missing trailing fence.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the end of the fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.strip_prefix("json").unwrap_or(rest),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn check_fields(value: &Value, fields: &[FieldSpec], path: &str) -> Result<()> {
    let Some(map) = value.as_object() else {
        return Err(type_mismatch(path, "object", value));
    };
    for field in fields {
        let field_path = join_path(path, field.name);
        match map.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(CustodyBuddyError::MalformedResponse(format!(
                        "missing required field '{field_path}'"
                    )));
                }
            }
            Some(child) => check_shape(child, &field.shape, &field_path)?,
        }
    }
    Ok(())
}

fn check_shape(value: &Value, shape: &Shape, path: &str) -> Result<()> {
    match shape {
        Shape::String => {
            if !value.is_string() {
                return Err(type_mismatch(path, "string", value));
            }
        }
        Shape::Number => {
            if !value.is_number() {
                return Err(type_mismatch(path, "number", value));
            }
        }
        Shape::Bool => {
            if !value.is_boolean() {
                return Err(type_mismatch(path, "boolean", value));
            }
        }
        Shape::StringEnum(allowed) => {
            let Some(text) = value.as_str() else {
                return Err(type_mismatch(path, "string", value));
            };
            if !allowed.contains(&text) {
                return Err(CustodyBuddyError::MalformedResponse(format!(
                    "field '{path}' has unexpected value \"{text}\""
                )));
            }
        }
        Shape::Array(inner) => {
            let Some(items) = value.as_array() else {
                return Err(type_mismatch(path, "array", value));
            };
            for (index, item) in items.iter().enumerate() {
                check_shape(item, inner, &format!("{path}[{index}]"))?;
            }
        }
        Shape::Object(fields) => check_fields(value, fields, path)?,
    }
    Ok(())
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> CustodyBuddyError {
    let actual_kind = match actual {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    let location = if path.is_empty() { "response root" } else { path };
    CustodyBuddyError::MalformedResponse(format!(
        "field '{location}' should be {expected}, got {actual_kind}"
    ))
}
