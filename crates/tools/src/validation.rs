//! Argument validation against a tool's input schema.
//!
//! Tool schemas are flat objects, so every violation maps to one named parameter or one
//! JSON Schema constraint. A misspelled parameter is the most common agent mistake and is reported
//! first, with the closest valid name.

use rmcp::model::JsonObject;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Minimum Jaro similarity for a valid parameter name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
enum Violation {
    UnknownParameter {
        name: String,
        suggestion: Option<String>,
    },
    MissingParameter(String),
    Constraint(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParameter {
                name,
                suggestion: Some(s),
            } => write!(f, "unknown parameter '{name}' (did you mean '{s}'?)"),
            Self::UnknownParameter { name, .. } => write!(f, "unknown parameter '{name}'"),
            Self::MissingParameter(name) => write!(f, "missing required parameter '{name}'"),
            Self::Constraint(message) => f.write_str(message),
        }
    }
}

/// Check `args` against `schema`.
///
/// The returned message is ready for an error result.
pub(crate) fn validate_arguments(
    tool_name: &str,
    schema: &JsonObject,
    args: &Value,
) -> Result<(), String> {
    let Some(args_obj) = args.as_object() else {
        return Err("Invalid params: arguments must be a JSON object".to_string());
    };
    let properties = schema.get("properties").and_then(Value::as_object);
    let known: Vec<&str> = properties
        .map(|p| p.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut violations: Vec<Violation> = args_obj
        .keys()
        .filter(|k| !known.contains(&k.as_str()))
        .map(|k| Violation::UnknownParameter {
            name: k.clone(),
            suggestion: closest_match(k, &known),
        })
        .collect();

    violations.extend(
        schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter(|r| !args_obj.contains_key(*r))
            .map(|r| Violation::MissingParameter(r.to_string())),
    );

    let schema_value = Value::Object(schema.clone());
    match jsonschema::validator_for(&schema_value) {
        Ok(validator) => violations.extend(
            validator
                .iter_errors(args)
                // Missing parameters are already reported by name.
                .filter(|e| {
                    !matches!(
                        e.kind(),
                        jsonschema::error::ValidationErrorKind::Required { .. }
                    )
                })
                .map(|e| Violation::Constraint(e.to_string())),
        ),
        Err(e) => debug!(tool = %tool_name, error = %e, "tool schema does not compile"),
    }

    if violations.is_empty() {
        return Ok(());
    }
    debug!(tool = %tool_name, violations = ?violations, "invalid tool arguments");

    let first_unknown = violations
        .iter()
        .find(|v| matches!(v, Violation::UnknownParameter { .. }));
    match (first_unknown, violations.as_slice()) {
        (Some(unknown), _) | (None, [unknown]) => Err(format!("Invalid params: {unknown}")),
        _ => Err(format!(
            "Invalid params: validation failed with {} error(s)",
            violations.len()
        )),
    }
}

fn closest_match(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (strsim::jaro(unknown, k), *k))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, k)| k.to_string())
}
