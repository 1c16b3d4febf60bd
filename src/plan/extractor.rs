// Response extractor
//
// Pulls the plan object out of free-form model output. Models wrap the JSON
// in prose, code fences, or both, and occasionally emit a second brace group
// (an example, a template placeholder) before the real answer. Spans are
// found with a bracket-balance scan that ignores braces inside string
// literals, then each top-level span is tried in order.

use serde_json::Value;

use super::types::{PlanEnvelope, WorkoutPlan};
use crate::errors::ExtractError;

/// A plan recovered from a model response
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub plan: WorkoutPlan,
    /// Prose after the JSON object, for display and logging only
    pub commentary: Option<String>,
}

/// Extract and validate the workout plan embedded in `raw`
pub fn extract_plan(raw: &str) -> Result<Extraction, ExtractError> {
    let spans = object_spans(raw)?;

    let mut first_parse_error: Option<String> = None;
    let mut first_shape_error: Option<ExtractError> = None;

    for (start, end) in spans {
        let value: Value = match serde_json::from_str(&raw[start..end]) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Brace group at {}..{} is not JSON: {}", start, end, e);
                first_parse_error.get_or_insert_with(|| e.to_string());
                continue;
            }
        };

        match validate_shape(value) {
            Ok(plan) => {
                return Ok(Extraction {
                    plan,
                    commentary: commentary_after(&raw[end..]),
                });
            }
            Err(e) => {
                tracing::debug!("Brace group at {}..{} rejected: {}", start, end, e);
                if first_shape_error.is_none() {
                    first_shape_error = Some(e);
                }
            }
        }
    }

    // A well-formed object with the wrong shape says more than a broken one
    if let Some(e) = first_shape_error {
        return Err(e);
    }
    Err(ExtractError::MalformedJson(
        first_parse_error.unwrap_or_else(|| "unbalanced braces".to_string()),
    ))
}

/// Byte ranges of every top-level `{...}` group, in order.
///
/// Fails with `NoJsonFound` when the text has no opening brace, or has one
/// but no closing brace anywhere after it. An opening brace whose group never
/// balances (truncated output) ends the scan; if nothing balanced before it,
/// that is `MalformedJson`.
fn object_spans(raw: &str) -> Result<Vec<(usize, usize)>, ExtractError> {
    let Some(first_open) = raw.find('{') else {
        return Err(ExtractError::NoJsonFound);
    };
    if !raw[first_open..].contains('}') {
        return Err(ExtractError::NoJsonFound);
    }

    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices().skip_while(|(i, _)| *i < first_open) {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    if spans.is_empty() {
        return Err(ExtractError::MalformedJson(
            "JSON object is never closed (truncated response?)".to_string(),
        ));
    }
    Ok(spans)
}

/// Check the structure the renderer depends on, then deserialize
fn validate_shape(value: Value) -> Result<WorkoutPlan, ExtractError> {
    let plan = value
        .get("workoutPlan")
        .filter(|v| v.is_object())
        .ok_or_else(|| ExtractError::ShapeInvalid("missing `workoutPlan` object".to_string()))?;

    let workouts = plan
        .get("workoutSchedule")
        .and_then(|s| s.get("workouts"));
    if !workouts.is_some_and(Value::is_array) {
        return Err(ExtractError::ShapeInvalid(
            "`workoutPlan.workoutSchedule.workouts` must be a list".to_string(),
        ));
    }

    if !plan.get("tips").is_some_and(Value::is_object) {
        return Err(ExtractError::ShapeInvalid(
            "`workoutPlan.tips` must be an object".to_string(),
        ));
    }

    let envelope: PlanEnvelope =
        serde_json::from_value(value).map_err(|e| ExtractError::ShapeInvalid(e.to_string()))?;
    Ok(envelope.workout_plan)
}

fn commentary_after(rest: &str) -> Option<String> {
    let text = rest.trim().trim_start_matches("```").trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
