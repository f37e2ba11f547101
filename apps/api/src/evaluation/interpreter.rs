//! Response Interpreter — turns untrusted model text into a well-formed `Judgment`.
//!
//! Parsing runs as a three-stage chain: strict parse of the fence-stripped text,
//! then the outermost `{...}` span, then a synthesized zero-score judgment.
//! The caller never sees a parse failure.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::evaluation::criteria::Criterion;
use crate::evaluation::models::Judgment;
use crate::evaluation::normalize::normalize_score;

pub const NO_JSON_RATIONALE: &str = "No JSON found in model output.";
pub const MALFORMED_JSON_RATIONALE: &str = "Could not parse model output.";

/// The object shape the model is asked to return. Every field is optional and
/// loosely typed; coercion happens after parsing.
#[derive(Debug, Default, Deserialize)]
struct ModelJudgment {
    #[serde(default)]
    score_percent: Value,
    #[serde(default)]
    rationale: Value,
    #[serde(default)]
    alternate_considerations: Value,
}

/// Which stage of the chain produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStage {
    Strict,
    Embedded,
    NoJson,
    Malformed,
}

/// Interprets a raw completion for `criterion`. Total.
pub fn interpret_response(raw: &str, criterion: &Criterion) -> Judgment {
    let (stage, parsed) = parse_layered(raw);

    match stage {
        ParseStage::Strict | ParseStage::Embedded => {
            debug!("Parsed judgment for '{}' via {:?} stage", criterion.name, stage)
        }
        ParseStage::NoJson | ParseStage::Malformed => warn!(
            "Model output for '{}' fell back to default judgment ({:?}): {:?}",
            criterion.name,
            stage,
            raw.chars().take(120).collect::<String>()
        ),
    }

    let parsed = parsed.unwrap_or_else(|| ModelJudgment {
        rationale: Value::String(fallback_rationale(stage).to_string()),
        ..ModelJudgment::default()
    });

    Judgment {
        criterion_name: criterion.name.clone(),
        score_percent: normalize_score(&parsed.score_percent),
        rationale: text_of(&parsed.rationale).unwrap_or_default(),
        alternate_considerations: list_of(&parsed.alternate_considerations),
    }
}

fn parse_layered(raw: &str) -> (ParseStage, Option<ModelJudgment>) {
    if let Some(judgment) = parse_object(strip_fences(raw)) {
        return (ParseStage::Strict, Some(judgment));
    }

    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return (ParseStage::NoJson, None),
    };

    match parse_object(span) {
        Some(judgment) => (ParseStage::Embedded, Some(judgment)),
        None => (ParseStage::Malformed, None),
    }
}

/// Trims whitespace and any run of backticks around the payload.
fn strip_fences(raw: &str) -> &str {
    raw.trim().trim_matches('`').trim()
}

/// Only JSON objects count; arrays and scalars are treated as unparsable.
fn parse_object(text: &str) -> Option<ModelJudgment> {
    match serde_json::from_str::<Value>(text).ok()? {
        object @ Value::Object(_) => serde_json::from_value(object).ok(),
        _ => None,
    }
}

fn fallback_rationale(stage: ParseStage) -> &'static str {
    match stage {
        ParseStage::NoJson => NO_JSON_RATIONALE,
        _ => MALFORMED_JSON_RATIONALE,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn list_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
