//! Score Normalizer — coerces whatever the model put in `score_percent` into `[0, 100]`.

use serde_json::Value;

pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;

/// Total: non-numeric input yields `0.0`, numbers (or numeric strings) are clamped.
/// Booleans count as 1 and 0.
pub fn normalize_score(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.map(clamp_percent).unwrap_or(MIN_PERCENT)
}

/// Clamps to `[0, 100]`; NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}
