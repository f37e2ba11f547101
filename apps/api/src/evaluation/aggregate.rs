//! Aggregator — weighted combination of per-criterion judgments.
//!
//! Pure and deterministic: no I/O, no hidden state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluation::models::{Judgment, MatchVerdict, Summary};
use crate::evaluation::normalize::clamp_percent;

/// Scores at or above this are strengths; below it, gaps.
pub const STRENGTH_THRESHOLD: f64 = 70.0;
pub const STRONG_MATCH_THRESHOLD: f64 = 75.0;
pub const MODERATE_MATCH_THRESHOLD: f64 = 55.0;

/// Contribution of one judgment to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDetail {
    pub criterion: String,
    pub score: f64,
    /// 0.0 when the criterion is not in the weight table.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub overall_percent: f64,
    pub details: Vec<CriterionDetail>,
    pub summary: Summary,
}

/// overall = round(Σ score × weight, 2); unknown criteria weigh 0.
pub fn aggregate(judgments: &[Judgment], weights: &BTreeMap<String, f64>) -> Aggregate {
    let details: Vec<CriterionDetail> = judgments
        .iter()
        .map(|j| {
            let weight = match weights.get(&j.criterion_name) {
                Some(w) => *w,
                None => {
                    debug!("No weight registered for '{}'; ignoring", j.criterion_name);
                    0.0
                }
            };
            CriterionDetail {
                criterion: j.criterion_name.clone(),
                score: clamp_percent(j.score_percent),
                weight,
            }
        })
        .collect();

    let total: f64 = details.iter().map(|d| d.score * d.weight).sum();
    let overall_percent = round2(total);

    let (strengths, gaps): (Vec<&CriterionDetail>, Vec<&CriterionDetail>) = details
        .iter()
        .partition(|d| d.score >= STRENGTH_THRESHOLD);

    let summary = Summary {
        strengths: strengths.into_iter().map(|d| d.criterion.clone()).collect(),
        gaps: gaps.into_iter().map(|d| d.criterion.clone()).collect(),
        overall_comment: verdict_for(overall_percent),
    };

    Aggregate {
        overall_percent,
        details,
        summary,
    }
}

pub fn verdict_for(overall_percent: f64) -> MatchVerdict {
    if overall_percent >= STRONG_MATCH_THRESHOLD {
        MatchVerdict::Strong
    } else if overall_percent >= MODERATE_MATCH_THRESHOLD {
        MatchVerdict::Moderate
    } else {
        MatchVerdict::Weak
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
