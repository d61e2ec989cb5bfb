//! Score aggregation: question -> criterion -> tier -> overall roll-ups.
//!
//! A criterion with zero scored questions gets a null score, which
//! propagates upward as "not yet assessed"; it is never coerced to 0 and
//! never silently dropped from reports. Stored scores are rounded to two
//! decimal places; intermediate sums keep full precision.

use crate::model::{CriterionInfo, MaturityLevel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::question::{QuestionScore, QuestionStatus};

/// Round a score to two decimal places for storage/display.
///
/// Ties round to even, the same convention `MaturityLevel::from_score` uses.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// An externally supplied score attached to a criterion during merge
/// (LLM- or reviewer-scored text answer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalScore {
    /// Question id the score was produced for (or a reviewer-chosen tag)
    pub id: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

/// Aggregated result for one criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub tier_id: String,
    pub tier_name: String,
    /// Mean of scored question scores (plus merged external scores);
    /// null iff nothing is scored
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_name: Option<MaturityLevel>,
    pub scored_count: usize,
    /// Questions plus merged external items, so `scored_count` never
    /// exceeds it
    pub total_count: usize,
    pub needs_review_count: usize,
    pub questions: Vec<QuestionScore>,
    /// External scores merged in (empty for automated-only runs)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_scores: Vec<ExternalScore>,
}

impl CriterionScore {
    /// All numeric scores participating in this criterion's average:
    /// scored questions plus any merged external scores.
    fn contributing_scores(&self) -> Vec<f64> {
        self.questions
            .iter()
            .filter_map(|q| q.score)
            .chain(self.external_scores.iter().map(|e| e.score))
            .collect()
    }

    /// Recompute score, level, and counts from the current question and
    /// external score sets.
    pub fn recompute(&mut self) {
        let scores = self.contributing_scores();
        self.scored_count = scores.len();
        self.total_count = self.questions.len() + self.external_scores.len();
        self.needs_review_count = self
            .questions
            .iter()
            .filter(|q| q.status == QuestionStatus::NeedsReview)
            .count();

        if scores.is_empty() {
            self.score = None;
            self.level = None;
            self.level_name = None;
        } else {
            let avg = scores.iter().sum::<f64>() / scores.len() as f64;
            let level = MaturityLevel::from_score(avg);
            self.score = Some(round2(avg));
            self.level = Some(level.number());
            self.level_name = Some(level);
        }
    }
}

/// Compute a criterion's aggregate from its question scores.
#[must_use]
pub fn compute_criterion_score(
    info: &CriterionInfo,
    questions: Vec<QuestionScore>,
) -> CriterionScore {
    let mut result = CriterionScore {
        id: info.id.clone(),
        name: info.name.clone(),
        weight: info.weight,
        tier_id: info.tier_id.clone(),
        tier_name: info.tier_name.clone(),
        score: None,
        level: None,
        level_name: None,
        scored_count: 0,
        total_count: 0,
        needs_review_count: 0,
        questions,
        external_scores: Vec::new(),
    };
    result.recompute();
    result
}

/// Aggregated result for one tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierScore {
    pub name: String,
    /// Weight-normalized mean of criteria with non-null scores; null if
    /// none are scored
    pub score: Option<f64>,
    /// Set when the questionnaire referenced a tier the rubric does not
    /// declare. Synthetic tiers surface drift in reports and the overall
    /// score but never participate in tier gating.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
    pub criteria: IndexMap<String, CriterionScore>,
}

impl TierScore {
    /// Recompute the tier score from its criteria.
    pub fn recompute(&mut self) {
        self.score = weighted_mean(self.criteria.values());
    }
}

/// Weight-normalized mean over criteria with non-null scores, rounded to
/// two decimals. Returns `None` when nothing is scored.
pub fn weighted_mean<'a>(criteria: impl Iterator<Item = &'a CriterionScore>) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for criterion in criteria {
        if let Some(score) = criterion.score {
            weighted_sum += score * criterion.weight;
            total_weight += criterion.weight;
        }
    }
    if total_weight > 0.0 {
        Some(round2(weighted_sum / total_weight))
    } else {
        None
    }
}

/// Overall score: weight-normalized mean over all criteria (core and
/// enrichment tiers alike).
#[must_use]
pub fn compute_overall_score(tier_scores: &IndexMap<String, TierScore>) -> Option<f64> {
    weighted_mean(tier_scores.values().flat_map(|t| t.criteria.values()))
}
