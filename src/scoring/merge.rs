//! Merge externally supplied text-answer scores into scoring results.
//!
//! The merge never mutates the automated results: it produces a new result
//! tree so the automated-only run stays independently inspectable. External
//! scores replace by question id rather than appending blindly, which makes
//! repeat merges of the same analysis a no-op, and the merged tree is
//! recomputed with the same aggregation formulas as a from-scratch run.

use crate::model::Questionnaire;
use serde::{Deserialize, Serialize};

use super::aggregate::{compute_overall_score, ExternalScore};
use super::engine::{AssessmentResults, ReviewItem};
use super::question::QuestionStatus;
use super::recommend::generate_recommendations;
use super::tier::determine_tier;
use crate::model::CriterionIndex;

/// One externally produced score for a text answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextScore {
    /// Question id the score applies to
    pub id: String,
    /// Criterion id; resolved via the questionnaire when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

/// The external analysis document, the JSON shape an LLM reply must take.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalAnalysis {
    #[serde(default)]
    pub text_scores: Vec<TextScore>,
    #[serde(default)]
    pub inconsistencies: Vec<String>,
    #[serde(default)]
    pub improvement_plan: String,
}

impl ExternalAnalysis {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_scores.is_empty()
            && self.inconsistencies.is_empty()
            && self.improvement_plan.is_empty()
    }
}

/// Merge external scores into a new result tree.
///
/// Scores for criteria that do not exist in the results are ignored (they
/// come from an untrusted external source), as are scores outside the 1-5
/// maturity range. With zero applicable scores the output is an unchanged
/// copy of the input.
#[must_use]
pub fn merge_external_scores(
    results: &AssessmentResults,
    analysis: &ExternalAnalysis,
    questionnaire: &Questionnaire,
    index: &CriterionIndex,
) -> AssessmentResults {
    let mut merged = results.clone();
    let mut applied = 0usize;

    for text_score in &analysis.text_scores {
        if !(1.0..=5.0).contains(&text_score.score) {
            tracing::warn!(
                id = %text_score.id,
                score = text_score.score,
                "ignoring external score outside 1-5 range"
            );
            continue;
        }

        let criterion_id = text_score.criterion.clone().or_else(|| {
            questionnaire
                .question(&text_score.id)
                .map(|q| q.criterion.clone())
        });
        let Some(criterion_id) = criterion_id else {
            tracing::warn!(id = %text_score.id, "external score has no resolvable criterion");
            continue;
        };

        let Some(criterion) = merged
            .tier_scores
            .values_mut()
            .find_map(|t| t.criteria.get_mut(&criterion_id))
        else {
            tracing::warn!(
                id = %text_score.id,
                criterion = %criterion_id,
                "external score for unknown criterion ignored"
            );
            continue;
        };

        // Prefer converting the matching needs-review question in place;
        // replacing by id keeps a second merge of the same set a no-op.
        if let Some(question) = criterion
            .questions
            .iter_mut()
            .find(|q| q.id == text_score.id)
        {
            question.score = Some(text_score.score);
            question.status = QuestionStatus::Scored;
            question.error = None;
        } else if let Some(existing) = criterion
            .external_scores
            .iter_mut()
            .find(|e| e.id == text_score.id)
        {
            existing.score = text_score.score;
            existing.justification = text_score.justification.clone();
        } else {
            criterion.external_scores.push(ExternalScore {
                id: text_score.id.clone(),
                score: text_score.score,
                justification: text_score.justification.clone(),
            });
        }
        criterion.recompute();
        applied += 1;
    }

    if applied == 0 {
        return merged;
    }

    // Full recomputation with the standard formulas; no incremental
    // shortcuts, so the merge is equivalent to re-running aggregation over
    // the augmented question set.
    for tier in merged.tier_scores.values_mut() {
        tier.recompute();
    }
    merged.overall_score = compute_overall_score(&merged.tier_scores);
    merged.tier_determination = determine_tier(&merged.tier_scores);
    merged.recommendations = generate_recommendations(&merged.tier_scores, index);

    merged.needs_review = merged
        .tier_scores
        .values()
        .flat_map(|t| t.criteria.values())
        .flat_map(|c| c.questions.iter())
        .filter(|q| q.status == QuestionStatus::NeedsReview)
        .map(|q| ReviewItem {
            id: q.id.clone(),
            criterion: q.criterion.clone(),
            answer: q.raw_answer.clone(),
        })
        .collect();
    merged.needs_review_count = merged.needs_review.len();
    merged.scored_count = merged
        .tier_scores
        .values()
        .flat_map(|t| t.criteria.values())
        .flat_map(|c| c.questions.iter())
        .filter(|q| q.status == QuestionStatus::Scored)
        .count();
    merged.analysis_applied = true;

    tracing::info!(applied, "merged external scores into results");

    merged
}
