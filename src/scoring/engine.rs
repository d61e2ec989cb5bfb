//! The full scoring run: questions -> criteria -> tiers -> determination.
//!
//! A run owns its own result tree; the rubric and questionnaire are
//! read-only reference data, so independent runs can score concurrently
//! without coordination.

use crate::model::{
    AnswerValue, AssessmentResponse, CriterionIndex, CriterionInfo, Questionnaire,
    ResponseMetadata, Rubric,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::aggregate::{
    compute_criterion_score, compute_overall_score, CriterionScore, TierScore,
};
use super::question::{score_question, QuestionScore, QuestionStatus};
use super::recommend::{generate_recommendations, Recommendation};
use super::tier::{determine_tier, TierDetermination};

/// A text answer flagged for external review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: String,
    pub criterion: String,
    pub answer: Option<AnswerValue>,
}

/// A question-level problem surfaced for the respondent (or questionnaire
/// author) to fix before re-scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub status: QuestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The complete result document of a scoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub metadata: ResponseMetadata,
    pub overall_score: Option<f64>,
    pub tier_determination: TierDetermination,
    pub tier_scores: IndexMap<String, TierScore>,
    pub needs_review: Vec<ReviewItem>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub question_count: usize,
    pub scored_count: usize,
    pub needs_review_count: usize,
    pub issue_count: usize,
    /// Set when external (LLM/reviewer) scores have been merged in
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub analysis_applied: bool,
}

impl AssessmentResults {
    /// Iterate all criterion results across tiers.
    pub fn criteria(&self) -> impl Iterator<Item = &CriterionScore> {
        self.tier_scores.values().flat_map(|t| t.criteria.values())
    }
}

/// One scoring run over a rubric/questionnaire pair.
///
/// Paths and defaults live with the caller; the run itself takes the
/// loaded documents explicitly and holds no global state.
#[derive(Debug, Clone)]
pub struct ScoringRun<'a> {
    rubric: &'a Rubric,
    questionnaire: &'a Questionnaire,
    index: CriterionIndex,
}

impl<'a> ScoringRun<'a> {
    #[must_use]
    pub fn new(rubric: &'a Rubric, questionnaire: &'a Questionnaire) -> Self {
        let index = rubric.criterion_index();
        Self {
            rubric,
            questionnaire,
            index,
        }
    }

    /// The criterion lookup built from the rubric.
    #[must_use]
    pub const fn criterion_index(&self) -> &CriterionIndex {
        &self.index
    }

    /// Score a completed response. Deterministic: scoring the same
    /// response twice yields identical results.
    #[must_use]
    pub fn score(&self, response: &AssessmentResponse) -> AssessmentResults {
        // Score each question in questionnaire order
        let mut question_scores: Vec<QuestionScore> = Vec::new();
        for question in &self.questionnaire.questions {
            let answer = response.answer(&question.id);
            question_scores.push(score_question(question, answer));
        }

        // Group by criterion, preserving questionnaire order within groups
        let mut by_criterion: IndexMap<String, Vec<QuestionScore>> = IndexMap::new();
        for qs in &question_scores {
            by_criterion
                .entry(qs.criterion.clone())
                .or_default()
                .push(qs.clone());
        }

        // Roll up criteria into tiers following rubric declaration order
        let mut tier_scores: IndexMap<String, TierScore> = IndexMap::new();
        for tier in &self.rubric.tiers {
            let mut criteria: IndexMap<String, CriterionScore> = IndexMap::new();
            for criterion in &tier.criteria {
                let Some(questions) = by_criterion.shift_remove(&criterion.id) else {
                    continue;
                };
                let info = match self.index.get(&criterion.id) {
                    Some(info) => info.clone(),
                    None => continue,
                };
                criteria.insert(
                    criterion.id.clone(),
                    compute_criterion_score(&info, questions),
                );
            }

            let mut tier_score = TierScore {
                name: tier.name.clone(),
                score: None,
                synthetic: false,
                criteria,
            };
            tier_score.recompute();
            tier_scores.insert(tier.id.clone(), tier_score);
        }

        // Questions referencing criteria absent from the rubric still get
        // scored and aggregated (the result names the unknown tier), so a
        // questionnaire/rubric drift is visible instead of silently dropped.
        // A tier entry created here is marked synthetic: it carries no
        // rubric-declared criteria, so it must never satisfy gating.
        for (criterion_id, questions) in by_criterion {
            let first = &questions[0];
            let info = CriterionInfo {
                id: criterion_id.clone(),
                name: criterion_id.clone(),
                weight: 1.0,
                tier_id: first.tier.clone(),
                tier_name: "Unknown".to_string(),
            };
            let entry = tier_scores
                .entry(first.tier.clone())
                .or_insert_with(|| TierScore {
                    name: "Unknown".to_string(),
                    score: None,
                    synthetic: true,
                    criteria: IndexMap::new(),
                });
            entry
                .criteria
                .insert(criterion_id, compute_criterion_score(&info, questions));
            entry.recompute();
        }

        let overall_score = compute_overall_score(&tier_scores);
        let tier_determination = determine_tier(&tier_scores);
        let recommendations = generate_recommendations(&tier_scores, &self.index);

        let needs_review: Vec<ReviewItem> = question_scores
            .iter()
            .filter(|qs| qs.status == QuestionStatus::NeedsReview)
            .map(|qs| ReviewItem {
                id: qs.id.clone(),
                criterion: qs.criterion.clone(),
                answer: qs.raw_answer.clone(),
            })
            .collect();

        let issues: Vec<Issue> = question_scores
            .iter()
            .filter(|qs| {
                matches!(
                    qs.status,
                    QuestionStatus::Unanswered
                        | QuestionStatus::Invalid
                        | QuestionStatus::UnknownType
                )
            })
            .map(|qs| Issue {
                id: qs.id.clone(),
                status: qs.status,
                error: qs.error.clone(),
            })
            .collect();

        let scored_count = question_scores
            .iter()
            .filter(|qs| qs.status == QuestionStatus::Scored)
            .count();

        tracing::debug!(
            questions = question_scores.len(),
            scored = scored_count,
            needs_review = needs_review.len(),
            issues = issues.len(),
            "scoring run complete"
        );

        AssessmentResults {
            metadata: response.metadata.clone(),
            overall_score,
            tier_determination,
            needs_review_count: needs_review.len(),
            issue_count: issues.len(),
            question_count: question_scores.len(),
            scored_count,
            tier_scores,
            needs_review,
            issues,
            recommendations,
            analysis_applied: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rubric() -> Rubric {
        Rubric::from_yaml_str(
            r"
tiers:
  - id: tier_0
    name: 'Tier 0: Foundation'
    criteria:
      - id: alert_triage
        name: Alert Triage
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
",
        )
        .unwrap()
    }

    fn questionnaire() -> Questionnaire {
        Questionnaire::from_yaml_str(
            r"
questions:
  - id: T0-Q1
    type: scale
    tier: tier_0
    criterion: alert_triage
    question: Rate it.
  - id: T0-Q2
    type: text
    tier: tier_0
    criterion: alert_triage
    question: Describe it.
",
        )
        .unwrap()
    }

    fn response(yaml: &str) -> AssessmentResponse {
        AssessmentResponse::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_single_scale_answer_four() {
        let rubric = rubric();
        let questionnaire = questionnaire();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let results = run.score(&response(
            r"
responses:
  T0-Q1: { answer: 4 }
",
        ));

        let criterion = &results.tier_scores["tier_0"].criteria["alert_triage"];
        assert_eq!(criterion.score, Some(4.0));
        assert_eq!(criterion.level_name.unwrap().name(), "Managed");
        assert_eq!(results.tier_scores["tier_0"].score, Some(4.0));
        assert_eq!(results.overall_score, Some(4.0));
        assert_eq!(results.tier_determination.tier_name, "Tier 0: Foundation");
        assert_eq!(results.scored_count, 1);
        assert_eq!(results.question_count, 2);
    }

    #[test]
    fn test_text_answer_flagged_for_review() {
        let rubric = rubric();
        let questionnaire = questionnaire();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let results = run.score(&response(
            r"
responses:
  T0-Q1: { answer: 4 }
  T0-Q2: { answer: 'We have a weekly rotation.' }
",
        ));
        assert_eq!(results.needs_review_count, 1);
        assert_eq!(results.needs_review[0].id, "T0-Q2");
        // text answers never affect the average
        assert_eq!(results.overall_score, Some(4.0));
    }

    #[test]
    fn test_invalid_answer_becomes_issue_not_error() {
        let rubric = rubric();
        let questionnaire = questionnaire();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let results = run.score(&response(
            r"
responses:
  T0-Q1: { answer: 9 }
",
        ));
        // invalid scale answer plus unanswered text question
        assert_eq!(results.issue_count, 2);
        assert!(results
            .issues
            .iter()
            .any(|i| i.id == "T0-Q1" && i.status == QuestionStatus::Invalid));
        assert_eq!(results.overall_score, None);
        assert_eq!(results.tier_determination.tier_number, -1);
    }

    #[test]
    fn test_determinism_same_input_same_output() {
        let rubric = rubric();
        let questionnaire = questionnaire();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let resp = response("responses: { T0-Q1: { answer: 3 } }");
        let a = run.score(&resp);
        let b = run.score(&resp);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_unknown_criterion_question_survives() {
        let rubric = rubric();
        let questionnaire = Questionnaire::from_yaml_str(
            r"
questions:
  - id: X-Q1
    type: scale
    tier: tier_9
    criterion: ghost_criterion
    question: Orphaned question.
",
        )
        .unwrap();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let results = run.score(&response("responses: { X-Q1: { answer: 5 } }"));
        assert_eq!(results.scored_count, 1);
        let tier = &results.tier_scores["tier_9"];
        assert!(tier.synthetic);
        assert_eq!(tier.criteria["ghost_criterion"].score, Some(5.0));
    }

    #[test]
    fn test_drift_under_core_tier_id_does_not_raise_determination() {
        // rubric declares only tier_0; the questionnaire claims a criterion
        // under tier_1
        let rubric = rubric();
        let questionnaire = Questionnaire::from_yaml_str(
            r"
questions:
  - id: T0-Q1
    type: scale
    tier: tier_0
    criterion: alert_triage
    question: Rate it.
  - id: T1-Q1
    type: scale
    tier: tier_1
    criterion: ghost_criterion
    question: Orphaned question.
",
        )
        .unwrap();
        let run = ScoringRun::new(&rubric, &questionnaire);
        let results = run.score(&response(
            "responses: { T0-Q1: { answer: 4 }, T1-Q1: { answer: 5 } }",
        ));

        // the drift stays visible in the results and the overall score
        assert!(results.tier_scores["tier_1"].synthetic);
        assert_eq!(
            results.tier_scores["tier_1"].criteria["ghost_criterion"].score,
            Some(5.0)
        );
        assert_eq!(results.overall_score, Some(4.5));

        // but a tier the rubric never declared cannot be achieved
        assert_eq!(results.tier_determination.tier_number, 0);
        assert_eq!(results.tier_determination.tier_name, "Tier 0: Foundation");
    }
}
