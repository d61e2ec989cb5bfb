//! Property tests for the scoring engine.

use debmm_tools::model::{AnswerValue, AssessmentResponse, Questionnaire, ResponseEntry, Rubric};
use debmm_tools::scoring::ScoringRun;
use proptest::prelude::*;

const RUBRIC: &str = r"
tiers:
  - id: tier_0
    name: 'Tier 0: Foundation'
    criteria:
      - id: alert_triage
        name: Alert Triage
        weight: 2.0
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
      - id: log_coverage
        name: Log Coverage
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
";

const QUESTIONNAIRE: &str = r"
questions:
  - id: T0-Q1
    type: checklist
    tier: tier_0
    criterion: alert_triage
    question: Checklist question.
    scoring:
      yes_value: 4
  - id: T0-Q2
    type: scale
    tier: tier_0
    criterion: alert_triage
    question: Scale question.
  - id: T0-Q3
    type: scale
    tier: tier_0
    criterion: log_coverage
    question: Another scale question.
";

fn response_with(answers: &[(&str, AnswerValue)]) -> AssessmentResponse {
    let mut response = AssessmentResponse::default();
    for (id, answer) in answers {
        response.responses.insert(
            (*id).to_string(),
            ResponseEntry {
                answer: Some(answer.clone()),
                evidence: None,
            },
        );
    }
    response
}

proptest! {
    /// Every score the engine produces stays on the 1-5 maturity scale,
    /// whatever combination of valid answers comes in.
    #[test]
    fn scores_stay_in_maturity_range(
        yes in any::<bool>(),
        scale_a in 1i64..=5,
        scale_b in 1i64..=5,
    ) {
        let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
        let questionnaire = Questionnaire::from_yaml_str(QUESTIONNAIRE).unwrap();
        let response = response_with(&[
            ("T0-Q1", AnswerValue::Bool(yes)),
            ("T0-Q2", AnswerValue::Int(scale_a)),
            ("T0-Q3", AnswerValue::Int(scale_b)),
        ]);

        let results = ScoringRun::new(&rubric, &questionnaire).score(&response);

        let overall = results.overall_score.unwrap();
        prop_assert!((1.0..=5.0).contains(&overall));
        for criterion in results.criteria() {
            let score = criterion.score.unwrap();
            prop_assert!((1.0..=5.0).contains(&score));
            let level = criterion.level.unwrap();
            prop_assert!((1..=5).contains(&level));
        }
    }

    /// Scoring the same response twice yields byte-identical results.
    #[test]
    fn scoring_is_deterministic(
        yes in any::<bool>(),
        scale_a in proptest::option::of(1i64..=5),
        scale_b in proptest::option::of(-2i64..=8),
    ) {
        let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
        let questionnaire = Questionnaire::from_yaml_str(QUESTIONNAIRE).unwrap();
        let mut answers = vec![("T0-Q1", AnswerValue::Bool(yes))];
        if let Some(a) = scale_a {
            answers.push(("T0-Q2", AnswerValue::Int(a)));
        }
        if let Some(b) = scale_b {
            // May be out of range; invalid answers must also be stable
            answers.push(("T0-Q3", AnswerValue::Int(b)));
        }
        let response = response_with(&answers);

        let run = ScoringRun::new(&rubric, &questionnaire);
        let first = serde_json::to_string(&run.score(&response)).unwrap();
        let second = serde_json::to_string(&run.score(&response)).unwrap();
        prop_assert_eq!(first, second);
    }
}
