//! End-to-end tests for merging external text-answer scores into results.

use debmm_tools::model::{AssessmentResponse, Questionnaire, Rubric};
use debmm_tools::scoring::{merge_external_scores, ExternalAnalysis, ScoringRun, TextScore};

const RUBRIC: &str = r"
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
";

const QUESTIONNAIRE: &str = r"
questions:
  - id: T0-Q1
    type: scale
    tier: tier_0
    criterion: alert_triage
    question: Rate triage consistency.
  - id: T0-Q2
    type: text
    tier: tier_0
    criterion: alert_triage
    question: Describe the triage workflow.
";

const RESPONSE: &str = r"
metadata: { organization: Example Corp }
responses:
  T0-Q1: { answer: 2 }
  T0-Q2: { answer: 'A runbook covers intake, enrichment, and escalation.' }
";

fn text_score(id: &str, criterion: Option<&str>, score: f64) -> TextScore {
    TextScore {
        id: id.to_string(),
        criterion: criterion.map(str::to_string),
        score,
        justification: Some("Answer shows a documented process.".to_string()),
    }
}

#[test]
fn test_merge_raises_criterion_and_determination() {
    let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
    let questionnaire = Questionnaire::from_yaml_str(QUESTIONNAIRE).unwrap();
    let response = AssessmentResponse::from_yaml_str(RESPONSE).unwrap();
    let run = ScoringRun::new(&rubric, &questionnaire);
    let results = run.score(&response);

    // Automated run: only the scale answer counts
    assert_eq!(
        results.tier_scores["tier_0"].criteria["alert_triage"].score,
        Some(2.0)
    );
    assert_eq!(results.tier_determination.tier_number, -1);
    assert_eq!(results.needs_review_count, 1);

    let analysis = ExternalAnalysis {
        text_scores: vec![text_score("T0-Q2", Some("alert_triage"), 4.0)],
        inconsistencies: vec![],
        improvement_plan: String::new(),
    };
    let merged = merge_external_scores(&results, &analysis, &questionnaire, run.criterion_index());

    // (2 + 4) / 2 = 3.0: Defined, so tier_0 is now achieved
    assert_eq!(
        merged.tier_scores["tier_0"].criteria["alert_triage"].score,
        Some(3.0)
    );
    assert_eq!(merged.overall_score, Some(3.0));
    assert_eq!(merged.tier_determination.tier_number, 0);
    assert!(merged.recommendations.is_empty());
    assert_eq!(merged.needs_review_count, 0);
    assert_eq!(merged.scored_count, 2);
    assert!(merged.analysis_applied);

    // The automated results are untouched
    assert_eq!(results.tier_determination.tier_number, -1);
    assert!(!results.analysis_applied);
}

#[test]
fn test_merge_is_idempotent() {
    let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
    let questionnaire = Questionnaire::from_yaml_str(QUESTIONNAIRE).unwrap();
    let response = AssessmentResponse::from_yaml_str(RESPONSE).unwrap();
    let run = ScoringRun::new(&rubric, &questionnaire);
    let results = run.score(&response);

    let analysis = ExternalAnalysis {
        text_scores: vec![text_score("T0-Q2", None, 4.0)],
        ..ExternalAnalysis::default()
    };
    let once = merge_external_scores(&results, &analysis, &questionnaire, run.criterion_index());
    let twice = merge_external_scores(&once, &analysis, &questionnaire, run.criterion_index());

    assert_eq!(
        serde_json::to_string(&once).unwrap(),
        serde_json::to_string(&twice).unwrap()
    );
}

#[test]
fn test_unusable_scores_leave_results_unchanged() {
    let rubric = Rubric::from_yaml_str(RUBRIC).unwrap();
    let questionnaire = Questionnaire::from_yaml_str(QUESTIONNAIRE).unwrap();
    let response = AssessmentResponse::from_yaml_str(RESPONSE).unwrap();
    let run = ScoringRun::new(&rubric, &questionnaire);
    let results = run.score(&response);

    // One score outside 1-5, one against a criterion the rubric lacks
    let analysis = ExternalAnalysis {
        text_scores: vec![
            text_score("T0-Q2", Some("alert_triage"), 9.0),
            text_score("X-Q9", Some("no_such_criterion"), 3.0),
        ],
        ..ExternalAnalysis::default()
    };
    let merged = merge_external_scores(&results, &analysis, &questionnaire, run.criterion_index());

    assert!(!merged.analysis_applied);
    assert_eq!(
        serde_json::to_string(&merged).unwrap(),
        serde_json::to_string(&results).unwrap()
    );
}

#[test]
fn test_analysis_parses_from_json() {
    let analysis: ExternalAnalysis = serde_json::from_str(
        r#"{
            "text_scores": [
                {"id": "T0-Q2", "criterion": "alert_triage", "score": 4,
                 "justification": "Documented and consistently applied."}
            ],
            "inconsistencies": ["Scale answers contradict the workflow description."],
            "improvement_plan": "Formalize escalation criteria."
        }"#,
    )
    .unwrap();

    assert_eq!(analysis.text_scores.len(), 1);
    assert!((analysis.text_scores[0].score - 4.0).abs() < f64::EPSILON);
    assert_eq!(analysis.inconsistencies.len(), 1);
    assert!(!analysis.is_empty());
}
