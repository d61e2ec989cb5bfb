//! Improvement recommendations for criteria below the Defined threshold.

use crate::model::{CriterionIndex, DEFINED_THRESHOLD};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::aggregate::TierScore;

/// Recommendation priority: High for the two foundational tiers,
/// Medium everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// A prioritized improvement item for one below-threshold criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub criterion: String,
    pub tier: String,
    pub current_score: f64,
    pub current_level: String,
    pub recommendation: String,
    pub priority: Priority,
}

/// The level name a below-threshold criterion should aim for next.
fn target_level(score: f64) -> &'static str {
    if score < DEFINED_THRESHOLD {
        "Defined"
    } else {
        "Managed"
    }
}

/// Generate recommendations for every criterion with a non-null score
/// below Defined (3.0).
///
/// Ordering: core tiers first in gating order, then enrichment tiers in
/// rubric order; within a tier, lowest score first.
#[must_use]
pub fn generate_recommendations(
    tier_scores: &IndexMap<String, TierScore>,
    index: &CriterionIndex,
) -> Vec<Recommendation> {
    let mut below_defined: Vec<_> = tier_scores
        .values()
        .flat_map(|t| t.criteria.values())
        .filter(|c| c.score.is_some_and(|s| s < DEFINED_THRESHOLD))
        .collect();

    below_defined.sort_by(|a, b| {
        index
            .tier_rank(&a.tier_id)
            .cmp(&index.tier_rank(&b.tier_id))
            .then_with(|| {
                a.score
                    .partial_cmp(&b.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    below_defined
        .into_iter()
        .map(|criterion| {
            let score = criterion.score.unwrap_or(0.0);
            let level_name = criterion
                .level_name
                .map_or("Unknown", |l| l.name())
                .to_string();
            let priority = if matches!(criterion.tier_id.as_str(), "tier_0" | "tier_1") {
                Priority::High
            } else {
                Priority::Medium
            };
            Recommendation {
                criterion: criterion.name.clone(),
                tier: criterion.tier_name.clone(),
                current_score: score,
                current_level: level_name.clone(),
                recommendation: format!(
                    "'{}' is at {} ({}/5.0). Focus on reaching {} level by establishing \
                     documented, consistent processes in this area.",
                    criterion.name,
                    level_name,
                    score,
                    target_level(score)
                ),
                priority,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaturityLevel, Rubric};
    use crate::scoring::aggregate::CriterionScore;

    fn rubric_with_two_tiers() -> Rubric {
        let yaml = r"
tiers:
  - id: tier_0
    name: 'Tier 0: Foundation'
    criteria:
      - id: c0
        name: C0
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
  - id: tier_2
    name: 'Tier 2: Intermediate'
    criteria:
      - id: c2
        name: C2
        levels:
          1: { qualitative: a }
          2: { qualitative: b }
          3: { qualitative: c }
          4: { qualitative: d }
          5: { qualitative: e }
";
        Rubric::from_yaml_str(yaml).unwrap()
    }

    fn criterion(id: &str, tier_id: &str, tier_name: &str, score: Option<f64>) -> CriterionScore {
        let level = score.map(MaturityLevel::from_score);
        CriterionScore {
            id: id.to_string(),
            name: id.to_uppercase(),
            weight: 1.0,
            tier_id: tier_id.to_string(),
            tier_name: tier_name.to_string(),
            score,
            level: level.map(|l| l.number()),
            level_name: level,
            scored_count: usize::from(score.is_some()),
            total_count: 1,
            needs_review_count: 0,
            questions: Vec::new(),
            external_scores: Vec::new(),
        }
    }

    fn tiers_from(criteria: Vec<CriterionScore>) -> IndexMap<String, TierScore> {
        let mut tiers: IndexMap<String, TierScore> = IndexMap::new();
        for c in criteria {
            let entry = tiers.entry(c.tier_id.clone()).or_insert_with(|| TierScore {
                name: c.tier_name.clone(),
                score: None,
                synthetic: false,
                criteria: IndexMap::new(),
            });
            entry.criteria.insert(c.id.clone(), c);
        }
        for tier in tiers.values_mut() {
            tier.recompute();
        }
        tiers
    }

    #[test]
    fn test_only_below_threshold_criteria_recommended() {
        let index = rubric_with_two_tiers().criterion_index();
        let tiers = tiers_from(vec![
            criterion("c0", "tier_0", "Tier 0: Foundation", Some(3.5)),
            criterion("c2", "tier_2", "Tier 2: Intermediate", Some(2.0)),
        ]);
        let recs = generate_recommendations(&tiers, &index);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].criterion, "C2");
    }

    #[test]
    fn test_null_scores_not_recommended() {
        let index = rubric_with_two_tiers().criterion_index();
        let tiers = tiers_from(vec![criterion("c0", "tier_0", "Tier 0: Foundation", None)]);
        assert!(generate_recommendations(&tiers, &index).is_empty());
    }

    #[test]
    fn test_priority_labels() {
        let index = rubric_with_two_tiers().criterion_index();
        let tiers = tiers_from(vec![
            criterion("c0", "tier_0", "Tier 0: Foundation", Some(1.5)),
            criterion("c2", "tier_2", "Tier 2: Intermediate", Some(2.5)),
        ]);
        let recs = generate_recommendations(&tiers, &index);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].priority, Priority::Medium);
    }

    #[test]
    fn test_ordering_tier_rank_then_score() {
        let index = rubric_with_two_tiers().criterion_index();
        // tier_2 criterion scores lower than tier_0's, but tier_0 comes first
        let tiers = tiers_from(vec![
            criterion("c2", "tier_2", "Tier 2: Intermediate", Some(1.0)),
            criterion("c0", "tier_0", "Tier 0: Foundation", Some(2.5)),
        ]);
        let recs = generate_recommendations(&tiers, &index);
        assert_eq!(recs[0].criterion, "C0");
        assert_eq!(recs[1].criterion, "C2");
    }

    #[test]
    fn test_guidance_names_target_level() {
        let index = rubric_with_two_tiers().criterion_index();
        let tiers = tiers_from(vec![criterion(
            "c0",
            "tier_0",
            "Tier 0: Foundation",
            Some(2.0),
        )]);
        let recs = generate_recommendations(&tiers, &index);
        assert!(recs[0].recommendation.contains("Defined"));
        assert_eq!(recs[0].current_level, "Repeatable");
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
