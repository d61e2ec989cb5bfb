//! Rubric data model: tiers, criteria, and maturity level descriptors.
//!
//! Core tiers (`tier_0`..`tier_4`) carry a strict total order used by tier
//! gating. Any other tier id is an enrichment tier: it contributes to the
//! overall score but never participates in gating. The gating order is a
//! declared constant, never derived from map iteration order.

use crate::error::{AssessmentError, LoadErrorKind, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;

/// Fixed ascending order of the core maturity tiers.
pub const CORE_TIER_ORDER: [&str; 5] = ["tier_0", "tier_1", "tier_2", "tier_3", "tier_4"];

/// Whether a tier id names a core (gated) tier.
#[must_use]
pub fn is_core_tier(tier_id: &str) -> bool {
    CORE_TIER_ORDER.contains(&tier_id)
}

/// Rank of a core tier within the gating order, if it is one.
#[must_use]
pub fn core_tier_rank(tier_id: &str) -> Option<usize> {
    CORE_TIER_ORDER.iter().position(|t| *t == tier_id)
}

/// Qualitative/quantitative description of one maturity level of a criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// What this level looks like in practice
    pub qualitative: String,
    /// Optional measurable indicator for this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantitative: Option<String>,
}

/// A scored capability belonging to exactly one tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    /// Relative weight in tier/overall averages (default 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Maturity level descriptors keyed 1-5; all five must be present
    pub levels: BTreeMap<u8, LevelDescriptor>,
}

const fn default_weight() -> f64 {
    1.0
}

/// A maturity stage (core) or supplementary dimension (enrichment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub criteria: Vec<Criterion>,
}

/// The full maturity rubric: an ordered set of tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub tiers: Vec<Tier>,
}

impl Rubric {
    /// Parse a rubric from YAML and validate its structural invariants.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let rubric: Self = serde_yaml::from_str(content)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Validate structural invariants needed for scoring to be total:
    /// unique tier/criterion ids, positive finite weights, and exactly
    /// levels 1-5 per criterion (so score-to-level-name mapping never has
    /// a hole).
    pub fn validate(&self) -> Result<()> {
        let mut tier_ids = HashSet::new();
        let mut criterion_ids = HashSet::new();

        for tier in &self.tiers {
            if !tier_ids.insert(tier.id.as_str()) {
                return Err(AssessmentError::load(
                    "rubric",
                    LoadErrorKind::DuplicateId {
                        kind: "tier".to_string(),
                        id: tier.id.clone(),
                    },
                ));
            }

            for criterion in &tier.criteria {
                if !criterion_ids.insert(criterion.id.as_str()) {
                    return Err(AssessmentError::load(
                        "rubric",
                        LoadErrorKind::DuplicateId {
                            kind: "criterion".to_string(),
                            id: criterion.id.clone(),
                        },
                    ));
                }

                if !criterion.weight.is_finite() || criterion.weight <= 0.0 {
                    return Err(AssessmentError::load(
                        "rubric",
                        LoadErrorKind::InvalidWeight {
                            criterion: criterion.id.clone(),
                            weight: criterion.weight,
                        },
                    ));
                }

                for level in 1..=5u8 {
                    if !criterion.levels.contains_key(&level) {
                        return Err(AssessmentError::load(
                            "rubric",
                            LoadErrorKind::MissingLevel {
                                criterion: criterion.id.clone(),
                                level,
                            },
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Build a criterion lookup spanning all tiers.
    #[must_use]
    pub fn criterion_index(&self) -> CriterionIndex {
        let mut index = IndexMap::new();
        for tier in &self.tiers {
            for criterion in &tier.criteria {
                index.insert(
                    criterion.id.clone(),
                    CriterionInfo {
                        id: criterion.id.clone(),
                        name: criterion.name.clone(),
                        weight: criterion.weight,
                        tier_id: tier.id.clone(),
                        tier_name: tier.name.clone(),
                    },
                );
            }
        }
        CriterionIndex { criteria: index }
    }

    /// Total criterion count across all tiers.
    #[must_use]
    pub fn criterion_count(&self) -> usize {
        self.tiers.iter().map(|t| t.criteria.len()).sum()
    }
}

/// A criterion definition flattened with its owning tier's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionInfo {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub tier_id: String,
    pub tier_name: String,
}

/// Lookup of criterion id -> criterion definition with tier info, preserving
/// rubric declaration order.
#[derive(Debug, Clone, Default)]
pub struct CriterionIndex {
    criteria: IndexMap<String, CriterionInfo>,
}

impl CriterionIndex {
    #[must_use]
    pub fn get(&self, criterion_id: &str) -> Option<&CriterionInfo> {
        self.criteria.get(criterion_id)
    }

    #[must_use]
    pub fn contains(&self, criterion_id: &str) -> bool {
        self.criteria.contains_key(criterion_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionInfo> {
        self.criteria.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Rank of a tier for recommendation ordering: core tiers first in
    /// gating order, then enrichment tiers in rubric declaration order.
    #[must_use]
    pub fn tier_rank(&self, tier_id: &str) -> usize {
        if let Some(rank) = core_tier_rank(tier_id) {
            return rank;
        }
        let mut enrichment_tiers: Vec<&str> = Vec::new();
        for info in self.criteria.values() {
            if !is_core_tier(&info.tier_id) && !enrichment_tiers.contains(&info.tier_id.as_str()) {
                enrichment_tiers.push(info.tier_id.as_str());
            }
        }
        match enrichment_tiers.iter().position(|t| *t == tier_id) {
            Some(r) => CORE_TIER_ORDER.len() + r,
            None => usize::MAX,
        }
    }
}
