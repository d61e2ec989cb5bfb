//! Progressive tier determination.
//!
//! An organization is at Tier N iff every criterion in tiers 0..=N has a
//! non-null score at or above Defined (3.0). Evaluation walks the declared
//! core tier order and stops at the first failing tier, so a failing
//! foundational tier can never be skipped regardless of how higher tiers
//! score. Enrichment tiers are excluded entirely.

use crate::model::{CORE_TIER_ORDER, DEFINED_THRESHOLD};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::aggregate::TierScore;

/// The achieved maturity tier, derived from tier/criterion results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDetermination {
    /// Index of the achieved core tier, -1 if none (Below Foundation)
    pub tier_number: i32,
    pub tier_name: String,
    pub description: String,
}

/// Determine the highest fully-qualifying core tier.
///
/// Re-derivable purely from the tier score set; holds no hidden state, so
/// it can be recomputed after an external-score merge.
#[must_use]
pub fn determine_tier(tier_scores: &IndexMap<String, TierScore>) -> TierDetermination {
    let mut achieved: i32 = -1;
    let mut achieved_name = "Below Foundation".to_string();

    for (index, tier_id) in CORE_TIER_ORDER.iter().enumerate() {
        // Synthetic entries come from questionnaire drift, not the rubric;
        // for gating they are the same as a tier the rubric never declared.
        let Some(tier) = tier_scores.get(*tier_id).filter(|t| !t.synthetic) else {
            break;
        };

        let all_defined = tier.criteria.values().all(|c| {
            c.score
                .is_some_and(|score| score >= DEFINED_THRESHOLD)
        });

        if all_defined {
            achieved = index as i32;
            achieved_name = tier.name.clone();
        } else {
            break;
        }
    }

    let description = if achieved >= 0 {
        format!("All criteria through {achieved_name} meet or exceed Defined (3.0) level.")
    } else {
        "Not all Tier 0 (Foundation) criteria meet Defined (3.0) level.".to_string()
    };

    TierDetermination {
        tier_number: achieved,
        tier_name: achieved_name,
        description,
    }
}
