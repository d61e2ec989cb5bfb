//! Maturity scoring engine.
//!
//! The pipeline runs in layers: `question` turns a single answer into a
//! [`QuestionScore`], `aggregate` rolls question scores up into weighted
//! criterion and tier scores, `tier` walks the core tiers in order to find
//! the highest fully achieved one, and `recommend` derives prioritized
//! improvement guidance from criteria below the defined threshold.
//! [`ScoringRun`] ties the layers together; `merge` folds externally
//! produced text-answer scores into an existing result tree.

pub mod aggregate;
pub mod engine;
pub mod merge;
pub mod question;
pub mod recommend;
pub mod tier;

pub use aggregate::{
    compute_criterion_score, compute_overall_score, round2, CriterionScore, ExternalScore,
    TierScore,
};
pub use engine::{AssessmentResults, Issue, ReviewItem, ScoringRun};
pub use merge::{merge_external_scores, ExternalAnalysis, TextScore};
pub use question::{score_question, QuestionScore, QuestionStatus};
pub use recommend::{generate_recommendations, Priority, Recommendation};
pub use tier::{determine_tier, TierDetermination};
