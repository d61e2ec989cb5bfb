//! Typed in-memory representation of the DEBMM assessment inputs.
//!
//! Three documents feed a scoring run: the rubric (tiers, criteria, maturity
//! levels), the questionnaire (questions mapped onto criteria and tiers),
//! and a completed response (raw per-question answers). All three are loaded
//! once per run and treated as read-only reference data by the engine.

mod level;
mod questionnaire;
mod response;
mod rubric;

pub use level::{MaturityLevel, DEFINED_THRESHOLD};
pub use questionnaire::{Question, QuestionType, Questionnaire, ScoringMeta};
pub use response::{AnswerValue, AssessmentResponse, ResponseEntry, ResponseMetadata};
pub use rubric::{
    core_tier_rank, is_core_tier, Criterion, CriterionIndex, CriterionInfo, LevelDescriptor,
    Rubric, Tier, CORE_TIER_ORDER,
};
