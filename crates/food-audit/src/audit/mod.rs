//! Audit answer scoring: category, section, and overall percentages plus
//! the severity buckets and corrective-action filtering derived from them.

pub mod catalog;
pub mod corrective;
pub mod domain;
pub mod scoring;
pub mod severity;

pub use catalog::{ItemCatalog, ItemMetadata, DEFAULT_ITEM_WEIGHT};
pub use corrective::{corrective_actions, CorrectiveActionItem};
pub use domain::{AnswerValue, AuditAnswer, AuditId, AuditRecord};
pub use scoring::{
    compute_scores, CategoryScore, InvalidAuditData, ScoreCard, ScorePercentage, SectionScore,
};
pub use severity::{severity_from_score, SeverityLevel};
