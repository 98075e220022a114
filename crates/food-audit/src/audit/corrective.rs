use serde::{Deserialize, Serialize};

use super::catalog::ItemCatalog;
use super::domain::{AnswerValue, AuditAnswer};

/// Failed audit item flagged for follow-up remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectiveActionItem {
    pub question_id: String,
    pub category_id: String,
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CorrectiveActionItem {
    pub fn from_answer(answer: &AuditAnswer, catalog: &ItemCatalog) -> Self {
        Self {
            question_id: answer.question_id.clone(),
            category_id: answer.category_id.clone(),
            section_id: answer.section_id.clone(),
            title: catalog.title(&answer.question_id).map(str::to_string),
        }
    }

    /// Question title when the catalog has one, otherwise the question id.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.question_id)
    }
}

/// Answers needing follow-up: flagged corrective and answered No.
pub fn corrective_actions(answers: &[AuditAnswer]) -> Vec<&AuditAnswer> {
    answers
        .iter()
        .filter(|answer| answer.is_corrective && answer.value == AnswerValue::No)
        .collect()
}
