use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for a completed audit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuditId(pub String);

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recorded response to a single audit question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    #[serde(alias = "Yes")]
    Yes,
    #[serde(alias = "No")]
    No,
    #[serde(rename = "na", alias = "NA", alias = "N/A")]
    NotApplicable,
    #[serde(alias = "Numeric")]
    Numeric,
}

impl AnswerValue {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotApplicable => "N/A",
            Self::Numeric => "Numeric",
        }
    }
}

/// One answered question as captured by the audit-capture system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditAnswer {
    pub question_id: String,
    pub category_id: String,
    pub section_id: String,
    pub value: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(default)]
    pub is_corrective: bool,
}

/// Audit header plus every recorded answer, as handed over by the data-fetch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: AuditId,
    pub store_identifier: String,
    pub template_id: String,
    pub conducted_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auditor: Option<String>,
    pub answers: Vec<AuditAnswer>,
}
