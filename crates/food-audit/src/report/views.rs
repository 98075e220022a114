use chrono::NaiveDate;
use serde::Serialize;

use crate::audit::{AuditId, CorrectiveActionItem, ScorePercentage, SeverityLevel};

/// Label shown when a score has no severity because nothing was scorable.
pub const NOT_APPLICABLE_LABEL: &str = "Not Applicable";

pub fn severity_label(severity: Option<SeverityLevel>) -> &'static str {
    severity.map_or(NOT_APPLICABLE_LABEL, SeverityLevel::label)
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    pub id: String,
    pub earned_points: f64,
    pub possible_points: f64,
    pub percentage: ScorePercentage,
    pub percentage_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,
    pub severity_label: &'static str,
}

impl ScoreEntry {
    pub(crate) fn new(
        id: &str,
        earned_points: f64,
        possible_points: f64,
        percentage: ScorePercentage,
    ) -> Self {
        let severity = percentage.severity();
        Self {
            id: id.to_string(),
            earned_points,
            possible_points,
            percentage,
            percentage_label: percentage.label(),
            severity,
            severity_label: severity_label(severity),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrectiveActionView {
    pub question_id: String,
    pub title: String,
    pub category_id: String,
    pub section_id: String,
}

impl From<&CorrectiveActionItem> for CorrectiveActionView {
    fn from(item: &CorrectiveActionItem) -> Self {
        Self {
            question_id: item.question_id.clone(),
            title: item.display_name().to_string(),
            category_id: item.category_id.clone(),
            section_id: item.section_id.clone(),
        }
    }
}

/// Render-ready view of an audit report consumed by templates and messages.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReportSummary {
    pub audit_id: AuditId,
    pub store_identifier: String,
    pub conducted_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auditor: Option<String>,
    pub overall: ScorePercentage,
    pub overall_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityLevel>,
    pub severity_label: &'static str,
    pub categories: Vec<ScoreEntry>,
    pub sections: Vec<ScoreEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corrective_actions: Vec<CorrectiveActionView>,
}
