use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::views::{severity_label, AuditReportSummary, CorrectiveActionView, ScoreEntry};
use crate::audit::{
    compute_scores, corrective_actions, AuditId, AuditRecord, CorrectiveActionItem,
    InvalidAuditData, ItemCatalog, ScoreCard, SeverityLevel,
};

/// Scored audit ready for rendering and notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub audit_id: AuditId,
    pub store_identifier: String,
    pub template_id: String,
    pub conducted_on: NaiveDate,
    pub auditor: Option<String>,
    pub scores: ScoreCard,
    pub corrective_actions: Vec<CorrectiveActionItem>,
}

impl AuditReport {
    pub fn build(record: &AuditRecord, catalog: &ItemCatalog) -> Result<Self, InvalidAuditData> {
        let scores = compute_scores(&record.answers, catalog)?;
        let corrective_actions = corrective_actions(&record.answers)
            .into_iter()
            .map(|answer| CorrectiveActionItem::from_answer(answer, catalog))
            .collect();

        Ok(Self {
            audit_id: record.audit_id.clone(),
            store_identifier: record.store_identifier.clone(),
            template_id: record.template_id.clone(),
            conducted_on: record.conducted_on,
            auditor: record.auditor.clone(),
            scores,
            corrective_actions,
        })
    }

    pub fn overall_severity(&self) -> Option<SeverityLevel> {
        self.scores.overall_severity()
    }

    pub fn summary(&self) -> AuditReportSummary {
        let categories = self
            .scores
            .category_scores
            .iter()
            .map(|score| {
                ScoreEntry::new(
                    &score.category_id,
                    score.earned_points,
                    score.possible_points,
                    score.percentage,
                )
            })
            .collect();

        let sections = self
            .scores
            .section_scores
            .iter()
            .map(|score| {
                ScoreEntry::new(
                    &score.section_id,
                    score.earned_points,
                    score.possible_points,
                    score.percentage,
                )
            })
            .collect();

        let corrective_actions = self
            .corrective_actions
            .iter()
            .map(CorrectiveActionView::from)
            .collect();

        let severity = self.overall_severity();

        AuditReportSummary {
            audit_id: self.audit_id.clone(),
            store_identifier: self.store_identifier.clone(),
            conducted_on: self.conducted_on,
            auditor: self.auditor.clone(),
            overall: self.scores.overall,
            overall_label: self.scores.overall.label(),
            severity,
            severity_label: severity_label(severity),
            categories,
            sections,
            corrective_actions,
        }
    }
}
