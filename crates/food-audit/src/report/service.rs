use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::repository::{AuditRepository, ManagerDirectory, NotificationMailer, RepositoryError};
use super::summary::AuditReport;
use crate::audit::{AuditId, InvalidAuditData};
use crate::notify::{
    resolve_detailed, MessageSettings, NotificationMessage, RecipientResolution, SkippedAccount,
};

/// Service composing the scoring engine, recipient resolver, and mail hook.
pub struct AuditReportService<R, D, M> {
    repository: Arc<R>,
    directory: Arc<D>,
    mailer: Arc<M>,
    settings: MessageSettings,
}

impl<R, D, M> AuditReportService<R, D, M>
where
    R: AuditRepository + 'static,
    D: ManagerDirectory + 'static,
    M: NotificationMailer + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        mailer: Arc<M>,
        settings: MessageSettings,
    ) -> Self {
        Self {
            repository,
            directory,
            mailer,
            settings,
        }
    }

    /// Score a stored audit.
    pub fn report(&self, audit_id: &AuditId) -> Result<AuditReport, AuditReportError> {
        let record = self
            .repository
            .fetch(audit_id)?
            .ok_or(RepositoryError::NotFound)?;
        let catalog = self.repository.catalog(&record.template_id)?;

        let report = AuditReport::build(&record, &catalog)?;
        debug!(
            audit_id = %report.audit_id,
            overall = %report.scores.overall,
            corrective = report.corrective_actions.len(),
            "audit scored"
        );
        Ok(report)
    }

    /// Managers assigned to `store_identifier`; accounts with unreadable alias data are logged.
    pub fn recipients(
        &self,
        store_identifier: &str,
    ) -> Result<RecipientResolution, AuditReportError> {
        let accounts = self.directory.accounts()?;
        let resolution = resolve_detailed(store_identifier, &accounts);

        for skipped in &resolution.skipped {
            warn!(
                account_id = %skipped.account_id,
                reason = %skipped.reason,
                "skipping manager with malformed store aliases"
            );
        }

        Ok(resolution)
    }

    /// Score an audit and e-mail every resolved store manager. Failed deliveries
    /// are recorded per recipient and never retried.
    pub fn notify(&self, audit_id: &AuditId) -> Result<NotificationSummary, AuditReportError> {
        let report = self.report(audit_id)?;
        let summary = report.summary();
        let resolution = self.recipients(&report.store_identifier)?;

        if resolution.targets.is_empty() {
            warn!(
                audit_id = %report.audit_id,
                store = %report.store_identifier,
                "no store managers matched audit store"
            );
        }

        let deliveries = resolution
            .targets
            .iter()
            .map(|target| {
                let message = NotificationMessage::compose(target, &summary, &self.settings);
                let status = match self.mailer.send(&message) {
                    Ok(()) => {
                        info!(
                            audit_id = %report.audit_id,
                            recipient = %target.account.email,
                            alias = %target.matched_alias,
                            "audit notification sent"
                        );
                        DeliveryStatus::Sent
                    }
                    Err(err) => {
                        warn!(
                            audit_id = %report.audit_id,
                            recipient = %target.account.email,
                            error = %err,
                            "audit notification failed"
                        );
                        DeliveryStatus::Failed {
                            reason: err.to_string(),
                        }
                    }
                };

                DeliveryRecord {
                    account_id: target.account.id.clone(),
                    email: target.account.email.clone(),
                    matched_alias: target.matched_alias.clone(),
                    status,
                }
            })
            .collect();

        Ok(NotificationSummary {
            audit_id: report.audit_id,
            store_identifier: report.store_identifier,
            overall_label: summary.overall_label,
            severity_label: summary.severity_label,
            deliveries,
            skipped: resolution.skipped,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum DeliveryStatus {
    Sent,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRecord {
    pub account_id: String,
    pub email: String,
    pub matched_alias: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

/// Outcome of a notification run for one audit.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSummary {
    pub audit_id: AuditId,
    pub store_identifier: String,
    pub overall_label: String,
    pub severity_label: &'static str,
    pub deliveries: Vec<DeliveryRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedAccount>,
}

impl NotificationSummary {
    pub fn sent_count(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|delivery| delivery.status == DeliveryStatus::Sent)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.deliveries.len() - self.sent_count()
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum AuditReportError {
    #[error(transparent)]
    InvalidData(#[from] InvalidAuditData),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
