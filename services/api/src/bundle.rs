use crate::infra::{AuditBundle, InMemoryAuditRepository, InMemoryManagerDirectory, LoggingMailer};
use clap::Args;
use food_audit::config::{AppConfig, NotificationConfig};
use food_audit::error::AppError;
use food_audit::notify::{import_accounts_from_path, NotificationMessage, RecipientResolution};
use food_audit::report::{AuditReportService, AuditReportSummary, NotificationSummary};
use food_audit::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Audit bundle JSON (`{ "audit": ..., "catalog": ..., "managers": [...] }`)
    #[arg(long)]
    pub(crate) audit: PathBuf,
    /// Manager directory CSV export, merged with managers in the bundle
    #[arg(long)]
    pub(crate) managers: Option<PathBuf>,
    /// Compose notifications for the resolved managers
    #[arg(long)]
    pub(crate) notify: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportOutput {
    pub(crate) report: AuditReportSummary,
    pub(crate) recipients: RecipientResolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notifications: Option<NotificationSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) messages: Vec<NotificationMessage>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let output = build_report(&args, &config.notifications)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) fn build_report(
    args: &ReportArgs,
    notifications: &NotificationConfig,
) -> Result<ReportOutput, AppError> {
    let bundle = AuditBundle::from_path(&args.audit)?;

    let repository = Arc::new(InMemoryAuditRepository::default());
    repository.load(&bundle);

    let directory = Arc::new(InMemoryManagerDirectory::default());
    directory.upsert(bundle.managers.iter().cloned());
    if let Some(path) = &args.managers {
        directory.upsert(import_accounts_from_path(path)?);
    }

    let mailer = Arc::new(LoggingMailer::default());
    let service = AuditReportService::new(
        repository,
        directory,
        mailer.clone(),
        notifications.message_settings(),
    );

    let audit_id = &bundle.audit.audit_id;
    let report = service.report(audit_id)?.summary();
    let recipients = service.recipients(&bundle.audit.store_identifier)?;
    let notifications = if args.notify {
        Some(service.notify(audit_id)?)
    } else {
        None
    };

    Ok(ReportOutput {
        report,
        recipients,
        notifications,
        messages: mailer.outbox(),
    })
}
