//! Report generation: composes scoring and recipient resolution behind
//! injected data-access and mail collaborators.

pub mod repository;
pub mod router;
pub mod service;
mod summary;
pub mod views;

#[cfg(test)]
mod tests;

pub use repository::{
    AuditRepository, MailerError, ManagerDirectory, NotificationMailer, RepositoryError,
};
pub use router::audit_router;
pub use service::{
    AuditReportError, AuditReportService, DeliveryRecord, DeliveryStatus, NotificationSummary,
};
pub use summary::AuditReport;
pub use views::{AuditReportSummary, CorrectiveActionView, ScoreEntry};
