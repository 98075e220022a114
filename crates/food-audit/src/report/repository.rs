use crate::audit::{AuditId, AuditRecord, ItemCatalog};
use crate::notify::{NotificationMessage, StoreManagerAccount};

/// Read access to recorded audits and their template metadata.
pub trait AuditRepository: Send + Sync {
    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError>;
    fn catalog(&self, template_id: &str) -> Result<ItemCatalog, RepositoryError>;
}

/// Read access to the store-manager user directory.
pub trait ManagerDirectory: Send + Sync {
    fn accounts(&self) -> Result<Vec<StoreManagerAccount>, RepositoryError>;
}

/// Outbound e-mail hook; delivery transport lives behind this trait.
pub trait NotificationMailer: Send + Sync {
    fn send(&self, message: &NotificationMessage) -> Result<(), MailerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MailerError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("recipient {recipient} rejected: {reason}")]
    Rejected { recipient: String, reason: String },
}
