use food_audit::audit::{AuditId, AuditRecord, ItemCatalog};
use food_audit::notify::{NotificationMessage, StoreManagerAccount};
use food_audit::report::{
    AuditRepository, MailerError, ManagerDirectory, NotificationMailer, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

use food_audit::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One exported audit with the template metadata needed to score it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuditBundle {
    pub(crate) audit: AuditRecord,
    #[serde(default)]
    pub(crate) catalog: ItemCatalog,
    #[serde(default)]
    pub(crate) managers: Vec<StoreManagerAccount>,
}

impl AuditBundle {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let bundle = serde_json::from_str(&raw)?;
        Ok(bundle)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAuditRepository {
    records: RwLock<HashMap<AuditId, AuditRecord>>,
    catalogs: RwLock<HashMap<String, ItemCatalog>>,
}

impl InMemoryAuditRepository {
    pub(crate) fn load(&self, bundle: &AuditBundle) {
        let template_id = bundle.audit.template_id.clone();
        self.catalogs
            .write()
            .expect("catalog lock poisoned")
            .insert(template_id, bundle.catalog.clone());
        self.records
            .write()
            .expect("audit lock poisoned")
            .insert(bundle.audit.audit_id.clone(), bundle.audit.clone());
    }
}

impl AuditRepository for InMemoryAuditRepository {
    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        let guard = self.records.read().expect("audit lock poisoned");
        Ok(guard.get(id).cloned())
    }

    fn catalog(&self, template_id: &str) -> Result<ItemCatalog, RepositoryError> {
        let guard = self.catalogs.read().expect("catalog lock poisoned");
        Ok(guard.get(template_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryManagerDirectory {
    accounts: RwLock<Vec<StoreManagerAccount>>,
}

impl InMemoryManagerDirectory {
    /// Adds accounts keyed by id. A later copy of an id replaces the earlier
    /// one in place, so each manager is listed once.
    pub(crate) fn upsert(&self, accounts: impl IntoIterator<Item = StoreManagerAccount>) {
        let mut guard = self.accounts.write().expect("directory lock poisoned");
        for account in accounts {
            match guard.iter_mut().find(|existing| existing.id == account.id) {
                Some(existing) => *existing = account,
                None => guard.push(account),
            }
        }
    }
}

impl ManagerDirectory for InMemoryManagerDirectory {
    fn accounts(&self) -> Result<Vec<StoreManagerAccount>, RepositoryError> {
        Ok(self
            .accounts
            .read()
            .expect("directory lock poisoned")
            .clone())
    }
}

/// Stand-in transport that logs each message and keeps it for inspection.
#[derive(Default)]
pub(crate) struct LoggingMailer {
    outbox: Mutex<Vec<NotificationMessage>>,
}

impl NotificationMailer for LoggingMailer {
    fn send(&self, message: &NotificationMessage) -> Result<(), MailerError> {
        info!(to = %message.to, subject = %message.subject, "queued audit notification");
        self.outbox
            .lock()
            .map_err(|_| MailerError::Transport("outbox lock poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}

impl LoggingMailer {
    pub(crate) fn outbox(&self) -> Vec<NotificationMessage> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }
}
