use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::audit::{AnswerValue, AuditAnswer, AuditId, AuditRecord, ItemCatalog, ItemMetadata};
use crate::notify::{AssignedStores, MessageSettings, NotificationMessage, StoreManagerAccount};
use crate::report::repository::{
    AuditRepository, MailerError, ManagerDirectory, NotificationMailer, RepositoryError,
};
use crate::report::{audit_router, AuditReportService};

pub(super) type MemoryService = AuditReportService<MemoryAudits, MemoryDirectory, MemoryMailer>;

pub(super) fn answer(question: &str, category: &str, value: AnswerValue) -> AuditAnswer {
    AuditAnswer {
        question_id: question.to_string(),
        category_id: category.to_string(),
        section_id: "kitchen".to_string(),
        value,
        numeric_value: None,
        is_corrective: false,
    }
}

pub(super) fn corrective(question: &str, category: &str) -> AuditAnswer {
    AuditAnswer {
        is_corrective: true,
        ..answer(question, category, AnswerValue::No)
    }
}

pub(super) fn audit_record() -> AuditRecord {
    AuditRecord {
        audit_id: AuditId("AUD-100".to_string()),
        store_identifier: "Signature".to_string(),
        template_id: "fs-v2".to_string(),
        conducted_on: NaiveDate::from_ymd_opt(2026, 5, 12).expect("valid date"),
        auditor: Some("Nadia".to_string()),
        answers: vec![
            answer("Q1", "temperature", AnswerValue::Yes),
            answer("Q2", "temperature", AnswerValue::Yes),
            corrective("Q3", "hygiene"),
            answer("Q4", "hygiene", AnswerValue::Yes),
            AuditAnswer {
                numeric_value: Some(3.0),
                ..answer("T1", "temperature", AnswerValue::Numeric)
            },
            answer("P1", "pest", AnswerValue::NotApplicable),
        ],
    }
}

pub(super) fn catalog() -> ItemCatalog {
    ItemCatalog::new()
        .with_item(
            "T1",
            ItemMetadata {
                max_points: Some(4.0),
                title: Some("Walk-in cooler at or below 5C".to_string()),
            },
        )
        .with_item(
            "Q3",
            ItemMetadata {
                max_points: None,
                title: Some("Hand sink stocked with soap".to_string()),
            },
        )
}

pub(super) fn manager(id: &str, aliases: &[&str]) -> StoreManagerAccount {
    StoreManagerAccount {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        display_name: format!("Manager {id}"),
        assigned_store_aliases: AssignedStores::from_aliases(aliases.iter().copied()),
        email_notifications_enabled: true,
        is_active: true,
        is_approved: true,
    }
}

pub(super) fn settings() -> MessageSettings {
    MessageSettings {
        sender: "audits@example.com".to_string(),
        report_base_url: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryAudits {
    records: HashMap<AuditId, AuditRecord>,
    catalogs: HashMap<String, ItemCatalog>,
}

impl MemoryAudits {
    pub(super) fn with_record(mut self, record: AuditRecord, catalog: ItemCatalog) -> Self {
        self.catalogs.insert(record.template_id.clone(), catalog);
        self.records.insert(record.audit_id.clone(), record);
        self
    }
}

impl AuditRepository for MemoryAudits {
    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Ok(self.records.get(id).cloned())
    }

    fn catalog(&self, template_id: &str) -> Result<ItemCatalog, RepositoryError> {
        Ok(self.catalogs.get(template_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableAudits;

impl AuditRepository for UnavailableAudits {
    fn fetch(&self, _id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("sql server offline".to_string()))
    }

    fn catalog(&self, _template_id: &str) -> Result<ItemCatalog, RepositoryError> {
        Err(RepositoryError::Unavailable("sql server offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    accounts: Vec<StoreManagerAccount>,
}

impl MemoryDirectory {
    pub(super) fn new(accounts: Vec<StoreManagerAccount>) -> Self {
        Self { accounts }
    }
}

impl ManagerDirectory for MemoryDirectory {
    fn accounts(&self) -> Result<Vec<StoreManagerAccount>, RepositoryError> {
        Ok(self.accounts.clone())
    }
}

/// Records messages; addresses listed in `reject` fail delivery.
#[derive(Default)]
pub(super) struct MemoryMailer {
    sent: Mutex<Vec<NotificationMessage>>,
    reject: Vec<String>,
}

impl MemoryMailer {
    pub(super) fn rejecting(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: addresses.iter().map(|address| address.to_string()).collect(),
        }
    }

    pub(super) fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl NotificationMailer for MemoryMailer {
    fn send(&self, message: &NotificationMessage) -> Result<(), MailerError> {
        if self.reject.contains(&message.to) {
            return Err(MailerError::Rejected {
                recipient: message.to.clone(),
                reason: "mailbox full".to_string(),
            });
        }
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(message.clone());
        Ok(())
    }
}

pub(super) fn build_service(
    accounts: Vec<StoreManagerAccount>,
) -> (MemoryService, Arc<MemoryMailer>) {
    build_service_with_mailer(accounts, MemoryMailer::default())
}

pub(super) fn build_service_with_mailer(
    accounts: Vec<StoreManagerAccount>,
    mailer: MemoryMailer,
) -> (MemoryService, Arc<MemoryMailer>) {
    let audits = Arc::new(MemoryAudits::default().with_record(audit_record(), catalog()));
    let directory = Arc::new(MemoryDirectory::new(accounts));
    let mailer = Arc::new(mailer);
    let service = AuditReportService::new(audits, directory, mailer.clone(), settings());
    (service, mailer)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    audit_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
