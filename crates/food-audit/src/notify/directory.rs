use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::aliases::AssignedStores;
use super::domain::StoreManagerAccount;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryImportError {
    #[error("failed to read manager directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid manager directory CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load store-manager accounts from a directory CSV export on disk.
pub fn import_accounts_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<StoreManagerAccount>, DirectoryImportError> {
    let file = std::fs::File::open(path)?;
    import_accounts(file)
}

/// Read store-manager accounts from a directory CSV export. The alias column
/// keeps its raw JSON so broken rows survive import and are skipped later.
pub fn import_accounts<R: Read>(
    reader: R,
) -> Result<Vec<StoreManagerAccount>, DirectoryImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut accounts = Vec::new();

    for record in csv_reader.deserialize::<DirectoryRow>() {
        let row = record?;
        accounts.push(StoreManagerAccount {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            assigned_store_aliases: AssignedStores::from_json(
                row.assigned_stores.as_deref().unwrap_or_default(),
            ),
            email_notifications_enabled: row.email_notifications,
            is_active: row.active,
            is_approved: row.approved,
        });
    }

    Ok(accounts)
}

#[derive(Debug, Deserialize)]
struct DirectoryRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Display Name")]
    display_name: String,
    #[serde(rename = "Assigned Stores", default)]
    assigned_stores: Option<String>,
    #[serde(rename = "Email Notifications", deserialize_with = "flag")]
    email_notifications: bool,
    #[serde(rename = "Active", deserialize_with = "flag")]
    active: bool,
    #[serde(rename = "Approved", deserialize_with = "flag")]
    approved: bool,
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not a yes/no flag")))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}
