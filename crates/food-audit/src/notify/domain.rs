use serde::{Deserialize, Serialize};

use super::aliases::AssignedStores;

/// Store-manager account as read from the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreManagerAccount {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub assigned_store_aliases: AssignedStores,
    pub email_notifications_enabled: bool,
    pub is_active: bool,
    pub is_approved: bool,
}

impl StoreManagerAccount {
    /// Active, approved, and opted in to e-mail.
    pub fn accepts_notifications(&self) -> bool {
        self.is_active && self.is_approved && self.email_notifications_enabled
    }
}

/// Account selected to receive a notification for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    pub account: StoreManagerAccount,
    pub matched_alias: String,
}
