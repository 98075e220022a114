//! Store-manager recipient resolution and notification composition.

pub mod aliases;
pub mod directory;
pub mod domain;
pub mod message;
pub mod resolver;

pub use aliases::{AliasParseError, AssignedStores};
pub use directory::{import_accounts, import_accounts_from_path, DirectoryImportError};
pub use domain::{NotificationTarget, StoreManagerAccount};
pub use message::{MessageSettings, NotificationMessage};
pub use resolver::{
    resolve_detailed, resolve_recipients, store_matches_alias, RecipientResolution,
    SkippedAccount,
};
