use serde::{Deserialize, Serialize};

use super::domain::{NotificationTarget, StoreManagerAccount};

/// Outcome of resolving recipients, including accounts dropped for bad alias data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientResolution {
    pub targets: Vec<NotificationTarget>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedAccount>,
}

/// Eligible account left out because its alias list could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAccount {
    pub account_id: String,
    pub reason: String,
}

/// Three-way containment test. Case-sensitive; an alias such as "S" will
/// match any identifier containing that letter.
pub fn store_matches_alias(store_identifier: &str, alias: &str) -> bool {
    store_identifier == alias
        || store_identifier.contains(alias)
        || alias.contains(store_identifier)
}

/// Accounts that should be notified about `store_identifier`, in candidate order.
pub fn resolve_recipients(
    store_identifier: &str,
    candidates: &[StoreManagerAccount],
) -> Vec<NotificationTarget> {
    resolve_detailed(store_identifier, candidates).targets
}

pub fn resolve_detailed(
    store_identifier: &str,
    candidates: &[StoreManagerAccount],
) -> RecipientResolution {
    let mut resolution = RecipientResolution::default();
    if store_identifier.is_empty() {
        return resolution;
    }

    for account in candidates
        .iter()
        .filter(|account| account.accepts_notifications())
    {
        let aliases = match account.assigned_store_aliases.aliases() {
            Ok(aliases) => aliases,
            Err(reason) => {
                resolution.skipped.push(SkippedAccount {
                    account_id: account.id.clone(),
                    reason: reason.to_string(),
                });
                continue;
            }
        };

        if let Some(alias) = aliases
            .iter()
            .find(|alias| store_matches_alias(store_identifier, alias))
        {
            resolution.targets.push(NotificationTarget {
                account: account.clone(),
                matched_alias: alias.clone(),
            });
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::aliases::AssignedStores;

    fn account(id: &str, aliases: &[&str]) -> StoreManagerAccount {
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

    #[test]
    fn alias_containing_identifier_matches() {
        let candidates = vec![account("m1", &["GMRL-SIG", "Signature Store"])];

        let targets = resolve_recipients("Signature", &candidates);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].matched_alias, "Signature Store");
    }

    #[test]
    fn unrelated_alias_does_not_match() {
        let candidates = vec![account("m1", &["GMRL-SIG"])];
        assert!(resolve_recipients("Signature", &candidates).is_empty());
    }

    #[test]
    fn identifier_containing_alias_matches() {
        let candidates = vec![account("m1", &["SIG"])];
        let targets = resolve_recipients("GMRL-SIG Mall", &candidates);
        assert_eq!(targets[0].matched_alias, "SIG");
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let candidates = vec![account("m1", &["signature"])];
        assert!(resolve_recipients("Signature", &candidates).is_empty());
        assert_eq!(resolve_recipients("signature", &candidates).len(), 1);
    }

    #[test]
    fn first_matching_alias_is_recorded_once() {
        let candidates = vec![account("m1", &["Dubai", "Dubai Mall", "Mall"])];

        let targets = resolve_recipients("Dubai Mall", &candidates);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].matched_alias, "Dubai");
    }

    #[test]
    fn ineligible_accounts_are_never_returned() {
        let mut muted = account("muted", &["Signature Store"]);
        muted.email_notifications_enabled = false;
        let mut inactive = account("inactive", &["Signature Store"]);
        inactive.is_active = false;
        let mut pending = account("pending", &["Signature Store"]);
        pending.is_approved = false;
        let candidates = vec![muted, inactive, pending, account("ok", &["Signature Store"])];

        let targets = resolve_recipients("Signature", &candidates);

        let ids: Vec<_> = targets.iter().map(|t| t.account.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn malformed_aliases_skip_only_that_account() {
        let mut broken = account("broken", &[]);
        broken.assigned_store_aliases = AssignedStores::from_json("[\"Signature");
        let candidates = vec![broken, account("ok", &["Signature"])];

        let resolution = resolve_detailed("Signature", &candidates);

        assert_eq!(resolution.targets.len(), 1);
        assert_eq!(resolution.targets[0].account.id, "ok");
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].account_id, "broken");
    }

    #[test]
    fn malformed_ineligible_accounts_are_not_reported() {
        let mut broken = account("broken", &[]);
        broken.assigned_store_aliases = AssignedStores::from_json("{");
        broken.is_active = false;

        let resolution = resolve_detailed("Signature", &[broken]);

        assert!(resolution.targets.is_empty());
        assert!(resolution.skipped.is_empty());
    }

    #[test]
    fn empty_identifier_matches_nothing() {
        let candidates = vec![account("m1", &["Signature Store"])];
        assert!(resolve_recipients("", &candidates).is_empty());
    }

    #[test]
    fn whitespace_identifier_uses_plain_containment() {
        let candidates = vec![
            account("m1", &["Signature Store"]),
            account("m2", &["GMRL-SIG"]),
        ];

        let targets = resolve_recipients(" ", &candidates);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].account.id, "m1");
        assert_eq!(targets[0].matched_alias, "Signature Store");
    }

    #[test]
    fn blank_aliases_are_matched_like_any_other() {
        let mut stored = account("m1", &[]);
        stored.assigned_store_aliases = AssignedStores::from_json(r#"["  ", "GMRL-SIG"]"#);
        let candidates = vec![stored, account("m2", &[""])];

        let spaced = resolve_recipients("Dubai  Mall", &candidates);
        let plain = resolve_recipients("Marina", &candidates);

        let spaced_ids: Vec<_> = spaced.iter().map(|t| t.account.id.as_str()).collect();
        assert_eq!(spaced_ids, vec!["m1", "m2"]);
        assert_eq!(spaced[0].matched_alias, "  ");
        let plain_ids: Vec<_> = plain.iter().map(|t| t.account.id.as_str()).collect();
        assert_eq!(plain_ids, vec!["m2"]);
    }

    #[test]
    fn results_follow_candidate_order() {
        let candidates = vec![
            account("b", &["Marina"]),
            account("a", &["Marina Walk"]),
            account("c", &["Jumeirah"]),
        ];

        let ids: Vec<_> = resolve_recipients("Marina", &candidates)
            .into_iter()
            .map(|target| target.account.id)
            .collect();

        assert_eq!(ids, vec!["b", "a"]);
    }
}
