use std::io::Cursor;

use food_audit::notify::{
    import_accounts, resolve_detailed, resolve_recipients, AssignedStores, StoreManagerAccount,
};

fn account(aliases: &[&str], notifications: bool) -> StoreManagerAccount {
    StoreManagerAccount {
        id: "m1".to_string(),
        email: "m1@example.com".to_string(),
        display_name: "Manager One".to_string(),
        assigned_store_aliases: AssignedStores::from_aliases(aliases.iter().copied()),
        email_notifications_enabled: notifications,
        is_active: true,
        is_approved: true,
    }
}

#[test]
fn signature_matches_signature_store_alias() {
    let candidates = [account(&["GMRL-SIG", "Signature Store"], true)];
    let targets = resolve_recipients("Signature", &candidates);

    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].matched_alias, "Signature Store");
}

#[test]
fn signature_does_not_match_unrelated_alias() {
    assert!(resolve_recipients("Signature", &[account(&["GMRL-SIG"], true)]).is_empty());
}

#[test]
fn muted_account_is_never_returned() {
    assert!(resolve_recipients("Signature", &[account(&["Signature"], false)]).is_empty());
}

#[test]
fn imported_directory_feeds_the_resolver() {
    let csv = "\
Id,Email,Display Name,Assigned Stores,Email Notifications,Active,Approved
m1,sara@example.com,Sara,\"[\"\"GMRL-SIG\"\",\"\"Signature Store\"\"]\",yes,yes,yes
m2,omar@example.com,Omar,\"[\"\"GMRL-SIG\"\"]\",yes,yes,yes
m3,lee@example.com,Lee,Signature,yes,yes,yes
m4,kim@example.com,Kim,\"[\"\"Signature\"\"]\",yes,no,yes
";

    let accounts = import_accounts(Cursor::new(csv)).expect("directory imports");
    let resolution = resolve_detailed("Signature", &accounts);

    let ids: Vec<_> = resolution
        .targets
        .iter()
        .map(|target| target.account.id.as_str())
        .collect();
    assert_eq!(ids, vec!["m1"]);
    assert_eq!(resolution.skipped.len(), 1);
    assert_eq!(resolution.skipped[0].account_id, "m3");
}
