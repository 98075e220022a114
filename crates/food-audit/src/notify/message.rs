use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use super::domain::NotificationTarget;
use crate::report::AuditReportSummary;

/// Corrective items listed in the body before the remainder is summarized.
const MAX_LISTED_ACTIONS: usize = 10;

/// Characters escaped when an audit id becomes a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Envelope settings shared by every message in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSettings {
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_base_url: Option<String>,
}

/// Plain-text notification handed to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    pub fn compose(
        target: &NotificationTarget,
        summary: &AuditReportSummary,
        settings: &MessageSettings,
    ) -> Self {
        let subject = format!(
            "[{}] Food safety audit for {}: {}",
            summary.severity_label, summary.store_identifier, summary.overall_label
        );

        let mut lines = vec![
            format!("Hello {},", target.account.display_name),
            String::new(),
            format!(
                "A food safety audit for {} was completed on {}.",
                summary.store_identifier,
                summary.conducted_on.format("%B %d, %Y")
            ),
        ];
        if let Some(auditor) = &summary.auditor {
            lines.push(format!("Auditor: {auditor}"));
        }
        lines.push(format!("Overall score: {}", summary.overall_label));
        lines.push(format!("Severity: {}", summary.severity_label));
        lines.push(String::new());

        if summary.corrective_actions.is_empty() {
            lines.push("No corrective actions are required.".to_string());
        } else {
            lines.push(format!(
                "Corrective actions required ({}):",
                summary.corrective_actions.len()
            ));
            for action in summary.corrective_actions.iter().take(MAX_LISTED_ACTIONS) {
                lines.push(format!("  - {} [{}]", action.title, action.category_id));
            }
            let remaining = summary
                .corrective_actions
                .len()
                .saturating_sub(MAX_LISTED_ACTIONS);
            if remaining > 0 {
                lines.push(format!("  ...and {remaining} more"));
            }
        }

        if let Some(base_url) = &settings.report_base_url {
            lines.push(String::new());
            let audit_id = summary.audit_id.to_string();
            let segment = utf8_percent_encode(&audit_id, PATH_SEGMENT);
            lines.push(format!("Full report: {base_url}/{segment}"));
        }

        lines.push(String::new());
        lines.push(format!(
            "You are receiving this because you manage {}.",
            target.matched_alias
        ));

        Self {
            from: settings.sender.clone(),
            to: target.account.email.clone(),
            subject,
            body: lines.join("\n"),
        }
    }
}
