//! Email notification for new submissions, via the Resend HTTP API.

use jobboard_core::JobApplication;
use serde_json::json;

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";
const DEFAULT_FROM: &str = "notifications@resend.dev";
const DEFAULT_NOTIFY: &str = "careers@wts.dev";

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: String,
    pub from: String,
    pub to: String,
}

impl ResendConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY").ok()?;
        let from = std::env::var("RESEND_FROM_EMAIL").unwrap_or_else(|_| DEFAULT_FROM.to_string());
        let to = std::env::var("RESEND_NOTIFY_EMAIL").unwrap_or_else(|_| DEFAULT_NOTIFY.to_string());
        Some(Self { api_key, from, to })
    }
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding:6px 12px 6px 0;font-weight:600;vertical-align:top;\">{label}</td><td style=\"padding:6px 0;\">{value}</td></tr>"
    )
}

fn link(url: &str) -> String {
    format!("<a href=\"{url}\">{url}</a>")
}

/// HTML body listing the submission's fields; optional fields appear only
/// when present.
fn email_html(application: &JobApplication) -> String {
    let mut lines = vec![
        format!("<h2>New Application: {}</h2>", application.job_title),
        "<table style=\"border-collapse:collapse;font-family:sans-serif;font-size:14px;\">"
            .to_string(),
        row("Name", &application.full_name),
        row(
            "Email",
            &format!("<a href=\"mailto:{0}\">{0}</a>", application.email),
        ),
        row("Location", &application.current_location),
        row("Company", &application.current_company),
        row("Role Interest", &application.role_interest),
    ];

    if let Some(referred_by) = &application.referred_by {
        lines.push(row("Referred By", referred_by));
    }
    if let Some(url) = &application.linkedin_url {
        lines.push(row("LinkedIn", &link(url)));
    }
    if let Some(url) = &application.github_url {
        lines.push(row("GitHub", &link(url)));
    }
    if let Some(url) = &application.portfolio_url {
        lines.push(row("Portfolio", &link(url)));
    }
    if let Some(url) = &application.resume_drive_file_url {
        lines.push(row("Resume", &link(url)));
    }

    lines.push(row("Submitted", &application.submitted_at.to_rfc3339()));
    lines.push("</table>".to_string());
    lines.join("\n")
}

/// Sends a formatted email per stored submission. Inactive without an API
/// key.
pub struct Notifier {
    http: reqwest::Client,
    config: Option<ResendConfig>,
}

impl Notifier {
    pub fn new(config: Option<ResendConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Best-effort: logs and swallows every failure.
    pub async fn send_application(&self, application: &JobApplication) {
        let Some(config) = &self.config else {
            tracing::debug!("resend not configured, skipping notification");
            return;
        };

        let body = json!({
            "from": config.from,
            "to": config.to,
            "subject": format!(
                "New Application — {} — {}",
                application.job_title, application.full_name
            ),
            "html": email_html(application),
        });

        let result = self
            .http
            .post(RESEND_EMAILS_URL)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(submission = %application.id, "notification email sent");
            }
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                tracing::warn!(%status, error = text, "notification email rejected");
            }
            Err(err) => {
                tracing::warn!(error = %err, "notification email failed");
            }
        }
    }
}
