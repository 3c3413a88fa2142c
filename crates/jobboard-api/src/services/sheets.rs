//! Spreadsheet tracking: one appended row per stored submission.
//!
//! Reuses the store layer's service-account token; active only when both
//! the Google credentials and a spreadsheet id are configured.

use jobboard_core::JobApplication;
use jobboard_store::GoogleConfig;
use jobboard_store::google::GoogleAuth;
use serde_json::json;

const DEFAULT_TAB_NAME: &str = "Application Submissions";

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub tab_name: String,
}

impl SheetsConfig {
    pub fn from_env() -> Option<Self> {
        let spreadsheet_id = std::env::var("GOOGLE_SHEETS_SPREADSHEET_ID").ok()?;
        let tab_name = std::env::var("GOOGLE_SHEETS_TAB_NAME")
            .unwrap_or_else(|_| DEFAULT_TAB_NAME.to_string());
        Some(Self {
            spreadsheet_id,
            tab_name,
        })
    }
}

/// One row per submission, columns A through I.
fn submission_row(application: &JobApplication) -> Vec<String> {
    vec![
        application.submitted_at.to_rfc3339(),
        application.job_title.clone(),
        application.full_name.clone(),
        application.email.clone(),
        application.current_company.clone(),
        application.current_location.clone(),
        application.referred_by.clone().unwrap_or_default(),
        application.role_interest.clone(),
        application.resume_drive_file_url.clone().unwrap_or_default(),
    ]
}

struct ActiveTracker {
    config: SheetsConfig,
    auth: GoogleAuth,
}

pub struct SheetsTracker {
    http: reqwest::Client,
    active: Option<ActiveTracker>,
}

impl SheetsTracker {
    pub fn new(sheets: Option<SheetsConfig>, google: Option<GoogleConfig>) -> Self {
        let active = match (sheets, google) {
            (Some(config), Some(google)) => Some(ActiveTracker {
                config,
                auth: GoogleAuth::new(google.client_email, google.private_key),
            }),
            _ => None,
        };
        Self {
            http: reqwest::Client::new(),
            active,
        }
    }

    /// Best-effort: skipped silently when unconfigured, logged on failure.
    pub async fn append_submission(&self, application: &JobApplication) {
        let Some(tracker) = &self.active else {
            tracing::debug!("sheets tracking not configured, skipping append");
            return;
        };

        let token = match tracker.auth.access_token().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "sheets append skipped, auth failed");
                return;
            }
        };

        let range = format!("{}!A:I", tracker.config.tab_name);
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append",
            tracker.config.spreadsheet_id,
            urlencoding::encode(&range),
        );
        let body = json!({ "values": [submission_row(application)] });

        let result = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(submission = %application.id, "sheets row appended");
            }
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                tracing::warn!(%status, error = text, "sheets append rejected");
            }
            Err(err) => {
                tracing::warn!(error = %err, "sheets append failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn row_has_nine_columns_with_blanks_for_missing_fields() {
        let application = JobApplication {
            id: "job-1-1".to_string(),
            job_id: "job-1".to_string(),
            job_title: "Designer".to_string(),
            full_name: "Mary Shelley".to_string(),
            email: "mary@example.com".to_string(),
            current_company: String::new(),
            current_location: "Geneva".to_string(),
            referred_by: None,
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            role_interest: "Monsters.".to_string(),
            resume_file_name: "cv.pdf".to_string(),
            resume_file_size: 1,
            resume_content_type: None,
            resume_drive_file_id: None,
            resume_drive_file_url: None,
            submitted_at: Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap(),
        };

        let row = submission_row(&application);
        assert_eq!(row.len(), 9);
        assert_eq!(row[6], "");
        assert_eq!(row[8], "");
        assert_eq!(row[1], "Designer");
    }
}
