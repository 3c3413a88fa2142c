//! Application (submission) types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id;

/// A submitted application.
///
/// Submissions are append-only: `id` and `submitted_at` are assigned once
/// and there is no update or remove operation. The Drive pointer fields are
/// populated only when the remote backend uploaded a resume payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    /// Title snapshot taken at submission time; survives listing removal.
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub current_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    pub role_interest: String,
    pub resume_file_name: String,
    pub resume_file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_drive_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_drive_file_url: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Raw resume bytes carried alongside a draft for backends that upload
/// the document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumePayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Input for a new submission; everything except identity and the Drive
/// pointers, which the storing backend assigns.
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub job_id: String,
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    pub current_company: String,
    pub current_location: String,
    pub referred_by: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub role_interest: String,
    pub resume_file_name: String,
    pub resume_file_size: u64,
    pub resume: Option<ResumePayload>,
}

impl ApplicationDraft {
    /// Materialize a submission without a resume pointer.
    pub fn into_application(self, submitted_at: DateTime<Utc>) -> JobApplication {
        let id = id::application_id(&self.job_id, submitted_at.timestamp_millis());
        let resume_content_type = self.resume.as_ref().and_then(|r| r.content_type.clone());
        JobApplication {
            id,
            job_id: self.job_id,
            job_title: self.job_title,
            full_name: self.full_name,
            email: self.email,
            current_company: self.current_company,
            current_location: self.current_location,
            referred_by: self.referred_by,
            linkedin_url: self.linkedin_url,
            github_url: self.github_url,
            portfolio_url: self.portfolio_url,
            role_interest: self.role_interest,
            resume_file_name: self.resume_file_name,
            resume_file_size: self.resume_file_size,
            resume_content_type,
            resume_drive_file_id: None,
            resume_drive_file_url: None,
            submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> ApplicationDraft {
        ApplicationDraft {
            job_id: "engineering-full-stack-engineer-1700000000000".to_string(),
            job_title: "Full Stack Engineer".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            current_company: "Analytical Engines".to_string(),
            current_location: "London".to_string(),
            referred_by: None,
            linkedin_url: None,
            github_url: None,
            portfolio_url: None,
            role_interest: "I want to build the platform.".to_string(),
            resume_file_name: "resume.pdf".to_string(),
            resume_file_size: 1024,
            resume: None,
        }
    }

    #[test]
    fn id_derives_from_job_and_submission_time() {
        let at = Utc.timestamp_millis_opt(1_700_000_001_000).unwrap();
        let application = draft().into_application(at);
        assert_eq!(
            application.id,
            "engineering-full-stack-engineer-1700000000000-1700000001000"
        );
        assert_eq!(application.submitted_at, at);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let at = Utc.timestamp_millis_opt(1_700_000_001_000).unwrap();
        let value = serde_json::to_value(draft().into_application(at)).unwrap();
        assert!(value.get("referredBy").is_none());
        assert!(value.get("resumeDriveFileId").is_none());
        assert_eq!(value.get("resumeFileName").unwrap(), "resume.pdf");
    }

    #[test]
    fn legacy_records_without_new_fields_deserialize() {
        let raw = r#"{
            "id": "a-1",
            "jobId": "a",
            "jobTitle": "Role",
            "fullName": "Name",
            "email": "n@example.com",
            "roleInterest": "words",
            "resumeFileName": "cv.pdf",
            "resumeFileSize": 10,
            "submittedAt": "2026-02-01T00:00:00.000Z"
        }"#;
        let application: JobApplication = serde_json::from_str(raw).unwrap();
        assert_eq!(application.current_company, "");
        assert!(application.resume_drive_file_url.is_none());
    }
}
