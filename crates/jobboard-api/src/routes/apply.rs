//! Public application submission: multipart form with an attached resume.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;
use jobboard_core::{ApplicationDraft, ResumePayload};

const ACCEPTED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

fn has_allowed_extension(file_name: &str) -> bool {
    let normalized = file_name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| normalized.ends_with(ext))
}

#[derive(Default)]
struct SubmitForm {
    full_name: String,
    email: String,
    current_company: String,
    current_location: String,
    referred_by: String,
    linkedin_url: String,
    github_url: String,
    portfolio_url: String,
    role_interest: String,
    job_id: String,
    job_title: String,
    resume_file_name: Option<String>,
    resume_content_type: Option<String>,
    resume_bytes: Option<Bytes>,
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

async fn read_form(multipart: &mut Multipart) -> Result<SubmitForm, ApiError> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "resume" {
            form.resume_file_name = field.file_name().map(str::to_string);
            form.resume_content_type = field.content_type().map(str::to_string);
            form.resume_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Malformed resume upload: {e}")))?,
            );
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed form data: {e}")))?
            .trim()
            .to_string();

        match name.as_str() {
            "fullName" => form.full_name = value,
            "email" => form.email = value,
            "currentCompany" => form.current_company = value,
            "currentLocation" => form.current_location = value,
            "referredBy" => form.referred_by = value,
            "linkedinUrl" => form.linkedin_url = value,
            "githubUrl" => form.github_url = value,
            "portfolioUrl" => form.portfolio_url = value,
            "roleInterest" => form.role_interest = value,
            "jobId" => form.job_id = value,
            "jobTitle" => form.job_title = value,
            _ => {}
        }
    }

    Ok(form)
}

pub async fn submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let form = read_form(&mut multipart).await?;

    if form.full_name.is_empty()
        || form.email.is_empty()
        || form.role_interest.is_empty()
        || form.job_id.is_empty()
        || form.job_title.is_empty()
    {
        return Err(ApiError::BadRequest(
            "Please complete all required fields.".to_string(),
        ));
    }

    let resume_bytes = match &form.resume_bytes {
        Some(bytes) if !bytes.is_empty() => bytes.clone(),
        _ => {
            return Err(ApiError::BadRequest(
                "Please upload a resume file.".to_string(),
            ));
        }
    };
    let resume_file_name = form.resume_file_name.clone().unwrap_or_default();
    if !has_allowed_extension(&resume_file_name) {
        return Err(ApiError::BadRequest(
            "Resume must be a PDF or DOCX file.".to_string(),
        ));
    }

    let draft = ApplicationDraft {
        job_id: form.job_id,
        job_title: form.job_title,
        full_name: form.full_name,
        email: form.email,
        current_company: form.current_company,
        current_location: form.current_location,
        referred_by: optional(form.referred_by),
        linkedin_url: optional(form.linkedin_url),
        github_url: optional(form.github_url),
        portfolio_url: optional(form.portfolio_url),
        role_interest: form.role_interest,
        resume_file_name,
        resume_file_size: resume_bytes.len() as u64,
        resume: Some(ResumePayload {
            bytes: resume_bytes,
            content_type: form.resume_content_type,
        }),
    };

    let stored = state.stores.applications.add(draft).await?;

    // Both integrations are best-effort; neither can fail the submission.
    state.notifier.send_application(&stored).await;
    state.tracker.append_submission(&stored).await;

    Ok(Json(json!({ "message": "Submission successful." })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::router;
    use crate::{AppConfig, AppState};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use jobboard_store::StoreConfig;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "test-boundary";

    fn test_state(dir: &TempDir) -> AppState {
        AppState::new(&AppConfig {
            port: 0,
            admin_password: None,
            store: StoreConfig::local(dir.path().join("data")),
            resend: None,
            sheets: None,
        })
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, file_name: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n"
        )
    }

    fn form_body(parts: &[String]) -> Body {
        let mut body = parts.concat();
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn multipart_request(parts: &[String]) -> Request<Body> {
        Request::post("/api/apply")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(form_body(parts))
            .unwrap()
    }

    fn complete_parts() -> Vec<String> {
        vec![
            text_part("fullName", "Ada Lovelace"),
            text_part("email", "ada@example.com"),
            text_part("roleInterest", "I like engines."),
            text_part("jobId", "eng-fullstack-01"),
            text_part("jobTitle", "Full Stack Engineer"),
            file_part("resume", "resume.pdf", "%PDF-1.4 fake"),
        ]
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_allowed_extension("Resume.PDF"));
        assert!(has_allowed_extension("cv.docx"));
        assert!(!has_allowed_extension("notes.txt"));
        assert!(!has_allowed_extension("resume.pdf.exe"));
    }

    #[tokio::test]
    async fn valid_submission_is_stored() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let app = router(state.clone());

        let response = app.oneshot(multipart_request(&complete_parts())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = state.stores.applications.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].full_name, "Ada Lovelace");
        assert_eq!(stored[0].resume_file_name, "resume.pdf");
        // Local backend keeps metadata but no drive pointer.
        assert!(stored[0].resume_drive_file_url.is_none());
    }

    #[tokio::test]
    async fn missing_required_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let mut parts = complete_parts();
        parts.retain(|p| !p.contains("name=\"email\""));
        let response = app.oneshot(multipart_request(&parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Please complete all required fields.");
    }

    #[tokio::test]
    async fn missing_resume_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let mut parts = complete_parts();
        parts.retain(|p| !p.contains("name=\"resume\""));
        let response = app.oneshot(multipart_request(&parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let mut parts = complete_parts();
        parts.retain(|p| !p.contains("name=\"resume\""));
        parts.push(file_part("resume", "resume.exe", "MZ"));
        let response = app.oneshot(multipart_request(&parts)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Resume must be a PDF or DOCX file.");
    }
}
