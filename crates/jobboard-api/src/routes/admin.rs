//! Admin endpoints: login plus listing CRUD, all behind the session cookie.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::AppState;
use crate::auth::{require_admin, session_cookie};
use crate::error::ApiError;
use jobboard_core::{EmploymentType, JobCategory, JobDraft};
use jobboard_store::seed::DEFAULT_ABOUT_WTS;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/jobs", post(create_job))
        .route("/jobs/{job_id}", put(update_job).delete(remove_job))
        .route("/applications", get(list_applications))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    password: String,
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Some(expected) = &state.admin_password else {
        return Err(ApiError::Internal(
            "ADMIN_PASSWORD is not configured.".to_string(),
        ));
    };

    if request.password != **expected {
        return Err(ApiError::Unauthorized("Invalid password.".to_string()));
    }

    Ok((jar.add(session_cookie()), Json(json!({ "ok": true }))))
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JobRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    team: String,
    #[serde(default, rename = "type")]
    employment_type: String,
    #[serde(default)]
    about_wts: String,
    #[serde(default)]
    about_team: String,
    #[serde(default)]
    about_role: String,
}

impl JobRequest {
    /// Validate and normalize into a draft. Listings are remote-first:
    /// location is fixed, and a blank company blurb falls back to the
    /// default copy.
    fn into_draft(self) -> Result<JobDraft, ApiError> {
        let title = self.title.trim().to_string();
        let team = self.team.trim();
        let employment_type = self.employment_type.trim();
        let about_role = self.about_role.trim().to_string();
        let about_wts = self.about_wts.trim().to_string();

        if title.is_empty() || team.is_empty() || employment_type.is_empty() || about_role.is_empty()
        {
            return Err(ApiError::BadRequest("All fields are required.".to_string()));
        }

        let team = JobCategory::parse_active(team)
            .ok_or_else(|| ApiError::BadRequest("Invalid team.".to_string()))?;
        let employment_type = EmploymentType::parse(employment_type)
            .ok_or_else(|| ApiError::BadRequest("Invalid employment type.".to_string()))?;

        Ok(JobDraft {
            title,
            team,
            location: "Remote".to_string(),
            employment_type,
            about_wts: if about_wts.is_empty() {
                DEFAULT_ABOUT_WTS.to_string()
            } else {
                about_wts
            },
            about_team: self.about_team.trim().to_string(),
            about_role,
        })
    }
}

async fn create_job(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<JobRequest>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&jar)?;
    let job = state.stores.jobs.add(request.into_draft()?).await?;
    Ok(Json(json!({ "job": job })))
}

async fn update_job(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(job_id): Path<String>,
    Json(request): Json<JobRequest>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&jar)?;
    let updated = state
        .stores
        .jobs
        .update(&job_id, request.into_draft()?)
        .await?;
    match updated {
        Some(job) => Ok(Json(json!({ "job": job }))),
        None => Err(ApiError::NotFound("Job not found.".to_string())),
    }
}

async fn remove_job(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(job_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&jar)?;
    if state.stores.jobs.remove(&job_id).await? {
        Ok(Json(json!({ "ok": true })))
    } else {
        Err(ApiError::NotFound("Job not found.".to_string()))
    }
}

async fn list_applications(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Value>, ApiError> {
    require_admin(&jar)?;
    let applications = state.stores.applications.list().await?;
    Ok(Json(json!({ "applications": applications })))
}

#[cfg(test)]
mod tests {
    use crate::auth::ADMIN_COOKIE_NAME;
    use crate::routes::router;
    use crate::{AppConfig, AppState};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use jobboard_store::StoreConfig;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(dir: &TempDir) -> AppState {
        AppState::new(&AppConfig {
            port: 0,
            admin_password: Some("hunter2".to_string()),
            store: StoreConfig::local(dir.path().join("data")),
            resend: None,
            sheets: None,
        })
    }

    fn admin_cookie() -> String {
        format!("{ADMIN_COOKIE_NAME}=1")
    }

    fn create_request(body: &str, with_cookie: bool) -> Request<Body> {
        let mut builder = Request::post("/api/admin/jobs")
            .header(header::CONTENT_TYPE, "application/json");
        if with_cookie {
            builder = builder.header(header::COOKIE, admin_cookie());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    const VALID_JOB: &str = r#"{
        "title": "Data Engineer",
        "team": "Engineering",
        "type": "Full-time",
        "aboutRole": "Pipelines."
    }"#;

    #[tokio::test]
    async fn login_sets_the_session_cookie() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(
                Request::post("/api/admin/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("password=hunter2"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with(&format!("{ADMIN_COOKIE_NAME}=1")));
        assert!(set_cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(
                Request::post("/api/admin/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("password=wrong"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_requires_the_cookie() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let response = app.oneshot(create_request(VALID_JOB, false)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_update_remove_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let response = router(state.clone())
            .oneshot(create_request(VALID_JOB, true))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let job_id = created["job"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["job"]["location"], "Remote");
        // Blank blurb falls back to the default copy.
        assert!(created["job"]["aboutWts"].as_str().unwrap().starts_with("WTS builds"));

        let update_body = r#"{
            "title": "Senior Data Engineer",
            "team": "Engineering",
            "type": "Contract",
            "aboutRole": "Bigger pipelines."
        }"#;
        let response = router(state.clone())
            .oneshot(
                Request::put(format!("/api/admin/jobs/{job_id}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, admin_cookie())
                    .body(Body::from(update_body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let updated: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated["job"]["id"], job_id.as_str());
        assert_eq!(updated["job"]["title"], "Senior Data Engineer");
        assert_eq!(updated["job"]["postedAt"], created["job"]["postedAt"]);

        let response = router(state.clone())
            .oneshot(
                Request::delete(format!("/api/admin/jobs/{job_id}"))
                    .header(header::COOKIE, admin_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Second delete: nothing left to remove.
        let response = router(state)
            .oneshot(
                Request::delete(format!("/api/admin/jobs/{job_id}"))
                    .header(header::COOKIE, admin_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn legacy_team_is_rejected_for_new_jobs() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let body = r#"{
            "title": "Ops Lead",
            "team": "Operations",
            "type": "Full-time",
            "aboutRole": "Ops."
        }"#;
        let response = app.oneshot(create_request(body, true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Invalid team.");
    }

    #[tokio::test]
    async fn update_unknown_job_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = router(test_state(&dir));

        let response = app
            .oneshot(
                Request::put("/api/admin/jobs/no-such-id")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, admin_cookie())
                    .body(Body::from(VALID_JOB))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn applications_list_is_gated() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let response = router(state.clone())
            .oneshot(
                Request::get("/api/admin/applications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router(state)
            .oneshot(
                Request::get("/api/admin/applications")
                    .header(header::COOKIE, admin_cookie())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
