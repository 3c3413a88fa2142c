//! Google Drive backend.
//!
//! The two collections live as named JSON files inside one Drive folder;
//! resume binaries are uploaded to the same folder. Authentication is a
//! service-account JWT exchanged for a bearer token, cached until near
//! expiry.
//!
//! The write path is find-then-create/update and is not atomic: two
//! concurrent writers can both observe "absent" and each create a file
//! with the same name. A later read takes whichever file the listing
//! query returns first. Known race, unmitigated.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use jobboard_core::{ApplicationDraft, JobApplication, JobDraft, JobListing, id};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::config::GoogleConfig;
use crate::error::{StoreError, StoreResult};
use crate::normalize::normalize_listing;
use crate::seed::seed_jobs;
use crate::{ApplicationStore, JobStore};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const SCOPES: &str =
    "https://www.googleapis.com/auth/drive https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_RESUME_MIME: &str = "application/octet-stream";
const JSON_MIME: &str = "application/json";

/// The document-store operations the backend needs from Drive. Named files
/// inside one fixed folder; ids are opaque.
#[async_trait]
pub trait RemoteFiles: Send + Sync {
    /// Id of the named file, if present. When duplicates exist the first
    /// listed wins.
    async fn find_file(&self, name: &str) -> StoreResult<Option<String>>;
    async fn download(&self, file_id: &str) -> StoreResult<Bytes>;
    /// Create a new file with content; returns its id.
    async fn create_file(&self, name: &str, mime: &str, content: Bytes) -> StoreResult<String>;
    async fn update_content(&self, file_id: &str, mime: &str, content: Bytes) -> StoreResult<()>;
}

/// `files.list` query matching exactly one name inside the folder.
fn files_list_query(folder_id: &str, name: &str) -> String {
    format!(
        "'{}' in parents and name = '{}' and trashed = false",
        folder_id,
        name.replace('\'', "\\'")
    )
}

/// Public view link for an uploaded file.
fn view_url(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}

/// Collision-resistant name for an uploaded resume.
fn resume_object_name(job_id: &str, at_millis: i64, original_name: &str) -> String {
    format!("{job_id}-{at_millis}-{}", id::sanitize_file_name(original_name))
}

/// Read a named JSON collection. Absent: create it seeded with the
/// fallback and return the fallback. Malformed content: warn and return
/// the fallback; remote files are never allowed to poison the read path.
async fn read_collection<T>(
    files: &dyn RemoteFiles,
    name: &str,
    fallback: Vec<T>,
) -> StoreResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    match files.find_file(name).await? {
        Some(file_id) => {
            let raw = files.download(&file_id).await?;
            match serde_json::from_slice(&raw) {
                Ok(parsed) => Ok(parsed),
                Err(err) => {
                    tracing::warn!(file = name, error = %err, "malformed drive blob, using fallback");
                    Ok(fallback)
                }
            }
        }
        None => {
            let seeded = Bytes::from(serde_json::to_vec_pretty(&fallback)?);
            files.create_file(name, JSON_MIME, seeded).await?;
            Ok(fallback)
        }
    }
}

/// Overwrite a named JSON collection, creating the file when absent.
async fn write_collection<T: Serialize>(
    files: &dyn RemoteFiles,
    name: &str,
    value: &[T],
) -> StoreResult<()> {
    let content = Bytes::from(serde_json::to_vec_pretty(value)?);
    match files.find_file(name).await? {
        Some(file_id) => files.update_content(&file_id, JSON_MIME, content).await,
        None => files.create_file(name, JSON_MIME, content).await.map(|_| ()),
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Service-account token source, shared by the Drive stores and the
/// spreadsheet tracker.
pub struct GoogleAuth {
    client_email: String,
    private_key: String,
    http: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleAuth {
    pub fn new(client_email: String, private_key: String) -> Self {
        Self {
            client_email,
            private_key,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    /// A bearer token, fetched lazily and reused until one minute before
    /// expiry.
    pub async fn access_token(&self) -> StoreResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Utc::now() + Duration::seconds(60) {
                return Ok(token.value.clone());
            }
        }

        let now = Utc::now();
        let claims = Claims {
            iss: &self.client_email,
            scope: SCOPES,
            aud: TOKEN_URL,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid service-account key: {e}")))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StoreError::Auth(format!("jwt signing failed: {e}")))?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("token exchange failed: {text}")));
        }

        let token: TokenResponse = response.json().await?;
        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });
        Ok(value)
    }
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct FilesListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Drive v3 client scoped to one folder.
pub struct DriveClient {
    config: GoogleConfig,
    auth: GoogleAuth,
    http: reqwest::Client,
}

impl DriveClient {
    pub fn new(config: GoogleConfig) -> Self {
        let auth = GoogleAuth::new(config.client_email.clone(), config.private_key.clone());
        Self {
            config,
            auth,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &GoogleConfig {
        &self.config
    }
}

#[async_trait]
impl RemoteFiles for DriveClient {
    async fn find_file(&self, name: &str) -> StoreResult<Option<String>> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .get(FILES_URL)
            .bearer_auth(token)
            .query(&[
                ("q", files_list_query(&self.config.folder_id, name).as_str()),
                ("fields", "files(id, name)"),
                ("spaces", "drive"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(format!("files.list failed: {text}")));
        }

        let listing: FilesListResponse = response.json().await?;
        Ok(listing.files.into_iter().next().map(|f| f.id))
    }

    async fn download(&self, file_id: &str) -> StoreResult<Bytes> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .get(format!("{FILES_URL}/{file_id}"))
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(format!("files.get failed: {text}")));
        }

        Ok(response.bytes().await?)
    }

    async fn create_file(&self, name: &str, mime: &str, content: Bytes) -> StoreResult<String> {
        // Metadata first, then a media upload against the new id.
        let token = self.auth.access_token().await?;
        let metadata = serde_json::json!({
            "name": name,
            "parents": [self.config.folder_id],
            "mimeType": mime,
        });
        let response = self
            .http
            .post(FILES_URL)
            .bearer_auth(&token)
            .json(&metadata)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(format!("files.create failed: {text}")));
        }

        let created: DriveFile = response.json().await?;
        self.update_content(&created.id, mime, content).await?;
        Ok(created.id)
    }

    async fn update_content(&self, file_id: &str, mime: &str, content: Bytes) -> StoreResult<()> {
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .patch(format!("{UPLOAD_URL}/{file_id}"))
            .bearer_auth(token)
            .query(&[("uploadType", "media")])
            .header(reqwest::header::CONTENT_TYPE, mime)
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Api(format!("media upload failed: {text}")));
        }

        Ok(())
    }
}

pub struct DriveJobStore {
    files: Arc<dyn RemoteFiles>,
    file_name: String,
}

impl DriveJobStore {
    pub fn new(client: Arc<DriveClient>) -> Self {
        let file_name = client.config().jobs_file_name.clone();
        Self { files: client, file_name }
    }

    /// Bind to any remote file store; used by tests.
    pub fn with_files(files: Arc<dyn RemoteFiles>, file_name: impl Into<String>) -> Self {
        Self { files, file_name: file_name.into() }
    }

    async fn read_all(&self) -> StoreResult<Vec<JobListing>> {
        read_collection(self.files.as_ref(), &self.file_name, seed_jobs()).await
    }

    async fn write_all(&self, jobs: &[JobListing]) -> StoreResult<()> {
        write_collection(self.files.as_ref(), &self.file_name, jobs).await
    }
}

#[async_trait]
impl JobStore for DriveJobStore {
    async fn list(&self) -> StoreResult<Vec<JobListing>> {
        Ok(normalize_listing(self.read_all().await?))
    }

    async fn add(&self, draft: JobDraft) -> StoreResult<JobListing> {
        let mut jobs = self.read_all().await?;
        let listing = draft.into_listing(Utc::now());
        jobs.push(listing.clone());
        self.write_all(&jobs).await?;
        Ok(listing)
    }

    async fn update(&self, job_id: &str, draft: JobDraft) -> StoreResult<Option<JobListing>> {
        let mut jobs = self.read_all().await?;
        let Some(index) = jobs.iter().position(|job| job.id == job_id) else {
            return Ok(None);
        };
        let updated = draft.apply_to(&jobs[index]);
        jobs[index] = updated.clone();
        self.write_all(&jobs).await?;
        Ok(Some(updated))
    }

    async fn remove(&self, job_id: &str) -> StoreResult<bool> {
        let mut jobs = self.read_all().await?;
        let before = jobs.len();
        jobs.retain(|job| job.id != job_id);
        let removed = jobs.len() != before;
        if removed {
            self.write_all(&jobs).await?;
        }
        Ok(removed)
    }
}

pub struct DriveApplicationStore {
    files: Arc<dyn RemoteFiles>,
    file_name: String,
}

impl DriveApplicationStore {
    pub fn new(client: Arc<DriveClient>) -> Self {
        let file_name = client.config().submissions_file_name.clone();
        Self { files: client, file_name }
    }

    /// Bind to any remote file store; used by tests.
    pub fn with_files(files: Arc<dyn RemoteFiles>, file_name: impl Into<String>) -> Self {
        Self { files, file_name: file_name.into() }
    }
}

#[async_trait]
impl ApplicationStore for DriveApplicationStore {
    async fn add(&self, mut draft: ApplicationDraft) -> StoreResult<JobApplication> {
        let submitted_at = Utc::now();
        let resume = draft.resume.take();

        // Upload first so a storage failure never leaves an orphaned
        // pointer on the record. A missing payload degrades gracefully.
        let mut pointer = None;
        let mut content_type = None;
        if let Some(payload) = resume {
            let name = resume_object_name(
                &draft.job_id,
                submitted_at.timestamp_millis(),
                &draft.resume_file_name,
            );
            let mime = payload.content_type.as_deref().unwrap_or(DEFAULT_RESUME_MIME);
            let file_id = self.files.create_file(&name, mime, payload.bytes).await?;
            pointer = Some((view_url(&file_id), file_id));
            content_type = payload.content_type;
        }

        let mut application = draft.into_application(submitted_at);
        application.resume_content_type = content_type;
        if let Some((url, file_id)) = pointer {
            application.resume_drive_file_id = Some(file_id);
            application.resume_drive_file_url = Some(url);
        }

        let mut submissions: Vec<JobApplication> =
            read_collection(self.files.as_ref(), &self.file_name, Vec::new()).await?;
        submissions.push(application.clone());
        write_collection(self.files.as_ref(), &self.file_name, &submissions).await?;
        Ok(application)
    }

    async fn list(&self) -> StoreResult<Vec<JobApplication>> {
        let mut submissions: Vec<JobApplication> =
            read_collection(self.files.as_ref(), &self.file_name, Vec::new()).await?;
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }
}
