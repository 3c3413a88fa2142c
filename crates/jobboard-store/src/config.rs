//! Storage configuration.
//!
//! Everything is read from the environment once at process start and then
//! passed by value; no code below `from_env` touches ambient state.

use std::path::PathBuf;

/// Service-account credentials and the Drive folder holding the data blobs.
///
/// The remote backend is active only when every required variable is
/// present; `from_env` returns `None` otherwise and the selector falls
/// back to local files.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub project_id: String,
    pub client_email: String,
    /// PEM private key. `\n` escapes from single-line env values are
    /// already unescaped.
    pub private_key: String,
    pub folder_id: String,
    pub jobs_file_name: String,
    pub submissions_file_name: String,
}

impl GoogleConfig {
    pub fn from_env() -> Option<Self> {
        let project_id = std::env::var("GOOGLE_PROJECT_ID").ok()?;
        let client_email = std::env::var("GOOGLE_CLIENT_EMAIL").ok()?;
        let private_key = std::env::var("GOOGLE_PRIVATE_KEY").ok()?.replace("\\n", "\n");
        let folder_id = std::env::var("GOOGLE_DRIVE_FOLDER_ID").ok()?;

        let jobs_file_name = std::env::var("GOOGLE_DRIVE_JOBS_FILE_NAME")
            .unwrap_or_else(|_| "jobs.json".to_string());
        let submissions_file_name = std::env::var("GOOGLE_DRIVE_SUBMISSIONS_FILE_NAME")
            .unwrap_or_else(|_| "submissions.json".to_string());

        Some(Self {
            project_id,
            client_email,
            private_key,
            folder_id,
            jobs_file_name,
            submissions_file_name,
        })
    }
}

/// Backend selection input, decided once at process start.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory for the local JSON files.
    pub data_dir: PathBuf,
    /// Present iff the remote backend should be used.
    pub google: Option<GoogleConfig>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        Self {
            data_dir,
            google: GoogleConfig::from_env(),
        }
    }

    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            google: None,
        }
    }
}
