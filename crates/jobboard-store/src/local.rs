//! Local file backend: two JSON files under a data directory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jobboard_core::{ApplicationDraft, JobApplication, JobDraft, JobListing};
use tokio::fs;

use crate::error::StoreResult;
use crate::normalize::normalize_listing;
use crate::seed::seed_jobs;
use crate::{ApplicationStore, JobStore};

const JOBS_FILE: &str = "jobs.json";
const SUBMISSIONS_FILE: &str = "submissions.json";

/// The data directory and its two collection files.
///
/// Every read ensures the directory and files exist first; files are
/// created with seed content only when absent, never overwritten. Writes
/// replace the whole file. No locking: concurrent writers race and the
/// later write wins.
pub struct DataFiles {
    data_dir: PathBuf,
}

impl DataFiles {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn jobs_path(&self) -> PathBuf {
        self.data_dir.join(JOBS_FILE)
    }

    fn submissions_path(&self) -> PathBuf {
        self.data_dir.join(SUBMISSIONS_FILE)
    }

    async fn ensure(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).await?;

        let jobs_path = self.jobs_path();
        if !fs::try_exists(&jobs_path).await? {
            let seeded = serde_json::to_vec_pretty(&seed_jobs())?;
            fs::write(&jobs_path, seeded).await?;
        }

        let submissions_path = self.submissions_path();
        if !fs::try_exists(&submissions_path).await? {
            let empty = serde_json::to_vec_pretty(&Vec::<JobApplication>::new())?;
            fs::write(&submissions_path, empty).await?;
        }

        Ok(())
    }

    pub async fn read_jobs(&self) -> StoreResult<Vec<JobListing>> {
        self.ensure().await?;
        let raw = fs::read(self.jobs_path()).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub async fn write_jobs(&self, jobs: &[JobListing]) -> StoreResult<()> {
        self.ensure().await?;
        fs::write(self.jobs_path(), serde_json::to_vec_pretty(jobs)?).await?;
        Ok(())
    }

    pub async fn read_submissions(&self) -> StoreResult<Vec<JobApplication>> {
        self.ensure().await?;
        let raw = fs::read(self.submissions_path()).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub async fn write_submissions(&self, submissions: &[JobApplication]) -> StoreResult<()> {
        self.ensure().await?;
        fs::write(self.submissions_path(), serde_json::to_vec_pretty(submissions)?).await?;
        Ok(())
    }
}

pub struct LocalJobStore {
    files: Arc<DataFiles>,
}

impl LocalJobStore {
    pub fn new(files: Arc<DataFiles>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl JobStore for LocalJobStore {
    async fn list(&self) -> StoreResult<Vec<JobListing>> {
        Ok(normalize_listing(self.files.read_jobs().await?))
    }

    async fn add(&self, draft: JobDraft) -> StoreResult<JobListing> {
        let mut jobs = self.files.read_jobs().await?;
        let listing = draft.into_listing(Utc::now());
        jobs.push(listing.clone());
        self.files.write_jobs(&jobs).await?;
        Ok(listing)
    }

    async fn update(&self, job_id: &str, draft: JobDraft) -> StoreResult<Option<JobListing>> {
        let mut jobs = self.files.read_jobs().await?;
        let Some(index) = jobs.iter().position(|job| job.id == job_id) else {
            return Ok(None);
        };
        let updated = draft.apply_to(&jobs[index]);
        jobs[index] = updated.clone();
        self.files.write_jobs(&jobs).await?;
        Ok(Some(updated))
    }

    async fn remove(&self, job_id: &str) -> StoreResult<bool> {
        let mut jobs = self.files.read_jobs().await?;
        let before = jobs.len();
        jobs.retain(|job| job.id != job_id);
        let removed = jobs.len() != before;
        if removed {
            self.files.write_jobs(&jobs).await?;
        }
        Ok(removed)
    }
}

pub struct LocalApplicationStore {
    files: Arc<DataFiles>,
}

impl LocalApplicationStore {
    pub fn new(files: Arc<DataFiles>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl ApplicationStore for LocalApplicationStore {
    async fn add(&self, draft: ApplicationDraft) -> StoreResult<JobApplication> {
        let mut submissions = self.files.read_submissions().await?;
        // Resume bytes are dropped here; the local backend keeps metadata only.
        let application = draft.into_application(Utc::now());
        submissions.push(application.clone());
        self.files.write_submissions(&submissions).await?;
        Ok(application)
    }

    async fn list(&self) -> StoreResult<Vec<JobApplication>> {
        let mut submissions = self.files.read_submissions().await?;
        submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(submissions)
    }
}
