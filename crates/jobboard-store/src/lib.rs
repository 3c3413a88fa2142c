//! Pluggable listing/submission storage.
//!
//! Two interchangeable backends implement the same contracts:
//! - [`local`] keeps two JSON files under a data directory;
//! - [`google`] keeps the same two JSON blobs as named files in a Drive
//!   folder and additionally uploads resume binaries there.
//!
//! Both read the entire collection, mutate in memory, and write the entire
//! collection back. There is no locking on either side; concurrent writers
//! race and the last write wins. That is an accepted property of a
//! low-volume admin tool, not something the layer defends against.

pub mod config;
pub mod error;
pub mod google;
pub mod local;
pub mod normalize;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use jobboard_core::{ApplicationDraft, JobApplication, JobDraft, JobListing};

pub use config::{GoogleConfig, StoreConfig};
pub use error::{StoreError, StoreResult};

/// Listing persistence contract.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All listings, normalized and ordered newest first.
    async fn list(&self) -> StoreResult<Vec<JobListing>>;

    /// Assigns id and posting time, appends, persists the full collection.
    async fn add(&self, draft: JobDraft) -> StoreResult<JobListing>;

    /// Replaces every field except id and posting time. `None` when the id
    /// is unknown; the collection is left untouched in that case.
    async fn update(&self, job_id: &str, draft: JobDraft) -> StoreResult<Option<JobListing>>;

    /// `true` iff a listing was removed. Persists only on removal.
    async fn remove(&self, job_id: &str) -> StoreResult<bool>;
}

/// Submission persistence contract. Append-only.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Assigns id and submission time, persists. The remote backend first
    /// uploads any attached resume payload and stores the resulting
    /// pointer on the record.
    async fn add(&self, draft: ApplicationDraft) -> StoreResult<JobApplication>;

    /// All submissions, ordered newest first.
    async fn list(&self) -> StoreResult<Vec<JobApplication>>;
}

/// The pair of active stores, bound once at process start.
#[derive(Clone)]
pub struct Stores {
    pub jobs: Arc<dyn JobStore>,
    pub applications: Arc<dyn ApplicationStore>,
}

impl Stores {
    /// Bind both stores to the remote backend when its configuration is
    /// complete, otherwise to local files. Fixed for the process lifetime.
    pub fn from_config(config: &StoreConfig) -> Stores {
        match &config.google {
            Some(google) => {
                tracing::info!(folder = %google.folder_id, "using google drive storage");
                let client = Arc::new(google::DriveClient::new(google.clone()));
                Stores {
                    jobs: Arc::new(google::DriveJobStore::new(client.clone())),
                    applications: Arc::new(google::DriveApplicationStore::new(client)),
                }
            }
            None => {
                tracing::info!(dir = %config.data_dir.display(), "using local file storage");
                let files = Arc::new(local::DataFiles::new(config.data_dir.clone()));
                Stores {
                    jobs: Arc::new(local::LocalJobStore::new(files.clone())),
                    applications: Arc::new(local::LocalApplicationStore::new(files)),
                }
            }
        }
    }
}
