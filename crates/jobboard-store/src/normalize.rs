//! Read-time reconciliation of persisted listings with the current schema.
//!
//! Persisted files may predate two category changes: `Operations` was
//! retired and `Product Management` became `Product`. The shim runs on
//! every list; files are only rewritten with current names on the next
//! write that happens to touch them.

use jobboard_core::JobListing;

/// Returns the listing with a current category, or `None` when the listing
/// belongs to a retired category and must disappear from results.
pub fn normalize_stored_job(mut job: JobListing) -> Option<JobListing> {
    if job.team.is_retired() {
        return None;
    }
    job.team = job.team.normalized();
    Some(job)
}

/// Normalization plus display ordering: newest first.
pub fn normalize_listing(jobs: Vec<JobListing>) -> Vec<JobListing> {
    let mut jobs: Vec<JobListing> = jobs.into_iter().filter_map(normalize_stored_job).collect();
    jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    jobs
}
