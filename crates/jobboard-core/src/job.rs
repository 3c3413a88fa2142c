//! Job listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id;

/// Team a listing belongs to.
///
/// The wire values match the strings found in persisted data. Two legacy
/// values still deserialize: `Product Management` (renamed to [`Product`])
/// and `Operations` (retired). The normalization pass in the store layer
/// rewrites or drops those at read time.
///
/// [`Product`]: JobCategory::Product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobCategory {
    Engineering,
    Product,
    #[serde(rename = "Product Management")]
    ProductManagement,
    Design,
    Marketing,
    Operations,
}

impl JobCategory {
    /// Categories a new listing may be created under.
    pub const ACTIVE: [JobCategory; 4] = [
        JobCategory::Engineering,
        JobCategory::Product,
        JobCategory::Design,
        JobCategory::Marketing,
    ];

    /// The wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Engineering => "Engineering",
            JobCategory::Product => "Product",
            JobCategory::ProductManagement => "Product Management",
            JobCategory::Design => "Design",
            JobCategory::Marketing => "Marketing",
            JobCategory::Operations => "Operations",
        }
    }

    /// Retired categories disappear from listings entirely.
    pub fn is_retired(&self) -> bool {
        matches!(self, JobCategory::Operations)
    }

    /// Maps renamed legacy categories to their current name.
    pub fn normalized(self) -> JobCategory {
        match self {
            JobCategory::ProductManagement => JobCategory::Product,
            other => other,
        }
    }

    /// Parse a category an admin is allowed to create listings under.
    pub fn parse_active(value: &str) -> Option<JobCategory> {
        JobCategory::ACTIVE
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

impl std::fmt::Display for JobCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment type for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
        }
    }

    pub fn parse(value: &str) -> Option<EmploymentType> {
        match value {
            "Full-time" => Some(EmploymentType::FullTime),
            "Part-time" => Some(EmploymentType::PartTime),
            "Contract" => Some(EmploymentType::Contract),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published job listing.
///
/// `id` and `posted_at` are assigned once at creation and never change,
/// including across updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub team: JobCategory,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    pub about_wts: String,
    pub about_team: String,
    pub about_role: String,
    pub posted_at: DateTime<Utc>,
}

/// Listing fields an admin controls; everything except `id` and `posted_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub team: JobCategory,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    pub about_wts: String,
    pub about_team: String,
    pub about_role: String,
}

impl JobDraft {
    /// Materialize a listing, assigning its identifier and posting time.
    pub fn into_listing(self, posted_at: DateTime<Utc>) -> JobListing {
        let id = id::job_id(self.team, &self.title, posted_at.timestamp_millis());
        JobListing {
            id,
            title: self.title,
            team: self.team,
            location: self.location,
            employment_type: self.employment_type,
            about_wts: self.about_wts,
            about_team: self.about_team,
            about_role: self.about_role,
            posted_at,
        }
    }

    /// Apply this draft to an existing listing, preserving its identity.
    pub fn apply_to(self, existing: &JobListing) -> JobListing {
        JobListing {
            id: existing.id.clone(),
            title: self.title,
            team: self.team,
            location: self.location,
            employment_type: self.employment_type,
            about_wts: self.about_wts,
            about_team: self.about_team,
            about_role: self.about_role,
            posted_at: existing.posted_at,
        }
    }
}
