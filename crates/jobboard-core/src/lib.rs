//! Core domain types for the job board.
//!
//! This crate contains:
//! - Job listing and category types
//! - Application (submission) types
//! - Identifier generation

pub mod application;
pub mod id;
pub mod job;

pub use application::{ApplicationDraft, JobApplication, ResumePayload};
pub use job::{EmploymentType, JobCategory, JobDraft, JobListing};
