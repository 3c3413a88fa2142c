//! Outbound integrations fired after a submission is stored.
//!
//! Both are best-effort: missing configuration or a failed call is logged
//! and never fails the request that triggered it.

pub mod notify;
pub mod sheets;
