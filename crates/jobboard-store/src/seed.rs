//! Seed listings written on first use of an empty backend.
//!
//! The set intentionally includes one listing under the retired
//! `Operations` category and one under the legacy `Product Management`
//! name, so a fresh install exercises the normalization pass.

use chrono::{TimeZone, Utc};
use jobboard_core::{EmploymentType, JobCategory, JobListing};

/// Default company blurb used when an admin leaves the field blank.
pub const DEFAULT_ABOUT_WTS: &str = "WTS builds the operational and technology backbone that powers modern fintech. We partner with product, engineering, compliance, and operations teams to launch and scale financial products-turning complex workflows (accounts, money movement, reconciliation, reporting, risk) into reliable platforms and tools.

We move fast, sweat the details, and build systems that are secure and built to last.

What it's like to work here

High ownership, high impact: Small teams, real responsibility, measurable outcomes
Cross-functional by default: Frequent collaboration with engineering, ops, and business stakeholders
Practical builders: We favor solutions that are simple, scalable, and easy to operate
Mission-driven: We help bring better financial products to market-safely and efficiently";

fn listing(
    id: &str,
    title: &str,
    team: JobCategory,
    about_team: &str,
    about_role: &str,
    year: i32,
    month: u32,
    day: u32,
) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: title.to_string(),
        team,
        location: "Remote".to_string(),
        employment_type: EmploymentType::FullTime,
        about_wts: DEFAULT_ABOUT_WTS.to_string(),
        about_team: about_team.to_string(),
        about_role: about_role.to_string(),
        posted_at: Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// The launch listings.
pub fn seed_jobs() -> Vec<JobListing> {
    vec![
        listing(
            "eng-fullstack-01",
            "Full Stack Engineer",
            JobCategory::Engineering,
            "The engineering team owns the core platform powering internal workflows and customer-facing experiences.",
            "Work across the web stack and backend services to deliver high-impact features, improve reliability, and collaborate closely with operations and product teams.",
            2026, 2, 1,
        ),
        listing(
            "pm-platform-01",
            "Product Manager, Platform",
            JobCategory::ProductManagement,
            "The platform product team defines and prioritizes initiatives that unlock scale across the business.",
            "Own discovery, prioritization, and delivery for platform initiatives. Partner with design, engineering, and operations to align outcomes with company goals.",
            2026, 2, 3,
        ),
        listing(
            "design-product-01",
            "Product Designer",
            JobCategory::Design,
            "Design works closely with product and engineering to simplify complex operational workflows.",
            "Shape experiences from concept to implementation, produce high-fidelity UI, and collaborate on research to make operational tools simple and effective.",
            2026, 2, 4,
        ),
        listing(
            "marketing-growth-01",
            "Growth Marketing Manager",
            JobCategory::Marketing,
            "The growth team drives awareness, demand generation, and measurable pipeline impact.",
            "Lead multi-channel growth experiments, messaging strategy, and funnel optimization with a data-driven approach and close partnership with sales.",
            2026, 2, 5,
        ),
        listing(
            "ops-coordinator-01",
            "Operations Coordinator",
            JobCategory::Operations,
            "Operations coordinates execution across teams to keep service delivery consistent and reliable.",
            "Support day-to-day operational execution, monitor service quality, and improve SOP adherence across internal and partner teams.",
            2026, 2, 6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let jobs = seed_jobs();
        let mut ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), jobs.len());
    }

    #[test]
    fn seed_covers_legacy_categories() {
        let jobs = seed_jobs();
        assert!(jobs.iter().any(|j| j.team == JobCategory::ProductManagement));
        assert!(jobs.iter().any(|j| j.team.is_retired()));
    }
}
