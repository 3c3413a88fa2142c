//! Identifier generation.
//!
//! Listing and submission ids are deterministic slugs rather than random
//! ids: `{team}-{title}` slug plus the creation time in milliseconds. Two
//! listings collide only if an identical team/title pair is created in the
//! same millisecond.

use crate::job::JobCategory;

/// Lowercase, collapse every non-alphanumeric run to a single `-`, and
/// trim leading/trailing dashes.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Identifier for a new listing.
pub fn job_id(team: JobCategory, title: &str, at_millis: i64) -> String {
    format!("{}-{}", slug(&format!("{}-{}", team, title)), at_millis)
}

/// Identifier for a new submission.
pub fn application_id(job_id: &str, at_millis: i64) -> String {
    format!("{}-{}", job_id, at_millis)
}

/// Keep only characters safe for a remote file name; everything else
/// becomes a `-`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(slug("Product Manager, Platform"), "product-manager-platform");
        assert_eq!(slug("  --Engineering--  "), "engineering");
        assert_eq!(slug("C++ / Rust"), "c-rust");
    }

    #[test]
    fn job_id_embeds_team_title_and_millis() {
        let id = job_id(JobCategory::Engineering, "Full Stack Engineer", 1_700_000_000_000);
        assert_eq!(id, "engineering-full-stack-engineer-1700000000000");
    }

    #[test]
    fn application_id_is_job_scoped() {
        assert_eq!(
            application_id("engineering-full-stack-engineer-1", 42),
            "engineering-full-stack-engineer-1-42"
        );
    }

    #[test]
    fn sanitize_file_name_keeps_extension() {
        assert_eq!(sanitize_file_name("My Resume (final).pdf"), "My-Resume--final-.pdf");
        assert_eq!(sanitize_file_name("resume.docx"), "resume.docx");
    }
}
