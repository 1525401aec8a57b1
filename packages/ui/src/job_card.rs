//! Card showing a single posting in the grid.

use board_core::{JobPosting, company_logo_url, description_lines, posted_ago, salary_label};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;

/// Props for JobCard component.
#[derive(Props, Clone, PartialEq)]
pub struct JobCardProps {
    /// Posting to display.
    pub posting: JobPosting,
    /// Reference time for the "posted ago" badge.
    pub now: DateTime<Utc>,
}

/// Card component for one posting.
#[component]
pub fn JobCard(props: JobCardProps) -> Element {
    let posting = &props.posting;
    let logo = company_logo_url(&posting.company);
    let initial = posting
        .company
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();
    let posted = posted_ago(Some(posting.created_at), props.now);
    let job_type = posting.job_type.map(|t| t.to_string()).unwrap_or_default();
    let salary = salary_label(posting.salary_min, posting.salary_max);
    let lines = description_lines(posting.description.as_deref());

    rsx! {
        article { class: "job-card",
            div { class: "job-card-header",
                div { class: "job-card-logo",
                    if let Some(src) = logo {
                        img { src: "{src}", alt: "{posting.company}" }
                    } else {
                        span { "{initial}" }
                    }
                }
                span { class: "job-card-badge", "{posted}" }
            }

            h3 { class: "job-card-title", "{posting.title}" }

            div { class: "job-card-info",
                span { class: "job-card-company", "{posting.company}" }
                if !job_type.is_empty() {
                    span { class: "job-card-type", "{job_type}" }
                }
                if let Some(ref location) = posting.location {
                    span { class: "job-card-location", "{location}" }
                }
                if !salary.is_empty() {
                    span { class: "job-card-salary", "{salary}" }
                }
            }

            if !lines.is_empty() {
                ul { class: "job-card-description",
                    for (i, line) in lines.iter().enumerate() {
                        li { key: "{i}", "{line}" }
                    }
                }
            }

            button { class: "btn btn-primary job-card-apply", "Apply Now" }
        }
    }
}
