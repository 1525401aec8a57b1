//! Presentation helpers for rendering postings as cards.

use chrono::{DateTime, Utc};

use crate::client::SALARY_K_UNIT;

/// Render an amount in slider units, e.g. `600000` -> `"60k"`.
pub fn format_k(amount: f64) -> String {
    if !amount.is_finite() {
        return String::new();
    }
    format!("{}k", (amount / SALARY_K_UNIT).round() as i64)
}

/// Salary band label such as `"₹60k - ₹100k"`. Empty when neither bound is set.
pub fn salary_label(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("₹{} - ₹{}", format_k(min), format_k(max)),
        (Some(bound), None) | (None, Some(bound)) => format!("₹{}", format_k(bound)),
        (None, None) => String::new(),
    }
}

/// Relative age of a posting: `"42s ago"`, `"5m ago"`, `"3h ago"`, `"2d ago"`.
pub fn posted_ago(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return "24h Ago".to_string();
    };
    let elapsed = now - created_at;
    if elapsed.num_milliseconds() < 0 {
        return "Just now".to_string();
    }

    let secs = elapsed.num_seconds();
    if secs < 60 {
        return format!("{secs}s ago");
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// Clip a description to at most two display lines.
///
/// Explicit line breaks win; a single paragraph is split into sentences.
pub fn description_lines(description: Option<&str>) -> Vec<String> {
    let Some(description) = description else {
        return Vec::new();
    };

    let lines: Vec<String> = description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    match lines.len() {
        0 => Vec::new(),
        1 => {
            let sentences = split_sentences(&lines[0]);
            if sentences.len() >= 2 {
                sentences.into_iter().take(2).collect()
            } else {
                lines
            }
        }
        _ => lines.into_iter().take(2).collect(),
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?' | ';') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }
    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Best-guess logo URL for a company name.
pub fn company_logo_url(company: &str) -> Option<String> {
    let domain: String = company
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(30)
        .collect();
    if domain.is_empty() {
        return None;
    }
    Some(format!("https://logo.clearbit.com/{domain}.com"))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn salary_labels() {
        assert_eq!(format_k(600_000.0), "60k");
        assert_eq!(format_k(15_000.0), "2k");
        assert_eq!(
            salary_label(Some(600_000.0), Some(1_000_000.0)),
            "₹60k - ₹100k"
        );
        assert_eq!(salary_label(None, Some(50_000.0)), "₹5k");
        assert_eq!(salary_label(None, None), "");
    }

    #[test]
    fn relative_age() {
        let now = Utc::now();
        assert_eq!(posted_ago(None, now), "24h Ago");
        assert_eq!(posted_ago(Some(now + Duration::minutes(1)), now), "Just now");
        assert_eq!(posted_ago(Some(now - Duration::seconds(42)), now), "42s ago");
        assert_eq!(posted_ago(Some(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(posted_ago(Some(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(posted_ago(Some(now - Duration::days(2)), now), "2d ago");
    }

    #[test]
    fn two_line_descriptions() {
        assert!(description_lines(None).is_empty());
        assert_eq!(
            description_lines(Some("First line\r\n\r\nSecond line\nThird")),
            vec!["First line", "Second line"]
        );
        assert_eq!(
            description_lines(Some("Build APIs. Own deploys! Mentor juniors.")),
            vec!["Build APIs.", "Own deploys!"]
        );
        assert_eq!(description_lines(Some("  Single line  ")), vec!["Single line"]);
    }

    #[test]
    fn logo_urls() {
        assert_eq!(
            company_logo_url("Acme Corp."),
            Some("https://logo.clearbit.com/acmecorp.com".to_string())
        );
        assert_eq!(company_logo_url("!!!"), None);
    }
}
