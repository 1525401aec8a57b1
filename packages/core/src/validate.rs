//! Validation boundary for posting creation payloads.
//!
//! [`parse_new_posting`] turns an untyped JSON body into a closed [`NewPosting`],
//! collecting every field problem instead of stopping at the first one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::filter::parse_number;
use crate::{JobType, NewPosting};

/// Fields a creation payload may carry, in reporting order.
const FIELDS: [&str; 9] = [
    "title",
    "company",
    "location",
    "jobType",
    "salaryMin",
    "salaryMax",
    "description",
    "deadline",
    "isActive",
];

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field-level problem found in a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error is reported for `field`.
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn into_result(mut self) -> Result<(), Self> {
        if self.errors.is_empty() {
            return Ok(());
        }
        self.errors.sort_by_key(|e| {
            FIELDS
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(FIELDS.len())
        });
        Err(self)
    }
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = Self::default();
        for (field, list) in source.field_errors() {
            for error in list {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                errors.push(wire_name(&field), message);
            }
        }
        errors
    }
}

fn wire_name(field: &str) -> String {
    match field {
        "job_type" => "jobType".to_string(),
        "salary_min" => "salaryMin".to_string(),
        "salary_max" => "salaryMax".to_string(),
        "is_active" => "isActive".to_string(),
        other => other.to_string(),
    }
}

/// Optional rules that go beyond the baseline field checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject postings whose `salaryMin` exceeds `salaryMax`.
    pub require_ordered_salary: bool,
}

/// Check a typed posting against the declared rules.
pub fn validate_new_posting(
    posting: &NewPosting,
    rules: &ValidationRules,
) -> Result<(), ValidationErrors> {
    let mut errors = match posting.validate() {
        Ok(()) => ValidationErrors::default(),
        Err(e) => e.into(),
    };
    check_salary_order(posting, rules, &mut errors);
    errors.into_result()
}

fn check_salary_order(posting: &NewPosting, rules: &ValidationRules, errors: &mut ValidationErrors) {
    if !rules.require_ordered_salary || errors.has("salaryMax") {
        return;
    }
    if let (Some(min), Some(max)) = (posting.salary_min, posting.salary_max)
        && min > max
    {
        errors.push(
            "salaryMax",
            "Salary max must be greater than or equal to salary min",
        );
    }
}

/// Parse and validate a JSON creation payload.
pub fn parse_new_posting(
    body: &Value,
    rules: &ValidationRules,
) -> Result<NewPosting, ValidationErrors> {
    let Some(obj) = body.as_object() else {
        return Err(ValidationErrors::single(
            "body",
            "Request body must be a JSON object",
        ));
    };

    let mut errors = ValidationErrors::default();

    for key in obj.keys() {
        if !FIELDS.contains(&key.as_str()) {
            errors.push(key.clone(), "Unknown field");
        }
    }

    let title = required_string(obj, "title", "Title must be a string", &mut errors);
    let company = required_string(obj, "company", "Company must be a string", &mut errors);
    let location = optional_string(obj, "location", "Location must be a string", &mut errors);
    let description = optional_string(
        obj,
        "description",
        "Description must be a string",
        &mut errors,
    );

    let job_type = match present(obj, "jobType") {
        None => None,
        Some(Value::String(s)) => match JobType::parse(s) {
            Some(t) => Some(t),
            None => {
                errors.push("jobType", "Invalid job type");
                None
            }
        },
        Some(_) => {
            errors.push("jobType", "Invalid job type");
            None
        }
    };

    let salary_min = optional_number(obj, "salaryMin", "Salary min must be a number", &mut errors);
    let salary_max = optional_number(obj, "salaryMax", "Salary max must be a number", &mut errors);

    let deadline = match present(obj, "deadline") {
        None => None,
        Some(value) => match value.as_str().and_then(parse_deadline) {
            Some(d) => Some(d),
            None => {
                errors.push("deadline", "Deadline must be a valid date");
                None
            }
        },
    };

    let is_active = match present(obj, "isActive") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push("isActive", "isActive must be a boolean");
            true
        }
    };

    let posting = NewPosting {
        title: title.unwrap_or_default(),
        company: company.unwrap_or_default(),
        location,
        job_type,
        salary_min,
        salary_max,
        description,
        deadline,
        is_active,
    };

    // Declared rules only report on fields whose shape was acceptable.
    if let Err(declared) = posting.validate() {
        for error in ValidationErrors::from(declared).errors {
            if !errors.has(&error.field) {
                errors.errors.push(error);
            }
        }
    }
    check_salary_order(&posting, rules, &mut errors);

    errors.into_result().map(|()| posting)
}

/// A field that is present and not `null`.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match present(obj, key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => {
            errors.push(key, message);
            None
        }
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match present(obj, key) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(key, message);
            None
        }
    }
}

fn optional_number(
    obj: &Map<String, Value>,
    key: &str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let value = present(obj, key)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    if parsed.is_none() {
        errors.push(key, message);
    }
    parsed
}

/// Parse an ISO-8601 date or date-time. Values without an offset are taken as UTC.
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(body: Value) -> Result<NewPosting, ValidationErrors> {
        parse_new_posting(&body, &ValidationRules::default())
    }

    #[test]
    fn accepts_full_payload() {
        let posting = parse(json!({
            "title": "Backend Engineer",
            "company": "Acme",
            "location": "Remote",
            "jobType": "Full-time",
            "salaryMin": 600000,
            "salaryMax": "1000000",
            "description": "Build APIs.",
            "deadline": "2026-12-31",
        }))
        .unwrap();

        assert_eq!(posting.title, "Backend Engineer");
        assert_eq!(posting.job_type, Some(JobType::FullTime));
        assert_eq!(posting.salary_min, Some(600_000.0));
        assert_eq!(posting.salary_max, Some(1_000_000.0));
        assert_eq!(
            posting.deadline.map(|d| d.to_rfc3339()),
            Some("2026-12-31T00:00:00+00:00".to_string())
        );
        assert!(posting.is_active);
    }

    #[test]
    fn missing_title_is_reported() {
        let errors = parse(json!({ "company": "Acme" })).unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "title");
        assert_eq!(errors.errors[0].message, "Title must be a string");
    }

    #[test]
    fn collects_every_problem_in_field_order() {
        let errors = parse(json!({
            "title": "B",
            "company": "",
            "jobType": "full-time",
            "salaryMin": "lots",
            "salaryMax": -5,
            "deadline": "next week",
            "extra": true,
        }))
        .unwrap_err();

        let fields: Vec<&str> = errors.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["title", "company", "jobType", "salaryMin", "salaryMax", "deadline", "extra"]
        );
        assert_eq!(errors.errors[0].message, "Title must be at least 2 characters long");
        assert_eq!(errors.errors[1].message, "Company is required");
    }

    #[test]
    fn null_optional_fields_are_absent() {
        let posting = parse(json!({
            "title": "Designer",
            "company": "Acme",
            "location": null,
            "salaryMin": null,
        }))
        .unwrap();
        assert_eq!(posting.location, None);
        assert_eq!(posting.salary_min, None);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = parse(json!(["title"])).unwrap_err();
        assert!(errors.has("body"));
    }

    #[test]
    fn salary_order_is_opt_in() {
        let body = json!({
            "title": "Analyst",
            "company": "Acme",
            "salaryMin": 900000,
            "salaryMax": 500000,
        });
        assert!(parse(body.clone()).is_ok());

        let strict = ValidationRules {
            require_ordered_salary: true,
        };
        let errors = parse_new_posting(&body, &strict).unwrap_err();
        assert!(errors.has("salaryMax"));
    }

    #[test]
    fn typed_posting_validation() {
        let posting = NewPosting::new("X", "Acme");
        let errors = validate_new_posting(&posting, &ValidationRules::default()).unwrap_err();
        assert!(errors.has("title"));

        let posting = NewPosting::new("QA", "Acme").with_salary(Some(-1.0), None);
        let errors = validate_new_posting(&posting, &ValidationRules::default()).unwrap_err();
        assert!(errors.has("salaryMin"));
    }

    #[test]
    fn deadline_formats() {
        assert!(parse_deadline("2026-01-15T10:30:00Z").is_some());
        assert!(parse_deadline("2026-01-15T10:30:00.000+05:30").is_some());
        assert!(parse_deadline("2026-01-15T10:30").is_some());
        assert!(parse_deadline("2026-01-15").is_some());
        assert!(parse_deadline("15/01/2026").is_none());
    }
}
