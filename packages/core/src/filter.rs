//! Listing filters and the compiler that turns them into a storage-neutral predicate.
//!
//! Request parameters arrive as raw text. [`compile`] normalizes them (trimming,
//! numeric parsing, pagination clamping) and produces a [`CompiledQuery`]: a
//! conjunction of [`Predicate`] clauses plus the page window. Free text is kept
//! as a literal in [`TextMatch`]; it is only ever turned into a pattern through
//! [`TextMatch::pattern`], which escapes every metacharacter first.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::JobPosting;

/// Page size used when the request gives none (or an unusable one).
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest page size a caller can ask for.
pub const MAX_LIMIT: u32 = 100;

/// Raw listing parameters as they appear on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Free text matched against title or company.
    #[serde(rename = "q", default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl FilterParams {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    pub fn with_salary_min(mut self, salary_min: impl ToString) -> Self {
        self.salary_min = Some(salary_min.to_string());
        self
    }

    pub fn with_salary_max(mut self, salary_max: impl ToString) -> Self {
        self.salary_max = Some(salary_max.to_string());
        self
    }

    pub fn with_page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }
}

/// Posting fields a predicate can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Company,
    Location,
    JobType,
    SalaryMin,
    SalaryMax,
    IsActive,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Company => "company",
            Field::Location => "location",
            Field::JobType => "jobType",
            Field::SalaryMin => "salaryMin",
            Field::SalaryMax => "salaryMax",
            Field::IsActive => "isActive",
        }
    }

    fn text_of(self, posting: &JobPosting) -> Option<&str> {
        match self {
            Field::Title => Some(&posting.title),
            Field::Company => Some(&posting.company),
            Field::Location => posting.location.as_deref(),
            Field::JobType => posting.job_type.map(|t| t.as_str()),
            Field::SalaryMin | Field::SalaryMax | Field::IsActive => None,
        }
    }

    fn number_of(self, posting: &JobPosting) -> Option<f64> {
        match self {
            Field::SalaryMin => posting.salary_min,
            Field::SalaryMax => posting.salary_max,
            _ => None,
        }
    }
}

/// How a [`TextMatch`] compares its literal against a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring.
    Contains,
    /// Case-insensitive, anchored at both ends.
    Exact,
}

/// A case-insensitive comparison of a field against literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMatch {
    pub field: Field,
    /// Trimmed user text, never interpreted as a pattern.
    pub text: String,
    pub mode: MatchMode,
}

impl TextMatch {
    /// Regular-expression source for this match with all metacharacters escaped.
    pub fn pattern(&self) -> String {
        let escaped = regex::escape(&self.text);
        match self.mode {
            MatchMode::Contains => escaped,
            MatchMode::Exact => format!("^{escaped}$"),
        }
    }

    /// Compile [`Self::pattern`] case-insensitively.
    pub fn regex(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern())
            .case_insensitive(true)
            .build()
    }

    /// Test a field value. A missing value never matches.
    pub fn is_match(&self, value: Option<&str>) -> bool {
        match (value, self.regex()) {
            (Some(value), Ok(re)) => re.is_match(value),
            _ => false,
        }
    }
}

/// One clause of a compiled listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Boolean field equals `value`.
    Flag { field: Field, value: bool },
    /// Text comparison.
    Text(TextMatch),
    /// At least one of the inner clauses holds.
    AnyOf { clauses: Vec<Predicate> },
    /// Numeric field is present and `<= value`.
    AtMost { field: Field, value: f64 },
    /// Numeric field is present and `>= value`.
    AtLeast { field: Field, value: f64 },
}

impl Predicate {
    /// Evaluate the clause against a posting in memory.
    pub fn matches(&self, posting: &JobPosting) -> bool {
        match self {
            Predicate::Flag { field, value } => match field {
                Field::IsActive => posting.is_active == *value,
                _ => false,
            },
            Predicate::Text(text) => text.is_match(text.field.text_of(posting)),
            Predicate::AnyOf { clauses } => clauses.iter().any(|c| c.matches(posting)),
            Predicate::AtMost { field, value } => {
                field.number_of(posting).is_some_and(|n| n <= *value)
            }
            Predicate::AtLeast { field, value } => {
                field.number_of(posting).is_some_and(|n| n >= *value)
            }
        }
    }
}

/// Output of [`compile`]: a conjunction of clauses and the page window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    /// All clauses must hold. The first one is always `isActive = true`.
    pub clauses: Vec<Predicate>,
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

impl CompiledQuery {
    /// Number of records to skip before the page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Evaluate every clause against a posting in memory.
    pub fn matches(&self, posting: &JobPosting) -> bool {
        self.clauses.iter().all(|c| c.matches(posting))
    }
}

/// Compile raw listing parameters into a [`CompiledQuery`].
pub fn compile(params: &FilterParams) -> CompiledQuery {
    let mut clauses = vec![Predicate::Flag {
        field: Field::IsActive,
        value: true,
    }];

    if let Some(q) = non_blank(&params.query) {
        clauses.push(Predicate::AnyOf {
            clauses: vec![
                contains(Field::Title, q),
                contains(Field::Company, q),
            ],
        });
    }

    if let Some(location) = non_blank(&params.location) {
        clauses.push(contains(Field::Location, location));
    }

    if let Some(job_type) = non_blank(&params.job_type) {
        clauses.push(Predicate::Text(TextMatch {
            field: Field::JobType,
            text: job_type.to_string(),
            mode: MatchMode::Exact,
        }));
    }

    // Overlap test: the posting's band must reach the requested band at all.
    let salary_min = params.salary_min.as_deref().and_then(parse_number);
    let salary_max = params.salary_max.as_deref().and_then(parse_number);
    if let Some(max) = salary_max {
        clauses.push(Predicate::AtMost {
            field: Field::SalaryMin,
            value: max,
        });
    }
    if let Some(min) = salary_min {
        clauses.push(Predicate::AtLeast {
            field: Field::SalaryMax,
            value: min,
        });
    }

    CompiledQuery {
        clauses,
        page: normalize_page(params.page.as_deref()),
        limit: normalize_limit(params.limit.as_deref()),
    }
}

fn contains(field: Field, text: &str) -> Predicate {
    Predicate::Text(TextMatch {
        field,
        text: text.to_string(),
        mode: MatchMode::Contains,
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a finite number, treating blank and unparsable input as absent.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse the leading integer of `raw` (`"2abc"` is 2, `"2.9"` is 2).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate on overflow; anything that large is clamped by the caller anyway.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn normalize_page(raw: Option<&str>) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(page) if page >= 1 => u32::try_from(page).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn normalize_limit(raw: Option<&str>) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(limit) if limit >= 1 => limit.min(i64::from(MAX_LIMIT)) as u32,
        _ => DEFAULT_LIMIT,
    }
}
