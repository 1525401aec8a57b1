//! Browser-side form state and its normalization into request types.
//!
//! The UI keeps its filter and form inputs as plain text. These types are
//! passed explicitly into request construction instead of living in shared
//! ambient state.

use serde::{Deserialize, Serialize};

use crate::filter::parse_number;
use crate::validate::parse_deadline;
use crate::{FilterParams, JobType, NewPosting};

/// Upper end of the salary slider, in thousands-of-units ("k").
pub const SALARY_SLIDER_MAX_K: u32 = 200;

/// One slider "k" step in raw salary units.
pub const SALARY_K_UNIT: f64 = 10_000.0;

/// Filter inputs as the user last left them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub location: String,
    pub job_type: String,
    /// Salary slider bounds in "k" units, `0..=SALARY_SLIDER_MAX_K`.
    pub salary_k: (u32, u32),
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            job_type: String::new(),
            salary_k: (0, SALARY_SLIDER_MAX_K),
        }
    }
}

impl FilterState {
    /// Whether the slider still spans its full range.
    pub fn salary_is_unbounded(&self) -> bool {
        self.salary_k == (0, SALARY_SLIDER_MAX_K)
    }

    /// Build request parameters from the current inputs.
    ///
    /// Query and location are trimmed and stripped of quotes and semicolons;
    /// job type is only trimmed so "Full-time" keeps its hyphen. Salary bounds
    /// are sent (both together) once the slider has been narrowed.
    pub fn to_params(&self) -> FilterParams {
        let mut params = FilterParams::default();

        let query = sanitize(&self.query);
        if !query.is_empty() {
            params.query = Some(query);
        }
        let location = sanitize(&self.location);
        if !location.is_empty() {
            params.location = Some(location);
        }
        let job_type = self.job_type.trim();
        if !job_type.is_empty() {
            params.job_type = Some(job_type.to_string());
        }

        if !self.salary_is_unbounded() {
            let (low, high) = self.salary_k;
            params.salary_min = Some(k_to_raw(low).to_string());
            params.salary_max = Some(k_to_raw(high).to_string());
        }

        params
    }
}

fn sanitize(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';'))
        .collect()
}

fn k_to_raw(k: u32) -> u64 {
    (f64::from(k) * SALARY_K_UNIT).round().max(0.0) as u64
}

/// Raw text of the create-posting form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub salary_min: String,
    pub salary_max: String,
    pub deadline: String,
    pub description: String,
}

impl PostingForm {
    /// Normalize the form into a creation payload.
    ///
    /// Unrecognised job types, amounts and dates are dropped rather than sent;
    /// server-side validation still applies to what remains.
    pub fn to_new_posting(&self) -> NewPosting {
        NewPosting {
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            location: non_empty(&self.location),
            job_type: JobType::from_loose(&self.job_type),
            salary_min: parse_amount(&self.salary_min),
            salary_max: parse_amount(&self.salary_max),
            description: non_empty(&self.description),
            deadline: parse_deadline(&self.deadline),
            is_active: true,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a typed amount such as `"1,20,000"` or `"600 000"`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    parse_number(&cleaned)
}
