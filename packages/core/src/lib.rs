//! Core domain types for the job board.
//!
//! This crate contains shared types used across all packages:
//! - JobPosting, NewPosting and JobType for listings
//! - FilterParams and the filter compiler for listing queries
//! - Validation of creation payloads
//! - Client-side normalization and display helpers

mod client;
mod display;
mod filter;
mod posting;
mod validate;

pub use client::{FilterState, PostingForm, SALARY_K_UNIT, SALARY_SLIDER_MAX_K, parse_amount};
pub use display::{company_logo_url, description_lines, format_k, posted_ago, salary_label};
pub use filter::{
    CompiledQuery, DEFAULT_LIMIT, Field, FilterParams, MAX_LIMIT, MatchMode, Predicate, TextMatch,
    compile, parse_leading_int, parse_number,
};
pub use posting::{JobPosting, JobType, NewPosting, PageMeta, PostingId, PostingPage};
pub use validate::{
    FieldError, ValidationErrors, ValidationRules, parse_deadline, parse_new_posting,
    validate_new_posting,
};
