//! This crate contains all shared UI for the workspace.

// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

mod navbar;
pub use navbar::Navbar;

mod filters;
pub use filters::Filters;

mod job_card;
pub use job_card::JobCard;

mod job_grid;
pub use job_grid::{GRID_CARD_LIMIT, JobGrid, SEARCH_DEBOUNCE_MS};

mod create_posting_form;
pub use create_posting_form::CreatePostingForm;
