//! Server API for the job board.
//!
//! This crate contains the shared fullstack server functions used by the UI
//! and, with the `server` feature, the REST router mounted under `/api/jobs`.

mod postings;

#[cfg(feature = "server")]
mod init;

#[cfg(feature = "server")]
mod rest;

// Re-export all server functions
pub use postings::*;

#[cfg(feature = "server")]
pub use init::*;

#[cfg(feature = "server")]
pub use rest::{ApiError, rest_router};

// Re-export core types for convenience
pub use board_core::{
    FilterParams, FilterState, JobPosting, JobType, NewPosting, PageMeta, PostingForm, PostingId,
    PostingPage,
};
