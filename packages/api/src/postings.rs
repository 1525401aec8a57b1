//! Posting server functions used by the bundled UI.

use board_core::{FilterParams, JobPosting, NewPosting, PostingPage};
use dioxus::prelude::*;

/// List active postings matching the given filters, newest first.
#[post("/api/postings/search")]
pub async fn search_postings(params: FilterParams) -> Result<PostingPage, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use db::repositories::PostingRepository;

        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        PostingRepository::list(&params).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list postings");
            ServerFnError::new("Failed to fetch jobs")
        })
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = params;
        Err(ServerFnError::new("Server-only function"))
    }
}

/// Validate and persist a new posting.
#[post("/api/postings/create")]
pub async fn create_posting(posting: NewPosting) -> Result<JobPosting, ServerFnError> {
    #[cfg(feature = "server")]
    {
        use board_core::validate_new_posting;
        use db::repositories::PostingRepository;

        crate::ensure_initialized()
            .await
            .map_err(|e| ServerFnError::new(format!("Initialization failed: {}", e)))?;

        validate_new_posting(&posting, &crate::validation_rules()).map_err(|errors| {
            let messages: Vec<String> = errors.errors.into_iter().map(|e| e.message).collect();
            ServerFnError::new(messages.join("; "))
        })?;

        PostingRepository::create(posting)
            .await
            .map_err(|e| ServerFnError::new(format!("Failed to create posting: {}", e)))
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = posting;
        Err(ServerFnError::new("Server-only function"))
    }
}
