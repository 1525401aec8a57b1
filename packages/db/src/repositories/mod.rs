//! Repository implementations for database operations.

mod posting_repo;

pub use posting_repo::PostingRepository;
