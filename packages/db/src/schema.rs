//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    db.query(POSTING_SCHEMA).await?.check()?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Posting table schema.
const POSTING_SCHEMA: &str = r#"
-- Job postings; closed record shape
DEFINE TABLE IF NOT EXISTS posting SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS title ON posting TYPE string;
DEFINE FIELD IF NOT EXISTS company ON posting TYPE string;
DEFINE FIELD IF NOT EXISTS location ON posting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS job_type ON posting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS salary_min ON posting TYPE option<number>;
DEFINE FIELD IF NOT EXISTS salary_max ON posting TYPE option<number>;
DEFINE FIELD IF NOT EXISTS description ON posting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS deadline ON posting TYPE option<datetime>;
DEFINE FIELD IF NOT EXISTS is_active ON posting TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS created_at ON posting TYPE datetime DEFAULT time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON posting TYPE datetime VALUE time::now();

-- Listing always filters on is_active and sorts newest first
DEFINE INDEX IF NOT EXISTS posting_active ON posting FIELDS is_active;
DEFINE INDEX IF NOT EXISTS posting_created ON posting FIELDS created_at;
DEFINE INDEX IF NOT EXISTS posting_job_type ON posting FIELDS job_type;
"#;
