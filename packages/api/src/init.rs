//! Server initialization for the job board.

use board_core::ValidationRules;
use db::{DbConfig, DbError};
use tokio::sync::OnceCell;

static INITIALIZED: OnceCell<()> = OnceCell::const_new();

/// Initialize the job board backend.
///
/// Connects to the database configured through `JOBBOARD_DB_*` and applies
/// the schema.
pub async fn init_job_board() -> Result<(), DbError> {
    tracing::info!("Initializing job board...");

    db::init(DbConfig::from_env()).await?;

    tracing::info!("Job board initialized");
    Ok(())
}

/// Run [`init_job_board`] once per process; later calls return immediately.
pub async fn ensure_initialized() -> Result<(), DbError> {
    INITIALIZED.get_or_try_init(init_job_board).await?;
    Ok(())
}

/// Validation rules for creation requests.
///
/// `JOBBOARD_STRICT_SALARY_RANGE=true` (or `1`) rejects postings whose
/// minimum salary exceeds the maximum.
pub fn validation_rules() -> ValidationRules {
    ValidationRules {
        require_ordered_salary: flag_enabled(
            std::env::var("JOBBOARD_STRICT_SALARY_RANGE").ok().as_deref(),
        ),
    }
}

fn flag_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}
