//! Posting repository: listing queries and creation.

use board_core::{
    CompiledQuery, FilterParams, JobPosting, JobType, NewPosting, PageMeta, PostingId,
    PostingPage, compile,
};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

use crate::query::render_where;
use crate::{DbError, get_db};

const TABLE: &str = "posting";

/// Repository for posting persistence operations.
pub struct PostingRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct PostingRecord {
    id: Option<Thing>,
    title: String,
    company: String,
    location: Option<String>,
    job_type: Option<JobType>,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    description: Option<String>,
    deadline: Option<Datetime>,
    is_active: bool,
    created_at: Datetime,
    updated_at: Datetime,
}

impl PostingRecord {
    fn into_posting(self, posting_id: PostingId) -> JobPosting {
        JobPosting {
            id: posting_id,
            title: self.title,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            description: self.description,
            deadline: self.deadline.map(|d| d.0),
            is_active: self.is_active,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        }
    }

    /// Convert a record read back from a query, recovering its ID from the record key.
    fn into_listed(self) -> Result<JobPosting, DbError> {
        let raw = self
            .id
            .as_ref()
            .map(|t| t.id.to_raw())
            .ok_or_else(|| DbError::Serialization("posting record without id".into()))?;
        let posting_id = PostingId::parse(&raw)
            .map_err(|e| DbError::Serialization(format!("invalid posting id {raw}: {e}")))?;
        Ok(self.into_posting(posting_id))
    }
}

/// Struct for creating postings - omits timestamps so SurrealDB fills them in.
#[derive(Debug, Clone, Serialize)]
struct PostingCreate {
    title: String,
    company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_type: Option<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<Datetime>,
    is_active: bool,
}

impl From<NewPosting> for PostingCreate {
    fn from(posting: NewPosting) -> Self {
        Self {
            title: posting.title,
            company: posting.company,
            location: posting.location,
            job_type: posting.job_type,
            salary_min: posting.salary_min,
            salary_max: posting.salary_max,
            description: posting.description,
            deadline: posting.deadline.map(Datetime::from),
            is_active: posting.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

impl PostingRepository {
    /// Persist a new posting and return it with its generated fields.
    ///
    /// The posting is stored as given; field rules are enforced before this call.
    pub async fn create(posting: NewPosting) -> Result<JobPosting, DbError> {
        let db = get_db()?;
        let posting_id = PostingId::new();

        let record: Option<PostingRecord> = db
            .create((TABLE, posting_id.to_string()))
            .content(PostingCreate::from(posting))
            .await
            .map_err(rejected_or_connection)?;

        let created = record
            .map(|r| r.into_posting(posting_id))
            .ok_or_else(|| DbError::Query("Failed to create posting".into()))?;

        tracing::info!(id = %created.id, title = %created.title, "Posting created");
        Ok(created)
    }

    /// List active postings matching raw filter parameters.
    pub async fn list(params: &FilterParams) -> Result<PostingPage, DbError> {
        Self::list_compiled(&compile(params)).await
    }

    /// Fetch one page of matching postings (newest first) and the total match count.
    pub async fn list_compiled(query: &CompiledQuery) -> Result<PostingPage, DbError> {
        let db = get_db()?;
        let clause = render_where(&query.clauses);

        tracing::debug!(
            filter = %clause.sql,
            page = query.page,
            limit = query.limit,
            "Listing postings"
        );

        let select = format!(
            "SELECT * FROM {TABLE} WHERE {} ORDER BY created_at DESC, id DESC LIMIT {} START {}",
            clause.sql,
            query.limit,
            query.offset()
        );
        let count = format!(
            "SELECT count() AS total FROM {TABLE} WHERE {} GROUP ALL",
            clause.sql
        );

        let fetch_page = async {
            let mut request = db.query(&select);
            for binding in clause.bindings.clone() {
                request = request.bind(binding);
            }
            let mut response = request.await?;
            let records: Vec<PostingRecord> = response.take(0)?;
            records
                .into_iter()
                .map(PostingRecord::into_listed)
                .collect::<Result<Vec<_>, _>>()
        };

        let fetch_total = async {
            let mut request = db.query(&count);
            for binding in clause.bindings.clone() {
                request = request.bind(binding);
            }
            let mut response = request.await?;
            let rows: Vec<CountRow> = response.take(0)?;
            Ok::<_, DbError>(rows.first().map(|r| r.total).unwrap_or(0))
        };

        let (data, total) = tokio::try_join!(fetch_page, fetch_total)?;

        Ok(PostingPage {
            data,
            meta: PageMeta {
                page: query.page,
                limit: query.limit,
                total,
            },
        })
    }
}

/// Classify a write failure: schema rejections are validation errors.
fn rejected_or_connection(error: surrealdb::Error) -> DbError {
    use surrealdb::error::Db;

    match &error {
        surrealdb::Error::Db(Db::FieldCheck { .. } | Db::FieldValue { .. }) => {
            tracing::warn!(%error, "Posting rejected by schema");
            DbError::Validation(error.to_string())
        }
        _ => DbError::Connection(error),
    }
}
