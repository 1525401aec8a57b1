//! REST endpoints for third-party clients.
//!
//! `GET /api/jobs` lists postings and `POST /api/jobs` creates one. Both share
//! the repository used by the server functions.

use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use board_core::{FilterParams, JobPosting, PostingPage, ValidationErrors, parse_new_posting};
use db::DbError;
use db::repositories::PostingRepository;
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{ensure_initialized, validation_rules};

/// Error response for the REST endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// Field-level problems: `400 {errors: [{field, message}]}`.
    Validation(ValidationErrors),
    /// Any other rejected request: `400 {message}`.
    BadRequest { message: String },
    /// Storage failure: `500 {message}`.
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    fn from_db(e: DbError) -> Self {
        tracing::error!(error = %e, "Database error");
        Self::internal("Database operation failed")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": errors.errors })),
            )
                .into_response(),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": message })),
            )
                .into_response(),
        }
    }
}

/// Router serving `/api/jobs`, with CORS restricted to `FE_URL` when set.
pub fn rest_router() -> Router {
    let fe_url = std::env::var("FE_URL").ok();
    Router::new()
        .route("/api/jobs", get(list_jobs).post(create_job))
        .layer(cors(fe_url.as_deref()))
}

/// CORS for the job endpoints: GET and POST from one origin, or any origin.
fn cors(fe_url: Option<&str>) -> CorsLayer {
    let origin = fe_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .and_then(|u| HeaderValue::from_str(u).ok())
        .map(AllowOrigin::exact)
        .unwrap_or_else(AllowOrigin::any);

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn list_jobs(
    params: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<PostingPage>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    ensure_initialized().await.map_err(ApiError::from_db)?;

    let page = PostingRepository::list(&params)
        .await
        .map_err(ApiError::from_db)?;
    Ok(Json(page))
}

async fn create_job(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<JobPosting>), ApiError> {
    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let posting = parse_new_posting(&body, &validation_rules()).map_err(|errors| {
        tracing::debug!(%errors, "Rejected posting payload");
        ApiError::Validation(errors)
    })?;

    ensure_initialized()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let created = PostingRepository::create(posting).await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to create posting");
        ApiError::bad_request(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(created)))
}
