use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApplyError, JobBoard};
use crate::applications::{ApplicationFields, ResumeFile, SubmitError, FAILURE_NOTICE};
use crate::catalog::{CatalogError, FilterCriteria, Posting, PostingDraft, PostingId};
use crate::delivery::{ApplicationTransport, PostingGateway};
use crate::error::AppError;

/// Query string of the listing route; `types` and `levels` are comma-separated labels.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) types: Option<String>,
    #[serde(default)]
    pub(crate) levels: Option<String>,
    #[serde(default)]
    pub(crate) search: Option<String>,
}

impl ListQuery {
    pub(crate) fn criteria(&self) -> Result<FilterCriteria, AppError> {
        Ok(FilterCriteria {
            types: parse_labels(self.types.as_deref())?,
            levels: parse_labels(self.levels.as_deref())?,
            search: self.search.clone().unwrap_or_default(),
        })
    }
}

fn parse_labels<T>(raw: Option<&str>) -> Result<BTreeSet<T>, AppError>
where
    T: FromStr<Err = String> + Ord,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| label.parse::<T>().map_err(AppError::InvalidRequest))
        .collect()
}

#[derive(Debug, Serialize)]
pub(crate) struct ListResponse {
    pub(crate) count: usize,
    pub(crate) jobs: Vec<Posting>,
}

/// Router exposing the catalog and application intake.
pub fn job_board_router<G, T>(board: Arc<JobBoard<G, T>>) -> Router
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    // Oversized résumés must reach the policy check rather than fail body extraction.
    let body_limit = usize::try_from(board.policy().max_bytes())
        .unwrap_or(usize::MAX)
        .saturating_mul(2);

    Router::new()
        .route(
            "/api/jobs",
            get(list_handler::<G, T>).post(create_handler::<G, T>),
        )
        .route(
            "/api/jobs/:id",
            get(detail_handler::<G, T>).put(update_handler::<G, T>),
        )
        .route("/api/applications", post(apply_handler::<G, T>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(board)
}

pub(crate) async fn list_handler<G, T>(
    State(board): State<Arc<JobBoard<G, T>>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError>
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    let criteria = query.criteria()?;
    let jobs = board.list(&criteria).await;
    Ok(Json(ListResponse {
        count: jobs.len(),
        jobs,
    }))
}

pub(crate) async fn detail_handler<G, T>(
    State(board): State<Arc<JobBoard<G, T>>>,
    Path(id): Path<String>,
) -> Response
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    let id = PostingId(id);
    match board.get(&id).await {
        Some(posting) => (StatusCode::OK, Json(posting)).into_response(),
        None => {
            let payload = json!({ "error": format!("posting {id} not found") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn create_handler<G, T>(
    State(board): State<Arc<JobBoard<G, T>>>,
    Json(draft): Json<PostingDraft>,
) -> Response
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    match board.create(draft).await {
        Ok(posting) => (StatusCode::CREATED, Json(posting)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn update_handler<G, T>(
    State(board): State<Arc<JobBoard<G, T>>>,
    Path(id): Path<String>,
    Json(draft): Json<PostingDraft>,
) -> Response
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    let posting = Posting::from_draft(PostingId(id), draft);
    match board.update(posting).await {
        Ok(posting) => (StatusCode::OK, Json(posting)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

fn catalog_error_response(error: CatalogError) -> Response {
    match error {
        CatalogError::Validation(error) => {
            let payload = json!({ "errors": error.violations() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        CatalogError::Delivery(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ApplicationUpload {
    pub(crate) job_id: Option<String>,
    pub(crate) fields: ApplicationFields,
    pub(crate) resume: Option<ResumeFile>,
}

fn upload_failure(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "success": false, "message": message.into() });
    (status, Json(payload)).into_response()
}

/// Reads the multi-part form. Parts without a content type get one guessed from the file name;
/// an empty, unnamed file part counts as no résumé.
pub(crate) async fn read_upload(mut multipart: Multipart) -> Result<ApplicationUpload, Response> {
    let mut upload = ApplicationUpload::default();
    let malformed = |error: axum::extract::multipart::MultipartError| {
        upload_failure(error.status(), error.body_text())
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let media_type = match field.content_type() {
                    Some(declared) => declared.to_string(),
                    None => mime_guess::from_path(&file_name)
                        .first_or_octet_stream()
                        .essence_str()
                        .to_string(),
                };
                let content = field.bytes().await.map_err(malformed)?.to_vec();
                if !(file_name.is_empty() && content.is_empty()) {
                    upload.resume = Some(ResumeFile::new(file_name, media_type, content));
                }
            }
            "jobId" => upload.job_id = Some(field.text().await.map_err(malformed)?),
            "fullName" => upload.fields.full_name = field.text().await.map_err(malformed)?,
            "email" => upload.fields.email = field.text().await.map_err(malformed)?,
            "phone" => upload.fields.phone = field.text().await.map_err(malformed)?,
            "coverLetter" => upload.fields.cover_letter = field.text().await.map_err(malformed)?,
            _ => {}
        }
    }

    Ok(upload)
}

pub(crate) async fn apply_handler<G, T>(
    State(board): State<Arc<JobBoard<G, T>>>,
    multipart: Multipart,
) -> Response
where
    G: PostingGateway + ?Sized + 'static,
    T: ApplicationTransport + ?Sized + 'static,
{
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let Some(job_id) = upload.job_id.filter(|id| !id.trim().is_empty()) else {
        return upload_failure(StatusCode::BAD_REQUEST, "jobId is required");
    };
    let job_id = PostingId(job_id.trim().to_string());

    match board.apply(&job_id, upload.fields, upload.resume).await {
        Ok(_) => {
            let payload = json!({ "success": true, "message": "application sent" });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(ApplyError::UnknownPosting(id)) => {
            upload_failure(StatusCode::NOT_FOUND, format!("posting {id} not found"))
        }
        Err(ApplyError::Submit(SubmitError::Invalid(error))) => {
            let payload = json!({ "success": false, "errors": error.violations() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(ApplyError::Submit(error @ SubmitError::InFlight)) => {
            upload_failure(StatusCode::CONFLICT, error.user_notice())
        }
        Err(ApplyError::Submit(SubmitError::Failed { .. })) => {
            upload_failure(StatusCode::BAD_GATEWAY, FAILURE_NOTICE)
        }
    }
}
