use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{FieldName, FieldValue, SessionId, SubmissionStatus};
use super::form::FormError;
use super::presentation::{Page, PageView};
use super::repository::{RepositoryError, SessionRepository, SessionView};
use super::service::{ApplicationFormService, ApplicationServiceError};
use super::upload::{accept_resume, MAX_RESUME_BYTES};
use super::validation::ValidationErrors;

/// Body limit for the page post. Resumes are counted while streaming, so a file over
/// `MAX_RESUME_BYTES` but under this limit is skipped and the text fields still apply.
pub const PAGE_POST_BODY_LIMIT: usize = 4 * MAX_RESUME_BYTES as usize;

/// Body of a single-field edit.
#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub value: FieldValue,
}

/// Body returned from the JSON submit endpoint.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub session_id: SessionId,
    pub accepted: bool,
    pub status: SubmissionStatus,
    pub errors: ValidationErrors,
}

/// Router builder exposing the HTML form pages and the JSON session API.
pub fn application_router<R>(service: Arc<ApplicationFormService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/apply", get(start_page_handler::<R>))
        .route(
            "/apply/:session_id",
            get(page_handler::<R>)
                .post(page_submit_handler::<R>)
                .layer(DefaultBodyLimit::max(PAGE_POST_BODY_LIMIT)),
        )
        .route("/api/v1/applications", post(create_handler::<R>))
        .route(
            "/api/v1/applications/:session_id",
            get(session_handler::<R>),
        )
        .route(
            "/api/v1/applications/:session_id/fields/:field",
            put(set_field_handler::<R>),
        )
        .route(
            "/api/v1/applications/:session_id/submit",
            post(submit_handler::<R>),
        )
        .with_state(service)
}

fn page_path(session_id: &SessionId) -> String {
    format!("/apply/{}", session_id.0)
}

pub(crate) async fn index_handler() -> Redirect {
    Redirect::to("/apply")
}

pub(crate) async fn start_page_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok(record) => Redirect::to(&page_path(&record.session_id)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn page_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let session_id = SessionId(session_id);
    match service.get(&session_id) {
        Ok(record) => render(&service, PageView::of(&record.form), &session_id),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            missing_page(&service, &session_id)
        }
        Err(error) => error_response(error),
    }
}

/// Full-page form post: every posted field goes through `set_field`, then the submit decision
/// runs and the resulting view is rendered in place.
pub(crate) async fn page_submit_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Response
where
    R: SessionRepository + 'static,
{
    let session_id = SessionId(session_id);
    let edits = match collect_edits(&mut multipart).await {
        Ok(edits) => edits,
        Err(error) => {
            warn!(%session_id, %error, "page post could not be read");
            return unreadable_post(&service, &session_id, error.status());
        }
    };

    match service.apply_and_submit(&session_id, edits) {
        Ok((_, record)) => render(&service, PageView::of(&record.form), &session_id),
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            missing_page(&service, &session_id)
        }
        Err(error) => error_response(error),
    }
}

async fn collect_edits(
    multipart: &mut Multipart,
) -> Result<Vec<(FieldName, FieldValue)>, MultipartError> {
    let mut edits = Vec::new();

    while let Some(mut part) = multipart.next_field().await? {
        let Some(field) = part.name().and_then(|name| name.parse::<FieldName>().ok()) else {
            continue;
        };

        if field == FieldName::Resume {
            let file_name = part.file_name().unwrap_or_default().to_string();
            let mut size_bytes = 0u64;
            while let Some(chunk) = part.chunk().await? {
                size_bytes += chunk.len() as u64;
            }
            match accept_resume(&file_name, size_bytes) {
                Ok(Some(resume)) => edits.push((field, FieldValue::Resume(Some(resume)))),
                Ok(None) => {}
                Err(rejected) => warn!(%rejected, "ignoring resume upload"),
            }
        } else {
            let text = part.text().await?;
            edits.push((field, FieldValue::Text(text)));
        }
    }

    Ok(edits)
}

fn render<R>(
    service: &ApplicationFormService<R>,
    view: PageView<'_>,
    session_id: &SessionId,
) -> Response
where
    R: SessionRepository + 'static,
{
    let action = page_path(session_id);
    let page = Page {
        posting: service.posting(),
        view,
        action: &action,
    };
    Html(page.to_string()).into_response()
}

/// Re-render the stored form when the post body itself is unusable.
fn unreadable_post<R>(
    service: &ApplicationFormService<R>,
    session_id: &SessionId,
    status: StatusCode,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(session_id) {
        Ok(record) => {
            let mut response = render(service, PageView::of(&record.form), session_id);
            *response.status_mut() = status;
            response
        }
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            missing_page(service, session_id)
        }
        Err(error) => error_response(error),
    }
}

fn missing_page<R>(service: &ApplicationFormService<R>, session_id: &SessionId) -> Response
where
    R: SessionRepository + 'static,
{
    let mut response = render(service, PageView::Missing, session_id);
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok(record) => (StatusCode::CREATED, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(record) => (StatusCode::OK, Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn set_field_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
    Path((session_id, field)): Path<(String, String)>,
    Json(request): Json<SetFieldRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let field = match field.parse::<FieldName>() {
        Ok(field) => field,
        Err(error) => return error_response(error.into()),
    };

    match service.set_field(&SessionId(session_id), field, request.value) {
        Ok(record) => {
            let view: SessionView = record.view();
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ApplicationFormService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.submit(&SessionId(session_id)) {
        Ok((outcome, record)) => {
            let status = if outcome.accepted {
                StatusCode::OK
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            let body = SubmitResponse {
                session_id: record.session_id,
                accepted: outcome.accepted,
                status: record.form.status(),
                errors: outcome.errors,
            };
            (status, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Conflict)
        | ApplicationServiceError::Form(FormError::AlreadySubmitted) => StatusCode::CONFLICT,
        ApplicationServiceError::Form(FormError::UnknownField(_))
        | ApplicationServiceError::Form(FormError::TypeMismatch { .. }) => StatusCode::BAD_REQUEST,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
