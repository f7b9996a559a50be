//! HTTP front end for the student store.
//!
//! ## Routes
//!
//! - `POST /students` body `{name, age, marks}` creates a record; a client `id` is ignored.
//! - `GET /students` returns the whole collection in stored order.
//! - `PUT /students/:id` body `{name, age, marks}` overwrites one record, or 404.
//!   A non-integer `:id` is a 422 on both `PUT` and `DELETE`.
//! - `DELETE /students/:id` removes the record if present and always succeeds.
//! - `GET /health` returns `{ "ok": true, "version": ... }`.
//!
//! Store calls are blocking file I/O and run on the blocking thread pool.
//! Requests are not serialized against each other: concurrent writers can
//! overwrite each other's changes.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde_json::json;
use student_core::{
    core_version, NewStudent, RepoError, Student, StudentId, StudentRepository, StudentService,
    StudentServiceError,
};

/// Build an axum `Router` serving the student routes over `service`.
pub fn router<R>(service: Arc<StudentService<R>>) -> Router
where
    R: StudentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/students",
            get(list_students::<R>).post(create_student::<R>),
        )
        .route(
            "/students/:id",
            axum::routing::put(replace_student::<R>).delete(delete_student::<R>),
        )
        .with_state(service)
}

/// Serve the routes at `addr` (e.g. `"127.0.0.1:8000"`).
pub async fn serve<R>(service: Arc<StudentService<R>>, addr: &str) -> Result<(), std::io::Error>
where
    R: StudentRepository + Send + Sync + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// Handler failure mapped to an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    /// `:id` segment is not an integer.
    InvalidPath(PathRejection),
    Service(StudentServiceError),
    /// The blocking store task panicked or was cancelled.
    Task(tokio::task::JoinError),
}

impl From<StudentServiceError> for ApiError {
    fn from(value: StudentServiceError) -> Self {
        Self::Service(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Student not found".to_string()),
            ApiError::InvalidPath(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
            ApiError::Service(StudentServiceError::InvalidField(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::Service(StudentServiceError::InvalidValue(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::Service(StudentServiceError::Repo(RepoError::Validation(err))) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::Service(StudentServiceError::Repo(err)) => {
                error!("event=api_request module=api status=error error={}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Task(err) => {
                error!("event=api_request module=api status=error error={}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Runs one synchronous service call off the async runtime.
async fn with_service<R, T>(
    service: Arc<StudentService<R>>,
    call: impl FnOnce(&StudentService<R>) -> Result<T, StudentServiceError> + Send + 'static,
) -> Result<T, ApiError>
where
    R: StudentRepository + Send + Sync + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || call(service.as_ref()))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::from)
}

fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<StudentId, ApiError> {
    id.map(|Path(id)| StudentId(id)).map_err(ApiError::InvalidPath)
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true, "version": core_version() }))
}

/// `POST /students`
async fn create_student<R>(
    State(service): State<Arc<StudentService<R>>>,
    Json(input): Json<NewStudent>,
) -> Result<Json<Student>, ApiError>
where
    R: StudentRepository + Send + Sync + 'static,
{
    let created = with_service(service, move |s| s.create_student(input)).await?;
    Ok(Json(created))
}

/// `GET /students`
async fn list_students<R>(
    State(service): State<Arc<StudentService<R>>>,
) -> Result<Json<Vec<Student>>, ApiError>
where
    R: StudentRepository + Send + Sync + 'static,
{
    let students = with_service(service, |s| s.list_students()).await?;
    Ok(Json(students))
}

/// `PUT /students/:id`
async fn replace_student<R>(
    State(service): State<Arc<StudentService<R>>>,
    id: Result<Path<i64>, PathRejection>,
    Json(input): Json<NewStudent>,
) -> Result<Json<Student>, ApiError>
where
    R: StudentRepository + Send + Sync + 'static,
{
    let id = path_id(id)?;
    let updated = with_service(service, move |s| s.replace_student(id, input)).await?;
    updated.map(Json).ok_or(ApiError::NotFound)
}

/// `DELETE /students/:id`
async fn delete_student<R>(
    State(service): State<Arc<StudentService<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: StudentRepository + Send + Sync + 'static,
{
    let id = path_id(id)?;
    with_service(service, move |s| s.delete_student(id)).await?;
    Ok(Json(json!({ "message": "Deleted if existed" })))
}
