use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::{Course, CourseInput, CoursePatch};
use service::errors::ServiceError;
use tracing::{error, info};

use crate::{errors::JsonApiError, routes::ServerState};

const COURSE_NOT_FOUND: &str = "Course not found";

fn parse_id(raw: &str) -> Result<u64, JsonApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| JsonApiError::bad_request(format!("invalid course id: {raw:?}")))
}

fn json_body(body: Result<Json<serde_json::Value>, JsonRejection>) -> Result<serde_json::Value, JsonApiError> {
    body.map(|Json(v)| v).map_err(|rejection| JsonApiError::bad_request(rejection.body_text()))
}

/// 400 for client input problems, otherwise 500 with the given public message.
fn map_service_error(e: ServiceError, public: &str) -> JsonApiError {
    if let Some(msg) = e.validation_message() {
        return JsonApiError::bad_request(msg);
    }
    error!(err = %e, "{public}");
    JsonApiError::internal(public)
}

#[utoipa::path(
    get, path = "/api/courses", tag = "courses",
    responses(
        (status = 200, description = "List of all courses", body = [crate::openapi::CourseDoc]),
        (status = 500, description = "Error fetching courses", body = crate::openapi::MessageDoc)
    )
)]
pub async fn list_courses(State(state): State<ServerState>) -> Result<Json<Vec<Course>>, JsonApiError> {
    match state.courses.find_all().await {
        Ok(list) => { info!(count = list.len(), "list courses"); Ok(Json(list)) }
        Err(e) => Err(map_service_error(e, "Error fetching courses")),
    }
}

#[utoipa::path(
    get, path = "/api/courses/{id}", tag = "courses",
    params(("id" = u64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course data", body = crate::openapi::CourseDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::MessageDoc),
        (status = 404, description = "Course not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Error fetching course", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get_course(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Course>, JsonApiError> {
    let id = parse_id(&id)?;
    match state.courses.find_course_by_id(id).await {
        Ok(Some(course)) => Ok(Json(course)),
        Ok(None) => Err(JsonApiError::not_found(COURSE_NOT_FOUND)),
        Err(e) => Err(map_service_error(e, "Error fetching course")),
    }
}

#[utoipa::path(
    post, path = "/api/courses", tag = "courses",
    request_body = crate::openapi::CourseInputDoc,
    responses(
        (status = 201, description = "Course created successfully", body = crate::openapi::CourseDoc),
        (status = 400, description = "Invalid request data", body = crate::openapi::MessageDoc),
        (status = 500, description = "Error creating course", body = crate::openapi::MessageDoc)
    )
)]
pub async fn create_course(
    State(state): State<ServerState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), JsonApiError> {
    let input = CourseInput::from_json(json_body(body)?).map_err(|e| match e {
        models::errors::ModelError::Validation(msg) => JsonApiError::bad_request(msg),
    })?;
    match state.courses.create(input).await {
        Ok(course) => { info!(id = course.id, "created course"); Ok((StatusCode::CREATED, Json(course))) }
        Err(e) => Err(map_service_error(e, "Error creating course")),
    }
}

#[utoipa::path(
    put, path = "/api/courses/{id}", tag = "courses",
    params(("id" = u64, Path, description = "ID of the course to update")),
    request_body = crate::openapi::CoursePatchDoc,
    responses(
        (status = 200, description = "Course updated successfully", body = crate::openapi::CourseDoc),
        (status = 400, description = "Invalid id or body", body = crate::openapi::MessageDoc),
        (status = 404, description = "Course not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Error updating course", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update_course(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Course>, JsonApiError> {
    let id = parse_id(&id)?;
    let patch = CoursePatch::from_json(json_body(body)?).map_err(|e| match e {
        models::errors::ModelError::Validation(msg) => JsonApiError::bad_request(msg),
    })?;
    match state.courses.update_course(id, patch).await {
        Ok(Some(course)) => { info!(id, "updated course"); Ok(Json(course)) }
        Ok(None) => Err(JsonApiError::not_found(COURSE_NOT_FOUND)),
        Err(e) => Err(map_service_error(e, "Error updating course")),
    }
}

#[utoipa::path(
    delete, path = "/api/courses/{id}", tag = "courses",
    params(("id" = u64, Path, description = "ID of the course to delete")),
    responses(
        (status = 204, description = "Course deleted successfully (No content returned)"),
        (status = 400, description = "Invalid id", body = crate::openapi::MessageDoc),
        (status = 404, description = "Course not found", body = crate::openapi::MessageDoc),
        (status = 500, description = "Error deleting course", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete_course(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    match state.courses.delete_course(id).await {
        Ok(()) => { info!(id, "deleted course"); Ok(StatusCode::NO_CONTENT) }
        Err(ServiceError::NotFound(msg)) => Err(JsonApiError::not_found(msg)),
        Err(e) => Err(map_service_error(e, "Error deleting course")),
    }
}
