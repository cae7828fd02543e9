pub mod courses;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use common::types::Health;
use service::{CourseService, CourseStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

/// Shared handler state: the course service over the file store.
#[derive(Clone)]
pub struct ServerState {
    pub courses: Arc<CourseService<CourseStore>>,
}

impl ServerState {
    pub fn new(store: CourseStore) -> Self {
        Self { courses: Arc::new(CourseService::new(Arc::new(store))) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, course API and Swagger UI
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/api/courses/:id",
            get(courses::get_course).put(courses::update_course).delete(courses::delete_course),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request carrying method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
