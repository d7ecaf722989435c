use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::students::{repository::StudentRepository, DynStudentService, StudentService};

use crate::openapi::ApiDoc;

pub mod students;

/// Shared handler state. Cloned per request; the repository sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub students: DynStudentService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: StudentService::new(repo) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: student resource, health and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let student_routes = Router::new()
        .route("/students", get(students::list).post(students::create))
        .route("/students/search", get(students::search).post(students::search_body))
        .route("/students/:id", get(students::get))
        .route("/students/:id/edit", put(students::update))
        .route("/students/:id/delete", delete(students::delete))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(student_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
