use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service::students::domain::{SearchFilters, Student, StudentInput};
use tracing::info;

use crate::errors::StudentApiError;
use crate::routes::ServerState;

/// Success side of every student endpoint: status 202 with one payload key.
#[derive(Debug)]
pub enum StudentReply {
    /// `list`, under `students`
    Students(Vec<Student>),
    /// `getById`, under `student`
    Student(Student),
    /// `search`, under `student` as well
    Matches(Vec<Student>),
    Message(&'static str),
}

impl IntoResponse for StudentReply {
    fn into_response(self) -> Response {
        let status = StatusCode::ACCEPTED;
        let code = status.as_u16();
        let body = match self {
            StudentReply::Students(rows) => json!({"status": code, "students": rows}),
            StudentReply::Student(row) => json!({"status": code, "student": row}),
            StudentReply::Matches(rows) => json!({"status": code, "student": rows}),
            StudentReply::Message(message) => json!({"status": code, "message": message}),
        };
        (status, Json(body)).into_response()
    }
}

type StudentResult = Result<StudentReply, StudentApiError>;

/// A request without a JSON body carries no fields, so validation reports
/// each of them as required.
fn body_or_empty<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, StudentApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 202, description = "All students under `students`"),
        (status = 404, description = "No Records Found")
    )
)]
pub async fn list(State(state): State<ServerState>) -> StudentResult {
    let rows = state.students.list().await?;
    Ok(StudentReply::Students(rows))
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 202, description = "Student Created Successfully"),
        (status = 422, description = "Validation errors keyed by field"),
        (status = 500, description = "something Went Wrong!")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> StudentResult {
    let input = body_or_empty(payload)?;
    let created = state.students.create(&input).await?;
    info!(id = created.id, "student create request served");
    Ok(StudentReply::Message("Student Created Successfully"))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 202, description = "The student under `student`"),
        (status = 404, description = "Not Found Such an ID")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> StudentResult {
    let row = state.students.get(id.as_str()).await?;
    Ok(StudentReply::Student(row))
}

#[utoipa::path(
    put, path = "/students/{id}/edit", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 202, description = "Student Updated Successfully"),
        (status = 404, description = "Not Found Such an ID"),
        (status = 422, description = "Validation errors keyed by field"),
        (status = 500, description = "something Went Wrong!")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> StudentResult {
    let input = body_or_empty(payload)?;
    state.students.update(id.as_str(), &input).await?;
    Ok(StudentReply::Message("Student Updated Successfully"))
}

#[utoipa::path(
    delete, path = "/students/{id}/delete", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 202, description = "Student Deleted Successfully"),
        (status = 404, description = "Not Found Such an ID")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> StudentResult {
    state.students.delete(id.as_str()).await?;
    Ok(StudentReply::Message("Student Deleted Successfully"))
}

#[utoipa::path(
    get, path = "/students/search", tag = "students",
    params(
        ("name" = Option<String>, Query, description = "Substring of name"),
        ("course" = Option<String>, Query, description = "Substring of course"),
        ("email" = Option<String>, Query, description = "Substring of email"),
        ("phone" = Option<String>, Query, description = "Substring of phone")
    ),
    responses(
        (status = 202, description = "Matches under `student`, ascending id"),
        (status = 404, description = "Data Not Found")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    filters: Result<Query<SearchFilters>, QueryRejection>,
) -> StudentResult {
    let Query(filters) = filters?;
    let rows = state.students.search(&filters).await?;
    Ok(StudentReply::Matches(rows))
}

/// Same as [`search`] with the filters in a JSON body. No body means no filters.
#[utoipa::path(
    post, path = "/students/search", tag = "students",
    request_body = crate::openapi::SearchFiltersDoc,
    responses(
        (status = 202, description = "Matches under `student`, ascending id"),
        (status = 404, description = "Data Not Found"),
        (status = 422, description = "Malformed body")
    )
)]
pub async fn search_body(
    State(state): State<ServerState>,
    filters: Result<Json<SearchFilters>, JsonRejection>,
) -> StudentResult {
    let filters = body_or_empty(filters)?;
    let rows = state.students.search(&filters).await?;
    Ok(StudentReply::Matches(rows))
}
