use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Create/update body. Phone may also be sent as a JSON number.
#[derive(ToSchema)]
pub struct StudentInputDoc {
    #[schema(max_length = 191, example = "Ann Lee")]
    pub name: String,
    #[schema(max_length = 191, example = "Math")]
    pub course: String,
    #[schema(max_length = 191, example = "ann@example.com")]
    pub email: String,
    #[schema(pattern = "^[0-9]{10}$", example = "1234567890")]
    pub phone: String,
}

#[derive(ToSchema)]
pub struct SearchFiltersDoc {
    pub name: Option<String>,
    pub course: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: i32,
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::students::search,
        crate::routes::students::search_body,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            SearchFiltersDoc,
            StudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
