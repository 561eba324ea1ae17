use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_file,
        crate::handlers::upload_status::upload_status,
        crate::handlers::list_files::list_files,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        filedrop_core::models::Upload,
        filedrop_core::models::UploadStatus,
        filedrop_core::models::UploadAccepted,
        crate::handlers::health::HealthCheckResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "File upload lifecycle operations")
    )
)]
pub struct ApiDoc;
