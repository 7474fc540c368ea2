//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing users",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
struct ApiInfo;

/// Combined OpenAPI documentation: service info plus the users domain paths
///
/// The users routes are mounted at the root, so the domain document is merged
/// rather than nested.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        ApiInfo::openapi().merge_from(domain_users::ApiDoc::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_has_info_and_user_paths() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Users API");
        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }
}
