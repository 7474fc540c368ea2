//! Resource identifier extractor reading the final path segment.

use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Extractor for the identifier at the end of the request path.
///
/// Reads the last segment of the URI path rather than a named route
/// parameter, so it works on any `/{collection}/{id}` route. The segment is
/// percent-decoded; it is not otherwise interpreted, format checks belong to
/// the store.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_user(IdPath(id): IdPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPath(pub String);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path();
        let segment = path.rsplit('/').next().unwrap_or_default();

        if segment.is_empty() {
            return Err(AppError::BadRequest(format!(
                "missing identifier in path '{}'",
                path
            )));
        }

        let id = urlencoding::decode(segment).map_err(|e| {
            AppError::BadRequest(format!("identifier '{}' is not valid UTF-8: {}", segment, e))
        })?;

        Ok(IdPath(id.into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<IdPath, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        IdPath::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_takes_last_segment() {
        let IdPath(id) = extract("/users/65f1c0ffee0000000000abcd").await.unwrap();
        assert_eq!(id, "65f1c0ffee0000000000abcd");
    }

    #[tokio::test]
    async fn test_ignores_query_string() {
        let IdPath(id) = extract("/api/v1/users/abc?verbose=true").await.unwrap();
        assert_eq!(id, "abc");
    }

    #[tokio::test]
    async fn test_percent_decodes() {
        let IdPath(id) = extract("/users/a%20b").await.unwrap();
        assert_eq!(id, "a b");
    }

    #[tokio::test]
    async fn test_trailing_slash_is_rejected() {
        let err = extract("/users/").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
